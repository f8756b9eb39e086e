//! モデル構築のためのビルダー
//!
//! このモジュールは、プログラムから [`Model`] を組み立てるためのビルダーを提供します。
//! 各要素は値を消費するメソッドチェーンで記述します。
//!
//! ```
//! use wndb::model::{Lex, ModelBuilder, Sense, Synset, SynsetType};
//!
//! let model = ModelBuilder::new()
//!     .synset(
//!         Synset::new("02958343-n", SynsetType::Noun, "noun.artifact")
//!             .member("car")
//!             .definition("a motor vehicle"),
//!     )
//!     .lex(Lex::new("car", SynsetType::Noun).sense(Sense::new("car%1:06:00::", "02958343-n")))
//!     .build()
//!     .unwrap();
//! assert!(model.synset("02958343-n").is_some());
//! ```

use crate::errors::Result;
use crate::model::{
    Lex, Model, ModelData, Relations, Sense, Synset, SynsetType, VerbFrame, VerbTemplate,
};

fn push_relations<I, S>(relations: &mut Vec<Relations>, kind: &str, targets: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let targets = targets.into_iter().map(Into::into);
    match relations.iter_mut().find(|r| r.kind == kind) {
        Some(group) => group.targets.extend(targets),
        None => relations.push(Relations {
            kind: kind.to_string(),
            targets: targets.collect(),
        }),
    }
}

impl Sense {
    /// 属性が空のセンスを生成します。
    pub fn new<K, S>(sense_key: K, synset_id: S) -> Self
    where
        K: Into<String>,
        S: Into<String>,
    {
        Self {
            sense_key: sense_key.into(),
            synset_id: synset_id.into(),
            adj_position: None,
            tag_count: None,
            verb_frames: vec![],
            verb_templates: vec![],
            relations: vec![],
        }
    }

    pub fn adj_position<S: Into<String>>(mut self, position: S) -> Self {
        self.adj_position = Some(position.into());
        self
    }

    pub fn tag_count(mut self, count: u32) -> Self {
        self.tag_count = Some(count);
        self
    }

    pub fn verb_frame<S: Into<String>>(mut self, frame_id: S) -> Self {
        self.verb_frames.push(frame_id.into());
        self
    }

    pub fn verb_template(mut self, template_id: u32) -> Self {
        self.verb_templates.push(template_id);
        self
    }

    /// センス間の関係を追加します。同じ種類の関係はひとつのグループにまとめられます。
    pub fn relation<I, S>(mut self, kind: &str, target_sense_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_relations(&mut self.relations, kind, target_sense_keys);
        self
    }
}

impl Lex {
    pub fn new<L: Into<String>>(lemma: L, kind: SynsetType) -> Self {
        Self {
            lemma: lemma.into(),
            kind,
            senses: vec![],
            forms: vec![],
        }
    }

    /// センスを末尾に追加します。追加順が語彙単位内の順位になります。
    pub fn sense(mut self, sense: Sense) -> Self {
        self.senses.push(sense);
        self
    }

    pub fn form<S: Into<String>>(mut self, form: S) -> Self {
        self.forms.push(form.into());
        self
    }
}

impl Synset {
    pub fn new<I, L>(synset_id: I, kind: SynsetType, lexfile: L) -> Self
    where
        I: Into<String>,
        L: Into<String>,
    {
        Self {
            synset_id: synset_id.into(),
            kind,
            lexfile: lexfile.into(),
            members: vec![],
            definitions: vec![],
            examples: vec![],
            relations: vec![],
        }
    }

    pub fn member<S: Into<String>>(mut self, lemma: S) -> Self {
        self.members.push(lemma.into());
        self
    }

    pub fn definition<S: Into<String>>(mut self, definition: S) -> Self {
        self.definitions.push(definition.into());
        self
    }

    pub fn example<S: Into<String>>(mut self, example: S) -> Self {
        self.examples.push(example.into());
        self
    }

    /// シンセット間の関係を追加します。同じ種類の関係はひとつのグループにまとめられます。
    pub fn relation<I, S>(mut self, kind: &str, target_synset_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_relations(&mut self.relations, kind, target_synset_ids);
        self
    }
}

/// [`Model`] を組み立てるビルダー
#[derive(Debug, Default)]
pub struct ModelBuilder {
    data: ModelData,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lex(mut self, lex: Lex) -> Self {
        self.data.lexes.push(lex);
        self
    }

    pub fn synset(mut self, synset: Synset) -> Self {
        self.data.synsets.push(synset);
        self
    }

    pub fn verb_frame<I, T>(mut self, id: I, text: T) -> Self
    where
        I: Into<String>,
        T: Into<String>,
    {
        self.data.verb_frames.push(VerbFrame {
            id: id.into(),
            text: text.into(),
        });
        self
    }

    pub fn verb_template<T: Into<String>>(mut self, id: u32, text: T) -> Self {
        self.data.verb_templates.push(VerbTemplate {
            id,
            text: text.into(),
        });
        self
    }

    /// モデルを検証して構築します。
    ///
    /// # エラー
    ///
    /// 検証に失敗した場合は [`Model::new`] と同じエラーを返します。
    pub fn build(self) -> Result<Model> {
        Model::new(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::errors::WndbError;

    fn car() -> ModelBuilder {
        ModelBuilder::new()
            .synset(
                Synset::new("car-n", SynsetType::Noun, "noun.artifact")
                    .member("car")
                    .member("auto")
                    .definition("a motor vehicle"),
            )
            .lex(Lex::new("car", SynsetType::Noun).sense(Sense::new("car%1:06:00::", "car-n")))
            .lex(Lex::new("auto", SynsetType::Noun).sense(Sense::new("auto%1:06:00::", "car-n")))
    }

    #[test]
    fn test_build_indexes() {
        let model = car().build().unwrap();
        let synset = model.synset("car-n").unwrap();
        let members: Vec<_> = model.members(synset).map(|s| s.sense_key()).collect();
        assert_eq!(members, vec!["car%1:06:00::", "auto%1:06:00::"]);
        assert_eq!(model.member_number(synset, "auto"), Some(2));
        assert_eq!(model.sense("auto%1:06:00::").unwrap().lemma(), "auto");
        assert_eq!(model.lc_lemmas(), vec!["auto", "car"]);
    }

    #[test]
    fn test_relations_are_grouped_by_kind() {
        let synset = Synset::new("x", SynsetType::Noun, "noun.Tops")
            .relation("hypernym", ["a"])
            .relation("hyponym", ["b"])
            .relation("hypernym", ["c"]);
        assert_eq!(synset.relations.len(), 2);
        assert_eq!(synset.relations[0].targets, vec!["a", "c"]);
    }

    #[test]
    fn test_member_without_sense() {
        let result = car()
            .synset(
                Synset::new("truck-n", SynsetType::Noun, "noun.artifact")
                    .member("truck")
                    .definition("an automotive vehicle"),
            )
            .build();
        assert!(matches!(result, Err(WndbError::Malformed(e)) if e.value() == "truck"));
    }

    #[test]
    fn test_sense_of_unknown_synset() {
        let result = car()
            .lex(Lex::new("bus", SynsetType::Noun).sense(Sense::new("bus%1:06:00::", "bus-n")))
            .build();
        assert!(matches!(result, Err(WndbError::Malformed(e)) if e.value() == "bus-n"));
    }

    #[test]
    fn test_duplicate_sense_key() {
        let result = car()
            .lex(Lex::new("car", SynsetType::Noun).sense(Sense::new("car%1:06:00::", "car-n")))
            .build();
        assert!(matches!(result, Err(WndbError::Malformed(_))));
    }
}
