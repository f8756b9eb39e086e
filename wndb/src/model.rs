//! グラインド対象の語彙データベースモデル
//!
//! このモジュールは、WNDB形式へ直列化される読み取り専用のモデルを提供します。
//!
//! - [`ModelData`]: 語彙単位、シンセット、動詞フレーム、動詞テンプレートの生データ
//! - [`Model`]: 検証済みの [`ModelData`] と、シンセットID、センスキー、
//!   小文字化した見出し語による索引
//!
//! モデルは外部で構築されたものを受け取ります。プログラムから組み立てる場合は
//! [`ModelBuilder`]、保存済みのスナップショットから読み込む場合は [`Model::read`] を使用します。
pub mod builder;
mod snapshot;

use hashbrown::HashMap;
use rkyv::{Archive, Deserialize, Serialize};

use crate::errors::{Result, WndbError};

pub use crate::model::builder::ModelBuilder;
pub use crate::model::snapshot::MODEL_MAGIC;

/// データファイルの区分となる品詞
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pos {
    Noun,
    Verb,
    Adj,
    Adv,
}

impl Pos {
    /// 出力順に並べたすべての区分
    pub const ALL: [Self; 4] = [Self::Noun, Self::Verb, Self::Adj, Self::Adv];

    /// 索引ファイルに書き込まれる品詞文字 (`n`, `v`, `a`, `r`)
    pub const fn as_char(self) -> char {
        match self {
            Self::Noun => 'n',
            Self::Verb => 'v',
            Self::Adj => 'a',
            Self::Adv => 'r',
        }
    }

    /// ファイル名の接尾辞 (`data.noun` の `noun` など)
    pub const fn name(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adj => "adj",
            Self::Adv => "adv",
        }
    }
}

/// シンセットの種類
///
/// 形容詞の衛星シンセット (`s`) は形容詞の区分 (`a`) に属します。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Archive, Serialize, Deserialize,
)]
pub enum SynsetType {
    Noun,
    Verb,
    Adj,
    Satellite,
    Adv,
}

impl SynsetType {
    pub const fn as_char(self) -> char {
        match self {
            Self::Noun => 'n',
            Self::Verb => 'v',
            Self::Adj => 'a',
            Self::Satellite => 's',
            Self::Adv => 'r',
        }
    }

    /// このシンセットが書き込まれるデータファイルの区分
    pub const fn pos(self) -> Pos {
        match self {
            Self::Noun => Pos::Noun,
            Self::Verb => Pos::Verb,
            Self::Adj | Self::Satellite => Pos::Adj,
            Self::Adv => Pos::Adv,
        }
    }
}

/// 関係の種類ごとにまとめた関係先
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct Relations {
    /// 関係の種類 (`hypernym` など)
    pub kind: String,

    /// 関係先のID(シンセット関係ならシンセットID、センス関係ならセンスキー)
    pub targets: Vec<String>,
}

/// センス
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct Sense {
    /// センスキー (`lemma%ss_type:lex_filenum:lex_id:head_word:head_id`)
    pub sense_key: String,

    /// このセンスが属するシンセットのID
    pub synset_id: String,

    /// 形容詞の位置制約 (`a`, `p`, `ip`)
    pub adj_position: Option<String>,

    /// タグ付きコーパスでの出現回数
    pub tag_count: Option<u32>,

    /// 動詞フレームID (`vtai` など)
    pub verb_frames: Vec<String>,

    /// 動詞テンプレート番号
    pub verb_templates: Vec<u32>,

    /// センス間の関係
    pub relations: Vec<Relations>,
}

/// 語彙単位: 見出し語と品詞、および順序付きのセンス
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct Lex {
    pub lemma: String,
    pub kind: SynsetType,

    /// 語彙単位内の順位順に並んだセンス
    pub senses: Vec<Sense>,

    /// 不規則な屈折形
    pub forms: Vec<String>,
}

/// シンセット
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct Synset {
    pub synset_id: String,
    pub kind: SynsetType,

    /// 辞書編集者ファイル名 (`noun.artifact` など)
    pub lexfile: String,

    /// 順序付きのメンバー見出し語
    pub members: Vec<String>,

    pub definitions: Vec<String>,
    pub examples: Vec<String>,

    /// シンセット間の関係
    pub relations: Vec<Relations>,
}

/// 動詞の統語フレーム
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct VerbFrame {
    pub id: String,
    pub text: String,
}

/// 動詞の例文テンプレート
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct VerbTemplate {
    pub id: u32,
    pub text: String,
}

/// モデルの生データ
///
/// スナップショットとして直列化される単位です。
#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct ModelData {
    pub lexes: Vec<Lex>,
    pub synsets: Vec<Synset>,
    pub verb_frames: Vec<VerbFrame>,
    pub verb_templates: Vec<VerbTemplate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SenseRef {
    lex: usize,
    sense: usize,
}

/// 語彙単位の中に位置付けられたセンス
///
/// 見出し語や品詞などの語彙単位側の属性と、語彙単位内の順位、
/// センスキーから読み取った lex id をまとめて参照できます。
#[derive(Debug, Clone, Copy)]
pub struct SenseEntry<'a> {
    lex: &'a Lex,
    sense: &'a Sense,
    lex_index: usize,
    lex_id: u32,
}

impl<'a> SenseEntry<'a> {
    #[inline(always)]
    pub fn lex(&self) -> &'a Lex {
        self.lex
    }

    #[inline(always)]
    pub fn sense(&self) -> &'a Sense {
        self.sense
    }

    #[inline(always)]
    pub fn lemma(&self) -> &'a str {
        &self.lex.lemma
    }

    #[inline(always)]
    pub fn kind(&self) -> SynsetType {
        self.lex.kind
    }

    #[inline(always)]
    pub fn pos(&self) -> Pos {
        self.lex.kind.pos()
    }

    #[inline(always)]
    pub fn sense_key(&self) -> &'a str {
        &self.sense.sense_key
    }

    #[inline(always)]
    pub fn synset_id(&self) -> &'a str {
        &self.sense.synset_id
    }

    #[inline(always)]
    pub fn tag_count(&self) -> Option<u32> {
        self.sense.tag_count
    }

    /// 語彙単位内での0始まりの順位
    #[inline(always)]
    pub fn lex_index(&self) -> usize {
        self.lex_index
    }

    /// センスキーの第3フィールドから読み取った lex id
    #[inline(always)]
    pub fn lex_id(&self) -> u32 {
        self.lex_id
    }

    /// 同じセンスを指しているかどうか
    pub fn is_same(&self, other: &SenseEntry) -> bool {
        std::ptr::eq(self.sense, other.sense)
    }
}

/// センスキーから lex id を読み取ります。
///
/// センスキーは `lemma%ss_type:lex_filenum:lex_id:head_word:head_id` の形式です。
pub(crate) fn parse_lex_id(sense_key: &str) -> Result<u32> {
    let malformed = || WndbError::malformed("sense key", sense_key, "lex id field");
    let (_, tail) = sense_key.rsplit_once('%').ok_or_else(malformed)?;
    let field = tail.split(':').nth(2).ok_or_else(malformed)?;
    field.parse::<u32>().map_err(|_| malformed())
}

/// 検証済みの読み取り専用モデル
///
/// シンセットIDからシンセット、センスキーからセンス、小文字化した見出し語から
/// 語彙単位への索引を持ちます。出力順に影響する走査はすべて [`ModelData`] の並び順に従います。
pub struct Model {
    data: ModelData,
    synset_index: HashMap<String, usize>,
    sense_index: HashMap<String, SenseRef>,
    lexes_by_lc_lemma: HashMap<String, Vec<usize>>,
    lex_ids: Vec<Vec<u32>>,
    members: Vec<Vec<SenseRef>>,
}

impl Model {
    /// 生データを検証し、索引を構築します。
    ///
    /// # エラー
    ///
    /// 次の場合に [`WndbError::Malformed`] を返します。
    ///
    /// - シンセットIDまたはセンスキーが重複している
    /// - センスキーから lex id を読み取れない
    /// - センスが存在しないシンセットを参照している
    /// - センスの見出し語がシンセットのメンバーに含まれていない
    /// - シンセットのメンバーに対応するセンスが存在しない、または複数存在する
    pub fn new(data: ModelData) -> Result<Self> {
        let mut synset_index = HashMap::with_capacity(data.synsets.len());
        for (i, synset) in data.synsets.iter().enumerate() {
            if synset_index.insert(synset.synset_id.clone(), i).is_some() {
                return Err(WndbError::malformed(
                    "synset id",
                    &synset.synset_id,
                    "duplicate synset",
                ));
            }
        }

        let mut sense_index = HashMap::new();
        let mut lexes_by_lc_lemma: HashMap<String, Vec<usize>> = HashMap::new();
        let mut lex_ids = Vec::with_capacity(data.lexes.len());
        let mut members: Vec<Vec<Option<SenseRef>>> = data
            .synsets
            .iter()
            .map(|synset| vec![None; synset.members.len()])
            .collect();

        for (lex_i, lex) in data.lexes.iter().enumerate() {
            lexes_by_lc_lemma
                .entry(lex.lemma.to_lowercase())
                .or_default()
                .push(lex_i);

            let mut ids = Vec::with_capacity(lex.senses.len());
            for (sense_i, sense) in lex.senses.iter().enumerate() {
                let sense_ref = SenseRef {
                    lex: lex_i,
                    sense: sense_i,
                };
                if sense_index
                    .insert(sense.sense_key.clone(), sense_ref)
                    .is_some()
                {
                    return Err(WndbError::malformed(
                        "sense key",
                        &sense.sense_key,
                        "duplicate sense",
                    ));
                }
                ids.push(parse_lex_id(&sense.sense_key)?);

                let &synset_i = synset_index.get(&sense.synset_id).ok_or_else(|| {
                    WndbError::malformed("synset id", &sense.synset_id, &sense.sense_key)
                })?;
                let synset = &data.synsets[synset_i];
                let member_i = synset
                    .members
                    .iter()
                    .position(|member| *member == lex.lemma)
                    .ok_or_else(|| {
                        WndbError::malformed("member", &lex.lemma, &synset.synset_id)
                    })?;
                let slot = &mut members[synset_i][member_i];
                if slot.is_some() {
                    return Err(WndbError::malformed(
                        "member",
                        &lex.lemma,
                        format!("{} has more than one owning sense", synset.synset_id),
                    ));
                }
                *slot = Some(sense_ref);
            }
            lex_ids.push(ids);
        }

        let members = members
            .into_iter()
            .zip(&data.synsets)
            .map(|(slots, synset)| {
                slots
                    .into_iter()
                    .zip(&synset.members)
                    .map(|(slot, lemma)| {
                        slot.ok_or_else(|| {
                            WndbError::malformed("member", lemma, &synset.synset_id)
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            data,
            synset_index,
            sense_index,
            lexes_by_lc_lemma,
            lex_ids,
            members,
        })
    }

    /// 生データを返します。
    pub fn data(&self) -> &ModelData {
        &self.data
    }

    fn entry(&self, sense_ref: SenseRef) -> SenseEntry<'_> {
        let lex = &self.data.lexes[sense_ref.lex];
        SenseEntry {
            lex,
            sense: &lex.senses[sense_ref.sense],
            lex_index: sense_ref.sense,
            lex_id: self.lex_ids[sense_ref.lex][sense_ref.sense],
        }
    }

    /// モデル順に並んだすべてのシンセット
    pub fn synsets(&self) -> impl Iterator<Item = &Synset> {
        self.data.synsets.iter()
    }

    /// 指定した区分に属するシンセットをモデル順に返します。
    pub fn synsets_of(&self, pos: Pos) -> impl Iterator<Item = &Synset> {
        self.synsets().filter(move |synset| synset.kind.pos() == pos)
    }

    pub fn synset(&self, synset_id: &str) -> Option<&Synset> {
        self.synset_index
            .get(synset_id)
            .map(|&i| &self.data.synsets[i])
    }

    pub fn sense(&self, sense_key: &str) -> Option<SenseEntry<'_>> {
        self.sense_index
            .get(sense_key)
            .map(|&sense_ref| self.entry(sense_ref))
    }

    /// モデル順に並んだすべてのセンス
    pub fn senses(&self) -> impl Iterator<Item = SenseEntry<'_>> {
        self.data.lexes.iter().enumerate().flat_map(move |(lex, l)| {
            (0..l.senses.len()).map(move |sense| self.entry(SenseRef { lex, sense }))
        })
    }

    /// 小文字化した見出し語を持つ語彙単位をモデル順に返します。
    pub fn lexes(&self, lc_lemma: &str) -> impl Iterator<Item = &Lex> {
        self.lexes_by_lc_lemma
            .get(lc_lemma)
            .into_iter()
            .flatten()
            .map(|&i| &self.data.lexes[i])
    }

    /// 小文字化した見出し語の一覧を昇順で返します。
    pub fn lc_lemmas(&self) -> Vec<&str> {
        let mut lemmas: Vec<&str> = self.lexes_by_lc_lemma.keys().map(String::as_str).collect();
        lemmas.sort_unstable();
        lemmas
    }

    /// 指定した語彙単位のセンスを返します。
    pub fn senses_of_lex<'a>(&'a self, lex: &'a Lex) -> impl Iterator<Item = SenseEntry<'a>> {
        lex.senses
            .iter()
            .filter_map(move |sense| self.sense(&sense.sense_key))
    }

    /// シンセットのメンバーを所有するセンスを、メンバー順に返します。
    ///
    /// モデルに属さないシンセットに対しては空になります。
    pub fn members(&self, synset: &Synset) -> impl Iterator<Item = SenseEntry<'_>> {
        self.synset_index
            .get(&synset.synset_id)
            .map(|&i| self.members[i].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&sense_ref| self.entry(sense_ref))
    }

    /// 見出し語のシンセット内での1始まりのメンバー番号
    pub fn member_number(&self, synset: &Synset, lemma: &str) -> Option<usize> {
        synset
            .members
            .iter()
            .position(|member| member == lemma)
            .map(|i| i + 1)
    }

    pub fn verb_frames(&self) -> &[VerbFrame] {
        &self.data.verb_frames
    }

    pub fn verb_templates(&self) -> &[VerbTemplate] {
        &self.data.verb_templates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lex_id() {
        assert_eq!(parse_lex_id("car%1:06:00::").unwrap(), 0);
        assert_eq!(parse_lex_id("bank%1:17:01::").unwrap(), 1);
        assert_eq!(parse_lex_id("fast%5:00:00:quick:01").unwrap(), 0);
        assert_eq!(parse_lex_id("50%_off%1:21:12::").unwrap(), 12);
        assert!(parse_lex_id("car").is_err());
        assert!(parse_lex_id("car%1:06").is_err());
        assert!(parse_lex_id("car%1:06:xx::").is_err());
    }

    #[test]
    fn test_synset_type_partition() {
        assert_eq!(SynsetType::Satellite.pos(), Pos::Adj);
        assert_eq!(SynsetType::Satellite.as_char(), 's');
    }
}
