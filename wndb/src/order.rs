//! センスの決定的な全順序とグループ化
//!
//! センス番号や索引のオフセットの並びは、次の順序で決まります。
//!
//! 1. タグ付き出現回数の降順(回数を持たないセンスは最後)
//! 2. レガシー参照順序での順位(順位を持つセンスが先、持たないセンス同士は等しい)
//! 3. シンセット種類の文字の昇順
//! 4. 語彙単位内の順位の昇順
//! 5. 見出し語の大文字小文字を区別しない昇順
//! 6. 見出し語の大文字小文字を区別する昇順([`CaseOrder`] による)
//! 7. センスキーの昇順
//!
//! すべてのキーが等しい異なるセンスはモデルの誤りとして扱います。

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io::BufRead;

use hashbrown::HashMap;

use crate::errors::{Result, WndbError};
use crate::format::escape;
use crate::model::{Model, Pos, SenseEntry};

/// 大文字と小文字だけが異なる見出し語の並べ方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseOrder {
    /// 大文字を先にする (`Bank` < `bank`)
    #[default]
    UpperFirst,
    /// 小文字を先にする (`bank` < `Bank`)
    LowerFirst,
}

fn swap_case(c: char) -> char {
    if c.is_uppercase() {
        c.to_lowercase().next().unwrap_or(c)
    } else if c.is_lowercase() {
        c.to_uppercase().next().unwrap_or(c)
    } else {
        c
    }
}

impl CaseOrder {
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::UpperFirst => a.cmp(b),
            Self::LowerFirst => a.chars().map(swap_case).cmp(b.chars().map(swap_case)),
        }
    }
}

/// センスキーの外部参照順序
///
/// 参照索引から読み込んだセンスキーごとの順位を保持します。
#[derive(Debug, Clone, Default)]
pub struct LegacyOrder {
    ranks: HashMap<String, u32>,
}

impl LegacyOrder {
    /// 空の参照順序を生成します。すべてのセンスが順位を持ちません。
    pub fn new() -> Self {
        Self::default()
    }

    /// 1行に `sensekey rank` を持つテキストから参照順序を読み込みます。
    ///
    /// 3列目以降は無視します。空行は読み飛ばします。
    ///
    /// # エラー
    ///
    /// 順位の列がない、または整数として読めない行がある場合にエラーを返します。
    pub fn from_reader<R: BufRead>(rdr: R) -> Result<Self> {
        let mut ranks = HashMap::new();
        for (i, line) in rdr.lines().enumerate() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let Some(sense_key) = fields.next() else {
                continue;
            };
            let rank = fields
                .next()
                .and_then(|rank| rank.parse::<u32>().ok())
                .ok_or_else(|| {
                    WndbError::invalid_format(
                        "legacy order",
                        format!("line {}: expected `sensekey rank`, got {line:?}", i + 1),
                    )
                })?;
            ranks.insert(sense_key.to_string(), rank);
        }
        Ok(Self { ranks })
    }

    pub fn rank(&self, sense_key: &str) -> Option<u32> {
        self.ranks.get(sense_key).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// 順位を持つセンスを先に、持たないセンス同士を等しく並べます。
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.rank(a), self.rank(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// センスの正準順序
#[derive(Debug, Clone, Copy)]
pub struct SenseOrderer<'a> {
    legacy: &'a LegacyOrder,
    case_order: CaseOrder,
}

impl<'a> SenseOrderer<'a> {
    pub fn new(legacy: &'a LegacyOrder, case_order: CaseOrder) -> Self {
        Self { legacy, case_order }
    }

    pub fn compare(&self, a: &SenseEntry, b: &SenseEntry) -> Ordering {
        b.tag_count()
            .cmp(&a.tag_count())
            .then_with(|| self.legacy.compare(a.sense_key(), b.sense_key()))
            .then_with(|| a.kind().as_char().cmp(&b.kind().as_char()))
            .then_with(|| a.lex_index().cmp(&b.lex_index()))
            .then_with(|| a.lemma().to_lowercase().cmp(&b.lemma().to_lowercase()))
            .then_with(|| self.case_order.compare(a.lemma(), b.lemma()))
            .then_with(|| a.sense_key().cmp(b.sense_key()))
    }

    /// センスを正準順序に並べ替えます。
    ///
    /// # エラー
    ///
    /// 区別できない異なるセンスが残った場合は [`WndbError::Malformed`] を返します。
    pub fn sort(&self, senses: &mut [SenseEntry]) -> Result<()> {
        senses.sort_by(|a, b| self.compare(a, b));
        for pair in senses.windows(2) {
            if self.compare(&pair[0], &pair[1]) == Ordering::Equal && !pair[0].is_same(&pair[1]) {
                return Err(WndbError::malformed(
                    "sense order",
                    format!("{} {}", pair[0].sense_key(), pair[1].sense_key()),
                    "indistinguishable senses",
                ));
            }
        }
        Ok(())
    }

    /// 指定した区分のセンスを、エスケープした小文字の見出し語ごとにまとめます。
    ///
    /// グループは見出し語の昇順、グループ内のセンスは正準順序に並びます。
    pub fn group_by_lemma<'m>(
        &self,
        model: &'m Model,
        pos: Pos,
    ) -> Result<BTreeMap<String, Vec<SenseEntry<'m>>>> {
        let mut groups: BTreeMap<String, Vec<SenseEntry<'m>>> = BTreeMap::new();
        for lc_lemma in model.lc_lemmas() {
            let senses = model
                .lexes(lc_lemma)
                .filter(|lex| lex.kind.pos() == pos)
                .flat_map(|lex| model.senses_of_lex(lex));
            groups
                .entry(escape(lc_lemma).into_owned())
                .or_default()
                .extend(senses);
        }
        groups.retain(|_, senses| !senses.is_empty());
        for senses in groups.values_mut() {
            self.sort(senses)?;
        }
        Ok(groups)
    }
}
