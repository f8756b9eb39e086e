//! シンセットのオフセット解決
//!
//! 各区分(名詞、動詞、形容詞、副詞)のデータファイルで、シンセットのレコードが
//! 始まるバイト位置を求めます。区分ごとにヘッダーの長さから数え始め、
//! 仮のオフセットで符号化したレコードのバイト長を順に積み上げます。

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use crate::config::GrindConfig;
use crate::errors::{Result, WndbError};
use crate::format::check_offset;
use crate::model::{Model, Pos};
use crate::record::{PLACEHOLDER_OFFSET, SynsetEncoder};

/// シンセットIDからオフセットへの対応表
///
/// 区分ごとに独立したアドレス空間を持つため、異なる区分のシンセットが
/// 同じオフセットを持つことがあります。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetTable {
    offsets: BTreeMap<String, u64>,

    /// 解決時に求めた区分ごとのデータファイルの終端
    ends: BTreeMap<Pos, u64>,
}

impl OffsetTable {
    /// モデルのすべてのシンセットのオフセットを求めます。
    ///
    /// # エラー
    ///
    /// シンセットの符号化に失敗した場合、またはオフセットが8桁に収まらない場合に
    /// エラーを返します。
    pub fn resolve(model: &Model, config: &GrindConfig) -> Result<Self> {
        let encoder = SynsetEncoder::placeholder(model, config.flags);
        let mut offsets = BTreeMap::new();
        let mut ends = BTreeMap::new();
        for pos in Pos::ALL {
            let mut offset = config.header.len();
            for synset in model.synsets_of(pos) {
                let encoded = encoder.encode(synset, PLACEHOLDER_OFFSET)?;
                offsets.insert(synset.synset_id.clone(), check_offset(offset)?);
                offset += encoded.line.len() as u64;
            }
            ends.insert(pos, offset);
        }
        Ok(Self { offsets, ends })
    }

    /// 区分のデータファイルの解決時のバイト長
    ///
    /// [`OffsetTable::read_map`] で読み込んだ表は終端を持たず、`None` を返します。
    pub fn end(&self, pos: Pos) -> Option<u64> {
        self.ends.get(&pos).copied()
    }

    pub fn get(&self, synset_id: &str) -> Option<u64> {
        self.offsets.get(synset_id).copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// シンセットIDの昇順に並んだ対応
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.offsets.iter().map(|(id, &offset)| (id.as_str(), offset))
    }

    /// 対応表を `synsetid offset` の行としてシンセットIDの昇順に書き出します。
    pub fn write_map<W: Write>(&self, mut wtr: W) -> Result<()> {
        for (synset_id, offset) in self.iter() {
            writeln!(wtr, "{synset_id} {offset}")?;
        }
        Ok(())
    }

    /// [`OffsetTable::write_map`] が書き出した対応表を読み込みます。
    ///
    /// # エラー
    ///
    /// 2列でない行やオフセットを整数として読めない行がある場合にエラーを返します。
    pub fn read_map<R: BufRead>(rdr: R) -> Result<Self> {
        let mut offsets = BTreeMap::new();
        for (i, line) in rdr.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(synset_id), Some(offset), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(WndbError::invalid_format(
                    "offset map",
                    format!("line {}: expected `synsetid offset`, got {line:?}", i + 1),
                ));
            };
            offsets.insert(synset_id.to_string(), offset.parse::<u64>()?);
        }
        Ok(Self {
            offsets,
            ends: BTreeMap::new(),
        })
    }
}

impl FromIterator<(String, u64)> for OffsetTable {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            offsets: iter.into_iter().collect(),
            ends: BTreeMap::new(),
        }
    }
}
