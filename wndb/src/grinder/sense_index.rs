//! センス索引ファイルの出力
//!
//! センスキーごとに1行を、センスキーの大文字小文字を区別しない昇順で書き出します。
//!
//! ```text
//! sense_key synset_offset sense_number tag_cnt
//! ```

use std::collections::BTreeMap;
use std::io::Write;

use crate::config::GrindConfig;
use crate::errors::{Result, WndbError};
use crate::format::escape;
use crate::model::{Model, Pos, SenseEntry};
use crate::offsets::OffsetTable;
use crate::order::SenseOrderer;

/// `index.sense` を書き出します。
pub struct SenseIndexer<'a> {
    model: &'a Model,
    config: &'a GrindConfig,
    offsets: &'a OffsetTable,
    orderer: SenseOrderer<'a>,
}

impl<'a> SenseIndexer<'a> {
    pub fn new(
        model: &'a Model,
        config: &'a GrindConfig,
        offsets: &'a OffsetTable,
        orderer: SenseOrderer<'a>,
    ) -> Self {
        Self {
            model,
            config,
            offsets,
            orderer,
        }
    }

    /// 見出し語と品詞の組ごとに、正準順序で重複を除いたシンセットIDの並び
    fn synset_orders(&self) -> Result<BTreeMap<(Pos, String), Vec<&'a str>>> {
        let mut orders = BTreeMap::new();
        for pos in Pos::ALL {
            for (key, senses) in self.orderer.group_by_lemma(self.model, pos)? {
                let mut synset_ids: Vec<&str> = vec![];
                for sense in &senses {
                    if !synset_ids.contains(&sense.synset_id()) {
                        synset_ids.push(sense.synset_id());
                    }
                }
                orders.insert((pos, key), synset_ids);
            }
        }
        Ok(orders)
    }

    /// センスの1始まりの番号
    ///
    /// 通常は見出し語と品詞の組の中での、センスのシンセットの順位です。
    /// [`Flags::NO_REINDEX`](crate::flags::Flags::NO_REINDEX) の下では語彙単位内の順位です。
    fn sense_number(
        &self,
        sense: &SenseEntry,
        orders: &BTreeMap<(Pos, String), Vec<&str>>,
    ) -> Result<usize> {
        if self.config.flags.no_reindex() {
            return Ok(sense.lex_index() + 1);
        }
        let key = (sense.pos(), escape(&sense.lemma().to_lowercase()).into_owned());
        orders
            .get(&key)
            .and_then(|synset_ids| synset_ids.iter().position(|id| *id == sense.synset_id()))
            .map(|i| i + 1)
            .ok_or_else(|| {
                WndbError::invalid_state("sense number", format!("{} is not grouped", sense.sense_key()))
            })
    }

    /// すべてのセンスの索引行を書き出します。
    ///
    /// # 戻り値
    ///
    /// 書き出した行の数
    pub fn make<W: Write>(&self, wtr: &mut W) -> Result<usize> {
        let orders = self.synset_orders()?;

        let mut senses: Vec<SenseEntry> = self.model.senses().collect();
        senses.sort_by_cached_key(|sense| (sense.sense_key().to_lowercase(), sense.sense_key()));

        for sense in &senses {
            let offset = self.offsets.get(sense.synset_id()).ok_or_else(|| {
                WndbError::malformed("synset id", sense.synset_id(), sense.sense_key())
            })?;
            let sense_number = self.sense_number(sense, &orders)?;
            writeln!(
                wtr,
                "{} {offset:08} {sense_number} {}",
                sense.sense_key(),
                sense.tag_count().unwrap_or(0)
            )?;
        }
        log::info!("Senses: {}", senses.len());
        Ok(senses.len())
    }
}
