//! 単語索引ファイルの出力
//!
//! 小文字化した見出し語と品詞の組ごとに1行を書き出します。
//!
//! ```text
//! lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt synset_offset...
//! ```

use std::collections::BTreeSet;
use std::io::Write;

use crate::coder::code_relation;
use crate::config::GrindConfig;
use crate::errors::{CodingError, Result, WndbError};
use crate::incompat::Incompats;
use crate::model::{Model, Pos, SenseEntry};
use crate::offsets::OffsetTable;
use crate::order::SenseOrderer;

/// `index.{noun,verb,adj,adv}` を書き出します。
pub struct WordIndexer<'a> {
    model: &'a Model,
    config: &'a GrindConfig,
    offsets: &'a OffsetTable,
    orderer: SenseOrderer<'a>,
}

#[derive(Debug, Default)]
struct IndexEntry<'m> {
    synset_ids: Vec<&'m str>,
    pointers: BTreeSet<&'static str>,
    tagged: usize,
}

impl<'a> WordIndexer<'a> {
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

    fn collect(&self, senses: &[SenseEntry<'a>], incompats: &mut Incompats) -> Result<IndexEntry<'a>> {
        let pointer_compat = self.config.flags.pointer_compat();
        let mut entry = IndexEntry::default();
        for sense in senses {
            if !entry.synset_ids.contains(&sense.synset_id()) {
                entry.synset_ids.push(sense.synset_id());
            }
            if sense.tag_count().is_some_and(|count| count > 0) {
                entry.tagged += 1;
            }

            let synset = self.model.synset(sense.synset_id()).ok_or_else(|| {
                WndbError::malformed("synset id", sense.synset_id(), sense.sense_key())
            })?;
            for relations in &synset.relations {
                match code_relation(&relations.kind, sense.kind(), pointer_compat) {
                    Ok(symbol) => {
                        entry.pointers.insert(symbol);
                    }
                    Err(CodingError::Incompatible(violation)) => incompats.record(violation),
                    Err(CodingError::Malformed(e)) => {
                        return Err(e.within(&synset.synset_id).into());
                    }
                }
            }
            for relations in &sense.sense().relations {
                match code_relation(&relations.kind, sense.kind(), pointer_compat) {
                    Ok(symbol) => {
                        entry.pointers.insert(symbol);
                    }
                    Err(CodingError::Incompatible(violation)) => incompats.record(violation),
                    Err(CodingError::Malformed(e)) => {
                        log::warn!("Discarded relation {e} of {}", sense.sense_key());
                    }
                }
            }
        }
        Ok(entry)
    }

    /// ヘッダーに続けて、区分の索引行を見出し語の昇順に書き出します。
    ///
    /// # 戻り値
    ///
    /// 書き出した行の数
    pub fn make<W: Write>(&self, wtr: &mut W, pos: Pos) -> Result<usize> {
        wtr.write_all(self.config.header.text().as_bytes())?;

        let mut incompats = Incompats::new();
        let groups = self.orderer.group_by_lemma(self.model, pos)?;
        for (key, senses) in &groups {
            let entry = self.collect(senses, &mut incompats)?;
            let n = entry.synset_ids.len();

            let mut line = format!("{key} {} {n} {}", pos.as_char(), entry.pointers.len());
            for pointer in &entry.pointers {
                line.push(' ');
                line.push_str(pointer);
            }
            line.push_str(&format!(" {n} {}", entry.tagged));
            for synset_id in &entry.synset_ids {
                let offset = self.offsets.get(synset_id).ok_or_else(|| {
                    WndbError::malformed("synset id", *synset_id, "no resolved offset")
                })?;
                line.push_str(&format!(" {offset:08}"));
            }
            line.push_str("  \n");
            wtr.write_all(line.as_bytes())?;
        }
        incompats.report(&format!("index.{}", pos.name()));
        Ok(groups.len())
    }
}
