//! データファイルの出力

use std::io::Write;

use crate::config::GrindConfig;
use crate::errors::{Result, WndbError};
use crate::incompat::Incompats;
use crate::model::{Model, Pos, Synset};
use crate::offsets::OffsetTable;
use crate::record::{PLACEHOLDER_OFFSET, SynsetEncoder};

/// `data.{noun,verb,adj,adv}` を書き出します。
pub struct DataGrinder<'a> {
    model: &'a Model,
    config: &'a GrindConfig,
    offsets: &'a OffsetTable,
}

impl<'a> DataGrinder<'a> {
    pub fn new(model: &'a Model, config: &'a GrindConfig, offsets: &'a OffsetTable) -> Self {
        Self {
            model,
            config,
            offsets,
        }
    }

    /// 解決済みのオフセットで1件のシンセットを符号化します。
    pub fn line(&self, synset: &Synset) -> Result<(String, Incompats)> {
        let offset = self.resolved(synset)?;
        let encoded = SynsetEncoder::new(self.model, self.config.flags, |id| self.offsets.get(id))
            .verbose(true)
            .encode(synset, offset)?;
        Ok((encoded.line, encoded.incompats))
    }

    fn resolved(&self, synset: &Synset) -> Result<u64> {
        self.offsets.get(&synset.synset_id).ok_or_else(|| {
            WndbError::malformed("synset id", &synset.synset_id, "no resolved offset")
        })
    }

    /// ヘッダーに続けて、区分のシンセットをモデル順に書き出します。
    ///
    /// 各レコードを書く前に、書き込み位置が解決済みのオフセットと一致することを確認します。
    ///
    /// # 戻り値
    ///
    /// 書き出したシンセットの数
    ///
    /// # エラー
    ///
    /// 書き込み位置が解決済みのオフセットと一致しない場合、または区分の終端が
    /// 解決時の終端と一致しない場合は、直前のレコードの解決時と出力時の表現を含む
    /// [`WndbError::Malformed`] を返します。
    pub fn make<W: Write>(&self, wtr: &mut W, pos: Pos) -> Result<usize> {
        let header = self.config.header.text();
        wtr.write_all(header.as_bytes())?;

        let mut incompats = Incompats::new();
        let mut offset = header.len() as u64;
        let mut previous: Option<&Synset> = None;
        let mut n = 0;
        for synset in self.model.synsets_of(pos) {
            let resolved = self.resolved(synset)?;
            if resolved != offset {
                return Err(self.miscomputed(&synset.synset_id, previous, resolved, offset));
            }
            let (line, line_incompats) = self.line(synset)?;
            wtr.write_all(line.as_bytes())?;
            incompats.merge(line_incompats);
            offset += line.len() as u64;
            previous = Some(synset);
            n += 1;
        }
        if let Some(end) = self.offsets.end(pos).filter(|&end| end != offset) {
            return Err(self.miscomputed(&format!("end of data.{}", pos.name()), previous, end, offset));
        }
        incompats.report(&format!("data.{}", pos.name()));
        Ok(n)
    }

    fn miscomputed(
        &self,
        what: &str,
        previous: Option<&Synset>,
        resolved: u64,
        offset: u64,
    ) -> WndbError {
        let context = match previous {
            Some(previous) => {
                let then = SynsetEncoder::placeholder(self.model, self.config.flags)
                    .encode(previous, PLACEHOLDER_OFFSET)
                    .map(|e| e.line)
                    .unwrap_or_default();
                let now = self
                    .resolved(previous)
                    .and_then(|own| {
                        SynsetEncoder::new(self.model, self.config.flags, |id| self.offsets.get(id))
                            .encode(previous, own)
                    })
                    .map(|e| e.line)
                    .unwrap_or_default();
                format!("[then]={then}[now ]={now}")
            }
            None => "first record".to_string(),
        };
        log::error!("miscomputed offset for {what}");
        WndbError::malformed(
            "offset",
            format!("{what} resolved at {resolved} but written at {offset}"),
            context,
        )
    }
}
