//! WNDBファイル一式の出力
//!
//! [`Grinder::grind`] は次の順に処理します。
//!
//! 1. オフセットの解決 ([`OffsetTable::resolve`])
//! 2. データファイル ([`DataGrinder`])
//! 3. 単語索引ファイル ([`WordIndexer`])
//! 4. センス索引ファイル ([`SenseIndexer`])
//! 5. 補助ファイル ([`flat`])
//!
//! 各ファイルは専用のバッファ付きライターで書き出し、次のファイルを開く前に
//! フラッシュして閉じます。
pub mod data;
pub mod flat;
pub mod sense_index;
pub mod word_index;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::GrindConfig;
use crate::errors::{Result, WndbError};
use crate::model::{Model, Pos};
use crate::offsets::OffsetTable;
use crate::order::{LegacyOrder, SenseOrderer};

pub use crate::grinder::data::DataGrinder;
pub use crate::grinder::sense_index::SenseIndexer;
pub use crate::grinder::word_index::WordIndexer;

/// オフセット表のファイル名
pub const OFFSET_MAP_FILE: &str = "offsets.map";

/// ファイルを作成し、書き込み関数の完了後にフラッシュして閉じます。
pub fn write_file<F, T>(path: &Path, f: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T>,
{
    let mut wtr = BufWriter::new(File::create(path)?);
    let result = f(&mut wtr)?;
    wtr.flush()?;
    Ok(result)
}

/// 区分ごとの件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PosCounts {
    pub noun: usize,
    pub verb: usize,
    pub adj: usize,
    pub adv: usize,
}

impl PosCounts {
    fn set(&mut self, pos: Pos, n: usize) {
        match pos {
            Pos::Noun => self.noun = n,
            Pos::Verb => self.verb = n,
            Pos::Adj => self.adj = n,
            Pos::Adv => self.adv = n,
        }
    }

    pub fn total(&self) -> usize {
        self.noun + self.verb + self.adj + self.adv
    }

    fn log(&self, what: &str) {
        log::info!(
            "{what}: {} [n:{} v:{} a:{} r:{}]",
            self.total(),
            self.noun,
            self.verb,
            self.adj,
            self.adv
        );
    }
}

/// グラインドの結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrindStats {
    pub synsets: PosCounts,
    pub indexes: PosCounts,
    pub senses: usize,
    pub morphs: PosCounts,
}

/// モデルをWNDBファイル一式に変換します。
pub struct Grinder<'a> {
    model: &'a Model,
    config: GrindConfig,
    legacy: LegacyOrder,
}

impl<'a> Grinder<'a> {
    pub fn new(model: &'a Model, config: GrindConfig) -> Self {
        Self {
            model,
            config,
            legacy: LegacyOrder::new(),
        }
    }

    /// センス順序の第2キーに使う参照順序を設定します。
    pub fn legacy_order(mut self, legacy: LegacyOrder) -> Self {
        self.legacy = legacy;
        self
    }

    fn orderer(&self) -> SenseOrderer<'_> {
        SenseOrderer::new(&self.legacy, self.config.case_order)
    }

    /// オフセットを解決します。
    pub fn offsets(&self) -> Result<OffsetTable> {
        OffsetTable::resolve(self.model, &self.config)
    }

    /// オフセットを解決し、`out_dir` に `offsets.map` を書き出します。
    pub fn grind_offsets(&self, out_dir: &Path) -> Result<OffsetTable> {
        fs::create_dir_all(out_dir)?;
        let offsets = self.offsets()?;
        write_file(&out_dir.join(OFFSET_MAP_FILE), |w| offsets.write_map(w))?;
        log::info!("Offsets: {}", offsets.len());
        Ok(offsets)
    }

    /// 1件のシンセットのデータ行を返します。
    ///
    /// # エラー
    ///
    /// シンセットが存在しない場合は [`WndbError::InvalidArgument`] を返します。
    pub fn produce_line(&self, synset_id: &str) -> Result<String> {
        let synset = self.model.synset(synset_id).ok_or_else(|| {
            WndbError::invalid_argument("synset_id", format!("no synset {synset_id}"))
        })?;
        let offsets = self.offsets()?;
        let (line, mut incompats) = DataGrinder::new(self.model, &self.config, &offsets).line(synset)?;
        incompats.report(synset_id);
        Ok(line)
    }

    /// `out_dir` にWNDBファイル一式を書き出します。ディレクトリがなければ作成します。
    ///
    /// # エラー
    ///
    /// 書き込みに失敗した場合、またはモデルが致命的な不正入力を含む場合にエラーを返します。
    pub fn grind(&self, out_dir: &Path) -> Result<GrindStats> {
        fs::create_dir_all(out_dir)?;
        let offsets = self.offsets()?;
        let orderer = self.orderer();
        let mut stats = GrindStats::default();

        let data = DataGrinder::new(self.model, &self.config, &offsets);
        for pos in Pos::ALL {
            let path = out_dir.join(format!("data.{}", pos.name()));
            stats.synsets.set(pos, write_file(&path, |w| data.make(w, pos))?);
        }
        stats.synsets.log("Synsets");

        let words = WordIndexer::new(self.model, &self.config, &offsets, orderer);
        for pos in Pos::ALL {
            let path = out_dir.join(format!("index.{}", pos.name()));
            stats.indexes.set(pos, write_file(&path, |w| words.make(w, pos))?);
        }
        stats.indexes.log("Indexes");

        let senses = SenseIndexer::new(self.model, &self.config, &offsets, orderer);
        stats.senses = write_file(&out_dir.join("index.sense"), |w| senses.make(w))?;

        for pos in Pos::ALL {
            let path = out_dir.join(format!("{}.exc", pos.name()));
            stats
                .morphs
                .set(pos, write_file(&path, |w| flat::write_morphs(w, self.model, pos))?);
        }
        stats.morphs.log("Morphs");

        write_file(&out_dir.join("verb.Framestext"), |w| {
            flat::write_verb_frames(w, self.model)
        })?;
        write_file(&out_dir.join("sents.vrb"), |w| flat::write_templates(w, self.model))?;
        write_file(&out_dir.join("sentidx.vrb"), |w| {
            flat::write_template_index(w, self.model)
        })?;
        write_file(&out_dir.join("cntlist"), |w| flat::write_tag_counts(w, self.model))?;
        write_file(&out_dir.join("cntlist.rev"), |w| {
            flat::write_tag_counts_rev(w, self.model)
        })?;
        write_file(&out_dir.join("lexnames"), |w| flat::write_lexnames(w))?;

        Ok(stats)
    }
}
