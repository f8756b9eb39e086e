//! サブコマンド間で共有する引数とモデルの読み込み

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use wndb::errors::WndbError;
use wndb::{CaseOrder, Flags, GrindConfig, Header, LegacyOrder, Model};

/// zstdフレームの先頭4バイト
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

/// 見出し語の大文字小文字によるタイブレーク
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CaseOrderArg {
    UpperFirst,
    LowerFirst,
}

impl From<CaseOrderArg> for CaseOrder {
    fn from(arg: CaseOrderArg) -> Self {
        match arg {
            CaseOrderArg::UpperFirst => Self::UpperFirst,
            CaseOrderArg::LowerFirst => Self::LowerFirst,
        }
    }
}

/// ライセンスヘッダーの種類
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum HeaderArg {
    Oewn,
    Princeton,
}

impl From<HeaderArg> for Header {
    fn from(arg: HeaderArg) -> Self {
        match arg {
            HeaderArg::Oewn => Self::Oewn,
            HeaderArg::Princeton => Self::Princeton,
        }
    }
}

/// モデルとグラインド設定の引数
#[derive(clap::Args, Debug)]
pub struct ModelOptions {
    /// Model snapshot, optionally compressed with zstd.
    #[clap(short = 'i', long)]
    pub model_in: PathBuf,

    /// Flag bits as a hex (0x7) or decimal integer.
    ///
    /// Combined with the individual switches below.
    #[clap(long, default_value = "0")]
    pub flags: Flags,

    /// Reduce lex ids modulo 16.
    #[clap(long)]
    pub compat_lexid: bool,

    /// Drop pointers without a legacy symbol.
    #[clap(long)]
    pub compat_pointer: bool,

    /// Drop verb frames numbered above 35.
    #[clap(long)]
    pub compat_verbframe: bool,

    /// Enable all three compatibility switches.
    #[clap(long)]
    pub compat: bool,

    /// Number senses in index.sense by their rank within the lexical unit.
    #[clap(long)]
    pub no_reindex: bool,

    /// Tie-break between lemmas that differ only in case.
    #[clap(long, value_enum, default_value_t = CaseOrderArg::UpperFirst)]
    pub case_order: CaseOrderArg,

    /// License header written at the top of data and index files.
    #[clap(long, value_enum, default_value_t = HeaderArg::Oewn)]
    pub header: HeaderArg,

    /// Legacy sense order (`sensekey rank` per line).
    #[clap(long)]
    pub legacy_order: Option<PathBuf>,
}

impl ModelOptions {
    /// 整数のフラグと個別のスイッチを合成します。
    pub fn flags(&self) -> Flags {
        let switches = [
            (self.compat_lexid, Flags::LEX_ID_COMPAT),
            (self.compat_pointer, Flags::POINTER_COMPAT),
            (self.compat_verbframe, Flags::VERB_FRAME_COMPAT),
            (self.compat, Flags::COMPAT),
            (self.no_reindex, Flags::NO_REINDEX),
        ];
        switches
            .into_iter()
            .filter(|&(on, _)| on)
            .fold(self.flags, |flags, (_, flag)| flags | flag)
    }

    pub fn config(&self) -> GrindConfig {
        GrindConfig::new(self.flags())
            .case_order(self.case_order.into())
            .header(self.header.into())
    }

    /// 参照順序を読み込みます。指定がなければ空の順序です。
    pub fn legacy_order(&self) -> Result<LegacyOrder, WndbError> {
        match &self.legacy_order {
            Some(path) => {
                let order = LegacyOrder::from_reader(BufReader::new(File::open(path)?))?;
                log::info!("Legacy order: {} senses", order.len());
                Ok(order)
            }
            None => Ok(LegacyOrder::new()),
        }
    }

    pub fn load_model(&self) -> Result<Model, WndbError> {
        load_model(&self.model_in)
    }
}

/// スナップショットからモデルを読み込みます。zstdで圧縮されていれば展開します。
pub fn load_model(path: &Path) -> Result<Model, WndbError> {
    let mut rdr = BufReader::new(File::open(path)?);
    let model = if rdr.fill_buf()?.starts_with(&ZSTD_MAGIC) {
        Model::read(zstd::Decoder::with_buffer(rdr)?)?
    } else {
        Model::read(rdr)?
    };
    log::info!("Model: {} synsets", model.synsets().count());
    Ok(model)
}
