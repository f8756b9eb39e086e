//! 1件のデータ行の出力コマンド

use std::io::{self, Write};

use clap::Parser;
use wndb::errors::WndbError;
use wndb::Grinder;

use crate::options::ModelOptions;

/// 行出力コマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "line", about = "A program to print the data line of a synset.")]
pub struct Args {
    #[clap(flatten)]
    model: ModelOptions,

    /// Synset ids whose data lines are printed, in order.
    #[clap(required = true)]
    synset_ids: Vec<String>,
}

/// データ行の出力中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    /// モデルの読み込みまたは符号化のエラー
    #[error("Producing the line failed: {0}")]
    Wndb(#[from] WndbError),

    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub fn run(args: Args) -> Result<(), LineError> {
    let config = args.model.config();
    let model = args.model.load_model()?;
    let grinder = Grinder::new(&model, config);

    let mut out = io::stdout().lock();
    for synset_id in &args.synset_ids {
        out.write_all(grinder.produce_line(synset_id)?.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
