//! WNDBファイル一式の出力コマンド

use std::path::PathBuf;

use clap::Parser;
use wndb::errors::WndbError;
use wndb::Grinder;

use crate::options::ModelOptions;

/// グラインドコマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "grind", about = "A program to grind a model into WNDB files.")]
pub struct Args {
    #[clap(flatten)]
    model: ModelOptions,

    /// Directory to which the WNDB files are written. Created if missing.
    #[clap(short = 'o', long)]
    out_dir: PathBuf,

    /// Also write the resolved offsets (offsets.map).
    #[clap(long)]
    with_offsets: bool,
}

/// グラインド中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum GrindCommandError {
    /// モデルの読み込みまたはグラインドのエラー
    #[error("Grinding failed: {0}")]
    Wndb(#[from] WndbError),
}

pub fn run(args: Args) -> Result<(), GrindCommandError> {
    let config = args.model.config();

    eprintln!("Loading the model...");
    let model = args.model.load_model()?;
    let legacy = args.model.legacy_order()?;

    eprintln!("Grinding with flags {}...", config.flags);
    let grinder = Grinder::new(&model, config).legacy_order(legacy);
    if args.with_offsets {
        grinder.grind_offsets(&args.out_dir)?;
    }
    let stats = grinder.grind(&args.out_dir)?;

    eprintln!(
        "Successfully ground {} synsets and {} senses to {}",
        stats.synsets.total(),
        stats.senses,
        args.out_dir.display()
    );
    Ok(())
}
