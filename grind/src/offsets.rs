//! オフセット表の出力コマンド

use std::path::PathBuf;

use clap::Parser;
use wndb::errors::WndbError;
use wndb::Grinder;

use crate::options::ModelOptions;

/// オフセットコマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "offsets", about = "A program to resolve synset offsets.")]
pub struct Args {
    #[clap(flatten)]
    model: ModelOptions,

    /// Directory to which offsets.map is written. Created if missing.
    #[clap(short = 'o', long)]
    out_dir: PathBuf,
}

/// オフセット解決中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum OffsetsError {
    /// モデルの読み込みまたはオフセット解決のエラー
    #[error("Resolving offsets failed: {0}")]
    Wndb(#[from] WndbError),
}

pub fn run(args: Args) -> Result<(), OffsetsError> {
    let config = args.model.config();
    let model = args.model.load_model()?;
    let offsets = Grinder::new(&model, config).grind_offsets(&args.out_dir)?;
    eprintln!(
        "Successfully resolved {} offsets to {}",
        offsets.len(),
        args.out_dir.display()
    );
    Ok(())
}
