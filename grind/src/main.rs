//! WNDBグラインダーのメインエントリーポイント
//!
//! モデルのスナップショットを読み込み、WNDBファイル一式、オフセット表、
//! または1件のデータ行を出力するサブコマンドを提供します。

mod grind;
mod line;
mod offsets;
mod options;

use clap::Parser;
use thiserror::Error;

use crate::{grind::GrindCommandError, line::LineError, offsets::OffsetsError};

/// コマンドライン引数の構造体
#[derive(Parser, Debug)]
#[clap(name = "wndb-grind", version)]
struct Cli {
    /// Only report warnings and errors.
    #[clap(short = 'q', long, global = true)]
    quiet: bool,

    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Command,
}

/// 利用可能なサブコマンド
#[derive(Parser, Debug)]
enum Command {
    /// モデルからWNDBファイル一式を出力します
    ///
    /// データファイル、単語索引、センス索引、補助ファイルを出力先ディレクトリに書き出します。
    Grind(grind::Args),

    /// シンセットのオフセットを解決し、オフセット表だけを出力します
    Offsets(offsets::Args),

    /// 1件のシンセットのデータ行を標準出力に書き出します
    Line(line::Args),
}

/// グラインダーの実行中に発生する可能性のあるエラー
#[derive(Debug, Error)]
pub enum GrindError {
    /// グラインド実行中のエラー
    #[error(transparent)]
    Grind(#[from] GrindCommandError),
    /// オフセット表の出力中のエラー
    #[error(transparent)]
    Offsets(#[from] OffsetsError),
    /// データ行の出力中のエラー
    #[error(transparent)]
    Line(#[from] LineError),
}

/// ロガーを初期化します。`RUST_LOG` が設定されていればそちらを優先します。
fn init_logger(quiet: bool) {
    let level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<(), GrindError> {
    let cli = Cli::parse();
    init_logger(cli.quiet);
    match cli.command {
        Command::Grind(args) => Ok(grind::run(args)?),
        Command::Offsets(args) => Ok(offsets::run(args)?),
        Command::Line(args) => Ok(line::run(args)?),
    }
}
