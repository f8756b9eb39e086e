//! # wndb
//!
//! 語彙データベースのモデルを、WordNet互換の読み込み側が使うレガシーな
//! フラットファイル形式(WNDB)に直列化するグラインダーです。
//!
//! ## 概要
//!
//! WNDBは位置に依存する自己参照的な形式です。各シンセットのレコードはデータファイル内の
//! 自身のバイト位置(オフセット)で識別され、関係やセンスのポインタは関係先のオフセットを
//! 埋め込みます。このため、レコードのバイト列を書く前にオフセットを確定させる必要があります。
//!
//! このライブラリは2段階で処理します。
//!
//! 1. 同じ桁数の仮のオフセットで全レコードを符号化し、バイト長を積み上げてオフセットを解決する
//! 2. 解決済みのオフセットで再び符号化して書き出し、書き込み位置と解決結果の一致を確認する
//!
//! ## 主な機能
//!
//! - **規則表による符号化**: 関係の種類、動詞フレーム、辞書編集者ファイルの符号化と互換性フラグ
//! - **決定的なセンス順序**: タグ付き出現回数、参照順序、タイブレークによる全順序
//! - **索引の生成**: 単語索引とセンス索引
//! - **補助ファイル**: 不規則形、動詞フレーム、例文テンプレート、出現回数、辞書編集者ファイル名
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use wndb::model::{Lex, ModelBuilder, Sense, Synset, SynsetType};
//! use wndb::{Flags, GrindConfig, Grinder};
//!
//! let model = ModelBuilder::new()
//!     .synset(
//!         Synset::new("04576211-n", SynsetType::Noun, "noun.artifact")
//!             .member("wheeled vehicle")
//!             .definition("a vehicle that moves on wheels"),
//!     )
//!     .lex(
//!         Lex::new("wheeled vehicle", SynsetType::Noun)
//!             .sense(Sense::new("wheeled_vehicle%1:06:00::", "04576211-n")),
//!     )
//!     .build()?;
//!
//! let grinder = Grinder::new(&model, GrindConfig::new(Flags::COMPAT));
//! let line = grinder.produce_line("04576211-n")?;
//! assert_eq!(
//!     line,
//!     "00001740 06 n 01 wheeled_vehicle 0 000 | a vehicle that moves on wheels  \n"
//! );
//! # Ok(())
//! # }
//! ```

/// 規則表による符号化
pub mod coder;

/// グラインドの設定
pub mod config;

/// エラー型の定義
pub mod errors;

/// 互換性フラグ
pub mod flags;

/// 出力書式の共通部品
pub mod format;

/// WNDBファイル一式の出力
pub mod grinder;

/// 互換性違反の集計
pub mod incompat;

/// 語彙データベースのモデル
pub mod model;

/// シンセットのオフセット解決
pub mod offsets;

/// センスの順序とグループ化
pub mod order;

/// シンセットのデータレコード
pub mod record;

#[cfg(test)]
mod tests;

// Re-exports
pub use config::{GrindConfig, Header};
pub use errors::{CodingError, CompatViolation, MalformedInput, Result, WndbError};
pub use flags::Flags;
pub use grinder::{GrindStats, Grinder};
pub use model::{Model, ModelBuilder};
pub use offsets::OffsetTable;
pub use order::{CaseOrder, LegacyOrder, SenseOrderer};
pub use record::SynsetEncoder;

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
