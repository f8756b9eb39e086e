//! エラー型の定義
//!
//! このモジュールは、WNDBグラインダーで使用されるすべてのエラー型を定義します。
//!
//! 規則表による符号化は [`CodingError`] を返します。これは次の2種類の失敗を区別します。
//!
//! - [`CompatViolation`]: 拡張規則にしか存在しない符号を、レガシー互換フラグが
//!   有効な状態で要求した場合。呼び出し側で回復可能です(項目を捨ててカウントします)。
//! - [`MalformedInput`]: 規則表に該当項目が存在しない場合や、参照先が存在しない場合。
//!   グラインドを中断する致命的なエラーです。

use std::error::Error;
use std::fmt;

/// WNDB専用のResult型
///
/// エラー型としてデフォルトで[`WndbError`]を使用します。
pub type Result<T, E = WndbError> = std::result::Result<T, E>;

/// WNDBのエラー型
///
/// このライブラリで発生する可能性のあるすべてのエラーを表現します。
#[derive(Debug, thiserror::Error)]
pub enum WndbError {
    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 不正な入力エラー
    ///
    /// [`MalformedInput`]のエラーバリアント。グラインドを中断します。
    #[error(transparent)]
    Malformed(MalformedInput),

    /// 無効な状態エラー
    ///
    /// [`InvalidStateError`]のエラーバリアント。
    #[error(transparent)]
    InvalidState(InvalidStateError),

    /// 整数パースエラー
    ///
    /// [`ParseIntError`](std::num::ParseIntError)のエラーバリアント。
    #[error(transparent)]
    ParseInt(std::num::ParseIntError),

    /// UTF-8エンコーディングエラー
    ///
    /// [`std::str::Utf8Error`]のエラーバリアント。
    #[error(transparent)]
    Utf8(std::str::Utf8Error),

    /// I/Oエラー
    ///
    /// [`std::io::Error`](std::io::Error)のエラーバリアント。
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// rkyvシリアライゼーションエラー
    ///
    /// [`rkyv::rancor::Error`](rkyv::rancor::Error)のエラーバリアント。
    #[error(transparent)]
    RkyvError(#[from] rkyv::rancor::Error),
}

impl WndbError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマットの名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    /// 不正な入力エラーを生成します
    ///
    /// # 引数
    ///
    /// * `what` - 不正だった項目の種類
    /// * `value` - 不正だった値
    /// * `context` - 値が現れた場所(シンセットIDやセンスキー)
    pub(crate) fn malformed<V, C>(what: &'static str, value: V, context: C) -> Self
    where
        V: Into<String>,
        C: Into<String>,
    {
        Self::Malformed(MalformedInput::new(what, value).within(context))
    }

    /// 無効な状態エラーを生成します
    ///
    /// # 引数
    ///
    /// * `msg` - エラーメッセージ
    /// * `cause` - エラーの原因
    pub(crate) fn invalid_state<S, M>(msg: S, cause: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::InvalidState(InvalidStateError {
            msg: msg.into(),
            cause: cause.into(),
        })
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// 状態が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidStateError {
    /// エラーメッセージ
    pub(crate) msg: String,

    /// エラーの根本原因
    pub(crate) cause: String,
}

impl fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidStateError: {}: {}", self.msg, self.cause)
    }
}

impl Error for InvalidStateError {}

/// 入力が規則表や参照の整合性に反する場合に使用されるエラー
///
/// 不正だった項目の種類と値、そして見つかった場所を保持します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedInput {
    /// 項目の種類 (`"relation"`, `"lexfile"` など)
    pub(crate) what: &'static str,

    /// 不正だった値
    pub(crate) value: String,

    /// 値が現れた場所
    pub(crate) context: Option<String>,
}

impl MalformedInput {
    pub(crate) fn new<V>(what: &'static str, value: V) -> Self
    where
        V: Into<String>,
    {
        Self {
            what,
            value: value.into(),
            context: None,
        }
    }

    /// 値が現れた場所を付加します。
    pub(crate) fn within<C>(mut self, context: C) -> Self
    where
        C: Into<String>,
    {
        self.context = Some(context.into());
        self
    }

    /// 項目の種類を返します。
    pub fn what(&self) -> &'static str {
        self.what
    }

    /// 不正だった値を返します。
    pub fn value(&self) -> &str {
        &self.value
    }

    /// 値が現れた場所を返します。
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

impl fmt::Display for MalformedInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MalformedInput: {} '{}'", self.what, self.value)?;
        if let Some(context) = &self.context {
            write!(f, " in {context}")?;
        }
        Ok(())
    }
}

impl Error for MalformedInput {}

/// レガシー互換モードで拡張符号が要求された場合に使用されるエラー
///
/// 回復可能です。呼び出し側は項目を捨て、原因ごとのカウンタを増やします。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompatViolation {
    /// 項目の種類 (`"pointer"` または `"verb frame"`)
    pub(crate) what: &'static str,

    /// レガシー形式に存在しない値
    pub(crate) value: String,
}

impl CompatViolation {
    pub(crate) fn new<V>(what: &'static str, value: V) -> Self
    where
        V: Into<String>,
    {
        Self {
            what,
            value: value.into(),
        }
    }

    /// 項目の種類を返します。
    pub fn what(&self) -> &'static str {
        self.what
    }

    /// レガシー形式に存在しない値を返します。
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for CompatViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CompatViolation: {} '{}'", self.what, self.value)
    }
}

impl Error for CompatViolation {}

/// 規則表による符号化の失敗
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodingError {
    /// 回復可能な互換性違反
    #[error(transparent)]
    Incompatible(CompatViolation),

    /// 致命的な不正入力
    #[error(transparent)]
    Malformed(MalformedInput),
}

impl CodingError {
    pub(crate) fn incompatible<V>(what: &'static str, value: V) -> Self
    where
        V: Into<String>,
    {
        Self::Incompatible(CompatViolation::new(what, value))
    }

    pub(crate) fn malformed<V>(what: &'static str, value: V) -> Self
    where
        V: Into<String>,
    {
        Self::Malformed(MalformedInput::new(what, value))
    }
}

impl From<MalformedInput> for WndbError {
    fn from(error: MalformedInput) -> Self {
        Self::Malformed(error)
    }
}

impl From<std::num::ParseIntError> for WndbError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::ParseInt(error)
    }
}

impl From<std::str::Utf8Error> for WndbError {
    fn from(error: std::str::Utf8Error) -> Self {
        Self::Utf8(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_names_context() {
        let err = WndbError::malformed("lexfile", "noun.bogus", "01234567-n");
        assert_eq!(
            err.to_string(),
            "MalformedInput: lexfile 'noun.bogus' in 01234567-n"
        );
    }

    #[test]
    fn test_compat_violation_display() {
        let err = CodingError::incompatible("pointer", "is_entailed_by");
        assert_eq!(err.to_string(), "CompatViolation: pointer 'is_entailed_by'");
    }
}
