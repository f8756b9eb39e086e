//! 互換性フラグ
//!
//! レガシー(Princeton WordNet 3.x)の読み込み側が理解できる符号空間に出力を制限するための
//! 3つの独立したスイッチと、センス番号付けの方式を切り替えるスイッチを定義します。

use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, WndbError};

bitflags::bitflags! {
    /// グラインド全体で読み取り専用となるフラグの集合
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u32 {
        /// lex idを4ビットに収める(16で剰余を取る)
        const LEX_ID_COMPAT = 0x1;
        /// レガシー形式に存在しないポインタ記号を拒否する
        const POINTER_COMPAT = 0x2;
        /// 番号35を超える動詞フレームを拒否する
        const VERB_FRAME_COMPAT = 0x4;
        /// 3つの互換性スイッチすべて
        const COMPAT = Self::LEX_ID_COMPAT.bits()
            | Self::POINTER_COMPAT.bits()
            | Self::VERB_FRAME_COMPAT.bits();
        /// センス索引の番号を語彙単位内の順位から求める
        const NO_REINDEX = 0x1000_0000;
    }
}

impl Flags {
    #[inline(always)]
    pub fn lex_id_compat(self) -> bool {
        self.contains(Self::LEX_ID_COMPAT)
    }

    #[inline(always)]
    pub fn pointer_compat(self) -> bool {
        self.contains(Self::POINTER_COMPAT)
    }

    #[inline(always)]
    pub fn verb_frame_compat(self) -> bool {
        self.contains(Self::VERB_FRAME_COMPAT)
    }

    #[inline(always)]
    pub fn no_reindex(self) -> bool {
        self.contains(Self::NO_REINDEX)
    }
}

impl FromStr for Flags {
    type Err = WndbError;

    /// `0x7` のような16進数、または10進数の整数からフラグを読み取ります。
    ///
    /// # エラー
    ///
    /// 整数として読めない場合、または未定義のビットを含む場合にエラーを返します。
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let bits = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u32::from_str_radix(hex, 16)?,
            None => s.parse::<u32>()?,
        };
        Self::from_bits(bits).ok_or_else(|| {
            WndbError::invalid_argument("flags", format!("undefined bits in 0x{bits:x}"))
        })
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:x}", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_and_decimal() {
        assert_eq!("0x7".parse::<Flags>().unwrap(), Flags::COMPAT);
        assert_eq!(
            "3".parse::<Flags>().unwrap(),
            Flags::LEX_ID_COMPAT | Flags::POINTER_COMPAT
        );
        assert_eq!(
            "0x10000000".parse::<Flags>().unwrap(),
            Flags::NO_REINDEX
        );
    }

    #[test]
    fn test_parse_undefined_bits() {
        assert!("0x8".parse::<Flags>().is_err());
        assert!("seven".parse::<Flags>().is_err());
    }

    #[test]
    fn test_switches_are_independent() {
        let flags = Flags::POINTER_COMPAT;
        assert!(flags.pointer_compat());
        assert!(!flags.lex_id_compat());
        assert!(!flags.verb_frame_compat());
        assert!(!flags.no_reindex());
        assert_eq!(flags.to_string(), "0x2");
    }
}
