//! グラインドの設定

use crate::flags::Flags;
use crate::format::{OEWN_HEADER, PRINCETON_HEADER};
use crate::order::CaseOrder;

/// データファイルと単語索引ファイルの先頭に書き込むライセンスヘッダー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Header {
    #[default]
    Oewn,
    Princeton,
}

impl Header {
    pub const fn text(self) -> &'static str {
        match self {
            Self::Oewn => OEWN_HEADER,
            Self::Princeton => PRINCETON_HEADER,
        }
    }

    /// 各区分の最初のレコードのオフセット
    pub const fn len(self) -> u64 {
        self.text().len() as u64
    }
}

/// グラインドに必要な設定一式
///
/// グラインドの間は読み取り専用です。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GrindConfig {
    pub flags: Flags,
    pub case_order: CaseOrder,
    pub header: Header,
}

impl GrindConfig {
    pub fn new(flags: Flags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    pub fn case_order(mut self, case_order: CaseOrder) -> Self {
        self.case_order = case_order;
        self
    }

    pub fn header(mut self, header: Header) -> Self {
        self.header = header;
        self
    }
}
