//! 出力書式の共通部品
//!
//! データファイルと単語索引ファイルの先頭に置かれるライセンスヘッダー、
//! 見出し語のエスケープ、オフセット欄と例文の書式を提供します。
//!
//! ヘッダーは行末の空白も含めてバイト単位で固定です。両方のヘッダーは同じ長さを持つため、
//! どちらを選んでもオフセットは変わりません。

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{Result, WndbError};

/// オフセット欄の桁数
pub const OFFSET_WIDTH: usize = 8;

/// オフセット欄に収まる最大値
pub const MAX_OFFSET: u64 = 99_999_999;

/// Open English Wordnetのライセンスヘッダー
pub const OEWN_HEADER: &str = concat!(
    "  1 This software and database is being provided to you, the LICENSEE, by  \n",
    "  2 the Open English Wordnet team under the Creative Commons Attribution 4.0  \n",
    "  3 International License (CC-BY 4.0).  \n",
    "  4 Open English Wordnet 2021 Copyright 2021 by the Open English Wordnet team.  \n",
    "  5 \n",
    "  6 Permission to use, copy, modify and distribute this software and  \n",
    "  7 database and its documentation for any purpose and without fee or  \n",
    "  8 royalty is hereby granted, provided that you agree to comply with  \n",
    "  9 the following copyright notice and statements, including the disclaimer,  \n",
    "  10 and that the same appear on ALL copies of the software, database and  \n",
    "  11 documentation, including modifications that you make for internal  \n",
    "  12 use or for distribution.  \n",
    "  13 \n",
    "  14 WordNet 3.1 Copyright 2011 by Princeton University.  All rights reserved.  \n",
    "  15 THIS SOFTWARE AND DATABASE IS PROVIDED \"AS IS\" AND PRINCETON  \n",
    "  16 UNIVERSITY MAKES NO REPRESENTATIONS OR WARRANTIES, EXPRESS OR  \n",
    "  17 IMPLIED.  BY WAY OF EXAMPLE, BUT NOT LIMITATION, PRINCETON  \n",
    "  18 UNIVERSITY MAKES NO REPRESENTATIONS OR WARRANTIES OF MERCHANT-  \n",
    "  19 ABILITY OR FITNESS FOR ANY PARTICULAR PURPOSE OR THAT THE USE  \n",
    "  20 OF THE LICENSED SOFTWARE, DATABASE OR DOCUMENTATION WILL NOT  \n",
    "  21 INFRINGE ANY THIRD PARTY PATENTS, COPYRIGHTS, TRADEMARKS OR  \n",
    "  22 OTHER RIGHTS.  \n",
    "  23 The name of Princeton University or Princeton may not be used in  \n",
    "  24 advertising or publicity pertaining to distribution of the software  \n",
    "  25 and/or database.  Title to copyright in this software, database and  \n",
    "  26 any associated documentation shall at all times remain with  \n",
    "  27 Princeton University and LICENSEE agrees to preserve same.  \n",
    "  28 \n",
    "  29 Ground by oewntk@gmail.com     \n",
);

/// Princeton WordNetのライセンスヘッダー
pub const PRINCETON_HEADER: &str = concat!(
    "  1 This software and database is being provided to you, the LICENSEE, by  \n",
    "  2 Princeton University under the following license.  By obtaining, using  \n",
    "  3 and/or copying this software and database, you agree that you have  \n",
    "  4 read, understood, and will comply with these terms and conditions.:  \n",
    "  5   \n",
    "  6 Permission to use, copy, modify and distribute this software and  \n",
    "  7 database and its documentation for any purpose and without fee or  \n",
    "  8 royalty is hereby granted, provided that you agree to comply with  \n",
    "  9 the following copyright notice and statements, including the disclaimer,  \n",
    "  10 and that the same appear on ALL copies of the software, database and  \n",
    "  11 documentation, including modifications that you make for internal  \n",
    "  12 use or for distribution.  \n",
    "  13   \n",
    "  14 WordNet 3.1 Copyright 2011 by Princeton University.  All rights reserved.  \n",
    "  15   \n",
    "  16 THIS SOFTWARE AND DATABASE IS PROVIDED \"AS IS\" AND PRINCETON  \n",
    "  17 UNIVERSITY MAKES NO REPRESENTATIONS OR WARRANTIES, EXPRESS OR  \n",
    "  18 IMPLIED.  BY WAY OF EXAMPLE, BUT NOT LIMITATION, PRINCETON  \n",
    "  19 UNIVERSITY MAKES NO REPRESENTATIONS OR WARRANTIES OF MERCHANT-  \n",
    "  20 ABILITY OR FITNESS FOR ANY PARTICULAR PURPOSE OR THAT THE USE  \n",
    "  21 OF THE LICENSED SOFTWARE, DATABASE OR DOCUMENTATION WILL NOT  \n",
    "  22 INFRINGE ANY THIRD PARTY PATENTS, COPYRIGHTS, TRADEMARKS OR  \n",
    "  23 OTHER RIGHTS.  \n",
    "  24   \n",
    "  25 The name of Princeton University or Princeton may not be used in  \n",
    "  26 advertising or publicity pertaining to distribution of the software  \n",
    "  27 and/or database.  Title to copyright in this software, database and  \n",
    "  28 any associated documentation shall at all times remain with  \n",
    "  29 Princeton University and LICENSEE agrees to preserve same.  \n",
);

/// 見出し語の空白を `_` に置き換えます。
pub fn escape(lemma: &str) -> Cow<'_, str> {
    if lemma.contains(' ') {
        Cow::Owned(lemma.replace(' ', "_"))
    } else {
        Cow::Borrowed(lemma)
    }
}

/// オフセットが8桁の欄に収まることを確認します。
///
/// # エラー
///
/// 欄に収まらない場合は [`WndbError::InvalidState`] を返します。
pub fn check_offset(offset: u64) -> Result<u64> {
    if offset > MAX_OFFSET {
        return Err(WndbError::invalid_state(
            "offset overflow",
            format!("{offset} does not fit in {OFFSET_WIDTH} digits"),
        ));
    }
    Ok(offset)
}

static QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^".*"$"#).unwrap());

/// 例文を二重引用符で囲みます。すでに囲まれている場合はそのまま返します。
pub fn quote(example: &str) -> Cow<'_, str> {
    if QUOTED.is_match(example) {
        Cow::Borrowed(example)
    } else {
        Cow::Owned(format!("\"{example}\""))
    }
}
