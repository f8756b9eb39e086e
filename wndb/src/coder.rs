//! 規則表による符号化
//!
//! 関係の種類と品詞からポインタ記号、動詞フレームIDからフレーム番号、
//! 辞書編集者ファイル名からファイル番号への対応表を提供します。
//!
//! 表はすべて不変です。レガシー形式に存在しない符号は、互換性フラグが有効な場合に
//! [`CodingError::Incompatible`] として拒否されます。表に存在しない項目は
//! [`CodingError::Malformed`] になります。

use std::sync::LazyLock;

use hashbrown::HashMap;

use crate::errors::{CodingError, MalformedInput};
use crate::model::{Pos, SynsetType};

pub const ANTONYM: &str = "antonym";
pub const HYPERNYM: &str = "hypernym";
pub const INSTANCE_HYPERNYM: &str = "instance_hypernym";
pub const HYPONYM: &str = "hyponym";
pub const INSTANCE_HYPONYM: &str = "instance_hyponym";
pub const HOLO_MEMBER: &str = "holo_member";
pub const HOLO_SUBSTANCE: &str = "holo_substance";
pub const HOLO_PART: &str = "holo_part";
pub const MERO_MEMBER: &str = "mero_member";
pub const MERO_SUBSTANCE: &str = "mero_substance";
pub const MERO_PART: &str = "mero_part";
pub const ATTRIBUTE: &str = "attribute";
pub const PERTAINYM: &str = "pertainym";
pub const DERIVATION: &str = "derivation";
pub const DOMAIN_TOPIC: &str = "domain_topic";
pub const HAS_DOMAIN_TOPIC: &str = "has_domain_topic";
pub const DOMAIN_REGION: &str = "domain_region";
pub const HAS_DOMAIN_REGION: &str = "has_domain_region";
pub const DOMAIN_USAGE: &str = "exemplifies";
pub const HAS_DOMAIN_USAGE: &str = "is_exemplified_by";
pub const ALSO: &str = "also";
pub const ENTAILS: &str = "entails";
pub const IS_ENTAILED: &str = "is_entailed_by";
pub const SIMILAR: &str = "similar";
pub const VERB_GROUP: &str = "verb_group";
pub const PARTICIPLE: &str = "participle";
pub const CAUSES: &str = "causes";
pub const IS_CAUSED: &str = "is_caused_by";

// Not part of the legacy pointer set.
const IS_ENTAILED_PTR: &str = "*^";
const IS_CAUSED_PTR: &str = ">^";

/// 関係の種類をポインタ記号に符号化します。
///
/// # 引数
///
/// * `kind` - 関係の種類
/// * `pos` - 関係元のシンセットの種類。形容詞と衛星は同じ表を使います。
/// * `pointer_compat` - レガシー形式に存在しない記号を拒否するかどうか
///
/// # エラー
///
/// - `is_entailed_by` と `is_caused_by` を `pointer_compat` の下で要求した場合は
///   [`CodingError::Incompatible`]
/// - 品詞の表に存在しない種類の場合は [`CodingError::Malformed`]
pub fn code_relation(
    kind: &str,
    pos: SynsetType,
    pointer_compat: bool,
) -> Result<&'static str, CodingError> {
    let code = match pos {
        SynsetType::Noun => match kind {
            ANTONYM => Some("!"),
            HYPERNYM => Some("@"),
            INSTANCE_HYPERNYM => Some("@i"),
            HYPONYM => Some("~"),
            INSTANCE_HYPONYM => Some("~i"),
            HOLO_MEMBER => Some("#m"),
            HOLO_SUBSTANCE => Some("#s"),
            HOLO_PART => Some("#p"),
            MERO_MEMBER => Some("%m"),
            MERO_SUBSTANCE => Some("%s"),
            MERO_PART => Some("%p"),
            ATTRIBUTE => Some("="),
            PERTAINYM => Some("\\"),
            ALSO => Some("^"),
            DERIVATION => Some("+"),
            DOMAIN_TOPIC => Some(";c"),
            HAS_DOMAIN_TOPIC => Some("-c"),
            DOMAIN_REGION => Some(";r"),
            HAS_DOMAIN_REGION => Some("-r"),
            DOMAIN_USAGE => Some(";u"),
            HAS_DOMAIN_USAGE => Some("-u"),
            _ => None,
        },
        SynsetType::Verb => match kind {
            ANTONYM => Some("!"),
            HYPERNYM => Some("@"),
            HYPONYM => Some("~"),
            ENTAILS => Some("*"),
            CAUSES => Some(">"),
            ALSO => Some("^"),
            VERB_GROUP | SIMILAR => Some("$"),
            DERIVATION => Some("+"),
            DOMAIN_TOPIC => Some(";c"),
            DOMAIN_REGION => Some(";r"),
            DOMAIN_USAGE => Some(";u"),
            IS_ENTAILED | IS_CAUSED if pointer_compat => {
                return Err(CodingError::incompatible("pointer", kind));
            }
            IS_ENTAILED => Some(IS_ENTAILED_PTR),
            IS_CAUSED => Some(IS_CAUSED_PTR),
            _ => None,
        },
        SynsetType::Adj | SynsetType::Satellite => match kind {
            ANTONYM => Some("!"),
            SIMILAR => Some("&"),
            PARTICIPLE => Some("<"),
            PERTAINYM => Some("\\"),
            ATTRIBUTE => Some("="),
            ALSO => Some("^"),
            DERIVATION => Some("+"),
            DOMAIN_TOPIC => Some(";c"),
            DOMAIN_REGION => Some(";r"),
            DOMAIN_USAGE => Some(";u"),
            HAS_DOMAIN_TOPIC => Some("-c"),
            HAS_DOMAIN_REGION => Some("-r"),
            HAS_DOMAIN_USAGE => Some("-u"),
            _ => None,
        },
        SynsetType::Adv => match kind {
            ANTONYM => Some("!"),
            PERTAINYM => Some("\\"),
            ALSO => Some("^"),
            DERIVATION => Some("+"),
            DOMAIN_TOPIC => Some(";c"),
            DOMAIN_REGION => Some(";r"),
            DOMAIN_USAGE => Some(";u"),
            HAS_DOMAIN_TOPIC => Some("-c"),
            HAS_DOMAIN_REGION => Some("-r"),
            HAS_DOMAIN_USAGE => Some("-u"),
            _ => None,
        },
    };
    code.ok_or_else(|| {
        CodingError::malformed(
            "relation",
            format!("pos={} relType={}", pos.as_char(), kind),
        )
    })
}

/// レガシー形式で定義されている最後の動詞フレーム番号
pub const LAST_COMPAT_VERB_FRAME: u32 = 35;

/// 動詞フレームのIDと文面。番号は位置 + 1 です。
pub const VERB_FRAMES: [(&str, &str); 39] = [
    ("vii", "Something ----s"),
    ("via", "Somebody ----s"),
    ("nonreferential", "It is ----ing"),
    ("vii-pp", "Something is ----ing PP"),
    ("vtii-adj", "Something ----s something Adjective/Noun"),
    ("vii-adj", "Something ----s Adjective/Noun"),
    ("via-adj", "Somebody ----s Adjective"),
    ("vtai", "Somebody ----s something"),
    ("vtaa", "Somebody ----s somebody"),
    ("vtia", "Something ----s somebody"),
    ("vtii", "Something ----s something"),
    ("vii-to", "Something ----s to somebody"),
    ("via-on-inanim", "Somebody ----s on something"),
    ("ditransitive", "Somebody ----s somebody something"),
    ("vtai-to", "Somebody ----s something to somebody"),
    ("vtai-from", "Somebody ----s something from somebody"),
    ("vtaa-with", "Somebody ----s somebody with something"),
    ("vtaa-of", "Somebody ----s somebody of something"),
    ("vtai-on", "Somebody ----s something on somebody"),
    ("vtaa-pp", "Somebody ----s somebody PP"),
    ("vtai-pp", "Somebody ----s something PP"),
    ("via-pp", "Somebody ----s PP"),
    ("vibody", "Somebody's (body part) ----s"),
    ("vtaa-to-inf", "Somebody ----s somebody to INFINITIVE"),
    ("vtaa-inf", "Somebody ----s somebody INFINITIVE"),
    ("via-that", "Somebody ----s that CLAUSE"),
    ("via-to", "Somebody ----s to somebody"),
    ("via-to-inf", "Somebody ----s to INFINITIVE"),
    ("via-whether-inf", "Somebody ----s whether INFINITIVE"),
    ("vtaa-into-ger", "Somebody ----s somebody into V-ing something"),
    ("vtai-with", "Somebody ----s something with something"),
    ("via-inf", "Somebody ----s INFINITIVE"),
    ("via-ger", "Somebody ----s VERB-ing"),
    ("nonreferential-sent", "It ----s that CLAUSE"),
    ("vii-inf", "Something ----s INFINITIVE"),
    ("via-at", "Somebody ----s at something"),
    ("via-for", "Somebody ----s for something"),
    ("via-on-anim", "Somebody ----s on somebody"),
    ("via-out-of", "Somebody ----s out of somebody"),
];

static FRAME_ID_TO_NUM: LazyLock<HashMap<&'static str, u32>> = LazyLock::new(|| {
    VERB_FRAMES
        .iter()
        .zip(1..)
        .map(|(&(id, _), num)| (id, num))
        .collect()
});

static FRAME_TEXT_TO_NUM: LazyLock<HashMap<String, u32>> = LazyLock::new(|| {
    VERB_FRAMES
        .iter()
        .zip(1..)
        .map(|(&(_, text), num)| (text.to_lowercase(), num))
        .collect()
});

/// 動詞フレームをフレーム番号に符号化します。
///
/// 前後の空白を取り除いた上で、フレームID (`vtai`) またはフレームの文面
/// (`Somebody ----s something`、大文字小文字を区別しない) で表を引きます。
///
/// # エラー
///
/// - 表に存在しない場合は [`CodingError::Malformed`]
/// - `verb_frame_compat` の下で番号が35を超える場合は [`CodingError::Incompatible`]
pub fn code_frame_id(frame_id: &str, verb_frame_compat: bool) -> Result<u32, CodingError> {
    let trimmed = frame_id.trim();
    let num = FRAME_ID_TO_NUM
        .get(trimmed)
        .or_else(|| FRAME_TEXT_TO_NUM.get(&trimmed.to_lowercase()))
        .copied()
        .ok_or_else(|| CodingError::malformed("verb frame", frame_id))?;
    if verb_frame_compat && num > LAST_COMPAT_VERB_FRAME {
        return Err(CodingError::incompatible("verb frame", trimmed));
    }
    Ok(num)
}

/// 辞書編集者ファイル名。番号は位置です。
pub const LEX_FILES: [&str; 45] = [
    "adj.all",
    "adj.pert",
    "adv.all",
    "noun.Tops",
    "noun.act",
    "noun.animal",
    "noun.artifact",
    "noun.attribute",
    "noun.body",
    "noun.cognition",
    "noun.communication",
    "noun.event",
    "noun.feeling",
    "noun.food",
    "noun.group",
    "noun.location",
    "noun.motive",
    "noun.object",
    "noun.person",
    "noun.phenomenon",
    "noun.plant",
    "noun.possession",
    "noun.process",
    "noun.quantity",
    "noun.relation",
    "noun.shape",
    "noun.state",
    "noun.substance",
    "noun.time",
    "verb.body",
    "verb.change",
    "verb.cognition",
    "verb.communication",
    "verb.competition",
    "verb.consumption",
    "verb.contact",
    "verb.creation",
    "verb.emotion",
    "verb.motion",
    "verb.perception",
    "verb.possession",
    "verb.social",
    "verb.stative",
    "verb.weather",
    "adj.ppl",
];

static LEX_FILE_TO_NUM: LazyLock<HashMap<&'static str, u32>> =
    LazyLock::new(|| LEX_FILES.iter().copied().zip(0..).collect());

/// 辞書編集者ファイル名をファイル番号に符号化します。
///
/// # エラー
///
/// 表に存在しない名前の場合は [`MalformedInput`] を返します。
pub fn code_lex_file(name: &str) -> Result<u32, MalformedInput> {
    LEX_FILE_TO_NUM
        .get(name)
        .copied()
        .ok_or_else(|| MalformedInput::new("lexfile", name))
}

/// 辞書編集者ファイル名の接頭辞が示す品詞
pub fn lex_file_pos(name: &str) -> Option<Pos> {
    match name.split('.').next()? {
        "noun" => Some(Pos::Noun),
        "verb" => Some(Pos::Verb),
        "adj" => Some(Pos::Adj),
        "adv" => Some(Pos::Adv),
        _ => None,
    }
}
