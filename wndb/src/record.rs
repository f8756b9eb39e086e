//! シンセットのデータレコード
//!
//! このモジュールは、シンセットひとつをデータファイルの1行に符号化します。
//!
//! ```text
//! offset lexfile type members relations [frames] | gloss
//! 00000142 06 n 02 car 0 auto 0 001 @ 00001243 n 0000 | a motor vehicle
//! ```
//!
//! 関係先のオフセットは注入された関数から得ます。オフセット解決の段階では
//! 同じ桁数の仮の値を返す関数を、出力の段階では解決済みの表を引く関数を渡します。
//! どちらの場合もオフセット欄は8桁固定なので、レコードのバイト長は一致します。

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write as _};

use hashbrown::HashSet;

use crate::coder::{code_frame_id, code_lex_file, code_relation};
use crate::errors::{CodingError, Result, WndbError};
use crate::flags::Flags;
use crate::format::{check_offset, escape, quote};
use crate::incompat::Incompats;
use crate::model::{Model, Relations, SenseEntry, Synset, SynsetType};

/// オフセット解決の段階で使う仮のオフセット
pub const PLACEHOLDER_OFFSET: u64 = 0;

/// シンセットのメンバー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member<'a> {
    lemma: Cow<'a, str>,
    lex_id: u32,
    adj_position: Option<&'a str>,
}

impl<'a> Member<'a> {
    /// メンバーを生成します。
    ///
    /// `lex_id_compat` の下では lex id を16の剰余に縮めます。
    /// 16を超える値は縮めた上で警告します(`verbose` の場合のみ)。
    pub fn new(sense: &SenseEntry<'a>, lex_id_compat: bool, verbose: bool) -> Self {
        let lemma = escape(sense.lemma());
        let mut lex_id = sense.lex_id();
        if lex_id_compat {
            let tweaked = lex_id % 16;
            if lex_id > 16 && verbose {
                log::warn!("Out of range lexid {lemma}: {lex_id} tweaked to {tweaked}");
            }
            lex_id = tweaked;
        }
        Self {
            lemma,
            lex_id,
            adj_position: sense
                .sense()
                .adj_position
                .as_deref()
                .filter(|position| !position.is_empty()),
        }
    }
}

impl fmt::Display for Member<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.adj_position {
            Some(position) => write!(f, "{}({}) {:X}", self.lemma, position, self.lex_id),
            None => write!(f, "{} {:X}", self.lemma, self.lex_id),
        }
    }
}

/// 意味関係または語彙関係のポインタ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    pub symbol: &'static str,
    pub target_offset: u64,
    pub target_type: SynsetType,

    /// 関係元のメンバー番号。シンセット関係では0
    pub source: usize,

    /// 関係先のメンバー番号。シンセット関係では0
    pub target: usize,
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {:08} {} {:02x}{:02x}",
            self.symbol,
            self.target_offset,
            self.target_type.as_char(),
            self.source,
            self.target
        )
    }
}

/// 動詞フレームとそれが適用されるメンバー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub num: u32,

    /// 1始まりのメンバー番号。シンセット全体に適用される場合は0
    pub member: usize,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "+ {:02} {:02x}", self.num, self.member)
    }
}

/// フレーム番号ごとにまとめた動詞フレーム
#[derive(Debug, Default)]
pub struct Frames {
    members_by_frame: BTreeMap<u32, BTreeSet<usize>>,
}

impl Frames {
    pub fn add(&mut self, num: u32, member: usize) {
        self.members_by_frame.entry(num).or_default().insert(member);
    }

    /// 出力するフレームの一覧を返します。
    ///
    /// すべてのメンバーに適用されるフレームはメンバー番号0のひとつにまとめます。
    pub fn collapse(&self, member_count: usize) -> Vec<Frame> {
        let mut frames = vec![];
        for (&num, members) in &self.members_by_frame {
            if members.len() == member_count {
                frames.push(Frame { num, member: 0 });
            } else {
                frames.extend(members.iter().map(|&member| Frame { num, member }));
            }
        }
        frames
    }

    /// フレーム欄を書式化します。動詞以外では `None` です。
    ///
    /// 動詞ではフレームがなくても `00` を出力します。
    pub fn render(&self, kind: SynsetType, member_count: usize) -> Option<String> {
        if kind != SynsetType::Verb {
            return None;
        }
        let frames = self.collapse(member_count);
        if frames.is_empty() {
            return Some("00".to_string());
        }
        let mut s = format!("{:02}", frames.len());
        for frame in frames {
            write!(s, " {frame}").ok()?;
        }
        Some(s)
    }
}

/// 符号化されたレコードと、その符号化で捨てた項目の集計
#[derive(Debug)]
pub struct Encoded {
    pub line: String,
    pub incompats: Incompats,
}

/// 関係を重複なしに、最初に現れた順に並べます。
fn dedup_relations<'r>(
    relations: &'r [Relations],
    owner: &str,
    verbose: bool,
) -> Vec<(&'r str, &'r str)> {
    let mut seen = HashSet::new();
    let mut unique = vec![];
    for group in relations {
        for target in &group.targets {
            let relation = (group.kind.as_str(), target.as_str());
            if seen.insert(relation) {
                unique.push(relation);
            } else if verbose {
                log::debug!("{owner} has duplicate relation {} {}", relation.0, relation.1);
            }
        }
    }
    unique
}

/// シンセットをデータレコードに符号化します。
///
/// 関係先のオフセットは `offset_of` から得ます。
pub struct SynsetEncoder<'a, F> {
    model: &'a Model,
    flags: Flags,
    offset_of: F,
    verbose: bool,
}

impl<'a> SynsetEncoder<'a, fn(&str) -> Option<u64>> {
    /// すべての関係先に [`PLACEHOLDER_OFFSET`] を使うエンコーダーを生成します。
    pub fn placeholder(model: &'a Model, flags: Flags) -> Self {
        Self::new(model, flags, |_| Some(PLACEHOLDER_OFFSET))
    }
}

impl<'a, F> SynsetEncoder<'a, F>
where
    F: Fn(&str) -> Option<u64>,
{
    pub fn new(model: &'a Model, flags: Flags, offset_of: F) -> Self {
        Self {
            model,
            flags,
            offset_of,
            verbose: false,
        }
    }

    /// 重複した関係や範囲外の lex id などの診断を出力するかどうか
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn target_offset(&self, target_id: &str, context: &str) -> Result<u64> {
        let offset = (self.offset_of)(target_id).ok_or_else(|| {
            WndbError::malformed("target offset", target_id, context)
        })?;
        check_offset(offset)
    }

    fn synset_pointers(
        &self,
        synset: &Synset,
        pointers: &mut Vec<Pointer>,
        incompats: &mut Incompats,
    ) -> Result<()> {
        let owner = format!("Synset {}", synset.synset_id);
        for (kind, target_id) in dedup_relations(&synset.relations, &owner, self.verbose) {
            let target = self.model.synset(target_id).ok_or_else(|| {
                WndbError::malformed("relation target", target_id, &synset.synset_id)
            })?;
            let symbol = match code_relation(kind, synset.kind, self.flags.pointer_compat()) {
                Ok(symbol) => symbol,
                Err(CodingError::Incompatible(violation)) => {
                    incompats.record(violation);
                    continue;
                }
                Err(CodingError::Malformed(e)) => {
                    if self.verbose {
                        log::warn!(
                            "Discarded relation '{kind}' synset={}",
                            synset.synset_id
                        );
                    }
                    return Err(e.within(&synset.synset_id).into());
                }
            };
            pointers.push(Pointer {
                symbol,
                target_offset: self.target_offset(target_id, &synset.synset_id)?,
                target_type: target.kind,
                source: 0,
                target: 0,
            });
        }
        Ok(())
    }

    fn sense_pointers(
        &self,
        synset: &Synset,
        sense: &SenseEntry,
        source: usize,
        pointers: &mut Vec<Pointer>,
        incompats: &mut Incompats,
    ) -> Result<()> {
        let owner = format!("Sense {}", sense.sense_key());
        for (kind, target_key) in dedup_relations(&sense.sense().relations, &owner, self.verbose) {
            let target_sense = self.model.sense(target_key).ok_or_else(|| {
                WndbError::malformed("relation target", target_key, sense.sense_key())
            })?;
            let target_synset = self
                .model
                .synset(target_sense.synset_id())
                .ok_or_else(|| {
                    WndbError::malformed(
                        "relation target",
                        target_sense.synset_id(),
                        sense.sense_key(),
                    )
                })?;
            let symbol = match code_relation(kind, synset.kind, self.flags.pointer_compat()) {
                Ok(symbol) => symbol,
                Err(CodingError::Incompatible(violation)) => {
                    incompats.record(violation);
                    continue;
                }
                Err(CodingError::Malformed(_)) => {
                    if self.verbose {
                        log::warn!(
                            "Discarded relation '{kind}' synset={} sense={}",
                            synset.synset_id,
                            sense.sense_key()
                        );
                    }
                    continue;
                }
            };
            let target = self
                .model
                .member_number(target_synset, target_sense.lemma())
                .ok_or_else(|| {
                    WndbError::malformed(
                        "member",
                        target_sense.lemma(),
                        &target_synset.synset_id,
                    )
                })?;
            pointers.push(Pointer {
                symbol,
                target_offset: self.target_offset(&target_synset.synset_id, sense.sense_key())?,
                target_type: target_synset.kind,
                source,
                target,
            });
        }
        Ok(())
    }

    /// シンセットを1行のデータレコードに符号化します。
    ///
    /// # 引数
    ///
    /// * `synset` - 符号化するシンセット
    /// * `offset` - シンセット自身のオフセット
    ///
    /// # 戻り値
    ///
    /// 改行で終わるレコードと、互換性違反で捨てた項目の集計
    ///
    /// # エラー
    ///
    /// 辞書編集者ファイル名が表にない場合、シンセット関係の種類が表にない場合、
    /// 関係先が存在しない場合、動詞フレームが表にない場合、
    /// またはオフセットが8桁に収まらない場合にエラーを返します。
    pub fn encode(&self, synset: &Synset, offset: u64) -> Result<Encoded> {
        let mut incompats = Incompats::new();
        let offset = check_offset(offset)?;
        let lex_file =
            code_lex_file(&synset.lexfile).map_err(|e| e.within(&synset.synset_id))?;

        let senses: Vec<SenseEntry> = self.model.members(synset).collect();
        let members: Vec<Member> = senses
            .iter()
            .map(|sense| Member::new(sense, self.flags.lex_id_compat(), self.verbose))
            .collect();
        if members.len() > 0xff {
            return Err(WndbError::malformed(
                "member count",
                members.len().to_string(),
                &synset.synset_id,
            ));
        }

        let mut pointers = vec![];
        self.synset_pointers(synset, &mut pointers, &mut incompats)?;

        let mut frames = Frames::default();
        for (i, sense) in senses.iter().enumerate() {
            for frame_id in &sense.sense().verb_frames {
                match code_frame_id(frame_id, self.flags.verb_frame_compat()) {
                    Ok(num) => frames.add(num, i + 1),
                    Err(CodingError::Incompatible(violation)) => incompats.record(violation),
                    Err(CodingError::Malformed(e)) => {
                        return Err(e.within(sense.sense_key()).into());
                    }
                }
            }
            self.sense_pointers(synset, sense, i + 1, &mut pointers, &mut incompats)?;
        }
        if pointers.len() > 999 {
            return Err(WndbError::malformed(
                "pointer count",
                pointers.len().to_string(),
                &synset.synset_id,
            ));
        }

        let mut line = format!(
            "{offset:08} {lex_file:02} {} {:02x}",
            synset.kind.as_char(),
            members.len()
        );
        for member in &members {
            write!(line, " {member}").map_err(|e| {
                WndbError::invalid_state("formatting member", e.to_string())
            })?;
        }
        write!(line, " {:03}", pointers.len())
            .map_err(|e| WndbError::invalid_state("formatting pointers", e.to_string()))?;
        for pointer in &pointers {
            write!(line, " {pointer}").map_err(|e| {
                WndbError::invalid_state("formatting pointer", e.to_string())
            })?;
        }
        if let Some(frames) = frames.render(synset.kind, members.len()) {
            line.push(' ');
            line.push_str(&frames);
        }
        line.push_str(" | ");
        line.push_str(&synset.definitions.join("; "));
        if !synset.examples.is_empty() {
            let examples: Vec<Cow<str>> = synset.examples.iter().map(|e| quote(e)).collect();
            line.push_str("; ");
            line.push_str(&examples.join(" "));
        }
        line.push_str("  \n");

        Ok(Encoded { line, incompats })
    }
}
