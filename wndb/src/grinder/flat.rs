//! 相互参照を持たない補助ファイルの出力
//!
//! - `{noun,verb,adj,adv}.exc`: 不規則な屈折形
//! - `verb.Framestext`: 動詞フレームの文面
//! - `sents.vrb`, `sentidx.vrb`: 動詞の例文テンプレートとその参照
//! - `cntlist`, `cntlist.rev`: タグ付き出現回数
//! - `lexnames`: 辞書編集者ファイル名
//!
//! どのファイルも、出力順はモデルの格納順に依存しません。

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::io::Write;

use crate::coder::{LEX_FILES, code_frame_id, lex_file_pos};
use crate::errors::Result;
use crate::format::escape;
use crate::model::{Model, Pos, SenseEntry};

/// 不規則な屈折形を `form lemma` の行として、昇順かつ重複なしに書き出します。
pub fn write_morphs<W: Write>(wtr: &mut W, model: &Model, pos: Pos) -> Result<usize> {
    let lines: BTreeSet<String> = model
        .data()
        .lexes
        .iter()
        .filter(|lex| lex.kind.pos() == pos)
        .flat_map(|lex| {
            lex.forms
                .iter()
                .map(|form| format!("{} {}", escape(form), escape(&lex.lemma)))
        })
        .collect();
    for line in &lines {
        writeln!(wtr, "{line}")?;
    }
    Ok(lines.len())
}

/// 動詞フレームの文面を `num text` の行としてフレーム番号の昇順に書き出します。
///
/// 表にないフレームには 100 + 1始まりの位置を番号として割り当てます。
pub fn write_verb_frames<W: Write>(wtr: &mut W, model: &Model) -> Result<usize> {
    let mut frames: Vec<(u32, &str)> = model
        .verb_frames()
        .iter()
        .zip(1..)
        .map(|(frame, i)| {
            let num = code_frame_id(&frame.id, false).unwrap_or(100 + i);
            (num, frame.text.as_str())
        })
        .collect();
    frames.sort_by_key(|&(num, _)| num);
    for (num, text) in &frames {
        writeln!(wtr, "{num} {text}")?;
    }
    log::info!("Verb frames: {}", frames.len());
    Ok(frames.len())
}

/// 動詞テンプレートを `id template` の行として番号の昇順に書き出します。
pub fn write_templates<W: Write>(wtr: &mut W, model: &Model) -> Result<usize> {
    let mut templates: Vec<_> = model.verb_templates().iter().collect();
    templates.sort_by_key(|template| template.id);
    for template in &templates {
        writeln!(wtr, "{} {}", template.id, template.text)?;
    }
    log::info!("Verb templates: {}", templates.len());
    Ok(templates.len())
}

fn senses_by_key(model: &Model) -> Vec<SenseEntry<'_>> {
    let mut senses: Vec<_> = model.senses().collect();
    senses.sort_by(|a, b| a.sense_key().cmp(b.sense_key()));
    senses
}

/// テンプレートを参照するセンスを `sensekey id,id,...` の行としてセンスキーの昇順に書き出します。
pub fn write_template_index<W: Write>(wtr: &mut W, model: &Model) -> Result<usize> {
    let mut n = 0;
    for sense in senses_by_key(model) {
        let templates = &sense.sense().verb_templates;
        if templates.is_empty() {
            continue;
        }
        let ids: Vec<String> = templates.iter().map(u32::to_string).collect();
        writeln!(wtr, "{} {}", sense.sense_key(), ids.join(","))?;
        n += 1;
    }
    log::info!("Verb template references: {n} senses");
    Ok(n)
}

/// タグ付き出現回数を `count sensekey rank` の行として回数の降順に書き出します。
///
/// 回数が等しい行はセンスキーの昇順です。
pub fn write_tag_counts<W: Write>(wtr: &mut W, model: &Model) -> Result<usize> {
    let mut counted: Vec<(u32, SenseEntry)> = senses_by_key(model)
        .into_iter()
        .filter_map(|sense| sense.tag_count().map(|count| (count, sense)))
        .collect();
    counted.sort_by_key(|&(count, _)| Reverse(count));
    for (count, sense) in &counted {
        writeln!(wtr, "{count} {} {}", sense.sense_key(), sense.lex_index())?;
    }
    log::info!("Tag counts: {}", counted.len());
    Ok(counted.len())
}

/// タグ付き出現回数を `sensekey rank count` の行としてセンスキーの昇順に書き出します。
pub fn write_tag_counts_rev<W: Write>(wtr: &mut W, model: &Model) -> Result<usize> {
    let mut n = 0;
    for sense in senses_by_key(model) {
        if let Some(count) = sense.tag_count() {
            writeln!(wtr, "{} {} {count}", sense.sense_key(), sense.lex_index())?;
            n += 1;
        }
    }
    log::info!("Tag counts reverse: {n}");
    Ok(n)
}

/// 辞書編集者ファイル名を `NN\tname\tposnum` の行として番号順に書き出します。
pub fn write_lexnames<W: Write>(wtr: &mut W) -> Result<usize> {
    for (num, name) in LEX_FILES.iter().enumerate() {
        let pos_num = match lex_file_pos(name) {
            Some(Pos::Noun) => 1,
            Some(Pos::Verb) => 2,
            Some(Pos::Adj) => 3,
            Some(Pos::Adv) => 4,
            None => 0,
        };
        writeln!(wtr, "{num:02}\t{name}\t{pos_num}")?;
    }
    log::info!("Lexfiles: {}", LEX_FILES.len());
    Ok(LEX_FILES.len())
}
