//! In-place rewriting of `perc:mp` exercise blocks.
//!
//! Discovery is a bounded pattern heuristic, not a grammar parser:
//!
//! 1. An exercise block is `name: { ... unit: "perc:mp" ... data: [ ... ]`
//!    followed by `}` or `,`. No `}` may appear between the opening brace and
//!    `data:`.
//! 2. Its data list runs from `data: [` to the first `]` followed by optional
//!    whitespace and `}` or `,`. Nested lists are not balanced.
//! 3. Inside that list every `{ value: <number>, points: <integer> }` entry is
//!    replaced by `{ value: { minutes: M, seconds: S }, points: <integer> }`.
//!
//! Everything else, including blocks carrying any other unit, is copied
//! through byte for byte. Converted entries no longer match step 3, so a
//! second pass over migrated text changes nothing.

use super::errors::ConversionError;
use super::time_value::convert_literal;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

/// Unit tag selecting the blocks to migrate. Matched exactly.
pub const MARKER: &str = "perc:mp";

static EXERCISE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r#"(?s)(?P<name>\w+):\s*\{{[^}}]*unit:\s*["']{}["'][^}}]*data:\s*\[.*?\]\s*[}},]"#,
        regex::escape(MARKER)
    );
    Regex::new(&pattern).expect("exercise block pattern is valid")
});

static DATA_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)data:\s*\[(.*?)\]\s*[},]").expect("data list pattern is valid"));

static LEGACY_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\s*value:\s*([\d.]+),\s*points:\s*(\d+)\s*\}")
        .expect("legacy entry pattern is valid")
});

/// Counters for one rewrite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RewriteStats {
    pub blocks_matched: usize,
    pub entries_converted: usize,
}

impl RewriteStats {
    fn absorb(&mut self, other: RewriteStats) {
        self.blocks_matched += other.blocks_matched;
        self.entries_converted += other.entries_converted;
    }
}

/// Output of [`rewrite`]: the full new text plus what was touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub stats: RewriteStats,
    changed: bool,
}

impl Rewrite {
    /// False when `text` is byte-identical to the input.
    pub fn changed(&self) -> bool {
        self.changed
    }
}

/// Rewrite every qualifying block in `source`.
///
/// Fails on the first entry whose value is not a usable numeral; nothing is
/// returned for the file in that case, so callers never see a half-migrated
/// text.
pub fn rewrite(source: &str) -> Result<Rewrite, ConversionError> {
    let mut output = String::with_capacity(source.len() + source.len() / 4);
    let mut stats = RewriteStats::default();
    let mut cursor = 0;

    for block in EXERCISE_BLOCK.captures_iter(source) {
        let Some(whole) = block.get(0) else {
            continue;
        };
        let name = block.name("name").map_or("", |m| m.as_str());

        output.push_str(&source[cursor..whole.start()]);
        let (text, block_stats) = rewrite_block(source, whole.start(), whole.as_str())?;
        log::debug!(
            "Block '{}': converted {} entries",
            name,
            block_stats.entries_converted
        );
        output.push_str(&text);
        stats.absorb(block_stats);
        cursor = whole.end();
    }
    output.push_str(&source[cursor..]);

    let changed = output != source;
    Ok(Rewrite {
        text: output,
        stats,
        changed,
    })
}

/// Rewrite the data list of one block. `offset` is the block's position in
/// `source`, used only for line numbers in errors.
fn rewrite_block(
    source: &str,
    offset: usize,
    block: &str,
) -> Result<(String, RewriteStats), ConversionError> {
    let Some(list) = DATA_LIST.captures(block).and_then(|c| c.get(1)) else {
        return Ok((block.to_string(), RewriteStats::default()));
    };

    let list_offset = offset + list.start();
    let (new_list, entries_converted) = rewrite_entries(source, list_offset, list.as_str())?;

    let mut text = String::with_capacity(block.len() + new_list.len());
    text.push_str(&block[..list.start()]);
    text.push_str(&new_list);
    text.push_str(&block[list.end()..]);

    Ok((
        text,
        RewriteStats {
            blocks_matched: 1,
            entries_converted,
        },
    ))
}

fn rewrite_entries(
    source: &str,
    offset: usize,
    list: &str,
) -> Result<(String, usize), ConversionError> {
    let mut output = String::with_capacity(list.len() * 2);
    let mut cursor = 0;
    let mut converted = 0;

    for entry in LEGACY_ENTRY.captures_iter(list) {
        let Some(whole) = entry.get(0) else {
            continue;
        };
        output.push_str(&list[cursor..whole.start()]);
        output.push_str(&convert_entry(&entry, source, offset)?);
        cursor = whole.end();
        converted += 1;
    }
    output.push_str(&list[cursor..]);

    Ok((output, converted))
}

fn convert_entry(
    entry: &Captures<'_>,
    source: &str,
    offset: usize,
) -> Result<String, ConversionError> {
    let value = &entry[1];
    let points = &entry[2];
    let time = convert_literal(value).map_err(|e| {
        let position = offset + entry.get(1).map_or(0, |m| m.start());
        e.at_line(line_of(source, position))
    })?;
    log::trace!("{} -> {}", value, time);
    Ok(format!("{{ value: {}, points: {} }}", time, points))
}

/// 1-based line number of byte `position` in `source`.
fn line_of(source: &str, position: usize) -> usize {
    source.as_bytes()[..position]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}
