//! Block Segmenter - Splits raw answer text into structural blocks
//!
//! Single top-to-bottom pass over lines. When a line could open more than one
//! block the earliest rule wins: code > table > quote > list > paragraph.
//! Blank lines only separate blocks; every other line lands in exactly one
//! block, so the raw texts together cover the whole input.

use crate::models::SectionType;

/// Parsed payload of a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockBody {
    Paragraph {
        lines: Vec<String>,
    },
    List {
        ordered: bool,
        items: Vec<String>,
    },
    Code {
        /// Tag after the opening fence, if any
        language: Option<String>,
        code: String,
    },
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Quote {
        lines: Vec<String>,
    },
}

/// A contiguous span of the answer with its parsed payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub body: BlockBody,

    /// Source lines of the block joined with `\n`
    pub raw_text: String,
}

impl Block {
    pub fn section_type(&self) -> SectionType {
        match self.body {
            BlockBody::Paragraph { .. } => SectionType::Paragraph,
            BlockBody::List { .. } => SectionType::List,
            BlockBody::Code { .. } => SectionType::Code,
            BlockBody::Table { .. } => SectionType::Table,
            BlockBody::Quote { .. } => SectionType::Quote,
        }
    }
}

/// Split `content` into ordered blocks
pub fn segment(content: &str) -> Vec<Block> {
    let lines: Vec<&str> = content.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            i += 1;
            continue;
        }

        let (body, end) = if is_fence(line) {
            take_code(&lines, i)
        } else if starts_table(&lines, i) {
            take_table(&lines, i)
        } else if is_quote_line(line) {
            take_quote(&lines, i)
        } else if list_marker(line).is_some() {
            take_list(&lines, i)
        } else {
            take_paragraph(&lines, i)
        };

        blocks.push(Block {
            body,
            raw_text: lines[i..end].join("\n"),
        });
        i = end;
    }

    blocks
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

fn is_table_row(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// `|---|:---:|` style row
fn is_table_separator(line: &str) -> bool {
    let t = line.trim();
    t.starts_with('|')
        && t.contains('-')
        && t.chars().all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

fn starts_table(lines: &[&str], i: usize) -> bool {
    is_table_row(lines[i]) && lines.get(i + 1).is_some_and(|l| is_table_separator(l))
}

fn is_quote_line(line: &str) -> bool {
    line.trim_start().starts_with('>')
}

/// Returns `(ordered, item text)` when the line opens a list item.
///
/// Markers must be followed by whitespace so `**bold**` and `---` stay prose.
fn list_marker(line: &str) -> Option<(bool, &str)> {
    let t = line.trim_start();

    if let Some(rest) = t.strip_prefix(['-', '*', '+']) {
        return rest
            .starts_with([' ', '\t'])
            .then(|| (false, rest.trim_start()));
    }

    let digits = t.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    let after = t[digits..].strip_prefix(['.', ')'])?;
    (after.is_empty() || after.starts_with([' ', '\t'])).then(|| (true, after.trim_start()))
}

fn starts_block(lines: &[&str], i: usize) -> bool {
    let line = lines[i];
    is_fence(line) || starts_table(lines, i) || is_quote_line(line) || list_marker(line).is_some()
}

fn take_code(lines: &[&str], start: usize) -> (BlockBody, usize) {
    let tag = lines[start].trim_start().trim_start_matches('`').trim();
    let language = is_language_tag(tag).then(|| tag.to_string());

    // An unterminated fence runs to the end of the document
    let close = (start + 1..lines.len()).find(|&j| is_fence(lines[j]));
    let (body_end, end) = match close {
        Some(j) => (j, j + 1),
        None => (lines.len(), lines.len()),
    };

    let code = lines[start + 1..body_end].join("\n");
    (BlockBody::Code { language, code }, end)
}

/// Identifier-like fence tags only (`rust`, `c++`, `objective-c`)
fn is_language_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '#' | '.'))
}

fn split_cells(line: &str) -> Vec<String> {
    let t = line.trim();
    let t = t.strip_prefix('|').unwrap_or(t);
    let t = t.strip_suffix('|').unwrap_or(t);
    t.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn take_table(lines: &[&str], start: usize) -> (BlockBody, usize) {
    let mut end = start + 2;
    while end < lines.len() && is_table_row(lines[end]) {
        end += 1;
    }

    let header = split_cells(lines[start]);
    let rows = lines[start + 2..end]
        .iter()
        .filter(|l| !is_table_separator(l))
        .map(|l| split_cells(l))
        .collect();

    (BlockBody::Table { header, rows }, end)
}

fn take_quote(lines: &[&str], start: usize) -> (BlockBody, usize) {
    let mut end = start;
    let mut quoted = Vec::new();

    while end < lines.len() && is_quote_line(lines[end]) {
        let text = lines[end].trim_start().trim_start_matches('>');
        quoted.push(text.strip_prefix(' ').unwrap_or(text).trim_end().to_string());
        end += 1;
    }

    (BlockBody::Quote { lines: quoted }, end)
}

fn take_list(lines: &[&str], start: usize) -> (BlockBody, usize) {
    let ordered = list_marker(lines[start]).is_some_and(|(ordered, _)| ordered);
    let mut items: Vec<String> = Vec::new();
    let mut end = start;

    while end < lines.len() {
        let line = lines[end];
        if line.trim().is_empty() {
            break;
        }

        if let Some((_, text)) = list_marker(line) {
            items.push(text.trim_end().to_string());
        } else if line.starts_with([' ', '\t']) && !is_fence(line) {
            // indented continuation of the previous item
            if let Some(last) = items.last_mut() {
                last.push(' ');
                last.push_str(line.trim());
            }
        } else {
            break;
        }
        end += 1;
    }

    (BlockBody::List { ordered, items }, end)
}

fn take_paragraph(lines: &[&str], start: usize) -> (BlockBody, usize) {
    let mut end = start + 1;
    while end < lines.len() && !lines[end].trim().is_empty() && !starts_block(lines, end) {
        end += 1;
    }

    let text = lines[start..end]
        .iter()
        .map(|l| l.trim().to_string())
        .collect();

    (BlockBody::Paragraph { lines: text }, end)
}
