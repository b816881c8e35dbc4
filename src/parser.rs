use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::block::{Block, BlockType};

/// One or more blank lines, which may hold stray spaces or tabs
static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n(?:[ \t]*\n)+").unwrap());

/// Classification rules, checked in order. Anything unmatched is a paragraph.
const RULES: [(fn(&str) -> bool, BlockType); 5] = [
    (is_heading, BlockType::Heading),
    (is_code, BlockType::Code),
    (is_quote, BlockType::Quote),
    (is_unordered_list, BlockType::UnorderedList),
    (is_ordered_list, BlockType::OrderedList),
];

/// Parse markdown text into a list of classified blocks
pub fn parse(markdown: &str) -> Vec<Block> {
    split_blocks(markdown)
        .into_iter()
        .map(|text| {
            let kind = block_type(&text);
            debug!(?kind, len = text.len(), "classified block");
            Block { kind, text }
        })
        .collect()
}

/// Split a document on blank lines, trimming each block and dropping empty ones
pub fn split_blocks(markdown: &str) -> Vec<String> {
    let markdown = markdown.replace("\r\n", "\n");
    BLANK_LINES_RE
        .split(&markdown)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn block_type(block: &str) -> BlockType {
    RULES
        .iter()
        .find(|(rule, _)| rule(block))
        .map_or(BlockType::Paragraph, |(_, kind)| *kind)
}

/// Number of leading `#` characters, if they form a valid heading marker
pub(crate) fn heading_level(block: &str) -> Option<usize> {
    let level = block.chars().take_while(|&c| c == '#').count();
    let valid = (1..=6).contains(&level) && block[level..].starts_with(' ');
    valid.then_some(level)
}

fn is_heading(block: &str) -> bool {
    heading_level(block).is_some()
}

fn is_code(block: &str) -> bool {
    let lines: Vec<&str> = block.split('\n').collect();
    match (lines.first(), lines.last()) {
        (Some(first), Some(last)) if lines.len() > 1 => {
            first.starts_with("```") && last.starts_with("```")
        }
        _ => false,
    }
}

fn is_quote(block: &str) -> bool {
    block.split('\n').all(|line| line.starts_with('>'))
}

fn is_unordered_list(block: &str) -> bool {
    block.split('\n').all(|line| line.starts_with("- "))
}

fn is_ordered_list(block: &str) -> bool {
    block
        .split('\n')
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)))
}
