mod block;
mod config;
mod error;
mod html;
mod inline;
mod node;
mod page;
mod parser;
mod site;

pub use block::{Block, BlockType, Span, SpanKind};
pub use config::Config;
pub use error::{Error, Result};
pub use html::{block_to_node, blocks_to_node};
pub use inline::{parse_spans, span_to_node};
pub use node::{Attributes, Node};
pub use page::{extract_title, render_page, rewrite_base_path};
pub use parser::{block_type, split_blocks};
pub use site::{BuildReport, build_site, copy_directory, generate_page, generate_pages_recursive};

/// Parse markdown text into a vector of classified blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert markdown to an HTML node tree rooted at a `<div>`.
pub fn markdown_to_node(markdown: &str) -> Result<Node> {
    let blocks = parse(markdown);
    html::blocks_to_node(&blocks)
}

/// Convert markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    markdown_to_node(markdown)?.to_html()
}
