use tracing::debug;

use crate::block::{Block, BlockType};
use crate::error::{Error, Result};
use crate::inline::inline_nodes;
use crate::node::Node;
use crate::parser::heading_level;

/// Convert blocks to a single `<div>` holding one element per block
pub fn blocks_to_node(blocks: &[Block]) -> Result<Node> {
    let children = blocks.iter().map(block_to_node).collect::<Result<Vec<_>>>()?;
    debug!(blocks = children.len(), "converted document");
    Ok(Node::parent("div", children))
}

pub fn block_to_node(block: &Block) -> Result<Node> {
    match block.kind {
        BlockType::Heading => heading_to_node(block),
        BlockType::Paragraph => paragraph_to_node(block),
        BlockType::Code => Ok(code_to_node(block)),
        BlockType::Quote => quote_to_node(block),
        BlockType::UnorderedList => list_to_node(block, "ul", |_| "- ".to_string()),
        BlockType::OrderedList => list_to_node(block, "ol", |i| format!("{}. ", i + 1)),
    }
}

fn heading_to_node(block: &Block) -> Result<Node> {
    let level = heading_level(&block.text).unwrap_or(0);
    if level == 0 || level + 1 >= block.text.len() {
        return Err(Error::InvalidHeading(block.text.clone()));
    }
    let children = inline_nodes(&block.text[level + 1..])?;
    Ok(Node::parent(&format!("h{level}"), children))
}

fn paragraph_to_node(block: &Block) -> Result<Node> {
    let text = block.lines().collect::<Vec<_>>().join(" ");
    Ok(Node::parent("p", inline_nodes(&text)?))
}

/// Fence lines are dropped whole; the code itself is never inline-parsed.
fn code_to_node(block: &Block) -> Node {
    let lines: Vec<&str> = block.lines().collect();
    let inner = lines.get(1..lines.len().saturating_sub(1)).unwrap_or_default();

    let mut code = String::new();
    for line in inner {
        code.push_str(line);
        code.push('\n');
    }

    // An empty fence still renders as `<pre><code></code></pre>`
    let code = if code.is_empty() {
        Node::leaf("code", code)
    } else {
        Node::parent("code", vec![Node::text(code)])
    };
    Node::parent("pre", vec![code])
}

fn quote_to_node(block: &Block) -> Result<Node> {
    let mut lines = Vec::new();
    for line in block.lines() {
        let Some(rest) = line.strip_prefix('>') else {
            return Err(Error::InvalidQuote(line.to_string()));
        };
        lines.push(rest.strip_prefix(' ').unwrap_or(rest));
    }
    Ok(Node::parent("blockquote", inline_nodes(&lines.join(" "))?))
}

fn list_to_node(block: &Block, tag: &str, marker: impl Fn(usize) -> String) -> Result<Node> {
    let mut items = Vec::new();
    for (i, line) in block.lines().enumerate() {
        let prefix = marker(i);
        let text = line.strip_prefix(prefix.as_str()).unwrap_or(line);
        items.push(Node::parent("li", inline_nodes(text)?));
    }
    Ok(Node::parent(tag, items))
}
