//! HTML output tree.
//!
//! A [`Node`] is either a text leaf or a parent element owning its children.
//! Rendering performs no escaping: text is written verbatim.

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Element attributes, rendered in insertion order.
pub type Attributes = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Text with an optional wrapping tag. Untagged leaves render raw text.
    Leaf {
        tag: Option<String>,
        value: String,
        attributes: Attributes,
    },

    /// Element wrapping one or more child nodes.
    Parent {
        tag: String,
        children: Vec<Node>,
        attributes: Attributes,
    },
}

impl Node {
    /// Untagged text leaf
    pub fn text(value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: None,
            value: value.into(),
            attributes: Attributes::new(),
        }
    }

    /// Text leaf wrapped in `tag`
    pub fn leaf(tag: &str, value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: Some(tag.to_string()),
            value: value.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn parent(tag: &str, children: Vec<Node>) -> Self {
        Node::Parent {
            tag: tag.to_string(),
            children,
            attributes: Attributes::new(),
        }
    }

    /// Add an attribute, replacing the value of an existing key in place.
    pub fn with_attribute(mut self, key: &str, value: impl Into<String>) -> Self {
        match &mut self {
            Node::Leaf { attributes, .. } | Node::Parent { attributes, .. } => {
                attributes.insert(key.to_string(), value.into());
            }
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf { tag, .. } => tag.as_deref(),
            Node::Parent { tag, .. } => Some(tag),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Parent { children, .. } => children,
        }
    }

    /// Render this node and its descendants to an HTML string.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        match self {
            Node::Leaf {
                tag,
                value,
                attributes,
            } => match tag.as_deref().filter(|t| !t.is_empty()) {
                None => {
                    if value.is_empty() {
                        return Err(Error::InvalidNode(
                            "text leaf has neither tag nor value".to_string(),
                        ));
                    }
                    out.push_str(value);
                }
                Some(tag) => {
                    open_tag(tag, attributes, out);
                    out.push_str(value);
                    close_tag(tag, out);
                }
            },
            Node::Parent {
                tag,
                children,
                attributes,
            } => {
                if tag.is_empty() {
                    return Err(Error::InvalidNode("parent node has no tag".to_string()));
                }
                if children.is_empty() {
                    return Err(Error::InvalidNode(format!("<{tag}> has no children")));
                }
                open_tag(tag, attributes, out);
                for child in children {
                    child.write_html(out)?;
                }
                close_tag(tag, out);
            }
        }
        Ok(())
    }
}

fn open_tag(tag: &str, attributes: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
