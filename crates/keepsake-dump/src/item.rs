//! Candidate items and the `dump` entry point.

use crate::render::{write_bytes, write_node, write_str};
use crate::{to_node, DumpResult, Node};
use serde::{Deserialize, Serialize};

/// How text and binary items are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DumpMode {
    /// Text and UTF-8 binary items are written verbatim, one per line;
    /// everything else is rendered structurally.
    #[default]
    Raw,
    /// Every item is rendered structurally, text and binary included.
    Structured,
}

/// One value handed to a snapshot check.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Text(String),
    Binary(Vec<u8>),
    Value(Node),
}

impl Item {
    /// Capture any serializable value.
    pub fn value<T: Serialize + ?Sized>(value: &T) -> DumpResult<Self> {
        Ok(Item::Value(to_node(value)?))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Item::Text(text.into())
    }

    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Item::Binary(bytes.into())
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Item::Text(value.to_string())
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Item::Text(value)
    }
}

impl From<&String> for Item {
    fn from(value: &String) -> Self {
        Item::Text(value.clone())
    }
}

impl From<&[u8]> for Item {
    fn from(value: &[u8]) -> Self {
        Item::Binary(value.to_vec())
    }
}

impl From<Vec<u8>> for Item {
    fn from(value: Vec<u8>) -> Self {
        Item::Binary(value)
    }
}

impl From<Node> for Item {
    fn from(value: Node) -> Self {
        Item::Value(value)
    }
}

/// Render `items` into one text block, in call order.
///
/// Each item's rendering is followed by a newline. In raw mode, binary items
/// that are not valid UTF-8 are rendered as a hexdump so that distinct byte
/// strings never produce the same text.
pub fn dump(items: &[Item], mode: DumpMode) -> String {
    let mut out = String::new();

    for item in items {
        match (mode, item) {
            (DumpMode::Raw, Item::Text(text)) => out.push_str(text),
            (DumpMode::Raw, Item::Binary(bytes)) => match std::str::from_utf8(bytes) {
                Ok(text) => out.push_str(text),
                Err(_) => write_bytes(&mut out, bytes, 0),
            },
            (DumpMode::Structured, Item::Text(text)) => write_str(&mut out, text),
            (DumpMode::Structured, Item::Binary(bytes)) => write_bytes(&mut out, bytes, 0),
            (_, Item::Value(node)) => write_node(&mut out, node, 0),
        }
        out.push('\n');
    }

    out
}
