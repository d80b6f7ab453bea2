//! Deterministic text dumps of arbitrary values.
//!
//! Any `serde::Serialize` value is first captured as a [`Node`] tree by an
//! in-crate serializer, then rendered to a human-diffable text block. Map
//! entries are sorted while the tree is built, so two maps holding the same
//! entries always render identically no matter how they were filled. Sets
//! reach serde as plain sequences; wrap them in [`Unordered`] or use
//! [`unordered`] as a `serialize_with` function to get the same guarantee.
//!
//! # Example
//!
//! ```
//! use keepsake_dump::{dump, DumpMode, Item};
//! use std::collections::HashMap;
//!
//! let mut scores = HashMap::new();
//! scores.insert("b", 2);
//! scores.insert("a", 1);
//!
//! let items = vec![Item::from("header"), Item::value(&scores).unwrap()];
//! let text = dump(&items, DumpMode::Raw);
//! assert!(text.starts_with("header\n(map) (len=2) {\n"));
//! ```

mod error;
mod item;
mod node;
mod render;
mod ser;
mod unordered;

pub use error::{DumpError, DumpResult};
pub use item::{dump, DumpMode, Item};
pub use node::Node;
pub use render::render;
pub use ser::{to_node, NodeSerializer};
pub use unordered::{unordered, Unordered};
