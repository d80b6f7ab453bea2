//! Structural text rendering.
//!
//! Every value is prefixed with a parenthesised type tag. Containers open on
//! the tag line, list one entry per line indented by two spaces with a
//! trailing comma, and close on their own line:
//!
//! ```text
//! (Point) {
//!   x: (i32) 1,
//!   y: (i32) 2,
//! }
//! ```

use crate::Node;
use std::fmt::Write;

const INDENT: &str = "  ";
const HEXDUMP_WIDTH: usize = 16;

/// Render a node without a trailing newline.
pub fn render(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

fn pad(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

pub(crate) fn write_str(out: &mut String, s: &str) {
    let _ = write!(out, "(str) (len={}) {:?}", s.len(), s);
}

pub(crate) fn write_bytes(out: &mut String, bytes: &[u8], depth: usize) {
    let _ = write!(out, "(bytes) (len={}) {{", bytes.len());
    if bytes.is_empty() {
        out.push('}');
        return;
    }
    out.push('\n');
    for (row, chunk) in bytes.chunks(HEXDUMP_WIDTH).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect();
        pad(out, depth + 1);
        let _ = writeln!(
            out,
            "{:08x}  {:<width$}  |{}|",
            row * HEXDUMP_WIDTH,
            hex.join(" "),
            ascii,
            width = HEXDUMP_WIDTH * 3 - 1
        );
    }
    pad(out, depth);
    out.push('}');
}

fn write_items(out: &mut String, items: &[Node], depth: usize, open: char, close: char) {
    out.push(open);
    if items.is_empty() {
        out.push(close);
        return;
    }
    out.push('\n');
    for item in items {
        pad(out, depth + 1);
        write_node(out, item, depth + 1);
        out.push_str(",\n");
    }
    pad(out, depth);
    out.push(close);
}

fn write_fields(out: &mut String, fields: &[(&'static str, Node)], depth: usize) {
    out.push('{');
    if fields.is_empty() {
        out.push('}');
        return;
    }
    out.push('\n');
    for (name, value) in fields {
        pad(out, depth + 1);
        out.push_str(name);
        out.push_str(": ");
        write_node(out, value, depth + 1);
        out.push_str(",\n");
    }
    pad(out, depth);
    out.push('}');
}

fn write_entries(out: &mut String, entries: &[(Node, Node)], depth: usize) {
    out.push('{');
    if entries.is_empty() {
        out.push('}');
        return;
    }
    out.push('\n');
    for (key, value) in entries {
        pad(out, depth + 1);
        write_node(out, key, depth + 1);
        out.push_str(": ");
        write_node(out, value, depth + 1);
        out.push_str(",\n");
    }
    pad(out, depth);
    out.push('}');
}

pub(crate) fn write_node(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::Bool(b) => {
            let _ = write!(out, "(bool) {b}");
        }
        Node::Int { ty, value } => {
            let _ = write!(out, "({ty}) {value}");
        }
        Node::UInt { ty, value } => {
            let _ = write!(out, "({ty}) {value}");
        }
        Node::Float { ty, value } => {
            // f32 values are widened on capture; print them at their own precision.
            if *ty == "f32" {
                let _ = write!(out, "({ty}) {:?}", *value as f32);
            } else {
                let _ = write!(out, "({ty}) {value:?}");
            }
        }
        Node::Char(c) => {
            let _ = write!(out, "(char) {c:?}");
        }
        Node::Str(s) => write_str(out, s),
        Node::Bytes(bytes) => write_bytes(out, bytes, depth),
        Node::Unit => out.push_str("(unit) ()"),
        Node::None => out.push_str("(option) None"),
        Node::Some(inner) => {
            out.push_str("(option) Some(");
            write_node(out, inner, depth);
            out.push(')');
        }
        Node::UnitStruct { name } => {
            let _ = write!(out, "({name}) {name}");
        }
        Node::UnitVariant { name, variant } => {
            let _ = write!(out, "({name}) {variant}");
        }
        Node::NewtypeStruct { name, value } => {
            let _ = write!(out, "({name}) ");
            write_node(out, value, depth);
        }
        Node::NewtypeVariant {
            name,
            variant,
            value,
        } => {
            let _ = write!(out, "({name}::{variant}) ");
            write_node(out, value, depth);
        }
        Node::Seq(items) => {
            let _ = write!(out, "(seq) (len={}) ", items.len());
            write_items(out, items, depth, '[', ']');
        }
        Node::Tuple(items) => {
            let _ = write!(out, "(tuple) (len={}) ", items.len());
            write_items(out, items, depth, '(', ')');
        }
        Node::TupleStruct { name, fields } => {
            let _ = write!(out, "({name}) ");
            write_items(out, fields, depth, '(', ')');
        }
        Node::TupleVariant {
            name,
            variant,
            fields,
        } => {
            let _ = write!(out, "({name}::{variant}) ");
            write_items(out, fields, depth, '(', ')');
        }
        Node::Map(entries) => {
            let _ = write!(out, "(map) (len={}) ", entries.len());
            write_entries(out, entries, depth);
        }
        Node::Struct { name, fields } => {
            let _ = write!(out, "({name}) ");
            write_fields(out, fields, depth);
        }
        Node::StructVariant {
            name,
            variant,
            fields,
        } => {
            let _ = write!(out, "({name}::{variant}) ");
            write_fields(out, fields, depth);
        }
    }
}
