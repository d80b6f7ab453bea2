//! Logical value tree.

use crate::render;
use std::cmp::Ordering;

/// The logical shape of a captured value.
///
/// Only content is recorded: no addresses, no capacities. Type names are the
/// ones serde hands out (`i32`, `Point`, `Color::Red`), so the rendered text
/// stays readable without being tied to memory layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Bool(bool),
    Int {
        ty: &'static str,
        value: i128,
    },
    UInt {
        ty: &'static str,
        value: u128,
    },
    Float {
        ty: &'static str,
        value: f64,
    },
    Char(char),
    Str(String),
    Bytes(Vec<u8>),
    Unit,
    None,
    Some(Box<Node>),
    UnitStruct {
        name: &'static str,
    },
    UnitVariant {
        name: &'static str,
        variant: &'static str,
    },
    NewtypeStruct {
        name: &'static str,
        value: Box<Node>,
    },
    NewtypeVariant {
        name: &'static str,
        variant: &'static str,
        value: Box<Node>,
    },
    Seq(Vec<Node>),
    Tuple(Vec<Node>),
    TupleStruct {
        name: &'static str,
        fields: Vec<Node>,
    },
    TupleVariant {
        name: &'static str,
        variant: &'static str,
        fields: Vec<Node>,
    },
    /// Entries are kept sorted; see [`Node::map`].
    Map(Vec<(Node, Node)>),
    Struct {
        name: &'static str,
        fields: Vec<(&'static str, Node)>,
    },
    StructVariant {
        name: &'static str,
        variant: &'static str,
        fields: Vec<(&'static str, Node)>,
    },
}

/// Keys that share a class can be ordered without rendering them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyClass {
    Integer,
    Float,
    Bool,
    Char,
    Str,
    Bytes,
}

/// Integers of any width and signedness on one number line.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum WideInt {
    Negative(i128),
    NonNegative(u128),
}

impl Node {
    /// Build a map node with its entries in canonical order.
    ///
    /// When every key is of one comparable kind the natural order is used
    /// (numbers numerically, strings lexicographically). Mixed or composite
    /// keys fall back to ordering by their rendered text, so a total order
    /// always exists.
    pub fn map(mut entries: Vec<(Node, Node)>) -> Self {
        sort_entries(&mut entries);
        Node::Map(entries)
    }

    fn key_class(&self) -> Option<KeyClass> {
        match self {
            Node::Int { .. } | Node::UInt { .. } => Some(KeyClass::Integer),
            Node::Float { .. } => Some(KeyClass::Float),
            Node::Bool(_) => Some(KeyClass::Bool),
            Node::Char(_) => Some(KeyClass::Char),
            Node::Str(_) => Some(KeyClass::Str),
            Node::Bytes(_) => Some(KeyClass::Bytes),
            _ => None,
        }
    }

    fn wide_int(&self) -> Option<WideInt> {
        match *self {
            Node::Int { value, .. } if value < 0 => Some(WideInt::Negative(value)),
            Node::Int { value, .. } => Some(WideInt::NonNegative(value as u128)),
            Node::UInt { value, .. } => Some(WideInt::NonNegative(value)),
            _ => None,
        }
    }

    /// Natural order between two keys of the same class.
    fn natural_cmp(&self, other: &Node) -> Ordering {
        match (self, other) {
            (Node::Float { value: a, .. }, Node::Float { value: b, .. }) => a.total_cmp(b),
            (Node::Bool(a), Node::Bool(b)) => a.cmp(b),
            (Node::Char(a), Node::Char(b)) => a.cmp(b),
            (Node::Str(a), Node::Str(b)) => a.cmp(b),
            (Node::Bytes(a), Node::Bytes(b)) => a.cmp(b),
            _ => self.wide_int().cmp(&other.wide_int()),
        }
    }
}

fn sort_entries(entries: &mut [(Node, Node)]) {
    sort_canonical(entries, |(key, _)| key);
}

/// Sort `items` by the canonical order of the node `key` picks out.
///
/// The same order map keys get: natural order when every node shares a
/// comparable kind, rendered text otherwise.
pub(crate) fn sort_canonical<T>(items: &mut [T], key: impl Fn(&T) -> &Node) {
    let first = items.first().and_then(|item| key(item).key_class());
    let uniform = first.is_some() && items.iter().all(|item| key(item).key_class() == first);

    if uniform {
        // Ties only happen for keys like i32 1 vs u8 1; the type tag in the
        // rendered text settles them.
        items.sort_by(|a, b| {
            let (a, b) = (key(a), key(b));
            a.natural_cmp(b)
                .then_with(|| render::render(a).cmp(&render::render(b)))
        });
    } else {
        items.sort_by_cached_key(|item| render::render(key(item)));
    }
}
