//! `serde::Serializer` that captures values as [`Node`] trees.

use crate::{DumpError, DumpResult, Node};
use serde::ser::{self, Serialize};

/// Capture any serializable value as a [`Node`].
pub fn to_node<T: Serialize + ?Sized>(value: &T) -> DumpResult<Node> {
    value.serialize(NodeSerializer)
}

/// Serializer whose output is a [`Node`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeSerializer;

impl ser::Serializer for NodeSerializer {
    type Ok = Node;
    type Error = DumpError;

    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = SeqBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = StructBuilder;
    type SerializeStructVariant = StructBuilder;

    fn serialize_bool(self, v: bool) -> DumpResult<Node> {
        Ok(Node::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> DumpResult<Node> {
        Ok(Node::Int {
            ty: "i8",
            value: v.into(),
        })
    }

    fn serialize_i16(self, v: i16) -> DumpResult<Node> {
        Ok(Node::Int {
            ty: "i16",
            value: v.into(),
        })
    }

    fn serialize_i32(self, v: i32) -> DumpResult<Node> {
        Ok(Node::Int {
            ty: "i32",
            value: v.into(),
        })
    }

    fn serialize_i64(self, v: i64) -> DumpResult<Node> {
        Ok(Node::Int {
            ty: "i64",
            value: v.into(),
        })
    }

    fn serialize_i128(self, v: i128) -> DumpResult<Node> {
        Ok(Node::Int {
            ty: "i128",
            value: v,
        })
    }

    fn serialize_u8(self, v: u8) -> DumpResult<Node> {
        Ok(Node::UInt {
            ty: "u8",
            value: v.into(),
        })
    }

    fn serialize_u16(self, v: u16) -> DumpResult<Node> {
        Ok(Node::UInt {
            ty: "u16",
            value: v.into(),
        })
    }

    fn serialize_u32(self, v: u32) -> DumpResult<Node> {
        Ok(Node::UInt {
            ty: "u32",
            value: v.into(),
        })
    }

    fn serialize_u64(self, v: u64) -> DumpResult<Node> {
        Ok(Node::UInt {
            ty: "u64",
            value: v.into(),
        })
    }

    fn serialize_u128(self, v: u128) -> DumpResult<Node> {
        Ok(Node::UInt {
            ty: "u128",
            value: v,
        })
    }

    fn serialize_f32(self, v: f32) -> DumpResult<Node> {
        Ok(Node::Float {
            ty: "f32",
            value: v.into(),
        })
    }

    fn serialize_f64(self, v: f64) -> DumpResult<Node> {
        Ok(Node::Float { ty: "f64", value: v })
    }

    fn serialize_char(self, v: char) -> DumpResult<Node> {
        Ok(Node::Char(v))
    }

    fn serialize_str(self, v: &str) -> DumpResult<Node> {
        Ok(Node::Str(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> DumpResult<Node> {
        Ok(Node::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> DumpResult<Node> {
        Ok(Node::None)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> DumpResult<Node> {
        Ok(Node::Some(Box::new(value.serialize(self)?)))
    }

    fn serialize_unit(self) -> DumpResult<Node> {
        Ok(Node::Unit)
    }

    fn serialize_unit_struct(self, name: &'static str) -> DumpResult<Node> {
        Ok(Node::UnitStruct { name })
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> DumpResult<Node> {
        Ok(Node::UnitVariant { name, variant })
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        value: &T,
    ) -> DumpResult<Node> {
        Ok(Node::NewtypeStruct {
            name,
            value: Box::new(value.serialize(self)?),
        })
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> DumpResult<Node> {
        Ok(Node::NewtypeVariant {
            name,
            variant,
            value: Box::new(value.serialize(self)?),
        })
    }

    fn serialize_seq(self, len: Option<usize>) -> DumpResult<SeqBuilder> {
        Ok(SeqBuilder::new(SeqKind::Seq, len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> DumpResult<SeqBuilder> {
        Ok(SeqBuilder::new(SeqKind::Tuple, len))
    }

    fn serialize_tuple_struct(self, name: &'static str, len: usize) -> DumpResult<SeqBuilder> {
        Ok(SeqBuilder::new(SeqKind::TupleStruct { name }, len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> DumpResult<SeqBuilder> {
        Ok(SeqBuilder::new(SeqKind::TupleVariant { name, variant }, len))
    }

    fn serialize_map(self, len: Option<usize>) -> DumpResult<MapBuilder> {
        Ok(MapBuilder {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> DumpResult<StructBuilder> {
        Ok(StructBuilder {
            name,
            variant: None,
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> DumpResult<StructBuilder> {
        Ok(StructBuilder {
            name,
            variant: Some(variant),
            fields: Vec::with_capacity(len),
        })
    }
}

#[derive(Debug)]
enum SeqKind {
    Seq,
    Tuple,
    TupleStruct {
        name: &'static str,
    },
    TupleVariant {
        name: &'static str,
        variant: &'static str,
    },
}

/// Collects elements for every sequence-like shape.
#[derive(Debug)]
pub struct SeqBuilder {
    kind: SeqKind,
    items: Vec<Node>,
}

impl SeqBuilder {
    fn new(kind: SeqKind, len: usize) -> Self {
        Self {
            kind,
            items: Vec::with_capacity(len),
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> DumpResult<()> {
        self.items.push(value.serialize(NodeSerializer)?);
        Ok(())
    }

    fn finish(self) -> Node {
        match self.kind {
            SeqKind::Seq => Node::Seq(self.items),
            SeqKind::Tuple => Node::Tuple(self.items),
            SeqKind::TupleStruct { name } => Node::TupleStruct {
                name,
                fields: self.items,
            },
            SeqKind::TupleVariant { name, variant } => Node::TupleVariant {
                name,
                variant,
                fields: self.items,
            },
        }
    }
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Node;
    type Error = DumpError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> DumpResult<()> {
        self.push(value)
    }

    fn end(self) -> DumpResult<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = Node;
    type Error = DumpError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> DumpResult<()> {
        self.push(value)
    }

    fn end(self) -> DumpResult<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = Node;
    type Error = DumpError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> DumpResult<()> {
        self.push(value)
    }

    fn end(self) -> DumpResult<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SeqBuilder {
    type Ok = Node;
    type Error = DumpError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> DumpResult<()> {
        self.push(value)
    }

    fn end(self) -> DumpResult<Node> {
        Ok(self.finish())
    }
}

/// Collects map entries; ordering is fixed up in [`Node::map`].
#[derive(Debug)]
pub struct MapBuilder {
    entries: Vec<(Node, Node)>,
    pending_key: Option<Node>,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Node;
    type Error = DumpError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> DumpResult<()> {
        self.pending_key = Some(key.serialize(NodeSerializer)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> DumpResult<()> {
        let key = self.pending_key.take().ok_or(DumpError::MissingMapKey)?;
        self.entries.push((key, value.serialize(NodeSerializer)?));
        Ok(())
    }

    fn end(self) -> DumpResult<Node> {
        Ok(Node::map(self.entries))
    }
}

/// Collects named fields for structs and struct variants.
#[derive(Debug)]
pub struct StructBuilder {
    name: &'static str,
    variant: Option<&'static str>,
    fields: Vec<(&'static str, Node)>,
}

impl StructBuilder {
    fn push<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> DumpResult<()> {
        self.fields.push((key, value.serialize(NodeSerializer)?));
        Ok(())
    }

    fn finish(self) -> Node {
        match self.variant {
            Some(variant) => Node::StructVariant {
                name: self.name,
                variant,
                fields: self.fields,
            },
            None => Node::Struct {
                name: self.name,
                fields: self.fields,
            },
        }
    }
}

impl ser::SerializeStruct for StructBuilder {
    type Ok = Node;
    type Error = DumpError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> DumpResult<()> {
        self.push(key, value)
    }

    fn end(self) -> DumpResult<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for StructBuilder {
    type Ok = Node;
    type Error = DumpError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> DumpResult<()> {
        self.push(key, value)
    }

    fn end(self) -> DumpResult<Node> {
        Ok(self.finish())
    }
}
