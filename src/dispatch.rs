//! Field-name to wire-operation dispatch for one struct
//!
//! A table is built once per struct definition. Each assignment looks the
//! field up, checks the value against the declared type and then drives the
//! matching [`CompactWriter`] operation.

use alloc::collections::BTreeMap;
use alloc::string::String;

use log::{trace, warn};

use crate::config::EncodeConfig;
use crate::error::{Error, Result};
use crate::schema::{StructSchema, TypeSpec};
use crate::value::Value;
use crate::writer::{int_in_range, CompactWriter};

/// Wire operation selected for a field from its declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireOp {
    /// Length-prefixed string or binary
    Binary,
    /// List with the element tag, `None` when the element type has no tag
    List(Option<u8>),
    /// Nested struct body followed by a stop byte
    Struct,
    /// Boolean in the header nibble
    Bool,
    /// Raw byte
    Byte,
    /// Zigzag varint i16
    I16,
    /// Zigzag varint i32
    I32,
    /// Zigzag varint i64
    I64,
    /// Double, set or map: no writer operation exists
    Unwired,
}

impl WireOp {
    fn for_type(declared: &TypeSpec) -> Self {
        match declared {
            TypeSpec::StringOrBinary => WireOp::Binary,
            TypeSpec::List(element) => WireOp::List(element.element_tag()),
            TypeSpec::NamedReference(_) => WireOp::Struct,
            TypeSpec::Bool => WireOp::Bool,
            TypeSpec::Byte => WireOp::Byte,
            TypeSpec::I16 => WireOp::I16,
            TypeSpec::I32 => WireOp::I32,
            TypeSpec::I64 => WireOp::I64,
            TypeSpec::Double | TypeSpec::Set(_) | TypeSpec::Map(_, _) => WireOp::Unwired,
        }
    }

    /// Whether this operation only writes bytes when scalar fields are enabled
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            WireOp::Bool | WireOp::Byte | WireOp::I16 | WireOp::I32 | WireOp::I64
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldEntry {
    wire_id: Option<i16>,
    declared_type: TypeSpec,
    op: WireOp,
}

/// Per-struct lookup from field name to wire operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDispatchTable {
    name: String,
    fields: BTreeMap<String, FieldEntry>,
}

impl StructDispatchTable {
    /// Build the table for a struct definition.
    ///
    /// If a name is declared twice the first declaration wins.
    pub fn new(schema: &StructSchema) -> Self {
        let mut fields = BTreeMap::new();

        for field in &schema.fields {
            fields.entry(field.name.clone()).or_insert_with(|| FieldEntry {
                wire_id: field.wire_id,
                declared_type: field.declared_type.clone(),
                op: WireOp::for_type(&field.declared_type),
            });
        }

        Self {
            name: schema.name.clone(),
            fields,
        }
    }

    /// Struct name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wire operation for a field, if the field exists
    pub fn op(&self, field: &str) -> Option<WireOp> {
        self.fields.get(field).map(|entry| entry.op)
    }

    /// Number of distinct field names
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the struct declares no fields
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encode one assignment into `writer`.
    ///
    /// Returns the number of bytes appended. Every error is raised before
    /// anything is written for this assignment.
    pub fn dispatch(
        &self,
        writer: &mut CompactWriter,
        config: &EncodeConfig,
        field: &str,
        value: &Value,
    ) -> Result<usize> {
        let entry = self.fields.get(field).ok_or_else(|| Error::UnknownField {
            structure: self.name.clone(),
            field: field.into(),
        })?;

        let wire_id = entry.wire_id.ok_or_else(|| Error::MissingFieldId {
            structure: self.name.clone(),
            field: field.into(),
        })?;

        let before = writer.bytes().len();

        match entry.op {
            WireOp::Binary => {
                let bytes = value
                    .as_bytes()
                    .ok_or_else(|| mismatch(field, "text or binary", value))?;
                writer.write_binary(wire_id, bytes);
            }
            WireOp::List(tag) => {
                let tag = match (tag, &entry.declared_type) {
                    (Some(tag), _) => tag,
                    (None, TypeSpec::List(element)) => {
                        return Err(Error::UnsupportedElementType {
                            field: field.into(),
                            element: (**element).clone(),
                        })
                    }
                    (None, other) => {
                        return Err(Error::UnsupportedElementType {
                            field: field.into(),
                            element: other.clone(),
                        })
                    }
                };
                let Value::List(items) = value else {
                    return Err(mismatch(field, "list", value));
                };
                writer
                    .write_list(wire_id, tag, items)
                    .map_err(|e| e.with_field(field))?;
            }
            WireOp::Struct => {
                // Text and binary values are embedded as an opaque body.
                let body = match value {
                    Value::Struct(instance) => instance.bytes(),
                    other => other
                        .as_bytes()
                        .ok_or_else(|| mismatch(field, "struct, text or binary", other))?,
                };
                writer.write_struct_begin(wire_id);
                writer.write_raw(body);
                writer.write_stop();
            }
            op if op.is_scalar() && config.scalar_fields => {
                write_scalar(writer, op, wire_id, field, value)?;
            }
            WireOp::Unwired if config.scalar_fields => {
                return Err(Error::Unsupported {
                    field: field.into(),
                    what: "fields of this type",
                });
            }
            _ => {
                warn!(
                    "{}.{}: {} field has no wire encoding, value recorded only",
                    self.name, field, entry.declared_type
                );
            }
        }

        let written = writer.bytes().len() - before;
        trace!(
            "{}.{} (id {}) wrote {} bytes",
            self.name,
            field,
            wire_id,
            written
        );

        Ok(written)
    }
}

fn mismatch(field: &str, expected: &'static str, found: &Value) -> Error {
    Error::TypeMismatch {
        field: field.into(),
        expected,
        found: found.kind(),
    }
}

fn write_scalar(
    writer: &mut CompactWriter,
    op: WireOp,
    wire_id: i16,
    field: &str,
    value: &Value,
) -> Result<()> {
    match op {
        WireOp::Bool => {
            let Value::Bool(b) = value else {
                return Err(mismatch(field, "bool", value));
            };
            writer.write_bool(wire_id, *b);
        }
        WireOp::Byte => {
            let v = int_in_range(value, i8::MIN as i64, i8::MAX as i64)
                .ok_or_else(|| mismatch(field, "byte", value))?;
            writer.write_i8(wire_id, v as i8);
        }
        WireOp::I16 => {
            let v = int_in_range(value, i16::MIN as i64, i16::MAX as i64)
                .ok_or_else(|| mismatch(field, "i16", value))?;
            writer.write_i16(wire_id, v as i16);
        }
        WireOp::I32 => {
            let v = int_in_range(value, i32::MIN as i64, i32::MAX as i64)
                .ok_or_else(|| mismatch(field, "i32", value))?;
            writer.write_i32(wire_id, v as i32);
        }
        WireOp::I64 => {
            let v = value.as_i64().ok_or_else(|| mismatch(field, "i64", value))?;
            writer.write_i64(wire_id, v);
        }
        _ => {}
    }

    Ok(())
}
