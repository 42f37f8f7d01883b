//! Stateful Compact Protocol struct writer
//!
//! The writer tracks the id of the last field written so headers can carry a
//! 4-bit delta instead of the full id, and keeps a stack of saved cursors so
//! numbering restarts inside nested structs.

use alloc::format;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::sink::ByteSink;
use crate::types::CompactType;
use crate::value::Value;
use crate::varint;

/// Compact Protocol writer over an owned [`ByteSink`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompactWriter {
    sink: ByteSink,
    last_field_id: i16,
    stack: Vec<i16>,
}

impl CompactWriter {
    /// Create a writer with an empty sink and a zero field cursor
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the last field header written in the current struct scope
    #[inline]
    pub fn last_field_id(&self) -> i16 {
        self.last_field_id
    }

    /// Number of nested structs currently open
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Snapshot of the bytes written so far
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        self.sink.as_slice()
    }

    /// Consume the writer and return its bytes
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.sink.into_vec()
    }

    /// Write a field header, using the one-byte delta form when possible
    pub fn write_field_header(&mut self, field_id: i16, type_tag: u8) {
        let delta = field_id as i32 - self.last_field_id as i32;

        if delta > 0 && delta <= CompactType::MAX_SHORT_DELTA {
            self.sink.put_u8(((delta as u8) << 4) | type_tag);
        } else {
            self.sink.put_u8(type_tag);
            self.sink.put_varint(varint::zigzag(field_id as i64, 16));
        }

        self.last_field_id = field_id;
    }

    /// Write the stop marker and close the innermost nested struct, if any
    pub fn write_stop(&mut self) {
        self.sink.put_u8(CompactType::STOP);

        if let Some(saved) = self.stack.pop() {
            self.last_field_id = saved;
        }
    }

    /// Write a boolean field; the value lives in the header's type nibble
    #[inline]
    pub fn write_bool(&mut self, field_id: i16, value: bool) {
        self.write_field_header(field_id, bool_tag(value));
    }

    /// Write a byte field
    #[inline]
    pub fn write_i8(&mut self, field_id: i16, value: i8) {
        self.write_field_header(field_id, CompactType::BYTE);
        self.sink.put_u8(value as u8);
    }

    /// Write an i16 field
    #[inline]
    pub fn write_i16(&mut self, field_id: i16, value: i16) {
        self.write_field_header(field_id, CompactType::I16);
        self.put_zigzag(value as i64, 16);
    }

    /// Write an i32 field
    #[inline]
    pub fn write_i32(&mut self, field_id: i16, value: i32) {
        self.write_field_header(field_id, CompactType::I32);
        self.put_zigzag(value as i64, 32);
    }

    /// Write an i64 field
    #[inline]
    pub fn write_i64(&mut self, field_id: i16, value: i64) {
        self.write_field_header(field_id, CompactType::I64);
        self.put_zigzag(value, 64);
    }

    /// Write a string or binary field as length-prefixed bytes
    #[inline]
    pub fn write_binary(&mut self, field_id: i16, bytes: &[u8]) {
        self.write_field_header(field_id, CompactType::BINARY);
        self.sink.put_varbytes(bytes);
    }

    /// Write a list field.
    ///
    /// Every item is checked against `element_tag` before anything is written,
    /// so a rejected list leaves the sink untouched. Double, list, set and map
    /// elements are not encodable and fail with [`Error::Unsupported`].
    pub fn write_list(&mut self, field_id: i16, element_tag: u8, items: &[Value]) -> Result<()> {
        check_elements(field_id, element_tag, items)?;

        self.write_field_header(field_id, CompactType::LIST);

        let size = items.len();
        if size < CompactType::LONG_LIST_SIZE {
            self.sink.put_u8(((size as u8) << 4) | element_tag);
        } else {
            self.sink.put_u8(0xF0 | element_tag);
            self.sink.put_varint(size as u64);
        }

        for item in items {
            self.put_element(element_tag, item);
        }

        Ok(())
    }

    /// Open a nested struct field.
    ///
    /// The cursor left by this field's header is saved and numbering restarts
    /// at zero; the matching [`write_stop`](Self::write_stop) restores it.
    pub fn write_struct_begin(&mut self, field_id: i16) {
        self.write_field_header(field_id, CompactType::STRUCT);
        // The header just set the cursor to `field_id`, so the saved value is
        // the nested field's own id, not the cursor from before this call.
        self.stack.push(self.last_field_id);
        self.last_field_id = 0;
    }

    /// Append bytes verbatim, with no header or length prefix
    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.sink.put_bytes(bytes);
    }

    #[inline]
    fn put_zigzag(&mut self, value: i64, bits: u32) {
        self.sink.put_varint(varint::zigzag(value, bits));
    }

    // Items were validated by `check_elements`.
    fn put_element(&mut self, element_tag: u8, item: &Value) {
        match (element_tag, item) {
            (CompactType::TRUE | CompactType::FALSE, Value::Bool(b)) => {
                self.sink.put_u8(bool_tag(*b))
            }
            (CompactType::BYTE, _) => {
                if let Some(v) = item.as_i64() {
                    self.sink.put_u8(v as i8 as u8);
                }
            }
            (CompactType::I16, _) => {
                if let Some(v) = item.as_i64() {
                    self.put_zigzag(v, 16);
                }
            }
            (CompactType::I32, _) => {
                if let Some(v) = item.as_i64() {
                    self.put_zigzag(v, 32);
                }
            }
            (CompactType::I64, _) => {
                if let Some(v) = item.as_i64() {
                    self.put_zigzag(v, 64);
                }
            }
            (CompactType::BINARY, _) => {
                if let Some(bytes) = item.as_bytes() {
                    self.sink.put_varbytes(bytes);
                }
            }
            _ => {}
        }
    }
}

#[inline]
fn bool_tag(value: bool) -> u8 {
    if value {
        CompactType::TRUE
    } else {
        CompactType::FALSE
    }
}

/// Integer payload of `value` if it fits in `[min, max]`
pub(crate) fn int_in_range(value: &Value, min: i64, max: i64) -> Option<i64> {
    value.as_i64().filter(|v| (min..=max).contains(v))
}

fn check_elements(field_id: i16, element_tag: u8, items: &[Value]) -> Result<()> {
    let expected = match element_tag {
        CompactType::TRUE | CompactType::FALSE => "bool",
        CompactType::BYTE => "byte",
        CompactType::I16 => "i16",
        CompactType::I32 => "i32",
        CompactType::I64 => "i64",
        CompactType::BINARY => "text or binary",
        CompactType::DOUBLE | CompactType::LIST | CompactType::SET | CompactType::MAP => {
            return Err(Error::Unsupported {
                field: format!("#{field_id}"),
                what: "list elements of this type",
            });
        }
        _ => {
            return Err(Error::Unsupported {
                field: format!("#{field_id}"),
                what: "unknown list element type",
            });
        }
    };

    let accepts = |item: &Value| match element_tag {
        CompactType::TRUE | CompactType::FALSE => matches!(item, Value::Bool(_)),
        CompactType::BYTE => int_in_range(item, i8::MIN as i64, i8::MAX as i64).is_some(),
        CompactType::I16 => int_in_range(item, i16::MIN as i64, i16::MAX as i64).is_some(),
        CompactType::I32 => int_in_range(item, i32::MIN as i64, i32::MAX as i64).is_some(),
        CompactType::I64 => item.as_i64().is_some(),
        _ => item.as_bytes().is_some(),
    };

    match items.iter().find(|item| !accepts(*item)) {
        Some(item) => Err(Error::TypeMismatch {
            field: format!("#{field_id}"),
            expected,
            found: item.kind(),
        }),
        None => Ok(()),
    }
}
