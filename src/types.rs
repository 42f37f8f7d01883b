//! Compact Protocol type tags

/// Type nibble values written into field and list headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactType;

impl CompactType {
    /// End of struct marker
    pub const STOP: u8 = 0x00;
    /// Boolean `true` (value carried in the tag)
    pub const TRUE: u8 = 0x01;
    /// Boolean `false` (value carried in the tag)
    pub const FALSE: u8 = 0x02;
    /// Single raw byte
    pub const BYTE: u8 = 0x03;
    /// Zigzag varint, 16-bit
    pub const I16: u8 = 0x04;
    /// Zigzag varint, 32-bit
    pub const I32: u8 = 0x05;
    /// Zigzag varint, 64-bit
    pub const I64: u8 = 0x06;
    /// IEEE-754 double
    pub const DOUBLE: u8 = 0x07;
    /// Length-prefixed bytes or UTF-8 string
    pub const BINARY: u8 = 0x08;
    /// List container
    pub const LIST: u8 = 0x09;
    /// Set container
    pub const SET: u8 = 0x0A;
    /// Map container
    pub const MAP: u8 = 0x0B;
    /// Nested struct
    pub const STRUCT: u8 = 0x0C;

    /// Largest field-id delta that fits the short header form
    pub const MAX_SHORT_DELTA: i32 = 15;

    /// List sizes at or above this value use the long size header
    pub const LONG_LIST_SIZE: usize = 15;
}
