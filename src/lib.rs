//! thriftpack: schema-driven Thrift Compact Protocol struct encoder
//!
//! A parsed IDL document is compiled once into a [`Namespace`]. Each struct
//! in it hands out [`StructInstance`]s; assigning a field by name encodes it
//! straight into the instance's Compact Protocol byte stream.
//!
//! # Field header
//!
//! ```text
//! short form (delta 1..=15)      long form (any other delta)
//! +---------+--------+           +---------+--------+------------------+
//! | delta:4 | type:4 |           | 0000    | type:4 | zigzag varint id |
//! +---------+--------+           +---------+--------+------------------+
//! ```
//!
//! # Coverage
//!
//! - String/binary, list and nested struct fields always encode
//! - Bool, byte and integer fields encode only with
//!   [`EncodeConfig::scalar_fields`]; otherwise their values are recorded
//!   and a warning is logged
//! - Double, set and map fields, and double/list/set/map list elements,
//!   have no encoding
//! - Enum references are embedded as opaque struct bodies
//!
//! # Example
//!
//! ```rust
//! use thriftpack::*;
//!
//! let document = SchemaDocument::new(vec![Statement::Struct(StructSchema::new(
//!     "User",
//!     vec![
//!         FieldDescriptor::new("name", 1, TypeSpec::StringOrBinary),
//!         FieldDescriptor::new("tags", 2, TypeSpec::list(TypeSpec::I32)),
//!     ],
//! ))]);
//!
//! let namespace = compile_namespace(&document)?;
//! let mut user = namespace.create("User")?;
//! user.set_field("name", "bob")?;
//! user.set_field("tags", Value::from_iter([1, 2]))?;
//!
//! assert_eq!(user.bytes(), &[0x18, 0x03, b'b', b'o', b'b', 0x19, 0x25, 0x02, 0x04]);
//! # Ok::<(), thriftpack::Error>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(any(feature = "std", test))]
extern crate std;

extern crate alloc;

pub mod config;
pub mod dispatch;
pub mod error;
pub mod namespace;
pub mod schema;
pub mod sink;
pub mod types;
pub mod value;
pub mod varint;
pub mod writer;

// Re-export main types
pub use config::EncodeConfig;
pub use dispatch::{StructDispatchTable, WireOp};
pub use error::{Error, Result};
pub use namespace::{
    compile_namespace, compile_namespace_with, create_thrift, create_thrift_with, Namespace,
    StructFactory, StructInstance,
};
pub use schema::{FieldDescriptor, SchemaDocument, SchemaParser, Statement, StructSchema, TypeSpec};
pub use sink::ByteSink;
pub use types::CompactType;
pub use value::Value;
pub use writer::CompactWriter;
