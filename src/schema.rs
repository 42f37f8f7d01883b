//! Schema document model consumed by the encoder
//!
//! Parsing IDL source text is the job of an external parser. This module only
//! describes the shape such a parser hands over: a list of top-level
//! statements, of which struct definitions carry field descriptors.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::types::CompactType;

/// Declared type of a struct field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// `bool`
    Bool,
    /// `byte` / `i8`
    Byte,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `double`
    Double,
    /// `string` or `binary`
    StringOrBinary,
    /// `list<T>`
    List(Box<TypeSpec>),
    /// `set<T>`
    Set(Box<TypeSpec>),
    /// `map<K,V>`
    Map(Box<TypeSpec>, Box<TypeSpec>),
    /// Reference to a struct or enum by name, resolved when a value is written
    NamedReference(String),
}

impl TypeSpec {
    /// Shorthand for `list<element>`
    pub fn list(element: TypeSpec) -> Self {
        TypeSpec::List(Box::new(element))
    }

    /// Shorthand for `set<element>`
    pub fn set(element: TypeSpec) -> Self {
        TypeSpec::Set(Box::new(element))
    }

    /// Shorthand for `map<key,value>`
    pub fn map(key: TypeSpec, value: TypeSpec) -> Self {
        TypeSpec::Map(Box::new(key), Box::new(value))
    }

    /// Shorthand for a named struct or enum reference
    pub fn named(name: impl Into<String>) -> Self {
        TypeSpec::NamedReference(name.into())
    }

    /// Compact type tag used when this type appears as a list element.
    ///
    /// Named references have no element tag: nested structs and enums inside
    /// lists are not encodable.
    pub fn element_tag(&self) -> Option<u8> {
        match self {
            TypeSpec::Bool => Some(CompactType::TRUE),
            TypeSpec::Byte => Some(CompactType::BYTE),
            TypeSpec::I16 => Some(CompactType::I16),
            TypeSpec::I32 => Some(CompactType::I32),
            TypeSpec::I64 => Some(CompactType::I64),
            TypeSpec::Double => Some(CompactType::DOUBLE),
            TypeSpec::StringOrBinary => Some(CompactType::BINARY),
            TypeSpec::List(_) => Some(CompactType::LIST),
            TypeSpec::Set(_) => Some(CompactType::SET),
            TypeSpec::Map(_, _) => Some(CompactType::MAP),
            TypeSpec::NamedReference(_) => None,
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Bool => f.write_str("bool"),
            TypeSpec::Byte => f.write_str("byte"),
            TypeSpec::I16 => f.write_str("i16"),
            TypeSpec::I32 => f.write_str("i32"),
            TypeSpec::I64 => f.write_str("i64"),
            TypeSpec::Double => f.write_str("double"),
            TypeSpec::StringOrBinary => f.write_str("string"),
            TypeSpec::List(element) => write!(f, "list<{element}>"),
            TypeSpec::Set(element) => write!(f, "set<{element}>"),
            TypeSpec::Map(key, value) => write!(f, "map<{key},{value}>"),
            TypeSpec::NamedReference(name) => f.write_str(name),
        }
    }
}

/// One field of a struct definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as written in the IDL
    pub name: String,
    /// Numeric field id; `None` when the IDL omits it
    pub wire_id: Option<i16>,
    /// Declared type
    pub declared_type: TypeSpec,
}

impl FieldDescriptor {
    /// Create a descriptor with a field id
    pub fn new(name: impl Into<String>, wire_id: i16, declared_type: TypeSpec) -> Self {
        Self {
            name: name.into(),
            wire_id: Some(wire_id),
            declared_type,
        }
    }

    /// Create a descriptor for a field declared without an id
    pub fn without_id(name: impl Into<String>, declared_type: TypeSpec) -> Self {
        Self {
            name: name.into(),
            wire_id: None,
            declared_type,
        }
    }
}

/// A struct definition and its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructSchema {
    /// Struct name
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,
}

impl StructSchema {
    /// Create a struct definition
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// Top-level IDL statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `struct Name { ... }`
    Struct(StructSchema),
    /// `enum Name { ... }`
    Enum(String),
    /// `typedef T Name`
    Typedef(String),
    /// `service Name { ... }`
    Service(String),
    /// `const T Name = ...`
    Const(String),
    /// `include "path"`
    Include(String),
}

impl Statement {
    /// Statement keyword, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Struct(_) => "struct",
            Statement::Enum(_) => "enum",
            Statement::Typedef(_) => "typedef",
            Statement::Service(_) => "service",
            Statement::Const(_) => "const",
            Statement::Include(_) => "include",
        }
    }
}

/// Parsed IDL document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDocument {
    /// Top-level statements in source order
    pub statements: Vec<Statement>,
}

impl SchemaDocument {
    /// Create a document from statements
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

/// External IDL parser
///
/// Implementations turn schema source text into a [`SchemaDocument`]. Their
/// error type only needs to be displayable; it is surfaced as
/// [`Error::Parse`](crate::Error::Parse).
pub trait SchemaParser {
    /// Parser failure
    type Error: fmt::Display;

    /// Parse IDL source text
    fn parse(&self, source: &str) -> Result<SchemaDocument, Self::Error>;
}
