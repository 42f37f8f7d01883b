//! Error types for the thriftpack encoder

use alloc::string::String;

use crate::schema::TypeSpec;

/// Errors that can occur while compiling a schema or encoding a struct
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Assignment targets a name absent from the struct's schema
    #[error("field '{field}' does not exist in struct '{structure}'")]
    UnknownField {
        /// Struct being assigned to
        structure: String,
        /// Name that was looked up
        field: String,
    },
    /// Matched field has no wire id in the schema
    #[error("field '{field}' of struct '{structure}' has no field id")]
    MissingFieldId {
        /// Struct being assigned to
        structure: String,
        /// Field without an id
        field: String,
    },
    /// List element type has no compact type tag
    #[error("list field '{field}' has element type '{element}' with no compact type tag")]
    UnsupportedElementType {
        /// List field
        field: String,
        /// Declared element type
        element: TypeSpec,
    },
    /// The encoder has no wire encoding for this value
    #[error("field '{field}': {what} is not supported by the encoder")]
    Unsupported {
        /// Field being written
        field: String,
        /// What was not encodable
        what: &'static str,
    },
    /// Value variant does not match the declared field type
    #[error("field '{field}' expects {expected}, got {found}")]
    TypeMismatch {
        /// Field being written
        field: String,
        /// Value kind accepted by the declared type
        expected: &'static str,
        /// Value kind that was supplied
        found: &'static str,
    },
    /// No struct with this name in the namespace
    #[error("struct '{0}' is not defined in the namespace")]
    UnknownStruct(String),
    /// Two struct definitions share a name
    #[error("struct '{0}' is defined more than once")]
    DuplicateStruct(String),
    /// The schema source could not be parsed
    #[error("failed to parse schema: {0}")]
    Parse(String),
    /// Unexpected end of input while decoding a varint
    #[error("unexpected end of varint data")]
    UnexpectedEof,
    /// Varint does not fit the target width
    #[error("varint overflows target integer width")]
    Overflow,
}

impl Error {
    /// Replace the field label of a field-level error with `name`
    pub(crate) fn with_field(self, name: &str) -> Self {
        match self {
            Error::Unsupported { what, .. } => Error::Unsupported {
                field: name.into(),
                what,
            },
            Error::TypeMismatch {
                expected, found, ..
            } => Error::TypeMismatch {
                field: name.into(),
                expected,
                found,
            },
            other => other,
        }
    }
}

/// Result type alias for thriftpack operations
pub type Result<T> = core::result::Result<T, Error>;
