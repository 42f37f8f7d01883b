//! Compiled struct namespace and live struct instances

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use log::debug;

use crate::config::EncodeConfig;
use crate::dispatch::StructDispatchTable;
use crate::error::{Error, Result};
use crate::schema::{SchemaDocument, SchemaParser, Statement};
use crate::value::Value;
use crate::writer::CompactWriter;

/// A struct being encoded: a private writer plus the struct's dispatch table
#[derive(Debug, Clone, PartialEq)]
pub struct StructInstance {
    table: Arc<StructDispatchTable>,
    config: EncodeConfig,
    writer: CompactWriter,
    values: BTreeMap<String, Value>,
}

impl StructInstance {
    /// Struct name
    #[inline]
    pub fn name(&self) -> &str {
        self.table.name()
    }

    /// Assign a field, encoding it immediately.
    ///
    /// On error nothing is appended for this assignment, but bytes from
    /// earlier assignments stay; a failed instance should be discarded.
    pub fn set_field(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.table
            .dispatch(&mut self.writer, &self.config, field, &value)?;
        self.values.insert(field.into(), value);
        Ok(())
    }

    /// Last value assigned to a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Bytes encoded so far
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        self.writer.bytes()
    }

    /// Underlying writer state
    #[inline]
    pub fn writer(&self) -> &CompactWriter {
        &self.writer
    }

    /// Consume the instance and return its encoded body.
    ///
    /// A stop byte is appended only when the namespace was compiled with
    /// [`EncodeConfig::terminate_top_level`].
    pub fn finish(mut self) -> Vec<u8> {
        if self.config.terminate_top_level {
            self.writer.write_stop();
        }
        self.writer.into_bytes()
    }
}

/// Creates fresh instances of one struct
#[derive(Debug, Clone)]
pub struct StructFactory {
    table: Arc<StructDispatchTable>,
    config: EncodeConfig,
}

impl StructFactory {
    /// Struct name
    #[inline]
    pub fn name(&self) -> &str {
        self.table.name()
    }

    /// New instance with an empty writer
    pub fn create(&self) -> StructInstance {
        StructInstance {
            table: Arc::clone(&self.table),
            config: self.config,
            writer: CompactWriter::new(),
            values: BTreeMap::new(),
        }
    }
}

/// Immutable map from struct name to factory
#[derive(Debug, Clone)]
pub struct Namespace {
    structs: BTreeMap<String, StructFactory>,
    config: EncodeConfig,
}

impl Namespace {
    /// Factory for a struct
    pub fn get(&self, name: &str) -> Option<&StructFactory> {
        self.structs.get(name)
    }

    /// New instance of a struct
    pub fn create(&self, name: &str) -> Result<StructInstance> {
        self.get(name)
            .map(StructFactory::create)
            .ok_or_else(|| Error::UnknownStruct(name.into()))
    }

    /// Struct names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.structs.keys().map(String::as_str)
    }

    /// Number of structs
    #[inline]
    pub fn len(&self) -> usize {
        self.structs.len()
    }

    /// True when the document defined no structs
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    /// Configuration shared by every instance
    #[inline]
    pub fn config(&self) -> EncodeConfig {
        self.config
    }
}

/// Compile a parsed document with the default configuration
pub fn compile_namespace(document: &SchemaDocument) -> Result<Namespace> {
    compile_namespace_with(document, EncodeConfig::default())
}

/// Compile a parsed document.
///
/// Only struct definitions are registered; every other statement is skipped.
pub fn compile_namespace_with(document: &SchemaDocument, config: EncodeConfig) -> Result<Namespace> {
    let mut structs = BTreeMap::new();

    for statement in &document.statements {
        let Statement::Struct(schema) = statement else {
            debug!("skipping {} statement", statement.kind());
            continue;
        };

        if structs.contains_key(&schema.name) {
            return Err(Error::DuplicateStruct(schema.name.clone()));
        }

        debug!(
            "registering struct {} with {} fields",
            schema.name,
            schema.fields.len()
        );
        let factory = StructFactory {
            table: Arc::new(StructDispatchTable::new(schema)),
            config,
        };
        structs.insert(schema.name.clone(), factory);
    }

    Ok(Namespace { structs, config })
}

/// Parse schema source with `parser` and compile it with the default configuration
pub fn create_thrift<P: SchemaParser>(source: &str, parser: &P) -> Result<Namespace> {
    create_thrift_with(source, parser, EncodeConfig::default())
}

/// Parse schema source with `parser` and compile it
pub fn create_thrift_with<P: SchemaParser>(
    source: &str,
    parser: &P,
    config: EncodeConfig,
) -> Result<Namespace> {
    let document = parser
        .parse(source)
        .map_err(|e| Error::Parse(e.to_string()))?;
    compile_namespace_with(&document, config)
}
