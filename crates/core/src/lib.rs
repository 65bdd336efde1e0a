//! recschema - Record Schema Model
//!
//! This crate models record schemas: ordered, named, typed fields that can
//! nest arbitrarily, including nesting that loops back to an ancestor.
//!
//! # Modules
//!
//! - [`schema`] - Fields, data types, schemas, cycle-safe equality/hashing
//! - [`error`] - Construction errors
//! - [`config`] - TOML-backed core configuration
//! - [`logging`] - `tracing` subscriber setup for hosts

pub mod config;
pub mod error;
pub mod logging;
pub mod schema;

// Re-export commonly used items
pub use config::{ConfigError, ConfigResult, CoreConfig};
pub use error::{SchemaError, SchemaResult};
pub use schema::{
    DataType, Fields, RecordField, RecordFieldBuilder, RecordSchema, SchemaIdentifier, Value,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
