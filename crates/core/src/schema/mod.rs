//! Record Schemas - Typed, nestable field lists with structural equality
//!
//! This module models record schemas: ordered lists of named, typed fields.
//! A field's type may itself be a record, and that record may be the schema
//! declaring the field, or any ancestor of it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ RecordSchema (Arc handle)                                   │
//! │   identifier: SchemaIdentifier                              │
//! │   table: RwLock<Arc<FieldTable>>  ── swapped on set_fields  │
//! │     fields ─┬─ RecordField { name, aliases, default, ... }  │
//! │             └─ DataType::Record(RecordSchema) ──┐           │
//! │                                                 │ may loop  │
//! │   ◄─────────────────────────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use recschema_core::schema::{DataType, RecordField, RecordSchema, SchemaIdentifier};
//!
//! let build = || -> Result<RecordSchema, recschema_core::SchemaError> {
//!     let node = RecordSchema::new(SchemaIdentifier::EMPTY);
//!     node.set_fields(vec![
//!         RecordField::with_aliases("value", DataType::Long, None, ["v"])?,
//!         RecordField::new("next", DataType::record(&node))?,
//!     ])?;
//!     Ok(node)
//! };
//!
//! let a = build()?;
//! let b = build()?;
//!
//! // No shared objects, same shape
//! assert_eq!(a, b);
//! assert_eq!(a.structural_hash(), b.structural_hash());
//! assert_eq!(a.get_field("v").map(|f| f.name().to_string()), Some("value".into()));
//! # Ok::<(), recschema_core::SchemaError>(())
//! ```
//!
//! # Equality and hashing
//!
//! Schema identity, name, text and identifier are ignored; only the field
//! list counts. See [`compare`] for how cyclic graphs are handled.

pub mod compare;
pub mod data_type;
pub mod field;
pub mod hash;
pub mod identifier;
pub mod record;
pub mod value;

// Re-export primary types
pub use compare::{NESTED_HASH_DEPTH, NESTED_RECORD_HASH};
pub use data_type::DataType;
pub use field::{RecordField, RecordFieldBuilder};
pub use hash::{fnv1a_64, hash_str, mix};
pub use identifier::SchemaIdentifier;
pub use record::{Fields, RecordSchema};
pub use value::Value;
