//! Record schemas
//!
//! [`RecordSchema`] is a cheap, cloneable handle to a shared schema. Handles
//! are what [`DataType::Record`] stores, which is how a field can refer back
//! to the schema that declares it:
//!
//! ```
//! use recschema_core::schema::{DataType, RecordField, RecordSchema, SchemaIdentifier};
//!
//! // Build the shell first, then a field that wraps it, then install
//! let person = RecordSchema::new(SchemaIdentifier::EMPTY);
//! person.set_fields(vec![
//!     RecordField::new("name", DataType::String)?,
//!     RecordField::new("sibling", DataType::record(&person))?,
//! ])?;
//!
//! assert!(person.is_recursive());
//! assert_eq!(person, person.clone());
//! # Ok::<(), recschema_core::SchemaError>(())
//! ```
//!
//! Installing a field list is all-or-nothing: the new list is validated and
//! indexed off to the side, then swapped in under one write lock. Readers
//! work on immutable snapshots and never see a partially installed list.
//!
//! A self-referencing schema is a reference cycle. It stays alive until the
//! cycle is broken, e.g. by installing an empty field list.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::compare::{EqualityContext, HashContext};
use super::data_type::DataType;
use super::field::RecordField;
use super::identifier::SchemaIdentifier;
use crate::error::{SchemaError, SchemaResult};

/// Shared handle to a record schema
#[derive(Clone)]
pub struct RecordSchema {
    inner: Arc<SchemaInner>,
}

struct SchemaInner {
    identifier: SchemaIdentifier,
    table: RwLock<Arc<FieldTable>>,
    naming: RwLock<SchemaNaming>,
    text: Option<SchemaText>,
}

#[derive(Default)]
struct SchemaNaming {
    name: Option<String>,
    namespace: Option<String>,
}

struct SchemaText {
    text: String,
    format: String,
}

/// Validated field list plus its lookup indices
struct FieldTable {
    fields: Vec<RecordField>,
    name_index: HashMap<String, usize>,
    alias_index: HashMap<String, usize>,
}

impl FieldTable {
    fn empty() -> Self {
        Self {
            fields: Vec::new(),
            name_index: HashMap::new(),
            alias_index: HashMap::new(),
        }
    }

    /// Validate name/alias uniqueness, then index.
    fn build(fields: Vec<RecordField>) -> SchemaResult<Self> {
        validate(&fields)?;
        Ok(Self::indexed(fields))
    }

    /// Index a field list already known to be valid.
    fn indexed(fields: Vec<RecordField>) -> Self {
        let mut name_index = HashMap::with_capacity(fields.len());
        let mut alias_index = HashMap::new();
        for (index, field) in fields.iter().enumerate() {
            name_index.insert(field.name().to_string(), index);
            for alias in field.aliases() {
                alias_index.insert(alias.clone(), index);
            }
        }
        Self {
            fields,
            name_index,
            alias_index,
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.name_index
            .get(name)
            .or_else(|| self.alias_index.get(name))
            .copied()
    }
}

/// Check that no name or alias appears twice across `fields`.
///
/// Every name and alias goes into one map; the first identifier inserted a
/// second time, in field order, is reported.
fn validate(fields: &[RecordField]) -> SchemaResult<()> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, field) in fields.iter().enumerate() {
        let identifiers =
            std::iter::once(field.name()).chain(field.aliases().iter().map(String::as_str));
        for identifier in identifiers {
            if seen.insert(identifier, index).is_some() {
                return Err(SchemaError::DuplicateField(identifier.to_string()));
            }
        }
    }
    Ok(())
}

/// Immutable snapshot of a schema's fields
///
/// Dereferences to the ordered field slice. Later changes to the schema do
/// not affect a snapshot already taken.
#[derive(Clone)]
pub struct Fields(Arc<FieldTable>);

impl Fields {
    /// Field whose name or alias is `name`.
    pub fn by_name(&self, name: &str) -> Option<&RecordField> {
        self.0.position(name).map(|index| &self.0.fields[index])
    }
}

impl Deref for Fields {
    type Target = [RecordField];

    fn deref(&self) -> &[RecordField] {
        &self.0.fields
    }
}

impl fmt::Debug for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl RecordSchema {
    /// Create a schema with no fields.
    pub fn new(identifier: SchemaIdentifier) -> Self {
        Self::from_parts(identifier, FieldTable::empty(), None)
    }

    /// Create a schema and install `fields`.
    pub fn with_fields(fields: Vec<RecordField>, identifier: SchemaIdentifier) -> SchemaResult<Self> {
        let table = FieldTable::build(fields)?;
        Ok(Self::from_parts(identifier, table, None))
    }

    /// Create a schema that also records its textual source and format.
    pub fn with_text(
        fields: Vec<RecordField>,
        text: impl Into<String>,
        format: impl Into<String>,
        identifier: SchemaIdentifier,
    ) -> SchemaResult<Self> {
        let table = FieldTable::build(fields)?;
        let text = SchemaText {
            text: text.into(),
            format: format.into(),
        };
        Ok(Self::from_parts(identifier, table, Some(text)))
    }

    fn from_parts(identifier: SchemaIdentifier, table: FieldTable, text: Option<SchemaText>) -> Self {
        Self {
            inner: Arc::new(SchemaInner {
                identifier,
                table: RwLock::new(Arc::new(table)),
                naming: RwLock::new(SchemaNaming::default()),
                text,
            }),
        }
    }

    /// Replace the field list.
    ///
    /// On a name/alias collision the schema keeps its previous fields and
    /// `DuplicateField` names the colliding identifier.
    pub fn set_fields(&self, fields: Vec<RecordField>) -> SchemaResult<()> {
        let count = fields.len();
        let table = FieldTable::build(fields).inspect_err(|err| {
            debug!("Rejected field list for schema {}: {}", self.inner.identifier, err);
        })?;

        *self.inner.table.write() = Arc::new(table);
        debug!("Installed {} fields on schema {}", count, self.inner.identifier);
        Ok(())
    }

    /// Snapshot of the current field list, in order.
    pub fn fields(&self) -> Fields {
        Fields(Arc::clone(&self.inner.table.read()))
    }

    /// Field whose name or any alias equals `name`.
    pub fn get_field(&self, name: &str) -> Option<RecordField> {
        self.fields().by_name(name).cloned()
    }

    /// Field at `index` in declaration order.
    pub fn field_at(&self, index: usize) -> Option<RecordField> {
        self.fields()[..].get(index).cloned()
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.fields().len()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields().iter().map(|f| f.name().to_string()).collect()
    }

    /// Field data types in declaration order.
    pub fn data_types(&self) -> Vec<DataType> {
        self.fields().iter().map(|f| f.data_type().clone()).collect()
    }

    /// Data type of the field with this name or alias.
    pub fn data_type(&self, name: &str) -> Option<DataType> {
        self.fields().by_name(name).map(|f| f.data_type().clone())
    }

    /// Identifier this schema was created with.
    pub fn identifier(&self) -> &SchemaIdentifier {
        &self.inner.identifier
    }

    /// Explicit schema name, else the identifier's name.
    pub fn schema_name(&self) -> Option<String> {
        self.inner
            .naming
            .read()
            .name
            .clone()
            .or_else(|| self.inner.identifier.name().map(str::to_string))
    }

    pub fn set_schema_name(&self, name: Option<String>) {
        self.inner.naming.write().name = name;
    }

    pub fn schema_namespace(&self) -> Option<String> {
        self.inner.naming.read().namespace.clone()
    }

    pub fn set_schema_namespace(&self, namespace: Option<String>) {
        self.inner.naming.write().namespace = namespace;
    }

    /// `namespace.name`, or just the name when there is no namespace.
    pub fn full_name(&self) -> Option<String> {
        let name = self.schema_name()?;
        match self.schema_namespace() {
            Some(namespace) => Some(format!("{}.{}", namespace, name)),
            None => Some(name),
        }
    }

    pub fn schema_text(&self) -> Option<&str> {
        self.inner.text.as_ref().map(|t| t.text.as_str())
    }

    pub fn schema_format(&self) -> Option<&str> {
        self.inner.text.as_ref().map(|t| t.format.as_str())
    }

    /// Remove the field with this name, returning it.
    pub fn remove_field(&self, name: &str) -> Option<RecordField> {
        let mut table = self.inner.table.write();
        let index = *table.name_index.get(name)?;

        let mut fields = table.fields.clone();
        let removed = fields.remove(index);
        // Dropping a field cannot introduce a collision
        *table = Arc::new(FieldTable::indexed(fields));

        debug!("Removed field {} from schema {}", name, self.inner.identifier);
        Some(removed)
    }

    /// Rename a field, keeping its type, default and aliases.
    ///
    /// Returns `Ok(false)` if no field has the name `current`. A new name that
    /// collides with another name or alias is rejected and nothing changes.
    pub fn rename_field(&self, current: &str, new_name: &str) -> SchemaResult<bool> {
        // Nothing below may read a schema's fields: the field can point back here
        let mut table = self.inner.table.write();
        let Some(&index) = table.name_index.get(current) else {
            return Ok(false);
        };

        let mut fields = table.fields.clone();
        fields[index] = fields[index].renamed(new_name)?;
        *table = Arc::new(FieldTable::build(fields)?);

        debug!(
            "Renamed field {} to {} on schema {}",
            current, new_name, self.inner.identifier
        );
        Ok(true)
    }

    /// Check if this schema is reachable from its own fields' types.
    pub fn is_recursive(&self) -> bool {
        let target = self.identity();
        let mut visited = HashSet::new();
        let mut pending: Vec<RecordSchema> = Vec::new();
        collect_nested_schemas(&self.data_types(), &mut pending);

        while let Some(schema) = pending.pop() {
            if schema.identity() == target {
                return true;
            }
            if visited.insert(schema.identity()) {
                collect_nested_schemas(&schema.data_types(), &mut pending);
            }
        }
        false
    }

    /// Order-sensitive structural hash of the field names and types.
    ///
    /// Agrees with `==`: equal schemas always produce the same value.
    pub fn structural_hash(&self) -> u64 {
        HashContext::new().schema_hash(self)
    }

    /// Check if two handles refer to the same schema instance.
    pub fn ptr_eq(a: &RecordSchema, b: &RecordSchema) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Address of the shared schema, used as its identity during traversal.
    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }
}

fn collect_nested_schemas(data_types: &[DataType], out: &mut Vec<RecordSchema>) {
    for data_type in data_types {
        match data_type {
            DataType::Record(schema) => out.push(schema.clone()),
            DataType::Array(inner) | DataType::Map(inner) => {
                collect_nested_schemas(std::slice::from_ref(&**inner), out)
            }
            DataType::Choice(options) => collect_nested_schemas(options, out),
            _ => {}
        }
    }
}

impl PartialEq for RecordSchema {
    fn eq(&self, other: &Self) -> bool {
        EqualityContext::new().schemas_equal(self, other)
    }
}

impl Eq for RecordSchema {}

impl Hash for RecordSchema {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

impl fmt::Display for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RecordSchema[")?;
        for (i, field) in self.fields().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field.name(), field.data_type())?;
        }
        f.write_str("]")
    }
}

// Shallow on purpose: nested schemas print as RECORD so cycles terminate
impl fmt::Debug for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self
            .fields()
            .iter()
            .map(|field| format!("{}: {}", field.name(), field.data_type()))
            .collect();
        f.debug_struct("RecordSchema")
            .field("identifier", &self.inner.identifier)
            .field("fields", &fields)
            .finish()
    }
}
