//! Record field definitions
//!
//! A [`RecordField`] is immutable once built. Name validation and the default
//! value check run at construction, so every field a schema sees is
//! well-formed; uniqueness across sibling fields is the schema's job.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use super::compare::{EqualityContext, HashContext};
use super::data_type::DataType;
use super::value::Value;
use crate::error::{SchemaError, SchemaResult};

/// One named, typed slot in a record schema
///
/// Two fields are equal when their name, type, default value, nullability
/// and alias set are all equal.
#[derive(Debug, Clone)]
pub struct RecordField {
    name: String,
    data_type: DataType,
    default_value: Option<Value>,
    aliases: BTreeSet<String>,
    nullable: bool,
}

impl RecordField {
    /// Create a nullable field with no default and no aliases.
    pub fn new(name: impl Into<String>, data_type: DataType) -> SchemaResult<Self> {
        Self::builder(name, data_type).build()
    }

    /// Create a field with a default value.
    pub fn with_default(
        name: impl Into<String>,
        data_type: DataType,
        default_value: Value,
    ) -> SchemaResult<Self> {
        Self::builder(name, data_type)
            .default_value(default_value)
            .build()
    }

    /// Create a field with an optional default value and a set of aliases.
    pub fn with_aliases<I, S>(
        name: impl Into<String>,
        data_type: DataType,
        default_value: Option<Value>,
        aliases: I,
    ) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = Self::builder(name, data_type).aliases(aliases);
        builder.default_value = default_value;
        builder.build()
    }

    /// Start building a field.
    pub fn builder(name: impl Into<String>, data_type: DataType) -> RecordFieldBuilder {
        RecordFieldBuilder {
            name: name.into(),
            data_type,
            default_value: None,
            aliases: BTreeSet::new(),
            nullable: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn aliases(&self) -> &BTreeSet<String> {
        &self.aliases
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Copy of this field under a new name.
    ///
    /// Type, default value, aliases and nullability carry over. Only the
    /// new name is checked; the default was accepted when this field was
    /// built, and re-checking it would read nested schemas.
    pub fn renamed(&self, name: impl Into<String>) -> SchemaResult<Self> {
        let name = name.into();
        check_name(&name)?;
        Ok(Self {
            name,
            ..self.clone()
        })
    }
}

impl PartialEq for RecordField {
    fn eq(&self, other: &Self) -> bool {
        EqualityContext::new().fields_equal(self, other)
    }
}

impl Eq for RecordField {}

impl Hash for RecordField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(HashContext::new().field_hash(self));
    }
}

/// Builder for [`RecordField`]
#[derive(Debug, Clone)]
pub struct RecordFieldBuilder {
    name: String,
    data_type: DataType,
    default_value: Option<Value>,
    aliases: BTreeSet<String>,
    nullable: bool,
}

impl RecordFieldBuilder {
    /// Builder: set the default value.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Builder: add one alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.insert(alias.into());
        self
    }

    /// Builder: add several aliases.
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Builder: set nullability.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Validate and build the field.
    pub fn build(self) -> SchemaResult<RecordField> {
        check_name(&self.name)?;

        if let Some(value) = &self.default_value {
            if !self.data_type.accepts(value) {
                return Err(SchemaError::InvalidField(format!(
                    "cannot set the default value for field '{}' to {} because that is not a valid value for data type {}",
                    self.name, value, self.data_type
                )));
            }
        }

        Ok(RecordField {
            name: self.name,
            data_type: self.data_type,
            default_value: self.default_value,
            aliases: self.aliases,
            nullable: self.nullable,
        })
    }
}

fn check_name(name: &str) -> SchemaResult<()> {
    if name.is_empty() {
        return Err(SchemaError::InvalidField(
            "field name cannot be empty".to_string(),
        ));
    }
    Ok(())
}
