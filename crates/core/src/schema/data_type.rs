//! Field type descriptors
//!
//! [`DataType::Record`] wraps a shared [`RecordSchema`] handle. This is the one
//! variant that lets schemas nest, and the one that lets them form cycles.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::compare::{EqualityContext, HashContext};
use super::record::RecordSchema;
use super::value::Value;

/// The type of a record field
#[derive(Debug, Clone)]
pub enum DataType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    BigInt,
    Float,
    Double,
    Decimal { precision: u32, scale: u32 },
    Char,
    String,
    Date { format: Option<String> },
    Time { format: Option<String> },
    Timestamp { format: Option<String> },
    Uuid,
    Enum { symbols: Vec<String> },

    /// Variable-length list of elements of the same type
    Array(Box<DataType>),

    /// String-keyed map with values of one type
    Map(Box<DataType>),

    /// Value may be any one of the listed types
    Choice(Vec<DataType>),

    /// Nested record described by a schema (possibly an ancestor)
    Record(RecordSchema),
}

impl DataType {
    /// Record type wrapping a shared handle to `schema`.
    pub fn record(schema: &RecordSchema) -> Self {
        DataType::Record(schema.clone())
    }

    pub fn array(element: DataType) -> Self {
        DataType::Array(Box::new(element))
    }

    pub fn map(value: DataType) -> Self {
        DataType::Map(Box::new(value))
    }

    pub fn choice(options: Vec<DataType>) -> Self {
        DataType::Choice(options)
    }

    pub fn enumeration<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DataType::Enum {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Upper-case type name without parameters.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::Boolean => "BOOLEAN",
            DataType::Byte => "BYTE",
            DataType::Short => "SHORT",
            DataType::Int => "INT",
            DataType::Long => "LONG",
            DataType::BigInt => "BIGINT",
            DataType::Float => "FLOAT",
            DataType::Double => "DOUBLE",
            DataType::Decimal { .. } => "DECIMAL",
            DataType::Char => "CHAR",
            DataType::String => "STRING",
            DataType::Date { .. } => "DATE",
            DataType::Time { .. } => "TIME",
            DataType::Timestamp { .. } => "TIMESTAMP",
            DataType::Uuid => "UUID",
            DataType::Enum { .. } => "ENUM",
            DataType::Array(_) => "ARRAY",
            DataType::Map(_) => "MAP",
            DataType::Choice(_) => "CHOICE",
            DataType::Record(_) => "RECORD",
        }
    }

    /// Get the nested schema for a record type, or None.
    pub fn record_schema(&self) -> Option<&RecordSchema> {
        match self {
            DataType::Record(schema) => Some(schema),
            _ => None,
        }
    }

    /// Check if `value` is a valid value of this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (DataType::Boolean, Value::Boolean(_)) => true,
            (DataType::Byte, Value::Int(i)) => i8::try_from(*i).is_ok(),
            (DataType::Short, Value::Int(i)) => i16::try_from(*i).is_ok(),
            (DataType::Int, Value::Int(i)) => i32::try_from(*i).is_ok(),
            (DataType::Long | DataType::BigInt, Value::Int(_)) => true,
            (DataType::BigInt, Value::String(s)) => is_integer_literal(s),
            (
                DataType::Float | DataType::Double | DataType::Decimal { .. },
                Value::Int(_) | Value::Float(_),
            ) => true,
            (DataType::Char, Value::String(s)) => s.chars().count() == 1,
            (DataType::String, v) => v.is_scalar(),
            (
                DataType::Date { .. } | DataType::Time { .. } | DataType::Timestamp { .. },
                Value::Int(_) | Value::String(_),
            ) => true,
            (DataType::Uuid, Value::String(s)) => is_uuid_literal(s),
            (DataType::Uuid, Value::Bytes(b)) => b.len() == 16,
            (DataType::Enum { symbols }, Value::String(s)) => symbols.contains(s),
            (DataType::Array(element), Value::Array(items)) => {
                items.iter().all(|item| element.accepts(item))
            }
            (DataType::Array(element), Value::Bytes(_)) => matches!(**element, DataType::Byte),
            (DataType::Map(value_type), Value::Map(entries)) => {
                entries.values().all(|v| value_type.accepts(v))
            }
            (DataType::Choice(options), v) => options.iter().any(|option| option.accepts(v)),
            // Recursion follows the value, which is finite, so cyclic schemas terminate
            (DataType::Record(schema), Value::Map(entries)) => {
                let fields = schema.fields();
                entries.iter().all(|(key, v)| {
                    fields
                        .by_name(key)
                        .map(|field| field.data_type().accepts(v))
                        .unwrap_or(false)
                })
            }
            _ => false,
        }
    }
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_uuid_literal(s: &str) -> bool {
    const HYPHENS: [usize; 4] = [8, 13, 18, 23];
    s.len() == 36
        && s.bytes().enumerate().all(|(i, b)| {
            if HYPHENS.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_hexdigit()
            }
        })
}

impl PartialEq for DataType {
    fn eq(&self, other: &Self) -> bool {
        EqualityContext::new().data_types_equal(self, other)
    }
}

impl Eq for DataType {}

impl Hash for DataType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(HashContext::new().data_type_hash(self));
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Decimal { precision, scale } => {
                write!(f, "DECIMAL({},{})", precision, scale)
            }
            DataType::Date { format: Some(format) }
            | DataType::Time { format: Some(format) }
            | DataType::Timestamp { format: Some(format) } => {
                write!(f, "{}:{}", self.type_name(), format)
            }
            DataType::Enum { symbols } => write!(f, "ENUM[{}]", symbols.join(", ")),
            DataType::Array(element) => write!(f, "ARRAY[{}]", element),
            DataType::Map(value) => write!(f, "MAP[{}]", value),
            DataType::Choice(options) => {
                f.write_str("CHOICE[")?;
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", option)?;
                }
                f.write_str("]")
            }
            // Never descend into the nested schema; it may lead back here
            _ => f.write_str(self.type_name()),
        }
    }
}
