//! Cycle-safe structural equality and hashing
//!
//! Schemas form arbitrary graphs through [`DataType::Record`], so neither
//! comparison nor hashing can simply recurse field by field.
//!
//! # Equality
//!
//! Equality is bisimulation. An [`EqualityContext`] lives for one top-level
//! comparison and records every `(left, right)` pair of schema identities it
//! has started comparing. Meeting a recorded pair again means the traversal
//! has looped back onto a comparison already in progress (or already
//! finished); it yields no new evidence of a difference, so the pair counts
//! as equal and the recursion stops. Any difference short-circuits to `false`
//! all the way up, so a recorded pair is never relied on after it failed.
//!
//! # Hashing
//!
//! A [`HashContext`] carries a budget of nested schema levels for the current
//! call stack. Once the budget is spent, a nested record contributes
//! [`NESTED_RECORD_HASH`] instead of being descended into. Bisimilar schemas
//! have identical unfoldings to every depth, so cutting off at a fixed depth
//! keeps hashing consistent with equality even when two equal schemas close
//! their cycles at different points (a self-loop versus a two-schema loop).

use std::collections::HashSet;

use tracing::trace;

use super::data_type::DataType;
use super::field::RecordField;
use super::hash::{fnv1a_64, hash_str, mix};
use super::record::RecordSchema;

/// Number of nested record levels a structural hash descends into
pub const NESTED_HASH_DEPTH: usize = 2;

/// Contribution of a nested record beyond [`NESTED_HASH_DEPTH`]
pub const NESTED_RECORD_HASH: u64 = fnv1a_64(b"recschema.record.nested");

const FIELD_LIST_SEED: u64 = fnv1a_64(b"recschema.fields");

/// In-progress state for one top-level equality check
#[derive(Debug, Default)]
pub(crate) struct EqualityContext {
    in_progress: HashSet<(usize, usize)>,
}

impl EqualityContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn schemas_equal(&mut self, left: &RecordSchema, right: &RecordSchema) -> bool {
        if RecordSchema::ptr_eq(left, right) {
            return true;
        }

        let pair = (left.identity(), right.identity());
        if !self.in_progress.insert(pair) {
            trace!("Schema pair {:#x}/{:#x} already under comparison", pair.0, pair.1);
            return true;
        }

        let left_fields = left.fields();
        let right_fields = right.fields();
        left_fields.len() == right_fields.len()
            && left_fields
                .iter()
                .zip(right_fields.iter())
                .all(|(l, r)| self.fields_equal(l, r))
    }

    pub(crate) fn fields_equal(&mut self, left: &RecordField, right: &RecordField) -> bool {
        left.name() == right.name()
            && left.is_nullable() == right.is_nullable()
            && left.aliases() == right.aliases()
            && left.default_value() == right.default_value()
            && self.data_types_equal(left.data_type(), right.data_type())
    }

    pub(crate) fn data_types_equal(&mut self, left: &DataType, right: &DataType) -> bool {
        match (left, right) {
            (DataType::Record(l), DataType::Record(r)) => self.schemas_equal(l, r),
            (DataType::Array(l), DataType::Array(r)) | (DataType::Map(l), DataType::Map(r)) => {
                self.data_types_equal(l, r)
            }
            (DataType::Choice(l), DataType::Choice(r)) => {
                l.len() == r.len()
                    && l.iter()
                        .zip(r.iter())
                        .all(|(lo, ro)| self.data_types_equal(lo, ro))
            }
            (
                DataType::Decimal {
                    precision: lp,
                    scale: ls,
                },
                DataType::Decimal {
                    precision: rp,
                    scale: rs,
                },
            ) => lp == rp && ls == rs,
            (DataType::Date { format: l }, DataType::Date { format: r })
            | (DataType::Time { format: l }, DataType::Time { format: r })
            | (DataType::Timestamp { format: l }, DataType::Timestamp { format: r }) => l == r,
            (DataType::Enum { symbols: l }, DataType::Enum { symbols: r }) => l == r,
            // Every parameterized variant is matched above; the rest are unit variants
            _ => std::mem::discriminant(left) == std::mem::discriminant(right),
        }
    }
}

/// Recursion budget for one structural hash computation
#[derive(Debug)]
pub(crate) struct HashContext {
    remaining_depth: usize,
}

impl HashContext {
    pub(crate) fn new() -> Self {
        Self {
            remaining_depth: NESTED_HASH_DEPTH,
        }
    }

    pub(crate) fn schema_hash(&mut self, schema: &RecordSchema) -> u64 {
        schema.fields().iter().fold(FIELD_LIST_SEED, |acc, field| {
            let acc = mix(acc, hash_str(field.name()));
            mix(acc, self.data_type_hash(field.data_type()))
        })
    }

    pub(crate) fn field_hash(&mut self, field: &RecordField) -> u64 {
        mix(hash_str(field.name()), self.data_type_hash(field.data_type()))
    }

    pub(crate) fn data_type_hash(&mut self, data_type: &DataType) -> u64 {
        let tag = hash_str(data_type.type_name());
        match data_type {
            DataType::Record(schema) => {
                if self.remaining_depth == 0 {
                    return NESTED_RECORD_HASH;
                }
                self.remaining_depth -= 1;
                let nested = self.schema_hash(schema);
                self.remaining_depth += 1;
                mix(tag, nested)
            }
            DataType::Array(inner) | DataType::Map(inner) => mix(tag, self.data_type_hash(inner)),
            DataType::Choice(options) => options
                .iter()
                .fold(tag, |acc, option| mix(acc, self.data_type_hash(option))),
            DataType::Decimal { precision, scale } => {
                mix(mix(tag, *precision as u64), *scale as u64)
            }
            DataType::Date { format } | DataType::Time { format } | DataType::Timestamp { format } => {
                mix(tag, format.as_deref().map(hash_str).unwrap_or(0))
            }
            DataType::Enum { symbols } => symbols
                .iter()
                .fold(tag, |acc, symbol| mix(acc, hash_str(symbol))),
            _ => tag,
        }
    }
}
