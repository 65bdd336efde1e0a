//! Schema identity tokens
//!
//! A [`SchemaIdentifier`] names a schema in whatever registry produced it. It
//! carries no structural information and never takes part in schema
//! equality or hashing.

use std::fmt;

/// Opaque identity/version token for a schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SchemaIdentifier {
    name: Option<String>,
    identifier: Option<i64>,
    version: Option<i32>,
    branch: Option<String>,
}

impl SchemaIdentifier {
    /// Identifier with every part absent
    pub const EMPTY: SchemaIdentifier = SchemaIdentifier {
        name: None,
        identifier: None,
        version: None,
        branch: None,
    };

    /// Builder: set the schema name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set the numeric identifier.
    pub fn with_identifier(mut self, identifier: i64) -> Self {
        self.identifier = Some(identifier);
        self
    }

    /// Builder: set the version.
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }

    /// Builder: set the branch.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn identifier(&self) -> Option<i64> {
        self.identifier
    }

    pub fn version(&self) -> Option<i32> {
        self.version
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// Check if every part is absent
    pub fn is_empty(&self) -> bool {
        self == &Self::EMPTY
    }
}

impl fmt::Display for SchemaIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("<empty>");
        }
        if let Some(name) = &self.name {
            f.write_str(name)?;
        }
        if let Some(id) = self.identifier {
            write!(f, "@{}", id)?;
        }
        if let Some(version) = self.version {
            write!(f, ":{}", version)?;
        }
        if let Some(branch) = &self.branch {
            write!(f, "/{}", branch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_constant() {
        assert!(SchemaIdentifier::EMPTY.is_empty());
        assert_eq!(SchemaIdentifier::default(), SchemaIdentifier::EMPTY);
        assert_eq!(SchemaIdentifier::EMPTY.to_string(), "<empty>");
    }

    #[test]
    fn test_builder_and_display() {
        let id = SchemaIdentifier::default()
            .with_name("person")
            .with_identifier(42)
            .with_version(3)
            .with_branch("main");

        assert_eq!(id.name(), Some("person"));
        assert_eq!(id.identifier(), Some(42));
        assert_eq!(id.version(), Some(3));
        assert_eq!(id.branch(), Some("main"));
        assert_eq!(id.to_string(), "person@42:3/main");
        assert!(!id.is_empty());
    }

    #[test]
    fn test_partial_display() {
        let id = SchemaIdentifier::default().with_name("address").with_version(1);
        assert_eq!(id.to_string(), "address:1");
    }
}
