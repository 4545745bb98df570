//! Identity (auto-increment / autonumber) column support.

use crate::error::{DialectError, Result};
use crate::types::SqlType;

/// Describes how a dialect declares and reads back identity columns.
pub trait IdentityColumnSupport: Send + Sync {
    /// Whether identity columns can be declared at all.
    fn supports_identity_columns(&self) -> bool;

    /// Whether the generated key can be selected in the same statement as the insert.
    fn supports_insert_select_identity(&self) -> bool {
        false
    }

    /// Whether the column's data type is written before the identity keyword.
    fn has_data_type_in_identity_column(&self) -> bool {
        true
    }

    /// The identity keyword used in a column definition.
    fn identity_column_string(&self, code: SqlType) -> Result<String>;

    /// The statement that reads back the last generated key.
    fn identity_select_string(&self, table: &str, column: &str, code: SqlType) -> Result<String>;

    /// The value to insert into an identity column, if one must be written.
    fn identity_insert_string(&self) -> Option<&str> {
        None
    }

    /// Appends the identity select to an insert statement.
    fn append_identity_select_to_insert(&self, insert: &str) -> String {
        insert.to_string()
    }
}

/// Identity support for dialects without identity columns.
#[derive(Debug, Clone)]
pub struct NoIdentityColumnSupport {
    dialect: &'static str,
}

impl NoIdentityColumnSupport {
    /// Creates the support object for the named dialect.
    #[must_use]
    pub const fn new(dialect: &'static str) -> Self {
        Self { dialect }
    }
}

impl IdentityColumnSupport for NoIdentityColumnSupport {
    fn supports_identity_columns(&self) -> bool {
        false
    }

    fn identity_column_string(&self, _code: SqlType) -> Result<String> {
        Err(DialectError::IdentityNotSupported(self.dialect.to_string()))
    }

    fn identity_select_string(
        &self,
        _table: &str,
        _column: &str,
        _code: SqlType,
    ) -> Result<String> {
        Err(DialectError::IdentityNotSupported(self.dialect.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_identity_support() {
        let support = NoIdentityColumnSupport::new("generic");
        assert!(!support.supports_identity_columns());
        assert!(!support.supports_insert_select_identity());
        assert!(support.identity_insert_string().is_none());
        assert!(matches!(
            support.identity_column_string(SqlType::Integer),
            Err(DialectError::IdentityNotSupported(ref d)) if d == "generic"
        ));
        assert!(support
            .identity_select_string("t", "id", SqlType::Integer)
            .is_err());
        assert_eq!(
            support.append_identity_select_to_insert("insert into t values (1)"),
            "insert into t values (1)"
        );
    }
}
