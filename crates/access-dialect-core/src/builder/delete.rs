//! DELETE statement builder using the typestate pattern.

use std::marker::PhantomData;

use super::expr::ExprBuilder;
use super::value::SqlValue;

// Typestate markers

/// Marker: No table specified yet.
pub struct NoTable;
/// Marker: Table has been specified.
pub struct HasTable;

/// A DELETE statement builder.
///
/// `build()` is only available once the table is specified. Without a
/// WHERE clause every row is deleted; use [`SafeDelete`] to require one.
pub struct Delete<Table> {
    table: Option<String>,
    where_clause: Option<ExprBuilder>,
    _state: PhantomData<Table>,
}

impl Delete<NoTable> {
    /// Creates a new DELETE builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: None,
            where_clause: None,
            _state: PhantomData,
        }
    }

    /// Specifies the table to delete from.
    #[must_use]
    pub fn from(self, table: &str) -> Delete<HasTable> {
        Delete {
            table: Some(String::from(table)),
            where_clause: self.where_clause,
            _state: PhantomData,
        }
    }
}

impl Default for Delete<NoTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl Delete<HasTable> {
    /// Adds a WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, expr: ExprBuilder) -> Self {
        self.where_clause = Some(expr);
        self
    }

    /// Returns true if a WHERE clause is specified.
    #[must_use]
    pub const fn has_where_clause(&self) -> bool {
        self.where_clause.is_some()
    }

    /// Builds the DELETE statement and returns SQL with parameters.
    #[must_use]
    pub fn build(self) -> (String, Vec<SqlValue>) {
        let mut sql = String::from("DELETE FROM ");
        let mut params = vec![];

        if let Some(ref table) = self.table {
            sql.push_str(table);
        }

        if let Some(where_expr) = self.where_clause {
            sql.push_str(" WHERE ");
            let (where_sql, where_params) = where_expr.build();
            sql.push_str(&where_sql);
            params.extend(where_params);
        }

        (sql, params)
    }
}

/// A DELETE builder that requires a WHERE clause before `build()`.
pub struct SafeDelete<Table> {
    inner: Delete<Table>,
}

impl SafeDelete<NoTable> {
    /// Creates a new safe DELETE builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Delete::new(),
        }
    }

    /// Specifies the table to delete from.
    #[must_use]
    pub fn from(self, table: &str) -> SafeDelete<HasTable> {
        SafeDelete {
            inner: self.inner.from(table),
        }
    }
}

impl Default for SafeDelete<NoTable> {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`SafeDelete`] with its WHERE clause set.
pub struct SafeDeleteWithWhere {
    inner: Delete<HasTable>,
}

impl SafeDelete<HasTable> {
    /// Adds the WHERE clause.
    #[must_use]
    pub fn where_clause(self, expr: ExprBuilder) -> SafeDeleteWithWhere {
        SafeDeleteWithWhere {
            inner: self.inner.where_clause(expr),
        }
    }
}

impl SafeDeleteWithWhere {
    /// Builds the DELETE statement.
    #[must_use]
    pub fn build(self) -> (String, Vec<SqlValue>) {
        self.inner.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::col;

    #[test]
    fn test_delete_all() {
        let delete = Delete::new().from("EVENTS");
        assert!(!delete.has_where_clause());
        let (sql, params) = delete.build();

        assert_eq!(sql, "DELETE FROM EVENTS");
        assert!(params.is_empty());
    }

    #[test]
    fn test_delete_with_where() {
        let (sql, params) = Delete::new()
            .from("Guest")
            .where_clause(col("email").in_list(vec!["a@x.org", "b@x.org"]))
            .build();

        assert_eq!(sql, "DELETE FROM Guest WHERE email IN (?, ?)");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_safe_delete() {
        let (sql, params) = SafeDelete::new()
            .from("EVENTS")
            .where_clause(col("EVENT_ID").eq(1_i32))
            .build();

        assert_eq!(sql, "DELETE FROM EVENTS WHERE EVENT_ID = ?");
        assert_eq!(params.len(), 1);
    }
}
