//! INSERT statement builder using the typestate pattern.

use std::marker::PhantomData;

use super::value::{SqlValue, ToSqlValue};
use crate::dialect::Dialect;
use crate::error::{DialectError, Result};
use crate::types::SqlType;

// Typestate markers

/// Marker: No table specified yet.
pub struct NoTable;
/// Marker: Table has been specified.
pub struct HasTable;
/// Marker: No values specified yet.
pub struct NoValues;
/// Marker: Values have been specified.
pub struct HasValues;

/// An INSERT statement builder.
pub struct Insert<Table, Values> {
    table: Option<String>,
    columns: Vec<String>,
    values: Vec<Vec<SqlValue>>,
    _state: PhantomData<(Table, Values)>,
}

/// An insert together with the way its generated key is read back.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityInsert {
    /// The insert, with the identity select appended when the dialect
    /// allows both in one statement.
    pub sql: String,
    /// Parameters of the insert.
    pub params: Vec<SqlValue>,
    /// The statement to run after the insert, when the key must be read
    /// back separately.
    pub identity_select: Option<String>,
}

impl Insert<NoTable, NoValues> {
    /// Creates a new INSERT builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: None,
            columns: vec![],
            values: vec![],
            _state: PhantomData,
        }
    }
}

impl Default for Insert<NoTable, NoValues> {
    fn default() -> Self {
        Self::new()
    }
}

// Transition: NoTable -> HasTable
impl<Values> Insert<NoTable, Values> {
    /// Specifies the table to insert into.
    #[must_use]
    pub fn into_table(self, table: &str) -> Insert<HasTable, Values> {
        Insert {
            table: Some(String::from(table)),
            columns: self.columns,
            values: self.values,
            _state: PhantomData,
        }
    }
}

impl<Values> Insert<HasTable, Values> {
    /// Specifies the columns to insert into.
    #[must_use]
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| String::from(*s)).collect();
        self
    }
}

// Transition: NoValues -> HasValues
impl Insert<HasTable, NoValues> {
    /// Adds a row of values to insert.
    #[must_use]
    pub fn values<T: ToSqlValue>(self, vals: Vec<T>) -> Insert<HasTable, HasValues> {
        let sql_values: Vec<SqlValue> = vals.into_iter().map(ToSqlValue::to_sql_value).collect();
        Insert {
            table: self.table,
            columns: self.columns,
            values: vec![sql_values],
            _state: PhantomData,
        }
    }
}

impl Insert<HasTable, HasValues> {
    /// Adds another row of values.
    #[must_use]
    pub fn and_values<T: ToSqlValue>(mut self, vals: Vec<T>) -> Self {
        let sql_values: Vec<SqlValue> = vals.into_iter().map(ToSqlValue::to_sql_value).collect();
        self.values.push(sql_values);
        self
    }

    /// Builds the INSERT statement and returns SQL with parameters.
    #[must_use]
    pub fn build(self) -> (String, Vec<SqlValue>) {
        let mut sql = String::from("INSERT INTO ");
        let mut params = vec![];

        if let Some(ref table) = self.table {
            sql.push_str(table);
        }

        if !self.columns.is_empty() {
            sql.push_str(" (");
            sql.push_str(&self.columns.join(", "));
            sql.push(')');
        }

        sql.push_str(" VALUES ");

        let row_strs: Vec<String> = self
            .values
            .iter()
            .map(|row| {
                let placeholders: Vec<&str> = row.iter().map(|_| "?").collect();
                format!("({})", placeholders.join(", "))
            })
            .collect();

        sql.push_str(&row_strs.join(", "));

        for row in self.values {
            params.extend(row);
        }

        (sql, params)
    }

    /// Builds an insert into a table whose key `column` the database
    /// generates, and says how to read the key back.
    ///
    /// Dialects that can select the key in the insert statement get it
    /// appended; the others get a separate identity select.
    pub fn build_returning_identity(
        self,
        dialect: &dyn Dialect,
        column: &str,
        code: SqlType,
    ) -> Result<IdentityInsert> {
        let identity = dialect.identity_column_support();
        if !identity.supports_identity_columns() {
            return Err(DialectError::IdentityNotSupported(
                dialect.name().to_string(),
            ));
        }
        let table = self.table.clone().unwrap_or_default();
        let (sql, params) = self.build();
        if identity.supports_insert_select_identity() {
            return Ok(IdentityInsert {
                sql: identity.append_identity_select_to_insert(&sql),
                params,
                identity_select: None,
            });
        }
        Ok(IdentityInsert {
            sql,
            params,
            identity_select: Some(identity.identity_select_string(&table, column, code)?),
        })
    }
}
