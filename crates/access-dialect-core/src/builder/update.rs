//! UPDATE statement builder using the typestate pattern.

use std::marker::PhantomData;

use super::expr::ExprBuilder;
use super::value::{SqlValue, ToSqlValue};

// Typestate markers

/// Marker: No table specified yet.
pub struct NoTable;
/// Marker: Table has been specified.
pub struct HasTable;
/// Marker: No SET clause specified yet.
pub struct NoSet;
/// Marker: SET clause has been specified.
pub struct HasSet;

struct Assignment {
    column: String,
    value: ExprBuilder,
}

/// An UPDATE statement builder.
pub struct Update<Table, Set> {
    table: Option<String>,
    assignments: Vec<Assignment>,
    where_clause: Option<ExprBuilder>,
    _state: PhantomData<(Table, Set)>,
}

impl Update<NoTable, NoSet> {
    /// Creates a new UPDATE builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: None,
            assignments: vec![],
            where_clause: None,
            _state: PhantomData,
        }
    }
}

impl Default for Update<NoTable, NoSet> {
    fn default() -> Self {
        Self::new()
    }
}

// Transition: NoTable -> HasTable
impl<Set> Update<NoTable, Set> {
    /// Specifies the table to update.
    #[must_use]
    pub fn table(self, table: &str) -> Update<HasTable, Set> {
        Update {
            table: Some(String::from(table)),
            assignments: self.assignments,
            where_clause: self.where_clause,
            _state: PhantomData,
        }
    }
}

impl<Set> Update<HasTable, Set> {
    /// Adds a SET assignment of a bound value.
    #[must_use]
    pub fn set<T: ToSqlValue>(self, column: &str, value: T) -> Update<HasTable, HasSet> {
        self.set_expr(column, ExprBuilder::value(value))
    }

    /// Adds a SET assignment of an expression, such as a function call.
    #[must_use]
    pub fn set_expr(self, column: &str, value: ExprBuilder) -> Update<HasTable, HasSet> {
        let mut assignments = self.assignments;
        assignments.push(Assignment {
            column: String::from(column),
            value,
        });
        Update {
            table: self.table,
            assignments,
            where_clause: self.where_clause,
            _state: PhantomData,
        }
    }
}

impl Update<HasTable, HasSet> {
    /// Adds a WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, expr: ExprBuilder) -> Self {
        self.where_clause = Some(expr);
        self
    }

    /// Builds the UPDATE statement and returns SQL with parameters.
    #[must_use]
    pub fn build(self) -> (String, Vec<SqlValue>) {
        let mut sql = String::from("UPDATE ");
        let mut params = vec![];

        if let Some(ref table) = self.table {
            sql.push_str(table);
        }

        sql.push_str(" SET ");

        let mut set_parts = Vec::with_capacity(self.assignments.len());
        for assignment in self.assignments {
            let (value_sql, value_params) = assignment.value.build();
            set_parts.push(format!("{} = {value_sql}", assignment.column));
            params.extend(value_params);
        }
        sql.push_str(&set_parts.join(", "));

        if let Some(where_expr) = self.where_clause {
            sql.push_str(" WHERE ");
            let (where_sql, where_params) = where_expr.build();
            sql.push_str(&where_sql);
            params.extend(where_params);
        }

        (sql, params)
    }
}
