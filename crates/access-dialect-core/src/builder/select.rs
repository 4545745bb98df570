//! SELECT statement builder using the typestate pattern.
//!
//! Pagination is not written into the statement directly: a
//! [`RowSelection`] is applied by [`Select::build_for`] through the
//! dialect's [`LimitHandler`](crate::limit::LimitHandler).

use std::marker::PhantomData;

use tracing::debug;

use super::expr::ExprBuilder;
use super::value::SqlValue;
use crate::dialect::Dialect;
use crate::limit::{use_limit, RowSelection};

// Typestate markers (zero-sized types)

/// Marker: No columns specified yet.
pub struct NoColumns;
/// Marker: Columns have been specified.
pub struct HasColumns;
/// Marker: No FROM clause specified yet.
pub struct NoFrom;
/// Marker: FROM clause has been specified.
pub struct HasFrom;

/// A SELECT statement builder.
///
/// Uses the typestate pattern to ensure that:
/// - `build()` is only available when both columns and FROM are specified
/// - `where_clause()` is only available after FROM is specified
pub struct Select<Cols, From> {
    distinct: bool,
    columns: Vec<String>,
    from: Option<String>,
    joins: Vec<String>,
    where_clause: Option<ExprBuilder>,
    group_by: Vec<String>,
    having: Option<ExprBuilder>,
    order_by: Vec<String>,
    _state: PhantomData<(Cols, From)>,
}

/// A SELECT statement with pagination applied for one dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedQuery {
    /// The statement text.
    pub sql: String,
    /// Parameters in binding order, limit parameters included.
    pub params: Vec<SqlValue>,
    /// Row cap for the driver to enforce, when the SQL does not.
    pub max_rows: Option<u64>,
    /// Leading rows the caller must skip, when the SQL cannot.
    pub skip_rows: u64,
}

impl Select<NoColumns, NoFrom> {
    /// Creates a new SELECT builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            distinct: false,
            columns: vec![],
            from: None,
            joins: vec![],
            where_clause: None,
            group_by: vec![],
            having: None,
            order_by: vec![],
            _state: PhantomData,
        }
    }
}

impl Default for Select<NoColumns, NoFrom> {
    fn default() -> Self {
        Self::new()
    }
}

// Transition: NoColumns -> HasColumns
impl<From> Select<NoColumns, From> {
    /// Specifies the columns to select.
    #[must_use]
    pub fn columns(self, cols: &[&str]) -> Select<HasColumns, From> {
        Select {
            distinct: self.distinct,
            columns: cols.iter().map(|s| String::from(*s)).collect(),
            from: self.from,
            joins: self.joins,
            where_clause: self.where_clause,
            group_by: self.group_by,
            having: self.having,
            order_by: self.order_by,
            _state: PhantomData,
        }
    }

    /// Selects all columns (*).
    #[must_use]
    pub fn all(self) -> Select<HasColumns, From> {
        self.columns(&["*"])
    }
}

// Transition: NoFrom -> HasFrom
impl<Cols> Select<Cols, NoFrom> {
    /// Specifies the table to select from.
    #[must_use]
    pub fn from(self, table: &str) -> Select<Cols, HasFrom> {
        Select {
            distinct: self.distinct,
            columns: self.columns,
            from: Some(String::from(table)),
            joins: self.joins,
            where_clause: self.where_clause,
            group_by: self.group_by,
            having: self.having,
            order_by: self.order_by,
            _state: PhantomData,
        }
    }
}

// Methods available after FROM
impl<Cols> Select<Cols, HasFrom> {
    /// Adds a WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, expr: ExprBuilder) -> Self {
        self.where_clause = Some(expr);
        self
    }

    /// Adds an INNER JOIN.
    #[must_use]
    pub fn join(mut self, table: &str, on: &str) -> Self {
        self.joins.push(format!("INNER JOIN {table} ON {on}"));
        self
    }

    /// Adds a LEFT JOIN.
    #[must_use]
    pub fn left_join(mut self, table: &str, on: &str) -> Self {
        self.joins.push(format!("LEFT JOIN {table} ON {on}"));
        self
    }
}

impl<From> Select<HasColumns, From> {
    /// Sets DISTINCT.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}

impl Select<HasColumns, HasFrom> {
    /// Adds a GROUP BY clause.
    #[must_use]
    pub fn group_by(mut self, cols: &[&str]) -> Self {
        self.group_by = cols.iter().map(|s| String::from(*s)).collect();
        self
    }

    /// Adds a HAVING clause.
    #[must_use]
    pub fn having(mut self, expr: ExprBuilder) -> Self {
        self.having = Some(expr);
        self
    }

    /// Adds an ORDER BY clause.
    #[must_use]
    pub fn order_by(mut self, cols: &[&str]) -> Self {
        self.order_by = cols.iter().map(|s| String::from(*s)).collect();
        self
    }

    /// Adds an ORDER BY DESC clause.
    #[must_use]
    pub fn order_by_desc(mut self, cols: &[&str]) -> Self {
        self.order_by = cols.iter().map(|s| format!("{s} DESC")).collect();
        self
    }

    /// Builds the SELECT statement and returns SQL with parameters.
    #[must_use]
    pub fn build(self) -> (String, Vec<SqlValue>) {
        let mut sql = String::from("SELECT ");
        let mut params = vec![];

        if self.distinct {
            sql.push_str("DISTINCT ");
        }

        sql.push_str(&self.columns.join(", "));

        if let Some(ref table) = self.from {
            sql.push_str(" FROM ");
            sql.push_str(table);
        }

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        if let Some(where_expr) = self.where_clause {
            sql.push_str(" WHERE ");
            let (where_sql, where_params) = where_expr.build();
            sql.push_str(&where_sql);
            params.extend(where_params);
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }

        if let Some(having_expr) = self.having {
            sql.push_str(" HAVING ");
            let (having_sql, having_params) = having_expr.build();
            sql.push_str(&having_sql);
            params.extend(having_params);
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }

        (sql, params)
    }

    /// Builds the statement restricted to `selection` for `dialect`.
    ///
    /// When the dialect's limit handler applies, the SQL is rewritten and
    /// its limit parameters are bound around the query's own. Otherwise the
    /// SQL is left alone and the row window is reported through
    /// [`PagedQuery::max_rows`] and [`PagedQuery::skip_rows`].
    #[must_use]
    pub fn build_for(self, dialect: &dyn Dialect, selection: &RowSelection) -> PagedQuery {
        let (sql, query_params) = self.build();
        let handler = dialect.limit_handler();

        if !use_limit(handler, selection) {
            return PagedQuery {
                sql,
                params: query_params,
                max_rows: selection.last(),
                skip_rows: selection.first(),
            };
        }

        let mut params = Vec::with_capacity(query_params.len());
        let at_start = handler.bind_limit_parameters_at_start(selection, &mut params);
        params.extend(query_params);
        let at_end = handler.bind_limit_parameters_at_end(selection, &mut params);
        let sql = handler.process_sql(&sql, selection);
        debug!(
            dialect = dialect.name(),
            sql = %sql,
            limit_params = at_start + at_end,
            "Applied limit clause"
        );

        PagedQuery {
            sql,
            params,
            max_rows: handler.statement_max_rows(selection),
            skip_rows: if handler.supports_limit_offset() {
                0
            } else {
                selection.first()
            },
        }
    }
}
