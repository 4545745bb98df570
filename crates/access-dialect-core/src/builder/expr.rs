//! Expression builder.
//!
//! Expressions carry their SQL text and the values bound to its `?`
//! placeholders. Function calls go through the dialect's registry, so the
//! same expression renders as `datepart(hour, ...)` on SQL Server and
//! `Hour(...)` on Access.

use super::value::{SqlValue, ToSqlValue};
use crate::dialect::{Dialect, Quoter};
use crate::error::Result;

/// Creates a column reference from an already-quoted name.
#[must_use]
pub fn col(name: &str) -> Column {
    Column {
        name: String::from(name),
    }
}

/// Renders a registered function through the dialect.
///
/// Argument parameters are kept in order.
///
/// ```rust
/// use access_dialect_core::builder::{col, func};
/// use access_dialect_core::dialect::SqlServerDialect;
///
/// let dialect = SqlServerDialect::new();
/// let expr = func(&dialect, "hour", vec![col("[EVENT DATE]").into()]).unwrap();
/// assert_eq!(expr.sql(), "datepart(hour, [EVENT DATE])");
/// ```
pub fn func(dialect: &dyn Dialect, name: &str, args: Vec<ExprBuilder>) -> Result<ExprBuilder> {
    let mut params = Vec::new();
    let mut rendered = Vec::with_capacity(args.len());
    for arg in args {
        rendered.push(arg.sql);
        params.extend(arg.params);
    }
    Ok(ExprBuilder {
        sql: dialect.render_function(name, &rendered)?,
        params,
    })
}

/// Comparison operators against a bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Eq,
    NotEq,
    Gt,
    Like,
}

impl Comparison {
    const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Like => "LIKE",
        }
    }
}

/// A column reference.
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name as it appears in SQL.
    pub name: String,
}

impl Column {
    /// Creates a column reference quoted the way the dialect needs it.
    ///
    /// `EVENT DATE` becomes `[EVENT DATE]` on SQL Server and Access;
    /// plain names stay bare unless quoting is global.
    #[must_use]
    pub fn quoted(quoter: &Quoter<'_>, name: &str) -> Self {
        Self {
            name: quoter.ident(name),
        }
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq<T: ToSqlValue>(self, value: T) -> ExprBuilder {
        ExprBuilder::from(self).eq(value)
    }

    /// Creates an inequality expression (`!=`).
    #[must_use]
    pub fn not_eq<T: ToSqlValue>(self, value: T) -> ExprBuilder {
        ExprBuilder::from(self).not_eq(value)
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt<T: ToSqlValue>(self, value: T) -> ExprBuilder {
        ExprBuilder::from(self).gt(value)
    }

    /// Creates a LIKE expression.
    #[must_use]
    pub fn like<T: ToSqlValue>(self, pattern: T) -> ExprBuilder {
        ExprBuilder::from(self).like(pattern)
    }

    /// Creates an IN expression with one placeholder per value.
    #[must_use]
    pub fn in_list<T: ToSqlValue>(self, values: Vec<T>) -> ExprBuilder {
        ExprBuilder::from(self).in_list(values)
    }
}

/// An SQL expression with its bound parameters.
#[derive(Debug, Clone)]
pub struct ExprBuilder {
    sql: String,
    params: Vec<SqlValue>,
}

impl ExprBuilder {
    /// Creates an expression from trusted SQL text, such as a literal.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: vec![],
        }
    }

    /// Creates a bound value expression.
    #[must_use]
    pub fn value<T: ToSqlValue>(value: T) -> Self {
        value.to_sql_value().into()
    }

    fn join(self, op: &str, right: Self) -> Self {
        let mut params = self.params;
        params.extend(right.params);
        Self {
            sql: format!("{} {op} {}", self.sql, right.sql),
            params,
        }
    }

    fn compare<T: ToSqlValue>(self, op: Comparison, value: T) -> Self {
        self.join(op.as_sql(), Self::value(value))
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        self.join("AND", other)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        self.join("OR", other)
    }

    /// Wraps the expression in parentheses.
    #[must_use]
    pub fn paren(self) -> Self {
        Self {
            sql: format!("({})", self.sql),
            params: self.params,
        }
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq<T: ToSqlValue>(self, value: T) -> Self {
        self.compare(Comparison::Eq, value)
    }

    /// Creates an inequality expression (`!=`).
    #[must_use]
    pub fn not_eq<T: ToSqlValue>(self, value: T) -> Self {
        self.compare(Comparison::NotEq, value)
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt<T: ToSqlValue>(self, value: T) -> Self {
        self.compare(Comparison::Gt, value)
    }

    /// Creates a LIKE expression.
    #[must_use]
    pub fn like<T: ToSqlValue>(self, pattern: T) -> Self {
        self.compare(Comparison::Like, pattern)
    }

    /// Creates an IN expression with one placeholder per value.
    #[must_use]
    pub fn in_list<T: ToSqlValue>(self, values: Vec<T>) -> Self {
        let placeholders = vec![SqlValue::placeholder(); values.len()].join(", ");
        let mut params = self.params;
        params.extend(values.into_iter().map(ToSqlValue::to_sql_value));
        Self {
            sql: format!("{} IN ({placeholders})", self.sql),
            params,
        }
    }

    /// Returns the SQL string.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the parameters.
    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Consumes the builder and returns the SQL and parameters.
    #[must_use]
    pub fn build(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.params)
    }
}

impl From<Column> for ExprBuilder {
    fn from(col: Column) -> Self {
        Self::raw(col.name)
    }
}

impl From<SqlValue> for ExprBuilder {
    fn from(value: SqlValue) -> Self {
        Self {
            sql: String::from(SqlValue::placeholder()),
            params: vec![value],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{GenericDialect, SqlServerDialect};
    use crate::error::DialectError;

    #[test]
    fn test_column_eq() {
        let expr = col("title").eq("event2");
        assert_eq!(expr.sql(), "title = ?");
        assert_eq!(expr.params().len(), 1);
    }

    #[test]
    fn test_not_eq_and_like() {
        assert_eq!(col("title").not_eq("event2").sql(), "title != ?");
        assert_eq!(col("title").like("event%").sql(), "title LIKE ?");
    }

    #[test]
    fn test_in_list() {
        let expr = col("email").in_list(vec!["a@x.org", "b@x.org"]);
        assert_eq!(expr.sql(), "email IN (?, ?)");
        assert_eq!(expr.params().len(), 2);
    }

    #[test]
    fn test_and_or_paren() {
        let expr = col("fee")
            .gt(10)
            .and(col("title").eq("a").or(col("title").eq("b")).paren());
        assert_eq!(expr.sql(), "fee > ? AND (title = ? OR title = ?)");
        assert_eq!(expr.params().len(), 3);
    }

    #[test]
    fn test_quoted_column() {
        let dialect = SqlServerDialect::new();
        let quoter = Quoter::new(&dialect, false);
        let expr = Column::quoted(&quoter, "EVENT DATE").gt("2017-01-01");
        assert_eq!(expr.sql(), "[EVENT DATE] > ?");
        assert_eq!(Column::quoted(&quoter, "title").name, "title");

        let quoter = Quoter::new(&dialect, true);
        assert_eq!(Column::quoted(&quoter, "title").name, "[title]");
    }

    #[test]
    fn test_func_renders_through_dialect() {
        let generic = GenericDialect::new();
        let sqlserver = SqlServerDialect::new();
        let args = || vec![col("title").into(), ExprBuilder::value("n/a")];

        let expr = func(&generic, "coalesce", args()).unwrap();
        assert_eq!(expr.sql(), "coalesce(title, ?)");
        assert_eq!(expr.params(), &[SqlValue::Text(String::from("n/a"))]);

        let expr = func(&sqlserver, "concat", args()).unwrap();
        assert_eq!(expr.sql(), "(title+?)");
    }

    #[test]
    fn test_func_unknown() {
        let dialect = GenericDialect::new();
        assert!(matches!(
            func(&dialect, "frobnicate", vec![]),
            Err(DialectError::UnknownFunction(ref n)) if n == "frobnicate"
        ));
    }

    #[test]
    fn test_value_is_parameterized() {
        let malicious = "'; DROP TABLE EVENTS; --";
        let expr = col("title").eq(malicious);
        assert_eq!(expr.sql(), "title = ?");
        assert!(matches!(&expr.params()[0], SqlValue::Text(s) if s == malicious));
    }
}
