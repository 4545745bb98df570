//! Pagination: row selections and dialect limit handlers.

use crate::builder::value::SqlValue;

/// The window of rows a query asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowSelection {
    /// Zero-based index of the first row.
    pub first_row: Option<u64>,
    /// Maximum number of rows.
    pub max_rows: Option<u64>,
}

impl RowSelection {
    /// Creates an empty selection (all rows).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            first_row: None,
            max_rows: None,
        }
    }

    /// Sets the zero-based first row.
    #[must_use]
    pub const fn first_row(mut self, first_row: u64) -> Self {
        self.first_row = Some(first_row);
        self
    }

    /// Sets the maximum number of rows.
    #[must_use]
    pub const fn max_rows(mut self, max_rows: u64) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    /// Returns true when a positive row cap is set; a cap of 0 means no limit.
    #[must_use]
    pub const fn has_max_rows(&self) -> bool {
        matches!(self.max_rows, Some(n) if n > 0)
    }

    /// The first row, defaulting to 0.
    #[must_use]
    pub fn first(&self) -> u64 {
        self.first_row.unwrap_or(0)
    }

    /// The row cap counted from the start of the result set.
    #[must_use]
    pub fn last(&self) -> Option<u64> {
        self.max_rows
            .filter(|&max| max > 0)
            .map(|max| self.first().saturating_add(max))
    }
}

/// Rewrites queries to restrict the returned rows.
pub trait LimitHandler: Send + Sync {
    /// Whether the dialect has any limit syntax.
    fn supports_limit(&self) -> bool;

    /// Whether the limit syntax can also skip rows.
    fn supports_limit_offset(&self) -> bool {
        self.supports_limit()
    }

    /// Returns the SQL with the dialect's limit clause applied.
    fn process_sql(&self, sql: &str, selection: &RowSelection) -> String;

    /// Appends limit parameters bound before the query's own parameters.
    ///
    /// Returns the number of parameters appended.
    fn bind_limit_parameters_at_start(
        &self,
        _selection: &RowSelection,
        _params: &mut Vec<SqlValue>,
    ) -> usize {
        0
    }

    /// Appends limit parameters bound after the query's own parameters.
    ///
    /// Returns the number of parameters appended.
    fn bind_limit_parameters_at_end(
        &self,
        _selection: &RowSelection,
        _params: &mut Vec<SqlValue>,
    ) -> usize {
        0
    }

    /// A row cap for the driver to enforce, if the SQL does not.
    fn statement_max_rows(&self, _selection: &RowSelection) -> Option<u64> {
        None
    }
}

/// Returns true when the handler should rewrite SQL for the selection.
#[must_use]
pub fn use_limit(handler: &dyn LimitHandler, selection: &RowSelection) -> bool {
    handler.supports_limit() && selection.has_max_rows()
}

/// Limit handler for dialects without limit syntax.
///
/// The SQL is left unchanged and the driver caps the rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLimitHandler;

impl LimitHandler for NoopLimitHandler {
    fn supports_limit(&self) -> bool {
        false
    }

    fn process_sql(&self, sql: &str, _selection: &RowSelection) -> String {
        sql.to_string()
    }

    fn statement_max_rows(&self, selection: &RowSelection) -> Option<u64> {
        selection.last()
    }
}

/// Transact-SQL `TOP n` limit handler.
///
/// `TOP` cannot skip rows, so the cap covers `first_row + max_rows` and the
/// caller discards the leading rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopLimitHandler;

impl LimitHandler for TopLimitHandler {
    fn supports_limit(&self) -> bool {
        true
    }

    fn supports_limit_offset(&self) -> bool {
        false
    }

    fn process_sql(&self, sql: &str, selection: &RowSelection) -> String {
        match selection.last() {
            Some(top) => insert_top(sql, top),
            None => sql.to_string(),
        }
    }
}

fn insert_top(sql: &str, top: u64) -> String {
    let lower = sql.to_ascii_lowercase();
    let Some(start) = lower.find("select") else {
        return sql.to_string();
    };
    let mut pos = start + "select".len();
    let rest = &lower[pos..];
    let trimmed = rest.trim_start();
    if trimmed.starts_with("distinct") {
        pos += rest.len() - trimmed.len() + "distinct".len();
    }
    format!("{} top {top}{}", &sql[..pos], &sql[pos..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_selection_defaults() {
        let selection = RowSelection::new();
        assert!(!selection.has_max_rows());
        assert_eq!(selection.first(), 0);
        assert_eq!(selection.last(), None);

        let selection = RowSelection::new().first_row(10).max_rows(5);
        assert_eq!(selection.first(), 10);
        assert_eq!(selection.last(), Some(15));
    }

    #[test]
    fn test_zero_max_rows_is_no_limit() {
        let selection = RowSelection::new().first_row(3).max_rows(0);
        assert!(!selection.has_max_rows());
        assert_eq!(selection.last(), None);
        assert!(!use_limit(&TopLimitHandler, &selection));
        assert_eq!(
            TopLimitHandler.process_sql("select id from users", &selection),
            "select id from users"
        );
        assert_eq!(NoopLimitHandler.statement_max_rows(&selection), None);
    }

    #[test]
    fn test_use_limit() {
        let with_max = RowSelection::new().max_rows(3);
        let offset_only = RowSelection::new().first_row(3);
        assert!(use_limit(&TopLimitHandler, &with_max));
        assert!(!use_limit(&TopLimitHandler, &offset_only));
        assert!(!use_limit(&NoopLimitHandler, &with_max));
    }

    #[test]
    fn test_noop_handler() {
        let selection = RowSelection::new().first_row(2).max_rows(3);
        let mut params = vec![];
        assert_eq!(
            NoopLimitHandler.process_sql("select a from t", &selection),
            "select a from t"
        );
        assert_eq!(
            NoopLimitHandler.bind_limit_parameters_at_end(&selection, &mut params),
            0
        );
        assert!(params.is_empty());
        assert_eq!(NoopLimitHandler.statement_max_rows(&selection), Some(5));
    }

    #[test]
    fn test_top_handler() {
        let selection = RowSelection::new().max_rows(10);
        assert_eq!(
            TopLimitHandler.process_sql("select id from users", &selection),
            "select top 10 id from users"
        );
        assert_eq!(
            TopLimitHandler.process_sql("SELECT DISTINCT name FROM users", &selection),
            "SELECT DISTINCT top 10 name FROM users"
        );
        assert!(!TopLimitHandler.supports_limit_offset());
    }

    #[test]
    fn test_top_handler_counts_skipped_rows() {
        let selection = RowSelection::new().first_row(20).max_rows(10);
        assert_eq!(
            TopLimitHandler.process_sql("select id from users", &selection),
            "select top 30 id from users"
        );
    }
}
