//! Microsoft Access dialect implementation.

use access_dialect_core::dialect::{Dialect, Quoter, SqlServerDialect};
use access_dialect_core::error::Result;
use access_dialect_core::function::{FunctionRegistry, SqlFunction};
use access_dialect_core::identity::IdentityColumnSupport;
use access_dialect_core::limit::{LimitHandler, RowSelection};
use access_dialect_core::mapping::{Column, Table, UniqueKey};
use access_dialect_core::types::{SqlType, TypeNames};
use access_dialect_core::unique::UniqueDelegate;
use tracing::debug;

/// Access `COUNTER` (autonumber) columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessIdentityColumnSupport;

impl IdentityColumnSupport for AccessIdentityColumnSupport {
    fn supports_identity_columns(&self) -> bool {
        true
    }

    fn has_data_type_in_identity_column(&self) -> bool {
        false
    }

    fn identity_column_string(&self, _code: SqlType) -> Result<String> {
        Ok(String::from("COUNTER"))
    }

    fn identity_select_string(
        &self,
        _table: &str,
        _column: &str,
        _code: SqlType,
    ) -> Result<String> {
        Ok(String::from("SELECT @@IDENTITY"))
    }
}

/// `limit n offset m` appended to the statement.
///
/// UCanAccess translates the clause itself, so nothing is bound and the
/// driver applies no row cap.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessLimitHandler;

impl LimitHandler for AccessLimitHandler {
    fn supports_limit(&self) -> bool {
        true
    }

    fn supports_limit_offset(&self) -> bool {
        true
    }

    fn process_sql(&self, sql: &str, selection: &RowSelection) -> String {
        debug!(sql = %sql, "Applying limit clause");
        match selection.max_rows {
            Some(max) if max > 0 => format!("{sql} limit {max} offset {}", selection.first()),
            _ => sql.to_string(),
        }
    }
}

/// Unique constraints are declared inline on the column only.
///
/// Access SQL has no `alter table ... add constraint ... unique`, so keys
/// spanning several columns cannot be created.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessUniqueDelegate;

impl UniqueDelegate for AccessUniqueDelegate {
    fn column_definition_uniqueness_fragment(&self, _column: &Column) -> String {
        String::from(" UNIQUE")
    }

    fn table_creation_unique_constraints_fragment(
        &self,
        _table: &Table,
        _quoter: &Quoter<'_>,
    ) -> String {
        String::new()
    }

    fn alter_table_to_add_unique_key_command(
        &self,
        _key: &UniqueKey,
        _table: &Table,
        _quoter: &Quoter<'_>,
    ) -> Option<String> {
        None
    }

    fn alter_table_to_drop_unique_key_command(
        &self,
        _key: &UniqueKey,
        _table: &Table,
        _quoter: &Quoter<'_>,
    ) -> Option<String> {
        None
    }
}

/// Microsoft Access dialect, as spoken by the UCanAccess driver.
///
/// Starts from [`SqlServerDialect`] and overrides what Access spells
/// differently.
#[derive(Debug, Clone)]
pub struct AccessDialect {
    type_names: TypeNames,
    functions: FunctionRegistry,
}

impl AccessDialect {
    /// Creates a new Access dialect.
    #[must_use]
    pub fn new() -> Self {
        let parts = SqlServerDialect::new().into_parts();

        let mut type_names = parts.type_names;
        type_names.set_dialect("ucanaccess");
        type_names.register(SqlType::Integer, "LONG");
        type_names.register(SqlType::Clob, "MEMO");

        let mut functions = parts.functions;
        functions.register(
            "current_date",
            SqlFunction::standard("Date"),
            Some(SqlType::Date),
        );
        functions.register(
            "current_time",
            SqlFunction::standard("Time"),
            Some(SqlType::Time),
        );
        functions.register(
            "current_timestamp",
            SqlFunction::standard("Now"),
            Some(SqlType::Timestamp),
        );
        functions.register(
            "second",
            SqlFunction::template("Second(?1)"),
            Some(SqlType::Integer),
        );
        functions.register(
            "minute",
            SqlFunction::template("Minute(?1)"),
            Some(SqlType::Integer),
        );
        functions.register(
            "hour",
            SqlFunction::template("Hour(?1)"),
            Some(SqlType::Integer),
        );

        Self {
            type_names,
            functions,
        }
    }
}

impl Default for AccessDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for AccessDialect {
    fn name(&self) -> &'static str {
        "ucanaccess"
    }

    fn type_names(&self) -> &TypeNames {
        &self.type_names
    }

    fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    fn identity_column_support(&self) -> &dyn IdentityColumnSupport {
        &AccessIdentityColumnSupport
    }

    fn limit_handler(&self) -> &dyn LimitHandler {
        &AccessLimitHandler
    }

    fn unique_delegate(&self) -> &dyn UniqueDelegate {
        &AccessUniqueDelegate
    }

    fn open_quote(&self) -> char {
        '['
    }

    fn close_quote(&self) -> char {
        ']'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use access_dialect_core::builder::Select;
    use access_dialect_core::dialect::GenericDialect;
    use access_dialect_core::limit::use_limit;
    use access_dialect_core::mapping::{varchar, TableBuilder};
    use access_dialect_core::types::ColumnSize;
    use access_dialect_core::DialectError;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_access_dialect() {
        let dialect = AccessDialect::new();
        assert_eq!(dialect.name(), "ucanaccess");
        assert_eq!(dialect.quote_identifier("EVENT DATE"), "[EVENT DATE]");
        assert_eq!(dialect.boolean_literal(true), "1");
        assert!(!dialect.supports_sequences());
        assert!(matches!(
            dialect.create_sequence_string("event_seq"),
            Err(DialectError::SequencesNotSupported { ref dialect, .. }) if dialect == "ucanaccess"
        ));
    }

    #[test]
    fn test_access_type_overrides() {
        let dialect = AccessDialect::new();
        let size = ColumnSize::default();
        assert_eq!(dialect.type_name(SqlType::Integer, size).unwrap(), "LONG");
        assert_eq!(dialect.type_name(SqlType::Clob, size).unwrap(), "MEMO");
    }

    #[test]
    fn test_access_inherited_types() {
        let dialect = AccessDialect::new();
        let size = ColumnSize::default();
        assert_eq!(dialect.type_name(SqlType::Timestamp, size).unwrap(), "datetime");
        assert_eq!(dialect.type_name(SqlType::Blob, size).unwrap(), "image");
        assert_eq!(dialect.type_name(SqlType::Boolean, size).unwrap(), "bit");
        assert_eq!(dialect.type_name(SqlType::Bit, size).unwrap(), "bit");
        assert_eq!(
            dialect
                .type_name(SqlType::Varchar, ColumnSize::with_length(100))
                .unwrap(),
            "varchar(100)"
        );
        assert_eq!(
            dialect
                .type_name(SqlType::Numeric, ColumnSize::with_precision(19, 4))
                .unwrap(),
            "numeric(19,4)"
        );
    }

    #[test]
    fn test_access_date_functions() {
        let dialect = AccessDialect::new();
        assert_eq!(dialect.render_function("current_date", &[]).unwrap(), "Date()");
        assert_eq!(dialect.render_function("current_time", &[]).unwrap(), "Time()");
        assert_eq!(
            dialect.render_function("current_timestamp", &[]).unwrap(),
            "Now()"
        );
        assert_eq!(
            dialect.render_function("second", &args(&["d"])).unwrap(),
            "Second(d)"
        );
        assert_eq!(
            dialect.render_function("minute", &args(&["d"])).unwrap(),
            "Minute(d)"
        );
        assert_eq!(
            dialect.render_function("HOUR", &args(&["[EVENT DATE]"])).unwrap(),
            "Hour([EVENT DATE])"
        );
    }

    #[test]
    fn test_access_function_return_types() {
        let dialect = AccessDialect::new();
        let functions = dialect.functions();
        assert_eq!(functions.return_type("current_date"), Some(SqlType::Date));
        assert_eq!(functions.return_type("current_time"), Some(SqlType::Time));
        assert_eq!(
            functions.return_type("current_timestamp"),
            Some(SqlType::Timestamp)
        );
        assert_eq!(functions.return_type("hour"), Some(SqlType::Integer));
    }

    #[test]
    fn test_access_inherited_functions() {
        let dialect = AccessDialect::new();
        assert_eq!(
            dialect
                .render_function("concat", &args(&["'event'", "'2'"]))
                .unwrap(),
            "('event'+'2')"
        );
        assert_eq!(
            dialect
                .render_function("coalesce", &args(&["description", "title"]))
                .unwrap(),
            "coalesce(description, title)"
        );
        assert!(matches!(
            dialect.render_function("hour", &[]),
            Err(DialectError::FunctionArity { expected: 1, actual: 0, .. })
        ));
    }

    #[test]
    fn test_access_identity() {
        let dialect = AccessDialect::new();
        let identity = dialect.identity_column_support();
        assert!(identity.supports_identity_columns());
        assert!(!identity.has_data_type_in_identity_column());
        assert!(!identity.supports_insert_select_identity());
        assert_eq!(identity.identity_insert_string(), None);
        assert_eq!(
            identity.identity_column_string(SqlType::Integer).unwrap(),
            "COUNTER"
        );
        assert_eq!(
            identity
                .identity_select_string("EVENTS", "EVENT_ID", SqlType::Integer)
                .unwrap(),
            "SELECT @@IDENTITY"
        );
        assert_eq!(
            identity.append_identity_select_to_insert("insert into EVENTS (title) values (?)"),
            "insert into EVENTS (title) values (?)"
        );
    }

    #[test]
    fn test_access_limit_handler() {
        let handler = AccessLimitHandler;
        let selection = RowSelection::new().first_row(20).max_rows(10);
        assert!(handler.supports_limit());
        assert!(handler.supports_limit_offset());
        assert!(use_limit(&handler, &selection));
        assert_eq!(
            handler.process_sql("select title from EVENTS", &selection),
            "select title from EVENTS limit 10 offset 20"
        );
        assert_eq!(handler.statement_max_rows(&selection), None);

        let mut params = vec![];
        assert_eq!(handler.bind_limit_parameters_at_start(&selection, &mut params), 0);
        assert_eq!(handler.bind_limit_parameters_at_end(&selection, &mut params), 0);
        assert!(params.is_empty());
    }

    #[test]
    fn test_access_limit_defaults_offset_to_zero() {
        let selection = RowSelection::new().max_rows(5);
        assert_eq!(
            AccessLimitHandler.process_sql("select * from Guest", &selection),
            "select * from Guest limit 5 offset 0"
        );
        assert_eq!(
            AccessLimitHandler.process_sql("select * from Guest", &RowSelection::new()),
            "select * from Guest"
        );
    }

    #[test]
    fn test_access_limit_zero_max_rows_means_no_limit() {
        let selection = RowSelection::new().first_row(3).max_rows(0);
        assert_eq!(
            AccessLimitHandler.process_sql("select * from Guest", &selection),
            "select * from Guest"
        );

        let dialect = AccessDialect::new();
        assert!(!use_limit(dialect.limit_handler(), &selection));
        let paged = Select::new()
            .columns(&["title"])
            .from("EVENTS")
            .build_for(&dialect, &selection);
        assert_eq!(paged.sql, "SELECT title FROM EVENTS");
        assert_eq!(paged.max_rows, None);
        assert_eq!(paged.skip_rows, 3);
    }

    #[test]
    fn test_access_unique_delegate() {
        let generic = GenericDialect::new();
        let quoter = Quoter::new(&generic, false);
        let table = TableBuilder::new()
            .name("Guest")
            .column(varchar("email", 255).unique().build())
            .column(varchar("name", 100).build())
            .unique_key("UK_guest", &["email", "name"])
            .build();
        let key = &table.unique_keys[0];

        let delegate = AccessUniqueDelegate;
        assert_eq!(
            delegate.column_definition_uniqueness_fragment(&table.columns[0]),
            " UNIQUE"
        );
        assert_eq!(
            delegate.table_creation_unique_constraints_fragment(&table, &quoter),
            ""
        );
        assert_eq!(
            delegate.alter_table_to_add_unique_key_command(key, &table, &quoter),
            None
        );
        assert_eq!(
            delegate.alter_table_to_drop_unique_key_command(key, &table, &quoter),
            None
        );
    }

    #[test]
    fn test_base_dialect_unchanged() {
        let base = SqlServerDialect::new();
        let size = ColumnSize::default();
        assert_eq!(base.type_name(SqlType::Integer, size).unwrap(), "int");
        assert_eq!(base.render_function("current_date", &[]).unwrap(), "getdate()");
    }
}
