//! Transact-SQL dialect for Microsoft SQL Server.
//!
//! Also the base for engines that accept a T-SQL flavoured grammar, which
//! take its registries through [`SqlServerDialect::into_parts`] and
//! override what differs.

use super::{register_standard_functions, Dialect, DialectParts};
use crate::error::Result;
use crate::function::{FunctionRegistry, SqlFunction};
use crate::identity::IdentityColumnSupport;
use crate::limit::{LimitHandler, TopLimitHandler};
use crate::types::{SqlType, TypeNames};
use crate::unique::{DefaultUniqueDelegate, UniqueDelegate};

/// Identity columns declared with `identity`, read back with `@@identity`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerIdentityColumnSupport;

impl IdentityColumnSupport for SqlServerIdentityColumnSupport {
    fn supports_identity_columns(&self) -> bool {
        true
    }

    fn supports_insert_select_identity(&self) -> bool {
        true
    }

    fn identity_column_string(&self, _code: SqlType) -> Result<String> {
        Ok(String::from("identity not null"))
    }

    fn identity_select_string(
        &self,
        _table: &str,
        _column: &str,
        _code: SqlType,
    ) -> Result<String> {
        Ok(String::from("select @@identity"))
    }

    fn identity_insert_string(&self) -> Option<&str> {
        Some("default")
    }

    fn append_identity_select_to_insert(&self, insert: &str) -> String {
        format!("{insert} select scope_identity()")
    }
}

/// SQL Server dialect.
#[derive(Debug, Clone)]
pub struct SqlServerDialect {
    type_names: TypeNames,
    functions: FunctionRegistry,
}

impl SqlServerDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub fn new() -> Self {
        let mut type_names = TypeNames::new("sqlserver");
        type_names.register(SqlType::Binary, "binary($l)");
        type_names.register(SqlType::Bit, "bit");
        type_names.register(SqlType::BigInt, "numeric(19,0)");
        type_names.register(SqlType::SmallInt, "smallint");
        type_names.register(SqlType::TinyInt, "smallint");
        type_names.register(SqlType::Integer, "int");
        type_names.register(SqlType::Char, "char($l)");
        type_names.register(SqlType::Varchar, "varchar($l)");
        type_names.register(SqlType::Float, "float");
        type_names.register(SqlType::Real, "real");
        type_names.register(SqlType::Double, "double precision");
        type_names.register(SqlType::Date, "datetime");
        type_names.register(SqlType::Time, "datetime");
        type_names.register(SqlType::Timestamp, "datetime");
        type_names.register(SqlType::Varbinary, "image");
        type_names.register_with_capacity(SqlType::Varbinary, 8000, "varbinary($l)");
        type_names.register(SqlType::LongVarbinary, "image");
        type_names.register(SqlType::LongVarchar, "text");
        type_names.register(SqlType::Numeric, "numeric($p,$s)");
        type_names.register(SqlType::Decimal, "decimal($p,$s)");
        type_names.register(SqlType::Blob, "image");
        type_names.register(SqlType::Clob, "text");
        type_names.register(SqlType::Boolean, "bit");

        let mut functions = FunctionRegistry::new();
        register_standard_functions(&mut functions);
        register_transact_sql_functions(&mut functions);

        Self {
            type_names,
            functions,
        }
    }

    /// Hands over the registries so a derived dialect can override entries.
    #[must_use]
    pub fn into_parts(self) -> DialectParts {
        DialectParts {
            type_names: self.type_names,
            functions: self.functions,
        }
    }
}

impl Default for SqlServerDialect {
    fn default() -> Self {
        Self::new()
    }
}

fn register_transact_sql_functions(functions: &mut FunctionRegistry) {
    use SqlType::{Date, Double, Integer, Time, Timestamp, Varchar};

    for name in ["ascii", "len", "datalength"] {
        functions.register(name, SqlFunction::standard(name), Some(Integer));
    }
    for name in ["char", "str", "ltrim", "rtrim", "reverse", "space", "datename"] {
        functions.register(name, SqlFunction::standard(name), Some(Varchar));
    }
    for name in ["day", "month", "year", "sign"] {
        functions.register(name, SqlFunction::standard(name), Some(Integer));
    }
    for name in [
        "acos", "asin", "atan", "cos", "cot", "exp", "log", "log10", "sin", "tan", "radians",
        "degrees", "rand",
    ] {
        functions.register(name, SqlFunction::standard(name), Some(Double));
    }
    for name in ["square", "round", "ceiling", "floor", "isnull"] {
        functions.register(name, SqlFunction::standard(name), None);
    }
    functions.register("pi", SqlFunction::no_args("pi"), Some(Double));
    functions.register("user", SqlFunction::keyword("user"), Some(Varchar));
    functions.register("getdate", SqlFunction::no_args("getdate"), Some(Timestamp));
    functions.register(
        "getutcdate",
        SqlFunction::no_args("getutcdate"),
        Some(Timestamp),
    );
    functions.register(
        "current_timestamp",
        SqlFunction::no_args("getdate"),
        Some(Timestamp),
    );
    functions.register("current_time", SqlFunction::no_args("getdate"), Some(Time));
    functions.register("current_date", SqlFunction::no_args("getdate"), Some(Date));

    functions.register(
        "concat",
        SqlFunction::var_args("(", "+", ")"),
        Some(Varchar),
    );
    functions.register("length", SqlFunction::standard("len"), Some(Integer));
    functions.register(
        "trim",
        SqlFunction::template("ltrim(rtrim(?1))"),
        Some(Varchar),
    );
    functions.register("locate", SqlFunction::standard("charindex"), Some(Integer));
    functions.register(
        "second",
        SqlFunction::template("datepart(second, ?1)"),
        Some(Integer),
    );
    functions.register(
        "minute",
        SqlFunction::template("datepart(minute, ?1)"),
        Some(Integer),
    );
    functions.register(
        "hour",
        SqlFunction::template("datepart(hour, ?1)"),
        Some(Integer),
    );
    functions.register(
        "extract",
        SqlFunction::template("datepart(?1, ?3)"),
        Some(Integer),
    );
    functions.register("mod", SqlFunction::template("?1 % ?2"), Some(Integer));
    functions.register(
        "bit_length",
        SqlFunction::template("datalength(?1) * 8"),
        Some(Integer),
    );
}

impl Dialect for SqlServerDialect {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn type_names(&self) -> &TypeNames {
        &self.type_names
    }

    fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    fn identity_column_support(&self) -> &dyn IdentityColumnSupport {
        &SqlServerIdentityColumnSupport
    }

    fn limit_handler(&self) -> &dyn LimitHandler {
        &TopLimitHandler
    }

    fn unique_delegate(&self) -> &dyn UniqueDelegate {
        &DefaultUniqueDelegate
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
    use crate::limit::RowSelection;
    use crate::types::ColumnSize;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_sqlserver_dialect() {
        let dialect = SqlServerDialect::new();
        assert_eq!(dialect.name(), "sqlserver");
        assert_eq!(dialect.quote_identifier("users"), "[users]");
        assert_eq!(dialect.quote_identifier("user[data]"), "[user[data]]]");
        assert!(!dialect.supports_sequences());
        assert!(dialect.create_sequence_string("s").is_err());
    }

    #[test]
    fn test_sqlserver_type_names() {
        let dialect = SqlServerDialect::new();
        let size = ColumnSize::default();
        assert_eq!(dialect.type_name(SqlType::Integer, size).unwrap(), "int");
        assert_eq!(dialect.type_name(SqlType::Clob, size).unwrap(), "text");
        assert_eq!(dialect.type_name(SqlType::Timestamp, size).unwrap(), "datetime");
        assert_eq!(dialect.type_name(SqlType::Blob, size).unwrap(), "image");
        assert_eq!(dialect.type_name(SqlType::BigInt, size).unwrap(), "numeric(19,0)");
        assert_eq!(dialect.type_name(SqlType::Bit, size).unwrap(), "bit");
        assert_eq!(
            dialect
                .type_name(SqlType::Varbinary, ColumnSize::with_length(16))
                .unwrap(),
            "varbinary(16)"
        );
        assert_eq!(
            dialect
                .type_name(SqlType::Varbinary, ColumnSize::with_length(10_000))
                .unwrap(),
            "image"
        );
    }

    #[test]
    fn test_sqlserver_functions() {
        let dialect = SqlServerDialect::new();
        assert_eq!(
            dialect.render_function("current_date", &[]).unwrap(),
            "getdate()"
        );
        assert_eq!(
            dialect.render_function("hour", &args(&["d"])).unwrap(),
            "datepart(hour, d)"
        );
        assert_eq!(
            dialect
                .render_function("concat", &args(&["'event'", "'2'"]))
                .unwrap(),
            "('event'+'2')"
        );
        assert_eq!(
            dialect.render_function("length", &args(&["title"])).unwrap(),
            "len(title)"
        );
        assert_eq!(
            dialect.render_function("trim", &args(&["title"])).unwrap(),
            "ltrim(rtrim(title))"
        );
        assert_eq!(
            dialect.render_function("mod", &args(&["a", "b"])).unwrap(),
            "a % b"
        );
        assert_eq!(dialect.render_function("user", &[]).unwrap(), "user");
    }

    #[test]
    fn test_sqlserver_identity() {
        let dialect = SqlServerDialect::new();
        let identity = dialect.identity_column_support();
        assert!(identity.supports_identity_columns());
        assert!(identity.has_data_type_in_identity_column());
        assert_eq!(
            identity.identity_column_string(SqlType::Integer).unwrap(),
            "identity not null"
        );
        assert_eq!(
            identity
                .identity_select_string("t", "id", SqlType::Integer)
                .unwrap(),
            "select @@identity"
        );
        assert_eq!(
            identity.append_identity_select_to_insert("insert into t (a) values (?)"),
            "insert into t (a) values (?) select scope_identity()"
        );
    }

    #[test]
    fn test_sqlserver_limit() {
        let dialect = SqlServerDialect::new();
        let selection = RowSelection::new().max_rows(5);
        assert_eq!(
            dialect.limit_handler().process_sql("select a from t", &selection),
            "select top 5 a from t"
        );
    }

    #[test]
    fn test_into_parts_keeps_registrations() {
        let parts = SqlServerDialect::new().into_parts();
        assert_eq!(parts.type_names.default_template(SqlType::Integer), Some("int"));
        assert!(parts.functions.contains("concat"));
    }
}
