//! Generic SQL dialect.

use super::Dialect;
use crate::error::Result;
use crate::function::{FunctionRegistry, SqlFunction};
use crate::identity::{IdentityColumnSupport, NoIdentityColumnSupport};
use crate::limit::{LimitHandler, NoopLimitHandler};
use crate::types::{SqlType, TypeNames};
use crate::unique::{DefaultUniqueDelegate, UniqueDelegate};

/// A generic SQL dialect using ANSI SQL standards.
#[derive(Debug, Clone)]
pub struct GenericDialect {
    type_names: TypeNames,
    functions: FunctionRegistry,
    identity: NoIdentityColumnSupport,
}

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub fn new() -> Self {
        let mut type_names = TypeNames::new("generic");
        type_names.register(SqlType::Bit, "bit");
        type_names.register(SqlType::TinyInt, "tinyint");
        type_names.register(SqlType::SmallInt, "smallint");
        type_names.register(SqlType::Integer, "integer");
        type_names.register(SqlType::BigInt, "bigint");
        type_names.register(SqlType::Float, "float");
        type_names.register(SqlType::Real, "real");
        type_names.register(SqlType::Double, "double precision");
        type_names.register(SqlType::Numeric, "numeric($p,$s)");
        type_names.register(SqlType::Decimal, "decimal($p,$s)");
        type_names.register(SqlType::Char, "char($l)");
        type_names.register(SqlType::Varchar, "varchar($l)");
        type_names.register(SqlType::LongVarchar, "varchar($l)");
        type_names.register(SqlType::Date, "date");
        type_names.register(SqlType::Time, "time");
        type_names.register(SqlType::Timestamp, "timestamp");
        type_names.register(SqlType::Binary, "binary($l)");
        type_names.register(SqlType::Varbinary, "varbinary($l)");
        type_names.register(SqlType::LongVarbinary, "varbinary($l)");
        type_names.register(SqlType::Blob, "blob");
        type_names.register(SqlType::Clob, "clob");
        type_names.register(SqlType::Boolean, "boolean");

        let mut functions = FunctionRegistry::new();
        register_standard_functions(&mut functions);
        functions.register(
            "concat",
            SqlFunction::var_args("(", "||", ")"),
            Some(SqlType::Varchar),
        );
        functions.register(
            "current_date",
            SqlFunction::keyword("current_date"),
            Some(SqlType::Date),
        );
        functions.register(
            "current_time",
            SqlFunction::keyword("current_time"),
            Some(SqlType::Time),
        );
        functions.register(
            "current_timestamp",
            SqlFunction::keyword("current_timestamp"),
            Some(SqlType::Timestamp),
        );
        for field in ["second", "minute", "hour", "day", "month", "year"] {
            functions.register(
                field,
                SqlFunction::template(format!("extract({field} from ?1)")),
                Some(SqlType::Integer),
            );
        }

        Self {
            type_names,
            functions,
            identity: NoIdentityColumnSupport::new("generic"),
        }
    }
}

impl Default for GenericDialect {
    fn default() -> Self {
        Self::new()
    }
}

/// Registers the functions every dialect shares.
pub fn register_standard_functions(functions: &mut FunctionRegistry) {
    functions.register("coalesce", SqlFunction::standard("coalesce"), None);
    functions.register("nullif", SqlFunction::standard("nullif"), None);
    functions.register("abs", SqlFunction::standard("abs"), None);
    functions.register(
        "sqrt",
        SqlFunction::standard("sqrt"),
        Some(SqlType::Double),
    );
    functions.register(
        "lower",
        SqlFunction::standard("lower"),
        Some(SqlType::Varchar),
    );
    functions.register(
        "upper",
        SqlFunction::standard("upper"),
        Some(SqlType::Varchar),
    );
    functions.register(
        "length",
        SqlFunction::standard("length"),
        Some(SqlType::Integer),
    );
    functions.register(
        "substring",
        SqlFunction::standard("substring"),
        Some(SqlType::Varchar),
    );
    functions.register(
        "locate",
        SqlFunction::standard("locate"),
        Some(SqlType::Integer),
    );
    functions.register(
        "trim",
        SqlFunction::standard("trim"),
        Some(SqlType::Varchar),
    );
    functions.register(
        "mod",
        SqlFunction::standard("mod"),
        Some(SqlType::Integer),
    );
    functions.register(
        "bit_length",
        SqlFunction::standard("bit_length"),
        Some(SqlType::Integer),
    );
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn type_names(&self) -> &TypeNames {
        &self.type_names
    }

    fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    fn identity_column_support(&self) -> &dyn IdentityColumnSupport {
        &self.identity
    }

    fn limit_handler(&self) -> &dyn LimitHandler {
        &NoopLimitHandler
    }

    fn unique_delegate(&self) -> &dyn UniqueDelegate {
        &DefaultUniqueDelegate
    }

    fn supports_sequences(&self) -> bool {
        true
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    fn create_sequence_string(&self, sequence: &str) -> Result<String> {
        Ok(format!("create sequence {sequence} start with 1 increment by 1"))
    }

    fn drop_sequence_string(&self, sequence: &str) -> Result<String> {
        Ok(format!("drop sequence {sequence}"))
    }
}
