//! SQL Dialect support.
//!
//! Different databases have slightly different SQL syntax. A [`Dialect`]
//! bundles everything the schema exporter and query builder need to know
//! about one database: column type names, functions, identity columns,
//! pagination, unique constraints, sequences and identifier quoting.

mod generic;
mod sqlserver;

pub use generic::{register_standard_functions, GenericDialect};
pub use sqlserver::{SqlServerDialect, SqlServerIdentityColumnSupport};

use crate::error::{DialectError, Result};
use crate::function::FunctionRegistry;
use crate::identity::IdentityColumnSupport;
use crate::limit::LimitHandler;
use crate::types::{ColumnSize, SqlType, TypeNames};
use crate::unique::UniqueDelegate;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Column type names.
    fn type_names(&self) -> &TypeNames;

    /// Registered functions.
    fn functions(&self) -> &FunctionRegistry;

    /// Identity column support.
    fn identity_column_support(&self) -> &dyn IdentityColumnSupport;

    /// Pagination support.
    fn limit_handler(&self) -> &dyn LimitHandler;

    /// Unique constraint DDL.
    fn unique_delegate(&self) -> &dyn UniqueDelegate;

    /// Returns whether the dialect has sequences.
    fn supports_sequences(&self) -> bool {
        false
    }

    /// Statement that creates a sequence.
    fn create_sequence_string(&self, sequence: &str) -> Result<String> {
        Err(self.sequences_not_supported(sequence))
    }

    /// Statement that drops a sequence.
    fn drop_sequence_string(&self, sequence: &str) -> Result<String> {
        Err(self.sequences_not_supported(sequence))
    }

    /// The error reported when a sequence is requested.
    fn sequences_not_supported(&self, sequence: &str) -> DialectError {
        DialectError::SequencesNotSupported {
            dialect: self.name().to_string(),
            sequence: sequence.to_string(),
        }
    }

    /// Opening identifier quote.
    fn open_quote(&self) -> char {
        '"'
    }

    /// Closing identifier quote.
    fn close_quote(&self) -> char {
        '"'
    }

    /// Quotes an identifier, doubling any embedded closing quote.
    fn quote_identifier(&self, name: &str) -> String {
        let close = self.close_quote();
        let escaped = name.replace(close, &format!("{close}{close}"));
        format!("{}{escaped}{close}", self.open_quote())
    }

    /// Literal for a boolean value in DDL defaults.
    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    /// Resolves the column type name for a type code.
    fn type_name(&self, code: SqlType, size: ColumnSize) -> Result<String> {
        self.type_names().get(code, size)
    }

    /// Renders a call to a registered function.
    fn render_function(&self, name: &str, args: &[String]) -> Result<String> {
        self.functions().render(name, args)
    }
}

/// The registries of a dialect, handed to a dialect that extends it.
#[derive(Debug, Clone)]
pub struct DialectParts {
    /// Column type names.
    pub type_names: TypeNames,
    /// Registered functions.
    pub functions: FunctionRegistry,
}

/// Quotes identifiers for a dialect.
///
/// With global quoting every identifier is quoted; otherwise only names
/// that are not plain identifiers (such as `EVENT DATE`) are.
#[derive(Clone, Copy)]
pub struct Quoter<'a> {
    dialect: &'a dyn Dialect,
    global: bool,
}

impl<'a> Quoter<'a> {
    /// Creates a quoter.
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect, global: bool) -> Self {
        Self { dialect, global }
    }

    /// The dialect quoting is done for.
    #[must_use]
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Renders one identifier.
    #[must_use]
    pub fn ident(&self, name: &str) -> String {
        if self.global || !is_plain_identifier(name) {
            self.dialect.quote_identifier(name)
        } else {
            name.to_string()
        }
    }

    /// Renders a comma-separated identifier list.
    #[must_use]
    pub fn list(&self, names: &[String]) -> String {
        names
            .iter()
            .map(|n| self.ident(n))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
