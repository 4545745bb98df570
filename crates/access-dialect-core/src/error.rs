//! Error types for dialect translation and schema export.

use std::path::PathBuf;

use crate::types::SqlType;

/// Errors raised while translating framework hooks into dialect SQL.
#[derive(Debug, thiserror::Error)]
pub enum DialectError {
    /// No column type name is registered for a type code.
    #[error("No type mapping for {code:?} in dialect '{dialect}'")]
    NoTypeMapping {
        /// The dialect that was asked.
        dialect: String,
        /// The unmapped type code.
        code: SqlType,
    },

    /// A function was rendered that the dialect does not register.
    #[error("Function '{0}' is not registered in this dialect")]
    UnknownFunction(String),

    /// A function was called with the wrong number of arguments.
    #[error("Function '{name}' expects {expected} argument(s), got {actual}")]
    FunctionArity {
        /// Function name.
        name: String,
        /// Number of arguments the function refers to.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },

    /// The dialect cannot generate identity (autonumber) keys.
    #[error("Dialect '{0}' does not support identity key generation")]
    IdentityNotSupported(String),

    /// The dialect has no sequences.
    #[error("Dialect '{dialect}' does not support sequences (requested '{sequence}')")]
    SequencesNotSupported {
        /// The dialect in use.
        dialect: String,
        /// The requested sequence name.
        sequence: String,
    },

    /// A key, index or constraint refers to a column that the table lacks.
    #[error("Table '{table}' has no column '{column}'")]
    UnknownColumn {
        /// Table name.
        table: String,
        /// Missing column name.
        column: String,
    },

    /// Two tables in a mapping share a name.
    #[error("Table '{0}' is mapped more than once")]
    DuplicateTable(String),

    /// A mapping is structurally invalid.
    #[error("Invalid mapping for table '{table}': {message}")]
    InvalidMapping {
        /// Table name.
        table: String,
        /// What is wrong.
        message: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration in {path}: {message}")]
    Config {
        /// Configuration file.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// IO error (reading mapping or settings files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
