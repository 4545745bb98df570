//! Generic column type codes and the per-dialect type-name registry.
//!
//! Type codes mirror the JDBC `java.sql.Types` constants that ORM
//! frameworks speak in. A dialect registers a name template for each code
//! it supports, optionally bounded by a capacity so that short and long
//! columns of the same code can map to different database types.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DialectError, Result};

/// Generic SQL type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlType {
    /// Single bit.
    Bit,
    /// 1-byte integer.
    TinyInt,
    /// 2-byte integer.
    SmallInt,
    /// 4-byte integer.
    Integer,
    /// 8-byte integer.
    BigInt,
    /// Floating point (driver-chosen precision).
    Float,
    /// Single precision floating point.
    Real,
    /// Double precision floating point.
    Double,
    /// Exact numeric with precision and scale.
    Numeric,
    /// Exact decimal with precision and scale.
    Decimal,
    /// Fixed-length character string.
    Char,
    /// Variable-length character string.
    Varchar,
    /// Long character string.
    LongVarchar,
    /// Date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    Timestamp,
    /// Fixed-length binary.
    Binary,
    /// Variable-length binary.
    Varbinary,
    /// Long binary.
    LongVarbinary,
    /// Binary large object.
    Blob,
    /// Character large object.
    Clob,
    /// Boolean.
    Boolean,
}

impl SqlType {
    /// Every type code, in declaration order.
    pub const ALL: [Self; 22] = [
        Self::Bit,
        Self::TinyInt,
        Self::SmallInt,
        Self::Integer,
        Self::BigInt,
        Self::Float,
        Self::Real,
        Self::Double,
        Self::Numeric,
        Self::Decimal,
        Self::Char,
        Self::Varchar,
        Self::LongVarchar,
        Self::Date,
        Self::Time,
        Self::Timestamp,
        Self::Binary,
        Self::Varbinary,
        Self::LongVarbinary,
        Self::Blob,
        Self::Clob,
        Self::Boolean,
    ];
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Length, precision and scale requested for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSize {
    /// Character or byte length.
    pub length: u32,
    /// Total number of digits.
    pub precision: u32,
    /// Digits after the decimal point.
    pub scale: u32,
}

impl ColumnSize {
    /// Default length of character and binary columns.
    pub const DEFAULT_LENGTH: u32 = 255;
    /// Default precision of numeric columns.
    pub const DEFAULT_PRECISION: u32 = 19;
    /// Default scale of numeric columns.
    pub const DEFAULT_SCALE: u32 = 2;

    /// Creates a size with an explicit length and default precision/scale.
    #[must_use]
    pub const fn with_length(length: u32) -> Self {
        Self {
            length,
            precision: Self::DEFAULT_PRECISION,
            scale: Self::DEFAULT_SCALE,
        }
    }

    /// Creates a size with explicit precision and scale.
    #[must_use]
    pub const fn with_precision(precision: u32, scale: u32) -> Self {
        Self {
            length: Self::DEFAULT_LENGTH,
            precision,
            scale,
        }
    }
}

impl Default for ColumnSize {
    fn default() -> Self {
        Self {
            length: Self::DEFAULT_LENGTH,
            precision: Self::DEFAULT_PRECISION,
            scale: Self::DEFAULT_SCALE,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Entry {
    default: Option<String>,
    bounded: BTreeMap<u32, String>,
}

/// Registry of column type names for a dialect.
///
/// Templates may contain `$l` (length), `$p` (precision) and `$s` (scale).
#[derive(Debug, Clone, Default)]
pub struct TypeNames {
    dialect: String,
    entries: HashMap<SqlType, Entry>,
}

impl TypeNames {
    /// Creates an empty registry owned by the named dialect.
    #[must_use]
    pub fn new(dialect: impl Into<String>) -> Self {
        Self {
            dialect: dialect.into(),
            entries: HashMap::new(),
        }
    }

    /// Renames the owning dialect (used when a dialect adopts its base's registry).
    pub fn set_dialect(&mut self, dialect: impl Into<String>) {
        self.dialect = dialect.into();
    }

    /// Registers the default template for a type code, replacing any earlier one.
    pub fn register(&mut self, code: SqlType, template: impl Into<String>) {
        self.entries.entry(code).or_default().default = Some(template.into());
    }

    /// Registers a template used for lengths up to and including `capacity`.
    pub fn register_with_capacity(
        &mut self,
        code: SqlType,
        capacity: u32,
        template: impl Into<String>,
    ) {
        self.entries
            .entry(code)
            .or_default()
            .bounded
            .insert(capacity, template.into());
    }

    /// Returns true when any template is registered for the code.
    #[must_use]
    pub fn contains(&self, code: SqlType) -> bool {
        self.entries.contains_key(&code)
    }

    /// Returns the default template for a code, unexpanded.
    #[must_use]
    pub fn default_template(&self, code: SqlType) -> Option<&str> {
        self.entries.get(&code)?.default.as_deref()
    }

    /// Resolves the type name for a code and column size.
    ///
    /// The smallest capacity-bounded template that fits the length wins;
    /// otherwise the default template is used.
    pub fn get(&self, code: SqlType, size: ColumnSize) -> Result<String> {
        let entry = self
            .entries
            .get(&code)
            .ok_or_else(|| self.missing(code))?;
        let template = entry
            .bounded
            .range(size.length..)
            .next()
            .map(|(_, t)| t)
            .or(entry.default.as_ref())
            .ok_or_else(|| self.missing(code))?;
        Ok(expand(template, size))
    }

    fn missing(&self, code: SqlType) -> DialectError {
        DialectError::NoTypeMapping {
            dialect: self.dialect.clone(),
            code,
        }
    }
}

fn expand(template: &str, size: ColumnSize) -> String {
    template
        .replace("$l", &size.length.to_string())
        .replace("$p", &size.precision.to_string())
        .replace("$s", &size.scale.to_string())
}
