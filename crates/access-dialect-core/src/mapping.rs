//! Table mapping model.
//!
//! This is the metadata a schema exporter works from: tables, their
//! columns, keys, indexes and foreign keys. It can be built with the fluent
//! builders below or loaded from JSON.
//!
//! # Example
//!
//! ```rust
//! use access_dialect_core::mapping::{TableBuilder, integer, varchar};
//!
//! let table = TableBuilder::new()
//!     .name("EVENTS")
//!     .column(integer("EVENT_ID").build())
//!     .column(varchar("title", 100).build())
//!     .identity_key("EVENT_ID")
//!     .build();
//!
//! assert_eq!(table.columns.len(), 2);
//! assert!(table.identity_column().is_some());
//! ```

use std::collections::HashSet;
use std::marker::PhantomData;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DialectError, Result};
use crate::types::{ColumnSize, SqlType};

/// Default value for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    /// NULL default.
    Null,
    /// Boolean default.
    Boolean(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// String default.
    String(String),
    /// Raw SQL expression (e.g., `Now()`).
    Expression(String),
}

impl DefaultValue {
    /// Returns the SQL representation of the default value.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Boolean(b) => {
                if *b {
                    String::from("TRUE")
                } else {
                    String::from("FALSE")
                }
            }
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Expression(expr) => expr.clone(),
        }
    }
}

const fn default_nullable() -> bool {
    true
}

/// A mapped column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Generic type code.
    pub sql_type: SqlType,
    /// Length for character and binary columns.
    #[serde(default)]
    pub length: Option<u32>,
    /// Precision for numeric columns.
    #[serde(default)]
    pub precision: Option<u32>,
    /// Scale for numeric columns.
    #[serde(default)]
    pub scale: Option<u32>,
    /// Whether the column accepts NULL.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Whether the column alone is unique.
    #[serde(default)]
    pub unique: bool,
    /// Default value.
    #[serde(default)]
    pub default: Option<DefaultValue>,
    /// Check constraint expression.
    #[serde(default)]
    pub check: Option<String>,
}

impl Column {
    /// Creates a nullable column with default size.
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            length: None,
            precision: None,
            scale: None,
            nullable: true,
            unique: false,
            default: None,
            check: None,
        }
    }

    /// The size used to resolve the column's type name.
    #[must_use]
    pub fn size(&self) -> ColumnSize {
        ColumnSize {
            length: self.length.unwrap_or(ColumnSize::DEFAULT_LENGTH),
            precision: self.precision.unwrap_or(ColumnSize::DEFAULT_PRECISION),
            scale: self.scale.unwrap_or(ColumnSize::DEFAULT_SCALE),
        }
    }
}

/// Fluent column builder.
#[derive(Debug, Clone)]
pub struct ColumnBuilder {
    column: Column,
}

impl ColumnBuilder {
    /// Creates a new column builder with name and type.
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            column: Column::new(name, sql_type),
        }
    }

    /// Sets the length.
    #[must_use]
    pub const fn length(mut self, length: u32) -> Self {
        self.column.length = Some(length);
        self
    }

    /// Sets precision and scale.
    #[must_use]
    pub const fn precision(mut self, precision: u32, scale: u32) -> Self {
        self.column.precision = Some(precision);
        self.column.scale = Some(scale);
        self
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.column.nullable = false;
        self
    }

    /// Marks the column as UNIQUE.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.column.unique = true;
        self
    }

    /// Sets a default value.
    #[must_use]
    pub fn default_value(mut self, value: DefaultValue) -> Self {
        self.column.default = Some(value);
        self
    }

    /// Sets a raw SQL expression as default.
    #[must_use]
    pub fn default_expr(self, expr: impl Into<String>) -> Self {
        self.default_value(DefaultValue::Expression(expr.into()))
    }

    /// Adds a CHECK constraint.
    #[must_use]
    pub fn check(mut self, expr: impl Into<String>) -> Self {
        self.column.check = Some(expr.into());
        self
    }

    /// Builds the column.
    #[must_use]
    pub fn build(self) -> Column {
        self.column
    }
}

/// Creates an INTEGER column builder.
#[must_use]
pub fn integer(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, SqlType::Integer)
}

/// Creates a BIGINT column builder.
#[must_use]
pub fn bigint(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, SqlType::BigInt)
}

/// Creates a SMALLINT column builder.
#[must_use]
pub fn smallint(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, SqlType::SmallInt)
}

/// Creates a DOUBLE column builder.
#[must_use]
pub fn double(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, SqlType::Double)
}

/// Creates a NUMERIC column builder.
#[must_use]
pub fn numeric(name: impl Into<String>, precision: u32, scale: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, SqlType::Numeric).precision(precision, scale)
}

/// Creates a CHAR column builder.
#[must_use]
pub fn char(name: impl Into<String>, len: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, SqlType::Char).length(len)
}

/// Creates a VARCHAR column builder.
#[must_use]
pub fn varchar(name: impl Into<String>, len: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, SqlType::Varchar).length(len)
}

/// Creates a CLOB column builder.
#[must_use]
pub fn clob(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, SqlType::Clob)
}

/// Creates a BLOB column builder.
#[must_use]
pub fn blob(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, SqlType::Blob)
}

/// Creates a VARBINARY column builder.
#[must_use]
pub fn varbinary(name: impl Into<String>, len: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, SqlType::Varbinary).length(len)
}

/// Creates a DATE column builder.
#[must_use]
pub fn date(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, SqlType::Date)
}

/// Creates a TIME column builder.
#[must_use]
pub fn time(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, SqlType::Time)
}

/// Creates a TIMESTAMP column builder.
#[must_use]
pub fn timestamp(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, SqlType::Timestamp)
}

/// Creates a BOOLEAN column builder.
#[must_use]
pub fn boolean(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, SqlType::Boolean)
}

/// How primary key values are produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum IdGeneration {
    /// The application assigns the key.
    #[default]
    Assigned,
    /// The database assigns the key on insert.
    Identity,
    /// The key is drawn from a named sequence.
    Sequence {
        /// Sequence name.
        name: String,
    },
}

/// Primary key of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKey {
    /// Key columns, in order.
    pub columns: Vec<String>,
    /// Key generation strategy.
    #[serde(default)]
    pub generation: IdGeneration,
}

/// A named unique key over one or more columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueKey {
    /// Constraint name.
    pub name: String,
    /// Key columns.
    pub columns: Vec<String>,
}

/// A named, non-unique index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Indexed columns.
    pub columns: Vec<String>,
}

/// A foreign key from this table to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Constraint name; generated from the table and columns when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Referencing columns.
    pub columns: Vec<String>,
    /// Referenced table.
    pub references_table: String,
    /// Referenced columns; the referenced primary key when empty.
    #[serde(default)]
    pub references_columns: Vec<String>,
}

impl ForeignKey {
    /// The constraint name, generated when not given.
    #[must_use]
    pub fn constraint_name(&self, table: &str) -> String {
        self.name.clone().unwrap_or_else(|| {
            let mut name = format!("FK_{table}");
            for column in &self.columns {
                name.push('_');
                name.push_str(column);
            }
            name.replace(' ', "_")
        })
    }
}

/// A mapped table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Columns, in declaration order.
    pub columns: Vec<Column>,
    /// Primary key.
    #[serde(default)]
    pub primary_key: Option<PrimaryKey>,
    /// Multi-column unique keys.
    #[serde(default)]
    pub unique_keys: Vec<UniqueKey>,
    /// Indexes.
    #[serde(default)]
    pub indexes: Vec<Index>,
    /// Foreign keys.
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the column whose value the database generates, if any.
    #[must_use]
    pub fn identity_column(&self) -> Option<&Column> {
        let pk = self.primary_key.as_ref()?;
        if pk.generation != IdGeneration::Identity {
            return None;
        }
        match pk.columns.as_slice() {
            [single] => self.column(single),
            _ => None,
        }
    }

    /// Returns true when the column is part of the primary key.
    #[must_use]
    pub fn is_primary_key_column(&self, name: &str) -> bool {
        self.primary_key
            .as_ref()
            .is_some_and(|pk| pk.columns.iter().any(|c| c == name))
    }

    /// Checks that every key, index and constraint refers to real columns.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(self.invalid(format!("column '{}' is declared twice", column.name)));
            }
        }

        if let Some(pk) = &self.primary_key {
            if pk.columns.is_empty() {
                return Err(self.invalid("primary key has no columns"));
            }
            self.check_columns(&pk.columns)?;
            if pk.generation == IdGeneration::Identity && pk.columns.len() != 1 {
                return Err(self.invalid("an identity key must have exactly one column"));
            }
        }

        for key in &self.unique_keys {
            self.check_columns(&key.columns)?;
        }
        for index in &self.indexes {
            self.check_columns(&index.columns)?;
        }
        for fk in &self.foreign_keys {
            self.check_columns(&fk.columns)?;
        }
        Ok(())
    }

    fn check_columns(&self, columns: &[String]) -> Result<()> {
        for name in columns {
            if self.column(name).is_none() {
                return Err(DialectError::UnknownColumn {
                    table: self.name.clone(),
                    column: name.clone(),
                });
            }
        }
        Ok(())
    }

    fn invalid(&self, message: impl Into<String>) -> DialectError {
        DialectError::InvalidMapping {
            table: self.name.clone(),
            message: message.into(),
        }
    }
}

/// A set of mapped tables, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    /// Mapped tables.
    pub tables: Vec<Table>,
}

impl Mapping {
    /// Creates a mapping from tables.
    #[must_use]
    pub const fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// Parses a mapping from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let mapping: Self = serde_json::from_str(json)?;
        mapping.validate()?;
        Ok(mapping)
    }

    /// Loads a mapping from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Validates every table and the references between them.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for table in &self.tables {
            if !names.insert(table.name.as_str()) {
                return Err(DialectError::DuplicateTable(table.name.clone()));
            }
            table.validate()?;
        }
        for table in &self.tables {
            for fk in &table.foreign_keys {
                let Some(target) = self.table(&fk.references_table) else {
                    return Err(DialectError::InvalidMapping {
                        table: table.name.clone(),
                        message: format!(
                            "foreign key references unmapped table '{}'",
                            fk.references_table
                        ),
                    });
                };
                target.check_columns(&fk.references_columns)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// TableBuilder
// =============================================================================

/// Marker: table has no name set.
#[derive(Debug, Clone, Copy)]
pub struct NoName;

/// Marker: table has a name set.
#[derive(Debug, Clone, Copy)]
pub struct HasName;

/// Marker: table has no columns.
#[derive(Debug, Clone, Copy)]
pub struct NoColumns;

/// Marker: table has at least one column.
#[derive(Debug, Clone, Copy)]
pub struct HasColumns;

/// Table builder; `build()` needs a name and at least one column.
#[derive(Debug, Clone)]
pub struct TableBuilder<Name, Cols> {
    name: Option<String>,
    columns: Vec<Column>,
    primary_key: Option<PrimaryKey>,
    unique_keys: Vec<UniqueKey>,
    indexes: Vec<Index>,
    foreign_keys: Vec<ForeignKey>,
    _state: PhantomData<(Name, Cols)>,
}

impl Default for TableBuilder<NoName, NoColumns> {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder<NoName, NoColumns> {
    /// Creates a new `TableBuilder`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            columns: Vec::new(),
            primary_key: None,
            unique_keys: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
            _state: PhantomData,
        }
    }
}

impl<Cols> TableBuilder<NoName, Cols> {
    /// Sets the table name.
    #[must_use]
    pub fn name(self, name: impl Into<String>) -> TableBuilder<HasName, Cols> {
        TableBuilder {
            name: Some(name.into()),
            columns: self.columns,
            primary_key: self.primary_key,
            unique_keys: self.unique_keys,
            indexes: self.indexes,
            foreign_keys: self.foreign_keys,
            _state: PhantomData,
        }
    }
}

impl<Name> TableBuilder<Name, NoColumns> {
    /// Adds the first column to the table.
    #[must_use]
    pub fn column(self, column: Column) -> TableBuilder<Name, HasColumns> {
        TableBuilder {
            name: self.name,
            columns: vec![column],
            primary_key: self.primary_key,
            unique_keys: self.unique_keys,
            indexes: self.indexes,
            foreign_keys: self.foreign_keys,
            _state: PhantomData,
        }
    }
}

impl<Name> TableBuilder<Name, HasColumns> {
    /// Adds another column to the table.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }
}

impl<Name, Cols> TableBuilder<Name, Cols> {
    /// Sets an application-assigned primary key.
    #[must_use]
    pub fn primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = Some(PrimaryKey {
            columns: columns.iter().map(|c| String::from(*c)).collect(),
            generation: IdGeneration::Assigned,
        });
        self
    }

    /// Sets a single-column primary key generated by the database.
    #[must_use]
    pub fn identity_key(mut self, column: &str) -> Self {
        self.primary_key = Some(PrimaryKey {
            columns: vec![String::from(column)],
            generation: IdGeneration::Identity,
        });
        self
    }

    /// Sets a single-column primary key drawn from a sequence.
    #[must_use]
    pub fn sequence_key(mut self, column: &str, sequence: &str) -> Self {
        self.primary_key = Some(PrimaryKey {
            columns: vec![String::from(column)],
            generation: IdGeneration::Sequence {
                name: String::from(sequence),
            },
        });
        self
    }

    /// Adds a named unique key.
    #[must_use]
    pub fn unique_key(mut self, name: &str, columns: &[&str]) -> Self {
        self.unique_keys.push(UniqueKey {
            name: String::from(name),
            columns: columns.iter().map(|c| String::from(*c)).collect(),
        });
        self
    }

    /// Adds a named index.
    #[must_use]
    pub fn index(mut self, name: &str, columns: &[&str]) -> Self {
        self.indexes.push(Index {
            name: String::from(name),
            columns: columns.iter().map(|c| String::from(*c)).collect(),
        });
        self
    }

    /// Adds a foreign key referencing another table's columns.
    #[must_use]
    pub fn foreign_key(
        mut self,
        name: Option<&str>,
        columns: &[&str],
        references_table: &str,
        references_columns: &[&str],
    ) -> Self {
        self.foreign_keys.push(ForeignKey {
            name: name.map(String::from),
            columns: columns.iter().map(|c| String::from(*c)).collect(),
            references_table: String::from(references_table),
            references_columns: references_columns.iter().map(|c| String::from(*c)).collect(),
        });
        self
    }
}

impl TableBuilder<HasName, HasColumns> {
    /// Builds the table.
    #[must_use]
    pub fn build(self) -> Table {
        Table {
            name: self.name.unwrap_or_default(),
            columns: self.columns,
            primary_key: self.primary_key,
            unique_keys: self.unique_keys,
            indexes: self.indexes,
            foreign_keys: self.foreign_keys,
        }
    }
}
