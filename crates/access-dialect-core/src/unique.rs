//! Unique constraint DDL.
//!
//! Databases differ in where unique constraints may be declared: inline on
//! the column, as a table constraint, or only through `ALTER TABLE`. A
//! dialect's delegate decides which of these fragments is produced.

use crate::dialect::Quoter;
use crate::mapping::{Column, Table, UniqueKey};

/// Produces the DDL fragments and statements for unique constraints.
pub trait UniqueDelegate: Send + Sync {
    /// Fragment appended to a column definition for a unique column.
    fn column_definition_uniqueness_fragment(&self, column: &Column) -> String;

    /// Fragment appended inside `create table (...)` for the table's unique keys.
    fn table_creation_unique_constraints_fragment(&self, table: &Table, quoter: &Quoter<'_>)
        -> String;

    /// Statement that adds a unique key to an existing table, if supported.
    fn alter_table_to_add_unique_key_command(
        &self,
        key: &UniqueKey,
        table: &Table,
        quoter: &Quoter<'_>,
    ) -> Option<String>;

    /// Statement that drops a unique key, if supported.
    fn alter_table_to_drop_unique_key_command(
        &self,
        key: &UniqueKey,
        table: &Table,
        quoter: &Quoter<'_>,
    ) -> Option<String>;
}

/// Unique keys are added after table creation with `alter table`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultUniqueDelegate;

impl UniqueDelegate for DefaultUniqueDelegate {
    fn column_definition_uniqueness_fragment(&self, _column: &Column) -> String {
        String::new()
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
        key: &UniqueKey,
        table: &Table,
        quoter: &Quoter<'_>,
    ) -> Option<String> {
        Some(format!(
            "alter table {} add constraint {} unique ({})",
            quoter.ident(&table.name),
            quoter.ident(&key.name),
            quoter.list(&key.columns)
        ))
    }

    fn alter_table_to_drop_unique_key_command(
        &self,
        key: &UniqueKey,
        table: &Table,
        quoter: &Quoter<'_>,
    ) -> Option<String> {
        Some(format!(
            "alter table {} drop constraint {}",
            quoter.ident(&table.name),
            quoter.ident(&key.name)
        ))
    }
}
