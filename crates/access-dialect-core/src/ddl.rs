//! Schema export: DDL generation from a [`Mapping`].
//!
//! Every dialect-specific decision is delegated to the [`Dialect`]: type
//! names, identity columns, unique constraints, sequences and quoting.

use tracing::{debug, info, warn};

use crate::dialect::{Dialect, Quoter};
use crate::error::{DialectError, Result};
use crate::mapping::{Column, DefaultValue, ForeignKey, IdGeneration, Mapping, Table, UniqueKey};
use crate::settings::{Hbm2Ddl, Settings};

/// Generates DDL statements for a dialect.
pub struct SchemaExporter<'a> {
    dialect: &'a dyn Dialect,
    settings: &'a Settings,
}

impl<'a> SchemaExporter<'a> {
    /// Creates an exporter.
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect, settings: &'a Settings) -> Self {
        Self { dialect, settings }
    }

    fn quoter(&self) -> Quoter<'a> {
        Quoter::new(self.dialect, self.settings.globally_quoted_identifiers)
    }

    fn emit(&self, sql: String) -> String {
        if self.settings.show_sql {
            info!(dialect = self.dialect.name(), "{sql}");
        } else {
            debug!(dialect = self.dialect.name(), sql = %sql, "Generated DDL");
        }
        sql
    }

    /// Generates the statements for the configured [`Hbm2Ddl`] action.
    pub fn export(&self, mapping: &Mapping) -> Result<Vec<String>> {
        let action = self.settings.hbm2ddl_auto;
        let mut statements = Vec::new();
        if action.drops() {
            statements.extend(self.drop_statements(mapping)?);
        }
        if action.creates() {
            statements.extend(self.create_statements(mapping)?);
        }
        if action == Hbm2Ddl::None {
            debug!("Schema export disabled");
        }
        Ok(statements)
    }

    /// Generates every statement needed to create the mapped schema.
    pub fn create_statements(&self, mapping: &Mapping) -> Result<Vec<String>> {
        mapping.validate()?;
        let mut statements = Vec::new();
        for table in &mapping.tables {
            statements.extend(self.create_sequences(table)?);
            statements.push(self.create_table(table)?);
        }
        for table in &mapping.tables {
            statements.extend(self.create_unique_keys(table));
            statements.extend(self.create_indexes(table));
        }
        for table in &mapping.tables {
            statements.extend(self.create_foreign_keys(table, mapping));
        }
        Ok(statements)
    }

    /// Generates the statements that drop the mapped schema.
    ///
    /// Foreign keys are dropped first, then tables in reverse order.
    pub fn drop_statements(&self, mapping: &Mapping) -> Result<Vec<String>> {
        mapping.validate()?;
        let q = self.quoter();
        let mut statements = Vec::new();
        for table in &mapping.tables {
            for fk in &table.foreign_keys {
                statements.push(self.emit(format!(
                    "alter table {} drop constraint {}",
                    q.ident(&table.name),
                    q.ident(&fk.constraint_name(&table.name))
                )));
            }
        }
        for table in mapping.tables.iter().rev() {
            statements.push(self.emit(format!("drop table {}", q.ident(&table.name))));
            if let Some(sequence) = sequence_name(table) {
                if self.dialect.supports_sequences() {
                    statements.push(self.emit(self.dialect.drop_sequence_string(sequence)?));
                }
            }
        }
        Ok(statements)
    }

    /// Generates `create table` for one table.
    pub fn create_table(&self, table: &Table) -> Result<String> {
        table.validate()?;
        let q = self.quoter();
        let mut parts = Vec::with_capacity(table.columns.len() + 1);
        for column in &table.columns {
            parts.push(self.column_definition(table, column)?);
        }
        if let Some(pk) = &table.primary_key {
            parts.push(format!("primary key ({})", q.list(&pk.columns)));
        }

        let mut sql = format!("create table {} (", q.ident(&table.name));
        sql.push_str(&parts.join(", "));
        sql.push_str(
            &self
                .dialect
                .unique_delegate()
                .table_creation_unique_constraints_fragment(table, &q),
        );
        sql.push(')');
        Ok(self.emit(sql))
    }

    /// Generates one column definition.
    pub fn column_definition(&self, table: &Table, column: &Column) -> Result<String> {
        let q = self.quoter();
        let mut sql = q.ident(&column.name);
        sql.push(' ');

        let is_identity = table
            .identity_column()
            .is_some_and(|c| c.name == column.name);
        if is_identity {
            let identity = self.dialect.identity_column_support();
            if !identity.supports_identity_columns() {
                return Err(DialectError::IdentityNotSupported(
                    self.dialect.name().to_string(),
                ));
            }
            if identity.has_data_type_in_identity_column() {
                sql.push_str(&self.dialect.type_name(column.sql_type, column.size())?);
                sql.push(' ');
            }
            sql.push_str(&identity.identity_column_string(column.sql_type)?);
        } else {
            sql.push_str(&self.dialect.type_name(column.sql_type, column.size())?);
            if let Some(default) = &column.default {
                sql.push_str(" default ");
                match default {
                    DefaultValue::Boolean(value) => {
                        sql.push_str(self.dialect.boolean_literal(*value));
                    }
                    other => sql.push_str(&other.to_sql()),
                }
            }
            if !column.nullable || table.is_primary_key_column(&column.name) {
                sql.push_str(" not null");
            }
        }

        if column.unique && !table.is_primary_key_column(&column.name) {
            sql.push_str(
                &self
                    .dialect
                    .unique_delegate()
                    .column_definition_uniqueness_fragment(column),
            );
        }

        if let Some(check) = &column.check {
            sql.push_str(&format!(" check ({check})"));
        }
        Ok(sql)
    }

    /// Generates `create sequence` when the table's key is drawn from one.
    pub fn create_sequences(&self, table: &Table) -> Result<Vec<String>> {
        let Some(sequence) = sequence_name(table) else {
            return Ok(Vec::new());
        };
        if !self.dialect.supports_sequences() {
            return Err(self.dialect.sequences_not_supported(sequence));
        }
        Ok(vec![self.emit(self.dialect.create_sequence_string(sequence)?)])
    }

    /// Generates `create index` for each index of the table.
    #[must_use]
    pub fn create_indexes(&self, table: &Table) -> Vec<String> {
        let q = self.quoter();
        table
            .indexes
            .iter()
            .map(|index| {
                self.emit(format!(
                    "create index {} on {} ({})",
                    q.ident(&index.name),
                    q.ident(&table.name),
                    q.list(&index.columns)
                ))
            })
            .collect()
    }

    /// Generates the statements adding the table's unique keys.
    ///
    /// Unique columns the delegate does not declare inline become single
    /// column keys named `UK_{table}_{column}`. Keys the dialect cannot add
    /// after creation are skipped.
    #[must_use]
    pub fn create_unique_keys(&self, table: &Table) -> Vec<String> {
        let q = self.quoter();
        let delegate = self.dialect.unique_delegate();
        let column_keys = table
            .columns
            .iter()
            .filter(|c| c.unique && !table.is_primary_key_column(&c.name))
            .filter(|c| delegate.column_definition_uniqueness_fragment(c).is_empty())
            .map(|c| UniqueKey {
                name: format!("UK_{}_{}", table.name, c.name).replace(' ', "_"),
                columns: vec![c.name.clone()],
            });
        let keys: Vec<UniqueKey> = column_keys.chain(table.unique_keys.iter().cloned()).collect();

        let mut statements = Vec::new();
        for key in &keys {
            match delegate.alter_table_to_add_unique_key_command(key, table, &q) {
                Some(sql) => statements.push(self.emit(sql)),
                None => warn!(
                    dialect = self.dialect.name(),
                    table = %table.name,
                    key = %key.name,
                    "Unique key cannot be added by this dialect; skipped"
                ),
            }
        }
        statements
    }

    /// Generates `alter table ... add constraint ... foreign key` statements.
    #[must_use]
    pub fn create_foreign_keys(&self, table: &Table, mapping: &Mapping) -> Vec<String> {
        let q = self.quoter();
        table
            .foreign_keys
            .iter()
            .map(|fk| {
                let mut sql = format!(
                    "alter table {} add constraint {} foreign key ({}) references {}",
                    q.ident(&table.name),
                    q.ident(&fk.constraint_name(&table.name)),
                    q.list(&fk.columns),
                    q.ident(&fk.references_table)
                );
                let referenced = referenced_columns(fk, mapping);
                if !referenced.is_empty() {
                    sql.push_str(&format!(" ({})", q.list(&referenced)));
                }
                self.emit(sql)
            })
            .collect()
    }
}

fn sequence_name(table: &Table) -> Option<&str> {
    match &table.primary_key.as_ref()?.generation {
        IdGeneration::Sequence { name } => Some(name),
        IdGeneration::Assigned | IdGeneration::Identity => None,
    }
}

fn referenced_columns(fk: &ForeignKey, mapping: &Mapping) -> Vec<String> {
    if !fk.references_columns.is_empty() {
        return fk.references_columns.clone();
    }
    mapping
        .table(&fk.references_table)
        .and_then(|t| t.primary_key.as_ref())
        .map(|pk| pk.columns.clone())
        .unwrap_or_default()
}
