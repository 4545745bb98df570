//! # access-dialect-core
//!
//! The dialect-neutral side of SQL generation: the hooks a database
//! dialect plugs into, and the schema exporter and statement builders that
//! call them.
//!
//! This crate provides:
//! - [`types`]: generic type codes and the per-dialect type name registry
//! - [`function`]: the per-dialect function registry
//! - [`identity`], [`limit`], [`unique`]: the extension points for
//!   identity columns, pagination and unique constraints
//! - [`dialect`]: the [`Dialect`] trait with generic and SQL Server
//!   implementations
//! - [`mapping`] and [`ddl`]: table metadata and DDL generation from it
//! - [`builder`]: typestate statement builders
//! - [`settings`]: generation settings loaded from JSON
//!
//! ## Schema export
//!
//! ```rust
//! use access_dialect_core::ddl::SchemaExporter;
//! use access_dialect_core::dialect::SqlServerDialect;
//! use access_dialect_core::mapping::{integer, varchar, TableBuilder};
//! use access_dialect_core::settings::Settings;
//!
//! let table = TableBuilder::new()
//!     .name("EVENTS")
//!     .column(integer("EVENT_ID").build())
//!     .column(varchar("title", 100).build())
//!     .identity_key("EVENT_ID")
//!     .build();
//!
//! let dialect = SqlServerDialect::new();
//! let settings = Settings::default();
//! let sql = SchemaExporter::new(&dialect, &settings).create_table(&table).unwrap();
//! assert_eq!(
//!     sql,
//!     "create table EVENTS (EVENT_ID int identity not null, title varchar(100), \
//!      primary key (EVENT_ID))"
//! );
//! ```

pub mod builder;
pub mod ddl;
pub mod dialect;
pub mod error;
pub mod function;
pub mod identity;
pub mod limit;
pub mod mapping;
pub mod settings;
pub mod types;
pub mod unique;

pub use dialect::{Dialect, GenericDialect, Quoter, SqlServerDialect};
pub use error::{DialectError, Result};
pub use limit::RowSelection;
pub use types::{ColumnSize, SqlType};
