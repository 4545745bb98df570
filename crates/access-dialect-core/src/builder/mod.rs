//! SQL statement builders.
//!
//! Builders use the typestate pattern, so incomplete statements do not
//! compile. Everything dialect-specific (function spelling, pagination,
//! identity read-back) is resolved through a [`Dialect`](crate::dialect::Dialect)
//! when the statement is built.
//!
//! # Example
//!
//! ```rust
//! use access_dialect_core::builder::{col, Select};
//! use access_dialect_core::dialect::SqlServerDialect;
//! use access_dialect_core::limit::RowSelection;
//!
//! let dialect = SqlServerDialect::new();
//! let paged = Select::new()
//!     .columns(&["EVENT_ID", "title"])
//!     .from("EVENTS")
//!     .where_clause(col("title").like("event%"))
//!     .build_for(&dialect, &RowSelection::new().max_rows(10));
//!
//! assert_eq!(paged.sql, "SELECT top 10 EVENT_ID, title FROM EVENTS WHERE title LIKE ?");
//! ```

mod delete;
mod expr;
mod insert;
mod select;
mod update;
pub mod value;

pub use delete::{Delete, SafeDelete, SafeDeleteWithWhere};
pub use expr::{col, func, Column, ExprBuilder};
pub use insert::{IdentityInsert, Insert};
pub use select::{PagedQuery, Select};
pub use update::Update;
pub use value::{SqlValue, ToSqlValue};
