//! # access-dialect
//!
//! Microsoft Access (`.accdb`/`.mdb`) dialect for `access-dialect-core`,
//! targeting the SQL accepted by the UCanAccess JDBC driver.
//!
//! # How Access differs from SQL Server
//!
//! [`AccessDialect`] is built on the SQL Server dialect and only overrides
//! what Access spells differently:
//!
//! - **Column types**: integers are `LONG`, character large objects are
//!   `MEMO`. Everything else keeps the SQL Server name.
//! - **Date functions**: `current_date`, `current_time` and
//!   `current_timestamp` are `Date()`, `Time()` and `Now()`; `second`,
//!   `minute` and `hour` are `Second(x)`, `Minute(x)` and `Hour(x)`.
//! - **Autonumber keys**: an identity column is declared as `COUNTER`
//!   with no data type, and the generated key is read back with a separate
//!   `SELECT @@IDENTITY`.
//! - **Pagination**: UCanAccess accepts `limit n offset m` after the
//!   statement instead of `TOP`.
//! - **Unique constraints**: only inline on the column (` UNIQUE`); unique
//!   keys cannot be added with `ALTER TABLE`.
//! - **Sequences**: none.
//! - **Identifier quoting**: square brackets, as in SQL Server.
//!
//! ## Example
//!
//! ```rust
//! use access_dialect::AccessDialect;
//! use access_dialect_core::builder::{col, func, Select};
//! use access_dialect_core::limit::RowSelection;
//!
//! let dialect = AccessDialect::new();
//! let hour = func(&dialect, "hour", vec![col("[EVENT DATE]").into()]).unwrap();
//! let paged = Select::new()
//!     .columns(&[hour.sql()])
//!     .from("EVENTS")
//!     .build_for(&dialect, &RowSelection::new().first_row(1).max_rows(1));
//!
//! assert_eq!(paged.sql, "SELECT Hour([EVENT DATE]) FROM EVENTS limit 1 offset 1");
//! ```

mod dialect;

pub use dialect::{
    AccessDialect, AccessIdentityColumnSupport, AccessLimitHandler, AccessUniqueDelegate,
};
