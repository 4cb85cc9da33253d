//! # crdb-sql
//!
//! SQL fragment helpers for CockroachDB/PostgreSQL clients.
//!
//! This crate provides:
//! - Column lists, optionally table-qualified
//! - Untyped SQL values for positional parameters
//! - A partial UPDATE builder that only touches changed fields
//!
//! ## Partial updates
//!
//! ```rust
//! use crdb_sql::{BoolUpdate, StringUpdate, UpdateSet};
//!
//! let name = StringUpdate::set(String::from("bolt"));
//! let discontinued = BoolUpdate::unchanged();
//!
//! let (sql, args) = UpdateSet::new()
//!     .with("name", &name)
//!     .with("discontinued", &discontinued)
//!     .build("items", "id", 12_i64)
//!     .expect("name is updating");
//!
//! assert_eq!(sql, "UPDATE items SET name = $1 WHERE id = $2");
//! assert_eq!(args.len(), 2);
//! ```

pub mod columns;
pub mod update;
pub mod value;

pub use columns::{column_list, qualified_column_list};
pub use update::{
    append_update, BoolUpdate, FieldUpdate, Float64Update, Int64Update, StringUpdate, Updatable,
    UpdateSet,
};
pub use value::{SqlValue, ToSqlValue};
