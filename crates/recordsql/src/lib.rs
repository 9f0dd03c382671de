//! # recordsql
//!
//! Generate parameterized INSERT and UPDATE statements from a record's fields.
//!
//! ## Features
//!
//! - **Field-driven**: columns come from the record's fields, in declaration order
//! - **Named parameters**: every value is an `@Field` placeholder, never inlined
//! - **Empty-value suppression**: nulls, zeros, empty strings and default dates are left out
//! - **Always-include markers**: `always_insert` / `always_update` keep a field regardless of value
//! - **No-op signalling**: a record with nothing to write produces an empty statement
//!
//! ## Example
//!
//! ```ignore
//! use recordsql::prelude::*;
//!
//! #[derive(Record)]
//! #[orm(rename_all = "PascalCase")]
//! struct Person {
//!     id: i32,
//!     name: String,
//!     #[orm(always_insert)]
//!     age: i32,
//!     created_at: chrono::NaiveDateTime,
//! }
//!
//! let sql = build_insert(&person, "", true, &["Id"]);
//! // INSERT INTO Person (Name, Age) VALUES (@Name, @Age); SELECT CAST(SCOPE_IDENTITY() as int)
//!
//! let sql = build_update(&person, "", "Id", &["Id"]);
//! // UPDATE Person SET Name = @Name WHERE Id = @Id
//! ```

pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod filter;
pub mod prelude;
pub mod record;
pub mod value;

pub use builder::{
    DEFAULT_ID_COLUMN, InsertSql, Statement, StatementKind, UpdateSql, build_insert, build_update,
};
pub use classify::{DbTypeTag, DeclaredType, classify};
pub use config::{GeneratorConfig, SCOPE_IDENTITY_SELECT};
pub use error::{GenError, GenResult};
pub use filter::{Exclusion, FieldDecision, Suppression, decide, should_skip};
pub use record::{DynamicRecord, FieldDescriptor, FieldIntrospector};
pub use value::{FieldValue, ToFieldValue};

#[cfg(feature = "derive")]
pub use recordsql_derive::Record;
