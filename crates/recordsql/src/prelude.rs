//! Convenient imports for typical `recordsql` usage.
//!
//! ```ignore
//! use recordsql::prelude::*;
//! ```

pub use crate::{
    DynamicRecord, FieldDescriptor, FieldIntrospector, GenError, GenResult, GeneratorConfig,
    InsertSql, Statement, ToFieldValue, UpdateSql, build_insert, build_update,
};

#[cfg(feature = "derive")]
pub use crate::Record;
