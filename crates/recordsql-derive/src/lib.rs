//! Derive macros for recordsql
//!
//! Provides `#[derive(Record)]`, which implements `recordsql::FieldIntrospector`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod common;
mod record;
mod sql_ident;

/// Derive `FieldIntrospector` for a struct with named fields.
///
/// # Example
///
/// ```ignore
/// use recordsql::Record;
///
/// #[derive(Record)]
/// #[orm(table = "people", rename_all = "PascalCase")]
/// struct Person {
///     id: i32,
///     name: String,
///     #[orm(always_insert)]
///     age: i32,
///     #[orm(enum)]
///     status: Status,
///     #[orm(column = "Mail")]
///     email: Option<String>,
///     #[orm(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// # Attributes
///
/// Struct level:
/// - `#[orm(table = "name")]` - Default table name (otherwise the struct name)
/// - `#[orm(rename_all = "...")]` - Column casing: `PascalCase`, `camelCase`,
///   `snake_case` or `SCREAMING_SNAKE_CASE` (otherwise the field name verbatim)
///
/// Field level:
/// - `#[orm(always_insert)]` - Include in INSERT even when the value looks empty
/// - `#[orm(always_update)]` - Include in UPDATE even when the value looks empty
/// - `#[orm(always_save)]` - Both of the above
/// - `#[orm(enum)]` - Fieldless `Clone` enum (or `Option` of one), stored as its `i32` discriminant
/// - `#[orm(column = "name")]` - Map field to a different column name
/// - `#[orm(skip)]` - Not a column; never described
///
/// Every other field type must implement `recordsql::ToFieldValue`.
#[proc_macro_derive(Record, attributes(orm))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
