//! INSERT/UPDATE statement builders driven by record introspection.
//!
//! Both builders walk the record's fields in declaration order, run each one
//! through [`filter::decide`](crate::filter::decide), and emit named `@field`
//! placeholders for the survivors. A record with no surviving field produces an
//! empty statement, which callers treat as a no-op.
//!
//! # Usage
//!
//! ```ignore
//! use recordsql::{InsertSql, UpdateSql};
//!
//! let sql = InsertSql::new(&person).identity_select(false).to_sql();
//! // INSERT INTO Person (Name) VALUES (@Name)
//!
//! let sql = UpdateSql::new(&person).table("people").id_column("PersonId").to_sql();
//! // UPDATE people SET Name = @Name WHERE PersonId = @PersonId
//! ```

mod insert;
mod statement;
mod update;

pub use insert::InsertSql;
pub use statement::Statement;
pub use update::{DEFAULT_ID_COLUMN, UpdateSql};

use crate::config::GeneratorConfig;
use crate::error::{GenError, GenResult};
use crate::filter;
use crate::record::{FieldDescriptor, FieldIntrospector};

/// Which statement is being generated; selects the always-include marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Insert,
    Update,
}

impl StatementKind {
    fn always_include(self, field: &FieldDescriptor) -> bool {
        match self {
            Self::Insert => field.always_insert,
            Self::Update => field.always_update,
        }
    }

    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
        }
    }
}

/// Generate an INSERT for `record`.
///
/// An empty `table` falls back to the record's type name. Returns an empty
/// string when no field is eligible.
pub fn build_insert<R, S>(
    record: &R,
    table: &str,
    append_identity_select: bool,
    excluded: &[S],
) -> String
where
    R: FieldIntrospector + ?Sized,
    S: AsRef<str>,
{
    InsertSql::new(record)
        .table(table)
        .identity_select(append_identity_select)
        .exclude(excluded)
        .to_sql()
}

/// Generate an UPDATE for `record`, keyed on `id_column`.
///
/// An empty `table` falls back to the record's type name and an empty
/// `id_column` to [`DEFAULT_ID_COLUMN`]. Returns an empty string when no field
/// is eligible.
pub fn build_update<R, S>(record: &R, table: &str, id_column: &str, excluded: &[S]) -> String
where
    R: FieldIntrospector + ?Sized,
    S: AsRef<str>,
{
    UpdateSql::new(record)
        .table(table)
        .id_column(id_column)
        .exclude(excluded)
        .to_sql()
}

/// Introspect `record` and keep the fields that participate in a `kind` statement.
pub(crate) fn eligible_fields<R: FieldIntrospector + ?Sized>(
    record: &R,
    kind: StatementKind,
    excluded: &[String],
    config: &GeneratorConfig,
) -> Vec<FieldDescriptor> {
    record
        .describe()
        .into_iter()
        .filter(|field| {
            let decision = filter::decide(field, excluded, config);
            let keep = decision.admits(kind.always_include(field));
            #[cfg(feature = "tracing")]
            if !keep {
                tracing::trace!(
                    target: "recordsql.sql",
                    statement = kind.as_str(),
                    field = %field.name,
                    reason = %decision,
                    "field dropped"
                );
            }
            keep
        })
        .collect()
}

/// Explicit table override, or the record's type name when the override is blank.
pub(crate) fn resolve_table<R: FieldIntrospector + ?Sized>(
    table: Option<&str>,
    record: &R,
) -> String {
    match table.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => record.type_name().to_string(),
    }
}

#[cfg(feature = "tracing")]
pub(crate) fn log_statement(kind: StatementKind, table: &str, columns: usize, sql: &str) {
    if sql.is_empty() {
        tracing::debug!(
            target: "recordsql.sql",
            statement = kind.as_str(),
            table,
            "no eligible fields, statement skipped"
        );
    } else {
        tracing::debug!(
            target: "recordsql.sql",
            statement = kind.as_str(),
            table,
            columns,
            sql = %sql,
            "generated statement"
        );
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn log_statement(_kind: StatementKind, _table: &str, _columns: usize, _sql: &str) {}

/// Reject identifiers that cannot be emitted unquoted: each dot-separated part
/// must match `[A-Za-z_][A-Za-z0-9_$]*`.
pub(crate) fn validate_ident(what: &str, s: &str) -> GenResult<()> {
    if s.trim().is_empty() {
        return Err(GenError::invalid_argument(format!("{what} must not be empty")));
    }
    if !s.split('.').all(is_valid_ident_part) {
        return Err(GenError::invalid_argument(format!(
            "{what} '{s}' is not a valid SQL identifier (expected [A-Za-z_][A-Za-z0-9_$]*)"
        )));
    }
    Ok(())
}

fn is_valid_ident_part(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
