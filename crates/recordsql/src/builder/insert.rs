//! INSERT statement builder.

use std::borrow::Cow;

use crate::builder::{
    Statement, StatementKind, eligible_fields, log_statement, resolve_table, validate_ident,
};
use crate::config::GeneratorConfig;
use crate::error::GenResult;
use crate::record::{FieldDescriptor, FieldIntrospector};

/// INSERT builder for one record.
///
/// Produces `INSERT INTO <table> (c1, c2) VALUES (@c1, @c2)`, followed by the
/// configured identity-retrieval fragment unless disabled.
#[derive(Debug, Clone)]
pub struct InsertSql<'a, R: ?Sized> {
    record: &'a R,
    table: Option<String>,
    excluded: Vec<String>,
    identity_select: bool,
    config: Cow<'a, GeneratorConfig>,
}

impl<'a, R: FieldIntrospector + ?Sized> InsertSql<'a, R> {
    /// Create a builder with the default configuration and identity retrieval enabled.
    pub fn new(record: &'a R) -> Self {
        Self {
            record,
            table: None,
            excluded: Vec::new(),
            identity_select: true,
            config: Cow::Owned(GeneratorConfig::default()),
        }
    }

    /// Override the table name. A blank name keeps the record's type name.
    pub fn table(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Exclude fields by exact (case-sensitive) name.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded
            .extend(names.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Append the identity-retrieval fragment (default: on).
    pub fn identity_select(mut self, enabled: bool) -> Self {
        self.identity_select = enabled;
        self
    }

    /// Use a shared configuration.
    pub fn config(mut self, config: &'a GeneratorConfig) -> Self {
        self.config = Cow::Borrowed(config);
        self
    }

    /// Resolved target table.
    pub fn table_name(&self) -> String {
        resolve_table(self.table.as_deref(), self.record)
    }

    /// Build the SQL text. Empty when no field is eligible.
    pub fn to_sql(&self) -> String {
        self.build().sql
    }

    /// Build the SQL text together with its parameter values.
    pub fn to_statement(&self) -> Statement {
        self.build()
    }

    /// Like [`to_sql`](Self::to_sql), but rejects an unusable table name.
    pub fn try_to_sql(&self) -> GenResult<String> {
        self.try_to_statement().map(|s| s.sql)
    }

    /// Like [`to_statement`](Self::to_statement), but rejects an unusable table name.
    pub fn try_to_statement(&self) -> GenResult<Statement> {
        validate_ident("table name", &self.table_name())?;
        Ok(self.build())
    }

    fn build(&self) -> Statement {
        let table = self.table_name();
        let fields = eligible_fields(
            self.record,
            StatementKind::Insert,
            &self.excluded,
            &self.config,
        );

        let statement = if fields.is_empty() {
            Statement::empty()
        } else {
            self.render(&table, fields)
        };

        log_statement(
            StatementKind::Insert,
            &table,
            statement.params.len(),
            &statement.sql,
        );
        statement
    }

    fn render(&self, table: &str, fields: Vec<FieldDescriptor>) -> Statement {
        let mut columns = String::new();
        let mut values = String::new();
        let mut params = Vec::with_capacity(fields.len());

        for field in fields {
            if !params.is_empty() {
                columns.push_str(", ");
                values.push_str(", ");
            }
            columns.push_str(&field.name);
            values.push('@');
            values.push_str(&field.name);
            params.push((field.name.into_owned(), field.value));
        }

        let mut sql = format!("INSERT INTO {table} ({columns}) VALUES ({values})");
        let identity = self.config.identity_select.trim();
        if self.identity_select && !identity.is_empty() {
            sql.push_str("; ");
            sql.push_str(identity);
        }

        Statement { sql, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DynamicRecord;

    fn person() -> DynamicRecord {
        DynamicRecord::new("Person")
            .field("Name", &"Alice")
            .field("Email", &"alice@example.com")
    }

    #[test]
    fn test_simple_insert() {
        let rec = person();
        let sql = InsertSql::new(&rec).identity_select(false).to_sql();
        assert_eq!(
            sql,
            "INSERT INTO Person (Name, Email) VALUES (@Name, @Email)"
        );
    }

    #[test]
    fn test_insert_with_identity_select() {
        let rec = person();
        let sql = InsertSql::new(&rec).to_sql();
        assert_eq!(
            sql,
            "INSERT INTO Person (Name, Email) VALUES (@Name, @Email); SELECT CAST(SCOPE_IDENTITY() as int)"
        );
    }

    #[test]
    fn test_insert_custom_identity_fragment() {
        let rec = person();
        let config = GeneratorConfig::new().identity_select("SELECT LAST_INSERT_ID()");
        let sql = InsertSql::new(&rec).config(&config).to_sql();
        assert!(sql.ends_with("; SELECT LAST_INSERT_ID()"));
    }

    #[test]
    fn test_insert_blank_identity_fragment_is_omitted() {
        let rec = person();
        let config = GeneratorConfig::new().identity_select("");
        let sql = InsertSql::new(&rec).config(&config).to_sql();
        assert_eq!(
            sql,
            "INSERT INTO Person (Name, Email) VALUES (@Name, @Email)"
        );
    }

    #[test]
    fn test_insert_table_override() {
        let rec = person();
        let qb = InsertSql::new(&rec).table("dbo.People").identity_select(false);
        assert_eq!(qb.table_name(), "dbo.People");
        assert!(qb.to_sql().starts_with("INSERT INTO dbo.People ("));

        let qb = InsertSql::new(&rec).table("  ");
        assert_eq!(qb.table_name(), "Person");
    }

    #[test]
    fn test_insert_statement_params() {
        let rec = person();
        let stmt = InsertSql::new(&rec).identity_select(false).to_statement();
        assert_eq!(stmt.param_names().collect::<Vec<_>>(), ["Name", "Email"]);
        assert_eq!(
            stmt.param("Name"),
            Some(&crate::FieldValue::String("Alice".to_string()))
        );
    }

    #[test]
    fn test_insert_nothing_eligible() {
        let rec = DynamicRecord::new("Person").field("Name", &"");
        let stmt = InsertSql::new(&rec).to_statement();
        assert!(stmt.is_empty());
        assert!(stmt.params.is_empty());
        assert_eq!(InsertSql::new(&rec).to_sql(), "");
    }

    #[test]
    fn test_try_to_sql_rejects_bad_table() {
        let rec = DynamicRecord::new("");
        let err = InsertSql::new(&rec).try_to_sql().unwrap_err();
        assert!(err.is_invalid_argument());

        let rec = person();
        let err = InsertSql::new(&rec)
            .table("people; DROP TABLE x")
            .try_to_sql()
            .unwrap_err();
        assert!(err.is_invalid_argument());

        assert!(InsertSql::new(&rec).try_to_sql().is_ok());
    }
}
