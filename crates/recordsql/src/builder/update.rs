//! UPDATE statement builder.

use std::borrow::Cow;

use crate::builder::{
    Statement, StatementKind, eligible_fields, log_statement, resolve_table, validate_ident,
};
use crate::config::GeneratorConfig;
use crate::error::GenResult;
use crate::record::{FieldDescriptor, FieldIntrospector};

/// Default identifier column.
pub const DEFAULT_ID_COLUMN: &str = "Id";

/// UPDATE builder for one record.
///
/// Produces `UPDATE <table> SET c1 = @c1, c2 = @c2 WHERE <id> = @<id>`. The id
/// column is not looked up among the record's fields; the caller supplies
/// `@<id>` at execution time.
#[derive(Debug, Clone)]
pub struct UpdateSql<'a, R: ?Sized> {
    record: &'a R,
    table: Option<String>,
    excluded: Vec<String>,
    id_column: String,
    config: Cow<'a, GeneratorConfig>,
}

impl<'a, R: FieldIntrospector + ?Sized> UpdateSql<'a, R> {
    /// Create a builder keyed on [`DEFAULT_ID_COLUMN`].
    pub fn new(record: &'a R) -> Self {
        Self {
            record,
            table: None,
            excluded: Vec::new(),
            id_column: DEFAULT_ID_COLUMN.to_string(),
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

    /// Set the identifier column used in the WHERE clause. A blank name keeps
    /// [`DEFAULT_ID_COLUMN`].
    pub fn id_column(mut self, column: &str) -> Self {
        let column = column.trim();
        self.id_column = if column.is_empty() {
            DEFAULT_ID_COLUMN
        } else {
            column
        }
        .to_string();
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
    ///
    /// The id parameter is listed last when the record has a field of that name,
    /// even if that field was itself left out of the SET list.
    pub fn to_statement(&self) -> Statement {
        self.build()
    }

    /// Like [`to_sql`](Self::to_sql), but rejects an unusable table or id column.
    pub fn try_to_sql(&self) -> GenResult<String> {
        self.try_to_statement().map(|s| s.sql)
    }

    /// Like [`to_statement`](Self::to_statement), but rejects an unusable table or id column.
    pub fn try_to_statement(&self) -> GenResult<Statement> {
        validate_ident("table name", &self.table_name())?;
        validate_ident("id column", &self.id_column)?;
        Ok(self.build())
    }

    fn build(&self) -> Statement {
        let table = self.table_name();
        let fields = eligible_fields(
            self.record,
            StatementKind::Update,
            &self.excluded,
            &self.config,
        );

        let statement = if fields.is_empty() {
            Statement::empty()
        } else {
            self.render(&table, fields)
        };

        log_statement(
            StatementKind::Update,
            &table,
            statement.params.len(),
            &statement.sql,
        );
        statement
    }

    fn render(&self, table: &str, fields: Vec<FieldDescriptor>) -> Statement {
        let id = &self.id_column;
        let mut sql = format!("UPDATE {table} SET ");
        let mut params = Vec::with_capacity(fields.len() + 1);

        for field in fields {
            if !params.is_empty() {
                sql.push_str(", ");
            }
            sql.push_str(&field.name);
            sql.push_str(" = @");
            sql.push_str(&field.name);
            params.push((field.name.into_owned(), field.value));
        }

        sql.push_str(&format!(" WHERE {id} = @{id}"));

        if !params.iter().any(|(name, _)| name == id) {
            if let Some(id_field) = self
                .record
                .describe()
                .into_iter()
                .find(|f| f.name == id.as_str())
            {
                params.push((id_field.name.into_owned(), id_field.value));
            }
        }

        Statement { sql, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;
    use crate::record::DynamicRecord;

    fn person() -> DynamicRecord {
        DynamicRecord::new("Person")
            .field("Id", &42_i32)
            .field("Name", &"Alice")
            .field("Email", &"alice@example.com")
    }

    #[test]
    fn test_simple_update() {
        let rec = person();
        let sql = UpdateSql::new(&rec).exclude(["Id"]).to_sql();
        assert_eq!(
            sql,
            "UPDATE Person SET Name = @Name, Email = @Email WHERE Id = @Id"
        );
    }

    #[test]
    fn test_update_custom_id_column() {
        let rec = person();
        let sql = UpdateSql::new(&rec)
            .table("people")
            .id_column("PersonId")
            .exclude(["Id"])
            .to_sql();
        assert_eq!(
            sql,
            "UPDATE people SET Name = @Name, Email = @Email WHERE PersonId = @PersonId"
        );
    }

    #[test]
    fn test_update_statement_appends_id_param() {
        let rec = person();
        let stmt = UpdateSql::new(&rec).exclude(["Id"]).to_statement();
        assert_eq!(
            stmt.param_names().collect::<Vec<_>>(),
            ["Name", "Email", "Id"]
        );
        assert_eq!(stmt.param("Id"), Some(&FieldValue::Int32(42)));
    }

    #[test]
    fn test_update_statement_does_not_duplicate_id_param() {
        let rec = person();
        let stmt = UpdateSql::new(&rec).to_statement();
        assert_eq!(
            stmt.sql,
            "UPDATE Person SET Id = @Id, Name = @Name, Email = @Email WHERE Id = @Id"
        );
        assert_eq!(stmt.param_names().filter(|n| *n == "Id").count(), 1);
    }

    #[test]
    fn test_update_missing_id_field_is_not_checked() {
        let rec = DynamicRecord::new("Person").field("Name", &"Alice");
        let stmt = UpdateSql::new(&rec).to_statement();
        assert_eq!(stmt.sql, "UPDATE Person SET Name = @Name WHERE Id = @Id");
        assert_eq!(stmt.param_names().collect::<Vec<_>>(), ["Name"]);
    }

    #[test]
    fn test_update_nothing_eligible() {
        let rec = DynamicRecord::new("Person").field("Id", &42_i32);
        let sql = UpdateSql::new(&rec).exclude(["Id"]).to_sql();
        assert_eq!(sql, "");
    }

    #[test]
    fn test_blank_id_column_keeps_default() {
        let rec = person();
        for blank in ["", "  "] {
            let sql = UpdateSql::new(&rec).id_column(blank).exclude(["Id"]).to_sql();
            assert_eq!(
                sql,
                "UPDATE Person SET Name = @Name, Email = @Email WHERE Id = @Id"
            );
        }
        assert!(UpdateSql::new(&rec).id_column("").try_to_sql().is_ok());
    }

    #[test]
    fn test_try_to_sql_rejects_bad_id_column() {
        let rec = person();
        let err = UpdateSql::new(&rec)
            .id_column("Id = 1 OR 1")
            .try_to_sql()
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("id column"));
        assert!(UpdateSql::new(&rec).try_to_sql().is_ok());
    }
}
