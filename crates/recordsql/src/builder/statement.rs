use crate::value::FieldValue;
use serde::Serialize;
use std::fmt;

/// Generated SQL plus the named parameter values it references, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statement {
    pub sql: String,
    /// `(name, value)` pairs; `name` is the placeholder without its `@`.
    pub params: Vec<(String, FieldValue)>,
}

impl Statement {
    /// An empty statement: nothing to execute.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` when no field was eligible and there is nothing to execute.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Look up a parameter value by name.
    pub fn param(&self, name: &str) -> Option<&FieldValue> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Parameter names in placeholder order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(n, _)| n.as_str())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
