use syn::{Error, LitStr, Result};

pub(crate) fn is_valid_sql_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

pub(crate) fn parse_sql_ident(lit: &LitStr, what: &str) -> Result<String> {
    let s = lit.value();
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::new(lit.span(), format!("{what} must not be empty")));
    }
    if !is_valid_sql_ident(s) {
        return Err(Error::new(
            lit.span(),
            format!("{what} must be a valid SQL identifier (expected [A-Za-z_][A-Za-z0-9_$]*)"),
        ));
    }
    Ok(s.to_string())
}

/// Like [`parse_sql_ident`], but allows a schema prefix (`dbo.People`).
pub(crate) fn parse_table_name(lit: &LitStr) -> Result<String> {
    let s = lit.value();
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::new(lit.span(), "table must not be empty"));
    }
    if !s.split('.').all(is_valid_sql_ident) {
        return Err(Error::new(
            lit.span(),
            format!("table '{s}' must be dot-separated SQL identifiers"),
        ));
    }
    Ok(s.to_string())
}
