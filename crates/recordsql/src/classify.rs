//! Declared field types and their portable database type tags.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Portable database type tag.
///
/// Type-based inclusion rules are expressed against this closed set rather
/// than against Rust types, so they stay independent of the SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DbTypeTag {
    String,
    Int32,
    Int64,
    Guid,
    Boolean,
    Date,
    DateTime,
    Decimal,
    Double,
    /// No portable mapping. Such fields only participate when marked always-include.
    Unsupported,
}

impl DbTypeTag {
    /// Returns `true` for `Date` and `DateTime`.
    pub fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }
}

impl fmt::Display for DbTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The declared type of a record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// A plain type, identified by its (possibly path-qualified) name.
    Named(Cow<'static, str>),
    /// An optional wrapper around another declared type.
    Nullable(Box<DeclaredType>),
    /// An enumeration; always stored as its 32-bit discriminant.
    Enumeration(Cow<'static, str>),
}

const OPTION_PREFIXES: [&str; 3] = ["core::option::Option<", "std::option::Option<", "Option<"];

impl DeclaredType {
    /// Declared type of `T`, derived from [`std::any::type_name`].
    pub fn of<T: ?Sized>() -> Self {
        Self::parse(std::any::type_name::<T>())
    }

    /// Declared type of an enumeration `E`, wrapped as nullable when `nullable` is set.
    pub fn enumeration_of<E: ?Sized>(nullable: bool) -> Self {
        let ty = Self::Enumeration(Cow::Borrowed(std::any::type_name::<E>()));
        if nullable { Self::nullable(ty) } else { ty }
    }

    /// Parse a type name, recognizing `Option<..>` wrappers, also behind references.
    pub fn parse(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        let target = strip_reference(&name);
        for prefix in OPTION_PREFIXES {
            if let Some(inner) = target
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix('>'))
            {
                return Self::nullable(Self::parse(inner.trim().to_string()));
            }
        }
        Self::Named(name)
    }

    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Named(name.into())
    }

    pub fn enumeration(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Enumeration(name.into())
    }

    pub fn nullable(inner: DeclaredType) -> Self {
        Self::Nullable(Box::new(inner))
    }

    /// Returns `true` if the outermost layer is an optional wrapper.
    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }
}

/// Map a declared type to its portable tag.
///
/// Optional wrappers are unwrapped and enumerations map to `Int32`. Plain types
/// are matched on their last path segment with generic arguments removed, so
/// `chrono::naive::date::NaiveDate` and `NaiveDate` classify the same way.
/// Anything unrecognized is [`DbTypeTag::Unsupported`].
pub fn classify(declared: &DeclaredType) -> DbTypeTag {
    match declared {
        DeclaredType::Nullable(inner) => classify(inner),
        DeclaredType::Enumeration(_) => DbTypeTag::Int32,
        DeclaredType::Named(name) => classify_name(name),
    }
}

fn classify_name(name: &str) -> DbTypeTag {
    match base_name(name) {
        "String" | "str" => DbTypeTag::String,
        "i32" => DbTypeTag::Int32,
        "i64" => DbTypeTag::Int64,
        "Uuid" => DbTypeTag::Guid,
        "bool" => DbTypeTag::Boolean,
        "NaiveDate" | "Date" => DbTypeTag::Date,
        "NaiveDateTime" | "DateTime" | "PrimitiveDateTime" | "OffsetDateTime" => {
            DbTypeTag::DateTime
        }
        "Decimal" => DbTypeTag::Decimal,
        "f64" | "f32" => DbTypeTag::Double,
        _ => DbTypeTag::Unsupported,
    }
}

/// `&'a mut chrono::DateTime<Utc>` -> `DateTime`
fn base_name(name: &str) -> &str {
    let s = strip_reference(name);
    let s = s.split('<').next().unwrap_or(s);
    s.rsplit("::").next().unwrap_or(s).trim()
}

/// `&&'a mut T` -> `T`
fn strip_reference(name: &str) -> &str {
    let mut s = name.trim();
    while let Some(rest) = s.strip_prefix('&') {
        s = rest.trim_start();
        if s.starts_with('\'') {
            s = s.split_once(' ').map_or(s, |(_, rest)| rest);
        }
        s = s.strip_prefix("mut ").unwrap_or(s).trim_start();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, Utc};
    use uuid::Uuid;

    #[derive(Debug)]
    struct Money;

    #[test]
    fn test_classify_scalar_types() {
        assert_eq!(classify(&DeclaredType::of::<String>()), DbTypeTag::String);
        assert_eq!(classify(&DeclaredType::of::<&str>()), DbTypeTag::String);
        assert_eq!(classify(&DeclaredType::of::<i32>()), DbTypeTag::Int32);
        assert_eq!(classify(&DeclaredType::of::<i64>()), DbTypeTag::Int64);
        assert_eq!(classify(&DeclaredType::of::<Uuid>()), DbTypeTag::Guid);
        assert_eq!(classify(&DeclaredType::of::<bool>()), DbTypeTag::Boolean);
        assert_eq!(classify(&DeclaredType::of::<NaiveDate>()), DbTypeTag::Date);
        assert_eq!(
            classify(&DeclaredType::of::<NaiveDateTime>()),
            DbTypeTag::DateTime
        );
        assert_eq!(
            classify(&DeclaredType::of::<chrono::DateTime<Utc>>()),
            DbTypeTag::DateTime
        );
        assert_eq!(classify(&DeclaredType::of::<f64>()), DbTypeTag::Double);
        assert_eq!(classify(&DeclaredType::of::<f32>()), DbTypeTag::Double);
    }

    #[test]
    fn test_classify_unwraps_option() {
        let ty = DeclaredType::of::<Option<i64>>();
        assert!(ty.is_nullable());
        assert_eq!(classify(&ty), DbTypeTag::Int64);

        let ty = DeclaredType::parse("std::option::Option<chrono::NaiveDate>");
        assert!(ty.is_nullable());
        assert_eq!(classify(&ty), DbTypeTag::Date);

        let ty = DeclaredType::parse("Option<Option<String>>");
        assert_eq!(classify(&ty), DbTypeTag::String);
    }

    #[test]
    fn test_classify_option_behind_reference() {
        let ty = DeclaredType::of::<&Option<i32>>();
        assert!(ty.is_nullable());
        assert_eq!(classify(&ty), DbTypeTag::Int32);

        let ty = DeclaredType::of::<&&mut Option<NaiveDate>>();
        assert!(ty.is_nullable());
        assert_eq!(classify(&ty), DbTypeTag::Date);

        let ty = DeclaredType::parse("&'a core::option::Option<&'a str>");
        assert_eq!(classify(&ty), DbTypeTag::String);
    }

    #[cfg(feature = "rust_decimal")]
    #[test]
    fn test_classify_decimal() {
        assert_eq!(
            classify(&DeclaredType::of::<rust_decimal::Decimal>()),
            DbTypeTag::Decimal
        );
        assert_eq!(
            classify(&DeclaredType::of::<Option<rust_decimal::Decimal>>()),
            DbTypeTag::Decimal
        );
    }

    #[test]
    fn test_classify_enumeration() {
        assert_eq!(
            classify(&DeclaredType::enumeration("app::Status")),
            DbTypeTag::Int32
        );
        let ty = DeclaredType::enumeration_of::<Money>(true);
        assert!(ty.is_nullable());
        assert_eq!(classify(&ty), DbTypeTag::Int32);
    }

    #[test]
    fn test_classify_unknown_is_unsupported() {
        assert_eq!(classify(&DeclaredType::of::<Money>()), DbTypeTag::Unsupported);
        assert_eq!(classify(&DeclaredType::of::<i16>()), DbTypeTag::Unsupported);
        assert_eq!(classify(&DeclaredType::of::<Vec<u8>>()), DbTypeTag::Unsupported);
        assert_eq!(classify(&DeclaredType::named("")), DbTypeTag::Unsupported);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("alloc::string::String"), "String");
        assert_eq!(
            base_name("chrono::datetime::DateTime<chrono::offset::utc::Utc>"),
            "DateTime"
        );
        assert_eq!(base_name("&mut str"), "str");
        assert_eq!(base_name("&'a str"), "str");
        assert_eq!(base_name("&&i64"), "i64");
        assert_eq!(base_name("rust_decimal::Decimal"), "Decimal");
    }
}
