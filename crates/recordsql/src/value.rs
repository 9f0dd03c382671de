//! Runtime field values.

use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;
use uuid::Uuid;

/// The current value of a record field, captured during introspection.
///
/// Values are only inspected to decide whether a field participates in a
/// statement; they are handed back to the caller through
/// [`Statement::params`](crate::Statement::params) for binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Absent value (`None`).
    Null,
    String(String),
    Int32(i32),
    Int64(i64),
    Guid(Uuid),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    #[cfg(feature = "rust_decimal")]
    Decimal(rust_decimal::Decimal),
    Double(f64),
    /// Discriminant of a fieldless enum.
    Enum(i32),
    /// A present value of a type with no portable mapping, kept as its debug rendering.
    Opaque(String),
}

impl FieldValue {
    /// Returns `true` for [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this is a date or timestamp equal to its `Default` value.
    ///
    /// chrono's defaults are the Unix epoch, which is what a `#[derive(Default)]`
    /// record carries for a date field nobody assigned.
    pub fn is_default_instant(&self) -> bool {
        match self {
            Self::Date(d) => *d == NaiveDate::default(),
            Self::DateTime(dt) => *dt == NaiveDateTime::default(),
            _ => false,
        }
    }

    /// Returns `true` for zero-like scalars: empty strings, numeric zero and the nil UUID.
    ///
    /// Booleans, enum discriminants, dates and opaque values never count as empty.
    pub fn is_empty_value(&self) -> bool {
        match self {
            Self::String(s) => s.is_empty(),
            Self::Int32(v) => *v == 0,
            Self::Int64(v) => *v == 0,
            Self::Double(v) => *v == 0.0,
            #[cfg(feature = "rust_decimal")]
            Self::Decimal(v) => v.is_zero(),
            Self::Guid(v) => v.is_nil(),
            Self::Null
            | Self::Boolean(_)
            | Self::Date(_)
            | Self::DateTime(_)
            | Self::Enum(_)
            | Self::Opaque(_) => false,
        }
    }
}

/// Conversion of a field's current value into a [`FieldValue`].
///
/// Implemented for the scalar types with a portable mapping, for `Option<T>`,
/// for references, and for a handful of common types that are carried as
/// [`FieldValue::Opaque`]. `#[derive(Record)]` requires it for every field not
/// marked `#[orm(enum)]`.
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for &T {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(v) => v.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

impl ToFieldValue for FieldValue {
    fn to_field_value(&self) -> FieldValue {
        self.clone()
    }
}

impl ToFieldValue for str {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.to_owned())
    }
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl ToFieldValue for i32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Int32(*self)
    }
}

impl ToFieldValue for i64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Int64(*self)
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}

impl ToFieldValue for f64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Double(*self)
    }
}

impl ToFieldValue for f32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Double(f64::from(*self))
    }
}

impl ToFieldValue for Uuid {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Guid(*self)
    }
}

impl ToFieldValue for NaiveDate {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Date(*self)
    }
}

impl ToFieldValue for NaiveDateTime {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(*self)
    }
}

// Zoned timestamps are normalized to UTC wall time.
impl<Tz: TimeZone> ToFieldValue for chrono::DateTime<Tz> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(self.naive_utc())
    }
}

#[cfg(feature = "rust_decimal")]
impl ToFieldValue for rust_decimal::Decimal {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Decimal(*self)
    }
}

macro_rules! impl_opaque_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ToFieldValue for $ty {
                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Opaque(format!("{:?}", self))
                }
            }
        )+
    };
}

impl_opaque_value!(
    i8,
    i16,
    u8,
    u16,
    u32,
    u64,
    isize,
    usize,
    char,
    Vec<u8>,
    chrono::NaiveTime,
    serde_json::Value,
);
