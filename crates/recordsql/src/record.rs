//! Field introspection: how a record exposes its fields to the statement builders.

use crate::classify::{DbTypeTag, DeclaredType, classify};
use crate::value::{FieldValue, ToFieldValue};
use std::borrow::Cow;

/// Metadata and current value of one record field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Column name, also used verbatim as the parameter name.
    pub name: Cow<'static, str>,
    pub declared_type: DeclaredType,
    pub value: FieldValue,
    /// Participate in INSERT even when the value looks empty.
    pub always_insert: bool,
    /// Participate in UPDATE even when the value looks empty.
    pub always_update: bool,
}

impl FieldDescriptor {
    /// Create a descriptor with no markers set.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        declared_type: DeclaredType,
        value: FieldValue,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type,
            value,
            always_insert: false,
            always_update: false,
        }
    }

    /// Describe a field from its value, taking the declared type from `T`.
    pub fn of<T: ToFieldValue>(name: impl Into<Cow<'static, str>>, value: &T) -> Self {
        Self::new(name, DeclaredType::of::<T>(), value.to_field_value())
    }

    /// Set the always-insert marker.
    pub fn always_insert(mut self) -> Self {
        self.always_insert = true;
        self
    }

    /// Set the always-update marker.
    pub fn always_update(mut self) -> Self {
        self.always_update = true;
        self
    }

    /// Set both always-include markers.
    pub fn always_save(self) -> Self {
        self.always_insert().always_update()
    }

    /// Portable type tag of the declared type.
    pub fn tag(&self) -> DbTypeTag {
        classify(&self.declared_type)
    }
}

/// A record whose fields can be enumerated in declaration order.
///
/// Usually implemented with `#[derive(Record)]`; [`DynamicRecord`] covers the
/// cases where fields are registered by hand.
pub trait FieldIntrospector {
    /// Type name of the record, the default table name.
    fn type_name(&self) -> &str;

    /// Describe every field in declaration order.
    fn describe(&self) -> Vec<FieldDescriptor>;
}

impl<T: FieldIntrospector + ?Sized> FieldIntrospector for &T {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn describe(&self) -> Vec<FieldDescriptor> {
        (**self).describe()
    }
}

/// A record assembled from explicitly registered fields.
///
/// # Example
///
/// ```ignore
/// use recordsql::{DynamicRecord, FieldDescriptor, build_insert};
///
/// let person = DynamicRecord::new("Person")
///     .field("Name", &"Alice".to_string())
///     .push(FieldDescriptor::of("Age", &0_i32).always_insert());
///
/// let sql = build_insert(&person, "", false, &[]);
/// assert_eq!(sql, "INSERT INTO Person (Name, Age) VALUES (@Name, @Age)");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicRecord {
    type_name: String,
    fields: Vec<FieldDescriptor>,
}

impl DynamicRecord {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Register a field described from its value.
    pub fn field<T: ToFieldValue>(self, name: impl Into<Cow<'static, str>>, value: &T) -> Self {
        self.push(FieldDescriptor::of(name, value))
    }

    /// Register a prepared descriptor.
    ///
    /// Re-registering a name replaces the earlier descriptor in its original
    /// position, so a record never describes the same column twice.
    pub fn push(mut self, field: FieldDescriptor) -> Self {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldIntrospector for DynamicRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn describe(&self) -> Vec<FieldDescriptor> {
        self.fields.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_of() {
        let f = FieldDescriptor::of("Age", &Some(3_i64));
        assert_eq!(f.name, "Age");
        assert!(f.declared_type.is_nullable());
        assert_eq!(f.tag(), DbTypeTag::Int64);
        assert_eq!(f.value, FieldValue::Int64(3));
        assert!(!f.always_insert);
        assert!(!f.always_update);
    }

    #[test]
    fn test_markers() {
        let f = FieldDescriptor::of("Age", &0_i32).always_save();
        assert!(f.always_insert);
        assert!(f.always_update);
    }

    #[test]
    fn test_dynamic_record_keeps_order() {
        let rec = DynamicRecord::new("Person")
            .field("B", &1_i32)
            .field("A", &2_i32)
            .field("C", &3_i32);
        let names: Vec<_> = rec.describe().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["B", "A", "C"]);
        assert_eq!(rec.type_name(), "Person");
        assert_eq!(rec.len(), 3);
    }

    #[test]
    fn test_dynamic_record_replaces_duplicate_name() {
        let rec = DynamicRecord::new("Person")
            .field("Name", &"Alice")
            .field("Age", &30_i32)
            .push(FieldDescriptor::of("Name", &"Bob").always_insert());
        assert_eq!(rec.len(), 2);

        let fields = rec.describe();
        assert_eq!(fields[0].name, "Name");
        assert_eq!(fields[0].value, FieldValue::String("Bob".to_string()));
        assert!(fields[0].always_insert);
        assert_eq!(fields[1].name, "Age");
    }
}
