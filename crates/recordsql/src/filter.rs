//! Per-field inclusion rules.
//!
//! A field can be dropped for two kinds of reasons:
//!
//! - **Exclusion** (by name): the caller's exclusion list or the configured
//!   ignore-list. Nothing brings an excluded field back.
//! - **Suppression** (by value): no value, an empty/zero value, a default date,
//!   or a type without a portable mapping. The always-insert/always-update
//!   markers override suppression.

use crate::classify::DbTypeTag;
use crate::config::GeneratorConfig;
use crate::record::FieldDescriptor;
use crate::value::FieldValue;
use std::fmt;

/// Name-based reason for dropping a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Listed in the caller's excluded names.
    Explicit,
    /// Listed in [`GeneratorConfig::ignored_fields`].
    IgnoreList,
}

/// Value-based reason for dropping a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppression {
    /// Date or timestamp still at its default instant.
    DefaultDate,
    /// No value.
    Null,
    /// Empty string, numeric zero or nil UUID.
    EmptyValue,
    /// Declared type has no portable mapping.
    Unsupported,
}

/// Outcome of evaluating one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDecision {
    Include,
    Suppressed(Suppression),
    Excluded(Exclusion),
}

impl FieldDecision {
    /// Whether the field participates, given its always-include marker for this statement kind.
    pub fn admits(self, always_include: bool) -> bool {
        match self {
            Self::Include => true,
            Self::Suppressed(_) => always_include,
            Self::Excluded(_) => false,
        }
    }
}

impl fmt::Display for FieldDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Include => f.write_str("included"),
            Self::Suppressed(Suppression::DefaultDate) => f.write_str("default date"),
            Self::Suppressed(Suppression::Null) => f.write_str("null value"),
            Self::Suppressed(Suppression::EmptyValue) => f.write_str("empty value"),
            Self::Suppressed(Suppression::Unsupported) => f.write_str("unsupported type"),
            Self::Excluded(Exclusion::Explicit) => f.write_str("excluded by name"),
            Self::Excluded(Exclusion::IgnoreList) => f.write_str("on ignore-list"),
        }
    }
}

/// Returns `true` if the field is excluded by name, ignored, or a date left at its default.
pub fn should_skip<S: AsRef<str>>(
    name: &str,
    excluded: &[S],
    tag: DbTypeTag,
    value: &FieldValue,
    config: &GeneratorConfig,
) -> bool {
    exclusion(name, excluded, config).is_some() || is_default_date(tag, value)
}

/// Evaluate a field against the exclusion and suppression rules.
///
/// Exclusions are checked first, then the default-date rule, then the value rules.
pub fn decide<S: AsRef<str>>(
    field: &FieldDescriptor,
    excluded: &[S],
    config: &GeneratorConfig,
) -> FieldDecision {
    if let Some(reason) = exclusion(&field.name, excluded, config) {
        return FieldDecision::Excluded(reason);
    }

    let tag = field.tag();
    if is_default_date(tag, &field.value) {
        return FieldDecision::Suppressed(Suppression::DefaultDate);
    }
    if field.value.is_null() {
        return FieldDecision::Suppressed(Suppression::Null);
    }
    if tag == DbTypeTag::Unsupported {
        return FieldDecision::Suppressed(Suppression::Unsupported);
    }
    if field.value.is_empty_value() {
        return FieldDecision::Suppressed(Suppression::EmptyValue);
    }
    FieldDecision::Include
}

fn exclusion<S: AsRef<str>>(
    name: &str,
    excluded: &[S],
    config: &GeneratorConfig,
) -> Option<Exclusion> {
    if excluded.iter().any(|e| e.as_ref() == name) {
        Some(Exclusion::Explicit)
    } else if config.is_ignored(name) {
        Some(Exclusion::IgnoreList)
    } else {
        None
    }
}

fn is_default_date(tag: DbTypeTag, value: &FieldValue) -> bool {
    tag.is_temporal() && value.is_default_instant()
}
