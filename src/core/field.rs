//! Named, typed facts emitted into the generated source.

use std::fmt;

use serde::Serialize;

use crate::core::ticks::Ticks;

/// Value of a generated constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    String(String),
    Bool(bool),
    Timestamp(Ticks),
}

impl FieldValue {
    /// Short name of the value kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Timestamp(_) => "ticks",
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Ticks> for FieldValue {
    fn from(t: Ticks) -> Self {
        FieldValue::Timestamp(t)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{:?}", s),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Timestamp(t) => write!(f, "{} ticks", t),
        }
    }
}

/// A resolved field, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Field {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Check whether a name is lexically a member identifier in every
/// supported target syntax.
///
/// Names made only of underscores are excluded: VB reads a lone `_` as a
/// line continuation and F# as a wildcard. Keywords are checked per
/// language by [`TargetLanguage::is_reserved_word`].
///
/// [`TargetLanguage::is_reserved_word`]: crate::core::language::TargetLanguage::is_reserved_word
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && name.chars().any(|c| c != '_')
}

/// Module-level attribute kinds the generator can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Version,
    FileVersion,
    InformationalVersion,
    Title,
    Product,
    Company,
    Copyright,
}

impl AttributeKind {
    /// Fully qualified attribute type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeKind::Version => "System.Reflection.AssemblyVersionAttribute",
            AttributeKind::FileVersion => "System.Reflection.AssemblyFileVersionAttribute",
            AttributeKind::InformationalVersion => {
                "System.Reflection.AssemblyInformationalVersionAttribute"
            }
            AttributeKind::Title => "System.Reflection.AssemblyTitleAttribute",
            AttributeKind::Product => "System.Reflection.AssemblyProductAttribute",
            AttributeKind::Company => "System.Reflection.AssemblyCompanyAttribute",
            AttributeKind::Copyright => "System.Reflection.AssemblyCopyrightAttribute",
        }
    }

    /// Whether this is one of the always-emitted version attributes.
    pub fn is_version(&self) -> bool {
        matches!(
            self,
            AttributeKind::Version | AttributeKind::FileVersion | AttributeKind::InformationalVersion
        )
    }
}
