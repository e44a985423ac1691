//! Typed scalar values carried by tree nodes.
//!
//! The TXT format has no schema; the kind of a scalar is inferred from its
//! textual shape at decode time. The `Value` enum makes that inference a
//! first-class sum type instead of a stringly-typed tag.

use std::fmt;

/// The inferred kind of a scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Str,
    Number,
    Raw,
}

impl ValueKind {
    /// Kind name as used in exports.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Str => "string",
            ValueKind::Number => "number",
            ValueKind::Raw => "raw",
        }
    }
}

/// A typed scalar from a data file.
///
/// Every variant keeps the textual representation from the source line.
/// Numbers are deliberately not converted to a numeric type here, so no
/// precision is lost before a caller picks a representation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json-export", derive(serde::Serialize))]
#[cfg_attr(
    feature = "json-export",
    serde(tag = "kind", content = "text", rename_all = "lowercase")
)]
pub enum Value {
    /// The literal token `TRUE` or `FALSE`.
    Bool(String),
    /// A double-quoted token, quotes stripped. No escape processing.
    #[cfg_attr(feature = "json-export", serde(rename = "string"))]
    Str(String),
    /// A token that parses as a decimal or floating-point number.
    Number(String),
    /// Any other token (identifiers, enum-like names).
    Raw(String),
}

impl Value {
    /// Infer the kind of a raw value token.
    ///
    /// Total function: anything that is not a boolean literal, a quoted
    /// string, or a number falls through to [`Value::Raw`].
    pub fn infer(token: &str) -> Self {
        if token == "TRUE" || token == "FALSE" {
            return Value::Bool(token.to_owned());
        }
        if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
            return Value::Str(token[1..token.len() - 1].to_owned());
        }
        if token.trim().parse::<f64>().is_ok() {
            return Value::Number(token.to_owned());
        }
        Value::Raw(token.to_owned())
    }

    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Str(_) => ValueKind::Str,
            Value::Number(_) => ValueKind::Number,
            Value::Raw(_) => ValueKind::Raw,
        }
    }

    /// The textual payload (quotes already stripped for strings).
    pub fn text(&self) -> &str {
        match self {
            Value::Bool(s) | Value::Str(s) | Value::Number(s) | Value::Raw(s) => s,
        }
    }

    /// Try to read this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(s) => Some(s == "TRUE"),
            _ => None,
        }
    }

    /// Try to read this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
