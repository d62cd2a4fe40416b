//! Conversion of raw argument tokens into typed values

use thiserror::Error;

use crate::commands::command::{ParamKind, ParameterSpec};

/// A token converted to its declared parameter kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Float(f64),
}

impl ArgValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ArgValue::Float(value) => Some(*value),
            _ => None,
        }
    }
}

/// A token could not be converted to its parameter's declared kind
#[derive(Error, Debug)]
#[error("'{token}' is not a valid {expected} for parameter '{parameter}' (position {position})")]
pub struct BindError {
    pub parameter: String,
    pub position: usize,
    pub expected: ParamKind,
    pub token: String,
}

/// Strict, locale-independent conversion of one token.
///
/// Integers require an optional sign and decimal digits, booleans accept
/// exactly `true`/`false`, floats any decimal or exponential numeral, and
/// strings never fail.
pub(crate) fn convert(kind: ParamKind, token: &str) -> Option<ArgValue> {
    match kind {
        ParamKind::String => Some(ArgValue::Str(token.to_string())),
        ParamKind::Integer => token.parse::<i64>().ok().map(ArgValue::Int),
        ParamKind::Boolean => token.parse::<bool>().ok().map(ArgValue::Bool),
        ParamKind::Float => token.parse::<f64>().ok().map(ArgValue::Float),
    }
}

/// Convert argument tokens into typed values, positionally.
///
/// Expects `tokens` and `specs` to have equal length; arity mismatches are
/// the matcher's job. Binding is all-or-nothing: the first failing position
/// aborts the whole call and no partial result escapes.
///
/// # Errors
///
/// Returns `BindError` describing the first token that does not convert to
/// its declared kind.
pub fn bind(tokens: &[&str], specs: &[ParameterSpec]) -> Result<Vec<ArgValue>, BindError> {
    debug_assert_eq!(tokens.len(), specs.len());
    tokens
        .iter()
        .zip(specs)
        .map(|(token, spec)| {
            convert(spec.kind, token).ok_or_else(|| BindError {
                parameter: spec.name.clone(),
                position: spec.position,
                expected: spec.kind,
                token: (*token).to_string(),
            })
        })
        .collect()
}
