//! Helpers for extracting typed parameters from a `serde_json::Value` object.
//!
//! Missing keys and wrong scalar types fall back to the default, so an empty
//! `{}` always yields a working effect. Color values are the exception:
//! a present-but-unparseable color is a user error, not a default.

use serde_json::Value;

use crate::color::Rgba;
use crate::error::EffectError;

/// Extracts an `f64` from `params[name]`, or `default` if missing/wrong type.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, or `default` if missing/wrong type.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, or `default` if missing/wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, or `default` if missing/wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Extracts a hex color from `params[name]`, or `default` if absent.
///
/// A present value that is not a valid hex string is an error.
pub fn param_color(params: &Value, name: &str, default: Rgba) -> Result<Rgba, EffectError> {
    match params.get(name).and_then(Value::as_str) {
        Some(hex) => Rgba::from_hex(hex),
        None => Ok(default),
    }
}

/// Extracts an array of hex colors from `params[name]`.
///
/// Returns `Ok(None)` when the key is absent or not an array; errors on any
/// entry that is not a valid hex string.
pub fn param_colors(params: &Value, name: &str) -> Result<Option<Vec<Rgba>>, EffectError> {
    let Some(Value::Array(items)) = params.get(name) else {
        return Ok(None);
    };
    let colors = items
        .iter()
        .map(|v| {
            v.as_str()
                .ok_or_else(|| EffectError::InvalidColor(format!("non-string entry in {name}")))
                .and_then(Rgba::from_hex)
        })
        .collect::<Result<Vec<Rgba>, EffectError>>()?;
    Ok(Some(colors))
}
