//! Per-field coercion
//!
//! Raw document values are checked against their semantic type first and
//! only then written through the field's slot, so a failed coercion never
//! touches the theme.

use crate::document::json_kind;
use crate::error::CoercionError;
use crate::schema::{SemanticType, Slot};
use serde_json::{Number, Value};
use visage_paint::{Color, Gradient};

/// A raw value converted to its native form
#[derive(Clone, Debug, PartialEq)]
pub enum Coerced {
    Color(Color),
    Gradient(Gradient),
    Int(i32),
    Scale(f32),
    Bool(bool),
    Text(String),
    Variant(String),
}

/// Coerce a raw value according to its semantic type
pub fn coerce(kind: SemanticType, raw: &Value) -> Result<Coerced, CoercionError> {
    match kind {
        SemanticType::Color => Ok(Coerced::Color(color(raw)?)),
        SemanticType::ColorList => color_list(raw).map(Coerced::Gradient),
        SemanticType::Dimension | SemanticType::Duration => integer(raw).map(Coerced::Int),
        SemanticType::Scale => scale(raw).map(Coerced::Scale),
        SemanticType::Boolean => match raw {
            Value::Bool(b) => Ok(Coerced::Bool(*b)),
            other => Err(wrong_type("boolean", other)),
        },
        SemanticType::AttributedText => Ok(Coerced::Text(string(raw)?.to_string())),
        SemanticType::Enum(variants) => {
            let value = string(raw)?;
            if variants.contains(&value) {
                Ok(Coerced::Variant(value.to_string()))
            } else {
                Err(CoercionError::UnknownVariant {
                    value: value.to_string(),
                    variants,
                })
            }
        }
        SemanticType::Font | SemanticType::Image | SemanticType::Animation => {
            // Asset references arrive as names, URIs or resolved asset objects
            match raw {
                Value::String(_) | Value::Object(_) | Value::Number(_) => {
                    Err(CoercionError::Unsupported(kind))
                }
                other => Err(wrong_type("asset reference", other)),
            }
        }
        SemanticType::ImageList => match raw {
            Value::Array(_) => Err(CoercionError::Unsupported(kind)),
            other => Err(wrong_type("array", other)),
        },
    }
}

/// Write a coerced value through a slot
///
/// Fails only when the value does not fit the slot, which a consistent
/// schema never produces.
pub fn apply(slot: Slot<'_>, value: Coerced) -> Result<(), CoercionError> {
    match (slot, value) {
        (Slot::Color(target), Coerced::Color(color)) => *target = color,
        (Slot::Gradient(target), Coerced::Gradient(gradient)) => *target = gradient,
        (Slot::Int(target), Coerced::Int(n)) => *target = n,
        (Slot::Scale(target), Coerced::Scale(x)) => *target = x,
        (Slot::Bool(target), Coerced::Bool(b)) => *target = b,
        (Slot::Text(target), Coerced::Text(text)) => *target = Some(text),
        (Slot::Enum(target), Coerced::Variant(value)) => {
            if !target.set_variant(&value) {
                return Err(CoercionError::UnknownVariant {
                    value,
                    variants: target.variants(),
                });
            }
        }
        (_, value) => {
            return Err(CoercionError::WrongType {
                expected: "value matching the theme slot",
                found: coerced_kind(&value),
            })
        }
    }
    Ok(())
}

fn color(raw: &Value) -> Result<Color, CoercionError> {
    Ok(Color::parse_hex(string(raw)?)?)
}

/// First and last parseable entries become a left-to-right gradient
fn color_list(raw: &Value) -> Result<Gradient, CoercionError> {
    let Value::Array(entries) = raw else {
        return Err(wrong_type("array of colors", raw));
    };

    let mut colors = entries.iter().filter_map(|entry| color(entry).ok());
    let first = colors
        .next()
        .ok_or(CoercionError::EmptyColorList(entries.len()))?;
    let last = colors.last().unwrap_or(first);

    Ok(Gradient::horizontal(first, last))
}

fn integer(raw: &Value) -> Result<i32, CoercionError> {
    let Value::Number(n) = raw else {
        return Err(wrong_type("integer", raw));
    };
    integral(n).ok_or_else(|| CoercionError::NotInteger(n.to_string()))
}

fn integral(n: &Number) -> Option<i32> {
    if let Some(i) = n.as_i64() {
        return i32::try_from(i).ok();
    }
    if n.is_u64() {
        return None;
    }
    let f = n.as_f64()?;
    let in_range = f >= i32::MIN as f64 && f <= i32::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i32)
}

fn scale(raw: &Value) -> Result<f32, CoercionError> {
    let Value::Number(n) = raw else {
        return Err(wrong_type("number", raw));
    };
    n.as_f64()
        .map(|f| f as f32)
        .filter(|f| f.is_finite())
        .ok_or_else(|| CoercionError::NotFinite(n.to_string()))
}

fn string(raw: &Value) -> Result<&str, CoercionError> {
    raw.as_str().ok_or_else(|| wrong_type("string", raw))
}

fn wrong_type(expected: &'static str, found: &Value) -> CoercionError {
    CoercionError::WrongType {
        expected,
        found: json_kind(found),
    }
}

fn coerced_kind(value: &Coerced) -> &'static str {
    match value {
        Coerced::Color(_) => "color",
        Coerced::Gradient(_) => "gradient",
        Coerced::Int(_) => "integer",
        Coerced::Scale(_) => "number",
        Coerced::Bool(_) => "boolean",
        Coerced::Text(_) => "string",
        Coerced::Variant(_) => "variant",
    }
}
