use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A literal or compile-time constant value, already typed by the front end.
///
/// JSON cannot carry non-finite floats, so `float` and `double` values also
/// accept the strings `"NaN"`, `"Infinity"` and `"-Infinity"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum LiteralValue {
    Boolean(bool),
    Char(u16),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(#[serde(with = "float32_repr")] f32),
    Double(#[serde(with = "float64_repr")] f64),
    String(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FloatRepr {
    Number(f64),
    Text(String),
}

fn parse_float_repr<E: serde::de::Error>(repr: FloatRepr) -> Result<f64, E> {
    match repr {
        FloatRepr::Number(value) => Ok(value),
        FloatRepr::Text(text) => match text.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            other => other
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid floating literal: {}", other))),
        },
    }
}

fn serialize_float<S: Serializer>(value: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if value.is_infinite() {
        serializer.serialize_str(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        serializer.serialize_f64(value)
    }
}

mod float64_repr {
    use super::*;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_float(*value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        parse_float_repr(FloatRepr::deserialize(deserializer)?)
    }
}

mod float32_repr {
    use super::*;

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            // Keep the shortest f32 spelling rather than the widened f64 digits.
            match value.to_string().parse::<f64>() {
                Ok(widened) => serializer.serialize_f64(widened),
                Err(_) => serializer.serialize_f32(*value),
            }
        } else {
            serialize_float(f64::from(*value), serializer)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        parse_float_repr(FloatRepr::deserialize(deserializer)?).map(|v| v as f32)
    }
}

impl LiteralValue {
    pub fn is_string(&self) -> bool {
        matches!(self, LiteralValue::String(_))
    }
}
