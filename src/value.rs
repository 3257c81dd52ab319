//! Canonical text form of published property values.
//!
//! Cast devices report state as a mix of floats, integers, booleans, strings
//! and absent values. Subscribers on the other side of the broker only see
//! text, so each value is normalized before publishing:
//!
//! | Value                       | Canonical text                   |
//! |-----------------------------|----------------------------------|
//! | float in `[0, 1]`           | `round(x * 100)`, e.g. `0.5 → 50` |
//! | any other float             | `round(x)`, e.g. `12.7 → 13`     |
//! | `true` / `false`            | `1` / `0`                        |
//! | none                        | empty string                     |
//! | integer                     | decimal digits                   |
//! | text                        | verbatim                         |
//! | list of text                | JSON array                       |
//!
//! Rounding is half to even, so `0.125` publishes as `12`.
//!
//! The `[0, 1]` scaling applies to every float, not only volume levels: the
//! device reports volume as a fraction and subscribers expect a percentage.

use std::fmt;

use crate::error::{Error, Result};

/// A property value as reported by the device.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl Value {
    /// Formats the value as published on the wire.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for non-finite floats, which have no
    /// integer form, and `Internal` if a list fails to serialize.
    pub fn to_canonical(&self) -> Result<String> {
        let canonical = match self {
            Self::Float(value) => {
                if !value.is_finite() {
                    return Err(Error::invalid_argument(format!(
                        "cannot round non-finite value {value}"
                    )));
                }

                let value = if (0.0..=1.0).contains(value) {
                    value * 100.0
                } else {
                    *value
                };

                // Adding zero folds `-0.0` into `0.0`.
                format!("{:.0}", value.round_ties_even() + 0.0)
            }
            Self::Bool(true) => "1".to_owned(),
            Self::Bool(false) => "0".to_owned(),
            Self::None => String::new(),
            Self::Int(value) => value.to_string(),
            Self::Text(value) => value.clone(),
            Self::List(values) => serde_json::to_string(values).map_err(Error::internal)?,
        };

        Ok(canonical)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value:?}"),
            Self::List(values) => write!(f, "{values:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}
