//! Lenient numeric decoding for seeded documents.
//!
//! Documents written by other tools store integers as int32, int64 or
//! double depending on the writer. Integer fields accept all three as long as
//! a double carries no fractional part.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn into_i64<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            Number::Int(v) => Ok(v),
            Number::Float(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
            Number::Float(v) => Err(E::custom(format!("expected an integer, found {v}"))),
        }
    }
}

pub fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Number::deserialize(deserializer)?.into_i64()
}

/// `null` and absent values decode to `None`.
pub fn optional_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Number>::deserialize(deserializer)? {
        Some(n) => n.into_i64().map(Some),
        None => Ok(None),
    }
}

/// Like [`integer`], but `null` decodes to zero.
pub fn counter<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = optional_integer(deserializer)?.unwrap_or(0);
    if value < 0 {
        return Err(D::Error::custom(format!("counter cannot be negative: {value}")));
    }
    Ok(value)
}
