//! Lenient body deserializers.
//!
//! The storefront historically posts numbers and booleans as strings
//! ("4500", "true"); these helpers accept either representation.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum I64OrString {
    Num(i64),
    Str(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum U32OrString {
    Num(u32),
    Str(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Str(String),
}

pub fn i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    match I64OrString::deserialize(d)? {
        I64OrString::Num(n) => Ok(n),
        I64OrString::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

pub fn opt_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    match Option::<I64OrString>::deserialize(d)? {
        None => Ok(None),
        Some(I64OrString::Num(n)) => Ok(Some(n)),
        Some(I64OrString::Str(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

pub fn opt_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    match Option::<U32OrString>::deserialize(d)? {
        None => Ok(None),
        Some(U32OrString::Num(n)) => Ok(Some(n)),
        Some(U32OrString::Str(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

pub fn opt_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    match Option::<BoolOrString>::deserialize(d)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::Str(s)) => match s.as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "expected \"true\" or \"false\", got {other:?}"
            ))),
        },
    }
}
