//! Payload <-> value object contract shared by every wire type.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{errors::Error, Result};

/// A loosely typed wire payload (JSON object).
pub type JsonDict = serde_json::Map<String, Value>;

/// Two-way mapping between a [`JsonDict`] and a typed, read-only object.
pub trait BaleObject: Sized {
    /// Object name used in error messages.
    const NAME: &'static str;

    fn from_dict(data: &JsonDict) -> Result<Self>;

    /// Emits only the fields that are semantically present.
    fn to_dict(&self) -> Result<JsonDict>;

    /// Normalize a possibly absent payload.
    ///
    /// Missing, `null` and `{}` are all "no object"; anything that is not an
    /// object is rejected.
    fn parse_data(payload: Option<&Value>) -> Result<Option<&JsonDict>> {
        match payload {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) if map.is_empty() => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(Error::invalid(
                Self::NAME,
                format!("expected an object, got {}", json_kind(other)),
            )),
        }
    }

    fn from_payload(payload: Option<&Value>) -> Result<Option<Self>> {
        match Self::parse_data(payload)? {
            Some(data) => Self::from_dict(data).map(Some),
            None => Ok(None),
        }
    }

    fn to_payload(&self) -> Result<Value> {
        Ok(Value::Object(self.to_dict()?))
    }
}

pub(crate) fn decode<T: DeserializeOwned>(name: &'static str, data: &JsonDict) -> Result<T> {
    serde_json::from_value(Value::Object(data.clone())).map_err(|e| Error::invalid(name, e))
}

/// Serialize `value` into a JSON object; anything else is an invalid payload.
pub fn encode<T: Serialize>(name: &'static str, value: &T) -> Result<JsonDict> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::invalid(
            name,
            format!("serialized to {} instead of an object", json_kind(&other)),
        )),
    }
}

pub(crate) fn is_false(b: &bool) -> bool {
    !*b
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Implements [`BaleObject`] through the type's serde derives.
macro_rules! serde_object {
    ($($ty:ty => $name:literal),+ $(,)?) => {
        $(
            impl $crate::object::BaleObject for $ty {
                const NAME: &'static str = $name;

                fn from_dict(data: &$crate::object::JsonDict) -> $crate::Result<Self> {
                    $crate::object::decode(Self::NAME, data)
                }

                fn to_dict(&self) -> $crate::Result<$crate::object::JsonDict> {
                    $crate::object::encode(Self::NAME, self)
                }
            }
        )+
    };
}

pub(crate) use serde_object;
