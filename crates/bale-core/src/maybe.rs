use serde::{Serialize, Serializer};

/// An optional request parameter that distinguishes "not provided" from
/// "explicitly null".
///
/// `Missing` fields must be skipped on the wire
/// (`#[serde(skip_serializing_if = "MaybeMissing::is_missing")]`) so the
/// server applies its default; `Null` is sent as `null`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MaybeMissing<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Default for MaybeMissing<T> {
    fn default() -> Self {
        MaybeMissing::Missing
    }
}

impl<T> MaybeMissing<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, MaybeMissing::Missing)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, MaybeMissing::Null)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            MaybeMissing::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> MaybeMissing<&T> {
        match self {
            MaybeMissing::Missing => MaybeMissing::Missing,
            MaybeMissing::Null => MaybeMissing::Null,
            MaybeMissing::Value(v) => MaybeMissing::Value(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> MaybeMissing<U> {
        match self {
            MaybeMissing::Missing => MaybeMissing::Missing,
            MaybeMissing::Null => MaybeMissing::Null,
            MaybeMissing::Value(v) => MaybeMissing::Value(f(v)),
        }
    }

    /// Collapses `Missing` and `Null` into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            MaybeMissing::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<T> for MaybeMissing<T> {
    fn from(v: T) -> Self {
        MaybeMissing::Value(v)
    }
}

impl<T> From<Option<T>> for MaybeMissing<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => MaybeMissing::Value(v),
            None => MaybeMissing::Null,
        }
    }
}

impl<T: Serialize> Serialize for MaybeMissing<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MaybeMissing::Value(v) => v.serialize(serializer),
            MaybeMissing::Missing | MaybeMissing::Null => serializer.serialize_none(),
        }
    }
}
