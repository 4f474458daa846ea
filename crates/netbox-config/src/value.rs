use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An attribute as the host hands it over.
///
/// A missing key deserializes to `Absent` (with `#[serde(default)]` on the
/// containing struct), an explicit `null` to `Null`, anything else to `Set`.
/// `Unknown` means the host has not computed the value yet; it only ever
/// comes from code, never from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue<T> {
    Absent,
    Null,
    Unknown,
    Set(T),
}

impl<T> Default for ConfigValue<T> {
    fn default() -> Self {
        ConfigValue::Absent
    }
}

impl<T> ConfigValue<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, ConfigValue::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ConfigValue::Unknown)
    }

    /// The explicitly set value, if any.
    pub fn explicit(&self) -> Option<&T> {
        match self {
            ConfigValue::Set(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Clone> ConfigValue<T> {
    /// Explicit value if set, otherwise whatever `fallback` yields.
    ///
    /// `Absent` and `Null` both fall through. `Unknown` also yields the
    /// fallback; callers guard against it before selecting.
    pub fn or_fallback(&self, fallback: impl FnOnce() -> Option<T>) -> Option<T> {
        match self {
            ConfigValue::Set(v) => Some(v.clone()),
            _ => fallback(),
        }
    }
}

impl<T> From<T> for ConfigValue<T> {
    fn from(v: T) -> Self {
        ConfigValue::Set(v)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ConfigValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => ConfigValue::Set(v),
            None => ConfigValue::Null,
        })
    }
}

impl<T: Serialize> Serialize for ConfigValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Set(v) => v.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}
