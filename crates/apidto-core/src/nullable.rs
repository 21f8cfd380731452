//! Serde helpers for fields that are both optional and nullable.
//!
//! `Option<Option<T>>` keeps the three states apart: `None` for a missing
//! key, `Some(None)` for `null`, `Some(Some(v))` for a value.
//!
//! ```rust,ignore
//! #[derive(Serialize, Deserialize)]
//! struct UpdatePet {
//!     #[serde(default, with = "apidto::nullable", skip_serializing_if = "Option::is_none")]
//!     nickname: Option<Option<String>>,
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(inner) => inner.serialize(serializer),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
