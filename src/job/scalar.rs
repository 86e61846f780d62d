//! Lenient scalar deserialization.
//!
//! Description files are often hand-written YAML where `try_num: 1`,
//! `execution_time_limit: 60` or `-l select: 2` arrive as numbers rather than
//! strings. Job scripts only ever need their text form.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Any YAML/JSON scalar.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    pub(crate) fn into_text(self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Str(s) => s,
        }
    }
}

/// Deserialize an ordered `name -> scalar` mapping into strings.
///
/// Null values become empty strings. Insertion order is preserved.
pub(crate) fn string_map<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Option<Scalar>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, value.map(Scalar::into_text).unwrap_or_default()))
        .collect())
}

