// Diagnostic metadata attached to an outcome

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Metadata keyed by name. `BTreeMap` keeps keys sorted at every level,
/// which is the order the YAML block is emitted in.
pub type Metadata = BTreeMap<String, MetaValue>;

/// A metadata value: scalar, sequence or nested mapping.
///
/// Null entries in sequences and mappings are dropped on deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(#[serde(deserialize_with = "deserialize_sequence")] Vec<MetaValue>),
    Mapping(#[serde(deserialize_with = "deserialize_mapping")] BTreeMap<String, MetaValue>),
}

fn deserialize_sequence<'de, D>(deserializer: D) -> Result<Vec<MetaValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Option<MetaValue>>::deserialize(deserializer)?;
    Ok(values.into_iter().flatten().collect())
}

fn deserialize_mapping<'de, D>(deserializer: D) -> Result<Metadata, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = BTreeMap::<String, Option<MetaValue>>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect())
}

/// Deserialize optional metadata, dropping keys whose value is null
pub fn deserialize_metadata<'de, D>(deserializer: D) -> Result<Option<Metadata>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct NonNull(#[serde(deserialize_with = "deserialize_mapping")] Metadata);

    Ok(Option::<NonNull>::deserialize(deserializer)?.map(|NonNull(metadata)| metadata))
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for MetaValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for MetaValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<MetaValue>> From<Vec<T>> for MetaValue {
    fn from(values: Vec<T>) -> Self {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, MetaValue>> for MetaValue {
    fn from(map: BTreeMap<String, MetaValue>) -> Self {
        Self::Mapping(map)
    }
}

/// Source location of a test, as `file` / `line` / `column` metadata
pub fn location_metadata(location: &std::panic::Location<'_>) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("column".to_string(), location.column().into());
    metadata.insert("file".to_string(), location.file().into());
    metadata.insert("line".to_string(), location.line().into());
    metadata
}
