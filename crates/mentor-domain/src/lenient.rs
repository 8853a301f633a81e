//! Tolerant field deserializers for model-produced JSON.
//!
//! Upstream models routinely emit `null` for strings, floats for integer
//! scores and quoted numbers. These helpers accept those shapes instead of
//! rejecting the whole object.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// `null` becomes `T::default()`.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Int(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

impl Number {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Number::Int(i) => Some(*i as f64),
            Number::Float(f) if f.is_finite() => Some(*f),
            Number::Float(_) => None,
            Number::Text(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
            Number::Flag(_) => None,
        }
    }
}

/// Score in 0..=100. Floats are rounded, numeric strings parsed, anything
/// unreadable counts as 0.
pub(crate) fn score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Number>::deserialize(deserializer)?
        .and_then(|n| n.as_f64())
        .unwrap_or(0.0);
    Ok(clamp_score(value))
}

/// Clamp an arbitrary number into the 0..=100 score range.
pub(crate) fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Line numbers: zero, negative or unreadable values mean "unknown".
pub(crate) fn line_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Number>::deserialize(deserializer)?.and_then(|n| n.as_f64());
    Ok(match value {
        Some(v) if v >= 1.0 && v <= u32::MAX as f64 => Some(v.round() as u32),
        _ => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Label {
    Text(String),
    Other(IgnoredAny),
}

/// Labels: a string goes through `T::from`, any other value is `T::default()`.
pub(crate) fn label<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    Ok(match Label::deserialize(deserializer)? {
        Label::Text(s) => T::from(s),
        Label::Other(_) => T::default(),
    })
}

/// String lists: `null` is empty, non-string entries are dropped.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Label>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Label::Text(s) => Some(s),
            Label::Other(_) => None,
        })
        .collect())
}

/// Booleans may arrive as `"true"` / `"false"` strings.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Number>::deserialize(deserializer)? {
        Some(Number::Flag(b)) => b,
        Some(Number::Text(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes"),
        Some(Number::Int(i)) => i != 0,
        _ => false,
    })
}
