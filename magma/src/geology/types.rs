//! Geological unit and legend types.
//!
//! Field names on the wire follow the Macrostrat map-unit schema
//! (`t_age`, `b_age`, `lith`, `environ`, `strat_name`, `source_id`), which is
//! also what the description endpoint expects to receive back.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Color used for units whose source has no legend entry.
pub const DEFAULT_UNIT_COLOR: &str = "#cccccc";

/// One rock unit mapped at a probed location.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeologicalUnit {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    /// Youngest age of the unit in millions of years.
    #[serde(rename = "t_age", default, deserialize_with = "lenient_f64")]
    pub top_age_ma: f64,

    /// Oldest age of the unit in millions of years.
    #[serde(rename = "b_age", default, deserialize_with = "lenient_f64")]
    pub bottom_age_ma: f64,

    #[serde(
        rename = "lith",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub lithology: Option<String>,

    #[serde(
        rename = "environ",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub environment: Option<String>,

    #[serde(
        rename = "strat_name",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub stratigraphic_name: Option<String>,

    /// Identifier of the map source the unit came from; keys the legend.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_id: Option<String>,
}

/// Maps one map source to its display color.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub source_id: String,
    pub color: String,
}

/// Display colors keyed by source id.
///
/// An empty legend is valid and simply colors every unit with
/// [`DEFAULT_UNIT_COLOR`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Legend {
    colors: HashMap<String, String>,
}

impl Legend {
    /// Builds a legend from entries. The first entry for a source wins.
    pub fn from_entries(entries: impl IntoIterator<Item = LegendEntry>) -> Self {
        let mut colors = HashMap::new();
        for entry in entries {
            colors.entry(entry.source_id).or_insert(entry.color);
        }
        Self { colors }
    }

    /// Color for a unit, falling back to [`DEFAULT_UNIT_COLOR`].
    pub fn color_for(&self, unit: &GeologicalUnit) -> &str {
        unit.source_id
            .as_ref()
            .and_then(|id| self.colors.get(id))
            .map(String::as_str)
            .unwrap_or(DEFAULT_UNIT_COLOR)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Accepts a string, number or null; empty strings become `None`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts a number, numeric string or null; anything unusable becomes 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}
