use serde::{Deserialize, Deserializer, Serialize};

use crate::entries::dto::Entry;

/// Server-computed aggregation for one calendar date. The totals are the sums
/// of the per-entry contributions in `entries`; the client trusts that
/// arithmetic and never recomputes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub entries: Vec<Entry>,
}

/// Daily target values, read and replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    pub daily_calorie_goal: f64,
    pub daily_protein_goal: f64,
    pub daily_carbs_goal: f64,
    pub daily_fats_goal: f64,
}

// A date with no entries arrives as "entries": null.
fn null_as_empty<'de, D>(de: D) -> Result<Vec<Entry>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Entry>>::deserialize(de)?;
    Ok(entries.unwrap_or_default())
}
