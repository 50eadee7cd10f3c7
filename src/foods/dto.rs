use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// One catalog record. Global records carry no owner; user-contributed ones
/// carry the contributing user's id and are the only deletable kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub id: Uuid,
    #[serde(default, deserialize_with = "owner_id")]
    pub user_id: Option<Uuid>,
    pub name: String,
    pub category: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub serving_size: f64,
    pub serving_unit: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Food {
    pub fn is_user_owned(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Request body for the add-food form.
#[derive(Debug, Serialize)]
pub struct CreateFoodRequest {
    pub name: String,
    pub category: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub serving_size: f64,
    pub serving_unit: String,
}

// The server marshals the owner of a global record as an empty string.
fn owner_id<'de, D>(de: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => Uuid::parse_str(s).map(Some).map_err(serde::de::Error::custom),
    }
}
