use tracing::{info, instrument};
use uuid::Uuid;

use crate::entries::dto::{CreateEntryRequest, Entry, MealType};
use crate::entries::services::{parse_eaten_at, resolve_food, sort_newest_first};
use crate::notify::Notice;
use crate::state::AppState;

/// Raw add-entry form fields.
#[derive(Debug)]
pub struct EntryForm {
    /// Food id or exact name; resolved against the cached catalog.
    pub food: String,
    pub quantity: String,
    pub meal_type: String,
    /// Absent means "now".
    pub eaten_at: Option<String>,
}

/// Fetch the full entries list and replace the retained view, newest first.
#[instrument(skip(state, view))]
pub async fn load_entries(state: &AppState, view: &mut Vec<Entry>) -> Notice {
    match state.api().list_entries().await {
        Ok(mut entries) => {
            sort_newest_first(&mut entries);
            info!(count = entries.len(), "entries loaded");
            *view = entries;
            Notice::success("entries loaded")
        }
        Err(e) => Notice::api_failure("failed to load entries", &e),
    }
}

#[instrument(skip(state, form))]
pub async fn add_entry(state: &AppState, form: &EntryForm) -> Notice {
    let food = match resolve_food(state.catalog(), &form.food) {
        Ok(f) => f,
        Err(reason) => return Notice::failure(reason),
    };
    let Ok(quantity) = form.quantity.parse::<f64>() else {
        return Notice::failure("quantity must be a number");
    };
    let Some(meal_type) = MealType::parse(&form.meal_type) else {
        return Notice::failure("meal type must be one of breakfast, lunch, dinner, snack");
    };
    let eaten_at = match parse_eaten_at(form.eaten_at.as_deref()) {
        Ok(at) => at,
        Err(reason) => return Notice::failure(reason),
    };

    let payload = CreateEntryRequest {
        food_id: food.id,
        quantity,
        meal_type,
        eaten_at,
    };
    match state.api().create_entry(&payload).await {
        Ok(entry) => {
            info!(entry_id = %entry.id, food = %entry.food_name, "entry logged");
            Notice::success(format!("logged {} x {}", entry.quantity, entry.food_name))
        }
        Err(e) => Notice::api_failure("failed to log entry", &e),
    }
}

#[instrument(skip(state))]
pub async fn delete_entry(state: &AppState, id: &str) -> Notice {
    let Ok(id) = Uuid::parse_str(id) else {
        return Notice::failure("not a valid entry id");
    };
    match state.api().delete_entry(id).await {
        Ok(()) => {
            info!(entry_id = %id, "entry deleted");
            Notice::success("entry deleted")
        }
        Err(e) => Notice::api_failure("failed to delete entry", &e),
    }
}
