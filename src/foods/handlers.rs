use tracing::{info, instrument};
use uuid::Uuid;

use crate::foods::dto::CreateFoodRequest;
use crate::notify::Notice;
use crate::state::AppState;

/// Raw add-food form fields. Numeric fields are kept as entered until
/// submission, where each must parse; nothing else is checked client-side.
#[derive(Debug)]
pub struct FoodForm {
    pub name: String,
    pub category: String,
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
    pub serving_size: String,
    pub serving_unit: String,
}

impl FoodForm {
    fn parse(&self) -> Result<CreateFoodRequest, Notice> {
        Ok(CreateFoodRequest {
            name: self.name.clone(),
            category: self.category.clone(),
            calories: numeric("calories", &self.calories)?,
            protein: numeric("protein", &self.protein)?,
            carbs: numeric("carbs", &self.carbs)?,
            fats: numeric("fats", &self.fats)?,
            serving_size: numeric("serving size", &self.serving_size)?,
            serving_unit: self.serving_unit.clone(),
        })
    }
}

fn numeric(field: &str, raw: &str) -> Result<f64, Notice> {
    raw.parse::<f64>()
        .map_err(|_| Notice::failure(format!("{field} must be a number")))
}

/// Replace the in-memory catalog with the server's current list. Called once
/// after login and again after every add or delete.
#[instrument(skip(state))]
pub async fn reload_catalog(state: &mut AppState) -> Notice {
    match state.api().list_foods().await {
        Ok(foods) => {
            info!(count = foods.len(), "catalog loaded");
            state.replace_catalog(foods);
            Notice::success("catalog loaded")
        }
        Err(e) => Notice::api_failure("failed to load foods", &e),
    }
}

#[instrument(skip(state, form))]
pub async fn add_food(state: &AppState, form: &FoodForm) -> Notice {
    let payload = match form.parse() {
        Ok(p) => p,
        Err(notice) => return notice,
    };
    match state.api().create_food(&payload).await {
        Ok(food) => {
            info!(food_id = %food.id, name = %food.name, "food added");
            Notice::success(format!("added {}", food.name))
        }
        Err(e) => Notice::api_failure("failed to add food", &e),
    }
}

/// Delete a user-contributed food. Global records never offer deletion, so
/// the request is refused locally before anything goes over the wire.
#[instrument(skip(state))]
pub async fn delete_food(state: &AppState, id: &str) -> Notice {
    let Ok(id) = Uuid::parse_str(id) else {
        return Notice::failure("not a valid food id");
    };
    let Some(food) = state.find_food(id) else {
        return Notice::failure("no such food in the catalog");
    };
    if !food.is_user_owned() {
        return Notice::failure("global catalog foods cannot be deleted");
    }

    match state.api().delete_food(id).await {
        Ok(()) => {
            info!(food_id = %id, "food deleted");
            Notice::success("food deleted")
        }
        Err(e) => Notice::api_failure("failed to delete food", &e),
    }
}
