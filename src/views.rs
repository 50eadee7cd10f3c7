use time::macros::format_description;
use time::OffsetDateTime;

use crate::entries::dto::Entry;
use crate::foods::dto::Food;
use crate::foods::services::{search, selector_options};
use crate::nutrition::handlers::{Dashboard, GoalsPane};
use crate::nutrition::services::format_date;

/// Dashboard region: four totals plus the day's entries in server order.
/// Calories are shown with no decimals, macros with one and a `g` suffix.
pub fn render_dashboard(dash: &Dashboard) -> String {
    let Some(summary) = &dash.summary else {
        return format!("no summary loaded for {} yet\n", format_date(dash.date));
    };

    let mut out = String::new();
    out.push_str(&format!("daily summary for {}\n", summary.date));
    out.push_str(&format!(
        "  calories {}   protein {}   carbs {}   fats {}\n\n",
        format!("{:.0}", summary.calories),
        format!("{:.1}g", summary.protein),
        format!("{:.1}g", summary.carbs),
        format!("{:.1}g", summary.fats),
    ));

    out.push_str(&format!(
        "  {:<6} {:<10} {:<20} {:>6} {:>9} {:>8}\n",
        "time", "meal", "food", "qty", "calories", "protein"
    ));
    if summary.entries.is_empty() {
        out.push_str("  no entries for this date\n");
        return out;
    }
    for entry in &summary.entries {
        out.push_str(&format!(
            "  {:<6} {:<10} {:<20} {:>6} {:>9} {:>8}\n",
            clock(entry.eaten_at),
            entry.meal_type.to_string(),
            entry.food_name,
            entry.quantity,
            format!("{:.0}", entry.calories),
            format!("{:.1}g", entry.protein),
        ));
    }
    out
}

/// Foods region: the cached catalog, optionally narrowed by a client-side
/// search query. Only user-contributed records get a delete action.
pub fn render_foods(catalog: &[Food], query: Option<&str>) -> String {
    let rows: Vec<&Food> = match query {
        Some(q) => search(catalog, q),
        None => catalog.iter().collect(),
    };

    let mut out = String::new();
    out.push_str(&format!(
        "  {:<36} {:<20} {:<12} {:>8} {:>8} {:>8} {:>8} {:<10} {}\n",
        "id", "name", "category", "calories", "protein", "carbs", "fats", "serving", "actions"
    ));
    if rows.is_empty() {
        out.push_str("  no foods found\n");
        return out;
    }
    for food in rows {
        out.push_str(&format!(
            "  {:<36} {:<20} {:<12} {:>8} {:>8} {:>8} {:>8} {:<10} {}\n",
            food.id,
            food.name,
            food.category,
            food.calories,
            format!("{}g", food.protein),
            format!("{}g", food.carbs),
            format!("{}g", food.fats),
            format!("{}{}", food.serving_size, food.serving_unit),
            if food.is_user_owned() { "delete" } else { "-" },
        ));
    }
    out
}

/// Entries region: the retained full list (already newest first), plus the
/// food selector the add-entry form draws from.
pub fn render_entries(entries: &[Entry], catalog: &[Food]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  {:<36} {:<10} {:<6} {:<10} {:<20} {:>6} {:>9}\n",
        "id", "date", "time", "meal", "food", "qty", "calories"
    ));
    if entries.is_empty() {
        out.push_str("  no entries logged\n");
    }
    for entry in entries {
        out.push_str(&format!(
            "  {:<36} {:<10} {:<6} {:<10} {:<20} {:>6} {:>9}\n",
            entry.id,
            day(entry.eaten_at),
            clock(entry.eaten_at),
            entry.meal_type.to_string(),
            entry.food_name,
            entry.quantity,
            format!("{:.0}", entry.calories),
        ));
    }
    if !catalog.is_empty() {
        out.push_str(&format!("\n  foods: {}\n", selector_options(catalog).join(", ")));
    }
    out
}

/// Goals region: the four-field form as last hydrated or submitted.
pub fn render_goals(pane: &GoalsPane) -> String {
    let Some(goals) = &pane.form else {
        return "goals not loaded yet\n".to_string();
    };
    format!(
        "daily goals\n  calories {}\n  protein  {}\n  carbs    {}\n  fats     {}\n",
        goals.daily_calorie_goal,
        goals.daily_protein_goal,
        goals.daily_carbs_goal,
        goals.daily_fats_goal,
    )
}

fn clock(at: OffsetDateTime) -> String {
    at.format(&format_description!("[hour]:[minute]"))
        .expect("time of day always formats")
}

fn day(at: OffsetDateTime) -> String {
    at.format(&format_description!("[year]-[month]-[day]"))
        .expect("calendar date always formats")
}
