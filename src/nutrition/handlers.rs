use time::Date;
use tracing::{info, instrument};

use crate::notify::Notice;
use crate::nutrition::dto::{DailySummary, Goals};
use crate::nutrition::services::today;
use crate::state::AppState;

/// Retained dashboard state: the selected date and the last summary that
/// loaded successfully. A failed load moves the date but keeps the summary,
/// so the previously displayed totals survive.
pub struct Dashboard {
    pub date: Date,
    pub summary: Option<DailySummary>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            date: today(),
            summary: None,
        }
    }
}

/// The four-field goals form, hydrated on load and kept in sync with
/// whatever the user last submitted.
pub struct GoalsPane {
    pub form: Option<Goals>,
}

impl GoalsPane {
    pub fn new() -> Self {
        Self { form: None }
    }
}

#[instrument(skip(state, dash))]
pub async fn load_summary(state: &AppState, dash: &mut Dashboard, date: Option<Date>) -> Notice {
    if let Some(date) = date {
        dash.date = date;
    }
    match state.api().daily_summary(dash.date).await {
        Ok(summary) => {
            info!(date = %summary.date, entries = summary.entries.len(), "summary loaded");
            dash.summary = Some(summary);
            Notice::success("summary loaded")
        }
        Err(e) => Notice::api_failure("failed to load daily summary", &e),
    }
}

#[instrument(skip(state, pane))]
pub async fn load_goals(state: &AppState, pane: &mut GoalsPane) -> Notice {
    match state.api().goals().await {
        Ok(goals) => {
            pane.form = Some(goals);
            Notice::success("goals loaded")
        }
        Err(e) => Notice::api_failure("failed to load goals", &e),
    }
}

/// Replace all four goal values in one call. The form keeps the submitted
/// values whether the server accepts them or not, and no re-fetch happens on
/// success; the server's acceptance is the truth.
#[instrument(skip(state, pane))]
pub async fn update_goals(
    state: &AppState,
    pane: &mut GoalsPane,
    calories: &str,
    protein: &str,
    carbs: &str,
    fats: &str,
) -> Notice {
    let goals = match parse_goals_form(calories, protein, carbs, fats) {
        Ok(g) => g,
        Err(notice) => return notice,
    };

    pane.form = Some(goals);
    match state.api().update_goals(&goals).await {
        Ok(()) => {
            info!("goals updated");
            Notice::success("goals updated")
        }
        Err(e) => Notice::api_failure("failed to update goals", &e),
    }
}

/// All four fields must parse to a number; negative or zero values are the
/// server's problem, not ours.
fn parse_goals_form(calories: &str, protein: &str, carbs: &str, fats: &str) -> Result<Goals, Notice> {
    Ok(Goals {
        daily_calorie_goal: goal_number("calorie goal", calories)?,
        daily_protein_goal: goal_number("protein goal", protein)?,
        daily_carbs_goal: goal_number("carbs goal", carbs)?,
        daily_fats_goal: goal_number("fats goal", fats)?,
    })
}

fn goal_number(field: &str, raw: &str) -> Result<f64, Notice> {
    raw.parse::<f64>()
        .map_err(|_| Notice::failure(format!("{field} must be a number")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::handlers::register;
    use crate::entries::handlers::{add_entry, EntryForm};
    use crate::foods::handlers::{add_food, reload_catalog, FoodForm};
    use crate::nutrition::services::parse_date;

    fn food_form(name: &str, calories: &str, protein: &str) -> FoodForm {
        FoodForm {
            name: name.to_string(),
            category: "misc".to_string(),
            calories: calories.to_string(),
            protein: protein.to_string(),
            carbs: "0".to_string(),
            fats: "0".to_string(),
            serving_size: "1".to_string(),
            serving_unit: "piece".to_string(),
        }
    }

    fn entry_form(food: &str, at: &str) -> EntryForm {
        EntryForm {
            food: food.to_string(),
            quantity: "1".to_string(),
            meal_type: "breakfast".to_string(),
            eaten_at: Some(at.to_string()),
        }
    }

    #[tokio::test]
    async fn empty_date_yields_zero_totals_and_no_entries() {
        let mut state = AppState::fake();
        register(&mut state, "Jo", "jo@example.com", "secret").await;

        let mut dash = Dashboard::new();
        let notice = load_summary(&state, &mut dash, parse_date("2024-01-01")).await;
        assert!(notice.is_success());

        let summary = dash.summary.expect("loaded");
        assert_eq!(summary.calories, 0.0);
        assert_eq!(summary.protein, 0.0);
        assert_eq!(summary.carbs, 0.0);
        assert_eq!(summary.fats, 0.0);
        assert!(summary.entries.is_empty());
    }

    #[tokio::test]
    async fn totals_equal_the_sum_of_contributions_in_server_order() {
        let mut state = AppState::fake();
        register(&mut state, "Jo", "jo@example.com", "secret").await;
        add_food(&state, &food_form("Banana", "105", "1.3")).await;
        add_food(&state, &food_form("Toast", "120", "4")).await;
        reload_catalog(&mut state).await;
        add_entry(&state, &entry_form("Banana", "2024-01-01T08:00:00Z")).await;
        add_entry(&state, &entry_form("Toast", "2024-01-01T08:05:00Z")).await;

        let mut dash = Dashboard::new();
        load_summary(&state, &mut dash, parse_date("2024-01-01")).await;

        let summary = dash.summary.expect("loaded");
        assert_eq!(summary.calories, 225.0);
        let per_entry: f64 = summary.entries.iter().map(|e| e.calories).sum();
        assert_eq!(summary.calories, per_entry);

        let names: Vec<_> = summary.entries.iter().map(|e| e.food_name.as_str()).collect();
        assert_eq!(names, vec!["Banana", "Toast"]);
    }

    #[tokio::test]
    async fn failed_load_keeps_the_previous_summary() {
        let (mut state, api) = AppState::fake_with_handle();
        register(&mut state, "Jo", "jo@example.com", "secret").await;

        let mut dash = Dashboard::new();
        load_summary(&state, &mut dash, parse_date("2024-01-01")).await;
        assert!(dash.summary.is_some());

        api.set_outage(true);
        let notice = load_summary(&state, &mut dash, parse_date("2024-01-02")).await;
        assert!(!notice.is_success());

        let summary = dash.summary.expect("previous summary retained");
        assert_eq!(summary.date, "2024-01-01");
    }

    #[tokio::test]
    async fn goals_round_trip_through_the_server() {
        let mut state = AppState::fake();
        register(&mut state, "Jo", "jo@example.com", "secret").await;

        let mut pane = GoalsPane::new();
        let notice = update_goals(&state, &mut pane, "1800", "140", "200", "60").await;
        assert!(notice.is_success());

        let mut refetched = GoalsPane::new();
        load_goals(&state, &mut refetched).await;
        assert_eq!(refetched.form, pane.form);
        assert_eq!(refetched.form.expect("goals").daily_calorie_goal, 1800.0);
    }

    #[tokio::test]
    async fn fresh_registration_sees_the_server_defaults() {
        let mut state = AppState::fake();
        register(&mut state, "Jo", "jo@example.com", "secret").await;

        let mut pane = GoalsPane::new();
        load_goals(&state, &mut pane).await;
        let goals = pane.form.expect("goals");
        assert_eq!(goals.daily_calorie_goal, 2000.0);
        assert_eq!(goals.daily_protein_goal, 150.0);
    }

    #[tokio::test]
    async fn rejected_update_keeps_the_entered_values() {
        let (mut state, api) = AppState::fake_with_handle();
        register(&mut state, "Jo", "jo@example.com", "secret").await;
        api.set_outage(true);

        let mut pane = GoalsPane::new();
        let notice = update_goals(&state, &mut pane, "1800", "140", "200", "60").await;
        assert!(!notice.is_success());
        assert_eq!(pane.form.expect("entered values").daily_calorie_goal, 1800.0);
    }

    #[tokio::test]
    async fn non_numeric_goal_fails_before_any_request() {
        let state = AppState::fake();
        let mut pane = GoalsPane::new();
        let notice = update_goals(&state, &mut pane, "lots", "140", "200", "60").await;
        assert!(!notice.is_success());
        assert!(notice.message.contains("calorie goal must be a number"));
        assert!(pane.form.is_none());
    }
}
