use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use uuid::Uuid;

use crate::entries::dto::Entry;
use crate::foods::dto::Food;

/// The full entries list is displayed newest first; the daily summary keeps
/// server order instead.
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.eaten_at.cmp(&a.eaten_at));
}

/// Resolve the food for a new entry from the cached catalog, by id or by
/// exact name (case-insensitive). An entry can only reference a food that is
/// already in the cache.
pub fn resolve_food<'a>(catalog: &'a [Food], key: &str) -> Result<&'a Food, String> {
    if let Ok(id) = Uuid::parse_str(key) {
        return catalog
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| format!("no food with id {id} in the catalog"));
    }
    catalog
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(key))
        .ok_or_else(|| format!("no food named \"{key}\" in the catalog"))
}

/// Normalize the eaten-at input to one unambiguous instant. Accepts RFC 3339
/// or `YYYY-MM-DD HH:MM` (taken as UTC); absent means now.
pub fn parse_eaten_at(raw: Option<&str>) -> Result<OffsetDateTime, String> {
    let Some(raw) = raw else {
        return Ok(OffsetDateTime::now_utc());
    };
    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(at);
    }
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    PrimitiveDateTime::parse(raw, &format)
        .map(|dt| dt.assume_utc())
        .map_err(|_| format!("\"{raw}\" is not a timestamp (use RFC 3339 or YYYY-MM-DD HH:MM)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::dto::MealType;
    use time::macros::datetime;

    fn food(name: &str) -> Food {
        Food {
            id: Uuid::new_v4(),
            user_id: None,
            name: name.to_string(),
            category: "fruit".to_string(),
            calories: 105.0,
            protein: 1.3,
            carbs: 27.0,
            fats: 0.4,
            serving_size: 118.0,
            serving_unit: "g".to_string(),
            created_at: datetime!(2024-01-01 00:00 UTC),
        }
    }

    fn entry(name: &str, eaten_at: OffsetDateTime) -> Entry {
        Entry {
            id: Uuid::new_v4(),
            food_id: Uuid::new_v4(),
            food_name: name.to_string(),
            quantity: 1.0,
            meal_type: MealType::Breakfast,
            eaten_at,
            calories: 105.0,
            protein: 1.3,
            carbs: 27.0,
            fats: 0.4,
        }
    }

    #[test]
    fn sorts_newest_first() {
        let mut entries = vec![
            entry("Banana", datetime!(2024-01-01 08:00 UTC)),
            entry("Toast", datetime!(2024-01-01 08:05 UTC)),
            entry("Apple", datetime!(2023-12-31 20:00 UTC)),
        ];
        sort_newest_first(&mut entries);
        let names: Vec<_> = entries.iter().map(|e| e.food_name.as_str()).collect();
        assert_eq!(names, vec!["Toast", "Banana", "Apple"]);
    }

    #[test]
    fn resolves_by_id_and_by_name() {
        let catalog = vec![food("Banana"), food("Toast")];
        let id = catalog[1].id;
        assert_eq!(resolve_food(&catalog, &id.to_string()).expect("by id").name, "Toast");
        assert_eq!(resolve_food(&catalog, "banana").expect("by name").name, "Banana");
    }

    #[test]
    fn unknown_food_is_an_error() {
        let catalog = vec![food("Banana")];
        assert!(resolve_food(&catalog, "Pizza").is_err());
        assert!(resolve_food(&catalog, &Uuid::new_v4().to_string()).is_err());
    }

    #[test]
    fn eaten_at_accepts_both_forms_and_defaults_to_now() {
        let explicit = parse_eaten_at(Some("2024-01-01T08:00:00Z")).expect("rfc3339");
        assert_eq!(explicit, datetime!(2024-01-01 08:00 UTC));

        let simple = parse_eaten_at(Some("2024-01-01 08:00")).expect("simple");
        assert_eq!(simple, datetime!(2024-01-01 08:00 UTC));

        let now = parse_eaten_at(None).expect("default");
        assert!(now.year() >= 2024);

        assert!(parse_eaten_at(Some("yesterday")).is_err());
    }
}
