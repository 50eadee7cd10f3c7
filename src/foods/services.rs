use crate::foods::dto::Food;

/// Client-side catalog filter: case-insensitive substring match on name or
/// category. Runs over the cached list, never over the network.
pub fn search<'a>(foods: &'a [Food], query: &str) -> Vec<&'a Food> {
    let query = query.to_lowercase();
    foods
        .iter()
        .filter(|f| {
            f.name.to_lowercase().contains(&query) || f.category.to_lowercase().contains(&query)
        })
        .collect()
}

/// Options for the entry form's food selector, in cache order.
pub fn selector_options(foods: &[Food]) -> Vec<String> {
    foods
        .iter()
        .map(|f| format!("{} ({} cal)", f.name, f.calories))
        .collect()
}
