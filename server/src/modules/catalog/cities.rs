//! Metro labels and city filter expansion.

/// Metro labels cafes are listed under. "Bay" and "Bay Area" are the
/// same metro; older imports used the short label and newer ones the
/// long one, and both remain in storage.
pub const CITIES: [&str; 6] = ["LA", "OC", "Bay", "Bay Area", "Seattle", "NYC"];

/// Whether a label is one of the known metros.
pub fn is_known(city: &str) -> bool {
    CITIES.contains(&city)
}

/// Expand requested city labels into the set to match in storage.
///
/// `None` means no filter: an empty request, a blank entry, or the
/// literal "All" each widen the query to every city. Requesting either
/// Bay label matches cafes stored under both.
pub fn expand_filter(requested: &[String]) -> Option<Vec<String>> {
    let mut cities: Vec<String> = Vec::new();
    for raw in requested {
        let city = raw.trim();
        if city.is_empty() || city == "All" {
            return None;
        }
        if city == "Bay" || city == "Bay Area" {
            push_unique(&mut cities, "Bay");
            push_unique(&mut cities, "Bay Area");
        } else {
            push_unique(&mut cities, city);
        }
    }
    if cities.is_empty() {
        None
    } else {
        Some(cities)
    }
}

fn push_unique(cities: &mut Vec<String>, label: &str) {
    if !cities.iter().any(|c| c == label) {
        cities.push(label.to_string());
    }
}
