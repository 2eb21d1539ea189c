use crate::models::{Lead, Property};

/// Check whether a property may enter scoring for the given lead.
///
/// This is Stage 1 of the pipeline: a binary admission filter, never a
/// scored criterion. Bare land ("Land"/"Plot" typed listings) is hidden
/// from every lead that did not explicitly ask for one of those types.
#[inline]
pub fn is_admissible(property: &Property, lead: &Lead) -> bool {
    if !property.is_land_or_plot() {
        return true;
    }

    matches!(
        lead.preferred_property_type.as_deref(),
        Some("Land") | Some("Plot")
    )
}

/// Reduce an optional free-text field to a usable value.
///
/// `None` and blank strings both mean "not stated"; the original value is
/// returned untrimmed so substring matching sees exactly what the agent
/// typed.
#[inline]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Case-insensitive substring containment.
///
/// Location and area preferences match as substrings ("Marina" matches
/// "Dubai Marina District"), not as exact values.
#[inline]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Split a comma-separated amenity string into trimmed tokens.
///
/// Blank tokens are dropped, so malformed input like "pool,,gym," just
/// yields fewer tokens instead of failing.
pub fn parse_amenities(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Whether the lead's and the property's amenity token sets intersect.
///
/// Any overlap counts; a full match is not required.
#[inline]
pub fn amenities_overlap(lead_amenities: &str, property_amenities: &str) -> bool {
    let wanted = parse_amenities(lead_amenities);
    if wanted.is_empty() {
        return false;
    }

    parse_amenities(property_amenities)
        .iter()
        .any(|token| wanted.contains(token))
}
