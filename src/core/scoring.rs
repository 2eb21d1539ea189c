use crate::core::filters::{amenities_overlap, contains_ci, non_blank};
use crate::models::{Lead, PointTable, Property};

/// Reason labels appended to `matchReasons`, one per satisfied criterion.
/// The CRM frontend renders these strings verbatim.
pub const REASON_WITHIN_BUDGET: &str = "Within Budget";
pub const REASON_PROPERTY_TYPE: &str = "Property Type";
pub const REASON_LOCATION: &str = "Location";
pub const REASON_BEDROOMS: &str = "Bedrooms";
pub const REASON_BATHROOMS: &str = "Bathrooms";
pub const REASON_AREA: &str = "Area";
pub const REASON_AMENITIES: &str = "Amenities";

/// Outcome of scoring one property against one lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub score: u32,
    pub reasons: Vec<String>,
    pub within_budget: bool,
}

/// Score a property against a lead's stated preferences.
///
/// Scoring formula (default point table, 100 max):
///
/// ```text
/// budget within headroom  40
/// property type exact     15
/// location substring      15
/// bedrooms exact          10
/// bathrooms exact         10
/// area substring           5
/// amenity overlap          5
/// ```
///
/// Criteria are independent and additive with no early exit. A criterion
/// whose lead-side field is absent or blank is not applicable and scores
/// nothing; that is never an error.
pub fn score_property(
    property: &Property,
    lead: &Lead,
    points: &PointTable,
    budget_headroom: f64,
) -> ScoreBreakdown {
    let mut score = 0;
    let mut reasons = Vec::new();

    // Budget: the price may exceed the stated budget by the headroom
    // factor (10% by default). The outcome doubles as the primary sort
    // key downstream, separate from the points it contributes.
    let within_budget = lead
        .stated_budget()
        .is_some_and(|budget| property.current_price <= budget * (1.0 + budget_headroom));
    if within_budget {
        score += points.budget;
        reasons.push(REASON_WITHIN_BUDGET.to_string());
    }

    // Property type: exact match only.
    if let Some(wanted) = non_blank(lead.preferred_property_type.as_deref()) {
        if property.property_type == wanted {
            score += points.property_type;
            reasons.push(REASON_PROPERTY_TYPE.to_string());
        }
    }

    // Location: the stated location as a case-insensitive substring of
    // the listing's location, not an exact comparison.
    if let (Some(wanted), Some(location)) = (
        non_blank(lead.preferred_location.as_deref()),
        property.location.as_deref(),
    ) {
        if contains_ci(location, wanted) {
            score += points.location;
            reasons.push(REASON_LOCATION.to_string());
        }
    }

    // Bedrooms: exact count.
    if let Some(wanted) = lead.preferred_bedrooms {
        if property.bedrooms == Some(wanted) {
            score += points.bedrooms;
            reasons.push(REASON_BEDROOMS.to_string());
        }
    }

    // Bathrooms: exact count.
    if let Some(wanted) = lead.preferred_bathrooms {
        if property.bathrooms == Some(wanted) {
            score += points.bathrooms;
            reasons.push(REASON_BATHROOMS.to_string());
        }
    }

    // Area: free text, case-insensitive substring like location.
    if let (Some(wanted), Some(area)) = (
        non_blank(lead.preferred_area.as_deref()),
        property.area.as_deref(),
    ) {
        if contains_ci(area, wanted) {
            score += points.area;
            reasons.push(REASON_AREA.to_string());
        }
    }

    // Amenities: both sides are comma-separated free text; any overlap of
    // the trimmed token sets counts.
    if let (Some(wanted), Some(available)) = (
        non_blank(lead.preferred_amenities.as_deref()),
        property.amenities.as_deref(),
    ) {
        if amenities_overlap(wanted, available) {
            score += points.amenities;
            reasons.push(REASON_AMENITIES.to_string());
        }
    }

    ScoreBreakdown {
        score,
        reasons,
        within_budget,
    }
}
