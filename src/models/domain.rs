use serde::{Deserialize, Serialize};

/// A prospective customer with stated property preferences.
///
/// Field names mirror the `leads` table columns in the hosted backend;
/// every preference column is nullable and an absent value means the
/// criterion simply does not apply to this lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub preferred_property_type: Option<String>,
    #[serde(default)]
    pub preferred_location: Option<String>,
    #[serde(default)]
    pub preferred_bedrooms: Option<i32>,
    #[serde(default)]
    pub preferred_bathrooms: Option<i32>,
    #[serde(default)]
    pub preferred_area: Option<String>,
    #[serde(default)]
    pub preferred_amenities: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Lead {
    /// The budget the lead actually stated, if any.
    ///
    /// A zero or negative value behaves like no budget at all, so the
    /// budget criterion never fires on it.
    pub fn stated_budget(&self) -> Option<f64> {
        self.budget.filter(|b| *b > 0.0)
    }
}

/// A real-estate listing row from the `properties` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default)]
    pub status: String,
    pub current_price: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<i32>,
    #[serde(default)]
    pub bathrooms: Option<i32>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub amenities: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Property {
    /// Whether this listing is bare land ("Land" or "Plot" typed).
    ///
    /// Such listings are only admitted for leads that explicitly prefer
    /// one of those two types.
    pub fn is_land_or_plot(&self) -> bool {
        self.property_type == "Land" || self.property_type == "Plot"
    }
}

/// A property annotated with its match outcome for one lead.
///
/// The listing fields serialize under their column names; the computed
/// keys use the camelCase names the CRM frontend consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProperty {
    #[serde(flatten)]
    pub property: Property,
    #[serde(rename = "matchScore")]
    pub match_score: u32,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
    #[serde(rename = "isWithinBudget")]
    pub is_within_budget: bool,
}

/// Points awarded per satisfied criterion.
///
/// The defaults sum to 100 and are product policy, not an engineering
/// choice; deployments override them through the `scoring` config
/// section.
#[derive(Debug, Clone, Copy)]
pub struct PointTable {
    pub budget: u32,
    pub property_type: u32,
    pub location: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: u32,
    pub amenities: u32,
}

impl PointTable {
    /// Highest score a property can reach with every criterion satisfied.
    pub fn max_score(&self) -> u32 {
        self.budget
            + self.property_type
            + self.location
            + self.bedrooms
            + self.bathrooms
            + self.area
            + self.amenities
    }
}

impl Default for PointTable {
    fn default() -> Self {
        Self {
            budget: 40,
            property_type: 15,
            location: 15,
            bedrooms: 10,
            bathrooms: 10,
            area: 5,
            amenities: 5,
        }
    }
}
