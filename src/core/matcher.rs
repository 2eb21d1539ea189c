use crate::core::{filters::is_admissible, scoring::score_property};
use crate::models::{Lead, PointTable, Property, ScoredProperty};

/// Result of one matching run.
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredProperty>,
    pub total_properties: usize,
}

/// Main matching orchestrator - implements the four-stage pipeline.
///
/// # Pipeline stages
/// 1. Hard admission filter (Land/Plot rule)
/// 2. Additive per-criterion scoring
/// 3. Zero-score post-filter
/// 4. Ordering: within-budget first, then score, stable on ties
#[derive(Debug, Clone)]
pub struct Matcher {
    points: PointTable,
    budget_headroom: f64,
}

impl Matcher {
    pub fn new(points: PointTable, budget_headroom: f64) -> Self {
        Self {
            points,
            budget_headroom,
        }
    }

    /// Matcher with the stock point table and 10% budget headroom.
    pub fn with_default_policy() -> Self {
        Self::new(PointTable::default(), 0.10)
    }

    pub fn points(&self) -> &PointTable {
        &self.points
    }

    /// Rank the given properties for one lead.
    ///
    /// Pure and synchronous: every call recomputes the full result from
    /// its inputs, and nothing is retained between calls. Callers fetch
    /// the property list and re-invoke whenever the lead or the listings
    /// change; any caller-facing limit is applied after ranking, never
    /// here.
    pub fn find_matches(&self, lead: &Lead, properties: Vec<Property>) -> MatchResult {
        let total_properties = properties.len();

        let mut matches: Vec<ScoredProperty> = properties
            .into_iter()
            // Stage 1: admission filter
            .filter(|property| is_admissible(property, lead))
            // Stages 2 & 3: score, drop properties matching nothing
            .filter_map(|property| {
                let breakdown =
                    score_property(&property, lead, &self.points, self.budget_headroom);

                if breakdown.score > 0 {
                    Some(ScoredProperty {
                        property,
                        match_score: breakdown.score,
                        match_reasons: breakdown.reasons,
                        is_within_budget: breakdown.within_budget,
                    })
                } else {
                    None
                }
            })
            .collect();

        // Stage 4: within-budget rows always precede over-budget rows,
        // regardless of score; the sort is stable, so full ties keep
        // their fetch order.
        matches.sort_by(|a, b| {
            b.is_within_budget
                .cmp(&a.is_within_budget)
                .then_with(|| b.match_score.cmp(&a.match_score))
        });

        MatchResult {
            matches,
            total_properties,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_policy()
    }
}
