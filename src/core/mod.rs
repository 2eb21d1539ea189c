// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use filters::{amenities_overlap, contains_ci, is_admissible, non_blank, parse_amenities};
pub use matcher::{MatchResult, Matcher};
pub use scoring::{score_property, ScoreBreakdown};
