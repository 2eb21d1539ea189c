// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Lead, PointTable, Property, ScoredProperty};
pub use requests::{FindMatchesRequest, ScoreRequest};
pub use responses::{CacheStats, ErrorResponse, FindMatchesResponse, HealthResponse, ScoreResponse};
