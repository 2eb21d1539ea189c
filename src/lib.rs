//! Lead-to-property matching service for a multi-tenant real-estate CRM.
//!
//! The crate scores a lead's stated preferences against the tenant's
//! available listings and returns a ranked shortlist. The pipeline lives
//! in [`core`], row models in [`models`], the Supabase REST client and
//! Redis/in-process cache in [`services`], and the actix-web surface in
//! [`routes`].

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

pub use crate::core::{MatchResult, Matcher};
pub use crate::models::{
    FindMatchesRequest, FindMatchesResponse, Lead, PointTable, Property, ScoredProperty,
};
