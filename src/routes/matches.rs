use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::Matcher;
use crate::models::{
    ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse, Property,
    ScoreRequest, ScoreResponse,
};
use crate::services::{CacheKey, CacheManager, SupabaseClient, SupabaseError};
use std::sync::Arc;

/// Result-count policy for the find endpoint.
#[derive(Debug, Clone, Copy)]
pub struct MatchLimits {
    pub default: u16,
    pub max: u16,
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    /// Absent when no Redis is configured; requests then go straight to
    /// the backend.
    pub cache: Option<Arc<CacheManager>>,
    pub matcher: Matcher,
    pub limits: MatchLimits,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/score", web::post().to(score_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let backend_healthy = state.supabase.health_check().await.unwrap_or(false);

    let status = if backend_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache: state.cache.as_ref().map(|cache| cache.stats()),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "leadId": "string",
///   "limit": 20
/// }
/// ```
///
/// Loads the lead, loads the tenant's available properties (through the
/// cache when one is configured), runs the scoring pipeline and returns
/// the ranked matches.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
            error_id: None,
        });
    }

    let lead_id = &req.lead_id;
    let limit = effective_limit(req.limit, state.limits);

    tracing::info!("Finding matches for lead: {}, limit: {}", lead_id, limit);

    let lead = match state.supabase.get_lead(lead_id).await {
        Ok(lead) => lead,
        Err(SupabaseError::NotFound(message)) => {
            tracing::info!("Lead {} not found", lead_id);
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Lead not found".to_string(),
                message,
                status_code: 404,
                error_id: None,
            });
        }
        Err(e) => return upstream_error("Failed to fetch lead", e),
    };

    let properties = match load_properties(&state, &lead.tenant_id).await {
        Ok(properties) => properties,
        Err(e) => return upstream_error("Failed to fetch properties", e),
    };

    let result = state.matcher.find_matches(&lead, properties);

    let mut matches = result.matches;
    matches.truncate(limit);

    tracing::info!(
        "Returning {} matches for lead {} (from {} properties)",
        matches.len(),
        lead_id,
        result.total_properties
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        lead_id: lead_id.clone(),
        matches,
        total_properties: result.total_properties,
    })
}

/// Inline scoring endpoint
///
/// POST /api/v1/matches/score
///
/// Request body:
/// ```json
/// {
///   "lead": { ... },
///   "properties": [ ... ]
/// }
/// ```
///
/// Runs the pipeline over a caller-supplied lead and property list with
/// no backend access. Used for scoring-policy tuning and support
/// debugging.
async fn score_matches(state: web::Data<AppState>, req: web::Json<ScoreRequest>) -> impl Responder {
    let ScoreRequest { lead, properties } = req.into_inner();

    tracing::debug!(
        "Scoring {} inline properties against lead {}",
        properties.len(),
        lead.id
    );

    let result = state.matcher.find_matches(&lead, properties);

    HttpResponse::Ok().json(ScoreResponse {
        matches: result.matches,
        total_properties: result.total_properties,
    })
}

/// Load the tenant's available properties, consulting the cache first.
///
/// Cache writes are best-effort: a failed write logs and the response
/// still goes out.
async fn load_properties(
    state: &AppState,
    tenant_id: &str,
) -> Result<Vec<Property>, SupabaseError> {
    let key = CacheKey::properties(tenant_id);

    if let Some(cache) = &state.cache {
        if let Ok(properties) = cache.get::<Vec<Property>>(&key).await {
            tracing::debug!("Property list for tenant {} served from cache", tenant_id);
            return Ok(properties);
        }
    }

    let properties = state.supabase.list_available_properties(tenant_id).await?;

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.set(&key, &properties).await {
            tracing::warn!("Failed to cache property list for {}: {}", tenant_id, e);
        }
    }

    Ok(properties)
}

fn effective_limit(requested: Option<u16>, limits: MatchLimits) -> usize {
    requested.unwrap_or(limits.default).min(limits.max) as usize
}

/// 502 envelope carrying a generated identifier that is also logged, so
/// a support report can be matched to the server logs.
fn upstream_error(error: &str, source: SupabaseError) -> HttpResponse {
    let error_id = uuid::Uuid::new_v4().to_string();

    tracing::error!("{} [{}]: {}", error, error_id, source);

    HttpResponse::BadGateway().json(ErrorResponse {
        error: error.to_string(),
        message: source.to_string(),
        status_code: 502,
        error_id: Some(error_id),
    })
}
