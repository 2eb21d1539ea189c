use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info, warn};

use propmatch::config::Settings;
use propmatch::core::Matcher;
use propmatch::models::PointTable;
use propmatch::routes::{
    self, handle_json_payload_error, handle_query_payload_error,
    matches::{AppState, MatchLimits},
};
use propmatch::services::{CacheManager, SupabaseClient, SupabaseTables};

/// Pretty formatter only when LOG_FORMAT asks for it; anything else logs
/// in the single-line compact format
fn use_pretty_format(format: &str) -> bool {
    format == "pretty"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if use_pretty_format(&log_format) {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting propmatch matching service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    if settings.supabase.service_key.is_empty() {
        warn!("Supabase service key is empty; backend requests will be rejected");
    }

    // Initialize Supabase client
    let supabase = Arc::new(SupabaseClient::new(
        settings.supabase.url,
        settings.supabase.service_key,
        SupabaseTables {
            leads: settings.tables.leads,
            properties: settings.tables.properties,
        },
    ));

    info!("Supabase client initialized");

    // Initialize cache manager (optional - requests fall through to the
    // backend without it)
    let cache = match settings.cache.redis_url.as_deref() {
        Some(redis_url) if !redis_url.is_empty() => {
            let ttl_secs = settings.cache.ttl_secs.unwrap_or(300);
            let l1_size = settings.cache.l1_size.unwrap_or(1000);
            match CacheManager::new(redis_url, l1_size, ttl_secs).await {
                Ok(cache) => {
                    info!(
                        "Cache initialized (L1 capacity: {}, TTL: {}s)",
                        l1_size, ttl_secs
                    );
                    Some(Arc::new(cache))
                }
                Err(e) => {
                    warn!("Redis unavailable, running without cache: {}", e);
                    None
                }
            }
        }
        _ => {
            info!("No Redis configured, running without cache");
            None
        }
    };

    // Initialize matcher with the configured point table
    let points = PointTable {
        budget: settings.scoring.points.budget,
        property_type: settings.scoring.points.property_type,
        location: settings.scoring.points.location,
        bedrooms: settings.scoring.points.bedrooms,
        bathrooms: settings.scoring.points.bathrooms,
        area: settings.scoring.points.area,
        amenities: settings.scoring.points.amenities,
    };
    let matcher = Matcher::new(points, settings.scoring.budget_headroom);

    info!(
        "Matcher initialized (max score: {}, budget headroom: {})",
        points.max_score(),
        settings.scoring.budget_headroom
    );

    let limits = MatchLimits {
        default: settings.matching.default_limit.unwrap_or(20),
        max: settings.matching.max_limit.unwrap_or(100),
    };

    // Build application state
    let app_state = AppState {
        supabase,
        cache,
        matcher,
        limits,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::use_pretty_format;

    #[test]
    fn test_log_format_defaults_to_compact() {
        assert!(use_pretty_format("pretty"));
        assert!(!use_pretty_format("compact"));
        assert!(!use_pretty_format(""));
    }
}
