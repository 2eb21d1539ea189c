use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub tables: TableSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    /// Project URL; the default points at a local `supabase start` stack.
    #[serde(default = "default_supabase_url")]
    pub url: String,
    /// Service-role key. Usually injected through SUPABASE_SERVICE_KEY
    /// rather than checked into a config file.
    #[serde(default)]
    pub service_key: String,
}

impl Default for SupabaseSettings {
    fn default() -> Self {
        Self {
            url: default_supabase_url(),
            service_key: String::new(),
        }
    }
}

fn default_supabase_url() -> String {
    "http://localhost:54321".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_leads_table")]
    pub leads: String,
    #[serde(default = "default_properties_table")]
    pub properties: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            leads: default_leads_table(),
            properties: default_properties_table(),
        }
    }
}

fn default_leads_table() -> String {
    "leads".to_string()
}
fn default_properties_table() -> String {
    "properties".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// Absent or empty means no caching at all.
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub default_limit: Option<u16>,
    pub max_limit: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub points: PointsConfig,
    /// Fraction by which a price may exceed the stated budget and still
    /// count as within budget (0.10 = 10%).
    #[serde(default = "default_budget_headroom")]
    pub budget_headroom: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            points: PointsConfig::default(),
            budget_headroom: default_budget_headroom(),
        }
    }
}

fn default_budget_headroom() -> f64 {
    0.10
}

/// Per-criterion point values. The defaults sum to 100 and are product
/// policy; change them only with a product-owner sign-off.
#[derive(Debug, Clone, Deserialize)]
pub struct PointsConfig {
    #[serde(default = "default_budget_points")]
    pub budget: u32,
    #[serde(default = "default_type_points")]
    pub property_type: u32,
    #[serde(default = "default_location_points")]
    pub location: u32,
    #[serde(default = "default_bedroom_points")]
    pub bedrooms: u32,
    #[serde(default = "default_bathroom_points")]
    pub bathrooms: u32,
    #[serde(default = "default_area_points")]
    pub area: u32,
    #[serde(default = "default_amenity_points")]
    pub amenities: u32,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            budget: default_budget_points(),
            property_type: default_type_points(),
            location: default_location_points(),
            bedrooms: default_bedroom_points(),
            bathrooms: default_bathroom_points(),
            area: default_area_points(),
            amenities: default_amenity_points(),
        }
    }
}

fn default_budget_points() -> u32 {
    40
}
fn default_type_points() -> u32 {
    15
}
fn default_location_points() -> u32 {
    15
}
fn default_bedroom_points() -> u32 {
    10
}
fn default_bathroom_points() -> u32 {
    10
}
fn default_area_points() -> u32 {
    5
}
fn default_amenity_points() -> u32 {
    5
}

impl Settings {
    /// Load configuration from files and environment variables.
    ///
    /// Sources, later overrides earlier:
    /// 1. Struct defaults
    /// 2. config/default.toml
    /// 3. config/local.toml (development overrides)
    /// 4. Environment variables prefixed with PROPMATCH
    ///    (e.g. PROPMATCH__SERVER__PORT -> server.port)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("PROPMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Lift the conventional Supabase/Redis variable names over the
        // prefixed form, so deployments can reuse the credentials they
        // already export for other tooling.
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PROPMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Overlay SUPABASE_URL, SUPABASE_SERVICE_KEY and REDIS_URL when present.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let supabase_url = env::var("SUPABASE_URL")
        .or_else(|_| env::var("PROPMATCH__SUPABASE__URL"))
        .ok();
    let service_key = env::var("SUPABASE_SERVICE_KEY")
        .or_else(|_| env::var("PROPMATCH__SUPABASE__SERVICE_KEY"))
        .ok();
    let redis_url = env::var("REDIS_URL")
        .or_else(|_| env::var("PROPMATCH__CACHE__REDIS_URL"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = supabase_url {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Some(key) = service_key {
        builder = builder.set_override("supabase.service_key", key)?;
    }
    if let Some(url) = redis_url {
        builder = builder.set_override("cache.redis_url", url)?;
    }

    builder.build()
}
