//! Server configuration
//!
//! All knobs come from environment variables with sensible defaults:
//!
//! | Env var | Default | Meaning |
//! |---------|---------|---------|
//! | WORK_DIR | /var/lib/canteen | Working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | ALLOWED_ORIGINS | (empty) | Comma-separated CORS origins |
//! | DELIVERY_FEE | 20 | Flat delivery fee, currency units |
//! | TAX_RATE_PERCENT | 5 | Tax as a percentage of the subtotal |
//! | DELIVERY_LEAD_MINUTES | 30 | Estimated-delivery lead time |
//! | ADMIN_EMAIL / ADMIN_PASSWORD | (unset) | Seed admin account |
//! | JWT_SECRET / JWT_EXPIRATION_MINUTES / JWT_ISSUER / JWT_AUDIENCE | (see auth) | Token config |

use std::path::PathBuf;

use crate::auth::JwtConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// CORS origins allowed outside development
    pub allowed_origins: Vec<String>,

    // === Checkout pricing ===
    /// Flat delivery fee applied to any non-empty order
    pub delivery_fee: i64,
    /// Tax rate as integer percent of the subtotal
    pub tax_rate_percent: i64,
    /// Minutes added to "now" for the estimated delivery time
    pub delivery_lead_minutes: i64,

    // === Seed admin ===
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/canteen".into()),
            http_port: env_parse("HTTP_PORT", 3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            delivery_fee: env_parse("DELIVERY_FEE", 20),
            tax_rate_percent: env_parse("TAX_RATE_PERCENT", 5),
            delivery_lead_minutes: env_parse("DELIVERY_LEAD_MINUTES", 30),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }

    /// Override the filesystem- and port-related settings; used by tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Directory holding the embedded database files
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Directory holding rolling log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the working directory layout if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
