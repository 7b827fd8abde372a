use std::path::PathBuf;
use std::time::Duration;

/// Reality API configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection string (`mongodb://` or `mongodb+srv://`).
    pub mongodb_uri: String,
    /// Database holding the show collection.
    pub database_name: String,
    /// Collection of show documents.
    pub collection_name: String,
    /// Upper bound for establishing the initial connection.
    pub connect_timeout: Duration,
    /// Accept TLS certificates that fail validation (self-signed clusters).
    pub tls_allow_invalid_certificates: bool,
    /// Directory of static front-end files served for unmatched paths.
    pub public_dir: PathBuf,
    /// Worker id stamped into generated participant ids.
    pub worker_id: u16,
    /// Port the HTTP server binds to.
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Panics with a descriptive message if a required variable is missing.
    pub fn from_env() -> Self {
        Self {
            mongodb_uri: required_var("MONGODB_URI"),
            database_name: std::env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "reality_show".to_string()),
            collection_name: std::env::var("MONGODB_COLLECTION")
                .unwrap_or_else(|_| "reality_shows".to_string()),
            connect_timeout: Duration::from_secs(parsed_var("MONGODB_CONNECT_TIMEOUT_SECS", 10)),
            tls_allow_invalid_certificates: parsed_var("MONGODB_TLS_ALLOW_INVALID_CERTS", false),
            public_dir: std::env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public")),
            worker_id: parsed_var("SNOWFLAKE_WORKER_ID", 0),
            port: parsed_var("PORT", 3000),
        }
    }
}

fn required_var(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{name} env var is required"))
}

fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
