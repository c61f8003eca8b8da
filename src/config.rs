use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Clinara";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the clinical backend root URL.
pub const BACKEND_URL_ENV: &str = "CLINARA_BACKEND_URL";

/// Backend root used when `CLINARA_BACKEND_URL` is unset.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api";

/// Resolve the clinical backend root URL (no trailing slash).
pub fn backend_url() -> String {
    std::env::var(BACKEND_URL_ENV)
        .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Get the application data directory
/// ~/Clinara/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Clinara")
}

/// Session file holding the persisted token + user record.
pub fn session_file() -> PathBuf {
    app_data_dir().join("session.json")
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "info,clinara=debug"
}
