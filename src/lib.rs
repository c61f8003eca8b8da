//! Clinara — application core of a clinic administrative console.
//!
//! Every screen of the console is a table or modal form bound to REST
//! endpoints of an external clinical backend. This crate is the part
//! under the screens: the persisted session, the resource access layer,
//! the cross-resource enrichment join, the mutation/refresh cycle, the
//! coverage/billing choreography, and client-side form validation. The
//! rendering shell binds to [`console`] and never touches the wire.

pub mod backend;
pub mod config;
pub mod console;
pub mod enrich;
pub mod models;
pub mod session;
pub mod validation;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the host application.
pub fn init_telemetry() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Clinara core starting v{}", config::APP_VERSION);
}
