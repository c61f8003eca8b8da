//! Error taxonomy for the resource access layer.
//!
//! Errors are always re-thrown to the calling view/form, which owns the
//! user-visible presentation. List fetches are the one exception: they
//! degrade to an empty collection inside the client (see
//! [`super::client::ResourceClient::list_all`]).

use crate::session::SessionError;

/// A failed backend exchange, as surfaced to views and forms.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request never reached the server or no response arrived.
    #[error("Cannot connect to the clinical backend: {0}")]
    Connection(String),
    /// Non-2xx response. `message` is the server-authored message when the
    /// body carried one, else the transport status text.
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },
    /// 2xx response whose body did not match the expected record shape.
    #[error("Unexpected response shape: {0}")]
    Decode(String),
    /// Operation the backend does not expose.
    #[error("{0} is not available yet")]
    Unavailable(&'static str),
}

/// Login failures: the HTTP call itself, or persisting the session after.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Signed in, but the session could not be persisted: {0}")]
    Persist(#[from] SessionError),
}
