//! Generic per-resource client.
//!
//! One parameterized client covers every backend resource — the CRUD
//! contract is identical across them, so the per-resource knowledge is
//! just a base path and a record type. Response-shape normalization
//! (bare array vs `{data: [...]}` envelope) lives here and nowhere else.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::FetchError;
use super::transport::{HttpRequest, Transport};

/// List responses arrive either bare or wrapped; both normalize to the
/// inner array.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> Listing<T> {
    fn into_rows(self) -> Vec<T> {
        match self {
            Self::Bare(rows) => rows,
            Self::Wrapped { data } => data,
        }
    }
}

/// Typed CRUD client for one backend resource.
pub struct ResourceClient<T, R> {
    /// Resource name for logs ("patients", "invoices", ...).
    resource: &'static str,
    /// Base URL, e.g. `{root}/pacientes`.
    base: String,
    transport: Arc<R>,
    _record: PhantomData<fn() -> T>,
}

impl<T, R> Clone for ResourceClient<T, R> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource,
            base: self.base.clone(),
            transport: Arc::clone(&self.transport),
            _record: PhantomData,
        }
    }
}

impl<T, R> ResourceClient<T, R>
where
    T: DeserializeOwned,
    R: Transport,
{
    pub fn new(resource: &'static str, base: impl Into<String>, transport: Arc<R>) -> Self {
        Self {
            resource,
            base: base.into(),
            transport,
            _record: PhantomData,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// GET `{base}/all`.
    ///
    /// List failures degrade to "nothing to show": any transport error,
    /// non-2xx response, or body that is neither a bare array nor a
    /// `{data: [...]}` envelope yields an empty vec and a warn log, never
    /// an error to the caller.
    pub async fn list_all(&self) -> Vec<T> {
        let req = HttpRequest::get(format!("{}/all", self.base));
        let response = match self.transport.execute(req).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(resource = self.resource, error = %e, "list fetch failed");
                return Vec::new();
            }
        };

        if !response.is_success() {
            tracing::warn!(
                resource = self.resource,
                status = response.status,
                "list fetch returned an error status"
            );
            return Vec::new();
        }

        match serde_json::from_str::<Listing<T>>(&response.body) {
            Ok(listing) => listing.into_rows(),
            Err(e) => {
                tracing::warn!(resource = self.resource, error = %e, "list body had no rows");
                Vec::new()
            }
        }
    }

    /// GET `{base}/{id}`.
    pub async fn get(&self, id: i64) -> Result<T, FetchError> {
        let response = self
            .transport
            .execute(HttpRequest::get(format!("{}/{}", self.base, id)))
            .await?;
        if !response.is_success() {
            return Err(FetchError::Http {
                status: response.status,
                message: response.error_message(),
            });
        }
        response.json()
    }

    /// POST `{base}`.
    pub async fn create<P: Serialize>(&self, payload: &P) -> Result<T, FetchError> {
        let body = to_body(payload)?;
        let response = self
            .transport
            .execute(HttpRequest::post(self.base.clone(), body))
            .await?;
        if !response.is_success() {
            return Err(FetchError::Http {
                status: response.status,
                message: response.error_message(),
            });
        }
        response.json()
    }

    /// PUT `{base}/{id}`.
    ///
    /// A 2xx response with an empty or non-JSON body (a 204, typically) is
    /// a synthesized success (`None`) — never a parse attempt on nothing.
    pub async fn update<P: Serialize>(&self, id: i64, payload: &P) -> Result<Option<T>, FetchError> {
        let body = to_body(payload)?;
        let response = self
            .transport
            .execute(HttpRequest::put(format!("{}/{}", self.base, id), body))
            .await?;
        if !response.is_success() {
            return Err(FetchError::Http {
                status: response.status,
                message: response.error_message(),
            });
        }
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str(&response.body) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::debug!(resource = self.resource, error = %e, "update body ignored");
                Ok(None)
            }
        }
    }

    /// DELETE `{base}/{id}`. 204 is success-with-no-body; an unparseable
    /// error body falls back to the status text.
    pub async fn delete(&self, id: i64) -> Result<(), FetchError> {
        let response = self
            .transport
            .execute(HttpRequest::delete(format!("{}/{}", self.base, id)))
            .await?;
        if !response.is_success() {
            return Err(FetchError::Http {
                status: response.status,
                message: response.error_message(),
            });
        }
        Ok(())
    }
}

fn to_body<P: Serialize>(payload: &P) -> Result<Value, FetchError> {
    serde_json::to_value(payload).map_err(|e| FetchError::Decode(e.to_string()))
}
