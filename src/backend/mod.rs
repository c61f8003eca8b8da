//! Resource access layer for the clinical backend.
//!
//! One generic [`ResourceClient`] per resource behind a typed [`Backend`]
//! facade, all sharing one [`Transport`]. Views and forms never build URLs
//! or touch the wire shapes directly.

pub mod client;
pub mod error;
pub mod transport;

use std::sync::Arc;

pub use client::ResourceClient;
pub use error::{FetchError, LoginError};
pub use transport::{HttpRequest, HttpResponse, Method, MockTransport, ReqwestTransport, Transport};

use crate::config;
use crate::models::{
    Appointment, CoverageOutcome, CoverageRequest, Doctor, Insurer, Invoice, InvoiceLine, Patient,
    UserAccount,
};
use crate::session::{Session, SessionStore};

/// Typed facade over every backend resource.
pub struct Backend<R> {
    pub appointments: ResourceClient<Appointment, R>,
    pub patients: ResourceClient<Patient, R>,
    pub doctors: ResourceClient<Doctor, R>,
    pub insurers: ResourceClient<Insurer, R>,
    pub invoices: ResourceClient<Invoice, R>,
    pub invoice_lines: ResourceClient<InvoiceLine, R>,
    pub users: ResourceClient<UserAccount, R>,
    root: String,
    transport: Arc<R>,
    session: Arc<SessionStore>,
}

impl Backend<ReqwestTransport> {
    /// Production backend at the configured root URL.
    pub fn connect(session: Arc<SessionStore>) -> Self {
        let transport = Arc::new(ReqwestTransport::new(Arc::clone(&session)));
        Self::with_transport(config::backend_url(), transport, session)
    }
}

impl<R: Transport> Backend<R> {
    /// Backend over an explicit transport — tests inject [`MockTransport`]
    /// here.
    pub fn with_transport(
        root: impl Into<String>,
        transport: Arc<R>,
        session: Arc<SessionStore>,
    ) -> Self {
        let root = root.into();
        let base = |path: &str| format!("{root}/{path}");
        Self {
            appointments: ResourceClient::new("appointments", base("citas"), Arc::clone(&transport)),
            patients: ResourceClient::new("patients", base("pacientes"), Arc::clone(&transport)),
            doctors: ResourceClient::new("doctors", base("medicos"), Arc::clone(&transport)),
            insurers: ResourceClient::new("insurers", base("ars"), Arc::clone(&transport)),
            invoices: ResourceClient::new("invoices", base("facturas"), Arc::clone(&transport)),
            invoice_lines: ResourceClient::new(
                "invoice-lines",
                base("factura-detalles"),
                Arc::clone(&transport),
            ),
            users: ResourceClient::new("users", base("usuarios"), Arc::clone(&transport)),
            root,
            transport,
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// POST `{root}/auth/login`, unauthenticated. On success the session
    /// (token + user) is persisted — login is the store's only writer
    /// besides logout.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, LoginError> {
        let body = serde_json::json!({ "usuario": username, "clave": password });
        let response = self
            .transport
            .execute(HttpRequest::post(format!("{}/auth/login", self.root), body).unauthenticated())
            .await?;

        if !response.is_success() {
            return Err(FetchError::Http {
                status: response.status,
                message: response.error_message(),
            }
            .into());
        }

        let session: Session = response.json()?;
        self.session.save(&session)?;
        tracing::info!(user = %session.user.username, "signed in");
        Ok(session)
    }

    /// Clear the persisted session. No HTTP call is involved.
    pub fn logout(&self) -> Result<(), LoginError> {
        self.session.clear()?;
        tracing::info!("signed out");
        Ok(())
    }

    /// POST a coverage authorization request to the insurer endpoint.
    /// The outcome is ephemeral — it drives the invoice-creation path and
    /// is never persisted by the console.
    pub async fn request_coverage(
        &self,
        request: &CoverageRequest,
    ) -> Result<CoverageOutcome, FetchError> {
        let body = serde_json::to_value(request).map_err(|e| FetchError::Decode(e.to_string()))?;
        let response = self
            .transport
            .execute(HttpRequest::post(
                format!("{}/cobertura/solicitudes", self.root),
                body,
            ))
            .await?;

        if !response.is_success() {
            return Err(FetchError::Http {
                status: response.status,
                message: response.error_message(),
            });
        }
        response.json()
    }

    /// All line items for one invoice. The backend has no per-invoice
    /// filter endpoint, so the full collection is fetched and filtered
    /// client-side.
    pub async fn lines_for_invoice(&self, invoice_id: i64) -> Vec<InvoiceLine> {
        self.invoice_lines
            .list_all()
            .await
            .into_iter()
            .filter(|line| line.invoice_id == invoice_id)
            .collect()
    }
}
