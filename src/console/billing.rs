//! Invoice creation with optional insurer (ARS) authorization.
//!
//! The coverage gate is a UI-enforced precondition: an insured invoice may
//! not be submitted until a coverage check has run, and a rejected check
//! blocks submission until the insurer selection is cleared. The backend
//! does not re-validate this rule; it is a UX nudge, not a security
//! boundary.
//!
//! After a successful invoice creation, a best-effort follow-up records the
//! procedure as an invoice line. Its failure downgrades to a warning on the
//! receipt; the invoice itself stands.

use std::sync::Arc;

use crate::backend::{Backend, FetchError, Transport};
use crate::models::{
    CoverageOutcome, CoverageRequest, CoverageStatus, CoveredInvoiceDraft, Invoice,
    InvoiceLine, InvoiceLineDraft, PaidPatch, Patient, SimpleInvoiceDraft,
};

/// Where the invoice attempt stands with respect to insurer authorization.
#[derive(Debug, Clone)]
pub enum CoverageGate {
    /// No insurer selected; the uninsured path applies.
    NotRequired,
    /// Insurer selected but no check run yet — submission is blocked.
    Unchecked,
    /// Check ran; the outcome decides the path.
    Checked(CoverageOutcome),
}

/// Why submission is currently blocked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("Select a patient first")]
    MissingPatient,
    #[error("Select a procedure first")]
    MissingProcedure,
    #[error("Select an insurer before checking coverage")]
    MissingInsurer,
    #[error("Run the coverage check before invoicing an insured patient")]
    CoverageUnchecked,
    #[error("Coverage was rejected. Remove the insurer to bill the patient directly")]
    CoverageRejected,
}

/// Billing failures: a blocked precondition or a failed backend call.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error(transparent)]
    Blocked(#[from] SubmitBlocked),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Procedure selected for invoicing.
#[derive(Debug, Clone)]
pub struct ProcedureChoice {
    pub treatment_id: i64,
    pub description: String,
    pub amount: f64,
}

/// Result of a successful submission. `warning` carries the non-blocking
/// line-item failure, appended to the success message.
#[derive(Debug, Clone)]
pub struct InvoiceReceipt {
    pub invoice: Invoice,
    pub warning: Option<String>,
}

impl InvoiceReceipt {
    pub fn message(&self) -> String {
        let base = format!("Invoice #{} created", self.invoice.id);
        match &self.warning {
            Some(warning) => format!("{base}. {warning}"),
            None => base,
        }
    }
}

/// Invoice-creation form and its coverage state machine.
#[derive(Debug, Clone)]
pub struct InvoiceForm {
    patient_id: Option<i64>,
    document: String,
    procedure: Option<ProcedureChoice>,
    insurer_id: Option<i64>,
    gate: CoverageGate,
}

impl Default for InvoiceForm {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceForm {
    pub fn new() -> Self {
        Self {
            patient_id: None,
            document: String::new(),
            procedure: None,
            insurer_id: None,
            gate: CoverageGate::NotRequired,
        }
    }

    /// Pick the patient. An insured patient pre-selects their insurer,
    /// which (re)arms the coverage gate.
    pub fn select_patient(&mut self, patient: &Patient) {
        self.patient_id = Some(patient.id);
        self.document = patient.document.clone();
        if patient.is_insured() {
            self.insurer_id = patient.insurer_id;
            self.gate = CoverageGate::Unchecked;
        } else {
            self.insurer_id = None;
            self.gate = CoverageGate::NotRequired;
        }
    }

    pub fn select_procedure(&mut self, procedure: ProcedureChoice) {
        self.procedure = Some(procedure);
    }

    /// Selecting (or changing) the insurer resets any previous check.
    pub fn select_insurer(&mut self, insurer_id: i64) {
        self.insurer_id = Some(insurer_id);
        self.gate = CoverageGate::Unchecked;
    }

    /// Clearing the insurer falls back to the uninsured path — the only
    /// way out after a rejection.
    pub fn clear_insurer(&mut self) {
        self.insurer_id = None;
        self.gate = CoverageGate::NotRequired;
    }

    pub fn insurer_id(&self) -> Option<i64> {
        self.insurer_id
    }

    pub fn gate(&self) -> &CoverageGate {
        &self.gate
    }

    /// Run the coverage check against the insurer endpoint and arm the
    /// gate with the outcome.
    pub async fn run_coverage_check<R: Transport>(
        &mut self,
        backend: &Backend<R>,
    ) -> Result<CoverageStatus, BillingError> {
        if self.insurer_id.is_none() {
            return Err(SubmitBlocked::MissingInsurer.into());
        }
        if self.document.trim().is_empty() {
            return Err(SubmitBlocked::MissingPatient.into());
        }
        let procedure = self
            .procedure
            .as_ref()
            .ok_or(SubmitBlocked::MissingProcedure)?;

        let request = CoverageRequest {
            document: self.document.clone(),
            request_type: "autorizacion".to_string(),
            description: procedure.description.clone(),
            requested_amount: procedure.amount,
        };
        let outcome = backend.request_coverage(&request).await?;
        let status = outcome.status;
        self.gate = CoverageGate::Checked(outcome);
        Ok(status)
    }

    /// Can the invoice be submitted right now? Mirrors the submit-button
    /// enabled state.
    pub fn can_submit(&self) -> Result<(), SubmitBlocked> {
        if self.patient_id.is_none() && self.document.trim().is_empty() {
            return Err(SubmitBlocked::MissingPatient);
        }
        if self.procedure.is_none() {
            return Err(SubmitBlocked::MissingProcedure);
        }
        match (&self.insurer_id, &self.gate) {
            (None, _) => Ok(()),
            (Some(_), CoverageGate::NotRequired) | (Some(_), CoverageGate::Unchecked) => {
                Err(SubmitBlocked::CoverageUnchecked)
            }
            (Some(_), CoverageGate::Checked(outcome)) => match outcome.status {
                CoverageStatus::Approved | CoverageStatus::Pending => Ok(()),
                CoverageStatus::Rejected | CoverageStatus::Unknown => {
                    Err(SubmitBlocked::CoverageRejected)
                }
            },
        }
    }

    /// Create the invoice, then best-effort record the procedure line.
    pub async fn submit<R: Transport>(
        &self,
        backend: &Backend<R>,
    ) -> Result<InvoiceReceipt, BillingError> {
        self.can_submit()?;
        let procedure = self
            .procedure
            .as_ref()
            .ok_or(SubmitBlocked::MissingProcedure)?;

        let invoice = match (&self.insurer_id, &self.gate) {
            (Some(insurer_id), CoverageGate::Checked(outcome)) => {
                // Covered path: the amount comes from the insurer when it
                // granted one; a pending decision falls back to the
                // procedure amount as provisional.
                let draft = CoveredInvoiceDraft {
                    document: self.document.clone(),
                    insurer_id: *insurer_id,
                    policy_number: outcome.policy_number.clone(),
                    amount: outcome.approved_amount.unwrap_or(procedure.amount),
                };
                backend.invoices.create(&draft).await?
            }
            _ => {
                // Uninsured path: subject identifier + amount only.
                let draft = SimpleInvoiceDraft {
                    document: self.document.clone(),
                    amount: procedure.amount,
                };
                backend.invoices.create(&draft).await?
            }
        };

        let line = InvoiceLineDraft {
            invoice_id: invoice.id,
            treatment_id: procedure.treatment_id,
            amount: procedure.amount,
        };
        let warning = match backend.invoice_lines.create(&line).await {
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(invoice = invoice.id, error = %e,
                    "invoice line follow-up failed");
                Some(format!(
                    "The procedure line could not be recorded: {e}"
                ))
            }
        };

        Ok(InvoiceReceipt { invoice, warning })
    }
}

/// Invoice listing with its line items and the paid-flag quick action.
pub struct BillingDesk<R> {
    backend: Arc<Backend<R>>,
    invoices: Vec<Invoice>,
    form_open: bool,
}

impl<R: Transport> BillingDesk<R> {
    pub fn new(backend: Arc<Backend<R>>) -> Self {
        Self {
            backend,
            invoices: Vec::new(),
            form_open: false,
        }
    }

    pub async fn refresh(&mut self) {
        self.invoices = self.backend.invoices.list_all().await;
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub async fn on_form_saved(&mut self) {
        self.form_open = false;
        self.refresh().await;
    }

    /// Lines for one invoice — bulk fetch, client-side filter.
    pub async fn lines_for(&self, invoice_id: i64) -> Vec<InvoiceLine> {
        self.backend.lines_for_invoice(invoice_id).await
    }

    /// Quick action: flip the paid flag through the generic update path,
    /// then full refresh.
    pub async fn mark_paid(&mut self, invoice_id: i64, paid: bool) -> Result<(), FetchError> {
        self.backend
            .invoices
            .update(invoice_id, &PaidPatch { paid })
            .await?;
        self.refresh().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Method, MockTransport};
    use crate::session::SessionStore;

    fn backend_with(mock: Arc<MockTransport>, dir: &tempfile::TempDir) -> Backend<MockTransport> {
        let session = Arc::new(SessionStore::at(dir.path().join("session.json")));
        Backend::with_transport("http://x/api", mock, session)
    }

    fn insured_patient() -> Patient {
        Patient {
            id: 3,
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            document: "001-1234567-8".into(),
            birth_date: None,
            sex: None,
            phone: None,
            email: None,
            address: None,
            insurer_id: Some(4),
            policy_number: Some("POL-221".into()),
        }
    }

    fn uninsured_patient() -> Patient {
        Patient {
            insurer_id: None,
            policy_number: None,
            ..insured_patient()
        }
    }

    fn consultation() -> ProcedureChoice {
        ProcedureChoice {
            treatment_id: 11,
            description: "Consulta general".into(),
            amount: 2500.0,
        }
    }

    fn script_invoice_created(mock: &MockTransport) {
        mock.respond(
            Method::Post,
            "/facturas",
            201,
            r#"{"id":9,"monto":2500.0,"fecha":"2026-08-07","pagada":false}"#,
        );
        mock.respond(
            Method::Post,
            "/factura-detalles",
            201,
            r#"{"id":1,"facturaId":9,"tratamientoId":11,"monto":2500.0}"#,
        );
    }

    #[tokio::test]
    async fn uninsured_path_uses_simplified_payload_and_skips_coverage() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        script_invoice_created(&mock);
        let backend = backend_with(Arc::clone(&mock), &dir);

        let mut form = InvoiceForm::new();
        form.select_patient(&uninsured_patient());
        form.select_procedure(consultation());

        let receipt = form.submit(&backend).await.unwrap();
        assert_eq!(receipt.invoice.id, 9);
        assert!(receipt.warning.is_none());

        // Simplified payload: document + amount, nothing else.
        let posts = mock.calls_to("/facturas");
        let body = posts[0].body.as_ref().unwrap();
        assert_eq!(
            body,
            &serde_json::json!({"cedula": "001-1234567-8", "monto": 2500.0})
        );
        // Coverage endpoint never touched.
        assert!(mock.calls_to("/cobertura").is_empty());
    }

    #[tokio::test]
    async fn insured_submission_blocked_until_check_runs() {
        let mut form = InvoiceForm::new();
        form.select_patient(&insured_patient());
        form.select_procedure(consultation());

        assert_eq!(form.can_submit(), Err(SubmitBlocked::CoverageUnchecked));
    }

    #[tokio::test]
    async fn approved_coverage_routes_to_covered_payload() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/cobertura/solicitudes",
            200,
            r#"{"solicitudId":118,"estado":"aprobada","montoAprobado":1800.0,"numeroPoliza":"POL-221"}"#,
        );
        script_invoice_created(&mock);
        let backend = backend_with(Arc::clone(&mock), &dir);

        let mut form = InvoiceForm::new();
        form.select_patient(&insured_patient());
        form.select_procedure(consultation());

        let status = form.run_coverage_check(&backend).await.unwrap();
        assert_eq!(status, CoverageStatus::Approved);
        form.submit(&backend).await.unwrap();

        let posts = mock.calls_to("/facturas");
        let body = posts[0].body.as_ref().unwrap();
        // Insurer-derived amount, not the procedure price.
        assert_eq!(body["monto"], 1800.0);
        assert_eq!(body["arsId"], 4);
        assert_eq!(body["noPoliza"], "POL-221");
    }

    #[tokio::test]
    async fn pending_coverage_uses_provisional_amount() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/cobertura/solicitudes",
            200,
            r#"{"solicitudId":119,"estado":"pendiente"}"#,
        );
        script_invoice_created(&mock);
        let backend = backend_with(Arc::clone(&mock), &dir);

        let mut form = InvoiceForm::new();
        form.select_patient(&insured_patient());
        form.select_procedure(consultation());
        form.run_coverage_check(&backend).await.unwrap();
        form.submit(&backend).await.unwrap();

        let posts = mock.calls_to("/facturas");
        let body = posts[0].body.as_ref().unwrap();
        // No approved amount came back — the procedure amount stands in.
        assert_eq!(body["monto"], 2500.0);
        assert_eq!(body["arsId"], 4);
    }

    #[tokio::test]
    async fn rejected_coverage_blocks_until_insurer_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/cobertura/solicitudes",
            200,
            r#"{"estado":"rechazada"}"#,
        );
        script_invoice_created(&mock);
        let backend = backend_with(Arc::clone(&mock), &dir);

        let mut form = InvoiceForm::new();
        form.select_patient(&insured_patient());
        form.select_procedure(consultation());

        let status = form.run_coverage_check(&backend).await.unwrap();
        assert_eq!(status, CoverageStatus::Rejected);
        assert_eq!(form.can_submit(), Err(SubmitBlocked::CoverageRejected));

        let err = form.submit(&backend).await.unwrap_err();
        assert!(matches!(
            err,
            BillingError::Blocked(SubmitBlocked::CoverageRejected)
        ));
        assert!(mock.calls_to("/facturas").is_empty());

        // Clearing the insurer falls back to the uninsured path.
        form.clear_insurer();
        let receipt = form.submit(&backend).await.unwrap();
        assert_eq!(receipt.invoice.id, 9);

        let posts = mock.calls_to("/facturas");
        assert_eq!(
            posts[0].body.as_ref().unwrap(),
            &serde_json::json!({"cedula": "001-1234567-8", "monto": 2500.0})
        );
    }

    #[tokio::test]
    async fn reselecting_insurer_rearms_the_gate() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/cobertura/solicitudes",
            200,
            r#"{"estado":"aprobada","montoAprobado":1800.0}"#,
        );
        let backend = backend_with(Arc::clone(&mock), &dir);

        let mut form = InvoiceForm::new();
        form.select_patient(&insured_patient());
        form.select_procedure(consultation());
        form.run_coverage_check(&backend).await.unwrap();
        assert!(form.can_submit().is_ok());

        // Switching insurers invalidates the previous outcome.
        form.select_insurer(7);
        assert_eq!(form.can_submit(), Err(SubmitBlocked::CoverageUnchecked));
    }

    #[tokio::test]
    async fn line_item_failure_downgrades_to_warning() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/facturas",
            201,
            r#"{"id":9,"monto":2500.0,"pagada":false}"#,
        );
        mock.respond(Method::Post, "/factura-detalles", 500, "");
        let backend = backend_with(Arc::clone(&mock), &dir);

        let mut form = InvoiceForm::new();
        form.select_patient(&uninsured_patient());
        form.select_procedure(consultation());

        let receipt = form.submit(&backend).await.unwrap();
        assert!(receipt.warning.is_some());
        assert!(receipt.message().starts_with("Invoice #9 created."));
    }

    #[tokio::test]
    async fn coverage_check_requires_an_insurer() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        let backend = backend_with(Arc::clone(&mock), &dir);

        let mut form = InvoiceForm::new();
        form.select_patient(&uninsured_patient());
        form.select_procedure(consultation());

        let err = form.run_coverage_check(&backend).await.unwrap_err();
        assert!(matches!(
            err,
            BillingError::Blocked(SubmitBlocked::MissingInsurer)
        ));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn desk_mark_paid_sends_patch_then_refreshes() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        mock.respond(Method::Put, "/facturas/9", 204, "");
        mock.respond(Method::Get, "/facturas/all", 200, "[]");
        let backend = Arc::new(backend_with(Arc::clone(&mock), &dir));

        let mut desk = BillingDesk::new(backend);
        desk.mark_paid(9, true).await.unwrap();

        let puts = mock.calls_to("/facturas/9");
        assert_eq!(
            puts[0].body.as_ref().unwrap(),
            &serde_json::json!({"pagada": true})
        );
        assert_eq!(mock.calls_to("/facturas/all").len(), 1);
    }
}
