//! Appointment listing board — the enriched table.

use std::sync::Arc;

use crate::backend::{Backend, FetchError, Transport};
use crate::enrich::{self, AppointmentRow};
use crate::models::{StatusCode, StatusPatch};

use super::Notice;

/// Listing controller for the appointment table. Rows are display-ready —
/// the enrichment join runs on every refresh.
pub struct AppointmentBoard<R> {
    backend: Arc<Backend<R>>,
    rows: Vec<AppointmentRow>,
    form_open: bool,
}

impl<R: Transport> AppointmentBoard<R> {
    pub fn new(backend: Arc<Backend<R>>) -> Self {
        Self {
            backend,
            rows: Vec::new(),
            form_open: false,
        }
    }

    /// Full list-and-enrich refetch. Repeated calls are not deduplicated;
    /// each produces its own fan-out.
    pub async fn refresh(&mut self) {
        self.rows = enrich::enrich_appointments(&self.backend).await;
    }

    pub fn rows(&self) -> &[AppointmentRow] {
        &self.rows
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    /// Child-form success callback: close the modal, refetch everything.
    pub async fn on_form_saved(&mut self) {
        self.form_open = false;
        self.refresh().await;
    }

    /// Quick action: update only the status field through the generic
    /// update path, then run the same full-refresh cycle.
    pub async fn quick_status(&mut self, id: i64, status: StatusCode) -> Result<(), FetchError> {
        self.backend
            .appointments
            .update(id, &StatusPatch { status })
            .await?;
        self.refresh().await;
        Ok(())
    }

    /// The backend has no appointment delete endpoint. This always surfaces
    /// the unavailable notice and never issues a request.
    pub fn delete(&self, _id: i64) -> Notice {
        Notice::Info(FetchError::Unavailable("Appointment deletion").to_string())
    }
}
