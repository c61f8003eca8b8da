//! Cross-resource enrichment — the client-side join.
//!
//! The backend exposes no joined appointments endpoint, so the console
//! resolves each record's patient and doctor refs itself and composes the
//! display fields. The contract that matters: a dead ref never kills a row
//! (it resolves to a placeholder), and N raw records always become exactly
//! N enriched rows, in the original order.
//!
//! Lookups for one record run concurrently; records flow through a bounded
//! worker pool rather than an unbounded burst, so a 300-row listing cannot
//! exhaust the connection pool.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use futures_util::{stream, StreamExt};
use serde::Serialize;

use crate::backend::{Backend, Transport};
use crate::models::{Appointment, StatusCode};

/// Display name when a patient/doctor ref cannot be resolved.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Upper bound on concurrently in-flight record lookups.
const LOOKUP_CONCURRENCY: usize = 8;

/// Display-ready appointment row.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentRow {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub patient_name: String,
    pub doctor_name: String,
    /// Locale date, `dd/mm/yyyy`.
    pub date: String,
    /// Locale time, `hh:mm AM/PM`. Empty when the timestamp carried no time.
    pub time: String,
    pub status: StatusCode,
    pub status_label: &'static str,
    pub reason: Option<String>,
    pub treatment_id: Option<i64>,
}

/// Fetch the appointment collection and enrich every record.
pub async fn enrich_appointments<R: Transport>(backend: &Backend<R>) -> Vec<AppointmentRow> {
    let raw = backend.appointments.list_all().await;
    enrich_all(backend, raw).await
}

/// Enrich an already-fetched collection. Order and count are preserved
/// exactly: N in, N out, no dedup, no re-sort.
pub async fn enrich_all<R: Transport>(
    backend: &Backend<R>,
    raw: Vec<Appointment>,
) -> Vec<AppointmentRow> {
    stream::iter(raw.into_iter().map(|appt| enrich_one(backend, appt)))
        .buffered(LOOKUP_CONCURRENCY)
        .collect()
        .await
}

/// Resolve one record's refs (concurrently) and compose its row.
/// A failing lookup degrades to the placeholder name — logged, never
/// surfaced as an error.
async fn enrich_one<R: Transport>(backend: &Backend<R>, appt: Appointment) -> AppointmentRow {
    let (patient, doctor) = tokio::join!(
        backend.patients.get(appt.patient_id),
        backend.doctors.get(appt.doctor_id),
    );

    let patient_name = match patient {
        Ok(p) => p.full_name(),
        Err(e) => {
            tracing::warn!(appointment = appt.id, patient = appt.patient_id, error = %e,
                "patient ref unresolved, using placeholder");
            UNKNOWN_NAME.to_string()
        }
    };
    let doctor_name = match doctor {
        Ok(d) => d.full_name(),
        Err(e) => {
            tracing::warn!(appointment = appt.id, doctor = appt.doctor_id, error = %e,
                "doctor ref unresolved, using placeholder");
            UNKNOWN_NAME.to_string()
        }
    };

    let (date, time) = format_timestamp(&appt.scheduled_at);

    AppointmentRow {
        id: appt.id,
        patient_id: appt.patient_id,
        doctor_id: appt.doctor_id,
        patient_name,
        doctor_name,
        date,
        time,
        status: appt.status,
        status_label: appt.status.label(),
        reason: appt.reason,
        treatment_id: appt.treatment_id,
    }
}

/// Split a raw backend timestamp into locale date and time strings.
/// Unparseable input falls back to the raw string with an empty time —
/// a malformed timestamp must not take the row down.
pub(crate) fn format_timestamp(raw: &str) -> (String, String) {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return (
            dt.format("%d/%m/%Y").to_string(),
            dt.format("%I:%M %p").to_string(),
        );
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return (
            dt.format("%d/%m/%Y").to_string(),
            dt.format("%I:%M %p").to_string(),
        );
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return (date.format("%d/%m/%Y").to_string(), String::new());
    }
    (raw.to_string(), String::new())
}
