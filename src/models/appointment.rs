use serde::{Deserialize, Serialize};

use super::enums::StatusCode;

/// Appointment as served by the clinical backend.
///
/// Field names follow the backend's Spanish wire contract; both observed
/// casings of the foreign-key fields are accepted (`pacienteId` and
/// `pacienteID` appear in the wild). The ambiguity stops here — nothing
/// past the access layer sees the wire names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    #[serde(rename = "pacienteId", alias = "pacienteID")]
    pub patient_id: i64,
    #[serde(rename = "medicoId", alias = "medicoID")]
    pub doctor_id: i64,
    /// Raw backend timestamp, formatted for display during enrichment.
    #[serde(rename = "fecha")]
    pub scheduled_at: String,
    #[serde(rename = "tratamientoId", alias = "tratamientoID", default)]
    pub treatment_id: Option<i64>,
    #[serde(rename = "motivo", default)]
    pub reason: Option<String>,
    #[serde(rename = "estado")]
    pub status: StatusCode,
}

/// Create/update payload for an appointment.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentDraft {
    #[serde(rename = "pacienteId")]
    pub patient_id: i64,
    #[serde(rename = "medicoId")]
    pub doctor_id: i64,
    #[serde(rename = "fecha")]
    pub scheduled_at: String,
    #[serde(rename = "tratamientoId", skip_serializing_if = "Option::is_none")]
    pub treatment_id: Option<i64>,
    #[serde(rename = "motivo", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(rename = "estado")]
    pub status: StatusCode,
}

/// Partial update carrying only a status change (quick actions).
#[derive(Debug, Clone, Serialize)]
pub struct StatusPatch {
    #[serde(rename = "estado")]
    pub status: StatusCode,
}
