use serde::{Deserialize, Serialize};

/// Decision returned by the insurer for a coverage request.
///
/// Parsed from the backend's Spanish status strings. Anything the table
/// does not recognize folds into `Unknown`, which the billing flow treats
/// as not-approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CoverageStatus {
    Approved,
    Pending,
    Rejected,
    Unknown,
}

impl CoverageStatus {
    pub fn from_estado(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "aprobada" | "aprobado" => Self::Approved,
            "pendiente" => Self::Pending,
            "rechazada" | "rechazado" => Self::Rejected,
            _ => Self::Unknown,
        }
    }

    pub fn as_estado(&self) -> &'static str {
        match self {
            Self::Approved => "aprobada",
            Self::Pending => "pendiente",
            Self::Rejected => "rechazada",
            Self::Unknown => "desconocida",
        }
    }
}

impl From<String> for CoverageStatus {
    fn from(s: String) -> Self {
        Self::from_estado(&s)
    }
}

impl From<CoverageStatus> for String {
    fn from(status: CoverageStatus) -> String {
        status.as_estado().to_string()
    }
}

/// Coverage authorization request sent to the insurer endpoint.
/// Ephemeral — never persisted by the console.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageRequest {
    /// Insured patient's national id.
    #[serde(rename = "cedulaAsegurado")]
    pub document: String,
    #[serde(rename = "tipoSolicitud")]
    pub request_type: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "montoSolicitado")]
    pub requested_amount: f64,
}

/// Insurer decision for one coverage request.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverageOutcome {
    #[serde(rename = "solicitudId", alias = "id", default)]
    pub request_id: Option<i64>,
    #[serde(rename = "estado")]
    pub status: CoverageStatus,
    #[serde(rename = "montoAprobado", default)]
    pub approved_amount: Option<f64>,
    #[serde(rename = "numeroPoliza", alias = "noPoliza", default)]
    pub policy_number: Option<String>,
}
