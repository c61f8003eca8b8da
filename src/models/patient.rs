use serde::{Deserialize, Serialize};

/// Patient record as served by the clinical backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: String,
    /// National id, formatted `XXX-XXXXXX-X`.
    #[serde(rename = "cedula")]
    pub document: String,
    #[serde(rename = "fechaNacimiento", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "sexo", default)]
    pub sex: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "correo", alias = "email", default)]
    pub email: Option<String>,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "arsId", alias = "arsID", default)]
    pub insurer_id: Option<i64>,
    #[serde(rename = "noPoliza", alias = "poliza", default)]
    pub policy_number: Option<String>,
}

impl Patient {
    /// Given + family name, trimmed on both sides.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Derived, never stored: insured means an insurer ref plus a
    /// non-blank policy id.
    pub fn is_insured(&self) -> bool {
        self.insurer_id.is_some()
            && self
                .policy_number
                .as_deref()
                .is_some_and(|p| !p.trim().is_empty())
    }
}

/// Create/update payload for a patient (no id — the backend assigns it).
#[derive(Debug, Clone, Serialize)]
pub struct PatientDraft {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "cedula")]
    pub document: String,
    #[serde(rename = "fechaNacimiento", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(rename = "sexo", skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "correo", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "arsId", skip_serializing_if = "Option::is_none")]
    pub insurer_id: Option<i64>,
    #[serde(rename = "noPoliza", skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,
}
