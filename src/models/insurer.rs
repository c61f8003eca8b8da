use serde::{Deserialize, Serialize};

/// Insurer (ARS) record as served by the clinical backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insurer {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    /// Formatted `XXX-XXX-XXXX`.
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "correo", alias = "email", default)]
    pub email: Option<String>,
    #[serde(rename = "contacto", default)]
    pub contact_person: Option<String>,
}

/// Create/update payload for an insurer.
#[derive(Debug, Clone, Serialize)]
pub struct InsurerDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "correo", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "contacto", skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
}
