//! Modal forms: field state, validation, submit.
//!
//! Each form validates before touching the transport — a validation
//! failure returns the field errors and makes zero network calls. On a
//! pass, create or update is issued and the caller reports success to the
//! parent board, which runs the full refresh cycle.

use crate::backend::{Backend, Transport};
use crate::models::{
    AppointmentDraft, DoctorDraft, InsurerDraft, PatientDraft, Role, StatusCode, UserDraft,
    UserPatch,
};
use crate::validation::{self, FieldError};

use super::SubmitError;

/// Blank-to-None for optional text inputs.
fn opt(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ═══════════════════════════════════════════════════════════
// Patient form
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct PatientForm {
    /// Record id when editing, `None` when creating.
    pub editing: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub document: String,
    pub birth_date: String,
    pub sex: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub insurer_id: Option<i64>,
    pub policy_number: String,
}

impl PatientForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validation::require("nombre", &self.first_name, &mut errors);
        validation::require("apellido", &self.last_name, &mut errors);
        validation::check_cedula("cedula", self.document.trim(), &mut errors);
        if !self.phone.trim().is_empty() {
            validation::check_phone("telefono", self.phone.trim(), &mut errors);
        }
        errors
    }

    pub async fn submit<R: Transport>(&self, backend: &Backend<R>) -> Result<(), SubmitError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        let draft = PatientDraft {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            document: self.document.trim().to_string(),
            birth_date: opt(&self.birth_date),
            sex: opt(&self.sex),
            phone: opt(&self.phone),
            email: opt(&self.email),
            address: opt(&self.address),
            insurer_id: self.insurer_id,
            policy_number: opt(&self.policy_number),
        };

        match self.editing {
            Some(id) => {
                backend.patients.update(id, &draft).await?;
            }
            None => {
                backend.patients.create(&draft).await?;
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// Doctor form
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct DoctorForm {
    pub editing: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
    pub phone: String,
    pub email: String,
}

impl DoctorForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validation::require("nombre", &self.first_name, &mut errors);
        validation::require("apellido", &self.last_name, &mut errors);
        validation::require("especialidad", &self.specialty, &mut errors);
        if !self.phone.trim().is_empty() {
            validation::check_phone("telefono", self.phone.trim(), &mut errors);
        }
        errors
    }

    pub async fn submit<R: Transport>(&self, backend: &Backend<R>) -> Result<(), SubmitError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        let draft = DoctorDraft {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            specialty: self.specialty.trim().to_string(),
            phone: opt(&self.phone),
            email: opt(&self.email),
        };

        match self.editing {
            Some(id) => {
                backend.doctors.update(id, &draft).await?;
            }
            None => {
                backend.doctors.create(&draft).await?;
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// Insurer form
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct InsurerForm {
    pub editing: Option<i64>,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub contact_person: String,
}

impl InsurerForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validation::require("nombre", &self.name, &mut errors);
        validation::check_phone("telefono", self.phone.trim(), &mut errors);
        errors
    }

    pub async fn submit<R: Transport>(&self, backend: &Backend<R>) -> Result<(), SubmitError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        let draft = InsurerDraft {
            name: self.name.trim().to_string(),
            address: opt(&self.address),
            phone: self.phone.trim().to_string(),
            email: opt(&self.email),
            contact_person: opt(&self.contact_person),
        };

        match self.editing {
            Some(id) => {
                backend.insurers.update(id, &draft).await?;
            }
            None => {
                backend.insurers.create(&draft).await?;
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// User (system account) form
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct UserForm {
    pub editing: Option<i64>,
    pub name: String,
    pub username: String,
    /// Only sent on creation; ignored when editing.
    pub password: String,
    pub role: Role,
    pub status: StatusCode,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            editing: None,
            name: String::new(),
            username: String::new(),
            password: String::new(),
            role: Role::Scheduler,
            status: StatusCode::Active,
        }
    }
}

impl UserForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validation::require("nombre", &self.name, &mut errors);
        validation::require("usuario", &self.username, &mut errors);
        if self.editing.is_none() {
            validation::require("clave", &self.password, &mut errors);
        }
        errors
    }

    pub async fn submit<R: Transport>(&self, backend: &Backend<R>) -> Result<(), SubmitError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        match self.editing {
            Some(id) => {
                // PUT accepts partial fields only — no username, no password.
                let patch = UserPatch {
                    name: Some(self.name.trim().to_string()),
                    role: Some(self.role),
                    status: Some(self.status),
                };
                backend.users.update(id, &patch).await?;
            }
            None => {
                let draft = UserDraft {
                    name: self.name.trim().to_string(),
                    username: self.username.trim().to_string(),
                    password: self.password.clone(),
                    role: self.role,
                    status: self.status,
                };
                backend.users.create(&draft).await?;
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// Appointment form
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct AppointmentForm {
    pub editing: Option<i64>,
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub scheduled_at: String,
    pub treatment_id: Option<i64>,
    pub reason: String,
    pub status: StatusCode,
}

impl Default for AppointmentForm {
    fn default() -> Self {
        Self {
            editing: None,
            patient_id: None,
            doctor_id: None,
            scheduled_at: String::new(),
            treatment_id: None,
            reason: String::new(),
            status: StatusCode::Pending,
        }
    }
}

impl AppointmentForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.patient_id.is_none() {
            errors.push(FieldError::new("paciente", "Select a patient"));
        }
        if self.doctor_id.is_none() {
            errors.push(FieldError::new("medico", "Select a doctor"));
        }
        validation::require("fecha", &self.scheduled_at, &mut errors);
        errors
    }

    pub async fn submit<R: Transport>(&self, backend: &Backend<R>) -> Result<(), SubmitError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        let draft = AppointmentDraft {
            patient_id: self.patient_id.unwrap_or_default(),
            doctor_id: self.doctor_id.unwrap_or_default(),
            scheduled_at: self.scheduled_at.trim().to_string(),
            treatment_id: self.treatment_id,
            reason: opt(&self.reason),
            status: self.status,
        };

        match self.editing {
            Some(id) => {
                backend.appointments.update(id, &draft).await?;
            }
            None => {
                backend.appointments.create(&draft).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Method, MockTransport};
    use crate::session::SessionStore;
    use std::sync::Arc;

    fn backend_with(mock: Arc<MockTransport>, dir: &tempfile::TempDir) -> Backend<MockTransport> {
        let session = Arc::new(SessionStore::at(dir.path().join("session.json")));
        Backend::with_transport("http://x/api", mock, session)
    }

    fn valid_patient_form() -> PatientForm {
        PatientForm {
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            document: "001-1234567-8".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn malformed_cedula_blocks_submit_with_zero_network_calls() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        let backend = backend_with(Arc::clone(&mock), &dir);

        // Missing the final hyphen group.
        let mut form = valid_patient_form();
        form.document = "003-8489951".into();

        let err = form.submit(&backend).await.unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["cedula"]);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn malformed_phone_blocks_submit() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        let backend = backend_with(Arc::clone(&mock), &dir);

        let mut form = valid_patient_form();
        form.phone = "8094763232".into();

        let err = form.submit(&backend).await.unwrap_err();
        assert_eq!(err.field_errors()[0].field, "telefono");
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn valid_patient_creates_via_post() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/pacientes",
            201,
            r#"{"id":5,"nombre":"Ana","apellido":"Reyes","cedula":"001-1234567-8"}"#,
        );
        let backend = backend_with(Arc::clone(&mock), &dir);

        valid_patient_form().submit(&backend).await.unwrap();

        let posts = mock.calls_to("/pacientes");
        assert_eq!(posts.len(), 1);
        let body = posts[0].body.as_ref().unwrap();
        assert_eq!(body["cedula"], "001-1234567-8");
        // Blank optionals are omitted, not sent as empty strings.
        assert!(body.get("telefono").is_none());
    }

    #[tokio::test]
    async fn editing_patient_updates_via_put() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        mock.respond(Method::Put, "/pacientes/5", 204, "");
        let backend = backend_with(Arc::clone(&mock), &dir);

        let mut form = valid_patient_form();
        form.editing = Some(5);
        form.submit(&backend).await.unwrap();

        assert_eq!(mock.calls_to("/pacientes/5").len(), 1);
    }

    #[tokio::test]
    async fn insurer_phone_is_required_and_shaped() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        let backend = backend_with(Arc::clone(&mock), &dir);

        let form = InsurerForm {
            name: "ARS Humano".into(),
            phone: "809-476-323".into(),
            ..Default::default()
        };
        let err = form.submit(&backend).await.unwrap_err();
        assert_eq!(err.field_errors()[0].field, "telefono");
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn user_edit_sends_partial_patch_only() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        mock.respond(Method::Put, "/usuarios/3", 204, "");
        let backend = backend_with(Arc::clone(&mock), &dir);

        let form = UserForm {
            editing: Some(3),
            name: "María Pérez".into(),
            username: "mperez".into(),
            password: String::new(),
            role: Role::Admin,
            status: StatusCode::Inactive,
        };
        form.submit(&backend).await.unwrap();

        let puts = mock.calls_to("/usuarios/3");
        let body = puts[0].body.as_ref().unwrap();
        assert_eq!(
            body,
            &serde_json::json!({"nombre":"María Pérez","rolId":100,"estado":101})
        );
        // Username and password never travel on update.
        assert!(body.get("usuario").is_none());
        assert!(body.get("clave").is_none());
    }

    #[tokio::test]
    async fn new_user_requires_password() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        let backend = backend_with(Arc::clone(&mock), &dir);

        let form = UserForm {
            name: "María".into(),
            username: "mperez".into(),
            ..Default::default()
        };
        let err = form.submit(&backend).await.unwrap_err();
        assert_eq!(err.field_errors()[0].field, "clave");
    }

    #[tokio::test]
    async fn appointment_form_requires_patient_doctor_and_date() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        let backend = backend_with(Arc::clone(&mock), &dir);

        let err = AppointmentForm::default().submit(&backend).await.unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["paciente", "medico", "fecha"]);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn failed_create_surfaces_fetch_error_for_retry() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/pacientes",
            409,
            r#"{"message":"La cédula ya está registrada"}"#,
        );
        let backend = backend_with(Arc::clone(&mock), &dir);

        let err = valid_patient_form().submit(&backend).await.unwrap_err();
        match err {
            SubmitError::Fetch(e) => assert!(e.to_string().contains("ya está registrada")),
            SubmitError::Invalid(_) => panic!("expected fetch error"),
        }
    }
}
