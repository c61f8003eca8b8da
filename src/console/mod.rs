//! View/form layer: listing boards, modal forms, and the mutation/refresh
//! cycle.
//!
//! Every mutation performed in a child form reports success to its parent
//! board, whose only reaction is to close the modal and re-run the full
//! list fetch — never a local patch of the changed record. The backend is
//! the sole source of truth; the listing shows the last successful full
//! refetch, nothing else.

pub mod appointments;
pub mod billing;
pub mod board;
pub mod forms;

pub use appointments::AppointmentBoard;
pub use billing::{
    BillingDesk, BillingError, CoverageGate, InvoiceForm, InvoiceReceipt, ProcedureChoice,
    SubmitBlocked,
};
pub use board::Board;
pub use forms::{AppointmentForm, DoctorForm, InsurerForm, PatientForm, UserForm};

use crate::backend::FetchError;
use crate::validation::FieldError;

/// Transient user-facing notice (toast / inline banner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Self::Success(t) | Self::Info(t) | Self::Warning(t) | Self::Error(t) => t,
        }
    }
}

/// Why a form submission did not go through. `Invalid` never reached the
/// network; `Fetch` did and failed — the form stays open either way so the
/// user can retry.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Fix the highlighted fields")]
    Invalid(Vec<FieldError>),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl SubmitError {
    /// Field errors when validation blocked the submit.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Invalid(errors) => errors,
            Self::Fetch(_) => &[],
        }
    }
}
