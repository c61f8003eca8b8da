//! Transport records for the clinical backend.
//!
//! These are wire types, not owned domain objects: the backend is the sole
//! authority on lifecycle and validity. Records accept the backend's Spanish
//! field names (and their casing variants) and expose canonical Rust names;
//! the wire ambiguity never leaks past this module.

pub mod appointment;
pub mod coverage;
pub mod doctor;
pub mod enums;
pub mod insurer;
pub mod invoice;
pub mod patient;
pub mod user;

pub use appointment::{Appointment, AppointmentDraft, StatusPatch};
pub use coverage::{CoverageOutcome, CoverageRequest, CoverageStatus};
pub use doctor::{Doctor, DoctorDraft};
pub use enums::{Role, StatusCode};
pub use insurer::{Insurer, InsurerDraft};
pub use invoice::{
    CoveredInvoiceDraft, Invoice, InvoiceLine, InvoiceLineDraft, PaidPatch, SimpleInvoiceDraft,
};
pub use patient::{Patient, PatientDraft};
pub use user::{UserAccount, UserDraft, UserPatch};
