use serde::{Deserialize, Serialize};

/// Invoice record as served by the clinical backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    #[serde(rename = "pacienteId", alias = "pacienteID", default)]
    pub patient_id: Option<i64>,
    /// Patient national id — the simplified creation path identifies the
    /// subject by document rather than by record id.
    #[serde(rename = "cedula", default)]
    pub document: Option<String>,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "fecha", default)]
    pub issued_at: Option<String>,
    #[serde(rename = "pagada", default)]
    pub paid: bool,
}

/// Invoice line item. Fetched in bulk and filtered client-side by
/// invoice id — the backend exposes no per-invoice filter endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: i64,
    #[serde(rename = "facturaId", alias = "facturaID")]
    pub invoice_id: i64,
    #[serde(rename = "tratamientoId", alias = "tratamientoID", default)]
    pub treatment_id: Option<i64>,
    #[serde(rename = "monto")]
    pub amount: f64,
}

/// Simplified creation payload: subject identifier + amount only.
/// Used whenever no insurer is involved.
#[derive(Debug, Clone, Serialize)]
pub struct SimpleInvoiceDraft {
    #[serde(rename = "cedula")]
    pub document: String,
    #[serde(rename = "monto")]
    pub amount: f64,
}

/// Specialized creation payload for the covered path — carries the
/// insurer ref and the insurer-derived amount from the coverage check.
#[derive(Debug, Clone, Serialize)]
pub struct CoveredInvoiceDraft {
    #[serde(rename = "cedula")]
    pub document: String,
    #[serde(rename = "arsId")]
    pub insurer_id: i64,
    #[serde(rename = "noPoliza", skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,
    #[serde(rename = "monto")]
    pub amount: f64,
}

/// New invoice line linking an invoice to a treatment.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLineDraft {
    #[serde(rename = "facturaId")]
    pub invoice_id: i64,
    #[serde(rename = "tratamientoId")]
    pub treatment_id: i64,
    #[serde(rename = "monto")]
    pub amount: f64,
}

/// Partial update toggling only the paid flag.
#[derive(Debug, Clone, Serialize)]
pub struct PaidPatch {
    #[serde(rename = "pagada")]
    pub paid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_paid_defaults_false() {
        let inv: Invoice =
            serde_json::from_str(r#"{"id":9,"monto":1500.0,"fecha":"2026-07-01"}"#).unwrap();
        assert!(!inv.paid);
        assert!(inv.patient_id.is_none());
    }

    #[test]
    fn line_accepts_both_invoice_ref_casings() {
        let a: InvoiceLine =
            serde_json::from_str(r#"{"id":1,"facturaId":9,"monto":500.0}"#).unwrap();
        let b: InvoiceLine =
            serde_json::from_str(r#"{"id":1,"facturaID":9,"monto":500.0}"#).unwrap();
        assert_eq!(a.invoice_id, 9);
        assert_eq!(b.invoice_id, 9);
    }

    #[test]
    fn simple_draft_carries_document_and_amount_only() {
        let draft = SimpleInvoiceDraft {
            document: "001-1234567-8".into(),
            amount: 2500.0,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"cedula": "001-1234567-8", "monto": 2500.0})
        );
    }

    #[test]
    fn covered_draft_omits_absent_policy_number() {
        let draft = CoveredInvoiceDraft {
            document: "001-1234567-8".into(),
            insurer_id: 4,
            policy_number: None,
            amount: 1800.0,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("noPoliza").is_none());
        assert_eq!(json["arsId"], 4);
    }
}
