//! Named-rule validation of a scanned invoice.
//!
//! The scanner is permissive; this is where trust is decided. Every
//! rule has a name that shows up in logs and in the CLI output, and a
//! severity: `Reject` means the document must not be recorded without
//! manual correction, `Warn` means it can proceed but the finding is
//! surfaced.

use chrono::NaiveDate;

use crate::types::ScannedInvoice;

/// Chilean VAT rate applied to the net amount.
const IVA_RATE: f64 = 0.19;

/// Rounding slack, in CLP, tolerated between the declared IVA and
/// `round(net x 0.19)`. Issuers round half-up on the net; $2 absorbs
/// every variant observed in the wild.
const IVA_TOLERANCE: i64 = 2;

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone)]
pub struct Violation {
    pub rule: &'static str,
    pub detail: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    /// The document must be corrected before it is recorded.
    Reject,
    /// The document can proceed; the finding is logged.
    Warn,
}

/// Validate a scan against a reference date (injected, never read from
/// the system clock, so validation of an archived scan is repeatable).
pub fn validate_scan(scan: &ScannedInvoice, today: NaiveDate) -> ValidationResult {
    let mut violations = Vec::new();

    match &scan.supplier_rut {
        None => violations.push(Violation {
            rule: "SUPPLIER_RUT_REQUIRED",
            detail: "No supplier RUT was recognized in the scan.".into(),
            severity: Severity::Reject,
        }),
        Some(rut) if !rut.is_valid() => violations.push(Violation {
            rule: "RUT_VERIFIER",
            detail: format!(
                "RUT {} fails its verifier digit; expected {}.",
                rut,
                crate::rut::Rut::verifier_for(rut.number())
            ),
            severity: Severity::Reject,
        }),
        Some(_) => {}
    }

    if scan.folio.is_none() {
        violations.push(Violation {
            rule: "FOLIO_REQUIRED",
            detail: "No folio number was recognized; the document cannot be traced.".into(),
            severity: Severity::Reject,
        });
    }

    match scan.issue_date {
        None => violations.push(Violation {
            rule: "ISSUE_DATE_MISSING",
            detail: "No issue date was recognized.".into(),
            severity: Severity::Warn,
        }),
        Some(date) if date > today => violations.push(Violation {
            rule: "ISSUE_DATE_FUTURE",
            detail: format!("Issue date {} is after the reference date {}.", date, today),
            severity: Severity::Reject,
        }),
        Some(_) => {}
    }

    match (scan.net, scan.iva, scan.total) {
        (Some(net), Some(iva), Some(total)) => {
            if net + iva != total {
                violations.push(Violation {
                    rule: "TOTAL_ARITHMETIC",
                    detail: format!(
                        "Total {} does not equal net {} + IVA {} = {}.",
                        total,
                        net,
                        iva,
                        net + iva
                    ),
                    severity: Severity::Reject,
                });
            }
            let expected_iva = (net as f64 * IVA_RATE).round() as i64;
            if (iva - expected_iva).abs() > IVA_TOLERANCE {
                violations.push(Violation {
                    rule: "IVA_RATE",
                    detail: format!(
                        "Declared IVA {} is off the 19% of net ({}) by more than rounding.",
                        iva, expected_iva
                    ),
                    severity: Severity::Warn,
                });
            }
        }
        _ => violations.push(Violation {
            rule: "AMOUNTS_INCOMPLETE",
            detail: "Net, IVA and total were not all recognized; arithmetic unchecked.".into(),
            severity: Severity::Warn,
        }),
    }

    let valid = !violations.iter().any(|v| v.severity == Severity::Reject);

    ValidationResult { valid, violations }
}
