//! Invoice scanning: the constraint layer between OCR output and the
//! bookkeeping that trusts it.
//!
//! The OCR engine outputs free text. This crate parses that text into
//! exactly one structured invoice record and validates it with named
//! rules before anything downstream records a purchase against it.
//!
//! The type system is the safety layer:
//! - Every document kind is an enum variant with its SII code
//! - The supplier RUT carries its verifier digit and can prove itself
//! - Amounts are structured values whose arithmetic gets checked
//! - A scan with nothing recognizable is rejected at parse time

pub mod error;
pub mod parser;
pub mod rut;
pub mod types;
pub mod validator;

pub use error::ScanError;
pub use parser::InvoiceScanner;
pub use rut::Rut;
pub use types::{DteKind, ScannedInvoice};
pub use validator::{validate_scan, Severity, ValidationResult, Violation};
