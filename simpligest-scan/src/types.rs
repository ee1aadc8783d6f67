use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::rut::Rut;

/// The SII electronic document kinds the scanner recognizes, with
/// their official numeric codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DteKind {
    /// Código 33: factura electrónica.
    FacturaElectronica,
    /// Código 34: factura no afecta o exenta.
    FacturaExenta,
    /// Código 39: boleta electrónica.
    Boleta,
    /// Código 52: guía de despacho.
    GuiaDespacho,
    /// Código 61: nota de crédito.
    NotaCredito,
}

impl DteKind {
    pub fn code(&self) -> u16 {
        match self {
            DteKind::FacturaElectronica => 33,
            DteKind::FacturaExenta => 34,
            DteKind::Boleta => 39,
            DteKind::GuiaDespacho => 52,
            DteKind::NotaCredito => 61,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            33 => Some(DteKind::FacturaElectronica),
            34 => Some(DteKind::FacturaExenta),
            39 => Some(DteKind::Boleta),
            52 => Some(DteKind::GuiaDespacho),
            61 => Some(DteKind::NotaCredito),
            _ => None,
        }
    }
}

impl fmt::Display for DteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DteKind::FacturaElectronica => write!(f, "factura electrónica (33)"),
            DteKind::FacturaExenta => write!(f, "factura exenta (34)"),
            DteKind::Boleta => write!(f, "boleta (39)"),
            DteKind::GuiaDespacho => write!(f, "guía de despacho (52)"),
            DteKind::NotaCredito => write!(f, "nota de crédito (61)"),
        }
    }
}

/// What the scanner recovered from one OCR text.
///
/// Every field is optional: OCR drops lines, and a partial read is
/// still worth surfacing for manual completion. `confidence` is the
/// fraction of expected fields that were recovered; the validator
/// decides what downstream may trust.
#[derive(Clone, Debug, Serialize)]
pub struct ScannedInvoice {
    pub supplier_rut: Option<Rut>,
    pub folio: Option<u64>,
    pub kind: Option<DteKind>,
    pub issue_date: Option<NaiveDate>,
    /// Amounts in whole CLP; the currency has no cents.
    pub net: Option<i64>,
    pub iva: Option<i64>,
    pub total: Option<i64>,
    pub confidence: f64,
}
