//! Best-effort extraction of invoice fields from OCR text.
//!
//! OCR output is noisy: labels drift (`R.U.T.`, `RUT`, `Rut:`), dates
//! arrive in three formats, amounts carry thousands dots and stray
//! `$`. Each field has its own pattern; a field that does not match is
//! left empty and lowers the scan confidence instead of failing the
//! scan. Only a text with nothing recognizable at all is an error.

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{ScanError, ScanResult};
use crate::rut::Rut;
use crate::types::{DteKind, ScannedInvoice};

/// Number of fields a complete scan recovers; confidence is measured
/// against this.
const EXPECTED_FIELDS: usize = 7;

/// Field extractors with their patterns compiled once at construction.
pub struct InvoiceScanner {
    rut_re: Regex,
    folio_re: Regex,
    dte_code_re: Regex,
    ymd_re: Regex,
    dmy_re: Regex,
    net_re: Regex,
    iva_re: Regex,
    total_re: Regex,
}

impl InvoiceScanner {
    pub fn new() -> ScanResult<Self> {
        Ok(Self {
            rut_re: Regex::new(r"(?i)r\.?\s*u\.?\s*t\.?\s*:?\s*([\d.]+\s*-\s*[\dkK])")?,
            folio_re: Regex::new(r"(?i)(?:folio|n[°º])\s*(?:n[°º])?\s*:?\s*#?\s*(\d+)")?,
            dte_code_re: Regex::new(r"(?i)\bdte\s*(?:tipo\s*)?(\d{2})\b")?,
            ymd_re: Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b")?,
            dmy_re: Regex::new(r"\b(\d{1,2})[-/](\d{1,2})[-/](\d{4})\b")?,
            net_re: Regex::new(r"(?i)(?:monto\s+)?neto\s*:?\s*\$?\s*([\d.]+)")?,
            iva_re: Regex::new(
                r"(?i)(?:\biva\b|i\.v\.a\.?|impuesto)\s*(?:\(\s*19\s*%\s*\))?\s*:?\s*\$?\s*([\d.]+)",
            )?,
            total_re: Regex::new(r"(?i)(?:monto\s+)?total\s*:?\s*\$?\s*([\d.]+)")?,
        })
    }

    /// Scan one OCR text into a structured invoice.
    pub fn scan(&self, text: &str) -> ScanResult<ScannedInvoice> {
        let supplier_rut = self
            .rut_re
            .captures(text)
            .and_then(|c| Rut::parse(&c[1].replace(' ', "")).ok());
        let folio = self
            .folio_re
            .captures(text)
            .and_then(|c| c[1].parse::<u64>().ok());
        let kind = self.detect_kind(text);
        let issue_date = self.detect_date(text)?;
        let net = self.amount(&self.net_re, text)?;
        let iva = self.amount(&self.iva_re, text)?;
        let total = self.amount(&self.total_re, text)?;

        let found = [
            supplier_rut.is_some(),
            folio.is_some(),
            kind.is_some(),
            issue_date.is_some(),
            net.is_some(),
            iva.is_some(),
            total.is_some(),
        ]
        .iter()
        .filter(|f| **f)
        .count();

        if found == 0 {
            return Err(ScanError::NoRecognizableFields);
        }

        Ok(ScannedInvoice {
            supplier_rut,
            folio,
            kind,
            issue_date,
            net,
            iva,
            total,
            confidence: found as f64 / EXPECTED_FIELDS as f64,
        })
    }

    /// Document kind, from its printed name or a bare `DTE 33` code.
    fn detect_kind(&self, text: &str) -> Option<DteKind> {
        let lower = text.to_lowercase();
        let by_name = [
            ("factura electrónica", DteKind::FacturaElectronica),
            ("factura electronica", DteKind::FacturaElectronica),
            ("factura exenta", DteKind::FacturaExenta),
            ("factura no afecta", DteKind::FacturaExenta),
            ("boleta", DteKind::Boleta),
            ("guía de despacho", DteKind::GuiaDespacho),
            ("guia de despacho", DteKind::GuiaDespacho),
            ("nota de crédito", DteKind::NotaCredito),
            ("nota de credito", DteKind::NotaCredito),
        ];
        for (needle, kind) in by_name {
            if lower.contains(needle) {
                return Some(kind);
            }
        }
        self.dte_code_re
            .captures(text)
            .and_then(|c| c[1].parse::<u16>().ok())
            .and_then(DteKind::from_code)
    }

    /// First date in the text, ISO form preferred over day-first.
    fn detect_date(&self, text: &str) -> ScanResult<Option<NaiveDate>> {
        if let Some(c) = self.ymd_re.captures(text) {
            let (y, m, d) = (parse_u32(&c[1]), parse_u32(&c[2]), parse_u32(&c[3]));
            return NaiveDate::from_ymd_opt(y as i32, m, d)
                .map(Some)
                .ok_or_else(|| ScanError::UnrecognizedDate(c[0].to_string()));
        }
        if let Some(c) = self.dmy_re.captures(text) {
            let (d, m, y) = (parse_u32(&c[1]), parse_u32(&c[2]), parse_u32(&c[3]));
            return NaiveDate::from_ymd_opt(y as i32, m, d)
                .map(Some)
                .ok_or_else(|| ScanError::UnrecognizedDate(c[0].to_string()));
        }
        Ok(None)
    }

    /// A CLP amount captured by `re`: thousands dots stripped, no cents.
    fn amount(&self, re: &Regex, text: &str) -> ScanResult<Option<i64>> {
        match re.captures(text) {
            Some(c) => {
                let raw = c[1].to_string();
                let cleaned = raw.replace('.', "");
                cleaned
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| ScanError::UnparseableAmount(raw))
            }
            None => Ok(None),
        }
    }
}

fn parse_u32(s: &str) -> u32 {
    s.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_OCR: &str = "\
FERRETERIA EL MAESTRO LTDA.
R.U.T.: 76.086.428-5
FACTURA ELECTRONICA
FOLIO N° 102544
Fecha de emision: 28/06/2026
MONTO NETO: $84.034
IVA (19%): $15.966
TOTAL: $100.000
";

    #[test]
    fn scans_a_complete_invoice() {
        let scanner = InvoiceScanner::new().unwrap();
        let scan = scanner.scan(SAMPLE_OCR).unwrap();

        let rut = scan.supplier_rut.as_ref().unwrap();
        assert_eq!(rut.to_string(), "76.086.428-5");
        assert!(rut.is_valid());
        assert_eq!(scan.folio, Some(102_544));
        assert_eq!(scan.kind, Some(DteKind::FacturaElectronica));
        assert_eq!(
            scan.issue_date,
            NaiveDate::from_ymd_opt(2026, 6, 28)
        );
        assert_eq!(scan.net, Some(84_034));
        assert_eq!(scan.iva, Some(15_966));
        assert_eq!(scan.total, Some(100_000));
        assert!((scan.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn partial_scan_degrades_confidence() {
        let scanner = InvoiceScanner::new().unwrap();
        let scan = scanner.scan("BOLETA\nTOTAL $4.990\n").unwrap();
        assert_eq!(scan.kind, Some(DteKind::Boleta));
        assert_eq!(scan.total, Some(4_990));
        assert!(scan.supplier_rut.is_none());
        assert!(scan.folio.is_none());
        assert!((scan.confidence - 2.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn unrecognizable_text_is_an_error() {
        let scanner = InvoiceScanner::new().unwrap();
        let err = scanner.scan("completely unrelated text").unwrap_err();
        assert!(matches!(err, ScanError::NoRecognizableFields));
    }

    #[test]
    fn iso_dates_are_accepted() {
        let scanner = InvoiceScanner::new().unwrap();
        let scan = scanner
            .scan("GUIA DE DESPACHO\nFecha: 2026-06-28\nFOLIO: 17\n")
            .unwrap();
        assert_eq!(scan.kind, Some(DteKind::GuiaDespacho));
        assert_eq!(
            scan.issue_date,
            NaiveDate::from_ymd_opt(2026, 6, 28)
        );
        assert_eq!(scan.folio, Some(17));
    }

    #[test]
    fn dte_code_fallback_identifies_the_kind() {
        let scanner = InvoiceScanner::new().unwrap();
        let scan = scanner.scan("DTE 61\nFOLIO: 9\n").unwrap();
        assert_eq!(scan.kind, Some(DteKind::NotaCredito));
    }

    #[test]
    fn impossible_date_is_an_error() {
        let scanner = InvoiceScanner::new().unwrap();
        let err = scanner.scan("FOLIO: 3\nFecha: 45/13/2026\n").unwrap_err();
        assert!(matches!(err, ScanError::UnrecognizedDate(_)));
    }
}
