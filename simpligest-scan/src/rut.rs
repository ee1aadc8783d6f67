//! Chilean RUT handling.
//!
//! A RUT is a tax identifier: a number plus a modulo-11 verifier digit
//! (0-9 or K). OCR output writes them every way the original printers
//! did (`12.345.678-5`, `12345678-5`, occasionally lowercase `k`), so
//! parsing is permissive; validation is not.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::ScanError;

/// A parsed RUT. Parsing checks shape only; call [`Rut::is_valid`] to
/// check the verifier digit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rut {
    number: u32,
    verifier: char,
}

impl Rut {
    /// Parse a RUT in any of the usual printed forms.
    pub fn parse(raw: &str) -> Result<Self, ScanError> {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '.')
            .collect::<String>()
            .to_uppercase();
        if !cleaned.is_ascii() {
            return Err(ScanError::MalformedRut(raw.to_string()));
        }

        let (number_part, verifier_part) = match cleaned.split_once('-') {
            Some((n, v)) => (n.to_string(), v.to_string()),
            None if cleaned.len() >= 2 => {
                let (n, v) = cleaned.split_at(cleaned.len() - 1);
                (n.to_string(), v.to_string())
            }
            None => return Err(ScanError::MalformedRut(raw.to_string())),
        };

        let number: u32 = number_part
            .parse()
            .map_err(|_| ScanError::MalformedRut(raw.to_string()))?;
        let verifier = match verifier_part.as_str() {
            v if v.len() == 1 => v.chars().next().unwrap(),
            _ => return Err(ScanError::MalformedRut(raw.to_string())),
        };
        if !verifier.is_ascii_digit() && verifier != 'K' {
            return Err(ScanError::MalformedRut(raw.to_string()));
        }

        Ok(Self { number, verifier })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn verifier(&self) -> char {
        self.verifier
    }

    /// The verifier digit the modulo-11 scheme assigns to a number:
    /// digits are weighted 2,3,4,5,6,7 cycling from the right, and the
    /// complement of the sum mod 11 maps 11 to 0 and 10 to K.
    pub fn verifier_for(number: u32) -> char {
        let mut remaining = number;
        let mut factor = 2u32;
        let mut sum = 0u32;
        while remaining > 0 {
            sum += (remaining % 10) * factor;
            remaining /= 10;
            factor = if factor == 7 { 2 } else { factor + 1 };
        }
        match 11 - (sum % 11) {
            11 => '0',
            10 => 'K',
            d => char::from_digit(d, 10).unwrap_or('0'),
        }
    }

    /// Whether the carried verifier matches the computed one.
    pub fn is_valid(&self) -> bool {
        self.verifier == Self::verifier_for(self.number)
    }
}

impl fmt::Display for Rut {
    /// Canonical printed form, with thousands dots: `12.345.678-5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.number.to_string();
        let mut grouped = String::new();
        for (i, ch) in digits.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        let grouped: String = grouped.chars().rev().collect();
        write!(f, "{}-{}", grouped, self.verifier)
    }
}

impl Serialize for Rut {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_known_verifiers() {
        assert_eq!(Rut::verifier_for(12_345_678), '5');
        assert_eq!(Rut::verifier_for(11_111_111), '1');
        assert_eq!(Rut::verifier_for(76_086_428), '5');
        assert_eq!(Rut::verifier_for(22_222_229), 'K');
    }

    #[test]
    fn parses_printed_forms() {
        let dotted = Rut::parse("12.345.678-5").unwrap();
        let plain = Rut::parse("12345678-5").unwrap();
        assert_eq!(dotted, plain);
        assert_eq!(dotted.number(), 12_345_678);
        assert!(dotted.is_valid());
    }

    #[test]
    fn wrong_verifier_parses_but_does_not_validate() {
        let rut = Rut::parse("12.345.678-4").unwrap();
        assert!(!rut.is_valid());
    }

    #[test]
    fn lowercase_k_verifier_is_accepted() {
        let rut = Rut::parse("22.222.229-k").unwrap();
        assert_eq!(rut.verifier(), 'K');
        assert!(rut.is_valid());
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(Rut::parse("not a rut").is_err());
        assert!(Rut::parse("").is_err());
        assert!(Rut::parse("12.345.678-55").is_err());
        assert!(Rut::parse("12345ñ").is_err());
    }

    #[test]
    fn displays_canonical_form() {
        let rut = Rut::parse("12345678-5").unwrap();
        assert_eq!(rut.to_string(), "12.345.678-5");
    }
}
