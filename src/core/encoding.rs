//! Personal number (PNO) encodings and format checks.

use serde::{Deserialize, Serialize};

use super::error::PaymentError;
use super::locale::Country;

/// How the customer identifier passed as `pno` is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PnoEncoding {
    /// Swedish personal / organisation number.
    PnoSe,
    /// Norwegian personal number.
    PnoNo,
    /// Finnish personal identity code.
    PnoFi,
    /// Danish CPR number.
    PnoDk,
    /// German date of birth (DDMMYYYY).
    PnoDe,
    /// Dutch date of birth (DDMMYYYY).
    PnoNl,
    /// Austrian date of birth (DDMMYYYY).
    PnoAt,
    /// Merchant customer number.
    CustomerNumber,
    /// E-mail address.
    Email,
    /// Mobile phone number.
    CellNumber,
    /// Bank BIC and account number.
    BankBicAccountNumber,
}

impl PnoEncoding {
    /// Numeric constant used on the wire.
    pub fn id(self) -> i64 {
        match self {
            Self::PnoSe => 2,
            Self::PnoNo => 3,
            Self::PnoFi => 4,
            Self::PnoDk => 5,
            Self::PnoDe => 6,
            Self::PnoNl => 7,
            Self::PnoAt => 8,
            Self::CustomerNumber => 1000,
            Self::Email => 1001,
            Self::CellNumber => 1002,
            Self::BankBicAccountNumber => 1003,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            2 => Some(Self::PnoSe),
            3 => Some(Self::PnoNo),
            4 => Some(Self::PnoFi),
            5 => Some(Self::PnoDk),
            6 => Some(Self::PnoDe),
            7 => Some(Self::PnoNl),
            8 => Some(Self::PnoAt),
            1000 => Some(Self::CustomerNumber),
            1001 => Some(Self::Email),
            1002 => Some(Self::CellNumber),
            1003 => Some(Self::BankBicAccountNumber),
            _ => None,
        }
    }
}

/// The personal number encoding used in `country`.
pub fn encoding_for(country: Country) -> PnoEncoding {
    match country {
        Country::Se => PnoEncoding::PnoSe,
        Country::No => PnoEncoding::PnoNo,
        Country::Fi => PnoEncoding::PnoFi,
        Country::Dk => PnoEncoding::PnoDk,
        Country::De => PnoEncoding::PnoDe,
        Country::Nl => PnoEncoding::PnoNl,
        Country::At => PnoEncoding::PnoAt,
    }
}

/// Generic identifier check applied before a personal number enters a digest.
///
/// Accepts letters, digits and the separators found in personal numbers,
/// e-mail addresses and phone numbers. The separator `:` is rejected since it
/// would shift digest fields.
pub fn check_pno(pno: &str) -> bool {
    !pno.is_empty()
        && pno
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '+' | '.' | ',' | '@' | '_' | ' '))
}

/// Stricter, market-specific structural check.
pub fn check_pno_for(pno: &str, encoding: PnoEncoding) -> bool {
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    match encoding {
        PnoEncoding::PnoSe => {
            // YYMMDD[-+]NNNN, YYYYMMDDNNNN, YYMMDDNNNN
            let plain: String = pno.chars().filter(|c| *c != '-' && *c != '+').collect();
            let separators = pno.len() - plain.len();
            digits(&plain) && (plain.len() == 10 || plain.len() == 12) && separators <= 1
        }
        PnoEncoding::PnoNo => {
            let plain: String = pno.chars().filter(|c| *c != '-').collect();
            digits(&plain) && plain.len() == 11
        }
        PnoEncoding::PnoFi => {
            // DDMMYY, century sign, 3 digits, check character
            let chars: Vec<char> = pno.to_ascii_uppercase().chars().collect();
            chars.len() == 11
                && chars[..6].iter().all(char::is_ascii_digit)
                && matches!(chars[6], '-' | '+' | 'A')
                && chars[7..10].iter().all(char::is_ascii_digit)
                && chars[10].is_ascii_alphanumeric()
        }
        PnoEncoding::PnoDk => digits(pno) && (pno.len() == 8 || pno.len() == 10),
        PnoEncoding::PnoDe | PnoEncoding::PnoNl | PnoEncoding::PnoAt => {
            digits(pno) && pno.len() == 8
        }
        PnoEncoding::Email => {
            let mut parts = pno.splitn(2, '@');
            let local = parts.next().unwrap_or_default();
            let domain = parts.next().unwrap_or_default();
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        PnoEncoding::CellNumber => {
            let plain = pno.strip_prefix('+').unwrap_or(pno);
            let plain: String = plain.chars().filter(|c| *c != ' ' && *c != '-').collect();
            digits(&plain) && plain.len() >= 6
        }
        PnoEncoding::CustomerNumber | PnoEncoding::BankBicAccountNumber => check_pno(pno),
    }
}

/// Validate `pno` the way every assembler does before digesting it.
pub(crate) fn require_pno(pno: &str) -> Result<(), PaymentError> {
    if pno.is_empty() {
        return Err(PaymentError::ArgumentNotSet("PNO/SSN".into()));
    }
    if !check_pno(pno) {
        return Err(PaymentError::InvalidPno);
    }
    Ok(())
}
