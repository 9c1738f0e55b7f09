//! Country, language and currency tables and locale resolution.
//!
//! The remote service identifies markets by small integer ids rather than
//! ISO codes. These tables translate between the two and carry the default
//! language and currency of every supported market.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PaymentError;

/// Supported market countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    /// Austria.
    At,
    /// Denmark.
    Dk,
    /// Finland.
    Fi,
    /// Germany.
    De,
    /// Netherlands.
    Nl,
    /// Norway.
    No,
    /// Sweden.
    Se,
}

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Danish.
    Da,
    /// German.
    De,
    /// English.
    En,
    /// Finnish.
    Fi,
    /// Norwegian Bokmål.
    Nb,
    /// Dutch.
    Nl,
    /// Swedish.
    Sv,
}

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Swedish krona.
    Sek,
    /// Norwegian krone.
    Nok,
    /// Euro.
    Eur,
    /// Danish krone.
    Dkk,
}

struct CountryRow {
    country: Country,
    id: i64,
    alpha2: &'static str,
    alpha3: &'static str,
    name: &'static str,
    language: Language,
    currency: Currency,
}

static COUNTRIES: &[CountryRow] = &[
    CountryRow { country: Country::At, id: 15, alpha2: "at", alpha3: "aut", name: "Austria", language: Language::De, currency: Currency::Eur },
    CountryRow { country: Country::Dk, id: 59, alpha2: "dk", alpha3: "dnk", name: "Denmark", language: Language::Da, currency: Currency::Dkk },
    CountryRow { country: Country::Fi, id: 73, alpha2: "fi", alpha3: "fin", name: "Finland", language: Language::Fi, currency: Currency::Eur },
    CountryRow { country: Country::De, id: 81, alpha2: "de", alpha3: "deu", name: "Germany", language: Language::De, currency: Currency::Eur },
    CountryRow { country: Country::Nl, id: 154, alpha2: "nl", alpha3: "nld", name: "Netherlands", language: Language::Nl, currency: Currency::Eur },
    CountryRow { country: Country::No, id: 164, alpha2: "no", alpha3: "nor", name: "Norway", language: Language::Nb, currency: Currency::Nok },
    CountryRow { country: Country::Se, id: 209, alpha2: "se", alpha3: "swe", name: "Sweden", language: Language::Sv, currency: Currency::Sek },
];

static LANGUAGES: &[(Language, i64, &str)] = &[
    (Language::Da, 27, "da"),
    (Language::De, 28, "de"),
    (Language::En, 31, "en"),
    (Language::Fi, 37, "fi"),
    (Language::Nb, 97, "nb"),
    (Language::Nl, 101, "nl"),
    (Language::Sv, 138, "sv"),
];

static CURRENCIES: &[(Currency, i64, &str)] = &[
    (Currency::Sek, 0, "sek"),
    (Currency::Nok, 1, "nok"),
    (Currency::Eur, 2, "eur"),
    (Currency::Dkk, 3, "dkk"),
];

impl Country {
    fn row(self) -> &'static CountryRow {
        // Every variant has exactly one row (checked in tests).
        COUNTRIES
            .iter()
            .find(|r| r.country == self)
            .unwrap_or(&COUNTRIES[0])
    }

    /// Numeric id used on the wire.
    pub fn id(self) -> i64 {
        self.row().id
    }

    /// Lowercase ISO 3166-1 alpha-2 code.
    pub fn code(self) -> &'static str {
        self.row().alpha2
    }

    /// English country name.
    pub fn name(self) -> &'static str {
        self.row().name
    }

    /// Language used when none is given explicitly.
    pub fn default_language(self) -> Language {
        self.row().language
    }

    /// Currency used when none is given explicitly.
    pub fn default_currency(self) -> Currency {
        self.row().currency
    }

    pub fn from_id(id: i64) -> Option<Self> {
        COUNTRIES.iter().find(|r| r.id == id).map(|r| r.country)
    }

    /// Look up an alpha-2 or alpha-3 code, case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        COUNTRIES
            .iter()
            .find(|r| r.alpha2 == code || r.alpha3 == code)
            .map(|r| r.country)
    }
}

impl Language {
    pub fn id(self) -> i64 {
        LANGUAGES
            .iter()
            .find(|(l, _, _)| *l == self)
            .map(|(_, id, _)| *id)
            .unwrap_or_default()
    }

    /// Lowercase ISO 639-1 code.
    pub fn code(self) -> &'static str {
        LANGUAGES
            .iter()
            .find(|(l, _, _)| *l == self)
            .map(|(_, _, code)| *code)
            .unwrap_or_default()
    }

    pub fn from_id(id: i64) -> Option<Self> {
        LANGUAGES.iter().find(|(_, i, _)| *i == id).map(|(l, _, _)| *l)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        LANGUAGES.iter().find(|(_, _, c)| *c == code).map(|(l, _, _)| *l)
    }
}

impl Currency {
    pub fn id(self) -> i64 {
        CURRENCIES
            .iter()
            .find(|(c, _, _)| *c == self)
            .map(|(_, id, _)| *id)
            .unwrap_or_default()
    }

    /// Lowercase ISO 4217 code.
    pub fn code(self) -> &'static str {
        CURRENCIES
            .iter()
            .find(|(c, _, _)| *c == self)
            .map(|(_, _, code)| *code)
            .unwrap_or_default()
    }

    pub fn from_id(id: i64) -> Option<Self> {
        CURRENCIES.iter().find(|(_, i, _)| *i == id).map(|(c, _, _)| *c)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        CURRENCIES.iter().find(|(_, _, c)| *c == code).map(|(c, _, _)| *c)
    }
}

/// Numeric strings are taken as ids, everything else as a code.
fn parse_with<T>(
    s: &str,
    from_id: fn(i64) -> Option<T>,
    from_code: fn(&str) -> Option<T>,
) -> Option<T> {
    match s.trim().parse::<i64>() {
        Ok(id) => from_id(id),
        Err(_) => from_code(s),
    }
}

impl FromStr for Country {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_with(s, Self::from_id, Self::from_code)
            .ok_or_else(|| PaymentError::UnknownCountry(s.to_string()))
    }
}

impl FromStr for Language {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_with(s, Self::from_id, Self::from_code)
            .ok_or_else(|| PaymentError::UnknownLanguage(s.to_string()))
    }
}

impl FromStr for Currency {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_with(s, Self::from_id, Self::from_code)
            .ok_or_else(|| PaymentError::UnknownCurrency(s.to_string()))
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A fully resolved (country, language, currency) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    pub country: Country,
    pub language: Language,
    pub currency: Currency,
}

impl Locale {
    /// Locale for `country` with its default language and currency.
    pub fn for_country(country: Country) -> Self {
        Self {
            country,
            language: country.default_language(),
            currency: country.default_currency(),
        }
    }
}

/// Locale as configured on a client; any part may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialLocale {
    pub country: Option<Country>,
    pub language: Option<Language>,
    pub currency: Option<Currency>,
}

impl PartialLocale {
    /// The complete locale, or [`PaymentError::InvalidLocale`] if any part is unset.
    pub fn complete(&self) -> Result<Locale, PaymentError> {
        match (self.country, self.language, self.currency) {
            (Some(country), Some(language), Some(currency)) => Ok(Locale {
                country,
                language,
                currency,
            }),
            _ => Err(PaymentError::InvalidLocale),
        }
    }
}

impl From<Locale> for PartialLocale {
    fn from(locale: Locale) -> Self {
        Self {
            country: Some(locale.country),
            language: Some(locale.language),
            currency: Some(locale.currency),
        }
    }
}

/// Resolve a locale from explicit overrides, falling back to `configured`.
///
/// Without an explicit country the configured locale is used as the base.
/// Missing language and currency are then filled in from the country table.
pub fn resolve_locale(
    configured: &PartialLocale,
    country: Option<&str>,
    language: Option<&str>,
    currency: Option<&str>,
) -> Result<Locale, PaymentError> {
    let partial = match country {
        None => *configured,
        Some(country) => PartialLocale {
            country: Some(country.parse()?),
            language: language.map(str::parse).transpose()?,
            currency: currency.map(str::parse).transpose()?,
        },
    };

    let country = partial.country.ok_or(PaymentError::InvalidLocale)?;
    Ok(Locale {
        country,
        language: partial.language.unwrap_or(country.default_language()),
        currency: partial.currency.unwrap_or(country.default_currency()),
    })
}
