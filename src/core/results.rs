//! Mapping of raw response values into typed results.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::error::PaymentError;
use super::flags::{AddressLookup, OrderStatus};
use super::locale::Country;
use super::types::{Address, PClass, PClassKind};
use super::value::Value;

/// Format of timestamps returned by `extend_expiry_date`.
pub const EXPIRY_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Result of `activate_part`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartActivation {
    /// Temporary URL of the activated invoice PDF.
    pub url: String,
    /// Number of the remaining passive invoice, `"0"` when fully activated.
    pub invno: String,
}

fn invalid(what: &str, value: &Value) -> PaymentError {
    PaymentError::InvalidResponse(format!("expected {what}, got {value:?}"))
}

/// A string result; integers are accepted and rendered as text.
pub(crate) fn text(value: &Value) -> Result<String, PaymentError> {
    match value {
        Value::Str(s) => Ok(s.clone()),
        Value::Int(i) => Ok(i.to_string()),
        other => Err(invalid("string", other)),
    }
}

pub(crate) fn is_ok(value: &Value) -> bool {
    value.as_str() == Some("ok")
}

pub(crate) fn order_status(value: &Value) -> Result<OrderStatus, PaymentError> {
    value
        .as_i64()
        .and_then(OrderStatus::from_id)
        .ok_or_else(|| invalid("order status", value))
}

fn pair(value: &Value) -> Result<(&Value, &Value), PaymentError> {
    match value.as_array() {
        Some([first, second, ..]) => Ok((first, second)),
        _ => Err(invalid("two element array", value)),
    }
}

/// `[number, status]` as returned by `add_invoice` and `reserve_amount`.
pub(crate) fn number_and_status(value: &Value) -> Result<(String, OrderStatus), PaymentError> {
    let (number, status) = pair(value)?;
    Ok((text(number)?, order_status(status)?))
}

/// `[risk status, invoice number]` as returned by the activation calls.
pub(crate) fn text_pair(value: &Value) -> Result<(String, String), PaymentError> {
    let (first, second) = pair(value)?;
    Ok((text(first)?, text(second)?))
}

pub(crate) fn text_list(value: &Value) -> Result<Vec<String>, PaymentError> {
    value
        .as_array()
        .ok_or_else(|| invalid("array", value))?
        .iter()
        .map(text)
        .collect()
}

/// Amount in minor units converted to major units.
pub(crate) fn minor_units(value: &Value) -> Result<Decimal, PaymentError> {
    let minor = match value {
        Value::Int(i) => Some(Decimal::from(*i)),
        Value::Double(d) => Decimal::from_f64(*d),
        Value::Str(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    minor
        .map(|m| m / Decimal::ONE_HUNDRED)
        .ok_or_else(|| invalid("amount", value))
}

pub(crate) fn expiry_date(value: &Value) -> Result<NaiveDateTime, PaymentError> {
    let raw = value.as_str().ok_or_else(|| invalid("date string", value))?;
    NaiveDateTime::parse_from_str(raw, EXPIRY_FORMAT).map_err(|e| {
        PaymentError::InvalidResponse(format!(
            "could not parse '{raw}' with format '{EXPIRY_FORMAT}': {e}"
        ))
    })
}

pub(crate) fn part_activation(value: &Value) -> Result<PartActivation, PaymentError> {
    let field = |key: &str| {
        value
            .get(key)
            .ok_or_else(|| invalid(&format!("struct with '{key}'"), value))
            .and_then(text)
    };
    Ok(PartActivation {
        url: field("url")?,
        invno: field("invno")?,
    })
}

fn country(value: &Value) -> Result<Option<Country>, PaymentError> {
    match value {
        Value::Int(id) => Country::from_id(*id)
            .map(Some)
            .ok_or_else(|| PaymentError::UnknownCountry(id.to_string())),
        Value::Str(s) if s.is_empty() => Ok(None),
        Value::Str(s) => s.parse().map(Some),
        other => Err(invalid("country", other)),
    }
}

fn column(row: &[Value], index: usize) -> Result<String, PaymentError> {
    row.get(index)
        .ok_or_else(|| PaymentError::InvalidResponse(format!("address row has no column {index}")))
        .and_then(text)
}

/// Address row in the layout used by `invoice_address` and by
/// `get_addresses` with [`AddressLookup::All`]: an empty first column
/// marks a company.
fn full_address(row: &[Value]) -> Result<Address, PaymentError> {
    let first = column(row, 0)?;
    let mut address = Address::default();
    if first.is_empty() {
        address.is_company = true;
        address.company_name = column(row, 1)?;
    } else {
        address.first_name = first;
        address.last_name = column(row, 1)?;
    }
    address.street = column(row, 2)?;
    address.zip = column(row, 3)?;
    address.city = column(row, 4)?;
    let country_value = row
        .get(5)
        .ok_or_else(|| PaymentError::InvalidResponse("address row has no country".into()))?;
    address.country = country(country_value)?;
    Ok(address)
}

fn address_row(row: &[Value], lookup: AddressLookup) -> Result<Address, PaymentError> {
    let mut address = Address::default();
    let rest = match lookup {
        AddressLookup::All => return full_address(row),
        AddressLookup::Given if row.len() == 5 => {
            address.is_company = true;
            address.company_name = column(row, 0)?;
            1
        }
        AddressLookup::Given => {
            address.first_name = column(row, 0)?;
            address.last_name = column(row, 1)?;
            2
        }
        AddressLookup::Last => {
            address.last_name = column(row, 0)?;
            1
        }
    };
    address.street = column(row, rest)?;
    address.zip = column(row, rest + 1)?;
    address.city = column(row, rest + 2)?;
    let country_value = row
        .get(rest + 3)
        .ok_or_else(|| PaymentError::InvalidResponse("address row has no country".into()))?;
    address.country = country(country_value)?;
    Ok(address)
}

/// Addresses from a `get_addresses` response. Malformed rows are skipped.
pub(crate) fn addresses(value: &Value, lookup: AddressLookup) -> Result<Vec<Address>, PaymentError> {
    let rows = value.as_array().ok_or_else(|| invalid("array", value))?;
    let mut out = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let parsed = row
            .as_array()
            .ok_or_else(|| invalid("address row", row))
            .and_then(|row| address_row(row, lookup));
        match parsed {
            Ok(address) => out.push(address),
            Err(err) => tracing::warn!(index, error = %err, "skipping malformed address"),
        }
    }
    Ok(out)
}

pub(crate) fn invoice_address(value: &Value) -> Result<Address, PaymentError> {
    let row = value.as_array().ok_or_else(|| invalid("address row", value))?;
    full_address(row)
}

fn parse_expire(value: &Value) -> Option<NaiveDateTime> {
    let raw = value.as_str()?.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, EXPIRY_FORMAT))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn pclass(row: &[Value], eid: u32) -> Result<PClass, PaymentError> {
    let at = |index: usize| {
        row.get(index)
            .ok_or_else(|| PaymentError::InvalidResponse(format!("pclass row has no column {index}")))
    };
    let int = |index: usize| {
        at(index).and_then(|v| v.as_i64().ok_or_else(|| invalid("integer", v)))
    };
    Ok(PClass {
        eid,
        id: int(0)?,
        description: text(at(1)?)?,
        months: int(2)?,
        start_fee: minor_units(at(3)?)?,
        invoice_fee: minor_units(at(4)?)?,
        interest_rate: minor_units(at(5)?)?,
        min_amount: minor_units(at(6)?)?,
        country: country(at(7)?)?,
        kind: PClassKind::from_code(int(8)?),
        expire: at(9).ok().and_then(parse_expire),
    })
}

pub(crate) fn pclasses(value: &Value, eid: u32) -> Result<Vec<PClass>, PaymentError> {
    value
        .as_array()
        .ok_or_else(|| invalid("array", value))?
        .iter()
        .map(|row| {
            row.as_array()
                .ok_or_else(|| invalid("pclass row", row))
                .and_then(|row| pclass(row, eid))
        })
        .collect()
}
