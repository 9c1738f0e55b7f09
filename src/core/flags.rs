//! Protocol flag constants and the small enums built on them.

use serde::{Deserialize, Serialize};

/// No flag set.
pub const NO_FLAG: u32 = 0;

// Goods line flags.
pub const PRINT_1000: u32 = 1;
pub const PRINT_100: u32 = 2;
pub const PRINT_10: u32 = 4;
/// The line is a shipment fee.
pub const IS_SHIPMENT: u32 = 8;
/// The line is a handling fee.
pub const IS_HANDLING: u32 = 16;
/// The line price includes VAT.
pub const INC_VAT: u32 = 32;

// Invoice flags.
pub const AUTO_ACTIVATE: u32 = 1;
pub const TEST_MODE: u32 = 2;
/// Pre-paid order; the personal number is not checked.
pub const PRE_PAY: u32 = 8;
pub const SENSITIVE_ORDER: u32 = 1024;
pub const RETURN_OCR: u32 = 8192;

// Reservation flags.
pub const RSRV_SEND_BY_MAIL: u32 = 4;
pub const RSRV_SEND_BY_EMAIL: u32 = 8;
pub const RSRV_PRESERVE_RESERVATION: u32 = 16;
/// Telephone order; no addresses are transmitted.
pub const RSRV_PHONE_TRANSACTION: u32 = 512;
pub const RSRV_SENSITIVE_ORDER: u32 = 1024;

// Shipment speed, the `delay_adjust` shipment info value.
pub const NORMAL_SHIPMENT: i64 = 1;
pub const EXPRESS_SHIPMENT: i64 = 2;

/// PClass id meaning "plain invoice, no payment plan".
pub const INVOICE_PCLASS: i64 = -1;

/// Customer gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn id(self) -> i64 {
        match self {
            Self::Female => 0,
            Self::Male => 1,
        }
    }

    /// Parse the single-letter form (`"m"` / `"f"`).
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "m" | "M" => Some(Self::Male),
            "f" | "F" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Which of the two session addresses to set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    Billing,
    Shipping,
}

/// Which names `get_addresses` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressLookup {
    /// All names, person or company.
    All,
    /// Last name only.
    Last,
    /// Given names (person) or company name.
    Given,
}

impl AddressLookup {
    pub fn id(self) -> i64 {
        match self {
            Self::All => 1,
            Self::Last => 2,
            Self::Given => 5,
        }
    }
}

/// Order status returned by invoice and reservation calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Accepted,
    Pending,
    Denied,
}

impl OrderStatus {
    pub fn id(self) -> i64 {
        match self {
            Self::Accepted => 1,
            Self::Pending => 2,
            Self::Denied => 3,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Self::Accepted),
            2 => Some(Self::Pending),
            3 => Some(Self::Denied),
            _ => None,
        }
    }
}

/// How `change_reservation` applies the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservationChange {
    /// Replace the reserved amount.
    #[default]
    NewAmount,
    /// Add to the reserved amount.
    AddAmount,
}

impl ReservationChange {
    pub fn id(self) -> i64 {
        match self {
            Self::NewAmount => 0,
            Self::AddAmount => 1,
        }
    }
}

/// Charge kind for `update_charge_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeType {
    Shipment,
    Handling,
}

impl ChargeType {
    /// The normalized value sent to the service.
    pub fn id(self) -> i64 {
        match self {
            Self::Shipment => 1,
            Self::Handling => 2,
        }
    }

    /// Map a goods flag ([`IS_SHIPMENT`] / [`IS_HANDLING`]) to a charge type.
    pub fn from_flag(flag: u32) -> Option<Self> {
        match flag {
            IS_SHIPMENT => Some(Self::Shipment),
            IS_HANDLING => Some(Self::Handling),
            _ => None,
        }
    }
}

/// What the id passed to `check_order_status` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderLookup {
    /// Invoice or reservation number.
    #[default]
    InvoiceNumber,
    /// Merchant order id.
    OrderId,
}

impl OrderLookup {
    pub fn id(self) -> i64 {
        match self {
            Self::InvoiceNumber => 0,
            Self::OrderId => 1,
        }
    }
}
