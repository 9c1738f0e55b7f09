//! Constrained key/value maps for the optional info blocks of an order.
//!
//! Each category accepts only its documented keys, so a typo can never
//! reach the remote service as an unknown member.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::str::FromStr;

use super::error::PaymentError;
use super::value::Value;

/// A documented key of one info category.
pub trait InfoKey: Copy + Ord + Debug + 'static {
    /// Category name used in error messages.
    const CATEGORY: &'static str;
    /// Every key of the category.
    const ALL: &'static [Self];

    /// Wire name of the key.
    fn as_str(self) -> &'static str;

    fn parse(key: &str) -> Result<Self, PaymentError> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| PaymentError::UnknownInfoKey {
                category: Self::CATEGORY,
                key: key.to_string(),
            })
    }
}

macro_rules! info_keys {
    ($(#[$meta:meta])* $name:ident, $category:literal { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl InfoKey for $name {
            const CATEGORY: &'static str = $category;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = PaymentError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as InfoKey>::parse(s)
            }
        }
    };
}

info_keys! {
    /// Shipment info keys.
    ShipmentInfoKey, "shipment info" {
        DelayAdjust => "delay_adjust",
        ShippingCompany => "shipping_company",
        ShippingProduct => "shipping_product",
        TrackingNo => "tracking_no",
        WarehouseAddr => "warehouse_addr",
    }
}

info_keys! {
    /// Extra info keys.
    ExtraInfoKey, "extra info" {
        CustNo => "cust_no",
        EstoreUser => "estore_user",
        MaxUnitPrice => "maxunitprice",
        EstoreNo => "estore_no",
        ReadyDate => "ready_date",
        RandString => "rand_string",
        Bclass => "bclass",
        Pin => "pin",
    }
}

info_keys! {
    /// Bank info keys.
    BankInfoKey, "bank info" {
        BankAccBic => "bank_acc_bic",
        BankAccNo => "bank_acc_no",
        BankAccPin => "bank_acc_pin",
        BankAccTan => "bank_acc_tan",
        BankName => "bank_name",
        BankCity => "bank_city",
        Iban => "iban",
        Bic => "bic",
    }
}

info_keys! {
    /// Income info keys.
    IncomeInfoKey, "income info" {
        YearlySalary => "yearly_salary",
        NoPeopleInHousehold => "no_people_in_household",
        NoChildrenBelow18 => "no_children_below_18",
        NetMonthlyHouseholdIncome => "net_monthly_household_income",
        MonthlyCostAccommodation => "monthly_cost_accommodation",
        MonthlyCostOtherLoans => "monthly_cost_other_loans",
    }
}

info_keys! {
    /// Travel info keys.
    TravelInfoKey, "travel info" {
        TravelCompany => "travel_company",
        ResellerCompany => "reseller_company",
        DepartureDate => "departure_date",
        ReturnDate => "return_date",
        Destinations => "destinations",
        PassengerList => "passenger_list",
        PassportNo => "passport_no",
        DriverLicenseNo => "driver_license_no",
    }
}

info_keys! {
    /// Activate info keys. Declaration order is the digest order.
    ActivateInfoKey, "activate info" {
        Bclass => "bclass",
        CustNo => "cust_no",
        Flags => "flags",
        Ocr => "ocr",
        OrderId1 => "orderid1",
        OrderId2 => "orderid2",
        Reference => "reference",
        ReferenceCode => "reference_code",
    }
}

/// Scalar values keyed by one info category.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoMap<K: InfoKey> {
    entries: BTreeMap<K, Value>,
}

impl<K: InfoKey> Default for InfoMap<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: InfoKey> InfoMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: K, value: impl Into<Value>) {
        self.entries.insert(key, value.into());
    }

    pub fn get(&self, key: K) -> Option<&Value> {
        self.entries.get(&key)
    }

    pub fn contains(&self, key: K) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn remove(&mut self, key: K) -> Option<Value> {
        self.entries.remove(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in key declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &Value)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// The struct sent in parameter lists.
    pub fn transmit_form(&self) -> Value {
        Value::Struct(
            self.entries
                .iter()
                .map(|(k, v)| (k.as_str().to_string(), v.clone()))
                .collect(),
        )
    }
}
