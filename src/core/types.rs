use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::flags::INC_VAT;
use super::locale::Country;
use super::value::{Value, struct_of};

/// Postal address of a customer, person or company.
///
/// Empty strings mean "not set". Use [`AddressBuilder`](super::AddressBuilder)
/// to construct one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Company addresses carry `company_name`, person addresses first/last name.
    pub is_company: bool,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    /// c/o line.
    pub care_of: String,
    pub street: String,
    /// House number (DE, NL).
    pub house_number: String,
    /// House extension (NL).
    pub house_extension: String,
    pub zip: String,
    pub city: String,
    pub country: Option<Country>,
    pub email: String,
    pub telno: String,
    pub cellno: String,
}

impl Address {
    /// Digest fields in their fixed order: careof, street, zip, city,
    /// country, fname, lname. Empty fields are left out entirely.
    pub fn digest_fields(&self) -> Vec<String> {
        let country = self.country.map(|c| c.id().to_string()).unwrap_or_default();
        [
            self.care_of.as_str(),
            self.street.as_str(),
            self.zip.as_str(),
            self.city.as_str(),
            country.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
        ]
        .into_iter()
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
    }

    /// The struct sent in parameter lists. Empty fields are kept.
    pub fn transmit_form(&self) -> Value {
        struct_of([
            ("email", Value::from(&self.email)),
            ("telno", Value::from(&self.telno)),
            ("cellno", Value::from(&self.cellno)),
            ("fname", Value::from(&self.first_name)),
            ("lname", Value::from(&self.last_name)),
            ("company", Value::from(&self.company_name)),
            ("careof", Value::from(&self.care_of)),
            ("street", Value::from(&self.street)),
            ("house_number", Value::from(&self.house_number)),
            ("house_extension", Value::from(&self.house_extension)),
            ("zip", Value::from(&self.zip)),
            ("city", Value::from(&self.city)),
            (
                "country",
                self.country.map(|c| Value::Int(c.id())).unwrap_or_else(|| Value::from("")),
            ),
        ])
    }
}

/// One article of the current order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodsLine {
    /// Article number.
    pub art_no: String,
    pub title: String,
    /// Unit price in minor units.
    pub price: i64,
    /// VAT percentage, e.g. 25.
    pub vat: Decimal,
    /// Discount percentage, e.g. 10.
    pub discount: Decimal,
    /// Bitmask of goods flags (`INC_VAT`, `IS_SHIPMENT`, ...).
    pub flags: u32,
}

impl GoodsLine {
    /// Price of `qty` units in minor units, VAT included, discount applied.
    ///
    /// `None` when the amount does not fit a `Decimal`.
    pub fn line_amount(&self, qty: i64) -> Option<Decimal> {
        let hundred = Decimal::ONE_HUNDRED;
        let mut price = Decimal::from(self.price);
        if self.flags & INC_VAT == 0 {
            price = price.checked_mul(Decimal::ONE.checked_add(self.vat.checked_div(hundred)?)?)?;
        }
        if self.discount > Decimal::ZERO {
            price = price.checked_mul(Decimal::ONE.checked_sub(self.discount.checked_div(hundred)?)?)?;
        }
        price.checked_mul(Decimal::from(qty))
    }

    pub fn transmit_form(&self) -> Value {
        struct_of([
            ("artno", Value::from(&self.art_no)),
            ("title", Value::from(&self.title)),
            ("price", Value::Int(self.price)),
            ("vat", Value::from(self.vat)),
            ("discount", Value::from(self.discount)),
            ("flags", Value::from(self.flags)),
        ])
    }
}

/// A goods line together with its ordered quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodsEntry {
    pub goods: GoodsLine,
    pub qty: i64,
}

impl GoodsEntry {
    pub fn transmit_form(&self) -> Value {
        struct_of([
            ("goods", self.goods.transmit_form()),
            ("qty", Value::Int(self.qty)),
        ])
    }

    /// Article number, or the title when no article number is set.
    pub fn identifier(&self) -> &str {
        if self.goods.art_no.is_empty() {
            &self.goods.title
        } else {
            &self.goods.art_no
        }
    }
}

/// Article reference used by partial activation, crediting and amount queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    pub art_no: String,
    pub qty: i64,
}

impl ArticleRef {
    pub fn transmit_form(&self) -> Value {
        struct_of([
            ("artno", Value::from(&self.art_no)),
            ("qty", Value::Int(self.qty)),
        ])
    }
}

/// Payment plan kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PClassKind {
    /// 0: Campaign.
    Campaign,
    /// 1: Account.
    Account,
    /// 2: Special campaign.
    Special,
    /// 3: Fixed installments.
    Fixed,
    /// 4: Delayed payment.
    Delay,
    /// 5: Mobile.
    Mobile,
    /// Other kind value.
    Other(i64),
}

impl PClassKind {
    pub fn code(&self) -> i64 {
        match self {
            Self::Campaign => 0,
            Self::Account => 1,
            Self::Special => 2,
            Self::Fixed => 3,
            Self::Delay => 4,
            Self::Mobile => 5,
            Self::Other(c) => *c,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Campaign,
            1 => Self::Account,
            2 => Self::Special,
            3 => Self::Fixed,
            4 => Self::Delay,
            5 => Self::Mobile,
            c => Self::Other(c),
        }
    }
}

/// A payment plan offered by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PClass {
    /// Merchant id the plan was fetched for.
    pub eid: u32,
    pub id: i64,
    pub description: String,
    /// Number of installment months.
    pub months: i64,
    pub start_fee: Decimal,
    pub invoice_fee: Decimal,
    /// Interest rate in percent.
    pub interest_rate: Decimal,
    /// Minimum order amount.
    pub min_amount: Decimal,
    pub country: Option<Country>,
    pub kind: PClassKind,
    /// Expiry, `None` if the plan does not expire.
    pub expire: Option<NaiveDateTime>,
}
