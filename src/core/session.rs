//! Per-order mutable state: goods, addresses, references and info maps.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::error::PaymentError;
use super::flags::AddressKind;
use super::info::*;
use super::types::{Address, ArticleRef, GoodsEntry, GoodsLine};
use super::value::Value;

/// Everything collected for the order currently being built.
///
/// Setters validate their input; a rejected value leaves the state as it
/// was. Credentials, locale and transport live on the [`Client`](super::Client),
/// so [`clear`](SessionState::clear) never touches them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    goods: Vec<GoodsEntry>,
    art_nos: Vec<ArticleRef>,
    billing: Option<Address>,
    shipping: Option<Address>,
    comment: String,
    reference: String,
    reference_code: String,
    order_ids: [String; 2],
    shipment_info: InfoMap<ShipmentInfoKey>,
    extra_info: InfoMap<ExtraInfoKey>,
    bank_info: InfoMap<BankInfoKey>,
    income_info: InfoMap<IncomeInfoKey>,
    travel_info: InfoMap<TravelInfoKey>,
    activate_info: InfoMap<ActivateInfoKey>,
    session_ids: BTreeMap<String, String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `qty` units of `goods` to the goods list.
    pub fn add_article(&mut self, qty: i64, goods: GoodsLine) -> Result<(), PaymentError> {
        if qty < 0 {
            return Err(PaymentError::invalid_type("Quantity", "non-negative integer"));
        }
        if goods.art_no.is_empty() && goods.title.is_empty() {
            return Err(PaymentError::ArgumentNotSet("Title and ArtNo".into()));
        }
        self.goods.push(GoodsEntry { goods, qty });
        Ok(())
    }

    /// Add an article reference for the partial operations.
    pub fn add_art_no(&mut self, qty: i64, art_no: impl Into<String>) -> Result<(), PaymentError> {
        let art_no = art_no.into();
        if art_no.is_empty() {
            return Err(PaymentError::ArgumentNotSet("artNo".into()));
        }
        if qty < 0 {
            return Err(PaymentError::invalid_type("Quantity", "non-negative integer"));
        }
        self.art_nos.push(ArticleRef { art_no, qty });
        Ok(())
    }

    pub fn set_address(&mut self, kind: AddressKind, address: Address) {
        tracing::debug!(?kind, "address set");
        match kind {
            AddressKind::Billing => self.billing = Some(address),
            AddressKind::Shipping => self.shipping = Some(address),
        }
    }

    /// Merchant order ids, plus the store user when non-empty.
    pub fn set_estore_info(
        &mut self,
        orderid1: impl Into<String>,
        orderid2: impl Into<String>,
        user: impl Into<String>,
    ) {
        let user = user.into();
        if !user.is_empty() {
            self.extra_info.set(ExtraInfoKey::EstoreUser, user);
        }
        self.order_ids = [orderid1.into(), orderid2.into()];
    }

    pub fn set_reference(&mut self, reference: impl Into<String>, code: impl Into<String>) {
        self.reference = reference.into();
        self.reference_code = code.into();
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Append a line to the comment.
    pub fn add_comment(&mut self, line: &str) {
        self.comment.push('\n');
        self.comment.push_str(line);
    }

    pub fn set_shipment_info(&mut self, key: ShipmentInfoKey, value: impl Into<Value>) {
        self.shipment_info.set(key, value);
    }

    pub fn set_extra_info(&mut self, key: ExtraInfoKey, value: impl Into<Value>) {
        self.extra_info.set(key, value);
    }

    pub fn set_bank_info(&mut self, key: BankInfoKey, value: impl Into<Value>) {
        self.bank_info.set(key, value);
    }

    pub fn set_income_info(&mut self, key: IncomeInfoKey, value: impl Into<Value>) {
        self.income_info.set(key, value);
    }

    pub fn set_travel_info(&mut self, key: TravelInfoKey, value: impl Into<Value>) {
        self.travel_info.set(key, value);
    }

    pub fn set_activate_info(&mut self, key: ActivateInfoKey, value: impl Into<Value>) {
        self.activate_info.set(key, value);
    }

    /// Register a device/session identifier. Neither part may be empty.
    pub fn set_session_id(&mut self, name: impl Into<String>, sid: impl Into<String>) -> Result<(), PaymentError> {
        let name = name.into();
        let sid = sid.into();
        if name.is_empty() {
            return Err(PaymentError::ArgumentNotSet("name".into()));
        }
        if sid.is_empty() {
            return Err(PaymentError::ArgumentNotSet("sid".into()));
        }
        self.session_ids.insert(name, sid);
        Ok(())
    }

    /// Reset all order data. Session ids survive.
    pub fn clear(&mut self) {
        let session_ids = std::mem::take(&mut self.session_ids);
        *self = Self {
            session_ids,
            ..Self::default()
        };
    }

    /// Sum of all line amounts in minor units.
    ///
    /// Fails with [`PaymentError::InvalidType`] when the total overflows.
    pub fn summarize_goods_list(&self) -> Result<Decimal, PaymentError> {
        self.goods.iter().try_fold(Decimal::ZERO, |total, e| {
            e.goods
                .line_amount(e.qty)
                .and_then(|amount| total.checked_add(amount))
                .ok_or_else(|| PaymentError::invalid_type("goods_list", "total within range"))
        })
    }

    pub(crate) fn reset_art_nos(&mut self) {
        self.art_nos.clear();
    }

    pub fn goods_list(&self) -> &[GoodsEntry] {
        &self.goods
    }

    pub fn art_nos(&self) -> &[ArticleRef] {
        &self.art_nos
    }

    pub fn billing(&self) -> Option<&Address> {
        self.billing.as_ref()
    }

    pub fn shipping(&self) -> Option<&Address> {
        self.shipping.as_ref()
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn reference_code(&self) -> &str {
        &self.reference_code
    }

    pub fn order_ids(&self) -> &[String; 2] {
        &self.order_ids
    }

    pub fn shipment_info(&self) -> &InfoMap<ShipmentInfoKey> {
        &self.shipment_info
    }

    pub fn extra_info(&self) -> &InfoMap<ExtraInfoKey> {
        &self.extra_info
    }

    pub fn bank_info(&self) -> &InfoMap<BankInfoKey> {
        &self.bank_info
    }

    pub fn income_info(&self) -> &InfoMap<IncomeInfoKey> {
        &self.income_info
    }

    pub fn travel_info(&self) -> &InfoMap<TravelInfoKey> {
        &self.travel_info
    }

    pub fn activate_info(&self) -> &InfoMap<ActivateInfoKey> {
        &self.activate_info
    }

    pub fn session_ids(&self) -> &BTreeMap<String, String> {
        &self.session_ids
    }

    pub(crate) fn goods_transmit_form(&self) -> Value {
        Value::Array(self.goods.iter().map(GoodsEntry::transmit_form).collect())
    }

    pub(crate) fn art_nos_transmit_form(&self) -> Value {
        Value::Array(self.art_nos.iter().map(ArticleRef::transmit_form).collect())
    }

    pub(crate) fn session_ids_transmit_form(&self) -> Value {
        Value::Struct(
            self.session_ids
                .iter()
                .map(|(k, v)| (k.clone(), Value::from(v)))
                .collect(),
        )
    }
}
