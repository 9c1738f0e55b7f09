//! Remote operations.
//!
//! Each operation validates its input and the session state, builds the
//! digest through the operation table, assembles the ordered parameter
//! list and maps the response. Nothing is sent when validation fails, and
//! the session is only modified after a successful call.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::client::Client;
use super::encoding::{PnoEncoding, require_pno};
use super::error::PaymentError;
use super::flags::*;
use super::info::{ActivateInfoKey, InfoMap, ShipmentInfoKey};
use super::locale::{Country, Locale, resolve_locale};
use super::recipes::{DigestContext, Operation};
use super::results::{self, PartActivation};
use super::transport::RpcTransport;
use super::types::{Address, PClass};
use super::value::Value;

/// Options shared by the order-creating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionOptions {
    /// Invoice or reservation flags.
    pub flags: u32,
    /// Payment plan id, [`INVOICE_PCLASS`] for a plain invoice.
    pub pclass: i64,
    /// PNO encoding; derived from the configured country when `None`.
    pub encoding: Option<PnoEncoding>,
    /// Clear the session after a successful call.
    pub clear: bool,
}

impl Default for TransactionOptions {
    fn default() -> Self {
        Self {
            flags: NO_FLAG,
            pclass: INVOICE_PCLASS,
            encoding: None,
            clear: true,
        }
    }
}

impl TransactionOptions {
    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    pub fn pclass(mut self, pclass: i64) -> Self {
        self.pclass = pclass;
        self
    }

    pub fn encoding(mut self, encoding: PnoEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn keep_session(mut self) -> Self {
        self.clear = false;
        self
    }
}

fn require(value: &str, name: &str) -> Result<(), PaymentError> {
    if value.is_empty() {
        return Err(PaymentError::ArgumentNotSet(name.to_string()));
    }
    Ok(())
}

fn gender_value(gender: Option<Gender>) -> Value {
    gender
        .map(|g| Value::Int(g.id()))
        .unwrap_or_else(|| Value::from(""))
}

fn eid_value(eid: u32) -> Value {
    Value::from(eid)
}

impl<T: RpcTransport> Client<T> {
    fn require_goods(&self) -> Result<(), PaymentError> {
        if self.session().goods_list().is_empty() {
            return Err(PaymentError::MissingGoodslist);
        }
        Ok(())
    }

    fn require_art_nos(&self) -> Result<(), PaymentError> {
        if self.session().art_nos().is_empty() {
            return Err(PaymentError::EmptyArticleList);
        }
        Ok(())
    }

    /// Transmission forms of (billing, shipping). A single address set
    /// stands in for both. The shipping country must match the locale.
    fn order_addresses(&self, locale: &Locale, skip: bool) -> Result<(Value, Value), PaymentError> {
        if skip {
            return Ok((Value::from(""), Value::from("")));
        }
        let session = self.session();
        let (billing, shipping) = match (session.billing(), session.shipping()) {
            (Some(billing), Some(shipping)) => (billing, shipping),
            (Some(billing), None) => (billing, billing),
            (None, Some(shipping)) => (shipping, shipping),
            (None, None) => return Err(PaymentError::MissingAddress),
        };
        if shipping.country.is_some_and(|c| c != locale.country) {
            return Err(PaymentError::ShippingCountryMismatch);
        }
        Ok((billing.transmit_form(), shipping.transmit_form()))
    }

    /// Shipment info with `delay_adjust` defaulted to normal shipment.
    fn shipment_info_for_order(&self) -> InfoMap<ShipmentInfoKey> {
        let mut info = self.session().shipment_info().clone();
        if !info.contains(ShipmentInfoKey::DelayAdjust) {
            info.set(ShipmentInfoKey::DelayAdjust, NORMAL_SHIPMENT);
        }
        info
    }

    fn finish(&mut self, clear: bool) {
        if clear {
            self.session_mut().clear();
        }
    }

    /// Look up the registered addresses of a Swedish customer.
    pub fn get_addresses(
        &self,
        pno: &str,
        encoding: Option<PnoEncoding>,
        lookup: AddressLookup,
    ) -> Result<Vec<Address>, PaymentError> {
        let eid = self.credentials()?.eid();
        if self.locale().country != Some(Country::Se) {
            return Err(PaymentError::UnsupportedMarket(Country::Se.name().to_string()));
        }
        let encoding = self.encoding_or_default(encoding)?;
        require_pno(pno)?;

        let digest = self.sign(
            Operation::GetAddresses,
            &DigestContext {
                eid,
                pno,
                ..Default::default()
            },
        )?;
        let params = vec![
            Value::from(pno),
            eid_value(eid),
            Value::from(digest),
            Value::Int(encoding.id()),
            Value::Int(lookup.id()),
            Value::from(self.client_ip()),
        ];
        let result = self.call(Operation::GetAddresses, params)?;
        results::addresses(&result, lookup)
    }

    /// Create an invoice for the current goods list.
    ///
    /// Returns the invoice number and its status.
    pub fn add_invoice(
        &mut self,
        pno: &str,
        gender: Option<Gender>,
        opts: TransactionOptions,
    ) -> Result<(String, OrderStatus), PaymentError> {
        let eid = self.credentials()?.eid();
        let locale = self.complete_locale()?;
        let encoding = self.encoding_or_default(opts.encoding)?;
        if opts.flags & PRE_PAY == 0 {
            require_pno(pno)?;
        }
        self.require_goods()?;
        let (billing, shipping) = self.order_addresses(&locale, false)?;
        let ship_info = self.shipment_info_for_order();

        let session = self.session();
        let digest = self.sign(
            Operation::AddInvoice,
            &DigestContext {
                goods: session.goods_list(),
                ..Default::default()
            },
        )?;
        let [orderid1, orderid2] = session.order_ids();
        let params = vec![
            Value::from(pno),
            gender_value(gender),
            Value::from(session.reference()),
            Value::from(session.reference_code()),
            Value::from(orderid1),
            Value::from(orderid2),
            shipping,
            billing,
            Value::from(self.client_ip()),
            Value::from(opts.flags),
            Value::Int(locale.currency.id()),
            Value::Int(locale.country.id()),
            Value::Int(locale.language.id()),
            eid_value(eid),
            Value::from(digest),
            Value::Int(encoding.id()),
            Value::Int(opts.pclass),
            session.goods_transmit_form(),
            Value::from(session.comment()),
            ship_info.transmit_form(),
            session.travel_info().transmit_form(),
            session.income_info().transmit_form(),
            session.bank_info().transmit_form(),
            session.session_ids_transmit_form(),
            session.extra_info().transmit_form(),
        ];
        let result = self.call(Operation::AddInvoice, params)?;
        let outcome = results::number_and_status(&result)?;
        self.finish(opts.clear);
        Ok(outcome)
    }

    /// Activate a passive invoice. Returns the URL of the invoice PDF.
    pub fn activate_invoice(&mut self, invno: &str, pclass: i64, clear: bool) -> Result<String, PaymentError> {
        let eid = self.credentials()?.eid();
        require(invno, "Invoice number")?;

        let digest = self.sign(
            Operation::ActivateInvoice,
            &DigestContext {
                eid,
                invno,
                ..Default::default()
            },
        )?;
        let params = vec![
            eid_value(eid),
            Value::from(invno),
            Value::from(digest),
            Value::Int(pclass),
            self.session().shipment_info().transmit_form(),
        ];
        let result = self.call(Operation::ActivateInvoice, params)?;
        let url = results::text(&result)?;
        self.finish(clear);
        Ok(url)
    }

    pub fn delete_invoice(&self, invno: &str) -> Result<bool, PaymentError> {
        let result = self.invoice_call(Operation::DeleteInvoice, invno)?;
        Ok(results::is_ok(&result))
    }

    /// Reserve an amount for the current goods list.
    ///
    /// With `amount` of `None` the reserved amount is the goods list total.
    pub fn reserve_amount(
        &mut self,
        pno: &str,
        gender: Option<Gender>,
        amount: Option<i64>,
        opts: TransactionOptions,
    ) -> Result<(String, OrderStatus), PaymentError> {
        let eid = self.credentials()?.eid();
        let locale = self.complete_locale()?;
        let encoding = self.encoding_or_default(opts.encoding)?;
        require_pno(pno)?;
        self.require_goods()?;

        let amount = match amount {
            Some(amount) => amount,
            None => self
                .session()
                .summarize_goods_list()?
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
                .ok_or_else(|| PaymentError::invalid_type("amount", "integer"))?,
        };
        if amount < 0 {
            return Err(PaymentError::InvalidPrice(amount));
        }

        let phone = opts.flags & RSRV_PHONE_TRANSACTION != 0;
        let (billing, shipping) = self.order_addresses(&locale, phone)?;
        let ship_info = self.shipment_info_for_order();

        let digest = self.sign(
            Operation::ReserveAmount,
            &DigestContext {
                eid,
                pno,
                amount,
                ..Default::default()
            },
        )?;
        let session = self.session();
        let [orderid1, orderid2] = session.order_ids();
        let params = vec![
            Value::from(pno),
            gender_value(gender),
            Value::Int(amount),
            Value::from(session.reference()),
            Value::from(session.reference_code()),
            Value::from(orderid1),
            Value::from(orderid2),
            shipping,
            billing,
            Value::from(self.client_ip()),
            Value::from(opts.flags),
            Value::Int(locale.currency.id()),
            Value::Int(locale.country.id()),
            Value::Int(locale.language.id()),
            eid_value(eid),
            Value::from(digest),
            Value::Int(encoding.id()),
            Value::Int(opts.pclass),
            session.goods_transmit_form(),
            Value::from(session.comment()),
            ship_info.transmit_form(),
            session.travel_info().transmit_form(),
            session.income_info().transmit_form(),
            session.bank_info().transmit_form(),
            session.session_ids_transmit_form(),
            session.extra_info().transmit_form(),
        ];
        let result = self.call(Operation::ReserveAmount, params)?;
        let outcome = results::number_and_status(&result)?;
        self.finish(opts.clear);
        Ok(outcome)
    }

    /// Extend a reservation. Returns the new expiry, in the service's
    /// local time (Europe/Stockholm).
    pub fn extend_expiry_date(&self, rno: &str) -> Result<NaiveDateTime, PaymentError> {
        let result = self.reservation_call(Operation::ExtendExpiryDate, rno)?;
        results::expiry_date(&result)
    }

    pub fn cancel_reservation(&self, rno: &str) -> Result<bool, PaymentError> {
        let result = self.reservation_call(Operation::CancelReservation, rno)?;
        Ok(results::is_ok(&result))
    }

    fn reservation_call(&self, op: Operation, rno: &str) -> Result<Value, PaymentError> {
        let eid = self.credentials()?.eid();
        require(rno, "RNO")?;
        let digest = self.sign(
            op,
            &DigestContext {
                eid,
                rno,
                ..Default::default()
            },
        )?;
        self.call(op, vec![Value::from(rno), eid_value(eid), Value::from(digest)])
    }

    /// Change the reserved amount, replacing or adding to it.
    pub fn change_reservation(
        &self,
        rno: &str,
        amount: i64,
        change: ReservationChange,
    ) -> Result<bool, PaymentError> {
        let eid = self.credentials()?.eid();
        require(rno, "RNO")?;

        let digest = self.sign(
            Operation::ChangeReservation,
            &DigestContext {
                eid,
                rno,
                amount,
                ..Default::default()
            },
        )?;
        let params = vec![
            Value::from(rno),
            Value::Int(amount),
            eid_value(eid),
            Value::from(digest),
            Value::Int(change.id()),
        ];
        let result = self.call(Operation::ChangeReservation, params)?;
        Ok(results::is_ok(&result))
    }

    /// Replace goods, addresses and order ids of a reservation with the
    /// session's.
    ///
    /// With `clear` set the session is reset after a successful call. Pass
    /// `false` to keep the goods list and addresses for a follow-up call.
    pub fn update(&mut self, rno: &str, clear: bool) -> Result<bool, PaymentError> {
        let eid = self.credentials()?.eid();
        require(rno, "RNO")?;

        let session = self.session();
        let [orderid1, orderid2] = session.order_ids();
        let digest = self.sign(
            Operation::Update,
            &DigestContext {
                eid,
                rno,
                shipping: session.shipping(),
                billing: session.billing(),
                goods: session.goods_list(),
                order_ids: [orderid1.as_str(), orderid2.as_str()],
                ..Default::default()
            },
        )?;

        let address_form = |address: Option<&Address>| {
            address
                .map(Address::transmit_form)
                .unwrap_or_else(Value::empty_struct)
        };
        let mut changes = std::collections::BTreeMap::new();
        changes.insert("goods_list".to_string(), session.goods_transmit_form());
        changes.insert("dlv_addr".to_string(), address_form(session.shipping()));
        changes.insert("bill_addr".to_string(), address_form(session.billing()));
        changes.insert("orderid1".to_string(), Value::from(orderid1));
        changes.insert("orderid2".to_string(), Value::from(orderid2));

        let params = vec![
            eid_value(eid),
            Value::from(digest),
            Value::from(rno),
            Value::Struct(changes),
        ];
        let result = self.call(Operation::Update, params)?;
        let updated = results::is_ok(&result);
        self.finish(clear);
        Ok(updated)
    }

    /// Activate a reservation, fully or for the article references added
    /// with [`add_art_no`](super::SessionState::add_art_no).
    ///
    /// `ocr` and `flags` override the matching activate info entries.
    /// Returns the risk status and the invoice number.
    pub fn activate(
        &mut self,
        rno: &str,
        ocr: Option<&str>,
        flags: Option<u32>,
        clear: bool,
    ) -> Result<(String, String), PaymentError> {
        let eid = self.credentials()?.eid();
        require(rno, "RNO")?;

        let session = self.session();
        let mut info = session.activate_info().clone();
        if let Some(ocr) = ocr {
            info.set(ActivateInfoKey::Ocr, ocr);
        }
        if let Some(flags) = flags {
            info.set(ActivateInfoKey::Flags, flags);
        }
        if info
            .get(ActivateInfoKey::Flags)
            .is_some_and(|f| f.as_i64() == Some(i64::from(NO_FLAG)))
        {
            info.remove(ActivateInfoKey::Flags);
        }
        let ship_info = self.shipment_info_for_order();

        let digest = self.sign(
            Operation::Activate,
            &DigestContext {
                eid,
                rno,
                activate_info: Some(&info),
                delay_adjust: ship_info.get(ShipmentInfoKey::DelayAdjust),
                art_nos: session.art_nos(),
                ..Default::default()
            },
        )?;

        let mut activate_info = info.transmit_form();
        if let Value::Struct(members) = &mut activate_info {
            members.insert("shipment_info".to_string(), ship_info.transmit_form());
            if !session.art_nos().is_empty() {
                members.insert("artnos".to_string(), session.art_nos_transmit_form());
            }
        }
        let params = vec![
            eid_value(eid),
            Value::from(digest),
            Value::from(rno),
            activate_info,
        ];
        let result = self.call(Operation::Activate, params)?;
        let outcome = results::text_pair(&result)?;
        self.finish(clear);
        Ok(outcome)
    }

    /// Activate a reservation with an explicit goods list.
    ///
    /// Returns the risk status and the invoice number.
    pub fn activate_reservation(
        &mut self,
        pno: &str,
        rno: &str,
        gender: Option<Gender>,
        ocr: &str,
        opts: TransactionOptions,
    ) -> Result<(String, String), PaymentError> {
        let eid = self.credentials()?.eid();
        let locale = self.complete_locale()?;
        let encoding = self.encoding_or_default(opts.encoding)?;
        require_pno(pno)?;
        require(rno, "RNO")?;
        self.require_goods()?;

        let phone = opts.flags & RSRV_PHONE_TRANSACTION != 0;
        let (billing, shipping) = self.order_addresses(&locale, phone)?;
        let ship_info = self.shipment_info_for_order();

        let session = self.session();
        let digest = self.sign(
            Operation::ActivateReservation,
            &DigestContext {
                eid,
                pno,
                goods: session.goods_list(),
                ..Default::default()
            },
        )?;
        let [orderid1, orderid2] = session.order_ids();
        let params = vec![
            Value::from(rno),
            Value::from(ocr),
            Value::from(pno),
            gender_value(gender),
            Value::from(session.reference()),
            Value::from(session.reference_code()),
            Value::from(orderid1),
            Value::from(orderid2),
            shipping,
            billing,
            Value::from("0.0.0.0"),
            Value::from(opts.flags),
            Value::Int(locale.currency.id()),
            Value::Int(locale.country.id()),
            Value::Int(locale.language.id()),
            eid_value(eid),
            Value::from(digest),
            Value::Int(encoding.id()),
            Value::Int(opts.pclass),
            session.goods_transmit_form(),
            Value::from(session.comment()),
            ship_info.transmit_form(),
            session.travel_info().transmit_form(),
            session.income_info().transmit_form(),
            session.bank_info().transmit_form(),
            session.extra_info().transmit_form(),
        ];
        let result = self.call(Operation::ActivateReservation, params)?;
        let outcome = results::text_pair(&result)?;
        self.finish(opts.clear);
        Ok(outcome)
    }

    /// Split `amount` off a reservation. Returns the new reservation number.
    pub fn split_reservation(&self, rno: &str, amount: i64, flags: u32) -> Result<String, PaymentError> {
        let eid = self.credentials()?.eid();
        require(rno, "RNO")?;
        if amount <= 0 {
            return Err(PaymentError::InvalidPrice(amount));
        }

        let digest = self.sign(
            Operation::SplitReservation,
            &DigestContext {
                eid,
                rno,
                amount,
                ..Default::default()
            },
        )?;
        let [orderid1, orderid2] = self.session().order_ids();
        let params = vec![
            Value::from(rno),
            Value::Int(amount),
            Value::from(orderid1),
            Value::from(orderid2),
            Value::from(flags),
            eid_value(eid),
            Value::from(digest),
        ];
        let result = self.call(Operation::SplitReservation, params)?;
        results::text(&result)
    }

    /// Reserve `count` OCR numbers for `country`, or the configured country.
    pub fn reserve_ocr_nums(&self, count: i64, country: Option<Country>) -> Result<Vec<String>, PaymentError> {
        let eid = self.credentials()?.eid();
        if count <= 0 {
            return Err(PaymentError::invalid_type("no", "integer > 0"));
        }
        let country = country
            .or(self.locale().country)
            .ok_or(PaymentError::InvalidLocale)?;

        let digest = self.sign(
            Operation::ReserveOcrNums,
            &DigestContext {
                eid,
                count,
                ..Default::default()
            },
        )?;
        let params = vec![
            Value::Int(count),
            eid_value(eid),
            Value::from(digest),
            Value::Int(country.id()),
        ];
        let result = self.call(Operation::ReserveOcrNums, params)?;
        results::text_list(&result)
    }

    /// Whether the customer has a part payment account.
    pub fn has_account(&self, pno: &str, encoding: Option<PnoEncoding>) -> Result<bool, PaymentError> {
        let eid = self.credentials()?.eid();
        let encoding = self.encoding_or_default(encoding)?;
        require_pno(pno)?;

        let digest = self.sign(
            Operation::HasAccount,
            &DigestContext {
                eid,
                pno,
                ..Default::default()
            },
        )?;
        let params = vec![
            eid_value(eid),
            Value::from(pno),
            Value::from(digest),
            Value::Int(encoding.id()),
        ];
        let result = self.call(Operation::HasAccount, params)?;
        Ok(result.as_str() == Some("true"))
    }

    /// Partially activate an invoice for the session's article references.
    pub fn activate_part(&mut self, invno: &str, pclass: i64, clear: bool) -> Result<PartActivation, PaymentError> {
        let eid = self.credentials()?.eid();
        require(invno, "Invoice number")?;
        self.require_art_nos()?;

        let session = self.session();
        let digest = self.sign(
            Operation::ActivatePart,
            &DigestContext {
                eid,
                invno,
                art_nos: session.art_nos(),
                ..Default::default()
            },
        )?;
        let params = vec![
            eid_value(eid),
            Value::from(invno),
            session.art_nos_transmit_form(),
            Value::from(digest),
            Value::Int(pclass),
            session.shipment_info().transmit_form(),
        ];
        let result = self.call(Operation::ActivatePart, params)?;
        let outcome = results::part_activation(&result)?;
        self.finish(clear);
        Ok(outcome)
    }

    fn invoice_call(&self, op: Operation, invno: &str) -> Result<Value, PaymentError> {
        let eid = self.credentials()?.eid();
        require(invno, "Invoice number")?;
        let digest = self.sign(
            op,
            &DigestContext {
                eid,
                invno,
                ..Default::default()
            },
        )?;
        self.call(op, vec![eid_value(eid), Value::from(invno), Value::from(digest)])
    }

    /// Total amount of an active invoice in major units.
    pub fn invoice_amount(&self, invno: &str) -> Result<Decimal, PaymentError> {
        let result = self.invoice_call(Operation::InvoiceAmount, invno)?;
        results::minor_units(&result)
    }

    /// Change the merchant order id of an invoice.
    pub fn update_order_no(&self, invno: &str, orderid: &str) -> Result<String, PaymentError> {
        let eid = self.credentials()?.eid();
        require(invno, "Invoice number")?;

        let digest = self.sign(
            Operation::UpdateOrderNo,
            &DigestContext {
                invno,
                orderid,
                ..Default::default()
            },
        )?;
        let params = vec![
            eid_value(eid),
            Value::from(digest),
            Value::from(invno),
            Value::from(orderid),
        ];
        let result = self.call(Operation::UpdateOrderNo, params)?;
        results::text(&result)
    }

    pub fn email_invoice(&self, invno: &str) -> Result<String, PaymentError> {
        let result = self.invoice_call(Operation::EmailInvoice, invno)?;
        results::text(&result)
    }

    pub fn send_invoice(&self, invno: &str) -> Result<String, PaymentError> {
        let result = self.invoice_call(Operation::SendInvoice, invno)?;
        results::text(&result)
    }

    /// Give a discount on an invoice.
    pub fn return_amount(
        &self,
        invno: &str,
        amount: i64,
        vat: Decimal,
        flags: u32,
        description: &str,
    ) -> Result<String, PaymentError> {
        let eid = self.credentials()?.eid();
        require(invno, "Invoice number")?;

        let digest = self.sign(
            Operation::ReturnAmount,
            &DigestContext {
                eid,
                invno,
                ..Default::default()
            },
        )?;
        let params = vec![
            eid_value(eid),
            Value::from(invno),
            Value::Int(amount),
            Value::from(vat),
            Value::from(digest),
            Value::from(flags),
            Value::from(description),
        ];
        let result = self.call(Operation::ReturnAmount, params)?;
        results::text(&result)
    }

    pub fn credit_invoice(&self, invno: &str, credno: &str) -> Result<String, PaymentError> {
        let eid = self.credentials()?.eid();
        require(invno, "Invoice number")?;

        let digest = self.sign(
            Operation::CreditInvoice,
            &DigestContext {
                eid,
                invno,
                ..Default::default()
            },
        )?;
        let params = vec![
            eid_value(eid),
            Value::from(invno),
            Value::from(credno),
            Value::from(digest),
        ];
        let result = self.call(Operation::CreditInvoice, params)?;
        results::text(&result)
    }

    /// Credit part of an invoice, by article references or, when the
    /// session has goods, by goods list.
    pub fn credit_part(&mut self, invno: &str, credno: &str) -> Result<String, PaymentError> {
        let eid = self.credentials()?.eid();
        require(invno, "Invoice number")?;
        let session = self.session();
        if session.goods_list().is_empty() {
            self.require_art_nos()?;
        }

        let digest = self.sign(
            Operation::CreditPart,
            &DigestContext {
                eid,
                invno,
                art_nos: session.art_nos(),
                ..Default::default()
            },
        )?;
        let mut params = vec![
            eid_value(eid),
            Value::from(invno),
            session.art_nos_transmit_form(),
            Value::from(credno),
            Value::from(digest),
        ];
        if !session.goods_list().is_empty() {
            params.push(Value::Int(0));
            params.push(session.goods_transmit_form());
        }
        let result = self.call(Operation::CreditPart, params)?;
        let credited = results::text(&result)?;
        self.session_mut().reset_art_nos();
        Ok(credited)
    }

    /// Change the quantity of one article on a passive invoice.
    pub fn update_goods_qty(&self, invno: &str, artno: &str, qty: i64) -> Result<String, PaymentError> {
        let eid = self.credentials()?.eid();
        require(invno, "Invoice number")?;
        require(artno, "artNo")?;
        if qty < 0 {
            return Err(PaymentError::invalid_type("Quantity", "non-negative integer"));
        }

        let digest = self.sign(
            Operation::UpdateGoodsQty,
            &DigestContext {
                invno,
                artno,
                qty,
                ..Default::default()
            },
        )?;
        let params = vec![
            eid_value(eid),
            Value::from(digest),
            Value::from(invno),
            Value::from(artno),
            Value::Int(qty),
        ];
        let result = self.call(Operation::UpdateGoodsQty, params)?;
        results::text(&result)
    }

    /// Change the shipment or handling fee of a passive invoice.
    pub fn update_charge_amount(
        &self,
        invno: &str,
        charge: ChargeType,
        amount: i64,
    ) -> Result<String, PaymentError> {
        let eid = self.credentials()?.eid();
        require(invno, "Invoice number")?;

        let digest = self.sign(
            Operation::UpdateChargeAmount,
            &DigestContext {
                invno,
                charge_type: charge.id(),
                amount,
                ..Default::default()
            },
        )?;
        let params = vec![
            eid_value(eid),
            Value::from(digest),
            Value::from(invno),
            Value::Int(charge.id()),
            Value::Int(amount),
        ];
        let result = self.call(Operation::UpdateChargeAmount, params)?;
        results::text(&result)
    }

    /// Billing address of an invoice.
    pub fn invoice_address(&self, invno: &str) -> Result<Address, PaymentError> {
        let result = self.invoice_call(Operation::InvoiceAddress, invno)?;
        results::invoice_address(&result)
    }

    /// Amount of the session's article references on an invoice, in major units.
    pub fn invoice_part_amount(&mut self, invno: &str) -> Result<Decimal, PaymentError> {
        let eid = self.credentials()?.eid();
        require(invno, "Invoice number")?;
        self.require_art_nos()?;

        let session = self.session();
        let digest = self.sign(
            Operation::InvoicePartAmount,
            &DigestContext {
                eid,
                invno,
                art_nos: session.art_nos(),
                ..Default::default()
            },
        )?;
        let params = vec![
            eid_value(eid),
            Value::from(invno),
            session.art_nos_transmit_form(),
            Value::from(digest),
        ];
        let result = self.call(Operation::InvoicePartAmount, params)?;
        let amount = results::minor_units(&result)?;
        self.session_mut().reset_art_nos();
        Ok(amount)
    }

    pub fn check_order_status(&self, id: &str, lookup: OrderLookup) -> Result<OrderStatus, PaymentError> {
        let eid = self.credentials()?.eid();
        require(id, "id")?;

        let digest = self.sign(
            Operation::CheckOrderStatus,
            &DigestContext {
                eid,
                lookup_id: id,
                ..Default::default()
            },
        )?;
        let params = vec![
            eid_value(eid),
            Value::from(digest),
            Value::from(id),
            Value::Int(lookup.id()),
        ];
        let result = self.call(Operation::CheckOrderStatus, params)?;
        results::order_status(&result)
    }

    pub fn get_customer_no(&self, pno: &str, encoding: Option<PnoEncoding>) -> Result<Vec<String>, PaymentError> {
        let eid = self.credentials()?.eid();
        let encoding = self.encoding_or_default(encoding)?;
        require_pno(pno)?;

        let digest = self.sign(
            Operation::GetCustomerNo,
            &DigestContext {
                eid,
                pno,
                ..Default::default()
            },
        )?;
        let params = vec![
            Value::from(pno),
            eid_value(eid),
            Value::from(digest),
            Value::Int(encoding.id()),
        ];
        let result = self.call(Operation::GetCustomerNo, params)?;
        results::text_list(&result)
    }

    pub fn set_customer_no(
        &self,
        pno: &str,
        custno: &str,
        encoding: Option<PnoEncoding>,
    ) -> Result<bool, PaymentError> {
        let eid = self.credentials()?.eid();
        let encoding = self.encoding_or_default(encoding)?;
        require_pno(pno)?;
        require(custno, "custNo")?;

        let digest = self.sign(
            Operation::SetCustomerNo,
            &DigestContext {
                eid,
                pno,
                custno,
                ..Default::default()
            },
        )?;
        let params = vec![
            Value::from(pno),
            Value::from(custno),
            eid_value(eid),
            Value::from(digest),
            Value::Int(encoding.id()),
        ];
        let result = self.call(Operation::SetCustomerNo, params)?;
        Ok(results::is_ok(&result))
    }

    pub fn remove_customer_no(&self, custno: &str) -> Result<bool, PaymentError> {
        let eid = self.credentials()?.eid();
        require(custno, "custNo")?;

        let digest = self.sign(
            Operation::RemoveCustomerNo,
            &DigestContext {
                eid,
                custno,
                ..Default::default()
            },
        )?;
        let params = vec![Value::from(custno), eid_value(eid), Value::from(digest)];
        let result = self.call(Operation::RemoveCustomerNo, params)?;
        Ok(results::is_ok(&result))
    }

    /// Payment plans offered for a locale; the configured locale fills
    /// anything not given.
    pub fn get_pclasses(
        &self,
        country: Option<&str>,
        language: Option<&str>,
        currency: Option<&str>,
    ) -> Result<Vec<PClass>, PaymentError> {
        let eid = self.credentials()?.eid();
        let locale = resolve_locale(self.locale(), country, language, currency)?;

        let digest = self.sign(
            Operation::GetPClasses,
            &DigestContext {
                eid,
                currency: Some(locale.currency),
                ..Default::default()
            },
        )?;
        let params = vec![
            eid_value(eid),
            Value::Int(locale.currency.id()),
            Value::from(digest),
            Value::Int(locale.country.id()),
            Value::Int(locale.language.id()),
        ];
        let result = self.call(Operation::GetPClasses, params)?;
        results::pclasses(&result, eid)
    }
}
