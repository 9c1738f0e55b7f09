//! Operation table: remote method name, join strategy and digest fragments.
//!
//! Every signed call is described by one [`Recipe`]. Assemblers fill a
//! [`DigestContext`] with the values of the call and the recipe picks the
//! fragments, in wire order, that go into the digest.

use super::digest::JoinStrategy;
use super::info::{ActivateInfoKey, InfoMap};
use super::locale::Currency;
use super::types::{Address, ArticleRef, GoodsEntry};
use super::value::Value;

/// Protocol version sent as the first parameter of every call.
pub const PROTO_VERSION: &str = "4.1";

/// Client identifier sent as the second parameter of every call.
pub const CLIENT_VERSION: &str = concat!("rust:api:", env!("CARGO_PKG_VERSION"));

/// The protocol version as it appears inside digests (`4:1`).
pub fn proto_fragment() -> String {
    PROTO_VERSION.replace('.', ":")
}

/// Remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetAddresses,
    AddInvoice,
    ActivateInvoice,
    DeleteInvoice,
    ReserveAmount,
    ExtendExpiryDate,
    CancelReservation,
    ChangeReservation,
    Update,
    Activate,
    ActivateReservation,
    SplitReservation,
    ReserveOcrNums,
    HasAccount,
    ActivatePart,
    InvoiceAmount,
    UpdateOrderNo,
    EmailInvoice,
    SendInvoice,
    ReturnAmount,
    CreditInvoice,
    CreditPart,
    UpdateGoodsQty,
    UpdateChargeAmount,
    InvoiceAddress,
    InvoicePartAmount,
    CheckOrderStatus,
    GetCustomerNo,
    SetCustomerNo,
    RemoveCustomerNo,
    GetPClasses,
}

impl Operation {
    pub const ALL: [Operation; 31] = [
        Self::GetAddresses,
        Self::AddInvoice,
        Self::ActivateInvoice,
        Self::DeleteInvoice,
        Self::ReserveAmount,
        Self::ExtendExpiryDate,
        Self::CancelReservation,
        Self::ChangeReservation,
        Self::Update,
        Self::Activate,
        Self::ActivateReservation,
        Self::SplitReservation,
        Self::ReserveOcrNums,
        Self::HasAccount,
        Self::ActivatePart,
        Self::InvoiceAmount,
        Self::UpdateOrderNo,
        Self::EmailInvoice,
        Self::SendInvoice,
        Self::ReturnAmount,
        Self::CreditInvoice,
        Self::CreditPart,
        Self::UpdateGoodsQty,
        Self::UpdateChargeAmount,
        Self::InvoiceAddress,
        Self::InvoicePartAmount,
        Self::CheckOrderStatus,
        Self::GetCustomerNo,
        Self::SetCustomerNo,
        Self::RemoveCustomerNo,
        Self::GetPClasses,
    ];

    /// Remote method name.
    pub fn method(self) -> &'static str {
        self.recipe().method
    }

    pub fn strategy(self) -> JoinStrategy {
        self.recipe().strategy
    }

    pub fn recipe(self) -> Recipe {
        use JoinStrategy::{FilteredColon as Colon, RawConcat as Raw};

        let (method, strategy, fragments): (&'static str, JoinStrategy, FragmentFn) = match self {
            Self::GetAddresses => ("get_addresses", Colon, eid_pno),
            Self::AddInvoice => ("add_invoice", Raw, goods_titles),
            Self::ActivateInvoice => ("activate_invoice", Colon, eid_invno),
            Self::DeleteInvoice => ("delete_invoice", Colon, eid_invno),
            Self::ReserveAmount => ("reserve_amount", Raw, eid_pno_amount),
            Self::ExtendExpiryDate => ("extend_expiry_date", Colon, eid_rno),
            Self::CancelReservation => ("cancel_reservation", Colon, eid_rno),
            Self::ChangeReservation => ("change_reservation", Colon, eid_rno_amount),
            Self::Update => ("update", Colon, update),
            Self::Activate => ("activate", Colon, activate),
            Self::ActivateReservation => ("activate_reservation", Raw, eid_pno_goods),
            Self::SplitReservation => ("split_reservation", Colon, eid_rno_amount),
            Self::ReserveOcrNums => ("reserve_ocr_nums", Colon, eid_count),
            Self::HasAccount => ("has_account", Colon, eid_pno),
            Self::ActivatePart => ("activate_part", Raw, eid_invno_art_nos),
            Self::InvoiceAmount => ("invoice_amount", Colon, eid_invno),
            Self::UpdateOrderNo => ("update_orderno", Colon, invno_orderid),
            Self::EmailInvoice => ("email_invoice", Colon, eid_invno),
            Self::SendInvoice => ("send_invoice", Colon, eid_invno),
            Self::ReturnAmount => ("return_amount", Colon, eid_invno),
            Self::CreditInvoice => ("credit_invoice", Colon, eid_invno),
            Self::CreditPart => ("credit_part", Raw, eid_invno_art_nos),
            Self::UpdateGoodsQty => ("update_goods_qty", Colon, invno_artno_qty),
            Self::UpdateChargeAmount => ("update_charge_amount", Colon, invno_charge),
            Self::InvoiceAddress => ("invoice_address", Colon, eid_invno),
            Self::InvoicePartAmount => ("invoice_part_amount", Raw, eid_invno_art_nos),
            Self::CheckOrderStatus => ("check_order_status", Colon, eid_lookup_id),
            Self::GetCustomerNo => ("get_customer_no", Colon, eid_pno),
            Self::SetCustomerNo => ("set_customer_no", Colon, eid_pno_custno),
            Self::RemoveCustomerNo => ("remove_customer_no", Colon, eid_custno),
            Self::GetPClasses => ("get_pclasses", Raw, eid_currency),
        };

        Recipe {
            method,
            strategy,
            fragments,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.method())
    }
}

type FragmentFn = fn(&DigestContext<'_>) -> Vec<String>;

/// How one operation is signed.
#[derive(Clone, Copy)]
pub struct Recipe {
    pub method: &'static str,
    pub strategy: JoinStrategy,
    fragments: FragmentFn,
}

impl Recipe {
    /// Digest fragments for `ctx`, in order, secret not included.
    pub fn fragments(&self, ctx: &DigestContext<'_>) -> Vec<String> {
        (self.fragments)(ctx)
    }
}

impl std::fmt::Debug for Recipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recipe")
            .field("method", &self.method)
            .field("strategy", &self.strategy)
            .finish()
    }
}

/// Values a recipe may draw digest fragments from.
///
/// Assemblers set only the fields their operation uses.
#[derive(Debug, Default, Clone)]
pub struct DigestContext<'a> {
    pub eid: u32,
    pub pno: &'a str,
    pub invno: &'a str,
    pub rno: &'a str,
    pub custno: &'a str,
    pub orderid: &'a str,
    pub artno: &'a str,
    /// Id passed to `check_order_status`.
    pub lookup_id: &'a str,
    pub amount: i64,
    pub qty: i64,
    pub count: i64,
    pub charge_type: i64,
    pub currency: Option<Currency>,
    pub goods: &'a [GoodsEntry],
    pub art_nos: &'a [ArticleRef],
    pub shipping: Option<&'a Address>,
    pub billing: Option<&'a Address>,
    pub order_ids: [&'a str; 2],
    pub activate_info: Option<&'a InfoMap<ActivateInfoKey>>,
    pub delay_adjust: Option<&'a Value>,
}

fn eid_pno(ctx: &DigestContext<'_>) -> Vec<String> {
    vec![ctx.eid.to_string(), ctx.pno.to_string()]
}

fn eid_invno(ctx: &DigestContext<'_>) -> Vec<String> {
    vec![ctx.eid.to_string(), ctx.invno.to_string()]
}

fn eid_rno(ctx: &DigestContext<'_>) -> Vec<String> {
    vec![ctx.eid.to_string(), ctx.rno.to_string()]
}

fn eid_rno_amount(ctx: &DigestContext<'_>) -> Vec<String> {
    vec![ctx.eid.to_string(), ctx.rno.to_string(), ctx.amount.to_string()]
}

fn eid_pno_amount(ctx: &DigestContext<'_>) -> Vec<String> {
    vec![ctx.eid.to_string(), ctx.pno.to_string(), ctx.amount.to_string()]
}

fn eid_count(ctx: &DigestContext<'_>) -> Vec<String> {
    vec![ctx.eid.to_string(), ctx.count.to_string()]
}

fn eid_custno(ctx: &DigestContext<'_>) -> Vec<String> {
    vec![ctx.eid.to_string(), ctx.custno.to_string()]
}

fn eid_pno_custno(ctx: &DigestContext<'_>) -> Vec<String> {
    vec![ctx.eid.to_string(), ctx.pno.to_string(), ctx.custno.to_string()]
}

fn eid_lookup_id(ctx: &DigestContext<'_>) -> Vec<String> {
    vec![ctx.eid.to_string(), ctx.lookup_id.to_string()]
}

fn eid_currency(ctx: &DigestContext<'_>) -> Vec<String> {
    vec![
        ctx.eid.to_string(),
        ctx.currency.map(|c| c.id().to_string()).unwrap_or_default(),
    ]
}

fn invno_orderid(ctx: &DigestContext<'_>) -> Vec<String> {
    vec![ctx.invno.to_string(), ctx.orderid.to_string()]
}

fn invno_artno_qty(ctx: &DigestContext<'_>) -> Vec<String> {
    vec![ctx.invno.to_string(), ctx.artno.to_string(), ctx.qty.to_string()]
}

fn invno_charge(ctx: &DigestContext<'_>) -> Vec<String> {
    vec![
        ctx.invno.to_string(),
        ctx.charge_type.to_string(),
        ctx.amount.to_string(),
    ]
}

fn goods_titles(ctx: &DigestContext<'_>) -> Vec<String> {
    ctx.goods.iter().map(|e| e.goods.title.clone()).collect()
}

fn push_art_nos(out: &mut Vec<String>, art_nos: &[ArticleRef]) {
    for art in art_nos {
        out.push(art.art_no.clone());
        out.push(art.qty.to_string());
    }
}

fn eid_invno_art_nos(ctx: &DigestContext<'_>) -> Vec<String> {
    let mut out = eid_invno(ctx);
    push_art_nos(&mut out, ctx.art_nos);
    out
}

fn eid_pno_goods(ctx: &DigestContext<'_>) -> Vec<String> {
    let mut out = eid_pno(ctx);
    for entry in ctx.goods {
        out.push(entry.goods.art_no.clone());
        out.push(entry.qty.to_string());
    }
    out
}

fn update(ctx: &DigestContext<'_>) -> Vec<String> {
    let mut out = vec![
        proto_fragment(),
        CLIENT_VERSION.to_string(),
        ctx.eid.to_string(),
        ctx.rno.to_string(),
    ];
    for address in [ctx.shipping, ctx.billing].into_iter().flatten() {
        out.extend(address.digest_fields());
    }
    for entry in ctx.goods {
        out.push(entry.identifier().to_string());
        out.push(entry.qty.to_string());
    }
    out.extend(ctx.order_ids.iter().map(|id| id.to_string()));
    out
}

fn activate(ctx: &DigestContext<'_>) -> Vec<String> {
    let mut out = vec![
        proto_fragment(),
        CLIENT_VERSION.to_string(),
        ctx.eid.to_string(),
        ctx.rno.to_string(),
    ];
    if let Some(info) = ctx.activate_info {
        out.extend(info.iter().map(|(_, value)| value.to_text()));
    }
    if let Some(delay) = ctx.delay_adjust {
        out.push(delay.to_text());
    }
    push_art_nos(&mut out, ctx.art_nos);
    out
}
