use betalning::core::*;
use rust_decimal_macros::dec;

const PNO: &str = "4103219202";

fn client() -> Client<RecordingTransport> {
    Client::with_config(
        ClientConfig::new(7, "s").locale("se", None, None),
        RecordingTransport::new(),
    )
    .unwrap()
}

fn billing() -> Address {
    AddressBuilder::person("A", "B", "Main 1", "11122", "City")
        .country(Country::Se)
        .build()
}

fn socks() -> GoodsLine {
    GoodsLineBuilder::new("X1", "Socks", 100, dec!(25)).build()
}

fn order_client() -> Client<RecordingTransport> {
    let mut c = client();
    c.session_mut().add_article(2, socks()).unwrap();
    c.session_mut().set_address(AddressKind::Billing, billing());
    c
}

fn sign(strategy: JoinStrategy, fragments: &[&str]) -> String {
    DigestEngine::default().sign(strategy, fragments, "s").unwrap()
}

/// Parameters of the last call without the version pair.
fn last_params(c: &Client<RecordingTransport>) -> Vec<Value> {
    let call = c.transport().last_call().unwrap();
    assert_eq!(call.params[0], Value::from(PROTO_VERSION));
    assert_eq!(call.params[1], Value::from(CLIENT_VERSION));
    call.params[2..].to_vec()
}

fn accepted(number: &str) -> Value {
    Value::Array(vec![Value::from(number), Value::from(1)])
}

// --- Configuration gates ---

#[test]
fn unconfigured_client_never_calls_transport() {
    let mut c = Client::new(RecordingTransport::new());
    c.session_mut().add_article(1, socks()).unwrap();
    c.session_mut().set_address(AddressKind::Billing, billing());

    let err = c
        .add_invoice(PNO, None, TransactionOptions::default())
        .unwrap_err();
    assert!(matches!(err, PaymentError::IncompleteConfiguration(_)));
    assert!(matches!(
        c.delete_invoice("1"),
        Err(PaymentError::IncompleteConfiguration(_))
    ));
    assert!(matches!(
        c.get_pclasses(Some("se"), None, None),
        Err(PaymentError::IncompleteConfiguration(_))
    ));
    assert_eq!(c.transport().call_count(), 0);
}

#[test]
fn missing_locale_is_reported_before_any_call() {
    let mut c = Client::with_config(ClientConfig::new(7, "s"), RecordingTransport::new()).unwrap();
    c.session_mut().add_article(1, socks()).unwrap();
    c.session_mut().set_address(AddressKind::Billing, billing());

    assert!(matches!(
        c.add_invoice(PNO, None, TransactionOptions::default()),
        Err(PaymentError::InvalidLocale)
    ));
    assert!(matches!(
        c.reserve_amount(PNO, None, None, TransactionOptions::default()),
        Err(PaymentError::InvalidLocale)
    ));
    assert!(matches!(c.has_account(PNO, None), Err(PaymentError::InvalidLocale)));
    assert_eq!(c.transport().call_count(), 0);
}

#[test]
fn validation_failures_make_no_calls() {
    let mut c = client();
    assert!(matches!(
        c.add_invoice(PNO, None, TransactionOptions::default()),
        Err(PaymentError::MissingGoodslist)
    ));

    c.session_mut().add_article(1, socks()).unwrap();
    assert!(matches!(
        c.add_invoice(PNO, None, TransactionOptions::default()),
        Err(PaymentError::MissingAddress)
    ));
    assert!(matches!(
        c.add_invoice("", None, TransactionOptions::default()),
        Err(PaymentError::ArgumentNotSet(_))
    ));
    assert!(matches!(
        c.has_account("41032<19202>", None),
        Err(PaymentError::InvalidPno)
    ));
    assert!(matches!(c.delete_invoice(""), Err(PaymentError::ArgumentNotSet(_))));
    assert!(matches!(
        c.split_reservation("R1", 0, NO_FLAG),
        Err(PaymentError::InvalidPrice(0))
    ));
    assert!(matches!(
        c.update_goods_qty("1", "X1", -1),
        Err(PaymentError::InvalidType { .. })
    ));
    assert!(matches!(
        c.activate_part("1", INVOICE_PCLASS, true),
        Err(PaymentError::EmptyArticleList)
    ));
    assert!(matches!(
        c.reserve_ocr_nums(0, None),
        Err(PaymentError::InvalidType { .. })
    ));
    assert_eq!(c.transport().call_count(), 0);
}

#[test]
fn shipping_country_must_match_locale() {
    let mut c = client();
    c.session_mut().add_article(1, socks()).unwrap();
    c.session_mut().set_address(
        AddressKind::Shipping,
        AddressBuilder::person("A", "B", "Gate 1", "0150", "Oslo")
            .country(Country::No)
            .build(),
    );
    assert!(matches!(
        c.add_invoice(PNO, None, TransactionOptions::default()),
        Err(PaymentError::ShippingCountryMismatch)
    ));
    assert_eq!(c.transport().call_count(), 0);
}

#[test]
fn get_addresses_is_sweden_only() {
    let mut c = client();
    c.set_locale("no", None, None).unwrap();
    assert!(matches!(
        c.get_addresses(PNO, None, AddressLookup::Given),
        Err(PaymentError::UnsupportedMarket(_))
    ));
    assert_eq!(c.transport().call_count(), 0);
}

// --- Invoices ---

#[test]
fn add_invoice_parameter_order() {
    let mut c = order_client();
    c.set_client_ip("192.0.2.1");
    c.transport().push_response(accepted("INV-1"));

    let (invno, status) = c
        .add_invoice(PNO, Some(Gender::Male), TransactionOptions::default())
        .unwrap();
    assert_eq!(invno, "INV-1");
    assert_eq!(status, OrderStatus::Accepted);

    let call = c.transport().last_call().unwrap();
    assert_eq!(call.method, "add_invoice");
    let p = last_params(&c);
    assert_eq!(p.len(), 25);
    assert_eq!(p[0], Value::from(PNO));
    assert_eq!(p[1], Value::Int(1));
    // The single address stands in for both.
    assert_eq!(p[6], billing().transmit_form());
    assert_eq!(p[7], billing().transmit_form());
    assert_eq!(p[8], Value::from("192.0.2.1"));
    assert_eq!(p[9], Value::Int(0));
    assert_eq!(p[10], Value::Int(Currency::Sek.id()));
    assert_eq!(p[11], Value::Int(209));
    assert_eq!(p[12], Value::Int(Language::Sv.id()));
    assert_eq!(p[13], Value::Int(7));
    assert_eq!(p[14], Value::from(sign(JoinStrategy::RawConcat, &["Socks"])));
    assert_eq!(
        p[14],
        Value::from("Qhw/agRvedG4++wUifY+Dm+S4iiwwJbkGowr6LC80cFWSmF5OJ6nlh38QHEwXu/LbIijq39RnLECrEx/aKvVAA==")
    );
    assert_eq!(p[15], Value::Int(encoding_for(Country::Se).id()));
    assert_eq!(p[16], Value::Int(INVOICE_PCLASS));
    assert_eq!(p[17].as_array().map(<[Value]>::len), Some(1));
    assert_eq!(p[19].get("delay_adjust"), Some(&Value::Int(NORMAL_SHIPMENT)));
}

#[test]
fn terminal_operation_clears_order_data() {
    let mut c = order_client();
    c.session_mut().set_estore_info("O1", "O2", "");
    c.session_mut().set_session_id("dev", "abc").unwrap();
    c.transport().push_response(accepted("INV-1"));

    c.add_invoice(PNO, None, TransactionOptions::default()).unwrap();

    let session = c.session();
    assert!(session.goods_list().is_empty());
    assert!(session.billing().is_none());
    assert!(session.shipping().is_none());
    assert_eq!(session.order_ids(), &[String::new(), String::new()]);
    assert_eq!(session.session_ids().get("dev").map(String::as_str), Some("abc"));
    assert_eq!(c.config().map(|cfg| cfg.eid), Some(7));
    assert_eq!(c.locale().country, Some(Country::Se));
}

#[test]
fn keep_session_preserves_order_data() {
    let mut c = order_client();
    c.transport().push_response(accepted("INV-1"));
    c.add_invoice(PNO, None, TransactionOptions::default().keep_session())
        .unwrap();
    assert_eq!(c.session().goods_list().len(), 1);
}

#[test]
fn fault_leaves_session_untouched() {
    let mut c = order_client();
    c.transport().push_fault(2101, "denied");
    let err = c
        .add_invoice(PNO, None, TransactionOptions::default())
        .unwrap_err();
    assert!(matches!(err, PaymentError::RemoteFault { code: 2101, .. }));
    assert!(err.is_remote());
    assert_eq!(c.session().goods_list().len(), 1);
    assert!(c.session().billing().is_some());
}

#[test]
fn pre_pay_skips_pno_check() {
    let mut c = order_client();
    c.transport().push_response(accepted("INV-2"));
    let opts = TransactionOptions::default().flags(PRE_PAY);
    assert_eq!(c.add_invoice("", None, opts).unwrap().0, "INV-2");
    assert_eq!(last_params(&c)[1], Value::from(""));
}

#[test]
fn invoice_calls_share_shape() {
    let c = client();
    c.transport().push_response(Value::from("ok"));
    assert!(c.delete_invoice("INV-9").unwrap());
    let p = last_params(&c);
    assert_eq!(
        p,
        vec![
            Value::Int(7),
            Value::from("INV-9"),
            Value::from("oeGwQWtwLEbOxMCrhTyMiqV/Bit3ia6j/BSiOCWjoC/vTlsWPIYsiJsoAC3UL7CTPjVru30ZO06wQHquKM/I4g=="),
        ]
    );

    c.transport().push_response(Value::Int(12345));
    assert_eq!(c.invoice_amount("INV-9").unwrap(), dec!(123.45));
    assert_eq!(c.transport().last_call().unwrap().method, "invoice_amount");

    c.transport().push_response(Value::from("https://pdf"));
    assert_eq!(c.send_invoice("INV-9").unwrap(), "https://pdf");
}

#[test]
fn activate_invoice_sends_shipment_info() {
    let mut c = client();
    c.session_mut()
        .set_shipment_info(ShipmentInfoKey::TrackingNo, "TRK-1");
    c.transport().push_response(Value::from("https://pdf"));
    assert_eq!(c.activate_invoice("INV-9", 3, true).unwrap(), "https://pdf");
    let p = last_params(&c);
    assert_eq!(p[3], Value::Int(3));
    assert_eq!(p[4].get("tracking_no"), Some(&Value::from("TRK-1")));
    assert!(c.session().shipment_info().is_empty());
}

#[test]
fn return_amount_parameters() {
    let c = client();
    c.transport().push_response(Value::from("INV-9"));
    c.return_amount("INV-9", 500, dec!(25), INC_VAT, "Goodwill").unwrap();
    let p = last_params(&c);
    assert_eq!(p[0], Value::Int(7));
    assert_eq!(p[1], Value::from("INV-9"));
    assert!(p.contains(&Value::Int(500)));
    assert!(p.contains(&Value::from("Goodwill")));
}

#[test]
fn update_goods_qty_digest() {
    let c = client();
    c.transport().push_response(Value::from("INV-9"));
    c.update_goods_qty("INV-9", "X1", 3).unwrap();
    let expected = Value::from(sign(JoinStrategy::FilteredColon, &["INV-9", "X1", "3"]));
    assert!(last_params(&c).contains(&expected));
}

#[test]
fn update_charge_amount_uses_charge_id() {
    let c = client();
    c.transport().push_response(Value::from("INV-9"));
    c.update_charge_amount("INV-9", ChargeType::Handling, 1500)
        .unwrap();
    let expected = Value::from(sign(JoinStrategy::FilteredColon, &["INV-9", "2", "1500"]));
    let p = last_params(&c);
    assert!(p.contains(&expected));
    assert!(p.contains(&Value::Int(ChargeType::Handling.id())));
}

#[test]
fn credit_part_resets_article_references() {
    let mut c = client();
    c.session_mut().add_art_no(1, "X1").unwrap();
    c.transport().push_response(Value::from("CR-1"));
    assert_eq!(c.credit_part("INV-9", "").unwrap(), "CR-1");
    let p = last_params(&c);
    assert_eq!(p.len(), 5);
    assert_eq!(
        p[4],
        Value::from(sign(JoinStrategy::RawConcat, &["7", "INV-9", "X1", "1"]))
    );
    assert!(c.session().art_nos().is_empty());
}

#[test]
fn credit_part_with_goods_appends_list() {
    let mut c = client();
    c.session_mut().add_article(1, socks()).unwrap();
    c.transport().push_response(Value::from("CR-2"));
    c.credit_part("INV-9", "C-1").unwrap();
    let p = last_params(&c);
    assert_eq!(p.len(), 7);
    assert_eq!(p[5], Value::Int(0));
    assert_eq!(p[6].as_array().map(<[Value]>::len), Some(1));
}

#[test]
fn activate_part_returns_url_and_number() {
    let mut c = client();
    c.session_mut().add_art_no(2, "X1").unwrap();
    let mut result = std::collections::BTreeMap::new();
    result.insert("url".to_string(), Value::from("https://pdf"));
    result.insert("invno".to_string(), Value::from("INV-10"));
    c.transport().push_response(Value::Struct(result));

    let activation = c.activate_part("INV-9", INVOICE_PCLASS, true).unwrap();
    assert_eq!(activation.url, "https://pdf");
    assert_eq!(activation.invno, "INV-10");
    assert!(c.session().art_nos().is_empty());
}

#[test]
fn activate_part_signs_article_references_raw() {
    let mut c = client();
    c.session_mut().add_art_no(2, "X1").unwrap();
    c.session_mut()
        .set_shipment_info(ShipmentInfoKey::DelayAdjust, Value::Int(NORMAL_SHIPMENT));
    let mut result = std::collections::BTreeMap::new();
    result.insert("url".to_string(), Value::from("https://pdf"));
    result.insert("invno".to_string(), Value::from("INV-10"));
    c.transport().push_response(Value::Struct(result));

    c.activate_part("INV-9", INVOICE_PCLASS, false).unwrap();
    let call = c.transport().last_call().unwrap();
    assert_eq!(call.method, "activate_part");
    let p = last_params(&c);
    assert_eq!(p.len(), 6);
    assert_eq!(p[0], Value::Int(7));
    assert_eq!(p[1], Value::from("INV-9"));
    assert_eq!(
        p[2],
        Value::Array(vec![ArticleRef {
            art_no: "X1".into(),
            qty: 2,
        }
        .transmit_form()])
    );
    assert_eq!(
        p[3],
        Value::from("VbGWHE/09whhyxmhNkEJaIvtq04bFPccA7ii4iL8Rk//IxNHo2VVPa94g20rNj3/jjEKAzAhn0bP5FDv9nfl5g==")
    );
    assert_eq!(p[3], Value::from(sign(JoinStrategy::RawConcat, &["7", "INV-9", "X1", "2"])));
    assert_eq!(p[4], Value::Int(INVOICE_PCLASS));
    assert!(p[5].get("delay_adjust").is_some());
}

#[test]
fn invoice_part_amount_signs_and_resets_article_references() {
    let mut c = client();
    c.session_mut().add_art_no(1, "X1").unwrap();
    c.session_mut().add_art_no(3, "A2").unwrap();
    c.transport().push_response(Value::Int(4990));

    assert_eq!(c.invoice_part_amount("INV-9").unwrap(), dec!(49.90));
    assert_eq!(c.transport().last_call().unwrap().method, "invoice_part_amount");
    let p = last_params(&c);
    assert_eq!(p.len(), 4);
    assert_eq!(p[0], Value::Int(7));
    assert_eq!(p[1], Value::from("INV-9"));
    assert_eq!(p[2].as_array().map(<[Value]>::len), Some(2));
    assert_eq!(
        p[3],
        Value::from("/dnDkZsQNo498IFhu2ZOa068zilrjkd+RgN0D5JyIXPscgHu3V1KpPiEc35vsOsloBtKvZ9raqJmp4K8BLDU3g==")
    );
    assert!(c.session().art_nos().is_empty());
}

#[test]
fn invoice_part_amount_fault_keeps_article_references() {
    let mut c = client();
    c.session_mut().add_art_no(1, "X1").unwrap();
    c.transport().push_fault(2101, "no such invoice");

    assert!(matches!(
        c.invoice_part_amount("INV-9"),
        Err(PaymentError::RemoteFault { code: 2101, .. })
    ));
    assert_eq!(c.session().art_nos().len(), 1);
    assert_eq!(c.session().art_nos()[0].art_no, "X1");

    let before = c.transport().call_count();
    c.session_mut().clear();
    assert!(matches!(
        c.invoice_part_amount("INV-9"),
        Err(PaymentError::EmptyArticleList)
    ));
    assert_eq!(c.transport().call_count(), before);
}

#[test]
fn update_order_no_signs_without_eid() {
    let c = client();
    c.transport().push_response(Value::from("INV-9"));

    assert_eq!(c.update_order_no("INV-9", "O-77").unwrap(), "INV-9");
    assert_eq!(c.transport().last_call().unwrap().method, "update_orderno");
    let p = last_params(&c);
    assert_eq!(
        p,
        vec![
            Value::Int(7),
            Value::from("aHfHG/UWAn6Qpz1IEfAk+Zvlm2dRsH/8e/Ehoh4wa286UuR8mig2BhreyIW6z6zUQ2p//+8Kqfc6Cx9mEs65HQ=="),
            Value::from("INV-9"),
            Value::from("O-77"),
        ]
    );
    assert_eq!(p[1], Value::from(sign(JoinStrategy::FilteredColon, &["INV-9", "O-77"])));
}

#[test]
fn email_invoice_uses_invoice_shape() {
    let c = client();
    c.transport().push_response(Value::from("INV-9"));

    assert_eq!(c.email_invoice("INV-9").unwrap(), "INV-9");
    assert_eq!(c.transport().last_call().unwrap().method, "email_invoice");
    assert_eq!(
        last_params(&c),
        vec![
            Value::Int(7),
            Value::from("INV-9"),
            Value::from("oeGwQWtwLEbOxMCrhTyMiqV/Bit3ia6j/BSiOCWjoC/vTlsWPIYsiJsoAC3UL7CTPjVru30ZO06wQHquKM/I4g=="),
        ]
    );
}

#[test]
fn credit_invoice_places_credit_number_before_digest() {
    let c = client();
    c.transport().push_response(Value::from("INV-9"));

    assert_eq!(c.credit_invoice("INV-9", "CR-5").unwrap(), "INV-9");
    assert_eq!(c.transport().last_call().unwrap().method, "credit_invoice");
    assert_eq!(
        last_params(&c),
        vec![
            Value::Int(7),
            Value::from("INV-9"),
            Value::from("CR-5"),
            Value::from("oeGwQWtwLEbOxMCrhTyMiqV/Bit3ia6j/BSiOCWjoC/vTlsWPIYsiJsoAC3UL7CTPjVru30ZO06wQHquKM/I4g=="),
        ]
    );
}

#[test]
fn reserve_amount_overflowing_total_is_an_error() {
    let mut c = order_client();
    c.session_mut()
        .add_article(
            1_000_000_000_000,
            GoodsLineBuilder::new("X", "T", i64::MAX, dec!(25)).build(),
        )
        .unwrap();

    assert!(matches!(
        c.reserve_amount(PNO, None, None, TransactionOptions::default()),
        Err(PaymentError::InvalidType { .. })
    ));
    assert_eq!(c.transport().call_count(), 0);
    assert_eq!(c.session().goods_list().len(), 2);
}

#[test]
fn invoice_address_parses_row() {
    let c = client();
    c.transport().push_response(Value::Array(vec![
        Value::from("Anna"),
        Value::from("Andersson"),
        Value::from("Gatan 1"),
        Value::from("11122"),
        Value::from("Stockholm"),
        Value::Int(209),
    ]));
    let address = c.invoice_address("INV-9").unwrap();
    assert_eq!(address.city, "Stockholm");
    assert_eq!(address.country, Some(Country::Se));
}

// --- Reservations ---

#[test]
fn reserve_amount_defaults_to_goods_total() {
    let mut c = order_client();
    c.transport().push_response(accepted("R-1"));
    let (rno, _) = c
        .reserve_amount(PNO, None, None, TransactionOptions::default())
        .unwrap();
    assert_eq!(rno, "R-1");
    let p = last_params(&c);
    assert_eq!(c.transport().last_call().unwrap().method, "reserve_amount");
    assert_eq!(p[2], Value::Int(200));
    assert_eq!(
        p[15],
        Value::from(sign(JoinStrategy::RawConcat, &["7", PNO, "200"]))
    );
}

#[test]
fn reserve_amount_rejects_negative() {
    let mut c = order_client();
    assert!(matches!(
        c.reserve_amount(PNO, None, Some(-5), TransactionOptions::default()),
        Err(PaymentError::InvalidPrice(-5))
    ));
    assert_eq!(c.transport().call_count(), 0);
}

#[test]
fn phone_transactions_skip_addresses() {
    let mut c = client();
    c.session_mut().add_article(1, socks()).unwrap();
    c.transport().push_response(accepted("R-2"));
    let opts = TransactionOptions::default().flags(RSRV_PHONE_TRANSACTION);
    c.reserve_amount(PNO, None, Some(100), opts).unwrap();
    let p = last_params(&c);
    assert_eq!(p[7], Value::from(""));
    assert_eq!(p[8], Value::from(""));
}

#[test]
fn reservation_lifecycle_calls() {
    let c = client();
    c.transport().push_response(Value::from("20261231T235959"));
    let expiry = c.extend_expiry_date("R-1").unwrap();
    assert_eq!(expiry.format(EXPIRY_FORMAT).to_string(), "20261231T235959");

    c.transport().push_response(Value::from("ok"));
    assert!(c.cancel_reservation("R-1").unwrap());

    c.transport().push_response(Value::from("ok"));
    assert!(c
        .change_reservation("R-1", 5000, ReservationChange::AddAmount)
        .unwrap());
    let expected = Value::from(sign(JoinStrategy::FilteredColon, &["7", "R-1", "5000"]));
    assert!(last_params(&c).contains(&expected));

    c.transport().push_response(Value::from("R-2"));
    assert_eq!(c.split_reservation("R-1", 100, NO_FLAG).unwrap(), "R-2");
    assert_eq!(last_params(&c)[0], Value::from("R-1"));
}

#[test]
fn update_signs_addresses_goods_and_order_ids() {
    let mut c = client();
    c.session_mut().set_address(AddressKind::Billing, billing());
    c.session_mut().add_article(2, socks()).unwrap();
    c.session_mut().set_estore_info("O1", "", "");
    c.transport().push_response(Value::from("ok"));

    assert!(c.update("123", true).unwrap());
    let p = last_params(&c);
    let expected = sign(
        JoinStrategy::FilteredColon,
        &[
            "4:1", CLIENT_VERSION, "7", "123", "Main 1", "11122", "City", "209", "A", "B", "X1", "2", "O1",
        ],
    );
    assert_eq!(p[1], Value::from(expected));
    if CLIENT_VERSION == "rust:api:0.1.0" {
        assert_eq!(
            p[1],
            Value::from("TME0hC40jI3rsbfOTBB0E2hSwiwrYntl+48R9cLkuKdjLIM8uloTE/NXtnFxR1Dca97k55+CigEOrHYITGYIqQ==")
        );
    }
    assert_eq!(p[2], Value::from("123"));
    assert_eq!(p[3].get("dlv_addr"), Some(&Value::empty_struct()));
    assert_eq!(p[3].get("orderid1"), Some(&Value::from("O1")));
    assert!(c.session().goods_list().is_empty());
}

#[test]
fn update_without_clear_keeps_the_session() {
    let mut c = client();
    c.session_mut().set_address(AddressKind::Billing, billing());
    c.session_mut().add_article(2, socks()).unwrap();
    c.transport().push_response(Value::from("ok"));

    assert!(c.update("123", false).unwrap());
    assert_eq!(c.session().goods_list().len(), 1);
    assert!(c.session().billing().is_some());
}

#[test]
fn activate_folds_flags_and_articles_into_info() {
    let mut c = client();
    c.session_mut().add_art_no(3, "A").unwrap();
    c.session_mut()
        .set_activate_info(ActivateInfoKey::Reference, "R");
    c.transport().push_response(Value::Array(vec![
        Value::from("ok"),
        Value::from("INV-11"),
    ]));

    let (risk, invno) = c.activate("9", Some("555"), Some(NO_FLAG), true).unwrap();
    assert_eq!(risk, "ok");
    assert_eq!(invno, "INV-11");

    let p = last_params(&c);
    assert_eq!(
        p[1],
        Value::from(sign(
            JoinStrategy::FilteredColon,
            &["4:1", CLIENT_VERSION, "7", "9", "555", "R", "1", "A", "3"],
        ))
    );
    let info = &p[3];
    assert!(info.get("flags").is_none());
    assert_eq!(info.get("ocr"), Some(&Value::from("555")));
    assert_eq!(info.get("artnos").and_then(Value::as_array).map(<[Value]>::len), Some(1));
    assert!(info.get("shipment_info").is_some());
    assert!(c.session().art_nos().is_empty());
}

#[test]
fn activate_reservation_signs_goods() {
    let mut c = order_client();
    c.transport().push_response(Value::Array(vec![
        Value::from("ok"),
        Value::from("INV-12"),
    ]));
    let (_, invno) = c
        .activate_reservation(PNO, "R-1", None, "", TransactionOptions::default())
        .unwrap();
    assert_eq!(invno, "INV-12");
    let p = last_params(&c);
    assert_eq!(p[0], Value::from("R-1"));
    assert_eq!(p[2], Value::from(PNO));
    assert_eq!(
        p[16],
        Value::from(sign(JoinStrategy::RawConcat, &["7", PNO, "X1", "2"]))
    );
}

#[test]
fn reserve_ocr_nums_defaults_to_locale_country() {
    let c = client();
    c.transport()
        .push_response(Value::Array(vec![Value::from("111"), Value::from("222")]));
    assert_eq!(c.reserve_ocr_nums(2, None).unwrap(), vec!["111", "222"]);
    let p = last_params(&c);
    assert_eq!(p[0], Value::Int(2));
    assert_eq!(p[3], Value::Int(209));
}

// --- Lookups ---

#[test]
fn get_addresses_parameters() {
    let c = client();
    c.transport().push_response(Value::Array(vec![Value::Array(vec![
        Value::from("Anna"),
        Value::from("Andersson"),
        Value::from("Gatan 1"),
        Value::from("11122"),
        Value::from("Stockholm"),
        Value::Int(209),
    ])]));
    let addresses = c
        .get_addresses(PNO, None, AddressLookup::Given)
        .unwrap();
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].first_name, "Anna");
    let p = last_params(&c);
    assert_eq!(p[0], Value::from(PNO));
    assert_eq!(p[2], Value::from(sign(JoinStrategy::FilteredColon, &["7", PNO])));
    assert_eq!(p[4], Value::Int(AddressLookup::Given.id()));
}

#[test]
fn check_order_status_maps_status() {
    let c = client();
    c.transport().push_response(Value::Int(2));
    assert_eq!(
        c.check_order_status("O1", OrderLookup::OrderId).unwrap(),
        OrderStatus::Pending
    );
    assert!(last_params(&c).contains(&Value::Int(1)));
}

#[test]
fn customer_number_calls() {
    let c = client();
    c.transport()
        .push_response(Value::Array(vec![Value::from("C-1")]));
    assert_eq!(c.get_customer_no(PNO, None).unwrap(), vec!["C-1"]);

    c.transport().push_response(Value::from("ok"));
    assert!(c.set_customer_no(PNO, "C-1", None).unwrap());
    let expected = Value::from(sign(JoinStrategy::FilteredColon, &["7", PNO, "C-1"]));
    assert!(last_params(&c).contains(&expected));

    c.transport().push_response(Value::from("ok"));
    assert!(c.remove_customer_no("C-1").unwrap());
}

#[test]
fn get_pclasses_parses_rows() {
    let c = client();
    c.transport().push_response(Value::Array(vec![Value::Array(vec![
        Value::Int(1234),
        Value::from("12 months"),
        Value::Int(12),
        Value::Int(2900),
        Value::Int(2900),
        Value::Int(1950),
        Value::Int(100000),
        Value::Int(209),
        Value::Int(1),
        Value::from("2030-01-01 00:00:00"),
    ])]));

    let pclasses = c.get_pclasses(None, None, Some("sek")).unwrap();
    assert_eq!(pclasses.len(), 1);
    let pc = &pclasses[0];
    assert_eq!(pc.eid, 7);
    assert_eq!(pc.id, 1234);
    assert_eq!(pc.months, 12);
    assert_eq!(pc.start_fee, dec!(29));
    assert_eq!(pc.interest_rate, dec!(19.5));
    assert_eq!(pc.country, Some(Country::Se));
    assert!(pc.expire.is_some());

    let p = last_params(&c);
    assert_eq!(p[1], Value::Int(Currency::Sek.id()));
    assert_eq!(p[2], Value::from(sign(JoinStrategy::RawConcat, &["7", "0"])));
}

#[test]
fn hash_algorithms_follow_config() {
    let c = Client::with_config(
        ClientConfig::new(7, "s")
            .locale("se", None, None)
            .hash_algorithms([HashAlgorithm::Md5]),
        RecordingTransport::new(),
    )
    .unwrap();
    c.transport().push_response(Value::from("ok"));
    c.delete_invoice("INV-9").unwrap();
    let expected = DigestEngine::new([HashAlgorithm::Md5])
        .sign(JoinStrategy::FilteredColon, &["7", "INV-9"], "s")
        .unwrap();
    assert_eq!(last_params(&c)[2], Value::from(expected));
}
