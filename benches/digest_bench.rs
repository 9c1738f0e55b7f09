use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use betalning::core::*;

fn order_client(lines: usize) -> Client<RecordingTransport> {
    let config = ClientConfig::new(1234, "shared-secret").locale("se", None, None);
    let mut client = Client::with_config(config, RecordingTransport::new()).unwrap();
    for i in 1..=lines {
        client
            .session_mut()
            .add_article(
                2,
                GoodsLineBuilder::new(format!("ART-{i}"), format!("Item {i}"), 9900, dec!(25)).build(),
            )
            .unwrap();
    }
    client.session_mut().set_address(
        AddressKind::Billing,
        AddressBuilder::person("Testperson", "Approved", "Stårgatan 1", "12345", "Ankeborg")
            .country(Country::Se)
            .build(),
    );
    client
}

fn bench_digest_algorithms(c: &mut Criterion) {
    let canonical = canonical_string(
        JoinStrategy::FilteredColon,
        &["4:1", CLIENT_VERSION, "1234", "4103219202", "9900"],
        "shared-secret",
    );
    for algorithm in HashAlgorithm::PREFERENCE {
        let engine = DigestEngine::new([algorithm]);
        c.bench_function(&format!("digest_{algorithm}"), |b| {
            b.iter(|| black_box(engine.digest(black_box(&canonical))));
        });
    }
}

fn bench_canonical_strings(c: &mut Criterion) {
    let fragments: Vec<String> = (0..100)
        .map(|i| if i % 3 == 0 { String::new() } else { format!("frag-{i}") })
        .collect();
    c.bench_function("filtered_colon_join_100", |b| {
        b.iter(|| black_box(canonical_string(JoinStrategy::FilteredColon, black_box(&fragments), "s")));
    });
    c.bench_function("raw_concat_100", |b| {
        b.iter(|| black_box(canonical_string(JoinStrategy::RawConcat, black_box(&fragments), "s")));
    });
}

fn bench_add_invoice(c: &mut Criterion) {
    for lines in [1, 100] {
        c.bench_function(&format!("add_invoice_{lines}_lines"), |b| {
            b.iter_batched(
                || {
                    let client = order_client(lines);
                    client.transport().push_response(Value::Array(vec![
                        Value::from("INV-1"),
                        Value::from(1),
                    ]));
                    client
                },
                |mut client| {
                    black_box(client.add_invoice(
                        "4103219202",
                        None,
                        TransactionOptions::default(),
                    ))
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
}

#[cfg(feature = "xmlrpc")]
fn bench_xmlrpc_codec(c: &mut Criterion) {
    use betalning::xmlrpc::{decode_response, encode_call};

    let client = order_client(100);
    let mut params = vec![Value::from(PROTO_VERSION), Value::from(CLIENT_VERSION)];
    params.extend(
        client
            .session()
            .goods_list()
            .iter()
            .map(GoodsEntry::transmit_form),
    );
    c.bench_function("xmlrpc_encode_100_goods", |b| {
        b.iter(|| black_box(encode_call("add_invoice", black_box(&params))));
    });

    let body = encode_call("m", &[Value::Array(params.clone())])
        .unwrap()
        .replace("<methodCall><methodName>m</methodName>", "<methodResponse>")
        .replace("</methodCall>", "</methodResponse>");
    c.bench_function("xmlrpc_decode_100_goods", |b| {
        b.iter(|| black_box(decode_response(black_box(&body))));
    });
}

#[cfg(not(feature = "xmlrpc"))]
fn bench_xmlrpc_codec(_c: &mut Criterion) {}

criterion_group!(
    benches,
    bench_digest_algorithms,
    bench_canonical_strings,
    bench_add_invoice,
    bench_xmlrpc_codec,
);
criterion_main!(benches);
