#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Decode → encode → decode must not panic at any step.
        if let Ok(value) = betalning::xmlrpc::decode_response(s) {
            if let Ok(call) = betalning::xmlrpc::encode_call("m", std::slice::from_ref(&value)) {
                let response = call
                    .replace("<methodCall><methodName>m</methodName>", "<methodResponse>")
                    .replace("</methodCall>", "</methodResponse>");
                let _ = betalning::xmlrpc::decode_response(&response);
            }
        }
    }
});
