#![no_main]

use betalning::core::{DigestEngine, JoinStrategy, filtered_colon_join};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let fragments: Vec<&str> = s.split('\u{0}').collect();
        let joined = filtered_colon_join(&fragments);
        assert!(!joined.starts_with(':') || fragments.iter().any(|f| f.starts_with(':')));
        let engine = DigestEngine::default();
        let _ = engine.sign(JoinStrategy::RawConcat, &fragments, "secret");
    }
});
