//! Digest computation: canonical string assembly and hashing.
//!
//! Two canonicalization strategies exist on the wire:
//!
//! - **filtered colon-join**: empty fragments are dropped, the rest joined
//!   with `:`, the shared secret appended as the last fragment;
//! - **raw concatenation**: every fragment is followed by `:` with no
//!   filtering, the shared secret appended at the end.
//!
//! The canonical string is hashed with the most preferred available
//! algorithm and the raw hash bytes are base64 encoded.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use super::error::PaymentError;

/// Hash algorithms the service accepts for request digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha512,
    Sha384,
    Sha256,
    Sha224,
    Md5,
}

impl HashAlgorithm {
    /// Preference order, strongest first.
    pub const PREFERENCE: [HashAlgorithm; 5] = [
        Self::Sha512,
        Self::Sha384,
        Self::Sha256,
        Self::Sha224,
        Self::Md5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha512 => "sha512",
            Self::Sha384 => "sha384",
            Self::Sha256 => "sha256",
            Self::Sha224 => "sha224",
            Self::Md5 => "md5",
        }
    }

    /// Raw hash bytes of `data`.
    pub fn hash(&self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha512 => Sha512::digest(data).to_vec(),
            Self::Sha384 => Sha384::digest(data).to_vec(),
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha224 => Sha224::digest(data).to_vec(),
            Self::Md5 => md5::compute(data).0.to_vec(),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the fragments of an operation are turned into the canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinStrategy {
    /// Empty fragments dropped, `:`-joined, secret appended.
    FilteredColon,
    /// Every fragment followed by `:`, secret appended, no filtering.
    RawConcat,
}

/// `:`-join of the non-empty fragments.
pub fn filtered_colon_join<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        let fragment: &str = fragment.as_ref();
        if fragment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(':');
        }
        out.push_str(fragment);
    }
    out
}

/// Every fragment followed by `:`.
pub fn raw_concat<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        out.push_str(fragment.as_ref());
        out.push(':');
    }
    out
}

/// The string that gets hashed for `fragments` signed with `secret`.
pub fn canonical_string<S: AsRef<str>>(strategy: JoinStrategy, fragments: &[S], secret: &str) -> String {
    match strategy {
        JoinStrategy::FilteredColon => {
            let mut joined = filtered_colon_join(fragments);
            if !secret.is_empty() {
                if !joined.is_empty() {
                    joined.push(':');
                }
                joined.push_str(secret);
            }
            joined
        }
        JoinStrategy::RawConcat => {
            let mut joined = raw_concat(fragments);
            joined.push_str(secret);
            joined
        }
    }
}

/// Hashes canonical strings with the best available algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEngine {
    available: Vec<HashAlgorithm>,
}

impl Default for DigestEngine {
    fn default() -> Self {
        Self {
            available: HashAlgorithm::PREFERENCE.to_vec(),
        }
    }
}

impl DigestEngine {
    /// Engine restricted to `available` algorithms.
    pub fn new(available: impl IntoIterator<Item = HashAlgorithm>) -> Self {
        Self {
            available: available.into_iter().collect(),
        }
    }

    pub fn available(&self) -> &[HashAlgorithm] {
        &self.available
    }

    /// The most preferred algorithm in the available set.
    pub fn select(&self) -> Result<HashAlgorithm, PaymentError> {
        HashAlgorithm::PREFERENCE
            .into_iter()
            .find(|alg| self.available.contains(alg))
            .ok_or(PaymentError::NoHashAlgorithmAvailable)
    }

    /// Base64 of the raw hash of `data`.
    pub fn digest(&self, data: &str) -> Result<String, PaymentError> {
        let algorithm = self.select()?;
        tracing::trace!(%algorithm, "computing digest");
        Ok(STANDARD.encode(algorithm.hash(data.as_bytes())))
    }

    /// Canonicalize `fragments` with `strategy`, append `secret`, hash.
    pub fn sign<S: AsRef<str>>(
        &self,
        strategy: JoinStrategy,
        fragments: &[S],
        secret: &str,
    ) -> Result<String, PaymentError> {
        self.digest(&canonical_string(strategy, fragments, secret))
    }
}
