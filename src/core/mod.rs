//! Request canonicalization, signing and the remote operations.
//!
//! The digest engine and operation table decide which fields of a call
//! are signed and in which order; the client assembles parameter lists
//! around them and hands them to an [`RpcTransport`].

mod builder;
mod client;
mod config;
mod digest;
mod encoding;
mod error;
mod flags;
mod info;
mod locale;
mod operations;
mod recipes;
mod results;
mod session;
mod transport;
mod types;
mod value;

pub use builder::*;
pub use client::Client;
pub use config::{ClientConfig, Credentials, Mode};
pub use digest::{
    DigestEngine, HashAlgorithm, JoinStrategy, canonical_string, filtered_colon_join, raw_concat,
};
pub use encoding::{PnoEncoding, check_pno, check_pno_for, encoding_for};
pub use error::*;
pub use flags::*;
pub use info::*;
pub use locale::*;
pub use operations::TransactionOptions;
pub use recipes::{CLIENT_VERSION, DigestContext, Operation, PROTO_VERSION, Recipe, proto_fragment};
pub use results::{EXPIRY_FORMAT, PartActivation};
pub use session::SessionState;
pub use transport::{RecordedCall, RecordingTransport, RpcTransport};
pub use types::*;
pub use value::Value;
