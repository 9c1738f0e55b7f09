//! XML-RPC wire format and HTTP transport.
//!
//! [`encode_call`] renders a `methodCall` document, [`decode_response`]
//! turns a `methodResponse` into a [`Value`](crate::core::Value) or a
//! [`PaymentError::RemoteFault`](crate::core::PaymentError::RemoteFault).
//! With the `http` feature, [`HttpTransport`] posts the documents to the
//! service endpoint.

mod codec;
#[cfg(feature = "http")]
mod http;
mod xml_utils;

pub use codec::{decode_response, encode_call};
#[cfg(feature = "http")]
pub use http::HttpTransport;
