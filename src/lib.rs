//! # betalning
//!
//! Client library for invoice and part-payment services that speak a signed
//! XML-RPC protocol. Every remote call carries a digest computed from an
//! operation-specific, order-sensitive concatenation of its parameters and the
//! merchant's shared secret.
//!
//! Amounts travel in minor units (`i64`); amounts returned by the service are
//! converted to [`rust_decimal::Decimal`] major units.
//!
//! ## Quick Start
//!
//! ```rust
//! use betalning::core::*;
//! use rust_decimal_macros::dec;
//!
//! let transport = RecordingTransport::new();
//! transport.push_response(Value::Array(vec![Value::from("INV-1"), Value::from(1)]));
//!
//! let config = ClientConfig::new(1234, "shared-secret").locale("se", None, None);
//! let mut client = Client::with_config(config, transport).unwrap();
//!
//! client
//!     .session_mut()
//!     .add_article(1, GoodsLineBuilder::new("A-1", "Socks", 9900, dec!(25)).build())
//!     .unwrap();
//! client.session_mut().set_address(
//!     AddressKind::Billing,
//!     AddressBuilder::person("Testperson", "Approved", "Stårgatan 1", "12345", "Ankeborg")
//!         .country(Country::Se)
//!         .build(),
//! );
//!
//! let (invoice_no, status) = client
//!     .add_invoice("4103219202", Some(Gender::Male), TransactionOptions::default())
//!     .unwrap();
//! assert_eq!(invoice_no, "INV-1");
//! assert_eq!(status, OrderStatus::Accepted);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Locale tables, digest engine, session state, operation assemblers |
//! | `xmlrpc` | XML-RPC `methodCall` / `methodResponse` codec |
//! | `http` | Blocking HTTP transport on top of the codec |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xmlrpc")]
pub mod xmlrpc;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
