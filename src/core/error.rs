use thiserror::Error;

/// Errors raised while assembling, signing or executing a remote call.
///
/// Every validation failure is raised before the transport is touched.
/// [`PaymentError::RemoteFault`] and [`PaymentError::Transport`] are the only
/// kinds produced after a network round trip.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PaymentError {
    /// A required argument or session field is missing or empty.
    #[error("argument not set: {0}")]
    ArgumentNotSet(String),

    /// A value has the wrong type or is outside its allowed domain.
    #[error("invalid type for {field}: expected {expected}")]
    InvalidType {
        /// Name of the offending argument.
        field: String,
        /// Human-readable description of what was expected.
        expected: String,
    },

    /// The locale is missing or incomplete.
    #[error("locale is not set or incomplete")]
    InvalidLocale,

    /// Neither a billing nor a shipping address is set.
    #[error("no address set, at least one address is required")]
    MissingAddress,

    /// The goods list is empty but the operation requires it.
    #[error("goods list is empty")]
    MissingGoodslist,

    /// Shipping country differs from the configured country.
    #[error("shipping country does not match the configured country")]
    ShippingCountryMismatch,

    /// Unknown country code or id.
    #[error("unknown country: {0}")]
    UnknownCountry(String),

    /// Unknown language code or id.
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    /// Unknown currency code or id.
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    /// The operation is not offered in the configured market.
    #[error("this method is only available for customers from: {0}")]
    UnsupportedMarket(String),

    /// The personal number failed format validation. The value is not kept.
    #[error("invalid personal number")]
    InvalidPno,

    /// Credentials are missing or invalid.
    #[error("incomplete configuration: {0}")]
    IncompleteConfiguration(String),

    /// A negative or otherwise unusable amount.
    #[error("invalid price: {0}")]
    InvalidPrice(i64),

    /// A partial operation was invoked without article references.
    #[error("article number list is empty")]
    EmptyArticleList,

    /// An info map key outside the documented key set.
    #[error("unknown {category} key: {key}")]
    UnknownInfoKey {
        /// Info map category (e.g. "shipment info").
        category: &'static str,
        /// The rejected key.
        key: String,
    },

    /// None of the preferred hash algorithms is available.
    #[error("no available hash algorithm supported")]
    NoHashAlgorithmAvailable,

    /// The remote service answered with a fault.
    #[error("remote fault {code}: {message}")]
    RemoteFault {
        /// Fault code reported by the service.
        code: i32,
        /// Fault message reported by the service.
        message: String,
    },

    /// The response could not be mapped to the expected shape.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    /// The transport failed before a response was received (I/O, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// XML encoding or decoding error.
    #[error("XML error: {0}")]
    Xml(String),
}

impl PaymentError {
    pub(crate) fn invalid_type(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidType {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// True when the error originates from the remote side of the call.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteFault { .. } | Self::Transport(_))
    }
}
