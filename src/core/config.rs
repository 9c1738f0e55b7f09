//! Client configuration and merchant credentials.

use serde::{Deserialize, Serialize};

use super::digest::{DigestEngine, HashAlgorithm};
use super::error::PaymentError;
use super::locale::{Currency, Language, PartialLocale, resolve_locale};

/// Which service environment to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Production.
    #[default]
    Live,
    /// Test drive environment.
    Beta,
}

impl Mode {
    pub fn host(self) -> &'static str {
        match self {
            Self::Live => "payment.klarna.com",
            Self::Beta => "payment.testdrive.klarna.com",
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    10
}

/// Everything a [`Client`](super::Client) needs besides its transport.
///
/// Can be deserialized from any serde source:
///
/// ```
/// use betalning::core::*;
///
/// let config: ClientConfig = serde_json::from_str(
///     r#"{ "eid": 1234, "secret": "s3cret", "country": "de", "mode": "beta" }"#,
/// ).unwrap();
/// assert_eq!(config.endpoint(), "https://payment.testdrive.klarna.com:443/");
/// assert!(!format!("{config:?}").contains("s3cret"));
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Merchant id.
    pub eid: u32,
    /// Shared secret.
    pub secret: String,
    /// Country code or id.
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_true")]
    pub ssl: bool,
    /// Overrides the endpoint derived from `mode` and `ssl`.
    #[serde(default)]
    pub url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Log full parameter lists at debug level.
    #[serde(default)]
    pub debug: bool,
    /// Honour `X-Forwarded-For` when deriving the client IP.
    #[serde(default)]
    pub trust_forwarded_for: bool,
    /// Restricts the hash algorithms used for digests.
    #[serde(default)]
    pub hash_algorithms: Option<Vec<HashAlgorithm>>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("eid", &self.eid)
            .field("secret", &"[REDACTED]")
            .field("country", &self.country)
            .field("language", &self.language)
            .field("currency", &self.currency)
            .field("mode", &self.mode)
            .field("ssl", &self.ssl)
            .field("url", &self.url)
            .field("timeout_secs", &self.timeout_secs)
            .field("debug", &self.debug)
            .field("trust_forwarded_for", &self.trust_forwarded_for)
            .field("hash_algorithms", &self.hash_algorithms)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(eid: u32, secret: impl Into<String>) -> Self {
        Self {
            eid,
            secret: secret.into(),
            country: None,
            language: None,
            currency: None,
            mode: Mode::default(),
            ssl: true,
            url: None,
            timeout_secs: default_timeout(),
            debug: false,
            trust_forwarded_for: false,
            hash_algorithms: None,
        }
    }

    /// Set the locale codes. Missing language and currency are derived
    /// from the country when the client is built.
    pub fn locale(mut self, country: &str, language: Option<&str>, currency: Option<&str>) -> Self {
        self.country = Some(country.to_string());
        self.language = language.map(str::to_string);
        self.currency = currency.map(str::to_string);
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn ssl(mut self, ssl: bool) -> Self {
        self.ssl = ssl;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    pub fn hash_algorithms(mut self, algorithms: impl IntoIterator<Item = HashAlgorithm>) -> Self {
        self.hash_algorithms = Some(algorithms.into_iter().collect());
        self
    }

    /// Validated credentials.
    pub fn credentials(&self) -> Result<Credentials, PaymentError> {
        Credentials::new(self.eid, self.secret.clone())
    }

    /// Validate credentials and resolve the configured locale.
    pub fn validate(&self) -> Result<(), PaymentError> {
        self.credentials()?;
        self.partial_locale()?;
        Ok(())
    }

    /// Locale as configured. With a country, missing language and
    /// currency are filled from the country defaults.
    pub fn partial_locale(&self) -> Result<PartialLocale, PaymentError> {
        match self.country.as_deref() {
            Some(country) => Ok(resolve_locale(
                &PartialLocale::default(),
                Some(country),
                self.language.as_deref(),
                self.currency.as_deref(),
            )?
            .into()),
            None => Ok(PartialLocale {
                country: None,
                language: self
                    .language
                    .as_deref()
                    .map(str::parse::<Language>)
                    .transpose()?,
                currency: self
                    .currency
                    .as_deref()
                    .map(str::parse::<Currency>)
                    .transpose()?,
            }),
        }
    }

    /// Digest engine honouring `hash_algorithms`.
    pub fn digest_engine(&self) -> DigestEngine {
        match &self.hash_algorithms {
            Some(algorithms) => DigestEngine::new(algorithms.iter().copied()),
            None => DigestEngine::default(),
        }
    }

    /// Service URL.
    pub fn endpoint(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        let (scheme, port) = if self.ssl { ("https", 443) } else { ("http", 80) };
        format!("{scheme}://{}:{port}/", self.mode.host())
    }
}

/// Merchant id and shared secret. The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    eid: u32,
    secret: String,
}

impl Credentials {
    pub fn new(eid: u32, secret: impl Into<String>) -> Result<Self, PaymentError> {
        let secret = secret.into();
        if eid == 0 {
            return Err(PaymentError::IncompleteConfiguration(
                "merchant id must be positive".into(),
            ));
        }
        if secret.is_empty() {
            return Err(PaymentError::IncompleteConfiguration(
                "shared secret is empty".into(),
            ));
        }
        Ok(Self { eid, secret })
    }

    pub fn eid(&self) -> u32 {
        self.eid
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("eid", &self.eid)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
