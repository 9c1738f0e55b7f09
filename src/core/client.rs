//! The signing client: configuration, session state and the call path.

use std::time::Instant;

use super::config::{ClientConfig, Credentials};
use super::digest::DigestEngine;
use super::encoding::{PnoEncoding, encoding_for};
use super::error::PaymentError;
use super::locale::{Locale, PartialLocale, resolve_locale};
use super::recipes::{CLIENT_VERSION, DigestContext, Operation, PROTO_VERSION};
use super::session::SessionState;
use super::transport::RpcTransport;
use super::value::Value;

/// Client for the payment service.
///
/// Holds one order in progress ([`SessionState`]) and signs every remote
/// call with the configured credentials.
pub struct Client<T> {
    config: Option<ClientConfig>,
    credentials: Option<Credentials>,
    locale: PartialLocale,
    engine: DigestEngine,
    session: SessionState,
    client_ip: String,
    transport: T,
}

impl<T: RpcTransport> Client<T> {
    /// An unconfigured client. Every signed operation fails with
    /// [`PaymentError::IncompleteConfiguration`] until
    /// [`configure`](Self::configure) succeeds.
    pub fn new(transport: T) -> Self {
        Self {
            config: None,
            credentials: None,
            locale: PartialLocale::default(),
            engine: DigestEngine::default(),
            session: SessionState::default(),
            client_ip: String::new(),
            transport,
        }
    }

    pub fn with_config(config: ClientConfig, transport: T) -> Result<Self, PaymentError> {
        let mut client = Self::new(transport);
        client.configure(config)?;
        Ok(client)
    }

    /// Apply `config`. On error the previous configuration stays in place.
    pub fn configure(&mut self, config: ClientConfig) -> Result<(), PaymentError> {
        let credentials = config.credentials()?;
        let locale = config.partial_locale()?;
        tracing::debug!(
            eid = credentials.eid(),
            mode = ?config.mode,
            country = ?locale.country,
            "client configured"
        );
        self.engine = config.digest_engine();
        self.credentials = Some(credentials);
        self.locale = locale;
        self.config = Some(config);
        Ok(())
    }

    pub fn config(&self) -> Option<&ClientConfig> {
        self.config.as_ref()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The configured locale, possibly incomplete.
    pub fn locale(&self) -> &PartialLocale {
        &self.locale
    }

    /// Replace the locale. Language and currency default from the country.
    pub fn set_locale(
        &mut self,
        country: &str,
        language: Option<&str>,
        currency: Option<&str>,
    ) -> Result<Locale, PaymentError> {
        let locale = resolve_locale(&self.locale, Some(country), language, currency)?;
        self.locale = locale.into();
        Ok(locale)
    }

    /// PNO encoding of the configured country.
    pub fn pno_encoding(&self) -> Result<PnoEncoding, PaymentError> {
        self.locale
            .country
            .map(encoding_for)
            .ok_or(PaymentError::InvalidLocale)
    }

    pub fn set_client_ip(&mut self, ip: impl Into<String>) {
        self.client_ip = ip.into();
    }

    /// Derive the client IP from the peer address and an optional
    /// `X-Forwarded-For` header. The first forwarded address wins only
    /// when the configuration trusts the header.
    pub fn set_client_addrs(&mut self, remote_addr: &str, forwarded_for: Option<&str>) {
        let trust = self.config.as_ref().is_some_and(|c| c.trust_forwarded_for);
        self.client_ip = match forwarded_for {
            Some(header) if trust => header
                .split(',')
                .next()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            _ => remote_addr.to_string(),
        };
    }

    pub fn client_ip(&self) -> &str {
        &self.client_ip
    }

    pub(crate) fn credentials(&self) -> Result<&Credentials, PaymentError> {
        self.credentials
            .as_ref()
            .ok_or_else(|| PaymentError::IncompleteConfiguration("client is not configured".into()))
    }

    pub(crate) fn complete_locale(&self) -> Result<Locale, PaymentError> {
        self.locale.complete()
    }

    pub(crate) fn encoding_or_default(
        &self,
        encoding: Option<PnoEncoding>,
    ) -> Result<PnoEncoding, PaymentError> {
        match encoding {
            Some(encoding) => Ok(encoding),
            None => self.pno_encoding(),
        }
    }

    /// Digest for `op` over the values in `ctx`.
    pub(crate) fn sign(&self, op: Operation, ctx: &DigestContext<'_>) -> Result<String, PaymentError> {
        let credentials = self.credentials()?;
        let recipe = op.recipe();
        self.engine
            .sign(recipe.strategy, &recipe.fragments(ctx), credentials.secret())
    }

    /// Send `params`, prefixed with the version pair, to the method of `op`.
    pub(crate) fn call(&self, op: Operation, params: Vec<Value>) -> Result<Value, PaymentError> {
        let method = op.method();
        let mut full = Vec::with_capacity(params.len() + 2);
        full.push(Value::from(PROTO_VERSION));
        full.push(Value::from(CLIENT_VERSION));
        full.extend(params);

        tracing::debug!(method, params = full.len(), "remote call");
        if self.config.as_ref().is_some_and(|c| c.debug) {
            tracing::debug!(method, params = ?full, "parameter list");
        }

        let started = Instant::now();
        let result = self.transport.call(method, &full);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::debug!(method, elapsed_ms, "remote call completed"),
            Err(err) => tracing::warn!(method, elapsed_ms, error = %err, "remote call failed"),
        }
        result
    }
}

impl<T> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("credentials", &self.credentials)
            .field("locale", &self.locale)
            .field("session", &self.session)
            .field("client_ip", &self.client_ip)
            .finish_non_exhaustive()
    }
}
