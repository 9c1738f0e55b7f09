//! The boundary between the signing client and the wire.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use super::error::PaymentError;
use super::value::Value;

/// Executes one remote call.
///
/// `params` already start with the protocol and client version pair.
/// Faults reported by the service surface as [`PaymentError::RemoteFault`].
pub trait RpcTransport {
    fn call(&self, method: &str, params: &[Value]) -> Result<Value, PaymentError>;
}

impl<T: RpcTransport + ?Sized> RpcTransport for &T {
    fn call(&self, method: &str, params: &[Value]) -> Result<Value, PaymentError> {
        (**self).call(method, params)
    }
}

impl<T: RpcTransport + ?Sized> RpcTransport for Box<T> {
    fn call(&self, method: &str, params: &[Value]) -> Result<Value, PaymentError> {
        (**self).call(method, params)
    }
}

/// A call seen by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Vec<Value>,
}

/// In-memory transport that records calls and replays queued responses.
///
/// Used in tests and examples in place of a network transport.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<Value, PaymentError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn push_response(&self, value: Value) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(value));
    }

    /// Queue a fault response.
    pub fn push_fault(&self, code: i32, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(PaymentError::RemoteFault {
                code,
                message: message.into(),
            }));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl RpcTransport for RecordingTransport {
    fn call(&self, method: &str, params: &[Value]) -> Result<Value, PaymentError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                method: method.to_string(),
                params: params.to_vec(),
            });
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(PaymentError::Transport(format!("no response queued for {method}"))))
    }
}
