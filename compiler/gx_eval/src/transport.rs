//! The seam between `send` and whatever answers it.
//!
//! A transport carries one modulated request and returns one modulated
//! reply. It is the only blocking point of an evaluation.

use std::collections::VecDeque;

/// Why a round trip failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("no transport is available")]
    Offline,

    #[error("no reply left for request `{request}`")]
    Exhausted { request: String },

    #[error("connection closed")]
    Closed,

    #[error("{0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io(err.to_string())
    }
}

/// Performs one modulated round trip.
pub trait Transport {
    fn send_bits(&mut self, bits: &str) -> Result<String, TransportError>;
}

impl<F> Transport for F
where
    F: FnMut(&str) -> Result<String, TransportError>,
{
    fn send_bits(&mut self, bits: &str) -> Result<String, TransportError> {
        self(bits)
    }
}

/// A transport that refuses every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineTransport;

impl Transport for OfflineTransport {
    fn send_bits(&mut self, _bits: &str) -> Result<String, TransportError> {
        Err(TransportError::Offline)
    }
}

/// Replies with canned bit strings in order and records what was asked.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTransport {
    replies: VecDeque<String>,
    requests: Vec<String>,
}

impl ScriptedTransport {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedTransport {
            replies: replies.into_iter().map(Into::into).collect(),
            requests: Vec::new(),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> &[String] {
        &self.requests
    }
}

impl Transport for ScriptedTransport {
    fn send_bits(&mut self, bits: &str) -> Result<String, TransportError> {
        self.requests.push(bits.to_string());
        self.replies.pop_front().ok_or_else(|| TransportError::Exhausted {
            request: bits.to_string(),
        })
    }
}
