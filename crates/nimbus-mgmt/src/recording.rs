//! HTTP record/playback support for scenario testing.
//!
//! A [`Cassette`] is an ordered list of recorded request/response exchanges,
//! serialized as JSON so fixtures can be checked in next to the tests that
//! replay them. Recording is an additional client behavior: attach a
//! [`Recorder`] through [`MgmtClientBuilder::recorder`] and every exchange the
//! client performs is captured. Playback is the test harness's job — it mounts
//! a cassette's exchanges on an HTTP double and points the client at it.
//!
//! [`MgmtClientBuilder::recorder`]: crate::client::MgmtClientBuilder::recorder

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The request half of a recorded exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// The response half of a recorded exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedResponse {
    pub status: u16,
    #[serde(default)]
    pub body: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// One request/response pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub request: RecordedRequest,
    pub response: RecordedResponse,
}

/// An ordered set of exchanges captured from (or replayed to) one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    pub name: String,
    #[serde(default)]
    pub exchanges: Vec<Exchange>,
}

#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("cassette IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cassette parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Cassette {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exchanges: Vec::new(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecordingError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RecordingError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// First exchange matching the method and path.
    pub fn find(&self, method: &str, path: &str) -> Option<&Exchange> {
        self.exchanges
            .iter()
            .find(|e| e.request.method.eq_ignore_ascii_case(method) && e.request.path == path)
    }
}

/// Thread-safe exchange collector shared with a client.
#[derive(Clone)]
pub struct Recorder {
    inner: Arc<Mutex<Cassette>>,
}

impl Recorder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Cassette::new(name))),
        }
    }

    pub fn record(&self, exchange: Exchange) {
        // Lock poisoning only happens if a recording thread panicked; the
        // cassette is still the best evidence available.
        let mut cassette = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        cassette.exchanges.push(exchange);
    }

    /// Snapshot of everything recorded so far.
    pub fn cassette(&self) -> Cassette {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
