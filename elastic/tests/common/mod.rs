//! Shared helpers for integration tests

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use elastic::{Elasticsearch, Method, Transport};
use parking_lot::Mutex;

/// A request as it reached the transport
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

/// In-memory transport: records every request and answers with canned
/// bodies in order, `{}` once they run out
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<Recorded>>,
    responses: Mutex<VecDeque<Bytes>>,
}

impl RecordingTransport {
    pub fn with_responses(responses: &[&str]) -> Arc<Self> {
        let transport = Self::default();
        transport
            .responses
            .lock()
            .extend(responses.iter().map(|r| Bytes::from(r.to_string())));
        Arc::new(transport)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests.lock().last().cloned().expect("no request recorded")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, method: Method, url: &str, body: Option<String>) -> elastic::Result<Bytes> {
        self.requests.lock().push(Recorded {
            method,
            url: url.to_string(),
            body,
        });
        Ok(self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Bytes::from_static(b"{}")))
    }
}

/// Client wired to a recording transport answering with `responses`
pub fn client(responses: &[&str]) -> (Elasticsearch, Arc<RecordingTransport>) {
    let transport = RecordingTransport::with_responses(responses);
    let client = Elasticsearch::with_transport("localhost:9200", transport.clone());
    (client, transport)
}
