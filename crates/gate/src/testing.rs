//! Fakes shared by the gate tests.

use async_trait::async_trait;
use curtain_core::{Display, NetworkClient, NetworkError, NetworkRequest, NetworkResponse, Visibility};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub type Outcome = Result<NetworkResponse, NetworkError>;

/// Records every toggle it receives, plus the state it ended up in.
#[derive(Default)]
pub struct RecordingDisplay {
    calls: Mutex<Vec<Visibility>>,
}

impl RecordingDisplay {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Visibility> {
        self.calls.lock().unwrap().clone()
    }

    pub fn current(&self) -> Option<Visibility> {
        self.calls.lock().unwrap().last().copied()
    }
}

impl Display for RecordingDisplay {
    fn show(&self) {
        self.calls.lock().unwrap().push(Visibility::Visible);
    }

    fn hide(&self) {
        self.calls.lock().unwrap().push(Visibility::Hidden);
    }
}

/// Client whose calls stay pending until the test resolves them by url.
#[derive(Default)]
pub struct PendingClient {
    pending: Mutex<HashMap<String, oneshot::Receiver<Outcome>>>,
}

impl PendingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect(&self, url: &str) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().insert(url.to_string(), rx);
        tx
    }
}

#[async_trait]
impl NetworkClient for PendingClient {
    async fn call(&self, request: NetworkRequest) -> Outcome {
        let rx = self
            .pending
            .lock()
            .unwrap()
            .remove(&request.url)
            .unwrap_or_else(|| panic!("unexpected call to {}", request.url));
        rx.await.expect("test dropped the responder")
    }
}

/// Client that answers every call immediately with the same outcome.
pub struct FixedClient(pub Outcome);

#[async_trait]
impl NetworkClient for FixedClient {
    async fn call(&self, _request: NetworkRequest) -> Outcome {
        self.0.clone()
    }
}

pub fn ok_response() -> NetworkResponse {
    NetworkResponse {
        status: 200,
        headers: vec![("content-type".into(), "text/plain".into())],
        body: b"ok".to_vec(),
    }
}
