use async_trait::async_trait;
use curtain_core::{NetworkClient, NetworkError, NetworkRequest, NetworkResponse};
use std::sync::Arc;
use tracing::debug;

use crate::gate::ActivityGate;

/// A network client that reports every call to an [`ActivityGate`] and
/// otherwise behaves exactly like the client it wraps.
pub struct TrackedNetworkClient<C> {
    inner: C,
    gate: Arc<ActivityGate>,
}

impl<C> TrackedNetworkClient<C> {
    pub(crate) fn new(inner: C, gate: Arc<ActivityGate>) -> Self {
        Self { inner, gate }
    }

    pub fn gate(&self) -> &Arc<ActivityGate> {
        &self.gate
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

/// One outstanding call. Settles the gate on completion, or on drop if the
/// caller abandons the future first.
struct InFlight {
    gate: Arc<ActivityGate>,
    settled: bool,
}

impl InFlight {
    fn begin(gate: Arc<ActivityGate>) -> Self {
        gate.before_call();
        Self { gate, settled: false }
    }

    fn finish<T, E>(mut self, outcome: Result<T, E>) -> Result<T, E> {
        self.settled = true;
        self.gate.after_call(outcome)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.settled {
            debug!("tracked call dropped before settling");
            self.gate.settle();
        }
    }
}

#[async_trait]
impl<C: NetworkClient> NetworkClient for TrackedNetworkClient<C> {
    async fn call(&self, request: NetworkRequest) -> Result<NetworkResponse, NetworkError> {
        let call = InFlight::begin(Arc::clone(&self.gate));
        let outcome = self.inner.call(request).await;
        call.finish(outcome)
    }
}
