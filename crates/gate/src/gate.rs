use curtain_core::{Display, LoaderConfig, NetworkClient, Visibility};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::GateError;
use crate::tracked::TrackedNetworkClient;

/// Fires once the host reports that every static resource has loaded.
pub type PageLoadSignal = oneshot::Receiver<()>;

pub fn page_load_channel() -> (oneshot::Sender<()>, PageLoadSignal) {
    oneshot::channel()
}

#[derive(Debug, Default)]
struct GateState {
    active_requests: usize,
    page_loaded: bool,
}

impl GateState {
    fn visibility(&self) -> Visibility {
        if self.active_requests > 0 || !self.page_loaded {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSnapshot {
    pub active_requests: usize,
    pub page_loaded: bool,
    pub visibility: Visibility,
}

/// Keeps the overlay up while tracked calls are outstanding or the page has
/// not finished loading.
///
/// Every operation takes the state lock for its whole duration, display
/// toggles included, so the surface always matches the last transition.
pub struct ActivityGate {
    state: Mutex<GateState>,
    display: Box<dyn Display>,
    config: LoaderConfig,
    installed: AtomicBool,
    listening: AtomicBool,
}

impl ActivityGate {
    pub fn new<D: Display + 'static>(config: LoaderConfig, display: D) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(GateState::default()),
            display: Box::new(display),
            config,
            installed: AtomicBool::new(false),
            listening: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        // Display panics cannot leave the counter half-updated.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wrap `inner` so every call through it is counted. Only one client may
    /// be installed per gate.
    pub fn install<C: NetworkClient>(
        self: &Arc<Self>,
        inner: C,
    ) -> Result<TrackedNetworkClient<C>, GateError> {
        if self.installed.swap(true, Ordering::SeqCst) {
            return Err(GateError::AlreadyInstalled);
        }
        debug!("tracked network client installed");
        Ok(TrackedNetworkClient::new(inner, Arc::clone(self)))
    }

    /// Spawn the task that waits for the page-load signal. Only one listener
    /// may be registered per gate. Must run inside a tokio runtime.
    pub fn listen_for_page_load(
        self: &Arc<Self>,
        signal: PageLoadSignal,
    ) -> Result<JoinHandle<()>, GateError> {
        if self.listening.swap(true, Ordering::SeqCst) {
            return Err(GateError::ListenerRegistered);
        }
        let gate = Arc::clone(self);
        Ok(tokio::spawn(async move {
            match signal.await {
                Ok(()) => gate.on_page_load(),
                Err(_) => warn!("page-load signal dropped before firing, overlay stays up"),
            }
        }))
    }

    pub fn before_call(&self) {
        let mut state = self.lock();
        state.active_requests += 1;
        debug!(active = state.active_requests, "call started");
        self.apply_visible_state();
    }

    /// Record that a call settled and hand its outcome back untouched.
    pub fn after_call<T, E>(&self, outcome: Result<T, E>) -> Result<T, E> {
        self.settle();
        outcome
    }

    pub(crate) fn settle(&self) {
        let mut state = self.lock();
        if state.active_requests == 0 {
            warn!("call settled with no outstanding calls, counter stays at 0");
            return;
        }
        state.active_requests -= 1;
        debug!(active = state.active_requests, "call settled");

        if state.active_requests == 0 {
            if state.page_loaded {
                self.apply_hidden_state();
            } else {
                debug!("all calls settled, waiting for page load");
            }
        }
    }

    pub fn on_page_load(&self) {
        let mut state = self.lock();
        if state.page_loaded {
            debug!("duplicate page-load event ignored");
            return;
        }
        state.page_loaded = true;

        if state.active_requests == 0 {
            info!("page loaded, revealing content");
            self.apply_hidden_state();
        } else {
            info!(active = state.active_requests, "page loaded, waiting for outstanding calls");
        }
    }

    pub fn apply_visible_state(&self) {
        self.display.show();
    }

    pub fn apply_hidden_state(&self) {
        self.display.hide();
    }

    pub fn active_requests(&self) -> usize {
        self.lock().active_requests
    }

    pub fn visibility(&self) -> Visibility {
        self.lock().visibility()
    }

    pub fn snapshot(&self) -> GateSnapshot {
        let state = self.lock();
        GateSnapshot {
            active_requests: state.active_requests,
            page_loaded: state.page_loaded,
            visibility: state.visibility(),
        }
    }
}
