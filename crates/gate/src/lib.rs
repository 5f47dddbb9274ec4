use curtain_core::{Display, DisplayError, LoaderConfig, NetworkClient};
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

mod error;
mod gate;
mod tracked;

#[cfg(test)]
mod testing;

pub use error::GateError;
pub use gate::{ActivityGate, GateSnapshot, PageLoadSignal, page_load_channel};
pub use tracked::TrackedNetworkClient;

/// Everything a host page needs after start-up: the gate, the client all
/// page code must call through, and the page-load listener task.
pub struct Loader<C> {
    pub gate: Arc<ActivityGate>,
    pub client: TrackedNetworkClient<C>,
    pub page_load: JoinHandle<()>,
}

/// Bring the loader up.
///
/// Reads `options` once, builds the display from the resolved config and
/// hands both to [`start`]. Must run inside a tokio runtime.
pub fn initialize<C, D, F>(
    options: Option<&Value>,
    build_display: F,
    client: C,
    page_load: PageLoadSignal,
) -> Result<Loader<C>, GateError>
where
    C: NetworkClient,
    D: Display + 'static,
    F: FnOnce(&LoaderConfig) -> Result<D, DisplayError>,
{
    let config = LoaderConfig::from_options(options);
    let display = build_display(&config)?;
    start(config, display, client, page_load)
}

/// Bring the loader up with a config the host already resolved, for
/// displays that need it before they exist (e.g. an async mount).
///
/// The overlay goes up before the page-load listener is spawned, so an
/// early load signal can only ever hide it. Must run inside a tokio runtime.
pub fn start<C, D>(
    config: LoaderConfig,
    display: D,
    client: C,
    page_load: PageLoadSignal,
) -> Result<Loader<C>, GateError>
where
    C: NetworkClient,
    D: Display + 'static,
{
    info!(
        graphic = %config.graphic_reference,
        default_graphic = config.uses_default_graphic(),
        "initializing loader"
    );

    let gate = ActivityGate::new(config, display);
    gate.apply_visible_state();
    let client = gate.install(client)?;
    let page_load = gate.listen_for_page_load(page_load)?;

    Ok(Loader { gate, client, page_load })
}
