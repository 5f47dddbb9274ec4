use chromiumoxide::page::Page;
use curtain_core::{DisplayError, LoaderConfig};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::script::{ScriptDisplay, ScriptSink, mount_script};
use crate::shared::to_display_error;

/// Queues scripts for the page driver task.
pub struct ChromiumSink {
    sender: mpsc::UnboundedSender<String>,
}

impl ScriptSink for ChromiumSink {
    fn run(&self, script: String) {
        if self.sender.send(script).is_err() {
            warn!("page driver stopped, overlay script dropped");
        }
    }
}

pub type ChromiumDisplay = ScriptDisplay<ChromiumSink>;

/// Mount the overlay into a live Chromium page and return a display for it,
/// plus the driver task that evaluates toggles in order.
///
/// Fails when the page has no content region.
pub async fn attach(
    page: &Page,
    config: &LoaderConfig,
) -> Result<(ChromiumDisplay, JoinHandle<()>), DisplayError> {
    let result = page
        .evaluate(mount_script(config))
        .await
        .map_err(|e| to_display_error(e, "Mount"))?;

    let content_found = result
        .value()
        .and_then(|v| v.get("contentFound"))
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    if !content_found {
        return Err(DisplayError::MissingElement(config.content_id.clone()));
    }
    debug!(overlay = %config.overlay_id, "overlay mounted in page");

    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();
    let page = page.clone();
    let driver = tokio::spawn(async move {
        while let Some(script) = receiver.recv().await {
            if let Err(e) = page.evaluate(script).await {
                warn!(error = %e, "overlay toggle failed");
            }
        }
    });

    Ok((ScriptDisplay::new(ChromiumSink { sender }, config), driver))
}
