use curtain_core::{Display, LoaderConfig};
use serde_json::json;

use crate::markup::{self, CssDisplay};
use crate::shared::js;

/// Somewhere to send JavaScript for evaluation in the page. Scripts must run
/// in the order they are sent.
pub trait ScriptSink: Send + Sync {
    fn run(&self, script: String);
}

/// [`Display`] that drives a live page by emitting the region toggles as
/// scripts.
pub struct ScriptDisplay<S> {
    sink: S,
    overlay_id: String,
    content_id: String,
}

impl<S: ScriptSink> ScriptDisplay<S> {
    pub fn new(sink: S, config: &LoaderConfig) -> Self {
        Self {
            sink,
            overlay_id: config.overlay_id.clone(),
            content_id: config.content_id.clone(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn set_regions(&self, overlay: CssDisplay, content: CssDisplay) {
        self.sink.run(set_regions_script(
            &self.overlay_id,
            overlay,
            &self.content_id,
            content,
        ));
    }
}

impl<S: ScriptSink> Display for ScriptDisplay<S> {
    fn show(&self) {
        self.set_regions(CssDisplay::Flex, CssDisplay::None);
    }

    fn hide(&self) {
        self.set_regions(CssDisplay::None, CssDisplay::Block);
    }
}

/// Script that mounts the style sheet and overlay, once. Evaluates to
/// `{ contentFound, mounted }`.
pub fn mount_script(config: &LoaderConfig) -> String {
    js::build_js_call(
        js::overlay::MOUNT_OVERLAY,
        &[
            json!(markup::overlay_stylesheet(config)),
            json!(markup::overlay_markup(config)),
            json!(config.overlay_id),
            json!(config.content_id),
        ],
    )
}

pub fn set_regions_script(
    overlay_id: &str,
    overlay: CssDisplay,
    content_id: &str,
    content: CssDisplay,
) -> String {
    js::build_js_call(
        js::overlay::SET_REGIONS,
        &[
            json!(overlay_id),
            json!(overlay.as_str()),
            json!(content_id),
            json!(content.as_str()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<String>>);

    impl ScriptSink for RecordingSink {
        fn run(&self, script: String) {
            self.0.lock().unwrap().push(script);
        }
    }

    #[test]
    fn show_and_hide_emit_region_toggles() {
        let display = ScriptDisplay::new(RecordingSink::default(), &LoaderConfig::default());
        display.show();
        display.hide();

        let scripts = display.sink().0.lock().unwrap().clone();
        assert_eq!(scripts.len(), 2);
        assert!(scripts[0].ends_with(r#"("loading-screen", "flex", "main-content", "none")"#));
        assert!(scripts[1].ends_with(r#"("loading-screen", "none", "main-content", "block")"#));
        assert!(scripts[0].contains("overlay.style.display = overlayDisplay"));
    }

    #[test]
    fn mount_script_embeds_markup_as_json() {
        let config = LoaderConfig::default().with_graphic("/a\"b.gif");
        let script = mount_script(&config);
        assert!(script.contains(r#"src=\"/a&quot;b.gif\""#));
        assert!(script.contains("document.head.appendChild(style)"));
        assert!(script.trim_end().ends_with(r#""loading-screen", "main-content")"#));
    }
}
