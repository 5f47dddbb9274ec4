use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Loading graphic used when the host supplies none.
pub const DEFAULT_GRAPHIC: &str = "https://i.imgur.com/llF5iyg.gif";

pub const DEFAULT_OVERLAY_ID: &str = "loading-screen";
pub const DEFAULT_CONTENT_ID: &str = "main-content";
pub const DEFAULT_LOADING_TEXT: &str = "Loading resources, please wait...";

/// Resolved loader configuration. Built once at initialization and never
/// mutated afterwards; the gate and the displays only ever read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub graphic_reference: String,
    pub overlay_id: String,
    pub content_id: String,
    pub loading_text: String,
    pub background: String,
    pub graphic_size_px: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            graphic_reference: DEFAULT_GRAPHIC.to_string(),
            overlay_id: DEFAULT_OVERLAY_ID.to_string(),
            content_id: DEFAULT_CONTENT_ID.to_string(),
            loading_text: DEFAULT_LOADING_TEXT.to_string(),
            background: "rgba(255, 255, 255, 0.9)".to_string(),
            graphic_size_px: 100,
        }
    }
}

/// Shape of the host-supplied options object. Both keys are accepted;
/// `graphicReference` wins when both are strings.
#[derive(Debug, Default, Deserialize)]
struct RawOptions {
    #[serde(rename = "graphicReference")]
    graphic_reference: Option<Value>,
    #[serde(rename = "graphicPath")]
    graphic_path: Option<Value>,
}

impl LoaderConfig {
    /// Resolve the options object the host page exposes. Anything missing,
    /// empty or of the wrong type falls back to the defaults.
    pub fn from_options(options: Option<&Value>) -> Self {
        let raw = options
            .and_then(|v| serde_json::from_value::<RawOptions>(v.clone()).ok())
            .unwrap_or_default();

        let graphic = [raw.graphic_reference, raw.graphic_path]
            .into_iter()
            .flatten()
            .find_map(|v| match v {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            });

        match graphic {
            Some(path) => Self::default().with_graphic(path),
            None => Self::default(),
        }
    }

    pub fn with_graphic(mut self, reference: impl Into<String>) -> Self {
        self.graphic_reference = reference.into();
        self
    }

    pub fn with_ids(mut self, overlay_id: impl Into<String>, content_id: impl Into<String>) -> Self {
        self.overlay_id = overlay_id.into();
        self.content_id = content_id.into();
        self
    }

    pub fn with_loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = text.into();
        self
    }

    pub fn uses_default_graphic(&self) -> bool {
        self.graphic_reference == DEFAULT_GRAPHIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_options_use_default_graphic() {
        let config = LoaderConfig::from_options(None);
        assert_eq!(config, LoaderConfig::default());
        assert!(config.uses_default_graphic());
    }

    #[test]
    fn graphic_reference_is_read() {
        let opts = json!({ "graphicReference": "/img/spinner.svg" });
        let config = LoaderConfig::from_options(Some(&opts));
        assert_eq!(config.graphic_reference, "/img/spinner.svg");
        assert_eq!(config.content_id, DEFAULT_CONTENT_ID);
    }

    #[test]
    fn graphic_path_key_is_accepted() {
        let opts = json!({ "graphicPath": "spinner.gif" });
        assert_eq!(LoaderConfig::from_options(Some(&opts)).graphic_reference, "spinner.gif");
    }

    #[test]
    fn reference_takes_precedence_over_path() {
        let opts = json!({ "graphicReference": "a.gif", "graphicPath": "b.gif" });
        assert_eq!(LoaderConfig::from_options(Some(&opts)).graphic_reference, "a.gif");
    }

    #[test]
    fn malformed_options_fall_back() {
        for opts in [
            json!({ "graphicReference": 42 }),
            json!({ "graphicReference": "   " }),
            json!({ "graphicPath": null }),
            json!("spinner.gif"),
            json!([1, 2, 3]),
        ] {
            let config = LoaderConfig::from_options(Some(&opts));
            assert!(config.uses_default_graphic(), "expected default for {opts}");
        }
    }

    #[test]
    fn wrong_typed_reference_still_allows_path() {
        let opts = json!({ "graphicReference": false, "graphicPath": "fallback.gif" });
        assert_eq!(LoaderConfig::from_options(Some(&opts)).graphic_reference, "fallback.gif");
    }
}
