use curtain_core::{Display, DisplayError, LoaderConfig};
use scraper::{Html, Selector};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::markup::{self, CssDisplay};

/// Host page held in memory, with the overlay mounted and both regions'
/// `display` tracked.
#[derive(Debug, Clone)]
pub struct PageDocument {
    source: String,
    config: LoaderConfig,
    overlay: CssDisplay,
    content: CssDisplay,
    style_writes: usize,
}

fn id_selector(id: &str) -> Result<Selector, DisplayError> {
    Selector::parse(&format!("#{}", id)).map_err(|e| DisplayError::Markup(e.to_string()))
}

impl PageDocument {
    /// Parse the host page and check it can carry the overlay. The content
    /// region must exist and the overlay id must still be free.
    pub fn from_html(html: &str, config: &LoaderConfig) -> Result<Self, DisplayError> {
        let document = Html::parse_document(html);

        let content = id_selector(&config.content_id)?;
        if document.select(&content).next().is_none() {
            return Err(DisplayError::MissingElement(config.content_id.clone()));
        }

        let overlay = id_selector(&config.overlay_id)?;
        if document.select(&overlay).next().is_some() {
            return Err(DisplayError::Markup(format!(
                "host page already has an element #{}",
                config.overlay_id
            )));
        }

        // Initial state comes from the mounted style sheet.
        Ok(Self {
            source: html.to_string(),
            config: config.clone(),
            overlay: CssDisplay::Flex,
            content: CssDisplay::None,
            style_writes: 0,
        })
    }

    pub fn overlay_display(&self) -> CssDisplay {
        self.overlay
    }

    pub fn content_display(&self) -> CssDisplay {
        self.content
    }

    /// Number of style writes that actually changed a region.
    pub fn style_writes(&self) -> usize {
        self.style_writes
    }

    fn set_regions(&mut self, overlay: CssDisplay, content: CssDisplay) {
        if self.overlay != overlay {
            self.overlay = overlay;
            self.style_writes += 1;
        }
        if self.content != content {
            self.content = content;
            self.style_writes += 1;
        }
    }

    /// The host page with the overlay mounted in its current state.
    pub fn render(&self) -> String {
        let mut style = markup::overlay_stylesheet(&self.config);
        style.push_str(&markup::state_rules(&self.config, self.overlay, self.content));
        markup::inject(&self.source, &style, &markup::overlay_markup(&self.config))
    }
}

/// [`Display`] over a shared [`PageDocument`].
#[derive(Debug, Clone)]
pub struct DocumentDisplay {
    document: Arc<Mutex<PageDocument>>,
}

impl DocumentDisplay {
    pub fn new(document: PageDocument) -> Self {
        Self { document: Arc::new(Mutex::new(document)) }
    }

    pub fn from_html(html: &str, config: &LoaderConfig) -> Result<Self, DisplayError> {
        Ok(Self::new(PageDocument::from_html(html, config)?))
    }

    fn lock(&self) -> MutexGuard<'_, PageDocument> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_document<R>(&self, f: impl FnOnce(&PageDocument) -> R) -> R {
        f(&self.lock())
    }

    pub fn render(&self) -> String {
        self.lock().render()
    }
}

impl Display for DocumentDisplay {
    fn show(&self) {
        self.lock().set_regions(CssDisplay::Flex, CssDisplay::None);
    }

    fn hide(&self) {
        self.lock().set_regions(CssDisplay::None, CssDisplay::Block);
    }
}
