//! Overlay markup and the style sheet that goes with it.

use curtain_core::LoaderConfig;
use scraper::node::Comment;
use scraper::{ElementRef, Html, Node};

/// CSS `display` values the loader writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssDisplay {
    None,
    Flex,
    Block,
}

impl CssDisplay {
    pub fn as_str(&self) -> &'static str {
        match self {
            CssDisplay::None => "none",
            CssDisplay::Flex => "flex",
            CssDisplay::Block => "block",
        }
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full-page overlay styling. The content region starts hidden.
pub fn overlay_stylesheet(config: &LoaderConfig) -> String {
    let overlay = &config.overlay_id;
    let size = config.graphic_size_px;
    format!(
        r#"
#{overlay} {{
  position: fixed;
  top: 0;
  left: 0;
  width: 100%;
  height: 100%;
  display: flex;
  align-items: center;
  justify-content: center;
  background-color: {background};
  z-index: 9999;
  flex-direction: column;
}}
#{overlay} img {{
  width: {size}px;
  height: {size}px;
}}
#{overlay} p {{
  margin-top: 20px;
  font-size: 1.2rem;
  color: #333;
}}
#{content} {{
  display: none;
}}
"#,
        background = config.background,
        content = config.content_id,
    )
}

pub fn overlay_markup(config: &LoaderConfig) -> String {
    format!(
        r#"<div id="{}"><img src="{}" alt="Loading..."><p>{}</p></div>"#,
        escape_html(&config.overlay_id),
        escape_html(&config.graphic_reference),
        escape_html(&config.loading_text),
    )
}

/// Rules pinning both regions to an explicit state; appended after the
/// base sheet so they win the cascade.
pub fn state_rules(config: &LoaderConfig, overlay: CssDisplay, content: CssDisplay) -> String {
    format!(
        "#{} {{ display: {}; }}\n#{} {{ display: {}; }}\n",
        config.overlay_id,
        overlay.as_str(),
        config.content_id,
        content.as_str(),
    )
}

const HEAD_MARKER: &str = "curtain:overlay-style";
const BODY_MARKER: &str = "curtain:overlay-markup";

/// Insert `style` at the end of the head and `body_markup` at the end of the
/// body. Insertion points come from the parsed tree, so tag text inside
/// comments or scripts is left alone. The page is re-serialized, which
/// normalizes its markup.
pub fn inject(html: &str, style: &str, body_markup: &str) -> String {
    let mut document = Html::parse_document(html);

    for (name, marker) in [("head", HEAD_MARKER), ("body", BODY_MARKER)] {
        let parent = {
            let root = document.root_element();
            root.children()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == name)
                .map(|el| el.id())
                .unwrap_or_else(|| root.id())
        };
        if let Some(mut node) = document.tree.get_mut(parent) {
            node.append(Node::Comment(Comment { comment: marker.to_string().into() }));
        }
    }

    document
        .html()
        .replacen(&format!("<!--{}-->", HEAD_MARKER), &format!("<style>{}</style>", style), 1)
        .replacen(&format!("<!--{}-->", BODY_MARKER), body_markup, 1)
}
