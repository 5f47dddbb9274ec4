pub mod chromium;
pub mod document;
pub mod markup;
pub mod script;
pub mod shared;

pub use chromium::{ChromiumDisplay, attach};
pub use document::{DocumentDisplay, PageDocument};
pub use markup::CssDisplay;
pub use script::{ScriptDisplay, ScriptSink};
