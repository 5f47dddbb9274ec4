pub mod js;
pub mod errors;

pub use errors::to_display_error;
