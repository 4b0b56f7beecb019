pub(crate) mod color;
pub(crate) mod color_format;
pub(crate) mod error;
pub(crate) mod image_diff;

// Public API
pub use color::Color;
pub use color_format::ChannelCount;
pub use error::{Error, Result};
