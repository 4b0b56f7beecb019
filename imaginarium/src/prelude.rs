// Color formats
pub use crate::common::{ChannelCount, Color};

// Error handling
pub use crate::common::{Error, Result};

// Image types
pub use crate::image::{Image, ImageDesc, SUPPORTED_EXTENSIONS};

// Comparison helpers
pub use crate::common::image_diff::{changed_region, ChangedRegion};

// Operations
pub use crate::ops::paste_with_alpha;
