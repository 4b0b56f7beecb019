mod common;
mod image;

pub mod drawing;
pub mod ops;
pub mod prelude;

pub use prelude::*;
