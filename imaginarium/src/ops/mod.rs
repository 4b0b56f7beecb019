mod blend;

pub use blend::paste_with_alpha;
