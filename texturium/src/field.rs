use common::Buffer2;
use imaginarium::{ChannelCount, Image};

/// Grid of `f32` values: gray intensity or one gradient component.
pub type ScalarField = Buffer2<f32>;

/// Horizontal and vertical edge responses of the same field.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientPair {
    pub x: ScalarField,
    pub y: ScalarField,
}

impl GradientPair {
    pub fn new(x: ScalarField, y: ScalarField) -> Self {
        assert!(x.same_shape(&y), "gradient components must share a shape");
        Self { x, y }
    }

    pub fn width(&self) -> usize {
        self.x.width()
    }

    pub fn height(&self) -> usize {
        self.x.height()
    }

    /// Largest signed value over both components.
    pub fn max_value(&self) -> Option<f32> {
        match (self.x.max_value(), self.y.max_value()) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Gray intensity in `[0, 1]`.
///
/// Color images use `0.3 R + 0.6 G + 0.1 B`; gray images use their first channel.
pub fn luminance_field(image: &Image) -> ScalarField {
    let channels = image.channel_count();
    Buffer2::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.pixel(x, y);
        let value = match channels {
            ChannelCount::L | ChannelCount::LA => pixel[0] as f32,
            ChannelCount::Rgb | ChannelCount::Rgba => {
                pixel[0] as f32 * 0.3 + pixel[1] as f32 * 0.6 + pixel[2] as f32 * 0.1
            }
        };
        value / 255.0
    })
}
