/// Channel layout of an 8-bit image.
#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default)]
#[repr(u8)]
pub enum ChannelCount {
    L = 1,
    LA = 2,
    Rgb = 3,
    #[default]
    Rgba = 4,
}

impl ChannelCount {
    pub fn channel_count(&self) -> u8 {
        *self as u8
    }

    /// Bytes per pixel; every channel is one byte.
    pub fn byte_count(&self) -> usize {
        *self as usize
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, ChannelCount::LA | ChannelCount::Rgba)
    }

    /// Number of color (non-alpha) channels.
    pub fn color_channels(&self) -> usize {
        match self {
            ChannelCount::L | ChannelCount::LA => 1,
            ChannelCount::Rgb | ChannelCount::Rgba => 3,
        }
    }
}

impl std::fmt::Display for ChannelCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelCount::L => write!(f, "L"),
            ChannelCount::LA => write!(f, "LA"),
            ChannelCount::Rgb => write!(f, "RGB"),
            ChannelCount::Rgba => write!(f, "RGBA"),
        }
    }
}
