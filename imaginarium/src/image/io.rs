use std::path::Path;

use image as image_lib;

use crate::prelude::*;

pub(crate) fn load<P: AsRef<Path>>(filename: P) -> Result<Image> {
    let img = image_lib::open(filename)?;
    let (width, height) = (img.width() as usize, img.height() as usize);

    // Wider sample types are narrowed to 8 bits, keeping the channel layout.
    let (channel_count, bytes) = match img.color() {
        image_lib::ColorType::L8 => (ChannelCount::L, img.into_bytes()),
        image_lib::ColorType::La8 => (ChannelCount::LA, img.into_bytes()),
        image_lib::ColorType::Rgb8 => (ChannelCount::Rgb, img.into_bytes()),
        image_lib::ColorType::Rgba8 => (ChannelCount::Rgba, img.into_bytes()),
        image_lib::ColorType::L16 => (ChannelCount::L, img.into_luma8().into_raw()),
        image_lib::ColorType::La16 => (ChannelCount::LA, img.into_luma_alpha8().into_raw()),
        image_lib::ColorType::Rgb16 | image_lib::ColorType::Rgb32F => {
            (ChannelCount::Rgb, img.into_rgb8().into_raw())
        }
        image_lib::ColorType::Rgba16 | image_lib::ColorType::Rgba32F => {
            (ChannelCount::Rgba, img.into_rgba8().into_raw())
        }
        other => return Err(Error::UnsupportedColorType(format!("{:?}", other))),
    };

    Image::new_with_data(ImageDesc::new(width, height, channel_count), bytes)
}

pub(crate) fn save_jpg<P: AsRef<Path>>(image: &Image, filename: P) -> Result<()> {
    let color_type = match image.channel_count() {
        ChannelCount::L => image_lib::ColorType::L8,
        ChannelCount::Rgb => image_lib::ColorType::Rgb8,

        other => {
            return Err(Error::UnsupportedFormat(format!(
                "JPEG color format: {:?}",
                other
            )));
        }
    };

    image_lib::save_buffer_with_format(
        filename,
        image.bytes(),
        image.width() as u32,
        image.height() as u32,
        color_type,
        image_lib::ImageFormat::Jpeg,
    )?;

    Ok(())
}

pub(crate) fn save_png<P: AsRef<Path>>(image: &Image, filename: P) -> Result<()> {
    let color_type = match image.channel_count() {
        ChannelCount::L => image_lib::ColorType::L8,
        ChannelCount::LA => image_lib::ColorType::La8,
        ChannelCount::Rgb => image_lib::ColorType::Rgb8,
        ChannelCount::Rgba => image_lib::ColorType::Rgba8,
    };

    image_lib::save_buffer_with_format(
        filename,
        image.bytes(),
        image.width() as u32,
        image.height() as u32,
        color_type,
        image_lib::ImageFormat::Png,
    )?;

    Ok(())
}
