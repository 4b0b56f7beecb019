use crate::common::ChannelCount;
use crate::image::Image;

/// Rounded division by 255 for products of two 8-bit values.
#[inline]
fn div255(value: u32) -> u8 {
    let t = value + 128;
    ((t + (t >> 8)) >> 8) as u8
}

#[inline]
fn blend(dst: u8, src: u8, alpha: u8) -> u8 {
    div255(dst as u32 * (255 - alpha as u32) + src as u32 * alpha as u32)
}

pub(super) fn apply(dst: &mut Image, src: &Image, x: i64, y: i64) {
    let mask_channel = match src.channel_count() {
        ChannelCount::LA => 1,
        ChannelCount::Rgba => 3,
        ChannelCount::L | ChannelCount::Rgb => unreachable!("source alpha checked by caller"),
    };

    let colors = src.convert(dst.channel_count());

    // Visible part of src in dst coordinates, clipped on all four sides.
    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + src.width() as i64).min(dst.width() as i64);
    let y_end = (y + src.height() as i64).min(dst.height() as i64);

    for dy in y_start..y_end {
        let sy = (dy - y) as usize;
        for dx in x_start..x_end {
            let sx = (dx - x) as usize;
            let alpha = src.pixel(sx, sy)[mask_channel];
            if alpha == 0 {
                continue;
            }

            let color = colors.pixel(sx, sy);
            let target = dst.pixel_mut(dx as usize, dy as usize);
            for (d, &s) in target.iter_mut().zip(color) {
                *d = blend(*d, s, alpha);
            }
        }
    }
}
