mod cpu;


use crate::common::error::{Error, Result};
use crate::image::Image;

/// Pastes `src` onto `dst` with its top-left corner at `(x, y)`, using the
/// alpha channel of `src` as the blend mask.
///
/// Every channel of `dst` is blended, including its alpha channel:
/// `out = (dst * (255 - a) + src * a) / 255`, rounded. `src` is first
/// converted to the channel layout of `dst`. Pixels falling outside `dst`
/// on any side are skipped; the origin may be negative.
pub fn paste_with_alpha(dst: &mut Image, src: &Image, x: i64, y: i64) -> Result<()> {
    if !src.channel_count().has_alpha() {
        return Err(Error::UnsupportedFormat(format!(
            "paste source has no alpha channel: {}",
            src.channel_count()
        )));
    }

    cpu::apply(dst, src, x, y);

    Ok(())
}
