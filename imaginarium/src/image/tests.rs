use common::test_utils::test_output_path;

use crate::prelude::*;

fn gradient_rgba(width: usize, height: usize) -> Image {
    let desc = ImageDesc::new(width, height, ChannelCount::Rgba);
    let mut image = Image::new_empty(desc).unwrap();
    for y in 0..height {
        for x in 0..width {
            image.set_pixel(x, y, Color::new((x * 10) as u8, (y * 10) as u8, 7, 200));
        }
    }
    image
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn new_empty_rejects_zero_dimensions() {
    let result = Image::new_empty(ImageDesc::new(0, 4, ChannelCount::L));
    assert!(matches!(result, Err(Error::InvalidDimensions(_))));
}

#[test]
fn new_with_data_checks_length() {
    let desc = ImageDesc::new(2, 2, ChannelCount::Rgb);
    assert!(Image::new_with_data(desc, vec![0; 12]).is_ok());
    assert!(matches!(
        Image::new_with_data(desc, vec![0; 11]),
        Err(Error::InvalidDimensions(_))
    ));
}

#[test]
fn new_filled_writes_every_pixel() {
    let image = Image::new_filled(
        ImageDesc::new(3, 2, ChannelCount::Rgba),
        Color::new(1, 2, 3, 4),
    )
    .unwrap();
    assert!(image.bytes().chunks_exact(4).all(|p| p == [1, 2, 3, 4]));
}

#[test]
fn contains_handles_negative_coordinates() {
    let image = Image::new_empty(ImageDesc::new(4, 3, ChannelCount::L)).unwrap();
    assert!(image.contains(0, 0));
    assert!(image.contains(3, 2));
    assert!(!image.contains(-1, 0));
    assert!(!image.contains(0, -1));
    assert!(!image.contains(4, 0));
    assert!(!image.contains(0, 3));
}

// =============================================================================
// Conversion and crop
// =============================================================================

#[test]
fn convert_rgba_to_l_uses_luma() {
    let desc = ImageDesc::new(1, 1, ChannelCount::Rgba);
    let image = Image::new_with_data(desc, vec![255, 0, 0, 10]).unwrap();
    let gray = image.convert(ChannelCount::L);
    assert_eq!(gray.channel_count(), ChannelCount::L);
    assert_eq!(gray.bytes(), &[76]);
}

#[test]
fn convert_l_to_rgba_replicates_and_is_opaque() {
    let desc = ImageDesc::new(2, 1, ChannelCount::L);
    let image = Image::new_with_data(desc, vec![9, 200]).unwrap();
    let rgba = image.convert(ChannelCount::Rgba);
    assert_eq!(rgba.bytes(), &[9, 9, 9, 255, 200, 200, 200, 255]);
}

#[test]
fn convert_keeps_alpha_between_alpha_layouts() {
    let desc = ImageDesc::new(1, 1, ChannelCount::LA);
    let image = Image::new_with_data(desc, vec![40, 128]).unwrap();
    assert_eq!(image.convert(ChannelCount::Rgba).bytes(), &[40, 40, 40, 128]);
    assert_eq!(image.convert(ChannelCount::Rgb).bytes(), &[40, 40, 40]);
}

#[test]
fn crop_copies_rectangle() {
    let image = gradient_rgba(5, 4);
    let cropped = image.crop(1, 2, 3, 2).unwrap();
    assert_eq!(cropped.width(), 3);
    assert_eq!(cropped.height(), 2);
    assert_eq!(cropped.pixel(0, 0), image.pixel(1, 2));
    assert_eq!(cropped.pixel(2, 1), image.pixel(3, 3));
}

#[test]
fn crop_out_of_bounds_is_error() {
    let image = gradient_rgba(5, 4);
    assert!(image.crop(3, 0, 3, 1).is_err());
    assert!(image.crop(0, 0, 0, 1).is_err());
}

// =============================================================================
// File I/O
// =============================================================================

#[test]
fn read_missing_file_returns_io_error() {
    let result = Image::read_file("/nonexistent/does_not_exist.png");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn read_invalid_extension_returns_error() {
    let result = Image::read_file("/nonexistent/file.xyz");
    assert!(matches!(result, Err(Error::InvalidExtension(_))));
}

#[test]
fn save_and_reload_png_rgba() {
    let original = gradient_rgba(6, 5);
    let path = test_output_path("imaginarium_reload_rgba.png");
    original.save_file(&path).unwrap();

    let reloaded = Image::read_file(&path).unwrap();
    assert_eq!(reloaded, original);
}

#[test]
fn save_and_reload_png_gray() {
    let original = gradient_rgba(6, 5).convert(ChannelCount::L);
    let path = test_output_path("imaginarium_reload_gray.png");
    original.save_file(&path).unwrap();

    let reloaded = Image::read_file(&path).unwrap();
    assert_eq!(reloaded, original);
}

#[test]
fn save_jpg_rejects_alpha() {
    let image = gradient_rgba(2, 2);
    let result = image.save_file(test_output_path("imaginarium_alpha.jpg"));
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}

#[test]
fn changed_region_bounds_differences() {
    let a = gradient_rgba(8, 8);
    let mut b = a.clone();
    assert_eq!(changed_region(&a, &b), None);

    b.set_pixel(2, 3, Color::WHITE);
    b.set_pixel(5, 6, Color::BLACK);
    assert_eq!(
        changed_region(&a, &b),
        Some(ChangedRegion {
            x: 2,
            y: 3,
            width: 4,
            height: 4
        })
    );
}
