use common::test_utils::test_output_path;
use imaginarium::Color;

use super::*;
use crate::field::ScalarField;
use crate::filter::KernelGain;

fn falling_ramp_gradients(width: usize, height: usize) -> GradientPair {
    let field = ScalarField::from_fn(width, height, |x, _| (width - x) as f32);
    filter::gradients(&field)
}

fn settings(smoothness: f32, intensity: f32) -> NormalMapSettings {
    NormalMapSettings {
        smoothness,
        intensity,
        kernel_gain: KernelGain::Unnormalized,
    }
}

#[test]
fn zero_gradients_give_flat_normals() {
    let zeros = ScalarField::new_filled(4, 3, 0.0);
    let map = NormalMap::build(&GradientPair::new(zeros.clone(), zeros), 2.0);
    assert_eq!(map, NormalMap::flat(4, 3));

    let image = map.to_image().unwrap();
    assert_eq!(image.channel_count(), ChannelCount::Rgb);
    assert!(image.bytes().chunks_exact(3).all(|p| p == [127, 127, 255]));
}

#[test]
fn negative_maximum_still_normalizes() {
    let gx = ScalarField::new(2, 1, vec![-4.0, -2.0]);
    let gy = ScalarField::new(2, 1, vec![-8.0, -1.0]);
    let map = NormalMap::build(&GradientPair::new(gx, gy), 1.0);

    // max is -1, so every component flips sign
    let n = map.normals()[(0, 0)];
    let expected = Vec3::new(4.0, 8.0, 1.0).normalize();
    assert!((n - expected).length() < 1e-6);
}

#[test]
fn normals_are_unit_length() {
    let map = NormalMap::build(&falling_ramp_gradients(8, 5), 2.0);
    for n in map.normals().iter() {
        assert!((n.length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn falling_ramp_tilts_toward_positive_x() {
    let map = NormalMap::build(&falling_ramp_gradients(8, 5), 1.0);

    let interior = map.normals()[(3, 2)];
    let half = std::f32::consts::FRAC_1_SQRT_2;
    assert!((interior - Vec3::new(half, 0.0, half)).length() < 1e-6);

    let image = map.to_image().unwrap();
    assert_eq!(image.pixel(3, 2), &[217, 127, 217]);
    // border response is half the interior one
    assert_eq!(image.pixel(0, 2), &[184, 127, 241]);
}

#[test]
fn intensity_controls_tilt() {
    let gentle = NormalMap::build(&falling_ramp_gradients(8, 5), 0.5);
    let steep = NormalMap::build(&falling_ramp_gradients(8, 5), 2.0);

    let expected_steep = Vec3::new(1.0, 0.0, 0.5).normalize();
    assert!((steep.normals()[(3, 2)] - expected_steep).length() < 1e-6);
    assert!(gentle.normals()[(3, 2)].z > steep.normals()[(3, 2)].z);
}

#[test]
fn constant_image_derives_flat_map() {
    let desc = ImageDesc::new(16, 12, ChannelCount::Rgb);
    let image = Image::new_filled(desc, Color::gray(90)).unwrap();
    let map = derive_normal_map(&image, &settings(1.5, 2.0));
    assert_eq!(map, NormalMap::flat(16, 12));
}

#[test]
fn convert_file_writes_rgb_normal_map() {
    let input = test_output_path("texturium_convert_input.png");
    let output = test_output_path("texturium_convert_input_normal.png");

    let desc = ImageDesc::new(32, 24, ChannelCount::Rgba);
    let mut image = Image::new_filled(desc, Color::gray(40)).unwrap();
    imaginarium::drawing::fill_circle(
        &mut image,
        glam::Vec2::new(16.0, 12.0),
        6.0,
        Color::gray(220),
    );
    image.save_file(&input).unwrap();

    convert_file(&input, &output, &settings(1.5, 2.0)).unwrap();

    let written = Image::read_file(&output).unwrap();
    assert_eq!(written.width(), 32);
    assert_eq!(written.height(), 24);
    assert_eq!(written.channel_count(), ChannelCount::Rgb);
    // far corner is flat after smoothing
    assert_eq!(written.pixel(0, 0), &[127, 127, 255]);
    assert!(written.bytes().chunks_exact(3).any(|p| p != [127, 127, 255]));
}

#[test]
fn convert_missing_input_reports_path() {
    let missing = Path::new("/nonexistent/texture.png");
    let result = convert_file(missing, &test_output_path("never.png"), &settings(1.0, 1.0));
    assert!(matches!(result, Err(Error::Image { path, .. }) if path == missing));
}
