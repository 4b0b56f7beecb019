//! Separable Gaussian smoothing and Sobel gradients on scalar fields.
//!
//! Both filters are true convolutions (the kernel is mirrored) with
//! half-sample symmetric boundary extension: sample `-1` reads sample `0`,
//! sample `n` reads sample `n - 1`.


use serde::{Deserialize, Serialize};

use crate::field::{GradientPair, ScalarField};

/// Scaling applied to the Gaussian taps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelGain {
    /// Raw `exp(-x²/2σ²)` taps. A flat field is scaled by the squared tap sum.
    #[default]
    Unnormalized,
    /// Taps divided by their sum; a flat field stays unchanged.
    UnitSum,
}

const SOBEL: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// 1D Gaussian taps sampled at `-3σ, -3σ + 1, ...` while below `3σ + 1`.
///
/// The length is `ceil(6σ + 1)`, so non-integer sigmas yield even-length
/// kernels whose taps are not centered on zero.
///
/// # Panics
/// If `sigma` is not finite and positive.
pub fn gaussian_kernel_1d(sigma: f32, gain: KernelGain) -> Vec<f64> {
    assert!(
        sigma.is_finite() && sigma > 0.0,
        "Sigma must be finite and positive"
    );

    let sigma = sigma as f64;
    let start = -3.0 * sigma;
    let len = (6.0 * sigma + 1.0).ceil() as usize;
    let two_sigma_sq = 2.0 * sigma * sigma;

    let mut kernel: Vec<f64> = (0..len)
        .map(|k| {
            let x = start + k as f64;
            (-x * x / two_sigma_sq).exp()
        })
        .collect();

    if gain == KernelGain::UnitSum {
        let sum: f64 = kernel.iter().sum();
        kernel.iter_mut().for_each(|v| *v /= sum);
    }

    kernel
}

/// Maps an out-of-range index back into `0..len` by half-sample reflection.
#[inline]
pub(crate) fn reflect_index(index: i64, len: usize) -> usize {
    let n = len as i64;
    let m = index.rem_euclid(2 * n);
    (if m < n { m } else { 2 * n - 1 - m }) as usize
}

/// Gaussian smoothing with unnormalized taps; see [`smooth_with_gain`].
pub fn smooth(field: &ScalarField, sigma: f32) -> ScalarField {
    smooth_with_gain(field, sigma, KernelGain::Unnormalized)
}

/// Convolves rows, then columns, with [`gaussian_kernel_1d`].
///
/// `sigma == 0` returns an unchanged copy.
pub fn smooth_with_gain(field: &ScalarField, sigma: f32, gain: KernelGain) -> ScalarField {
    if sigma == 0.0 || field.is_empty() {
        return field.clone();
    }

    let kernel = gaussian_kernel_1d(sigma, gain);
    let rows = convolve_rows(field, &kernel);
    convolve_cols(&rows, &kernel)
}

fn convolve_rows(input: &ScalarField, kernel: &[f64]) -> ScalarField {
    let width = input.width();
    let half = (kernel.len() / 2) as i64;

    let mut output = ScalarField::new_filled(width, input.height(), 0.0);
    for y in 0..input.height() {
        let src = input.row(y);
        for (x, out) in output.row_mut(y).iter_mut().enumerate() {
            let base = x as i64 + half;
            let sum: f64 = kernel
                .iter()
                .enumerate()
                .map(|(k, &w)| w * src[reflect_index(base - k as i64, width)] as f64)
                .sum();
            *out = sum as f32;
        }
    }
    output
}

fn convolve_cols(input: &ScalarField, kernel: &[f64]) -> ScalarField {
    let height = input.height();
    let half = (kernel.len() / 2) as i64;

    ScalarField::from_fn(input.width(), height, |x, y| {
        let base = y as i64 + half;
        let sum: f64 = kernel
            .iter()
            .enumerate()
            .map(|(k, &w)| w * input[(x, reflect_index(base - k as i64, height))] as f64)
            .sum();
        sum as f32
    })
}

/// Sobel responses: `x` uses `[[-1,0,1],[-2,0,2],[-1,0,1]]`, `y` its transpose.
///
/// Because the kernel is mirrored by the convolution, intensity rising toward
/// `+x` yields a negative `x` response (and likewise for `y`).
pub fn gradients(field: &ScalarField) -> GradientPair {
    let gx = convolve_3x3(field, |ky, kx| SOBEL[ky][kx]);
    let gy = convolve_3x3(field, |ky, kx| SOBEL[kx][ky]);
    GradientPair::new(gx, gy)
}

fn convolve_3x3(input: &ScalarField, weight: impl Fn(usize, usize) -> f64) -> ScalarField {
    let width = input.width();
    let height = input.height();

    ScalarField::from_fn(width, height, |x, y| {
        let mut sum = 0.0f64;
        for ky in 0..3 {
            let sy = reflect_index(y as i64 + 1 - ky as i64, height);
            for kx in 0..3 {
                let w = weight(ky, kx);
                if w != 0.0 {
                    let sx = reflect_index(x as i64 + 1 - kx as i64, width);
                    sum += w * input[(sx, sy)] as f64;
                }
            }
        }
        sum as f32
    })
}
