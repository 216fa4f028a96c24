//! Angular wavenumber conventions for lattice transforms.

use ndarray::{Array1, Array3};
use std::f64::consts::TAU;

/// Angular wavenumbers for `n` samples spaced `spacing` apart.
///
/// Standard sample-frequency ordering scaled by `2π / (n * spacing)`:
/// the non-negative block `0, 1, ..` first, then the negative block.
/// For even `n` the negative block starts at `-n/2`; for odd `n` the
/// positive block runs up to `(n-1)/2`. `n = 0` yields an empty array.
pub fn sample_wavenumbers(n: usize, spacing: f64) -> Array1<f64> {
    let step = TAU / (n as f64 * spacing);
    let split = (n + 1) / 2;
    Array1::from_shape_fn(n, |i| {
        let index = if i < split {
            i as f64
        } else {
            i as f64 - n as f64
        };
        index * step
    })
}

/// Scalar wavenumber magnitude for every cell of a 3-D frequency lattice.
///
/// Outer-sum broadcast of three per-axis wavenumber vectors:
/// `field[[i, j, l]] = sqrt(kx[i]² + ky[j]² + kz[l]²)`. The output shape
/// is `(kx.len(), ky.len(), kz.len())`.
pub fn magnitude_field(kx: &Array1<f64>, ky: &Array1<f64>, kz: &Array1<f64>) -> Array3<f64> {
    Array3::from_shape_fn((kx.len(), ky.len(), kz.len()), |(i, j, l)| {
        (kx[i] * kx[i] + ky[j] * ky[j] + kz[l] * kz[l]).sqrt()
    })
}
