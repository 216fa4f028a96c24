//! Transform wrappers around `rustfft` and `ndrustfft`.
//!
//! Conventions fixed here and assumed everywhere else in the crate:
//! forward transforms are unnormalized, inverse transforms scale by `1/n`.

use ndarray::Array3;
use ndrustfft::{ndfft, FftHandler};
use num_complex::Complex64;
use rustfft::FftPlanner;

/// Forward DFT of a real 1-D signal. Unnormalized.
pub fn fft_1d(signal: &[f64]) -> Vec<Complex64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }
    let mut buffer: Vec<Complex64> = signal.iter().map(|&s| Complex64::new(s, 0.0)).collect();
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);
    buffer
}

/// Inverse DFT, normalized by `1/n` so `ifft_1d(fft_1d(x))` recovers `x`.
pub fn ifft_1d(modes: &[Complex64]) -> Vec<Complex64> {
    let n = modes.len();
    if n == 0 {
        return Vec::new();
    }
    let mut buffer = modes.to_vec();
    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(n);
    ifft.process(&mut buffer);
    let scale = 1.0 / n as f64;
    for c in buffer.iter_mut() {
        *c *= scale;
    }
    buffer
}

/// Forward 3-D DFT of a real field, one axis at a time. Unnormalized.
pub fn fft3_forward(field: &Array3<f64>) -> Array3<Complex64> {
    let mut data = field.mapv(|v| Complex64::new(v, 0.0));
    if data.is_empty() {
        return data;
    }
    let mut scratch = Array3::zeros(data.raw_dim());
    for axis in 0..3 {
        let mut handler = FftHandler::<f64>::new(data.shape()[axis]);
        ndfft(&data, &mut scratch, &mut handler, axis);
        std::mem::swap(&mut data, &mut scratch);
    }
    data
}

/// Reorder a sequence so the zero-frequency term sits at the center.
///
/// Rotates left by `ceil(n / 2)`, the standard shift for presenting
/// spectra stored in sample-frequency order.
pub fn fftshift(values: &[f64]) -> Vec<f64> {
    let mid = (values.len() + 1) / 2;
    let mut shifted = Vec::with_capacity(values.len());
    shifted.extend_from_slice(&values[mid..]);
    shifted.extend_from_slice(&values[..mid]);
    shifted
}
