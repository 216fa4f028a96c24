//! Isotropic power spectrum estimation over a cubic density field.

use ndarray::Array3;

use crate::grid::DensityGrid;
use crate::{fft, wavenumber, Error};

/// Radial wavenumber bins: strictly increasing, positive, finite edges.
///
/// A frequency cell belongs to bin `i` when its wavenumber magnitude lies
/// strictly inside `(edges[i], edges[i+1])`. A magnitude exactly equal to
/// a shared edge joins neither adjacent bin, so no cell is ever counted
/// twice.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialBins {
    edges: Vec<f64>,
}

impl RadialBins {
    /// Validates explicit edges: at least 2 of them, every edge positive
    /// and finite, strictly increasing.
    pub fn from_edges(edges: Vec<f64>) -> Result<Self, Error> {
        if edges.len() < 2 {
            return Err(Error::TooFewEdges { count: edges.len() });
        }
        for (index, &value) in edges.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::NonPositiveEdge { index, value });
            }
        }
        for index in 1..edges.len() {
            if edges[index] <= edges[index - 1] {
                return Err(Error::EdgesNotIncreasing { index });
            }
        }
        Ok(Self { edges })
    }

    /// Geometrically spaced edges: `n_bins` bins between `min_k` and
    /// `max_k`, so `n_bins + 1` edges with a constant ratio.
    pub fn logarithmic(min_k: f64, max_k: f64, n_bins: usize) -> Result<Self, Error> {
        let ratio = (max_k / min_k).ln();
        let edges = (0..=n_bins)
            .map(|i| min_k * (ratio * i as f64 / n_bins as f64).exp())
            .collect();
        Self::from_edges(edges)
    }

    /// The validated edge sequence.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins, one less than the number of edges.
    pub fn bin_count(&self) -> usize {
        self.edges.len() - 1
    }

    /// Bin centers: the arithmetic mean of adjacent edges. Strictly
    /// increasing whenever the edges are.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }
}

/// Binned isotropic spectrum: parallel `k_centers` and `power` sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSpectrum {
    /// Bin-center wavenumbers, strictly increasing.
    pub k_centers: Vec<f64>,
    /// Mean cell power per bin; exactly `0.0` for bins no cell fell into.
    pub power: Vec<f64>,
}

impl PowerSpectrum {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.power.len()
    }

    /// True when the table holds no bins.
    pub fn is_empty(&self) -> bool {
        self.power.is_empty()
    }

    /// The bin with the largest power, as `(k_center, power)`.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.k_centers
            .iter()
            .zip(self.power.iter())
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(&k, &p)| (k, p))
    }
}

/// Estimate the isotropic power spectrum of a cubic real-valued field.
///
/// The field is mean-subtracted (removing the zero-frequency offset),
/// transformed with an unnormalized forward 3-D DFT, and each cell's
/// squared magnitude is averaged into the radial bin whose open interval
/// contains the cell's angular wavenumber magnitude. Bins no cell falls
/// into report exactly `0.0`. Output is bit-for-bit reproducible for
/// identical input.
///
/// Fails on a non-cubic field or a non-positive box size; the binning was
/// already validated when `bins` was built.
pub fn estimate(
    field: &Array3<f64>,
    box_size: f64,
    bins: &RadialBins,
) -> Result<PowerSpectrum, Error> {
    let (nx, ny, nz) = field.dim();
    if nx != ny || ny != nz {
        return Err(Error::NonCubicField { nx, ny, nz });
    }
    if !box_size.is_finite() || box_size <= 0.0 {
        return Err(Error::BadBoxSize { value: box_size });
    }
    let n = nx;
    let n_bins = bins.bin_count();
    if n == 0 {
        return Ok(PowerSpectrum {
            k_centers: bins.centers(),
            power: vec![0.0; n_bins],
        });
    }

    // --- Transform and per-cell power ---
    let modes = fft::fft3_forward(&density_contrast(field));
    let power = modes.mapv(|c| c.norm_sqr());

    // --- Wavenumber magnitude per cell ---
    let k_axis = wavenumber::sample_wavenumbers(n, box_size / n as f64);
    let k_mag = wavenumber::magnitude_field(&k_axis, &k_axis, &k_axis);

    // --- Radial average ---
    let edges = bins.edges();
    let mut sums = vec![0.0; n_bins];
    let mut hits = vec![0u64; n_bins];
    for (&k, &p) in k_mag.iter().zip(power.iter()) {
        let upper = edges.partition_point(|&e| e < k);
        if upper == 0 || upper == edges.len() || edges[upper] == k {
            continue;
        }
        sums[upper - 1] += p;
        hits[upper - 1] += 1;
    }
    let power_out = sums
        .iter()
        .zip(&hits)
        .map(|(&s, &h)| if h == 0 { 0.0 } else { s / h as f64 })
        .collect();

    Ok(PowerSpectrum {
        k_centers: bins.centers(),
        power: power_out,
    })
}

/// Estimate directly from an occupancy grid, using the box size the grid
/// was built with.
pub fn estimate_grid(grid: &DensityGrid, bins: &RadialBins) -> Result<PowerSpectrum, Error> {
    estimate(&grid.to_field(), grid.spec().box_size(), bins)
}

/// Mean-subtracted copy of the field: the zero-frequency mode of its
/// transform vanishes up to rounding.
pub(crate) fn density_contrast(field: &Array3<f64>) -> Array3<f64> {
    let mean = field.sum() / field.len() as f64;
    field.mapv(|v| v - mean)
}
