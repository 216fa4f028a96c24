//! Counts-in-cells assignment of 3-D positions onto a cubic lattice.

use ndarray::Array3;

use crate::Error;

/// Geometry of the sampling lattice: `resolution` cells per axis covering
/// a cube of physical side `box_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    resolution: usize,
    box_size: f64,
}

impl GridSpec {
    /// Validates the geometry: `resolution >= 1`, `box_size` positive and
    /// finite.
    pub fn new(resolution: usize, box_size: f64) -> Result<Self, Error> {
        if resolution == 0 {
            return Err(Error::ZeroResolution);
        }
        if !box_size.is_finite() || box_size <= 0.0 {
            return Err(Error::BadBoxSize { value: box_size });
        }
        Ok(Self {
            resolution,
            box_size,
        })
    }

    /// Cells per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Physical side length of the cube.
    pub fn box_size(&self) -> f64 {
        self.box_size
    }

    /// Physical width of one cell.
    pub fn cell_width(&self) -> f64 {
        self.box_size / self.resolution as f64
    }
}

/// Occupancy counts of a point catalog on a cubic lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    counts: Array3<u32>,
    spec: GridSpec,
}

impl DensityGrid {
    /// Nearest-grid-point assignment: each position lands in the single
    /// cell containing it, with cell index `floor(coordinate / cell_width)`
    /// per axis clamped into `[0, resolution - 1]`.
    ///
    /// Points outside the box fold onto the boundary cell; none are ever
    /// dropped, so the grid total always equals `positions.len()`. An empty
    /// slice produces an all-zero grid. Never fails.
    pub fn from_positions(spec: GridSpec, positions: &[[f64; 3]]) -> Self {
        let n = spec.resolution();
        let dx = spec.cell_width();
        let top = (n - 1) as i64;
        let mut counts = Array3::zeros((n, n, n));
        for p in positions {
            let i = clamp_cell((p[0] / dx).floor(), top);
            let j = clamp_cell((p[1] / dx).floor(), top);
            let l = clamp_cell((p[2] / dx).floor(), top);
            counts[[i, j, l]] += 1;
        }
        Self { counts, spec }
    }

    /// Occupancy counts, shape `(resolution, resolution, resolution)`.
    pub fn counts(&self) -> &Array3<u32> {
        &self.counts
    }

    /// Total number of assigned points.
    pub fn total_count(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// The counts as a real-valued field, ready for spectral estimation.
    pub fn to_field(&self) -> Array3<f64> {
        self.counts.mapv(f64::from)
    }

    /// The lattice geometry this grid was built with.
    pub fn spec(&self) -> GridSpec {
        self.spec
    }
}

// The f64-to-i64 cast saturates, so ±inf fold onto the boundary cells and
// NaN lands in cell 0. Finite coordinates are the caller's contract; the
// clamp keeps the assignment total either way.
fn clamp_cell(cell: f64, top: i64) -> usize {
    (cell as i64).clamp(0, top) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(resolution: usize, box_size: f64) -> GridSpec {
        GridSpec::new(resolution, box_size).unwrap()
    }

    #[test]
    fn test_spec_validation() {
        assert!(matches!(
            GridSpec::new(0, 100.0),
            Err(Error::ZeroResolution)
        ));
        assert!(matches!(
            GridSpec::new(8, 0.0),
            Err(Error::BadBoxSize { .. })
        ));
        assert!(matches!(
            GridSpec::new(8, -5.0),
            Err(Error::BadBoxSize { .. })
        ));
        assert!(matches!(
            GridSpec::new(8, f64::NAN),
            Err(Error::BadBoxSize { .. })
        ));
        assert!(GridSpec::new(8, 100.0).is_ok());
    }

    #[test]
    fn test_cell_width() {
        let s = spec(50, 100.0);
        assert!((s.cell_width() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_catalog_all_zero() {
        let grid = DensityGrid::from_positions(spec(4, 8.0), &[]);
        assert_eq!(grid.total_count(), 0);
        assert!(grid.counts().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_single_point_single_cell() {
        let grid = DensityGrid::from_positions(spec(4, 8.0), &[[3.0, 5.0, 7.0]]);
        // cell width 2.0: indices floor(3/2)=1, floor(5/2)=2, floor(7/2)=3
        assert_eq!(grid.counts()[[1, 2, 3]], 1);
        assert_eq!(grid.total_count(), 1);
    }

    #[test]
    fn test_shared_cell_accumulates() {
        let positions = [[0.1, 0.1, 0.1], [0.2, 0.3, 0.4], [1.9, 1.9, 1.9]];
        let grid = DensityGrid::from_positions(spec(4, 8.0), &positions);
        assert_eq!(grid.counts()[[0, 0, 0]], 3);
        assert_eq!(grid.total_count(), 3);
    }

    #[test]
    fn test_count_conservation() {
        let positions: Vec<[f64; 3]> = (0..500)
            .map(|i| {
                let v = i as f64;
                [v * 0.21 % 10.0, v * 0.37 % 10.0, v * 0.53 % 10.0]
            })
            .collect();
        let grid = DensityGrid::from_positions(spec(8, 10.0), &positions);
        assert_eq!(grid.total_count(), positions.len() as u64);
    }

    #[test]
    fn test_outside_points_clamp_to_boundary() {
        let positions = [
            [-3.0, 4.0, 4.0],
            [25.0, 4.0, 4.0],
            [4.0, -0.001, 4.0],
            [4.0, 4.0, 8.0],
        ];
        let grid = DensityGrid::from_positions(spec(4, 8.0), &positions);
        assert_eq!(grid.total_count(), 4, "clamped points must still count");
        assert_eq!(grid.counts()[[0, 2, 2]], 1);
        assert_eq!(grid.counts()[[3, 2, 2]], 1);
        assert_eq!(grid.counts()[[2, 0, 2]], 1);
        assert_eq!(grid.counts()[[2, 2, 3]], 1);
    }

    #[test]
    fn test_box_edge_folds_onto_last_cell() {
        // coordinate exactly at box_size indexes one past the end, clamp
        // folds it back
        let grid = DensityGrid::from_positions(spec(4, 8.0), &[[8.0, 8.0, 8.0]]);
        assert_eq!(grid.counts()[[3, 3, 3]], 1);
    }

    #[test]
    fn test_to_field_matches_counts() {
        let grid = DensityGrid::from_positions(spec(2, 2.0), &[[0.5, 0.5, 0.5], [1.5, 0.5, 1.5]]);
        let field = grid.to_field();
        assert!((field[[0, 0, 0]] - 1.0).abs() < 1e-12);
        assert!((field[[1, 0, 1]] - 1.0).abs() < 1e-12);
        assert!((field.sum() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_resolution_one_collects_everything() {
        let positions = [[-100.0, 0.0, 3.0], [0.5, 0.5, 0.5], [1e6, -1e6, 0.0]];
        let grid = DensityGrid::from_positions(spec(1, 1.0), &positions);
        assert_eq!(grid.counts()[[0, 0, 0]], 3);
    }
}
