//! Square equirectangular rasters: plate-id and elevation grids.
//!
//! Both rasters are row-major, `resolution × resolution`, with row 0 at the
//! north pole. Cell `(row, col)` is centred at
//! `u = (col + 0.5) / resolution`, `v = (row + 0.5) / resolution`.
//! Sampling wraps across the longitude seam and clamps at the poles.

use serde::{Deserialize, Serialize};

/// Row-major raster of plate identifiers, one per grid cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateField {
    pub ids: Vec<u8>,
    pub resolution: usize,
}

impl PlateField {
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.ids[row * self.resolution + col]
    }
}

/// Dense per-cell elevation in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeightField {
    /// Row-major normalized elevation values.
    pub data: Vec<f32>,
    pub resolution: usize,
}

impl HeightField {
    /// Create a field filled with the given value.
    pub fn new(resolution: usize, fill: f32) -> Self {
        Self { data: vec![fill; resolution * resolution], resolution }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.resolution + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, val: f32) {
        self.data[row * self.resolution + col] = val;
    }

    /// Value at `(row, col)` with horizontal wrap and vertical clamp, for
    /// stencil reads near the longitude seam and the poles.
    #[inline]
    pub fn get_wrapped(&self, row: isize, col: isize) -> f32 {
        let n = self.resolution as isize;
        let r = row.clamp(0, n - 1) as usize;
        let c = col.rem_euclid(n) as usize;
        self.get(r, c)
    }

    /// Bilinear sample at `(u, v)`. `u` wraps across the seam, `v` clamps at
    /// the poles; out-of-range inputs are clamped, never rejected.
    /// Sampling exactly at a cell centre returns the stored value.
    pub fn sample(&self, u: f64, v: f64) -> f32 {
        let n = self.resolution;
        let nf = n as f64;

        let fx = u.rem_euclid(1.0) * nf - 0.5;
        let fy = (v.clamp(0.0, 1.0) * nf - 0.5).clamp(0.0, nf - 1.0);

        let x0 = fx.floor();
        let y0 = fy.floor() as usize;
        let y1 = (y0 + 1).min(n - 1);
        let tx = (fx - x0) as f32;
        let ty = (fy - y0 as f64) as f32;

        let x0i = (x0 as isize).rem_euclid(n as isize) as usize;
        let x1i = (x0 as isize + 1).rem_euclid(n as isize) as usize;

        let v00 = self.get(y0, x0i);
        let v10 = self.get(y0, x1i);
        let v01 = self.get(y1, x0i);
        let v11 = self.get(y1, x1i);

        v00 * (1.0 - tx) * (1.0 - ty)
            + v10 * tx * (1.0 - ty)
            + v01 * (1.0 - tx) * ty
            + v11 * tx * ty
    }

    pub fn min_value(&self) -> f32 {
        self.data.iter().cloned().fold(f32::INFINITY, f32::min)
    }

    pub fn max_value(&self) -> f32 {
        self.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_at_cell_centres_is_exact() {
        let mut hf = HeightField::new(8, 0.0);
        hf.set(0, 0, 0.25);
        hf.set(3, 5, 0.75);
        hf.set(7, 7, 0.5);
        for (r, c) in [(0usize, 0usize), (3, 5), (7, 7)] {
            let u = (c as f64 + 0.5) / 8.0;
            let v = (r as f64 + 0.5) / 8.0;
            let got = hf.sample(u, v);
            assert!(
                (got - hf.get(r, c)).abs() < 1e-7,
                "cell ({r},{c}): sampled {got}, stored {}",
                hf.get(r, c)
            );
        }
    }

    #[test]
    fn sample_wraps_across_longitude_seam() {
        let mut hf = HeightField::new(4, 0.0);
        hf.set(1, 0, 1.0);
        hf.set(1, 3, 1.0);
        // Midway between the last and first column, on row 1 centres.
        let at_seam = hf.sample(0.0, (1.0 + 0.5) / 4.0);
        assert!((at_seam - 1.0).abs() < 1e-6, "seam sample should blend wrapped columns");
    }

    #[test]
    fn sample_clamps_at_poles_and_out_of_range() {
        let mut hf = HeightField::new(4, 0.2);
        hf.set(0, 0, 0.9);
        // v < 0 clamps to the top row.
        let above = hf.sample(0.125, -0.5);
        let top = hf.sample(0.125, 0.125);
        assert!((above - top).abs() < 1e-7);
        // v > 1 clamps to the bottom row without panicking.
        let _ = hf.sample(0.5, 2.0);
    }

    #[test]
    fn min_and_max_track_stored_extremes() {
        let mut hf = HeightField::new(4, 0.5);
        hf.set(1, 2, 0.1);
        hf.set(3, 0, 0.9);
        assert_eq!(hf.min_value(), 0.1);
        assert_eq!(hf.max_value(), 0.9);
    }

    #[test]
    fn wrapped_get_handles_negative_columns() {
        let mut hf = HeightField::new(4, 0.0);
        hf.set(2, 3, 0.6);
        assert_eq!(hf.get_wrapped(2, -1), 0.6);
        assert_eq!(hf.get_wrapped(-5, 3), hf.get(0, 3));
    }
}
