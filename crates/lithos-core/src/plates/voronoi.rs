//! Voronoi rasterizer: assigns every grid cell to its nearest plate seed.
//!
//! Distances use the squared Euclidean chord, a monotonic and cheaper proxy
//! for great-circle distance (no inverse trigonometry in the inner loop).
//! Ties take the first minimum encountered; with jittered seeds they are
//! measure-zero in practice.

use rayon::prelude::*;

use crate::grid::PlateField;
use crate::plates::Plate;
use crate::sphere::Vec3;

/// Rasterize plate assignments onto a `resolution × resolution` grid.
pub fn rasterize_plates(plates: &[Plate], resolution: usize) -> PlateField {
    let seeds: Vec<Vec3> = plates.iter().map(|p| p.seed_dir).collect();
    let mut ids = vec![0u8; resolution * resolution];

    ids.par_chunks_mut(resolution).enumerate().for_each(|(row, out)| {
        let v = (row as f64 + 0.5) / resolution as f64;
        for (col, slot) in out.iter_mut().enumerate() {
            let u = (col as f64 + 0.5) / resolution as f64;
            let dir = Vec3::from_uv(u, v);
            *slot = nearest_seed(dir, &seeds);
        }
    });

    PlateField { ids, resolution }
}

#[inline]
fn nearest_seed(dir: Vec3, seeds: &[Vec3]) -> u8 {
    let mut best = 0usize;
    let mut best_d = f64::INFINITY;
    for (i, &s) in seeds.iter().enumerate() {
        let d = dir.dist_sq(s);
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best as u8
}
