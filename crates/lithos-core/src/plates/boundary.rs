//! Boundary elevation synthesizer: coarse tectonic relief from plate type
//! and plate-boundary interactions.
//!
//! A flat 4-neighbor stencil over the plate-id raster is enough here; the
//! Voronoi lookup already gives O(1) membership per cell, so no boundary
//! graph is built. At each plate-id mismatch the relative plate motion is
//! projected onto the across-boundary direction in the local tangent plane
//! and classified as convergent, divergent, or transform.

use rayon::prelude::*;

use crate::grid::{HeightField, PlateField};
use crate::plates::{Plate, PlateKind};
use crate::sphere::Vec3;

/// Resting elevation per plate kind. Continental crust starts higher.
const BASE_OCEANIC: f32 = 0.28;
const BASE_CONTINENTAL: f32 = 0.62;

/// Projection magnitude below which a mismatch is a transform fault.
const PROJECTION_THRESHOLD: f64 = 0.08;

/// Per-interaction elevation deltas, scaled by the projection magnitude.
/// Qualitative ordering is the contract: continental collision > divergent
/// ridge > transform fault; exact values are tuning.
const DELTA_COLLISION: f32 = 0.50;
const DELTA_TRENCH: f32 = 0.40;
const DELTA_DIVERGENT: f32 = 0.22;
const DELTA_TRANSFORM: f32 = 0.06;

/// Coarse tectonic relief plus the count of recovered numeric anomalies.
pub struct CoarseRelief {
    pub field: HeightField,
    pub anomalies: u32,
}

/// Derive the coarse elevation raster from plate types and boundary
/// interactions. All boundary deltas are scaled by `1 / gravity_factor`
/// (stronger gravity compresses relief); the result is clamped into [0, 1]
/// against the fixed base levels rather than re-stretched per field, so the
/// gravity scaling survives into the output statistics.
pub fn synthesize_coarse_relief(
    plate_field: &PlateField,
    plates: &[Plate],
    gravity_factor: f32,
) -> CoarseRelief {
    let n = plate_field.resolution;
    let inv_gravity = 1.0 / gravity_factor;

    let mut data = vec![0.0f32; n * n];
    let anomalies: u32 = data
        .par_chunks_mut(n)
        .enumerate()
        .map(|(row, out)| {
            let mut row_anomalies = 0u32;
            let v = (row as f64 + 0.5) / n as f64;
            for (col, slot) in out.iter_mut().enumerate() {
                let u = (col as f64 + 0.5) / n as f64;
                let dir = Vec3::from_uv(u, v);
                let value = cell_elevation(plate_field, plates, row, col, dir, inv_gravity);
                if value.is_finite() {
                    *slot = value.clamp(0.0, 1.0);
                } else {
                    *slot = 0.5;
                    row_anomalies += 1;
                }
            }
            row_anomalies
        })
        .sum();

    CoarseRelief { field: HeightField { data, resolution: n }, anomalies }
}

fn cell_elevation(
    plate_field: &PlateField,
    plates: &[Plate],
    row: usize,
    col: usize,
    dir: Vec3,
    inv_gravity: f32,
) -> f32 {
    let n = plate_field.resolution as isize;
    let here = plate_field.get(row, col);
    let plate = &plates[here as usize];

    let mut elevation = match plate.kind {
        PlateKind::Continental => BASE_CONTINENTAL,
        PlateKind::Oceanic => BASE_OCEANIC,
    };

    // 4-neighbor stencil: wrap across the longitude seam, clamp at the poles.
    // A clamped pole neighbor is the cell itself and never mismatches.
    let neighbors: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
    for (dr, dc) in neighbors {
        let nr = (row as isize + dr).clamp(0, n - 1) as usize;
        let nc = (col as isize + dc).rem_euclid(n) as usize;
        let other = plate_field.get(nr, nc);
        if other == here {
            continue;
        }

        let neighbor_dir = Vec3::from_uv((nc as f64 + 0.5) / n as f64, (nr as f64 + 0.5) / n as f64);
        elevation += boundary_delta(plate, &plates[other as usize], dir, neighbor_dir) * inv_gravity;
    }

    elevation
}

/// Elevation contribution of one boundary mismatch, before gravity scaling.
fn boundary_delta(plate: &Plate, other: &Plate, dir: Vec3, neighbor_dir: Vec3) -> f32 {
    // Across-boundary direction: toward the neighbor, in the tangent plane.
    let across_raw = neighbor_dir.sub(dir).tangent_at(dir);
    if across_raw.length() < 1e-12 {
        return 0.0;
    }
    let across = across_raw.normalize();

    let relative = plate.motion.sub(other.motion);
    let proj = relative.dot(across);

    if proj > PROJECTION_THRESHOLD {
        // Convergent: closing on the neighbor. Continental-continental
        // collision builds mountains; any oceanic participant subducts into
        // a trench.
        let both_continental =
            plate.kind == PlateKind::Continental && other.kind == PlateKind::Continental;
        if both_continental {
            DELTA_COLLISION * proj as f32
        } else {
            -DELTA_TRENCH * proj as f32
        }
    } else if proj < -PROJECTION_THRESHOLD {
        // Divergent: a mid-ocean-ridge analogue, moderate raise.
        DELTA_DIVERGENT * (-proj) as f32
    } else {
        // Transform: plates slide past each other; a small fault perturbation
        // proportional to the tangential slip.
        let slip = relative.tangent_at(dir).sub(across.scale(proj));
        DELTA_TRANSFORM * slip.length() as f32
    }
}
