//! Surface query engine: point queries against a generated snapshot.
//!
//! Queries bilinearly interpolate the stored height field, classify
//! land/ocean against the calibrated sea level, and convert normalized
//! height into physical units using externally supplied, gravity-derived
//! scale constants (owned by the physics collaborator; see
//! [`crate::physics::surface_scales`] for the default derivation).

use serde::{Deserialize, Serialize};

use crate::generator::PlanetSurface;
use crate::sphere::Vec3;

/// Physical conversion constants supplied by the physics model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhysicalScales {
    pub max_land_elevation_km: f32,
    pub max_ocean_depth_km: f32,
}

/// Result of a single surface query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SurfaceSample {
    /// Interpolated normalized height in [0, 1].
    pub height_normalized: f32,
    /// True when the height is at or below the calibrated sea level.
    pub is_ocean: bool,
    /// Kilometres above sea level; 0 for ocean points.
    pub elevation_km: f32,
    /// Kilometres below sea level; 0 for land points.
    pub depth_km: f32,
}

impl PlanetSurface {
    /// Query by unit-sphere direction. Non-unit inputs are normalized.
    pub fn sample_direction(&self, direction: Vec3, scales: &PhysicalScales) -> SurfaceSample {
        let (u, v) = direction.normalize().to_uv();
        self.sample_uv(u, v, scales)
    }

    /// Query by equirectangular (u, v). `u` wraps across the longitude seam;
    /// `v` clamps at the poles. Out-of-range inputs are clamped, never
    /// raised as errors.
    pub fn sample_uv(&self, u: f64, v: f64, scales: &PhysicalScales) -> SurfaceSample {
        let height = self.height.sample(u, v);
        let sea = self.sea_level;

        if height <= sea {
            let depth_fraction = if sea > f32::EPSILON { (sea - height) / sea } else { 0.0 };
            SurfaceSample {
                height_normalized: height,
                is_ocean: true,
                elevation_km: 0.0,
                depth_km: depth_fraction * scales.max_ocean_depth_km,
            }
        } else {
            let span = 1.0 - sea;
            let lift_fraction = if span > f32::EPSILON { (height - sea) / span } else { 0.0 };
            SurfaceSample {
                height_normalized: height,
                is_ocean: false,
                elevation_km: lift_fraction * scales.max_land_elevation_km,
                depth_km: 0.0,
            }
        }
    }
}
