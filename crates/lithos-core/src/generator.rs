//! Generation entrypoint: validates parameters, runs the pipeline stages in
//! order, and returns an immutable [`PlanetSurface`] snapshot.
//!
//! Pipeline order:
//!   1. Plate topology (seed points, types, motion vectors)
//!   2. Voronoi rasterization
//!   3. Boundary elevation synthesis (coarse tectonic relief)
//!   4. Noise blend + sea-level calibration + land/ocean reshaping

use serde::{Deserialize, Serialize};

use crate::compose::{compose_height_field, ComposeParams};
use crate::error::GenError;
use crate::grid::{HeightField, PlateField};
use crate::noise::NoiseChannels;
use crate::plates::boundary::synthesize_coarse_relief;
use crate::plates::voronoi::rasterize_plates;
use crate::plates::{build_plate_topology, Plate};

/// User-facing generation parameters.
/// Defaults match the reference configuration (Earth-like, ocean 0.68).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceParams {
    pub seed: u64,
    /// Number of tectonic plates, 3–15.
    pub plate_count: usize,
    /// Grid resolution per axis; the rasters hold `resolution²` cells.
    /// Powers of two are recommended but not required.
    pub resolution: usize,
    /// Requested ocean coverage, 0–1.
    pub ocean_fraction: f32,
    /// Relative surface gravity, > 0. Stronger gravity compresses relief.
    pub gravity_factor: f32,
    /// Tectonic activity level, 0–10. Drives the noise warp strength here;
    /// upstream it also drives the plate count.
    pub tectonic_activity: f32,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            seed: 42,
            plate_count: 7,
            resolution: 256,
            ocean_fraction: 0.68,
            gravity_factor: 1.0,
            tectonic_activity: 3.0,
        }
    }
}

impl SurfaceParams {
    /// Fail fast before any buffer is allocated.
    pub fn validate(&self) -> Result<(), GenError> {
        if !(3..=15).contains(&self.plate_count) {
            return Err(GenError::PlateCount(self.plate_count));
        }
        if self.resolution == 0 {
            return Err(GenError::Resolution);
        }
        if !(0.0..=1.0).contains(&self.ocean_fraction) || !self.ocean_fraction.is_finite() {
            return Err(GenError::OceanFraction(self.ocean_fraction));
        }
        if !(self.gravity_factor > 0.0) || !self.gravity_factor.is_finite() {
            return Err(GenError::GravityFactor(self.gravity_factor));
        }
        if !(0.0..=10.0).contains(&self.tectonic_activity) {
            return Err(GenError::TectonicActivity(self.tectonic_activity));
        }
        Ok(())
    }

    /// Low-frequency domain-warp strength from the tectonic activity knob.
    fn warp_strength(&self) -> f64 {
        0.25 + self.tectonic_activity as f64 / 10.0 * 1.1
    }
}

/// An immutable generated surface. Any number of readers may share a
/// snapshot concurrently; regeneration produces a fresh one.
#[derive(Debug, Clone)]
pub struct PlanetSurface {
    pub params: SurfaceParams,
    pub plates: Vec<Plate>,
    /// Plate-id raster, kept for debug visualization.
    pub plate_field: PlateField,
    /// Coarse tectonic relief before the noise blend, kept for diagnostics.
    pub coarse: HeightField,
    /// The final calibrated height field.
    pub height: HeightField,
    pub sea_level: f32,
    /// Count of numeric anomalies recovered during generation.
    pub anomalies: u32,
}

/// The pipeline orchestrator.
pub struct PlanetGenerator {
    compose: ComposeParams,
}

impl PlanetGenerator {
    pub fn new() -> Self {
        Self { compose: ComposeParams::default() }
    }

    /// Override the tuned blend/reshape parameters.
    pub fn with_compose_params(compose: ComposeParams) -> Self {
        Self { compose }
    }

    /// Run the full generation pipeline. Identical parameters are
    /// bit-reproducible and the call has no side effects, so regeneration is
    /// idempotent.
    pub fn generate(&self, params: &SurfaceParams) -> Result<PlanetSurface, GenError> {
        params.validate()?;

        let plates = build_plate_topology(params.seed, params.plate_count, params.ocean_fraction);
        let plate_field = rasterize_plates(&plates, params.resolution);
        let relief = synthesize_coarse_relief(&plate_field, &plates, params.gravity_factor);

        let seed32 = (params.seed & 0xFFFF_FFFF) as u32;
        let channels = NoiseChannels::new(seed32);
        let mut compose = self.compose.clone();
        compose.warp_strength = params.warp_strength();

        let blended =
            compose_height_field(&relief.field, &channels, params.ocean_fraction, &compose);

        Ok(PlanetSurface {
            params: params.clone(),
            plates,
            plate_field,
            coarse: relief.field,
            height: blended.field,
            sea_level: blended.sea_level,
            anomalies: relief.anomalies + blended.anomalies,
        })
    }
}

impl Default for PlanetGenerator {
    fn default() -> Self {
        Self::new()
    }
}
