//! Gravity-derived surface scale constants.
//!
//! The orbital/atmospheric physics model owns these numbers; the engine only
//! consumes them when converting normalized heights to physical units. This
//! module provides the default derivation so callers without a physics
//! collaborator still get sensible elevations.

use crate::query::PhysicalScales;

/// Earth reference scales at gravity 1.0.
const REFERENCE_MAX_ELEVATION_KM: f32 = 8.8;
const REFERENCE_MAX_DEPTH_KM: f32 = 11.0;

/// Derive elevation/depth scale constants from gravity and tectonic activity.
///
/// Mountain formation strengthens with tectonic activity and weakens with
/// surface gravity (`1 + tectonic·0.2 − (gravity−1)·0.15`); ocean basins
/// simply compress with gravity.
pub fn surface_scales(gravity_factor: f32, tectonic_activity: f32) -> PhysicalScales {
    let formation =
        (1.0 + tectonic_activity * 0.2 - (gravity_factor - 1.0) * 0.15).max(0.1);
    PhysicalScales {
        max_land_elevation_km: REFERENCE_MAX_ELEVATION_KM * formation,
        max_ocean_depth_km: REFERENCE_MAX_DEPTH_KM / gravity_factor.max(0.1),
    }
}
