//! Height-field compositor: blends coarse tectonic relief with layered
//! noise, calibrates sea level to the requested ocean fraction, and reshapes
//! the land/ocean curves around that anchor.
//!
//! Three passes: a row-parallel blend, the whole-buffer calibration
//! reduction, then a row-parallel reshape. Calibration must finish before
//! reshaping starts; nothing else couples cells to each other.

use rayon::prelude::*;

use crate::calibrate::calibrate_sea_level;
use crate::grid::HeightField;
use crate::noise::{NoiseChannels, WARPED_AMPLITUDE};
use crate::sphere::Vec3;

/// Blend weights, shaping exponents, and band frequencies. Empirically tuned;
/// exposed as configuration because none of the numbers are load-bearing —
/// tests pin the statistical behaviour, not the constants.
#[derive(Debug, Clone)]
pub struct ComposeParams {
    /// Share of the large-scale term (itself a coarse/low-frequency blend).
    pub weight_large: f32,
    pub weight_mid: f32,
    pub weight_fine: f32,
    pub weight_ridged: f32,
    /// Coarse tectonic share inside the large-scale term.
    pub coarse_share: f32,
    /// Exponent applied after blending to adjust the height distribution.
    pub shaping_exponent: f32,

    /// Domain-warp strength for the low band; mid and fine bands use scaled
    /// fractions of it. Driven by tectonic activity upstream.
    pub warp_strength: f64,

    pub freq_low: f64,
    pub freq_mid: f64,
    pub freq_fine: f64,
    pub freq_ridged: f64,

    /// Minimum fractional lift of land above sea level, and the power curve
    /// applied to the remainder.
    pub land_min_lift: f32,
    pub land_exponent: f32,
    /// Minimum fractional depth of ocean below sea level, and its curve.
    pub ocean_min_depth: f32,
    pub ocean_exponent: f32,
}

impl Default for ComposeParams {
    fn default() -> Self {
        Self {
            weight_large: 0.25,
            weight_mid: 0.25,
            weight_fine: 0.20,
            weight_ridged: 0.30,
            coarse_share: 0.55,
            shaping_exponent: 1.1,
            warp_strength: 0.6,
            freq_low: 1.7,
            freq_mid: 4.3,
            freq_fine: 10.7,
            freq_ridged: 3.1,
            land_min_lift: 0.015,
            land_exponent: 1.15,
            ocean_min_depth: 0.03,
            ocean_exponent: 1.25,
        }
    }
}

/// Octave counts per band. More octaves at higher frequency buys detail
/// where the band actually contributes it.
const OCTAVES_LOW: u32 = 4;
const OCTAVES_MID: u32 = 5;
const OCTAVES_FINE: u32 = 6;
const OCTAVES_RIDGED: u32 = 5;

/// A finished blended surface: calibrated height field plus its sea level.
pub struct Composite {
    pub field: HeightField,
    pub sea_level: f32,
    /// Non-finite blend results replaced by mid-height, for diagnostics.
    pub anomalies: u32,
}

/// Blend `coarse` with the noise layers and calibrate against
/// `ocean_fraction`.
pub fn compose_height_field(
    coarse: &HeightField,
    channels: &NoiseChannels,
    ocean_fraction: f32,
    params: &ComposeParams,
) -> Composite {
    let n = coarse.resolution;

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
                let blended = blend_cell(coarse.get(row, col), dir, channels, params);
                if blended.is_finite() {
                    *slot = blended.clamp(0.0, 1.0).powf(params.shaping_exponent);
                } else {
                    *slot = 0.5;
                    row_anomalies += 1;
                }
            }
            row_anomalies
        })
        .sum();

    // Barrier: the quantile is a reduction over the whole buffer and must
    // precede the reshape pass.
    let sea_level = calibrate_sea_level(&data, ocean_fraction);

    data.par_iter_mut().for_each(|v| *v = reshape(*v, sea_level, params));

    Composite { field: HeightField { data, resolution: n }, sea_level, anomalies }
}

#[inline]
fn blend_cell(coarse: f32, dir: Vec3, channels: &NoiseChannels, p: &ComposeParams) -> f32 {
    let low = to_unit(channels.warped_fbm(dir, p.freq_low, p.warp_strength, OCTAVES_LOW));
    let mid = to_unit(channels.warped_fbm(dir, p.freq_mid, p.warp_strength * 0.6, OCTAVES_MID));
    let fine = to_unit(channels.warped_fbm(dir, p.freq_fine, p.warp_strength * 0.35, OCTAVES_FINE));
    let ridged = channels.ridged(dir, p.freq_ridged, OCTAVES_RIDGED) as f32;

    let large = p.coarse_share * coarse + (1.0 - p.coarse_share) * low;
    p.weight_large * large + p.weight_mid * mid + p.weight_fine * fine + p.weight_ridged * ridged
}

/// Map a warped-fBm sample from ±WARPED_AMPLITUDE into [0, 1].
#[inline]
fn to_unit(sample: f64) -> f32 {
    (sample / (2.0 * WARPED_AMPLITUDE) + 0.5) as f32
}

/// Monotonic land/ocean curves anchored at sea level.
///
/// Land gets a guaranteed fractional lift above sea level plus a power-curved
/// remainder; ocean gets a guaranteed depth below plus its own curve. This
/// keeps coastlines from degenerating into near-zero relief while preserving
/// the land/ocean classification of every cell.
fn reshape(value: f32, sea_level: f32, p: &ComposeParams) -> f32 {
    if value <= sea_level {
        if sea_level <= f32::EPSILON {
            return value;
        }
        let depth = (sea_level - value) / sea_level;
        let shaped = p.ocean_min_depth + (1.0 - p.ocean_min_depth) * depth.powf(p.ocean_exponent);
        sea_level * (1.0 - shaped)
    } else {
        let span = 1.0 - sea_level;
        if span <= f32::EPSILON {
            return value;
        }
        let lift = (value - sea_level) / span;
        let shaped = p.land_min_lift + (1.0 - p.land_min_lift) * lift.powf(p.land_exponent);
        sea_level + span * shaped
    }
}
