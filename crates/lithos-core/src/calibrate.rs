//! Sea-level calibration: histogram-quantile threshold over a height buffer.
//!
//! Runs once per generation, on the final blended field; the coarse tectonic
//! layer is left uncalibrated since only the final threshold is observable.

/// Histogram resolution. The realized ocean fraction is accurate to one bin
/// width, i.e. 1/1024.
pub const HISTOGRAM_BINS: usize = 1024;

/// Calibrate the sea-level threshold so that `ocean_fraction` of `values`
/// fall at or below it.
///
/// Builds a fixed-size histogram over [0, 1], scans the cumulative count to
/// `ocean_fraction × n`, and linearly interpolates the residual inside the
/// crossing bin, yielding a continuous threshold instead of a bin-quantized
/// one. Values outside [0, 1] land in the edge bins.
pub fn calibrate_sea_level(values: &[f32], ocean_fraction: f32) -> f32 {
    if values.is_empty() || ocean_fraction <= 0.0 {
        return 0.0;
    }
    if ocean_fraction >= 1.0 {
        return 1.0;
    }

    let mut counts = [0u32; HISTOGRAM_BINS];
    for &v in values {
        let bin = ((v as f64 * HISTOGRAM_BINS as f64) as usize).min(HISTOGRAM_BINS - 1);
        counts[bin] += 1;
    }

    let target = ocean_fraction as f64 * values.len() as f64;
    let mut cumulative = 0.0f64;
    for (bin, &count) in counts.iter().enumerate() {
        let next = cumulative + count as f64;
        if next >= target {
            let fraction = if count > 0 { (target - cumulative) / count as f64 } else { 0.0 };
            return ((bin as f64 + fraction) / HISTOGRAM_BINS as f64) as f32;
        }
        cumulative = next;
    }
    1.0
}

/// Fraction of `values` at or below `threshold`.
pub fn realized_ocean_fraction(values: &[f32], threshold: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let below = values.iter().filter(|&&v| v <= threshold).count();
    below as f32 / values.len() as f32
}
