//! Seed-reproducible noise channels: base gradient noise, domain-warped
//! fractional Brownian motion, and ridged multifractal noise.
//!
//! All sampling is a pure function of a unit-sphere direction plus
//! parameters. Channels are Perlin permutation tables keyed by
//! `seed ^ CHANNEL_SALT` — a stable channel identifier, never process-global
//! state — so the same (seed, channel) pair reproduces bit-identical output.
//! Sampling with the full 3D direction keeps the layers seam-free across the
//! longitude wrap.

use noise::{NoiseFn, Perlin};

use crate::sphere::Vec3;

/// Channel salts. Changing one reshuffles a single layer without touching
/// the others.
const CH_WARP_U: u32 = 0x5741_5055;
const CH_WARP_V: u32 = 0x5741_5056;
const CH_DETAIL: u32 = 0xD371_0001;
const CH_RIDGE: u32 = 0x91D6_0002;

/// Octave amplitude decay and frequency growth for all fBm-style sums.
const PERSISTENCE: f64 = 0.5;
const LACUNARITY: f64 = 2.0;

/// Nominal output bound of the warped-fBm layer after amplitude-sum
/// normalization.
pub const WARPED_AMPLITUDE: f64 = 1.5;

/// The per-generation noise channel table.
pub struct NoiseChannels {
    warp_u: Perlin,
    warp_v: Perlin,
    detail: Perlin,
    ridge: Perlin,
}

impl NoiseChannels {
    pub fn new(seed: u32) -> Self {
        Self {
            warp_u: Perlin::new(seed ^ CH_WARP_U),
            warp_v: Perlin::new(seed ^ CH_WARP_V),
            detail: Perlin::new(seed ^ CH_DETAIL),
            ridge: Perlin::new(seed ^ CH_RIDGE),
        }
    }

    /// Base gradient noise at `dir` scaled by `frequency`. Roughly ±1.
    pub fn base(&self, dir: Vec3, frequency: f64) -> f64 {
        self.detail.get([dir.x * frequency, dir.y * frequency, dir.z * frequency])
    }

    /// Domain-warped fBm: two independent channels perturb the (x, y)
    /// components of the sampling point, then the detail channel is summed
    /// across `octaves` with persistence 0.5 / lacunarity 2.0. The octave sum
    /// is normalized by total amplitude and rescaled, so the output stays
    /// within ±[`WARPED_AMPLITUDE`].
    pub fn warped_fbm(&self, dir: Vec3, frequency: f64, warp_strength: f64, octaves: u32) -> f64 {
        let p = [dir.x * frequency, dir.y * frequency, dir.z * frequency];

        let wu = self.warp_u.get(p);
        // Decorrelated offset so the two warp channels never sample in
        // lockstep even though they share input coordinates.
        let wv = self.warp_v.get([p[0] + 5.2, p[1] + 1.3, p[2] + 2.7]);
        let q = [p[0] + warp_strength * wu, p[1] + warp_strength * wv, p[2]];

        let mut sum = 0.0f64;
        let mut amp = 1.0f64;
        let mut amp_sum = 0.0f64;
        let mut freq = 1.0f64;
        for _ in 0..octaves {
            sum += amp * self.detail.get([q[0] * freq, q[1] * freq, q[2] * freq]);
            amp_sum += amp;
            amp *= PERSISTENCE;
            freq *= LACUNARITY;
        }
        if amp_sum == 0.0 {
            return 0.0;
        }
        sum / amp_sum * WARPED_AMPLITUDE
    }

    /// Ridged noise: each octave is reshaped with `(1 − |n|)²` to sharpen
    /// crests, then accumulated on the same persistence/lacunarity schedule
    /// and normalized into [0, 1].
    pub fn ridged(&self, dir: Vec3, frequency: f64, octaves: u32) -> f64 {
        let p = [dir.x * frequency, dir.y * frequency, dir.z * frequency];

        let mut sum = 0.0f64;
        let mut amp = 1.0f64;
        let mut amp_sum = 0.0f64;
        let mut freq = 1.0f64;
        for _ in 0..octaves {
            let n = self.ridge.get([p[0] * freq, p[1] * freq, p[2] * freq]);
            let ridge = (1.0 - n.abs()).max(0.0);
            sum += amp * ridge * ridge;
            amp_sum += amp;
            amp *= PERSISTENCE;
            freq *= LACUNARITY;
        }
        if amp_sum == 0.0 {
            return 0.0;
        }
        sum / amp_sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic low-discrepancy-ish spread of test directions.
    fn sample_directions(n: usize) -> Vec<Vec3> {
        (0..n)
            .map(|i| {
                let u = (i as f64 * 0.754_877_666) % 1.0;
                let v = (i as f64 + 0.5) / n as f64;
                Vec3::from_uv(u, v)
            })
            .collect()
    }

    #[test]
    fn channels_are_seed_reproducible() {
        let a = NoiseChannels::new(42);
        let b = NoiseChannels::new(42);
        for dir in sample_directions(50) {
            assert_eq!(
                a.warped_fbm(dir, 3.0, 0.8, 5).to_bits(),
                b.warped_fbm(dir, 3.0, 0.8, 5).to_bits(),
                "same seed and channel key must reproduce bit-identical output"
            );
            assert_eq!(a.ridged(dir, 3.0, 5).to_bits(), b.ridged(dir, 3.0, 5).to_bits());
        }
    }

    #[test]
    fn different_seeds_decorrelate() {
        let a = NoiseChannels::new(1);
        let b = NoiseChannels::new(2);
        let dirs = sample_directions(20);
        let identical = dirs
            .iter()
            .all(|&d| a.warped_fbm(d, 3.0, 0.8, 5) == b.warped_fbm(d, 3.0, 0.8, 5));
        assert!(!identical, "different seeds should change the noise field");
    }

    #[test]
    fn warped_fbm_stays_within_amplitude() {
        let ch = NoiseChannels::new(99);
        for dir in sample_directions(200) {
            for freq in [1.5, 4.0, 9.0] {
                let v = ch.warped_fbm(dir, freq, 1.0, 6);
                assert!(
                    v.abs() <= WARPED_AMPLITUDE + 1e-9,
                    "warped sample {v} outside ±{WARPED_AMPLITUDE}"
                );
            }
        }
    }

    #[test]
    fn ridged_stays_in_unit_interval() {
        let ch = NoiseChannels::new(7);
        for dir in sample_directions(200) {
            let v = ch.ridged(dir, 3.2, 5);
            assert!((0.0..=1.0).contains(&v), "ridged sample {v} outside [0, 1]");
        }
    }

    #[test]
    fn zero_warp_matches_unwarped_octave_sum() {
        // With warp strength 0 the warp channels must not influence output:
        // the result is exactly the base-channel octave sum.
        let ch = NoiseChannels::new(5);
        let dir = Vec3::from_uv(0.3, 0.4);

        let mut sum = 0.0;
        let mut amp = 1.0;
        let mut amp_sum = 0.0;
        let mut freq = 1.0;
        for _ in 0..4 {
            sum += amp * ch.base(dir, 2.0 * freq);
            amp_sum += amp;
            amp *= PERSISTENCE;
            freq *= LACUNARITY;
        }
        let manual = sum / amp_sum * WARPED_AMPLITUDE;

        let got = ch.warped_fbm(dir, 2.0, 0.0, 4);
        assert!((got - manual).abs() < 1e-12, "zero-warp fBm {got} != octave sum {manual}");
    }

    #[test]
    fn base_noise_varies_over_the_sphere() {
        let ch = NoiseChannels::new(11);
        let dirs = sample_directions(64);
        let first = ch.base(dirs[0], 2.0);
        assert!(
            dirs.iter().any(|&d| (ch.base(d, 2.0) - first).abs() > 1e-3),
            "base channel is flat"
        );
    }

    #[test]
    fn zero_octaves_yield_neutral_output() {
        let ch = NoiseChannels::new(3);
        let dir = Vec3::from_uv(0.1, 0.6);
        assert_eq!(ch.warped_fbm(dir, 2.0, 0.5, 0), 0.0);
        assert_eq!(ch.ridged(dir, 2.0, 0), 0.0);
    }
}
