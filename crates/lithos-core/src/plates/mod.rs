//! Plate topology: seed-point placement, plate typing, and motion vectors.
//!
//! Plates are placed with a Fibonacci-sphere distribution plus bounded jitter,
//! so they stay roughly evenly spaced without forming a regular lattice.
//! Everything here is driven by an explicit [`SeedStream`]; plates are
//! immutable once generated.

pub mod boundary;
pub mod voronoi;

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::rng::SeedStream;
use crate::sphere::{great_circle_distance_rad, tangent_basis, Vec3};

/// Jitter amplitude as a fraction of the mean inter-seed spacing.
const JITTER_FRACTION: f64 = 0.22;
/// Minimum allowed pairwise separation, as a fraction of the mean spacing.
const MIN_SEPARATION_FRACTION: f64 = 0.30;
/// Whole-set re-jitter attempts before accepting the layout as-is.
const MAX_PLACEMENT_ATTEMPTS: usize = 8;

/// Plate speed range (dimensionless tangential units).
const SPEED_MIN: f64 = 0.4;
const SPEED_MAX: f64 = 1.0;
/// Half-span of the out-of-tangent-plane tilt, radians. Plates move mostly
/// horizontally; the radial component stays small.
const TILT_HALF_SPAN: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlateKind {
    Continental,
    Oceanic,
}

/// A tectonic plate: seed direction, type, motion vector, cosmetic age.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plate {
    pub id: u32,
    pub kind: PlateKind,
    /// Unit direction of the plate's Voronoi seed point.
    pub seed_dir: Vec3,
    /// Motion vector with a tangential bias; not necessarily unit length.
    pub motion: Vec3,
    /// Cosmetic age in [0, 1].
    pub age: f32,
}

/// Number of oceanic plates for a given count and requested ocean fraction.
/// Capped at `plate_count - 1` so at least one continental plate always
/// exists, even for a fully-ocean request.
pub fn oceanic_plate_count(plate_count: usize, ocean_fraction: f32) -> usize {
    let wanted = (plate_count as f32 * ocean_fraction).round() as usize;
    wanted.min(plate_count - 1)
}

/// Generate `plate_count` plates for the given seed.
pub fn build_plate_topology(seed: u64, plate_count: usize, ocean_fraction: f32) -> Vec<Plate> {
    let mut stream = SeedStream::new(seed);
    let seeds = place_seed_points(&mut stream, plate_count);

    let n_oceanic = oceanic_plate_count(plate_count, ocean_fraction);
    let mut plates = Vec::with_capacity(plate_count);
    for (i, &seed_dir) in seeds.iter().enumerate() {
        let kind = if i < n_oceanic { PlateKind::Oceanic } else { PlateKind::Continental };
        let motion = draw_motion(&mut stream, seed_dir);
        let age = stream.next_f64() as f32;
        plates.push(Plate { id: i as u32, kind, seed_dir, motion, age });
    }
    plates
}

/// Fibonacci-sphere placement with bounded tangential jitter.
///
/// If any pair ends up closer than the minimum separation the whole set is
/// re-jittered; with ≥3 plates and bounded jitter this triggers rarely, but a
/// numerically coincident pair would otherwise degrade the Voronoi raster.
fn place_seed_points(stream: &mut SeedStream, n: usize) -> Vec<Vec3> {
    // Mean angular spacing for n points spread over 4π steradians.
    let mean_spacing = (4.0 * PI / n as f64).sqrt();
    let jitter_rad = mean_spacing * JITTER_FRACTION;
    let min_separation = mean_spacing * MIN_SEPARATION_FRACTION;
    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());

    let mut seeds = vec![Vec3::new(0.0, 0.0, 1.0); n];
    for attempt in 0..MAX_PLACEMENT_ATTEMPTS {
        for (i, slot) in seeds.iter_mut().enumerate() {
            let z = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
            let r = (1.0 - z * z).max(0.0).sqrt();
            let phi = golden_angle * i as f64;
            let base = Vec3::new(r * phi.cos(), r * phi.sin(), z);

            let (e1, e2) = tangent_basis(base);
            let theta = stream.next_range(0.0, TAU);
            let radius = jitter_rad * stream.next_f64().sqrt();
            *slot = base
                .add(e1.scale(radius * theta.cos()))
                .add(e2.scale(radius * theta.sin()))
                .normalize();
        }

        if min_pairwise_separation(&seeds) >= min_separation || attempt == MAX_PLACEMENT_ATTEMPTS - 1 {
            break;
        }
    }
    seeds
}

fn min_pairwise_separation(seeds: &[Vec3]) -> f64 {
    let mut min = f64::INFINITY;
    for i in 0..seeds.len() {
        for j in (i + 1)..seeds.len() {
            min = min.min(great_circle_distance_rad(seeds[i], seeds[j]));
        }
    }
    min
}

/// Random motion vector at `at`: uniform azimuth in the tangent plane, small
/// radial tilt, speed drawn from a fixed range.
fn draw_motion(stream: &mut SeedStream, at: Vec3) -> Vec3 {
    let (e1, e2) = tangent_basis(at);
    let azimuth = stream.next_range(0.0, TAU);
    let tilt = stream.next_range(-TILT_HALF_SPAN, TILT_HALF_SPAN);
    let speed = stream.next_range(SPEED_MIN, SPEED_MAX);

    let tangential = e1.scale(azimuth.cos()).add(e2.scale(azimuth.sin()));
    tangential.scale(tilt.cos()).add(at.scale(tilt.sin())).scale(speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plate_count_matches_request() {
        for count in [3, 7, 15] {
            let plates = build_plate_topology(42, count, 0.6);
            assert_eq!(plates.len(), count);
            for (i, p) in plates.iter().enumerate() {
                assert_eq!(p.id as usize, i);
            }
        }
    }

    #[test]
    fn continental_floor_holds_for_full_ocean_request() {
        let plates = build_plate_topology(99999, 5, 1.0);
        let continental = plates.iter().filter(|p| p.kind == PlateKind::Continental).count();
        assert!(continental >= 1, "a fully-ocean request must still leave one continental plate");
        assert_eq!(plates.iter().filter(|p| p.kind == PlateKind::Oceanic).count(), 4);
    }

    #[test]
    fn oceanic_count_follows_rounded_fraction() {
        assert_eq!(oceanic_plate_count(4, 0.5), 2);
        assert_eq!(oceanic_plate_count(5, 0.7), 4);
        assert_eq!(oceanic_plate_count(5, 1.0), 4);
        assert_eq!(oceanic_plate_count(10, 0.0), 0);
        assert_eq!(oceanic_plate_count(3, 0.9), 2);
    }

    #[test]
    fn seed_points_are_unit_and_separated() {
        let plates = build_plate_topology(7, 12, 0.5);
        for p in &plates {
            assert!((p.seed_dir.length() - 1.0).abs() < 1e-12, "seed must stay on the unit sphere");
        }
        let seeds: Vec<Vec3> = plates.iter().map(|p| p.seed_dir).collect();
        let mean_spacing = (4.0 * PI / 12.0).sqrt();
        assert!(
            min_pairwise_separation(&seeds) > mean_spacing * 0.15,
            "jittered seeds collapsed together"
        );
    }

    #[test]
    fn motion_is_mostly_tangential() {
        let plates = build_plate_topology(1234, 10, 0.5);
        for p in &plates {
            let speed = p.motion.length();
            assert!(
                (SPEED_MIN - 1e-9..=SPEED_MAX + 1e-9).contains(&speed),
                "speed {speed} outside configured range"
            );
            let radial = p.motion.dot(p.seed_dir).abs() / speed;
            assert!(radial < TILT_HALF_SPAN.sin() + 1e-9, "radial share {radial} too large");
        }
    }

    #[test]
    fn topology_is_deterministic() {
        let a = build_plate_topology(54321, 8, 0.6);
        let b = build_plate_topology(54321, 8, 0.6);
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.kind, pb.kind);
            assert_eq!(pa.seed_dir, pb.seed_dir);
            assert_eq!(pa.motion, pb.motion);
            assert_eq!(pa.age.to_bits(), pb.age.to_bits());
        }
    }

    #[test]
    fn plates_round_trip_through_serde() {
        let plates = build_plate_topology(42, 4, 0.5);
        let json = serde_json::to_string(&plates).expect("plates must serialize");
        let back: Vec<Plate> = serde_json::from_str(&json).expect("plates must deserialize");
        assert_eq!(back.len(), plates.len());
        for (a, b) in plates.iter().zip(&back) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.seed_dir, b.seed_dir);
            assert_eq!(a.motion, b.motion);
        }
    }

    #[test]
    fn different_seeds_produce_different_layouts() {
        let a = build_plate_topology(1, 6, 0.5);
        let b = build_plate_topology(2, 6, 0.5);
        let moved = a.iter().zip(&b).any(|(pa, pb)| pa.seed_dir.dist_sq(pb.seed_dir) > 1e-6);
        assert!(moved, "seeds 1 and 2 produced identical layouts");
    }
}
