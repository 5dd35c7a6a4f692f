//! Derived-map builders: thin transformations of a finished height field for
//! downstream rendering. Normal and displacement maps feed the mesh
//! pipeline; the color map is a height-plus-latitude biome tint.
//!
//! None of this feeds back into generation.

use crate::grid::HeightField;
use crate::query::PhysicalScales;

/// Per-cell unit surface normals from central finite differences.
/// Slopes wrap across the longitude seam and clamp at the poles.
pub fn normal_map(height: &HeightField, strength: f32) -> Vec<[f32; 3]> {
    let n = height.resolution;
    let mut out = Vec::with_capacity(n * n);
    for row in 0..n {
        for col in 0..n {
            let r = row as isize;
            let c = col as isize;
            let dx = (height.get_wrapped(r, c + 1) - height.get_wrapped(r, c - 1)) * 0.5;
            let dy = (height.get_wrapped(r + 1, c) - height.get_wrapped(r - 1, c)) * 0.5;

            let nx = -dx * strength;
            let ny = -dy * strength;
            let len = (nx * nx + ny * ny + 1.0).sqrt();
            out.push([nx / len, ny / len, 1.0 / len]);
        }
    }
    out
}

/// Per-cell signed physical elevation in kilometres around sea level:
/// positive above, negative below. Render-ready displacement input.
pub fn displacement_map(
    height: &HeightField,
    sea_level: f32,
    scales: &PhysicalScales,
) -> Vec<f32> {
    let land_span = (1.0 - sea_level).max(f32::EPSILON);
    let ocean_span = sea_level.max(f32::EPSILON);
    height
        .data
        .iter()
        .map(|&h| {
            if h <= sea_level {
                -(sea_level - h) / ocean_span * scales.max_ocean_depth_km
            } else {
                (h - sea_level) / land_span * scales.max_land_elevation_km
            }
        })
        .collect()
}

/// RGBA biome tint from height plus latitude bands: deep and shallow ocean,
/// shore, lowland, highland, and a snow cap whose threshold drops toward the
/// poles.
pub fn color_map(height: &HeightField, sea_level: f32) -> Vec<[u8; 4]> {
    let n = height.resolution;
    let mut out = Vec::with_capacity(n * n);
    for row in 0..n {
        // 0 at the equator, 1 at either pole.
        let v = (row as f32 + 0.5) / n as f32;
        let polarity = (v - 0.5).abs() * 2.0;
        let snow_line = (0.94 - polarity * 0.55).max(sea_level + 0.02);

        for col in 0..n {
            let h = height.get(row, col);
            out.push(cell_color(h, sea_level, snow_line, polarity));
        }
    }
    out
}

fn cell_color(h: f32, sea_level: f32, snow_line: f32, polarity: f32) -> [u8; 4] {
    if h <= sea_level {
        let depth = if sea_level > f32::EPSILON { (sea_level - h) / sea_level } else { 0.0 };
        if depth > 0.45 {
            [12, 31, 84, 255] // abyss
        } else if depth > 0.12 {
            [24, 58, 130, 255] // open ocean
        } else {
            [52, 110, 176, 255] // shelf
        }
    } else if h >= snow_line {
        [238, 240, 244, 255]
    } else {
        let lift = (h - sea_level) / (1.0 - sea_level).max(f32::EPSILON);
        if lift < 0.06 {
            [196, 178, 128, 255] // shore sand
        } else if lift < 0.45 {
            // Lowlands: greener near the equator, duller toward the poles.
            let g = 140.0 - polarity * 45.0;
            [76, g as u8, 58, 255]
        } else {
            [128, 112, 96, 255] // bare highland rock
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::surface_scales;

    fn ramp_field(n: usize) -> HeightField {
        let mut hf = HeightField::new(n, 0.0);
        for row in 0..n {
            for col in 0..n {
                hf.set(row, col, (row * n + col) as f32 / (n * n - 1) as f32);
            }
        }
        hf
    }

    #[test]
    fn normals_are_unit_length_and_upward() {
        let hf = ramp_field(16);
        for normal in normal_map(&hf, 8.0) {
            let len = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5, "normal length {len} not unit");
            assert!(normal[2] > 0.0, "normal must point away from the surface");
        }
    }

    #[test]
    fn flat_field_has_straight_up_normals() {
        let hf = HeightField::new(8, 0.4);
        for normal in normal_map(&hf, 8.0) {
            assert!((normal[2] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn displacement_sign_follows_sea_level() {
        let hf = ramp_field(16);
        let scales = surface_scales(1.0, 3.0);
        let sea = 0.5;
        let displaced = displacement_map(&hf, sea, &scales);
        for (i, &d) in displaced.iter().enumerate() {
            let h = hf.data[i];
            if h <= sea {
                assert!(d <= 0.0, "ocean cell {i} should displace downward, got {d}");
                assert!(d >= -scales.max_ocean_depth_km - 1e-4);
            } else {
                assert!(d > 0.0, "land cell {i} should displace upward, got {d}");
                assert!(d <= scales.max_land_elevation_km + 1e-4);
            }
        }
    }

    #[test]
    fn color_map_covers_every_cell_with_opaque_pixels() {
        let hf = ramp_field(32);
        let colors = color_map(&hf, 0.5);
        assert_eq!(colors.len(), 32 * 32);
        for c in &colors {
            assert_eq!(c[3], 255);
        }
    }

    #[test]
    fn poles_snow_earlier_than_the_equator() {
        let n = 64;
        let mut hf = HeightField::new(n, 0.0);
        // Uniform mid-high land everywhere.
        for v in hf.data.iter_mut() {
            *v = 0.8;
        }
        let colors = color_map(&hf, 0.3);
        let snow = [238u8, 240, 244, 255];
        let polar = colors[n / 2]; // row 0: near the north pole
        let equatorial = colors[(n / 2) * n + n / 2];
        assert_eq!(polar, snow, "high polar terrain should be snow-capped");
        assert_ne!(equatorial, snow, "equatorial terrain at 0.8 should stay below the snow line");
    }
}
