//! Diagnostic visualizer — writes four PNG debug images to data/debug/.
//! Not part of the main pipeline; pass a seed as the first argument.

use std::env;
use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};
use lithos_core::maps::color_map;
use lithos_core::{HeightField, PlanetGenerator, SurfaceParams};

/// Plate id → distinct RGB colour, hue-stepped around the wheel.
fn plate_color(id: u8, count: usize) -> [u8; 3] {
    let hue = id as f32 / count.max(1) as f32 * 360.0;
    hsv_to_rgb(hue, 0.55, 0.85)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    ]
}

/// Grayscale PNG stretched to the field's actual value range, so low-contrast
/// layers (coarse relief under strong gravity) stay readable.
fn save_gray(field: &HeightField, path: &Path) {
    let n = field.resolution;
    let lo = field.min_value();
    let span = (field.max_value() - lo).max(f32::EPSILON);
    let mut img = RgbaImage::new(n as u32, n as u32);
    for (i, &v) in field.data.iter().enumerate() {
        let g = (((v - lo) / span).clamp(0.0, 1.0) * 255.0) as u8;
        img.put_pixel((i % n) as u32, (i / n) as u32, Rgba([g, g, g, 255]));
    }
    img.save(path).expect("failed to write debug image");
    println!("wrote {}", path.display());
}

fn main() {
    let seed: u64 = env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let params = SurfaceParams { seed, ..SurfaceParams::default() };

    println!("Generating surface (seed {seed}, {0}×{0})…", params.resolution);
    let surface = PlanetGenerator::new().generate(&params).expect("default parameters are valid");
    println!(
        "sea level {:.4}, {} anomalies",
        surface.sea_level, surface.anomalies
    );

    let out_dir = Path::new("data/debug");
    fs::create_dir_all(out_dir).expect("failed to create data/debug");
    let n = params.resolution;

    // 1. Plate raster.
    let mut plates_img = RgbaImage::new(n as u32, n as u32);
    for (i, &id) in surface.plate_field.ids.iter().enumerate() {
        let [r, g, b] = plate_color(id, surface.plates.len());
        plates_img.put_pixel((i % n) as u32, (i / n) as u32, Rgba([r, g, b, 255]));
    }
    let path = out_dir.join("plates.png");
    plates_img.save(&path).expect("failed to write plates.png");
    println!("wrote {}", path.display());

    // 2. Coarse tectonic relief.
    save_gray(&surface.coarse, &out_dir.join("coarse.png"));

    // 3. Final height field.
    save_gray(&surface.height, &out_dir.join("height.png"));

    // 4. Biome colour map.
    let colors = color_map(&surface.height, surface.sea_level);
    let mut color_img = RgbaImage::new(n as u32, n as u32);
    for (i, c) in colors.iter().enumerate() {
        color_img.put_pixel((i % n) as u32, (i / n) as u32, Rgba(*c));
    }
    let path = out_dir.join("color.png");
    color_img.save(&path).expect("failed to write color.png");
    println!("wrote {}", path.display());
}
