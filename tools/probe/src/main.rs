//! Surface probe — generates a planet and prints a JSON sample for a
//! lat/lon, the same query the interactive pick UI issues.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use lithos_core::physics::surface_scales;
use lithos_core::sphere::Vec3;
use lithos_core::{PlanetGenerator, SurfaceParams, SurfaceSample};

#[derive(Parser, Debug)]
#[command(name = "probe", about = "Generate a surface and sample it at a point")]
struct Args {
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of tectonic plates (3-15).
    #[arg(long, default_value_t = 7)]
    plates: usize,

    #[arg(long, default_value_t = 256)]
    resolution: usize,

    #[arg(long, default_value_t = 0.68)]
    ocean_fraction: f32,

    #[arg(long, default_value_t = 1.0)]
    gravity: f32,

    #[arg(long, default_value_t = 3.0)]
    tectonic_activity: f32,

    /// Query latitude in degrees.
    #[arg(long, default_value_t = 0.0)]
    lat: f64,

    /// Query longitude in degrees.
    #[arg(long, default_value_t = 0.0)]
    lon: f64,
}

#[derive(Serialize)]
struct ProbeReport {
    seed: u64,
    sea_level: f32,
    anomalies: u32,
    lat: f64,
    lon: f64,
    sample: SurfaceSample,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let params = SurfaceParams {
        seed: args.seed,
        plate_count: args.plates,
        resolution: args.resolution,
        ocean_fraction: args.ocean_fraction,
        gravity_factor: args.gravity,
        tectonic_activity: args.tectonic_activity,
    };

    let surface = PlanetGenerator::new().generate(&params)?;
    let scales = surface_scales(args.gravity, args.tectonic_activity);
    let sample = surface.sample_direction(Vec3::from_latlon(args.lat, args.lon), &scales);

    let report = ProbeReport {
        seed: args.seed,
        sea_level: surface.sea_level,
        anomalies: surface.anomalies,
        lat: args.lat,
        lon: args.lon,
        sample,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
