//! Deterministic procedural planet-surface engine.
//!
//! Given a seed and a handful of scalar parameters, produces an immutable
//! [`PlanetSurface`] snapshot: a dense elevation field over the sphere whose
//! land/ocean ratio matches a requested fraction, whose coarse relief comes
//! from simulated plate-boundary interactions, and whose fine detail comes
//! from layered (domain-warped and ridged) gradient noise.
//!
//! Generation is pure and synchronous; identical inputs are bit-reproducible.

pub mod calibrate;
pub mod compose;
pub mod error;
pub mod generator;
pub mod grid;
pub mod maps;
pub mod noise;
pub mod physics;
pub mod plates;
pub mod query;
pub mod rng;
pub mod sphere;

pub use error::GenError;
pub use generator::{PlanetGenerator, PlanetSurface, SurfaceParams};
pub use grid::{HeightField, PlateField};
pub use plates::{Plate, PlateKind};
pub use query::{PhysicalScales, SurfaceSample};
