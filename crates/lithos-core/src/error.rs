use thiserror::Error;

/// Parameter validation failures. Raised before any buffer is allocated;
/// a failed generation never returns a partial result.
#[derive(Debug, Error, PartialEq)]
pub enum GenError {
    #[error("plate count {0} outside supported range [3, 15]")]
    PlateCount(usize),

    #[error("map resolution must be positive")]
    Resolution,

    #[error("ocean fraction {0} outside [0, 1]")]
    OceanFraction(f32),

    #[error("gravity factor {0} must be finite and positive")]
    GravityFactor(f32),

    #[error("tectonic activity {0} outside [0, 10]")]
    TectonicActivity(f32),
}
