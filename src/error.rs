use thiserror::Error;

/// Errors raised by plan computation.
///
/// All variants are raised synchronously at the point of detection; no
/// function returns partial results or lets NaN/Inf leak into a plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Non-positive focal length, image dimension or sensor size.
    #[error("invalid camera parameter {name}: {value}")]
    InvalidCameraParameter { name: &'static str, value: f64 },

    /// Survey specification outside its valid domain.
    #[error("invalid dataset spec: {0}")]
    InvalidSpec(String),

    /// Geometric operation attempted outside its domain.
    #[error("geometry domain error: {0}")]
    GeometryDomain(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
