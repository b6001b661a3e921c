use thiserror::Error;

/// The stroke tessellator's result type.
pub type StrokeResult<T = ()> = Result<T, StrokeError>;

/// Errors reported by the stroke tessellator.
///
/// Geometry that is skipped on purpose (degenerate segments, joins between
/// collinear segments, miters above the limit) is not an error. The only
/// failures are invalid configurations and using the tessellator before it
/// has a valid configuration.
#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum StrokeError {
    #[error("The stroke tessellator was used before being configured")]
    NotConfigured,
    #[error("Invalid line width: {0}")]
    InvalidLineWidth(f32),
    #[error("Invalid miter limit: {0} (must be a number greater than or equal to 1)")]
    InvalidMiterLimit(f32),
    #[error("The transform has coefficients that can't be represented in 16.16 fixed point")]
    InvalidTransform,
    #[error("The transform is not invertible")]
    SingularTransform,
}
