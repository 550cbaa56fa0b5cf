use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FlowError {
    #[error("particle count must be greater than zero")]
    EmptyParticleCount,
    #[error("hand has {got} landmark values, expected {expected}")]
    MalformedHand { expected: usize, got: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFiniteLandmark { index: usize },
    #[error("target has {got} points, expected {expected}")]
    TargetLengthMismatch { expected: usize, got: usize },
    #[error("invalid color `{0}`")]
    InvalidColor(String),
    #[error("unknown shape `{0}`")]
    UnknownShape(String),
    #[error("unknown gradient `{0}`")]
    UnknownGradient(String),
    /// Camera or model could not be acquired; the session stays idle.
    #[error("hand detector unavailable: {0}")]
    DetectorUnavailable(String),
    /// A single detector frame failed; treated as a frame with no hands.
    #[error("hand detector error: {0}")]
    Detector(String),
}

pub type Result<T> = std::result::Result<T, FlowError>;
