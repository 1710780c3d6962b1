use crate::vecmath::Vec2;

/// Domain error kinds for the simulation core.
///
/// All of these are recoverable at the call site; spawn and setter failures
/// never partially mutate the simulation, and a failed `step()` leaves the
/// previous tick's state fully intact.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("body mass must be positive, got {0}")]
    InvalidMass(f64),
    #[error("a body tagged '{0}' already exists")]
    DuplicateTag(String),
    #[error("body '{0}' is the anchor and cannot be removed")]
    AnchorRemoval(String),
    #[error("an anchor body ('{0}') is already present")]
    AnchorAlreadyExists(String),
    #[error("bodies '{0}' and '{1}' are coincident at {2:?}; force direction is undefined")]
    DegenerateSeparation(String, String, Vec2),
    #[error("invalid orbital elements: {0}")]
    InvalidOrbitalElements(String),
    #[error("division by zero in vector arithmetic")]
    DivideByZero,
    #[error("no body tagged '{0}'")]
    UnknownTag(String),
    #[error("zoom factor must be positive, got {0}")]
    InvalidZoom(f64),
    #[error("tick interval must be positive")]
    InvalidTickInterval,
}

pub type SimResult<T> = Result<T, SimError>;
