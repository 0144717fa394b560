//! Error types for bondtrack-ck
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation. All flow errors are user-recoverable: the UI surfaces them
//! inline and every retry is user-initiated.

use thiserror::Error;
use uuid::Uuid;

use crate::verify::VerificationError;

/// Main error type for the check-in service
#[derive(Error, Debug)]
pub enum CkError {
    /// Geolocation capability absent on the device
    #[error("Location capability unavailable")]
    LocationUnavailable,

    /// User declined the platform permission prompt
    #[error("Location permission denied")]
    LocationDenied,

    /// No position fix within the bounded wait
    #[error("Timed out waiting for a location fix")]
    LocationTimeout,

    /// Coordinates out of range or not finite
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// User has not supplied an image yet (cancelled picker, empty input)
    #[error("No image selected")]
    NoImageSelected,

    /// Supplied payload is not a usable encoded image
    #[error("Invalid photo payload: {0}")]
    InvalidPhoto(String),

    /// Submission attempted before both location and photo were present
    #[error("Check-in attempt incomplete: {0}")]
    Incomplete(&'static str),

    /// Submission attempted while a verification call is in flight
    #[error("Verification already in flight for this attempt")]
    VerificationInFlight,

    /// Submission attempted on an attempt that already produced a record
    #[error("Attempt already submitted")]
    AlreadySubmitted,

    /// Unknown client reference
    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    /// Verification backend failed (distinct from a negative match)
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// Record rejected by the store (required field missing)
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Convenience Result type using the check-in service error
pub type Result<T> = std::result::Result<T, CkError>;

impl CkError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::LocationUnavailable => "LOCATION_UNAVAILABLE",
            Self::LocationDenied => "LOCATION_DENIED",
            Self::LocationTimeout => "LOCATION_TIMEOUT",
            Self::InvalidLocation(_) => "INVALID_LOCATION",
            Self::NoImageSelected => "NO_IMAGE_SELECTED",
            Self::InvalidPhoto(_) => "INVALID_PHOTO",
            Self::Incomplete(_) => "INCOMPLETE_ATTEMPT",
            Self::VerificationInFlight => "VERIFICATION_IN_FLIGHT",
            Self::AlreadySubmitted => "ALREADY_SUBMITTED",
            Self::ClientNotFound(_) => "CLIENT_NOT_FOUND",
            Self::Verification(_) => "VERIFICATION_SERVICE_ERROR",
            Self::InvalidRecord(_) => "INVALID_RECORD",
        }
    }
}
