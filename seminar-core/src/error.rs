//! Error types for the seminars client.

use thiserror::Error;

use crate::seminar::SeminarId;

/// Failures raised by a gateway call (network transport or server response).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Could not decode response: {0}")]
    Decode(String),
}

/// Result type alias for gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// A seminar whose `date` field could not be read as a calendar date.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Seminar {id} has an unreadable date '{value}'")]
pub struct DateParseError {
    pub id: SeminarId,
    pub value: String,
}

/// The state-changing calls a user can make against a seminar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Register,
    Cancel,
    Rate,
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            Mutation::Register => "register for",
            Mutation::Cancel => "cancel registration for",
            Mutation::Rate => "rate",
        };
        f.write_str(verb)
    }
}

/// Errors that can occur in seminar operations.
#[derive(Error, Debug)]
pub enum SeminarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load seminars: {0}")]
    Fetch(#[source] GatewayError),

    #[error("Failed to {action} seminar {id}: {source}")]
    Mutation {
        action: Mutation,
        id: SeminarId,
        #[source]
        source: GatewayError,
    },

    #[error("Failed to export seminar {id} to calendar: {source}")]
    Export {
        id: SeminarId,
        #[source]
        source: GatewayError,
    },

    #[error(transparent)]
    DateParse(#[from] DateParseError),

    #[error("Cannot {action} while showing {view}")]
    InvalidTransition {
        action: &'static str,
        view: &'static str,
    },

    #[error("Already registered for seminar {0}")]
    AlreadyRegistered(SeminarId),

    #[error("Seminar not found: {0}")]
    NotFound(SeminarId),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for seminar operations.
pub type SeminarResult<T> = Result<T, SeminarError>;
