use std::fmt;

/// Failure fetching or decoding incentives for one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InvalidState(String),
    Transport(String),
    Status { state: String, status: u16 },
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidState(s) => write!(f, "not a state abbreviation: {s:?}"),
            ApiError::Transport(msg) => write!(f, "request failed: {msg}"),
            ApiError::Status { state, status } => {
                write!(f, "incentives for {state} returned HTTP {status}")
            }
            ApiError::Decode(msg) => write!(f, "invalid incentives payload: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
