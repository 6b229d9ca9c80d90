//! Error types for checked composition

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Role of a sample in the composition formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Foreground,
    Alpha,
    Background,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Foreground => write!(f, "foreground"),
            Channel::Alpha => write!(f, "alpha"),
            Channel::Background => write!(f, "background"),
        }
    }
}

/// Error when a sample handed to [`compose_checked`](super::compose_checked)
/// does not fit in 8 bits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("{channel} sample {value} is outside the 8-bit range 0-255")]
    OutOfRange { channel: Channel, value: u32 },
}
