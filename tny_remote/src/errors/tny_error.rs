use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Every way a command issued against the TNY360 controller can fail.
///
/// None of these are retried internally; whether a command is safe to reissue
/// (calibration moves the hardware) is the caller's call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum TnyError {
    /// The driver configuration failed validation before any connection attempt.
    Configuration(String),
    /// The WebSocket connection to the controller could not be established.
    FailedToConnect(String),
    /// No connection is open; the request was never sent.
    NotConnected,
    /// The connection dropped after the request was sent and before a matching
    /// response arrived.
    ConnectionLost,
    /// Writing the request frame to the socket failed.
    FailedToSend(String),
    /// No matching response arrived within the configured timeout.
    Timeout(String),
    /// The response payload disagrees with the command's declared return types,
    /// which points at a firmware/client version skew.
    FrameMismatch(String),
    /// A byte decoded for an enumerated state is outside the known values.
    UnknownEnumValue(u8),
    /// The controller answered with a failure status byte.
    CommandRejected(String),
}

impl Error for TnyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl fmt::Display for TnyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TnyError::Configuration(ref msg) => write!(f, "Invalid driver configuration: {}", msg),
            TnyError::FailedToConnect(ref msg) => {
                write!(f, "Could not connect to the controller: {}", msg)
            }
            TnyError::NotConnected => write!(f, "Not connected to the controller"),
            TnyError::ConnectionLost => {
                write!(f, "Connection to the controller was lost while waiting for a response")
            }
            TnyError::FailedToSend(ref msg) => write!(f, "Failed to send request frame: {}", msg),
            TnyError::Timeout(ref cmd) => {
                write!(f, "Timed out waiting for the controller to answer {}", cmd)
            }
            TnyError::FrameMismatch(ref msg) => write!(f, "Response frame mismatch: {}", msg),
            TnyError::UnknownEnumValue(value) => {
                write!(f, "Controller reported unknown enum value {}", value)
            }
            TnyError::CommandRejected(ref cmd) => {
                write!(f, "Controller rejected the {} command", cmd)
            }
        }
    }
}
