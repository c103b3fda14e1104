use int_enum::IntEnum;
use serde::{Deserialize, Serialize};

pub mod commands;
#[cfg(feature = "driver")]
pub mod drivers;
pub mod errors;
pub mod packets;
pub mod wire;

#[cfg(feature = "driver")]
mod remote;

pub use errors::*;
#[cfg(feature = "driver")]
pub use remote::Tny360Remote;

/// Number of leg joints on the TNY360: four legs with three joints each.
pub const JOINT_COUNT: usize = 12;

/// Number of legs on the TNY360.
pub const LEG_COUNT: usize = 4;

/// Calibration lifecycle of a single joint as reported by the controller.
///
/// Any other wire value is a protocol skew and decodes to
/// [`TnyError::UnknownEnumValue`](crate::errors::TnyError::UnknownEnumValue).
#[repr(u8)]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, IntEnum)]
pub enum CalibrationState {
    Uncalibrated = 0,
    Calibrating = 1,
    Calibrated = 2,
}

/// Attitude quaternion reported by the controller's IMU.
///
/// Components are unitless quaternion terms and are passed through as the
/// controller reports them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BodyOrientation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}
