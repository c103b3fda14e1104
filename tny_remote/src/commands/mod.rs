//! The fixed command table of the TNY360 control protocol.
//!
//! Every operation the controller understands is one immutable descriptor:
//! a single-byte command id plus the ordered argument and return wire types.
//! The table is versioned by firmware build, never negotiated at runtime.

use crate::wire::WireType::{self, Bool, Byte, Float, Int};

/// Immutable descriptor of one protocol operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: u8,
    pub name: &'static str,
    pub args: &'static [WireType],
    pub returns: &'static [WireType],
}

// 0x0X — calibration and liveness.

/// 0x00 replies with an empty payload; the ack status byte is the liveness answer.
pub const PING: CommandSpec = CommandSpec {
    id: 0x00,
    name: "ping",
    args: &[],
    returns: &[],
};

pub const CALIBRATE_BODY: CommandSpec = CommandSpec {
    id: 0x01,
    name: "calibrateBody",
    args: &[],
    returns: &[],
};

pub const CALIBRATE_JOINT: CommandSpec = CommandSpec {
    id: 0x02,
    name: "calibrateJoint",
    args: &[Byte],
    returns: &[],
};

pub const DECLARE_JOINT_MINIMUM: CommandSpec = CommandSpec {
    id: 0x03,
    name: "declareJointMinimum",
    args: &[Byte],
    returns: &[],
};

pub const DECLARE_JOINT_MAXIMUM: CommandSpec = CommandSpec {
    id: 0x04,
    name: "declareJointMaximum",
    args: &[Byte],
    returns: &[],
};

pub const SET_JOINT_CALIBRATION_STATE: CommandSpec = CommandSpec {
    id: 0x05,
    name: "setJointCalibrationState",
    args: &[Byte, Byte],
    returns: &[],
};

// 0x2X — reads.

pub const GET_JOINT_STATE: CommandSpec = CommandSpec {
    id: 0x20,
    name: "getJointState",
    args: &[Byte],
    returns: &[Bool],
};

pub const GET_JOINT_TARGET: CommandSpec = CommandSpec {
    id: 0x21,
    name: "getJointTarget",
    args: &[Byte],
    returns: &[Float],
};

pub const GET_JOINT_POSITION: CommandSpec = CommandSpec {
    id: 0x22,
    name: "getJointPosition",
    args: &[Byte],
    returns: &[Float],
};

pub const GET_JOINT_FEEDBACK: CommandSpec = CommandSpec {
    id: 0x23,
    name: "getJointFeedback",
    args: &[Byte],
    returns: &[Float],
};

pub const GET_JOINT_PREDICTION: CommandSpec = CommandSpec {
    id: 0x24,
    name: "getJointPrediction",
    args: &[Byte],
    returns: &[Float],
};

pub const GET_CALIBRATION_STATE: CommandSpec = CommandSpec {
    id: 0x25,
    name: "getCalibrationState",
    args: &[Byte],
    returns: &[Byte],
};

pub const GET_CALIBRATION_PROGRESS: CommandSpec = CommandSpec {
    id: 0x26,
    name: "getCalibrationProgress",
    args: &[Byte],
    returns: &[Float],
};

pub const GET_ALL_JOINT_ANGLES: CommandSpec = CommandSpec {
    id: 0x27,
    name: "getAllJointAngles",
    args: &[],
    returns: &[
        Float, Float, Float, Float, Float, Float, Float, Float, Float, Float, Float, Float,
    ],
};

pub const GET_BODY_ORIENTATION: CommandSpec = CommandSpec {
    id: 0x28,
    name: "getBodyOrientation",
    args: &[],
    returns: &[Float, Float, Float, Float],
};

pub const GET_JOINT_PWM: CommandSpec = CommandSpec {
    id: 0x29,
    name: "getJointPWM",
    args: &[Byte],
    returns: &[Int],
};

pub const GET_JOINT_VOLTAGE: CommandSpec = CommandSpec {
    id: 0x2A,
    name: "getJointVoltage",
    args: &[Byte],
    returns: &[Int],
};

// 0x6X — writes.

pub const SET_JOINT_STATE: CommandSpec = CommandSpec {
    id: 0x60,
    name: "setJointState",
    args: &[Byte, Bool],
    returns: &[],
};

pub const SET_JOINT_TARGET: CommandSpec = CommandSpec {
    id: 0x61,
    name: "setJointTarget",
    args: &[Byte, Float],
    returns: &[],
};

pub const SET_JOINT_TARGET_TIMED: CommandSpec = CommandSpec {
    id: 0x62,
    name: "setJointTargetTimed",
    args: &[Byte, Float, Float],
    returns: &[],
};

pub const SET_LEG_TARGET: CommandSpec = CommandSpec {
    id: 0x63,
    name: "setLegTarget",
    args: &[Byte, Float, Float, Float],
    returns: &[],
};

pub const SET_LEG_TARGET_TIMED: CommandSpec = CommandSpec {
    id: 0x64,
    name: "setLegTargetTimed",
    args: &[Byte, Float, Float, Float, Float],
    returns: &[],
};

pub const SET_BODY_POSTURE: CommandSpec = CommandSpec {
    id: 0x65,
    name: "setBodyPosture",
    args: &[Float, Float, Float, Float, Float, Float],
    returns: &[],
};

pub const SET_FEET_POSITION: CommandSpec = CommandSpec {
    id: 0x66,
    name: "setFeetPosition",
    args: &[Byte, Float, Float, Float],
    returns: &[],
};

pub const SET_JOINT_PWM: CommandSpec = CommandSpec {
    id: 0x67,
    name: "setJointPWM",
    args: &[Byte, Int],
    returns: &[],
};

/// Every command in the table, in id order.
pub const ALL_COMMANDS: &[CommandSpec] = &[
    PING,
    CALIBRATE_BODY,
    CALIBRATE_JOINT,
    DECLARE_JOINT_MINIMUM,
    DECLARE_JOINT_MAXIMUM,
    SET_JOINT_CALIBRATION_STATE,
    GET_JOINT_STATE,
    GET_JOINT_TARGET,
    GET_JOINT_POSITION,
    GET_JOINT_FEEDBACK,
    GET_JOINT_PREDICTION,
    GET_CALIBRATION_STATE,
    GET_CALIBRATION_PROGRESS,
    GET_ALL_JOINT_ANGLES,
    GET_BODY_ORIENTATION,
    GET_JOINT_PWM,
    GET_JOINT_VOLTAGE,
    SET_JOINT_STATE,
    SET_JOINT_TARGET,
    SET_JOINT_TARGET_TIMED,
    SET_LEG_TARGET,
    SET_LEG_TARGET_TIMED,
    SET_BODY_POSTURE,
    SET_FEET_POSITION,
    SET_JOINT_PWM,
];
