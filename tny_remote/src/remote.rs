use std::f32::consts::PI;

use crate::commands::{
    CALIBRATE_BODY, CALIBRATE_JOINT, DECLARE_JOINT_MAXIMUM, DECLARE_JOINT_MINIMUM,
    GET_ALL_JOINT_ANGLES, GET_BODY_ORIENTATION, GET_CALIBRATION_PROGRESS, GET_CALIBRATION_STATE,
    GET_JOINT_FEEDBACK, GET_JOINT_POSITION, GET_JOINT_PREDICTION, GET_JOINT_PWM, GET_JOINT_STATE,
    GET_JOINT_TARGET, GET_JOINT_VOLTAGE, PING, SET_BODY_POSTURE, SET_FEET_POSITION,
    SET_JOINT_CALIBRATION_STATE, SET_JOINT_PWM, SET_JOINT_STATE, SET_JOINT_TARGET,
    SET_JOINT_TARGET_TIMED, SET_LEG_TARGET, SET_LEG_TARGET_TIMED,
};
use crate::drivers::TnyDriver;
use crate::errors::TnyError;
use crate::wire::WireValue;
use crate::{BodyOrientation, CalibrationState, JOINT_COUNT};

fn deg_to_rad(deg: f32) -> f32 {
    deg * PI / 180.0
}

fn rad_to_deg(rad: f32) -> f32 {
    rad * 180.0 / PI
}

// The controller works in millimeters, the operator surface in centimeters.
const CM_TO_MM: f32 = 10.0;

fn single_bool(values: &[WireValue]) -> Result<bool, TnyError> {
    match values {
        [WireValue::Bool(v)] => Ok(*v),
        _ => Err(TnyError::FrameMismatch("expected a single BOOL".to_string())),
    }
}

fn single_byte(values: &[WireValue]) -> Result<u8, TnyError> {
    match values {
        [WireValue::Byte(v)] => Ok(*v),
        _ => Err(TnyError::FrameMismatch("expected a single BYTE".to_string())),
    }
}

fn single_int(values: &[WireValue]) -> Result<i32, TnyError> {
    match values {
        [WireValue::Int(v)] => Ok(*v),
        _ => Err(TnyError::FrameMismatch("expected a single INT".to_string())),
    }
}

fn single_float(values: &[WireValue]) -> Result<f32, TnyError> {
    match values {
        [WireValue::Float(v)] => Ok(*v),
        _ => Err(TnyError::FrameMismatch("expected a single FLOAT".to_string())),
    }
}

/// The typed, human-named operations of the TNY360.
///
/// Each method wraps exactly one command: convert operator units to protocol
/// units (degrees to radians, centimeters to millimeters), issue the command
/// through the driver, convert the result back. Joint indices run 0 to 11 and
/// leg indices 0 to 3; the client does not range-check them — an out-of-range
/// index comes back from the firmware as `CommandRejected`.
#[derive(Debug, Clone)]
pub struct Tny360Remote {
    driver: TnyDriver,
}

impl Tny360Remote {
    pub fn new(driver: TnyDriver) -> Self {
        Self { driver }
    }

    /// Access to the underlying driver, e.g. for `disconnect`.
    pub fn driver(&self) -> &TnyDriver {
        &self.driver
    }

    /// Liveness check. The controller answers with a bare ack.
    pub async fn ping(&self) -> Result<bool, TnyError> {
        self.driver.send_command(&PING, &[]).await?;
        Ok(true)
    }

    /// Runs the full-body calibration routine.
    pub async fn calibrate_body(&self) -> Result<(), TnyError> {
        self.driver.send_command(&CALIBRATE_BODY, &[]).await.map(|_| ())
    }

    /// Runs the calibration routine for one joint. Not idempotent: the joint
    /// physically moves, so retrying is an operator decision.
    pub async fn calibrate_joint(&self, joint: u8) -> Result<(), TnyError> {
        self.driver
            .send_command(&CALIBRATE_JOINT, &[WireValue::Byte(joint)])
            .await
            .map(|_| ())
    }

    /// Records the joint's current position as its range minimum.
    pub async fn declare_joint_minimum(&self, joint: u8) -> Result<(), TnyError> {
        self.driver
            .send_command(&DECLARE_JOINT_MINIMUM, &[WireValue::Byte(joint)])
            .await
            .map(|_| ())
    }

    /// Records the joint's current position as its range maximum.
    pub async fn declare_joint_maximum(&self, joint: u8) -> Result<(), TnyError> {
        self.driver
            .send_command(&DECLARE_JOINT_MAXIMUM, &[WireValue::Byte(joint)])
            .await
            .map(|_| ())
    }

    pub async fn set_joint_calibration_state(
        &self,
        joint: u8,
        state: CalibrationState,
    ) -> Result<(), TnyError> {
        self.driver
            .send_command(
                &SET_JOINT_CALIBRATION_STATE,
                &[WireValue::Byte(joint), WireValue::Byte(state.into())],
            )
            .await
            .map(|_| ())
    }

    /// Whether the joint's motor output is enabled.
    pub async fn get_joint_state(&self, joint: u8) -> Result<bool, TnyError> {
        let values = self
            .driver
            .send_command(&GET_JOINT_STATE, &[WireValue::Byte(joint)])
            .await?;
        single_bool(&values)
    }

    /// Commanded target angle of the joint, in degrees.
    pub async fn get_joint_target(&self, joint: u8) -> Result<f32, TnyError> {
        let values = self
            .driver
            .send_command(&GET_JOINT_TARGET, &[WireValue::Byte(joint)])
            .await?;
        Ok(rad_to_deg(single_float(&values)?))
    }

    /// Current estimated angle of the joint, in degrees.
    pub async fn get_joint_position(&self, joint: u8) -> Result<f32, TnyError> {
        let values = self
            .driver
            .send_command(&GET_JOINT_POSITION, &[WireValue::Byte(joint)])
            .await?;
        Ok(rad_to_deg(single_float(&values)?))
    }

    /// Raw feedback angle of the joint's position sensor, in degrees.
    pub async fn get_joint_feedback(&self, joint: u8) -> Result<f32, TnyError> {
        let values = self
            .driver
            .send_command(&GET_JOINT_FEEDBACK, &[WireValue::Byte(joint)])
            .await?;
        Ok(rad_to_deg(single_float(&values)?))
    }

    /// Predicted angle from the controller's motion model, in degrees.
    pub async fn get_joint_prediction(&self, joint: u8) -> Result<f32, TnyError> {
        let values = self
            .driver
            .send_command(&GET_JOINT_PREDICTION, &[WireValue::Byte(joint)])
            .await?;
        Ok(rad_to_deg(single_float(&values)?))
    }

    pub async fn get_calibration_state(&self, joint: u8) -> Result<CalibrationState, TnyError> {
        let values = self
            .driver
            .send_command(&GET_CALIBRATION_STATE, &[WireValue::Byte(joint)])
            .await?;
        let code = single_byte(&values)?;
        CalibrationState::try_from(code).map_err(|_| TnyError::UnknownEnumValue(code))
    }

    /// Progress of a running joint calibration, 0.0 to 1.0.
    pub async fn get_calibration_progress(&self, joint: u8) -> Result<f32, TnyError> {
        let values = self
            .driver
            .send_command(&GET_CALIBRATION_PROGRESS, &[WireValue::Byte(joint)])
            .await?;
        single_float(&values)
    }

    /// Current angles of all twelve joints, in degrees, in joint-index order.
    pub async fn get_all_joint_angles(&self) -> Result<[f32; JOINT_COUNT], TnyError> {
        let values = self.driver.send_command(&GET_ALL_JOINT_ANGLES, &[]).await?;
        let mut angles = [0.0f32; JOINT_COUNT];
        for (slot, value) in angles.iter_mut().zip(values.iter()) {
            match value {
                WireValue::Float(rad) => *slot = rad_to_deg(*rad),
                _ => {
                    return Err(TnyError::FrameMismatch(
                        "expected FLOAT joint angles".to_string(),
                    ))
                }
            }
        }
        Ok(angles)
    }

    /// Attitude quaternion of the body, straight from the IMU.
    pub async fn get_body_orientation(&self) -> Result<BodyOrientation, TnyError> {
        let values = self.driver.send_command(&GET_BODY_ORIENTATION, &[]).await?;
        match values.as_slice() {
            [WireValue::Float(x), WireValue::Float(y), WireValue::Float(z), WireValue::Float(w)] => {
                Ok(BodyOrientation {
                    x: *x,
                    y: *y,
                    z: *z,
                    w: *w,
                })
            }
            _ => Err(TnyError::FrameMismatch(
                "expected four FLOAT quaternion components".to_string(),
            )),
        }
    }

    /// Current PWM duty applied to the joint's motor.
    pub async fn get_joint_pwm(&self, joint: u8) -> Result<i32, TnyError> {
        let values = self
            .driver
            .send_command(&GET_JOINT_PWM, &[WireValue::Byte(joint)])
            .await?;
        single_int(&values)
    }

    /// Supply voltage measured at the joint's motor driver, in millivolts.
    pub async fn get_joint_voltage(&self, joint: u8) -> Result<i32, TnyError> {
        let values = self
            .driver
            .send_command(&GET_JOINT_VOLTAGE, &[WireValue::Byte(joint)])
            .await?;
        single_int(&values)
    }

    /// Enables or disables the joint's motor output.
    pub async fn set_joint_state(&self, joint: u8, enabled: bool) -> Result<(), TnyError> {
        self.driver
            .send_command(
                &SET_JOINT_STATE,
                &[WireValue::Byte(joint), WireValue::Bool(enabled)],
            )
            .await
            .map(|_| ())
    }

    /// Sets the joint's target angle, in degrees.
    pub async fn set_joint_target(&self, joint: u8, angle_deg: f32) -> Result<(), TnyError> {
        self.driver
            .send_command(
                &SET_JOINT_TARGET,
                &[WireValue::Byte(joint), WireValue::Float(deg_to_rad(angle_deg))],
            )
            .await
            .map(|_| ())
    }

    /// Sets the joint's target angle (degrees) to be reached over `seconds`.
    pub async fn set_joint_target_timed(
        &self,
        joint: u8,
        angle_deg: f32,
        seconds: f32,
    ) -> Result<(), TnyError> {
        self.driver
            .send_command(
                &SET_JOINT_TARGET_TIMED,
                &[
                    WireValue::Byte(joint),
                    WireValue::Float(deg_to_rad(angle_deg)),
                    WireValue::Float(seconds),
                ],
            )
            .await
            .map(|_| ())
    }

    /// Moves one leg's foot to a position in the leg frame, in centimeters.
    pub async fn set_leg_target(
        &self,
        leg: u8,
        x_cm: f32,
        y_cm: f32,
        z_cm: f32,
    ) -> Result<(), TnyError> {
        self.driver
            .send_command(
                &SET_LEG_TARGET,
                &[
                    WireValue::Byte(leg),
                    WireValue::Float(x_cm * CM_TO_MM),
                    WireValue::Float(y_cm * CM_TO_MM),
                    WireValue::Float(z_cm * CM_TO_MM),
                ],
            )
            .await
            .map(|_| ())
    }

    /// Like [`set_leg_target`](Self::set_leg_target), reached over `seconds`.
    pub async fn set_leg_target_timed(
        &self,
        leg: u8,
        x_cm: f32,
        y_cm: f32,
        z_cm: f32,
        seconds: f32,
    ) -> Result<(), TnyError> {
        self.driver
            .send_command(
                &SET_LEG_TARGET_TIMED,
                &[
                    WireValue::Byte(leg),
                    WireValue::Float(x_cm * CM_TO_MM),
                    WireValue::Float(y_cm * CM_TO_MM),
                    WireValue::Float(z_cm * CM_TO_MM),
                    WireValue::Float(seconds),
                ],
            )
            .await
            .map(|_| ())
    }

    /// Sets the body posture: rotation in degrees, position in centimeters.
    /// On the wire the position goes first, in millimeters, then the rotation
    /// in radians.
    pub async fn set_body_posture(
        &self,
        rot_x_deg: f32,
        rot_y_deg: f32,
        rot_z_deg: f32,
        pos_x_cm: f32,
        pos_y_cm: f32,
        pos_z_cm: f32,
    ) -> Result<(), TnyError> {
        self.driver
            .send_command(
                &SET_BODY_POSTURE,
                &[
                    WireValue::Float(pos_x_cm * CM_TO_MM),
                    WireValue::Float(pos_y_cm * CM_TO_MM),
                    WireValue::Float(pos_z_cm * CM_TO_MM),
                    WireValue::Float(deg_to_rad(rot_x_deg)),
                    WireValue::Float(deg_to_rad(rot_y_deg)),
                    WireValue::Float(deg_to_rad(rot_z_deg)),
                ],
            )
            .await
            .map(|_| ())
    }

    /// Places one foot at a position in the body frame, in centimeters.
    pub async fn set_feet_position(
        &self,
        leg: u8,
        x_cm: f32,
        y_cm: f32,
        z_cm: f32,
    ) -> Result<(), TnyError> {
        self.driver
            .send_command(
                &SET_FEET_POSITION,
                &[
                    WireValue::Byte(leg),
                    WireValue::Float(x_cm * CM_TO_MM),
                    WireValue::Float(y_cm * CM_TO_MM),
                    WireValue::Float(z_cm * CM_TO_MM),
                ],
            )
            .await
            .map(|_| ())
    }

    /// Drives the joint's motor with a raw PWM duty, bypassing the position
    /// controller.
    pub async fn set_joint_pwm(&self, joint: u8, pwm: i32) -> Result<(), TnyError> {
        self.driver
            .send_command(&SET_JOINT_PWM, &[WireValue::Byte(joint), WireValue::Int(pwm)])
            .await
            .map(|_| ())
    }
}
