//! External collaborator contracts.
//!
//! The control core never touches hardware directly. Everything it reads or
//! writes crosses this trait rather than a raw peripheral handle.

/// Snapshot of the tunable control-constants provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlConstants {
    pub kp_linear: f64,
    pub kd_linear: f64,
    pub kp_angular: f64,
    pub kd_angular: f64,
    pub kp_angular_side: f64,
    pub ki_angular_side: f64,
    pub kp_angular_front: f64,
    pub ki_angular_front: f64,
    pub kp_angular_diagonal: f64,
    pub ki_angular_diagonal: f64,
}

/// Every external collaborator the periodic tick depends on: odometry
/// front-ends, the motor-driver peripheral, the tunable constants provider
/// and the trajectory planner's profile limits.
///
/// Implementors are registered once via
/// [`crate::control::state::bind_hardware`] and are then driven exclusively
/// from the tick context.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait HardwareIo {
    /// Latest left wheel speed, m/s, signed.
    fn get_encoder_left_speed(&self) -> f64;
    /// Latest right wheel speed, m/s, signed.
    fn get_encoder_right_speed(&self) -> f64;
    /// Latest yaw rate about the vertical axis, rad/s.
    fn get_gyro_z_radps(&self) -> f64;

    /// Signed geometric error from the close side-wall sensors.
    fn get_side_sensors_close_error(&self) -> f64;
    /// Signed geometric error from the far side-wall sensors.
    fn get_side_sensors_far_error(&self) -> f64;
    /// Signed geometric error from the front-wall sensors.
    fn get_front_sensors_error(&self) -> f64;
    /// Signed geometric error from the diagonal-wall sensors.
    fn get_diagonal_sensors_error(&self) -> f64;

    /// Current motor driver supply voltage, V.
    fn get_motor_driver_input_voltage(&self) -> f64;
    /// Snapshot of the tunable control constants.
    fn get_control_constants(&self) -> ControlConstants;
    /// Planner-set linear acceleration limit, m/s^2.
    fn get_linear_acceleration(&self) -> f64;
    /// Planner-set linear deceleration limit, m/s^2.
    fn get_linear_deceleration(&self) -> f64;

    /// Command a signed PWM duty on the left motor.
    fn power_left(&mut self, pwm: i32);
    /// Command a signed PWM duty on the right motor.
    fn power_right(&mut self, pwm: i32);
    /// Ticks since the last reset that any motor's PWM was clamped.
    fn motor_driver_saturation(&self) -> u32;
    /// Clear the saturation counter.
    fn reset_motor_driver_saturation(&mut self);
    /// Disable PWM output entirely.
    fn drive_off(&mut self);
}
