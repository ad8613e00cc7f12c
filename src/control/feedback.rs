//! PD/PI feedback law and voltage split.
//!
//! PD on the running-sum linear/angular speed errors (so effectively PI on
//! the instantaneous speed errors, with an implicit integrator arising from
//! the summation itself), plus straight P+I on each wall loop's sensor
//! error. This mixed structure is deliberate: it is not a generic reusable
//! windup-aware PID controller, since the running-sum error terms only ever
//! get reset by [`super::reset::reset_control_errors`], never decayed.

use super::collaborators::HardwareIo;
use super::state::ControlState;
use super::walls::WallFeedback;

/// Mean of the left/right encoder speeds.
#[inline]
pub fn measured_linear_speed(hw: &dyn HardwareIo) -> f64 {
    (hw.get_encoder_left_speed() + hw.get_encoder_right_speed()) / 2.0
}

/// Negated z-axis gyro rate — the hardware's sign convention.
#[inline]
pub fn measured_angular_speed(hw: &dyn HardwareIo) -> f64 {
    -hw.get_gyro_z_radps()
}

/// The per-motor voltages the feedback law commands this tick.
pub struct Voltages {
    pub left: f64,
    pub right: f64,
}

/// Run the feedback law for one tick: update the running error sums, apply
/// PD on them plus P+I on the wall loops, and split into left/right motor
/// voltages. Updates `state`'s error, integral-read and voltage fields.
pub fn apply(state: &ControlState, hw: &dyn HardwareIo, walls: &WallFeedback) -> Voltages {
    let constants = hw.get_control_constants();

    let v_lin_measured = measured_linear_speed(hw);
    let w_measured = measured_angular_speed(hw);

    let e_l = state.linear_error() + (state.ideal_linear_speed() - v_lin_measured);
    state.set_linear_error(e_l);

    let e_a = state.angular_error() + (state.ideal_angular_speed() - w_measured);
    state.set_angular_error(e_a);

    let linear_voltage = constants.kp_linear * e_l + constants.kd_linear * (e_l - state.last_linear_error());
    let angular_voltage = constants.kp_angular * e_a
        + constants.kd_angular * (e_a - state.last_angular_error())
        + constants.kp_angular_side * walls.side
        + constants.ki_angular_side * state.side_sensors_integral()
        + constants.kp_angular_front * walls.front
        + constants.ki_angular_front * state.front_sensors_integral()
        + constants.kp_angular_diagonal * walls.diagonal
        + constants.ki_angular_diagonal * state.diagonal_sensors_integral();

    state.set_last_linear_error(e_l);
    state.set_last_angular_error(e_a);

    let left = linear_voltage + angular_voltage;
    let right = linear_voltage - angular_voltage;
    state.set_voltage_left(left);
    state.set_voltage_right(right);

    Voltages { left, right }
}
