//! Tick composition and the public surface consumed by planners and
//! telemetry.
//!
//! This is the only module that reaches every other stage in one place:
//! `motor_control()` is the single function that walks the profiler, the
//! four wall loops, the feedback law, the PWM conversion and the collision
//! check in sequence. Everything below `motor_control()` itself is a thin
//! wrapper over [`state::STATE`] and [`state::with_hardware`], giving
//! planners/telemetry named calls rather than requiring callers to poke
//! `ControlState` fields directly.

use super::collision;
use super::constants::{saturation_ticks_limit, DRIVER_PWM_PERIOD, F_TICK_HZ};
use super::drive;
use super::feedback;
use super::profiler;
use super::reset;
use super::state::{with_hardware, ControlState, STATE};
use super::walls;

/// Run one control tick: the scheduler's `F_TICK`-frequency entry point.
///
/// A no-op if `motor_control_enabled` is false or no hardware is bound —
/// "disabled" silently retains the last commanded output.
pub fn motor_control() {
    if !STATE.motor_control_enabled() {
        return;
    }

    with_hardware(|hw| {
        profiler::update_ideal_linear_speed(
            &STATE,
            hw.get_linear_acceleration(),
            hw.get_linear_deceleration(),
            F_TICK_HZ,
        );

        let wall_feedback = walls::aggregate(&STATE, hw);
        let voltages = feedback::apply(&STATE, hw, &wall_feedback);
        drive::drive(&STATE, hw, &voltages, DRIVER_PWM_PERIOD);

        #[cfg(feature = "trace")]
        vexide::io::println!(
            "tick: V=({:.3},{:.3}) pwm=({},{})",
            voltages.left,
            voltages.right,
            STATE.pwm_left(),
            STATE.pwm_right()
        );

        collision::check(&STATE, hw, saturation_ticks_limit());
    });
}

// --- setpoint writes ---

pub fn set_target_linear_speed(speed: f64) {
    STATE.set_target_linear_speed(speed);
}

pub fn set_ideal_angular_speed(speed: f64) {
    STATE.set_ideal_angular_speed(speed);
}

// --- enable toggles ---

pub fn enable_motor_control() {
    STATE.set_motor_control_enabled(true);
}

pub fn disable_motor_control() {
    STATE.set_motor_control_enabled(false);
}

pub fn side_sensors_close_control(value: bool) {
    STATE.set_side_sensors_close_enabled(value);
}

pub fn side_sensors_far_control(value: bool) {
    STATE.set_side_sensors_far_enabled(value);
}

pub fn front_sensors_control(value: bool) {
    STATE.set_front_sensors_enabled(value);
}

pub fn diagonal_sensors_control(value: bool) {
    STATE.set_diagonal_sensors_enabled(value);
}

// diagonal is left untouched here, matching the reference firmware.
pub fn disable_walls_control() {
    side_sensors_close_control(false);
    side_sensors_far_control(false);
    front_sensors_control(false);
}

// --- observability ---

pub fn get_left_motor_voltage() -> f64 {
    STATE.voltage_left()
}

pub fn get_right_motor_voltage() -> f64 {
    STATE.voltage_right()
}

pub fn get_left_pwm() -> i32 {
    STATE.pwm_left()
}

pub fn get_right_pwm() -> i32 {
    STATE.pwm_right()
}

pub fn get_target_linear_speed() -> f64 {
    STATE.target_linear_speed()
}

pub fn get_ideal_linear_speed() -> f64 {
    STATE.ideal_linear_speed()
}

pub fn get_ideal_angular_speed() -> f64 {
    STATE.ideal_angular_speed()
}

// 0.0 if no hardware is bound.
pub fn get_measured_linear_speed() -> f64 {
    with_hardware(|hw| feedback::measured_linear_speed(hw)).unwrap_or(0.0)
}

pub fn get_measured_angular_speed() -> f64 {
    with_hardware(|hw| feedback::measured_angular_speed(hw)).unwrap_or(0.0)
}

pub fn collision_detected() -> bool {
    STATE.collision_detected()
}

// --- lifecycle ---

pub fn reset_control_errors() {
    reset::reset_control_errors(&STATE);
}

pub fn reset_control_speed() {
    reset::reset_control_speed(&STATE);
}

pub fn reset_collision_detection() {
    reset::reset_collision_detection(&STATE);
}

pub fn reset_control_all() {
    reset::reset_control_all(&STATE);
}

/// Disable motor control and all wall loops, power the driver off, then run
/// [`reset_control_all`]. This is the shutdown path; ordering matters.
pub fn reset_motion() {
    reset::reset_motion(&STATE);
}
