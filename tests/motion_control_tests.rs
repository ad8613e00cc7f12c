//! Property and scenario tests for the motion control core.
//!
//! `control::state::STATE` and the bound hardware slot are process-wide
//! statics — one physical robot, one instance — so every test here
//! serializes on `LOCK` before touching them, the same way `control::tick`'s
//! own inline unit tests do.

use std::sync::Mutex;

use approx::assert_relative_eq;
use micromouse_motion::control::collaborators::{ControlConstants, MockHardwareIo};
use micromouse_motion::control::profiler::step_ideal_linear_speed;
use micromouse_motion::control::state::{bind_hardware, unbind_hardware, STATE};
use micromouse_motion::control::tick::{
    collision_detected, disable_motor_control, diagonal_sensors_control, enable_motor_control,
    front_sensors_control, get_ideal_linear_speed, reset_collision_detection, reset_control_all,
    reset_control_errors, reset_motion, set_target_linear_speed, side_sensors_close_control,
    side_sensors_far_control,
};
use micromouse_motion::control::{drive, feedback, motor_control, walls};

static LOCK: Mutex<()> = Mutex::new(());

fn zero_constants() -> ControlConstants {
    ControlConstants {
        kp_linear: 0.0,
        kd_linear: 0.0,
        kp_angular: 0.0,
        kd_angular: 0.0,
        kp_angular_side: 0.0,
        ki_angular_side: 0.0,
        kp_angular_front: 0.0,
        ki_angular_front: 0.0,
        kp_angular_diagonal: 0.0,
        ki_angular_diagonal: 0.0,
    }
}

/// Reset every field of the process-wide state and unbind any hardware left
/// over from a previous test, independent of test execution order.
fn reset_everything() {
    unbind_hardware();
    disable_motor_control();
    side_sensors_close_control(false);
    side_sensors_far_control(false);
    front_sensors_control(false);
    diagonal_sensors_control(false);
    reset_control_all();
}

/// A mock that answers every `HardwareIo` getter with a constant and accepts
/// any number of `power_left`/`power_right` calls — the baseline for tests
/// that only care about one field's evolution.
fn inert_mock(
    accel: f64,
    decel: f64,
    constants: ControlConstants,
    encoder_left: f64,
    encoder_right: f64,
    gyro: f64,
    supply_voltage: f64,
    saturation: u32,
) -> MockHardwareIo {
    let mut hw = MockHardwareIo::new();
    hw.expect_get_linear_acceleration().return_const(accel);
    hw.expect_get_linear_deceleration().return_const(decel);
    hw.expect_get_control_constants().return_const(constants);
    hw.expect_get_encoder_left_speed().return_const(encoder_left);
    hw.expect_get_encoder_right_speed().return_const(encoder_right);
    hw.expect_get_gyro_z_radps().return_const(gyro);
    hw.expect_get_motor_driver_input_voltage().return_const(supply_voltage);
    hw.expect_power_left().return_const(());
    hw.expect_power_right().return_const(());
    hw.expect_motor_driver_saturation().return_const(saturation);
    hw.expect_reset_motor_driver_saturation().return_const(());
    hw.expect_drive_off().return_const(());
    hw
}

// --- speed profiler tracking and deceleration ---

#[test]
fn pure_linear_tracking_reaches_target_at_tick_500() {
    let _guard = LOCK.lock().unwrap();
    reset_everything();

    let constants = ControlConstants {
        kp_linear: 10.0,
        ..zero_constants()
    };
    let hw = inert_mock(2.0, 4.0, constants, 0.0, 0.0, 0.0, 12.0, 0);
    bind_hardware(Box::new(hw)).unwrap();

    set_target_linear_speed(1.0);
    enable_motor_control();

    let mut reached_at = None;
    for tick in 1..=2000 {
        motor_control();
        if reached_at.is_none() && get_ideal_linear_speed() >= 1.0 {
            reached_at = Some(tick);
        }
    }

    assert_eq!(reached_at, Some(500));
    assert_relative_eq!(get_ideal_linear_speed(), 1.0, epsilon = 1e-9);
    // linear_error is a running sum of (ideal - measured); measured is 0
    // throughout, so it strictly increases tick over tick while profiling.
    assert!(STATE.linear_error() > 0.0);

    unbind_hardware();
}

#[test]
fn profile_decelerates_to_zero_at_tick_250() {
    let _guard = LOCK.lock().unwrap();
    reset_everything();

    let constants = ControlConstants {
        kp_linear: 10.0,
        ..zero_constants()
    };
    let hw = inert_mock(2.0, 4.0, constants, 0.0, 0.0, 0.0, 12.0, 0);
    bind_hardware(Box::new(hw)).unwrap();

    set_target_linear_speed(1.0);
    enable_motor_control();
    for _ in 0..500 {
        motor_control();
    }
    assert_relative_eq!(get_ideal_linear_speed(), 1.0, epsilon = 1e-9);

    set_target_linear_speed(0.0);
    let mut reached_at = None;
    for tick in 1..=1000 {
        motor_control();
        if reached_at.is_none() && get_ideal_linear_speed() <= 0.0 {
            reached_at = Some(tick);
        }
    }

    assert_eq!(reached_at, Some(250));

    unbind_hardware();
}

// --- wall-loop integral growth (double-count via post-update add) ---

#[test]
fn side_close_integral_matches_triangular_number_formula() {
    let _guard = LOCK.lock().unwrap();
    reset_everything();

    let mut hw = inert_mock(0.0, 0.0, zero_constants(), 0.0, 0.0, 0.0, 12.0, 0);
    hw.expect_get_side_sensors_close_error().return_const(0.01);
    bind_hardware(Box::new(hw)).unwrap();

    side_sensors_close_control(true);
    enable_motor_control();

    const N: u32 = 10;
    for _ in 0..N {
        motor_control();
    }

    // Each tick adds a running `side_sensors_feedback` total (0.01, 0.02, ...,
    // 0.01*N) into the integral, so after N ticks the integral is
    // 0.01 * N*(N+1)/2.
    let expected = 0.01 * (N as f64) * (N as f64 + 1.0) / 2.0;
    assert_relative_eq!(STATE.side_sensors_integral(), expected, epsilon = 1e-9);

    unbind_hardware();
}

#[test]
fn disabled_wall_loop_integral_is_unchanged_by_the_tick() {
    let _guard = LOCK.lock().unwrap();
    reset_everything();

    STATE.set_front_sensors_integral(3.5);
    let mut hw = MockHardwareIo::new();
    hw.expect_get_front_sensors_error().times(0);
    // front disabled: aggregate() must neither read the sensor nor touch
    // the integral.
    let before = STATE.front_sensors_integral();
    let wall_feedback = walls::aggregate(&STATE, &hw);

    assert_eq!(wall_feedback.front, 0.0);
    assert_eq!(STATE.front_sensors_integral(), before);

    unbind_hardware();
}

// --- collision latch ---

#[test]
fn saturation_past_limit_latches_collision_and_stops_future_drive() {
    let _guard = LOCK.lock().unwrap();
    reset_everything();

    let t_sat = micromouse_motion::control::constants::saturation_ticks_limit();

    let mut hw = MockHardwareIo::new();
    hw.expect_get_linear_acceleration().return_const(2.0);
    hw.expect_get_linear_deceleration().return_const(4.0);
    hw.expect_get_control_constants().return_const(zero_constants());
    hw.expect_get_encoder_left_speed().return_const(0.0);
    hw.expect_get_encoder_right_speed().return_const(0.0);
    hw.expect_get_gyro_z_radps().return_const(0.0);
    hw.expect_get_motor_driver_input_voltage().return_const(12.0);
    hw.expect_motor_driver_saturation().return_const(t_sat + 1);
    hw.expect_reset_motor_driver_saturation().return_const(());
    hw.expect_power_left().times(1).return_const(());
    hw.expect_power_right().times(1).return_const(());
    bind_hardware(Box::new(hw)).unwrap();

    set_target_linear_speed(1.0);
    enable_motor_control();
    motor_control();

    assert!(collision_detected());
    assert!(!STATE.motor_control_enabled());

    // A second tick must be a strict no-op: the mock's power_* expectations
    // only allow exactly one call each, so a second invocation would panic.
    motor_control();

    reset_collision_detection();
    enable_motor_control();
    assert!(!collision_detected());

    unbind_hardware();
}

// --- gyro sign convention ---

#[test]
fn gyro_is_negated_into_measured_angular_speed() {
    let _guard = LOCK.lock().unwrap();
    reset_everything();

    let constants = ControlConstants {
        kp_angular: 1.0,
        ..zero_constants()
    };
    let hw = inert_mock(0.0, 0.0, constants, 0.0, 0.0, 1.0, 12.0, 0);
    bind_hardware(Box::new(hw)).unwrap();

    enable_motor_control();
    for expected_k in 1..=5 {
        motor_control();
        // angular_error += ideal_angular_speed(0) - measured(-gyro) each
        // tick, so after k ticks it is exactly k.
        assert_relative_eq!(STATE.angular_error(), expected_k as f64, epsilon = 1e-9);
    }

    unbind_hardware();
}

// --- supply-compensated PWM ---

#[test]
fn pwm_scales_inversely_with_supply_voltage() {
    assert_eq!(drive::voltage_to_pwm(4.0, 8.0, 1000), 500);
    assert_eq!(drive::voltage_to_pwm(4.0, 4.0, 1000), 1000);
}

// --- profiler monotonicity and bounded step ---

#[test]
fn profiler_never_overshoots_and_is_monotone_toward_target() {
    let target = 1.0;
    let accel = 2.0;
    let decel = 4.0;
    let f_tick = 1000;

    let mut ideal = 0.0;
    for _ in 0..2000 {
        let next = step_ideal_linear_speed(ideal, target, accel, decel, f_tick);
        assert!(next >= ideal, "profiler should never move away from target");
        assert!(next <= target, "profiler should never overshoot target");
        ideal = next;
    }
    assert_relative_eq!(ideal, target, epsilon = 1e-9);
}

#[test]
fn profiler_step_is_bounded_by_rate_over_f_tick() {
    let accel = 3.0;
    let decel = 5.0;
    let f_tick = 1000;
    let max_step = f64::max(accel, decel) / f_tick as f64;

    for (ideal, target) in [(0.0, 10.0), (10.0, 0.0), (2.0, 2.5), (5.0, -3.0)] {
        let next = step_ideal_linear_speed(ideal, target, accel, decel, f_tick);
        assert!((next - ideal).abs() <= max_step + 1e-12);
    }
}

// --- disabled tick is a strict no-op ---

#[test]
fn disabled_tick_writes_nothing_and_touches_no_hardware() {
    let _guard = LOCK.lock().unwrap();
    reset_everything();

    let mut hw = MockHardwareIo::new();
    hw.expect_get_linear_acceleration().times(0);
    hw.expect_power_left().times(0);
    hw.expect_power_right().times(0);
    bind_hardware(Box::new(hw)).unwrap();

    STATE.set_target_linear_speed(2.0);
    disable_motor_control();
    motor_control();

    assert_eq!(STATE.voltage_left(), 0.0);
    assert_eq!(STATE.voltage_right(), 0.0);
    assert_eq!(STATE.pwm_left(), 0);
    assert_eq!(STATE.linear_error(), 0.0);

    unbind_hardware();
}

// --- reset_control_errors zeroes every accumulator ---

#[test]
fn reset_control_errors_zeroes_all_errors_and_integrals() {
    let _guard = LOCK.lock().unwrap();
    reset_everything();

    STATE.set_linear_error(1.0);
    STATE.set_angular_error(2.0);
    STATE.set_last_linear_error(3.0);
    STATE.set_last_angular_error(4.0);
    STATE.set_side_sensors_integral(5.0);
    STATE.set_front_sensors_integral(6.0);
    STATE.set_diagonal_sensors_integral(7.0);

    reset_control_errors();

    assert_eq!(STATE.linear_error(), 0.0);
    assert_eq!(STATE.angular_error(), 0.0);
    assert_eq!(STATE.last_linear_error(), 0.0);
    assert_eq!(STATE.last_angular_error(), 0.0);
    assert_eq!(STATE.side_sensors_integral(), 0.0);
    assert_eq!(STATE.front_sensors_integral(), 0.0);
    assert_eq!(STATE.diagonal_sensors_integral(), 0.0);
}

// --- reset_motion disables everything and drives off ---

#[test]
fn reset_motion_disables_everything_and_commands_driver_off() {
    let _guard = LOCK.lock().unwrap();
    reset_everything();

    let mut hw = MockHardwareIo::new();
    hw.expect_drive_off().times(1).return_const(());
    hw.expect_reset_motor_driver_saturation().return_const(());
    bind_hardware(Box::new(hw)).unwrap();

    STATE.set_target_linear_speed(1.0);
    STATE.set_ideal_linear_speed(0.5);
    STATE.set_ideal_angular_speed(0.1);
    STATE.set_linear_error(9.0);
    enable_motor_control();
    side_sensors_close_control(true);
    front_sensors_control(true);

    reset_motion();

    assert!(!STATE.motor_control_enabled());
    assert!(!STATE.side_sensors_close_enabled());
    assert!(!STATE.side_sensors_far_enabled());
    assert!(!STATE.front_sensors_enabled());
    assert!(!STATE.diagonal_sensors_enabled());
    assert_eq!(STATE.target_linear_speed(), 0.0);
    assert_eq!(STATE.ideal_linear_speed(), 0.0);
    assert_eq!(STATE.ideal_angular_speed(), 0.0);
    assert_eq!(STATE.linear_error(), 0.0);

    unbind_hardware();
}

// --- voltage split is exactly reversible ---

#[test]
fn voltage_split_recovers_linear_and_angular_commands() {
    let _guard = LOCK.lock().unwrap();
    reset_everything();

    let constants = ControlConstants {
        kp_linear: 10.0,
        kp_angular: 3.0,
        ..zero_constants()
    };
    let hw = inert_mock(0.0, 0.0, constants, 0.0, 0.0, 0.0, 12.0, 0);

    STATE.set_ideal_linear_speed(1.0);
    STATE.set_ideal_angular_speed(0.5);
    let wall_feedback = walls::aggregate(&STATE, &hw);
    let voltages = feedback::apply(&STATE, &hw, &wall_feedback);

    let v_lin = (voltages.left + voltages.right) / 2.0;
    let v_ang = (voltages.left - voltages.right) / 2.0;
    assert_relative_eq!(STATE.voltage_left(), v_lin + v_ang, epsilon = 1e-9);
    assert_relative_eq!(STATE.voltage_right(), v_lin - v_ang, epsilon = 1e-9);
}
