use super::state::{with_hardware, ControlState};

pub fn reset_control_errors(state: &ControlState) {
    state.set_side_sensors_integral(0.0);
    state.set_front_sensors_integral(0.0);
    state.set_diagonal_sensors_integral(0.0);
    state.set_linear_error(0.0);
    state.set_angular_error(0.0);
    state.set_last_linear_error(0.0);
    state.set_last_angular_error(0.0);
}

pub fn reset_control_speed(state: &ControlState) {
    state.set_target_linear_speed(0.0);
    state.set_ideal_linear_speed(0.0);
    state.set_ideal_angular_speed(0.0);
}

pub fn reset_collision_detection(state: &ControlState) {
    state.set_collision_detected(false);
    with_hardware(|hw| hw.reset_motor_driver_saturation());
}

pub fn reset_control_all(state: &ControlState) {
    reset_control_errors(state);
    reset_control_speed(state);
    reset_collision_detection(state);
}

// driver must go off before state is zeroed, or a stale pulse slips out.
pub fn reset_motion(state: &ControlState) {
    state.set_motor_control_enabled(false);
    state.set_side_sensors_close_enabled(false);
    state.set_side_sensors_far_enabled(false);
    state.set_front_sensors_enabled(false);
    state.set_diagonal_sensors_enabled(false);
    with_hardware(|hw| hw.drive_off());
    reset_control_all(state);
}
