use super::collaborators::HardwareIo;
use super::state::ControlState;

// a stuck wheel drives the controller to demand voltages the driver can't
// deliver, so sustained PWM saturation is a proxy for mechanical impact.
pub fn check(state: &ControlState, hw: &dyn HardwareIo, t_sat_ticks: u32) {
    if hw.motor_driver_saturation() > t_sat_ticks {
        state.set_collision_detected(true);
        state.set_motor_control_enabled(false);
    }
}
