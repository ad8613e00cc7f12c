use super::collaborators::HardwareIo;
use super::feedback::Voltages;
use super::state::ControlState;

// `as i32` on a float truncates toward zero; no separate rounding step needed.
#[inline]
pub fn voltage_to_pwm(voltage: f64, supply_voltage: f64, driver_pwm_period: i32) -> i32 {
    (voltage / supply_voltage * driver_pwm_period as f64) as i32
}

pub fn drive(state: &ControlState, hw: &mut dyn HardwareIo, voltages: &Voltages, driver_pwm_period: i32) {
    let supply_voltage = hw.get_motor_driver_input_voltage();

    let pwm_left = voltage_to_pwm(voltages.left, supply_voltage, driver_pwm_period);
    let pwm_right = voltage_to_pwm(voltages.right, supply_voltage, driver_pwm_period);

    state.set_pwm_left(pwm_left);
    state.set_pwm_right(pwm_right);

    hw.power_left(pwm_left);
    hw.power_right(pwm_right);
}
