//! Compile-time constants for the periodic control subsystem.

/// Tick frequency of the systick that drives [`crate::control::tick::motor_control`].
pub const F_TICK_HZ: u32 = 1000;

/// Symmetric PWM duty range accepted by the motor driver: `[-DRIVER_PWM_PERIOD, DRIVER_PWM_PERIOD]`.
pub const DRIVER_PWM_PERIOD: i32 = 2047;

/// Ticks of sustained PWM saturation the motor driver tolerates before a collision is latched.
pub const MAX_MOTOR_DRIVER_SATURATION_PERIOD_S: f64 = 0.5;

/// `T_SAT`: [`MAX_MOTOR_DRIVER_SATURATION_PERIOD_S`] expressed in ticks at [`F_TICK_HZ`].
#[inline(always)]
pub const fn saturation_ticks_limit() -> u32 {
    (MAX_MOTOR_DRIVER_SATURATION_PERIOD_S * F_TICK_HZ as f64) as u32
}
