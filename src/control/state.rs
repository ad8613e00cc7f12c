//! The control state container and its public accessors.
//!
//! Every field is an independently racy scalar — `core::sync::atomic`
//! primitives rather than a single lock guarding the whole struct, so the
//! tick context and a planner/telemetry caller never block on each other.
//! A single `Mutex<ControlState>` is deliberately avoided for the hot
//! fields; a lock is kept only for the comparatively rare hardware-binding
//! slot below, which is written once at startup and never raced against
//! the tick.

use alloc::boxed::Box;
use core::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};

use spin::Mutex;

use super::collaborators::HardwareIo;

#[inline(always)]
fn load_f64(a: &AtomicU64) -> f64 {
    f64::from_bits(a.load(Ordering::Relaxed))
}

#[inline(always)]
fn store_f64(a: &AtomicU64, v: f64) {
    a.store(v.to_bits(), Ordering::Relaxed);
}

pub struct ControlState {
    // Setpoints (written by planner, read by tick)
    target_linear_speed: AtomicU64,
    ideal_angular_speed: AtomicU64,

    // Profiler state (written by tick)
    ideal_linear_speed: AtomicU64,

    // Controller state (written by tick)
    linear_error: AtomicU64,
    angular_error: AtomicU64,
    last_linear_error: AtomicU64,
    last_angular_error: AtomicU64,
    side_sensors_integral: AtomicU64,
    front_sensors_integral: AtomicU64,
    diagonal_sensors_integral: AtomicU64,

    // Outputs (written by tick, read by telemetry)
    voltage_left: AtomicU64,
    voltage_right: AtomicU64,
    pwm_left: AtomicI32,
    pwm_right: AtomicI32,

    // Flags
    motor_control_enabled: AtomicBool,
    side_sensors_close_enabled: AtomicBool,
    side_sensors_far_enabled: AtomicBool,
    front_sensors_enabled: AtomicBool,
    diagonal_sensors_enabled: AtomicBool,
    collision_detected: AtomicBool,
}

impl ControlState {
    pub const fn new() -> Self {
        Self {
            target_linear_speed: AtomicU64::new(0),
            ideal_angular_speed: AtomicU64::new(0),
            ideal_linear_speed: AtomicU64::new(0),
            linear_error: AtomicU64::new(0),
            angular_error: AtomicU64::new(0),
            last_linear_error: AtomicU64::new(0),
            last_angular_error: AtomicU64::new(0),
            side_sensors_integral: AtomicU64::new(0),
            front_sensors_integral: AtomicU64::new(0),
            diagonal_sensors_integral: AtomicU64::new(0),
            voltage_left: AtomicU64::new(0),
            voltage_right: AtomicU64::new(0),
            pwm_left: AtomicI32::new(0),
            pwm_right: AtomicI32::new(0),
            motor_control_enabled: AtomicBool::new(false),
            side_sensors_close_enabled: AtomicBool::new(false),
            side_sensors_far_enabled: AtomicBool::new(false),
            front_sensors_enabled: AtomicBool::new(false),
            diagonal_sensors_enabled: AtomicBool::new(false),
            collision_detected: AtomicBool::new(false),
        }
    }

    // --- setpoints ---

    pub fn target_linear_speed(&self) -> f64 {
        load_f64(&self.target_linear_speed)
    }

    pub fn set_target_linear_speed(&self, v: f64) {
        store_f64(&self.target_linear_speed, v);
    }

    pub fn ideal_angular_speed(&self) -> f64 {
        load_f64(&self.ideal_angular_speed)
    }

    pub fn set_ideal_angular_speed(&self, v: f64) {
        store_f64(&self.ideal_angular_speed, v);
    }

    // --- profiler state ---

    pub fn ideal_linear_speed(&self) -> f64 {
        load_f64(&self.ideal_linear_speed)
    }

    pub fn set_ideal_linear_speed(&self, v: f64) {
        store_f64(&self.ideal_linear_speed, v);
    }

    // --- controller state ---

    pub fn linear_error(&self) -> f64 {
        load_f64(&self.linear_error)
    }

    pub fn set_linear_error(&self, v: f64) {
        store_f64(&self.linear_error, v);
    }

    pub fn angular_error(&self) -> f64 {
        load_f64(&self.angular_error)
    }

    pub fn set_angular_error(&self, v: f64) {
        store_f64(&self.angular_error, v);
    }

    pub fn last_linear_error(&self) -> f64 {
        load_f64(&self.last_linear_error)
    }

    pub fn set_last_linear_error(&self, v: f64) {
        store_f64(&self.last_linear_error, v);
    }

    pub fn last_angular_error(&self) -> f64 {
        load_f64(&self.last_angular_error)
    }

    pub fn set_last_angular_error(&self, v: f64) {
        store_f64(&self.last_angular_error, v);
    }

    pub fn side_sensors_integral(&self) -> f64 {
        load_f64(&self.side_sensors_integral)
    }

    pub fn set_side_sensors_integral(&self, v: f64) {
        store_f64(&self.side_sensors_integral, v);
    }

    pub fn front_sensors_integral(&self) -> f64 {
        load_f64(&self.front_sensors_integral)
    }

    pub fn set_front_sensors_integral(&self, v: f64) {
        store_f64(&self.front_sensors_integral, v);
    }

    pub fn diagonal_sensors_integral(&self) -> f64 {
        load_f64(&self.diagonal_sensors_integral)
    }

    pub fn set_diagonal_sensors_integral(&self, v: f64) {
        store_f64(&self.diagonal_sensors_integral, v);
    }

    // --- outputs ---

    pub fn voltage_left(&self) -> f64 {
        load_f64(&self.voltage_left)
    }

    pub fn set_voltage_left(&self, v: f64) {
        store_f64(&self.voltage_left, v);
    }

    pub fn voltage_right(&self) -> f64 {
        load_f64(&self.voltage_right)
    }

    pub fn set_voltage_right(&self, v: f64) {
        store_f64(&self.voltage_right, v);
    }

    pub fn pwm_left(&self) -> i32 {
        self.pwm_left.load(Ordering::Relaxed)
    }

    pub fn set_pwm_left(&self, v: i32) {
        self.pwm_left.store(v, Ordering::Relaxed);
    }

    pub fn pwm_right(&self) -> i32 {
        self.pwm_right.load(Ordering::Relaxed)
    }

    pub fn set_pwm_right(&self, v: i32) {
        self.pwm_right.store(v, Ordering::Relaxed);
    }

    // --- flags ---

    pub fn motor_control_enabled(&self) -> bool {
        self.motor_control_enabled.load(Ordering::Relaxed)
    }

    pub fn set_motor_control_enabled(&self, v: bool) {
        self.motor_control_enabled.store(v, Ordering::Relaxed);
    }

    pub fn side_sensors_close_enabled(&self) -> bool {
        self.side_sensors_close_enabled.load(Ordering::Relaxed)
    }

    pub fn set_side_sensors_close_enabled(&self, v: bool) {
        self.side_sensors_close_enabled.store(v, Ordering::Relaxed);
    }

    pub fn side_sensors_far_enabled(&self) -> bool {
        self.side_sensors_far_enabled.load(Ordering::Relaxed)
    }

    pub fn set_side_sensors_far_enabled(&self, v: bool) {
        self.side_sensors_far_enabled.store(v, Ordering::Relaxed);
    }

    pub fn front_sensors_enabled(&self) -> bool {
        self.front_sensors_enabled.load(Ordering::Relaxed)
    }

    pub fn set_front_sensors_enabled(&self, v: bool) {
        self.front_sensors_enabled.store(v, Ordering::Relaxed);
    }

    pub fn diagonal_sensors_enabled(&self) -> bool {
        self.diagonal_sensors_enabled.load(Ordering::Relaxed)
    }

    pub fn set_diagonal_sensors_enabled(&self, v: bool) {
        self.diagonal_sensors_enabled.store(v, Ordering::Relaxed);
    }

    pub fn collision_detected(&self) -> bool {
        self.collision_detected.load(Ordering::Relaxed)
    }

    pub fn set_collision_detected(&self, v: bool) {
        self.collision_detected.store(v, Ordering::Relaxed);
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}

// one physical robot, one instance, zero-initialized before the scheduler
// starts.
pub static STATE: ControlState = ControlState::new();

// binding happens once at startup and is never raced against the tick, so
// a spin::Mutex is fine here even though the per-tick fields above avoid one.
static HARDWARE: Mutex<Option<Box<dyn HardwareIo + Send>>> = Mutex::new(None);

pub fn bind_hardware(hw: Box<dyn HardwareIo + Send>) -> Result<(), &'static str> {
    let mut slot = HARDWARE.lock();
    if slot.is_some() {
        return Err("hardware already bound");
    }
    *slot = Some(hw);
    Ok(())
}

pub fn unbind_hardware() {
    *HARDWARE.lock() = None;
}

// returns None (and runs nothing) if no hardware is bound.
pub fn with_hardware<R>(f: impl FnOnce(&mut dyn HardwareIo) -> R) -> Option<R> {
    let mut slot = HARDWARE.lock();
    slot.as_deref_mut().map(f)
}
