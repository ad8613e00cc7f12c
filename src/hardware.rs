// Concrete HardwareIo binding to real vexide peripherals. Sensor getters
// take &self, so the running samples speed_mps/get_gyro_z_radps need are
// kept in RefCells rather than requiring &mut self.

use alloc::vec::Vec;
use core::cell::RefCell;
use core::f64::consts::PI;

use vexide::devices::smart::distance::DistanceSensor;
use vexide::devices::smart::imu::InertialSensor;
use vexide::prelude::Motor;
use vexide::time::Instant;

use crate::control::constants::DRIVER_PWM_PERIOD;
use crate::control::{ControlConstants, HardwareIo};

pub struct DriveSide {
    motors: Vec<Motor>,
    wheel_diameter_m: f64,
    gear_ratio: f64,
    last_sample: RefCell<Option<(f64, Instant)>>,
}

impl DriveSide {
    pub fn new(motors: Vec<Motor>, wheel_diameter_m: f64, gear_ratio: f64) -> Self {
        Self {
            motors,
            wheel_diameter_m,
            gear_ratio: if gear_ratio == 0.0 { 1.0 } else { gear_ratio },
            last_sample: RefCell::new(None),
        }
    }

    fn average_position_degrees(&self) -> f64 {
        let mut total = 0.0;
        let mut count = 0u32;
        for motor in &self.motors {
            if let Ok(position) = motor.position() {
                total += position.as_degrees();
                count += 1;
            }
        }
        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }

    // 0.0 on the first call: no prior sample to difference against.
    pub fn speed_mps(&self) -> f64 {
        let now = Instant::now();
        let position = self.average_position_degrees();

        let mut last_sample = self.last_sample.borrow_mut();
        let speed = match *last_sample {
            Some((last_position, last_time)) => {
                let dt = (now - last_time).as_secs_f64();
                if dt <= 0.0 {
                    0.0
                } else {
                    let arc_m = (position - last_position) / 360.0 * self.wheel_diameter_m * PI;
                    (arc_m / self.gear_ratio) / dt
                }
            }
            None => 0.0,
        };
        *last_sample = Some((position, now));
        speed
    }

    fn set_voltage(&mut self, voltage: f64) {
        for motor in &mut self.motors {
            let _ = motor.set_voltage(voltage);
        }
    }
}

const MAX_MOTOR_VOLTAGE: f64 = 12.0;

pub struct RobotIo {
    left: DriveSide,
    right: DriveSide,
    imu: InertialSensor,
    side_close: DistanceSensor,
    side_far: DistanceSensor,
    front: DistanceSensor,
    diagonal: DistanceSensor,
    target_side_close_mm: f64,
    target_side_far_mm: f64,
    target_front_mm: f64,
    target_diagonal_mm: f64,
    last_heading: RefCell<Option<(f64, Instant)>>,
    constants: ControlConstants,
    linear_acceleration: f64,
    linear_deceleration: f64,
    saturation_ticks: u32,
    left_saturated_this_tick: bool,
}

impl RobotIo {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        left: DriveSide,
        right: DriveSide,
        imu: InertialSensor,
        side_close: DistanceSensor,
        side_far: DistanceSensor,
        front: DistanceSensor,
        diagonal: DistanceSensor,
        constants: ControlConstants,
        linear_acceleration: f64,
        linear_deceleration: f64,
    ) -> Self {
        Self {
            left,
            right,
            imu,
            side_close,
            side_far,
            front,
            diagonal,
            target_side_close_mm: 0.0,
            target_side_far_mm: 0.0,
            target_front_mm: 0.0,
            target_diagonal_mm: 0.0,
            last_heading: RefCell::new(None),
            constants,
            linear_acceleration,
            linear_deceleration,
            saturation_ticks: 0,
            left_saturated_this_tick: false,
        }
    }

    pub fn set_control_constants(&mut self, constants: ControlConstants) {
        self.constants = constants;
    }

    pub fn set_profile_limits(&mut self, acceleration: f64, deceleration: f64) {
        self.linear_acceleration = acceleration;
        self.linear_deceleration = deceleration;
    }

    // positive error means "further from the wall than the target".
    pub fn set_wall_targets(&mut self, side_close_mm: f64, side_far_mm: f64, front_mm: f64, diagonal_mm: f64) {
        self.target_side_close_mm = side_close_mm;
        self.target_side_far_mm = side_far_mm;
        self.target_front_mm = front_mm;
        self.target_diagonal_mm = diagonal_mm;
    }

    fn wall_error(sensor: &DistanceSensor, target_mm: f64) -> f64 {
        let reading_mm = sensor.distance().map(|d| d as f64).unwrap_or(target_mm);
        (reading_mm - target_mm) / 1000.0
    }

    fn pwm_to_voltage(pwm: i32, driver_pwm_period: i32) -> f64 {
        pwm as f64 / driver_pwm_period as f64 * MAX_MOTOR_VOLTAGE
    }
}

impl HardwareIo for RobotIo {
    fn get_encoder_left_speed(&self) -> f64 {
        self.left.speed_mps()
    }

    fn get_encoder_right_speed(&self) -> f64 {
        self.right.speed_mps()
    }

    fn get_gyro_z_radps(&self) -> f64 {
        let now = Instant::now();
        let heading_rad = self.imu.heading().map(|h| h.to_radians()).unwrap_or(0.0);

        let mut last_heading = self.last_heading.borrow_mut();
        let rate = match *last_heading {
            Some((last_heading, last_time)) => {
                let dt = (now - last_time).as_secs_f64();
                if dt <= 0.0 {
                    0.0
                } else {
                    (heading_rad - last_heading) / dt
                }
            }
            None => 0.0,
        };
        *last_heading = Some((heading_rad, now));
        rate
    }

    fn get_side_sensors_close_error(&self) -> f64 {
        Self::wall_error(&self.side_close, self.target_side_close_mm)
    }

    fn get_side_sensors_far_error(&self) -> f64 {
        Self::wall_error(&self.side_far, self.target_side_far_mm)
    }

    fn get_front_sensors_error(&self) -> f64 {
        Self::wall_error(&self.front, self.target_front_mm)
    }

    fn get_diagonal_sensors_error(&self) -> f64 {
        Self::wall_error(&self.diagonal, self.target_diagonal_mm)
    }

    fn get_motor_driver_input_voltage(&self) -> f64 {
        MAX_MOTOR_VOLTAGE
    }

    fn get_control_constants(&self) -> ControlConstants {
        self.constants
    }

    fn get_linear_acceleration(&self) -> f64 {
        self.linear_acceleration
    }

    fn get_linear_deceleration(&self) -> f64 {
        self.linear_deceleration
    }

    fn power_left(&mut self, pwm: i32) {
        let clamped = pwm.clamp(-DRIVER_PWM_PERIOD, DRIVER_PWM_PERIOD);
        self.left_saturated_this_tick = clamped != pwm;
        self.left.set_voltage(Self::pwm_to_voltage(clamped, DRIVER_PWM_PERIOD));
    }

    fn power_right(&mut self, pwm: i32) {
        let clamped = pwm.clamp(-DRIVER_PWM_PERIOD, DRIVER_PWM_PERIOD);
        let right_saturated = clamped != pwm;
        self.right.set_voltage(Self::pwm_to_voltage(clamped, DRIVER_PWM_PERIOD));

        // `drive::drive` always calls `power_left` then `power_right` within
        // the same tick, so this is the one place per tick that can tell
        // whether *either* motor saturated and advance the counter exactly
        // once.
        if self.left_saturated_this_tick || right_saturated {
            self.saturation_ticks += 1;
        }
    }

    fn motor_driver_saturation(&self) -> u32 {
        self.saturation_ticks
    }

    fn reset_motor_driver_saturation(&mut self) {
        self.saturation_ticks = 0;
    }

    fn drive_off(&mut self) {
        self.left.set_voltage(0.0);
        self.right.set_voltage(0.0);
    }
}
