#![no_main]
#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec;
use core::time::Duration;

use micromouse_motion::control;
use micromouse_motion::control::collaborators::ControlConstants;
use micromouse_motion::control::constants::F_TICK_HZ;
use micromouse_motion::control::state::bind_hardware;
use micromouse_motion::hardware;
use vexide::devices::smart::distance::DistanceSensor;
use vexide::devices::smart::imu::InertialSensor;
use vexide::prelude::*;

fn default_control_constants() -> ControlConstants {
    ControlConstants {
        kp_linear: 40.0,
        kd_linear: 2.0,
        kp_angular: 6.0,
        kd_angular: 0.3,
        kp_angular_side: 4.0,
        ki_angular_side: 0.05,
        kp_angular_front: 3.0,
        ki_angular_front: 0.05,
        kp_angular_diagonal: 3.0,
        ki_angular_diagonal: 0.05,
    }
}

async fn tick_loop() {
    let period = Duration::from_micros(1_000_000 / F_TICK_HZ as u64);
    loop {
        control::motor_control();
        sleep(period).await;
    }
}

struct Robot;

impl Compete for Robot {
    async fn autonomous(&mut self) {
        control::tick::set_target_linear_speed(1.0);
        control::tick::side_sensors_close_control(true);
        control::tick::side_sensors_far_control(true);
        control::tick::front_sensors_control(true);
        control::tick::enable_motor_control();
    }

    async fn driver(&mut self) {
        control::tick::reset_motion();
    }
}

#[vexide::main]
async fn main(peripherals: Peripherals) {
    let left = hardware::DriveSide::new(
        vec![Motor::new(peripherals.port_1, Gearset::Blue, Direction::Forward)],
        0.032,
        1.0,
    );
    let right = hardware::DriveSide::new(
        vec![Motor::new(peripherals.port_2, Gearset::Blue, Direction::Reverse)],
        0.032,
        1.0,
    );

    let imu = InertialSensor::new(peripherals.port_3);
    let side_close = DistanceSensor::new(peripherals.port_4);
    let side_far = DistanceSensor::new(peripherals.port_5);
    let front = DistanceSensor::new(peripherals.port_6);
    let diagonal = DistanceSensor::new(peripherals.port_7);

    let io = hardware::RobotIo::new(
        left,
        right,
        imu,
        side_close,
        side_far,
        front,
        diagonal,
        default_control_constants(),
        2.0,
        4.0,
    );

    bind_hardware(Box::new(io)).expect("hardware already bound");

    spawn(tick_loop()).detach();

    let mut robot = Robot;
    robot.compete().await;
}
