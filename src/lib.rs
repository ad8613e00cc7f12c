//! Motion control core for a wheeled maze-solving robot.
//!
//! `control` is the periodic tick subsystem: speed profiling, wall-feedback
//! aggregation, the PD/PI feedback law, voltage-to-PWM conversion and the
//! saturation-driven collision detector. Everything else (odometry, the
//! trajectory planner, the motor-driver peripheral itself) is an external
//! collaborator reached through [`control::collaborators::HardwareIo`].
#![cfg_attr(not(any(test, feature = "mock")), no_std)]

extern crate alloc;

pub mod control;

// `vexide`'s peripheral types target the V5 brain and aren't meaningful on
// the host; both this crate's own unit tests and the `tests/` integration
// binaries reach hardware only through
// `control::collaborators::HardwareIo`'s `mockall` automock (see the `mock`
// feature in Cargo.toml), so the real binding is excluded from both.
#[cfg(not(any(test, feature = "mock")))]
pub mod hardware;

pub use control::collaborators::{ControlConstants, HardwareIo};
pub use control::tick::motor_control;
