pub mod collaborators;
pub mod collision;
pub mod constants;
pub mod drive;
pub mod feedback;
pub mod profiler;
pub mod reset;
pub mod state;
pub mod tick;
pub mod walls;

pub use collaborators::{ControlConstants, HardwareIo};
pub use state::{bind_hardware, unbind_hardware, ControlState, STATE};
pub use tick::motor_control;
