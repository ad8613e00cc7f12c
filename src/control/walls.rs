//! Wall-feedback aggregator.
//!
//! Four optional geometric sensor loops (side-close, side-far, front,
//! diagonal) each contribute a proportional term to the angular feedback
//! law and accumulate into an integral. A disabled loop contributes nothing
//! this tick and its integral is left untouched — it is cleared only by
//! [`super::reset::reset_control_errors`].
//!
//! The side-close and side-far loops share one proportional accumulator
//! (`side_sensors_feedback`) and one integral (`side_sensors_integral`).
//! When both are enabled the far contribution is folded into an integral
//! that already holds the close contribution from earlier in the same tick,
//! double-counting it. This is deliberate: it shapes the combined loop's
//! gain and is not a bug to be fixed.

use super::collaborators::HardwareIo;
use super::state::ControlState;

/// The three proportional terms the feedback law consumes this tick.
pub struct WallFeedback {
    pub side: f64,
    pub front: f64,
    pub diagonal: f64,
}

/// Read each enabled wall loop's sensor error, fold it into the shared
/// proportional term(s) and accumulate the post-update term(s) into the
/// corresponding integral in `state`.
pub fn aggregate(state: &ControlState, hw: &dyn HardwareIo) -> WallFeedback {
    let mut side_sensors_feedback = 0.0;
    let mut front_sensors_feedback = 0.0;
    let mut diagonal_sensors_feedback = 0.0;

    if state.side_sensors_close_enabled() {
        side_sensors_feedback += hw.get_side_sensors_close_error();
        state.set_side_sensors_integral(state.side_sensors_integral() + side_sensors_feedback);
    }

    if state.side_sensors_far_enabled() {
        side_sensors_feedback += hw.get_side_sensors_far_error();
        state.set_side_sensors_integral(state.side_sensors_integral() + side_sensors_feedback);
    }

    if state.front_sensors_enabled() {
        front_sensors_feedback = hw.get_front_sensors_error();
        state.set_front_sensors_integral(state.front_sensors_integral() + front_sensors_feedback);
    }

    if state.diagonal_sensors_enabled() {
        diagonal_sensors_feedback = hw.get_diagonal_sensors_error();
        state.set_diagonal_sensors_integral(state.diagonal_sensors_integral() + diagonal_sensors_feedback);
    }

    WallFeedback {
        side: side_sensors_feedback,
        front: front_sensors_feedback,
        diagonal: diagonal_sensors_feedback,
    }
}
