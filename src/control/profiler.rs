use super::state::ControlState;

// clamp-a-step-by-a-rate limiter with separate up/down limits; never
// overshoots target.
#[inline]
pub fn step_ideal_linear_speed(ideal: f64, target: f64, accel: f64, decel: f64, f_tick_hz: u32) -> f64 {
    if ideal < target {
        let stepped = ideal + accel / f_tick_hz as f64;
        if stepped > target {
            target
        } else {
            stepped
        }
    } else if ideal > target {
        let stepped = ideal - decel / f_tick_hz as f64;
        if stepped < target {
            target
        } else {
            stepped
        }
    } else {
        ideal
    }
}

// accel/decel are read from the planner collaborator at call time since
// they may change tick to tick.
pub fn update_ideal_linear_speed(state: &ControlState, accel: f64, decel: f64, f_tick_hz: u32) {
    let next = step_ideal_linear_speed(
        state.ideal_linear_speed(),
        state.target_linear_speed(),
        accel,
        decel,
        f_tick_hz,
    );
    state.set_ideal_linear_speed(next);
}
