use std::time::Duration;

pub const TICK_INTERVAL_MS: u64 = 1000; // Redraw the countdown every second
pub const POMODORO_WORK_MINUTES: f64 = 25.0; // Default Pomodoro work time
pub const POMODORO_BREAK_MINUTES: f64 = 5.0; // Default Pomodoro break time

pub const TRANSITION_DOTS: usize = 6;
pub const TRANSITION_DOT_MS: u64 = 200;

pub fn tick_interval() -> Duration {
    Duration::from_millis(TICK_INTERVAL_MS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Focus,
    Rest,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focus => "Pomodoro",
            Phase::Rest => "Rest Period",
        }
    }
}
