use std::time::Duration;

use crate::pomodoro::pomodoro::Phase;

pub const PROGRESS_BAR_WIDTH: usize = 78;

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub phase: Phase,
    pub iteration: u32,
    pub minutes: u64,
    pub seconds: u64,
    pub complete: f64,
}

impl Frame {
    pub fn new(remaining: Duration, total: Duration, iteration: u32, phase: Phase) -> Self {
        let remaining = remaining.min(total);
        // Round once, then split, so 1439.998s reads 24:00 rather than 23:00.
        let rounded_secs = (remaining.as_secs_f64() + 0.5).floor() as u64;

        let complete = if total.is_zero() {
            1.0
        } else {
            ((total - remaining).as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
        };

        Self {
            phase,
            iteration,
            minutes: rounded_secs / 60,
            seconds: rounded_secs % 60,
            complete,
        }
    }

    pub fn percent(&self) -> u32 {
        (self.complete * 100.0).floor() as u32
    }

    pub fn filled_cells(&self) -> usize {
        ((self.complete * PROGRESS_BAR_WIDTH as f64).floor() as usize).min(PROGRESS_BAR_WIDTH)
    }

    pub fn progress_bar(&self) -> String {
        let filled = self.filled_cells();
        format!(
            "[{}{}]",
            "-".repeat(filled),
            " ".repeat(PROGRESS_BAR_WIDTH - filled)
        )
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("{} {}", self.phase.label(), self.iteration),
            format!(
                "{:02}:{:02} ({}%)",
                self.minutes,
                self.seconds,
                self.percent()
            ),
            self.progress_bar(),
        ]
    }
}

/// Wall-clock duration for the summary line, e.g. `1h 2m 3s`, `45s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
