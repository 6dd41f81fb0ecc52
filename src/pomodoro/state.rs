use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::time::Instant;

// Always read and written as a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub iteration: u32,
    pub resting: bool,
}

impl Progress {
    /// A pomodoro counts as finished once its rest period has started.
    pub fn finished_pomodoros(&self) -> u32 {
        if self.resting {
            self.iteration
        } else {
            self.iteration.saturating_sub(1)
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            iteration: 1,
            resting: false,
        }
    }
}

#[derive(Debug)]
pub struct SessionState {
    progress: Mutex<Progress>,
    started: Instant,
    started_at: DateTime<Local>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            progress: Mutex::new(Progress::default()),
            started: Instant::now(),
            started_at: Local::now(),
        }
    }

    fn progress(&self) -> MutexGuard<'_, Progress> {
        self.progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> Progress {
        *self.progress()
    }

    pub fn begin_rest(&self) {
        self.progress().resting = true;
    }

    pub fn begin_next_focus(&self) -> u32 {
        let mut progress = self.progress();
        progress.iteration += 1;
        progress.resting = false;
        progress.iteration
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
