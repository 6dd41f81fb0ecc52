use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::info;

use super::phase::run_phase;
use super::pomodoro::{Phase, TRANSITION_DOT_MS, TRANSITION_DOTS};
use super::state::SessionState;
use crate::config::Config;
use crate::display::frame::format_elapsed;
use crate::display::terminal::{self, SharedTerminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Focusing,
    TransitioningToRest,
    Resting,
    TransitioningToFocus,
    Finished,
}

pub struct Session {
    config: Config,
    state: Arc<SessionState>,
    terminal: SharedTerminal,
}

impl Session {
    pub fn new(config: Config, state: Arc<SessionState>, terminal: SharedTerminal) -> Self {
        Self {
            config,
            state,
            terminal,
        }
    }

    fn is_last_iteration(&self, iteration: u32) -> bool {
        // 0 never matches: iterations start at 1.
        self.config.max_iterations != 0 && iteration == self.config.max_iterations
    }

    /// Never returns when `max_iterations` is 0.
    pub async fn run(&self) -> u32 {
        let mut iteration = self.state.snapshot().iteration;
        let mut step = Step::Focusing;

        loop {
            step = match step {
                Step::Focusing => {
                    run_phase(&self.terminal, self.config.focus, iteration, Phase::Focus).await;
                    Step::TransitioningToRest
                }
                Step::TransitioningToRest => {
                    self.state.begin_rest();
                    info!("Pomodoro {} finished", iteration);
                    print_transition(
                        &self.terminal,
                        &format!("Pomodoro {} finished! Starting rest period", iteration),
                    )
                    .await;
                    Step::Resting
                }
                Step::Resting => {
                    run_phase(&self.terminal, self.config.rest, iteration, Phase::Rest).await;
                    if self.is_last_iteration(iteration) {
                        Step::Finished
                    } else {
                        Step::TransitioningToFocus
                    }
                }
                Step::TransitioningToFocus => {
                    iteration = self.state.begin_next_focus();
                    info!("Starting pomodoro {}", iteration);
                    print_transition(&self.terminal, &format!("Starting Pomodoro {}", iteration))
                        .await;
                    Step::Focusing
                }
                Step::Finished => {
                    info!("Session complete after {} pomodoros", iteration);
                    write_summary(&self.terminal, iteration, self.state.elapsed());
                    return iteration;
                }
            };
        }
    }
}

pub async fn print_transition(terminal: &SharedTerminal, message: &str) {
    terminal::write(terminal, message);
    for _ in 0..TRANSITION_DOTS {
        sleep(Duration::from_millis(TRANSITION_DOT_MS)).await;
        terminal::write(terminal, ".");
    }
    terminal::write(terminal, "\n");
}

pub fn summary(finished: u32, elapsed: Duration) -> String {
    let headline = if finished == 1 {
        "Finished 1 Pomodoro!".to_string()
    } else {
        format!("Finished {} Pomodoros!", finished)
    };
    format!("\n{}\nElapsed Time: {}\n", headline, format_elapsed(elapsed))
}

pub fn write_summary(terminal: &SharedTerminal, finished: u32, elapsed: Duration) {
    terminal::write(terminal, &summary(finished, elapsed));
}
