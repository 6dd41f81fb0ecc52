use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

use super::pomodoro::{Phase, tick_interval};
use crate::display::frame::Frame;
use crate::display::terminal::{self, SharedTerminal};

/// Returns on the first tick past the deadline.
pub async fn run_phase(
    terminal: &SharedTerminal,
    duration: Duration,
    iteration: u32,
    phase: Phase,
) -> Duration {
    let start = Instant::now();
    debug!("{} {} started ({:?})", phase.label(), iteration, duration);

    let draw = |elapsed: Duration| {
        let frame = Frame::new(duration.saturating_sub(elapsed), duration, iteration, phase);
        terminal::render(terminal, &frame);
    };

    draw(Duration::ZERO);

    let period = tick_interval();
    let mut ticker = interval_at(start + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let elapsed = start.elapsed();
        draw(elapsed);

        if elapsed > duration {
            let elapsed = start.elapsed();
            draw(elapsed);
            debug!("{} {} finished after {:?}", phase.label(), iteration, elapsed);
            return elapsed;
        }
    }
}
