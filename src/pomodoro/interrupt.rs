use std::future::Future;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::session::write_summary;
use super::state::SessionState;
use crate::display::terminal::{self, SharedTerminal};
use crate::error::{PomoError, Result};

pub type ExitFn = Arc<dyn Fn(i32) + Send + Sync>;

pub fn exit_process() -> ExitFn {
    Arc::new(|code| std::process::exit(code))
}

pub struct InterruptHandler {
    state: Arc<SessionState>,
    terminal: SharedTerminal,
    exit: ExitFn,
    fired: AtomicBool,
}

impl InterruptHandler {
    pub fn new(state: Arc<SessionState>, terminal: SharedTerminal, exit: ExitFn) -> Self {
        Self {
            state,
            terminal,
            exit,
            fired: AtomicBool::new(false),
        }
    }

    /// Only the first call prints the summary and exits.
    pub fn fire(&self) -> Option<u32> {
        if self.fired.swap(true, Ordering::SeqCst) {
            return None;
        }

        let progress = self.state.snapshot();
        let finished = progress.finished_pomodoros();
        info!(
            "Interrupted during {} {} with {} finished",
            if progress.resting { "rest" } else { "pomodoro" },
            progress.iteration,
            finished
        );

        write_summary(&self.terminal, finished, self.state.elapsed());
        terminal::restore(&self.terminal);
        (self.exit)(0);
        Some(finished)
    }

    pub async fn listen<F>(&self, signal: F) -> Result<Option<u32>>
    where
        F: Future<Output = io::Result<()>>,
    {
        signal.await.map_err(PomoError::Signal)?;
        Ok(self.fire())
    }

    /// The OS handler is installed before this returns, so a Ctrl+C any
    /// time after is caught. Must be called from inside the runtime.
    pub fn spawn(self) -> Result<JoinHandle<()>> {
        let signal = interrupt_signal().map_err(PomoError::Signal)?;
        Ok(tokio::spawn(async move {
            if let Err(e) = self.listen(signal).await {
                warn!("{}", e);
            }
        }))
    }
}

// `tokio::signal::ctrl_c()` only registers when first polled.
#[cfg(unix)]
fn interrupt_signal() -> io::Result<impl Future<Output = io::Result<()>> + Send> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    Ok(async move {
        sigint
            .recv()
            .await
            .ok_or_else(|| io::Error::other("signal stream closed"))
    })
}

#[cfg(windows)]
fn interrupt_signal() -> io::Result<impl Future<Output = io::Result<()>> + Send> {
    let mut ctrl_c = tokio::signal::windows::ctrl_c()?;
    Ok(async move {
        ctrl_c
            .recv()
            .await
            .ok_or_else(|| io::Error::other("signal stream closed"))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use tokio::sync::oneshot;
    use tokio::time::sleep;

    use super::*;
    use crate::config::Config;
    use crate::display::terminal::recording::RecordingTerminal;
    use crate::pomodoro::session::Session;

    fn recording_exit() -> (Arc<Mutex<Vec<i32>>>, ExitFn) {
        let codes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&codes);
        let exit: ExitFn = Arc::new(move |code| sink.lock().unwrap().push(code));
        (codes, exit)
    }

    #[test]
    fn test_interrupt_in_first_focus() {
        let (recording, terminal) = RecordingTerminal::shared();
        let (codes, exit) = recording_exit();
        let handler = InterruptHandler::new(Arc::new(SessionState::new()), terminal, exit);

        assert_eq!(handler.fire(), Some(0));
        assert!(recording.lock().unwrap().output.contains("Finished 0 Pomodoros!"));
        assert_eq!(*codes.lock().unwrap(), vec![0]);
    }

    #[test]
    fn test_interrupt_in_first_rest() {
        let (recording, terminal) = RecordingTerminal::shared();
        let (_codes, exit) = recording_exit();
        let state = Arc::new(SessionState::new());
        state.begin_rest();
        let handler = InterruptHandler::new(state, terminal, exit);

        assert_eq!(handler.fire(), Some(1));
        assert!(recording.lock().unwrap().output.contains("Finished 1 Pomodoro!"));
    }

    #[test]
    fn test_fires_only_once() {
        let (recording, terminal) = RecordingTerminal::shared();
        let (codes, exit) = recording_exit();
        let handler = InterruptHandler::new(Arc::new(SessionState::new()), terminal, exit);

        assert!(handler.fire().is_some());
        assert!(handler.fire().is_none());

        let recording = recording.lock().unwrap();
        assert_eq!(recording.output.matches("Finished").count(), 1);
        assert_eq!(recording.restores, 1);
        assert_eq!(codes.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_signal_error_does_not_exit() {
        let (_recording, terminal) = RecordingTerminal::shared();
        let (codes, exit) = recording_exit();
        let handler = InterruptHandler::new(Arc::new(SessionState::new()), terminal, exit);

        let result = handler
            .listen(async { Err(io::Error::other("no signal support")) })
            .await;
        assert!(matches!(result, Err(PomoError::Signal(_))));
        assert!(codes.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_mid_rest_of_running_session() {
        let (recording, terminal) = RecordingTerminal::shared();
        let (codes, exit) = recording_exit();
        let state = Arc::new(SessionState::new());
        let config = Config {
            focus: Duration::from_millis(1500),
            rest: Duration::from_millis(1500),
            max_iterations: 0,
        };

        let session = Session::new(config, Arc::clone(&state), terminal.clone());
        let running = tokio::spawn(async move { session.run().await });

        let handler = InterruptHandler::new(Arc::clone(&state), terminal, exit);
        let (tx, rx) = oneshot::channel::<()>();
        let listening = tokio::spawn(async move {
            handler
                .listen(async move { rx.await.map_err(|_| io::Error::other("sender dropped")) })
                .await
        });

        // Focus ends at 2s, the transition at 3.2s, rest runs until 5.2s.
        sleep(Duration::from_secs(4)).await;
        assert!(state.snapshot().resting);
        tx.send(()).unwrap();

        let finished = listening.await.unwrap().unwrap();
        running.abort();

        assert_eq!(finished, Some(1));
        assert_eq!(*codes.lock().unwrap(), vec![0]);
        let recording = recording.lock().unwrap();
        assert!(recording.output.ends_with("\nFinished 1 Pomodoro!\nElapsed Time: 4s\n"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_sigint_right_after_spawn_is_caught() {
        let (recording, terminal) = RecordingTerminal::shared();
        let (codes, exit) = recording_exit();
        let handler = InterruptHandler::new(Arc::new(SessionState::new()), terminal, exit);

        let listening = handler.spawn().unwrap();
        // Sent before the listener task has been polled even once.
        let status = std::process::Command::new("kill")
            .args(["-INT", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        tokio::time::timeout(Duration::from_secs(5), listening)
            .await
            .expect("SIGINT was not delivered to the listener")
            .unwrap();

        assert_eq!(*codes.lock().unwrap(), vec![0]);
        let recording = recording.lock().unwrap();
        assert!(recording.output.contains("Finished 0 Pomodoros!"));
        assert_eq!(recording.restores, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_after_second_focus_starts() {
        let (recording, terminal) = RecordingTerminal::shared();
        let (_codes, exit) = recording_exit();
        let state = Arc::new(SessionState::new());
        let config = Config {
            focus: Duration::from_millis(1500),
            rest: Duration::from_millis(1500),
            max_iterations: 0,
        };

        let session = Session::new(config, Arc::clone(&state), terminal.clone());
        let running = tokio::spawn(async move { session.run().await });

        // Second focus period begins at 6.4s.
        sleep(Duration::from_secs(7)).await;
        let handler = InterruptHandler::new(Arc::clone(&state), terminal, exit);
        assert_eq!(handler.fire(), Some(1));
        running.abort();

        assert!(recording.lock().unwrap().output.contains("Finished 1 Pomodoro!"));
    }
}
