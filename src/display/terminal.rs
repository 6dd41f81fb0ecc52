use std::io::{self, Stdout, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use tracing::debug;

use super::frame::Frame;

// Each call is one complete write made under the shared lock.
pub trait Terminal: Send {
    fn draw(&mut self, lines: &[String]) -> io::Result<()>;

    fn write(&mut self, text: &str) -> io::Result<()>;

    fn hide_cursor(&mut self) -> io::Result<()>;

    fn restore(&mut self) -> io::Result<()>;
}

pub type SharedTerminal = Arc<Mutex<dyn Terminal>>;

pub struct StdoutTerminal {
    out: Stdout,
}

impl StdoutTerminal {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }

    pub fn shared() -> SharedTerminal {
        Arc::new(Mutex::new(Self::new()))
    }
}

impl Default for StdoutTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for StdoutTerminal {
    fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        execute!(self.out, Hide)
    }

    fn restore(&mut self) -> io::Result<()> {
        execute!(self.out, Show)
    }
}

fn lock(terminal: &SharedTerminal) -> MutexGuard<'_, dyn Terminal + 'static> {
    // A panic mid-write leaves nothing worth protecting; keep drawing.
    terminal.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Best-effort: failures are logged and dropped.
pub fn render(terminal: &SharedTerminal, frame: &Frame) {
    if let Err(e) = lock(terminal).draw(&frame.lines()) {
        debug!("Failed to draw frame: {}", e);
    }
}

pub fn write(terminal: &SharedTerminal, text: &str) {
    if let Err(e) = lock(terminal).write(text) {
        debug!("Failed to write to terminal: {}", e);
    }
}

pub fn hide_cursor(terminal: &SharedTerminal) {
    if let Err(e) = lock(terminal).hide_cursor() {
        debug!("Failed to hide cursor: {}", e);
    }
}

pub fn restore(terminal: &SharedTerminal) {
    if let Err(e) = lock(terminal).restore() {
        debug!("Failed to restore terminal: {}", e);
    }
}
