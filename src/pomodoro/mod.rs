pub mod interrupt;
pub mod phase;
pub mod pomodoro;
pub mod session;
pub mod state;
