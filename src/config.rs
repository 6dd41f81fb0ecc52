use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{ArgAction, Parser};
use serde::Deserialize;

use crate::error::{PomoError, Result};
use crate::pomodoro::pomodoro::{POMODORO_BREAK_MINUTES, POMODORO_WORK_MINUTES};

/// Terminal Pomodoro timer: alternates focus and rest periods until the
/// configured number of iterations is reached or Ctrl+C is pressed.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Length of the pomodoro, in minutes [default: 25]
    #[arg(long, env = "POMO_LENGTH", value_name = "MINUTES", allow_negative_numbers = true)]
    pub length: Option<f64>,

    /// Length of the rest period, in minutes [default: 5]
    #[arg(long, env = "POMO_REST", value_name = "MINUTES", allow_negative_numbers = true)]
    pub rest: Option<f64>,

    /// Number of iterations to run before exiting. If zero, run indefinitely [default: 0]
    #[arg(long, env = "POMO_ITERATIONS", value_name = "N")]
    pub iterations: Option<u32>,

    /// JSON file providing defaults for length, rest and iterations
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub length: Option<f64>,
    pub rest: Option<f64>,
    pub iterations: Option<u32>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| PomoError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &data)
    }

    fn parse(path: &Path, data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|source| PomoError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub focus: Duration,
    pub rest: Duration,
    pub max_iterations: u32, // 0 = run until interrupted
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match cli.config {
            Some(ref path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    fn merge(cli: &Cli, file: FileConfig) -> Result<Self> {
        let length = cli.length.or(file.length).unwrap_or(POMODORO_WORK_MINUTES);
        let rest = cli.rest.or(file.rest).unwrap_or(POMODORO_BREAK_MINUTES);
        let max_iterations = cli.iterations.or(file.iterations).unwrap_or(0);

        Ok(Self {
            focus: minutes_to_duration("length", length)?,
            rest: minutes_to_duration("rest", rest)?,
            max_iterations,
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_iterations == 0
    }
}

fn minutes_to_duration(flag: &'static str, minutes: f64) -> Result<Duration> {
    let invalid = || PomoError::InvalidDuration {
        flag,
        value: minutes,
    };
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(invalid());
    }
    let duration = Duration::try_from_secs_f64(minutes * 60.0).map_err(|_| invalid())?;
    if duration.is_zero() {
        return Err(invalid());
    }
    Ok(duration)
}
