//! Append-only run log. Write failures are reported on stderr and never abort a run.

use std::cell::RefCell;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct LogError {
    #[from]
    source: io::Error,
}

pub struct Logger {
    path: PathBuf,
    /// Console mirror; stdout unless a sink was supplied.
    echo: Option<RefCell<Box<dyn Write>>>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("path", &self.path)
            .field("echo", &self.echo.is_some())
            .finish()
    }
}

impl Logger {
    pub fn new(path: impl Into<PathBuf>, echo_to_console: bool) -> Self {
        let echo = echo_to_console.then(|| {
            let stdout: Box<dyn Write> = Box::new(io::stdout());
            RefCell::new(stdout)
        });
        Logger {
            path: path.into(),
            echo,
        }
    }

    /// Logger that mirrors every line into `sink` instead of stdout.
    pub fn with_echo_sink(path: impl Into<PathBuf>, sink: impl Write + 'static) -> Self {
        Logger {
            path: path.into(),
            echo: Some(RefCell::new(Box::new(sink))),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Logger::new(&config.log_path, config.echo_to_console)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `[<local ISO-8601 timestamp>] <message>`
    pub fn timestamped(message: &str) -> String {
        let now = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.6f");
        format!("[{now}] {message}")
    }

    /// Appends one line and returns it. The console echo happens even if the append fails.
    pub fn try_log(&self, message: &str) -> Result<String, LogError> {
        let line = Logger::timestamped(message);
        let appended = self.append(&line);
        if let Some(echo) = &self.echo {
            // Echo failures are ignored; the console is best effort.
            let mut echo = echo.borrow_mut();
            let _ = echo.write_all(format!("{line}\n").as_bytes());
            let _ = echo.flush();
        }
        appended.map(|()| line)
    }

    pub fn log(&self, message: &str) {
        if let Err(err) = self.try_log(message) {
            eprintln!(
                "Warning: Could not write to log file {}: {err}",
                self.path.display()
            );
        }
    }

    fn append(&self, line: &str) -> Result<(), LogError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format!("{line}\n").as_bytes())?;
        Ok(())
    }
}
