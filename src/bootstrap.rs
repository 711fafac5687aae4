//! Keep the run log out of version control by listing it in the local ignore file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::logging::Logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreUpdate {
    Created,
    Appended,
    AlreadyPresent,
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("failed to read ignore list: {0}")]
    Read(std::io::Error),
    #[error("failed to write ignore list: {0}")]
    Write(std::io::Error),
}

/// Make sure `entry` appears in the ignore list at `path`.
///
/// Presence is a substring check on the whole file, so an entry embedded in a
/// longer pattern counts as present.
pub fn ensure_ignored(path: &Path, entry: &str) -> Result<IgnoreUpdate, BootstrapError> {
    if !path.exists() {
        fs::write(path, format!("{entry}\n")).map_err(BootstrapError::Write)?;
        return Ok(IgnoreUpdate::Created);
    }

    let content = fs::read_to_string(path).map_err(BootstrapError::Read)?;
    if content.contains(entry) {
        return Ok(IgnoreUpdate::AlreadyPresent);
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(BootstrapError::Write)?;
    let separator = if content.is_empty() || content.ends_with('\n') {
        ""
    } else {
        "\n"
    };
    file.write_all(format!("{separator}{entry}\n").as_bytes())
        .map_err(BootstrapError::Write)?;
    Ok(IgnoreUpdate::Appended)
}

/// Runs [`ensure_ignored`] for the log file and records the outcome in the run log.
pub fn bootstrap(config: &Config, logger: &Logger) {
    let name = config.log_file_name();
    match ensure_ignored(&config.ignore_path, &name) {
        Ok(IgnoreUpdate::Created) => logger.log(&format!("Created .gitignore and added {name}.")),
        Ok(IgnoreUpdate::Appended) => logger.log(&format!("Added {name} to .gitignore.")),
        Ok(IgnoreUpdate::AlreadyPresent) => {}
        Err(_) => logger.log("Failed to update .gitignore."),
    }
}
