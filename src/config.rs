//! Run configuration: where the records live, where the run log and ignore list go,
//! and which record types are converted.

use std::env;
use std::path::{Path, PathBuf};

pub const LOG_FILE_NAME: &str = "parse_dns_csvs.log";
pub const IGNORE_FILE_NAME: &str = ".gitignore";
pub const RECORDS_DIR_NAME: &str = "records";
pub const BASE_DIR_ENV: &str = "DNS_RECORDS_BASE_DIR";

/// A logical record type and the CSV file it is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordType {
    pub name: &'static str,
    pub file_name: &'static str,
}

/// Registered record types, in output order.
pub const RECORD_TYPES: &[RecordType] = &[
    RecordType {
        name: "a_records",
        file_name: "a_records.csv",
    },
    RecordType {
        name: "aaaa_records",
        file_name: "aaaa_records.csv",
    },
    RecordType {
        name: "cname_records",
        file_name: "cname_records.csv",
    },
    RecordType {
        name: "mx_records",
        file_name: "mx_records.csv",
    },
    RecordType {
        name: "ns_records",
        file_name: "ns_records.csv",
    },
    RecordType {
        name: "srv_records",
        file_name: "srv_records.csv",
    },
    RecordType {
        name: "ptr_records",
        file_name: "ptr_records.csv",
    },
    RecordType {
        name: "caa_records",
        file_name: "caa_records.csv",
    },
    RecordType {
        name: "spf_records",
        file_name: "spf_records.csv",
    },
    RecordType {
        name: "dmarc_records",
        file_name: "dmarc_records.csv",
    },
    RecordType {
        name: "txt_records",
        file_name: "txt_records.csv",
    },
    RecordType {
        name: "a_alias_records",
        file_name: "a_alias_records.csv",
    },
];

#[derive(Debug, Clone)]
pub struct Config {
    pub records_dir: PathBuf,
    pub log_path: PathBuf,
    pub ignore_path: PathBuf,
    pub record_types: &'static [RecordType],
    /// Mirror log lines to stdout. The CLI turns this on when stdout is a terminal.
    pub echo_to_console: bool,
}

impl Config {
    pub fn for_base_dir(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        Config {
            records_dir: base_dir.join(RECORDS_DIR_NAME),
            log_path: base_dir.join(LOG_FILE_NAME),
            ignore_path: base_dir.join(IGNORE_FILE_NAME),
            record_types: RECORD_TYPES,
            echo_to_console: false,
        }
    }

    pub fn with_echo(mut self, echo_to_console: bool) -> Self {
        self.echo_to_console = echo_to_console;
        self
    }

    /// Base name of the log file, as written into the ignore list.
    pub fn log_file_name(&self) -> String {
        self.log_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| LOG_FILE_NAME.to_string())
    }
}

/// `DNS_RECORDS_BASE_DIR` when set, else the directory holding the running executable.
pub fn default_base_dir() -> PathBuf {
    match env::var(BASE_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_derived_from_base_dir() {
        let config = Config::for_base_dir("/srv/dns");
        assert_eq!(config.records_dir, PathBuf::from("/srv/dns/records"));
        assert_eq!(config.log_path, PathBuf::from("/srv/dns/parse_dns_csvs.log"));
        assert_eq!(config.ignore_path, PathBuf::from("/srv/dns/.gitignore"));
        assert!(!config.echo_to_console);
        assert_eq!(config.log_file_name(), "parse_dns_csvs.log");
    }

    #[test]
    fn registry_has_twelve_types_in_order() {
        let names: Vec<&str> = RECORD_TYPES.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), 12);
        assert_eq!(names.first(), Some(&"a_records"));
        assert_eq!(names.last(), Some(&"a_alias_records"));
        for record_type in RECORD_TYPES {
            assert_eq!(record_type.file_name, format!("{}.csv", record_type.name));
        }
    }
}
