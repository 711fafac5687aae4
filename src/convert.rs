//! One conversion pass: every registered record type into a single document.

use crate::bootstrap::bootstrap;
use crate::config::Config;
use crate::error::ConvertError;
use crate::logging::Logger;
use crate::records::{load_and_filter, RecordDocument};

/// Walk the registry in order. Types whose CSV is missing are left out of the document.
pub fn convert(config: &Config, logger: &Logger) -> Result<RecordDocument, ConvertError> {
    logger.log("Script started.");

    let mut document = RecordDocument::new();
    for record_type in config.record_types {
        if let Some(rows) = load_and_filter(logger, &config.records_dir, record_type.file_name)? {
            document.insert(record_type.name, rows);
        }
    }

    logger.log("Script completed successfully.");
    Ok(document)
}

/// Ignore-list bootstrap followed by [`convert`].
pub fn run(config: &Config) -> Result<RecordDocument, ConvertError> {
    let logger = Logger::from_config(config);
    bootstrap(config, &logger);
    convert(config, &logger)
}
