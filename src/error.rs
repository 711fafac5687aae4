#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to read {file}: {source}")]
    Read {
        file: String,
        source: std::io::Error,
    },
    #[error("failed to parse {file}: {source}")]
    Parse { file: String, source: csv::Error },
    #[error("failed to serialize records: {0}")]
    Serialize(serde_json::Error),
}
