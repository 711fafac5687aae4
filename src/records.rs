//! Row model and the `enabled` filter applied to each record CSV.
//!
//! Rows are read header-driven: the first line names the columns, every other
//! line is one record. Rows narrower than the header get `null` for the missing
//! columns; surplus fields on wider rows are kept under [`EXTRA_FIELDS_KEY`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ConvertError;
use crate::logging::Logger;

pub const ENABLED_COLUMN: &str = "enabled";
pub const EXTRA_FIELDS_KEY: &str = "_extra";

/// One kept CSV row with the `enabled` column removed, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredRow {
    fields: Vec<(String, Option<String>)>,
    extra: Vec<String>,
}

impl FilteredRow {
    fn from_record(headers: &StringRecord, record: &StringRecord) -> Self {
        let mut fields: Vec<(String, Option<String>)> = Vec::with_capacity(headers.len());
        for (index, column) in headers.iter().enumerate() {
            if column == ENABLED_COLUMN {
                continue;
            }
            let value = record.get(index).map(str::to_string);
            // Repeated header names: first position, last value.
            match fields.iter_mut().find(|(name, _)| name == column) {
                Some(slot) => slot.1 = value,
                None => fields.push((column.to_string(), value)),
            }
        }
        let extra = record
            .iter()
            .skip(headers.len())
            .map(str::to_string)
            .collect();
        FilteredRow { fields, extra }
    }

    /// Value of `column`; `None` when the column is unknown or the row was too short to fill it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn extra(&self) -> &[String] {
        &self.extra
    }
}

impl Serialize for FilteredRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.fields.len() + usize::from(!self.extra.is_empty());
        let mut map = serializer.serialize_map(Some(len))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        if !self.extra.is_empty() {
            map.serialize_entry(EXTRA_FIELDS_KEY, &self.extra)?;
        }
        map.end()
    }
}

/// Filtered rows grouped by record type, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDocument {
    entries: Vec<(String, Vec<FilteredRow>)>,
}

impl RecordDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rows for `record_type`, replacing any earlier entry in place.
    pub fn insert(&mut self, record_type: impl Into<String>, rows: Vec<FilteredRow>) {
        let record_type = record_type.into();
        match self.entries.iter_mut().find(|(name, _)| *name == record_type) {
            Some(slot) => slot.1 = rows,
            None => self.entries.push((record_type, rows)),
        }
    }

    pub fn get(&self, record_type: &str) -> Option<&[FilteredRow]> {
        self.entries
            .iter()
            .find(|(name, _)| name == record_type)
            .map(|(_, rows)| rows.as_slice())
    }

    pub fn record_types(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, ConvertError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(ConvertError::Serialize)
    }
}

impl Serialize for RecordDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, rows) in &self.entries {
            map.serialize_entry(name, rows)?;
        }
        map.end()
    }
}

/// `yes`, ignoring case and surrounding whitespace.
pub fn is_enabled(value: &str) -> bool {
    value.trim().to_lowercase() == "yes"
}

/// Parse a record CSV and keep the enabled rows, in file order.
pub fn filter_records<R: Read>(reader: R) -> Result<Vec<FilteredRow>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let enabled_index = headers
        .iter()
        .enumerate()
        .filter(|(_, column)| *column == ENABLED_COLUMN)
        .map(|(index, _)| index)
        .last();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let enabled = enabled_index
            .and_then(|index| record.get(index))
            .unwrap_or("");
        if is_enabled(enabled) {
            rows.push(FilteredRow::from_record(&headers, &record));
        }
    }
    Ok(rows)
}

/// Load `<records_dir>/<file_name>` and filter it. `Ok(None)` when the file does not exist.
pub fn load_and_filter(
    logger: &Logger,
    records_dir: &Path,
    file_name: &str,
) -> Result<Option<Vec<FilteredRow>>, ConvertError> {
    let path = records_dir.join(file_name);
    if !path.exists() {
        logger.log(&format!("CSV not found: {file_name}, skipping."));
        return Ok(None);
    }

    logger.log(&format!("Processing {file_name} ..."));
    let file = File::open(&path).map_err(|source| ConvertError::Read {
        file: file_name.to_string(),
        source,
    })?;
    let rows = filter_records(file).map_err(|source| ConvertError::Parse {
        file: file_name.to_string(),
        source,
    })?;
    logger.log(&format!("{} records enabled in {file_name}.", rows.len()));
    Ok(Some(rows))
}
