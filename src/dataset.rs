//! Participant dataset loading.
//!
//! Accepts either a bare JSON array of records or an object with a
//! `participants` array. Unusable records are skipped with a warning; a
//! dataset that yields no subjects at all is an error, since nothing
//! downstream can run without them.

use std::path::Path;

use serde_json::Value;

use crate::config::IsotypeConfig;
use crate::error::IsotypeError;
use crate::subject::{RawSubject, Subject};

/// Parse a dataset and prepare every usable record as a [`Subject`].
pub fn load_dataset_json(json: &str, config: &IsotypeConfig) -> Result<Vec<Subject>, IsotypeError> {
    let root: Value = serde_json::from_str(json)?;
    let records = match root {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("participants") {
            Some(Value::Array(records)) => records,
            _ => return Err(IsotypeError::EmptyDataset),
        },
        _ => return Err(IsotypeError::EmptyDataset),
    };

    let total = records.len();
    let subjects = subjects_from_records(records, config);
    if subjects.is_empty() {
        return Err(IsotypeError::EmptyDataset);
    }

    tracing::info!(
        loaded = subjects.len(),
        skipped = total - subjects.len(),
        "Loaded dataset"
    );
    Ok(subjects)
}

/// Read and parse a dataset file.
pub fn load_dataset_file(
    path: impl AsRef<Path>,
    config: &IsotypeConfig,
) -> Result<Vec<Subject>, IsotypeError> {
    let content = std::fs::read_to_string(path)?;
    load_dataset_json(&content, config)
}

/// Prepare already-parsed JSON records, skipping unusable ones.
pub fn subjects_from_records(records: Vec<Value>, config: &IsotypeConfig) -> Vec<Subject> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| parse_record(index, record, config))
        .collect()
}

fn parse_record(index: usize, mut record: Value, config: &IsotypeConfig) -> Option<Subject> {
    // numeric ids are common in exported datasets
    if let Some(Value::Number(n)) = record.get("id") {
        let id = n.to_string();
        record["id"] = Value::String(id);
    }

    let raw: RawSubject = match serde_json::from_value(record) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Skipping participant record {}: {}", index, e);
            return None;
        }
    };

    let subject = Subject::from_raw(raw, config);
    if subject.is_none() {
        log::warn!("Skipping participant record {}: missing id", index);
    }
    subject
}

// ============================================================================
// Tests
// ============================================================================
