// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod validation;

use anyhow::{Context, Result, anyhow};
use std::collections::HashMap;
use std::env;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};
use txgrid_app::{DuplicateIdError, Record};

pub use validation::{RawRecord, ValidationError, WireRecord, validate_record};

pub const APP_NAME: &str = "txgrid";
pub const DATA_PATH_ENV: &str = "TXGRID_DATA_PATH";
pub const DATASET_FILE_NAME: &str = "transactions.json";
pub const PROGRESS_INTERVAL: usize = 10_000;

const WRITE_BUFFER_BYTES: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read dataset {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("record {index}: {reason}")]
    MalformedRecord {
        index: usize,
        reason: ValidationError,
    },
    #[error(transparent)]
    DuplicateId(#[from] DuplicateIdError),
}

/// Reads and validates a whole dataset file. Any malformed record rejects the
/// load.
pub fn load_dataset(path: &Path) -> Result<Vec<Record>, LoadError> {
    let started = Instant::now();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_dataset(BufReader::new(file))?;
    info!(
        path = %path.display(),
        rows = records.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "dataset loaded"
    );
    Ok(records)
}

pub fn parse_dataset<R: Read>(reader: R) -> Result<Vec<Record>, LoadError> {
    let raw: Vec<RawRecord> = serde_json::from_reader(reader)?;
    let mut seen = HashMap::with_capacity(raw.len());
    let mut records = Vec::with_capacity(raw.len());
    for (index, item) in raw.into_iter().enumerate() {
        let record = validate_record(item)
            .map_err(|reason| LoadError::MalformedRecord { index, reason })?;
        if let Some(first) = seen.insert(record.id, index) {
            return Err(DuplicateIdError {
                id: record.id,
                first,
                second: index,
            }
            .into());
        }
        records.push(record);
    }
    Ok(records)
}

/// Streams `records` as a JSON array, one record at a time. Each write blocks
/// until the sink takes the bytes, so memory use does not grow with the
/// record count. Returns the number of records written.
pub fn write_dataset<W, I>(writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Record>,
{
    let mut out = BufWriter::with_capacity(WRITE_BUFFER_BYTES, writer);
    out.write_all(b"[").context("write dataset header")?;

    let mut written = 0usize;
    for record in records {
        if written > 0 {
            out.write_all(b",").context("write record separator")?;
        }
        serde_json::to_writer(&mut out, &WireRecord::from(&record))
            .with_context(|| format!("write record {}", record.id))?;
        written += 1;
        if written % PROGRESS_INTERVAL == 0 {
            info!(written, "generated records");
        }
    }

    out.write_all(b"]").context("write dataset footer")?;
    out.flush().context("flush dataset")?;
    debug!(written, "dataset stream closed");
    Ok(written)
}

pub fn write_dataset_file<I>(path: &Path, records: I) -> Result<usize>
where
    I: IntoIterator<Item = Record>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let written = write_dataset(file, records)?;
    info!(path = %path.display(), written, "dataset written");
    Ok(written)
}

pub fn default_data_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os(DATA_PATH_ENV) {
        return Ok(PathBuf::from(override_path));
    }

    let data_root = dirs::data_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set {DATA_PATH_ENV} to a dataset path")
    })?;
    Ok(data_root.join(APP_NAME).join(DATASET_FILE_NAME))
}

