// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;
use tracing::{info, warn};
use txgrid_app::Record;
use txgrid_testkit::TransactionFaker;
use txgrid_tui::{GridRuntime, InternalEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    /// Generated in memory; nothing touches disk.
    Demo { count: usize, seed: u64 },
}

impl DatasetSource {
    pub fn load(&self) -> Result<Vec<Record>> {
        match self {
            Self::File(path) => txgrid_data::load_dataset(path)
                .with_context(|| format!("load dataset {}", path.display())),
            Self::Demo { count, seed } => {
                let started = Instant::now();
                let records = TransactionFaker::new(*seed)
                    .transactions(*count)
                    .collect::<Vec<_>>();
                info!(
                    rows = records.len(),
                    seed,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "demo dataset generated"
                );
                Ok(records)
            }
        }
    }
}

/// Loads the dataset on a background thread so the first frame can show the
/// loading state.
pub struct LoaderRuntime {
    source: DatasetSource,
}

impl LoaderRuntime {
    pub fn new(source: DatasetSource) -> Self {
        Self { source }
    }
}

impl GridRuntime for LoaderRuntime {
    fn spawn_load(&mut self, tx: Sender<InternalEvent>) -> Result<()> {
        let source = self.source.clone();
        thread::Builder::new()
            .name("dataset-loader".to_owned())
            .spawn(move || {
                let event = match source.load() {
                    Ok(records) => InternalEvent::DatasetLoaded(records),
                    Err(error) => {
                        warn!(error = %format!("{error:#}"), "dataset load failed");
                        InternalEvent::LoadFailed(format!("{error:#}"))
                    }
                };
                let _ = tx.send(event);
            })
            .context("spawn dataset loader")?;
        Ok(())
    }
}
