// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::time::Instant;
use tracing::debug;

use crate::filter::{FilterState, filter};
use crate::sort::{SortState, sort};
use crate::store::{DatasetStore, DatasetVersion};

/// What a [`ViewPipeline::refresh`] call recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Refresh {
    pub filtered: bool,
    pub sorted: bool,
}

impl Refresh {
    pub fn any(self) -> bool {
        self.filtered || self.sorted
    }
}

/// Memoized filter and sort derivation.
///
/// The filtered view is keyed on `(dataset version, filter state)` and the
/// sorted view on `(filter generation, sort state)`, so scrolling, selection
/// and edit-session changes never rerun either stage.
#[derive(Debug, Clone, Default)]
pub struct ViewPipeline {
    filter_key: Option<(DatasetVersion, FilterState)>,
    filtered: Vec<usize>,
    filter_generation: u64,
    sort_key: Option<(u64, SortState)>,
    sorted: Vec<usize>,
    filter_runs: u64,
    sort_runs: u64,
}

impl ViewPipeline {
    pub fn refresh(
        &mut self,
        store: &DatasetStore,
        filter_state: &FilterState,
        sort_state: SortState,
    ) -> Refresh {
        let mut refresh = Refresh::default();

        let filter_current = self
            .filter_key
            .as_ref()
            .is_some_and(|(version, state)| *version == store.version() && state == filter_state);
        if !filter_current {
            let started = Instant::now();
            self.filtered = filter(store.records(), filter_state);
            self.filter_key = Some((store.version(), filter_state.clone()));
            self.filter_generation = self.filter_generation.wrapping_add(1);
            self.filter_runs += 1;
            refresh.filtered = true;
            debug!(
                dataset_rows = store.len(),
                filtered_rows = self.filtered.len(),
                version = store.version().get(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "filter recomputed"
            );
        }

        if self.sort_key != Some((self.filter_generation, sort_state)) {
            let started = Instant::now();
            self.sorted = sort(store.records(), &self.filtered, sort_state);
            self.sort_key = Some((self.filter_generation, sort_state));
            self.sort_runs += 1;
            refresh.sorted = true;
            debug!(
                rows = self.sorted.len(),
                sort = ?sort_state,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "sort recomputed"
            );
        }

        refresh
    }

    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    /// Dataset positions in presentation order.
    pub fn view(&self) -> &[usize] {
        &self.sorted
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn filter_runs(&self) -> u64 {
        self.filter_runs
    }

    pub fn sort_runs(&self) -> u64 {
        self.sort_runs
    }
}
