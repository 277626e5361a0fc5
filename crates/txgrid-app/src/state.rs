// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use crate::edit::{EditResult, EditSession, EditTrigger};
use crate::filter::FilterState;
use crate::frame_rate::FrameRateMonitor;
use crate::pipeline::ViewPipeline;
use crate::selection::SelectionState;
use crate::sort::SortState;
use crate::store::{DatasetStore, DatasetVersion, EditError, EditOutcome};
use crate::window::{
    DEFAULT_VIEWPORT_HEIGHT_PX, RowGeometry, Viewport, Window, compute_window,
    max_scroll_offset_px, total_height_px,
};
use crate::{ColumnKey, Record, RecordId, Status};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready {
        rows: usize,
    },
    /// The load was rejected; the message is the error's own text.
    Failed(String),
}

/// One immutable snapshot of everything the user can change. Each dispatched
/// command replaces the snapshot held by [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridState {
    /// Raw merchant text as typed, before the debounce settles.
    pub merchant_input: String,
    pub filter: FilterState,
    pub sort: SortState,
    pub viewport: Viewport,
    pub selection: SelectionState,
    pub edit: EditSession,
    pub load: LoadState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCommand {
    Scroll { offset_px: u64 },
    ScrollBy { delta_rows: i64 },
    Resize { viewport_height_px: u64 },
    MerchantInput(String),
    SetStatusFilter(Option<Status>),
    ToggleSort(ColumnKey),
    ClickRow { id: RecordId, modifier: bool },
    StartEdit { id: RecordId, column: ColumnKey },
    UpdateEdit(String),
    EndEdit(EditTrigger),
    DatasetLoaded(Vec<Record>),
    LoadFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    ViewportChanged(Viewport),
    /// Raw input accepted; the filter applies once typing pauses.
    MerchantInputChanged(String),
    FilterApplied {
        shown: usize,
        total: usize,
    },
    SortChanged(SortState),
    SelectionChanged {
        selected: usize,
    },
    EditStarted {
        id: RecordId,
        column: ColumnKey,
    },
    EditUpdated,
    EditCommitted {
        id: RecordId,
        column: ColumnKey,
        /// `None` when the row no longer exists and nothing was written.
        version: Option<DatasetVersion>,
    },
    EditCancelled {
        id: RecordId,
        column: ColumnKey,
    },
    EditRejected(EditError),
    LoadStateChanged(LoadState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub geometry: RowGeometry,
    pub debounce: Duration,
    pub viewport_height_px: u64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            geometry: RowGeometry::default(),
            debounce: DEFAULT_DEBOUNCE,
            viewport_height_px: DEFAULT_VIEWPORT_HEIGHT_PX,
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct RenderFrame<'a> {
    pub visible: Vec<&'a Record>,
    pub window: Window,
    pub total_height_px: u64,
    pub row_height_px: u64,
    pub sort: SortState,
    pub merchant_input: &'a str,
    pub filter: &'a FilterState,
    pub selection: &'a SelectionState,
    pub edit: &'a EditSession,
    pub load: &'a LoadState,
    pub shown_rows: usize,
    pub dataset_rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    pub fps: u32,
    pub rendered_rows: usize,
    pub window_start: usize,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub dataset_rows: usize,
    pub filter_runs: u64,
    pub sort_runs: u64,
}

#[derive(Debug)]
pub struct Grid {
    store: DatasetStore,
    pipeline: ViewPipeline,
    state: GridState,
    geometry: RowGeometry,
    merchant_debounce: Debouncer<String>,
    frames: FrameRateMonitor,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GridOptions::default())
    }
}

impl Grid {
    pub fn new(options: GridOptions) -> Self {
        let state = GridState {
            viewport: Viewport {
                scroll_offset_px: 0,
                viewport_height_px: options.viewport_height_px.max(1),
            },
            ..GridState::default()
        };
        let mut grid = Self {
            store: DatasetStore::empty(),
            pipeline: ViewPipeline::default(),
            state,
            geometry: options.geometry,
            merchant_debounce: Debouncer::new(options.debounce),
            frames: FrameRateMonitor::default(),
        };
        grid.refresh_view();
        grid
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn geometry(&self) -> RowGeometry {
        self.geometry
    }

    pub fn view_len(&self) -> usize {
        self.pipeline.len()
    }

    /// Record at `index` in presentation order.
    pub fn record_at(&self, index: usize) -> Option<&Record> {
        self.pipeline
            .view()
            .get(index)
            .and_then(|position| self.store.records().get(*position))
    }

    pub fn view_index_of(&self, id: RecordId) -> Option<usize> {
        let position = self.store.position_of(id)?;
        self.pipeline.view().iter().position(|item| *item == position)
    }

    /// True while a merchant query is waiting out its quiet period.
    pub fn filter_pending(&self) -> bool {
        self.merchant_debounce.is_pending()
    }

    /// Next instant at which [`Grid::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.merchant_debounce.deadline()
    }

    pub fn dispatch(&mut self, command: GridCommand, now: Instant) -> Vec<GridEvent> {
        match command {
            GridCommand::Scroll { offset_px } => self.scroll_to(offset_px),
            GridCommand::ScrollBy { delta_rows } => {
                let delta_px = delta_rows
                    .unsigned_abs()
                    .saturating_mul(self.geometry.row_height_px());
                let current = self.state.viewport.scroll_offset_px;
                let offset = if delta_rows < 0 {
                    current.saturating_sub(delta_px)
                } else {
                    current.saturating_add(delta_px)
                };
                self.scroll_to(offset)
            }
            GridCommand::Resize { viewport_height_px } => {
                let viewport = Viewport {
                    viewport_height_px: viewport_height_px.max(1),
                    ..self.state.viewport
                };
                self.replace_state(GridState {
                    viewport,
                    ..self.state.clone()
                });
                let mut events = vec![GridEvent::ViewportChanged(self.state.viewport)];
                events.extend(self.clamp_scroll());
                events
            }
            GridCommand::MerchantInput(input) => {
                self.merchant_debounce.push(input.clone(), now);
                self.replace_state(GridState {
                    merchant_input: input.clone(),
                    ..self.state.clone()
                });
                vec![GridEvent::MerchantInputChanged(input)]
            }
            GridCommand::SetStatusFilter(status) => {
                let filter = self.state.filter.with_status(status);
                self.apply_filter(filter)
            }
            GridCommand::ToggleSort(column) => {
                let sort = self.state.sort.toggled(column);
                self.replace_state(GridState {
                    sort,
                    ..self.state.clone()
                });
                self.refresh_view();
                let mut events = vec![GridEvent::SortChanged(sort)];
                events.extend(self.clamp_scroll());
                events
            }
            GridCommand::ClickRow { id, modifier } => {
                let selection = self.state.selection.clicked(id, modifier);
                let selected = selection.len();
                self.replace_state(GridState {
                    selection,
                    ..self.state.clone()
                });
                vec![GridEvent::SelectionChanged { selected }]
            }
            GridCommand::StartEdit { id, column } => self.start_edit(id, column),
            GridCommand::UpdateEdit(value) => {
                if !self.state.edit.is_editing() {
                    return Vec::new();
                }
                let mut edit = self.state.edit.clone();
                edit.update(value);
                self.replace_state(GridState {
                    edit,
                    ..self.state.clone()
                });
                vec![GridEvent::EditUpdated]
            }
            GridCommand::EndEdit(trigger) => {
                let mut edit = self.state.edit.clone();
                let result = edit.finish(&mut self.store, trigger);
                self.replace_state(GridState {
                    edit,
                    ..self.state.clone()
                });
                self.edit_events(result)
            }
            GridCommand::DatasetLoaded(records) => self.load_records(records),
            GridCommand::LoadFailed(message) => {
                warn!(error = %message, "dataset load failed");
                self.set_load(LoadState::Failed(message))
            }
        }
    }

    /// Lets a settled merchant query through to the filter stage.
    pub fn tick(&mut self, now: Instant) -> Vec<GridEvent> {
        match self.merchant_debounce.poll(now) {
            Some(input) => {
                let filter = self.state.filter.with_merchant_query(&input);
                self.apply_filter(filter)
            }
            None => Vec::new(),
        }
    }

    pub fn record_frame(&mut self, now: Instant) {
        self.frames.record_frame(now);
    }

    pub fn window(&self) -> Window {
        compute_window(self.pipeline.len(), self.state.viewport, self.geometry)
    }

    pub fn frame(&self) -> RenderFrame<'_> {
        let window = self.window();
        let visible = self.pipeline.view()[window.range()]
            .iter()
            .filter_map(|position| self.store.records().get(*position))
            .collect();
        RenderFrame {
            visible,
            window,
            total_height_px: total_height_px(self.pipeline.len(), self.geometry),
            row_height_px: self.geometry.row_height_px(),
            sort: self.state.sort,
            merchant_input: &self.state.merchant_input,
            filter: &self.state.filter,
            selection: &self.state.selection,
            edit: &self.state.edit,
            load: &self.state.load,
            shown_rows: self.pipeline.len(),
            dataset_rows: self.store.len(),
        }
    }

    pub fn diagnostics(&self) -> Diagnostics {
        let window = self.window();
        Diagnostics {
            fps: self.frames.fps(),
            rendered_rows: window.len(),
            window_start: window.start,
            total_rows: self.pipeline.len(),
            filtered_rows: self.pipeline.filtered().len(),
            dataset_rows: self.store.len(),
            filter_runs: self.pipeline.filter_runs(),
            sort_runs: self.pipeline.sort_runs(),
        }
    }

    fn replace_state(&mut self, next: GridState) {
        self.state = next;
    }

    fn refresh_view(&mut self) {
        self.pipeline
            .refresh(&self.store, &self.state.filter, self.state.sort);
    }

    fn scroll_to(&mut self, offset_px: u64) -> Vec<GridEvent> {
        let max = max_scroll_offset_px(self.pipeline.len(), self.state.viewport, self.geometry);
        let offset_px = offset_px.min(max);
        if offset_px == self.state.viewport.scroll_offset_px {
            return Vec::new();
        }
        let viewport = Viewport {
            scroll_offset_px: offset_px,
            ..self.state.viewport
        };
        self.replace_state(GridState {
            viewport,
            ..self.state.clone()
        });
        vec![GridEvent::ViewportChanged(viewport)]
    }

    fn clamp_scroll(&mut self) -> Vec<GridEvent> {
        self.scroll_to(self.state.viewport.scroll_offset_px)
    }

    fn apply_filter(&mut self, filter: FilterState) -> Vec<GridEvent> {
        if filter == self.state.filter {
            return Vec::new();
        }
        self.replace_state(GridState {
            filter,
            ..self.state.clone()
        });
        self.refresh_view();
        let mut events = vec![GridEvent::FilterApplied {
            shown: self.pipeline.len(),
            total: self.store.len(),
        }];
        events.extend(self.clamp_scroll());
        events
    }

    fn start_edit(&mut self, id: RecordId, column: ColumnKey) -> Vec<GridEvent> {
        let initial = self
            .store
            .get(id)
            .map(|record| record.edit_text(column))
            .unwrap_or_default();
        let mut edit = self.state.edit.clone();
        let result = edit.start(&mut self.store, id, column, initial);
        let started = result.is_ok() && edit.is_editing_cell(id, column);
        self.replace_state(GridState {
            edit,
            ..self.state.clone()
        });

        let mut events = self.edit_events(result);
        if started {
            events.push(GridEvent::EditStarted { id, column });
        }
        events
    }

    fn edit_events(&mut self, result: Result<EditResult, EditError>) -> Vec<GridEvent> {
        match result {
            Ok(EditResult::NoSession) => Vec::new(),
            Ok(EditResult::Cancelled(cell)) => vec![GridEvent::EditCancelled {
                id: cell.row_id,
                column: cell.column,
            }],
            Ok(EditResult::Committed { cell, outcome }) => {
                let version = match outcome {
                    EditOutcome::Applied { version, .. } => Some(version),
                    EditOutcome::MissingRow => None,
                };
                if version.is_some() {
                    self.refresh_view();
                }
                let mut events = vec![GridEvent::EditCommitted {
                    id: cell.row_id,
                    column: cell.column,
                    version,
                }];
                events.extend(self.clamp_scroll());
                events
            }
            Err(error) => {
                warn!(%error, "edit rejected");
                vec![GridEvent::EditRejected(error)]
            }
        }
    }

    fn load_records(&mut self, records: Vec<Record>) -> Vec<GridEvent> {
        match self.store.replace(records) {
            Ok(version) => {
                let rows = self.store.len();
                info!(rows, version = version.get(), "dataset ready");
                let mut events = Vec::new();
                if let EditResult::Cancelled(cell) = self.state.edit.clone().cancel() {
                    events.push(GridEvent::EditCancelled {
                        id: cell.row_id,
                        column: cell.column,
                    });
                }
                self.replace_state(GridState {
                    edit: EditSession::Idle,
                    ..self.state.clone()
                });
                self.frames.reset();
                self.refresh_view();
                events.extend(self.set_load(LoadState::Ready { rows }));
                events.extend(self.clamp_scroll());
                events
            }
            Err(error) => {
                warn!(%error, "dataset rejected");
                self.set_load(LoadState::Failed(error.to_string()))
            }
        }
    }

    fn set_load(&mut self, load: LoadState) -> Vec<GridEvent> {
        self.replace_state(GridState {
            load: load.clone(),
            ..self.state.clone()
        });
        vec![GridEvent::LoadStateChanged(load)]
    }
}
