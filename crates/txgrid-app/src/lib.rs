// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod debounce;
pub mod edit;
pub mod filter;
pub mod frame_rate;
pub mod ids;
pub mod model;
pub mod money;
pub mod pipeline;
pub mod selection;
pub mod sort;
pub mod state;
pub mod store;
pub mod window;

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer, MAX_DEBOUNCE};
pub use edit::{EditResult, EditSession, EditTrigger, EditingCell};
pub use filter::{FilterState, filter};
pub use frame_rate::FrameRateMonitor;
pub use ids::*;
pub use model::*;
pub use money::{MoneyError, format_amount, parse_amount_cents};
pub use pipeline::ViewPipeline;
pub use selection::SelectionState;
pub use sort::{SortDirection, SortState, sort};
pub use state::*;
pub use store::{DatasetStore, DatasetVersion, DuplicateIdError, EditError, EditOutcome};
pub use window::{RowGeometry, Viewport, Window, compute_window, total_height_px};
