// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::time::{Duration, Instant};
use txgrid_app::{
    ColumnKey, EditTrigger, Grid, GridCommand, GridEvent, GridOptions, LoadState, RecordId,
    RowGeometry, SelectionState, SortDirection, SortState, Viewport, compute_window,
};
use txgrid_testkit::{fixture_records, sample_records};

fn ready_grid(records: Vec<txgrid_app::Record>) -> (Grid, Instant) {
    let now = Instant::now();
    let mut grid = Grid::default();
    grid.dispatch(GridCommand::DatasetLoaded(records), now);
    (grid, now)
}

fn view_ids(grid: &Grid) -> Vec<i64> {
    (0..grid.view_len())
        .filter_map(|index| grid.record_at(index))
        .map(|record| record.id.get())
        .collect()
}

#[test]
fn merchant_query_keeps_only_matching_record() {
    let (mut grid, now) = ready_grid(fixture_records());
    grid.dispatch(GridCommand::MerchantInput("3".to_owned()), now);
    assert_eq!(view_ids(&grid), vec![1, 2, 3, 4, 5]);

    let events = grid.tick(now + Duration::from_millis(300));
    assert_eq!(events[0], GridEvent::FilterApplied { shown: 1, total: 5 });
    assert_eq!(view_ids(&grid), vec![3]);
}

#[test]
fn merchant_query_ignores_case_and_padding() {
    let (mut grid, now) = ready_grid(fixture_records());
    grid.dispatch(GridCommand::MerchantInput("  MERCHANT 5 ".to_owned()), now);
    grid.tick(now + Duration::from_secs(1));
    assert_eq!(view_ids(&grid), vec![5]);
}

#[test]
fn million_row_window() {
    let geometry = RowGeometry::new(40, 10).expect("positive row height");
    let window = compute_window(
        1_000_000,
        Viewport {
            scroll_offset_px: 4_000,
            viewport_height_px: 600,
        },
        geometry,
    );
    assert_eq!((window.start, window.end), (90, 125));
    assert_eq!(window.len(), 35);
    assert_eq!(window.offset_y_px, 3_600);
}

#[test]
fn million_row_grid_renders_only_the_window() {
    let now = Instant::now();
    let mut grid = Grid::new(GridOptions::default());
    grid.dispatch(GridCommand::DatasetLoaded(sample_records(1_000_000, 3)), now);
    grid.dispatch(GridCommand::Scroll { offset_px: 4_000 }, now);

    let frame = grid.frame();
    assert_eq!(frame.visible.len(), 35);
    assert_eq!(frame.visible[0].id, RecordId::new(91));
    assert_eq!(frame.total_height_px, 40_000_000);
    assert_eq!(grid.diagnostics().rendered_rows, 35);
}

#[test]
fn click_then_modifier_click() {
    let (mut grid, now) = ready_grid(sample_records(20, 8));
    grid.dispatch(
        GridCommand::ClickRow {
            id: RecordId::new(3),
            modifier: false,
        },
        now,
    );
    grid.dispatch(
        GridCommand::ClickRow {
            id: RecordId::new(4),
            modifier: true,
        },
        now,
    );
    assert_eq!(
        grid.state().selection,
        SelectionState::from_ids([RecordId::new(3), RecordId::new(4)])
    );

    grid.dispatch(
        GridCommand::ClickRow {
            id: RecordId::new(7),
            modifier: false,
        },
        now,
    );
    assert_eq!(
        grid.state().selection,
        SelectionState::from_ids([RecordId::new(7)])
    );

    let events = grid.dispatch(
        GridCommand::ClickRow {
            id: RecordId::new(3),
            modifier: true,
        },
        now,
    );
    assert_eq!(events, vec![GridEvent::SelectionChanged { selected: 2 }]);
    assert_eq!(
        grid.state().selection,
        SelectionState::from_ids([RecordId::new(7), RecordId::new(3)])
    );
}

#[test]
fn edit_merchant_commits_on_confirm() {
    let (mut grid, now) = ready_grid(sample_records(20, 8));
    let before = grid.store().records().to_vec();

    grid.dispatch(
        GridCommand::StartEdit {
            id: RecordId::new(9),
            column: ColumnKey::Merchant,
        },
        now,
    );
    grid.dispatch(GridCommand::UpdateEdit("Acme".to_owned()), now);
    let events = grid.dispatch(GridCommand::EndEdit(EditTrigger::Confirm), now);

    assert!(matches!(
        events[0],
        GridEvent::EditCommitted {
            version: Some(_),
            ..
        }
    ));
    assert!(!grid.state().edit.is_editing());
    for (old, new) in before.iter().zip(grid.store().records()) {
        if old.id == RecordId::new(9) {
            assert_eq!(new.merchant, "Acme");
            assert_eq!(new.amount_cents, old.amount_cents);
            assert_eq!(new.description, old.description);
        } else {
            assert_eq!(new, old);
        }
    }
}

#[test]
fn burst_of_keystrokes_settles_once() {
    let (mut grid, start) = ready_grid(fixture_records());
    let runs_before = grid.diagnostics().filter_runs;

    let burst = ["M", "Me", "Mer", "Merc", "Merchant 2"];
    let mut last = start;
    for (step, input) in burst.iter().enumerate() {
        last = start + Duration::from_millis(50 * step as u64);
        grid.dispatch(GridCommand::MerchantInput((*input).to_owned()), last);
        assert!(grid.tick(last).is_empty());
    }

    assert!(grid.tick(last + Duration::from_millis(299)).is_empty());
    assert_eq!(grid.state().filter.merchant_query(), "");

    grid.tick(last + Duration::from_millis(300));
    assert_eq!(grid.state().filter.merchant_query(), "merchant 2");
    assert_eq!(view_ids(&grid), vec![2]);
    assert_eq!(grid.diagnostics().filter_runs, runs_before + 1);
}

#[test]
fn descending_sort_reverses_ties() {
    let mut records = fixture_records();
    for record in &mut records {
        record.amount_cents = 500;
    }
    let (mut grid, now) = ready_grid(records);

    grid.dispatch(GridCommand::ToggleSort(ColumnKey::Amount), now);
    assert_eq!(view_ids(&grid), vec![1, 2, 3, 4, 5]);

    let events = grid.dispatch(GridCommand::ToggleSort(ColumnKey::Amount), now);
    assert_eq!(
        events[0],
        GridEvent::SortChanged(SortState::By {
            key: ColumnKey::Amount,
            direction: SortDirection::Desc,
        })
    );
    assert_eq!(view_ids(&grid), vec![5, 4, 3, 2, 1]);
}

#[test]
fn failed_load_reaches_the_render_frame() {
    let now = Instant::now();
    let mut grid = Grid::default();
    assert_eq!(*grid.frame().load, LoadState::Loading);

    grid.dispatch(GridCommand::LoadFailed("parse dataset: EOF".to_owned()), now);
    let frame = grid.frame();
    assert_eq!(
        *frame.load,
        LoadState::Failed("parse dataset: EOF".to_owned())
    );
    assert!(frame.visible.is_empty());
}
