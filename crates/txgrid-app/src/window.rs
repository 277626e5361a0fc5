// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::ops::Range;

pub const DEFAULT_ROW_HEIGHT_PX: u64 = 40;
pub const DEFAULT_BUFFER_ROWS: u64 = 10;
pub const DEFAULT_VIEWPORT_HEIGHT_PX: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub scroll_offset_px: u64,
    pub viewport_height_px: u64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_offset_px: 0,
            viewport_height_px: DEFAULT_VIEWPORT_HEIGHT_PX,
        }
    }
}

/// Session-wide row geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowGeometry {
    row_height_px: u64,
    buffer_rows: u64,
}

impl RowGeometry {
    /// Returns `None` for a zero row height.
    pub const fn new(row_height_px: u64, buffer_rows: u64) -> Option<Self> {
        if row_height_px == 0 {
            return None;
        }
        Some(Self {
            row_height_px,
            buffer_rows,
        })
    }

    pub const fn row_height_px(self) -> u64 {
        self.row_height_px
    }

    pub const fn buffer_rows(self) -> u64 {
        self.buffer_rows
    }
}

impl Default for RowGeometry {
    fn default() -> Self {
        Self {
            row_height_px: DEFAULT_ROW_HEIGHT_PX,
            buffer_rows: DEFAULT_BUFFER_ROWS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    pub offset_y_px: u64,
}

impl Window {
    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// Maps a scroll position onto the row slice that needs presenting, including
/// `buffer_rows` of overscan on each side. Constant time in `total_rows`.
///
/// `start` is additionally clamped to `end`, so `start <= end <= total_rows`
/// holds even when the offset points past the last row.
pub fn compute_window(total_rows: usize, viewport: Viewport, geometry: RowGeometry) -> Window {
    let row_height = geometry.row_height_px;
    let buffer = geometry.buffer_rows;

    let first_row = viewport.scroll_offset_px / row_height;
    let start = first_row.saturating_sub(buffer);
    let visible = viewport
        .viewport_height_px
        .div_ceil(row_height)
        .saturating_add(buffer.saturating_mul(2));

    let total = total_rows as u64;
    let end = start.saturating_add(visible).min(total);
    let start = start.min(end);

    Window {
        start: start as usize,
        end: end as usize,
        offset_y_px: start.saturating_mul(row_height),
    }
}

pub fn total_height_px(total_rows: usize, geometry: RowGeometry) -> u64 {
    (total_rows as u64).saturating_mul(geometry.row_height_px)
}

/// Largest scroll offset that still shows the last row at the bottom.
pub fn max_scroll_offset_px(total_rows: usize, viewport: Viewport, geometry: RowGeometry) -> u64 {
    total_height_px(total_rows, geometry).saturating_sub(viewport.viewport_height_px)
}
