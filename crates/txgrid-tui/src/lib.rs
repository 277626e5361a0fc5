// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;
use txgrid_app::{
    ColumnKey, Diagnostics, EditTrigger, Grid, GridCommand, GridEvent, LoadState, Record,
    RecordId, SortDirection, SortState, Status,
};

const IDLE_POLL: Duration = Duration::from_millis(120);
const STATUS_TTL: Duration = Duration::from_secs(4);
const WHEEL_ROWS: i64 = 3;
const EDIT_CARET: &str = "▏";

/// Starts the dataset load. Results arrive on `tx` as
/// [`InternalEvent::DatasetLoaded`] or [`InternalEvent::LoadFailed`].
pub trait GridRuntime {
    fn spawn_load(&mut self, tx: Sender<InternalEvent>) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    DatasetLoaded(Vec<Record>),
    LoadFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Table,
    Filter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableCommand {
    MoveRow(isize),
    MoveColumn(isize),
    PageDown,
    PageUp,
    JumpFirstRow,
    JumpLastRow,
    ToggleSort,
    FocusFilter,
    StatusFilter(Option<Status>),
    Click { modifier: bool },
    StartEdit,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    cursor_row: usize,
    cursor_col: usize,
    focus: Focus,
    status: Option<String>,
    status_token: u64,
    body: Rect,
}

struct ScreenLayout {
    filter: Rect,
    table: Rect,
    debug: Rect,
    status: Rect,
}

pub fn run_app<R: GridRuntime>(grid: &mut Grid, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = runtime.spawn_load(internal_tx.clone()) {
        let events = grid.dispatch(GridCommand::LoadFailed(format!("{error:#}")), Instant::now());
        apply_grid_events(&mut view_data, &internal_tx, &events);
    }

    let result = event_loop(&mut terminal, grid, &mut view_data, &internal_tx, &internal_rx);

    disable_raw_mode().context("disable raw mode")?;
    execute!(
        io::stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )
    .context("leave alternate screen")?;
    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    grid: &mut Grid,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    internal_rx: &Receiver<InternalEvent>,
) -> Result<()> {
    loop {
        process_internal_events(grid, view_data, internal_tx, internal_rx);

        let anchor = cursor_record_id(grid, view_data);
        let events = grid.tick(Instant::now());
        if !events.is_empty() {
            follow_record(grid, view_data, anchor);
        }
        apply_grid_events(view_data, internal_tx, &events);

        let size = terminal.size().context("read terminal size")?;
        sync_viewport(grid, view_data, Rect::new(0, 0, size.width, size.height));

        terminal
            .draw(|frame| render(frame, grid, view_data))
            .context("draw frame")?;
        grid.record_frame(Instant::now());

        if !event::poll(poll_timeout(grid, Instant::now())).context("poll event")? {
            continue;
        }
        match event::read().context("read event")? {
            Event::Key(key) => {
                if handle_key_event(grid, view_data, internal_tx, key, Instant::now()) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse_event(grid, view_data, internal_tx, mouse),
            Event::Resize(_, _) => {}
            _ => {}
        }
    }
}

/// Sleeps no longer than the next debounce deadline so a settled filter
/// shows up on time.
fn poll_timeout(grid: &Grid, now: Instant) -> Duration {
    grid.next_deadline()
        .map(|deadline| deadline.saturating_duration_since(now))
        .map_or(IDLE_POLL, |until| until.min(IDLE_POLL))
}

fn process_internal_events(
    grid: &mut Grid,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                view_data.status = None;
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::DatasetLoaded(records) => {
                let events = grid.dispatch(GridCommand::DatasetLoaded(records), Instant::now());
                view_data.cursor_row = 0;
                apply_grid_events(view_data, tx, &events);
            }
            InternalEvent::LoadFailed(message) => {
                let events = grid.dispatch(GridCommand::LoadFailed(message), Instant::now());
                apply_grid_events(view_data, tx, &events);
            }
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_TTL);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(view_data: &mut ViewData, internal_tx: &Sender<InternalEvent>, message: String) {
    view_data.status = Some(message);
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn apply_grid_events(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    events: &[GridEvent],
) {
    for event in events {
        debug!(?event, "grid event");
        if let Some(message) = status_for_event(event) {
            emit_status(view_data, internal_tx, message);
        }
    }
}

fn status_for_event(event: &GridEvent) -> Option<String> {
    match event {
        GridEvent::SortChanged(sort) => Some(sort_status(*sort)),
        GridEvent::EditCommitted {
            id,
            column,
            version: Some(_),
        } => Some(format!("saved {} of #{id}", column.as_str())),
        GridEvent::EditCommitted { id, version: None, .. } => {
            Some(format!("record #{id} no longer exists; nothing saved"))
        }
        GridEvent::EditRejected(error) => Some(format!("edit rejected: {error}")),
        GridEvent::LoadStateChanged(LoadState::Ready { rows }) => {
            Some(format!("loaded {rows} rows"))
        }
        GridEvent::LoadStateChanged(LoadState::Failed(message)) => {
            Some(format!("load failed: {message}"))
        }
        _ => None,
    }
}

fn sort_status(sort: SortState) -> String {
    match sort {
        SortState::Unsorted => "sort cleared".to_owned(),
        SortState::By { key, direction } => {
            let direction = match direction {
                SortDirection::Asc => "ascending",
                SortDirection::Desc => "descending",
            };
            format!("sorted by {} {direction}", key.as_str())
        }
    }
}

fn screen_layout(area: Rect) -> ScreenLayout {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);
    ScreenLayout {
        filter: layout[0],
        table: layout[1],
        debug: layout[2],
        status: layout[3],
    }
}

/// Rows of the table that hold records: inside the border, below the header.
fn table_body(table: Rect) -> Rect {
    let inner = Rect {
        x: table.x.saturating_add(1),
        y: table.y.saturating_add(1),
        width: table.width.saturating_sub(2),
        height: table.height.saturating_sub(2),
    };
    Rect {
        y: inner.y.saturating_add(1),
        height: inner.height.saturating_sub(1),
        ..inner
    }
}

fn sync_viewport(grid: &mut Grid, view_data: &mut ViewData, area: Rect) {
    let body = table_body(screen_layout(area).table);
    view_data.body = body;
    let viewport_height_px = u64::from(body.height.max(1)) * grid.geometry().row_height_px();
    if grid.state().viewport.viewport_height_px != viewport_height_px {
        grid.dispatch(GridCommand::Resize { viewport_height_px }, Instant::now());
        reveal_cursor(grid, view_data);
    }
}

fn visible_lines(grid: &Grid) -> usize {
    let row_height = grid.geometry().row_height_px();
    (grid.state().viewport.viewport_height_px / row_height).max(1) as usize
}

fn first_visible_row(grid: &Grid) -> usize {
    (grid.state().viewport.scroll_offset_px / grid.geometry().row_height_px()) as usize
}

fn clamp_cursor(grid: &Grid, view_data: &mut ViewData) {
    view_data.cursor_row = view_data.cursor_row.min(grid.view_len().saturating_sub(1));
    view_data.cursor_col = view_data.cursor_col.min(ColumnKey::ALL.len() - 1);
}

/// Scrolls just far enough to bring the cursor row on screen.
fn reveal_cursor(grid: &mut Grid, view_data: &mut ViewData) {
    clamp_cursor(grid, view_data);
    let row_height = grid.geometry().row_height_px();
    let lines = visible_lines(grid);
    let first = first_visible_row(grid);
    let cursor = view_data.cursor_row;

    let target = if cursor < first {
        Some(cursor)
    } else if cursor >= first + lines {
        Some(cursor + 1 - lines)
    } else {
        None
    };
    if let Some(row) = target {
        grid.dispatch(
            GridCommand::Scroll {
                offset_px: row as u64 * row_height,
            },
            Instant::now(),
        );
    }
}

fn cursor_record_id(grid: &Grid, view_data: &ViewData) -> Option<RecordId> {
    grid.record_at(view_data.cursor_row).map(|record| record.id)
}

/// Moves the cursor to wherever `anchor` landed after the view was rebuilt.
/// A record that was filtered out leaves the cursor row alone.
fn follow_record(grid: &mut Grid, view_data: &mut ViewData, anchor: Option<RecordId>) {
    if let Some(index) = anchor.and_then(|id| grid.view_index_of(id)) {
        view_data.cursor_row = index;
    }
    reveal_cursor(grid, view_data);
}

fn cursor_column(view_data: &ViewData) -> ColumnKey {
    ColumnKey::ALL[view_data.cursor_col.min(ColumnKey::ALL.len() - 1)]
}

fn is_quit_chord(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_key_event(
    grid: &mut Grid,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
    now: Instant,
) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    if is_quit_chord(key) {
        return true;
    }
    if grid.state().edit.is_editing() {
        handle_edit_key(grid, view_data, internal_tx, key, now);
        return false;
    }
    if view_data.focus == Focus::Filter {
        handle_filter_key(grid, view_data, internal_tx, key, now);
        return false;
    }
    if key.code == KeyCode::Char('q') && key.modifiers == KeyModifiers::NONE {
        return true;
    }
    if let Some(command) = table_command_for_key(key) {
        apply_table_command(grid, view_data, internal_tx, command, now);
    }
    false
}

fn handle_edit_key(
    grid: &mut Grid,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
    now: Instant,
) {
    let Some(cell) = grid.state().edit.cell() else {
        return;
    };
    let mut value = cell.pending_value.clone();
    let command = match key.code {
        KeyCode::Enter => GridCommand::EndEdit(EditTrigger::Confirm),
        KeyCode::Esc => GridCommand::EndEdit(EditTrigger::Cancel),
        KeyCode::Tab | KeyCode::BackTab => GridCommand::EndEdit(EditTrigger::FocusLost),
        KeyCode::Backspace => {
            value.pop();
            GridCommand::UpdateEdit(value)
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            value.push(ch);
            GridCommand::UpdateEdit(value)
        }
        _ => return,
    };
    let events = grid.dispatch(command, now);
    apply_grid_events(view_data, internal_tx, &events);
    reveal_cursor(grid, view_data);
}

fn handle_filter_key(
    grid: &mut Grid,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
    now: Instant,
) {
    let mut input = grid.state().merchant_input.clone();
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            view_data.focus = Focus::Table;
            return;
        }
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.push(ch),
        _ => return,
    }
    let events = grid.dispatch(GridCommand::MerchantInput(input), now);
    apply_grid_events(view_data, internal_tx, &events);
}

fn table_command_for_key(key: KeyEvent) -> Option<TableCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(TableCommand::MoveRow(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(TableCommand::MoveRow(-1)),
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => Some(TableCommand::MoveColumn(-1)),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => Some(TableCommand::MoveColumn(1)),
        (KeyCode::PageDown, _) => Some(TableCommand::PageDown),
        (KeyCode::PageUp, _) => Some(TableCommand::PageUp),
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Some(TableCommand::JumpFirstRow),
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Some(TableCommand::JumpLastRow),
        (KeyCode::Char('s'), KeyModifiers::NONE) => Some(TableCommand::ToggleSort),
        (KeyCode::Char('/'), _) => Some(TableCommand::FocusFilter),
        (KeyCode::Char('1'), _) => Some(TableCommand::StatusFilter(Some(Status::Completed))),
        (KeyCode::Char('2'), _) => Some(TableCommand::StatusFilter(Some(Status::Pending))),
        (KeyCode::Char('3'), _) => Some(TableCommand::StatusFilter(Some(Status::Failed))),
        (KeyCode::Char('0'), _) => Some(TableCommand::StatusFilter(None)),
        (KeyCode::Char(' '), _) => Some(TableCommand::Click { modifier: false }),
        (KeyCode::Char('v'), _) => Some(TableCommand::Click { modifier: true }),
        (KeyCode::Char('e'), _) | (KeyCode::Enter, _) => Some(TableCommand::StartEdit),
        _ => None,
    }
}

fn apply_table_command(
    grid: &mut Grid,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: TableCommand,
    now: Instant,
) {
    let page = visible_lines(grid) as isize;
    let events = match command {
        TableCommand::MoveRow(delta) => {
            move_row(grid, view_data, delta);
            Vec::new()
        }
        TableCommand::PageDown => {
            move_row(grid, view_data, page);
            Vec::new()
        }
        TableCommand::PageUp => {
            move_row(grid, view_data, -page);
            Vec::new()
        }
        TableCommand::JumpFirstRow => {
            view_data.cursor_row = 0;
            Vec::new()
        }
        TableCommand::JumpLastRow => {
            view_data.cursor_row = grid.view_len().saturating_sub(1);
            Vec::new()
        }
        TableCommand::MoveColumn(delta) => {
            let last = ColumnKey::ALL.len() as isize - 1;
            view_data.cursor_col = (view_data.cursor_col as isize + delta).clamp(0, last) as usize;
            Vec::new()
        }
        TableCommand::ToggleSort => {
            let anchor = cursor_record_id(grid, view_data);
            let events = grid.dispatch(GridCommand::ToggleSort(cursor_column(view_data)), now);
            follow_record(grid, view_data, anchor);
            events
        }
        TableCommand::FocusFilter => {
            view_data.focus = Focus::Filter;
            Vec::new()
        }
        TableCommand::StatusFilter(status) => {
            let anchor = cursor_record_id(grid, view_data);
            let events = grid.dispatch(GridCommand::SetStatusFilter(status), now);
            follow_record(grid, view_data, anchor);
            events
        }
        TableCommand::Click { modifier } => match cursor_record_id(grid, view_data) {
            Some(id) => grid.dispatch(GridCommand::ClickRow { id, modifier }, now),
            None => Vec::new(),
        },
        TableCommand::StartEdit => match cursor_record_id(grid, view_data) {
            Some(id) => grid.dispatch(
                GridCommand::StartEdit {
                    id,
                    column: cursor_column(view_data),
                },
                now,
            ),
            None => Vec::new(),
        },
    };
    apply_grid_events(view_data, internal_tx, &events);
    reveal_cursor(grid, view_data);
}

fn move_row(grid: &Grid, view_data: &mut ViewData, delta: isize) {
    let last = grid.view_len().saturating_sub(1) as isize;
    view_data.cursor_row = (view_data.cursor_row as isize + delta).clamp(0, last.max(0)) as usize;
}

fn handle_mouse_event(
    grid: &mut Grid,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    mouse: MouseEvent,
) {
    let now = Instant::now();
    let leaves_table_cell = matches!(
        mouse.kind,
        MouseEventKind::ScrollDown
            | MouseEventKind::ScrollUp
            | MouseEventKind::Down(MouseButton::Left)
    );
    if leaves_table_cell && grid.state().edit.is_editing() {
        let events = grid.dispatch(GridCommand::EndEdit(EditTrigger::FocusLost), now);
        apply_grid_events(view_data, internal_tx, &events);
        // A rejected value keeps the editor open until it is fixed or cancelled.
        if grid.state().edit.is_editing() {
            return;
        }
    }
    let events = match mouse.kind {
        MouseEventKind::ScrollDown => grid.dispatch(
            GridCommand::ScrollBy {
                delta_rows: WHEEL_ROWS,
            },
            now,
        ),
        MouseEventKind::ScrollUp => grid.dispatch(
            GridCommand::ScrollBy {
                delta_rows: -WHEEL_ROWS,
            },
            now,
        ),
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(index) = row_at(grid, view_data.body, mouse.column, mouse.row) else {
                return;
            };
            let Some(id) = grid.record_at(index).map(|record| record.id) else {
                return;
            };
            view_data.cursor_row = index;
            let modifier = mouse
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
            grid.dispatch(GridCommand::ClickRow { id, modifier }, now)
        }
        _ => return,
    };
    apply_grid_events(view_data, internal_tx, &events);
}

/// View index under a screen position inside the table body.
fn row_at(grid: &Grid, body: Rect, column: u16, row: u16) -> Option<usize> {
    let inside = column >= body.x
        && column < body.x.saturating_add(body.width)
        && row >= body.y
        && row < body.y.saturating_add(body.height);
    if !inside {
        return None;
    }
    let index = first_visible_row(grid) + usize::from(row - body.y);
    (index < grid.view_len()).then_some(index)
}

fn render(frame: &mut ratatui::Frame<'_>, grid: &Grid, view_data: &ViewData) {
    let layout = screen_layout(frame.area());

    let filter = Paragraph::new(filter_line_text(grid, view_data))
        .block(Block::default().title("txgrid").borders(Borders::ALL));
    frame.render_widget(filter, layout.filter);

    render_table(frame, layout.table, grid, view_data);

    let debug_panel = Paragraph::new(diagnostics_text(&grid.diagnostics()))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().title("debug").borders(Borders::ALL));
    frame.render_widget(debug_panel, layout.debug);

    let status = Paragraph::new(status_text(grid, view_data))
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(status, layout.status);
}

fn filter_line_text(grid: &Grid, view_data: &ViewData) -> String {
    let frame = grid.frame();
    let caret = if view_data.focus == Focus::Filter {
        EDIT_CARET
    } else {
        ""
    };
    let status = match frame.filter.status() {
        Some(status) => status.as_str(),
        None => "all",
    };
    let settling = if grid.filter_pending() {
        " (filtering...)"
    } else {
        ""
    };
    format!(
        "merchant: {}{caret}{settling}  status: {status}  Showing {} of {} rows",
        frame.merchant_input, frame.shown_rows, frame.dataset_rows
    )
}

fn diagnostics_text(diagnostics: &Diagnostics) -> String {
    format!(
        "FPS: {}  Rendered rows: {}  Row start / total: {} / {}  Filter runs: {}  Sort runs: {}",
        diagnostics.fps,
        diagnostics.rendered_rows,
        diagnostics.window_start,
        diagnostics.total_rows,
        diagnostics.filter_runs,
        diagnostics.sort_runs,
    )
}

fn status_text(grid: &Grid, view_data: &ViewData) -> String {
    if let Some(status) = &view_data.status {
        return status.clone();
    }
    if grid.state().edit.is_editing() {
        return "enter save  esc cancel  tab save and leave".to_owned();
    }
    match view_data.focus {
        Focus::Filter => "type to filter merchants  enter/esc done".to_owned(),
        Focus::Table => {
            "j/k move  s sort  / filter  1-3 status  0 all  space select  v toggle  e edit  q quit"
                .to_owned()
        }
    }
}

fn header_label(sort: SortState, column: ColumnKey) -> String {
    format!("{}{}", column.label(), sort.indicator(column))
}

fn column_width(column: ColumnKey) -> Constraint {
    match column {
        ColumnKey::Id => Constraint::Length(8),
        ColumnKey::Date => Constraint::Length(24),
        ColumnKey::Merchant => Constraint::Min(14),
        ColumnKey::Category => Constraint::Length(13),
        ColumnKey::Amount => Constraint::Length(12),
        ColumnKey::Status => Constraint::Length(9),
        ColumnKey::Description => Constraint::Min(16),
    }
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, grid: &Grid, view_data: &ViewData) {
    let render_frame = grid.frame();
    let message = match render_frame.load {
        LoadState::Loading => Some(("loading dataset...".to_owned(), Color::Gray)),
        LoadState::Failed(error) => Some((format!("load failed: {error}"), Color::Red)),
        LoadState::Ready { .. } => None,
    };
    if let Some((text, color)) = message {
        let body = Paragraph::new(text)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("transactions").borders(Borders::ALL));
        frame.render_widget(body, area);
        return;
    }

    let header_cells = ColumnKey::ALL.into_iter().map(|column| {
        Cell::from(header_label(render_frame.sort, column)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells);

    let first = first_visible_row(grid);
    let skip = first.saturating_sub(render_frame.window.start);
    let lines = usize::from(table_body(area).height);
    let rows = render_frame
        .visible
        .iter()
        .enumerate()
        .skip(skip)
        .take(lines)
        .map(|(offset, record)| {
            let view_index = render_frame.window.start + offset;
            let cursor_row = view_index == view_data.cursor_row;
            let selected = render_frame.selection.is_selected(record.id);
            let cells = ColumnKey::ALL
                .into_iter()
                .enumerate()
                .map(|(column_index, column)| {
                    let text = if render_frame.edit.is_editing_cell(record.id, column) {
                        let pending = render_frame
                            .edit
                            .cell()
                            .map(|cell| cell.pending_value.as_str())
                            .unwrap_or_default();
                        format!("{pending}{EDIT_CARET}")
                    } else {
                        record.field(column).display().into_owned()
                    };
                    let mut line = Line::from(text);
                    if column.field_type().is_numeric() {
                        line = line.alignment(Alignment::Right);
                    }

                    let mut style = Style::default();
                    if column == ColumnKey::Status {
                        style = style.fg(status_color(record.status));
                    }
                    if selected {
                        style = style.bg(Color::Blue);
                    }
                    if cursor_row {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    if cursor_row && column_index == view_data.cursor_col {
                        style = Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD);
                    }
                    Cell::from(line).style(style)
                })
                .collect::<Vec<_>>();
            Row::new(cells)
        });

    let widths = ColumnKey::ALL.into_iter().map(column_width);
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(table_title(render_frame.shown_rows, render_frame.selection.len()))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn table_title(shown_rows: usize, selected: usize) -> String {
    match (shown_rows, selected) {
        (0, _) => "transactions (no matching rows)".to_owned(),
        (_, 0) => "transactions".to_owned(),
        (_, selected) => format!("transactions ({selected} selected)"),
    }
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Completed => Color::Green,
        Status::Pending => Color::Yellow,
        Status::Failed => Color::Red,
    }
}
