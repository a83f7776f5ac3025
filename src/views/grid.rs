use std::sync::mpsc::Sender;
use std::time::Instant;

use iocraft::prelude::*;

use crate::actions;
use crate::color::ColorDepth;
use crate::components::footer::{self, Footer, RenderedFooter};
use crate::components::pagination::{Pagination, RenderedPagination};
use crate::components::tab_bar::{RenderedTabBar, Tab, TabBar};
use crate::components::table::{IssueTable, RenderedTable, TableBuildConfig};
use crate::components::text_input::{RenderedTextInput, TextInput};
use crate::engine::{EngineHandle, Event, Request};
use crate::grid::{ContentView, IssueGrid, LoadStatus, LoadTicket};
use crate::theme::ResolvedTheme;

use super::keys::{GridCommand, InputMode, key_to_command};

const SEARCH_PLACEHOLDER: &str = "Search issues...";

// ---------------------------------------------------------------------------
// Engine plumbing
// ---------------------------------------------------------------------------

/// Start a load of grid `grid_idx` and send its search to the engine.
fn start_load(
    grid: &mut IssueGrid,
    grid_idx: usize,
    engine: Option<&EngineHandle>,
    reply_tx: &Sender<Event>,
) {
    let ticket = grid.begin_load();
    if let Some(engine) = engine {
        engine.send(Request::FetchIssues {
            grid_idx,
            seq: ticket.seq(),
            query: grid.config().query(),
            reply_tx: reply_tx.clone(),
        });
    }
}

/// Route an engine event to its grid. Returns the grid index when the event
/// was current and applied; stale or misaddressed events return `None`.
pub(crate) fn apply_event(grids: &mut [IssueGrid], event: Event) -> Option<usize> {
    let (grid_idx, seq, result) = match event {
        Event::IssuesFetched {
            grid_idx,
            seq,
            issues,
        } => (grid_idx, seq, Ok(issues)),
        Event::FetchError {
            grid_idx,
            seq,
            error,
        } => (grid_idx, seq, Err(error)),
    };
    let grid = grids.get_mut(grid_idx)?;
    grid.complete_load(LoadTicket::from_seq(seq), result)
        .then_some(grid_idx)
}

/// Status bar text for a grid.
pub(crate) fn context_text(grid: &IssueGrid, cursor: usize) -> String {
    match grid.status() {
        LoadStatus::Loading => "Fetching issues...".to_owned(),
        LoadStatus::Error(e) => format!("Error: {e}"),
        LoadStatus::Ready => {
            let shown = grid.page_issues().len();
            if shown == 0 {
                return grid.count_text();
            }
            let state = grid.state();
            let total = state.filtered_len();
            let position = (state.page() - 1) * grid.config().page_size + cursor.min(shown - 1) + 1;
            if state.search_term().is_empty() {
                format!("Issue {position}/{total}")
            } else {
                format!("Issue {position}/{total} (filtered from {})", state.issues().len())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// IssueGridView component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct IssueGridViewProps<'a> {
    /// Mounted grids, one tab each.
    pub grids: Option<&'a [IssueGrid]>,
    pub engine: Option<&'a EngineHandle>,
    pub theme: Option<&'a ResolvedTheme>,
    pub color_depth: ColorDepth,
    pub width: u16,
    pub height: u16,
    pub show_count: bool,
    pub show_separator: bool,
    /// Jira site shown in the status bar.
    pub site_label: String,
    pub should_exit: Option<State<bool>>,
}

#[component]
#[allow(clippy::too_many_lines)]
pub fn IssueGridView<'a>(
    props: &IssueGridViewProps<'a>,
    mut hooks: Hooks,
) -> impl Into<AnyElement<'a>> {
    let initial = props.grids.unwrap_or(&[]).to_vec();
    let grid_count = initial.len();
    let theme = props.theme.cloned().unwrap_or_else(super::default_theme);
    let depth = props.color_depth;
    let should_exit = props.should_exit;

    let mut grids = hooks.use_state(move || initial);
    let mut active = hooks.use_state(|| 0usize);
    let mut cursor = hooks.use_state(|| 0usize);
    let mut focused_col = hooks.use_state(|| 0usize);
    let mut input_mode = hooks.use_state(InputMode::default);
    let mut status_msg = hooks.use_state(|| Option::<String>::None);
    let mut fetch_times = hooks.use_state(move || vec![Option::<Instant>::None; grid_count]);
    let mut started = hooks.use_state(|| false);

    // Event channel: engine pushes events back to UI.
    let event_channel = hooks.use_state(|| {
        let (tx, rx) = std::sync::mpsc::channel::<Event>();
        (tx, std::sync::Arc::new(std::sync::Mutex::new(rx)))
    });
    let (event_tx, event_rx_arc) = event_channel.read().clone();
    let engine: Option<EngineHandle> = props.engine.cloned();

    // Initial load of every grid.
    if !started.get() {
        started.set(true);
        let mut all = grids.read().clone();
        for (idx, grid) in all.iter_mut().enumerate() {
            start_load(grid, idx, engine.as_ref(), &event_tx);
        }
        grids.set(all);
    }

    // Event polling: drain events from engine reply channel.
    {
        let rx_for_poll = event_rx_arc.clone();
        hooks.use_future(async move {
            loop {
                smol::Timer::after(std::time::Duration::from_millis(100)).await;
                let events: Vec<Event> = match rx_for_poll.lock() {
                    Ok(rx) => rx.try_iter().collect(),
                    Err(_) => return,
                };
                if events.is_empty() {
                    continue;
                }
                let mut all = grids.read().clone();
                let mut times = fetch_times.read().clone();
                for evt in events {
                    if let Some(idx) = apply_event(&mut all, evt)
                        && let Some(t) = times.get_mut(idx)
                    {
                        *t = Some(Instant::now());
                    }
                }
                grids.set(all);
                fetch_times.set(times);
            }
        });
    }

    // Keyboard handling.
    let engine_kb = engine.clone();
    let event_tx_kb = event_tx.clone();
    hooks.use_terminal_events({
        move |event| {
            let TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                return;
            };
            if kind == KeyEventKind::Release {
                return;
            }
            let Some(cmd) = key_to_command(input_mode.get(), code, modifiers) else {
                return;
            };

            let idx = active.get();
            let mut all = grids.read().clone();
            let grid_total = all.len();
            let Some(grid) = all.get_mut(idx) else {
                if cmd == GridCommand::Quit
                    && let Some(mut exit) = should_exit
                {
                    exit.set(true);
                }
                return;
            };
            let columns = grid.config().fields.len();
            let page_len = grid.page_issues().len();

            match cmd {
                GridCommand::Quit => {
                    if let Some(mut exit) = should_exit {
                        exit.set(true);
                    }
                    return;
                }
                GridCommand::StartSearch => {
                    input_mode.set(InputMode::Search);
                    status_msg.set(None);
                    return;
                }
                GridCommand::SearchInput(ch) => {
                    let mut term = grid.state().search_term().to_owned();
                    term.push(ch);
                    grid.search(&term);
                }
                GridCommand::SearchBackspace => {
                    let mut term = grid.state().search_term().to_owned();
                    term.pop();
                    grid.search(&term);
                }
                GridCommand::SearchCommit => {
                    input_mode.set(InputMode::Normal);
                    return;
                }
                GridCommand::SearchCancel => {
                    input_mode.set(InputMode::Normal);
                    grid.search("");
                }
                GridCommand::ClearSearch => {
                    if grid.state().search_term().is_empty() {
                        return;
                    }
                    grid.search("");
                }
                GridCommand::Refresh => {
                    start_load(grid, idx, engine_kb.as_ref(), &event_tx_kb);
                    status_msg.set(None);
                }
                GridCommand::FocusPrevColumn => {
                    focused_col.set(focused_col.get().saturating_sub(1));
                    return;
                }
                GridCommand::FocusNextColumn => {
                    focused_col.set((focused_col.get() + 1).min(columns.saturating_sub(1)));
                    return;
                }
                GridCommand::SortFocused => {
                    grid.sort_by_column(focused_col.get());
                }
                GridCommand::SortColumn(col) => {
                    if !grid.sort_by_column(col) {
                        return;
                    }
                    focused_col.set(col);
                }
                GridCommand::NextPage => grid.next_page(),
                GridCommand::PrevPage => grid.prev_page(),
                GridCommand::FirstPage => grid.first_page(),
                GridCommand::LastPage => grid.last_page(),
                GridCommand::CursorDown => {
                    cursor.set((cursor.get() + 1).min(page_len.saturating_sub(1)));
                    return;
                }
                GridCommand::CursorUp => {
                    cursor.set(cursor.get().saturating_sub(1));
                    return;
                }
                GridCommand::OpenSelected | GridCommand::CopySelected => {
                    let url = grid
                        .page_issues()
                        .get(cursor.get())
                        .map(|issue| grid.config().browse_url(&issue.key));
                    if let Some(url) = url {
                        let result = if cmd == GridCommand::OpenSelected {
                            actions::open_in_browser(&url).map(|()| format!("Opened {url}"))
                        } else {
                            actions::copy_to_clipboard(&url).map(|()| format!("Copied {url}"))
                        };
                        status_msg.set(Some(result.unwrap_or_else(|e| e)));
                    }
                    return;
                }
                GridCommand::NextGrid | GridCommand::PrevGrid => {
                    let next = if cmd == GridCommand::NextGrid {
                        (idx + 1) % grid_total
                    } else {
                        (idx + grid_total - 1) % grid_total
                    };
                    active.set(next);
                    focused_col.set(0);
                    status_msg.set(None);
                }
            }

            grids.set(all);
            cursor.set(0);
        }
    });

    // ---------------------------------------------------------------------
    // Render
    // ---------------------------------------------------------------------

    let all = grids.read();
    let active_idx = active.get().min(all.len().saturating_sub(1));
    let Some(grid) = all.get(active_idx) else {
        return element! {
            View(padding: 1) {
                Text(content: "No grids configured.", color: theme.text_faint.to_crossterm_color(depth))
            }
        }
        .into_any();
    };
    let view = grid.render();

    let rendered_tab_bar = (all.len() > 1).then(|| {
        let tabs: Vec<Tab> = all
            .iter()
            .map(|g| Tab {
                title: g.config().title.clone(),
                count: g.count_text(),
            })
            .collect();
        RenderedTabBar::build(
            &tabs,
            active_idx,
            props.show_count,
            depth,
            Some(theme.text_inverted),
            Some(theme.text_link),
            Some(theme.text_faint),
            Some(theme.border_faint),
        )
    });

    let editing = input_mode.get() == InputMode::Search;
    let rendered_search = RenderedTextInput::build(
        "/",
        &view.search_term,
        SEARCH_PLACEHOLDER,
        editing,
        depth,
        Some(theme.text_primary),
        Some(theme.text_faint),
        Some(theme.text_secondary),
        Some(theme.border_faint),
    );

    let table_width = props.width.saturating_sub(2);
    let (rendered_table, rendered_pagination, message) = match &view.content {
        ContentView::Table(table) => (
            Some(RenderedTable::build(&TableBuildConfig {
                table,
                cursor: cursor.get(),
                focused_column: Some(focused_col.get()),
                total_width: table_width,
                depth,
                theme: &theme,
                show_separator: props.show_separator,
            })),
            table
                .pagination
                .as_ref()
                .map(|p| RenderedPagination::build(p, &theme, depth)),
            None,
        ),
        ContentView::Loading { message } => {
            (None, None, Some((message.clone(), theme.text_faint, Weight::Normal)))
        }
        ContentView::Empty { message } => {
            (None, None, Some((message.clone(), theme.text_faint, Weight::Normal)))
        }
        ContentView::Error { message } => (
            None,
            None,
            Some((format!("Error: {message}"), theme.text_error, Weight::Bold)),
        ),
    };

    let context = status_msg
        .read()
        .clone()
        .unwrap_or_else(|| context_text(grid, cursor.get()));
    let context_color = if matches!(grid.status(), LoadStatus::Error(_)) {
        theme.text_error
    } else {
        theme.text_secondary
    };
    let updated_text = footer::format_updated_ago(
        fetch_times.read().get(active_idx).copied().flatten(),
    );
    let rendered_footer = RenderedFooter::build(
        props.site_label.clone(),
        context,
        updated_text,
        depth,
        Some(context_color),
        Some(theme.text_faint),
        Some(theme.border_faint),
    );

    let title_fg = theme.text_primary.to_crossterm_color(depth);
    let count_fg = theme.text_secondary.to_crossterm_color(depth);
    let width = u32::from(props.width);
    let height = u32::from(props.height);

    element! {
        View(flex_direction: FlexDirection::Column, width, height) {
            TabBar(tab_bar: rendered_tab_bar)

            View(padding_left: 1, padding_right: 1) {
                View(flex_grow: 1.0) {
                    Text(content: view.title, color: title_fg, weight: Weight::Bold, wrap: TextWrap::NoWrap)
                }
                Text(content: view.count_text, color: count_fg, wrap: TextWrap::NoWrap)
            }

            TextInput(input: rendered_search)

            View(flex_grow: 1.0, flex_direction: FlexDirection::Column, overflow: Overflow::Hidden, padding_left: 1) {
                #(message.map(|(text, color, weight)| element! {
                    View(padding_top: 1, padding_left: 1) {
                        Text(content: text, color: color.to_crossterm_color(depth), weight)
                    }
                }))
                IssueTable(table: rendered_table)
            }

            Pagination(pagination: rendered_pagination)
            Footer(footer: rendered_footer)
        }
    }
    .into_any()
}
