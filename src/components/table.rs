use iocraft::prelude::*;
use unicode_width::UnicodeWidthStr;

use crate::color::{Color as AppColor, ColorDepth};
use crate::fields::Field;
use crate::grid::{CellContent, TableView};
use crate::palette::{AVATAR_COLOR, UNASSIGNED_COLOR};
use crate::theme::ResolvedTheme;
use crate::util::fit_to_width;

// ---------------------------------------------------------------------------
// Column sizing
// ---------------------------------------------------------------------------

/// Relative width of a column; the summary takes the lion's share.
fn width_weight(field: &Field) -> f32 {
    match field {
        Field::Summary => 0.40,
        Field::Assignee | Field::Reporter => 0.15,
        Field::Status => 0.12,
        Field::Updated | Field::Created => 0.11,
        Field::Key | Field::Priority | Field::IssueType => 0.10,
        _ => 0.12,
    }
}

// ---------------------------------------------------------------------------
// Pre-rendered table data (all owned)
// ---------------------------------------------------------------------------

/// Pre-render table data into fully owned structures that can be passed
/// into the `element!` macro without lifetime issues.
pub struct RenderedTable {
    pub header_cells: Vec<HeaderCell>,
    pub body_rows: Vec<RenderedRow>,
    pub total_width: u32,
    pub show_separator: bool,
    pub header_fg: Color,
    pub focus_bg: Color,
    pub border_fg: Color,
}

pub struct HeaderCell {
    pub text: String,
    pub width: u32,
    pub focused: bool,
}

pub struct RenderedRow {
    pub key: usize,
    pub bg: Option<Color>,
    pub cells: Vec<RenderedCell>,
}

pub struct RenderedCell {
    pub width: u32,
    pub spans: Vec<RenderedSpan>,
}

/// A run of text with its own colors. Badges are spans with a background.
pub struct RenderedSpan {
    pub text: String,
    pub fg: Color,
    pub bg: Option<Color>,
    pub weight: Weight,
}

/// Configuration for building a `RenderedTable`.
pub struct TableBuildConfig<'a> {
    pub table: &'a TableView,
    /// Highlighted row on the current page.
    pub cursor: usize,
    /// Column that `s`/`Enter` would sort by.
    pub focused_column: Option<usize>,
    pub total_width: u16,
    pub depth: ColorDepth,
    pub theme: &'a ResolvedTheme,
    pub show_separator: bool,
}

impl RenderedTable {
    /// Build a `RenderedTable` from a configuration.
    pub fn build(cfg: &TableBuildConfig<'_>) -> Self {
        let depth = cfg.depth;
        let theme = cfg.theme;
        let fields: Vec<&Field> = cfg.table.headers.iter().map(|h| &h.field).collect();
        let col_widths = compute_column_widths(&fields, cfg.total_width);

        let header_cells = cfg
            .table
            .headers
            .iter()
            .zip(&col_widths)
            .enumerate()
            .map(|(i, (header, &w))| {
                let text = match header.sort {
                    Some(dir) => format!("{} {}", header.label, dir.marker()),
                    None => header.label.clone(),
                };
                HeaderCell {
                    text: fit_to_width(&text, usize::from(w.saturating_sub(1))),
                    width: u32::from(w),
                    focused: cfg.focused_column == Some(i),
                }
            })
            .collect();

        let selected_bg = theme.bg_selected.to_crossterm_color(depth);
        let body_rows = cfg
            .table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| RenderedRow {
                key: i,
                bg: (i == cfg.cursor).then_some(selected_bg),
                cells: row
                    .cells
                    .iter()
                    .zip(&col_widths)
                    .map(|(cell, &w)| RenderedCell {
                        width: u32::from(w),
                        spans: fit_spans(
                            cell_spans(cell, theme, depth),
                            usize::from(w.saturating_sub(1)),
                        ),
                    })
                    .collect(),
            })
            .collect();

        Self {
            header_cells,
            body_rows,
            total_width: u32::from(cfg.total_width),
            show_separator: cfg.show_separator,
            header_fg: theme.text_secondary.to_crossterm_color(depth),
            focus_bg: selected_bg,
            border_fg: theme.border_faint.to_crossterm_color(depth),
        }
    }
}

fn span(text: impl Into<String>, fg: AppColor, depth: ColorDepth) -> RenderedSpan {
    RenderedSpan {
        text: text.into(),
        fg: fg.to_crossterm_color(depth),
        bg: None,
        weight: Weight::Normal,
    }
}

/// Text on a colored background, with black or white text for contrast.
fn badge(text: String, bg: AppColor, depth: ColorDepth) -> RenderedSpan {
    let fg = if bg.is_light() {
        Color::Black
    } else {
        Color::White
    };
    RenderedSpan {
        text,
        fg,
        bg: Some(bg.to_crossterm_color(depth)),
        weight: Weight::Bold,
    }
}

fn cell_spans(cell: &CellContent, theme: &ResolvedTheme, depth: ColorDepth) -> Vec<RenderedSpan> {
    match cell {
        CellContent::Link { text, .. } => vec![RenderedSpan {
            weight: Weight::Bold,
            ..span(text.clone(), theme.text_link, depth)
        }],
        CellContent::Summary(text) | CellContent::Text(text) => {
            vec![span(text.clone(), theme.text_primary, depth)]
        }
        CellContent::StatusBadge { text, color } if !text.is_empty() => {
            vec![badge(format!(" {} ", text.to_uppercase()), *color, depth)]
        }
        CellContent::StatusBadge { .. } => Vec::new(),
        CellContent::PriorityBadge { text, color } => vec![
            span("\u{25a0} ", *color, depth),
            span(text.clone(), theme.text_primary, depth),
        ],
        CellContent::Assignee { initial, name } => vec![
            badge(format!(" {initial} "), AVATAR_COLOR, depth),
            span(format!(" {name}"), theme.text_primary, depth),
        ],
        CellContent::Unassigned => vec![span(cell.text(), UNASSIGNED_COLOR, depth)],
        CellContent::Date(text) => vec![span(text.clone(), theme.text_secondary, depth)],
    }
}

/// Trim spans so their combined display width fits in `width` columns.
fn fit_spans(spans: Vec<RenderedSpan>, width: usize) -> Vec<RenderedSpan> {
    let mut remaining = width;
    let mut out = Vec::with_capacity(spans.len());
    for mut s in spans {
        if remaining == 0 {
            break;
        }
        let w = s.text.width();
        if w > remaining {
            s.text = fit_to_width(&s.text, remaining);
            out.push(s);
            break;
        }
        remaining -= w;
        out.push(s);
    }
    out
}

// ---------------------------------------------------------------------------
// IssueTable component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct IssueTableProps {
    /// Pre-rendered table data.
    pub table: Option<RenderedTable>,
}

#[component]
pub fn IssueTable(props: &mut IssueTableProps) -> impl Into<AnyElement<'static>> {
    let Some(table) = props.table.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(flex_direction: FlexDirection::Column, width: table.total_width) {
            // Header row
            View(
                border_style: if table.show_separator { BorderStyle::Single } else { BorderStyle::None },
                border_edges: Edges::Bottom,
                border_color: table.border_fg,
            ) {
                #(table.header_cells.into_iter().enumerate().map(|(i, hc)| {
                    let bg = hc.focused.then_some(table.focus_bg);
                    element! {
                        View(key: i, width: hc.width) {
                            View(background_color: bg) {
                                Text(
                                    content: hc.text,
                                    weight: Weight::Bold,
                                    color: table.header_fg,
                                    wrap: TextWrap::NoWrap,
                                )
                            }
                        }
                    }
                }))
            }

            #(table.body_rows.into_iter().map(|row| {
                element! {
                    View(key: row.key, background_color: row.bg) {
                        #(row.cells.into_iter().enumerate().map(|(ci, cell)| {
                            element! {
                                View(key: ci, width: cell.width, flex_direction: FlexDirection::Row) {
                                    #(cell.spans.into_iter().enumerate().map(|(si, s)| {
                                        element! {
                                            View(key: si, background_color: s.bg) {
                                                Text(
                                                    content: s.text,
                                                    color: s.fg,
                                                    weight: s.weight,
                                                    wrap: TextWrap::NoWrap,
                                                )
                                            }
                                        }
                                    }))
                                }
                            }
                        }))
                    }
                }
            }))
        }
    }
    .into_any()
}

// ---------------------------------------------------------------------------
// Column width computation
// ---------------------------------------------------------------------------

fn compute_column_widths(fields: &[&Field], total: u16) -> Vec<u16> {
    let weight_sum: f32 = fields.iter().map(|f| width_weight(f)).sum();
    fields
        .iter()
        .map(|f| {
            let ratio = if weight_sum > 0.0 {
                width_weight(f) / weight_sum
            } else {
                0.0
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let w = (f32::from(total) * ratio).floor() as u16;
            w.max(1)
        })
        .collect()
}
