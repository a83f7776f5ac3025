use iocraft::prelude::*;

use crate::color::ColorDepth;
use crate::grid::{PageButton, PaginationView};
use crate::theme::ResolvedTheme;

// ---------------------------------------------------------------------------
// Pagination bar
// ---------------------------------------------------------------------------

pub struct RenderedPagination {
    pub info: String,
    pub buttons: Vec<RenderedButton>,
    pub info_fg: Color,
    pub border_fg: Color,
}

pub struct RenderedButton {
    pub label: String,
    pub fg: Color,
    pub bg: Option<Color>,
    pub weight: Weight,
}

impl RenderedPagination {
    pub fn build(view: &PaginationView, theme: &ResolvedTheme, depth: ColorDepth) -> Self {
        let button = |b: &PageButton, label: String| {
            if b.active {
                RenderedButton {
                    label,
                    fg: theme.text_inverted.to_crossterm_color(depth),
                    bg: Some(theme.text_link.to_crossterm_color(depth)),
                    weight: Weight::Bold,
                }
            } else if b.disabled {
                RenderedButton {
                    label,
                    fg: theme.text_faint.to_crossterm_color(depth),
                    bg: None,
                    weight: Weight::Normal,
                }
            } else {
                RenderedButton {
                    label,
                    fg: theme.text_primary.to_crossterm_color(depth),
                    bg: None,
                    weight: Weight::Normal,
                }
            }
        };

        let mut buttons = Vec::with_capacity(view.pages.len() + 2);
        buttons.push(button(&view.prev, format!(" \u{2039} {} ", view.prev.label)));
        buttons.extend(view.pages.iter().map(|p| button(p, format!(" {} ", p.label))));
        buttons.push(button(&view.next, format!(" {} \u{203a} ", view.next.label)));

        Self {
            info: view.info.clone(),
            buttons,
            info_fg: theme.text_secondary.to_crossterm_color(depth),
            border_fg: theme.border_faint.to_crossterm_color(depth),
        }
    }
}

#[derive(Default, Props)]
pub struct PaginationProps {
    pub pagination: Option<RenderedPagination>,
}

#[component]
pub fn Pagination(props: &mut PaginationProps) -> impl Into<AnyElement<'static>> {
    let Some(p) = props.pagination.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(
            border_style: BorderStyle::Single,
            border_edges: Edges::Top,
            border_color: p.border_fg,
            padding_left: 1,
            padding_right: 1,
        ) {
            View(flex_grow: 1.0) {
                Text(content: p.info, color: p.info_fg, wrap: TextWrap::NoWrap)
            }
            #(p.buttons.into_iter().enumerate().map(|(i, b)| {
                element! {
                    View(key: i, background_color: b.bg) {
                        Text(content: b.label, color: b.fg, weight: b.weight, wrap: TextWrap::NoWrap)
                    }
                }
            }))
        }
    }
    .into_any()
}
