use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};

// ---------------------------------------------------------------------------
// TabBar component: one tab per mounted grid
// ---------------------------------------------------------------------------

/// A single tab definition.
#[derive(Debug, Clone)]
pub struct Tab {
    pub title: String,
    /// Count label such as `12 issues`; empty to omit.
    pub count: String,
}

/// Pre-rendered tab data (all owned, no lifetime issues).
pub struct RenderedTabBar {
    pub tabs: Vec<RenderedTab>,
    pub active_fg: Color,
    pub active_bg: Color,
    pub inactive_fg: Color,
    pub border_fg: Color,
}

pub struct RenderedTab {
    pub label: String,
    pub is_active: bool,
}

impl RenderedTabBar {
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        tabs: &[Tab],
        active: usize,
        show_count: bool,
        depth: ColorDepth,
        active_color: Option<AppColor>,
        active_bg_color: Option<AppColor>,
        inactive_color: Option<AppColor>,
        border_color: Option<AppColor>,
    ) -> Self {
        let active_fg = active_color.map_or(Color::White, |c| c.to_crossterm_color(depth));
        let active_bg = active_bg_color.map_or(Color::Blue, |c| c.to_crossterm_color(depth));
        let inactive_fg = inactive_color.map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));
        let border_fg = border_color.map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));

        let rendered_tabs = tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| RenderedTab {
                label: tab_label(tab, show_count),
                is_active: i == active,
            })
            .collect();

        Self {
            tabs: rendered_tabs,
            active_fg,
            active_bg,
            inactive_fg,
            border_fg,
        }
    }
}

fn tab_label(tab: &Tab, show_count: bool) -> String {
    if show_count && !tab.count.is_empty() {
        format!(" {} ({}) ", tab.title, tab.count)
    } else {
        format!(" {} ", tab.title)
    }
}

#[derive(Default, Props)]
pub struct TabBarProps {
    pub tab_bar: Option<RenderedTabBar>,
}

#[component]
pub fn TabBar(props: &mut TabBarProps) -> impl Into<AnyElement<'static>> {
    let Some(tb) = props.tab_bar.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(
            border_style: BorderStyle::Single,
            border_edges: Edges::Bottom,
            border_color: tb.border_fg,
            padding_left: 1,
        ) {
            #(tb.tabs.into_iter().enumerate().map(|(i, tab)| {
                let (fg, bg, weight) = if tab.is_active {
                    (tb.active_fg, Some(tb.active_bg), Weight::Bold)
                } else {
                    (tb.inactive_fg, None, Weight::Normal)
                };

                element! {
                    View(key: i, margin_right: 1, background_color: bg) {
                        Text(content: tab.label, color: fg, weight, wrap: TextWrap::NoWrap)
                    }
                }
            }))
        }
    }
    .into_any()
}
