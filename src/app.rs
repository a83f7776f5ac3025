use iocraft::prelude::*;

use crate::color::ColorDepth;
use crate::config::types::AppConfig;
use crate::engine::EngineHandle;
use crate::grid::IssueGrid;
use crate::theme::ResolvedTheme;
use crate::views::grid::IssueGridView;

// ---------------------------------------------------------------------------
// Root App component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct AppProps<'a> {
    pub config: Option<&'a AppConfig>,
    pub grids: Option<&'a [IssueGrid]>,
    pub engine: Option<&'a EngineHandle>,
    pub theme: Option<&'a ResolvedTheme>,
    pub color_depth: ColorDepth,
}

/// Host label for the status bar: the Jira site without its scheme.
pub fn site_label(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    trimmed
        .split_once("://")
        .map_or(trimmed, |(_, rest)| rest)
        .to_owned()
}

#[component]
pub fn App<'a>(props: &AppProps<'a>, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let should_exit = hooks.use_state(|| false);

    if should_exit.get() {
        system.exit();
    }

    let config = props.config;
    let show_count = config.is_none_or(|c| c.theme.ui.grids_show_count);
    let show_separator = config.is_none_or(|c| c.theme.ui.show_separator);
    let site = config.map_or_else(String::new, |c| site_label(&c.jira.base_url));

    element! {
        View(width: u32::from(width), height: u32::from(height), flex_direction: FlexDirection::Column) {
            IssueGridView(
                grids: props.grids,
                engine: props.engine,
                theme: props.theme,
                color_depth: props.color_depth,
                width,
                height,
                show_count,
                show_separator,
                site_label: site,
                should_exit,
            )
        }
    }
}
