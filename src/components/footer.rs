use std::time::Instant;

use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};

// ---------------------------------------------------------------------------
// Footer component: structured status bar
// ---------------------------------------------------------------------------

pub struct RenderedFooter {
    pub site_label: String,
    pub context_text: String,
    pub context_fg: Color,
    pub updated_text: String,
    pub key_hint: String,
    pub text_fg: Color,
    pub border_fg: Color,
    pub separator_fg: Color,
}

/// Keys shown at the right edge of the status bar.
pub const KEY_HINT: &str = "/ search  r refresh  s sort  n/p page  o open  q quit";

impl RenderedFooter {
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        site_label: String,
        context_text: String,
        updated_text: String,
        depth: ColorDepth,
        context_color: Option<AppColor>,
        text_color: Option<AppColor>,
        border_color: Option<AppColor>,
    ) -> Self {
        let text_fg = text_color.map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));
        let context_fg = context_color.map_or(text_fg, |c| c.to_crossterm_color(depth));
        let border_fg = border_color.map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));

        Self {
            site_label,
            context_text,
            context_fg,
            updated_text,
            key_hint: KEY_HINT.to_owned(),
            text_fg,
            border_fg,
            separator_fg: text_fg,
        }
    }
}

/// Format a last-fetch instant as a human-readable "Updated ~Xs ago" string.
pub fn format_updated_ago(last_fetch: Option<Instant>) -> String {
    let Some(t) = last_fetch else {
        return String::new();
    };
    format_elapsed(t.elapsed().as_secs())
}

fn format_elapsed(elapsed: u64) -> String {
    if elapsed < 60 {
        format!("Updated ~{elapsed}s ago")
    } else if elapsed < 3600 {
        format!("Updated ~{}m ago", elapsed / 60)
    } else {
        format!("Updated ~{}h ago", elapsed / 3600)
    }
}

#[derive(Default, Props)]
pub struct FooterProps {
    pub footer: Option<RenderedFooter>,
}

#[component]
pub fn Footer(props: &mut FooterProps) -> impl Into<AnyElement<'static>> {
    let Some(f) = props.footer.take() else {
        return element! { View }.into_any();
    };

    let has_context = !f.context_text.is_empty();
    let has_updated = !f.updated_text.is_empty();

    let mut context_contents = Vec::new();
    if has_context {
        context_contents.push(MixedTextContent::new(&f.context_text).color(f.context_fg));
    }
    if has_context && has_updated {
        context_contents.push(MixedTextContent::new("  \u{2022}  ").color(f.separator_fg));
    }
    if has_updated {
        context_contents.push(MixedTextContent::new(&f.updated_text).color(f.text_fg));
    }

    element! {
        View(
            border_style: BorderStyle::Single,
            border_edges: Edges::Top,
            border_color: f.border_fg,
            padding_left: 1,
            padding_right: 1,
        ) {
            Text(content: f.site_label.clone(), color: f.text_fg, weight: Weight::Bold, wrap: TextWrap::NoWrap)
            Text(content: " \u{2502} ", color: f.separator_fg, wrap: TextWrap::NoWrap)
            View(flex_grow: 1.0) {
                MixedText(contents: context_contents, wrap: TextWrap::NoWrap)
            }
            Text(content: " \u{2502} ", color: f.separator_fg, wrap: TextWrap::NoWrap)
            Text(content: f.key_hint.clone(), color: f.text_fg, wrap: TextWrap::NoWrap)
        }
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_fetched_is_blank() {
        assert_eq!(format_updated_ago(None), "");
    }

    #[test]
    fn elapsed_buckets() {
        assert_eq!(format_elapsed(5), "Updated ~5s ago");
        assert_eq!(format_elapsed(125), "Updated ~2m ago");
        assert_eq!(format_elapsed(7300), "Updated ~2h ago");
    }
}
