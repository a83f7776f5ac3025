use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};

// ---------------------------------------------------------------------------
// Pre-rendered search box
// ---------------------------------------------------------------------------

pub struct RenderedTextInput {
    pub prompt: String,
    pub text: String,
    pub text_fg: Color,
    pub prompt_fg: Color,
    pub border_fg: Color,
}

impl RenderedTextInput {
    /// Build the search box. While `editing`, a block cursor follows the
    /// text; an idle empty box shows `placeholder` instead.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        prompt: &str,
        text: &str,
        placeholder: &str,
        editing: bool,
        depth: ColorDepth,
        text_color: Option<AppColor>,
        placeholder_color: Option<AppColor>,
        prompt_color: Option<AppColor>,
        border_color: Option<AppColor>,
    ) -> Self {
        let text_fg = text_color.map_or(Color::White, |c| c.to_crossterm_color(depth));
        let faint_fg = placeholder_color.map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));
        let prompt_fg = prompt_color.map_or(Color::Cyan, |c| c.to_crossterm_color(depth));
        let border_fg = border_color.map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));

        let (text, text_fg) = if editing {
            (format!("{text}\u{2588}"), text_fg)
        } else if text.is_empty() {
            (placeholder.to_owned(), faint_fg)
        } else {
            (text.to_owned(), text_fg)
        };

        Self {
            prompt: prompt.to_owned(),
            text,
            text_fg,
            prompt_fg,
            border_fg,
        }
    }
}

// ---------------------------------------------------------------------------
// TextInput component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct TextInputProps {
    pub input: Option<RenderedTextInput>,
}

#[component]
pub fn TextInput(props: &mut TextInputProps) -> impl Into<AnyElement<'static>> {
    let Some(input) = props.input.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(
            flex_direction: FlexDirection::Row,
            border_style: BorderStyle::Single,
            border_edges: Edges::Bottom,
            border_color: input.border_fg,
            padding_left: 1,
            padding_right: 1,
        ) {
            Text(content: input.prompt, color: input.prompt_fg, wrap: TextWrap::NoWrap)
            Text(content: " ", color: input.text_fg)
            Text(content: input.text, color: input.text_fg, wrap: TextWrap::NoWrap)
        }
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(text: &str, editing: bool) -> RenderedTextInput {
        RenderedTextInput::build(
            "/",
            text,
            "Search issues...",
            editing,
            ColorDepth::TrueColor,
            Some(AppColor::Ansi256(7)),
            Some(AppColor::Ansi256(243)),
            None,
            None,
        )
    }

    #[test]
    fn editing_appends_cursor() {
        assert_eq!(build("bug", true).text, "bug\u{2588}");
        assert_eq!(build("", true).text, "\u{2588}");
    }

    #[test]
    fn idle_empty_shows_placeholder() {
        let input = build("", false);
        assert_eq!(input.text, "Search issues...");
        assert_eq!(input.text_fg, AppColor::Ansi256(243).to_crossterm_color(ColorDepth::TrueColor));
    }

    #[test]
    fn idle_with_term_shows_term() {
        assert_eq!(build("login", false).text, "login");
    }
}
