use iocraft::prelude::{KeyCode, KeyModifiers};

/// Input focus of the grid view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box.
    Search,
}

/// What a key press asks the grid view to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCommand {
    Quit,
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    SearchCommit,
    SearchCancel,
    ClearSearch,
    Refresh,
    FocusPrevColumn,
    FocusNextColumn,
    SortFocused,
    /// Sort by the 0-based column index.
    SortColumn(usize),
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    CursorDown,
    CursorUp,
    OpenSelected,
    CopySelected,
    NextGrid,
    PrevGrid,
}

pub fn key_to_command(mode: InputMode, code: KeyCode, modifiers: KeyModifiers) -> Option<GridCommand> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(GridCommand::Quit),
            _ => None,
        };
    }

    match mode {
        InputMode::Search => match code {
            KeyCode::Esc => Some(GridCommand::SearchCancel),
            KeyCode::Enter => Some(GridCommand::SearchCommit),
            KeyCode::Backspace => Some(GridCommand::SearchBackspace),
            KeyCode::Char(ch) => Some(GridCommand::SearchInput(ch)),
            _ => None,
        },
        InputMode::Normal => match code {
            KeyCode::Char('q') => Some(GridCommand::Quit),
            KeyCode::Char('/') => Some(GridCommand::StartSearch),
            KeyCode::Esc => Some(GridCommand::ClearSearch),
            KeyCode::Char('r') => Some(GridCommand::Refresh),
            KeyCode::Left | KeyCode::Char('h') => Some(GridCommand::FocusPrevColumn),
            KeyCode::Right | KeyCode::Char('l') => Some(GridCommand::FocusNextColumn),
            KeyCode::Char('s') | KeyCode::Enter => Some(GridCommand::SortFocused),
            KeyCode::Char(ch @ '1'..='9') => {
                let n = ch.to_digit(10).map_or(1, |d| d as usize);
                Some(GridCommand::SortColumn(n - 1))
            }
            KeyCode::Char('n') | KeyCode::PageDown => Some(GridCommand::NextPage),
            KeyCode::Char('p') | KeyCode::PageUp => Some(GridCommand::PrevPage),
            KeyCode::Home | KeyCode::Char('g') => Some(GridCommand::FirstPage),
            KeyCode::End | KeyCode::Char('G') => Some(GridCommand::LastPage),
            KeyCode::Down | KeyCode::Char('j') => Some(GridCommand::CursorDown),
            KeyCode::Up | KeyCode::Char('k') => Some(GridCommand::CursorUp),
            KeyCode::Char('o') => Some(GridCommand::OpenSelected),
            KeyCode::Char('y') => Some(GridCommand::CopySelected),
            KeyCode::Tab => Some(GridCommand::NextGrid),
            KeyCode::BackTab => Some(GridCommand::PrevGrid),
            _ => None,
        },
    }
}
