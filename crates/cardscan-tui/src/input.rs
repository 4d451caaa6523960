use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use cardscan_core::DocumentKind;

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::PathInput => map_key_path_input(key),
            }
        }
        // Terminals deliver a dragged-in file as a bracketed paste of its path.
        Event::Paste(text) => Action::Dropped(text.clone()),
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::MoveDown,
        MouseEventKind::ScrollUp => Action::MoveUp,
        MouseEventKind::Down(MouseButton::Left) => Action::ClickAt(mouse.column, mouse.row),
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Tab => Action::NextTab,
        KeyCode::BackTab => Action::PrevTab,
        KeyCode::Char('1') => Action::SelectTab(DocumentKind::Aadhaar),
        KeyCode::Char('2') => Action::SelectTab(DocumentKind::Pan),
        KeyCode::Char('o') => Action::OpenFilePicker,
        KeyCode::Char('p') => Action::StartPathInput,
        KeyCode::Char('x') | KeyCode::Char('e') => Action::Extract,
        KeyCode::Char('y') => Action::Copy,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::PageDown,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::PageUp,
        KeyCode::Char('d') => Action::Download,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('g') | KeyCode::Home => Action::GoTop,
        KeyCode::Char('G') | KeyCode::End => Action::GoBottom,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Enter => Action::DrillIn,
        KeyCode::Esc => Action::NavigateBack,
        _ => Action::None,
    }
}

fn map_key_path_input(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::TextCancel,
        KeyCode::Enter => Action::TextConfirm,
        KeyCode::Backspace => Action::TextBackspace,
        KeyCode::Char(c) => Action::TextInput(c),
        _ => Action::None,
    }
}
