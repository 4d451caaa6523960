use super::{App, Screen};
use crate::action::Action;

impl App {
    /// Handle input while on the file picker screen.
    pub(super) fn handle_file_picker_action(&mut self, action: Action) {
        match action {
            Action::NavigateBack => {
                self.screen = Screen::Main;
            }
            Action::MoveDown => {
                let max = self.file_picker.entries.len().saturating_sub(1);
                if self.file_picker.cursor < max {
                    self.file_picker.cursor += 1;
                }
            }
            Action::MoveUp => {
                self.file_picker.cursor = self.file_picker.cursor.saturating_sub(1);
            }
            Action::PageDown => {
                let page = self.visible_rows.max(1);
                let max = self.file_picker.entries.len().saturating_sub(1);
                self.file_picker.cursor = (self.file_picker.cursor + page).min(max);
            }
            Action::PageUp => {
                let page = self.visible_rows.max(1);
                self.file_picker.cursor = self.file_picker.cursor.saturating_sub(page);
            }
            Action::GoTop => {
                self.file_picker.cursor = 0;
            }
            Action::GoBottom => {
                self.file_picker.cursor = self.file_picker.entries.len().saturating_sub(1);
            }
            Action::DrillIn => {
                // Enter on a directory opens it; on a file, selects it for the active tab
                if self.file_picker.enter_directory() {
                    return;
                }
                if let Some(entry) = self.file_picker.current_entry().cloned() {
                    self.screen = Screen::Main;
                    self.select_path(&entry.path);
                }
            }
            _ => {}
        }
    }
}
