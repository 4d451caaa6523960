use std::path::{Path, PathBuf};
use std::time::Instant;

use cardscan_core::{
    DocumentKind, ExtractionFailure, ExtractionResult, FileCandidate, Notice, Panel, RequestId,
};

use super::util::{candidate_for_path, expand_home};
use super::{App, FilePickerState, InputMode, Screen};
use crate::action::Action;
use crate::tui_event::{BackendCommand, BackendEvent};
use crate::view;

const MSG_RESET_FIRST: &str = "Press r to upload another file";
const MSG_BACKEND_DOWN: &str = "Extraction service is not available";

impl App {
    /// Apply one action to the application state.
    pub fn update(&mut self, action: Action) {
        if action == Action::Tick {
            self.tick = self.tick.wrapping_add(1);
            self.notices.expire(Instant::now());
            return;
        }
        if let Action::Resize(_w, h) = action {
            self.visible_rows = (h as usize).saturating_sub(8);
            return;
        }
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }

        // Help overlay swallows everything but its own dismissal.
        if self.show_help {
            if matches!(action, Action::ToggleHelp | Action::NavigateBack) {
                self.show_help = false;
            }
            return;
        }

        if self.input_mode == InputMode::PathInput {
            self.handle_path_input(action);
            return;
        }

        // Tab switching works from every screen.
        match action {
            Action::NextTab => {
                self.session.tabs.next();
                return;
            }
            Action::PrevTab => {
                self.session.tabs.prev();
                return;
            }
            Action::SelectTab(kind) => {
                self.session.tabs.select(kind);
                return;
            }
            Action::ClickAt(col, row) => {
                if let Some(area) = self.last_tab_area
                    && let Some(kind) = view::tabs::tab_at(area, &self.session, col, row)
                {
                    self.session.tabs.select(kind);
                }
                return;
            }
            Action::Dropped(text) => {
                self.handle_drop(&text);
                return;
            }
            Action::ToggleHelp => {
                self.show_help = true;
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Main => self.handle_main_action(action),
            Screen::FilePicker => self.handle_file_picker_action(action),
        }
    }

    fn handle_main_action(&mut self, action: Action) {
        match action {
            Action::OpenFilePicker => {
                if self.require_upload_panel() {
                    self.file_picker.refresh_entries();
                    self.screen = Screen::FilePicker;
                }
            }
            Action::StartPathInput => {
                if self.require_upload_panel() {
                    self.path_input.clear();
                    self.input_mode = InputMode::PathInput;
                }
            }
            Action::Extract | Action::DrillIn => {
                if self.session.active().panel() == Panel::Upload {
                    self.start_extraction();
                }
            }
            Action::Copy => {
                let doc = self.session.active();
                if let Some(notice) = doc.copy(self.clipboard.as_mut()) {
                    self.notices.show(notice);
                }
            }
            Action::Download => {
                if let Some(notice) = self.session.active().download(&self.export_dir) {
                    self.notices.show(notice);
                }
            }
            Action::Reset => {
                let kind = self.session.tabs.active();
                self.session.document_mut(kind).reset();
                tracing::debug!(%kind, "session reset");
            }
            _ => {}
        }
    }

    fn handle_path_input(&mut self, action: Action) {
        match action {
            Action::TextInput(c) => self.path_input.push(c),
            Action::TextBackspace => {
                self.path_input.pop();
            }
            Action::TextCancel => {
                self.path_input.clear();
                self.input_mode = InputMode::Normal;
            }
            Action::TextConfirm => {
                let typed = std::mem::take(&mut self.path_input);
                self.input_mode = InputMode::Normal;
                if !typed.trim().is_empty() {
                    self.handle_drop(&typed);
                }
            }
            Action::Dropped(text) => {
                self.path_input.clear();
                self.input_mode = InputMode::Normal;
                self.handle_drop(&text);
            }
            _ => {}
        }
    }

    /// Dropped, pasted or typed text goes through the same validation as a
    /// file picked from the list.
    pub(super) fn handle_drop(&mut self, text: &str) {
        let Some(candidate) = FileCandidate::from_dropped(text) else {
            return;
        };
        let path = PathBuf::from(expand_home(&candidate.path.to_string_lossy()));
        if self.screen == Screen::FilePicker {
            self.screen = Screen::Main;
        }
        self.select_path(&path);
    }

    /// Select a file on disk for the active tab.
    pub fn select_path(&mut self, path: &Path) {
        if !self.require_upload_panel() {
            return;
        }
        let candidate = match candidate_for_path(path) {
            Ok(candidate) => candidate,
            Err(message) => {
                self.notices.show(Notice::error(message));
                return;
            }
        };
        if let Some(notice) = self.session.active_mut().select_file(candidate) {
            self.notices.show(notice);
        }
    }

    /// New files can only be chosen while the upload section is visible.
    fn require_upload_panel(&mut self) -> bool {
        if self.session.active().panel() == Panel::Results {
            self.notices.show(Notice::info(MSG_RESET_FIRST));
            return false;
        }
        true
    }

    fn start_extraction(&mut self) {
        let kind = self.session.tabs.active();
        let (id, upload) = match self.session.document_mut(kind).begin_extraction() {
            Ok(started) => started,
            Err(notice) => {
                self.notices.show(notice);
                return;
            }
        };

        let sent = self
            .backend_cmd_tx
            .as_ref()
            .is_some_and(|tx| tx.send(BackendCommand::Extract { id, upload }).is_ok());
        if !sent {
            tracing::warn!(%kind, "backend listener not running");
            self.finish_extraction(kind, id, Err(ExtractionFailure::new(MSG_BACKEND_DOWN)));
        }
    }

    fn finish_extraction(
        &mut self,
        kind: DocumentKind,
        id: RequestId,
        outcome: Result<ExtractionResult, ExtractionFailure>,
    ) {
        if let Some(notice) = self
            .session
            .document_mut(kind)
            .complete_extraction(id, outcome)
        {
            self.notices.show(notice);
        }
    }

    /// Process an event from the backend task.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::ExtractionFinished { kind, id, outcome } => {
                self.finish_extraction(kind, id, outcome);
            }
        }
    }

    /// Point the file picker at a new directory (used at startup and in tests).
    pub fn browse(&mut self, dir: PathBuf) {
        self.file_picker = FilePickerState::at(dir);
    }
}
