mod update;
mod update_file_picker;
mod util;
pub use util::Osc52Clipboard;

use std::path::PathBuf;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use tokio::sync::mpsc;

use cardscan_core::{Clipboard, NoticeBoard, Session};

use crate::theme::Theme;
use crate::tui_event::BackendCommand;
use crate::view;

/// Which screen is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Tabs with the active document's upload or results panel.
    Main,
    FilePicker,
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a file path into the input line.
    PathInput,
}

/// State for the file picker screen.
#[derive(Debug, Clone)]
pub struct FilePickerState {
    /// Current directory being browsed.
    pub current_dir: PathBuf,
    /// Entries in the current directory (dirs first, then files).
    pub entries: Vec<FileEntry>,
    /// Cursor position in the entries list.
    pub cursor: usize,
}

/// A single entry in the file picker.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_pdf: bool,
}

impl FilePickerState {
    pub fn new() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::at(current_dir)
    }

    pub fn at(dir: PathBuf) -> Self {
        let mut state = Self {
            current_dir: dir,
            entries: Vec::new(),
            cursor: 0,
        };
        state.refresh_entries();
        state
    }

    /// Refresh the entries list from the current directory.
    ///
    /// Every file is listed, not just PDFs: picking a non-PDF goes through the
    /// same rejection as any other selection.
    pub fn refresh_entries(&mut self) {
        let mut entries = Vec::new();

        if let Some(parent) = self.current_dir.parent() {
            entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
                is_pdf: false,
            });
        }

        if let Ok(read_dir) = std::fs::read_dir(&self.current_dir) {
            let mut dirs = Vec::new();
            let mut files = Vec::new();

            for entry in read_dir.flatten() {
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().to_string();

                // Skip hidden files/dirs
                if name.starts_with('.') {
                    continue;
                }

                if path.is_dir() {
                    dirs.push(FileEntry {
                        name,
                        path,
                        is_dir: true,
                        is_pdf: false,
                    });
                } else {
                    let is_pdf = path
                        .extension()
                        .and_then(|e| e.to_str())
                        .map(|e| e.eq_ignore_ascii_case("pdf"))
                        .unwrap_or(false);
                    files.push(FileEntry {
                        name,
                        path,
                        is_dir: false,
                        is_pdf,
                    });
                }
            }

            dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

            entries.extend(dirs);
            entries.extend(files);
        }

        self.entries = entries;
        self.cursor = 0;
    }

    /// Enter the directory at cursor, or return false if not a directory.
    pub fn enter_directory(&mut self) -> bool {
        if let Some(entry) = self.entries.get(self.cursor)
            && entry.is_dir
        {
            self.current_dir = entry.path.clone();
            self.refresh_entries();
            return true;
        }
        false
    }

    pub fn current_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,
    /// Buffer for the path input line.
    pub path_input: String,
    pub session: Session,
    pub notices: NoticeBoard,
    pub theme: Theme,
    pub tick: usize,
    pub should_quit: bool,
    pub show_help: bool,
    /// Height of the visible list area (set on resize, used for page up/down).
    pub visible_rows: usize,
    pub file_picker: FilePickerState,
    /// Where downloads are written.
    pub export_dir: PathBuf,
    /// Extraction service URL, shown in the footer.
    pub server_url: String,
    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
    pub clipboard: Box<dyn Clipboard>,
    /// Last tab bar area rendered (for mouse click → tab mapping).
    pub last_tab_area: Option<Rect>,
}

impl App {
    pub fn new(theme: Theme, export_dir: PathBuf, server_url: String) -> Self {
        Self {
            screen: Screen::Main,
            input_mode: InputMode::Normal,
            path_input: String::new(),
            session: Session::default(),
            notices: NoticeBoard::default(),
            theme,
            tick: 0,
            should_quit: false,
            show_help: false,
            visible_rows: 20,
            file_picker: FilePickerState::new(),
            export_dir,
            server_url,
            backend_cmd_tx: None,
            clipboard: Box::new(Osc52Clipboard),
            last_tab_area: None,
        }
    }

    /// Render the whole UI.
    pub fn view(&mut self, f: &mut Frame) {
        let area = f.area();
        let chunks = Layout::vertical([
            Constraint::Length(3), // tabs
            Constraint::Min(5),    // body
            Constraint::Length(1), // notice
            Constraint::Length(1), // footer / path input
        ])
        .split(area);

        self.last_tab_area = Some(chunks[0]);
        view::tabs::render_in(f, self, chunks[0]);

        match self.screen {
            Screen::Main => {
                self.visible_rows = chunks[1].height.saturating_sub(2) as usize;
                view::document::render_in(f, self, chunks[1]);
            }
            Screen::FilePicker => {
                self.visible_rows = chunks[1].height.saturating_sub(4) as usize;
                view::file_picker::render_in(f, self, chunks[1]);
            }
        }

        view::notice::render_in(f, self, chunks[2]);
        view::footer::render_in(f, self, chunks[3]);

        if self.show_help {
            view::help::render(f, &self.theme);
        }
    }
}

#[cfg(test)]
mod tests;
