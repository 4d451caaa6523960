use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use cardscan_core::mock::{MockBackend, MockResponse};
use cardscan_core::notice::{
    MSG_COPIED, MSG_DOWNLOADED, MSG_EXTRACTED, MSG_IN_PROGRESS, MSG_SELECT_FIRST, MSG_SELECT_PDF,
};
use cardscan_core::{
    DocumentKind, ExtractionFailure, ExtractionResult, MemoryClipboard, NO_FILE_SELECTED,
    NoticeLevel, Panel, RequestId,
};

use super::*;
use crate::action::Action;
use crate::backend::spawn_listener;
use crate::tui_event::BackendEvent;

/// App wired to a test command channel, an in-memory clipboard and a scratch
/// directory holding `card.pdf`, `notes.txt` and an empty `sub/` directory.
struct Fixture {
    app: App,
    dir: TempDir,
    cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    clipboard: MemoryClipboard,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("card.pdf"), b"%PDF-1.4 test").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let mut app = App::new(
            Theme::default_theme(),
            dir.path().to_path_buf(),
            "http://127.0.0.1:5000".into(),
        );
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        app.backend_cmd_tx = Some(cmd_tx);
        let clipboard = MemoryClipboard::new();
        app.clipboard = Box::new(clipboard.clone());
        app.browse(dir.path().to_path_buf());

        Self {
            app,
            dir,
            cmd_rx,
            clipboard,
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn drop_file(&mut self, name: &str) {
        let text = self.path(name).display().to_string();
        self.app.update(Action::Dropped(text));
    }

    /// Trigger extraction on the active tab and take the command it sends.
    fn extract(&mut self) -> RequestId {
        self.app.update(Action::Extract);
        let BackendCommand::Extract { id, .. } = self.cmd_rx.try_recv().unwrap();
        id
    }

    fn reply(
        &mut self,
        kind: DocumentKind,
        id: RequestId,
        outcome: Result<ExtractionResult, ExtractionFailure>,
    ) {
        self.app
            .handle_backend_event(BackendEvent::ExtractionFinished { kind, id, outcome });
    }

    fn notice(&self) -> Option<(NoticeLevel, String)> {
        self.app
            .notices
            .current()
            .map(|n| (n.level, n.message.clone()))
    }
}

fn aadhaar_result() -> ExtractionResult {
    aadhaar_result_for("Asha Verma")
}

fn aadhaar_result_for(name: &str) -> ExtractionResult {
    let data = json!({
        "name": name,
        "dob": "01/01/1990",
        "gender": "Female",
        "aadhaar_number": "1234 5678 9012",
        "address": ""
    });
    ExtractionResult::new(DocumentKind::Aadhaar, data.as_object().cloned().unwrap())
}

// ── Tabs ────────────────────────────────────────────────────────

#[test]
fn tabs_cycle_and_select() {
    let mut fx = Fixture::new();
    assert_eq!(fx.app.session.tabs.active(), DocumentKind::Aadhaar);

    fx.app.update(Action::NextTab);
    assert_eq!(fx.app.session.tabs.active(), DocumentKind::Pan);

    fx.app.update(Action::NextTab);
    assert_eq!(fx.app.session.tabs.active(), DocumentKind::Aadhaar);

    fx.app.update(Action::SelectTab(DocumentKind::Pan));
    assert_eq!(fx.app.session.tabs.active(), DocumentKind::Pan);

    fx.app.update(Action::PrevTab);
    assert_eq!(fx.app.session.tabs.active(), DocumentKind::Aadhaar);
}

#[test]
fn click_on_tab_selects_it() {
    let mut fx = Fixture::new();
    fx.app.last_tab_area = Some(Rect::new(0, 0, 80, 3));
    fx.app.update(Action::ClickAt(20, 1));
    assert_eq!(fx.app.session.tabs.active(), DocumentKind::Pan);
}

#[test]
fn selection_is_per_tab() {
    let mut fx = Fixture::new();
    fx.drop_file("card.pdf");
    fx.app.update(Action::NextTab);
    assert_eq!(fx.app.session.active().filename_display(), NO_FILE_SELECTED);
    fx.app.update(Action::PrevTab);
    assert_eq!(fx.app.session.active().filename_display(), "card.pdf");
}

// ── Selection ───────────────────────────────────────────────────

#[test]
fn dropped_pdf_is_selected() {
    let mut fx = Fixture::new();
    fx.drop_file("card.pdf");
    let doc = fx.app.session.active();
    assert_eq!(doc.filename_display(), "card.pdf");
    assert!(doc.can_extract());
    assert!(fx.notice().is_none());
}

#[test]
fn dropped_file_url_is_selected() {
    let mut fx = Fixture::new();
    let url = format!("file://{}", fx.path("card.pdf").display());
    fx.app.update(Action::Dropped(url));
    assert_eq!(fx.app.session.active().filename_display(), "card.pdf");
}

#[test]
fn dropped_text_file_is_rejected_and_clears_selection() {
    let mut fx = Fixture::new();
    fx.drop_file("card.pdf");
    fx.drop_file("notes.txt");

    assert_eq!(
        fx.notice(),
        Some((NoticeLevel::Error, MSG_SELECT_PDF.to_string()))
    );
    let doc = fx.app.session.active();
    assert_eq!(doc.filename_display(), NO_FILE_SELECTED);
    assert!(!doc.can_extract());
}

#[test]
fn missing_path_reports_not_found() {
    let mut fx = Fixture::new();
    fx.drop_file("gone.pdf");
    let (level, message) = fx.notice().unwrap();
    assert_eq!(level, NoticeLevel::Error);
    assert!(message.starts_with("File not found: "));
}

#[test]
fn typed_path_is_selected_on_confirm() {
    let mut fx = Fixture::new();
    fx.app.update(Action::StartPathInput);
    assert_eq!(fx.app.input_mode, InputMode::PathInput);

    for c in fx.path("card.pdf").display().to_string().chars() {
        fx.app.update(Action::TextInput(c));
    }
    fx.app.update(Action::TextConfirm);

    assert_eq!(fx.app.input_mode, InputMode::Normal);
    assert!(fx.app.path_input.is_empty());
    assert_eq!(fx.app.session.active().filename_display(), "card.pdf");
}

#[test]
fn path_input_cancel_keeps_state() {
    let mut fx = Fixture::new();
    fx.app.update(Action::StartPathInput);
    fx.app.update(Action::TextInput('x'));
    fx.app.update(Action::TextBackspace);
    fx.app.update(Action::TextInput('y'));
    assert_eq!(fx.app.path_input, "y");
    fx.app.update(Action::TextCancel);
    assert_eq!(fx.app.input_mode, InputMode::Normal);
    assert_eq!(fx.app.session.active().filename_display(), NO_FILE_SELECTED);
}

// ── File picker ─────────────────────────────────────────────────

#[test]
fn picker_lists_dirs_first_and_skips_nothing_visible() {
    let fx = Fixture::new();
    let names: Vec<&str> = fx
        .app
        .file_picker
        .entries
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["..", "sub", "card.pdf", "notes.txt"]);
}

#[test]
fn picker_drill_in_selects_file() {
    let mut fx = Fixture::new();
    fx.app.update(Action::OpenFilePicker);
    assert_eq!(fx.app.screen, Screen::FilePicker);

    // "..", "sub", then card.pdf
    fx.app.update(Action::MoveDown);
    fx.app.update(Action::MoveDown);
    fx.app.update(Action::DrillIn);

    assert_eq!(fx.app.screen, Screen::Main);
    assert_eq!(fx.app.session.active().filename_display(), "card.pdf");
}

#[test]
fn picker_drill_in_enters_directory() {
    let mut fx = Fixture::new();
    fx.app.update(Action::OpenFilePicker);
    fx.app.update(Action::MoveDown);
    fx.app.update(Action::DrillIn);

    assert_eq!(fx.app.screen, Screen::FilePicker);
    assert_eq!(fx.app.file_picker.current_dir, fx.path("sub"));
    assert_eq!(fx.app.file_picker.cursor, 0);
}

#[test]
fn picker_escape_returns_to_main() {
    let mut fx = Fixture::new();
    fx.app.update(Action::OpenFilePicker);
    fx.app.update(Action::NavigateBack);
    assert_eq!(fx.app.screen, Screen::Main);
}

// ── Extraction ──────────────────────────────────────────────────

#[test]
fn extract_without_file_sends_nothing() {
    let mut fx = Fixture::new();
    fx.app.update(Action::Extract);
    assert_eq!(
        fx.notice(),
        Some((NoticeLevel::Error, MSG_SELECT_FIRST.to_string()))
    );
    assert!(fx.cmd_rx.try_recv().is_err());
}

#[test]
fn extract_sends_command_for_active_kind() {
    let mut fx = Fixture::new();
    fx.app.update(Action::NextTab);
    fx.drop_file("card.pdf");
    fx.app.update(Action::Extract);

    let BackendCommand::Extract { upload, .. } = fx.cmd_rx.try_recv().unwrap();
    assert_eq!(upload.kind, DocumentKind::Pan);
    assert_eq!(upload.name, "card.pdf");
    assert!(fx.app.session.active().is_busy());
    assert!(!fx.app.session.active().can_extract());
}

#[test]
fn second_extract_while_busy_is_refused() {
    let mut fx = Fixture::new();
    fx.drop_file("card.pdf");
    fx.app.update(Action::Extract);
    fx.app.update(Action::Extract);

    assert!(fx.cmd_rx.try_recv().is_ok());
    assert!(fx.cmd_rx.try_recv().is_err());
    assert_eq!(
        fx.notice(),
        Some((NoticeLevel::Info, MSG_IN_PROGRESS.to_string()))
    );
}

#[tokio::test]
async fn listener_round_trip_refuses_retrigger_while_busy() {
    let mut fx = Fixture::new();
    let backend = Arc::new(
        MockBackend::new(MockResponse::ok(json!({
            "status": "success",
            "data": { "name": "Asha Verma" }
        })))
        .with_delay(Duration::from_millis(50)),
    );
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let listener = spawn_listener(backend.clone(), cmd_rx, event_tx, cancel.clone());
    fx.app.backend_cmd_tx = Some(cmd_tx);

    fx.drop_file("card.pdf");
    fx.app.update(Action::Extract);
    fx.app.update(Action::Extract);
    assert_eq!(
        fx.notice(),
        Some((NoticeLevel::Info, MSG_IN_PROGRESS.to_string()))
    );

    let event = event_rx.recv().await.unwrap();
    fx.app.handle_backend_event(event);

    assert_eq!(backend.call_count(), 1);
    let doc = fx.app.session.active();
    assert_eq!(doc.panel(), Panel::Results);
    assert_eq!(doc.rows().unwrap()[0].value, "Asha Verma");

    cancel.cancel();
    listener.await.unwrap();
}

#[test]
fn extract_without_listener_fails_cleanly() {
    let mut fx = Fixture::new();
    fx.app.backend_cmd_tx = None;
    fx.drop_file("card.pdf");
    fx.app.update(Action::Extract);

    let (level, _) = fx.notice().unwrap();
    assert_eq!(level, NoticeLevel::Error);
    assert!(!fx.app.session.active().is_busy());
    assert_eq!(fx.app.session.active().panel(), Panel::Upload);
}

#[test]
fn successful_reply_shows_results() {
    let mut fx = Fixture::new();
    fx.drop_file("card.pdf");
    let id = fx.extract();
    fx.reply(DocumentKind::Aadhaar, id, Ok(aadhaar_result()));

    let doc = fx.app.session.active();
    assert_eq!(doc.panel(), Panel::Results);
    assert!(!doc.is_busy());
    let rows = doc.rows().unwrap();
    assert_eq!(rows[0].value, "Asha Verma");
    assert_eq!(rows[4].value, "-");
    assert_eq!(
        fx.notice(),
        Some((NoticeLevel::Success, MSG_EXTRACTED.to_string()))
    );
}

#[test]
fn failed_reply_keeps_upload_panel() {
    let mut fx = Fixture::new();
    fx.drop_file("card.pdf");
    let id = fx.extract();
    fx.reply(
        DocumentKind::Aadhaar,
        id,
        Err(ExtractionFailure::new("Only PDF files are allowed")),
    );

    let doc = fx.app.session.active();
    assert_eq!(doc.panel(), Panel::Upload);
    assert!(doc.can_extract());
    assert_eq!(
        fx.notice(),
        Some((NoticeLevel::Error, "Only PDF files are allowed".to_string()))
    );
}

#[test]
fn reply_lands_on_its_own_tab() {
    let mut fx = Fixture::new();
    fx.drop_file("card.pdf");
    let id = fx.extract();
    fx.app.update(Action::NextTab);
    fx.reply(DocumentKind::Aadhaar, id, Ok(aadhaar_result()));

    assert_eq!(fx.app.session.active().panel(), Panel::Upload);
    assert_eq!(
        fx.app.session.document(DocumentKind::Aadhaar).panel(),
        Panel::Results
    );
}

#[test]
fn late_reply_after_reset_is_discarded() {
    let mut fx = Fixture::new();
    fx.drop_file("card.pdf");
    let id = fx.extract();
    fx.app.update(Action::Reset);
    fx.reply(DocumentKind::Aadhaar, id, Ok(aadhaar_result()));

    let doc = fx.app.session.active();
    assert_eq!(doc.panel(), Panel::Upload);
    assert!(doc.result().is_none());
    assert_eq!(doc.filename_display(), NO_FILE_SELECTED);
}

#[test]
fn reply_from_before_reset_does_not_answer_new_request() {
    let mut fx = Fixture::new();
    std::fs::write(fx.path("old.pdf"), b"%PDF-1.4 old").unwrap();
    std::fs::write(fx.path("new.pdf"), b"%PDF-1.4 new").unwrap();

    fx.drop_file("old.pdf");
    let old_id = fx.extract();
    fx.app.update(Action::Reset);
    fx.drop_file("new.pdf");
    let new_id = fx.extract();

    fx.reply(DocumentKind::Aadhaar, old_id, Ok(aadhaar_result_for("Old Holder")));
    let doc = fx.app.session.active();
    assert!(doc.is_busy());
    assert_eq!(doc.panel(), Panel::Upload);
    assert!(fx.notice().is_none());

    fx.reply(DocumentKind::Aadhaar, new_id, Ok(aadhaar_result_for("New Holder")));
    let doc = fx.app.session.active();
    assert_eq!(doc.rows().unwrap()[0].value, "New Holder");
    assert_eq!(doc.filename_display(), "new.pdf");
    assert_eq!(
        fx.notice(),
        Some((NoticeLevel::Success, MSG_EXTRACTED.to_string()))
    );
}

// ── Results actions ─────────────────────────────────────────────

fn fixture_with_results() -> Fixture {
    let mut fx = Fixture::new();
    fx.drop_file("card.pdf");
    let id = fx.extract();
    fx.reply(DocumentKind::Aadhaar, id, Ok(aadhaar_result()));
    fx
}

#[test]
fn copy_writes_pretty_json() {
    let mut fx = fixture_with_results();
    fx.app.update(Action::Copy);

    let copied = fx.clipboard.last().unwrap();
    assert!(copied.starts_with("{\n  \"name\": \"Asha Verma\""));
    assert_eq!(
        fx.notice(),
        Some((NoticeLevel::Success, MSG_COPIED.to_string()))
    );
}

#[test]
fn copy_without_results_does_nothing() {
    let mut fx = Fixture::new();
    fx.app.update(Action::Copy);
    assert_eq!(fx.clipboard.write_count(), 0);
    assert!(fx.notice().is_none());
}

#[test]
fn download_writes_export_file() {
    let mut fx = fixture_with_results();
    fx.app.update(Action::Download);

    let written = std::fs::read_to_string(fx.path("aadhaar_card_details.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["aadhaar_number"], "1234 5678 9012");
    assert_eq!(
        fx.notice(),
        Some((NoticeLevel::Success, MSG_DOWNLOADED.to_string()))
    );
}

#[test]
fn reset_returns_to_empty_upload() {
    let mut fx = fixture_with_results();
    fx.app.update(Action::Reset);

    let doc = fx.app.session.active();
    assert_eq!(doc.panel(), Panel::Upload);
    assert_eq!(doc.filename_display(), NO_FILE_SELECTED);
    assert!(!doc.can_extract());
}

#[test]
fn selection_refused_while_results_showing() {
    let mut fx = fixture_with_results();
    fx.drop_file("card.pdf");
    assert_eq!(fx.notice().unwrap().0, NoticeLevel::Info);

    fx.app.update(Action::OpenFilePicker);
    assert_eq!(fx.app.screen, Screen::Main);
    assert_eq!(fx.app.session.active().panel(), Panel::Results);
}

// ── Overlay and lifecycle ───────────────────────────────────────

#[test]
fn help_overlay_swallows_actions() {
    let mut fx = Fixture::new();
    fx.app.update(Action::ToggleHelp);
    assert!(fx.app.show_help);

    fx.app.update(Action::NextTab);
    assert_eq!(fx.app.session.tabs.active(), DocumentKind::Aadhaar);

    fx.app.update(Action::NavigateBack);
    assert!(!fx.app.show_help);
}

#[test]
fn quit_sets_flag() {
    let mut fx = Fixture::new();
    fx.app.update(Action::Quit);
    assert!(fx.app.should_quit);
}
