//! Per-document state for one run of the application.
//!
//! Each [`DocumentSession`] ties together the upload selection, the cached
//! extraction result and the outstanding request for one document kind. The
//! two kinds never share state.

use std::path::Path;

use crate::client::{self, ExtractionBackend, ExtractionFailure};
use crate::clipboard::Clipboard;
use crate::document::DocumentKind;
use crate::notice::{MSG_EXTRACTED, MSG_IN_PROGRESS, MSG_SELECT_FIRST, MSG_SELECT_PDF, Notice};
use crate::presenter::{self, ExtractionResult, FieldRow};
use crate::tabs::TabBar;
use crate::upload::{FileCandidate, PendingUpload, UploadManager};

/// Identifies one extraction request. A reply is applied only while its id is
/// the one the session is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Which section of a document tab is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Upload,
    Results,
}

#[derive(Debug, Clone)]
pub struct DocumentSession {
    upload: UploadManager,
    result: Option<ExtractionResult>,
    in_flight: Option<RequestId>,
    next_request: u64,
}

impl DocumentSession {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            upload: UploadManager::new(kind),
            result: None,
            in_flight: None,
            next_request: 0,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.upload.kind()
    }

    pub fn upload(&self) -> &UploadManager {
        &self.upload
    }

    pub fn result(&self) -> Option<&ExtractionResult> {
        self.result.as_ref()
    }

    /// Results replace the upload section once something is cached.
    pub fn panel(&self) -> Panel {
        if self.result.is_some() {
            Panel::Results
        } else {
            Panel::Upload
        }
    }

    /// Whether the busy indicator is showing.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn filename_display(&self) -> &str {
        self.upload.filename_display()
    }

    pub fn can_extract(&self) -> bool {
        self.upload.can_extract() && self.in_flight.is_none()
    }

    /// Rendered rows of the cached result.
    pub fn rows(&self) -> Option<Vec<FieldRow>> {
        self.result.as_ref().map(ExtractionResult::rows)
    }

    /// Offer a file. Returns the notice to show when it is rejected.
    pub fn select_file(&mut self, candidate: FileCandidate) -> Option<Notice> {
        match self.upload.select(candidate) {
            Some(_) => None,
            None => Some(Notice::error(MSG_SELECT_PDF)),
        }
    }

    /// Mark an extraction as started and hand back its id and the upload to
    /// send.
    ///
    /// Refused while another extraction for this kind is pending, or when no
    /// file is selected; no request must be issued in either case.
    pub fn begin_extraction(&mut self) -> Result<(RequestId, PendingUpload), Notice> {
        if self.in_flight.is_some() {
            return Err(Notice::info(MSG_IN_PROGRESS));
        }
        let Some(pending) = self.upload.pending().cloned() else {
            return Err(Notice::error(MSG_SELECT_FIRST));
        };
        self.next_request += 1;
        let id = RequestId(self.next_request);
        self.in_flight = Some(id);
        Ok((id, pending))
    }

    /// Apply the outcome of extraction `id`.
    ///
    /// Returns `None` (and changes nothing) unless `id` is the request being
    /// waited for. A reply to a request made before the last reset never
    /// matches, even when a newer request is out.
    pub fn complete_extraction(
        &mut self,
        id: RequestId,
        outcome: Result<ExtractionResult, ExtractionFailure>,
    ) -> Option<Notice> {
        if self.in_flight != Some(id) {
            tracing::debug!(kind = %self.kind(), ?id, "discarding stale reply");
            return None;
        }
        self.in_flight = None;

        Some(match outcome {
            Ok(result) => {
                self.result = Some(result);
                Notice::success(MSG_EXTRACTED)
            }
            Err(failure) => Notice::error(failure.message),
        })
    }

    /// Run a full extraction against `backend`.
    pub async fn extract(&mut self, backend: &dyn ExtractionBackend) -> Option<Notice> {
        let (id, pending) = match self.begin_extraction() {
            Ok(started) => started,
            Err(notice) => return Some(notice),
        };
        let outcome = client::extract(backend, &pending).await;
        self.complete_extraction(id, outcome)
    }

    pub fn copy(&self, clipboard: &mut dyn Clipboard) -> Option<Notice> {
        presenter::copy(self.result.as_ref(), clipboard)
    }

    pub fn download(&self, dir: &Path) -> Option<Notice> {
        presenter::download(self.result.as_ref(), dir)
    }

    /// Back to the initial empty upload state.
    pub fn reset(&mut self) {
        self.upload.reset();
        self.result = None;
        self.in_flight = None;
    }
}

/// All state for one application run.
#[derive(Debug, Clone)]
pub struct Session {
    pub tabs: TabBar,
    aadhaar: DocumentSession,
    pan: DocumentSession,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            tabs: TabBar::default(),
            aadhaar: DocumentSession::new(DocumentKind::Aadhaar),
            pan: DocumentSession::new(DocumentKind::Pan),
        }
    }
}

impl Session {
    pub fn document(&self, kind: DocumentKind) -> &DocumentSession {
        match kind {
            DocumentKind::Aadhaar => &self.aadhaar,
            DocumentKind::Pan => &self.pan,
        }
    }

    pub fn document_mut(&mut self, kind: DocumentKind) -> &mut DocumentSession {
        match kind {
            DocumentKind::Aadhaar => &mut self.aadhaar,
            DocumentKind::Pan => &mut self.pan,
        }
    }

    /// The document behind the active tab.
    pub fn active(&self) -> &DocumentSession {
        self.document(self.tabs.active())
    }

    pub fn active_mut(&mut self) -> &mut DocumentSession {
        self.document_mut(self.tabs.active())
    }
}
