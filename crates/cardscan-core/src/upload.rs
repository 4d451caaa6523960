//! File selection and declared-type validation for one document kind.

use std::path::{Path, PathBuf};

use crate::document::DocumentKind;

/// The only media type accepted for upload.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Filename display when nothing is selected.
pub const NO_FILE_SELECTED: &str = "No file selected";

/// A file offered for upload, before validation.
///
/// `declared_type` is guessed from the file name the same way a browser fills
/// in `File.type`; it is never checked against the file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub name: String,
    pub declared_type: String,
}

impl FileCandidate {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let declared_type = mime_guess::from_path(&path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();
        Self {
            name: display_name(&path),
            path,
            declared_type,
        }
    }

    /// Build a candidate from text dropped (pasted) into the terminal.
    ///
    /// Terminals deliver a dropped file as its path, sometimes quoted, with
    /// escaped spaces, or as a `file://` URL. Only the first path is used.
    pub fn from_dropped(text: &str) -> Option<Self> {
        let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
        let unquoted = strip_quotes(line);

        let path = if let Some(rest) = unquoted.strip_prefix("file://") {
            let rest = rest.strip_prefix("localhost").unwrap_or(rest);
            urlencoding::decode(rest)
                .map(|p| p.into_owned())
                .unwrap_or_else(|_| rest.to_string())
        } else {
            unquoted.replace("\\ ", " ")
        };

        if path.is_empty() {
            return None;
        }
        Some(Self::from_path(path))
    }

    pub fn is_pdf(&self) -> bool {
        self.declared_type == PDF_MEDIA_TYPE
    }
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// A validated file waiting to be sent for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub kind: DocumentKind,
    pub path: PathBuf,
    pub name: String,
}

/// Owns the current selection for one document kind.
#[derive(Debug, Clone)]
pub struct UploadManager {
    kind: DocumentKind,
    pending: Option<PendingUpload>,
}

impl UploadManager {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            pending: None,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Offer a candidate. Returns the new selection, or `None` if the
    /// candidate was rejected; a rejection also clears any earlier selection.
    pub fn select(&mut self, candidate: FileCandidate) -> Option<&PendingUpload> {
        if !candidate.is_pdf() {
            tracing::debug!(
                kind = %self.kind,
                file = %candidate.name,
                declared_type = %candidate.declared_type,
                "rejected non-PDF selection"
            );
            self.pending = None;
            return None;
        }

        self.pending = Some(PendingUpload {
            kind: self.kind,
            path: candidate.path,
            name: candidate.name,
        });
        self.pending.as_ref()
    }

    pub fn pending(&self) -> Option<&PendingUpload> {
        self.pending.as_ref()
    }

    /// Text shown in the filename slot.
    pub fn filename_display(&self) -> &str {
        self.pending
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or(NO_FILE_SELECTED)
    }

    /// Whether the extraction trigger is enabled.
    pub fn can_extract(&self) -> bool {
        self.pending.is_some()
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }
}
