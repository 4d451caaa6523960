use thiserror::Error;

pub mod client;
pub mod clipboard;
pub mod config_file;
pub mod document;
pub mod mock;
pub mod notice;
pub mod presenter;
pub mod session;
pub mod tabs;
pub mod upload;

// Re-export for convenience
pub use client::{ClientConfig, ExtractionBackend, ExtractionFailure, HttpBackend, RawReply};
pub use clipboard::{Clipboard, MemoryClipboard};
pub use document::{DocumentKind, FieldSpec};
pub use notice::{Notice, NoticeBoard, NoticeLevel};
pub use presenter::{ExtractionResult, FieldRow, MISSING_FIELD};
pub use session::{DocumentSession, Panel, RequestId, Session};
pub use tabs::TabBar;
pub use upload::{FileCandidate, NO_FILE_SELECTED, PDF_MEDIA_TYPE, PendingUpload, UploadManager};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("clipboard error: {0}")]
    Clipboard(String),
}
