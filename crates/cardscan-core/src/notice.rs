//! Transient user-facing notifications.

use std::time::{Duration, Instant};

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

pub const MSG_SELECT_PDF: &str = "Please select a PDF file";
pub const MSG_SELECT_FIRST: &str = "Please select a file first";
pub const MSG_IN_PROGRESS: &str = "Extraction already in progress";
pub const MSG_EXTRACTED: &str = "Information extracted successfully";
pub const MSG_EXTRACT_FAILED: &str = "Failed to extract information";
pub const MSG_GENERIC_ERROR: &str = "An error occurred";
pub const MSG_COPIED: &str = "Copied to clipboard!";
pub const MSG_COPY_FAILED: &str = "Failed to copy";
pub const MSG_DOWNLOADED: &str = "Downloaded successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Holds the single visible notice; a newer notice replaces the older one.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    current: Option<(Notice, Instant)>,
    ttl: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(NOTICE_TTL)
    }
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn show(&mut self, notice: Notice) {
        self.show_at(notice, Instant::now());
    }

    pub fn show_at(&mut self, notice: Notice, now: Instant) {
        self.current = Some((notice, now));
    }

    /// Drop the notice once its time is up.
    pub fn expire(&mut self, now: Instant) {
        if let Some((_, shown)) = &self.current
            && now.duration_since(*shown) >= self.ttl
        {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref().map(|(n, _)| n)
    }
}
