//! Mock extraction backend for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::Value;

use crate::client::{ExtractionBackend, RawReply};
use crate::upload::PendingUpload;
use crate::CoreError;

/// A configurable mock response for [`MockBackend`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Answer with this status and body.
    Reply { status: u16, body: Value },
    /// Fail before any reply arrives (connection refused, timeout, ...).
    Transport(String),
}

impl MockResponse {
    pub fn ok(body: Value) -> Self {
        Self::Reply { status: 200, body }
    }
}

/// A hand-rolled mock implementing [`ExtractionBackend`] for tests.
///
/// Returns responses in order, repeating the last one once the sequence is
/// used up. Every submitted upload is recorded.
pub struct MockBackend {
    responses: Mutex<Vec<MockResponse>>,
    fallback: MockResponse,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    submitted: Mutex<Vec<PendingUpload>>,
}

impl MockBackend {
    /// Create a mock that always returns `response`.
    pub fn new(response: MockResponse) -> Self {
        Self::with_sequence(vec![response])
    }

    /// Create a mock that returns responses in order, repeating the last one.
    pub fn with_sequence(mut responses: Vec<MockResponse>) -> Self {
        assert!(
            !responses.is_empty(),
            "sequence must have at least one response"
        );
        // Reversed so pop() yields the next response.
        responses.reverse();
        let fallback = responses[0].clone();
        Self {
            responses: Mutex::new(responses),
            fallback,
            delay: None,
            call_count: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Set simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Uploads submitted so far, oldest first.
    pub fn submitted(&self) -> Vec<PendingUpload> {
        self.submitted.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn next_response(&self) -> MockResponse {
        let mut seq = match self.responses.lock() {
            Ok(seq) => seq,
            Err(_) => return self.fallback.clone(),
        };
        if seq.len() > 1 {
            seq.pop().unwrap_or_else(|| self.fallback.clone())
        } else {
            seq.last().cloned().unwrap_or_else(|| self.fallback.clone())
        }
    }
}

impl ExtractionBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn submit<'a>(
        &'a self,
        upload: &'a PendingUpload,
    ) -> Pin<Box<dyn Future<Output = Result<RawReply, CoreError>> + Send + 'a>> {
        Box::pin(async move {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut submitted) = self.submitted.lock() {
                submitted.push(upload.clone());
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match self.next_response() {
                MockResponse::Reply { status, body } => Ok(RawReply::new(status, body)),
                MockResponse::Transport(msg) => Err(CoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    msg,
                ))),
            }
        })
    }
}
