use cardscan_core::{DocumentKind, ExtractionFailure, ExtractionResult, PendingUpload, RequestId};

/// Commands sent from the TUI to the backend.
#[derive(Debug)]
pub enum BackendCommand {
    /// Send one upload to the extraction service.
    Extract {
        id: RequestId,
        upload: PendingUpload,
    },
}

/// Events flowing from the backend task to the TUI.
#[derive(Debug)]
pub enum BackendEvent {
    /// An extraction request has finished, successfully or not.
    ExtractionFinished {
        kind: DocumentKind,
        id: RequestId,
        outcome: Result<ExtractionResult, ExtractionFailure>,
    },
}
