use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use cardscan_core::ExtractionBackend;
use cardscan_core::client;

use crate::tui_event::{BackendCommand, BackendEvent};

/// Listen for commands from the UI and run each extraction as its own task,
/// so a slow request never blocks another document kind.
pub fn spawn_listener(
    backend: Arc<dyn ExtractionBackend>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let cmd = tokio::select! {
                _ = cancel.cancelled() => break,
                cmd = cmd_rx.recv() => match cmd {
                    Some(cmd) => cmd,
                    None => break,
                },
            };

            match cmd {
                BackendCommand::Extract { id, upload } => {
                    let backend = Arc::clone(&backend);
                    let tx = event_tx.clone();
                    let cancel = cancel.clone();
                    tokio::spawn(async move {
                        let kind = upload.kind;
                        tokio::select! {
                            _ = cancel.cancelled() => {
                                tracing::debug!(%kind, "extraction abandoned on shutdown");
                            }
                            outcome = client::extract(backend.as_ref(), &upload) => {
                                let _ = tx.send(BackendEvent::ExtractionFinished { kind, id, outcome });
                            }
                        }
                    });
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardscan_core::mock::{MockBackend, MockResponse};
    use cardscan_core::{DocumentKind, DocumentSession, FileCandidate};
    use serde_json::json;

    #[tokio::test]
    async fn extraction_result_comes_back_as_event() {
        let backend = Arc::new(MockBackend::new(MockResponse::ok(json!({
            "status": "success",
            "data": { "pan_number": "ABCDE1234F" }
        }))));
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let handle = spawn_listener(backend.clone(), cmd_rx, event_tx, cancel.clone());

        let mut doc = DocumentSession::new(DocumentKind::Pan);
        doc.select_file(FileCandidate::from_path("card.pdf"));
        let (id, upload) = doc.begin_extraction().unwrap();
        cmd_tx.send(BackendCommand::Extract { id, upload }).unwrap();

        let BackendEvent::ExtractionFinished {
            kind,
            id: reply_id,
            outcome,
        } = event_rx.recv().await.unwrap();
        assert_eq!(kind, DocumentKind::Pan);
        assert_eq!(reply_id, id);
        assert_eq!(outcome.unwrap().rows()[3].value, "ABCDE1234F");
        assert_eq!(backend.call_count(), 1);

        cancel.cancel();
        handle.await.unwrap();
    }
}
