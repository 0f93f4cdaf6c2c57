//! Background timetable extraction for TUI responsiveness
//!
//! The upload and model call run on a tokio task so the event loop keeps
//! drawing the spinner. Only one extraction may be in flight at a time.

use std::path::PathBuf;

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::ai::{ExtractError, Extractor, TimetableResponse};

pub type ImportResult = Result<TimetableResponse, ExtractError>;

#[derive(Default)]
pub struct ImportPoller {
    result_rx: Option<oneshot::Receiver<ImportResult>>,
}

impl ImportPoller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.result_rx.is_some()
    }

    /// Starts extracting `path`. Returns false, doing nothing, while a
    /// previous request is still pending.
    pub fn start(&mut self, extractor: Extractor, path: PathBuf) -> bool {
        if self.is_pending() {
            tracing::debug!("Import already in flight, ignoring {}", path.display());
            return false;
        }

        let (tx, rx) = oneshot::channel();
        self.result_rx = Some(rx);
        tokio::spawn(async move {
            let result = extractor.extract_file(&path).await;
            let _ = tx.send(result);
        });
        true
    }

    /// Non-blocking check for a finished extraction.
    pub fn try_recv_result(&mut self) -> Option<ImportResult> {
        let mut rx = self.result_rx.take()?;
        match rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => {
                self.result_rx = Some(rx);
                None
            }
            Err(TryRecvError::Closed) => Some(Err(ExtractError::Request(
                "extraction task ended without a result".to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::AiConfig;

    fn keyless_extractor() -> Extractor {
        Extractor::from_config(&AiConfig::default())
            .unwrap()
            .with_api_key(None)
    }

    #[tokio::test]
    async fn test_second_start_refused_while_pending() {
        let mut poller = ImportPoller::new();
        assert!(!poller.is_pending());
        assert!(poller.start(keyless_extractor(), PathBuf::from("a.png")));
        assert!(poller.is_pending());
        assert!(!poller.start(keyless_extractor(), PathBuf::from("b.png")));
    }

    #[tokio::test]
    async fn test_result_clears_pending() {
        let mut poller = ImportPoller::new();
        poller.start(keyless_extractor(), PathBuf::from("timetable.png"));

        let result = loop {
            if let Some(result) = poller.try_recv_result() {
                break result;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        };

        assert!(matches!(result, Err(ExtractError::MissingApiKey)));
        assert!(!poller.is_pending());
        assert!(poller.start(keyless_extractor(), PathBuf::from("again.png")));
    }

    #[test]
    fn test_try_recv_without_start_is_none() {
        let mut poller = ImportPoller::new();
        assert!(poller.try_recv_result().is_none());
    }
}
