use std::sync::Arc;

use ck_core::ports::ClipboardHistoryPort;
use ck_core::ClearFailure;
use tracing::{info, info_span, warn, Instrument};

/// Ask the backend to clear its history.
///
/// The local store is left alone: it empties when the backend pushes the
/// empty snapshot that follows a successful clear.
pub struct ClearHistory {
    history: Arc<dyn ClipboardHistoryPort>,
}

impl ClearHistory {
    pub fn new(history: Arc<dyn ClipboardHistoryPort>) -> Self {
        Self { history }
    }

    pub async fn execute(&self) -> Result<(), ClearFailure> {
        let span = info_span!("usecase.clear_history.execute");

        async {
            self.history.clear_history().await.map_err(|err| {
                warn!(error = %err, "Clear history rejected");
                ClearFailure {
                    reason: err.to_string(),
                }
            })?;
            info!("History cleared");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ck_core::ports::HistoryPayload;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct MockHistory {
        cleared: AtomicBool,
        should_fail: bool,
    }

    #[async_trait]
    impl ClipboardHistoryPort for MockHistory {
        async fn get_history(&self) -> anyhow::Result<HistoryPayload> {
            Ok(vec![])
        }

        async fn clear_history(&self) -> anyhow::Result<()> {
            if self.should_fail {
                return Err(anyhow::anyhow!("backend busy"));
            }
            self.cleared.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn clears_backend_history() {
        let backend = Arc::new(MockHistory {
            cleared: AtomicBool::new(false),
            should_fail: false,
        });

        ClearHistory::new(backend.clone()).execute().await.unwrap();

        assert!(backend.cleared.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn rejection_becomes_clear_failure() {
        let backend = Arc::new(MockHistory {
            cleared: AtomicBool::new(false),
            should_fail: true,
        });

        let err = ClearHistory::new(backend).execute().await.unwrap_err();

        assert_eq!(err.reason, "backend busy");
    }
}
