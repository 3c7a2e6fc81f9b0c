// src/search/debounce.rs
use crate::parse::Record;
use crate::search::rank::Ranker;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::debug;

/// Debounced ranking over one session's record set.
///
/// Each `set_query` restarts the quiet-period timer; only after input has
/// paused for the configured delay does the background task recompute the
/// ranking and publish the new ordered sequence. At most one recomputation
/// is ever pending. The record set is shared immutably for the session;
/// dropping the handle aborts the task.
pub struct DebouncedSearch {
    query_tx: watch::Sender<String>,
    results_rx: watch::Receiver<Vec<Record>>,
    handle: JoinHandle<()>,
}

impl DebouncedSearch {
    pub fn spawn(ranker: Ranker, records: Arc<Vec<Record>>, delay: Duration) -> Self {
        let (query_tx, mut query_rx) = watch::channel(String::new());
        let (results_tx, results_rx) = watch::channel(Vec::new());

        let handle = tokio::spawn(async move {
            loop {
                // Wait for the next keystroke.
                if query_rx.changed().await.is_err() {
                    return;
                }
                // Restart the timer on every further change; fire on quiet.
                loop {
                    tokio::select! {
                        changed = query_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                        }
                        _ = time::sleep(delay) => {
                            let query = query_rx.borrow_and_update().clone();
                            let ranked: Vec<Record> = ranker
                                .rank(&query, &records)
                                .into_iter()
                                .cloned()
                                .collect();
                            debug!(query = %query, matches = ranked.len(), "ranking recomputed");
                            if results_tx.send(ranked).is_err() {
                                return;
                            }
                            break;
                        }
                    }
                }
            }
        });

        Self {
            query_tx,
            results_rx,
            handle,
        }
    }

    /// Publish a new query, resetting any pending recomputation.
    pub fn set_query(&self, query: impl Into<String>) {
        let _ = self.query_tx.send(query.into());
    }

    /// Receiver for the latest published ranking.
    pub fn results(&self) -> watch::Receiver<Vec<Record>> {
        self.results_rx.clone()
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
