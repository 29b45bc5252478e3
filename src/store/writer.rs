use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::high_score::HIGH_SCORE_KEY;
use super::kv::KeyValueStore;

/// Fire-and-forget writer for new high scores
///
/// Owns the store on a blocking task. [`record`](Self::record) only queues
/// the value, so a slow disk never holds up a game tick. Scores that queue
/// up while a write is in flight are coalesced into the largest one, and
/// nothing at or below the last persisted value is ever written.
pub struct HighScoreWriter {
    tx: Option<mpsc::UnboundedSender<u32>>,
    task: Option<JoinHandle<()>>,
}

impl HighScoreWriter {
    /// Start the writer. `recorded` is the value already in the store.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(mut store: Box<dyn KeyValueStore>, recorded: u32) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<u32>();

        let task = tokio::task::spawn_blocking(move || {
            let mut persisted = recorded;
            while let Some(mut score) = rx.blocking_recv() {
                while let Ok(next) = rx.try_recv() {
                    score = score.max(next);
                }
                if score <= persisted {
                    continue;
                }

                match store.set(HIGH_SCORE_KEY, &score.to_string()) {
                    Ok(()) => {
                        persisted = score;
                        log::info!("persisted high score {}", score);
                    }
                    Err(e) => log::warn!("failed to persist high score {}: {:#}", score, e),
                }
            }
        });

        Self {
            tx: Some(tx),
            task: Some(task),
        }
    }

    /// Queue a new record for writing
    pub fn record(&self, score: u32) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(score).is_err() {
            log::warn!("high score writer is gone, dropping record {}", score);
        }
    }

    /// Flush queued records and stop the writer
    pub async fn shutdown(mut self) -> Result<()> {
        drop(self.tx.take());
        if let Some(task) = self.task.take() {
            task.await.context("High score writer panicked")?;
        }
        Ok(())
    }
}
