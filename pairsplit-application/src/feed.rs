use crate::{
    error::SettlementError,
    model::{PairId, PairSnapshot},
    settlement_processor::{SettlementProcessor, SettlementResult},
};
use tokio::sync::watch;

/// Outcome of settling one snapshot revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementUpdate {
    pub pair_id: PairId,
    pub revision: u64,
    pub outcome: Result<SettlementResult, SettlementError>,
}

/// Holds the newest settlement outcome. Older revisions never replace newer ones.
#[derive(Debug)]
pub struct LatestSettlement {
    tx: watch::Sender<Option<SettlementUpdate>>,
}

impl Default for LatestSettlement {
    fn default() -> Self {
        Self::new()
    }
}

impl LatestSettlement {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Publishes `update` unless a result for the same or a newer revision is already out.
    pub fn offer(&self, update: SettlementUpdate) -> bool {
        self.tx.send_if_modified(|current| {
            if let Some(existing) = current.as_ref()
                && existing.revision >= update.revision
            {
                tracing::debug!(
                    pair_id = %update.pair_id,
                    stale_revision = update.revision,
                    current_revision = existing.revision,
                    "Dropping stale settlement"
                );
                return false;
            }
            *current = Some(update);
            true
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SettlementUpdate>> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> Option<SettlementUpdate> {
        self.tx.borrow().clone()
    }
}

/// Recomputes the settlement whenever the pair's data changes.
#[derive(Debug)]
pub struct SettlementFeed {
    processor: SettlementProcessor,
    latest: LatestSettlement,
}

impl SettlementFeed {
    pub fn new(
        processor: SettlementProcessor,
    ) -> (Self, watch::Receiver<Option<SettlementUpdate>>) {
        let latest = LatestSettlement::new();
        let rx = latest.subscribe();
        (Self { processor, latest }, rx)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SettlementUpdate>> {
        self.latest.subscribe()
    }

    pub fn current(&self) -> Option<SettlementUpdate> {
        self.latest.current()
    }

    /// Settles `snapshot` and publishes the outcome. Returns false when a newer
    /// revision was already published.
    pub fn offer(&self, snapshot: &PairSnapshot) -> bool {
        let outcome = self.processor.settle(snapshot);
        if let Err(err) = &outcome {
            err.log();
        }
        self.latest.offer(SettlementUpdate {
            pair_id: snapshot.pair_id.clone(),
            revision: snapshot.revision,
            outcome,
        })
    }

    /// Follows `snapshots` until the sending side is dropped.
    pub async fn run(&self, mut snapshots: watch::Receiver<PairSnapshot>) {
        loop {
            let snapshot = snapshots.borrow_and_update().clone();
            self.offer(&snapshot);
            if snapshots.changed().await.is_err() {
                break;
            }
        }
        tracing::debug!("Snapshot source closed; settlement feed stopped");
    }
}
