//! Session events fanned out to UI listeners.

use tokio::sync::broadcast;

use crate::gateway::{GetAssetsResponse, GetBalancesResponse, TransactionStatus, Wallet};
use crate::transaction::{TransactionKind, TransactionSubmitted};

/// Default queue depth per subscriber.
pub const EVENT_CAPACITY: usize = 64;

/// One notification per completed session operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoginCompleted,
    LogoutCompleted,
    WalletReceived(Wallet),
    AssetsReceived(GetAssetsResponse),
    BalancesReceived(GetBalancesResponse),
    TransactionReceived(TransactionStatus),
    TransferAssetSubmitted { tx_id: String },
    TransferBalanceSubmitted { tx_id: String },
    ContractCallSubmitted { tx_id: String },
}

impl From<TransactionSubmitted> for SessionEvent {
    fn from(submitted: TransactionSubmitted) -> Self {
        let tx_id = submitted.tx_id;
        match submitted.kind {
            TransactionKind::TransferAsset => SessionEvent::TransferAssetSubmitted { tx_id },
            TransactionKind::TransferBalance => SessionEvent::TransferBalanceSubmitted { tx_id },
            TransactionKind::ContractCall => SessionEvent::ContractCallSubmitted { tx_id },
        }
    }
}

/// Broadcast channel for session events.
///
/// Publishing never blocks and never fails; with no subscribers the event is
/// dropped.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: SessionEvent) {
        let _ = self.tx.send(event);
    }

    /// Number of live subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("receivers", &self.receiver_count())
            .finish()
    }
}
