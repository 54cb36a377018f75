//! Polling a submitted transaction until the backend reports a final status.
//!
//! Submission only means "accepted for async processing"; this is how a
//! caller learns whether it actually landed on chain.

use std::time::Duration;

use thiserror::Error;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::gateway::{BackendGateway, GatewayError, TransactionStatus};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("transaction {tx_id} still not final after {waited:?}")]
    Timeout { tx_id: String, waited: Duration },
}

pub type StatusResult<T> = Result<T, StatusError>;

/// Poll `GET /client/transactions/{tx_id}` until `COMPLETE` or `FAILED`.
///
/// The first poll happens immediately. A gateway error ends the wait.
pub async fn wait_for_final_status(
    gateway: &dyn BackendGateway,
    tx_id: &str,
    poll_interval: Duration,
    max_wait: Duration,
) -> StatusResult<TransactionStatus> {
    let result = timeout(max_wait, async {
        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let status = gateway.get_transaction(tx_id).await?;
            if status.is_terminal() {
                tracing::info!(tx_id, status = %status.status, "Transaction reached final status");
                return Ok(status);
            }

            tracing::debug!(
                tx_id,
                status = %status.status,
                retry_count = status.retry_count,
                "Transaction pending"
            );
        }
    })
    .await;

    match result {
        Ok(status) => status,
        Err(_) => Err(StatusError::Timeout {
            tx_id: tx_id.to_string(),
            waited: max_wait,
        }),
    }
}
