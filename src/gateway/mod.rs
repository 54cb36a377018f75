//! Backend gateway: the remote execution service, consumed as a capability.
//!
//! # Data Flow
//! ```text
//! WalletProvisioner / TransactionPipeline / Session
//!     → BackendGateway trait (this module)
//!     → client.rs (reqwest, bearer auth, status checks)
//!     → backend REST API
//!     ← types.rs (wire structs) | error.rs (Network / Api / Protocol)
//! ```
//!
//! # Design Decisions
//! - Every network round-trip goes through the trait, so flows can be tested
//!   against an in-memory gateway
//! - Only the documented success status of each endpoint counts as success
//! - No retries at this layer; timeouts come from the HTTP client

pub mod client;
pub mod error;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use crate::crypto::PublicKey;
use crate::transaction::BuildTransactionBody;

pub use client::HttpGateway;
pub use error::{GatewayError, GatewayResult};
pub use types::{
    AaTransaction, ApiErrorCode, BlockchainType, BuildTransactionResponse, CreateAccountRequest,
    GetAssetsResponse, GetBalancesResponse, SubmitTransactionRequest, SubmitTransactionResponse,
    TransactionStatus, Wallet,
};

/// Remote API used by the wallet core.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// `GET /client/accounts/{player_id}/wallets`
    async fn get_wallets(&self, player_id: &str) -> GatewayResult<Vec<Wallet>>;

    /// `GET /client/getAddressFromPublicKey?public_key={hex}`
    async fn get_address_from_public_key(&self, public_key: &PublicKey) -> GatewayResult<String>;

    /// `POST /client/accounts`, expects 200.
    async fn create_account(&self, request: &CreateAccountRequest) -> GatewayResult<()>;

    /// `POST /client/transactions/{transferAsset|transferBalance|contract}`
    async fn build_transaction(
        &self,
        body: &BuildTransactionBody,
    ) -> GatewayResult<BuildTransactionResponse>;

    /// `GET /client/getKeccak256Hash?message={tx_hash}`, returns the hex digest.
    async fn keccak256(&self, message: &str) -> GatewayResult<String>;

    /// `POST /client/transactions/`, expects 202.
    async fn submit_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> GatewayResult<SubmitTransactionResponse>;

    /// `GET /client/transactions/{tx_id}`
    async fn get_transaction(&self, tx_id: &str) -> GatewayResult<TransactionStatus>;

    /// `GET /client/accounts/{player_id}/assets`
    async fn get_assets(&self, player_id: &str) -> GatewayResult<GetAssetsResponse>;

    /// `GET /client/accounts/{player_id}/balances`
    async fn get_balances(&self, player_id: &str) -> GatewayResult<GetBalancesResponse>;
}
