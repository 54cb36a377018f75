//! The caller-owned session: key lifetime plus every wallet operation.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast;
use zeroize::Zeroize;

use crate::config::{ClientConfig, SessionConfig};
use crate::crypto::{CryptoError, KeyMaterial, PublicKey};
use crate::gateway::{
    BackendGateway, BlockchainType, GatewayError, GetAssetsResponse, GetBalancesResponse,
    HttpGateway, TransactionStatus, Wallet,
};
use crate::session::events::{EventBus, SessionEvent};
use crate::session::login::{LoginResponse, UserInfo};
use crate::transaction::{
    wait_for_final_status, Envelope, PipelineError, PipelineOutcome, StatusError,
    TransactionPipeline, TransactionRequest, TransactionSubmitted,
};
use crate::wallet::{ProvisionError, WalletProvisioner};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no player is logged in")]
    NotLoggedIn,

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Status(#[from] StatusError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// A player session.
///
/// Operations borrow the session immutably and may run concurrently;
/// `handle_login` and `handle_logout` need `&mut self`, so the key cannot be
/// swapped or cleared while any operation is in flight.
pub struct Session {
    gateway: Arc<dyn BackendGateway>,
    provisioner: WalletProvisioner,
    pipeline: TransactionPipeline,
    keys: KeyMaterial,
    user_info: Option<UserInfo>,
    defaults: SessionConfig,
    events: EventBus,
}

impl Session {
    pub fn new(gateway: Arc<dyn BackendGateway>, defaults: SessionConfig) -> Self {
        Self {
            provisioner: WalletProvisioner::new(gateway.clone()),
            pipeline: TransactionPipeline::new(gateway.clone()),
            gateway,
            keys: KeyMaterial::new(),
            user_info: None,
            defaults,
            events: EventBus::new(),
        }
    }

    /// Build a session talking HTTP to the configured backend.
    pub fn from_config(config: &ClientConfig) -> SessionResult<Self> {
        let gateway = HttpGateway::new(&config.api)?;
        Ok(Self::new(Arc::new(gateway), config.session.clone()))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn defaults(&self) -> &SessionConfig {
        &self.defaults
    }

    /// Envelope for `player_id` using the session's default chain and gas policy.
    pub fn envelope(&self, player_id: impl Into<String>) -> Envelope {
        Envelope::new(player_id, self.defaults.blockchain_type, self.defaults.sponsor_gas)
    }

    /// Install the key and profile from a login.
    ///
    /// A malformed key leaves the previous session state untouched.
    pub fn handle_login(&mut self, mut response: LoginResponse) -> SessionResult<()> {
        let mut keys = KeyMaterial::new();
        keys.install(&response.priv_key)?;

        self.clear_credentials();
        self.keys = keys;
        self.user_info = Some(std::mem::take(&mut response.user_info));

        tracing::info!("Player logged in");
        self.events.publish(SessionEvent::LoginCompleted);
        Ok(())
    }

    /// Zeroize the key and profile.
    pub fn handle_logout(&mut self) {
        self.clear_credentials();
        tracing::info!("Player logged out");
        self.events.publish(SessionEvent::LogoutCompleted);
    }

    pub fn is_logged_in(&self) -> bool {
        self.keys.is_installed()
    }

    pub fn user_info(&self) -> Option<&UserInfo> {
        self.user_info.as_ref()
    }

    pub fn public_key(&self) -> SessionResult<PublicKey> {
        self.require_login()?;
        Ok(self.keys.derive_public_key()?)
    }

    /// Fetch the player's wallet on `blockchain`, creating it if needed.
    pub async fn get_or_create_wallet(
        &self,
        player_id: &str,
        blockchain: BlockchainType,
    ) -> SessionResult<Wallet> {
        self.require_login()?;
        let email = self.user_info.as_ref().map(|u| u.email.as_str()).unwrap_or_default();

        let wallet = self
            .provisioner
            .get_or_create_wallet(&self.keys, player_id, blockchain, email)
            .await?;

        self.events.publish(SessionEvent::WalletReceived(wallet.clone()));
        Ok(wallet)
    }

    pub async fn get_assets(&self, player_id: &str) -> SessionResult<GetAssetsResponse> {
        let assets = self.gateway.get_assets(player_id).await?;
        tracing::debug!(player_id, num_assets = assets.num_assets, "Assets received");
        self.events.publish(SessionEvent::AssetsReceived(assets.clone()));
        Ok(assets)
    }

    pub async fn get_balances(&self, player_id: &str) -> SessionResult<GetBalancesResponse> {
        let balances = self.gateway.get_balances(player_id).await?;
        tracing::debug!(player_id, "Balances received");
        self.events.publish(SessionEvent::BalancesReceived(balances.clone()));
        Ok(balances)
    }

    pub async fn get_transaction(&self, tx_id: &str) -> SessionResult<TransactionStatus> {
        let status = self.gateway.get_transaction(tx_id).await?;
        self.events.publish(SessionEvent::TransactionReceived(status.clone()));
        Ok(status)
    }

    /// Poll until the transaction is `COMPLETE` or `FAILED`.
    pub async fn wait_for_transaction(
        &self,
        tx_id: &str,
        poll_interval: Duration,
        max_wait: Duration,
    ) -> SessionResult<TransactionStatus> {
        let status =
            wait_for_final_status(self.gateway.as_ref(), tx_id, poll_interval, max_wait).await?;
        self.events.publish(SessionEvent::TransactionReceived(status.clone()));
        Ok(status)
    }

    /// Run the full pipeline and report how far it got.
    pub async fn execute(&self, request: &TransactionRequest) -> SessionResult<PipelineOutcome> {
        self.require_login()?;
        let outcome = self.pipeline.execute(&self.keys, request).await;
        if let Ok(submitted) = &outcome.result {
            self.events.publish(SessionEvent::from(submitted.clone()));
        }
        Ok(outcome)
    }

    /// Run the full pipeline, returning only the submission or its error.
    pub async fn submit(&self, request: &TransactionRequest) -> SessionResult<TransactionSubmitted> {
        Ok(self.execute(request).await?.into_result()?)
    }

    fn require_login(&self) -> SessionResult<()> {
        if self.keys.is_installed() {
            Ok(())
        } else {
            Err(SessionError::NotLoggedIn)
        }
    }

    fn clear_credentials(&mut self) {
        self.keys.clear();
        if let Some(mut info) = self.user_info.take() {
            info.zeroize();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.clear_credentials();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.is_logged_in())
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
