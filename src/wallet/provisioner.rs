//! Get-or-create for a player's wallet on one chain.
//!
//! ```text
//! FetchingWallets ──match──────────────────────────────────────▶ Done
//!       │ no match / USER_DOES_NOT_EXIST (first pass only)
//!       ▼
//! DerivingAddress ─▶ RequestingAccount ─▶ Revalidating ──match──▶ Done
//!                                              │ anything else
//!                                              ▼
//!                                            Failed
//! ```

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::crypto::{CryptoError, KeyMaterial};
use crate::gateway::{BackendGateway, BlockchainType, CreateAccountRequest, GatewayError, Wallet};

/// Step a provisioning run failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvisionStep {
    FetchingWallets,
    DerivingAddress,
    RequestingAccount,
    Revalidating,
}

impl fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProvisionStep::FetchingWallets => "fetching_wallets",
            ProvisionStep::DerivingAddress => "deriving_address",
            ProvisionStep::RequestingAccount => "requesting_account",
            ProvisionStep::Revalidating => "revalidating",
        })
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProvisionFailure {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Account creation reported success but no wallet for the chain appeared.
    #[error("no {blockchain} wallet after account creation")]
    WalletNotCreated { blockchain: BlockchainType },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("wallet provisioning failed while {step}: {source}")]
pub struct ProvisionError {
    pub step: ProvisionStep,
    #[source]
    pub source: ProvisionFailure,
}

impl ProvisionError {
    fn at(step: ProvisionStep, source: impl Into<ProvisionFailure>) -> Self {
        Self {
            step,
            source: source.into(),
        }
    }
}

pub type ProvisionResult<T> = Result<T, ProvisionError>;

enum State {
    Fetching { attempted_creation: bool },
    Deriving,
    Requesting { owner_address: String },
}

/// Finds the player's wallet for a chain, creating the account at most once.
#[derive(Clone)]
pub struct WalletProvisioner {
    gateway: Arc<dyn BackendGateway>,
}

impl WalletProvisioner {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self { gateway }
    }

    /// Return the player's wallet on `blockchain`, creating the account if
    /// the backend has none yet.
    ///
    /// At most one creation request is issued per call. `email` is sent in
    /// the creation body and is otherwise unused.
    pub async fn get_or_create_wallet(
        &self,
        keys: &KeyMaterial,
        player_id: &str,
        blockchain: BlockchainType,
        email: &str,
    ) -> ProvisionResult<Wallet> {
        let mut state = State::Fetching {
            attempted_creation: false,
        };

        loop {
            state = match state {
                State::Fetching { attempted_creation } => {
                    let step = if attempted_creation {
                        ProvisionStep::Revalidating
                    } else {
                        ProvisionStep::FetchingWallets
                    };
                    tracing::debug!(player_id, %blockchain, %step, "Fetching wallets");

                    match self.gateway.get_wallets(player_id).await {
                        Ok(wallets) => {
                            if let Some(wallet) =
                                wallets.into_iter().find(|w| w.blockchain_type == blockchain)
                            {
                                tracing::info!(
                                    player_id,
                                    %blockchain,
                                    account_address = %wallet.account_address,
                                    created = attempted_creation,
                                    "Wallet ready"
                                );
                                return Ok(wallet);
                            }
                            if attempted_creation {
                                return Err(self.fail(
                                    player_id,
                                    ProvisionError::at(
                                        step,
                                        ProvisionFailure::WalletNotCreated { blockchain },
                                    ),
                                ));
                            }
                            State::Deriving
                        }
                        Err(e) if e.is_user_does_not_exist() && !attempted_creation => {
                            tracing::debug!(player_id, "Player unknown to backend");
                            State::Deriving
                        }
                        Err(e) => return Err(self.fail(player_id, ProvisionError::at(step, e))),
                    }
                }

                State::Deriving => {
                    let step = ProvisionStep::DerivingAddress;
                    let public_key = keys
                        .derive_public_key()
                        .map_err(|e| self.fail(player_id, ProvisionError::at(step, e)))?;
                    let owner_address = self
                        .gateway
                        .get_address_from_public_key(&public_key)
                        .await
                        .map_err(|e| self.fail(player_id, ProvisionError::at(step, e)))?;
                    tracing::debug!(player_id, %owner_address, "Resolved owner address");
                    State::Requesting { owner_address }
                }

                State::Requesting { owner_address } => {
                    let request = CreateAccountRequest {
                        email: email.to_string(),
                        in_game_player_id: player_id.to_string(),
                        non_custodial_address: owner_address,
                        blockchain_type: blockchain,
                    };
                    tracing::info!(player_id, %blockchain, "Creating account");
                    self.gateway.create_account(&request).await.map_err(|e| {
                        self.fail(player_id, ProvisionError::at(ProvisionStep::RequestingAccount, e))
                    })?;
                    State::Fetching {
                        attempted_creation: true,
                    }
                }
            };
        }
    }

    fn fail(&self, player_id: &str, error: ProvisionError) -> ProvisionError {
        tracing::warn!(player_id, step = %error.step, error = %error.source, "Wallet provisioning failed");
        error
    }
}

impl fmt::Debug for WalletProvisioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletProvisioner").finish_non_exhaustive()
    }
}
