//! Build → Hash → Sign → Submit.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::crypto::codec::decode_prefixed;
use crate::crypto::{self, CryptoError, KeyMaterial};
use crate::gateway::{BackendGateway, GatewayError, SubmitTransactionRequest};
use crate::transaction::request::{TransactionKind, TransactionRequest};

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Build,
    Hash,
    Sign,
    Submit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Build => "build",
            Stage::Hash => "hash",
            Stage::Sign => "sign",
            Stage::Submit => "submit",
        })
    }
}

/// Cause of a stage failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineFailure {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// A response that parsed but cannot be used, such as a non-hex digest.
    #[error("unusable response: {0}")]
    Protocol(String),
}

/// A failure tagged with the stage it happened in.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: PipelineFailure,
}

impl PipelineError {
    fn at(stage: Stage, source: impl Into<PipelineFailure>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Completion of a pipeline run, accepted by the backend for async processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSubmitted {
    pub kind: TransactionKind,
    pub tx_id: String,
}

/// What a single run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// Known once the build stage succeeds.
    pub tx_id: Option<String>,
    /// Last stage that was started.
    pub stage_reached: Stage,
    pub result: PipelineResult<TransactionSubmitted>,
}

impl PipelineOutcome {
    pub fn into_result(self) -> PipelineResult<TransactionSubmitted> {
        self.result
    }

    fn failed(tx_id: Option<String>, error: PipelineError) -> Self {
        Self {
            tx_id,
            stage_reached: error.stage,
            result: Err(error),
        }
    }
}

/// Runs transaction requests through the four backend/local stages.
///
/// Holds no per-run state; concurrent runs only share the gateway and a
/// borrowed `KeyMaterial`.
#[derive(Clone)]
pub struct TransactionPipeline {
    gateway: Arc<dyn BackendGateway>,
}

impl TransactionPipeline {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self { gateway }
    }

    /// Run every stage in order, stopping at the first failure.
    pub async fn execute(&self, keys: &KeyMaterial, request: &TransactionRequest) -> PipelineOutcome {
        let kind = request.kind();
        let player_id = request.envelope.from_player_id.as_str();
        let blockchain = request.envelope.blockchain_type;

        tracing::debug!(player_id, %blockchain, %kind, stage = %Stage::Build, "Building transaction");
        let built = match self.gateway.build_transaction(&request.build_body()).await {
            Ok(built) => built,
            Err(e) => return Self::report(None, PipelineError::at(Stage::Build, e)),
        };
        let tx_id = Some(built.tx_id.clone());

        tracing::debug!(tx_id = %built.tx_id, stage = %Stage::Hash, "Hashing transaction");
        let digest = match self.hash(&built.tx_hash).await {
            Ok(digest) => digest,
            Err(e) => return Self::report(tx_id, e),
        };

        tracing::debug!(tx_id = %built.tx_id, stage = %Stage::Sign, "Signing transaction");
        let signature = match keys
            .secret()
            .and_then(|secret| crypto::sign(&digest, secret))
        {
            Ok(signature) => signature,
            Err(e) => return Self::report(tx_id, PipelineError::at(Stage::Sign, e)),
        };

        let mut signed_tx = built.transaction;
        signed_tx.signature = signature.to_hex();

        let submit = SubmitTransactionRequest {
            from_in_game_player_id: request.envelope.from_player_id.clone(),
            signed_tx,
            blockchain_type: blockchain,
            tx_id: built.tx_id.clone(),
        };

        tracing::debug!(tx_id = %built.tx_id, stage = %Stage::Submit, "Submitting transaction");
        let accepted = match self.gateway.submit_transaction(&submit).await {
            Ok(accepted) => accepted,
            Err(e) => return Self::report(tx_id, PipelineError::at(Stage::Submit, e)),
        };

        tracing::info!(tx_id = %accepted.tx_id, player_id, %blockchain, %kind, "Transaction accepted");

        PipelineOutcome {
            tx_id: Some(accepted.tx_id.clone()),
            stage_reached: Stage::Submit,
            result: Ok(TransactionSubmitted {
                kind,
                tx_id: accepted.tx_id,
            }),
        }
    }

    /// Server-side Keccak-256 of the build hash, decoded to raw bytes.
    ///
    /// Length is checked by the signer so that a short digest fails at Sign.
    async fn hash(&self, tx_hash: &str) -> PipelineResult<Vec<u8>> {
        let hashed = self
            .gateway
            .keccak256(tx_hash)
            .await
            .map_err(|e| PipelineError::at(Stage::Hash, e))?;

        decode_prefixed(&hashed).map_err(|e| {
            PipelineError::at(
                Stage::Hash,
                PipelineFailure::Protocol(format!("digest is not hex: {}", e)),
            )
        })
    }

    fn report(tx_id: Option<String>, error: PipelineError) -> PipelineOutcome {
        tracing::warn!(
            tx_id = tx_id.as_deref().unwrap_or("-"),
            stage = %error.stage,
            error = %error.source,
            "Transaction pipeline failed"
        );
        PipelineOutcome::failed(tx_id, error)
    }
}

impl fmt::Debug for TransactionPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionPipeline").finish_non_exhaustive()
    }
}
