//! Transaction requests and the signing pipeline.
//!
//! # Data Flow
//! ```text
//! TransactionRequest (request.rs)
//!     → Build:  BackendGateway::build_transaction → {tx_id, AaTransaction, tx_hash}
//!     → Hash:   BackendGateway::keccak256(tx_hash) → 32-byte digest
//!     → Sign:   crypto::sign(digest, secret) → AaTransaction.signature
//!     → Submit: BackendGateway::submit_transaction → 202 {tx_id}
//!     → TransactionSubmitted {kind, tx_id}
//!
//! status.rs: get_transaction polled until COMPLETE / FAILED
//! ```
//!
//! # Design Decisions
//! - Stages run strictly in order; a failure stops the run and is tagged
//!   with its stage
//! - No automatic retry of any stage
//! - Keccak-256 is computed by the backend, not locally

pub mod pipeline;
pub mod request;
pub mod status;

pub use pipeline::{
    PipelineError, PipelineFailure, PipelineOutcome, PipelineResult, Stage, TransactionPipeline,
    TransactionSubmitted,
};
pub use request::{BuildTransactionBody, Envelope, Operation, TransactionKind, TransactionRequest};
pub use status::{wait_for_final_status, StatusError, StatusResult};
