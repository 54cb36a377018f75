//! Typed transaction requests and their build-stage payloads.

use std::fmt;

use serde::Serialize;

use crate::gateway::types::BlockchainType;

/// The three transaction kinds the backend can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    TransferAsset,
    TransferBalance,
    ContractCall,
}

impl TransactionKind {
    /// Last path segment of the build endpoint.
    pub fn path_segment(&self) -> &'static str {
        match self {
            TransactionKind::TransferAsset => "transferAsset",
            TransactionKind::TransferBalance => "transferBalance",
            TransactionKind::ContractCall => "contract",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionKind::TransferAsset => "transfer_asset",
            TransactionKind::TransferBalance => "transfer_balance",
            TransactionKind::ContractCall => "contract_call",
        })
    }
}

/// Fields shared by every transaction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub from_player_id: String,
    pub blockchain_type: BlockchainType,
    /// Ask the backend to pay gas on the player's behalf.
    pub sponsor_gas: bool,
}

impl Envelope {
    pub fn new(from_player_id: impl Into<String>, blockchain_type: BlockchainType, sponsor_gas: bool) -> Self {
        Self {
            from_player_id: from_player_id.into(),
            blockchain_type,
            sponsor_gas,
        }
    }
}

/// Kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    TransferAsset {
        to_player_id: String,
        collection_address: String,
        token_id: String,
    },
    TransferBalance {
        to_player_id: String,
        value: String,
        /// `None` transfers the chain's native currency.
        token_address: Option<String>,
    },
    ContractCall {
        target_address: String,
        calldata: String,
        value: String,
    },
}

/// A transaction to build, sign and submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub envelope: Envelope,
    pub operation: Operation,
}

impl TransactionRequest {
    pub fn transfer_asset(
        envelope: Envelope,
        to_player_id: impl Into<String>,
        collection_address: impl Into<String>,
        token_id: impl Into<String>,
    ) -> Self {
        Self {
            envelope,
            operation: Operation::TransferAsset {
                to_player_id: to_player_id.into(),
                collection_address: collection_address.into(),
                token_id: token_id.into(),
            },
        }
    }

    /// An empty `token_address` means a native-currency transfer.
    pub fn transfer_balance(
        envelope: Envelope,
        to_player_id: impl Into<String>,
        value: impl Into<String>,
        token_address: &str,
    ) -> Self {
        Self {
            envelope,
            operation: Operation::TransferBalance {
                to_player_id: to_player_id.into(),
                value: value.into(),
                token_address: (!token_address.is_empty()).then(|| token_address.to_string()),
            },
        }
    }

    pub fn contract_call(
        envelope: Envelope,
        target_address: impl Into<String>,
        calldata: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            envelope,
            operation: Operation::ContractCall {
                target_address: target_address.into(),
                calldata: calldata.into(),
                value: value.into(),
            },
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self.operation {
            Operation::TransferAsset { .. } => TransactionKind::TransferAsset,
            Operation::TransferBalance { .. } => TransactionKind::TransferBalance,
            Operation::ContractCall { .. } => TransactionKind::ContractCall,
        }
    }

    /// Payload posted to the build endpoint.
    pub fn build_body(&self) -> BuildTransactionBody {
        let envelope = &self.envelope;
        match &self.operation {
            Operation::TransferAsset {
                to_player_id,
                collection_address,
                token_id,
            } => BuildTransactionBody::TransferAsset(TransferAssetBody {
                from_in_game_player_id: envelope.from_player_id.clone(),
                to_in_game_player_id: to_player_id.clone(),
                collection_address: collection_address.clone(),
                token_id: token_id.clone(),
                blockchain_type: envelope.blockchain_type,
                sponsor_gas: envelope.sponsor_gas,
            }),
            Operation::TransferBalance {
                to_player_id,
                value,
                token_address,
            } => BuildTransactionBody::TransferBalance(TransferBalanceBody {
                from_in_game_player_id: envelope.from_player_id.clone(),
                to_in_game_player_id: to_player_id.clone(),
                blockchain_type: envelope.blockchain_type,
                sponsor_gas: envelope.sponsor_gas,
                value: value.clone(),
                token_address: token_address.clone().filter(|t| !t.is_empty()),
            }),
            Operation::ContractCall {
                target_address,
                calldata,
                value,
            } => BuildTransactionBody::ContractCall(ContractCallBody {
                from_in_game_player_id: envelope.from_player_id.clone(),
                target_address: target_address.clone(),
                value: value.clone(),
                calldata: calldata.clone(),
                blockchain_type: envelope.blockchain_type,
                sponsor_gas: envelope.sponsor_gas,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferAssetBody {
    pub from_in_game_player_id: String,
    pub to_in_game_player_id: String,
    pub collection_address: String,
    pub token_id: String,
    pub blockchain_type: BlockchainType,
    pub sponsor_gas: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferBalanceBody {
    pub from_in_game_player_id: String,
    pub to_in_game_player_id: String,
    pub blockchain_type: BlockchainType,
    pub sponsor_gas: bool,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractCallBody {
    pub from_in_game_player_id: String,
    pub target_address: String,
    pub value: String,
    pub calldata: String,
    pub blockchain_type: BlockchainType,
    pub sponsor_gas: bool,
}

/// Build-stage request body; serializes as the inner object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BuildTransactionBody {
    TransferAsset(TransferAssetBody),
    TransferBalance(TransferBalanceBody),
    ContractCall(ContractCallBody),
}

impl BuildTransactionBody {
    pub fn kind(&self) -> TransactionKind {
        match self {
            BuildTransactionBody::TransferAsset(_) => TransactionKind::TransferAsset,
            BuildTransactionBody::TransferBalance(_) => TransactionKind::TransferBalance,
            BuildTransactionBody::ContractCall(_) => TransactionKind::ContractCall,
        }
    }
}
