//! Wire types exchanged with the backend.
//!
//! Field names match the backend JSON exactly. Gas and fee values stay as
//! hex strings and are never parsed locally.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Supported chains, by their wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockchainType {
    Ethereum,
    Goerli,
    Polygon,
    #[default]
    Mumbai,
    Dfk,
    DfkTestnet,
    AvalancheCchain,
    Arbitrum,
    ArbitrumGoerli,
    Optimism,
    OptimismGoerli,
    Base,
    BaseGoerli,
    KlaytnCypress,
}

impl BlockchainType {
    pub const ALL: [BlockchainType; 14] = [
        Self::Ethereum,
        Self::Goerli,
        Self::Polygon,
        Self::Mumbai,
        Self::Dfk,
        Self::DfkTestnet,
        Self::AvalancheCchain,
        Self::Arbitrum,
        Self::ArbitrumGoerli,
        Self::Optimism,
        Self::OptimismGoerli,
        Self::Base,
        Self::BaseGoerli,
        Self::KlaytnCypress,
    ];

    /// Name used in request bodies and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Goerli => "goerli",
            Self::Polygon => "polygon",
            Self::Mumbai => "mumbai",
            Self::Dfk => "dfk",
            Self::DfkTestnet => "dfk_testnet",
            Self::AvalancheCchain => "avalanche_cchain",
            Self::Arbitrum => "arbitrum",
            Self::ArbitrumGoerli => "arbitrum_goerli",
            Self::Optimism => "optimism",
            Self::OptimismGoerli => "optimism_goerli",
            Self::Base => "base",
            Self::BaseGoerli => "base_goerli",
            Self::KlaytnCypress => "klaytn_cypress",
        }
    }
}

impl fmt::Display for BlockchainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised chain name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blockchain type '{0}'")]
pub struct UnknownBlockchain(pub String);

impl FromStr for BlockchainType {
    type Err = UnknownBlockchain;

    /// Case-insensitive; the backend may echo either `polygon` or `POLYGON`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|chain| chain.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownBlockchain(s.to_string()))
    }
}

impl Serialize for BlockchainType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlockchainType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Deserialize a per-chain list, dropping entries whose `blockchain_type`
/// this client does not know. Any other malformed entry is still an error.
fn known_chains<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = Vec::<serde_json::Value>::deserialize(deserializer)?;
    let mut kept = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(name) = entry.get("blockchain_type").and_then(serde_json::Value::as_str) {
            if name.parse::<BlockchainType>().is_err() {
                tracing::debug!(blockchain_type = name, "Skipping entry on unknown chain");
                continue;
            }
        }
        kept.push(serde_json::from_value(entry).map_err(serde::de::Error::custom)?);
    }
    Ok(kept)
}

/// A player's smart-contract wallet on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub blockchain_type: BlockchainType,
    pub in_game_player_id: String,
    pub account_address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetWalletsResponse {
    #[serde(default, deserialize_with = "known_chains")]
    pub wallets: Vec<Wallet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressResponse {
    pub address: String,
}

/// Body of `POST /client/accounts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateAccountRequest {
    pub email: String,
    pub in_game_player_id: String,
    pub non_custodial_address: String,
    pub blockchain_type: BlockchainType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub blockchain_type: BlockchainType,
    pub collection_address: String,
    pub token_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAssetsResponse {
    #[serde(default)]
    pub num_assets: u32,
    #[serde(default, deserialize_with = "known_chains")]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Erc20Token {
    pub blockchain_type: BlockchainType,
    pub token_address: String,
    pub balance: String,
    pub decimals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeToken {
    pub blockchain_type: BlockchainType,
    pub balance: String,
    pub decimals: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBalancesResponse {
    #[serde(default)]
    pub num_erc20_tokens: u32,
    #[serde(default, deserialize_with = "known_chains")]
    pub erc20_tokens: Vec<Erc20Token>,
    #[serde(default)]
    pub num_native_tokens: u32,
    #[serde(default, deserialize_with = "known_chains")]
    pub native_tokens: Vec<NativeToken>,
}

/// Status record of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
    pub blockchain_type: BlockchainType,
    pub tx_id: String,
    /// `PENDING`, `COMPLETE` or `FAILED`.
    pub status: String,
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default)]
    pub on_chain_id: Option<String>,
    #[serde(default)]
    pub user_op_receipt: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl TransactionStatus {
    /// Whether the backend has stopped processing this transaction.
    pub fn is_terminal(&self) -> bool {
        self.status.eq_ignore_ascii_case("COMPLETE") || self.status.eq_ignore_ascii_case("FAILED")
    }
}

/// Big integer as the backend encodes it: `{"hex": "0x..", "type": "BigNumber"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigNumber {
    pub hex: String,
    #[serde(rename = "type", default = "BigNumber::default_kind")]
    pub kind: String,
}

impl BigNumber {
    fn default_kind() -> String {
        "BigNumber".to_string()
    }

    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self {
            hex: hex.into(),
            kind: Self::default_kind(),
        }
    }
}

/// Account-abstraction user operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AaTransaction {
    pub sender: String,
    pub nonce: BigNumber,
    #[serde(default)]
    pub init_code: String,
    pub call_data: String,
    pub call_gas_limit: BigNumber,
    pub verification_gas_limit: BigNumber,
    pub pre_verification_gas: BigNumber,
    pub max_fee_per_gas: BigNumber,
    pub max_priority_fee_per_gas: BigNumber,
    #[serde(default)]
    pub paymaster_and_data: String,
    /// Empty until the sign stage.
    #[serde(default)]
    pub signature: String,
}

/// Response of `POST /client/transactions/{kind}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTransactionResponse {
    pub tx_id: String,
    pub transaction: AaTransaction,
    pub tx_hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Keccak256Response {
    pub hashed_message: String,
}

/// Body of `POST /client/transactions/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitTransactionRequest {
    pub from_in_game_player_id: String,
    pub signed_tx: AaTransaction,
    pub blockchain_type: BlockchainType,
    pub tx_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitTransactionResponse {
    pub tx_id: String,
}

/// Structured error body: `{"code": "...", "message": "..."}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error codes the backend is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    InvalidParameter,
    InternalError,
    IncompleteConfig,
    UserTokenMissing,
    UserTokenInvalid,
    UserAlreadyExists,
    UserDoesNotExist,
    UserNoPhoneNumber,
    UserNoEmail,
    UserNoName,
    UserEmailNotVerified,
    AuthFailed,
    AuthMissing,
    UserBanned,
    UserDefaulted,
    UserUnderReview,
    TxhashMissing,
    TokenTypeMissing,
    AmountTokenMissing,
    NotSupported,
    LocationNotSupported,
    ObjectDoesNotExist,
    MultipleObjectsForSameId,
    BlockchainTypeMissing,
    #[serde(other)]
    Unknown,
}

impl ApiErrorCode {
    pub fn parse(code: &str) -> Self {
        serde_json::from_value(serde_json::Value::String(code.to_string())).unwrap_or(Self::Unknown)
    }
}
