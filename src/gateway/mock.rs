//! Scripted in-memory gateway for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::crypto::PublicKey;
use crate::gateway::error::{GatewayError, GatewayResult};
use crate::gateway::types::{
    AaTransaction, BigNumber, BuildTransactionResponse, CreateAccountRequest, GetAssetsResponse,
    GetBalancesResponse, SubmitTransactionRequest, SubmitTransactionResponse, TransactionStatus,
    Wallet,
};
use crate::gateway::BackendGateway;
use crate::transaction::BuildTransactionBody;

/// One recorded gateway invocation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    GetWallets(String),
    GetAddress(String),
    CreateAccount(CreateAccountRequest),
    Build(&'static str, serde_json::Value),
    Keccak(String),
    Submit(SubmitTransactionRequest),
    GetTransaction(String),
    GetAssets(String),
    GetBalances(String),
}

impl Call {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Call::GetWallets(_) => "get_wallets",
            Call::GetAddress(_) => "get_address",
            Call::CreateAccount(_) => "create_account",
            Call::Build(..) => "build",
            Call::Keccak(_) => "keccak",
            Call::Submit(_) => "submit",
            Call::GetTransaction(_) => "get_transaction",
            Call::GetAssets(_) => "get_assets",
            Call::GetBalances(_) => "get_balances",
        }
    }
}

type Queue<T> = Mutex<VecDeque<GatewayResult<T>>>;

#[derive(Default)]
pub(crate) struct MockGateway {
    calls: Mutex<Vec<Call>>,
    wallets: Queue<Vec<Wallet>>,
    addresses: Queue<String>,
    creations: Queue<()>,
    builds: Queue<BuildTransactionResponse>,
    digests: Queue<String>,
    submissions: Queue<SubmitTransactionResponse>,
    statuses: Queue<TransactionStatus>,
    assets: Queue<GetAssetsResponse>,
    balances: Queue<GetBalancesResponse>,
}

fn next<T>(queue: &Queue<T>, what: &str) -> GatewayResult<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(GatewayError::Network(format!("no scripted {} response", what))))
}

impl MockGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_wallets(&self, result: GatewayResult<Vec<Wallet>>) -> &Self {
        self.wallets.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn push_address(&self, result: GatewayResult<String>) -> &Self {
        self.addresses.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn push_creation(&self, result: GatewayResult<()>) -> &Self {
        self.creations.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn push_build(&self, result: GatewayResult<BuildTransactionResponse>) -> &Self {
        self.builds.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn push_digest(&self, result: GatewayResult<String>) -> &Self {
        self.digests.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn push_submission(&self, result: GatewayResult<SubmitTransactionResponse>) -> &Self {
        self.submissions.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn push_status(&self, result: GatewayResult<TransactionStatus>) -> &Self {
        self.statuses.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn push_assets(&self, result: GatewayResult<GetAssetsResponse>) -> &Self {
        self.assets.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn push_balances(&self, result: GatewayResult<GetBalancesResponse>) -> &Self {
        self.balances.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_names(&self) -> Vec<&'static str> {
        self.calls().iter().map(Call::name).collect()
    }

    pub(crate) fn count(&self, name: &str) -> usize {
        self.call_names().into_iter().filter(|n| *n == name).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BackendGateway for MockGateway {
    async fn get_wallets(&self, player_id: &str) -> GatewayResult<Vec<Wallet>> {
        self.record(Call::GetWallets(player_id.to_string()));
        next(&self.wallets, "wallets")
    }

    async fn get_address_from_public_key(&self, public_key: &PublicKey) -> GatewayResult<String> {
        self.record(Call::GetAddress(public_key.to_hex()));
        next(&self.addresses, "address")
    }

    async fn create_account(&self, request: &CreateAccountRequest) -> GatewayResult<()> {
        self.record(Call::CreateAccount(request.clone()));
        next(&self.creations, "create_account")
    }

    async fn build_transaction(
        &self,
        body: &BuildTransactionBody,
    ) -> GatewayResult<BuildTransactionResponse> {
        let value = serde_json::to_value(body).expect("build body serializes");
        self.record(Call::Build(body.kind().path_segment(), value));
        next(&self.builds, "build")
    }

    async fn keccak256(&self, message: &str) -> GatewayResult<String> {
        self.record(Call::Keccak(message.to_string()));
        next(&self.digests, "keccak")
    }

    async fn submit_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> GatewayResult<SubmitTransactionResponse> {
        self.record(Call::Submit(request.clone()));
        next(&self.submissions, "submit")
    }

    async fn get_transaction(&self, tx_id: &str) -> GatewayResult<TransactionStatus> {
        self.record(Call::GetTransaction(tx_id.to_string()));
        next(&self.statuses, "transaction")
    }

    async fn get_assets(&self, player_id: &str) -> GatewayResult<GetAssetsResponse> {
        self.record(Call::GetAssets(player_id.to_string()));
        next(&self.assets, "assets")
    }

    async fn get_balances(&self, player_id: &str) -> GatewayResult<GetBalancesResponse> {
        self.record(Call::GetBalances(player_id.to_string()));
        next(&self.balances, "balances")
    }
}

/// Unsigned user operation as the build endpoint returns it.
pub(crate) fn unsigned_transaction() -> AaTransaction {
    AaTransaction {
        sender: "0x1111111111111111111111111111111111111111".to_string(),
        nonce: BigNumber::from_hex("0x00"),
        init_code: "0x".to_string(),
        call_data: "0xb61d27f6".to_string(),
        call_gas_limit: BigNumber::from_hex("0x5208"),
        verification_gas_limit: BigNumber::from_hex("0x0186a0"),
        pre_verification_gas: BigNumber::from_hex("0xc350"),
        max_fee_per_gas: BigNumber::from_hex("0x59682f00"),
        max_priority_fee_per_gas: BigNumber::from_hex("0x59682f00"),
        paymaster_and_data: "0x".to_string(),
        signature: String::new(),
    }
}

pub(crate) fn build_response(tx_id: &str) -> BuildTransactionResponse {
    BuildTransactionResponse {
        tx_id: tx_id.to_string(),
        transaction: unsigned_transaction(),
        tx_hash: format!("0x{}", "ab".repeat(32)),
    }
}

pub(crate) fn user_does_not_exist() -> GatewayError {
    GatewayError::Api {
        status: 404,
        code: Some("USER_DOES_NOT_EXIST".to_string()),
        message: "user does not exist".to_string(),
    }
}
