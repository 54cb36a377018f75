//! Player wallet CLI.
//!
//! Drives a session against a live backend, with the player's key taken
//! from the environment instead of a social login.
//!
//! ```text
//! --config wallet.toml ──▶ ClientConfig ──▶ init_logging
//!                                   │
//!                                   ▼
//! PLAYER_WALLET_PRIVATE_KEY ──▶ Session ──▶ HttpGateway ──▶ backend
//!                                   │
//!                                   ▼
//!                     JSON result on stdout
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use player_wallet::config::{load_config, ClientConfig};
use player_wallet::observability::init_logging;
use player_wallet::session::{LoginResponse, Session, UserInfo};
use player_wallet::{BlockchainType, TransactionRequest};

/// Environment variable holding the player's hex private key.
const PRIVATE_KEY_ENV_VAR: &str = "PLAYER_WALLET_PRIVATE_KEY";

#[derive(Parser)]
#[command(name = "player-wallet")]
#[command(about = "Provision player wallets and submit transactions", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, default_value = "player-wallet.toml")]
    config: PathBuf,

    /// Chain to act on; defaults to `session.blockchain_type`.
    #[arg(short, long)]
    blockchain: Option<BlockchainType>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the uncompressed public key for the installed secret
    PublicKey,
    /// Get or create the player's wallet
    Wallet {
        player_id: String,
        /// Email sent when the account has to be created
        #[arg(long, default_value = "")]
        email: String,
    },
    /// List the player's assets
    Assets { player_id: String },
    /// List the player's token balances
    Balances { player_id: String },
    /// Show a transaction's status
    Transaction {
        tx_id: String,
        /// Poll until COMPLETE or FAILED
        #[arg(long)]
        wait: bool,
        #[arg(long, default_value_t = 2)]
        poll_secs: u64,
        #[arg(long, default_value_t = 120)]
        timeout_secs: u64,
    },
    /// Transfer an NFT to another player
    TransferAsset {
        from: String,
        to: String,
        collection_address: String,
        token_id: String,
    },
    /// Transfer native currency or an ERC-20 token to another player
    TransferBalance {
        from: String,
        to: String,
        value: String,
        /// ERC-20 contract; omit for native currency
        #[arg(long, default_value = "")]
        token_address: String,
    },
    /// Call an arbitrary contract
    ContractCall {
        from: String,
        target_address: String,
        calldata: String,
        #[arg(long, default_value = "0")]
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config: ClientConfig = load_config(&cli.config)?;
    init_logging(&config.observability);

    tracing::info!(
        config = %cli.config.display(),
        sandbox = config.api.sandbox,
        "player-wallet v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let mut session = Session::from_config(&config)?;
    let blockchain = cli.blockchain.unwrap_or(session.defaults().blockchain_type);

    if needs_key(&cli.command) {
        let secret = std::env::var(PRIVATE_KEY_ENV_VAR)
            .map_err(|_| format!("{} is not set", PRIVATE_KEY_ENV_VAR))?
            .trim()
            .to_string();
        // No login provider here; the wallet command's email stands in for the profile.
        let email = match &cli.command {
            Commands::Wallet { email, .. } => email.clone(),
            _ => String::new(),
        };
        session.handle_login(LoginResponse::new(
            secret,
            UserInfo {
                email,
                ..UserInfo::default()
            },
        ))?;
    }

    let envelope = |player_id: &str| {
        let mut envelope = session.envelope(player_id);
        envelope.blockchain_type = blockchain;
        envelope
    };

    match cli.command {
        Commands::PublicKey => {
            println!("{}", session.public_key()?);
        }
        Commands::Wallet { player_id, .. } => {
            print_json(&session.get_or_create_wallet(&player_id, blockchain).await?)?;
        }
        Commands::Assets { player_id } => {
            print_json(&session.get_assets(&player_id).await?)?;
        }
        Commands::Balances { player_id } => {
            print_json(&session.get_balances(&player_id).await?)?;
        }
        Commands::Transaction {
            tx_id,
            wait,
            poll_secs,
            timeout_secs,
        } => {
            let status = if wait {
                session
                    .wait_for_transaction(
                        &tx_id,
                        Duration::from_secs(poll_secs),
                        Duration::from_secs(timeout_secs),
                    )
                    .await?
            } else {
                session.get_transaction(&tx_id).await?
            };
            print_json(&status)?;
        }
        Commands::TransferAsset {
            from,
            to,
            collection_address,
            token_id,
        } => {
            let request =
                TransactionRequest::transfer_asset(envelope(&from), to, collection_address, token_id);
            print_json(&TxId::from(session.submit(&request).await?.tx_id))?;
        }
        Commands::TransferBalance {
            from,
            to,
            value,
            token_address,
        } => {
            let request =
                TransactionRequest::transfer_balance(envelope(&from), to, value, &token_address);
            print_json(&TxId::from(session.submit(&request).await?.tx_id))?;
        }
        Commands::ContractCall {
            from,
            target_address,
            calldata,
            value,
        } => {
            let request =
                TransactionRequest::contract_call(envelope(&from), target_address, calldata, value);
            print_json(&TxId::from(session.submit(&request).await?.tx_id))?;
        }
    }

    session.handle_logout();
    Ok(())
}

fn needs_key(command: &Commands) -> bool {
    matches!(
        command,
        Commands::PublicKey
            | Commands::Wallet { .. }
            | Commands::TransferAsset { .. }
            | Commands::TransferBalance { .. }
            | Commands::ContractCall { .. }
    )
}

#[derive(Serialize)]
struct TxId {
    tx_id: String,
}

impl From<String> for TxId {
    fn from(tx_id: String) -> Self {
        Self { tx_id }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
