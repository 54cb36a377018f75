//! reqwest-backed implementation of the backend gateway.
//!
//! # Responsibilities
//! - Carry the bearer token on every request (set once at construction)
//! - Build endpoint URLs with percent-encoded path segments and queries
//! - Map transport failures, unexpected statuses and bad bodies to
//!   `GatewayError`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiConfig;
use crate::crypto::PublicKey;
use crate::gateway::error::{GatewayError, GatewayResult};
use crate::gateway::types::{
    AddressResponse, BuildTransactionResponse, CreateAccountRequest, GetAssetsResponse,
    GetBalancesResponse, GetWalletsResponse, Keccak256Response, SubmitTransactionRequest,
    SubmitTransactionResponse, TransactionStatus, Wallet,
};
use crate::gateway::BackendGateway;
use crate::transaction::BuildTransactionBody;

/// HTTP client for the backend REST API.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    /// Create a gateway from API configuration.
    ///
    /// The authorization header is fixed for the lifetime of the gateway.
    pub fn new(config: &ApiConfig) -> GatewayResult<Self> {
        let base_url = config
            .base_url()
            .map_err(|e| GatewayError::InvalidConfig(format!("invalid API endpoint: {}", e)))?;

        let mut auth = HeaderValue::from_str(&config.auth_header_value())
            .map_err(|_| GatewayError::InvalidConfig("API key is not a valid header value".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GatewayError::InvalidConfig(e.to_string()))?;

        tracing::info!(
            base_url = %base_url,
            request_timeout_secs = config.request_timeout_secs,
            "Backend gateway initialized"
        );

        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidConfig(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> GatewayResult<T> {
        tracing::debug!(path = url.path(), "GET");
        let response = self.client.get(url).send().await?;
        let body = expect_status(response, StatusCode::OK).await?;
        parse(&body)
    }
}

/// Read the body, failing unless the status is exactly `expected`.
async fn expect_status(response: Response, expected: StatusCode) -> GatewayResult<String> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected {
        tracing::warn!(status = status.as_u16(), expected = expected.as_u16(), "Unexpected backend status");
        return Err(GatewayError::from_error_body(status.as_u16(), &body));
    }
    Ok(body)
}

fn parse<T: DeserializeOwned>(body: &str) -> GatewayResult<T> {
    serde_json::from_str(body).map_err(|e| GatewayError::Protocol(e.to_string()))
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn get_wallets(&self, player_id: &str) -> GatewayResult<Vec<Wallet>> {
        let url = self.endpoint(&["client", "accounts", player_id, "wallets"])?;
        let response: GetWalletsResponse = self.get(url).await?;
        Ok(response.wallets)
    }

    async fn get_address_from_public_key(&self, public_key: &PublicKey) -> GatewayResult<String> {
        let mut url = self.endpoint(&["client", "getAddressFromPublicKey"])?;
        url.query_pairs_mut().append_pair("public_key", &public_key.to_hex());
        let response: AddressResponse = self.get(url).await?;
        Ok(response.address)
    }

    async fn create_account(&self, request: &CreateAccountRequest) -> GatewayResult<()> {
        let url = self.endpoint(&["client", "accounts"])?;
        tracing::debug!(path = url.path(), player_id = %request.in_game_player_id, "POST");
        let response = self.client.post(url).json(request).send().await?;
        expect_status(response, StatusCode::OK).await?;
        Ok(())
    }

    async fn build_transaction(
        &self,
        body: &BuildTransactionBody,
    ) -> GatewayResult<BuildTransactionResponse> {
        let url = self.endpoint(&["client", "transactions", body.kind().path_segment()])?;
        tracing::debug!(path = url.path(), "POST");
        let response = self.client.post(url).json(body).send().await?;
        let text = expect_status(response, StatusCode::OK).await?;
        parse(&text)
    }

    async fn keccak256(&self, message: &str) -> GatewayResult<String> {
        let mut url = self.endpoint(&["client", "getKeccak256Hash"])?;
        url.query_pairs_mut().append_pair("message", message);
        let response: Keccak256Response = self.get(url).await?;
        Ok(response.hashed_message)
    }

    async fn submit_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> GatewayResult<SubmitTransactionResponse> {
        // Trailing empty segment keeps the documented `/client/transactions/` path.
        let url = self.endpoint(&["client", "transactions", ""])?;
        tracing::debug!(path = url.path(), tx_id = %request.tx_id, "POST");
        let response = self.client.post(url).json(request).send().await?;
        let text = expect_status(response, StatusCode::ACCEPTED).await?;
        parse(&text)
    }

    async fn get_transaction(&self, tx_id: &str) -> GatewayResult<TransactionStatus> {
        let url = self.endpoint(&["client", "transactions", tx_id])?;
        self.get(url).await
    }

    async fn get_assets(&self, player_id: &str) -> GatewayResult<GetAssetsResponse> {
        let url = self.endpoint(&["client", "accounts", player_id, "assets"])?;
        self.get(url).await
    }

    async fn get_balances(&self, player_id: &str) -> GatewayResult<GetBalancesResponse> {
        let url = self.endpoint(&["client", "accounts", player_id, "balances"])?;
        self.get(url).await
    }
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ApiConfig {
        ApiConfig {
            api_key: "pk_test".to_string(),
            endpoint: Some("http://localhost:9999/v1/".to_string()),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn test_endpoint_paths() {
        let gateway = HttpGateway::new(&test_config()).unwrap();
        let url = gateway.endpoint(&["client", "accounts", "player-1", "wallets"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9999/v1/client/accounts/player-1/wallets");

        let submit = gateway.endpoint(&["client", "transactions", ""]).unwrap();
        assert_eq!(submit.path(), "/v1/client/transactions/");
    }

    #[test]
    fn test_player_id_is_percent_encoded() {
        let gateway = HttpGateway::new(&test_config()).unwrap();
        let url = gateway.endpoint(&["client", "accounts", "a/b c", "assets"]).unwrap();
        assert_eq!(url.path(), "/v1/client/accounts/a%2Fb%20c/assets");
    }

    #[test]
    fn test_rejects_unusable_api_key() {
        let config = ApiConfig {
            api_key: "bad\nkey".to_string(),
            ..test_config()
        };
        assert!(matches!(HttpGateway::new(&config), Err(GatewayError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let config = ApiConfig {
            endpoint: Some("http://127.0.0.1:9/v1/".to_string()),
            connect_timeout_secs: 1,
            request_timeout_secs: 1,
            ..test_config()
        };
        let gateway = HttpGateway::new(&config).unwrap();
        let err = gateway.get_wallets("player-1").await.unwrap_err();
        assert!(matches!(err, GatewayError::Network(_)));
    }
}
