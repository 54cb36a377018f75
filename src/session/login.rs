//! Payload handed over by the social-login provider.

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Profile and token data for the logged-in player.
///
/// Holders zeroize it explicitly; the session does so on logout.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Zeroize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserInfo {
    pub email: String,
    pub name: String,
    pub profile_image: String,
    pub aggregate_verifier: String,
    pub verifier: String,
    pub verifier_id: String,
    pub type_of_login: String,
    pub dapp_share: String,
    pub id_token: String,
    pub oauth_id_token: String,
    pub oauth_access_token: String,
}

impl std::fmt::Debug for UserInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInfo")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("verifier", &self.verifier)
            .field("type_of_login", &self.type_of_login)
            .finish_non_exhaustive()
    }
}

/// Login result: the player's hex private key plus their profile.
#[derive(Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub priv_key: String,
    #[serde(default)]
    pub user_info: UserInfo,
}

impl LoginResponse {
    pub fn new(priv_key: impl Into<String>, user_info: UserInfo) -> Self {
        Self {
            priv_key: priv_key.into(),
            user_info,
        }
    }
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("priv_key", &"<redacted>")
            .field("user_info", &self.user_info)
            .finish()
    }
}
