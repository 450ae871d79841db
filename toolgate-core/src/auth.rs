//! OAuth client-credentials token retrieval for the gateway authorizer.

use crate::config::ClientInfo;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("token endpoint {endpoint} rejected the client (HTTP {status}): {body}")]
    Rejected {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("token endpoint {endpoint} returned no access token")]
    MissingToken { endpoint: String },
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Exchange the stored client credentials for a bearer token.
pub async fn fetch_access_token(http: &Client, client_info: &ClientInfo) -> Result<String, AuthError> {
    let endpoint = client_info.token_endpoint.as_str();
    debug!(endpoint, client_id = %client_info.client_id, "Requesting access token");

    let network = |source| AuthError::Network {
        endpoint: endpoint.to_string(),
        source,
    };
    let response = http
        .post(endpoint)
        .basic_auth(&client_info.client_id, Some(&client_info.client_secret))
        .form(&[
            ("grant_type", "client_credentials"),
            ("scope", client_info.scope.as_str()),
        ])
        .send()
        .await
        .map_err(network)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::Rejected {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = response.json().await.map_err(network)?;
    let access_token = token
        .access_token
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AuthError::MissingToken {
            endpoint: endpoint.to_string(),
        })?;
    info!(expires_in = ?token.expires_in, "Access token obtained");
    Ok(access_token)
}
