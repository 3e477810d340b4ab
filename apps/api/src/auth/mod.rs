//! Bearer-token authentication against the hosted auth provider.
//!
//! Sessions and passwords are the provider's business. The API only resolves a
//! bearer token to a user id, and every query is scoped to that id.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Resolves a bearer token to a user. Carried in `AppState` as `Arc<dyn TokenVerifier>`.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<AuthUser, AppError>;
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: Uuid,
    email: Option<String>,
}

/// Calls `GET {base_url}/auth/v1/user` on the hosted provider.
pub struct HostedAuthVerifier {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl HostedAuthVerifier {
    pub fn new(base_url: &str, anon_key: String) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }
}

#[async_trait]
impl TokenVerifier for HostedAuthVerifier {
    async fn verify(&self, token: &str) -> Result<AuthUser, AppError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        match response.status() {
            s if s.is_success() => {
                let user: ProviderUser = response
                    .json()
                    .await
                    .map_err(|e| AppError::Auth(format!("Unexpected user payload: {e}")))?;
                Ok(AuthUser {
                    id: user.id,
                    email: user.email,
                })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!("Rejected bearer token");
                Err(AppError::Unauthorized)
            }
            s => Err(AppError::Auth(format!("Provider returned {s}"))),
        }
    }
}

/// Extracts the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AppError::Unauthorized)?;
        state.auth.verify(token).await
    }
}

#[cfg(test)]
pub use fixed::FixedTokenVerifier;
