use base64::{engine::general_purpose, Engine as _};
use reqwest::Url;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::OAuthConfig;
use crate::error::OAuthError;
use crate::models::UserProfile;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    id_token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ProfileClaims {
    name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    email: Option<String>,
}

impl ProfileClaims {
    fn display_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .or_else(|| {
                let joined = [self.given_name.as_deref(), self.family_name.as_deref()]
                    .into_iter()
                    .flatten()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                (!joined.is_empty()).then_some(joined)
            })
    }

    /// A provider without a display name still signs the user in; the form
    /// default is then empty.
    fn into_profile(self) -> UserProfile {
        UserProfile {
            name: self.display_name().unwrap_or_default(),
            email: self.email,
        }
    }
}

pub fn authorize_url(config: &OAuthConfig, state: &str) -> Result<String, OAuthError> {
    let url = Url::parse_with_params(
        &config.authorize_url,
        &[
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_url.as_str()),
            ("scope", config.scopes.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| OAuthError::InvalidUrl(format!("{}: {}", config.authorize_url, e)))?;
    Ok(url.into())
}

/// Reads the claims segment of an ID token. The token comes straight from the
/// token endpoint, so the signature is not checked here. Tokens without a
/// display name yield `None` so the caller can ask the userinfo endpoint.
pub fn profile_from_id_token(id_token: &str) -> Option<UserProfile> {
    let parts: Vec<&str> = id_token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload = general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .ok()?;
    let claims = serde_json::from_slice::<ProfileClaims>(&payload).ok()?;
    claims.display_name()?;
    Some(claims.into_profile())
}

pub async fn sign_in_with_code(
    client: &reqwest::Client,
    config: &OAuthConfig,
    code: &str,
) -> Result<UserProfile, OAuthError> {
    let tokens = exchange_code(client, config, code).await?;

    if let Some(profile) = tokens.id_token.as_deref().and_then(profile_from_id_token) {
        info!(email = ?profile.email, "oauth_sign_in: profile from id_token");
        return Ok(profile);
    }

    let profile = fetch_userinfo(client, config, &tokens.access_token).await?;
    info!(email = ?profile.email, "oauth_sign_in: profile from userinfo");
    Ok(profile)
}

async fn exchange_code(
    client: &reqwest::Client,
    config: &OAuthConfig,
    code: &str,
) -> Result<TokenResponse, OAuthError> {
    let resp = client
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_url.as_str()),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        warn!(status = %status, "oauth token exchange rejected");
        return Err(OAuthError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp.json::<TokenResponse>().await?)
}

async fn fetch_userinfo(
    client: &reqwest::Client,
    config: &OAuthConfig,
    access_token: &str,
) -> Result<UserProfile, OAuthError> {
    let resp = client
        .get(&config.userinfo_url)
        .bearer_auth(access_token)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        warn!(status = %status, "oauth userinfo rejected");
        return Err(OAuthError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(resp.json::<ProfileClaims>().await?.into_profile())
}
