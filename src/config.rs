use std::env;

use crate::error::ConfigError;

pub const DEFAULT_CAPACITY: usize = 20;
pub const DEFAULT_WAIVER_URL: &str = "https://docs.google.com/forms/d/e/1FAIpQLSdNYPEtVxNSR2XQ_tAT0UpCRr2FnuG9MAEGPkUFk1noRxSx_w/viewform";

const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub authorize_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub scopes: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub capacity: usize,
    pub waiver_url: String,
    pub cookie_secure: bool,
    /// Signs everyone in under this name without a provider round-trip.
    pub dev_user_name: Option<String>,
    pub oauth: Option<OAuthConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match get("PORT") {
            Some(v) => v
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: v })?,
            None => 3000,
        };
        let capacity = match get("CAPACITY") {
            Some(v) => match v.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::Invalid { key: "CAPACITY", value: v }),
            },
            None => DEFAULT_CAPACITY,
        };
        let cookie_secure = match get("COOKIE_SECURE").as_deref() {
            None | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "COOKIE_SECURE",
                    value: other.to_string(),
                })
            }
        };

        let oauth = match (get("OAUTH_CLIENT_ID"), get("OAUTH_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(OAuthConfig {
                client_id,
                client_secret,
                redirect_url: get("OAUTH_REDIRECT_URL")
                    .unwrap_or_else(|| format!("http://{}:{}/auth/callback", host, port)),
                authorize_url: get("OAUTH_AUTHORIZE_URL")
                    .unwrap_or_else(|| GOOGLE_AUTHORIZE_URL.to_string()),
                token_url: get("OAUTH_TOKEN_URL").unwrap_or_else(|| GOOGLE_TOKEN_URL.to_string()),
                userinfo_url: get("OAUTH_USERINFO_URL")
                    .unwrap_or_else(|| GOOGLE_USERINFO_URL.to_string()),
                scopes: get("OAUTH_SCOPES").unwrap_or_else(|| "openid profile email".to_string()),
            }),
            (Some(_), None) => {
                return Err(ConfigError::Incomplete("OAUTH_CLIENT_ID", "OAUTH_CLIENT_SECRET"))
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete("OAUTH_CLIENT_SECRET", "OAUTH_CLIENT_ID"))
            }
            (None, None) => None,
        };

        let dev_user_name = get("DEV_USER_NAME");
        if oauth.is_none() && dev_user_name.is_none() {
            return Err(ConfigError::NoSignInMethod);
        }

        Ok(Self {
            host,
            port,
            capacity,
            waiver_url: get("WAIVER_URL").unwrap_or_else(|| DEFAULT_WAIVER_URL.to_string()),
            cookie_secure,
            dev_user_name,
            oauth,
        })
    }
}
