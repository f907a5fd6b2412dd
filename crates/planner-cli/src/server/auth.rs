use axum::extract::{Request, State};
use axum::http::header::COOKIE;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::ApiError;
use super::SharedState;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";
/// Length in bytes of a generated signing key.
const SECRET_LEN: usize = 32;

/// JWT claims of a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Hex SHA-256 of the password the token was issued for.
    pub pwd_hash: String,
    pub iat: i64,
    pub exp: i64,
}

/// Hex-encoded SHA-256 of a password.
pub fn password_hash(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Password check and session tokens for the HTTP API.
pub struct TokenAuth {
    password: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenAuth {
    pub fn new(password: &str, secret: &[u8], ttl_hours: i64) -> Self {
        Self {
            password: password.to_string(),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// A process-local random key, used when no secret is configured.
    pub fn random_secret() -> Vec<u8> {
        let mut secret = [0u8; SECRET_LEN];
        rand::thread_rng().fill(&mut secret[..]);
        secret.to_vec()
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        candidate == self.password
    }

    pub fn issue_token(&self) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            pwd_hash: password_hash(&self.password),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// True when the token is signed with our key, unexpired, and was issued
    /// for the current password.
    pub fn verify_token(&self, token: &str) -> bool {
        let validation = Validation::new(Algorithm::HS256);
        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => data.claims.pwd_hash == password_hash(&self.password),
            Err(err) => {
                tracing::debug!(error = %err, "rejected session token");
                false
            }
        }
    }
}

/// `Set-Cookie` value for a freshly issued token.
pub fn token_cookie(token: &str, ttl_hours: i64) -> String {
    format!(
        "{}={}; Path=/; SameSite=Strict; Max-Age={}",
        TOKEN_COOKIE,
        token,
        ttl_hours * 3600
    )
}

fn token_from_cookies(request: &Request) -> Option<String> {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, value)| value.to_string())
}

/// Rejects requests without a valid session cookie when a password is configured.
pub async fn require_token(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(auth) = &state.auth {
        let token = token_from_cookies(&request).unwrap_or_default();
        if token.is_empty() || !auth.verify_token(&token) {
            return Err(ApiError::Unauthorized("Authentification required".to_string()));
        }
    }
    Ok(next.run(request).await)
}
