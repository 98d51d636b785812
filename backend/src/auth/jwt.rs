//! JWT access token minting and validation.
//!
//! The signing keys are derived from the configured secret once, at service
//! construction, and shared behind `Arc` so the per-request cost is a single
//! decode.

use anyhow::{anyhow, ensure, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

const ACCESS_TOKEN_TYPE: &str = "access";

/// Claims carried in a Weightline token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id as a UUID string
    pub sub: String,
    /// Expiry, seconds since the epoch
    pub exp: i64,
    /// Issued at, seconds since the epoch
    pub iat: i64,
    /// Distinguishes access tokens from anything else the account
    /// platform might sign with the same secret
    pub token_type: String,
}

/// Validates bearer tokens and, in development and tests, mints them.
///
/// Construct once at startup and store in `AppState`; cloning only bumps
/// the key refcounts.
#[derive(Clone)]
pub struct JwtService {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    access_token_expiry_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_token_expiry_secs: i64) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            access_token_expiry_secs,
        }
    }

    /// Mint an access token for a user.
    ///
    /// In production the surrounding account platform issues tokens; this
    /// exists for local development and the integration tests.
    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String> {
        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::seconds(self.access_token_expiry_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| anyhow!("could not sign access token: {}", e))
    }

    /// Decode and verify a token, insisting it is an access token.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| anyhow!("token rejected: {}", e))?;
        ensure!(
            data.claims.token_type == ACCESS_TOKEN_TYPE,
            "not an access token"
        );
        Ok(data.claims)
    }

    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_token_expiry_secs
    }
}
