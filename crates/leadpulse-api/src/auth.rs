//! Bearer-token verification
//!
//! The identity check is deliberately small: a signed HS256 token whose
//! subject is the agent's uuid. Anything wrong with the token is an
//! authentication failure, distinct from computation failures downstream.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use leadpulse_core::{AgentId, AppError, AppResult, AuthConfig};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (agent ID)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Issue a bearer token for an agent. Used by the token tooling and tests;
/// the reporting engine itself never issues tokens.
pub fn issue_token(agent: AgentId, config: &AuthConfig, ttl_secs: i64) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: agent.to_string(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("token encoding failed: {e}")))
}

/// Verify a bearer token and extract the calling agent's id.
pub fn verify_token(token: &str, config: &AuthConfig) -> AppResult<AgentId> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| AppError::authentication(format!("invalid token: {e}")))?;

    let uuid = Uuid::parse_str(&data.claims.sub)
        .map_err(|_| AppError::authentication("token subject is not an agent id"))?;
    Ok(AgentId::from_uuid(uuid))
}
