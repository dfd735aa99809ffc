use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

use super::{AuthError, Claims, TokenVerifier};
use crate::config::IdentityConfig;

/// Token verifier backed by an external OIDC provider's JWKS document.
///
/// Every call fetches the key set and fully re-validates the token; nothing is
/// cached between requests, so each authenticated request pays the full
/// verification cost.
pub struct OidcVerifier {
    http: reqwest::Client,
    issuer: String,
    audience: String,
    jwks_url: String,
}

impl OidcVerifier {
    pub fn new(identity: &IdentityConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            issuer: identity.issuer.clone(),
            audience: identity.audience.clone(),
            jwks_url: identity.jwks_url.clone(),
        }
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AuthError::InvalidToken(format!("JWKS fetch failed: {}", e)))?;

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::InvalidToken(format!("malformed JWKS document: {}", e)))
    }
}

#[async_trait]
impl TokenVerifier for OidcVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header =
            decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken("token header has no kid".to_string()))?;

        let jwks = self.fetch_jwks().await?;
        let jwk = jwks
            .find(&kid)
            .ok_or_else(|| AuthError::InvalidToken(format!("unknown signing key {}", kid)))?;
        let key = DecodingKey::from_jwk(jwk)
            .map_err(|e| AuthError::InvalidToken(format!("unusable signing key: {}", e)))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let data = decode::<Claims>(token, &key, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(data.claims)
    }
}
