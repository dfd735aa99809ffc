use async_trait::async_trait;
use serde::Deserialize;

mod oidc;

pub use oidc::OidcVerifier;

/// Verified identity attributes extracted from a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Claims {
    /// Display name for the identity. Falls back to the local part of the
    /// email when the provider supplies no name.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or(self.email.as_str())
                .to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no bearer token provided")]
    MissingToken,
    #[error("invalid bearer token: {0}")]
    InvalidToken(String),
}

/// External token verification, modeled as an opaque capability: one call
/// that turns a token string into trusted claims or a rejection. Any
/// OIDC/JWT-verifying service can sit behind this seam.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_provider_name() {
        let claims = Claims {
            email: "alice@example.com".to_string(),
            name: Some("Alice Archer".to_string()),
        };
        assert_eq!(claims.display_name(), "Alice Archer");
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        let claims = Claims {
            email: "alice@example.com".to_string(),
            name: None,
        };
        assert_eq!(claims.display_name(), "alice");
    }

    #[test]
    fn display_name_ignores_empty_provider_name() {
        let claims = Claims {
            email: "bob@example.com".to_string(),
            name: Some(String::new()),
        };
        assert_eq!(claims.display_name(), "bob");
    }
}
