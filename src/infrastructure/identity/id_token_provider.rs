use crate::domain::identity::provider::{AuthError, IdentityProvider};
use crate::domain::like::record::Identity;
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Claims read from a signed ID token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdTokenClaims {
    pub sub: String,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub exp: usize,
}

impl IdTokenClaims {
    pub fn into_identity(self) -> Result<Identity, AuthError> {
        if self.email_verified == Some(false) {
            return Err(AuthError::Failed("email address is not verified".into()));
        }
        let email = self
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| AuthError::Failed("token carries no email address".into()))?;
        Ok(Identity::new(self.name, email, self.picture))
    }
}

#[derive(Debug, Clone)]
pub struct IdTokenSettings {
    pub secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

/// Where a fresh ID token comes from: a sign-in popup, a redirect, a test.
#[async_trait]
pub trait CredentialPrompt: Send + Sync {
    async fn request_credential(&self) -> Result<String, AuthError>;
}

/// Hands out a token fixed at startup; with none configured the visitor is
/// treated as having closed the prompt.
pub struct PresetCredential {
    token: Option<String>,
}

impl PresetCredential {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl CredentialPrompt for PresetCredential {
    async fn request_credential(&self) -> Result<String, AuthError> {
        self.token.clone().ok_or(AuthError::Cancelled)
    }
}

/// Identity provider that verifies HS256-signed ID tokens and keeps the last
/// good one as the persisted session.
pub struct IdTokenIdentityProvider {
    prompt: Arc<dyn CredentialPrompt>,
    key: DecodingKey,
    validation: Validation,
    session: Mutex<Option<String>>,
}

impl IdTokenIdentityProvider {
    pub fn new(settings: &IdTokenSettings, prompt: Arc<dyn CredentialPrompt>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &settings.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &settings.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        Self {
            prompt,
            key: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
            session: Mutex::new(None),
        }
    }

    /// Restore a token persisted by a previous visit.
    pub fn with_session(self, token: Option<String>) -> Self {
        *self.lock_session() = token;
        self
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<String>> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn session_token(&self) -> Option<String> {
        self.lock_session().clone()
    }

    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let data = decode::<IdTokenClaims>(token, &self.key, &self.validation)
            .map_err(|e| AuthError::Failed(format!("invalid ID token: {}", e)))?;
        data.claims.into_identity()
    }
}

#[async_trait]
impl IdentityProvider for IdTokenIdentityProvider {
    async fn current_identity(&self) -> Option<Identity> {
        let token = self.session_token()?;
        match self.verify(&token) {
            Ok(identity) => Some(identity),
            Err(err) => {
                debug!(error = %err, "dropping stored session");
                *self.lock_session() = None;
                None
            }
        }
    }

    async fn authenticate(&self) -> Result<Identity, AuthError> {
        let token = self.prompt.request_credential().await?;
        let identity = self.verify(&token)?;
        *self.lock_session() = Some(token);
        Ok(identity)
    }
}
