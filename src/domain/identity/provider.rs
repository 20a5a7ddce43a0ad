use crate::domain::like::record::Identity;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Sign-in cancelled by user")]
    Cancelled,
    #[error("Sign-in prompt was blocked")]
    Blocked,
    #[error("Sign-in failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Identity left over from a previous visit, if the session is still valid.
    /// Never prompts.
    async fn current_identity(&self) -> Option<Identity>;

    /// Prompt the visitor to sign in.
    async fn authenticate(&self) -> Result<Identity, AuthError>;
}
