use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use ts_rs::TS;

use crate::domain::identity::provider::AuthError;
use crate::domain::notification::notifier::NotifyError;

/// Failure reported by a like store adapter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
    #[error("Corrupt record for key {key}: {reason}")]
    CorruptRecord { key: String, reason: String },
}

/// The external calls the controller makes, named for logs and timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ExternalCall {
    Authenticate,
    ResolveSession,
    Exists,
    CreateIfAbsent,
    CountAll,
    Notify,
}

impl fmt::Display for ExternalCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authenticate => "authenticate",
            Self::ResolveSession => "resolve-session",
            Self::Exists => "exists",
            Self::CreateIfAbsent => "create-if-absent",
            Self::CountAll => "count-all",
            Self::Notify => "notify",
        };
        f.write_str(name)
    }
}

/// Everything that can go wrong while driving a like to completion.
///
/// None of these escape the controller; each one settles the button back into
/// an interactive state and becomes a transient message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LikeError {
    #[error("Sign-in was cancelled")]
    AuthCancelled,
    #[error("Sign-in was blocked")]
    AuthBlocked,
    #[error("Sign-in failed: {0}")]
    AuthFailed(String),
    #[error("Already liked")]
    AlreadyLiked,
    #[error("Store read failed: {0}")]
    StoreReadFailed(StoreError),
    #[error("Store write failed: {0}")]
    StoreWriteFailed(StoreError),
    #[error("Notification failed: {0}")]
    NotifyFailed(NotifyError),
    #[error("{call} timed out")]
    Timeout { call: ExternalCall },
}

impl LikeError {
    pub fn category(&self) -> FailureCategory {
        match self {
            Self::AuthCancelled => FailureCategory::AuthCancelled,
            Self::AuthBlocked => FailureCategory::AuthBlocked,
            Self::AlreadyLiked => FailureCategory::AlreadyLiked,
            Self::StoreReadFailed(_) => FailureCategory::Network,
            Self::StoreWriteFailed(_) => FailureCategory::WriteFailed,
            Self::AuthFailed(_)
            | Self::NotifyFailed(_)
            | Self::Timeout { .. } => FailureCategory::Unknown,
        }
    }
}

impl From<AuthError> for LikeError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Cancelled => Self::AuthCancelled,
            AuthError::Blocked => Self::AuthBlocked,
            AuthError::Failed(reason) => Self::AuthFailed(reason),
        }
    }
}

/// What the page is told when a like attempt does not end in a fresh like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum FailureCategory {
    AuthCancelled,
    AuthBlocked,
    AlreadyLiked,
    WriteFailed,
    Network,
    Unknown,
}

impl FailureCategory {
    pub fn message(&self) -> &'static str {
        match self {
            Self::AuthCancelled => "Sign-in cancelled. Please try again!",
            Self::AuthBlocked => "Popup blocked! Please allow popups for this site.",
            Self::AlreadyLiked => "You have already liked this portfolio!",
            Self::WriteFailed => "Could not save your like. Please try again!",
            Self::Network => "Network problem. Please check your connection and try again.",
            Self::Unknown => "Something went wrong. Please try again!",
        }
    }
}
