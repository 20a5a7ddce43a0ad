use crate::domain::like::errors::FailureCategory;
use crate::domain::like::record::Identity;
use crate::domain::like::state::UiState;
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use ts_rs::TS;

pub const TOAST_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient, auto-dismissing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    #[ts(type = "number")]
    pub dismiss_after_ms: u64,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            dismiss_after_ms: TOAST_DISMISS_AFTER.as_millis() as u64,
        }
    }

    pub fn for_failure(category: FailureCategory) -> Self {
        let kind = match category {
            FailureCategory::AlreadyLiked => ToastKind::Info,
            FailureCategory::AuthCancelled => ToastKind::Warning,
            _ => ToastKind::Error,
        };
        Self::new(kind, category.message())
    }

    pub fn identity_already_liked() -> Self {
        Self::new(ToastKind::Info, "This email has already liked!")
    }

    pub fn thanks(identity: &Identity) -> Self {
        Self::new(
            ToastKind::Success,
            format!("Thanks for liking, {}!", identity.first_name()),
        )
    }
}

/// One-shot visual effect played on every bound button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Effect {
    Shake,
    HeartBurst,
}

/// Data pushed into the site's contact form after a fresh like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactPrefill {
    pub name: String,
    pub email: String,
    pub message_placeholder: String,
    pub scroll_into_view: bool,
}

impl ContactPrefill {
    pub fn new(identity: &Identity, site_owner: &str) -> Self {
        Self {
            name: identity.display_name.clone(),
            email: identity.contact_address.clone(),
            message_placeholder: format!("Hi {}! I just liked your portfolio...", site_owner),
            scroll_into_view: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LikeSnapshot {
    pub state: UiState,
    #[ts(type = "number")]
    pub count: u64,
    pub count_display: String,
}

/// How a single click resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivationOutcome {
    /// A new record was written.
    Liked,
    /// The session or the identity had already liked; nothing was written.
    AlreadyLiked,
    /// Another click is still in flight, or the controller is not ready.
    Ignored,
    Failed(FailureCategory),
}

/// Tunables for the like flow.
#[derive(Debug, Clone)]
pub struct LikeSettings {
    /// Upper bound on each store and notifier call.
    pub call_timeout: Duration,
    /// Upper bound on the interactive sign-in prompt.
    pub sign_in_timeout: Duration,
    pub count_animation: Duration,
    pub frame_interval: Duration,
    /// UTC offset, in minutes, used to render `liked_at` in the thank-you message.
    pub notify_utc_offset_minutes: i32,
    pub site_owner: String,
}

impl Default for LikeSettings {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(5),
            sign_in_timeout: Duration::from_secs(120),
            count_animation: Duration::from_millis(500),
            frame_interval: Duration::from_millis(16),
            notify_utc_offset_minutes: 330,
            site_owner: "there".to_string(),
        }
    }
}

impl LikeSettings {
    pub fn notify_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.notify_utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}
