use crate::domain::like::record::LikeRecord;
use async_trait::async_trait;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("Notification transport failed: {0}")]
    Transport(String),
    #[error("Notification rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Variables handed to the thank-you message template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVars {
    pub to_email: String,
    pub user_name: String,
    pub user_photo: String,
    pub liked_at: String,
}

impl TemplateVars {
    /// `liked_at` is rendered as `dd/mm/yyyy, h:mm:ss am` at `offset`.
    pub fn for_record(record: &LikeRecord, offset: FixedOffset) -> Self {
        Self {
            to_email: record.contact_address.clone(),
            user_name: record.display_name.clone(),
            user_photo: record
                .avatar_url
                .clone()
                .unwrap_or_else(|| "No photo".to_string()),
            liked_at: record
                .liked_at
                .with_timezone(&offset)
                .format("%d/%m/%Y, %-I:%M:%S %P")
                .to_string(),
        }
    }
}

/// Best-effort delivery of the thank-you message. Failures are logged by the
/// caller and never undo a like.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, contact_address: &str, vars: &TemplateVars) -> Result<(), NotifyError>;
}
