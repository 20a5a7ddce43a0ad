use crate::domain::notification::notifier::{Notifier, NotifyError, TemplateVars};
use async_trait::async_trait;
use tracing::info;

/// Used when no email service is configured: records what would have been sent.
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send(&self, contact_address: &str, vars: &TemplateVars) -> Result<(), NotifyError> {
        info!(
            to = contact_address,
            user_name = %vars.user_name,
            liked_at = %vars.liked_at,
            "email delivery not configured, skipping thank-you email"
        );
        Ok(())
    }
}
