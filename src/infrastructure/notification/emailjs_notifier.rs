use crate::domain::notification::notifier::{Notifier, NotifyError, TemplateVars};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct EmailJsSettings {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateVars,
}

/// Sends the thank-you email through the EmailJS REST API.
pub struct EmailJsNotifier {
    client: reqwest::Client,
    settings: EmailJsSettings,
}

impl EmailJsNotifier {
    pub fn new(settings: EmailJsSettings, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl Notifier for EmailJsNotifier {
    async fn send(&self, contact_address: &str, vars: &TemplateVars) -> Result<(), NotifyError> {
        let body = SendRequest {
            service_id: &self.settings.service_id,
            template_id: &self.settings.template_id,
            user_id: &self.settings.public_key,
            template_params: vars,
        };

        let res = self
            .client
            .post(&self.settings.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        debug!(to = contact_address, "EmailJS accepted thank-you email");
        Ok(())
    }
}
