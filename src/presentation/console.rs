use super::view::{ContactForm, LikeButtonView, Toaster};
use crate::application::like::dto::{ContactPrefill, Effect, Toast, ToastKind};
use crate::domain::like::state::UiState;
use tracing::{error, info, warn};

/// Renders the like control into the log. Used by the command-line driver,
/// where there is no page to draw on.
pub struct ConsoleView {
    placement: String,
}

impl ConsoleView {
    pub fn new(placement: impl Into<String>) -> Self {
        Self {
            placement: placement.into(),
        }
    }
}

impl LikeButtonView for ConsoleView {
    fn render_state(&self, state: UiState) {
        info!(placement = %self.placement, ?state, "like button state");
    }

    fn render_count(&self, text: &str) {
        info!(placement = %self.placement, count = text, "like count");
    }

    fn play(&self, effect: Effect) {
        info!(placement = %self.placement, ?effect, "like button effect");
    }
}

pub struct ConsoleToaster;

impl Toaster for ConsoleToaster {
    fn show(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Info | ToastKind::Success => info!(message = %toast.message, "toast"),
            ToastKind::Warning => warn!(message = %toast.message, "toast"),
            ToastKind::Error => error!(message = %toast.message, "toast"),
        }
    }
}

pub struct ConsoleContactForm;

impl ContactForm for ConsoleContactForm {
    fn prefill(&self, prefill: &ContactPrefill) {
        info!(
            name = %prefill.name,
            email = %prefill.email,
            placeholder = %prefill.message_placeholder,
            "contact form prefilled"
        );
    }
}
