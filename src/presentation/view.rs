use crate::application::like::dto::{ContactPrefill, Effect, Toast};
use crate::domain::like::state::UiState;
use std::sync::Arc;

/// One placement of the like button on the page (header, footer, sidebar).
pub trait LikeButtonView: Send + Sync {
    fn render_state(&self, state: UiState);
    fn render_count(&self, text: &str);
    fn play(&self, effect: Effect);
}

pub trait Toaster: Send + Sync {
    fn show(&self, toast: Toast);
}

/// The site's contact form. Only receives data; nothing is read back.
pub trait ContactForm: Send + Sync {
    fn prefill(&self, prefill: &ContactPrefill);
}

/// Every bound like button, driven as one logical control.
#[derive(Clone, Default)]
pub struct ViewSet {
    buttons: Vec<Arc<dyn LikeButtonView>>,
}

impl ViewSet {
    pub fn new(buttons: Vec<Arc<dyn LikeButtonView>>) -> Self {
        Self { buttons }
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn render_state(&self, state: UiState) {
        for button in &self.buttons {
            button.render_state(state);
        }
    }

    pub fn render_count(&self, text: &str) {
        for button in &self.buttons {
            button.render_count(text);
        }
    }

    pub fn play(&self, effect: Effect) {
        for button in &self.buttons {
            button.play(effect);
        }
    }
}
