use super::count_animator::CountAnimator;
use super::dto::{ActivationOutcome, ContactPrefill, Effect, LikeSettings, LikeSnapshot, Toast};
use crate::domain::identity::provider::IdentityProvider;
use crate::domain::like::{
    errors::{ExternalCall, FailureCategory, LikeError},
    record::{Identity, LikeRecord},
    repository::{CreateOutcome, LikeStore},
    state::{LikePhase, UiState},
};
use crate::domain::notification::notifier::{Notifier, TemplateVars};
use crate::domain::shared::tween::format_count;
use crate::presentation::view::{ContactForm, Toaster, ViewSet};
use chrono::Utc;
use std::future::Future;
use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicU64, Ordering},
};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;
use validator::Validate;

enum Gate {
    Proceed,
    AlreadyLiked,
    Busy(LikePhase),
    NotReady,
}

/// Drives the like button: sign-in, duplicate check, conditional write,
/// count refresh and the thank-you notification.
///
/// All buttons on the page share one controller, so they always agree. A
/// session that reaches `Liked` stays there; later clicks only replay the
/// "already liked" feedback.
pub struct LikeController {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn LikeStore>,
    notifier: Arc<dyn Notifier>,
    views: ViewSet,
    toaster: Arc<dyn Toaster>,
    contact_form: Option<Arc<dyn ContactForm>>,
    counter: CountAnimator,
    settings: LikeSettings,
    phase: Mutex<LikePhase>,
    refresh_ticket: AtomicU64,
}

impl LikeController {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn LikeStore>,
        notifier: Arc<dyn Notifier>,
        views: ViewSet,
        toaster: Arc<dyn Toaster>,
        settings: LikeSettings,
    ) -> Self {
        let counter = CountAnimator::new(
            views.clone(),
            settings.count_animation,
            settings.frame_interval,
        );
        Self {
            identity,
            store,
            notifier,
            views,
            toaster,
            contact_form: None,
            counter,
            settings,
            phase: Mutex::new(LikePhase::Init),
            refresh_ticket: AtomicU64::new(0),
        }
    }

    pub fn with_contact_form(mut self, form: Arc<dyn ContactForm>) -> Self {
        self.contact_form = Some(form);
        self
    }

    fn lock_phase(&self) -> MutexGuard<'_, LikePhase> {
        self.phase.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn phase(&self) -> LikePhase {
        *self.lock_phase()
    }

    pub fn ui_state(&self) -> UiState {
        self.phase().ui_state()
    }

    pub fn snapshot(&self) -> LikeSnapshot {
        LikeSnapshot {
            state: self.ui_state(),
            count: self.counter.target(),
            count_display: format_count(self.counter.displayed()),
        }
    }

    /// Move to `next` and redraw every button. Illegal moves are logged and
    /// refused.
    fn enter(&self, next: LikePhase) -> bool {
        let mut phase = self.lock_phase();
        if !phase.can_transition_to(next) {
            warn!(from = ?*phase, to = ?next, "refusing like state transition");
            return false;
        }
        debug!(from = ?*phase, to = ?next, "like state transition");
        *phase = next;
        self.views.render_state(next.ui_state());
        true
    }

    fn begin_activation(&self) -> Gate {
        let mut phase = self.lock_phase();
        match *phase {
            LikePhase::Liked => Gate::AlreadyLiked,
            LikePhase::NotLiked => {
                *phase = LikePhase::Authenticating;
                self.views.render_state(UiState::Loading);
                Gate::Proceed
            }
            other if other.is_busy() => Gate::Busy(other),
            _ => Gate::NotReady,
        }
    }

    async fn call<T, F>(&self, call: ExternalCall, fut: F) -> Result<T, LikeError>
    where
        F: Future<Output = Result<T, LikeError>>,
    {
        let limit = match call {
            ExternalCall::Authenticate => self.settings.sign_in_timeout,
            _ => self.settings.call_timeout,
        };
        match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(%call, ?limit, "external call timed out");
                Err(LikeError::Timeout { call })
            }
        }
    }

    /// Bind the buttons, show the current count, and settle the initial state.
    ///
    /// Never fails: an unreachable store shows a count of zero and a session
    /// that cannot be resolved is treated as not liked.
    pub async fn initialize(&self) {
        if self.views.is_empty() {
            debug!("no like buttons bound, skipping initialization");
            return;
        }
        if !self.enter(LikePhase::Loading) {
            return;
        }
        self.counter.show_placeholder();

        let count = self.call(ExternalCall::CountAll, async {
            self.store
                .count_all()
                .await
                .map_err(LikeError::StoreReadFailed)
        });
        let (count, already_liked) = tokio::join!(count, self.resolve_session());

        match count {
            Ok(count) => {
                self.counter.animate_to(count);
            }
            Err(err) => {
                warn!(error = %err, "could not fetch like count");
                self.counter.set_immediate(0);
            }
        }

        let settled = if already_liked {
            LikePhase::Liked
        } else {
            LikePhase::NotLiked
        };
        self.enter(settled);
        info!(buttons = self.views.len(), state = ?settled.ui_state(), "like button ready");
    }

    async fn resolve_session(&self) -> bool {
        let session = self
            .call(ExternalCall::ResolveSession, async {
                Ok(self.identity.current_identity().await)
            })
            .await;
        let identity = match session {
            Ok(Some(identity)) if identity.validate().is_ok() => identity,
            Ok(Some(_)) => {
                warn!("ignoring stored session without a valid contact address");
                return false;
            }
            Ok(None) => return false,
            Err(err) => {
                warn!(error = %err, "could not resolve existing session");
                return false;
            }
        };

        let key = identity.key();
        let exists = self
            .call(ExternalCall::Exists, async {
                self.store
                    .exists(&key)
                    .await
                    .map_err(LikeError::StoreReadFailed)
            })
            .await;
        match exists {
            Ok(exists) => {
                debug!(identity_key = %key, exists, "resolved existing session");
                exists
            }
            Err(err) => {
                warn!(identity_key = %key, error = %err, "could not check like status");
                false
            }
        }
    }

    /// Click entry point. Always returns; failures are shown to the visitor
    /// and leave the button interactive.
    pub async fn on_activate(&self) -> ActivationOutcome {
        let span = info_span!("like_activation", attempt = %Uuid::now_v7());
        self.activate().instrument(span).await
    }

    async fn activate(&self) -> ActivationOutcome {
        match self.begin_activation() {
            Gate::Proceed => {}
            Gate::AlreadyLiked => {
                self.views.play(Effect::Shake);
                self.toaster
                    .show(Toast::for_failure(FailureCategory::AlreadyLiked));
                return ActivationOutcome::AlreadyLiked;
            }
            Gate::Busy(phase) => {
                debug!(?phase, "like in progress, ignoring click");
                return ActivationOutcome::Ignored;
            }
            Gate::NotReady => {
                debug!("like button not initialized, ignoring click");
                return ActivationOutcome::Ignored;
            }
        }

        match self.run_activation().await {
            Ok(outcome) => outcome,
            Err(err) => self.recover(err),
        }
    }

    async fn run_activation(&self) -> Result<ActivationOutcome, LikeError> {
        let identity = self
            .call(ExternalCall::Authenticate, async {
                self.identity.authenticate().await.map_err(LikeError::from)
            })
            .await?;
        identity
            .validate()
            .map_err(|e| LikeError::AuthFailed(format!("identity rejected: {}", e)))?;
        let key = identity.key();
        info!(identity_key = %key, "signed in");

        self.enter(LikePhase::CheckingDuplicate);
        let exists = self
            .call(ExternalCall::Exists, async {
                self.store
                    .exists(&key)
                    .await
                    .map_err(LikeError::StoreReadFailed)
            })
            .await?;
        if exists {
            info!(identity_key = %key, "identity has already liked");
            self.enter(LikePhase::Liked);
            self.toaster.show(Toast::identity_already_liked());
            return Ok(ActivationOutcome::AlreadyLiked);
        }

        self.enter(LikePhase::Writing);
        let record = LikeRecord::new(&identity, Utc::now());
        let created = self
            .call(ExternalCall::CreateIfAbsent, async {
                self.store
                    .create_if_absent(&record)
                    .await
                    .map_err(LikeError::StoreWriteFailed)
            })
            .await?;
        self.enter(LikePhase::Liked);

        if created == CreateOutcome::AlreadyExists {
            info!(identity_key = %key, "record appeared between check and write");
            self.toaster.show(Toast::identity_already_liked());
            return Ok(ActivationOutcome::AlreadyLiked);
        }

        info!(identity_key = %key, "like recorded");
        self.views.play(Effect::HeartBurst);
        self.dispatch_notification(&record);
        self.prefill_contact_form(&identity);
        self.refresh_count().await;
        self.toaster.show(Toast::thanks(&identity));
        Ok(ActivationOutcome::Liked)
    }

    fn recover(&self, err: LikeError) -> ActivationOutcome {
        let category = err.category();
        match &err {
            LikeError::AuthCancelled | LikeError::AuthBlocked => {
                info!(error = %err, "sign-in did not complete")
            }
            _ => error!(error = %err, ?category, "like failed"),
        }
        self.enter(LikePhase::NotLiked);
        self.toaster.show(Toast::for_failure(category));
        ActivationOutcome::Failed(category)
    }

    /// Re-read the count and animate every display toward it. A failed read
    /// keeps the current display, and a read overtaken by a later refresh is
    /// dropped.
    pub async fn refresh_count(&self) -> Option<u64> {
        let ticket = self.refresh_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let count = self
            .call(ExternalCall::CountAll, async {
                self.store
                    .count_all()
                    .await
                    .map_err(LikeError::StoreReadFailed)
            })
            .await;
        if self.refresh_ticket.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "discarding count read overtaken by a newer refresh");
            return None;
        }
        match count {
            Ok(count) => {
                self.counter.animate_to(count);
                Some(count)
            }
            Err(err) => {
                warn!(error = %err, "could not refresh like count");
                None
            }
        }
    }

    /// Send the thank-you message on a detached task. The like is already
    /// stored, so the outcome is only logged.
    fn dispatch_notification(&self, record: &LikeRecord) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);
        let vars = TemplateVars::for_record(record, self.settings.notify_offset());
        let to = record.contact_address.clone();
        let limit = self.settings.call_timeout;

        tokio::spawn(
            async move {
                match tokio::time::timeout(limit, notifier.send(&to, &vars)).await {
                    Ok(Ok(())) => info!("thank-you notification sent"),
                    Ok(Err(err)) => {
                        let err = LikeError::NotifyFailed(err);
                        warn!(error = %err, "thank-you notification failed")
                    }
                    Err(_) => {
                        let err = LikeError::Timeout {
                            call: ExternalCall::Notify,
                        };
                        warn!(error = %err, "thank-you notification failed")
                    }
                }
            }
            .in_current_span(),
        )
    }

    fn prefill_contact_form(&self, identity: &Identity) {
        if let Some(form) = &self.contact_form {
            form.prefill(&ContactPrefill::new(identity, &self.settings.site_owner));
        }
    }
}
