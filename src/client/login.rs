// src/client/login.rs
use std::sync::Arc;
use std::time::Duration;

use super::api::{AccountApi, ClientError, HttpAccountApi};
use super::clock::{Clock, Scheduler, SystemClock};
use super::config::ClientConfig;
use super::storage::{self, FileKeyValueStore, KeyValueStore, SIGNUP_THANKS_KEY};
use super::view::{LoginView, SubmitButton, ThirdPartyLogin, SIGNING_IN_LABEL, SIGN_IN_LABEL};
use super::{report_unhandled, FormState, RenderTargetUnavailable, Via};
use crate::models::LoginRequest;
use crate::utils::validation::{is_valid_email, is_valid_password};

pub const EMAIL_ERROR: &str = "Please enter a valid email";
pub const PASSWORD_ERROR: &str = "Password must be at least 6 characters";
pub const INVALID_CREDENTIALS_ERROR: &str = "Invalid email or password";

/// Address the simulated third-party provider hands back.
pub const DEMO_EMAIL: &str = "demo@google.com";

const TOAST_DURATION: Duration = Duration::from_millis(2400);
const OVERLAY_DURATION: Duration = Duration::from_millis(1000);
const THIRD_PARTY_SUBMIT_DELAY: Duration = Duration::from_millis(700);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginTimer {
    HideToast,
    HideOverlay,
    SubmitThirdParty,
}

pub struct LoginController<A, L, S, C> {
    api: Arc<A>,
    local: L,
    session: S,
    clock: C,
    view: LoginView,
    state: FormState,
    timers: Scheduler<LoginTimer>,
}

impl LoginController<HttpAccountApi, FileKeyValueStore, Arc<storage::MemoryKeyValueStore>, SystemClock> {
    /// Wires the controller to the HTTP service and file-backed local storage.
    pub fn from_config(
        config: &ClientConfig,
        session: Arc<storage::MemoryKeyValueStore>,
    ) -> Result<Self, ClientError> {
        Ok(Self::new(
            Arc::new(HttpAccountApi::from_config(config)?),
            FileKeyValueStore::new(config.local_storage_path.clone()),
            session,
            SystemClock::new(),
        ))
    }
}

impl<A, L, S, C> LoginController<A, L, S, C>
where
    A: AccountApi,
    L: KeyValueStore,
    S: KeyValueStore,
    C: Clock,
{
    pub fn new(api: Arc<A>, local: L, session: S, clock: C) -> Self {
        Self {
            api,
            local,
            session,
            clock,
            view: LoginView::default(),
            state: FormState::Idle,
            timers: Scheduler::new(),
        }
    }

    /// For pages rendered without the third-party login block.
    pub fn without_third_party(mut self) -> Self {
        self.view.third_party = None;
        self
    }

    pub fn view(&self) -> &LoginView {
        &self.view
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.view.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.view.password.value = password.into();
    }

    pub fn toggle_password_visibility(&mut self) {
        self.view.password.toggle();
    }

    /// Page load: post-signup overlay, then email autofill.
    pub async fn load(&mut self) {
        if let Err(e) = self.show_signup_overlay() {
            report_unhandled("login page load", &e);
        }
        self.autofill().await;
    }

    fn show_signup_overlay(&mut self) -> Result<(), storage::StorageError> {
        if self.session.get(SIGNUP_THANKS_KEY)?.as_deref() != Some("1") {
            return Ok(());
        }

        let now = self.clock.now();
        self.view.overlay.visible = true;
        self.view.overlay.shown_at = Some(now);
        self.timers.schedule_at(now + OVERLAY_DURATION, LoginTimer::HideOverlay);

        // one-shot: a reload must not show it again
        self.session.remove(SIGNUP_THANKS_KEY)
    }

    async fn autofill(&mut self) {
        match self.api.account().await {
            Ok(account) => {
                if !account.email.is_empty() {
                    self.view.email = account.email;
                }
                return;
            }
            Err(e) => tracing::debug!("Account lookup unavailable, trying local copy: {}", e),
        }

        match storage::load_account(&self.local) {
            Ok(Some(account)) if !account.email.is_empty() => self.view.email = account.email,
            Ok(_) => {}
            Err(e) => tracing::debug!("Ignoring unreadable local account: {}", e),
        }
    }

    /// Overlay progress in percent, complete once the overlay has run its course.
    pub fn overlay_progress(&self) -> u8 {
        match self.view.overlay.shown_at {
            Some(shown_at) if self.view.overlay.visible => {
                let elapsed = self.clock.now().saturating_sub(shown_at);
                (elapsed.as_millis() * 100 / OVERLAY_DURATION.as_millis()).min(100) as u8
            }
            Some(_) => 100,
            None => 0,
        }
    }

    pub async fn on_password_key(&mut self, key: &str) {
        if key == "Enter" {
            self.submit().await;
        }
    }

    pub fn open_third_party(&mut self) -> Result<(), RenderTargetUnavailable> {
        self.third_party_block()?.modal_open = true;
        Ok(())
    }

    pub fn cancel_third_party(&mut self) -> Result<(), RenderTargetUnavailable> {
        self.third_party_block()?.modal_open = false;
        Ok(())
    }

    /// Picks the demo identity, closes the modal and submits shortly after.
    /// The submit is an ordinary one: same validation, same credential check.
    pub fn confirm_third_party(&mut self) -> Result<(), RenderTargetUnavailable> {
        self.third_party_block()?.modal_open = false;
        self.view.email = DEMO_EMAIL.to_string();

        let due = self.clock.now() + THIRD_PARTY_SUBMIT_DELAY;
        self.timers.schedule_at(due, LoginTimer::SubmitThirdParty);
        Ok(())
    }

    fn third_party_block(&mut self) -> Result<&mut ThirdPartyLogin, RenderTargetUnavailable> {
        self.view
            .third_party
            .as_mut()
            .ok_or(RenderTargetUnavailable("third-party login"))
    }

    pub async fn submit(&mut self) {
        if self.view.submit.disabled {
            tracing::debug!("Login already in flight, ignoring submit");
            return;
        }

        self.transition(FormState::Validating);
        if !self.validate() {
            self.transition(FormState::Idle);
            return;
        }

        self.transition(FormState::Submitting);
        self.view.submit = SubmitButton::busy(SIGNING_IN_LABEL);

        let email = self.view.email.trim().to_string();
        let password = self.view.password.value.clone();

        let via = self.check_credentials(email, password).await;

        self.view.submit = SubmitButton::ready(SIGN_IN_LABEL);

        match via {
            Some(via) => self.succeed(via),
            None => {
                self.view.password_error = INVALID_CREDENTIALS_ERROR.to_string();
                self.transition(FormState::Idle);
            }
        }
    }

    /// Remote verify first; any failure there falls back to the local copy.
    async fn check_credentials(&self, email: String, password: String) -> Option<Via> {
        let request = LoginRequest {
            email: Some(email.clone()),
            password: Some(password.clone()),
        };

        match self.api.login(&request).await {
            Ok(response) => {
                tracing::debug!("Signed in remotely as {:?}", response.name);
                return Some(Via::Remote);
            }
            Err(e) => tracing::debug!("Remote login failed, checking local account: {}", e),
        }

        match storage::load_account(&self.local) {
            Ok(Some(account)) if account.email == email && account.password == password => {
                Some(Via::Local)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("Ignoring unreadable local account: {}", e);
                None
            }
        }
    }

    fn validate(&mut self) -> bool {
        self.view.email_error.clear();
        self.view.password_error.clear();

        let mut ok = true;
        if !is_valid_email(&self.view.email) {
            self.view.email_error = EMAIL_ERROR.to_string();
            ok = false;
        }
        if !is_valid_password(&self.view.password.value) {
            self.view.password_error = PASSWORD_ERROR.to_string();
            ok = false;
        }
        ok
    }

    fn succeed(&mut self, via: Via) {
        let now = self.clock.now();
        self.view.toast.visible = true;
        self.timers.schedule_at(now + TOAST_DURATION, LoginTimer::HideToast);

        if via == Via::Remote {
            self.view.card_dismissed = true;
        }

        self.transition(FormState::Resolved(via));
    }

    fn transition(&mut self, next: FormState) {
        tracing::debug!("Login form {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Applies every timed transition that is due.
    pub async fn tick(&mut self) {
        while let Some((_, timer)) = self.timers.pop_due(self.clock.now()) {
            match timer {
                LoginTimer::HideToast => self.view.toast.visible = false,
                LoginTimer::HideOverlay => self.view.overlay.visible = false,
                LoginTimer::SubmitThirdParty => self.submit().await,
            }
        }
    }

    /// Sleeps through pending timers until none are left.
    pub async fn settle(&mut self) {
        while let Some(due) = self.timers.next_due() {
            let wait = due.saturating_sub(self.clock.now());
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
            self.tick().await;
        }
    }
}
