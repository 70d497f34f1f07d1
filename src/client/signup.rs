// src/client/signup.rs
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::api::{AccountApi, ClientError, HttpAccountApi};
use super::clock::{Clock, Scheduler, SystemClock};
use super::config::ClientConfig;
use super::storage::{self, FileKeyValueStore, KeyValueStore, SIGNUP_THANKS_KEY};
use super::view::{Page, SignupView};
use super::{FormState, Via};
use crate::models::{Account, SignupRequest};
use crate::utils::validation::{is_present, is_valid_email, is_valid_password};

pub const NAME_ERROR: &str = "Please enter your name";
pub const EMAIL_ERROR: &str = "Enter a valid email";
pub const PASSWORD_ERROR: &str = "Password must be 6+ characters";
pub const CONFIRM_ERROR: &str = "Passwords do not match";
pub const LOCAL_SAVE_ERROR: &str = "Could not save account to local storage.";

const BUTTON_ANIMATION: Duration = Duration::from_millis(520);
const TOAST_DELAY: Duration = Duration::from_millis(320);
const TOAST_DURATION: Duration = Duration::from_millis(1600);
const REDIRECT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignupTimer {
    EndButtonAnimation,
    ShowToast,
    HideToast,
    NavigateToLogin,
}

/// Signup is local-first: the browser copy decides the outcome, the server
/// copy is best-effort and never awaited by the form.
pub struct SignupController<A, L, S, C> {
    api: Arc<A>,
    local: L,
    session: S,
    clock: C,
    view: SignupView,
    state: FormState,
    timers: Scheduler<SignupTimer>,
    remote_tasks: Vec<JoinHandle<()>>,
}

impl SignupController<HttpAccountApi, FileKeyValueStore, Arc<storage::MemoryKeyValueStore>, SystemClock> {
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

impl<A, L, S, C> SignupController<A, L, S, C>
where
    A: AccountApi + 'static,
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
            view: SignupView::default(),
            state: FormState::Idle,
            timers: Scheduler::new(),
            remote_tasks: Vec::new(),
        }
    }

    pub fn view(&self) -> &SignupView {
        &self.view
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.view.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.view.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.view.password = password.into();
    }

    pub fn set_password_confirm(&mut self, password: impl Into<String>) {
        self.view.password_confirm = password.into();
    }

    /// The submit control is never disabled here, so repeated submits each run.
    pub fn submit(&mut self) {
        self.transition(FormState::Validating);
        if !self.validate() {
            self.transition(FormState::Idle);
            return;
        }

        self.transition(FormState::Submitting);

        let account = Account {
            name: self.view.name.trim().to_string(),
            email: self.view.email.trim().to_string(),
            password: self.view.password.clone(),
        };

        let persisted = match storage::save_account(&self.local, &account) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to save account locally: {}", e);
                false
            }
        };

        self.spawn_remote_signup(&account);

        if !persisted {
            self.view.email_error = LOCAL_SAVE_ERROR.to_string();
            self.transition(FormState::Idle);
            return;
        }

        if let Err(e) = self.session.set(SIGNUP_THANKS_KEY, "1") {
            tracing::debug!("Could not set signup flag: {}", e);
        }

        let now = self.clock.now();
        self.view.submit.animating = true;
        self.timers.schedule_at(now + BUTTON_ANIMATION, SignupTimer::EndButtonAnimation);
        self.timers.schedule_at(now + TOAST_DELAY, SignupTimer::ShowToast);
        self.timers.schedule_at(now + REDIRECT_DELAY, SignupTimer::NavigateToLogin);

        self.transition(FormState::Resolved(Via::Local));
    }

    fn spawn_remote_signup(&mut self, account: &Account) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("No runtime available, skipping remote signup");
            return;
        };

        let api = Arc::clone(&self.api);
        let request = SignupRequest {
            name: Some(account.name.clone()),
            email: Some(account.email.clone()),
            password: Some(account.password.clone()),
        };

        let task = runtime.spawn(async move {
            match api.signup(&request).await {
                Ok(()) => tracing::debug!("Account stored on server"),
                Err(e) => tracing::debug!("Remote signup failed, local copy only: {}", e),
            }
        });
        self.remote_tasks.retain(|t| !t.is_finished());
        self.remote_tasks.push(task);
    }

    /// Remote signups still tracked; finished ones are dropped on the next submit.
    pub fn pending_remote(&self) -> usize {
        self.remote_tasks.len()
    }

    /// Waits for detached remote signups to finish. The form never needs this.
    pub async fn wait_for_remote(&mut self) {
        for task in self.remote_tasks.drain(..) {
            if let Err(e) = task.await {
                tracing::error!("Remote signup task failed: {}", e);
            }
        }
    }

    fn validate(&mut self) -> bool {
        self.view.name_error.clear();
        self.view.email_error.clear();
        self.view.password_error.clear();
        self.view.password_confirm_error.clear();

        let mut ok = true;
        if !is_present(&self.view.name) {
            self.view.name_error = NAME_ERROR.to_string();
            ok = false;
        }
        if !is_valid_email(&self.view.email) {
            self.view.email_error = EMAIL_ERROR.to_string();
            ok = false;
        }
        if !is_valid_password(&self.view.password) {
            self.view.password_error = PASSWORD_ERROR.to_string();
            ok = false;
        }
        if self.view.password_confirm != self.view.password {
            self.view.password_confirm_error = CONFIRM_ERROR.to_string();
            ok = false;
        }
        ok
    }

    fn transition(&mut self, next: FormState) {
        tracing::debug!("Signup form {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    pub fn tick(&mut self) {
        while let Some((due, timer)) = self.timers.pop_due(self.clock.now()) {
            match timer {
                SignupTimer::EndButtonAnimation => self.view.submit.animating = false,
                SignupTimer::ShowToast => {
                    self.view.toast.visible = true;
                    self.timers.schedule_at(due + TOAST_DURATION, SignupTimer::HideToast);
                }
                SignupTimer::HideToast => self.view.toast.visible = false,
                SignupTimer::NavigateToLogin => self.view.navigate_to = Some(Page::Login),
            }
        }
    }

    pub async fn settle(&mut self) {
        while let Some(due) = self.timers.next_due() {
            let wait = due.saturating_sub(self.clock.now());
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
            self.tick();
        }
    }
}
