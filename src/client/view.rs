// src/client/view.rs
//! Typed view models for the login and signup pages. A renderer reads these;
//! the controllers are the only writers.

use std::time::Duration;

pub const SIGN_IN_LABEL: &str = "Sign in";
pub const SIGNING_IN_LABEL: &str = "Signing in...";
pub const SIGN_UP_LABEL: &str = "Create account";

/// Navigation targets a controller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub busy: bool,
    pub disabled: bool,
    /// Redirect animation running on the button.
    pub animating: bool,
}

impl SubmitButton {
    pub fn ready(label: &'static str) -> Self {
        Self {
            label,
            busy: false,
            disabled: false,
            animating: false,
        }
    }

    pub fn busy(label: &'static str) -> Self {
        Self {
            label,
            busy: true,
            disabled: true,
            animating: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordField {
    pub value: String,
    pub masked: bool,
    pub toggle_label: &'static str,
    pub toggle_aria_label: &'static str,
}

impl PasswordField {
    pub fn masked() -> Self {
        Self {
            value: String::new(),
            masked: true,
            toggle_label: "Show",
            toggle_aria_label: "Show password",
        }
    }

    pub fn toggle(&mut self) {
        self.masked = !self.masked;
        if self.masked {
            self.toggle_label = "Show";
            self.toggle_aria_label = "Show password";
        } else {
            self.toggle_label = "Hide";
            self.toggle_aria_label = "Hide password";
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toast {
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    pub visible: bool,
    /// Clock time at which the overlay was shown; drives the progress bar.
    pub shown_at: Option<Duration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThirdPartyLogin {
    pub modal_open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub email: String,
    pub email_error: String,
    pub password: PasswordField,
    pub password_error: String,
    pub submit: SubmitButton,
    pub toast: Toast,
    pub card_dismissed: bool,
    pub overlay: Overlay,
    /// Absent when the page has no third-party login block.
    pub third_party: Option<ThirdPartyLogin>,
}

impl Default for LoginView {
    fn default() -> Self {
        Self {
            email: String::new(),
            email_error: String::new(),
            password: PasswordField::masked(),
            password_error: String::new(),
            submit: SubmitButton::ready(SIGN_IN_LABEL),
            toast: Toast::default(),
            card_dismissed: false,
            overlay: Overlay::default(),
            third_party: Some(ThirdPartyLogin::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupView {
    pub name: String,
    pub name_error: String,
    pub email: String,
    pub email_error: String,
    pub password: String,
    pub password_error: String,
    pub password_confirm: String,
    pub password_confirm_error: String,
    pub submit: SubmitButton,
    pub toast: Toast,
    pub navigate_to: Option<Page>,
}

impl Default for SignupView {
    fn default() -> Self {
        Self {
            name: String::new(),
            name_error: String::new(),
            email: String::new(),
            email_error: String::new(),
            password: String::new(),
            password_error: String::new(),
            password_confirm: String::new(),
            password_confirm_error: String::new(),
            submit: SubmitButton::ready(SIGN_UP_LABEL),
            toast: Toast::default(),
            navigate_to: None,
        }
    }
}
