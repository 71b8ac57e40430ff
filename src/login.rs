use std::time::Duration;

use crate::api::client::ApiError;

pub const NAME_REQUIRED: &str = "Please enter your name";
pub const PASSWORD_REQUIRED: &str = "Please enter the password";
pub const LOGGING_IN: &str = "Logging in...";
pub const LOGIN_SUCCESS: &str = "Login successful! Redirecting...";
pub const BAD_PASSWORD: &str =
    "Incorrect password. Please type \"password\" in the password field.";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const CONNECTION_ERROR: &str = "Connection error. Please try again.";

/// Pause between the success message and landing in the chat view
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// Which input the next line of input lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Name,
    Password,
}

/// Login view state
#[derive(Debug)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
    pub focus: LoginField,
    pub name_error: Option<String>,
    pub password_error: Option<String>,
    /// Set between submit and outcome; input lines are dropped while set
    pub submitting: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            password: String::new(),
            focus: LoginField::Name,
            name_error: None,
            password_error: None,
            submitting: false,
        }
    }

    /// Feed one line of input into the focused field.
    /// Returns true when the form should submit.
    pub fn accept_line(&mut self, line: &str) -> bool {
        match self.focus {
            LoginField::Name => {
                self.name = line.to_string();
                self.focus = LoginField::Password;
                false
            }
            LoginField::Password => {
                self.password = line.to_string();
                true
            }
        }
    }

    /// Trim both fields and fill the per-field error slots. Both checks
    /// run so both errors can show at once. Returns true when the form
    /// may be submitted.
    pub fn validate(&mut self) -> bool {
        self.name_error = None;
        self.password_error = None;

        self.name = self.name.trim().to_string();
        self.password = self.password.trim().to_string();

        if self.name.is_empty() {
            self.name_error = Some(NAME_REQUIRED.to_string());
        }
        if self.password.is_empty() {
            self.password_error = Some(PASSWORD_REQUIRED.to_string());
        }

        if self.name_error.is_some() {
            self.focus = LoginField::Name;
            false
        } else if self.password_error.is_some() {
            self.focus = LoginField::Password;
            false
        } else {
            true
        }
    }

    /// Rejected credentials: the password gets retyped from scratch
    pub fn reset_for_retry(&mut self) {
        self.submitting = false;
        self.password.clear();
        self.focus = LoginField::Password;
    }

    /// Transport failure: fields and focus stay where they were
    pub fn reset_after_network_error(&mut self) {
        self.submitting = false;
    }
}

/// User-facing message for a failed login attempt
pub fn failure_message(error: &ApiError) -> String {
    match error {
        // 401 always gets the password hint, whatever the body said
        ApiError::Unauthorized { .. } => BAD_PASSWORD.to_string(),
        ApiError::Status { detail, .. } => detail
            .clone()
            .unwrap_or_else(|| LOGIN_FAILED.to_string()),
        ApiError::Network(_) => CONNECTION_ERROR.to_string(),
    }
}
