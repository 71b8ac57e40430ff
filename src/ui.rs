//! Terminal rendering for NOTA CLI
//!
//! Styled message output, per-view prompts, the request spinner, and the
//! stdin reader that feeds the event channel.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use crate::app::AppEvent;
use crate::chat::{ChatMessage, MessageType};
use crate::login::{LoginField, LoginForm};

/// Golden yellow for the user's own lines
pub const USER_ANSI: u8 = 214;
/// Steel blue for service replies
pub const REPLY_ANSI: u8 = 67;
/// Light gray for system text
pub const SYSTEM_ANSI: u8 = 251;

/// Color theme struct for consistent styling
pub struct ColorTheme;

impl ColorTheme {
    pub fn user() -> Style {
        Style::new().color256(USER_ANSI).bold()
    }

    pub fn reply() -> Style {
        Style::new().color256(REPLY_ANSI).bold()
    }

    pub fn system() -> Style {
        Style::new().color256(SYSTEM_ANSI)
    }

    /// Success style (green variant)
    pub fn success() -> Style {
        Style::new().color256(46).bold()
    }

    /// Error style (red variant)
    pub fn error() -> Style {
        Style::new().color256(196).bold()
    }

    /// Dim/faded style
    pub fn dim() -> Style {
        Style::new().color256(244).dim()
    }

    pub fn prompt() -> Style {
        Style::new().cyan().bold()
    }

    pub fn header() -> Style {
        Style::new().color256(USER_ANSI).bold()
    }
}

pub fn print_message(message: &ChatMessage) {
    match message.message_type {
        MessageType::User => {
            println!(
                "{} {}",
                ColorTheme::user().apply_to("You:"),
                message.content
            );
        }
        MessageType::Nota => {
            println!(
                "{} {}",
                ColorTheme::reply().apply_to("NOTA:"),
                message.content
            );
        }
        MessageType::System => {
            println!("{}", ColorTheme::system().apply_to(&message.content));
        }
        MessageType::Success => {
            println!("{}", ColorTheme::success().apply_to(&message.content));
        }
        MessageType::Error => {
            println!("{}", ColorTheme::error().apply_to(&message.content));
        }
        MessageType::Info => {
            println!("{}", ColorTheme::dim().apply_to(&message.content));
        }
    }
}

/// Prompt for the login field that has focus
pub fn print_login_prompt(form: &LoginForm) {
    let label = match form.focus {
        LoginField::Name => "Name:",
        LoginField::Password => "Password:",
    };
    print!("{} ", ColorTheme::prompt().apply_to(label));
    let _ = io::stdout().flush();
}

pub fn print_chat_prompt() {
    print!("{} ", ColorTheme::prompt().apply_to("▶"));
    let _ = io::stdout().flush();
}

/// Spinner shown while a request is on the wire
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.bright.cyan} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Read stdin lines on a blocking thread and forward them as events.
/// Ends with an Eof event when stdin closes.
pub fn spawn_stdin_reader(tx: mpsc::UnboundedSender<AppEvent>) {
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(AppEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(_) => break,
            }
        }
        let _ = tx.send(AppEvent::Eof);
    });
}
