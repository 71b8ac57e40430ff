use indicatif::ProgressBar;
use tokio::sync::mpsc;

use crate::api::client::{ApiClient, ApiError, ChatReply, LoginSuccess};
use crate::chat::{
    ChatMessage, ChatPanel, MessageType, CONNECTION_ERROR_HINT, CONNECTION_ERROR_TEXT, THINKING,
};
use crate::login::{self, LoginForm};
use crate::session::{self, SessionStore};
use crate::ui;
use crate::utils::logger;

/// Everything the dispatcher loop reacts to
#[derive(Debug)]
pub enum AppEvent {
    /// One line of user input
    Line(String),
    /// Stdin closed
    Eof,
    /// Outcome of a spawned login request
    LoginOutcome(Result<LoginSuccess, ApiError>),
    /// The post-login pause is over
    RedirectElapsed,
    /// Outcome of a spawned chat request
    ChatOutcome(Result<ChatReply, ApiError>),
}

/// The page the terminal is currently standing in for
#[derive(Debug)]
pub enum View {
    Login(LoginForm),
    Chat(ChatPanel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
}

pub struct App {
    pub session: SessionStore,
    pub view: View,
    pub messages: Vec<ChatMessage>,
    pub running: bool,
    pub api_client: ApiClient,
    pub events_tx: mpsc::UnboundedSender<AppEvent>,
    pub spinner: Option<ProgressBar>,
}

impl App {
    pub fn new(api_client: ApiClient, events_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            session: SessionStore::new(),
            view: View::Login(LoginForm::new()),
            messages: Vec::new(),
            running: true,
            api_client,
            events_tx,
            spinner: None,
        }
    }

    /// Initial gate check on startup
    pub async fn bootstrap(&mut self) {
        self.navigate(Route::Home).await;
    }

    pub async fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Line(line) => self.handle_line(line).await,
            AppEvent::Eof => {
                logger::info("Input closed, shutting down");
                self.running = false;
            }
            AppEvent::LoginOutcome(outcome) => self.handle_login_outcome(outcome),
            AppEvent::RedirectElapsed => self.handle_redirect().await,
            AppEvent::ChatOutcome(outcome) => self.handle_chat_outcome(outcome),
        }
    }

    /// Prompt for whichever input the current view is waiting on.
    /// Nothing is printed while a request is in flight.
    pub fn render_prompt(&self) {
        match &self.view {
            View::Login(form) if form.submitting => {}
            View::Login(form) => ui::print_login_prompt(form),
            View::Chat(panel) if panel.in_flight => {}
            View::Chat(_) => ui::print_chat_prompt(),
        }
    }

    /// Move between views. Entering either view re-runs the session
    /// check before settling.
    pub async fn navigate(&mut self, route: Route) {
        let mut route = route;
        // Bounded hops so a flip-flopping session check cannot loop forever
        for _ in 0..4 {
            match route {
                Route::Home => match self.api_client.check_auth().await {
                    Ok(status) if status.authenticated => {
                        self.enter_chat(status.name);
                        return;
                    }
                    Ok(_) => {
                        logger::info("Session check: not authenticated");
                        route = Route::Login;
                    }
                    Err(error) => {
                        logger::warn(&format!("Session check failed: {}", error));
                        route = Route::Login;
                    }
                },
                Route::Login => match self.api_client.check_auth().await {
                    Ok(status) if status.authenticated => {
                        route = Route::Home;
                    }
                    _ => {
                        self.enter_login();
                        return;
                    }
                },
            }
        }
        self.enter_login();
    }

    fn enter_chat(&mut self, name: Option<String>) {
        logger::info("Entering chat view");
        self.view = View::Chat(ChatPanel::new(name.clone()));

        let greeting = match name.as_deref() {
            Some(name) if !name.is_empty() => format!("Hi, {}!", name),
            _ => "Hi!".to_string(),
        };
        self.push_message(MessageType::System, &greeting);
        self.push_message(
            MessageType::Info,
            "Type a message to chat, /logout to sign out, /quit to leave.",
        );
    }

    fn enter_login(&mut self) {
        logger::info("Entering login view");
        self.view = View::Login(LoginForm::new());
        self.push_message(MessageType::System, "Sign in to continue.");
    }

    async fn handle_line(&mut self, line: String) {
        match &mut self.view {
            View::Login(form) => {
                if form.submitting {
                    logger::debug("Input dropped: login request in flight");
                    return;
                }
                if form.accept_line(&line) {
                    self.submit_login();
                }
            }
            View::Chat(_) => {
                let trimmed = line.trim().to_string();
                if trimmed.is_empty() {
                    return;
                }
                match trimmed.as_str() {
                    "/logout" => self.logout().await,
                    "/quit" | "/exit" => {
                        self.running = false;
                    }
                    _ => self.send_chat(trimmed),
                }
            }
        }
    }

    fn submit_login(&mut self) {
        let decision = {
            let View::Login(form) = &mut self.view else { return };
            if form.validate() {
                form.submitting = true;
                Ok((form.name.clone(), form.password.clone()))
            } else {
                Err([form.name_error.clone(), form.password_error.clone()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>())
            }
        };

        match decision {
            Ok((name, password)) => {
                logger::info("Login submitted");
                self.start_spinner(login::LOGGING_IN);

                let client = self.api_client.clone();
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let outcome = client.login(&name, &password).await;
                    let _ = tx.send(AppEvent::LoginOutcome(outcome));
                });
            }
            Err(errors) => {
                for error in errors {
                    self.push_message(MessageType::Error, &error);
                }
            }
        }
    }

    fn handle_login_outcome(&mut self, outcome: Result<LoginSuccess, ApiError>) {
        self.stop_spinner();
        if !matches!(self.view, View::Login(_)) {
            logger::debug("Login outcome dropped: view changed");
            return;
        }

        match outcome {
            Ok(success) => {
                self.session.set_user_name(success.name);
                self.push_message(MessageType::Success, login::LOGIN_SUCCESS);

                // Form stays disabled for the pause; input lines are
                // dropped until the redirect fires
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(login::REDIRECT_DELAY).await;
                    let _ = tx.send(AppEvent::RedirectElapsed);
                });
            }
            Err(error) => {
                logger::warn(&format!("Login failed: {}", error));
                let message = login::failure_message(&error);
                self.push_message(MessageType::Error, &message);

                let View::Login(form) = &mut self.view else { return };
                if error.is_network() {
                    form.reset_after_network_error();
                } else {
                    form.reset_for_retry();
                }
            }
        }
    }

    async fn handle_redirect(&mut self) {
        if !matches!(self.view, View::Login(_)) {
            return;
        }
        self.navigate(Route::Home).await;
    }

    fn send_chat(&mut self, message: String) {
        {
            let View::Chat(panel) = &mut self.view else { return };
            if !panel.try_begin_send() {
                logger::debug("Chat send dropped: request already in flight");
                return;
            }
        }

        self.push_message(MessageType::User, &message);
        self.start_spinner(THINKING);

        // A fresh identifier is used for the request but not stored;
        // only server-issued identifiers stick
        let conversation_id = match self.session.conversation_id() {
            Some(id) => id.to_string(),
            None => session::generate_conversation_id(),
        };

        let client = self.api_client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = client.chat(&message, &conversation_id).await;
            let _ = tx.send(AppEvent::ChatOutcome(outcome));
        });
    }

    fn handle_chat_outcome(&mut self, outcome: Result<ChatReply, ApiError>) {
        self.stop_spinner();
        {
            let View::Chat(panel) = &mut self.view else {
                logger::debug("Chat outcome dropped: view changed");
                return;
            };
            panel.finish_send();
        }

        match outcome {
            Ok(reply) => {
                if let Some(id) = reply
                    .conversation_id
                    .clone()
                    .filter(|id| !id.is_empty())
                {
                    self.session.set_conversation_id(id);
                }
                let text = reply.display_text().to_string();
                self.push_message(MessageType::Nota, &text);
            }
            Err(error) => {
                logger::error(&format!("Chat request failed: {}", error));
                self.push_message(MessageType::Error, CONNECTION_ERROR_TEXT);
                self.push_message(MessageType::Info, CONNECTION_ERROR_HINT);
            }
        }
    }

    async fn logout(&mut self) {
        match self.api_client.logout().await {
            Ok(()) => {
                logger::info("Logged out");
                self.session.clear();
                self.navigate(Route::Login).await;
            }
            Err(error) => {
                // The chat view stays put; this only reaches the log file
                logger::error(&format!("Logout failed: {}", error));
            }
        }
    }

    fn push_message(&mut self, message_type: MessageType, content: &str) {
        let message = ChatMessage::new(message_type, content.to_string());
        // Typed lines are already on screen; everything else gets printed
        if message.message_type != MessageType::User {
            ui::print_message(&message);
        }
        self.messages.push(message);
    }

    fn start_spinner(&mut self, text: &str) {
        self.stop_spinner();
        self.spinner = Some(ui::spinner(text));
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}
