use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::utils::logger;

pub const AUTH_CHECK_PATH: &str = "/api/llm/auth/check";
pub const LOGIN_PATH: &str = "/api/llm/auth/login";
pub const LOGOUT_PATH: &str = "/api/llm/auth/logout";
pub const CHAT_PATH: &str = "/api/llm/chat";

/// Shown when a successful chat reply carries no usable text
pub const FALLBACK_REPLY: &str = "I received your message but had trouble processing it.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication failed (401): {}", detail.as_deref().unwrap_or("no detail"))]
    Unauthorized { detail: Option<String> },

    #[error("Request failed (status {status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        match status {
            401 => Self::Unauthorized { detail },
            _ => Self::Status { status, detail },
        }
    }

    /// Server-provided detail text, when the error body carried one
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail } | Self::Status { detail, .. } => detail.as_deref(),
            Self::Network(_) => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Session check result
#[derive(Debug, Clone, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(default)]
    pub name: Option<String>,
}

/// Successful login payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginSuccess {
    pub name: String,
}

/// Chat reply payload; every field is optional on the wire
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

impl ChatReply {
    /// Text to render: `response`, else `message`, else the fallback.
    /// Empty strings count as absent.
    pub fn display_text(&self) -> &str {
        if let Some(text) = self.response.as_deref().filter(|t| !t.is_empty()) {
            return text;
        }
        if let Some(text) = self.message.as_deref().filter(|t| !t.is_empty()) {
            return text;
        }
        FALLBACK_REPLY
    }
}

/// HTTP client for the NOTA backend
///
/// Carries a cookie jar so the session cookie set at login rides along on
/// every later request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        // Normalize endpoint URL - remove trailing slashes so joined
        // paths never double up
        let base_url = base_url.trim_end_matches('/').to_string();

        // No request timeout: a hung backend means an indefinite wait,
        // surfaced to the user only through the spinner.
        let client = Client::builder()
            .user_agent("nota-cli/0.1")
            .cookie_store(true)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn check_auth(&self) -> Result<AuthStatus, ApiError> {
        logger::debug(&format!("GET {}", AUTH_CHECK_PATH));
        let response = self
            .client
            .get(format!("{}{}", self.base_url, AUTH_CHECK_PATH))
            .send()
            .await?;

        let status = response.status();
        logger::debug(&format!("GET {} -> {}", AUTH_CHECK_PATH, status));

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::status_error(response).await)
        }
    }

    pub async fn login(&self, name: &str, password: &str) -> Result<LoginSuccess, ApiError> {
        // Credentials never hit the log file
        logger::debug(&format!("POST {}", LOGIN_PATH));
        let response = self
            .client
            .post(format!("{}{}", self.base_url, LOGIN_PATH))
            .json(&json!({ "name": name, "password": password }))
            .send()
            .await?;

        let status = response.status();
        logger::debug(&format!("POST {} -> {}", LOGIN_PATH, status));

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::status_error(response).await)
        }
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        logger::debug(&format!("POST {}", LOGOUT_PATH));
        let response = self
            .client
            .post(format!("{}{}", self.base_url, LOGOUT_PATH))
            .send()
            .await?;

        let status = response.status();
        logger::debug(&format!("POST {} -> {}", LOGOUT_PATH, status));

        if status.is_success() {
            Ok(())
        } else {
            Err(Self::status_error(response).await)
        }
    }

    pub async fn chat(&self, message: &str, conversation_id: &str) -> Result<ChatReply, ApiError> {
        logger::debug(&format!("POST {} ({})", CHAT_PATH, conversation_id));
        let response = self
            .client
            .post(format!("{}{}", self.base_url, CHAT_PATH))
            .json(&json!({ "message": message, "conversation_id": conversation_id }))
            .send()
            .await?;

        let status = response.status();
        logger::debug(&format!("POST {} -> {}", CHAT_PATH, status));

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::status_error(response).await)
        }
    }

    /// Build the error for a non-success response, pulling the `detail`
    /// field out of the body when one is there
    async fn status_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("detail")
                    .and_then(|d| d.as_str())
                    .map(str::to_string)
            })
            .filter(|d| !d.is_empty());

        ApiError::from_status(status, detail)
    }
}
