//! Session-scoped state for NOTA CLI
//!
//! Holds the per-run key/value store and the conversation identifier
//! generator. The store lives for one process run and is wiped on logout.

use std::collections::HashMap;

use chrono::Utc;

/// Store key for the active conversation identifier
pub const CONVERSATION_ID_KEY: &str = "conversation_id";

/// Store key for the display name saved at login
pub const USER_NAME_KEY: &str = "userName";

const ID_SUFFIX_LEN: usize = 9;
const ID_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// In-memory key/value state scoped to one run
#[derive(Debug, Default)]
pub struct SessionStore {
    values: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// Drop everything; logout wipes the whole session
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.get(CONVERSATION_ID_KEY)
    }

    pub fn set_conversation_id(&mut self, id: String) {
        self.set(CONVERSATION_ID_KEY, id);
    }

    pub fn user_name(&self) -> Option<&str> {
        self.get(USER_NAME_KEY)
    }

    pub fn set_user_name(&mut self, name: String) {
        self.set(USER_NAME_KEY, name);
    }
}

/// Generate a fresh conversation identifier
///
/// Format: `conv_<unix millis>_<9 random lowercase base-36 chars>`. The
/// result is used for the outgoing request only; the store keeps whatever
/// identifier the server echoes back.
pub fn generate_conversation_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_CHARSET[fastrand::usize(..ID_CHARSET.len())] as char)
        .collect();
    format!("conv_{}_{}", millis, suffix)
}
