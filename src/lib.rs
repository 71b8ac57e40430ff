// Library exports for NOTA CLI components

pub mod api;
pub mod app;
pub mod chat;
pub mod login;
pub mod session;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use api::client::ApiClient;
pub use app::{App, AppEvent, Route, View};
pub use session::SessionStore;
