//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with queued responses and request recording
//! - [`InMemoryTokenStore`] - In-memory token storage
//! - [`ScriptedConsole`] - Console fed from a script

pub mod console;
pub mod http;
pub mod tokens;

pub use console::ScriptedConsole;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use tokens::InMemoryTokenStore;
