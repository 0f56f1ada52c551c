//! Concrete implementations of trait abstractions.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileTokenStore`] - File-based token storage
//! - [`StdConsole`] - stdin/stdout console
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Queued HTTP responses
//! - [`mock::InMemoryTokenStore`] - In-memory token storage
//! - [`mock::ScriptedConsole`] - Scripted console input

pub mod file_tokens;
pub mod mock;
pub mod reqwest_http;
pub mod std_console;

pub use file_tokens::FileTokenStore;
pub use mock::{InMemoryTokenStore, MockHttpClient, ScriptedConsole};
pub use reqwest_http::ReqwestHttpClient;
pub use std_console::StdConsole;
