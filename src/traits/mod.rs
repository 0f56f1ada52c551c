//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport used by the request client
//! - [`TokenStore`] - Durable storage for the token pair
//! - [`Console`] - Line-oriented terminal I/O for interactive commands

pub mod console;
pub mod http;
pub mod token_store;

pub use console::{Console, ConsoleError};
pub use http::{header_value, set_header, Headers, HttpClient, HttpError, HttpRequest, Method, Response};
pub use token_store::{TokenStore, TokenStoreError};
