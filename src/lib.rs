//! Therapy chat client.
//!
//! The heart of the crate is [`auth::ApiClient`], an authenticated request
//! client that attaches bearer tokens, refreshes them silently on a 401 and
//! retries the original request once. Everything else ([`api`],
//! [`view_state`], [`cli`]) is a thin consumer of it.

pub mod adapters;
pub mod api;
pub mod auth;
pub mod cli;
pub mod cli_output;
pub mod config;
pub mod error;
pub mod logging;
pub mod traits;
pub mod view_state;
