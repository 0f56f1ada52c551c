//! Authentication for the therapy chat client.
//!
//! This module provides:
//! - Token pair storage on disk
//! - The authenticated request client with silent token refresh
//! - Sign-in, registration and sign-out

pub mod account;
pub mod client;
pub mod tokens;

pub use account::{LOGIN_PATH, REGISTER_PATH};
pub use client::{ApiClient, AuthState, RequestOptions, REFRESH_PATH};
pub use tokens::{TokenFile, TokenPair};
