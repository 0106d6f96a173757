//! # HTTP Request Handlers
//!
//! Thin adapters from HTTP routes to the ceremony and registry operations.
//!
//! ## Submodules
//! - `health`: Health check endpoint (for monitoring)
//! - `auth`: Register, sign in (passkey or password), logout, session
//! - `passkeys`: List and delete registry entries
//! - `users`: Current user profile

pub mod auth;
pub mod health;
pub mod passkeys;
pub mod users;
