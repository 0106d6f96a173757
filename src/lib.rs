//! # Passkey Ceremony Demo
//!
//! Passwordless sign-in built on the WebAuthn ceremonies.
//!
//! ## Key Concepts
//! - **Ceremony**: one registration or authentication exchange with the platform
//! - **Relying party**: the application identity a credential is scoped to
//! - **Local registry**: remembers which username owns which credential id
//!
//! The orchestrator mints challenges and records credentials, but nothing is
//! verified server-side: a returned assertion counts as a successful sign-in.

pub mod app;        // Axum router
pub mod ceremony;   // Registration / authentication orchestration
pub mod config;     // Environment configuration
pub mod error;      // Error taxonomy and HTTP error responses
pub mod handlers;   // HTTP request handlers
pub mod middleware; // Signed-in checks
pub mod platform;   // Platform credential capability
pub mod registry;   // Local credential registry
pub mod session;    // Current user + change notifications
pub mod state;      // Shared application state

pub use ceremony::{
    authenticate_passkey, authenticate_with_password, logout, register_passkey, AuthOutcome,
};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
