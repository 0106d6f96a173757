//! # Platform Credential Capability
//!
//! The orchestrator never talks to an authenticator directly. It is handed a
//! [`PlatformAuthenticator`], the Rust face of the browser's
//! `navigator.credentials` API, so production code can plug in a real
//! platform while tests plug in deterministic fixtures.
//!
//! ## Submodules
//! - `software`: in-process P-256 authenticator used by the server binary

pub mod software;

pub use software::SoftwareAuthenticator;

use crate::ceremony::options::{CoseAlgorithm, CredentialCreationOptions, CredentialRequestOptions};
use async_trait::async_trait;
use thiserror::Error;

/// A freshly created credential.
///
/// `id` and `public_key` are opaque byte sequences already encoded as text by
/// the platform; the registry stores them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCredential {
    pub id: String,
    pub public_key: String,
    pub algorithm: CoseAlgorithm,
}

/// The signed proof returned by an authentication ceremony.
///
/// Nothing in this crate checks the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    pub credential_id: String,
    pub authenticator_data: Vec<u8>,
    pub client_data_json: Vec<u8>,
    pub signature: Vec<u8>,
    pub user_handle: Option<Vec<u8>>,
}

/// Failures reported by the platform, worded like the browser's DOMExceptions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("The operation either timed out or was not allowed.")]
    NotAllowed,

    #[error("The operation timed out.")]
    Timeout,

    #[error("The user cancelled the operation.")]
    Cancelled,

    #[error("The operation is not supported: {0}")]
    NotSupported(String),

    #[error("The operation is insecure: {0}")]
    Security(String),

    /// The ceremony finished without producing an assertion.
    #[error("Authentication failed")]
    NoResult,

    #[error("{0}")]
    Other(String),
}

/// Asynchronous access to the platform's credential subsystem.
///
/// Both ceremony calls may suspend for as long as the user takes to answer
/// the platform prompt; the orchestrator bounds them with the ceremony timeout.
#[async_trait]
pub trait PlatformAuthenticator: Send + Sync {
    /// Whether WebAuthn is available at all.
    async fn is_supported(&self) -> bool;

    /// Run the registration ceremony.
    async fn create_credential(
        &self,
        options: &CredentialCreationOptions,
    ) -> Result<PlatformCredential, PlatformError>;

    /// Run the authentication ceremony. `Ok(None)` means the platform
    /// produced no assertion.
    async fn get_assertion(
        &self,
        options: &CredentialRequestOptions,
    ) -> Result<Option<Assertion>, PlatformError>;
}
