//! # Application State
//!
//! This module defines the context shared by every ceremony and request
//! handler. In Axum, state is how you share resources (the registry pool,
//! the platform authenticator, the session) across handlers.
//!
//! ## The State Pattern
//! Resources are created once at startup, stored in `AppState`, and cloned
//! into each handler. Cloning is cheap because everything heavy sits behind
//! an `Arc` or is itself a pooled handle.

use crate::ceremony::options::RelyingParty;
use crate::config::Config;
use crate::platform::{PlatformAuthenticator, SoftwareAuthenticator};
use crate::registry::CredentialRegistry;
use crate::session::SessionState;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Username → credential record store
    pub registry: CredentialRegistry,

    /// The platform credential API the ceremonies drive
    pub platform: Arc<dyn PlatformAuthenticator>,

    /// Who is signed in, with change notifications
    pub session: Arc<SessionState>,

    /// Relying party identity derived from the configured origin
    pub relying_party: Arc<RelyingParty>,

    /// Artificial wait of the password sign-in path
    pub password_delay: Duration,
}

impl AppState {
    /// Initialize application state
    ///
    /// This function:
    /// 1. Derives the relying party from `RP_ORIGIN`
    /// 2. Opens the registry database and runs migrations
    /// 3. Creates the software platform authenticator
    /// 4. Starts with nobody signed in
    ///
    /// # Errors
    /// Returns an error if the origin is malformed or the database can't be opened.
    pub async fn new(config: &Config) -> Result<Self> {
        let registry = CredentialRegistry::connect(&config.database_url).await?;

        let platform: Arc<dyn PlatformAuthenticator> = if config.webauthn_enabled {
            Arc::new(SoftwareAuthenticator::new())
        } else {
            Arc::new(SoftwareAuthenticator::disabled())
        };

        Self::with_platform(config, registry, platform)
    }

    /// Assemble state around an existing registry and platform.
    pub fn with_platform(
        config: &Config,
        registry: CredentialRegistry,
        platform: Arc<dyn PlatformAuthenticator>,
    ) -> Result<Self> {
        let relying_party = RelyingParty::from_origin(&config.rp_origin, &config.rp_name)?;

        Ok(AppState {
            registry,
            platform,
            session: Arc::new(SessionState::new()),
            relying_party: Arc::new(relying_party),
            password_delay: config.password_delay,
        })
    }
}
