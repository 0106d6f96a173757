#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use passkey_ceremony::ceremony::options::{
    CoseAlgorithm, CredentialCreationOptions, CredentialRequestOptions,
};
use passkey_ceremony::platform::{
    Assertion, PlatformAuthenticator, PlatformCredential, PlatformError,
};
use passkey_ceremony::registry::CredentialRegistry;
use passkey_ceremony::{AppState, Config};

/// Deterministic stand-in for the platform credential API.
///
/// Records every call and the options it was given.
pub struct FakePlatform {
    supported: bool,
    hang: bool,
    create_result: Mutex<Result<PlatformCredential, PlatformError>>,
    get_result: Mutex<Result<Option<Assertion>, PlatformError>>,
    pub support_checks: AtomicUsize,
    pub creates: AtomicUsize,
    pub gets: AtomicUsize,
    pub last_creation: Mutex<Option<CredentialCreationOptions>>,
    pub last_request: Mutex<Option<CredentialRequestOptions>>,
    /// Signalled when a ceremony call starts hanging
    pub hung: Notify,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            supported: true,
            hang: false,
            create_result: Mutex::new(Ok(credential("cred123", "pk-b64"))),
            get_result: Mutex::new(Ok(Some(assertion("cred123")))),
            support_checks: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
            gets: AtomicUsize::new(0),
            last_creation: Mutex::new(None),
            last_request: Mutex::new(None),
            hung: Notify::new(),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    /// Ceremony calls never complete.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::new()
        }
    }

    pub fn set_credential(&self, id: &str, public_key: &str) {
        *self.create_result.lock().unwrap() = Ok(credential(id, public_key));
    }

    pub fn fail_create(&self, error: PlatformError) {
        *self.create_result.lock().unwrap() = Err(error);
    }

    pub fn set_assertion(&self, result: Result<Option<Assertion>, PlatformError>) {
        *self.get_result.lock().unwrap() = result;
    }

    pub fn support_checks(&self) -> usize {
        self.support_checks.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlatformAuthenticator for FakePlatform {
    async fn is_supported(&self) -> bool {
        self.support_checks.fetch_add(1, Ordering::SeqCst);
        self.supported
    }

    async fn create_credential(
        &self,
        options: &CredentialCreationOptions,
    ) -> Result<PlatformCredential, PlatformError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        *self.last_creation.lock().unwrap() = Some(options.clone());
        if self.hang {
            self.hung.notify_one();
            std::future::pending::<()>().await;
        }
        self.create_result.lock().unwrap().clone()
    }

    async fn get_assertion(
        &self,
        options: &CredentialRequestOptions,
    ) -> Result<Option<Assertion>, PlatformError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(options.clone());
        if self.hang {
            self.hung.notify_one();
            std::future::pending::<()>().await;
        }
        self.get_result.lock().unwrap().clone()
    }
}

pub fn credential(id: &str, public_key: &str) -> PlatformCredential {
    PlatformCredential {
        id: id.to_string(),
        public_key: public_key.to_string(),
        algorithm: CoseAlgorithm::Es256,
    }
}

pub fn assertion(credential_id: &str) -> Assertion {
    Assertion {
        credential_id: credential_id.to_string(),
        authenticator_data: vec![0u8; 37],
        client_data_json: br#"{"type":"webauthn.get"}"#.to_vec(),
        signature: vec![0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01],
        user_handle: None,
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        password_delay: Duration::ZERO,
        ..Config::default()
    }
}

pub async fn memory_registry() -> CredentialRegistry {
    CredentialRegistry::connect("sqlite::memory:")
        .await
        .expect("in-memory registry")
}

/// App state over an in-memory registry and the given platform.
pub async fn state_with(platform: Arc<dyn PlatformAuthenticator>) -> AppState {
    state_with_config(platform, &test_config()).await
}

pub async fn state_with_config(
    platform: Arc<dyn PlatformAuthenticator>,
    config: &Config,
) -> AppState {
    AppState::with_platform(config, memory_registry().await, platform).expect("app state")
}
