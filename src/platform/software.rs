use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use base64::prelude::*;
use p256::ecdsa::{signature::Signer, Signature, SigningKey};
use rand::RngCore;
use serde_json::json;
use sha2::{Digest, Sha256};

use super::{Assertion, PlatformAuthenticator, PlatformCredential, PlatformError};
use crate::ceremony::options::{
    AuthenticatorAttachment, CoseAlgorithm, CredentialCreationOptions, CredentialRequestOptions,
};

const FLAG_UP: u8 = 0x01;
const FLAG_UV: u8 = 0x04;

struct ResidentKey {
    rp_id: String,
    user_handle: Vec<u8>,
    signing_key: SigningKey,
    sign_count: u32,
}

/// In-memory platform authenticator backed by P-256 keys.
///
/// Stands in for Touch ID / Windows Hello when the server runs without a
/// browser. Every credential is discoverable and user verification is
/// assumed to have happened. Only ES256 is implemented.
pub struct SoftwareAuthenticator {
    enabled: bool,
    keys: Mutex<HashMap<String, ResidentKey>>,
}

impl Default for SoftwareAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftwareAuthenticator {
    pub fn new() -> Self {
        Self {
            enabled: true,
            keys: Mutex::new(HashMap::new()),
        }
    }

    /// An authenticator that reports no WebAuthn capability.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Number of resident credentials held.
    pub fn credential_count(&self) -> usize {
        self.keys().map(|keys| keys.len()).unwrap_or(0)
    }

    fn keys(&self) -> Result<MutexGuard<'_, HashMap<String, ResidentKey>>, PlatformError> {
        self.keys
            .lock()
            .map_err(|_| PlatformError::Other("authenticator key store poisoned".into()))
    }

    fn make_credential(
        &self,
        options: &CredentialCreationOptions,
    ) -> Result<PlatformCredential, PlatformError> {
        if options.authenticator_selection.authenticator_attachment
            == AuthenticatorAttachment::CrossPlatform
        {
            return Err(PlatformError::NotSupported(
                "this authenticator is built into the platform".into(),
            ));
        }

        // First requested algorithm we implement wins.
        let algorithm = options
            .pub_key_cred_params
            .iter()
            .map(|param| param.alg)
            .find(|alg| *alg == CoseAlgorithm::Es256)
            .ok_or_else(|| {
                PlatformError::NotSupported("none of the requested algorithms is available".into())
            })?;

        let signing_key = SigningKey::random(&mut rand::rngs::OsRng);
        let public_key = signing_key.verifying_key().to_encoded_point(false);

        let mut raw_id = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut raw_id);
        let id = BASE64_STANDARD.encode(raw_id);

        self.keys()?.insert(
            id.clone(),
            ResidentKey {
                rp_id: options.rp.id.clone(),
                user_handle: options.user.id.clone(),
                signing_key,
                sign_count: 0,
            },
        );
        tracing::debug!(
            rp_id = %options.rp.id,
            user = %options.user.name,
            "Software credential created"
        );

        Ok(PlatformCredential {
            id,
            public_key: BASE64_STANDARD.encode(public_key.as_bytes()),
            algorithm,
        })
    }

    fn sign_assertion(
        &self,
        options: &CredentialRequestOptions,
    ) -> Result<Option<Assertion>, PlatformError> {
        let mut keys = self.keys()?;

        let found = if options.allow_credentials.is_empty() {
            // Discoverable flow: any credential scoped to the RP
            keys.iter()
                .find(|(_, key)| key.rp_id == options.rp_id)
                .map(|(id, _)| id.clone())
        } else {
            options
                .allow_credentials
                .iter()
                .find(|descriptor| {
                    keys.get(&descriptor.id)
                        .is_some_and(|key| key.rp_id == options.rp_id)
                })
                .map(|descriptor| descriptor.id.clone())
        };
        let credential_id = found.ok_or(PlatformError::NotAllowed)?;

        let key = keys.get_mut(&credential_id).ok_or(PlatformError::NotAllowed)?;
        key.sign_count = key.sign_count.wrapping_add(1);

        let client_data_json = serde_json::to_vec(&json!({
            "type": "webauthn.get",
            "challenge": options.challenge.to_base64url(),
            "origin": options.origin,
            "crossOrigin": false,
        }))
        .map_err(|e| PlatformError::Other(e.to_string()))?;

        let mut authenticator_data = Sha256::digest(options.rp_id.as_bytes()).to_vec();
        authenticator_data.push(FLAG_UP | FLAG_UV);
        authenticator_data.extend_from_slice(&key.sign_count.to_be_bytes());

        let mut signed = authenticator_data.clone();
        signed.extend_from_slice(&Sha256::digest(&client_data_json));
        let signature: Signature = key.signing_key.sign(&signed);

        Ok(Some(Assertion {
            credential_id,
            authenticator_data,
            client_data_json,
            signature: signature.to_der().as_bytes().to_vec(),
            user_handle: Some(key.user_handle.clone()),
        }))
    }
}

#[async_trait]
impl PlatformAuthenticator for SoftwareAuthenticator {
    async fn is_supported(&self) -> bool {
        self.enabled
    }

    async fn create_credential(
        &self,
        options: &CredentialCreationOptions,
    ) -> Result<PlatformCredential, PlatformError> {
        if !self.enabled {
            return Err(PlatformError::NotSupported("WebAuthn is disabled".into()));
        }
        self.make_credential(options)
    }

    async fn get_assertion(
        &self,
        options: &CredentialRequestOptions,
    ) -> Result<Option<Assertion>, PlatformError> {
        if !self.enabled {
            return Err(PlatformError::NotSupported("WebAuthn is disabled".into()));
        }
        self.sign_assertion(options)
    }
}
