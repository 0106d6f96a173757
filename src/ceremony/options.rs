//! # Ceremony Parameters
//!
//! Builders for the options handed to the platform authenticator during the
//! two WebAuthn ceremonies. The structs serialize to the JSON shape browsers
//! accept for `navigator.credentials.create()` / `.get()`, with binary values
//! (challenge, user handle) encoded as base64url.
//!
//! ## Fixed policy
//! - 32-byte challenge, minted fresh for every ceremony and never stored
//! - 16-byte random user handle for registration
//! - algorithm preference `[ES256, RS256]`, in that order
//! - platform authenticator, discoverable credential, user verification required
//! - 60 second timeout, no attestation

use anyhow::{anyhow, Result};
use base64::prelude::*;
use rand::RngCore;
use serde::{Serialize, Serializer};
use std::time::Duration;
use url::Url;
use uuid::Uuid;

/// Length of every ceremony challenge, in bytes.
pub const CHALLENGE_LEN: usize = 32;

/// How long a single platform call may take before the ceremony fails.
pub const CEREMONY_TIMEOUT: Duration = Duration::from_secs(60);

/// Transports hinted for the stored credential during authentication.
pub const ALLOWED_TRANSPORTS: [AuthenticatorTransport; 2] =
    [AuthenticatorTransport::Internal, AuthenticatorTransport::Hybrid];

/// Algorithm preference for new credentials. Authenticators try ES256 first.
pub const ALGORITHM_PREFERENCE: [CoseAlgorithm; 2] = [CoseAlgorithm::Es256, CoseAlgorithm::Rs256];

/// Random bytes the authenticator signs over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge([u8; CHALLENGE_LEN]);

impl Challenge {
    pub fn random() -> Self {
        let mut bytes = [0u8; CHALLENGE_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Challenge(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// base64url without padding, as it appears in `clientDataJSON`.
    pub fn to_base64url(&self) -> String {
        BASE64_URL_SAFE_NO_PAD.encode(self.0)
    }
}

impl Serialize for Challenge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64url())
    }
}

/// COSE algorithm identifiers understood by this demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoseAlgorithm {
    /// ECDSA w/ SHA-256 on P-256
    Es256,
    /// RSASSA-PKCS1-v1_5 w/ SHA-256
    Rs256,
}

impl CoseAlgorithm {
    pub fn id(self) -> i64 {
        match self {
            CoseAlgorithm::Es256 => -7,
            CoseAlgorithm::Rs256 => -257,
        }
    }
}

impl Serialize for CoseAlgorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CredentialType {
    #[serde(rename = "public-key")]
    PublicKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthenticatorAttachment {
    #[serde(rename = "platform")]
    Platform,
    #[serde(rename = "cross-platform")]
    CrossPlatform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResidentKeyRequirement {
    Discouraged,
    Preferred,
    Required,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserVerificationRequirement {
    Discouraged,
    Preferred,
    Required,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttestationConveyance {
    None,
    Indirect,
    Direct,
    Enterprise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticatorTransport {
    Usb,
    Nfc,
    Ble,
    Internal,
    Hybrid,
}

/// Relying party identity, derived from the serving origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelyingParty {
    pub id: String,
    pub name: String,
    /// Full origin, echoed into `clientDataJSON` by authenticators.
    #[serde(skip)]
    pub origin: String,
}

impl RelyingParty {
    /// The RP ID is the origin's host, e.g. "localhost" for "http://localhost:8080".
    pub fn from_origin(origin: &str, name: &str) -> Result<Self> {
        let url = Url::parse(origin)?;
        let id = url
            .host_str()
            .ok_or_else(|| anyhow!("origin '{origin}' has no host"))?
            .to_string();

        Ok(RelyingParty {
            id,
            name: name.to_string(),
            origin: url.origin().ascii_serialization(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    #[serde(serialize_with = "base64url")]
    pub id: Vec<u8>,
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicKeyCredentialParameters {
    #[serde(rename = "type")]
    pub kind: CredentialType,
    pub alg: CoseAlgorithm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatorSelection {
    pub authenticator_attachment: AuthenticatorAttachment,
    pub resident_key: ResidentKeyRequirement,
    pub require_resident_key: bool,
    pub user_verification: UserVerificationRequirement,
}

/// Options for the registration ceremony (`navigator.credentials.create`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialCreationOptions {
    pub challenge: Challenge,
    pub rp: RelyingParty,
    pub user: UserEntity,
    pub pub_key_cred_params: Vec<PublicKeyCredentialParameters>,
    pub authenticator_selection: AuthenticatorSelection,
    #[serde(serialize_with = "millis")]
    pub timeout: Duration,
    pub attestation: AttestationConveyance,
}

/// A credential the authenticator may use during authentication.
///
/// `id` is the credential id exactly as the registry stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicKeyCredentialDescriptor {
    #[serde(rename = "type")]
    pub kind: CredentialType,
    pub id: String,
    pub transports: Vec<AuthenticatorTransport>,
}

/// Options for the authentication ceremony (`navigator.credentials.get`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequestOptions {
    pub challenge: Challenge,
    pub rp_id: String,
    /// Not part of the browser options; authenticators need it for `clientDataJSON`.
    #[serde(skip)]
    pub origin: String,
    pub allow_credentials: Vec<PublicKeyCredentialDescriptor>,
    pub user_verification: UserVerificationRequirement,
    #[serde(serialize_with = "millis")]
    pub timeout: Duration,
}

/// Build registration options for `username` with a fresh challenge and user handle.
pub fn registration_options(
    rp: &RelyingParty,
    username: &str,
    display_name: &str,
) -> CredentialCreationOptions {
    let display_name = if display_name.trim().is_empty() {
        username
    } else {
        display_name
    };

    CredentialCreationOptions {
        challenge: Challenge::random(),
        rp: rp.clone(),
        user: UserEntity {
            // UUID v4: 16 random bytes (minus the version/variant bits)
            id: Uuid::new_v4().as_bytes().to_vec(),
            name: username.to_string(),
            display_name: display_name.to_string(),
        },
        pub_key_cred_params: ALGORITHM_PREFERENCE
            .iter()
            .map(|&alg| PublicKeyCredentialParameters {
                kind: CredentialType::PublicKey,
                alg,
            })
            .collect(),
        authenticator_selection: AuthenticatorSelection {
            authenticator_attachment: AuthenticatorAttachment::Platform,
            resident_key: ResidentKeyRequirement::Required,
            require_resident_key: true,
            user_verification: UserVerificationRequirement::Required,
        },
        timeout: CEREMONY_TIMEOUT,
        attestation: AttestationConveyance::None,
    }
}

/// Build assertion options that only allow the stored `credential_id`.
pub fn authentication_options(rp: &RelyingParty, credential_id: &str) -> CredentialRequestOptions {
    CredentialRequestOptions {
        challenge: Challenge::random(),
        rp_id: rp.id.clone(),
        origin: rp.origin.clone(),
        allow_credentials: vec![PublicKeyCredentialDescriptor {
            kind: CredentialType::PublicKey,
            id: credential_id.to_string(),
            transports: ALLOWED_TRANSPORTS.to_vec(),
        }],
        user_verification: UserVerificationRequirement::Required,
        timeout: CEREMONY_TIMEOUT,
    }
}

fn base64url<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64_URL_SAFE_NO_PAD.encode(bytes))
}

fn millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rp() -> RelyingParty {
        RelyingParty::from_origin("http://localhost:8080", "Passkey Demo").unwrap()
    }

    #[test]
    fn rp_id_is_origin_host() {
        let rp = RelyingParty::from_origin("https://login.example.com/app", "Example").unwrap();
        assert_eq!(rp.id, "login.example.com");
        assert_eq!(rp.origin, "https://login.example.com");
        assert!(RelyingParty::from_origin("not a url", "x").is_err());
    }

    #[test]
    fn registration_prefers_es256_then_rs256() {
        let options = registration_options(&rp(), "alice", "");
        let algs: Vec<i64> = options.pub_key_cred_params.iter().map(|p| p.alg.id()).collect();
        assert_eq!(algs, vec![-7, -257]);
    }

    #[test]
    fn registration_policy() {
        let options = registration_options(&rp(), "alice", "Alice Liddell");
        assert_eq!(options.challenge.as_bytes().len(), CHALLENGE_LEN);
        assert_eq!(options.user.id.len(), 16);
        assert_eq!(options.user.name, "alice");
        assert_eq!(options.user.display_name, "Alice Liddell");
        assert_eq!(options.timeout, Duration::from_secs(60));

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["rp"], json!({"id": "localhost", "name": "Passkey Demo"}));
        assert_eq!(json["pubKeyCredParams"][0], json!({"type": "public-key", "alg": -7}));
        assert_eq!(
            json["authenticatorSelection"],
            json!({
                "authenticatorAttachment": "platform",
                "residentKey": "required",
                "requireResidentKey": true,
                "userVerification": "required"
            })
        );
        assert_eq!(json["timeout"], 60000);
        assert_eq!(json["attestation"], "none");
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let options = registration_options(&rp(), "bob", "  ");
        assert_eq!(options.user.display_name, "bob");
    }

    #[test]
    fn every_ceremony_gets_a_fresh_challenge() {
        let first = registration_options(&rp(), "alice", "");
        let second = registration_options(&rp(), "alice", "");
        assert_ne!(first.challenge, second.challenge);
        assert_ne!(first.user.id, second.user.id);

        let a = authentication_options(&rp(), "cred");
        let b = authentication_options(&rp(), "cred");
        assert_ne!(a.challenge, b.challenge);
    }

    #[test]
    fn authentication_allows_only_the_stored_credential() {
        let options = authentication_options(&rp(), "cred123");
        assert_eq!(options.rp_id, "localhost");
        assert_eq!(options.allow_credentials.len(), 1);

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(
            json["allowCredentials"],
            json!([{"type": "public-key", "id": "cred123", "transports": ["internal", "hybrid"]}])
        );
        assert_eq!(json["userVerification"], "required");
        assert_eq!(json["timeout"], 60000);
        assert!(json.get("origin").is_none());
    }
}
