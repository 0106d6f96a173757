//! # Registry Models
//!
//! Typed records stored in the local credential registry.
//!
//! Records are serialized as JSON with camelCase keys so the value stored
//! under `passkey_<username>` has the same shape browsers kept in
//! `localStorage`:
//!
//! ```json
//! {
//!   "username": "alice",
//!   "credentialId": "q83vEjRWeJA=",
//!   "publicKeyMaterial": "BF1b...",
//!   "createdAt": "2024-01-15T10:30:00Z",
//!   "schemaVersion": 1
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema version written by this crate.
///
/// Version 0 marks legacy records written before the field existed (they
/// used `publicKey` and `timestamp` as key names).
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Namespace prefix of every registry key.
pub const KEY_PREFIX: &str = "passkey_";

/// Storage key for a username, e.g. `passkey_alice`.
pub fn storage_key(username: &str) -> String {
    format!("{KEY_PREFIX}{username}")
}

/// One registered passkey. At most one exists per username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Unique key of the record
    pub username: String,

    /// Credential id as returned by the platform (opaque text)
    pub credential_id: String,

    /// Public key as returned by the platform (opaque text)
    ///
    /// Kept for a future verifier; nothing reads it today.
    #[serde(alias = "publicKey")]
    pub public_key_material: String,

    /// When the passkey was registered (RFC3339 timestamp)
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,

    /// Absent in legacy records, which deserialize as version 0
    #[serde(default)]
    pub schema_version: u32,
}

impl CredentialRecord {
    /// Create a record stamped with the current time and schema version.
    pub fn new(username: String, credential_id: String, public_key_material: String) -> Self {
        Self {
            username,
            credential_id,
            public_key_material,
            created_at: Utc::now(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn storage_key(&self) -> String {
        storage_key(&self.username)
    }

    pub fn is_legacy(&self) -> bool {
        self.schema_version < CURRENT_SCHEMA_VERSION
    }
}

/// Entry returned when listing the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialSummary {
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&CredentialRecord> for CredentialSummary {
    fn from(record: &CredentialRecord) -> Self {
        Self {
            username: record.username.clone(),
            created_at: record.created_at,
        }
    }
}
