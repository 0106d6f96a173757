//! # Local Credential Registry
//!
//! Maps each username to at most one [`CredentialRecord`], persisted in a
//! namespaced key-value table (`passkey_<username>` → JSON record).
//!
//! ## Submodules
//! - `models`: the typed, versioned record and list summaries
//! - `store`: put / get / list / delete over SQLite

pub mod models;
pub mod store;

pub use models::{CredentialRecord, CredentialSummary, CURRENT_SCHEMA_VERSION};
pub use store::CredentialRegistry;
