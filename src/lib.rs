//! # Noma (client-side accounts)
//!
//! `noma` models the account logic of a small public/admin web site that keeps
//! its users in browser storage. Everything runs against a key/value
//! [`storage::Storage`] that behaves like `localStorage`.
//!
//! ## Directory
//!
//! Users live as one JSON array under the `user_noma` key. On first access the
//! array is migrated from older key names and seeded with two demo accounts
//! (`admin` / `admin1`, `cliente` / `cliente1`). Registration only appends.
//!
//! **Passwords are stored and compared in plaintext.** This is legacy behavior
//! of the site, not a recommendation; nothing here is real authentication.
//!
//! ## Flows
//!
//! The register, login and admin-login forms each run a small state machine
//! (`Idle -> Submitting -> Success | Rejected -> Idle`) with simulated latency,
//! user-facing notices and a role-dependent redirect.
//!
//! ## Logout
//!
//! Logout clears the session keys from both stores, optionally notifies a
//! server endpoint, and then probes candidate login pages to find one that
//! answers.

pub mod cli;
pub mod directory;
pub mod error;
pub mod flow;
pub mod prober;
pub mod session;
pub mod storage;
pub mod widgets;

pub use error::Error;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
