//! Mock user directory kept as one JSON array in a key/value store.
//!
//! Flow Overview:
//! 1) `prepare` migrates the array from legacy key names and seeds demo users.
//! 2) `register` validates, rejects duplicates by normalized email, appends.
//! 3) `authenticate` / `authenticate_admin` do a linear plaintext match.
//!
//! Uniqueness is only checked at register time. Two processes writing the same
//! store can still race and store a duplicate.

pub mod validate;

use crate::{
    error::Error,
    storage::{Storage, StorageError},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{error, info, warn};

pub use self::validate::{normalize_email, valid_email_or_username};

pub const STORAGE_KEY: &str = "user_noma";
pub const LEGACY_KEYS: [&str; 2] = ["users_goloe", "comunired_users_v1"];

// Hardcoded admin pair accepted by the admin form even with an empty
// directory. This is a security defect kept for compatibility; see
// `Directory::without_legacy_admin_bypass`.
const LEGACY_ADMIN_USER: &str = "admin";
const LEGACY_ADMIN_PASSWORD: &str = "admin1";

const MSG_MISSING_FIELDS: &str = "Completa todos los campos.";
const MSG_INVALID_EMAIL: &str = "Ingresa un email o nombre de usuario válido.";
const MSG_BAD_CREDENTIALS: &str = "Email/usuario o contraseña incorrectos.";
const MSG_BAD_ADMIN_CREDENTIALS: &str = "Credenciales de admin incorrectas.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Client,
}

// Anything other than exactly "admin" (including a missing or null role) is a
// client, so older records with roles like "user" stay usable.
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let role = Option::<String>::deserialize(deserializer)?;
        Ok(match role.as_deref() {
            Some("admin") => Self::Admin,
            _ => Self::Client,
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Client => write!(f, "client"),
        }
    }
}

/// One account. `email` is the unique key and may be a bare username.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// The two accounts written into an empty directory, in this order.
#[must_use]
pub fn demo_users() -> Vec<User> {
    vec![
        User {
            name: "Admin".to_string(),
            email: "admin".to_string(),
            password: "admin1".to_string(),
            role: Role::Admin,
        },
        User {
            name: "Cliente".to_string(),
            email: "cliente".to_string(),
            password: "cliente1".to_string(),
            role: Role::Client,
        },
    ]
}

/// Persistence seam for the directory.
pub trait UserRepository {
    /// All users in stored order. Unreadable data yields an empty list.
    fn load(&self) -> Vec<User>;

    /// Replace the stored list.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn save(&self, users: &[User]) -> Result<(), StorageError>;

    /// Append one user and persist.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn append(&self, user: User) -> Result<(), StorageError> {
        let mut users = self.load();
        users.push(user);
        self.save(&users)
    }

    /// First user whose email equals `email` exactly.
    fn find_by_key(&self, email: &str) -> Option<User> {
        self.load().into_iter().find(|user| user.email == email)
    }
}

/// [`UserRepository`] over any [`Storage`], one JSON array under one key.
#[derive(Debug)]
pub struct StorageDirectory<S> {
    storage: S,
    key: String,
}

impl<S: Storage> StorageDirectory<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stored records as raw JSON. Absent or empty is an empty list; anything
    /// that is not a JSON array is an error.
    fn records(&self) -> Result<Vec<Value>, StorageError> {
        match present(self.storage.get_item(&self.key)?) {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Copy the first non-empty legacy value into the current key, unless the
    /// current key already holds a value. Returns the key migrated from.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub fn migrate_legacy(&self, old_keys: &[&str]) -> Result<Option<String>, StorageError> {
        if present(self.storage.get_item(&self.key)?).is_some() {
            return Ok(None);
        }

        for old_key in old_keys {
            if let Some(raw) = present(self.storage.get_item(old_key)?) {
                self.storage.set_item(&self.key, &raw)?;
                info!("migrated directory from \"{old_key}\" to \"{}\"", self.key);
                return Ok(Some((*old_key).to_string()));
            }
        }

        Ok(None)
    }

    /// Write the demo users when the directory holds no records.
    ///
    /// A stored value that cannot be read as an array is left untouched.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read, holds an unreadable
    /// value, or cannot be written.
    pub fn seed_if_empty(&self) -> Result<bool, StorageError> {
        if !self.records()?.is_empty() {
            return Ok(false);
        }

        let demo = demo_users();
        self.save(&demo)?;
        info!(
            "demo users created under key {}: {:?}",
            self.key,
            demo.iter().map(|u| u.email.as_str()).collect::<Vec<_>>()
        );

        Ok(true)
    }

    /// Page-load preparation: legacy migration followed by seeding.
    ///
    /// Failures are logged and otherwise ignored; the directory stays usable.
    pub fn prepare(&self) {
        if let Err(e) = self.migrate_legacy(&LEGACY_KEYS) {
            error!("Error migrating storage: {e}");
        }
        if let Err(e) = self.seed_if_empty() {
            error!("Error seeding demo users: {e}");
        }
    }
}

impl<S: Storage> UserRepository for StorageDirectory<S> {
    fn load(&self) -> Vec<User> {
        let records = self.records().unwrap_or_else(|e| {
            warn!("Error reading users: {e}");
            Vec::new()
        });

        records
            .into_iter()
            .filter_map(|record| {
                serde_json::from_value(record)
                    .map_err(|e| warn!("Skipping unreadable user record: {e}"))
                    .ok()
            })
            .collect()
    }

    fn save(&self, users: &[User]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(users)?;
        self.storage.set_item(&self.key, &raw)
    }

    /// Appends to the raw array, so records `load` skips are kept as stored.
    fn append(&self, user: User) -> Result<(), StorageError> {
        let mut records = self.records()?;
        records.push(serde_json::to_value(user)?);
        let raw = serde_json::to_string(&records)?;
        self.storage.set_item(&self.key, &raw)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Register/authenticate operations over a [`UserRepository`].
#[derive(Debug)]
pub struct Directory<R> {
    repo: R,
    legacy_admin_bypass: bool,
}

impl<R: UserRepository> Directory<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            legacy_admin_bypass: true,
        }
    }

    /// Refuse the hardcoded `admin` / `admin1` pair unless it is a real
    /// directory record.
    #[must_use]
    pub fn without_legacy_admin_bypass(mut self) -> Self {
        self.legacy_admin_bypass = false;
        self
    }

    #[must_use]
    pub fn legacy_admin_bypass(&self) -> bool {
        self.legacy_admin_bypass
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.repo.load()
    }

    /// Validate and append a new client account.
    ///
    /// # Errors
    /// `Error::Validation` for empty fields or a malformed email,
    /// `Error::Duplicate` if the normalized email exists,
    /// `Error::Storage` if the directory cannot be written.
    pub fn register(&self, name: &str, email: &str, password: &SecretString) -> Result<User, Error> {
        let name = name.trim();
        let email = normalize_email(email);
        let password = password.expose_secret();

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(Error::Validation(MSG_MISSING_FIELDS.to_string()));
        }
        if !valid_email_or_username(&email) {
            return Err(Error::Validation(MSG_INVALID_EMAIL.to_string()));
        }
        if self.repo.find_by_key(&email).is_some() {
            return Err(Error::Duplicate(email));
        }

        let user = User {
            name: name.to_string(),
            email,
            password: password.to_string(),
            role: Role::Client,
        };
        self.repo.append(user.clone())?;

        info!("registered user {}", user.email);

        Ok(user)
    }

    /// First record whose normalized email and password match exactly.
    ///
    /// # Errors
    /// `Error::Auth` when nothing matches.
    pub fn authenticate(&self, email: &str, password: &SecretString) -> Result<User, Error> {
        let email = normalize_email(email);
        let password = password.expose_secret();

        self.repo
            .load()
            .into_iter()
            .find(|user| user.email == email && user.password == password)
            .ok_or_else(|| Error::Auth(MSG_BAD_CREDENTIALS.to_string()))
    }

    /// Admin sign-in: an admin record matched by email or by lowercased name,
    /// or the legacy hardcoded pair when the bypass is enabled.
    ///
    /// # Errors
    /// `Error::Auth` when neither matches.
    pub fn authenticate_admin(&self, user: &str, password: &SecretString) -> Result<User, Error> {
        let user = normalize_email(user);
        let password = password.expose_secret();

        let found = self.repo.load().into_iter().find(|record| {
            (record.email == user || (!record.name.is_empty() && record.name.to_lowercase() == user))
                && record.password == password
                && record.role == Role::Admin
        });
        if let Some(found) = found {
            return Ok(found);
        }

        if self.legacy_admin_bypass && user == LEGACY_ADMIN_USER && password == LEGACY_ADMIN_PASSWORD
        {
            warn!("admin signed in through the hardcoded legacy credentials");
            return Ok(User {
                name: "Admin".to_string(),
                email: LEGACY_ADMIN_USER.to_string(),
                password: String::new(),
                role: Role::Admin,
            });
        }

        Err(Error::Auth(MSG_BAD_ADMIN_CREDENTIALS.to_string()))
    }
}
