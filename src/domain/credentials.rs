//! Client credential sets inserted into tunnel-server templates.

use rand::RngCore;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::AppError;

/// Requested size of a credential set plus any values the operator typed in.
///
/// Slots beyond `supplied`, and blank supplied slots, are generated.
/// Supplied values past `count` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialRequest {
    pub count: usize,
    pub supplied: Vec<String>,
}

impl CredentialRequest {
    pub fn new(count: usize) -> Self {
        Self { count, supplied: Vec::new() }
    }

    pub fn with_supplied(count: usize, supplied: Vec<String>) -> Self {
        Self { count, supplied }
    }

    fn slot(&self, index: usize) -> Option<&str> {
        self.supplied.get(index).map(|s| s.trim()).filter(|s| !s.is_empty())
    }

    fn ensure_count(&self, what: &str) -> Result<(), AppError> {
        if self.count == 0 {
            return Err(AppError::InvalidCount { what: what.to_string(), value: self.count });
        }
        Ok(())
    }
}

/// A tunnel client identifier with an optional flow tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientCredential {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    #[serde(skip)]
    pub generated: bool,
}

/// A username/password pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCredential {
    pub username: String,
    pub password: String,
    #[serde(skip)]
    pub generated: bool,
}

/// Client identifiers for one tunnel transport.
pub type ClientIdSet = ClientCredentialSet<ClientCredential>;
/// Username/password pairs for one tunnel transport.
pub type UserPassSet = ClientCredentialSet<UserCredential>;

/// Ordered, non-empty set of credentials for one transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentialSet<T> {
    label: String,
    entries: Vec<T>,
}

impl<T: Serialize> ClientCredentialSet<T> {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON array for direct insertion into a render context.
    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(&self.entries)?)
    }
}

impl ClientCredentialSet<ClientCredential> {
    /// Build client identifiers, generating UUID v4 values for blank slots.
    pub fn clients(
        label: impl Into<String>,
        request: &CredentialRequest,
        flow: Option<&str>,
    ) -> Result<Self, AppError> {
        let label = label.into();
        request.ensure_count(&label)?;
        let entries = (0..request.count)
            .map(|index| {
                let (id, generated) = match request.slot(index) {
                    Some(id) => (id.to_string(), false),
                    None => (generate_uuid(), true),
                };
                ClientCredential { id, flow: flow.map(str::to_string), generated }
            })
            .collect();
        Ok(Self { label, entries })
    }
}

impl ClientCredentialSet<UserCredential> {
    /// Build username/password pairs. Blank usernames become `user<N>`;
    /// blank passwords become `password_bytes` random bytes in hex.
    pub fn users(
        label: impl Into<String>,
        usernames: &CredentialRequest,
        passwords: &[String],
        password_bytes: usize,
    ) -> Result<Self, AppError> {
        let label = label.into();
        usernames.ensure_count(&label)?;
        let entries = (0..usernames.count)
            .map(|index| {
                let username = usernames
                    .slot(index)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("user{}", index + 1));
                let supplied = passwords.get(index).map(|p| p.trim()).filter(|p| !p.is_empty());
                let (password, generated) = match supplied {
                    Some(password) => (password.to_string(), false),
                    None => (random_hex(password_bytes), true),
                };
                UserCredential { username, password, generated }
            })
            .collect();
        Ok(Self { label, entries })
    }

    /// `{"user": "password"}` object for configs keyed by username.
    pub fn to_json_map(&self) -> Result<String, AppError> {
        let map: serde_json::Map<String, serde_json::Value> = self
            .entries
            .iter()
            .map(|u| (u.username.clone(), serde_json::Value::String(u.password.clone())))
            .collect();
        Ok(serde_json::to_string(&map)?)
    }
}

pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// `bytes` bytes from the thread-local CSPRNG, hex encoded.
pub fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::rng().fill_bytes(&mut buf);
    hex::encode(buf)
}
