//! Credential types and error definitions.

use std::fmt;
use thiserror::Error;

use crate::credentials::CredentialSource;

/// Position of a credential in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(usize);

impl Slot {
    /// The first slot; the only one allowed to fall back to a default credential.
    pub const FIRST: Slot = Slot(0);

    pub fn index(self) -> usize {
        self.0
    }

    /// The slot tried after this one.
    pub fn next(self) -> Result<Slot, CredentialError> {
        self.0
            .checked_add(1)
            .map(Slot)
            .ok_or_else(|| CredentialError::InvalidSlot(self.0.to_string()))
    }
}

impl From<usize> for Slot {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl TryFrom<i64> for Slot {
    type Error = CredentialError;

    fn try_from(index: i64) -> Result<Self, Self::Error> {
        usize::try_from(index)
            .map(Slot)
            .map_err(|_| CredentialError::InvalidSlot(index.to_string()))
    }
}

impl std::str::FromStr for Slot {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .map(Slot)
            .map_err(|_| CredentialError::InvalidSlot(s.to_string()))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An API secret bound to the slot it was read from.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    slot: Slot,
    secret: String,
}

impl Credential {
    pub fn new(slot: Slot, secret: impl Into<String>) -> Self {
        Self {
            slot,
            secret: secret.into(),
        }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// The raw secret, for building an `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("slot", &self.slot)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Errors raised when looking up a credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Slot is not a non-negative integer.
    #[error("Token index must be a non-negative integer, got '{0}'")]
    InvalidSlot(String),

    /// No credential left at this slot.
    #[error("No more {pool} can be used (Index: {slot})")]
    Exhausted { pool: String, slot: Slot },
}

/// A fixed, in-memory pool. Slot `n` maps to the `n`th secret.
#[derive(Debug, Clone)]
pub struct StaticCredentialSource {
    name: String,
    secrets: Vec<String>,
}

impl StaticCredentialSource {
    pub fn new<I, S>(name: impl Into<String>, secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            secrets: secrets.into_iter().map(Into::into).collect(),
        }
    }
}

impl CredentialSource for StaticCredentialSource {
    fn credential(&self, slot: Slot) -> Result<Credential, CredentialError> {
        match self.secrets.get(slot.index()) {
            Some(secret) => Ok(Credential::new(slot, secret.clone())),
            None => Err(CredentialError::Exhausted {
                pool: self.name.clone(),
                slot,
            }),
        }
    }
}
