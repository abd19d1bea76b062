//! Environment-backed credential pool.
//!
//! Slot `n` reads `<PREFIX>_<n>`. Slot 0 additionally accepts the bare
//! `<PREFIX>` variable, kept for single-token deployments.

use std::collections::HashMap;

use crate::credentials::{Credential, CredentialError, CredentialSource, Slot};

/// Credential pool snapshotted from environment variables.
#[derive(Clone)]
pub struct EnvCredentialSource {
    prefix: String,
    vars: HashMap<String, String>,
}

impl EnvCredentialSource {
    /// Snapshot the process environment.
    pub fn from_env(prefix: &str) -> Self {
        Self::from_vars(prefix, std::env::vars())
    }

    /// Build from an explicit set of variables. Only names starting with
    /// `prefix` are retained; empty values count as unset.
    pub fn from_vars<I, K, V>(prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, v)| k.starts_with(prefix) && !v.is_empty())
            .collect();

        Self {
            prefix: prefix.to_string(),
            vars,
        }
    }

    /// Count of usable slots, probing from slot 0 until the first gap.
    pub fn pool_size(&self) -> usize {
        let mut slot = Slot::FIRST;
        let mut size = 0;
        while self.lookup(slot).is_some() {
            size += 1;
            slot = match slot.next() {
                Ok(next) => next,
                Err(_) => break,
            };
        }
        size
    }

    fn slot_var(&self, slot: Slot) -> String {
        format!("{}_{}", self.prefix, slot)
    }

    /// Returns the variable name that supplied the secret, and the secret.
    fn lookup(&self, slot: Slot) -> Option<(String, &str)> {
        let name = self.slot_var(slot);
        if let Some(secret) = self.vars.get(&name) {
            return Some((name, secret.as_str()));
        }
        if slot == Slot::FIRST {
            if let Some(secret) = self.vars.get(&self.prefix) {
                return Some((self.prefix.clone(), secret.as_str()));
            }
        }
        None
    }
}

impl CredentialSource for EnvCredentialSource {
    fn credential(&self, slot: Slot) -> Result<Credential, CredentialError> {
        match self.lookup(slot) {
            Some((source, secret)) => {
                tracing::debug!(slot = %slot, source = %source, "Using token source");
                Ok(Credential::new(slot, secret))
            }
            None => Err(CredentialError::Exhausted {
                pool: self.prefix.clone(),
                slot,
            }),
        }
    }
}

impl std::fmt::Debug for EnvCredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.vars.keys().collect();
        names.sort();
        f.debug_struct("EnvCredentialSource")
            .field("prefix", &self.prefix)
            .field("variables", &names)
            .finish()
    }
}
