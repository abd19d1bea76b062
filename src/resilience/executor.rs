//! Credential-rotating request execution.
//!
//! # Responsibilities
//! - Run an upstream operation with the first credential in the pool
//! - Rotate to the next credential when the upstream rejects the current one
//! - Stop on success, on a terminal failure, or when the pool runs out
//!
//! # Design Decisions
//! - Attempts are strictly sequential; an earlier success short-circuits
//! - No attempt cap besides the pool size, and no backoff between attempts
//! - Auth rejections never escape: they become a retry or `Exhausted`

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use crate::credentials::{Credential, CredentialError, CredentialSource, Slot};
use crate::observability::metrics;
use crate::resilience::classifier::{classify, Classification, ResponseStatus};

/// Terminal outcome of an execution.
#[derive(Debug, Error)]
pub enum ExecuteError<E> {
    /// The pool was empty, exhausted, or addressed with an invalid slot.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// The operation failed for a reason unrelated to the credential.
    #[error("{0}")]
    Terminal(E),
}

/// Drives an operation across the credential pool.
#[derive(Clone)]
pub struct RequestExecutor {
    credentials: Arc<dyn CredentialSource>,
}

impl RequestExecutor {
    pub fn new(credentials: Arc<dyn CredentialSource>) -> Self {
        Self { credentials }
    }

    /// Run `producer` until it succeeds or fails terminally.
    ///
    /// The producer is called once per attempt with the credential for the
    /// current slot, starting at slot 0. Failures classified as
    /// [`Classification::RetryableAuth`] move on to the next slot; the
    /// lookup failure for the slot after the last one ends the loop.
    pub async fn execute<T, E, F, Fut>(&self, mut producer: F) -> Result<T, ExecuteError<E>>
    where
        F: FnMut(Credential) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: ResponseStatus + fmt::Display,
    {
        let mut credential = self.credentials.credential(Slot::FIRST)?;

        loop {
            let slot = credential.slot();
            let err = match producer(credential).await {
                Ok(artifact) => return Ok(artifact),
                Err(err) => err,
            };

            tracing::warn!(slot = %slot, error = %err, "Upstream attempt failed");

            match classify(&err) {
                Classification::Terminal => return Err(ExecuteError::Terminal(err)),
                Classification::RetryableAuth => {
                    let next = slot.next()?;
                    credential = self.credentials.credential(next)?;
                    metrics::record_credential_rotation(next.index());
                    tracing::info!(from = %slot, to = %next, "Rotating credential");
                }
            }
        }
    }
}

impl fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor").finish_non_exhaustive()
    }
}
