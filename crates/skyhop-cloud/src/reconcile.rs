//! Exists-or-create reconciliation
//!
//! The central correctness property of every skyhop command: re-running
//! provisioning never errors on "already exists" and never creates
//! duplicates.

use std::future::Future;

use crate::error::Result;
use crate::ops::{self, OperationRef};
use crate::policy::PollingPolicy;
use crate::provider::ComputeApi;

/// Outcome of a reconcile pass over one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensured {
    /// The resource was created and its operation awaited to completion.
    Created,
    /// The resource already existed; no side effects.
    Existing,
}

/// Converge one named resource: point lookup first, create only on a
/// not-found answer, then await the creation operation.
///
/// A lookup failure other than not-found propagates unchanged; it is
/// never treated as absence. The lookup racing a concurrent external
/// creation of the same name is accepted, with last-creator-wins
/// semantics imposed by the provider.
pub async fn ensure<C, T, L, CF, CFut>(
    api: &C,
    what: &str,
    lookup: L,
    create: CF,
    policy: &PollingPolicy,
) -> Result<Ensured>
where
    C: ComputeApi + ?Sized,
    L: Future<Output = Result<Option<T>>>,
    CF: FnOnce() -> CFut,
    CFut: Future<Output = Result<OperationRef>>,
{
    if lookup.await?.is_some() {
        tracing::debug!("{what} already exists, skipping create");
        return Ok(Ensured::Existing);
    }

    tracing::info!("creating {what}");
    let op = create().await?;
    ops::await_completion(api, &op, policy).await?;
    tracing::info!("{what} created");
    Ok(Ensured::Created)
}
