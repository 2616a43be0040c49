//! Instance provisioning

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::ops;
use crate::policy::PollingPolicy;
use crate::provider::ComputeApi;
use crate::resource::InstanceSpec;

/// Bring one instance into existence, idempotently.
///
/// Returns the wall-clock latency from insert to operation `DONE`, or
/// [`Duration::ZERO`] when the instance already existed. On success
/// the instance exists in the provider inventory; reachability is a
/// separate concern, see [`crate::readiness`].
///
/// When the spec boots from a snapshot the snapshot must already be
/// fully created; handing in a snapshot that is still being taken is a
/// caller error and surfaces as a provider-side operation failure.
pub async fn provision_instance<C>(
    api: &C,
    zone: &str,
    spec: &InstanceSpec,
    policy: &PollingPolicy,
) -> Result<Duration>
where
    C: ComputeApi + ?Sized,
{
    if api.get_instance(zone, &spec.name).await?.is_some() {
        tracing::info!(instance = %spec.name, "instance already exists, skipping create");
        return Ok(Duration::ZERO);
    }

    tracing::info!(
        instance = %spec.name,
        machine_type = %spec.machine_type,
        zone,
        "creating instance"
    );
    let started = Instant::now();
    let op = api.insert_instance(zone, spec).await?;
    ops::await_completion(api, &op, policy).await?;
    let elapsed = started.elapsed();

    tracing::info!(
        instance = %spec.name,
        elapsed_secs = elapsed.as_secs_f64(),
        "instance created"
    );
    Ok(elapsed)
}
