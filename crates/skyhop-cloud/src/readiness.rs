//! External reachability wait

use tokio::time::sleep;

use crate::error::{CloudError, Result};
use crate::policy::PollingPolicy;
use crate::provider::ComputeApi;

/// Attempt ceiling used when the policy does not set one. 80 × 2s ≈ 160s.
const DEFAULT_MAX_ATTEMPTS: u32 = 80;

/// Poll the instance until it exposes an external NAT address.
///
/// An absent instance description and an unassigned address are both
/// "not yet", never errors. Exhausting the attempt budget fails with
/// [`CloudError::Timeout`], deliberately distinct from
/// [`CloudError::OperationFailed`]: the create operation succeeded but
/// the resource never became reachable. The caller decides whether
/// that aborts the whole run.
pub async fn wait_for_external_address<C>(
    api: &C,
    zone: &str,
    name: &str,
    policy: &PollingPolicy,
) -> Result<String>
where
    C: ComputeApi + ?Sized,
{
    let max_attempts = policy.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);

    for attempt in 1..=max_attempts {
        if let Some(instance) = api.get_instance(zone, name).await? {
            if let Some(address) = instance.external_ip() {
                tracing::info!(instance = name, address, attempt, "external address assigned");
                return Ok(address.to_string());
            }
        }

        tracing::trace!(instance = name, attempt, "no external address yet");
        if attempt < max_attempts {
            sleep(policy.interval).await;
        }
    }

    Err(CloudError::Timeout {
        what: format!("external address of instance '{name}'"),
        attempts: max_attempts,
    })
}
