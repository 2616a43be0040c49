//! Boot-disk snapshot management
//!
//! Snapshots are created once per base instance under a deterministic
//! name, then reused as an immutable clone template. Skyhop never
//! deletes them.

use crate::error::{CloudError, Result};
use crate::policy::PollingPolicy;
use crate::provider::ComputeApi;
use crate::reconcile::ensure;
use crate::resource::SnapshotRef;

pub const DEFAULT_SNAPSHOT_PREFIX: &str = "base-snapshot";

/// Deterministic snapshot name for a base instance.
pub fn snapshot_name(prefix: &str, base_instance: &str) -> String {
    format!("{prefix}-{base_instance}")
}

/// Ensure a snapshot of `base_instance`'s boot disk exists and is
/// fully created before returning.
///
/// The base instance must already exist: its absence is fatal here,
/// not a trigger to create one. Clone creation must not start until
/// this returns.
pub async fn ensure_boot_disk_snapshot<C>(
    api: &C,
    zone: &str,
    base_instance: &str,
    prefix: &str,
    policy: &PollingPolicy,
) -> Result<SnapshotRef>
where
    C: ComputeApi + ?Sized,
{
    let instance = api
        .get_instance(zone, base_instance)
        .await?
        .ok_or_else(|| {
            CloudError::ResourceNotFound(format!("instance '{base_instance}' in zone {zone}"))
        })?;

    let disk = instance
        .boot_disk_name()
        .ok_or_else(|| {
            CloudError::ResourceNotFound(format!("boot disk on instance '{base_instance}'"))
        })?
        .to_string();

    let name = snapshot_name(prefix, base_instance);
    ensure(
        api,
        &format!("snapshot '{name}' of disk '{disk}'"),
        api.get_snapshot(&name),
        || api.create_snapshot(zone, &disk, &name),
        policy,
    )
    .await?;

    Ok(SnapshotRef {
        name,
        source_disk: disk,
    })
}
