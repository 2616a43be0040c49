//! Snapshot-based fleet cloning

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::policy::PollingPolicy;
use crate::provider::ComputeApi;
use crate::provision::provision_instance;
use crate::resource::{InstanceSpec, SnapshotRef};

/// Creation latency of one clone, consumed by the report writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingRecord {
    pub instance: String,
    pub elapsed: Duration,
}

/// Options for cloning a fleet from one snapshot.
#[derive(Debug, Clone)]
pub struct FleetSpec {
    /// Base name the clone names derive from.
    pub base_name: String,
    pub count: u32,
    pub machine_type: String,
    /// Network tags applied to every clone (e.g. the firewall tag that
    /// keeps them reachable on the service port).
    pub tags: Vec<String>,
}

/// Deterministic name of the `index`-th clone (1-based).
pub fn clone_name(base_name: &str, index: u32) -> String {
    format!("{base_name}-clone-{index}")
}

/// Provision `count` clones of one fully-created snapshot, one at a
/// time, recording per-instance creation latency.
///
/// Clones are independent; the sequence only fixes their names.
/// Pre-existing clones are skipped and recorded with zero latency.
pub async fn clone_fleet<C>(
    api: &C,
    zone: &str,
    snapshot: &SnapshotRef,
    fleet: &FleetSpec,
    policy: &PollingPolicy,
) -> Result<Vec<TimingRecord>>
where
    C: ComputeApi + ?Sized,
{
    let mut records = Vec::with_capacity(fleet.count as usize);

    for index in 1..=fleet.count {
        let name = clone_name(&fleet.base_name, index);
        let spec = InstanceSpec::builder(&name, &fleet.machine_type)
            .snapshot(snapshot.clone())
            .tags(fleet.tags.iter().cloned())
            .build()?;

        let elapsed = provision_instance(api, zone, &spec, policy).await?;
        records.push(TimingRecord {
            instance: name,
            elapsed,
        });
    }

    Ok(records)
}
