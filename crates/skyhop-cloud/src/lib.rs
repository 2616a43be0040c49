//! Skyhop Cloud Orchestration
//!
//! This crate provides the compute provider abstraction for skyhop and
//! the orchestration logic built on top of it: idempotent reconcile-or-create
//! for firewalls, instances and snapshots, asynchronous operation polling,
//! bounded readiness waits, metadata relay for chained provisioning, and
//! snapshot-based fleet cloning.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  Skyhop CLI                      │
//! │              (skyhop up/clone/relay)             │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               skyhop-cloud                       │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │        Provider Abstraction               │   │
//! │  │  trait ComputeApi { ... }                 │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │  Reconciler  │  │  Op Poller   │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────────────────────┬─────────────────────────┘
//!                         │
//!                 ┌───────▼───────┐
//!                 │  gce provider │
//!                 │ (compute/v1)  │
//!                 └───────────────┘
//! ```
//!
//! Everything here is generic over [`ComputeApi`], so the whole
//! orchestration path runs against an in-process fake in tests.

pub mod error;
pub mod fleet;
pub mod firewall;
pub mod ops;
pub mod policy;
pub mod provider;
pub mod provision;
pub mod readiness;
pub mod reconcile;
pub mod relay;
pub mod resource;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod testutil;

// Re-exports
pub use error::{CloudError, Result};
pub use fleet::{FleetSpec, TimingRecord, clone_fleet, clone_name};
pub use firewall::{FirewallRule, ensure_firewall};
pub use ops::{Operation, OperationRef, OperationScope, OperationStatus, await_completion};
pub use policy::PollingPolicy;
pub use provider::ComputeApi;
pub use provision::provision_instance;
pub use readiness::wait_for_external_address;
pub use reconcile::{Ensured, ensure};
pub use relay::{METADATA_CEILING_BYTES, RelayBundle};
pub use resource::{
    AccessConfig, AttachedDisk, BootSource, Firewall, ImageRef, Instance, InstanceSpec,
    InstanceSpecBuilder, MetadataEntry, NetworkInterface, Snapshot, SnapshotRef,
};
pub use snapshot::{DEFAULT_SNAPSHOT_PREFIX, ensure_boot_disk_snapshot, snapshot_name};
