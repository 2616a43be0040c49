//! Compute provider trait definition

use async_trait::async_trait;

use crate::error::Result;
use crate::firewall::FirewallRule;
use crate::ops::{Operation, OperationRef};
use crate::resource::{Firewall, ImageRef, Instance, InstanceSpec, Snapshot};

/// Remote compute provider surface.
///
/// This is the whole dependency of the orchestration core: point
/// lookups, inserts returning operation handles, image-family
/// resolution and operation-status lookup. Authentication and
/// transport are the implementation's concern.
///
/// Point lookups answer "absent" as `Ok(None)`; only genuine failures
/// (auth, permission, malformed name) are errors. The provider owns
/// resource-name uniqueness; skyhop never assumes it is the only
/// writer.
#[async_trait]
pub trait ComputeApi: Send + Sync {
    async fn get_firewall(&self, name: &str) -> Result<Option<Firewall>>;

    async fn insert_firewall(&self, rule: &FirewallRule) -> Result<OperationRef>;

    async fn get_instance(&self, zone: &str, name: &str) -> Result<Option<Instance>>;

    async fn insert_instance(&self, zone: &str, spec: &InstanceSpec) -> Result<OperationRef>;

    async fn get_snapshot(&self, name: &str) -> Result<Option<Snapshot>>;

    /// Snapshot a zonal disk. The returned operation must be fully
    /// awaited before the snapshot is used as a boot source.
    async fn create_snapshot(&self, zone: &str, disk: &str, name: &str) -> Result<OperationRef>;

    /// Resolve the newest image of a family in `image_project`.
    async fn image_from_family(&self, image_project: &str, family: &str) -> Result<ImageRef>;

    /// Fetch current operation state, routed by the ref's scope.
    async fn get_operation(&self, op: &OperationRef) -> Result<Operation>;
}
