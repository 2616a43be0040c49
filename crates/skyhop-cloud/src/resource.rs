//! Desired- and observed-state models for compute resources

use serde::{Deserialize, Serialize};

use crate::error::{CloudError, Result};

/// A resolved source image, referenced by its full self link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub self_link: String,
}

/// An immutable boot-disk snapshot, reusable as a clone template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRef {
    pub name: String,

    /// Name of the disk the snapshot was taken from.
    pub source_disk: String,
}

/// Origin of an instance's boot disk content. Exactly one of the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BootSource {
    Image(ImageRef),
    Snapshot(SnapshotRef),
}

/// One key/value pair of instance metadata, delivered verbatim to the
/// guest-side fetch endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
}

/// Desired state of one instance. Constructed through
/// [`InstanceSpec::builder`] and never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceSpec {
    pub name: String,
    pub machine_type: String,
    pub boot_source: BootSource,
    pub tags: Vec<String>,
    pub metadata: Vec<MetadataEntry>,
}

impl InstanceSpec {
    pub fn builder(name: impl Into<String>, machine_type: impl Into<String>) -> InstanceSpecBuilder {
        InstanceSpecBuilder {
            name: name.into(),
            machine_type: machine_type.into(),
            image: None,
            snapshot: None,
            tags: Vec::new(),
            metadata: Vec::new(),
        }
    }
}

/// Builder for [`InstanceSpec`]. Enforces the boot-source choice before
/// any remote call is made.
#[derive(Debug, Clone)]
pub struct InstanceSpecBuilder {
    name: String,
    machine_type: String,
    image: Option<ImageRef>,
    snapshot: Option<SnapshotRef>,
    tags: Vec<String>,
    metadata: Vec<MetadataEntry>,
}

impl InstanceSpecBuilder {
    /// Boot from a base image.
    pub fn image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    /// Boot from a previously completed snapshot.
    pub fn snapshot(mut self, snapshot: SnapshotRef) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Add a network tag (e.g. a firewall target tag).
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Attach one metadata entry. The value is opaque to skyhop.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push(MetadataEntry {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn build(self) -> Result<InstanceSpec> {
        let boot_source = match (self.image, self.snapshot) {
            (Some(image), None) => BootSource::Image(image),
            (None, Some(snapshot)) => BootSource::Snapshot(snapshot),
            (Some(_), Some(_)) => {
                return Err(CloudError::InvalidSpec(format!(
                    "instance '{}' has both an image and a snapshot boot source",
                    self.name
                )));
            }
            (None, None) => {
                return Err(CloudError::InvalidSpec(format!(
                    "instance '{}' has no boot source",
                    self.name
                )));
            }
        };

        Ok(InstanceSpec {
            name: self.name,
            machine_type: self.machine_type,
            boot_source,
            tags: self.tags,
            metadata: self.metadata,
        })
    }
}

/// Observed firewall rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Firewall {
    pub name: String,
}

/// Observed snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub name: String,
    pub status: Option<String>,
}

/// Observed instance, reduced to the fields the orchestration consults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    pub status: Option<String>,
    pub disks: Vec<AttachedDisk>,
    pub network_interfaces: Vec<NetworkInterface>,
}

impl Instance {
    /// First NIC's first access-config NAT address, if assigned yet.
    pub fn external_ip(&self) -> Option<&str> {
        self.network_interfaces
            .first()?
            .access_configs
            .first()?
            .nat_ip
            .as_deref()
    }

    /// Name of the boot disk, taken from the last path segment of its
    /// `source` link.
    pub fn boot_disk_name(&self) -> Option<&str> {
        self.disks
            .iter()
            .find(|d| d.boot)
            .and_then(|d| d.source.rsplit('/').next())
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttachedDisk {
    pub boot: bool,

    /// Full source link of the disk, e.g. `.../zones/us-west1-b/disks/base-disk`.
    pub source: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub access_configs: Vec<AccessConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessConfig {
    pub nat_ip: Option<String>,
}
