//! Metadata relay for chained provisioning
//!
//! The orchestrator often has no network path to the machines it wants
//! a fresh VM to create. The relay packages everything the first-hop
//! VM needs (its own boot script, credential material, the payload it
//! executes, the boot script it hands on, and plain parameters) as
//! instance metadata. The VM's boot sequence fetches each key from the
//! per-instance metadata endpoint, writes the value verbatim to a
//! local file, and re-enters the same provisioning path with the
//! relayed credentials to create the second hop.
//!
//! From the orchestrator's side this is fire-and-forget: once the
//! first hop's create operation is `DONE`, control returns. The second
//! hop's creation is neither observed nor awaited.

use crate::resource::{InstanceSpecBuilder, MetadataEntry};

/// Metadata attribute keys the relayed guest fetches at boot. Part of
/// the guest-side contract; renaming one breaks boot scripts in the
/// field.
pub mod keys {
    /// The first-hop VM's own boot script, run by the guest OS.
    pub const STARTUP_SCRIPT: &str = "startup-script";
    /// Provisioning payload the first hop executes to create the next hop.
    pub const LAUNCH_CODE: &str = "launch-code";
    /// Boot script handed on to the second-hop VM.
    pub const RELAY_STARTUP_SCRIPT: &str = "relay-startup-script";
    /// Credential material for the first hop's own provider session.
    pub const SERVICE_CREDENTIALS: &str = "service-credentials";
    /// Project identifier the first hop provisions into.
    pub const PROJECT: &str = "project";
}

/// Provider-imposed ceiling on total instance metadata, in bytes.
pub const METADATA_CEILING_BYTES: usize = 512 * 1024;

/// Complete payload set for one relay hop.
///
/// Every key the guest-side boot logic expects is a required field, so
/// a bundle missing one cannot be constructed, let alone submitted.
/// Values are opaque byte-for-byte blobs; skyhop never parses them.
#[derive(Debug, Clone)]
pub struct RelayBundle {
    pub startup_script: String,
    pub launch_code: String,
    pub relay_startup_script: String,
    pub service_credentials: String,
    pub project: String,
}

impl RelayBundle {
    /// The bundle as metadata entries, values verbatim.
    pub fn metadata(&self) -> Vec<MetadataEntry> {
        [
            (keys::STARTUP_SCRIPT, &self.startup_script),
            (keys::LAUNCH_CODE, &self.launch_code),
            (keys::RELAY_STARTUP_SCRIPT, &self.relay_startup_script),
            (keys::SERVICE_CREDENTIALS, &self.service_credentials),
            (keys::PROJECT, &self.project),
        ]
        .into_iter()
        .map(|(key, value)| MetadataEntry {
            key: key.to_string(),
            value: value.clone(),
        })
        .collect()
    }

    /// Total payload size counted the way the provider does: keys plus
    /// values.
    pub fn total_bytes(&self) -> usize {
        self.metadata()
            .iter()
            .map(|entry| entry.key.len() + entry.value.len())
            .sum()
    }

    /// Attach the bundle to an instance spec under construction.
    ///
    /// The size ceiling is not enforced locally; the provider rejects
    /// oversized payloads at insert time. We warn early because that
    /// rejection is otherwise hard to attribute.
    pub fn apply(&self, builder: InstanceSpecBuilder) -> InstanceSpecBuilder {
        let total = self.total_bytes();
        if total > METADATA_CEILING_BYTES {
            tracing::warn!(
                total_bytes = total,
                ceiling = METADATA_CEILING_BYTES,
                "relay payload exceeds the provider metadata ceiling; the insert will likely fail"
            );
        }

        self.metadata()
            .into_iter()
            .fold(builder, |b, entry| b.metadata(entry.key, entry.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{ImageRef, InstanceSpec};

    fn bundle() -> RelayBundle {
        RelayBundle {
            startup_script: "#!/bin/bash\ncurl ...\n".to_string(),
            launch_code: "fn main() {}\n".to_string(),
            relay_startup_script: "#!/bin/bash\nflask run\n".to_string(),
            service_credentials: "{\"type\":\"service_account\"}\n".to_string(),
            project: "datacenter-lab".to_string(),
        }
    }

    #[test]
    fn every_guest_key_is_present_verbatim() {
        let bundle = bundle();
        let metadata = bundle.metadata();

        let value_of = |key: &str| {
            metadata
                .iter()
                .find(|e| e.key == key)
                .map(|e| e.value.as_str())
        };

        assert_eq!(metadata.len(), 5);
        assert_eq!(
            value_of(keys::STARTUP_SCRIPT),
            Some(bundle.startup_script.as_str())
        );
        assert_eq!(value_of(keys::LAUNCH_CODE), Some(bundle.launch_code.as_str()));
        assert_eq!(
            value_of(keys::RELAY_STARTUP_SCRIPT),
            Some(bundle.relay_startup_script.as_str())
        );
        assert_eq!(
            value_of(keys::SERVICE_CREDENTIALS),
            Some(bundle.service_credentials.as_str())
        );
        assert_eq!(value_of(keys::PROJECT), Some(bundle.project.as_str()));
    }

    #[test]
    fn apply_extends_the_spec_metadata() {
        let spec = bundle()
            .apply(InstanceSpec::builder("vm1", "e2-medium").image(ImageRef {
                self_link: "https://example/image".to_string(),
            }))
            .build()
            .unwrap();

        assert_eq!(spec.metadata.len(), 5);
        assert!(spec.metadata.iter().any(|e| e.key == keys::PROJECT));
    }

    #[test]
    fn total_bytes_counts_keys_and_values() {
        let bundle = bundle();
        let expected: usize = bundle
            .metadata()
            .iter()
            .map(|e| e.key.len() + e.value.len())
            .sum();
        assert_eq!(bundle.total_bytes(), expected);
        assert!(bundle.total_bytes() < METADATA_CEILING_BYTES);
    }
}
