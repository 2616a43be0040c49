//! Guest-side instance metadata client
//!
//! The other half of the relay contract: a relayed VM's boot sequence
//! uses this to pull each payload key from the per-instance metadata
//! endpoint and write it byte-verbatim to a local file before use.
//! Only the instance itself can reach this endpoint; the orchestrator
//! never talks to it.

use std::path::Path;

use skyhop_cloud::relay::keys;

use crate::client::check_status;
use crate::error::Result;

pub const METADATA_BASE_URL: &str = "http://metadata.google.internal/computeMetadata/v1";

const METADATA_FLAVOR_HEADER: &str = "Metadata-Flavor";
const METADATA_FLAVOR_VALUE: &str = "Google";

pub struct MetadataClient {
    http: reqwest::Client,
    base_url: String,
}

impl MetadataClient {
    pub fn new() -> Self {
        Self::with_base_url(METADATA_BASE_URL)
    }

    /// Use a different endpoint root (stub servers in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch one instance attribute by key.
    pub async fn attribute(&self, key: &str) -> Result<String> {
        let url = format!("{}/instance/attributes/{key}", self.base_url);
        tracing::debug!(%url, "fetching instance attribute");
        let response = self
            .http
            .get(&url)
            .header(METADATA_FLAVOR_HEADER, METADATA_FLAVOR_VALUE)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.text().await?)
    }

    /// Fetch one attribute and write it verbatim to `path`.
    pub async fn materialize(&self, key: &str, path: &Path) -> Result<()> {
        let value = self.attribute(key).await?;
        tokio::fs::write(path, value.as_bytes()).await?;
        tracing::debug!(key, path = %path.display(), bytes = value.len(), "materialized attribute");
        Ok(())
    }

    /// Pull every relayed payload key into `dir`, one file per key.
    /// The first hop runs this before re-entering provisioning.
    /// (`startup-script` is not fetched; the guest OS already ran it.)
    pub async fn materialize_bundle(&self, dir: &Path) -> Result<()> {
        for key in [
            keys::LAUNCH_CODE,
            keys::RELAY_STARTUP_SCRIPT,
            keys::SERVICE_CREDENTIALS,
            keys::PROJECT,
        ] {
            self.materialize(key, &dir.join(key)).await?;
        }
        Ok(())
    }
}

impl Default for MetadataClient {
    fn default() -> Self {
        Self::new()
    }
}
