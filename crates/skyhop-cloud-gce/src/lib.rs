//! Google Compute Engine provider implementation
//!
//! Implements `skyhop_cloud::ComputeApi` over the `compute/v1` REST
//! API with bearer-token authentication, plus the guest-side instance
//! metadata client used by relayed VMs at boot time.

pub mod client;
pub mod error;
pub mod metadata;
pub mod models;
pub mod provider;

pub use client::GceClient;
pub use error::{GceError, Result};
pub use metadata::MetadataClient;
