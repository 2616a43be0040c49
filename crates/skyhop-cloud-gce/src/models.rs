//! compute/v1 wire models
//!
//! Only the fields skyhop consults are modeled; everything else in the
//! responses is ignored.

use serde::Deserialize;
use skyhop_cloud::{
    AccessConfig, AttachedDisk, Firewall, Instance, NetworkInterface, Operation, OperationStatus,
    Snapshot,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOperation {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl From<WireOperation> for Operation {
    fn from(op: WireOperation) -> Self {
        // Anything the API adds beyond the documented three statuses is
        // treated as still in flight.
        let status = match op.status.as_str() {
            "DONE" => OperationStatus::Done,
            "RUNNING" => OperationStatus::Running,
            _ => OperationStatus::Pending,
        };
        Operation {
            status,
            error: op.error,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireInstance {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub disks: Vec<WireDisk>,
    #[serde(default)]
    pub network_interfaces: Vec<WireNetworkInterface>,
}

impl From<WireInstance> for Instance {
    fn from(instance: WireInstance) -> Self {
        Instance {
            name: instance.name,
            status: instance.status,
            disks: instance
                .disks
                .into_iter()
                .map(|d| AttachedDisk {
                    boot: d.boot,
                    source: d.source,
                })
                .collect(),
            network_interfaces: instance
                .network_interfaces
                .into_iter()
                .map(|nic| NetworkInterface {
                    access_configs: nic
                        .access_configs
                        .into_iter()
                        .map(|ac| AccessConfig { nat_ip: ac.nat_ip })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDisk {
    #[serde(default)]
    pub boot: bool,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireNetworkInterface {
    #[serde(default)]
    pub access_configs: Vec<WireAccessConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireAccessConfig {
    #[serde(default, rename = "natIP")]
    pub nat_ip: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireFirewall {
    pub name: String,
}

impl From<WireFirewall> for Firewall {
    fn from(firewall: WireFirewall) -> Self {
        Firewall {
            name: firewall.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSnapshot {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<WireSnapshot> for Snapshot {
    fn from(snapshot: WireSnapshot) -> Self {
        Snapshot {
            name: snapshot.name,
            status: snapshot.status,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireImage {
    pub self_link: String,
}

/// Standard error envelope of non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub struct WireErrorBody {
    pub error: Option<WireErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireErrorDetail {
    #[serde(default)]
    pub message: String,
}
