//! In-process fake provider for orchestration tests.
//!
//! Keeps a local "inventory" the way the remote provider would, counts
//! every call, and lets tests script operation-status sequences and
//! instance-lookup answers.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{CloudError, Result};
use crate::firewall::FirewallRule;
use crate::ops::{Operation, OperationRef, OperationScope, OperationStatus};
use crate::provider::ComputeApi;
use crate::resource::{
    AccessConfig, AttachedDisk, Firewall, ImageRef, Instance, InstanceSpec, NetworkInterface,
    Snapshot,
};

#[derive(Default)]
pub struct MockCompute {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    firewalls: HashMap<String, Firewall>,
    instances: HashMap<String, Instance>,
    snapshots: HashMap<String, Snapshot>,
    op_scripts: HashMap<String, VecDeque<Operation>>,
    instance_lookup_script: VecDeque<Option<Instance>>,
    fail_firewall_lookups: bool,
    counts: Counts,
    next_op: u32,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Counts {
    pub firewall_inserts: u32,
    pub instance_inserts: u32,
    pub snapshot_inserts: u32,
    pub instance_lookups: u32,
    pub operation_polls: u32,
}

impl MockCompute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> Counts {
        self.inner.lock().unwrap().counts
    }

    pub fn add_instance(&self, instance: Instance) {
        let mut inner = self.inner.lock().unwrap();
        inner.instances.insert(instance.name.clone(), instance);
    }

    /// Script the statuses returned by successive polls of `op_name`.
    /// Once the script runs out, further polls answer `DONE` with no
    /// error.
    pub fn script_operation(&self, op_name: &str, statuses: Vec<Operation>) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .op_scripts
            .insert(op_name.to_string(), statuses.into());
    }

    /// Script the next instance lookups, overriding the inventory.
    pub fn script_instance_lookups(&self, results: Vec<Option<Instance>>) {
        let mut inner = self.inner.lock().unwrap();
        inner.instance_lookup_script = results.into();
    }

    /// Make firewall lookups fail with a provider error (not a
    /// not-found answer).
    pub fn fail_firewall_lookups(&self) {
        self.inner.lock().unwrap().fail_firewall_lookups = true;
    }

    fn next_op(inner: &mut Inner, scope: OperationScope) -> OperationRef {
        inner.next_op += 1;
        OperationRef {
            name: format!("op-{}", inner.next_op),
            scope,
        }
    }
}

pub fn instance_named(name: &str) -> Instance {
    Instance {
        name: name.to_string(),
        status: Some("RUNNING".to_string()),
        ..Default::default()
    }
}

pub fn instance_with_ip(name: &str, ip: &str) -> Instance {
    Instance {
        network_interfaces: vec![NetworkInterface {
            access_configs: vec![AccessConfig {
                nat_ip: Some(ip.to_string()),
            }],
        }],
        ..instance_named(name)
    }
}

pub fn instance_with_boot_disk(name: &str, disk_source: &str) -> Instance {
    Instance {
        disks: vec![AttachedDisk {
            boot: true,
            source: disk_source.to_string(),
        }],
        ..instance_named(name)
    }
}

#[async_trait]
impl ComputeApi for MockCompute {
    async fn get_firewall(&self, name: &str) -> Result<Option<Firewall>> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_firewall_lookups {
            return Err(CloudError::Api("simulated lookup failure".to_string()));
        }
        Ok(inner.firewalls.get(name).cloned())
    }

    async fn insert_firewall(&self, rule: &FirewallRule) -> Result<OperationRef> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.firewall_inserts += 1;
        inner.firewalls.insert(
            rule.name.clone(),
            Firewall {
                name: rule.name.clone(),
            },
        );
        Ok(Self::next_op(&mut inner, OperationScope::Global))
    }

    async fn get_instance(&self, _zone: &str, name: &str) -> Result<Option<Instance>> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.instance_lookups += 1;
        if let Some(scripted) = inner.instance_lookup_script.pop_front() {
            return Ok(scripted);
        }
        Ok(inner.instances.get(name).cloned())
    }

    async fn insert_instance(&self, zone: &str, spec: &InstanceSpec) -> Result<OperationRef> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.instance_inserts += 1;
        inner
            .instances
            .insert(spec.name.clone(), instance_named(&spec.name));
        Ok(Self::next_op(
            &mut inner,
            OperationScope::Zone(zone.to_string()),
        ))
    }

    async fn get_snapshot(&self, name: &str) -> Result<Option<Snapshot>> {
        Ok(self.inner.lock().unwrap().snapshots.get(name).cloned())
    }

    async fn create_snapshot(&self, zone: &str, _disk: &str, name: &str) -> Result<OperationRef> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.snapshot_inserts += 1;
        inner.snapshots.insert(
            name.to_string(),
            Snapshot {
                name: name.to_string(),
                status: Some("READY".to_string()),
            },
        );
        Ok(Self::next_op(
            &mut inner,
            OperationScope::Zone(zone.to_string()),
        ))
    }

    async fn image_from_family(&self, image_project: &str, family: &str) -> Result<ImageRef> {
        Ok(ImageRef {
            self_link: format!(
                "https://example/projects/{image_project}/global/images/family/{family}"
            ),
        })
    }

    async fn get_operation(&self, op: &OperationRef) -> Result<Operation> {
        let mut inner = self.inner.lock().unwrap();
        inner.counts.operation_polls += 1;
        if let Some(script) = inner.op_scripts.get_mut(&op.name) {
            if let Some(next) = script.pop_front() {
                return Ok(next);
            }
        }
        Ok(Operation {
            status: OperationStatus::Done,
            error: None,
        })
    }
}
