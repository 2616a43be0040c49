//! `ComputeApi` implementation over compute/v1

use async_trait::async_trait;
use serde_json::json;
use skyhop_cloud::{
    BootSource, ComputeApi, Firewall, FirewallRule, ImageRef, Instance, InstanceSpec, Operation,
    OperationRef, OperationScope, Snapshot,
};

use crate::client::GceClient;
use crate::models::{WireFirewall, WireImage, WireInstance, WireOperation, WireSnapshot};

fn firewall_body(project: &str, rule: &FirewallRule) -> serde_json::Value {
    json!({
        "name": rule.name,
        "network": format!("projects/{project}/global/networks/default"),
        "direction": "INGRESS",
        "priority": 1000,
        "sourceRanges": rule.source_ranges,
        "targetTags": rule.target_tags,
        "allowed": [{"IPProtocol": "tcp", "ports": [rule.port.to_string()]}],
    })
}

fn instance_body(project: &str, zone: &str, spec: &InstanceSpec) -> serde_json::Value {
    let initialize_params = match &spec.boot_source {
        BootSource::Image(image) => json!({"sourceImage": image.self_link}),
        BootSource::Snapshot(snapshot) => json!({
            "sourceSnapshot": format!("projects/{project}/global/snapshots/{}", snapshot.name)
        }),
    };

    let mut body = json!({
        "name": spec.name,
        "machineType": format!("zones/{zone}/machineTypes/{}", spec.machine_type),
        "disks": [{
            "boot": true,
            "autoDelete": true,
            "initializeParams": initialize_params,
        }],
        "networkInterfaces": [{
            "network": format!("projects/{project}/global/networks/default"),
            "accessConfigs": [{"name": "External NAT", "type": "ONE_TO_ONE_NAT"}],
        }],
    });

    if !spec.tags.is_empty() {
        body["tags"] = json!({"items": spec.tags});
    }
    if !spec.metadata.is_empty() {
        let items: Vec<serde_json::Value> = spec
            .metadata
            .iter()
            .map(|entry| json!({"key": entry.key, "value": entry.value}))
            .collect();
        body["metadata"] = json!({"items": items});
    }

    body
}

#[async_trait]
impl ComputeApi for GceClient {
    async fn get_firewall(&self, name: &str) -> skyhop_cloud::Result<Option<Firewall>> {
        let url = self.project_url(&format!("global/firewalls/{name}"));
        let firewall: Option<WireFirewall> = self.get_optional(&url).await?;
        Ok(firewall.map(Into::into))
    }

    async fn insert_firewall(&self, rule: &FirewallRule) -> skyhop_cloud::Result<OperationRef> {
        let url = self.project_url("global/firewalls");
        let op: WireOperation = self
            .post_operation(&url, &firewall_body(self.project(), rule))
            .await?;
        Ok(OperationRef::global(op.name))
    }

    async fn get_instance(&self, zone: &str, name: &str) -> skyhop_cloud::Result<Option<Instance>> {
        let url = self.project_url(&format!("zones/{zone}/instances/{name}"));
        let instance: Option<WireInstance> = self.get_optional(&url).await?;
        Ok(instance.map(Into::into))
    }

    async fn insert_instance(
        &self,
        zone: &str,
        spec: &InstanceSpec,
    ) -> skyhop_cloud::Result<OperationRef> {
        let url = self.project_url(&format!("zones/{zone}/instances"));
        let op: WireOperation = self
            .post_operation(&url, &instance_body(self.project(), zone, spec))
            .await?;
        Ok(OperationRef::zonal(op.name, zone))
    }

    async fn get_snapshot(&self, name: &str) -> skyhop_cloud::Result<Option<Snapshot>> {
        let url = self.project_url(&format!("global/snapshots/{name}"));
        let snapshot: Option<WireSnapshot> = self.get_optional(&url).await?;
        Ok(snapshot.map(Into::into))
    }

    async fn create_snapshot(
        &self,
        zone: &str,
        disk: &str,
        name: &str,
    ) -> skyhop_cloud::Result<OperationRef> {
        let url = self.project_url(&format!("zones/{zone}/disks/{disk}/createSnapshot"));
        let op: WireOperation = self.post_operation(&url, &json!({"name": name})).await?;
        Ok(OperationRef::zonal(op.name, zone))
    }

    async fn image_from_family(
        &self,
        image_project: &str,
        family: &str,
    ) -> skyhop_cloud::Result<ImageRef> {
        let url =
            self.foreign_project_url(image_project, &format!("global/images/family/{family}"));
        let image: WireImage = self.get_required(&url).await?;
        Ok(ImageRef {
            self_link: image.self_link,
        })
    }

    async fn get_operation(&self, op: &OperationRef) -> skyhop_cloud::Result<Operation> {
        let url = match &op.scope {
            OperationScope::Zone(zone) => {
                self.project_url(&format!("zones/{zone}/operations/{}", op.name))
            }
            OperationScope::Global => self.project_url(&format!("global/operations/{}", op.name)),
        };
        let operation: WireOperation = self.get_required(&url).await?;
        Ok(operation.into())
    }
}

#[cfg(test)]
mod tests {
    use skyhop_cloud::SnapshotRef;

    use super::*;

    fn image_spec() -> InstanceSpec {
        InstanceSpec::builder("base-vm", "e2-medium")
            .image(ImageRef {
                self_link:
                    "projects/ubuntu-os-cloud/global/images/family/ubuntu-2204-lts".to_string(),
            })
            .tag("allow-5000")
            .metadata("startup-script", "#!/bin/bash\n")
            .build()
            .unwrap()
    }

    #[test]
    fn firewall_body_matches_api_shape() {
        let rule = FirewallRule::allow_tcp("allow-5000", 5000);
        let body = firewall_body("proj", &rule);

        assert_eq!(body["name"], "allow-5000");
        assert_eq!(body["network"], "projects/proj/global/networks/default");
        assert_eq!(body["direction"], "INGRESS");
        assert_eq!(body["priority"], 1000);
        assert_eq!(body["sourceRanges"][0], "0.0.0.0/0");
        assert_eq!(body["targetTags"][0], "allow-5000");
        assert_eq!(body["allowed"][0]["IPProtocol"], "tcp");
        assert_eq!(body["allowed"][0]["ports"][0], "5000");
    }

    #[test]
    fn instance_body_from_image() {
        let body = instance_body("proj", "us-west1-b", &image_spec());

        assert_eq!(body["name"], "base-vm");
        assert_eq!(body["machineType"], "zones/us-west1-b/machineTypes/e2-medium");
        assert_eq!(body["disks"][0]["boot"], true);
        assert_eq!(body["disks"][0]["autoDelete"], true);
        assert_eq!(
            body["disks"][0]["initializeParams"]["sourceImage"],
            "projects/ubuntu-os-cloud/global/images/family/ubuntu-2204-lts"
        );
        assert!(body["disks"][0]["initializeParams"].get("sourceSnapshot").is_none());
        assert_eq!(
            body["networkInterfaces"][0]["accessConfigs"][0]["type"],
            "ONE_TO_ONE_NAT"
        );
        assert_eq!(body["tags"]["items"][0], "allow-5000");
        assert_eq!(body["metadata"]["items"][0]["key"], "startup-script");
    }

    #[test]
    fn instance_body_from_snapshot() {
        let spec = InstanceSpec::builder("base-clone-1", "e2-medium")
            .snapshot(SnapshotRef {
                name: "base-snapshot-base-vm".to_string(),
                source_disk: "base-vm".to_string(),
            })
            .build()
            .unwrap();
        let body = instance_body("proj", "us-west1-b", &spec);

        assert_eq!(
            body["disks"][0]["initializeParams"]["sourceSnapshot"],
            "projects/proj/global/snapshots/base-snapshot-base-vm"
        );
        assert!(body["disks"][0]["initializeParams"].get("sourceImage").is_none());
        // No tags or metadata requested, so the fields are omitted
        // entirely rather than sent empty.
        assert!(body.get("tags").is_none());
        assert!(body.get("metadata").is_none());
    }
}
