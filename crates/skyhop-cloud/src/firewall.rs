//! Ingress firewall reconciliation

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::policy::PollingPolicy;
use crate::provider::ComputeApi;
use crate::reconcile::{Ensured, ensure};

/// Desired state of one ingress allow rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirewallRule {
    pub name: String,

    /// Single TCP port this rule opens.
    pub port: u16,

    pub source_ranges: Vec<String>,

    /// Network tags of the instances the rule applies to.
    pub target_tags: Vec<String>,
}

impl FirewallRule {
    /// Allow one TCP port from anywhere, targeting instances tagged
    /// with the rule's own name.
    pub fn allow_tcp(name: impl Into<String>, port: u16) -> Self {
        let name = name.into();
        Self {
            target_tags: vec![name.clone()],
            name,
            port,
            source_ranges: vec!["0.0.0.0/0".to_string()],
        }
    }
}

/// Reconcile one firewall rule. Firewall operations are global-scoped.
pub async fn ensure_firewall<C>(
    api: &C,
    rule: &FirewallRule,
    policy: &PollingPolicy,
) -> Result<Ensured>
where
    C: ComputeApi + ?Sized,
{
    ensure(
        api,
        &format!("firewall '{}'", rule.name),
        api.get_firewall(&rule.name),
        || api.insert_firewall(rule),
        policy,
    )
    .await
}
