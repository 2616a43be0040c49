//! Asynchronous operation polling
//!
//! Every mutating provider call returns an [`OperationRef`]; the
//! resource is only usable after the operation reaches `DONE`.

use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::error::{CloudError, Result};
use crate::policy::PollingPolicy;
use crate::provider::ComputeApi;

/// Handle to a provider-side asynchronous operation, tagged with the
/// scope its status endpoint lives under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRef {
    pub name: String,
    pub scope: OperationScope,
}

impl OperationRef {
    pub fn zonal(name: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: OperationScope::Zone(zone.into()),
        }
    }

    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: OperationScope::Global,
        }
    }
}

/// The provider exposes two distinct status-lookup endpoints; the scope
/// recorded at insert time routes polls to the right one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationScope {
    Zone(String),
    Global,
}

/// Snapshot of an operation's remote state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub status: OperationStatus,

    /// Opaque provider error payload, present only on a failed
    /// terminal operation.
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Pending,
    Running,
    Done,
}

impl OperationStatus {
    pub fn is_terminal(self) -> bool {
        self == OperationStatus::Done
    }
}

/// Poll `op` at the policy's interval until it reaches a terminal
/// status.
///
/// A terminal status with an error payload fails with
/// [`CloudError::OperationFailed`] carrying the payload verbatim. With
/// `policy.max_attempts` unset this polls indefinitely; the provider
/// guarantees every operation eventually terminates. Callers that want
/// bounded waiting set an attempt ceiling and get
/// [`CloudError::Timeout`] on exhaustion. Dropping the returned future
/// cancels the wait at the next suspension point; no local state is
/// mutated either way.
pub async fn await_completion<C>(api: &C, op: &OperationRef, policy: &PollingPolicy) -> Result<()>
where
    C: ComputeApi + ?Sized,
{
    let mut attempts: u32 = 0;
    loop {
        let current = api.get_operation(op).await?;
        if current.status.is_terminal() {
            return match current.error {
                Some(detail) => Err(CloudError::OperationFailed {
                    operation: op.name.clone(),
                    detail,
                }),
                None => Ok(()),
            };
        }

        attempts += 1;
        if policy.max_attempts.is_some_and(|max| attempts >= max) {
            return Err(CloudError::Timeout {
                what: format!("operation '{}'", op.name),
                attempts,
            });
        }

        tracing::trace!(operation = %op.name, status = ?current.status, "operation not terminal yet");
        sleep(policy.interval).await;
    }
}
