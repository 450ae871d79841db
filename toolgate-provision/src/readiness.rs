//! Bounded waiting for resources that become usable asynchronously.

use crate::error::ProvisionError;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// IAM has no readiness signal; new roles and policies are given this long to
/// propagate before anything assumes them.
pub const IAM_PROPAGATION_DELAY: Duration = Duration::from_secs(30);

pub const GATEWAY_READY_MAX_ATTEMPTS: u32 = 40;
pub const GATEWAY_READY_INITIAL_DELAY: Duration = Duration::from_secs(2);
pub const GATEWAY_READY_MAX_DELAY: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    Pending(String),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            max_attempts: GATEWAY_READY_MAX_ATTEMPTS,
            initial_delay: GATEWAY_READY_INITIAL_DELAY,
            max_delay: GATEWAY_READY_MAX_DELAY,
        }
    }
}

impl ReadinessPolicy {
    /// Delay after the given (1-based) attempt: doubling, capped at `max_delay`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

/// Probe until the resource reports ready. Returns the number of checks made.
pub async fn poll_until_ready<F, Fut>(
    policy: ReadinessPolicy,
    resource: &str,
    mut probe: F,
) -> Result<u32, ProvisionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Readiness, ProvisionError>>,
{
    let mut last_status = String::from("UNKNOWN");
    for attempt in 1..=policy.max_attempts {
        match probe().await? {
            Readiness::Ready => return Ok(attempt),
            Readiness::Failed(status) => {
                return Err(ProvisionError::ResourceFailed {
                    resource: resource.to_string(),
                    status,
                });
            }
            Readiness::Pending(status) => {
                debug!(resource, attempt, status = %status, "not ready yet");
                last_status = status;
            }
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.delay_after(attempt)).await;
        }
    }
    Err(ProvisionError::NotReady {
        resource: resource.to_string(),
        attempts: policy.max_attempts,
        last_status,
    })
}
