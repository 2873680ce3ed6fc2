//! Deadline-bounded container polling.
//!
//! Re-captures the snapshot and asks for the topmost container until one
//! appears or the wall-clock deadline passes. Only the deadline can stop
//! the loop; there is no external cancellation.

use std::time::Duration;

use dom_snapshot::{DomSnapshot, NodeId, SelectorList};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::container;
use crate::errors::ResolveError;
use crate::ports::BrowserPort;

/// Bounded retry policy for container polling, passed as configuration.
///
/// A zero interval keeps the loop tight: the only pacing is the cost of
/// re-snapshotting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum wall-clock budget for one container wait.
    #[serde(with = "humantime_serde")]
    pub deadline: Duration,

    /// Pause between attempts; zero by default.
    #[serde(with = "humantime_serde", default)]
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(60),
            interval: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Loop {snapshot, rank, pick topmost} until success or deadline.
///
/// Always captures at least one snapshot, so a zero deadline still
/// observes the current page once.
pub async fn await_container<P>(
    port: &P,
    selector: &SelectorList,
    selector_text: &str,
    policy: RetryPolicy,
) -> Result<(DomSnapshot, NodeId), ResolveError>
where
    P: BrowserPort + ?Sized,
{
    let started = Instant::now();
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let snapshot = port.snapshot().await?;
        if let Some(id) = container::topmost(&snapshot, selector) {
            debug!(attempts, selector = selector_text, "container found");
            return Ok((snapshot, id));
        }
        let waited = started.elapsed();
        if waited >= policy.deadline {
            warn!(
                attempts,
                selector = selector_text,
                ?waited,
                "container polling deadline exceeded"
            );
            return Err(ResolveError::ContainerNotFound {
                selector: selector_text.to_string(),
                waited,
            });
        }
        if !policy.interval.is_zero() {
            tokio::time::sleep(policy.interval).await;
        }
    }
}
