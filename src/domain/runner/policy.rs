use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// What `execute` does with an execution failure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Return the failure to the caller (tests, development)
    Raise,
    /// Log it, echo it to stderr and return no answer (production)
    #[default]
    Suppress,
}

impl FromStr for FailurePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raise" => Ok(Self::Raise),
            "suppress" => Ok(Self::Suppress),
            other => Err(DomainError::validation(format!(
                "Unknown failure policy '{}', expected 'raise' or 'suppress'",
                other
            ))),
        }
    }
}

/// Shared, switchable failure policy.
///
/// Read when a failure happens, so a change applies to the next failure of
/// any executor holding a clone.
#[derive(Debug, Clone, Default)]
pub struct FailurePolicySwitch {
    raise: Arc<AtomicBool>,
}

impl FailurePolicySwitch {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            raise: Arc::new(AtomicBool::new(policy == FailurePolicy::Raise)),
        }
    }

    pub fn get(&self) -> FailurePolicy {
        if self.raise.load(Ordering::Acquire) {
            FailurePolicy::Raise
        } else {
            FailurePolicy::Suppress
        }
    }

    pub fn set(&self, policy: FailurePolicy) {
        self.raise
            .store(policy == FailurePolicy::Raise, Ordering::Release);
    }
}
