use std::time::Duration;

use crate::domain::llm::QualityLevel;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Per-call execution controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOptions {
    pub level: QualityLevel,
    /// Echo the filled prompt and the response to stdout
    pub verbose: bool,
    pub timeout: Duration,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            level: QualityLevel::Low,
            verbose: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ExecuteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: QualityLevel) -> Self {
        self.level = level;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
