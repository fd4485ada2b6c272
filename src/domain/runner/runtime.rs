use std::sync::Arc;

use super::{ExecuteOptions, FailurePolicy, FailurePolicySwitch, PromptExecutor};
use crate::domain::llm::LlmClient;
use crate::domain::prompt::{PromptLookup, TemplateFiller, VariableFiller};
use crate::domain::{DomainError, Handler};

/// Collaborators and policy shared by every executor of a process
#[derive(Clone)]
pub struct PromptRuntime {
    lookup: Arc<dyn PromptLookup>,
    filler: Arc<dyn TemplateFiller>,
    client: Arc<dyn LlmClient>,
    policy: FailurePolicySwitch,
    defaults: ExecuteOptions,
}

impl std::fmt::Debug for PromptRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptRuntime")
            .field("policy", &self.policy.get())
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl PromptRuntime {
    pub fn builder() -> PromptRuntimeBuilder {
        PromptRuntimeBuilder::default()
    }

    /// Bind an executor to a handler
    pub fn executor<'a>(&'a self, handler: &'a dyn Handler) -> PromptExecutor<'a> {
        PromptExecutor::new(handler, self)
    }

    pub fn lookup(&self) -> &dyn PromptLookup {
        self.lookup.as_ref()
    }

    pub fn filler(&self) -> &dyn TemplateFiller {
        self.filler.as_ref()
    }

    pub fn client(&self) -> &dyn LlmClient {
        self.client.as_ref()
    }

    /// Current failure policy
    pub fn failure_policy(&self) -> FailurePolicy {
        self.policy.get()
    }

    pub fn set_failure_policy(&self, policy: FailurePolicy) {
        self.policy.set(policy);
    }

    /// Handle that changes the policy of this runtime and all its clones
    pub fn policy_switch(&self) -> FailurePolicySwitch {
        self.policy.clone()
    }

    /// Options used when the caller has no specific requirements
    pub fn default_options(&self) -> ExecuteOptions {
        self.defaults
    }
}

/// Builder for PromptRuntime
#[derive(Default)]
pub struct PromptRuntimeBuilder {
    lookup: Option<Arc<dyn PromptLookup>>,
    filler: Option<Arc<dyn TemplateFiller>>,
    client: Option<Arc<dyn LlmClient>>,
    policy: FailurePolicy,
    defaults: ExecuteOptions,
}

impl PromptRuntimeBuilder {
    pub fn lookup(mut self, lookup: Arc<dyn PromptLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn filler(mut self, filler: Arc<dyn TemplateFiller>) -> Self {
        self.filler = Some(filler);
        self
    }

    pub fn client(mut self, client: Arc<dyn LlmClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn default_options(mut self, options: ExecuteOptions) -> Self {
        self.defaults = options;
        self
    }

    pub fn build(self) -> Result<PromptRuntime, DomainError> {
        let lookup = self
            .lookup
            .ok_or_else(|| DomainError::configuration("Prompt runtime requires a prompt lookup"))?;
        let client = self
            .client
            .ok_or_else(|| DomainError::configuration("Prompt runtime requires an LLM client"))?;

        Ok(PromptRuntime {
            lookup,
            filler: self.filler.unwrap_or_else(|| Arc::new(VariableFiller)),
            client,
            policy: FailurePolicySwitch::new(self.policy),
            defaults: self.defaults,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmClient;
    use crate::domain::prompt::MockPromptLookup;
    use std::time::Duration;

    #[test]
    fn test_builder_requires_collaborators() {
        let missing_client = PromptRuntime::builder()
            .lookup(Arc::new(MockPromptLookup::new()))
            .build();
        assert!(matches!(
            missing_client,
            Err(DomainError::Configuration { .. })
        ));

        let missing_lookup = PromptRuntime::builder()
            .client(Arc::new(MockLlmClient::new()))
            .build();
        assert!(missing_lookup.is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let runtime = PromptRuntime::builder()
            .lookup(Arc::new(MockPromptLookup::new()))
            .client(Arc::new(MockLlmClient::new()))
            .default_options(ExecuteOptions::new().timeout(Duration::from_secs(3)))
            .build()
            .unwrap();

        assert_eq!(runtime.failure_policy(), FailurePolicy::Suppress);
        assert_eq!(runtime.default_options().timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_policy_switch_shared_with_clones() {
        let runtime = PromptRuntime::builder()
            .lookup(Arc::new(MockPromptLookup::new()))
            .client(Arc::new(MockLlmClient::new()))
            .failure_policy(FailurePolicy::Raise)
            .build()
            .unwrap();
        let cloned = runtime.clone();

        runtime.set_failure_policy(FailurePolicy::Suppress);
        assert_eq!(cloned.failure_policy(), FailurePolicy::Suppress);

        cloned.policy_switch().set(FailurePolicy::Raise);
        assert_eq!(runtime.failure_policy(), FailurePolicy::Raise);
    }
}
