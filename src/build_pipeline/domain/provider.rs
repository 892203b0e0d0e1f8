use super::OutcomeType;
use crate::build_pipeline::services::OutcomeMap;
use crate::shared::Result;
use std::fmt;
use std::sync::Arc;

/// A unit of work in an outcome pipeline.
///
/// `provides` is read once, when the provider is registered. `provide` runs at
/// most once per session and must push every type it declared; it may resolve
/// other outcomes from the same map first.
pub trait OutcomeProvider: Send + Sync {
    fn id(&self) -> &str;

    fn provides(&self) -> Vec<OutcomeType>;

    fn provide(&self, outcomes: &mut OutcomeMap) -> Result<()>;
}

type ProvideFn = dyn Fn(&mut OutcomeMap) -> Result<()> + Send + Sync;

/// OutcomeProvider built from a closure.
pub struct FnOutcomeProvider {
    id: String,
    provides: Vec<OutcomeType>,
    provide: Box<ProvideFn>,
}

impl FnOutcomeProvider {
    pub fn new<F>(id: impl Into<String>, provides: Vec<OutcomeType>, provide: F) -> Self
    where
        F: Fn(&mut OutcomeMap) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            provides,
            provide: Box::new(provide),
        }
    }
}

impl OutcomeProvider for FnOutcomeProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn provides(&self) -> Vec<OutcomeType> {
        self.provides.clone()
    }

    fn provide(&self, outcomes: &mut OutcomeMap) -> Result<()> {
        (self.provide)(outcomes)
    }
}

/// Registry entry for one provider, frozen once registration completes.
#[derive(Clone)]
pub struct OutcomeProviderDescription {
    index: usize,
    provider_id: String,
    provider: Arc<dyn OutcomeProvider>,
    provided_types: Vec<OutcomeType>,
}

impl OutcomeProviderDescription {
    pub(crate) fn new(
        index: usize,
        provider: Arc<dyn OutcomeProvider>,
        provided_types: Vec<OutcomeType>,
    ) -> Self {
        Self {
            index,
            provider_id: provider.id().to_string(),
            provider,
            provided_types,
        }
    }

    /// Registration order, unique within one factory.
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn provider(&self) -> &Arc<dyn OutcomeProvider> {
        &self.provider
    }

    pub fn provided_types(&self) -> &[OutcomeType] {
        &self.provided_types
    }
}

impl fmt::Debug for OutcomeProviderDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutcomeProviderDescription")
            .field("provider_id", &self.provider_id)
            .field("provided_types", &self.provided_types)
            .finish()
    }
}
