use super::OutcomeMap;
use crate::build_pipeline::domain::{OutcomeProvider, OutcomeProviderDescription, OutcomeType};
use crate::shared::error::OutcomeError;
use crate::shared::Result;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

pub(crate) type Registry = HashMap<OutcomeType, Arc<OutcomeProviderDescription>>;

/// Collects providers and validates that every outcome type has exactly one.
#[derive(Default)]
pub struct OutcomeResolverFactory {
    registry: Registry,
    descriptions: Vec<Arc<OutcomeProviderDescription>>,
}

impl OutcomeResolverFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` for every type it declares
    ///
    /// # Errors
    /// Returns `OutcomeError::DuplicateProvider` naming both providers when a
    /// declared type already has one. Nothing is registered in that case.
    pub fn add_provider<P: OutcomeProvider + 'static>(&mut self, provider: P) -> Result<&mut Self> {
        self.add_shared_provider(Arc::new(provider))
    }

    pub fn add_shared_provider(&mut self, provider: Arc<dyn OutcomeProvider>) -> Result<&mut Self> {
        let mut provided_types = Vec::new();
        for outcome in provider.provides() {
            if let Some(existing) = self.registry.get(&outcome) {
                return Err(OutcomeError::DuplicateProvider {
                    outcome: outcome.name().to_string(),
                    existing: existing.provider_id().to_string(),
                    duplicate: provider.id().to_string(),
                }
                .into());
            }
            if !provided_types.contains(&outcome) {
                provided_types.push(outcome);
            }
        }

        let description = Arc::new(OutcomeProviderDescription::new(
            self.descriptions.len(),
            provider,
            provided_types,
        ));
        debug!(
            "Registered provider '{}' for {} outcome type(s)",
            description.provider_id(),
            description.provided_types().len()
        );
        for outcome in description.provided_types() {
            self.registry.insert(*outcome, Arc::clone(&description));
        }
        self.descriptions.push(description);
        Ok(self)
    }

    /// `(outcome type name, provider id)` pairs in registration order.
    pub fn registrations(&self) -> Vec<(&'static str, &str)> {
        self.descriptions
            .iter()
            .flat_map(|d| d.provided_types().iter().map(move |t| (t.name(), d.provider_id())))
            .collect()
    }

    pub fn build(self) -> OutcomeResolver {
        OutcomeResolver {
            registry: Arc::new(self.registry),
            descriptions: Arc::new(self.descriptions),
        }
    }
}

/// Frozen, read-only provider registry.
///
/// Cheap to clone and safe to share between threads; every session it opens
/// owns its own [`OutcomeMap`].
#[derive(Clone)]
pub struct OutcomeResolver {
    registry: Arc<Registry>,
    descriptions: Arc<Vec<Arc<OutcomeProviderDescription>>>,
}

impl OutcomeResolver {
    pub fn session(&self) -> OutcomeMap {
        OutcomeMap::new(Arc::clone(&self.registry), None)
    }

    /// Opens a session that refuses to start providers once `timeout` has elapsed.
    pub fn session_with_deadline(&self, timeout: Duration) -> OutcomeMap {
        OutcomeMap::new(Arc::clone(&self.registry), Some(Instant::now() + timeout))
    }

    /// Resolves one outcome in a fresh session.
    pub fn resolve<T: Any + Send + Sync>(&self) -> Result<Option<Arc<T>>> {
        self.session().resolve_outcome::<T>()
    }

    pub fn providers(&self) -> &[Arc<OutcomeProviderDescription>] {
        &self.descriptions
    }

    pub fn provider_for(&self, outcome: &OutcomeType) -> Option<&OutcomeProviderDescription> {
        self.registry.get(outcome).map(Arc::as_ref)
    }
}
