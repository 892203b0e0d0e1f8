use crate::application::dto::ResolveRequest;
use crate::build_pipeline::domain::{OutcomeProvider, OutcomeType};
use crate::build_pipeline::services::OutcomeMap;
use crate::dependency_resolution::domain::{ResolvedDependency, ResolvedDependencySet};
use crate::dependency_resolution::services::DependencyGraphCollector;
use crate::ports::outbound::ArtifactRepository;
use crate::shared::Result;
use std::sync::Arc;

/// Dependencies of the view a request asked for, in resolution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDependencies(pub Vec<ResolvedDependency>);

/// Collects the full dependency set of the requested root.
///
/// Consumes: `ResolveRequest`. Produces: `ResolvedDependencySet`.
pub struct CollectDependenciesPhase<R> {
    repository: Arc<R>,
}

impl<R> CollectDependenciesPhase<R> {
    pub const ID: &'static str = "collect-dependencies";

    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R: ArtifactRepository + Send + Sync> OutcomeProvider for CollectDependenciesPhase<R> {
    fn id(&self) -> &str {
        Self::ID
    }

    fn provides(&self) -> Vec<OutcomeType> {
        vec![OutcomeType::of::<ResolvedDependencySet>()]
    }

    fn provide(&self, outcomes: &mut OutcomeMap) -> Result<()> {
        let request = outcomes.require_outcome::<ResolveRequest>()?;

        let mut collector = DependencyGraphCollector::new(self.repository.as_ref())
            .with_managed_versions(request.managed_versions.clone());
        if let Some(timeout) = request.timeout {
            collector = collector.with_timeout(timeout);
        }

        let resolved = collector.collect(&request.root, &request.overrides)?;
        outcomes.push_outcome(resolved)
    }
}

/// Narrows the collected set to the requested view.
///
/// Consumes: `ResolveRequest`, `ResolvedDependencySet`. Produces: `SelectedDependencies`.
pub struct DependencyViewPhase;

impl DependencyViewPhase {
    pub const ID: &'static str = "dependency-view";
}

impl OutcomeProvider for DependencyViewPhase {
    fn id(&self) -> &str {
        Self::ID
    }

    fn provides(&self) -> Vec<OutcomeType> {
        vec![OutcomeType::of::<SelectedDependencies>()]
    }

    fn provide(&self, outcomes: &mut OutcomeMap) -> Result<()> {
        let request = outcomes.require_outcome::<ResolveRequest>()?;
        let resolved = outcomes.require_outcome::<ResolvedDependencySet>()?;

        let selected = resolved
            .view(request.view)
            .into_iter()
            .cloned()
            .collect();
        outcomes.push_outcome(SelectedDependencies(selected))
    }
}
