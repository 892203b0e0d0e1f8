mod phases;

pub use phases::{CollectDependenciesPhase, DependencyViewPhase, SelectedDependencies};

use crate::application::dto::{ResolutionMetadata, ResolveRequest, ResolveResponse};
use crate::build_pipeline::services::{OutcomeResolver, OutcomeResolverFactory};
use crate::ports::inbound::DependencyResolutionPort;
use crate::ports::outbound::{ArtifactRepository, ProgressReporter};
use crate::shared::Result;
use std::sync::Arc;
use tracing::info;

/// ResolveDependenciesUseCase - Core use case for dependency resolution
///
/// Runs dependency collection as phases of an outcome pipeline. Every call
/// to [`execute`](Self::execute) opens a fresh session seeded with the
/// request, then asks the pipeline for the selected view.
///
/// # Type Parameters
/// * `R` - ArtifactRepository implementation, shared with the pipeline phases
/// * `PR` - ProgressReporter implementation
pub struct ResolveDependenciesUseCase<R, PR> {
    pipeline: OutcomeResolver,
    progress_reporter: PR,
    repository: Arc<R>,
}

impl<R, PR> ResolveDependenciesUseCase<R, PR>
where
    R: ArtifactRepository + Send + Sync + 'static,
    PR: ProgressReporter,
{
    /// Creates the use case and registers its pipeline phases
    ///
    /// # Errors
    /// Returns an error if two phases declare the same outcome type.
    pub fn new(repository: Arc<R>, progress_reporter: PR) -> Result<Self> {
        let mut factory = OutcomeResolverFactory::new();
        factory
            .add_provider(CollectDependenciesPhase::new(Arc::clone(&repository)))?
            .add_provider(DependencyViewPhase)?;

        Ok(Self {
            pipeline: factory.build(),
            progress_reporter,
            repository,
        })
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Executes the dependency resolution use case
    ///
    /// # Arguments
    /// * `request` - Root artifact, overrides, pins, view and optional timeout
    ///
    /// # Returns
    /// ResolveResponse holding the dependencies of the requested view
    pub fn execute(&self, request: ResolveRequest) -> Result<ResolveResponse> {
        self.progress_reporter
            .report(&format!("🔍 Resolving dependencies of {}", request.root));

        let mut session = match request.timeout {
            Some(timeout) => self.pipeline.session_with_deadline(timeout),
            None => self.pipeline.session(),
        };

        let root = request.root.clone();
        let view = request.view;
        session.push_outcome(request)?;
        let selected = session.require_outcome::<SelectedDependencies>()?;

        info!("{} {} dependencies selected for {}", selected.0.len(), view, root);
        self.progress_reporter.report_completion(&format!(
            "✅ Resolved {} {} dependenc{}",
            selected.0.len(),
            view,
            if selected.0.len() == 1 { "y" } else { "ies" }
        ));

        Ok(ResolveResponse::new(
            ResolutionMetadata::now(),
            root,
            view,
            selected.0.clone(),
        ))
    }
}

impl<R, PR> DependencyResolutionPort for ResolveDependenciesUseCase<R, PR>
where
    R: ArtifactRepository + Send + Sync + 'static,
    PR: ProgressReporter,
{
    fn resolve(&self, request: ResolveRequest) -> Result<ResolveResponse> {
        self.execute(request)
    }
}
