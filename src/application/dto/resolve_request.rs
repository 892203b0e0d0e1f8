use crate::dependency_resolution::domain::{ArtifactCoords, ArtifactKey, Dependency, DependencyView};
use std::collections::HashMap;
use std::time::Duration;

/// ResolveRequest - Internal request DTO for the dependency resolution use case
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// Artifact whose dependencies are resolved
    pub root: ArtifactCoords,
    /// Direct dependencies replacing (or added to) the root's declared ones
    pub overrides: Vec<Dependency>,
    /// Version pins for transitive artifacts
    pub managed_versions: HashMap<ArtifactKey, String>,
    pub view: DependencyView,
    /// Wall-clock limit for the whole resolution
    pub timeout: Option<Duration>,
}

impl ResolveRequest {
    pub fn new(root: ArtifactCoords) -> Self {
        Self {
            root,
            overrides: Vec::new(),
            managed_versions: HashMap::new(),
            view: DependencyView::default(),
            timeout: None,
        }
    }

    pub fn with_overrides(mut self, overrides: Vec<Dependency>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_managed_versions(mut self, managed_versions: HashMap<ArtifactKey, String>) -> Self {
        self.managed_versions = managed_versions;
        self
    }

    pub fn with_view(mut self, view: DependencyView) -> Self {
        self.view = view;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
