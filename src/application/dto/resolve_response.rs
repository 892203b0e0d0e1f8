use crate::dependency_resolution::domain::{ArtifactCoords, DependencyView, ResolvedDependency};
use chrono::Utc;
use serde::Serialize;

/// Tool and timing information attached to every response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
}

impl ResolutionMetadata {
    pub fn new(timestamp: String, tool_name: String, tool_version: String) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
        }
    }

    /// Metadata stamped with the current time and this crate's name and version
    pub fn now() -> Self {
        Self::new(
            Utc::now().to_rfc3339(),
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        )
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }
}

/// ResolveResponse - Internal response DTO from the dependency resolution use case
///
/// Carries the dependencies of the requested view, in resolution order,
/// ready for a formatter.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveResponse {
    pub metadata: ResolutionMetadata,
    pub root: ArtifactCoords,
    pub view: DependencyView,
    pub dependencies: Vec<ResolvedDependency>,
}

impl ResolveResponse {
    pub fn new(
        metadata: ResolutionMetadata,
        root: ArtifactCoords,
        view: DependencyView,
        dependencies: Vec<ResolvedDependency>,
    ) -> Self {
        Self {
            metadata,
            root,
            view,
            dependencies,
        }
    }
}
