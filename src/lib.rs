//! phase-resolver - outcome pipeline and transitive dependency collector
//!
//! This library provides two engines and the plumbing around them:
//! a type-keyed outcome pipeline that runs build phases on demand, and a
//! breadth-first dependency graph collector with nearest-wins conflict
//! resolution, following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`build_pipeline`, `dependency_resolution`): Pure logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```
//! use phase_resolver::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let repository = InMemoryArtifactRepository::new()
//!     .with_artifact(
//!         "org.acme:app:1.0",
//!         ArtifactDescriptor::new(vec![Dependency::parse("org.acme:lib:2.0")?]),
//!     )?
//!     .with_artifact("org.acme:lib:2.0", ArtifactDescriptor::default())?;
//!
//! let use_case = ResolveDependenciesUseCase::new(
//!     Arc::new(CachingArtifactRepository::new(repository)),
//!     StderrProgressReporter::quiet(),
//! )?;
//!
//! let response = use_case.execute(ResolveRequest::new("org.acme:app:1.0".parse()?))?;
//! assert_eq!(response.dependencies.len(), 1);
//! assert_eq!(response.dependencies[0].version(), "2.0");
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod build_pipeline;
pub mod dependency_resolution;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        JsonFormatter, MarkdownFormatter, TreeFormatter,
    };
    pub use crate::adapters::outbound::repository::{
        CachingArtifactRepository, InMemoryArtifactRepository,
    };
    pub use crate::application::dto::{OutputFormat, ResolveRequest, ResolveResponse};
    pub use crate::application::use_cases::ResolveDependenciesUseCase;
    pub use crate::build_pipeline::domain::{FnOutcomeProvider, OutcomeProvider, OutcomeType};
    pub use crate::build_pipeline::services::{OutcomeMap, OutcomeResolver, OutcomeResolverFactory};
    pub use crate::dependency_resolution::domain::{
        ArtifactCoords, ArtifactDescriptor, ArtifactKey, Dependency, DependencyView, Exclusion,
        ResolvedDependency, ResolvedDependencySet, Scope,
    };
    pub use crate::dependency_resolution::services::{DependencyGraphCollector, ManagedVersions};
    pub use crate::ports::inbound::DependencyResolutionPort;
    pub use crate::ports::outbound::{
        ArtifactRepository, OutputPresenter, ProgressReporter, RepositoryManifestReader,
        ResolutionFormatter,
    };
    pub use crate::shared::Result;
}
