pub mod artifact;
pub mod dependency;
pub mod resolved;
pub mod scope;
pub mod version;

pub use artifact::{ArtifactCoords, ArtifactKey};
pub use dependency::{ArtifactDescriptor, Dependency, Exclusion};
pub use resolved::{DependencyView, ResolvedDependency, ResolvedDependencySet};
pub use scope::Scope;
pub use version::{Version, VersionRange, VersionRequirement};
