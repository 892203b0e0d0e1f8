/// Dependency resolution domain - artifact value types, scope rules and
/// the nearest-wins transitive collector.
///
/// Nothing in here performs I/O directly: descriptors are fetched through
/// the `ArtifactRepository` port.
pub mod domain;
pub mod policies;
pub mod services;
