use crate::dependency_resolution::domain::{ArtifactCoords, ArtifactDescriptor, ArtifactKey, Version};
use crate::shared::Result;
use std::sync::Arc;

/// ArtifactRepository port - the backing store the collector reads from
///
/// This port abstracts where artifact descriptors come from (an in-memory
/// catalogue, a manifest file, a local cache in front of a remote store).
/// Calls are blocking; implementations shared between threads must be
/// `Send + Sync` and read-only from the collector's point of view.
pub trait ArtifactRepository {
    /// Reads the descriptor of a concrete artifact version
    ///
    /// # Returns
    /// `Ok(None)` when the repository does not know the artifact; the
    /// collector turns that into a fatal resolution error.
    ///
    /// # Errors
    /// Returns an error if the backing store itself fails.
    fn read_descriptor(&self, coords: &ArtifactCoords) -> Result<Option<ArtifactDescriptor>>;

    /// Lists every version the repository holds for `key`, in any order
    ///
    /// Used to resolve version ranges. An unknown key yields an empty list.
    fn available_versions(&self, key: &ArtifactKey) -> Result<Vec<Version>>;
}

impl<R: ArtifactRepository + ?Sized> ArtifactRepository for &R {
    fn read_descriptor(&self, coords: &ArtifactCoords) -> Result<Option<ArtifactDescriptor>> {
        (**self).read_descriptor(coords)
    }

    fn available_versions(&self, key: &ArtifactKey) -> Result<Vec<Version>> {
        (**self).available_versions(key)
    }
}

impl<R: ArtifactRepository + ?Sized> ArtifactRepository for Arc<R> {
    fn read_descriptor(&self, coords: &ArtifactCoords) -> Result<Option<ArtifactDescriptor>> {
        (**self).read_descriptor(coords)
    }

    fn available_versions(&self, key: &ArtifactKey) -> Result<Vec<Version>> {
        (**self).available_versions(key)
    }
}
