use crate::dependency_resolution::domain::{
    ArtifactCoords, ArtifactDescriptor, ArtifactKey, Version,
};
use crate::ports::outbound::ArtifactRepository;
use crate::shared::Result;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingArtifactRepository wraps an ArtifactRepository and adds in-memory caching.
///
/// This adapter implements the decorator pattern so repeated descriptor and
/// version lookups (the same artifact reached through many paths, or many
/// collection sessions against one repository) hit the backing store once.
/// The cache is thread-safe, so one instance can be shared between sessions
/// running on different threads.
///
/// "Not found" answers are cached; backing-store errors are not.
pub struct CachingArtifactRepository<R: ArtifactRepository> {
    inner: R,
    descriptors: Arc<DashMap<ArtifactCoords, Option<ArtifactDescriptor>>>,
    versions: Arc<DashMap<ArtifactKey, Vec<Version>>>,
}

impl<R: ArtifactRepository> CachingArtifactRepository<R> {
    /// Creates a new caching repository wrapping the given inner repository
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            descriptors: Arc::new(DashMap::new()),
            versions: Arc::new(DashMap::new()),
        }
    }

    /// Number of cached descriptor lookups
    pub fn cache_size(&self) -> usize {
        self.descriptors.len()
    }
}

impl<R: ArtifactRepository> ArtifactRepository for CachingArtifactRepository<R> {
    fn read_descriptor(&self, coords: &ArtifactCoords) -> Result<Option<ArtifactDescriptor>> {
        if let Some(cached) = self.descriptors.get(coords) {
            return Ok(cached.clone());
        }

        let descriptor = self.inner.read_descriptor(coords)?;
        self.descriptors.insert(coords.clone(), descriptor.clone());
        Ok(descriptor)
    }

    fn available_versions(&self, key: &ArtifactKey) -> Result<Vec<Version>> {
        if let Some(cached) = self.versions.get(key) {
            return Ok(cached.clone());
        }

        let versions = self.inner.available_versions(key)?;
        self.versions.insert(key.clone(), versions.clone());
        Ok(versions)
    }
}
