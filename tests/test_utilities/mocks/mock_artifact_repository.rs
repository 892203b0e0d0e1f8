use phase_resolver::prelude::*;
use phase_resolver::dependency_resolution::domain::Version;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock ArtifactRepository backed by a map, counting every lookup
#[derive(Default, Clone)]
pub struct MockArtifactRepository {
    descriptors: HashMap<ArtifactCoords, ArtifactDescriptor>,
    pub descriptor_reads: Arc<AtomicUsize>,
    pub version_listings: Arc<AtomicUsize>,
    fail_on: Option<ArtifactCoords>,
}

impl MockArtifactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `coords` with the given declared dependencies.
    pub fn with(mut self, coords: &str, dependencies: Vec<Dependency>) -> Self {
        self.descriptors.insert(
            coords.parse().unwrap(),
            ArtifactDescriptor::new(dependencies),
        );
        self
    }

    pub fn with_descriptor(mut self, coords: &str, descriptor: ArtifactDescriptor) -> Self {
        self.descriptors.insert(coords.parse().unwrap(), descriptor);
        self
    }

    /// Makes every read of `coords` fail with a backing store error.
    pub fn failing_on(mut self, coords: &str) -> Self {
        self.fail_on = Some(coords.parse().unwrap());
        self
    }

    pub fn read_count(&self) -> usize {
        self.descriptor_reads.load(Ordering::SeqCst)
    }
}

impl ArtifactRepository for MockArtifactRepository {
    fn read_descriptor(&self, coords: &ArtifactCoords) -> Result<Option<ArtifactDescriptor>> {
        self.descriptor_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.as_ref() == Some(coords) {
            anyhow::bail!("Mock backing store failure for {}", coords);
        }
        Ok(self.descriptors.get(coords).cloned())
    }

    fn available_versions(&self, key: &ArtifactKey) -> Result<Vec<Version>> {
        self.version_listings.fetch_add(1, Ordering::SeqCst);
        self.descriptors
            .keys()
            .filter(|coords| coords.key() == key)
            .map(|coords| Version::parse(coords.version()))
            .collect()
    }
}
