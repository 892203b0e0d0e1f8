use crate::dependency_resolution::domain::{
    ArtifactCoords, ArtifactDescriptor, ArtifactKey, Version,
};
use crate::ports::outbound::ArtifactRepository;
use crate::shared::Result;
use std::collections::HashMap;

/// InMemoryArtifactRepository serves descriptors from a map built up front.
///
/// Used by the CLI after the repository manifest has been read, and by tests
/// to describe small artifact graphs inline.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifactRepository {
    descriptors: HashMap<ArtifactCoords, ArtifactDescriptor>,
}

impl InMemoryArtifactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an artifact given as a coordinate string.
    ///
    /// # Errors
    /// Returns an error if `coords` is not `group:artifact[:type[:classifier]]:version`.
    pub fn with_artifact(self, coords: &str, descriptor: ArtifactDescriptor) -> Result<Self> {
        Ok(self.with_descriptor(coords.parse()?, descriptor))
    }

    pub fn with_descriptor(mut self, coords: ArtifactCoords, descriptor: ArtifactDescriptor) -> Self {
        self.insert(coords, descriptor);
        self
    }

    /// Adds or replaces the descriptor of `coords`.
    pub fn insert(&mut self, coords: ArtifactCoords, descriptor: ArtifactDescriptor) {
        self.descriptors.insert(coords, descriptor);
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl ArtifactRepository for InMemoryArtifactRepository {
    fn read_descriptor(&self, coords: &ArtifactCoords) -> Result<Option<ArtifactDescriptor>> {
        Ok(self.descriptors.get(coords).cloned())
    }

    fn available_versions(&self, key: &ArtifactKey) -> Result<Vec<Version>> {
        self.descriptors
            .keys()
            .filter(|coords| coords.key() == key)
            .map(|coords| Version::parse(coords.version()))
            .collect()
    }
}
