use crate::dependency_resolution::domain::{ArtifactCoords, ArtifactDescriptor};
use crate::shared::Result;
use std::path::Path;

/// Artifacts listed in a repository manifest, in file order.
pub type RepositoryEntries = Vec<(ArtifactCoords, ArtifactDescriptor)>;

/// RepositoryManifestReader port for loading an artifact repository from disk
///
/// A manifest describes every artifact the repository knows: its coordinates,
/// declared dependencies and managed dependencies.
pub trait RepositoryManifestReader {
    /// Reads and parses the manifest at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The manifest does not exist or is not a regular file
    /// - The manifest is a symbolic link or exceeds the size limit
    /// - The content is not a valid manifest
    fn read_manifest(&self, path: &Path) -> Result<RepositoryEntries>;
}
