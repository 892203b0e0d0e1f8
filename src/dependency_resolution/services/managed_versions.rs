use crate::dependency_resolution::domain::{ArtifactCoords, ArtifactDescriptor, ArtifactKey, Scope};
use crate::ports::outbound::ArtifactRepository;
use crate::shared::error::ResolutionError;
use crate::shared::Result;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Version constraints applied to transitive nodes (dependency management).
///
/// Precedence, highest first: caller-supplied pins, the root's own managed
/// entries, then entries of `import`-scoped BOMs in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagedVersions {
    versions: HashMap<ArtifactKey, String>,
}

impl ManagedVersions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pins(pins: HashMap<ArtifactKey, String>) -> Self {
        Self { versions: pins }
    }

    pub fn get(&self, key: &ArtifactKey) -> Option<&str> {
        self.versions.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    fn insert_if_absent(&mut self, key: &ArtifactKey, version: &str) {
        self.versions
            .entry(key.clone())
            .or_insert_with(|| version.to_string());
    }

    /// Extends these pins with the root descriptor's dependency management,
    /// expanding BOM imports through `repository`.
    ///
    /// # Errors
    /// Fails when an imported BOM's descriptor cannot be found.
    pub fn import_from<R: ArtifactRepository + ?Sized>(
        mut self,
        root: &ArtifactCoords,
        descriptor: &ArtifactDescriptor,
        repository: &R,
    ) -> Result<Self> {
        let mut imported = HashSet::new();
        self.merge_descriptor(root, descriptor, repository, &mut imported)?;
        Ok(self)
    }

    fn merge_descriptor<R: ArtifactRepository + ?Sized>(
        &mut self,
        owner: &ArtifactCoords,
        descriptor: &ArtifactDescriptor,
        repository: &R,
        imported: &mut HashSet<ArtifactKey>,
    ) -> Result<()> {
        let (imports, pins): (Vec<_>, Vec<_>) = descriptor
            .managed_dependencies()
            .iter()
            .partition(|d| d.scope() == Scope::Import && d.key().artifact_type() == "pom");

        for pin in pins {
            self.insert_if_absent(pin.key(), pin.coords().version());
        }

        for bom in imports {
            if !imported.insert(bom.key().clone()) {
                continue;
            }
            debug!("Importing managed versions from {}", bom.coords());
            let bom_descriptor = repository.read_descriptor(bom.coords())?.ok_or_else(|| {
                ResolutionError::DescriptorNotFound {
                    requested_by: owner.to_string(),
                    missing: bom.coords().to_string(),
                }
            })?;
            self.merge_descriptor(bom.coords(), &bom_descriptor, repository, imported)?;
        }

        Ok(())
    }
}
