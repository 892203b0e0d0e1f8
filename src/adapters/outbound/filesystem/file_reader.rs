use crate::dependency_resolution::domain::{
    ArtifactCoords, ArtifactDescriptor, Dependency, Exclusion, Scope,
};
use crate::ports::outbound::{RepositoryEntries, RepositoryManifestReader};
use crate::shared::error::ResolverError;
use crate::shared::security::read_checked;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// On-disk layout of a repository manifest
///
/// ```toml
/// [[artifact]]
/// coords = "org.acme:app:1.0"
/// dependencies = [
///     "org.acme:core:1.0",
///     { coords = "org.junit:junit:4.13", scope = "test" },
///     { coords = "org.acme:extras:1.0", optional = true, exclusions = ["org.slf4j:*"] },
/// ]
/// managed = [{ coords = "org.acme:bom:pom:1.0", scope = "import" }]
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default)]
    artifact: Vec<ManifestArtifact>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestArtifact {
    coords: String,
    #[serde(default)]
    dependencies: Vec<ManifestDependency>,
    #[serde(default)]
    managed: Vec<ManifestDependency>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ManifestDependency {
    Coords(String),
    Detailed {
        coords: String,
        #[serde(default)]
        scope: Option<String>,
        #[serde(default)]
        optional: bool,
        #[serde(default)]
        exclusions: Vec<String>,
    },
}

impl ManifestDependency {
    fn into_dependency(self) -> Result<Dependency> {
        match self {
            ManifestDependency::Coords(coords) => Dependency::parse(&coords),
            ManifestDependency::Detailed {
                coords,
                scope,
                optional,
                exclusions,
            } => {
                let scope = match scope {
                    Some(s) => s.parse::<Scope>().map_err(anyhow::Error::msg)?,
                    None => Scope::Compile,
                };
                let mut dependency = Dependency::parse(&coords)?
                    .with_scope(scope)
                    .optional(optional);
                for exclusion in exclusions {
                    dependency = dependency.exclude(exclusion.parse::<Exclusion>()?);
                }
                Ok(dependency)
            }
        }
    }
}

/// FileSystemReader adapter for reading repository manifests from the file system
///
/// Every read goes through the shared file safety checks: symbolic links
/// and oversized files are refused.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn parse_error(path: &Path, details: impl Into<String>) -> anyhow::Error {
        ResolverError::ManifestParseError {
            path: path.to_path_buf(),
            details: details.into(),
        }
        .into()
    }

    fn convert(path: &Path, artifact: ManifestArtifact) -> Result<(ArtifactCoords, ArtifactDescriptor)> {
        let coords: ArtifactCoords = artifact
            .coords
            .parse()
            .map_err(|e: anyhow::Error| Self::parse_error(path, e.to_string()))?;

        let convert_all = |entries: Vec<ManifestDependency>, section: &str| {
            entries
                .into_iter()
                .map(|entry| {
                    entry.into_dependency().map_err(|e| {
                        Self::parse_error(path, format!("{} of {}: {}", section, coords, e))
                    })
                })
                .collect::<Result<Vec<_>>>()
        };

        let dependencies = convert_all(artifact.dependencies, "dependencies")?;
        let managed = convert_all(artifact.managed, "managed")?;
        Ok((coords, ArtifactDescriptor::new(dependencies).with_managed(managed)))
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryManifestReader for FileSystemReader {
    fn read_manifest(&self, path: &Path) -> Result<RepositoryEntries> {
        if !path.exists() {
            return Err(ResolverError::ManifestNotFound {
                path: path.to_path_buf(),
                suggestion: "Pass the repository manifest with --repository <FILE>".to_string(),
            }
            .into());
        }

        let content = read_checked(path, "repository manifest")?;
        let manifest: ManifestFile =
            toml::from_str(&content).map_err(|e| Self::parse_error(path, e.to_string()))?;

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(manifest.artifact.len());
        for artifact in manifest.artifact {
            let (coords, descriptor) = Self::convert(path, artifact)?;
            if !seen.insert(coords.clone()) {
                return Err(Self::parse_error(
                    path,
                    format!("artifact {} is listed more than once", coords),
                ));
            }
            entries.push((coords, descriptor));
        }

        debug!("Read {} artifact(s) from {}", entries.len(), path.display());
        Ok(entries)
    }
}
