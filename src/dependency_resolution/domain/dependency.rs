use super::{ArtifactCoords, ArtifactKey, Scope};
use crate::shared::error::ResolutionError;
use crate::shared::Result;
use std::fmt;
use std::str::FromStr;

/// An exclusion pattern on a dependency edge, `group:artifact` with `*` wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Exclusion {
    group_id: String,
    artifact_id: String,
}

impl Exclusion {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    pub fn matches(&self, key: &ArtifactKey) -> bool {
        (self.group_id == "*" || self.group_id == key.group_id())
            && (self.artifact_id == "*" || self.artifact_id == key.artifact_id())
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

impl FromStr for Exclusion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split(':').collect::<Vec<_>>().as_slice() {
            [g, a] if !g.is_empty() && !a.is_empty() => Ok(Self::new(*g, *a)),
            _ => Err(ResolutionError::InvalidCoordinates {
                value: s.to_string(),
                reason: "exclusions are written as group:artifact".to_string(),
            }
            .into()),
        }
    }
}

/// A declared dependency edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    coords: ArtifactCoords,
    scope: Scope,
    optional: bool,
    exclusions: Vec<Exclusion>,
}

impl Dependency {
    pub fn new(coords: ArtifactCoords, scope: Scope) -> Self {
        Self {
            coords,
            scope,
            optional: false,
            exclusions: Vec::new(),
        }
    }

    /// Parses coordinates and builds a `compile` dependency.
    pub fn parse(coords: &str) -> Result<Self> {
        Ok(Self::new(coords.parse()?, Scope::Compile))
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn exclude(mut self, exclusion: Exclusion) -> Self {
        self.exclusions.push(exclusion);
        self
    }

    pub fn coords(&self) -> &ArtifactCoords {
        &self.coords
    }

    pub fn key(&self) -> &ArtifactKey {
        self.coords.key()
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.coords, self.scope)?;
        if self.optional {
            write!(f, " optional")?;
        }
        Ok(())
    }
}

/// What a repository knows about one artifact version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    dependencies: Vec<Dependency>,
    managed_dependencies: Vec<Dependency>,
}

impl ArtifactDescriptor {
    pub fn new(dependencies: Vec<Dependency>) -> Self {
        Self {
            dependencies,
            managed_dependencies: Vec::new(),
        }
    }

    pub fn with_managed(mut self, managed_dependencies: Vec<Dependency>) -> Self {
        self.managed_dependencies = managed_dependencies;
        self
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Version constraints (dependency management), including `import`-scoped BOMs.
    pub fn managed_dependencies(&self) -> &[Dependency] {
        &self.managed_dependencies
    }
}
