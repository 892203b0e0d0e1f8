use super::{ArtifactCoords, ArtifactKey, Scope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A node chosen by the collector for one artifact key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDependency {
    #[serde(flatten)]
    coords: ArtifactCoords,
    scope: Scope,
    depth: usize,
    direct: bool,
    optional: bool,
    /// Key of the node this one was reached through; `None` for direct dependencies.
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<ArtifactKey>,
}

impl ResolvedDependency {
    pub fn new(
        coords: ArtifactCoords,
        scope: Scope,
        depth: usize,
        optional: bool,
        parent: Option<ArtifactKey>,
    ) -> Self {
        Self {
            coords,
            scope,
            depth,
            direct: depth == 1,
            optional,
            parent,
        }
    }

    pub fn coords(&self) -> &ArtifactCoords {
        &self.coords
    }

    pub fn key(&self) -> &ArtifactKey {
        self.coords.key()
    }

    pub fn version(&self) -> &str {
        self.coords.version()
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_direct(&self) -> bool {
        self.direct
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn parent(&self) -> Option<&ArtifactKey> {
        self.parent.as_ref()
    }

    pub(crate) fn set_scope(&mut self, scope: Scope) {
        self.scope = scope;
    }
}

/// Which slice of a resolved set a caller is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyView {
    /// `compile` and `runtime` artifacts only.
    #[default]
    Runtime,
    /// Everything collected, including direct `provided` and `test` dependencies.
    User,
}

impl FromStr for DependencyView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "runtime" => Ok(DependencyView::Runtime),
            "user" | "all" => Ok(DependencyView::User),
            _ => Err(format!(
                "Invalid view: {}. Please specify 'runtime' or 'user'",
                s
            )),
        }
    }
}

impl fmt::Display for DependencyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyView::Runtime => write!(f, "runtime"),
            DependencyView::User => write!(f, "user"),
        }
    }
}

/// Flattened result of one collection: one entry per artifact key,
/// in the order the entries were chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDependencySet {
    root: ArtifactCoords,
    dependencies: Vec<ResolvedDependency>,
}

impl ResolvedDependencySet {
    pub fn new(root: ArtifactCoords, dependencies: Vec<ResolvedDependency>) -> Self {
        Self { root, dependencies }
    }

    pub fn root(&self) -> &ArtifactCoords {
        &self.root
    }

    /// Every collected dependency (the "user dependencies" view).
    pub fn user_dependencies(&self) -> &[ResolvedDependency] {
        &self.dependencies
    }

    /// Dependencies that belong on the runtime classpath.
    pub fn runtime_dependencies(&self) -> Vec<&ResolvedDependency> {
        self.dependencies
            .iter()
            .filter(|d| d.scope().is_runtime())
            .collect()
    }

    pub fn view(&self, view: DependencyView) -> Vec<&ResolvedDependency> {
        match view {
            DependencyView::Runtime => self.runtime_dependencies(),
            DependencyView::User => self.dependencies.iter().collect(),
        }
    }

    pub fn get(&self, key: &ArtifactKey) -> Option<&ResolvedDependency> {
        self.dependencies.iter().find(|d| d.key() == key)
    }

    pub fn contains(&self, key: &ArtifactKey) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Children of `parent` (or of the root when `None`) in resolution order.
    pub fn children_of<'a>(
        &'a self,
        parent: Option<&'a ArtifactKey>,
    ) -> impl Iterator<Item = &'a ResolvedDependency> + 'a {
        self.dependencies.iter().filter(move |d| d.parent() == parent)
    }
}
