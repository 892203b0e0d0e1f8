use super::ManagedVersions;
use crate::dependency_resolution::domain::{
    ArtifactCoords, ArtifactDescriptor, ArtifactKey, Dependency, Exclusion, ResolvedDependency,
    ResolvedDependencySet, Scope, VersionRequirement,
};
use crate::dependency_resolution::policies::{ScopePolicy, Traversal};
use crate::ports::outbound::ArtifactRepository;
use crate::shared::error::ResolutionError;
use crate::shared::Result;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// One dependency edge waiting to be visited.
struct FrontierEntry {
    dependency: Dependency,
    depth: usize,
    /// Effective scope of the declaring node, `None` when declared by the root
    parent_scope: Option<Scope>,
    requested_by: ArtifactCoords,
    parent_key: Option<ArtifactKey>,
    /// Exclusions accumulated from every ancestor edge
    exclusions: Vec<Exclusion>,
}

/// Per-call traversal state. Dropped once the flattened set is built.
struct CollectionState {
    chosen: Vec<Option<ResolvedDependency>>,
    index: HashMap<ArtifactKey, usize>,
    /// Every transitive edge that survived exclusions and the scope policy:
    /// child key -> (declaring parent key, declared scope)
    edges: HashMap<ArtifactKey, Vec<(ArtifactKey, Scope)>>,
    queue: VecDeque<FrontierEntry>,
    visited: usize,
}

impl CollectionState {
    fn new() -> Self {
        Self {
            chosen: Vec::new(),
            index: HashMap::new(),
            edges: HashMap::new(),
            queue: VecDeque::new(),
            visited: 0,
        }
    }

    fn record_edge(&mut self, child: &ArtifactKey, parent: &ArtifactKey, declared: Scope) {
        self.edges
            .entry(child.clone())
            .or_default()
            .push((parent.clone(), declared));
    }

    fn chosen_scope(&self, key: &ArtifactKey) -> Option<Scope> {
        self.index
            .get(key)
            .and_then(|&i| self.chosen[i].as_ref())
            .map(ResolvedDependency::scope)
    }

    /// Gives every transitive winner the widest scope any of its incoming
    /// edges carries, re-deriving through parents until nothing changes.
    /// Scopes only ever widen, so this terminates.
    fn widen_scopes(&mut self) {
        loop {
            let mut changed = false;
            for i in 0..self.chosen.len() {
                let Some(node) = self.chosen[i].as_ref() else {
                    continue;
                };
                if node.is_direct() {
                    continue;
                }
                let current = node.scope();
                let widest = self
                    .edges
                    .get(node.key())
                    .into_iter()
                    .flatten()
                    .filter_map(|(parent, declared)| {
                        self.chosen_scope(parent)
                            .map(|p| ScopePolicy::effective_scope(p, *declared))
                    })
                    .fold(current, ScopePolicy::wider);

                if widest != current {
                    if let Some(node) = self.chosen[i].as_mut() {
                        debug!("Widening {} from {} to {}", node.key(), current, widest);
                        node.set_scope(widest);
                    }
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
    }

    /// Whether a node for `key` at `depth` would be chosen over what is recorded.
    /// Nearer wins; at equal depth the first one encountered stays.
    fn wins(&self, key: &ArtifactKey, depth: usize) -> bool {
        match self.index.get(key).and_then(|&i| self.chosen[i].as_ref()) {
            Some(existing) => depth < existing.depth(),
            None => true,
        }
    }

    fn choose(&mut self, node: ResolvedDependency) {
        if let Some(previous) = self.index.get(node.key()).copied() {
            self.chosen[previous] = None;
        }
        self.index.insert(node.key().clone(), self.chosen.len());
        self.chosen.push(Some(node));
    }

    fn into_dependencies(mut self) -> Vec<ResolvedDependency> {
        self.widen_scopes();
        self.chosen.into_iter().flatten().collect()
    }
}

/// DependencyGraphCollector walks an artifact's dependency graph breadth-first
/// and flattens it with nearest-wins conflict resolution.
///
/// Each call to [`collect`](Self::collect) is an independent session; the
/// collector itself only holds read-only configuration and can be reused.
pub struct DependencyGraphCollector<'r, R: ArtifactRepository + ?Sized> {
    repository: &'r R,
    managed: ManagedVersions,
    timeout: Option<Duration>,
}

impl<'r, R: ArtifactRepository + ?Sized> DependencyGraphCollector<'r, R> {
    pub fn new(repository: &'r R) -> Self {
        Self {
            repository,
            managed: ManagedVersions::new(),
            timeout: None,
        }
    }

    /// Pins versions of transitive artifacts, taking precedence over the
    /// root descriptor's own dependency management.
    pub fn with_managed_versions(mut self, pins: HashMap<ArtifactKey, String>) -> Self {
        self.managed = ManagedVersions::from_pins(pins);
        self
    }

    /// Aborts collection once `timeout` has elapsed, checked between expansions.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Collects the flattened dependency set of `root`
    ///
    /// # Arguments
    /// * `root` - The artifact whose dependencies are resolved
    /// * `overrides` - Direct dependencies replacing the root's declared ones
    ///   with the same artifact key; unmatched overrides are appended
    ///
    /// # Errors
    /// Fails without a partial result when any descriptor is missing, a
    /// version range has no candidate, or the timeout expires.
    pub fn collect(
        &self,
        root: &ArtifactCoords,
        overrides: &[Dependency],
    ) -> Result<ResolvedDependencySet> {
        let started = Instant::now();
        let deadline = self.timeout.map(|t| started + t);

        let root_descriptor = self.fetch_descriptor(root, root)?;
        let managed = self
            .managed
            .clone()
            .import_from(root, &root_descriptor, self.repository)?;

        let mut state = CollectionState::new();
        for dependency in direct_dependencies(&root_descriptor, overrides) {
            state.queue.push_back(FrontierEntry {
                dependency,
                depth: 1,
                parent_scope: None,
                requested_by: root.clone(),
                parent_key: None,
                exclusions: Vec::new(),
            });
        }

        while let Some(entry) = state.queue.pop_front() {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Err(ResolutionError::Timeout {
                    root: root.to_string(),
                    visited: state.visited,
                }
                .into());
            }
            state.visited += 1;
            self.visit(root, entry, &managed, &mut state)?;
        }

        let dependencies = state.into_dependencies();
        info!(
            "Resolved {} dependencies of {} in {:?}",
            dependencies.len(),
            root,
            started.elapsed()
        );
        Ok(ResolvedDependencySet::new(root.clone(), dependencies))
    }

    fn visit(
        &self,
        root: &ArtifactCoords,
        entry: FrontierEntry,
        managed: &ManagedVersions,
        state: &mut CollectionState,
    ) -> Result<()> {
        let key = entry.dependency.key().clone();

        if key == *root.key() {
            trace!("Skipping dependency cycle back to the root at {}", entry.requested_by);
            return Ok(());
        }

        if entry.exclusions.iter().any(|e| e.matches(&key)) {
            trace!("{} excluded below {}", key, entry.requested_by);
            return Ok(());
        }

        let scope = match ScopePolicy::traverse(entry.parent_scope, &entry.dependency) {
            Traversal::Include(scope) => scope,
            Traversal::Skip => {
                trace!("{} not propagated from {}", entry.dependency, entry.requested_by);
                return Ok(());
            }
        };

        if let Some(parent) = &entry.parent_key {
            state.record_edge(&key, parent, entry.dependency.scope());
        }

        if !state.wins(&key, entry.depth) {
            trace!("{} already chosen at a nearer or equal depth", key);
            return Ok(());
        }

        let declared_version = match managed.get(&key) {
            Some(pinned) if entry.depth > 1 => pinned,
            _ => entry.dependency.coords().version(),
        };
        let coords = self.resolve_version(&entry.requested_by, &key, declared_version)?;
        let descriptor = self.fetch_descriptor(&entry.requested_by, &coords)?;

        debug!(
            "{}{} ({}) via {}",
            "  ".repeat(entry.depth - 1),
            coords,
            scope,
            entry.requested_by
        );

        let mut exclusions = entry.exclusions;
        exclusions.extend(entry.dependency.exclusions().iter().cloned());

        for child in descriptor.dependencies() {
            state.queue.push_back(FrontierEntry {
                dependency: child.clone(),
                depth: entry.depth + 1,
                parent_scope: Some(scope),
                requested_by: coords.clone(),
                parent_key: Some(key.clone()),
                exclusions: exclusions.clone(),
            });
        }

        state.choose(ResolvedDependency::new(
            coords,
            scope,
            entry.depth,
            entry.dependency.is_optional(),
            entry.parent_key,
        ));
        Ok(())
    }

    fn resolve_version(
        &self,
        requested_by: &ArtifactCoords,
        key: &ArtifactKey,
        declared: &str,
    ) -> Result<ArtifactCoords> {
        match VersionRequirement::parse(declared)? {
            VersionRequirement::Soft(version) => Ok(key.with_version(version.as_str())),
            VersionRequirement::Range(range) => {
                let candidates = self.repository.available_versions(key)?;
                let selected = range.select_highest(&candidates).ok_or_else(|| {
                    ResolutionError::NoMatchingVersion {
                        requested_by: requested_by.to_string(),
                        artifact: key.to_string(),
                        range: range.to_string(),
                    }
                })?;
                debug!("Range {} of {} resolved to {}", range, key, selected);
                Ok(key.with_version(selected.as_str()))
            }
        }
    }

    fn fetch_descriptor(
        &self,
        requested_by: &ArtifactCoords,
        coords: &ArtifactCoords,
    ) -> Result<ArtifactDescriptor> {
        self.repository.read_descriptor(coords)?.ok_or_else(|| {
            ResolutionError::DescriptorNotFound {
                requested_by: requested_by.to_string(),
                missing: coords.to_string(),
            }
            .into()
        })
    }
}

/// The root's declared direct dependencies with `overrides` substituted by key.
fn direct_dependencies(
    descriptor: &ArtifactDescriptor,
    overrides: &[Dependency],
) -> Vec<Dependency> {
    let mut used = vec![false; overrides.len()];
    let mut direct: Vec<Dependency> = descriptor
        .dependencies()
        .iter()
        .map(|declared| {
            match overrides.iter().position(|o| o.key() == declared.key()) {
                Some(i) => {
                    used[i] = true;
                    overrides[i].clone()
                }
                None => declared.clone(),
            }
        })
        .collect();

    direct.extend(
        overrides
            .iter()
            .zip(used)
            .filter(|(_, used)| !used)
            .map(|(o, _)| o.clone()),
    );
    direct
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::repository::InMemoryArtifactRepository;

    fn dep(coords: &str) -> Dependency {
        Dependency::parse(coords).unwrap()
    }

    fn descriptor(deps: Vec<Dependency>) -> ArtifactDescriptor {
        ArtifactDescriptor::new(deps)
    }

    fn keys(set: &ResolvedDependencySet) -> Vec<String> {
        set.user_dependencies()
            .iter()
            .map(|d| d.coords().to_string())
            .collect()
    }

    fn root() -> ArtifactCoords {
        "org.acme:app:1.0".parse().unwrap()
    }

    #[test]
    fn test_collects_transitive_in_breadth_first_order() {
        let repo = InMemoryArtifactRepository::new()
            .with_artifact(
                "org.acme:app:1.0",
                descriptor(vec![dep("org.acme:a:1.0"), dep("org.acme:b:1.0")]),
            )
            .unwrap()
            .with_artifact("org.acme:a:1.0", descriptor(vec![dep("org.acme:c:1.0")]))
            .unwrap()
            .with_artifact("org.acme:b:1.0", descriptor(vec![]))
            .unwrap()
            .with_artifact("org.acme:c:1.0", descriptor(vec![]))
            .unwrap();

        let set = DependencyGraphCollector::new(&repo).collect(&root(), &[]).unwrap();
        assert_eq!(
            keys(&set),
            vec!["org.acme:a:1.0", "org.acme:b:1.0", "org.acme:c:1.0"]
        );
        let c = set.get(&ArtifactKey::of("org.acme", "c")).unwrap();
        assert_eq!(c.depth(), 2);
        assert_eq!(c.parent(), Some(&ArtifactKey::of("org.acme", "a")));
    }

    #[test]
    fn test_equal_depth_first_encountered_wins() {
        let repo = InMemoryArtifactRepository::new()
            .with_artifact(
                "org.acme:app:1.0",
                descriptor(vec![dep("org.acme:a:1.0"), dep("org.acme:b:1.0")]),
            )
            .unwrap()
            .with_artifact("org.acme:a:1.0", descriptor(vec![dep("org.acme:shared:1.0")]))
            .unwrap()
            .with_artifact("org.acme:b:1.0", descriptor(vec![dep("org.acme:shared:2.0")]))
            .unwrap()
            .with_artifact("org.acme:shared:1.0", descriptor(vec![]))
            .unwrap();

        let set = DependencyGraphCollector::new(&repo).collect(&root(), &[]).unwrap();
        let shared = set.get(&ArtifactKey::of("org.acme", "shared")).unwrap();
        assert_eq!(shared.version(), "1.0");
    }

    #[test]
    fn test_compile_path_widens_node_first_seen_under_test_dependency() {
        let repo = InMemoryArtifactRepository::new()
            .with_artifact(
                "org.acme:app:1.0",
                descriptor(vec![
                    dep("org.junit:junit:4.13").with_scope(Scope::Test),
                    dep("org.acme:web:1.0"),
                ]),
            )
            .unwrap()
            .with_artifact("org.junit:junit:4.13", descriptor(vec![dep("org.hamcrest:core:1.3")]))
            .unwrap()
            .with_artifact("org.acme:web:1.0", descriptor(vec![dep("org.acme:lib:1.0")]))
            .unwrap()
            .with_artifact("org.acme:lib:1.0", descriptor(vec![dep("org.hamcrest:core:1.3")]))
            .unwrap()
            .with_artifact(
                "org.hamcrest:core:1.3",
                descriptor(vec![dep("org.hamcrest:extra:1.0").with_scope(Scope::Runtime)]),
            )
            .unwrap()
            .with_artifact("org.hamcrest:extra:1.0", descriptor(vec![]))
            .unwrap();

        let set = DependencyGraphCollector::new(&repo).collect(&root(), &[]).unwrap();
        let hamcrest = set.get(&ArtifactKey::of("org.hamcrest", "core")).unwrap();
        assert_eq!(hamcrest.depth(), 2);
        assert_eq!(hamcrest.scope(), Scope::Compile);
        // The widening carries down to the winner's own dependencies
        let extra = set.get(&ArtifactKey::of("org.hamcrest", "extra")).unwrap();
        assert_eq!(extra.scope(), Scope::Runtime);

        let runtime: Vec<String> = set
            .runtime_dependencies()
            .iter()
            .map(|d| d.key().to_string())
            .collect();
        assert_eq!(
            runtime,
            vec!["org.acme:web", "org.hamcrest:core", "org.acme:lib", "org.hamcrest:extra"]
        );
    }

    #[test]
    fn test_direct_dependency_scope_is_never_widened() {
        let repo = InMemoryArtifactRepository::new()
            .with_artifact(
                "org.acme:app:1.0",
                descriptor(vec![
                    dep("org.acme:a:1.0"),
                    dep("org.acme:shared:1.0").with_scope(Scope::Test),
                ]),
            )
            .unwrap()
            .with_artifact("org.acme:a:1.0", descriptor(vec![dep("org.acme:shared:1.0")]))
            .unwrap()
            .with_artifact("org.acme:shared:1.0", descriptor(vec![]))
            .unwrap();

        let set = DependencyGraphCollector::new(&repo).collect(&root(), &[]).unwrap();
        let shared = set.get(&ArtifactKey::of("org.acme", "shared")).unwrap();
        assert!(shared.is_direct());
        assert_eq!(shared.scope(), Scope::Test);
    }

    #[test]
    fn test_root_cycle_is_ignored() {
        let repo = InMemoryArtifactRepository::new()
            .with_artifact("org.acme:app:1.0", descriptor(vec![dep("org.acme:a:1.0")]))
            .unwrap()
            .with_artifact("org.acme:a:1.0", descriptor(vec![dep("org.acme:app:1.0")]))
            .unwrap();

        let set = DependencyGraphCollector::new(&repo).collect(&root(), &[]).unwrap();
        assert_eq!(keys(&set), vec!["org.acme:a:1.0"]);
    }

    #[test]
    fn test_runtime_edge_downgrades_transitive_compile() {
        let repo = InMemoryArtifactRepository::new()
            .with_artifact(
                "org.acme:app:1.0",
                descriptor(vec![dep("org.acme:a:1.0").with_scope(Scope::Runtime)]),
            )
            .unwrap()
            .with_artifact("org.acme:a:1.0", descriptor(vec![dep("org.acme:b:1.0")]))
            .unwrap()
            .with_artifact("org.acme:b:1.0", descriptor(vec![]))
            .unwrap();

        let set = DependencyGraphCollector::new(&repo).collect(&root(), &[]).unwrap();
        let b = set.get(&ArtifactKey::of("org.acme", "b")).unwrap();
        assert_eq!(b.scope(), Scope::Runtime);
    }

    #[test]
    fn test_overrides_replace_and_append() {
        let repo = InMemoryArtifactRepository::new()
            .with_artifact(
                "org.acme:app:1.0",
                descriptor(vec![dep("org.acme:a:1.0"), dep("org.acme:b:1.0")]),
            )
            .unwrap()
            .with_artifact("org.acme:a:2.0", descriptor(vec![]))
            .unwrap()
            .with_artifact("org.acme:b:1.0", descriptor(vec![]))
            .unwrap()
            .with_artifact("org.acme:extra:1.0", descriptor(vec![]))
            .unwrap();

        let overrides = vec![dep("org.acme:extra:1.0"), dep("org.acme:a:2.0")];
        let set = DependencyGraphCollector::new(&repo)
            .collect(&root(), &overrides)
            .unwrap();
        assert_eq!(
            keys(&set),
            vec!["org.acme:a:2.0", "org.acme:b:1.0", "org.acme:extra:1.0"]
        );
    }

    #[test]
    fn test_managed_version_applies_to_transitive_only() {
        let repo = InMemoryArtifactRepository::new()
            .with_artifact(
                "org.acme:app:1.0",
                descriptor(vec![dep("org.acme:a:1.0"), dep("org.acme:b:1.0")])
                    .with_managed(vec![dep("org.acme:a:9.0"), dep("org.acme:c:3.0")]),
            )
            .unwrap()
            .with_artifact("org.acme:a:1.0", descriptor(vec![]))
            .unwrap()
            .with_artifact("org.acme:b:1.0", descriptor(vec![dep("org.acme:c:1.0")]))
            .unwrap()
            .with_artifact("org.acme:c:3.0", descriptor(vec![]))
            .unwrap();

        let set = DependencyGraphCollector::new(&repo).collect(&root(), &[]).unwrap();
        assert_eq!(
            keys(&set),
            vec!["org.acme:a:1.0", "org.acme:b:1.0", "org.acme:c:3.0"]
        );
    }

    #[test]
    fn test_caller_pins_override_descriptor_management() {
        let repo = InMemoryArtifactRepository::new()
            .with_artifact(
                "org.acme:app:1.0",
                descriptor(vec![dep("org.acme:b:1.0")])
                    .with_managed(vec![dep("org.acme:c:3.0")]),
            )
            .unwrap()
            .with_artifact("org.acme:b:1.0", descriptor(vec![dep("org.acme:c:1.0")]))
            .unwrap()
            .with_artifact("org.acme:c:4.0", descriptor(vec![]))
            .unwrap();

        let mut pins = HashMap::new();
        pins.insert(ArtifactKey::of("org.acme", "c"), "4.0".to_string());
        let set = DependencyGraphCollector::new(&repo)
            .with_managed_versions(pins)
            .collect(&root(), &[])
            .unwrap();
        assert_eq!(
            set.get(&ArtifactKey::of("org.acme", "c")).unwrap().version(),
            "4.0"
        );
    }

    #[test]
    fn test_version_range_picks_highest_match() {
        let repo = InMemoryArtifactRepository::new()
            .with_artifact("org.acme:app:1.0", descriptor(vec![dep("org.acme:a:[1.0,2.0)")]))
            .unwrap()
            .with_artifact("org.acme:a:1.0", descriptor(vec![]))
            .unwrap()
            .with_artifact("org.acme:a:1.5", descriptor(vec![]))
            .unwrap()
            .with_artifact("org.acme:a:2.0", descriptor(vec![]))
            .unwrap();

        let set = DependencyGraphCollector::new(&repo).collect(&root(), &[]).unwrap();
        assert_eq!(keys(&set), vec!["org.acme:a:1.5"]);
    }

    #[test]
    fn test_version_range_without_candidate_is_fatal() {
        let repo = InMemoryArtifactRepository::new()
            .with_artifact("org.acme:app:1.0", descriptor(vec![dep("org.acme:a:[5.0,)")]))
            .unwrap()
            .with_artifact("org.acme:a:1.0", descriptor(vec![]))
            .unwrap();

        let err = DependencyGraphCollector::new(&repo)
            .collect(&root(), &[])
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ResolutionError>(),
            Some(&ResolutionError::NoMatchingVersion {
                requested_by: "org.acme:app:1.0".to_string(),
                artifact: "org.acme:a".to_string(),
                range: "[5.0,)".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_root_descriptor_is_fatal() {
        let repo = InMemoryArtifactRepository::new();
        let err = DependencyGraphCollector::new(&repo)
            .collect(&root(), &[])
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResolutionError>(),
            Some(ResolutionError::DescriptorNotFound { .. })
        ));
    }

    #[test]
    fn test_zero_timeout_aborts() {
        let repo = InMemoryArtifactRepository::new()
            .with_artifact("org.acme:app:1.0", descriptor(vec![dep("org.acme:a:1.0")]))
            .unwrap()
            .with_artifact("org.acme:a:1.0", descriptor(vec![]))
            .unwrap();

        let err = DependencyGraphCollector::new(&repo)
            .with_timeout(Duration::ZERO)
            .collect(&root(), &[])
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResolutionError>(),
            Some(ResolutionError::Timeout { visited: 0, .. })
        ));
    }

    #[test]
    fn test_direct_dependencies_with_no_overrides() {
        let declared = descriptor(vec![dep("org.acme:a:1.0")]);
        let direct = direct_dependencies(&declared, &[]);
        assert_eq!(direct, vec![dep("org.acme:a:1.0")]);
    }

    #[test]
    fn test_traversal_state_nearer_replaces_and_moves_to_end() {
        let mut state = CollectionState::new();
        let node = |coords: &str, depth| {
            ResolvedDependency::new(coords.parse().unwrap(), Scope::Compile, depth, false, None)
        };
        state.choose(node("org.acme:x:2.0", 3));
        state.choose(node("org.acme:y:1.0", 1));

        let x = ArtifactKey::of("org.acme", "x");
        assert!(!state.wins(&x, 3));
        assert!(state.wins(&x, 2));
        state.choose(node("org.acme:x:1.0", 2));

        let order: Vec<String> = state
            .into_dependencies()
            .iter()
            .map(|d| d.coords().to_string())
            .collect();
        assert_eq!(order, vec!["org.acme:y:1.0", "org.acme:x:1.0"]);
    }
}
