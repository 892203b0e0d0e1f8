use crate::dependency_resolution::domain::{Dependency, Scope};

/// Outcome of applying the scope rules to one dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Keep the node with this effective scope and expand its dependencies.
    Include(Scope),
    /// Drop the edge; neither the node nor anything below it is collected.
    Skip,
}

/// ScopePolicy encodes how scopes and optionality propagate through the graph.
///
/// Rules:
/// 1. Direct dependencies of the root are always kept with their declared
///    scope, optional or not. `import` is only valid in dependency management.
/// 2. Transitive `optional`, `provided` and `test` declarations are dropped.
/// 3. The effective scope of a transitive node is narrowed by its parent:
///    | parent \ child | compile  | runtime  |
///    |----------------|----------|----------|
///    | compile        | compile  | runtime  |
///    | runtime        | runtime  | runtime  |
///    | provided       | provided | provided |
///    | test           | test     | test     |
/// 4. When one transitive artifact is reached along several paths, it keeps
///    the widest scope among them (compile > runtime > provided > test).
///    Direct dependencies keep their declared scope.
pub struct ScopePolicy;

impl ScopePolicy {
    /// Decides whether `dependency`, declared by a node with `parent_scope`,
    /// is collected. `parent_scope` is `None` for the root's own declarations.
    pub fn traverse(parent_scope: Option<Scope>, dependency: &Dependency) -> Traversal {
        let declared = dependency.scope();
        if declared == Scope::Import {
            return Traversal::Skip;
        }

        let Some(parent_scope) = parent_scope else {
            return Traversal::Include(declared);
        };

        if dependency.is_optional() || !Self::is_propagable(declared) {
            return Traversal::Skip;
        }

        Traversal::Include(Self::effective_scope(parent_scope, declared))
    }

    /// Scopes that are exported to consumers of the declaring artifact.
    pub fn is_propagable(scope: Scope) -> bool {
        matches!(scope, Scope::Compile | Scope::Runtime)
    }

    /// Wider scopes reach more classpaths: compile > runtime > provided > test.
    pub fn wider(left: Scope, right: Scope) -> Scope {
        if Self::breadth(right) > Self::breadth(left) {
            right
        } else {
            left
        }
    }

    fn breadth(scope: Scope) -> u8 {
        match scope {
            Scope::Compile => 4,
            Scope::Runtime => 3,
            Scope::Provided => 2,
            Scope::Test => 1,
            Scope::Import => 0,
        }
    }

    /// Scope of a `child` declaration seen through a node of scope `parent`.
    pub fn effective_scope(parent: Scope, child: Scope) -> Scope {
        match (parent, child) {
            (Scope::Compile, child) => child,
            (Scope::Runtime, _) => Scope::Runtime,
            (Scope::Provided, _) => Scope::Provided,
            (Scope::Test, _) => Scope::Test,
            // Import never reaches the frontier
            (Scope::Import, child) => child,
        }
    }
}
