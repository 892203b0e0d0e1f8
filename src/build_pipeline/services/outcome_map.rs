use super::outcome_resolver::Registry;
use crate::build_pipeline::domain::{OutcomeProviderDescription, OutcomeType};
use crate::shared::error::OutcomeError;
use crate::shared::Result;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

type Outcome = Arc<dyn Any + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProviderState {
    Running,
    Done,
    Failed,
}

/// Outcomes produced within one resolution session.
///
/// A type is either unresolved, resolved to a value, or resolved as absent
/// (pushed with [`push_absent`](Self::push_absent)). Asking for an unresolved
/// type runs its provider, at most once per session.
pub struct OutcomeMap {
    registry: Arc<Registry>,
    outcomes: HashMap<OutcomeType, Option<Outcome>>,
    states: HashMap<usize, ProviderState>,
    /// Outcome types whose providers are currently running, outermost first
    resolving: Vec<OutcomeType>,
    deadline: Option<Instant>,
}

impl OutcomeMap {
    pub(crate) fn new(registry: Arc<Registry>, deadline: Option<Instant>) -> Self {
        Self {
            registry,
            outcomes: HashMap::new(),
            states: HashMap::new(),
            resolving: Vec::new(),
            deadline,
        }
    }

    /// Returns the outcome of type `T`, running its provider if needed
    ///
    /// # Returns
    /// `Ok(None)` when the outcome was resolved as absent.
    ///
    /// # Errors
    /// - `NotProvided` when no provider is registered for `T`
    /// - `Cyclic` when `T` is requested while its own provider is running
    /// - `NotProduced` when the provider returned without pushing `T`
    /// - `ProviderFailed` when the provider already failed in this session
    /// - `DeadlineExceeded` when the session deadline passed before the provider started
    /// - any error returned by the provider itself
    pub fn resolve_outcome<T: Any + Send + Sync>(&mut self) -> Result<Option<Arc<T>>> {
        let outcome = OutcomeType::of::<T>();
        if !self.outcomes.contains_key(&outcome) {
            self.run_provider_for(outcome)?;
        }
        self.cached::<T>(outcome)
    }

    /// Like [`resolve_outcome`](Self::resolve_outcome) but treats an absent value as an error.
    pub fn require_outcome<T: Any + Send + Sync>(&mut self) -> Result<Arc<T>> {
        self.resolve_outcome::<T>()?.ok_or_else(|| {
            OutcomeError::Absent {
                outcome: OutcomeType::of::<T>().name().to_string(),
            }
            .into()
        })
    }

    /// Records the outcome of type `T`
    ///
    /// # Errors
    /// Returns `OutcomeError::AlreadyPushed` if `T` was already pushed in this session.
    pub fn push_outcome<T: Any + Send + Sync>(&mut self, value: T) -> Result<()> {
        self.push(OutcomeType::of::<T>(), Some(Arc::new(value)))
    }

    /// Records that `T` was computed and has no value.
    pub fn push_absent<T: Any + Send + Sync>(&mut self) -> Result<()> {
        self.push(OutcomeType::of::<T>(), None)
    }

    pub fn is_resolved<T: Any + Send + Sync>(&self) -> bool {
        self.outcomes.contains_key(&OutcomeType::of::<T>())
    }

    fn push(&mut self, outcome: OutcomeType, value: Option<Outcome>) -> Result<()> {
        if self.outcomes.contains_key(&outcome) {
            return Err(OutcomeError::AlreadyPushed {
                outcome: outcome.name().to_string(),
            }
            .into());
        }
        self.outcomes.insert(outcome, value);
        Ok(())
    }

    fn cached<T: Any + Send + Sync>(&self, outcome: OutcomeType) -> Result<Option<Arc<T>>> {
        match self.outcomes.get(&outcome) {
            Some(Some(value)) => Arc::clone(value)
                .downcast::<T>()
                .map(Some)
                .map_err(|_| {
                    OutcomeError::NotProvided {
                        outcome: outcome.name().to_string(),
                    }
                    .into()
                }),
            Some(None) => Ok(None),
            None => Err(OutcomeError::NotProvided {
                outcome: outcome.name().to_string(),
            }
            .into()),
        }
    }

    fn run_provider_for(&mut self, outcome: OutcomeType) -> Result<()> {
        let description = self.registry.get(&outcome).cloned().ok_or_else(|| {
            OutcomeError::NotProvided {
                outcome: outcome.name().to_string(),
            }
        })?;

        match self.states.get(&description.index()) {
            Some(ProviderState::Running) => {
                let mut chain: Vec<String> =
                    self.resolving.iter().map(|t| t.name().to_string()).collect();
                chain.push(outcome.name().to_string());
                return Err(OutcomeError::Cyclic { chain }.into());
            }
            Some(ProviderState::Done) => return Err(not_produced(outcome, &description)),
            Some(ProviderState::Failed) => {
                return Err(OutcomeError::ProviderFailed {
                    outcome: outcome.name().to_string(),
                    provider: description.provider_id().to_string(),
                }
                .into())
            }
            None => {}
        }

        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(OutcomeError::DeadlineExceeded {
                provider: description.provider_id().to_string(),
            }
            .into());
        }

        debug!(
            "Running provider '{}' for {}",
            description.provider_id(),
            outcome.short_name()
        );
        self.states.insert(description.index(), ProviderState::Running);
        self.resolving.push(outcome);
        let result = description.provider().provide(self);
        self.resolving.pop();

        if let Err(e) = result {
            self.states.insert(description.index(), ProviderState::Failed);
            return Err(e);
        }
        self.states.insert(description.index(), ProviderState::Done);

        if !self.outcomes.contains_key(&outcome) {
            return Err(not_produced(outcome, &description));
        }
        Ok(())
    }
}

fn not_produced(outcome: OutcomeType, description: &OutcomeProviderDescription) -> anyhow::Error {
    OutcomeError::NotProduced {
        outcome: outcome.name().to_string(),
        provider: description.provider_id().to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use crate::build_pipeline::domain::{FnOutcomeProvider, OutcomeType};
    use crate::build_pipeline::services::{OutcomeResolver, OutcomeResolverFactory};
    use crate::shared::error::OutcomeError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    struct Sources(Vec<String>);
    #[derive(Debug, PartialEq)]
    struct Classes(usize);
    #[derive(Debug, PartialEq)]
    struct Jar(String);
    #[derive(Debug)]
    struct Unregistered;

    fn outcome_error(err: &anyhow::Error) -> &OutcomeError {
        err.downcast_ref::<OutcomeError>()
            .unwrap_or_else(|| panic!("not an outcome error: {err}"))
    }

    /// sources -> classes -> jar, counting how often each provider runs
    fn chain(runs: Arc<AtomicUsize>) -> OutcomeResolver {
        let mut factory = OutcomeResolverFactory::new();
        let sources_runs = Arc::clone(&runs);
        factory
            .add_provider(FnOutcomeProvider::new(
                "sources",
                vec![OutcomeType::of::<Sources>()],
                move |outcomes| {
                    sources_runs.fetch_add(1, Ordering::SeqCst);
                    outcomes.push_outcome(Sources(vec!["a.rs".into(), "b.rs".into()]))
                },
            ))
            .unwrap()
            .add_provider(FnOutcomeProvider::new(
                "compile",
                vec![OutcomeType::of::<Classes>()],
                |outcomes| {
                    let sources = outcomes.require_outcome::<Sources>()?;
                    outcomes.push_outcome(Classes(sources.0.len()))
                },
            ))
            .unwrap()
            .add_provider(FnOutcomeProvider::new(
                "package",
                vec![OutcomeType::of::<Jar>()],
                |outcomes| {
                    let classes = outcomes.require_outcome::<Classes>()?;
                    let sources = outcomes.require_outcome::<Sources>()?;
                    outcomes.push_outcome(Jar(format!("{}/{}", classes.0, sources.0.len())))
                },
            ))
            .unwrap();
        factory.build()
    }

    #[test]
    fn test_recursive_resolution() {
        let resolver = chain(Arc::new(AtomicUsize::new(0)));
        let jar = resolver.resolve::<Jar>().unwrap().unwrap();
        assert_eq!(*jar, Jar("2/2".to_string()));
    }

    #[test]
    fn test_provider_runs_once_per_session() {
        let runs = Arc::new(AtomicUsize::new(0));
        let resolver = chain(Arc::clone(&runs));
        let mut session = resolver.session();

        let first = session.require_outcome::<Sources>().unwrap();
        let _ = session.require_outcome::<Jar>().unwrap();
        let again = session.require_outcome::<Sources>().unwrap();

        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        // A fresh session runs it again
        resolver.session().require_outcome::<Sources>().unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_not_provided_names_the_type() {
        let resolver = chain(Arc::new(AtomicUsize::new(0)));
        let err = resolver.resolve::<Unregistered>().unwrap_err();
        assert!(err.to_string().contains("Unregistered"));
        assert!(err.to_string().contains("has not been provided"));
    }

    #[test]
    fn test_provider_without_push_fails() {
        let mut factory = OutcomeResolverFactory::new();
        factory
            .add_provider(FnOutcomeProvider::new(
                "lazy",
                vec![OutcomeType::of::<Classes>()],
                |_| Ok(()),
            ))
            .unwrap();
        let mut session = factory.build().session();

        let err = session.resolve_outcome::<Classes>().unwrap_err();
        assert!(matches!(
            outcome_error(&err),
            OutcomeError::NotProduced { provider, .. } if provider == "lazy"
        ));

        // Not re-run on a second request
        let err = session.resolve_outcome::<Classes>().unwrap_err();
        assert!(matches!(outcome_error(&err), OutcomeError::NotProduced { .. }));
    }

    #[test]
    fn test_duplicate_push_fails() {
        let mut factory = OutcomeResolverFactory::new();
        factory
            .add_provider(FnOutcomeProvider::new(
                "twice",
                vec![OutcomeType::of::<Classes>()],
                |outcomes| {
                    outcomes.push_outcome(Classes(1))?;
                    outcomes.push_outcome(Classes(2))
                },
            ))
            .unwrap();

        let err = factory.build().resolve::<Classes>().unwrap_err();
        assert!(matches!(outcome_error(&err), OutcomeError::AlreadyPushed { .. }));
    }

    #[test]
    fn test_cycle_is_reported_with_chain() {
        let mut factory = OutcomeResolverFactory::new();
        factory
            .add_provider(FnOutcomeProvider::new(
                "compile",
                vec![OutcomeType::of::<Classes>()],
                |outcomes| {
                    outcomes.require_outcome::<Jar>()?;
                    outcomes.push_outcome(Classes(0))
                },
            ))
            .unwrap()
            .add_provider(FnOutcomeProvider::new(
                "package",
                vec![OutcomeType::of::<Jar>()],
                |outcomes| {
                    outcomes.require_outcome::<Classes>()?;
                    outcomes.push_outcome(Jar(String::new()))
                },
            ))
            .unwrap();

        let err = factory.build().resolve::<Classes>().unwrap_err();
        match outcome_error(&err) {
            OutcomeError::Cyclic { chain } => {
                assert_eq!(chain.len(), 3);
                assert!(chain[0].ends_with("Classes"));
                assert!(chain[1].ends_with("Jar"));
                assert!(chain[2].ends_with("Classes"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("Cyclic outcome dependency"));
    }

    #[test]
    fn test_self_request_is_a_cycle() {
        let mut factory = OutcomeResolverFactory::new();
        factory
            .add_provider(FnOutcomeProvider::new(
                "selfish",
                vec![OutcomeType::of::<Classes>()],
                |outcomes| {
                    outcomes.require_outcome::<Classes>()?;
                    Ok(())
                },
            ))
            .unwrap();

        let err = factory.build().resolve::<Classes>().unwrap_err();
        assert!(matches!(outcome_error(&err), OutcomeError::Cyclic { .. }));
    }

    #[test]
    fn test_absent_outcome() {
        let mut factory = OutcomeResolverFactory::new();
        factory
            .add_provider(FnOutcomeProvider::new(
                "optional-jar",
                vec![OutcomeType::of::<Jar>()],
                |outcomes| outcomes.push_absent::<Jar>(),
            ))
            .unwrap();
        let mut session = factory.build().session();

        assert!(!session.is_resolved::<Jar>());
        assert_eq!(session.resolve_outcome::<Jar>().unwrap(), None);
        assert!(session.is_resolved::<Jar>());

        let err = session.require_outcome::<Jar>().unwrap_err();
        assert!(matches!(outcome_error(&err), OutcomeError::Absent { .. }));
    }

    #[test]
    fn test_failed_provider_is_not_rerun() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&runs);
        let mut factory = OutcomeResolverFactory::new();
        factory
            .add_provider(FnOutcomeProvider::new(
                "broken",
                vec![OutcomeType::of::<Classes>()],
                move |_| {
                    counted.fetch_add(1, Ordering::SeqCst);
                    anyhow::bail!("compiler crashed")
                },
            ))
            .unwrap();
        let mut session = factory.build().session();

        let err = session.resolve_outcome::<Classes>().unwrap_err();
        assert_eq!(err.to_string(), "compiler crashed");
        let err = session.resolve_outcome::<Classes>().unwrap_err();
        assert!(matches!(outcome_error(&err), OutcomeError::ProviderFailed { .. }));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_seeded_outcome_skips_provider() {
        let runs = Arc::new(AtomicUsize::new(0));
        let resolver = chain(Arc::clone(&runs));
        let mut session = resolver.session();
        session
            .push_outcome(Sources(vec!["only.rs".to_string()]))
            .unwrap();

        let jar = session.require_outcome::<Jar>().unwrap();
        assert_eq!(jar.0, "1/1");
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_expired_deadline_stops_providers() {
        let resolver = chain(Arc::new(AtomicUsize::new(0)));
        let mut session = resolver.session_with_deadline(Duration::ZERO);

        let err = session.resolve_outcome::<Jar>().unwrap_err();
        assert!(matches!(
            outcome_error(&err),
            OutcomeError::DeadlineExceeded { provider } if provider == "package"
        ));
    }

    #[test]
    fn test_generous_deadline_allows_resolution() {
        let resolver = chain(Arc::new(AtomicUsize::new(0)));
        let mut session = resolver.session_with_deadline(Duration::from_secs(60));
        assert!(session.resolve_outcome::<Jar>().unwrap().is_some());
    }
}
