//! Outcome pipeline - a type-keyed scheduler for build phases
//!
//! Providers declare, when registered, which outcome types they produce.
//! An [`OutcomeMap`](services::OutcomeMap) session then runs providers lazily
//! when a consumer asks for a type that has not been produced yet; a provider
//! may itself ask for other outcomes, which pulls in their providers in turn.
//!
//! ```
//! use phase_resolver::build_pipeline::domain::{FnOutcomeProvider, OutcomeType};
//! use phase_resolver::build_pipeline::services::OutcomeResolverFactory;
//!
//! struct Greeting(String);
//!
//! let mut factory = OutcomeResolverFactory::new();
//! factory
//!     .add_provider(FnOutcomeProvider::new(
//!         "greeter",
//!         vec![OutcomeType::of::<Greeting>()],
//!         |outcomes| outcomes.push_outcome(Greeting("hello".to_string())),
//!     ))
//!     .unwrap();
//!
//! let resolver = factory.build();
//! let greeting = resolver.resolve::<Greeting>().unwrap().unwrap();
//! assert_eq!(greeting.0, "hello");
//! ```
pub mod domain;
pub mod services;
