mod outcome_map;
mod outcome_resolver;

pub use outcome_map::OutcomeMap;
pub use outcome_resolver::{OutcomeResolver, OutcomeResolverFactory};
