mod outcome_type;
mod provider;

pub use outcome_type::OutcomeType;
pub use provider::{FnOutcomeProvider, OutcomeProvider, OutcomeProviderDescription};
