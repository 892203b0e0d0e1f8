use crate::application::dto::{ResolveRequest, ResolveResponse};
use crate::shared::Result;

/// DependencyResolutionPort - Inbound port for resolving a root artifact
///
/// This is the application's public entry point: the CLI (or any other
/// driver) builds a request and receives the selected dependency view.
pub trait DependencyResolutionPort {
    /// Resolves the dependencies of `request.root`
    ///
    /// # Errors
    /// Returns an error if:
    /// - A descriptor is missing from the repository
    /// - A version range has no matching version
    /// - The configured timeout expires
    /// - A pipeline phase is misconfigured
    fn resolve(&self, request: ResolveRequest) -> Result<ResolveResponse>;
}
