use crate::application::dto::ResolveResponse;
use crate::shared::Result;

/// ResolutionFormatter port for rendering a resolved dependency set
///
/// Implementations cover the supported output formats (JSON, Markdown, tree).
pub trait ResolutionFormatter {
    /// Formats the response of a dependency resolution
    ///
    /// # Arguments
    /// * `response` - The resolved view together with its metadata
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, response: &ResolveResponse) -> Result<String>;
}
