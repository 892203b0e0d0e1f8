use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts where the formatted resolution ends up (stdout, file).
pub trait OutputPresenter {
    /// Presents the formatted content
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - File permissions prevent writing
    fn present(&self, content: &str) -> Result<()>;
}
