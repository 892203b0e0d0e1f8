/// ProgressReporter port for user-facing progress
///
/// Diagnostic detail goes through `tracing`; this port carries the short
/// status lines a user watches while a resolution runs.
pub trait ProgressReporter {
    fn report(&self, message: &str);

    /// Reports a step counter, e.g. descriptors read so far
    ///
    /// # Arguments
    /// * `current` - Current progress value
    /// * `total` - Total expected value
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    fn report_completion(&self, message: &str);
}
