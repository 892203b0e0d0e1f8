use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter, TreeFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ResolutionFormatter;

/// Factory for creating resolution formatters
///
/// Selects the formatter adapter matching an output format, keeping the
/// CLI unaware of the concrete adapter types.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use phase_resolver::application::dto::OutputFormat;
    /// use phase_resolver::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ResolutionFormatter> {
        match format {
            OutputFormat::Tree => Box::new(TreeFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Tree => "📝 Rendering dependency tree...",
            OutputFormat::Json => "📝 Generating JSON output...",
            OutputFormat::Markdown => "📝 Generating Markdown output...",
        }
    }
}
