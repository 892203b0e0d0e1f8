/// Formatter adapters for the supported output formats
mod json_formatter;
mod markdown_formatter;
mod tree_formatter;

pub use json_formatter::JsonFormatter;
pub use markdown_formatter::MarkdownFormatter;
pub use tree_formatter::TreeFormatter;
