use crate::application::dto::ResolveResponse;
use crate::dependency_resolution::domain::ResolvedDependency;
use crate::ports::outbound::ResolutionFormatter;
use crate::shared::Result;

/// Markdown table header for resolved dependencies
const TABLE_HEADER: &str = "| Group | Artifact | Version | Scope | Depth | Via |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|-------|----------|---------|-------|-------|-----|\n";

/// MarkdownFormatter adapter producing a human-readable report
///
/// Direct and transitive dependencies are listed in separate tables,
/// each in resolution order.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn render_row(output: &mut String, dependency: &ResolvedDependency) {
        let key = dependency.key();
        let mut artifact = Self::escape_markdown_table_cell(key.artifact_id());
        if !key.classifier().is_empty() {
            artifact.push_str(&format!(" ({})", Self::escape_markdown_table_cell(key.classifier())));
        }
        let mut scope = dependency.scope().to_string();
        if dependency.is_optional() {
            scope.push_str(", optional");
        }
        let via = dependency
            .parent()
            .map(|p| format!("`{}`", p))
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            Self::escape_markdown_table_cell(key.group_id()),
            artifact,
            Self::escape_markdown_table_cell(dependency.version()),
            scope,
            dependency.depth(),
            via
        ));
    }

    fn render_section(output: &mut String, title: &str, dependencies: &[&ResolvedDependency]) {
        output.push_str(&format!("## {}\n\n", title));
        if dependencies.is_empty() {
            output.push_str("*None*\n\n");
            return;
        }
        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for dependency in dependencies {
            Self::render_row(output, dependency);
        }
        output.push('\n');
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionFormatter for MarkdownFormatter {
    fn format(&self, response: &ResolveResponse) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("# Dependencies of `{}`\n\n", response.root));
        output.push_str(&format!(
            "Generated by {} {} at {} ({} view, {} dependencies)\n\n",
            response.metadata.tool_name(),
            response.metadata.tool_version(),
            response.metadata.timestamp(),
            response.view,
            response.dependencies.len()
        ));

        let (direct, transitive): (Vec<_>, Vec<_>) =
            response.dependencies.iter().partition(|d| d.is_direct());
        Self::render_section(&mut output, "Direct Dependencies", &direct);
        Self::render_section(&mut output, "Transitive Dependencies", &transitive);

        Ok(output)
    }
}
