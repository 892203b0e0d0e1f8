use crate::application::dto::ResolveResponse;
use crate::dependency_resolution::domain::{ArtifactKey, ResolvedDependency};
use crate::ports::outbound::ResolutionFormatter;
use crate::shared::Result;
use std::collections::HashMap;

/// TreeFormatter adapter drawing the resolved nodes as an indented tree
///
/// Each node hangs under the node it was reached through. Nodes whose parent
/// is not part of the selected view are drawn under the root.
pub struct TreeFormatter;

impl TreeFormatter {
    pub fn new() -> Self {
        Self
    }

    fn label(dependency: &ResolvedDependency) -> String {
        let mut label = format!("{} ({})", dependency.coords(), dependency.scope());
        if dependency.is_optional() {
            label.push_str(" optional");
        }
        label
    }

    fn render_children(
        output: &mut String,
        children: &HashMap<Option<&ArtifactKey>, Vec<&ResolvedDependency>>,
        parent: Option<&ArtifactKey>,
        prefix: &str,
    ) {
        let Some(nodes) = children.get(&parent) else {
            return;
        };
        for (i, node) in nodes.iter().enumerate() {
            let last = i + 1 == nodes.len();
            let (branch, indent) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
            output.push_str(&format!("{}{}{}\n", prefix, branch, Self::label(node)));
            Self::render_children(
                output,
                children,
                Some(node.key()),
                &format!("{}{}", prefix, indent),
            );
        }
    }
}

impl Default for TreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionFormatter for TreeFormatter {
    fn format(&self, response: &ResolveResponse) -> Result<String> {
        let selected: Vec<&ArtifactKey> = response.dependencies.iter().map(|d| d.key()).collect();

        let mut children: HashMap<Option<&ArtifactKey>, Vec<&ResolvedDependency>> = HashMap::new();
        for dependency in &response.dependencies {
            let parent = dependency.parent().filter(|p| selected.contains(p));
            children.entry(parent).or_default().push(dependency);
        }

        let mut output = format!("{}\n", response.root);
        Self::render_children(&mut output, &children, None, "");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::formatters::test_support::sample_response;

    #[test]
    fn test_tree_layout() {
        let output = TreeFormatter::new().format(&sample_response()).unwrap();
        let expected = "\
org.acme:app:1.0
├── org.acme:core:1.0 (compile)
│   └── org.acme:util:2.0 (runtime)
└── org.junit:junit:4.13 (test) optional
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_orphan_is_drawn_under_root() {
        let mut response = sample_response();
        response.dependencies.remove(0);
        let output = TreeFormatter::new().format(&response).unwrap();
        assert!(output.contains("└── org.acme:util:2.0 (runtime)"));
        assert!(!output.contains("│"));
    }
}
