use crate::application::dto::ResolveResponse;
use crate::ports::outbound::ResolutionFormatter;
use crate::shared::Result;

/// JsonFormatter adapter rendering the response as a pretty-printed JSON document
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionFormatter for JsonFormatter {
    fn format(&self, response: &ResolveResponse) -> Result<String> {
        let mut json = serde_json::to_string_pretty(response)?;
        json.push('\n');
        Ok(json)
    }
}
