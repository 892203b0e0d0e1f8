use crate::shared::error::ResolutionError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a single coordinate segment (security limit)
const MAX_SEGMENT_LENGTH: usize = 255;

/// Packaging type assumed when coordinates do not name one
pub const DEFAULT_TYPE: &str = "jar";

fn validate_segment(value: &str, segment: &str, raw: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(raw, format!("{} cannot be empty", segment)));
    }

    if value.len() > MAX_SEGMENT_LENGTH {
        return Err(invalid(
            raw,
            format!(
                "{} is too long ({} bytes). Maximum allowed: {} bytes",
                segment,
                value.len(),
                MAX_SEGMENT_LENGTH
            ),
        ));
    }

    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(invalid(
            raw,
            format!(
                "{} contains invalid characters. Only alphanumeric, hyphens, underscores and dots are allowed.",
                segment
            ),
        ));
    }

    Ok(())
}

fn invalid(raw: &str, reason: String) -> anyhow::Error {
    ResolutionError::InvalidCoordinates {
        value: raw.to_string(),
        reason,
    }
    .into()
}

/// Identity of an artifact for conflict resolution: everything but the version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactKey {
    group_id: String,
    artifact_id: String,
    classifier: String,
    #[serde(rename = "type")]
    artifact_type: String,
}

impl ArtifactKey {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        classifier: impl Into<String>,
        artifact_type: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            classifier: classifier.into(),
            artifact_type: artifact_type.into(),
        }
    }

    /// Key for a plain `jar` artifact without classifier.
    pub fn of(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self::new(group_id, artifact_id, "", DEFAULT_TYPE)
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn classifier(&self) -> &str {
        &self.classifier
    }

    pub fn artifact_type(&self) -> &str {
        &self.artifact_type
    }

    /// Attaches a version to this key.
    pub fn with_version(&self, version: impl Into<String>) -> ArtifactCoords {
        ArtifactCoords {
            key: self.clone(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if !self.classifier.is_empty() {
            write!(f, ":{}:{}", self.artifact_type, self.classifier)
        } else if self.artifact_type != DEFAULT_TYPE {
            write!(f, ":{}", self.artifact_type)
        } else {
            Ok(())
        }
    }
}

impl FromStr for ArtifactKey {
    type Err = anyhow::Error;

    /// Parses `group:artifact[:type[:classifier]]`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        let (group_id, artifact_id, artifact_type, classifier) = match parts.as_slice() {
            [g, a] => (*g, *a, DEFAULT_TYPE, ""),
            [g, a, t] => (*g, *a, *t, ""),
            [g, a, t, c] => (*g, *a, *t, *c),
            _ => {
                return Err(invalid(
                    s,
                    "expected group:artifact[:type[:classifier]]".to_string(),
                ))
            }
        };

        validate_segment(group_id, "groupId", s)?;
        validate_segment(artifact_id, "artifactId", s)?;
        validate_segment(artifact_type, "type", s)?;
        if !classifier.is_empty() {
            validate_segment(classifier, "classifier", s)?;
        }

        Ok(Self::new(group_id, artifact_id, classifier, artifact_type))
    }
}

/// Immutable `(groupId, artifactId, classifier, type, version)` tuple.
///
/// The version is kept verbatim: on a declared dependency it may hold a
/// version range, on a resolved dependency it is always a concrete version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactCoords {
    #[serde(flatten)]
    key: ArtifactKey,
    version: String,
}

impl ArtifactCoords {
    pub fn new(key: ArtifactKey, version: impl Into<String>) -> Self {
        Self {
            key,
            version: version.into(),
        }
    }

    pub fn key(&self) -> &ArtifactKey {
        &self.key
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns a copy with the version replaced.
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            key: self.key.clone(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ArtifactCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.version)
    }
}

impl FromStr for ArtifactCoords {
    type Err = anyhow::Error;

    /// Parses `group:artifact[:type[:classifier]]:version`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (key_part, version) = trimmed.rsplit_once(':').ok_or_else(|| {
            invalid(
                s,
                "expected group:artifact[:type[:classifier]]:version".to_string(),
            )
        })?;

        if version.trim().is_empty() {
            return Err(invalid(s, "version cannot be empty".to_string()));
        }

        // A bare "group:artifact" would otherwise parse as key "group" + version
        if !key_part.contains(':') {
            return Err(invalid(
                s,
                "expected group:artifact[:type[:classifier]]:version".to_string(),
            ));
        }

        let key = key_part.parse::<ArtifactKey>().map_err(|_| {
            invalid(
                s,
                "expected group:artifact[:type[:classifier]]:version".to_string(),
            )
        })?;

        Ok(Self::new(key, version.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ResolutionError;

    #[test]
    fn test_parse_minimal_coords() {
        let coords: ArtifactCoords = "org.acme:app:1.0".parse().unwrap();
        assert_eq!(coords.key().group_id(), "org.acme");
        assert_eq!(coords.key().artifact_id(), "app");
        assert_eq!(coords.key().artifact_type(), "jar");
        assert_eq!(coords.key().classifier(), "");
        assert_eq!(coords.version(), "1.0");
    }

    #[test]
    fn test_parse_full_coords() {
        let coords: ArtifactCoords = "org.acme:app:test-jar:tests:1.0".parse().unwrap();
        assert_eq!(coords.key().artifact_type(), "test-jar");
        assert_eq!(coords.key().classifier(), "tests");
        assert_eq!(coords.to_string(), "org.acme:app:test-jar:tests:1.0");
    }

    #[test]
    fn test_parse_range_version() {
        let coords: ArtifactCoords = "org.acme:app:[1.0,2.0)".parse().unwrap();
        assert_eq!(coords.version(), "[1.0,2.0)");
    }

    #[test]
    fn test_parse_invalid_coords() {
        for raw in ["", "org.acme", "org.acme:app", "org.acme:app:", "a:b:c:d:e:1.0", "org acme:app:1.0"] {
            let err = raw.parse::<ArtifactCoords>().unwrap_err();
            assert!(
                err.downcast_ref::<ResolutionError>().is_some(),
                "expected typed error for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_key_display_omits_defaults() {
        assert_eq!(ArtifactKey::of("org.acme", "app").to_string(), "org.acme:app");
        assert_eq!(
            ArtifactKey::new("org.acme", "bom", "", "pom").to_string(),
            "org.acme:bom:pom"
        );
    }

    #[test]
    fn test_key_identity_ignores_version() {
        let a: ArtifactCoords = "org.acme:lib:1.0".parse().unwrap();
        let b: ArtifactCoords = "org.acme:lib:2.0".parse().unwrap();
        assert_eq!(a.key(), b.key());
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_distinguishes_classifier() {
        let a: ArtifactKey = "org.acme:lib".parse().unwrap();
        let b: ArtifactKey = "org.acme:lib:jar:sources".parse().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_segment_too_long() {
        let raw = format!("{}:app:1.0", "g".repeat(MAX_SEGMENT_LENGTH + 1));
        let err = raw.parse::<ArtifactCoords>().unwrap_err();
        assert!(err.to_string().contains("Invalid artifact coordinates"));
    }
}
