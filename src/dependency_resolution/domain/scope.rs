use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visibility of a dependency, governing how far it propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Compile,
    Provided,
    Runtime,
    Test,
    /// Only meaningful on managed entries of type `pom` (BOM imports).
    Import,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::Provided => "provided",
            Scope::Runtime => "runtime",
            Scope::Test => "test",
            Scope::Import => "import",
        }
    }

    /// Whether artifacts of this scope end up on the application's runtime classpath.
    pub fn is_runtime(&self) -> bool {
        matches!(self, Scope::Compile | Scope::Runtime)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "compile" => Ok(Scope::Compile),
            "provided" => Ok(Scope::Provided),
            "runtime" => Ok(Scope::Runtime),
            "test" => Ok(Scope::Test),
            "import" => Ok(Scope::Import),
            _ => Err(format!(
                "Invalid scope: {}. Expected one of compile, provided, runtime, test, import",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_from_str() {
        assert_eq!(Scope::from_str("compile").unwrap(), Scope::Compile);
        assert_eq!(Scope::from_str("RUNTIME").unwrap(), Scope::Runtime);
        assert_eq!(Scope::from_str("").unwrap(), Scope::Compile);
        assert!(Scope::from_str("system").unwrap_err().contains("Invalid scope"));
    }

    #[test]
    fn test_scope_is_runtime() {
        assert!(Scope::Compile.is_runtime());
        assert!(Scope::Runtime.is_runtime());
        assert!(!Scope::Provided.is_runtime());
        assert!(!Scope::Test.is_runtime());
        assert!(!Scope::Import.is_runtime());
    }

    #[test]
    fn test_scope_serde_lowercase() {
        let json = serde_json::to_string(&Scope::Provided).unwrap();
        assert_eq!(json, "\"provided\"");
        let scope: Scope = serde_json::from_str("\"test\"").unwrap();
        assert_eq!(scope, Scope::Test);
    }
}
