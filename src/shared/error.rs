use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow build tooling to distinguish between a dependency
/// graph that cannot be resolved and a misconfigured invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the requested dependency set was resolved
    Success = 0,
    /// The dependency graph or outcome pipeline could not be resolved
    ResolutionFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (file I/O, manifest parsing, output errors)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code matching the root cause of an error chain.
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.downcast_ref::<ResolutionError>().is_some()
            || err.downcast_ref::<OutcomeError>().is_some()
        {
            ExitCode::ResolutionFailed
        } else if let Some(ResolverError::Validation { .. }) = err.downcast_ref::<ResolverError>() {
            ExitCode::InvalidArguments
        } else {
            ExitCode::ApplicationError
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ResolutionFailed => write!(f, "Resolution Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised by the outcome pipeline, either while providers are
/// registered or while a session resolves outcomes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutcomeError {
    #[error("Outcome {outcome} is provided by both '{existing}' and '{duplicate}'")]
    DuplicateProvider {
        outcome: String,
        existing: String,
        duplicate: String,
    },

    #[error("Outcome of type {outcome} has not been provided")]
    NotProvided { outcome: String },

    #[error("Provider '{provider}' completed without pushing outcome {outcome}")]
    NotProduced { outcome: String, provider: String },

    #[error("Provider '{provider}' failed earlier in this session, outcome {outcome} is unavailable")]
    ProviderFailed { outcome: String, provider: String },

    #[error("Outcome {outcome} has already been pushed in this session")]
    AlreadyPushed { outcome: String },

    #[error("Cyclic outcome dependency: {}", chain.join(" -> "))]
    Cyclic { chain: Vec<String> },

    #[error("Outcome {outcome} was resolved without a value")]
    Absent { outcome: String },

    #[error("Deadline exceeded before provider '{provider}' could run")]
    DeadlineExceeded { provider: String },
}

/// Errors raised while collecting a dependency graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Failed to read artifact descriptor for {missing} (required by {requested_by})")]
    DescriptorNotFound {
        requested_by: String,
        missing: String,
    },

    #[error("No version of {artifact} matches {range} (required by {requested_by})")]
    NoMatchingVersion {
        requested_by: String,
        artifact: String,
        range: String,
    },

    #[error("Invalid artifact coordinates '{value}': {reason}")]
    InvalidCoordinates { value: String, reason: String },

    #[error("Invalid version range '{value}': {reason}")]
    InvalidVersionRange { value: String, reason: String },

    #[error("Dependency resolution for {root} timed out after visiting {visited} artifact(s)")]
    Timeout { root: String, visited: usize },
}

/// Application-specific errors for the hosting tool.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Repository manifest not found: {path}\n\n💡 Hint: {suggestion}")]
    ManifestNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse repository manifest: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the manifest is valid TOML")]
    ManifestParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
