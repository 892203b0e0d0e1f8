/// Mock implementations for testing
mod mock_artifact_repository;
mod mock_progress_reporter;

pub use mock_artifact_repository::MockArtifactRepository;
pub use mock_progress_reporter::{MockProgressReporter, ProgressEvent};
