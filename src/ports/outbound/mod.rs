/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to reach artifact stores, the file system and the console.
pub mod artifact_repository;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod repository_manifest_reader;

pub use artifact_repository::ArtifactRepository;
pub use formatter::ResolutionFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use repository_manifest_reader::{RepositoryEntries, RepositoryManifestReader};
