mod graph_collector;
mod managed_versions;

pub use graph_collector::DependencyGraphCollector;
pub use managed_versions::ManagedVersions;
