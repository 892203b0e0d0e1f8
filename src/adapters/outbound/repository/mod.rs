/// Repository adapters - backing stores for artifact descriptors
mod caching;
mod in_memory;

pub use caching::CachingArtifactRepository;
pub use in_memory::InMemoryArtifactRepository;
