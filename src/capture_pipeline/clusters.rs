//! Cluster overlay plumbing
//!
//! Detection itself is provided by a [`ClusterExtractor`]; this module carries its result
//! to the overlay and lets extraction run on a worker thread.

mod types;
mod extractor;
mod overlay;


pub use types::ClusteredEventInfo;
pub use extractor::{spawn_extraction, ClusterExtractor, ExtractionCallback, NullClusterExtractor};
pub use overlay::ClusterOverlay;
