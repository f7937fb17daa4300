use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info_span};

use crate::capture_pipeline::clusters::types::ClusteredEventInfo;
use crate::capture_pipeline::common::error::Result;

/// Receives the result of one extraction.
pub type ExtractionCallback = Box<dyn FnOnce(Vec<ClusteredEventInfo>) + Send>;

/// Finds clusters of elevated values.
///
/// `extract` may finish synchronously or hand the work to another thread; either way
/// `on_complete` is called exactly once. Pixels below `energy_min` or above
/// `energy_max` are ignored when the bounds are given.
pub trait ClusterExtractor: Send + Sync {
    fn extract(&self, on_complete: ExtractionCallback, energy_min: Option<f64>, energy_max: Option<f64>);
}

/// Extractor that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullClusterExtractor;

impl ClusterExtractor for NullClusterExtractor {
    fn extract(&self, on_complete: ExtractionCallback, _energy_min: Option<f64>, _energy_max: Option<f64>) {
        on_complete(Vec::new());
    }
}

/// Runs `extractor` on a worker thread; the result arrives on the returned channel.
///
/// Dropping the receiver discards the result. There is no cancellation.
pub fn spawn_extraction(
    extractor: Arc<dyn ClusterExtractor>,
    energy_min: Option<f64>,
    energy_max: Option<f64>,
) -> Result<Receiver<Vec<ClusteredEventInfo>>> {
    let (sender, receiver) = mpsc::channel();

    thread::Builder::new()
        .name("cluster-extraction".to_string())
        .spawn(move || {
            let _span = info_span!("extract_clusters", ?energy_min, ?energy_max).entered();
            extractor.extract(
                Box::new(move |events: Vec<ClusteredEventInfo>| {
                    debug!(count = events.len(), "Cluster extraction finished");
                    // Receiver gone means nobody wants the result anymore.
                    let _ = sender.send(events);
                }),
                energy_min,
                energy_max,
            );
        })?;

    Ok(receiver)
}
