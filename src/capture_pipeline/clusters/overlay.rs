use std::sync::mpsc::{Receiver, TryRecvError};

use tracing::debug;

use crate::capture_pipeline::clusters::types::ClusteredEventInfo;

/// Latest cluster extraction result, as drawn over the capture.
#[derive(Debug, Clone, Default)]
pub struct ClusterOverlay {
    events: Vec<ClusteredEventInfo>,
}

impl ClusterOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was shown before.
    pub fn update(&mut self, events: Vec<ClusteredEventInfo>) {
        debug!(count = events.len(), "Cluster overlay updated");
        self.events = events;
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn events(&self) -> &[ClusteredEventInfo] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// `(x, y, width, height)` of every bounded cluster box.
    pub fn rects(&self) -> Vec<(i64, i64, i64, i64)> {
        self.events
            .iter()
            .map(|event| event.bounding_box)
            .filter(|bbox| !bbox.is_unbounded())
            .map(|bbox| (bbox.left, bbox.top, bbox.right - bbox.left, bbox.bottom - bbox.top))
            .collect()
    }

    /// Takes every result waiting on `receiver`; the last one wins. Returns whether the
    /// overlay changed.
    pub fn poll(&mut self, receiver: &Receiver<Vec<ClusteredEventInfo>>) -> bool {
        let mut updated = false;
        loop {
            match receiver.try_recv() {
                Ok(events) => {
                    self.update(events);
                    updated = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        updated
    }
}
