use tracing::debug;

use crate::capture_pipeline::common::error::Result;
use crate::capture_pipeline::common::Matrix;
use crate::capture_pipeline::filters::traits::UniformFilter;

/// Left-to-right composition of uniform filters.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn UniformFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then<F: UniformFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn push(&mut self, filter: Box<dyn UniformFilter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl UniformFilter for FilterChain {
    fn filter(&self, matrix: &Matrix) -> Result<Matrix> {
        debug!(stages = self.filters.len(), "Running filter chain");
        let mut current = matrix.clone();
        for stage in &self.filters {
            current = stage.filter(&current)?;
        }
        Ok(current)
    }
}
