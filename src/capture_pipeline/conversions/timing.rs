use std::fmt;
use std::time::{Duration, Instant};

use crate::capture_pipeline::common::error::Result;

/// Stage of a file conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Load,
    Filter,
    Render,
    Encode,
    Write,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Load => "load",
            Step::Filter => "filter",
            Step::Render => "render",
            Step::Encode => "encode",
            Step::Write => "write",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One measured step. `hdu` is `None` for file-level steps such as loading.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTiming {
    pub step: Step,
    pub hdu: Option<usize>,
    pub duration: Duration,
}

/// Wall-clock time spent in each step, in execution order.
#[derive(Debug, Default)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, step: Step, hdu: Option<usize>, duration: Duration) {
        self.steps.push(StepTiming { step, hdu, duration });
    }

    /// Runs `f` and records how long it took, whether it succeeded or not.
    pub fn measure<T>(&mut self, step: Step, hdu: Option<usize>, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let start = Instant::now();
        let result = f();
        self.add_step(step, hdu, start.elapsed());
        result
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Time spent in `step` over every capture.
    pub fn step_total(&self, step: Step) -> Duration {
        self.steps.iter().filter(|s| s.step == step).map(|s| s.duration).sum()
    }

    /// Time spent on the capture at `hdu`.
    pub fn hdu_total(&self, hdu: usize) -> Duration {
        self.steps.iter().filter(|s| s.hdu == Some(hdu)).map(|s| s.duration).sum()
    }

    pub fn slowest(&self) -> Option<&StepTiming> {
        self.steps.iter().max_by_key(|s| s.duration)
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }
}

impl fmt::Display for PipelineTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total_duration().as_secs_f64();
        let ms = |d: Duration| d.as_secs_f64() * 1000.0;

        writeln!(f, "Conversion timings:")?;
        for timing in &self.steps {
            let share = if total > 0.0 { timing.duration.as_secs_f64() / total * 100.0 } else { 0.0 };
            let scope = timing.hdu.map_or_else(|| "file".to_string(), |i| format!("hdu {i}"));
            writeln!(f, "  {:<8} {:<7} {:>10.3}ms {:>5.1}%", scope, timing.step, ms(timing.duration), share)?;
        }
        write!(f, "  {:<16} {:>10.3}ms", "total", total * 1000.0)
    }
}
