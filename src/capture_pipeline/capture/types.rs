//! Capture metadata types

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::capture_pipeline::common::{Matrix, min_max};

/// Timestamp layouts found in `DATE*` header cards, most specific first.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read-only snapshot describing a capture at the time it was built.
///
/// `min`/`max` are not kept live: filters applied to the owning model leave them stale
/// until the model is explicitly refreshed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaptureInfo {
    pub cols: usize,
    pub rows: usize,
    pub min: f64,
    pub max: f64,
    capture_start: Option<NaiveDateTime>,
    capture_end: Option<NaiveDateTime>,
    capture_date: Option<NaiveDateTime>,
}

impl CaptureInfo {
    pub fn new(rows: usize, cols: usize, min: f64, max: f64) -> Self {
        Self {
            cols,
            rows,
            min,
            max,
            ..Default::default()
        }
    }

    pub fn from_matrix(matrix: &Matrix) -> Self {
        let (rows, cols) = matrix.dim();
        let (min, max) = min_max(matrix);
        Self::new(rows, cols, min, max)
    }

    pub fn with_timestamps(
        mut self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        date: Option<NaiveDateTime>,
    ) -> Self {
        self.capture_start = start;
        self.capture_end = end;
        self.capture_date = date;
        self
    }

    /// When the exposure started.
    pub fn capture_start(&self) -> Option<NaiveDateTime> {
        self.capture_start
    }

    /// When the exposure ended.
    pub fn capture_end(&self) -> Option<NaiveDateTime> {
        self.capture_end
    }

    /// When the data was written.
    pub fn capture_date(&self) -> Option<NaiveDateTime> {
        self.capture_date
    }

    pub fn exposure_duration(&self) -> Option<TimeDelta> {
        Some(self.capture_end? - self.capture_start?)
    }

    /// Parses a FITS date card value. Unrecognised values yield `None`.
    pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(value, DATE_FORMAT)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    }
}

fn fmt_timestamp(timestamp: Option<NaiveDateTime>) -> String {
    timestamp.map_or_else(|| "None".to_string(), |t| t.to_string())
}

impl fmt::Display for CaptureInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let duration = self
            .exposure_duration()
            .map_or_else(|| "None".to_string(), |d| {
                format!("{:.3} s", d.num_milliseconds() as f64 / 1000.0)
            });
        write!(
            f,
            "{}x{}, min={}, max={}, start={}, end={}, date={}, exposureDuration={}",
            self.rows,
            self.cols,
            self.min,
            self.max,
            fmt_timestamp(self.capture_start),
            fmt_timestamp(self.capture_end),
            fmt_timestamp(self.capture_date),
            duration,
        )
    }
}
