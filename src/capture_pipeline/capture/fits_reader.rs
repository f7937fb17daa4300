//! Capture reader implementation using the fitrs library.
//!
//! This module reads multi-HDU FITS files and turns every image HDU into a
//! [`CaptureModel`], widening integer and single-precision data to `f64` and picking up
//! the exposure timestamps from the header.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use fitrs::{Fits, FitsData, Hdu, HeaderValue};
use ndarray::Array2;
use tracing::{debug, info, instrument};

use crate::capture_pipeline::capture::model::CaptureModel;
use crate::capture_pipeline::capture::reader::CaptureReader;
use crate::capture_pipeline::capture::types::CaptureInfo;
use crate::capture_pipeline::common::error::{PipelineError, Result};

/// Header cards holding the exposure start timestamp, in lookup order.
const DATE_START_KEYS: [&str; 3] = ["DATESTART", "DATESTAR", "DATE-BEG"];
/// Header cards holding the exposure end timestamp, in lookup order.
const DATE_END_KEYS: [&str; 2] = ["DATEEND", "DATE-END"];
/// Header cards holding the capture date, in lookup order.
const DATE_KEYS: [&str; 2] = ["DATE", "DATE-OBS"];

const BLOCK_SIZE: usize = 2880;
const CARD_SIZE: usize = 80;

/// FITS capture reader backed by the pure-Rust fitrs decoder.
///
/// HDUs without image data (typically an empty primary HDU) are skipped, so the
/// returned captures are the image frames of the file in order.
pub struct FitsCaptureReader;

impl CaptureReader for FitsCaptureReader {
    /// Reads every image HDU of the file at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<CaptureModel>)` - One capture per image HDU, in file order
    /// * `Err(PipelineError::NotFound)` - `path` does not exist
    /// * `Err(PipelineError::FileFormat)` - The file is not a FITS file with 2-D image data,
    ///   or it is shorter than its headers declare
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ccdview_rs::capture_pipeline::{CaptureReader, FitsCaptureReader};
    ///
    /// let captures = FitsCaptureReader.read_captures("capture.fits".as_ref()).unwrap();
    /// for capture in &captures {
    ///     println!("{capture}");
    /// }
    /// ```
    #[instrument(skip(self), fields(path = %path.display()))]
    fn read_captures(&self, path: &Path) -> Result<Vec<CaptureModel>> {
        if !path.exists() {
            return Err(PipelineError::NotFound(path.to_path_buf()));
        }

        check_layout(path)?;

        let fits = Fits::open(path)
            .map_err(|e| PipelineError::FileFormat(format!("{}: {}", path.display(), e)))?;

        let mut captures = Vec::new();
        for (index, hdu) in fits.iter().enumerate() {
            match read_hdu(&hdu)? {
                Some(capture) => {
                    debug!(hdu = index, rows = capture.info().rows, cols = capture.info().cols, "Read image HDU");
                    captures.push(capture);
                }
                None => debug!(hdu = index, "Skipping HDU without image data"),
            }
        }

        if captures.is_empty() {
            return Err(PipelineError::FileFormat(format!(
                "{}: no image HDU found",
                path.display()
            )));
        }

        info!(count = captures.len(), "Loaded captures");
        Ok(captures)
    }
}

/// Walks the HDU headers and checks that every declared data section is inside the file.
///
/// fitrs trusts the header sizes and aborts on a short read, so truncated files have to be
/// caught before it touches the data. Bytes after the last HDU that do not start a new
/// extension header are left alone.
fn check_layout(path: &Path) -> Result<()> {
    let mut file = BufReader::new(File::open(path)?);
    let file_len = file.get_ref().metadata()?.len();
    let block_len = BLOCK_SIZE as u64;
    let mut block = [0u8; BLOCK_SIZE];
    let mut offset = 0u64;

    while offset + block_len <= file_len {
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(&mut block)?;
        let marker: &[u8] = if offset == 0 { b"SIMPLE" } else { b"XTENSION" };
        if !block.starts_with(marker) {
            break;
        }

        let mut layout = DataLayout::default();
        let mut header_len = block_len;
        while !layout.read_cards(&block) {
            if offset + header_len + block_len > file_len {
                return Err(PipelineError::FileFormat(format!(
                    "{}: header at byte {} has no END card",
                    path.display(),
                    offset
                )));
            }
            file.read_exact(&mut block)?;
            header_len += block_len;
        }

        let data_start = offset + header_len;
        let data_len = layout.data_len();
        if data_start.saturating_add(data_len) > file_len {
            return Err(PipelineError::FileFormat(format!(
                "{}: HDU at byte {} declares {} data bytes but only {} remain",
                path.display(),
                offset,
                data_len,
                file_len - data_start
            )));
        }
        debug!(offset, header_len, data_len, "HDU layout");
        offset = data_start + data_len.div_ceil(block_len) * block_len;
    }
    Ok(())
}

/// Size keywords of one FITS header.
#[derive(Debug)]
struct DataLayout {
    bitpix: u64,
    naxis: usize,
    axes: Vec<u64>,
    pcount: u64,
    gcount: u64,
}

impl Default for DataLayout {
    fn default() -> Self {
        Self {
            bitpix: 0,
            naxis: 0,
            axes: Vec::new(),
            pcount: 0,
            gcount: 1,
        }
    }
}

impl DataLayout {
    /// Picks the size keywords out of one header block. True once END is seen.
    fn read_cards(&mut self, block: &[u8]) -> bool {
        for card in block.chunks(CARD_SIZE) {
            let key = String::from_utf8_lossy(&card[..8]);
            let key = key.trim_end();
            if key == "END" {
                return true;
            }
            if &card[8..10] != b"= " {
                continue;
            }
            let value = String::from_utf8_lossy(&card[10..]);
            let Some(number) = value.split('/').next().and_then(|v| v.trim().parse::<i64>().ok()) else {
                continue;
            };
            let number = number.unsigned_abs();

            match key {
                "BITPIX" => self.bitpix = number,
                "NAXIS" => self.naxis = number as usize,
                "PCOUNT" => self.pcount = number,
                "GCOUNT" => self.gcount = number,
                _ => {
                    let axis = key
                        .strip_prefix("NAXIS")
                        .and_then(|n| n.parse::<usize>().ok())
                        .filter(|&n| n >= 1);
                    if let Some(axis) = axis {
                        if self.axes.len() < axis {
                            self.axes.resize(axis, 0);
                        }
                        self.axes[axis - 1] = number;
                    }
                }
            }
        }
        false
    }

    /// Unpadded size of the data section in bytes.
    fn data_len(&self) -> u64 {
        if self.naxis == 0 {
            return 0;
        }
        let cells = (0..self.naxis)
            .map(|i| self.axes.get(i).copied().unwrap_or(0))
            .fold(1u64, u64::saturating_mul);
        (self.bitpix / 8)
            .saturating_mul(self.gcount)
            .saturating_mul(self.pcount.saturating_add(cells))
    }
}

fn read_hdu(hdu: &Hdu) -> Result<Option<CaptureModel>> {
    if let Some(HeaderValue::IntegerNumber(0)) = hdu.value("NAXIS") {
        return Ok(None);
    }

    let (shape, values): (Vec<usize>, Vec<f64>) = match hdu.read_data() {
        FitsData::FloatingPoint64(array) => (array.shape.clone(), array.data.iter().copied().collect()),
        FitsData::FloatingPoint32(array) => {
            (array.shape.clone(), array.data.iter().map(|&v| v as f64).collect())
        }
        // Integer blanks come back as None
        FitsData::IntegersI32(array) => (
            array.shape.clone(),
            array.data.iter().map(|v| v.map_or(f64::NAN, |x| x as f64)).collect(),
        ),
        FitsData::IntegersU32(array) => (
            array.shape.clone(),
            array.data.iter().map(|v| v.map_or(f64::NAN, |x| x as f64)).collect(),
        ),
        _ => {
            return Err(PipelineError::FileFormat(
                "HDU does not hold numeric image data".to_string(),
            ));
        }
    };

    let Some((rows, cols)) = matrix_dims(&shape)? else {
        return Ok(None);
    };

    let matrix = Array2::from_shape_vec((rows, cols), values)
        .map_err(|e| PipelineError::FileFormat(e.to_string()))?;

    let info = CaptureInfo::from_matrix(&matrix).with_timestamps(
        header_timestamp(hdu, &DATE_START_KEYS),
        header_timestamp(hdu, &DATE_END_KEYS),
        header_timestamp(hdu, &DATE_KEYS),
    );

    Ok(Some(CaptureModel::with_info(matrix, info)))
}

/// Maps a FITS shape (`NAXIS1` fastest) onto `(rows, cols)`.
///
/// Trailing degenerate axes are accepted; a real third axis is not.
fn matrix_dims(shape: &[usize]) -> Result<Option<(usize, usize)>> {
    if shape.is_empty() || shape.iter().any(|&n| n == 0) {
        return Ok(None);
    }
    if shape.iter().skip(2).any(|&n| n != 1) {
        return Err(PipelineError::FileFormat(format!(
            "expected a 2-D image, got shape {:?}",
            shape
        )));
    }

    let cols = shape[0];
    let rows = shape.get(1).copied().unwrap_or(1);
    Ok(Some((rows, cols)))
}

/// First parsable timestamp among `keys`.
fn header_timestamp(hdu: &Hdu, keys: &[&str]) -> Option<chrono::NaiveDateTime> {
    keys.iter().find_map(|key| match hdu.value(key)? {
        HeaderValue::CharacterString(value) => CaptureInfo::parse_timestamp(value),
        _ => None,
    })
}
