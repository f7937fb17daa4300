use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use ccdview_rs::capture_pipeline::{
    CaptureModel, DeflateEffort, ExportConfig, FitsToTiffPipeline, GrayDepth, KevConversion,
    TiffCompression, VisualizationRange,
};
use ccdview_rs::capture_pipeline::conversions::RenderOptions;
use ccdview_rs::logger;

use tracing::{error, info};

#[derive(Parser)]
#[command(name = "ccdview")]
#[command(version, about = "Render CCD FITS captures to TIFF", long_about = None)]
struct Cli {
    /// FITS capture file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory, one TIFF per image HDU
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out: PathBuf,

    /// Use the fast grayscale converter instead of the colormap one
    #[arg(long)]
    fast: bool,

    /// Write 16-bit grayscale with --fast
    #[arg(long)]
    sixteen_bit: bool,

    /// Colormap name, e.g. Greys_r, viridis, hot_r
    #[arg(long, value_name = "NAME", default_value = "Greys_r")]
    colormap: String,

    /// Render resolution of the colormap converter (100 = one pixel per cell)
    #[arg(long, value_name = "DPI", default_value = "100")]
    dpi: u32,

    /// Blank everything outside LOW,HIGH (in keV when --kev-factor is set)
    #[arg(long, value_name = "LOW,HIGH", value_parser = parse_range)]
    range: Option<VisualizationRange>,

    /// Value written in place of blanked pixels
    #[arg(long, value_name = "VALUE", default_value = "0.0", allow_negative_numbers = true)]
    blank: f64,

    /// Gaussian smoothing sigma, in pixels
    #[arg(long, value_name = "SIGMA")]
    sigma: Option<f64>,

    /// Convert counts to keV with this factor before filtering
    #[arg(long, value_name = "FACTOR")]
    kev_factor: Option<f64>,

    /// Pedestal added to counts before the keV conversion
    #[arg(long, value_name = "COUNTS", default_value = "0.0", allow_negative_numbers = true)]
    pedestal: f64,

    /// TIFF compression
    #[arg(long, value_enum, default_value = "none")]
    compression: Compression,

    /// Horizontal predictor for compressed grayscale output
    #[arg(long)]
    predictor: bool,

    /// Output file prefix; files are named <PREFIX><index>.tiff
    #[arg(long, value_name = "PREFIX", default_value = "hdu_")]
    prefix: String,

    /// Only print the metadata of every capture
    #[arg(long)]
    info: bool,

    /// Print per-step timings when done
    #[arg(long)]
    timings: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Compression {
    None,
    Lzw,
    Deflate,
    DeflateFast,
    DeflateBest,
}

impl From<Compression> for TiffCompression {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::None => TiffCompression::None,
            Compression::Lzw => TiffCompression::Lzw,
            Compression::Deflate => TiffCompression::Deflate(DeflateEffort::Balanced),
            Compression::DeflateFast => TiffCompression::Deflate(DeflateEffort::Fast),
            Compression::DeflateBest => TiffCompression::Deflate(DeflateEffort::Best),
        }
    }
}

fn parse_range(s: &str) -> Result<VisualizationRange, String> {
    let Some((low, high)) = s.split_once(',') else {
        return Err(format!("expected LOW,HIGH, got '{s}'"));
    };
    let low: f64 = low.trim().parse().map_err(|e| format!("invalid low bound: {e}"))?;
    let high: f64 = high.trim().parse().map_err(|e| format!("invalid high bound: {e}"))?;
    Ok(VisualizationRange::new(low, high))
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let cli = Cli::parse();

    if cli.info {
        let captures = CaptureModel::load(&cli.input)
            .with_context(|| format!("Failed to load {}", cli.input.display()))?;
        for (index, capture) in captures.iter().enumerate() {
            println!("HDU {index}: {capture}");
        }
        return Ok(());
    }

    if let Some(range) = cli.range {
        if range.low > range.high {
            bail!("--range low bound {} is above high bound {}", range.low, range.high);
        }
    }

    let options = RenderOptions::builder()
        .fast(cli.fast)
        .gray_depth(if cli.sixteen_bit { GrayDepth::Sixteen } else { GrayDepth::Eight })
        .colormap(cli.colormap)
        .dpi(cli.dpi)
        .kev(cli.kev_factor.map(|factor| KevConversion::new(factor, cli.pedestal)))
        .range(cli.range)
        .blank_value(cli.blank)
        .sigma(cli.sigma)
        .export(
            ExportConfig::builder()
                .compression(cli.compression.into())
                .horizontal_predictor(cli.predictor)
                .file_prefix(cli.prefix)
                .build(),
        )
        .build();

    let pipeline = FitsToTiffPipeline::new(options);
    info!(
        fast = pipeline.options().fast,
        colormap = %pipeline.options().colormap,
        compression = %pipeline.options().export.compression,
        "FITS to TIFF pipeline initialized"
    );

    match pipeline.convert_file(&cli.input, &cli.out) {
        Ok(timings) => {
            info!("Conversion successful!");
            if cli.timings {
                println!("{timings}");
            }
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            Err(e).with_context(|| format!("Failed to convert {}", cli.input.display()))
        }
    }
}
