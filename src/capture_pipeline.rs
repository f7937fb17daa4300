//! CCD capture visualization pipeline
//!
//! Raw frames are loaded into capture models, wrapped by a view-model that keeps a
//! pristine copy next to a filtered "visualization" copy, and rendered through pluggable
//! pixmap converters. The magnifier and cluster modules compute the interactive overlays.

pub mod common;
pub mod capture;
pub mod filters;
pub mod pixmap;
pub mod view_model;
pub mod magnifier;
pub mod clusters;
pub mod tiff;
pub mod conversions;

pub use common::{
    BoundingBox,
    Matrix,
    PipelineError,
    Result,
};

pub use capture::{
    CaptureInfo,
    CaptureModel,
    CaptureReader,
    FitsCaptureReader,
};

pub use filters::{
    FilterChain,
    PerPixelFilter,
    PerValueFilter,
    UniformFilter,
};

pub use pixmap::{
    AccurateConverter,
    Colormap,
    FastConverter,
    GrayDepth,
    Pixmap,
    PixmapConverter,
    PixmapData,
};

pub use view_model::{
    CaptureViewModel,
    ConversionFn,
    KevConversion,
    ViewerConfig,
    ViewerConfigBuilder,
    VisualizationRange,
};

pub use magnifier::{
    MagnifierController,
    MagnifierOverlay,
    MagnifierSource,
    MagnifierStats,
    SourceRect,
};

pub use clusters::{
    ClusterExtractor,
    ClusterOverlay,
    ClusteredEventInfo,
    NullClusterExtractor,
};

pub use self::tiff::{
    DeflateEffort,
    ExportConfig,
    ExportConfigBuilder,
    PixmapWriter,
    StandardTiffWriter,
    TiffCompression,
};

pub use conversions::{
    FitsToTiffPipeline,
    PipelineTimings,
    Step,
};
