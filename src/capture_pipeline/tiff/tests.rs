#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Write};

    use tiff::decoder::{Decoder, DecodingResult};
    use tiff::ColorType;

    use crate::capture_pipeline::common::error::PipelineError;
    use crate::capture_pipeline::pixmap::{Pixmap, PixmapData};
    use crate::capture_pipeline::tiff::{DeflateEffort, ExportConfig, PixmapWriter, StandardTiffWriter, TiffCompression};

    struct FailingOutput;

    impl Write for FailingOutput {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn encode(pixmap: &Pixmap, config: &ExportConfig) -> Vec<u8> {
        let mut output = Vec::new();
        StandardTiffWriter.write_pixmap(pixmap, &mut output, config).unwrap();
        output
    }

    #[test]
    fn test_config_builder_and_file_names() {
        let config = ExportConfig::builder()
            .compression(TiffCompression::Lzw)
            .horizontal_predictor(true)
            .file_prefix("frame-")
            .build();

        assert_eq!(config.compression, TiffCompression::Lzw);
        assert!(config.horizontal_predictor);
        assert_eq!(config.file_name(3), "frame-3.tiff");
        assert_eq!(ExportConfig::default().file_name(0), "hdu_0.tiff");
        assert_eq!(TiffCompression::Deflate(DeflateEffort::Best).to_string(), "deflate (Best)");
    }

    #[test]
    fn test_predictor_only_for_compressed_gray() {
        let gray = PixmapData::Gray16(vec![1, 2]);
        let rgb = PixmapData::Rgb8(vec![1, 2, 3]);
        let predicted = ExportConfig::builder()
            .compression(TiffCompression::Lzw)
            .horizontal_predictor(true)
            .build();
        let uncompressed = ExportConfig::builder().horizontal_predictor(true).build();

        assert!(predicted.uses_predictor(&gray));
        assert!(!predicted.uses_predictor(&rgb));
        assert!(!uncompressed.uses_predictor(&gray));
        assert!(!ExportConfig::default().uses_predictor(&gray));
    }

    #[test]
    fn test_gray8_round_trip() {
        let pixmap = Pixmap::new(3, 2, PixmapData::Gray8(vec![0, 10, 20, 30, 40, 255])).unwrap();
        let bytes = encode(&pixmap, &ExportConfig::default());

        let mut decoder = Decoder::new(Cursor::new(bytes)).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (3, 2));
        assert_eq!(decoder.colortype().unwrap(), ColorType::Gray(8));
        match decoder.read_image().unwrap() {
            DecodingResult::U8(data) => assert_eq!(data, vec![0, 10, 20, 30, 40, 255]),
            _ => panic!("expected 8-bit data"),
        }
    }

    #[test]
    fn test_gray16_round_trip_with_deflate() {
        let samples: Vec<u16> = (0..64).map(|i| i * 1000).collect();
        let pixmap = Pixmap::new(8, 8, PixmapData::Gray16(samples.clone())).unwrap();
        let config = ExportConfig::builder()
            .compression(TiffCompression::Deflate(DeflateEffort::Balanced))
            .horizontal_predictor(true)
            .build();

        let mut decoder = Decoder::new(Cursor::new(encode(&pixmap, &config))).unwrap();
        assert_eq!(decoder.colortype().unwrap(), ColorType::Gray(16));
        match decoder.read_image().unwrap() {
            DecodingResult::U16(data) => assert_eq!(data, samples),
            _ => panic!("expected 16-bit data"),
        }
    }

    #[test]
    fn test_rgb8_round_trip_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.tiff");
        let data = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 9, 9, 9];
        let pixmap = Pixmap::new(2, 2, PixmapData::Rgb8(data.clone())).unwrap();

        let mut file = std::fs::File::create(&path).unwrap();
        StandardTiffWriter
            .write_pixmap(&pixmap, &mut file, &ExportConfig::builder().compression(TiffCompression::Lzw).build())
            .unwrap();
        drop(file);

        let mut decoder = Decoder::new(std::fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(decoder.colortype().unwrap(), ColorType::RGB(8));
        match decoder.read_image().unwrap() {
            DecodingResult::U8(decoded) => assert_eq!(decoded, data),
            _ => panic!("expected 8-bit data"),
        }
    }

    #[test]
    fn test_dimension_validation() {
        let empty = Pixmap {
            width: 0,
            height: 4,
            data: PixmapData::Gray8(Vec::new()),
        };
        let mut output = Vec::new();
        let result = StandardTiffWriter.write_pixmap(&empty, &mut output, &ExportConfig::default());

        assert!(matches!(result, Err(PipelineError::InvalidDimensions(0, 4))));
        assert!(output.is_empty());
    }

    #[test]
    fn test_output_failure_is_io_error() {
        let pixmap = Pixmap::new(1, 1, PixmapData::Gray8(vec![7])).unwrap();
        let result = StandardTiffWriter.write_pixmap(&pixmap, &mut FailingOutput, &ExportConfig::default());
        assert!(matches!(result, Err(PipelineError::IoError(_))));
    }
}
