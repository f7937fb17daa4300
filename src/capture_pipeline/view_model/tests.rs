#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use ndarray::{arr2, Array2};

    use crate::capture_pipeline::capture::CaptureModel;
    use crate::capture_pipeline::common::error::{PipelineError, Result};
    use crate::capture_pipeline::common::{BoundingBox, Matrix};
    use crate::capture_pipeline::filters::{Add, Gaussian, ScalarMultiply};
    use crate::capture_pipeline::pixmap::{FastConverter, Pixmap, PixmapConverter, PixmapData};
    use crate::capture_pipeline::view_model::{
        CaptureViewModel, KevConversion, ViewerConfig, VisualizationRange,
    };

    struct MockConverter {
        should_fail: bool,
        colormaps: Arc<Mutex<Vec<String>>>,
    }

    impl PixmapConverter for MockConverter {
        fn convert(&self, matrix: &Matrix) -> Result<Pixmap> {
            if self.should_fail {
                return Err(PipelineError::UnknownColormap("mock".to_string()));
            }
            let (rows, cols) = matrix.dim();
            Pixmap::new(cols, rows, PixmapData::Gray8(vec![0; rows * cols]))
        }

        fn is_fast(&self) -> bool {
            false
        }

        fn set_colormap(&mut self, name: &str) {
            self.colormaps.lock().unwrap().push(name.to_string());
        }
    }

    /// Identity-like matrix with -255 in the first and 255 in the last diagonal cell.
    fn mock_matrix(size: usize) -> Matrix {
        let mut matrix = Array2::eye(size);
        matrix[[0, 0]] = -255.0;
        matrix[[size - 1, size - 1]] = 255.0;
        matrix
    }

    fn view_model() -> CaptureViewModel {
        CaptureViewModel::new(CaptureModel::new(mock_matrix(255)), ViewerConfig::default())
    }

    #[test]
    fn test_new_view_model_has_default_state() {
        let vm = view_model();

        assert_eq!(vm.current_colormap(), "Greys_r");
        assert_eq!(vm.visualization_range(), VisualizationRange::new(-255.0, 255.0));
        assert!(vm.crop_box().is_unbounded());
        assert!(!vm.is_using_a_fast_converter());
    }

    #[test]
    fn test_crop_records_bounding_box() {
        let mut vm = view_model();
        let crop = BoundingBox::new(1, 2, 3, 4);
        vm.crop(crop);

        assert_eq!(vm.crop_box(), crop);
        assert_eq!(vm.visualization_data().dim(), (255, 255));
    }

    #[test]
    fn test_reset_restores_default_state() {
        let mut vm = view_model();
        vm.set_current_colormap("viridis");
        vm.set_visualization_range((10.0, 20.0));
        vm.apply_filter(&Add::new(1.0), true).unwrap();

        vm.reset();

        assert_eq!(vm.current_colormap(), "Greys_r");
        assert_eq!(vm.visualization_range(), VisualizationRange::new(-255.0, 255.0));
        assert_eq!(vm.value_at(0, 0).unwrap(), -255.0);
    }

    #[test]
    fn test_reset_after_any_filter_sequence_restores_values() {
        let mut vm = CaptureViewModel::new(
            CaptureModel::new(arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])),
            ViewerConfig::default(),
        );
        let before: Vec<f64> = (0..2).flat_map(|r| (0..3).map(move |c| (r, c))).map(|(r, c)| vm.value_at(r, c).unwrap()).collect();

        vm.apply_filter(&ScalarMultiply::new(3.0), true).unwrap();
        vm.apply_filter(&Gaussian::new(1.0), true).unwrap();
        vm.restrict_visualization_to_range(0.0).unwrap();
        vm.apply_filter(&Add::new(-7.0), true).unwrap();
        vm.reset();
        vm.reset();

        let after: Vec<f64> = (0..2).flat_map(|r| (0..3).map(move |c| (r, c))).map(|(r, c)| vm.value_at(r, c).unwrap()).collect();
        assert_eq!(before, after);
        assert_eq!(vm.visualization_range(), VisualizationRange::new(1.0, 6.0));
    }

    #[test]
    fn test_apply_filter_on_visualization_composes() {
        let mut vm = view_model();
        vm.apply_filter(&Add::new(1.0), true).unwrap();
        assert_eq!(vm.value_at(0, 0).unwrap(), -254.0);

        vm.apply_filter(&Add::new(1.0), true).unwrap();
        assert_eq!(vm.value_at(0, 0).unwrap(), -253.0);
    }

    #[test]
    fn test_apply_filter_from_pristine_discards_previous_edits() {
        let mut vm = view_model();
        vm.set_visualization_range((0.0, 1.0));
        vm.apply_filter(&Add::new(100.0), true).unwrap();
        vm.apply_filter(&Add::new(1.0), false).unwrap();

        assert_eq!(vm.value_at(0, 0).unwrap(), -254.0);
        assert_eq!(vm.visualization_range(), VisualizationRange::new(0.0, 1.0));
    }

    #[test]
    fn test_failed_filter_leaves_visualization_untouched() {
        let mut vm = view_model();
        vm.apply_filter(&Add::new(1.0), true).unwrap();

        assert!(vm.apply_filter(&Gaussian::new(-1.0), true).is_err());
        assert!(vm.apply_filter(&Gaussian::new(-1.0), false).is_err());
        assert_eq!(vm.value_at(0, 0).unwrap(), -254.0);
    }

    #[test]
    fn test_value_at_applies_conversion() {
        let vm = view_model().with_conversion(Arc::new(|x: f64| x * 2.0));
        assert_eq!(vm.value_at(0, 0).unwrap(), -510.0);
    }

    #[test]
    fn test_value_at_with_kev_conversion() {
        let vm = view_model().with_conversion(KevConversion::default().into_fn());
        let value = vm.value_at(254, 254).unwrap();
        assert!((value - 255.0 * 1.02857e-5).abs() < 1e-15);
    }

    #[test]
    fn test_value_at_out_of_bounds() {
        let vm = view_model();
        let err = vm.value_at(255, 0).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::IndexOutOfBounds { row: 255, col: 0, rows: 255, cols: 255 }
        ));
        assert!(vm.value_at(0, 300).is_err());
    }

    #[test]
    fn test_capture_info_is_visualization_info() {
        let model = CaptureModel::new(mock_matrix(8));
        let mut vm = CaptureViewModel::new(model.clone(), ViewerConfig::default());
        assert_eq!(vm.capture_info(), model.info());

        vm.apply_filter(&ScalarMultiply::new(2.0), true).unwrap();
        assert_eq!(vm.capture_info().max, 255.0);
    }

    #[test]
    fn test_set_and_get_visualization_range() {
        let mut vm = view_model();
        vm.set_visualization_range(VisualizationRange::new(100.0, 200.0));
        assert_eq!(vm.visualization_range(), VisualizationRange::new(100.0, 200.0));

        vm.set_visualization_range((50.0, 10.0));
        assert_eq!(<(f64, f64)>::from(vm.visualization_range()), (50.0, 10.0));
    }

    #[test]
    fn test_restrict_visualization_to_range() {
        let mut raw = Matrix::ones((4, 4));
        raw[[0, 1]] = 2.0;
        raw[[0, 2]] = 3.0;
        let mut expected = Matrix::zeros((4, 4));
        expected[[0, 1]] = 2.0;
        expected[[0, 2]] = 3.0;

        let mut vm = CaptureViewModel::new(CaptureModel::new(raw), ViewerConfig::default());
        vm.set_visualization_range((2.0, 3.0));
        vm.restrict_visualization_to_range(0.0).unwrap();

        assert_eq!(vm.visualization_data(), &expected);
    }

    #[test]
    fn test_restrict_visualization_is_not_cumulative() {
        let raw = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let mut twice = CaptureViewModel::new(CaptureModel::new(raw.clone()), ViewerConfig::default());
        twice.set_visualization_range((1.0, 2.0));
        twice.restrict_visualization_to_range(-1.0).unwrap();
        twice.set_visualization_range((4.0, 6.0));
        twice.restrict_visualization_to_range(-1.0).unwrap();

        let mut once = CaptureViewModel::new(CaptureModel::new(raw), ViewerConfig::default());
        once.set_visualization_range((4.0, 6.0));
        once.restrict_visualization_to_range(-1.0).unwrap();

        assert_eq!(twice.visualization_data(), once.visualization_data());
        assert_eq!(twice.value_at(1, 0).unwrap(), 4.0);
    }

    #[test]
    fn test_colormap_is_propagated_to_converter() {
        let colormaps = Arc::new(Mutex::new(Vec::new()));
        let converter = MockConverter {
            should_fail: false,
            colormaps: colormaps.clone(),
        };
        let mut vm = CaptureViewModel::with_converter(
            CaptureModel::new(mock_matrix(4)),
            Box::new(converter),
            ViewerConfig::builder().default_colormap("gray").build(),
        );
        vm.set_current_colormap("plasma");
        vm.reset();

        assert_eq!(vm.current_colormap(), "gray");
        assert_eq!(*colormaps.lock().unwrap(), vec!["gray", "plasma", "gray"]);
    }

    #[test]
    fn test_image_uses_visualization_matrix() {
        let colormaps = Arc::new(Mutex::new(Vec::new()));
        let vm = CaptureViewModel::with_converter(
            CaptureModel::new(Matrix::zeros((3, 5))),
            Box::new(MockConverter { should_fail: false, colormaps }),
            ViewerConfig::default(),
        );
        let image = vm.image().unwrap();
        assert_eq!((image.width, image.height), (5, 3));
    }

    #[test]
    fn test_unknown_colormap_fails_at_render_time() {
        let mut vm = view_model();
        vm.set_current_colormap("no-such-map");

        assert_eq!(vm.current_colormap(), "no-such-map");
        assert!(matches!(vm.image(), Err(PipelineError::UnknownColormap(_))));

        let colormaps = Arc::new(Mutex::new(Vec::new()));
        let failing = CaptureViewModel::with_converter(
            CaptureModel::new(mock_matrix(4)),
            Box::new(MockConverter { should_fail: true, colormaps }),
            ViewerConfig::default(),
        );
        assert!(failing.image().is_err());
        assert_eq!(failing.value_at(0, 0).unwrap(), -255.0);
    }

    #[test]
    fn test_fast_converter_is_reported() {
        let vm = CaptureViewModel::with_converter(
            CaptureModel::new(mock_matrix(4)),
            Box::new(FastConverter::default()),
            ViewerConfig::default(),
        );
        assert!(vm.is_using_a_fast_converter());
        assert!(vm.image().is_ok());
    }

    #[test]
    fn test_pristine_is_not_aliased() {
        let model = CaptureModel::new(mock_matrix(4));
        let mut vm = CaptureViewModel::new(model.clone(), ViewerConfig::default());
        vm.apply_filter(&Add::new(10.0), true).unwrap();

        assert_eq!(vm.pristine_data(), model.raw_data());
        assert_eq!(vm.value_at(0, 0).unwrap(), -245.0);
    }

    #[test]
    fn test_slider_mapping_round_trips_bounds() {
        let mut vm = CaptureViewModel::new(
            CaptureModel::new(arr2(&[[-0.25, 1.5]])),
            ViewerConfig::builder().slider_scale_factor(100.0).build(),
        );
        let (low, high) = vm.slider_bounds();
        assert_eq!((low, high), (-25, 150));

        vm.set_visualization_range_from_slider(low, 75);
        assert_eq!(vm.visualization_range(), VisualizationRange::new(-0.25, 0.75));
    }

    #[test]
    fn test_viewer_config_builder_defaults() {
        let config = ViewerConfig::builder().magnification_bounds(2.0, 8.0).build();

        assert_eq!(config.default_colormap, "Greys_r");
        assert_eq!(config.magnifier_display_size, 127);
        assert_eq!((config.min_magnification, config.max_magnification), (2.0, 8.0));
        assert_eq!(config.min_effective_side, 9);
    }
}
