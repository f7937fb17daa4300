#[cfg(test)]
mod tests {
    use ndarray::{arr2, Array2};

    use crate::capture_pipeline::common::error::PipelineError;
    use crate::capture_pipeline::common::Matrix;
    use crate::capture_pipeline::filters::{
        Add, FilterChain, Gaussian, Log, PerPixelAdapter, PerValueAdapter, ScalarMultiply, Sqrt,
        SubstituteInRange, SubstituteOutOfRange, UniformFilter,
    };

    fn sample() -> Matrix {
        arr2(&[[-2.0, 0.0, 1.0], [2.0, 3.0, 4.5], [7.0, -0.5, 3.0]])
    }

    fn assert_close(a: &Matrix, b: &Matrix, tolerance: f64) {
        assert_eq!(a.dim(), b.dim());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() <= tolerance, "{x} != {y}");
        }
    }

    #[test]
    fn test_scalar_multiply_is_elementwise() {
        let m = sample();
        for factor in [0.0, -1.0, 2.5, 1e-5] {
            let result = ScalarMultiply::new(factor).filter(&m).unwrap();
            for (r, x) in result.iter().zip(m.iter()) {
                assert_eq!(*r, factor * x);
            }
        }
    }

    #[test]
    fn test_add_offsets_every_value() {
        let result = Add::new(1.0).filter(&sample()).unwrap();
        assert_eq!(result[[0, 0]], -1.0);
        assert_eq!(result[[2, 1]], 0.5);
    }

    #[test]
    fn test_filters_do_not_touch_their_input() {
        let m = sample();
        let _ = ScalarMultiply::new(3.0).filter(&m).unwrap();
        let _ = SubstituteOutOfRange::new(0.0, 1.0, 9.0).filter(&m).unwrap();
        assert_eq!(m, sample());
    }

    #[test]
    fn test_substitute_in_range_is_inclusive() {
        let result = SubstituteInRange::new(0.0, 3.0, -9.0).filter(&sample()).unwrap();
        let expected = arr2(&[[-2.0, -9.0, -9.0], [-9.0, -9.0, 4.5], [7.0, -0.5, -9.0]]);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_substitute_out_of_range_keeps_boundaries() {
        let m = sample();
        let (lo, hi, blank) = (0.0, 3.0, 100.0);
        let result = SubstituteOutOfRange::new(lo, hi, blank).filter(&m).unwrap();

        for (r, x) in result.iter().zip(m.iter()) {
            if *x < lo || *x > hi {
                assert_eq!(*r, blank);
            } else {
                assert_eq!(r, x);
            }
        }
        assert_eq!(result[[0, 1]], 0.0);
        assert_eq!(result[[1, 1]], 3.0);
    }

    #[test]
    fn test_gaussian_zero_sigma_is_noop() {
        let m = sample();
        assert_eq!(Gaussian::new(0.0).filter(&m).unwrap(), m);
    }

    #[test]
    fn test_gaussian_tiny_sigma_is_noop() {
        let m = sample();
        for sigma in [1e-200, f64::MIN_POSITIVE, 5e-324] {
            let result = Gaussian::new(sigma).filter(&m).unwrap();
            assert!(result.iter().all(|v| !v.is_nan()), "sigma {sigma} produced NaN");
            assert_eq!(result, m);
        }
    }

    #[test]
    fn test_gaussian_rejects_negative_sigma() {
        let result = Gaussian::new(-1.0).filter(&sample());
        assert!(matches!(result, Err(PipelineError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_gaussian_preserves_constant_matrix() {
        let m = Array2::from_elem((5, 7), 4.25);
        assert_close(&Gaussian::new(2.0).filter(&m).unwrap(), &m, 1e-12);
    }

    #[test]
    fn test_gaussian_spreads_an_impulse_symmetrically() {
        let mut m = Matrix::zeros((9, 9));
        m[[4, 4]] = 1.0;
        let result = Gaussian::new(1.0).filter(&m).unwrap();

        assert_eq!(result.dim(), (9, 9));
        assert!(result[[4, 4]] < 1.0);
        assert!(result[[4, 4]] > result[[4, 5]]);
        assert!((result[[3, 4]] - result[[5, 4]]).abs() < 1e-12);
        assert!((result[[4, 3]] - result[[3, 4]]).abs() < 1e-12);
        assert!((result.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_per_value_filters() {
        let m = arr2(&[[4.0, 1.0], [0.0, -1.0]]);
        let roots = PerValueAdapter(Sqrt).filter(&m).unwrap();
        assert_eq!(roots[[0, 0]], 2.0);
        assert!(roots[[1, 1]].is_nan());

        let logs = PerValueAdapter(Log).filter(&m).unwrap();
        assert_eq!(logs[[0, 1]], 0.0);
        assert_eq!(logs[[1, 0]], f64::NEG_INFINITY);

        let halved = PerValueAdapter(|v: f64| v / 2.0).filter(&m).unwrap();
        assert_eq!(halved, arr2(&[[2.0, 0.5], [0.0, -0.5]]));
    }

    #[test]
    fn test_per_pixel_filter_sees_positions() {
        let m = Matrix::zeros((2, 3));
        let result = PerPixelAdapter(|row: usize, col: usize, v: f64| v + (row * 10 + col) as f64)
            .filter(&m)
            .unwrap();
        assert_eq!(result, arr2(&[[0.0, 1.0, 2.0], [10.0, 11.0, 12.0]]));
    }

    #[test]
    fn test_filter_chain_composes_left_to_right() {
        let chain = FilterChain::new()
            .then(Add::new(1.0))
            .then(ScalarMultiply::new(2.0))
            .then(SubstituteOutOfRange::new(0.0, 10.0, 0.0));
        let result = chain.filter(&sample()).unwrap();

        assert_eq!(chain.len(), 3);
        assert_eq!(result, arr2(&[[0.0, 2.0, 4.0], [6.0, 8.0, 0.0], [0.0, 1.0, 8.0]]));
    }

    #[test]
    fn test_filter_chain_stops_at_first_error() {
        let chain = FilterChain::new().then(Add::new(1.0)).then(Gaussian::new(-3.0));
        assert!(chain.filter(&sample()).is_err());
        assert!(FilterChain::new().filter(&sample()).unwrap() == sample());
    }
}
