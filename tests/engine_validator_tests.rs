use segfit_rs::internals::algorithms::basis::{BasisKind, BasisLibrary, ExponentialMode};
use segfit_rs::internals::engine::validator::Validator;
use segfit_rs::internals::evaluation::cv::{HoldOut, InSample, KFold, LOOCV};
use segfit_rs::internals::primitives::errors::SegfitError;
use segfit_rs::internals::primitives::segment::Point;
use segfit_rs::prelude::Segfit;

fn points(n: usize) -> Vec<Point<f64>> {
    (0..n).map(|i| Point::new(i as f64, 1.0)).collect()
}

// ============================================================================
// Point Validation
// ============================================================================

#[test]
fn test_validate_points() {
    assert!(Validator::validate_points(&points(20)).is_ok());
    assert!(Validator::validate_points(&points(60)).is_ok());

    assert_eq!(
        Validator::validate_points(&points(19)).unwrap_err(),
        SegfitError::InvalidSegmentCount {
            got: 19,
            segment_len: 20
        }
    );
    assert!(matches!(
        Validator::validate_points(&points(0)),
        Err(SegfitError::InvalidSegmentCount { got: 0, .. })
    ));
}

#[test]
fn test_validate_points_non_finite() {
    let mut pts = points(20);
    pts[7].y = f64::NAN;
    let err = Validator::validate_points(&pts).unwrap_err();
    assert!(matches!(err, SegfitError::InvalidNumericValue(ref s) if s.starts_with("y[7]")));

    let mut pts = points(20);
    pts[2].x = f64::INFINITY;
    let err = Validator::validate_points(&pts).unwrap_err();
    assert!(matches!(err, SegfitError::InvalidNumericValue(ref s) if s.starts_with("x[2]")));
}

// ============================================================================
// Parameter Validation
// ============================================================================

#[test]
fn test_validate_threshold() {
    assert!(Validator::validate_threshold(0.8).is_ok());
    assert!(Validator::validate_threshold(1.0).is_ok());
    assert!(Validator::validate_threshold(0.0).is_err());
    assert!(Validator::validate_threshold(1.01).is_err());
    assert!(Validator::validate_threshold(f64::NAN).is_err());
}

#[test]
fn test_validate_tolerance() {
    assert!(Validator::validate_tolerance(0.0).is_ok());
    assert!(Validator::validate_tolerance(1e-10).is_ok());
    assert_eq!(
        Validator::validate_tolerance(-1.0).unwrap_err(),
        SegfitError::InvalidTolerance(-1.0)
    );
    assert!(Validator::validate_tolerance(f64::INFINITY).is_err());
}

#[test]
fn test_validate_candidates_requires_linear() {
    let library = BasisLibrary::new(&[BasisKind::Cubic], ExponentialMode::Isolated).unwrap();
    assert!(matches!(
        Validator::validate_candidates(&library),
        Err(SegfitError::InvalidCandidateSet(_))
    ));
    assert!(Validator::validate_candidates(&BasisLibrary::default()).is_ok());
}

#[test]
fn test_validate_cv() {
    let library = BasisLibrary::default();
    assert!(Validator::validate_cv(&LOOCV(), &library).is_ok());
    assert!(Validator::validate_cv(&KFold(10), &library).is_ok());
    assert!(Validator::validate_cv(&InSample(), &library).is_ok());

    assert_eq!(
        Validator::validate_cv(&HoldOut(0.9), &library).unwrap_err(),
        SegfitError::TooFewPoints { got: 2, min: 4 }
    );
    assert_eq!(
        Validator::validate_cv(&KFold(21), &library).unwrap_err(),
        SegfitError::InvalidFolds { k: 21, n: 20 }
    );

    // Two folds leave 10 training points, enough for the 5-term basis.
    let combined = BasisLibrary::new(&BasisKind::ALL, ExponentialMode::WithCubic).unwrap();
    assert!(Validator::validate_cv(&KFold(2), &combined).is_ok());
}

// ============================================================================
// Builder Validation
// ============================================================================

#[test]
fn test_builder_defaults() {
    let model = Segfit::<f64>::new().build().unwrap();
    assert_eq!(
        model.library().active(),
        &[BasisKind::Linear, BasisKind::Cubic, BasisKind::Sine]
    );
    assert_eq!(model.config().cv, LOOCV());
    assert_eq!(model.config().selector.threshold(), 0.8);
}

#[test]
fn test_builder_duplicate_parameter() {
    let result = Segfit::<f64>::new().threshold(0.7).threshold(0.9).build();
    assert_eq!(
        result.unwrap_err(),
        SegfitError::DuplicateParameter {
            parameter: "threshold"
        }
    );

    // The first duplicate is reported.
    let result = Segfit::<f64>::new()
        .cross_validate(LOOCV())
        .candidates(&[BasisKind::Linear])
        .cross_validate(KFold(5))
        .candidates(&[BasisKind::Linear])
        .build();
    assert_eq!(
        result.unwrap_err(),
        SegfitError::DuplicateParameter {
            parameter: "cross_validate"
        }
    );
}

#[test]
fn test_builder_rejects_invalid_parameters() {
    assert_eq!(
        Segfit::<f64>::new().threshold(1.5).build().unwrap_err(),
        SegfitError::InvalidThreshold(1.5)
    );
    assert!(matches!(
        Segfit::<f64>::new()
            .candidates(&[BasisKind::Sine, BasisKind::Cubic])
            .build(),
        Err(SegfitError::InvalidCandidateSet(_))
    ));
    assert!(matches!(
        Segfit::<f64>::new().candidates(&[]).build(),
        Err(SegfitError::InvalidCandidateSet(_))
    ));
    assert_eq!(
        Segfit::<f64>::new().cross_validate(KFold(1)).build().unwrap_err(),
        SegfitError::InvalidFolds { k: 1, n: 20 }
    );
    assert_eq!(
        Segfit::<f64>::new()
            .cross_validate(HoldOut(1.0))
            .build()
            .unwrap_err(),
        SegfitError::InvalidTestFraction(1.0)
    );
}

#[test]
fn test_model_rejects_bad_point_counts() {
    let model = Segfit::<f64>::new().build().unwrap();
    assert_eq!(
        model.fit(&points(30)).unwrap_err(),
        SegfitError::InvalidSegmentCount {
            got: 30,
            segment_len: 20
        }
    );
    assert_eq!(
        model.fit_xy(&[0.0; 20], &[0.0; 19]).unwrap_err(),
        SegfitError::MismatchedInputs {
            x_len: 20,
            y_len: 19
        }
    );
}
