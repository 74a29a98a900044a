use segfit_rs::internals::algorithms::basis::BasisKind;
use segfit_rs::internals::primitives::errors::SegfitError;

#[test]
fn test_segfit_error_display() {
    // MalformedInputFile
    let err = SegfitError::MalformedInputFile {
        line: 3,
        reason: "expected 2 columns, found 3".to_string(),
    };
    assert_eq!(
        format!("{}", err),
        "Malformed input file at line 3: expected 2 columns, found 3"
    );

    // Io
    let err = SegfitError::Io {
        path: "missing.csv".to_string(),
        message: "not found".to_string(),
    };
    assert_eq!(format!("{}", err), "Cannot access 'missing.csv': not found");

    // InvalidSegmentCount
    let err = SegfitError::InvalidSegmentCount {
        got: 30,
        segment_len: 20,
    };
    assert_eq!(
        format!("{}", err),
        "Invalid point count: 30 (must be a positive multiple of 20)"
    );

    // SingularDesignMatrix
    let err = SegfitError::SingularDesignMatrix { rows: 19, cols: 4 };
    assert_eq!(
        format!("{}", err),
        "Singular design matrix: 19x4 system is rank deficient"
    );

    // InvalidModelTag
    let err = SegfitError::InvalidModelTag(BasisKind::Exponential);
    assert_eq!(
        format!("{}", err),
        "Model 'exponential' is not in the active candidate set"
    );

    // InvalidCoefficients
    let err = SegfitError::InvalidCoefficients {
        expected: 4,
        got: 2,
    };
    assert_eq!(
        format!("{}", err),
        "Invalid coefficients: got 2, basis has 4 terms"
    );

    // MismatchedInputs
    let err = SegfitError::MismatchedInputs {
        x_len: 10,
        y_len: 5,
    };
    assert_eq!(
        format!("{}", err),
        "Length mismatch: x has 10 points, y has 5"
    );

    // InvalidNumericValue
    let err = SegfitError::InvalidNumericValue("NaN detected".to_string());
    assert_eq!(format!("{}", err), "Invalid numeric value: NaN detected");

    // TooFewPoints
    let err = SegfitError::TooFewPoints { got: 2, min: 4 };
    assert_eq!(format!("{}", err), "Too few points: got 2, need at least 4");

    // InvalidThreshold
    let err = SegfitError::InvalidThreshold(1.5);
    assert_eq!(
        format!("{}", err),
        "Invalid threshold: 1.5 (must be > 0 and <= 1)"
    );

    // InvalidTolerance
    let err = SegfitError::InvalidTolerance(-1.0);
    assert_eq!(
        format!("{}", err),
        "Invalid tolerance: -1 (must be >= 0 and finite)"
    );

    // InvalidFolds
    let err = SegfitError::InvalidFolds { k: 1, n: 20 };
    assert_eq!(
        format!("{}", err),
        "Invalid folds: 1 (must be between 2 and 20)"
    );

    // InvalidTestFraction
    let err = SegfitError::InvalidTestFraction(1.0);
    assert_eq!(
        format!("{}", err),
        "Invalid test fraction: 1 (must be > 0 and < 1)"
    );

    // DuplicateParameter
    let err = SegfitError::DuplicateParameter { parameter: "foo" };
    assert_eq!(
        format!("{}", err),
        "Parameter 'foo' was set multiple times. Each parameter can only be configured once."
    );

    // InvalidCandidateSet
    let err = SegfitError::InvalidCandidateSet("empty".to_string());
    assert_eq!(format!("{}", err), "Invalid candidate set: empty");

    // PlotFailed / ReportFailed
    let err = SegfitError::PlotFailed("no space".to_string());
    assert_eq!(format!("{}", err), "Plot rendering failed: no space");
    let err = SegfitError::ReportFailed("no space".to_string());
    assert_eq!(format!("{}", err), "Report writing failed: no space");
}

#[test]
fn test_segfit_error_properties() {
    let err1 = SegfitError::SingularDesignMatrix { rows: 3, cols: 4 };
    let err2 = err1.clone();
    assert_eq!(err1, err2);
    assert_ne!(err1, SegfitError::InvalidModelTag(BasisKind::Linear));
}

#[test]
fn test_segfit_error_is_std_error() {
    fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<SegfitError>();
}
