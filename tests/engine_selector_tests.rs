use segfit_rs::internals::algorithms::basis::BasisKind;
use segfit_rs::internals::engine::selector::{ModelSelector, DEFAULT_THRESHOLD, DEFAULT_TOLERANCE};
use segfit_rs::internals::evaluation::cv::CvScores;
use segfit_rs::internals::primitives::errors::SegfitError;

use BasisKind::{Cubic, Exponential, Linear, Quadratic, Sine};

fn selector() -> ModelSelector<f64> {
    ModelSelector::default()
}

// ============================================================================
// Regularization Rule
// ============================================================================

#[test]
fn test_defaults() {
    let s = selector();
    assert_eq!(s.threshold(), DEFAULT_THRESHOLD);
    assert_eq!(s.tolerance(), DEFAULT_TOLERANCE);
}

/// A marginal improvement over linear is rejected.
#[test]
fn test_marginal_improvement_falls_back_to_linear() {
    let scores = CvScores::new(&[(Linear, 1.0), (Cubic, 2.0), (Sine, 0.85)], 50.0, 1.0);
    let selection = selector().select(&scores).unwrap();

    assert_eq!(selection.basis, Linear);
    assert_eq!(selection.raw_winner, Sine);
    assert!(selection.regularized);
    assert_eq!(selection.cv_error, 1.0);
}

/// A clear improvement over linear is accepted.
#[test]
fn test_clear_improvement_is_kept() {
    let scores = CvScores::new(&[(Linear, 1.0), (Cubic, 2.0), (Sine, 0.75)], 50.0, 1.0);
    let selection = selector().select(&scores).unwrap();

    assert_eq!(selection.basis, Sine);
    assert_eq!(selection.raw_winner, Sine);
    assert!(!selection.regularized);
    assert_eq!(selection.cv_error, 0.75);
}

#[test]
fn test_threshold_boundary_is_strict() {
    // 0.5 is exactly the threshold times the linear error.
    let scores = CvScores::new(&[(Linear, 1.0), (Cubic, 0.5)], 50.0, 1.0);
    let selection = ModelSelector::new(0.5, 0.0).select(&scores).unwrap();
    assert_eq!(selection.basis, Linear);
    assert!(selection.regularized);

    let scores = CvScores::new(&[(Linear, 1.0), (Cubic, 0.49)], 50.0, 1.0);
    let selection = ModelSelector::new(0.5, 0.0).select(&scores).unwrap();
    assert_eq!(selection.basis, Cubic);
}

#[test]
fn test_threshold_one_accepts_any_improvement() {
    let scores = CvScores::new(&[(Linear, 1.0), (Quadratic, 0.99)], 50.0, 1.0);
    let selection = ModelSelector::new(1.0, 0.0).select(&scores).unwrap();
    assert_eq!(selection.basis, Quadratic);
}

#[test]
fn test_linear_minimum_wins_outright() {
    let scores = CvScores::new(&[(Linear, 0.1), (Cubic, 0.3), (Sine, 0.2)], 50.0, 1.0);
    let selection = selector().select(&scores).unwrap();

    assert_eq!(selection.basis, Linear);
    assert_eq!(selection.raw_winner, Linear);
    assert!(!selection.regularized);
}

// ============================================================================
// Ties and Noise Floor
// ============================================================================

#[test]
fn test_exact_fit_tie_prefers_linear() {
    // Rounding noise on exact fits, well below the floor.
    let scores = CvScores::new(&[(Linear, 3e-29), (Cubic, 1e-30), (Sine, 2.0)], 40.0, 1.0);
    let selection = selector().select(&scores).unwrap();

    assert_eq!(selection.basis, Linear);
    assert!(!selection.regularized);
}

#[test]
fn test_equal_totals_resolve_by_priority() {
    let scores = CvScores::new(
        &[(Sine, 0.1), (Exponential, 0.1), (Cubic, 0.1), (Linear, 5.0)],
        50.0,
        1.0,
    );
    let selection = selector().select(&scores).unwrap();
    assert_eq!(selection.basis, Cubic);
}

#[test]
fn test_exact_nonlinear_fit_beats_noisy_linear() {
    let scores = CvScores::new(&[(Linear, 0.4), (Cubic, 1e-29), (Sine, 0.3)], 40.0, 1.0);
    let selection = selector().select(&scores).unwrap();

    assert_eq!(selection.basis, Cubic);
    assert_eq!(selection.cv_error, 1e-29);
}

/// A large offset raises `peak` but leaves the spread, and the floor, alone.
#[test]
fn test_offset_segment_keeps_exact_fit() {
    let scores = CvScores::new(&[(Linear, 5.9), (Cubic, 0.27), (Sine, 1.4e-18)], 10.0, 1e6);
    let selection = selector().select(&scores).unwrap();

    assert_eq!(selection.basis, Sine);
    assert!(!selection.regularized);
}

#[test]
fn test_small_amplitude_segment_keeps_exact_fit() {
    let scores = CvScores::new(
        &[(Linear, 6.3e-13), (Cubic, 4.4e-43), (Sine, 1e-13)],
        1.5e-12,
        4e-7,
    );
    let selection = selector().select(&scores).unwrap();
    assert_eq!(selection.basis, Cubic);
}

/// A flat segment has no spread; rounding noise still ties.
#[test]
fn test_flat_segment_ties_to_linear() {
    let scores = CvScores::new(&[(Linear, 1e-30), (Cubic, 1e-31), (Sine, 2e-31)], 0.0, 3.0);
    let selection = selector().select(&scores).unwrap();

    assert_eq!(selection.basis, Linear);
    assert!(!selection.regularized);
}

#[test]
fn test_score_order_does_not_matter() {
    let a = CvScores::new(&[(Linear, 1.0), (Cubic, 0.5), (Sine, 0.5)], 50.0, 1.0);
    let b = CvScores::new(&[(Sine, 0.5), (Cubic, 0.5), (Linear, 1.0)], 50.0, 1.0);
    assert_eq!(selector().select(&a).unwrap(), selector().select(&b).unwrap());
}

// ============================================================================
// Failure Modes
// ============================================================================

#[test]
fn test_missing_linear_is_rejected() {
    let scores = CvScores::new(&[(Cubic, 1.0), (Sine, 0.5)], 10.0, 1.0);
    assert!(matches!(
        selector().select(&scores),
        Err(SegfitError::InvalidCandidateSet(_))
    ));
}

#[test]
fn test_empty_scores_are_rejected() {
    let scores = CvScores::<f64>::new(&[], 0.0, 1.0);
    assert!(matches!(
        selector().select(&scores),
        Err(SegfitError::InvalidCandidateSet(_))
    ));
}

#[test]
fn test_non_finite_error_is_rejected() {
    let scores = CvScores::new(&[(Linear, 1.0), (Cubic, f64::NAN)], 10.0, 1.0);
    assert!(matches!(
        selector().select(&scores),
        Err(SegfitError::InvalidNumericValue(_))
    ));

    let scores = CvScores::new(&[(Linear, f64::INFINITY), (Cubic, 1.0)], 10.0, 1.0);
    assert!(selector().select(&scores).is_err());
}
