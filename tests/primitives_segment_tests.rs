use segfit_rs::internals::primitives::errors::SegfitError;
use segfit_rs::internals::primitives::segment::{split_segments, zip_points, Point, SEGMENT_LEN};

fn ramp(n: usize) -> Vec<Point<f64>> {
    (0..n)
        .map(|i| Point::new(i as f64 * 0.5, (i as f64).sqrt()))
        .collect()
}

// ============================================================================
// Splitting
// ============================================================================

#[test]
fn test_split_produces_fixed_size_segments() {
    let points = ramp(60);
    let segments = split_segments(&points).unwrap();

    assert_eq!(segments.len(), 3);
    for (i, segment) in segments.iter().enumerate() {
        assert_eq!(segment.index, i);
        assert_eq!(segment.len(), SEGMENT_LEN);
    }
}

#[test]
fn test_split_then_concatenate_reproduces_input() {
    let points = ramp(80);
    let segments = split_segments(&points).unwrap();

    let rejoined: Vec<Point<f64>> = segments
        .iter()
        .flat_map(|s| s.points.iter().copied())
        .collect();
    assert_eq!(rejoined, points);
}

#[test]
fn test_split_rejects_partial_segment() {
    let points = ramp(30);
    assert_eq!(
        split_segments(&points).unwrap_err(),
        SegfitError::InvalidSegmentCount {
            got: 30,
            segment_len: 20
        }
    );
}

#[test]
fn test_split_rejects_empty_input() {
    let points: Vec<Point<f64>> = Vec::new();
    assert!(matches!(
        split_segments(&points),
        Err(SegfitError::InvalidSegmentCount { got: 0, .. })
    ));
}

// ============================================================================
// Segment Accessors
// ============================================================================

#[test]
fn test_segment_coordinates_and_range() {
    let points = ramp(20);
    let segments = split_segments(&points).unwrap();
    let segment = segments[0];

    assert_eq!(segment.xs()[3], 1.5);
    assert_eq!(segment.ys()[4], 2.0);
    assert_eq!(segment.x_range(), (0.0, 9.5));
}

#[test]
fn test_x_range_of_unsorted_segment() {
    let points: Vec<Point<f64>> = (0..20)
        .map(|i| Point::new(((i * 7) % 20) as f64 - 5.0, 0.0))
        .collect();
    let segments = split_segments(&points).unwrap();
    assert_eq!(segments[0].x_range(), (-5.0, 14.0));
}

#[test]
fn test_zip_points() {
    let points = zip_points(&[1.0, 2.0], &[3.0, 4.0]).unwrap();
    assert_eq!(points, vec![Point::new(1.0, 3.0), Point::new(2.0, 4.0)]);

    assert_eq!(
        zip_points(&[1.0, 2.0, 3.0], &[3.0]).unwrap_err(),
        SegfitError::MismatchedInputs { x_len: 3, y_len: 1 }
    );
}
