//! Linear algebra backend for least-squares fitting.
//!
//! ## Purpose
//!
//! This module provides a trait-based bridge from generic `Float` types to the
//! nalgebra backend, exposing the two solve paths used by the fitter.
//!
//! ## Design notes
//!
//! * Both paths detect rank deficiency from the singular values of the system
//!   matrix and report it as `None`; no pseudo-inverse fallback is attempted.
//! * The SVD path factors the design matrix `X` itself, so its conditioning is
//!   not squared the way the normal-equations path squares it.
//! * The normal-equations path only rejects systems the SVD path would also
//!   call rank deficient. Ill-conditioned but full-rank designs (a cubic on
//!   x in [100, 119], say) are inverted and may lose most of their precision.
//! * Generic over `FloatLinalg` types (f32 and f64) which delegate to nalgebra.
//!
//! ## Invariants
//!
//! * Design matrices are passed row-major, `rows x cols`.
//! * Numerical rank tolerance is `sigma_max * max(rows, cols) * epsilon` on the
//!   singular values of `X`.

use num_traits::Float;

// ============================================================================
// FloatLinalg Trait
// ============================================================================

/// Helper trait to bridge generic Float types to the nalgebra backend.
pub trait FloatLinalg: Float + 'static {
    /// Minimise `||Xc - y||` via an SVD of `X`.
    fn solve_svd(design: &[Self], y: &[Self], rows: usize, cols: usize) -> Option<Vec<Self>>;

    /// Solve the normal equations `(XᵗX)c = Xᵗy` through the inverse of `XᵗX`.
    fn solve_normal(design: &[Self], y: &[Self], rows: usize, cols: usize)
        -> Option<Vec<Self>>;
}

impl FloatLinalg for f64 {
    #[inline]
    fn solve_svd(design: &[Self], y: &[Self], rows: usize, cols: usize) -> Option<Vec<Self>> {
        nalgebra_backend::solve_svd_f64(design, y, rows, cols)
    }
    #[inline]
    fn solve_normal(
        design: &[Self],
        y: &[Self],
        rows: usize,
        cols: usize,
    ) -> Option<Vec<Self>> {
        nalgebra_backend::solve_normal_f64(design, y, rows, cols)
    }
}

impl FloatLinalg for f32 {
    #[inline]
    fn solve_svd(design: &[Self], y: &[Self], rows: usize, cols: usize) -> Option<Vec<Self>> {
        nalgebra_backend::solve_svd_f32(design, y, rows, cols)
    }
    #[inline]
    fn solve_normal(
        design: &[Self],
        y: &[Self],
        rows: usize,
        cols: usize,
    ) -> Option<Vec<Self>> {
        nalgebra_backend::solve_normal_f32(design, y, rows, cols)
    }
}

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based linear algebra operations.
pub mod nalgebra_backend {
    use nalgebra::{DMatrix, DVector};

    macro_rules! impl_solvers {
        ($float:ty, $svd_fn:ident, $normal_fn:ident) => {
            /// Least-squares solve through an SVD of the design matrix.
            pub fn $svd_fn(
                design: &[$float],
                y: &[$float],
                rows: usize,
                cols: usize,
            ) -> Option<Vec<$float>> {
                let x = DMatrix::from_row_slice(rows, cols, design);
                let rhs = DVector::from_column_slice(y);

                let svd = x.svd(true, true);
                let tol = svd.singular_values.max() * (rows.max(cols) as $float) * <$float>::EPSILON;
                if svd.rank(tol) < cols {
                    return None;
                }

                svd.solve(&rhs, tol)
                    .ok()
                    .map(|s: DVector<$float>| s.as_slice().to_vec())
            }

            /// Normal-equations solve `c = (XᵗX)⁻¹ Xᵗy`.
            pub fn $normal_fn(
                design: &[$float],
                y: &[$float],
                rows: usize,
                cols: usize,
            ) -> Option<Vec<$float>> {
                let x = DMatrix::from_row_slice(rows, cols, design);
                let rhs = DVector::from_column_slice(y);

                let xtx = x.transpose() * &x;
                let xty = x.transpose() * rhs;

                // Same rank criterion as the SVD path, squared onto the Gram matrix.
                let singular_values = xtx.clone().singular_values();
                let eps = (rows.max(cols) as $float) * <$float>::EPSILON;
                let tol = singular_values.max() * eps * eps;
                if singular_values.iter().filter(|&&s| s > tol).count() < cols {
                    return None;
                }

                xtx.try_inverse()
                    .map(|inv| (inv * xty).as_slice().to_vec())
            }
        };
    }

    impl_solvers!(f64, solve_svd_f64, solve_normal_f64);
    impl_solvers!(f32, solve_svd_f32, solve_normal_f32);
}
