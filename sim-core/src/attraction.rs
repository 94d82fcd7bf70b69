//! Group-pairwise attraction coefficients and the force law built on them.

use crate::{error::ConfigError, types::GroupId};
use rand::Rng;

/// A `G × G` table of signed attraction coefficients in `[-1, 1]`.
///
/// Rows are indexed by the *subject* group (the particle being pushed),
/// columns by the *object* group (the particle doing the pushing). The
/// table is asymmetric: `get(a, b)` says nothing about `get(b, a)`.
///
/// The matrix is only ever swapped as a whole between frames; the
/// simulation step borrows it immutably.
#[derive(Clone, Debug, PartialEq)]
pub struct AttractionMatrix {
    groups: usize,
    coeffs: Vec<f32>,
}

impl AttractionMatrix {
    /// Creates a matrix with every coefficient set to zero.
    pub fn zeros(groups: usize) -> Self {
        Self {
            groups,
            coeffs: vec![0.0; groups * groups],
        }
    }

    /// Builds a matrix from explicit rows, validating shape and range.
    ///
    /// ### Errors
    /// - [`ConfigError::Invalid`] if `rows` is empty.
    /// - [`ConfigError::MatrixShape`] if any row length differs from the row count.
    /// - [`ConfigError::Coefficient`] if a value is non-finite or outside `[-1, 1]`.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, ConfigError> {
        let groups = rows.len();
        if groups == 0 {
            return Err(ConfigError::Invalid("attraction matrix must not be empty"));
        }

        let mut coeffs = Vec::with_capacity(groups * groups);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != groups {
                return Err(ConfigError::MatrixShape {
                    row,
                    len: values.len(),
                    expected: groups,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                    return Err(ConfigError::Coefficient { row, col, value });
                }
                coeffs.push(value);
            }
        }

        Ok(Self { groups, coeffs })
    }

    /// Draws every coefficient uniformly from `[-1, 1]`.
    pub fn random(groups: usize, rng: &mut impl Rng) -> Self {
        let coeffs = (0..groups * groups)
            .map(|_| rng.random_range(-1.0..=1.0))
            .collect();
        Self { groups, coeffs }
    }

    #[inline]
    pub fn group_count(&self) -> usize {
        self.groups
    }

    /// Coefficient applied to `subject` when it is acted on by `object`.
    ///
    /// ### Panics
    /// Panics if either group is `>= group_count()`. Group ids are validated
    /// when particles are created, so this only fires on a logic error.
    #[inline]
    pub fn get(&self, subject: GroupId, object: GroupId) -> f32 {
        self.coeffs[subject * self.groups + object]
    }

    /// Iterates the matrix row by row (one slice per subject group).
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.coeffs.chunks(self.groups.max(1))
    }

    /// Copies the matrix out as nested rows, the shape used in config files.
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.rows().map(<[f32]>::to_vec).collect()
    }
}

/// Scalar force between two particles at `distance` (normalized by the
/// interaction radius, so `1.0` is the edge of the neighborhood).
///
/// - Below `too_close`: repulsion ramping from `-1` at contact to `0` at
///   `too_close`, regardless of `coefficient`.
/// - Between `too_close` and `1`: a triangular bump that is zero at both
///   ends and reaches `coefficient` halfway between them.
/// - At or beyond `1`: zero.
///
/// Positive results pull the subject toward the object, negative ones push
/// it away. `too_close` must lie in `[0, 1)`.
#[inline]
pub fn force_magnitude(distance: f32, coefficient: f32, too_close: f32) -> f32 {
    if distance < too_close {
        distance / too_close - 1.0
    } else if distance < 1.0 {
        let peak = 1.0 + too_close;
        coefficient * (1.0 - (2.0 * distance - peak).abs() / (1.0 - too_close))
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng};

    const T: f32 = 0.4;
    const EPS: f32 = 1e-6;

    #[test]
    fn force_at_contact_is_full_repulsion_for_any_coefficient() {
        for c in [-1.0, -0.3, 0.0, 0.5, 1.0] {
            assert_eq!(force_magnitude(0.0, c, T), -1.0);
        }
    }

    #[test]
    fn force_vanishes_at_threshold_and_at_radius() {
        for c in [-1.0, 0.2, 1.0] {
            assert!(force_magnitude(T, c, T).abs() < EPS);
            assert_eq!(force_magnitude(1.0, c, T), 0.0);
        }
    }

    #[test]
    fn force_is_zero_beyond_radius() {
        for d in [1.0, 1.0001, 1.5, 10.0, f32::MAX] {
            assert_eq!(force_magnitude(d, 1.0, T), 0.0);
            assert_eq!(force_magnitude(d, -1.0, T), 0.0);
        }
    }

    #[test]
    fn force_peaks_at_coefficient_midway() {
        let mid = (1.0 + T) / 2.0;
        assert!((force_magnitude(mid, 0.7, T) - 0.7).abs() < EPS);
        assert!((force_magnitude(mid, -1.0, T) + 1.0).abs() < EPS);
    }

    #[test]
    fn repulsion_band_ignores_coefficient() {
        let d = 0.2;
        let expected = d / T - 1.0;
        assert!((force_magnitude(d, 1.0, T) - expected).abs() < EPS);
        assert!((force_magnitude(d, -1.0, T) - expected).abs() < EPS);
    }

    #[test]
    fn zero_threshold_disables_repulsion_band() {
        assert_eq!(force_magnitude(0.0, 1.0, 0.0), 0.0);
        assert!((force_magnitude(0.5, 1.0, 0.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn from_rows_reads_subject_major() {
        let m = AttractionMatrix::from_rows(&[vec![1.0, -1.0], vec![0.2, 0.0]]).unwrap();
        assert_eq!(m.group_count(), 2);
        assert_eq!(m.get(0, 1), -1.0);
        assert_eq!(m.get(1, 0), 0.2);
        assert_eq!(m.to_rows(), vec![vec![1.0, -1.0], vec![0.2, 0.0]]);
    }

    #[test]
    fn from_rows_rejects_bad_shapes_and_values() {
        assert!(matches!(
            AttractionMatrix::from_rows(&[]),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AttractionMatrix::from_rows(&[vec![0.0, 0.0], vec![0.0]]),
            Err(ConfigError::MatrixShape { row: 1, len: 1, expected: 2 })
        ));
        assert!(matches!(
            AttractionMatrix::from_rows(&[vec![1.5]]),
            Err(ConfigError::Coefficient { row: 0, col: 0, .. })
        ));
        assert!(matches!(
            AttractionMatrix::from_rows(&[vec![f32::NAN]]),
            Err(ConfigError::Coefficient { .. })
        ));
    }

    #[test]
    fn random_matrix_stays_in_range_and_is_seed_stable() {
        let mut a = SmallRng::seed_from_u64(11);
        let mut b = SmallRng::seed_from_u64(11);
        let m1 = AttractionMatrix::random(4, &mut a);
        let m2 = AttractionMatrix::random(4, &mut b);
        assert_eq!(m1, m2);
        assert!(m1.rows().flatten().all(|c| (-1.0..=1.0).contains(c)));
    }
}
