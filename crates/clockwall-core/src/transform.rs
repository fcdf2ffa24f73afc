//! 2-D affine transforms as 3×3 matrices.
//!
//! Hand rotation for the analog face is a single matrix product
//! `translate(+pivot) · rotate(angle) · translate(-pivot)`, so the hand
//! turns around the face's center rather than the coordinate origin. The
//! renderer receives the six affine coefficients and never sees the
//! matrix.

use std::f64::consts::TAU;
use std::ops::Mul;

use serde::Serialize;

/// Errors raised while building transforms.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// The input grid is not exactly 3 rows of 3 values.
    #[error("matrix must be 3x3, got {rows} rows (row lengths {row_lengths:?})")]
    NotThreeByThree {
        /// Number of rows supplied.
        rows: usize,
        /// Length of each supplied row.
        row_lengths: Vec<usize>,
    },

    /// A hand modulus that is zero, negative or not finite.
    #[error("modulus must be a positive finite number, got {modulus}")]
    InvalidModulus {
        /// The rejected modulus.
        modulus: f64,
    },
}

/// A point in the renderer's coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate (grows downward in SVG).
    pub y: f64,
}

impl Point {
    /// Build a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are within `epsilon` of `other`'s.
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

/// The six coefficients of a 2-D affine map, in SVG `matrix(a,b,c,d,e,f)`
/// order.
///
/// They are the top two rows of the 3×3 matrix read column by column:
/// `[[a, c, e], [b, d, f], [0, 0, 1]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AffineCoefficients {
    /// Row 0, column 0.
    pub a: f64,
    /// Row 1, column 0.
    pub b: f64,
    /// Row 0, column 1.
    pub c: f64,
    /// Row 1, column 1.
    pub d: f64,
    /// Row 0, column 2 (horizontal translation).
    pub e: f64,
    /// Row 1, column 2 (vertical translation).
    pub f: f64,
}

impl AffineCoefficients {
    /// The coefficients as an array in `a..f` order.
    pub const fn to_array(self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Render as an SVG `transform` attribute value.
    pub fn to_svg_transform(self) -> String {
        format!(
            "matrix({},{},{},{},{},{})",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}

/// An immutable 3×3 matrix representing a 2-D affine map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Matrix3 {
    rows: [[f64; 3]; 3],
}

impl Matrix3 {
    /// The identity map.
    pub const IDENTITY: Self = Self {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Build from a fixed-size grid.
    pub const fn from_array(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    /// Build from a dynamically sized grid.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NotThreeByThree`] unless `rows` holds
    /// exactly three rows of exactly three values.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, TransformError> {
        let not_square = || TransformError::NotThreeByThree {
            rows: rows.len(),
            row_lengths: rows.iter().map(Vec::len).collect(),
        };
        match rows {
            [r0, r1, r2] => Ok(Self {
                rows: [
                    row_array(r0).ok_or_else(not_square)?,
                    row_array(r1).ok_or_else(not_square)?,
                    row_array(r2).ok_or_else(not_square)?,
                ],
            }),
            _ => Err(not_square()),
        }
    }

    /// The identity map.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Shift by `(tx, ty)`.
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self {
            rows: [[1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0]],
        }
    }

    /// Rotate by `angle` radians about the origin.
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            rows: [[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Scale by `(sx, sy)` about the origin.
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self {
            rows: [[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Rotate by `angle` radians about `pivot`:
    /// `translate(+pivot) · rotate(angle) · translate(-pivot)`.
    pub fn rotation_about(angle: f64, pivot: Point) -> Self {
        Self::translation(pivot.x, pivot.y)
            .multiply(&Self::rotation(angle))
            .multiply(&Self::translation(-pivot.x, -pivot.y))
    }

    /// The grid, row-major.
    pub const fn rows(&self) -> &[[f64; 3]; 3] {
        &self.rows
    }

    /// Row-by-column product `self · other`.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let columns = other.transpose().rows;
        Self {
            rows: self.rows.map(|row| columns.map(|column| dot(row, column))),
        }
    }

    /// Rows and columns exchanged.
    #[must_use]
    pub const fn transpose(&self) -> Self {
        let [[a, b, c], [d, e, f], [g, h, i]] = self.rows;
        Self {
            rows: [[a, d, g], [b, e, h], [c, f, i]],
        }
    }

    /// Map `point` through the transform.
    pub fn apply(&self, point: Point) -> Point {
        let [[a, c, e], [b, d, f], _] = self.rows;
        Point {
            x: a.mul_add(point.x, c.mul_add(point.y, e)),
            y: b.mul_add(point.x, d.mul_add(point.y, f)),
        }
    }

    /// The six affine coefficients handed to the renderer.
    pub const fn affine_coefficients(&self) -> AffineCoefficients {
        let [[a, c, e], [b, d, f], _] = self.rows;
        AffineCoefficients { a, b, c, d, e, f }
    }

    /// Whether every entry is within `epsilon` of `other`'s.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(x, y)| (x - y).abs() <= epsilon)
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix3 {
    type Error = TransformError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

fn row_array(row: &[f64]) -> Option<[f64; 3]> {
    <[f64; 3]>::try_from(row).ok()
}

fn dot(row: [f64; 3], column: [f64; 3]) -> f64 {
    let [r0, r1, r2] = row;
    let [c0, c1, c2] = column;
    r0.mul_add(c0, r1.mul_add(c1, r2 * c2))
}

/// Rotation in radians for `unit_value` on a dial divided into `modulus`
/// units: `unit_value × (360° / modulus)` converted to radians.
///
/// # Errors
///
/// Returns [`TransformError::InvalidModulus`] unless `modulus` is positive
/// and finite.
pub fn unit_angle(unit_value: f64, modulus: f64) -> Result<f64, TransformError> {
    if !modulus.is_finite() || modulus <= 0.0 {
        return Err(TransformError::InvalidModulus { modulus });
    }
    Ok(unit_value * (TAU / modulus))
}

/// Affine coefficients that rotate a hand drawn at 12 o'clock to show
/// `unit_value` out of `modulus`, pivoting around `pivot`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidModulus`] for a zero, negative or
/// non-finite modulus.
pub fn compute_hand_transform(
    unit_value: f64,
    modulus: f64,
    pivot: Point,
) -> Result<AffineCoefficients, TransformError> {
    let angle = unit_angle(unit_value, modulus)?;
    Ok(Matrix3::rotation_about(angle, pivot).affine_coefficients())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn from_rows_accepts_three_by_three() {
        let m = Matrix3::from_rows(&[
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ])
        .unwrap();
        assert!(m.approx_eq(
            &Matrix3::from_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]),
            0.0
        ));
    }

    #[test]
    fn from_rows_rejects_wrong_row_count() {
        let result = Matrix3::from_rows(&[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]);
        assert_eq!(
            result,
            Err(TransformError::NotThreeByThree {
                rows: 2,
                row_lengths: vec![3, 3],
            })
        );
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let ragged = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0], vec![0.0, 0.0, 1.0]];
        assert!(matches!(
            Matrix3::try_from(ragged),
            Err(TransformError::NotThreeByThree { rows: 3, .. })
        ));
    }

    #[test]
    fn multiply_is_row_by_column() {
        let a = Matrix3::from_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let b = Matrix3::from_array([[9.0, 8.0, 7.0], [6.0, 5.0, 4.0], [3.0, 2.0, 1.0]]);
        let expected =
            Matrix3::from_array([[30.0, 24.0, 18.0], [84.0, 69.0, 54.0], [138.0, 114.0, 90.0]]);
        assert!((a * b).approx_eq(&expected, EPS));
    }

    #[test]
    fn identity_is_neutral() {
        let m = Matrix3::rotation(0.7) * Matrix3::translation(3.0, -2.0);
        assert!((m * Matrix3::identity()).approx_eq(&m, EPS));
        assert!((Matrix3::identity() * m).approx_eq(&m, EPS));
    }

    #[test]
    fn rotation_round_trip_is_identity() {
        let pivot = Point::new(100.0, 100.0);
        for theta in [0.1, FRAC_PI_2, PI, 2.5, -1.3] {
            let there = Matrix3::rotation_about(theta, pivot);
            let back = Matrix3::rotation_about(-theta, pivot);
            assert!((there * back).approx_eq(&Matrix3::IDENTITY, EPS));
        }
    }

    #[test]
    fn rotation_about_keeps_pivot_fixed() {
        let pivot = Point::new(50.0, 80.0);
        let m = Matrix3::rotation_about(1.1, pivot);
        assert!(m.apply(pivot).approx_eq(pivot, EPS));
    }

    #[test]
    fn quarter_turn_about_pivot() {
        // A point above the pivot (12 o'clock in SVG) lands to its right.
        let pivot = Point::new(100.0, 100.0);
        let m = Matrix3::rotation_about(FRAC_PI_2, pivot);
        assert!(m.apply(Point::new(100.0, 60.0)).approx_eq(Point::new(140.0, 100.0), EPS));
    }

    #[test]
    fn scale_and_translate_compose() {
        let m = Matrix3::translation(10.0, 20.0) * Matrix3::scale(2.0, 3.0);
        assert!(m.apply(Point::new(1.0, 1.0)).approx_eq(Point::new(12.0, 23.0), EPS));
    }

    #[test]
    fn unit_angle_divides_full_turn() {
        assert!((unit_angle(3.0, 12.0).unwrap() - FRAC_PI_2).abs() < EPS);
        assert!((unit_angle(30.0, 60.0).unwrap() - PI).abs() < EPS);
        assert!(unit_angle(0.0, 60.0).unwrap().abs() < EPS);
    }

    #[test]
    fn unit_angle_rejects_bad_modulus() {
        assert!(unit_angle(1.0, 0.0).is_err());
        assert!(unit_angle(1.0, -12.0).is_err());
        assert!(unit_angle(1.0, f64::NAN).is_err());
        assert!(unit_angle(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn hand_transform_coefficients() {
        let pivot = Point::new(100.0, 100.0);
        let coeffs = compute_hand_transform(15.0, 60.0, pivot).unwrap();
        // Quarter turn: a = cos = 0, b = sin = 1, c = -sin, d = cos.
        let expected = [0.0, 1.0, -1.0, 0.0, 200.0, 0.0];
        for (got, want) in coeffs.to_array().iter().zip(expected) {
            assert!((got - want).abs() < EPS, "got {got}, want {want}");
        }
    }

    #[test]
    fn zero_rotation_is_identity_coefficients() {
        let coeffs = compute_hand_transform(0.0, 12.0, Point::new(40.0, 40.0)).unwrap();
        let expected = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        for (got, want) in coeffs.to_array().iter().zip(expected) {
            assert!((got - want).abs() < EPS, "got {got}, want {want}");
        }
    }

    #[test]
    fn svg_transform_lists_coefficients_in_order() {
        let coeffs = AffineCoefficients {
            a: 1.0,
            b: 2.0,
            c: 3.0,
            d: 4.0,
            e: 5.5,
            f: -6.0,
        };
        assert_eq!(coeffs.to_svg_transform(), "matrix(1,2,3,4,5.5,-6)");
    }
}
