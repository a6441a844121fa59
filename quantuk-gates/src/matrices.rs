//! Canonical 2×2 matrices for the single-qubit gate families
//!
//! Constant gates are plain `const` items; parameterized gates are generated
//! from an angle in radians. Matrices are row-major: `m[row][col]`.

use num_complex::Complex64;

/// A single-qubit operator in row-major order
pub type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Identity
/// I = [[1, 0],
///      [0, 1]]
pub const IDENTITY: Matrix2 = [[ONE, ZERO], [ZERO, ONE]];

/// Hadamard
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: Matrix2 = [
    [Complex64::new(INV_SQRT2, 0.0), Complex64::new(INV_SQRT2, 0.0)],
    [Complex64::new(INV_SQRT2, 0.0), Complex64::new(-INV_SQRT2, 0.0)],
];

/// Pauli-X (NOT)
/// X = [[0, 1],
///      [1, 0]]
pub const PAULI_X: Matrix2 = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Y
/// Y = [[0, -i],
///      [i,  0]]
pub const PAULI_Y: Matrix2 = [[ZERO, NEG_I], [I, ZERO]];

/// Pauli-Z (phase flip)
/// Z = [[1,  0],
///      [0, -1]]
pub const PAULI_Z: Matrix2 = [[ONE, ZERO], [ZERO, NEG_ONE]];

/// Square root of NOT
/// √X = 1/2 * [[1+i, 1-i],
///             [1-i, 1+i]]
pub const SQRT_X: Matrix2 = [
    [Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5)],
    [Complex64::new(0.5, -0.5), Complex64::new(0.5, 0.5)],
];

/// Square root of Z
/// √Z = [[1, 0],
///       [0, i]]
pub const SQRT_Z: Matrix2 = [[ONE, ZERO], [ZERO, I]];

/// Projector onto |0⟩: |0⟩⟨0|
pub const PROJECTOR_ZERO: Matrix2 = [[ONE, ZERO], [ZERO, ZERO]];

/// Projector onto |1⟩: |1⟩⟨1|
pub const PROJECTOR_ONE: Matrix2 = [[ZERO, ZERO], [ZERO, ONE]];

/// Projector onto the given computational outcome (0 or 1)
#[inline]
pub fn projector(outcome: u8) -> Matrix2 {
    if outcome == 0 {
        PROJECTOR_ZERO
    } else {
        PROJECTOR_ONE
    }
}

/// General phase gate
/// P(φ) = [[1, 0     ],
///         [0, e^(iφ)]]
#[inline]
pub fn phase(phi: f64) -> Matrix2 {
    [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, phi)]]
}

/// Rotation about the Bloch-sphere x axis
/// RX(φ) = [[cos(φ/2),    -i·sin(φ/2)],
///          [-i·sin(φ/2),  cos(φ/2)]]
#[inline]
pub fn rotation_x(phi: f64) -> Matrix2 {
    let (sin_val, cos_val) = (phi / 2.0).sin_cos();

    [
        [Complex64::new(cos_val, 0.0), Complex64::new(0.0, -sin_val)],
        [Complex64::new(0.0, -sin_val), Complex64::new(cos_val, 0.0)],
    ]
}

/// Rotation about the Bloch-sphere y axis
/// RY(φ) = [[cos(φ/2),  -sin(φ/2)],
///          [sin(φ/2),   cos(φ/2)]]
#[inline]
pub fn rotation_y(phi: f64) -> Matrix2 {
    let (sin_val, cos_val) = (phi / 2.0).sin_cos();

    [
        [Complex64::new(cos_val, 0.0), Complex64::new(-sin_val, 0.0)],
        [Complex64::new(sin_val, 0.0), Complex64::new(cos_val, 0.0)],
    ]
}

/// Rotation about the Bloch-sphere z axis
/// RZ(φ) = [[e^(-iφ/2),  0       ],
///          [0,          e^(iφ/2)]]
#[inline]
pub fn rotation_z(phi: f64) -> Matrix2 {
    let half = phi / 2.0;

    [
        [Complex64::from_polar(1.0, -half), ZERO],
        [ZERO, Complex64::from_polar(1.0, half)],
    ]
}

/// Scalar phase e^(iφ)·I
///
/// Embedded on one qubit (identity elsewhere) it multiplies every amplitude
/// of the register by e^(iφ).
#[inline]
pub fn global_phase(phi: f64) -> Matrix2 {
    let e = Complex64::from_polar(1.0, phi);
    [[e, ZERO], [ZERO, e]]
}

/// Product of two 2×2 matrices
#[inline]
pub fn multiply(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    let mut result = [[ZERO; 2]; 2];
    for i in 0..2 {
        for j in 0..2 {
            result[i][j] = a[i][0] * b[0][j] + a[i][1] * b[1][j];
        }
    }
    result
}

/// Conjugate transpose of a 2×2 matrix
#[inline]
pub fn adjoint(m: &Matrix2) -> Matrix2 {
    [
        [m[0][0].conj(), m[1][0].conj()],
        [m[0][1].conj(), m[1][1].conj()],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn assert_matrix_eq(a: &Matrix2, b: &Matrix2) {
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(a[i][j].re, b[i][j].re, epsilon = 1e-12);
                assert_relative_eq!(a[i][j].im, b[i][j].im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_pauli_squares_are_identity() {
        for m in [PAULI_X, PAULI_Y, PAULI_Z, HADAMARD] {
            assert_matrix_eq(&multiply(&m, &m), &IDENTITY);
        }
    }

    #[test]
    fn test_sqrt_x_squared_is_x() {
        assert_matrix_eq(&multiply(&SQRT_X, &SQRT_X), &PAULI_X);
    }

    #[test]
    fn test_sqrt_z_squared_is_z() {
        assert_matrix_eq(&multiply(&SQRT_Z, &SQRT_Z), &PAULI_Z);
    }

    #[test]
    fn test_phase_180_is_z() {
        assert_matrix_eq(&phase(PI), &PAULI_Z);
    }

    #[test]
    fn test_rotations_at_pi() {
        // RX(π) = -iX, RY(π) = -iY
        let minus_i = Complex64::new(0.0, -1.0);
        let rx = rotation_x(PI);
        let ry = rotation_y(PI);
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!((rx[i][j] - minus_i * PAULI_X[i][j]).norm(), 0.0, epsilon = 1e-12);
                assert_relative_eq!((ry[i][j] - minus_i * PAULI_Y[i][j]).norm(), 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_rotation_z_relative_phase() {
        let rz = rotation_z(PI / 2.0);
        let relative = rz[1][1] / rz[0][0];
        assert_relative_eq!(relative.arg(), PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_projectors_sum_to_identity() {
        let mut sum = PROJECTOR_ZERO;
        for i in 0..2 {
            for j in 0..2 {
                sum[i][j] += PROJECTOR_ONE[i][j];
            }
        }
        assert_matrix_eq(&sum, &IDENTITY);
        assert_matrix_eq(&projector(0), &PROJECTOR_ZERO);
        assert_matrix_eq(&projector(1), &PROJECTOR_ONE);
    }

    #[test]
    fn test_adjoint_of_global_phase_inverts_it() {
        let g = global_phase(0.7);
        assert_matrix_eq(&multiply(&adjoint(&g), &g), &IDENTITY);
    }
}
