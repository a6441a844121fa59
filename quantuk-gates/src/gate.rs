//! Named single-qubit gate families

use crate::error::{GateError, Result};
use crate::matrices::{self, Matrix2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rotation angle, supplied in degrees and converted to radians on use
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(f64);

impl Angle {
    /// Angle from degrees
    #[inline]
    pub const fn from_degrees(degrees: f64) -> Self {
        Self(degrees)
    }

    /// Angle from radians
    #[inline]
    pub fn from_radians(radians: f64) -> Self {
        Self(radians.to_degrees())
    }

    #[inline]
    pub const fn degrees(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl std::ops::Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

impl From<i32> for Angle {
    fn from(degrees: i32) -> Self {
        Self(f64::from(degrees))
    }
}

impl From<f64> for Angle {
    fn from(degrees: f64) -> Self {
        Self(degrees)
    }
}

/// A single-qubit gate with its canonical 2×2 unitary
///
/// # Example
/// ```
/// use quantuk_gates::{Angle, Gate};
///
/// let t: Gate = "t".parse().unwrap();
/// assert_eq!(t, Gate::Phase(Angle::from_degrees(45.0)));
///
/// let rx: Gate = "rx(90)".parse().unwrap();
/// assert_eq!(rx.angle(), Some(Angle::from_degrees(90.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", content = "angle", rename_all = "snake_case")]
pub enum Gate {
    Identity,
    Hadamard,
    PauliX,
    PauliY,
    PauliZ,
    /// √X (root-NOT)
    SqrtX,
    /// √Z
    SqrtZ,
    /// General phase P(φ)
    Phase(Angle),
    Rx(Angle),
    Ry(Angle),
    Rz(Angle),
    /// e^(iφ)·I; only meaningful as a register-wide phase
    GlobalPhase(Angle),
}

impl Gate {
    /// Canonical matrix of this gate
    pub fn matrix(&self) -> Matrix2 {
        match *self {
            Gate::Identity => matrices::IDENTITY,
            Gate::Hadamard => matrices::HADAMARD,
            Gate::PauliX => matrices::PAULI_X,
            Gate::PauliY => matrices::PAULI_Y,
            Gate::PauliZ => matrices::PAULI_Z,
            Gate::SqrtX => matrices::SQRT_X,
            Gate::SqrtZ => matrices::SQRT_Z,
            Gate::Phase(a) => matrices::phase(a.radians()),
            Gate::Rx(a) => matrices::rotation_x(a.radians()),
            Gate::Ry(a) => matrices::rotation_y(a.radians()),
            Gate::Rz(a) => matrices::rotation_z(a.radians()),
            Gate::GlobalPhase(a) => matrices::global_phase(a.radians()),
        }
    }

    /// Short display name
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Identity => "I",
            Gate::Hadamard => "H",
            Gate::PauliX => "X",
            Gate::PauliY => "Y",
            Gate::PauliZ => "Z",
            Gate::SqrtX => "√X",
            Gate::SqrtZ => "√Z",
            Gate::Phase(_) => "P",
            Gate::Rx(_) => "RX",
            Gate::Ry(_) => "RY",
            Gate::Rz(_) => "RZ",
            Gate::GlobalPhase(_) => "GPHASE",
        }
    }

    /// Angle of a parameterized gate
    pub fn angle(&self) -> Option<Angle> {
        match *self {
            Gate::Phase(a) | Gate::Rx(a) | Gate::Ry(a) | Gate::Rz(a) | Gate::GlobalPhase(a) => {
                Some(a)
            }
            _ => None,
        }
    }

    /// Resolve a gate from its name and an optional angle in degrees
    ///
    /// Names are case-insensitive and accept the short aliases used by the
    /// web front end (`had`, `qnot`, `rootNot`, `s`, `t`, ...).
    pub fn from_name(name: &str, angle: Option<Angle>) -> Result<Self> {
        let key = name.trim().to_ascii_lowercase();
        let needs_angle = |ctor: fn(Angle) -> Gate| {
            angle
                .map(ctor)
                .ok_or_else(|| GateError::MissingAngle(name.to_string()))
        };

        match key.as_str() {
            "i" | "id" | "identity" => Ok(Gate::Identity),
            "h" | "had" | "hadamard" => Ok(Gate::Hadamard),
            "x" | "not" | "qnot" | "paulix" => Ok(Gate::PauliX),
            "y" | "pauliy" => Ok(Gate::PauliY),
            "z" | "pauliz" => Ok(Gate::PauliZ),
            "sx" | "sqrtx" | "rootx" | "rootnot" => Ok(Gate::SqrtX),
            "sqrtz" | "rootz" => Ok(Gate::SqrtZ),
            "s" => Ok(Gate::Phase(Angle::from_degrees(90.0))),
            "t" => Ok(Gate::Phase(Angle::from_degrees(45.0))),
            "p" | "phase" => needs_angle(Gate::Phase),
            "rx" => needs_angle(Gate::Rx),
            "ry" => needs_angle(Gate::Ry),
            "rz" => needs_angle(Gate::Rz),
            "gphase" | "globalphase" => needs_angle(Gate::GlobalPhase),
            _ => Err(GateError::UnknownGate(name.to_string())),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.angle() {
            Some(angle) => write!(f, "{}({})", self.name(), angle),
            None => write!(f, "{}", self.name()),
        }
    }
}

/// Parses `name` or `name(angle_in_degrees)`
impl FromStr for Gate {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once('(') {
            Some((name, rest)) => {
                let degrees = rest
                    .strip_suffix(')')
                    .and_then(|v| v.trim().parse::<f64>().ok())
                    .ok_or_else(|| GateError::UnknownGate(s.to_string()))?;
                Gate::from_name(name, Some(Angle::from_degrees(degrees)))
            }
            None => Gate::from_name(s, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_angle_conversion() {
        assert_relative_eq!(Angle::from_degrees(180.0).radians(), PI);
        assert_relative_eq!(Angle::from_radians(PI / 2.0).degrees(), 90.0, epsilon = 1e-12);
        assert_eq!((-Angle::from(30)).degrees(), -30.0);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Gate::from_name("had", None).unwrap(), Gate::Hadamard);
        assert_eq!(Gate::from_name("QNOT", None).unwrap(), Gate::PauliX);
        assert_eq!(Gate::from_name("rootNot", None).unwrap(), Gate::SqrtX);
        assert_eq!(Gate::from_name("rootZ", None).unwrap(), Gate::SqrtZ);
        assert_eq!(
            Gate::from_name("s", None).unwrap(),
            Gate::Phase(Angle::from_degrees(90.0))
        );
    }

    #[test]
    fn test_parameterized_requires_angle() {
        assert_eq!(
            Gate::from_name("rx", None),
            Err(GateError::MissingAngle("rx".to_string()))
        );
        assert_eq!(
            Gate::from_name("ry", Some(Angle::from(45))).unwrap(),
            Gate::Ry(Angle::from_degrees(45.0))
        );
    }

    #[test]
    fn test_unknown_gate() {
        assert!(matches!(
            Gate::from_name("warp", None),
            Err(GateError::UnknownGate(_))
        ));
        assert!("rx(abc)".parse::<Gate>().is_err());
    }

    #[test]
    fn test_parse_with_angle() {
        let gate: Gate = "phase(-45.5)".parse().unwrap();
        assert_eq!(gate, Gate::Phase(Angle::from_degrees(-45.5)));
        assert_eq!(gate.to_string(), "P(-45.5°)");
    }

    #[test]
    fn test_sqrt_z_matches_s() {
        let s: Gate = "s".parse().unwrap();
        let a = s.matrix();
        let b = Gate::SqrtZ.matrix();
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!((a[i][j] - b[i][j]).norm(), 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&Gate::Rx(Angle::from_degrees(90.0))).unwrap();
        assert_eq!(json, r#"{"gate":"rx","angle":90.0}"#);
        let back: Gate = serde_json::from_str(r#"{"gate":"hadamard"}"#).unwrap();
        assert_eq!(back, Gate::Hadamard);
    }
}
