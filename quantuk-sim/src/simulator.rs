//! Session-facing simulator
//!
//! A [`Simulator`] owns one register and one random source for the lifetime
//! of a request. Every gate entry point applies its operator to the register
//! and returns that operator so the caller can display it.

use quantuk_gates::{validate_qubits, Angle, Complex64, Gate, Matrix2, Operator};
use quantuk_state::{
    Basis, QubitReading, Register, RegisterReading, Renormalization, Snapshot,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::{debug, info};

use crate::{
    config::SimulatorConfig,
    error::{Result, SimulatorError},
};

/// Outcome of [`Simulator::read`]
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    /// Whole register was measured
    Register(RegisterReading),
    /// A single qubit was measured
    Qubit(QubitReading),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Register(r) => fmt::Display::fmt(r, f),
            Reading::Qubit(r) => fmt::Display::fmt(r, f),
        }
    }
}

/// Dense quantum register simulator
///
/// Qubits are numbered from 1 to n. Single-qubit gate methods take a list of
/// target qubits; an empty list applies the gate to every qubit.
///
/// # Example
///
/// ```
/// use quantuk_sim::{Simulator, SimulatorConfig};
///
/// let mut sim = Simulator::with_config(2, SimulatorConfig::deterministic(1)).unwrap();
/// sim.had(&[1]).unwrap();
/// sim.cnot(1, 2).unwrap();
///
/// let probs = sim.snapshot().probabilities();
/// assert!((probs[0] - 0.5).abs() < 1e-12);
/// assert!((probs[3] - 0.5).abs() < 1e-12);
/// ```
pub struct Simulator {
    register: Register,
    rng: StdRng,
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a simulator with `num_qubits` qubits in |0…0⟩ and default
    /// configuration
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::with_config(num_qubits, SimulatorConfig::default())
    }

    /// Create a simulator with the given configuration
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or `num_qubits` is 0 or
    /// above `config.max_qubits`
    pub fn with_config(num_qubits: usize, config: SimulatorConfig) -> Result<Self> {
        config.validate().map_err(SimulatorError::InvalidConfig)?;
        check_qubits(num_qubits, &config)?;
        let register = Register::new(num_qubits)?;
        Ok(Self::assemble(register, config))
    }

    /// Rehydrate a simulator from a snapshot taken by an earlier request
    pub fn restore(snapshot: &Snapshot, config: SimulatorConfig) -> Result<Self> {
        config.validate().map_err(SimulatorError::InvalidConfig)?;
        check_qubits(snapshot.n, &config)?;
        let register = snapshot.restore()?;
        info!(num_qubits = snapshot.n, "restored register from snapshot");
        Ok(Self::assemble(register, config))
    }

    /// Rehydrate a simulator from snapshot JSON
    pub fn from_json(json: &str, config: SimulatorConfig) -> Result<Self> {
        Self::restore(&Snapshot::from_json(json)?, config)
    }

    fn assemble(register: Register, config: SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            register,
            rng,
            config,
        }
    }

    /// Get the simulator configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn register(&self) -> &Register {
        &self.register
    }

    pub fn num_qubits(&self) -> usize {
        self.register.num_qubits()
    }

    /// Export the register for the next request cycle
    pub fn snapshot(&self) -> Snapshot {
        self.register.snapshot()
    }

    /// Export the register as snapshot JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(self.snapshot().to_json()?)
    }

    // ---------------------------------------------------------------------
    // Preparation
    // ---------------------------------------------------------------------

    /// Reset to |0…0⟩, optionally changing the qubit count
    pub fn reset(&mut self, num_qubits: Option<usize>) -> Result<()> {
        if let Some(n) = num_qubits {
            check_qubits(n, &self.config)?;
        }
        self.register.reset(num_qubits)?;
        info!(num_qubits = self.register.num_qubits(), "register reset");
        Ok(())
    }

    /// Write `value` in binary starting at `start_qubit`
    pub fn write(&mut self, value: usize, start_qubit: usize) -> Result<()> {
        self.register.write_index(value, start_qubit)?;
        debug!(value, start_qubit, "wrote integer");
        Ok(())
    }

    /// Overwrite the register with explicit amplitudes
    ///
    /// Returns the rescaling report if the input was not unit-norm.
    pub fn write_amplitudes(
        &mut self,
        amplitudes: &[Complex64],
    ) -> Result<Option<Renormalization>> {
        Ok(self.register.write_amplitudes(amplitudes)?)
    }

    /// Overwrite the register from magnitudes and phases in degrees
    pub fn write_magnitude_phase(
        &mut self,
        magnitudes: &[f64],
        phases_degrees: &[f64],
    ) -> Result<Option<Renormalization>> {
        Ok(self
            .register
            .write_magnitude_phase(magnitudes, phases_degrees)?)
    }

    /// Prepare every qubit `q` as `√(1-p)|0⟩ + √p|1⟩` with
    /// `p = probabilities[q - 1]`
    pub fn write_probabilities(&mut self, probabilities: &[f64]) -> Result<()> {
        Ok(self.register.write_probabilities(probabilities)?)
    }

    // ---------------------------------------------------------------------
    // Single-qubit gates
    // ---------------------------------------------------------------------

    /// Apply `gate` to the listed qubits (every qubit when empty)
    pub fn apply(&mut self, gate: &Gate, qubits: &[usize]) -> Result<Operator> {
        Ok(self.register.apply_gate(gate, qubits)?)
    }

    /// Apply a caller-supplied 2×2 matrix to the listed qubits
    pub fn apply_matrix(&mut self, matrix: &Matrix2, qubits: &[usize]) -> Result<Operator> {
        Ok(self.register.apply_matrix(matrix, qubits)?)
    }

    /// Hadamard
    pub fn had(&mut self, qubits: &[usize]) -> Result<Operator> {
        self.apply(&Gate::Hadamard, qubits)
    }

    /// Pauli-X
    pub fn x(&mut self, qubits: &[usize]) -> Result<Operator> {
        self.apply(&Gate::PauliX, qubits)
    }

    /// Pauli-Y
    pub fn y(&mut self, qubits: &[usize]) -> Result<Operator> {
        self.apply(&Gate::PauliY, qubits)
    }

    /// Pauli-Z
    pub fn z(&mut self, qubits: &[usize]) -> Result<Operator> {
        self.apply(&Gate::PauliZ, qubits)
    }

    /// NOT, same as [`x`](Simulator::x)
    pub fn qnot(&mut self, qubits: &[usize]) -> Result<Operator> {
        self.apply(&Gate::PauliX, qubits)
    }

    /// √NOT
    pub fn root_not(&mut self, qubits: &[usize]) -> Result<Operator> {
        self.apply(&Gate::SqrtX, qubits)
    }

    /// √Z
    pub fn root_z(&mut self, qubits: &[usize]) -> Result<Operator> {
        self.apply(&Gate::SqrtZ, qubits)
    }

    /// Phase(90°)
    pub fn s(&mut self, qubits: &[usize]) -> Result<Operator> {
        self.apply(&Gate::Phase(Angle::from_degrees(90.0)), qubits)
    }

    /// Phase(45°)
    pub fn t(&mut self, qubits: &[usize]) -> Result<Operator> {
        self.apply(&Gate::Phase(Angle::from_degrees(45.0)), qubits)
    }

    /// Relative phase rotation, angle in degrees
    pub fn phase(&mut self, angle: impl Into<Angle>, qubits: &[usize]) -> Result<Operator> {
        self.apply(&Gate::Phase(angle.into()), qubits)
    }

    pub fn rx(&mut self, angle: impl Into<Angle>, qubits: &[usize]) -> Result<Operator> {
        self.apply(&Gate::Rx(angle.into()), qubits)
    }

    pub fn ry(&mut self, angle: impl Into<Angle>, qubits: &[usize]) -> Result<Operator> {
        self.apply(&Gate::Ry(angle.into()), qubits)
    }

    pub fn rz(&mut self, angle: impl Into<Angle>, qubits: &[usize]) -> Result<Operator> {
        self.apply(&Gate::Rz(angle.into()), qubits)
    }

    // ---------------------------------------------------------------------
    // Controlled gates
    // ---------------------------------------------------------------------

    /// Apply `gate` to `target` when every control reads 1
    pub fn controlled(&mut self, gate: &Gate, controls: &[usize], target: usize) -> Result<Operator> {
        Ok(self.register.apply_controlled(gate, controls, target)?)
    }

    pub fn cnot(&mut self, control: usize, target: usize) -> Result<Operator> {
        self.controlled(&Gate::PauliX, &[control], target)
    }

    /// Toffoli
    pub fn ccnot(&mut self, control1: usize, control2: usize, target: usize) -> Result<Operator> {
        self.controlled(&Gate::PauliX, &[control1, control2], target)
    }

    /// Controlled Hadamard
    pub fn chad(&mut self, control: usize, target: usize) -> Result<Operator> {
        self.controlled(&Gate::Hadamard, &[control], target)
    }

    pub fn cz(&mut self, control: usize, target: usize) -> Result<Operator> {
        self.controlled(&Gate::PauliZ, &[control], target)
    }

    pub fn cphase(&mut self, control: usize, target: usize, angle: impl Into<Angle>) -> Result<Operator> {
        self.controlled(&Gate::Phase(angle.into()), &[control], target)
    }

    pub fn crx(&mut self, control: usize, target: usize, angle: impl Into<Angle>) -> Result<Operator> {
        self.controlled(&Gate::Rx(angle.into()), &[control], target)
    }

    pub fn cry(&mut self, control: usize, target: usize, angle: impl Into<Angle>) -> Result<Operator> {
        self.controlled(&Gate::Ry(angle.into()), &[control], target)
    }

    pub fn crz(&mut self, control: usize, target: usize, angle: impl Into<Angle>) -> Result<Operator> {
        self.controlled(&Gate::Rz(angle.into()), &[control], target)
    }

    /// Exchange qubits `i` and `j` with three CNOTs
    ///
    /// Returns the product of the three operators.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<Operator> {
        validate_qubits(&[i, j], self.num_qubits())?;
        self.cnot_sandwich(&[i], &[j], i, j)
    }

    /// Exchange qubits `i` and `j` when `control` reads 1
    pub fn cswap(&mut self, control: usize, i: usize, j: usize) -> Result<Operator> {
        self.controlled_swap(&[control], i, j)
    }

    /// Exchange qubits `i` and `j` when every control reads 1
    ///
    /// Built from three multi-controlled NOTs: `[i] + controls → j`,
    /// `[j] + controls → i`, then the first again.
    pub fn controlled_swap(&mut self, controls: &[usize], i: usize, j: usize) -> Result<Operator> {
        let mut operands = Vec::with_capacity(controls.len() + 2);
        operands.extend_from_slice(controls);
        operands.push(i);
        operands.push(j);
        validate_qubits(&operands, self.num_qubits())?;

        let mut first = vec![i];
        first.extend_from_slice(controls);
        let mut second = vec![j];
        second.extend_from_slice(controls);
        self.cnot_sandwich(&first, &second, i, j)
    }

    /// Apply CNOT(first → j), CNOT(second → i), CNOT(first → j) and return
    /// their product; operands must already be validated
    fn cnot_sandwich(
        &mut self,
        first: &[usize],
        second: &[usize],
        i: usize,
        j: usize,
    ) -> Result<Operator> {
        let a = self.controlled(&Gate::PauliX, first, j)?;
        let b = self.controlled(&Gate::PauliX, second, i)?;
        let c = self.controlled(&Gate::PauliX, first, j)?;
        Ok(c.matmul(&b)?.matmul(&a)?)
    }

    // ---------------------------------------------------------------------
    // Measurement
    // ---------------------------------------------------------------------

    /// Measure one qubit, or the whole register when `qubit` is None
    pub fn read(&mut self, qubit: Option<usize>, basis: Basis) -> Result<Reading> {
        match qubit {
            Some(q) => self.measure_qubit(q, basis).map(Reading::Qubit),
            None => self.measure_all(basis).map(Reading::Register),
        }
    }

    pub fn measure_all(&mut self, basis: Basis) -> Result<RegisterReading> {
        let rng = &mut self.rng;
        Ok(self
            .register
            .measure_all(basis, &mut || rng.gen::<f64>())?)
    }

    pub fn measure_qubit(&mut self, qubit: usize, basis: Basis) -> Result<QubitReading> {
        let rng = &mut self.rng;
        Ok(self
            .register
            .measure_qubit(qubit, basis, &mut || rng.gen::<f64>())?)
    }

    /// Remove the global phase so that amplitude 0 is real and non-negative
    pub fn set_global_phase0(&mut self) -> Result<Operator> {
        Ok(self.register.set_global_phase0()?)
    }
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("num_qubits", &self.num_qubits())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn check_qubits(num_qubits: usize, config: &SimulatorConfig) -> Result<()> {
    if num_qubits > config.max_qubits {
        return Err(SimulatorError::TooManyQubits {
            num_qubits,
            max_qubits: config.max_qubits,
        });
    }
    Ok(())
}
