//! Simulator configuration

use quantuk_state::MAX_QUBITS;

/// Configuration for a simulator session
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Random number generator seed for reproducible measurements
    ///
    /// If None, the generator is seeded from OS entropy. Set to Some(seed)
    /// for deterministic outcomes.
    ///
    /// Default: None (random)
    pub seed: Option<u64>,

    /// Largest register the session accepts
    ///
    /// Operators are dense 2^n×2^n matrices, so memory grows as 4^n. Must
    /// not exceed the register hard limit.
    ///
    /// Default: 10
    pub max_qubits: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_qubits: 10,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for debugging
    ///
    /// - Deterministic seed
    /// - Largest allowed register
    pub fn debug() -> Self {
        Self {
            seed: Some(42),
            max_qubits: MAX_QUBITS,
        }
    }

    /// Create a configuration with a fixed seed
    pub fn deterministic(seed: u64) -> Self {
        Self::default().with_seed(seed)
    }

    /// Set the random seed for deterministic measurements
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the largest accepted register
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_qubits == 0 {
            return Err("max_qubits must be > 0".to_string());
        }

        if self.max_qubits > MAX_QUBITS {
            return Err(format!(
                "max_qubits must be at most {}, got {}",
                MAX_QUBITS, self.max_qubits
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulatorConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.max_qubits, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(SimulatorConfig::debug().seed, Some(42));
        assert_eq!(SimulatorConfig::deterministic(7).seed, Some(7));
        assert!(SimulatorConfig::debug().validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimulatorConfig::new().with_seed(3).with_max_qubits(4);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.max_qubits, 4);
    }

    #[test]
    fn test_validation() {
        assert!(SimulatorConfig::new().with_max_qubits(0).validate().is_err());
        assert!(SimulatorConfig::new()
            .with_max_qubits(MAX_QUBITS + 1)
            .validate()
            .is_err());
    }
}
