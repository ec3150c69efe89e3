//! Configuration for a playthrough.

/// Configuration for a playthrough.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for reproducible decks and resolutions.
    pub seed: u64,
    /// Overrides every limited response's starting charges when set.
    pub initial_charges: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            initial_charges: None,
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Start every limited response with `charges` charges.
    pub fn with_initial_charges(mut self, charges: u32) -> Self {
        self.initial_charges = Some(charges);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.initial_charges, None);
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default().with_seed(123).with_initial_charges(3);
        assert_eq!(cfg.seed, 123);
        assert_eq!(cfg.initial_charges, Some(3));
    }
}
