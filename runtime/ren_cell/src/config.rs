//! Runtime configuration.

use std::env;

/// Highest codepoint a character token may hold.
pub const MAX_CODEPOINT: u32 = 0x0010_FFFF;

/// Tunables for a runtime instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Allocations between collections.
    pub gc_ballast: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_GC_BALLAST: usize = 4096;

    /// Defaults, with `REN_GC_BALLAST` applied when it parses as a positive
    /// integer.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(ballast) = env::var("REN_GC_BALLAST")
            .ok()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            config.gc_ballast = ballast;
        }
        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            gc_ballast: Self::DEFAULT_GC_BALLAST,
        }
    }
}
