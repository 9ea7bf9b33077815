//! # Intensity Presets / 强度预设
//!
//! Three fixed tiers that derive `threads`/`iterations` from the CPU count.
//!
//! 三个固定档位，根据 CPU 数量推导 `threads`/`iterations`。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::core::config::RunConfig;

/// Named workload tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadIntensity {
    Low,
    Medium,
    High,
}

impl WorkloadIntensity {
    pub const ALL: [WorkloadIntensity; 3] = [
        WorkloadIntensity::Low,
        WorkloadIntensity::Medium,
        WorkloadIntensity::High,
    ];

    /// `(threads, iterations)` for this tier on a machine with `cpu_count` CPUs.
    ///
    /// Low is always one copy, one iteration. Medium uses half the CPUs and
    /// high all of them, both with a floor of two copies; high also doubles
    /// the iterations.
    pub fn counts(self, cpu_count: usize) -> (NonZeroU32, NonZeroU32) {
        let cpus = u32::try_from(cpu_count).unwrap_or(u32::MAX);
        let (threads, iterations) = match self {
            WorkloadIntensity::Low => (1, 1),
            WorkloadIntensity::Medium => ((cpus / 2).max(2), 1),
            WorkloadIntensity::High => (cpus.max(2), 2),
        };
        (
            NonZeroU32::new(threads).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(iterations).unwrap_or(NonZeroU32::MIN),
        )
    }

    /// The preset configuration for `cpu_count` CPUs; all other fields keep
    /// their defaults.
    pub fn config_for(self, cpu_count: usize) -> RunConfig {
        let (threads, iterations) = self.counts(cpu_count);
        RunConfig {
            threads,
            iterations,
            ..RunConfig::default()
        }
    }

    /// The preset configuration for the CPUs detected on this machine.
    pub fn config(self) -> RunConfig {
        self.config_for(num_cpus::get())
    }
}

impl fmt::Display for WorkloadIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkloadIntensity::Low => "low",
            WorkloadIntensity::Medium => "medium",
            WorkloadIntensity::High => "high",
        };
        f.write_str(name)
    }
}

impl FromStr for WorkloadIntensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(WorkloadIntensity::Low),
            "medium" => Ok(WorkloadIntensity::Medium),
            "high" => Ok(WorkloadIntensity::High),
            other => Err(format!("unknown intensity `{other}` (expected low, medium or high)")),
        }
    }
}
