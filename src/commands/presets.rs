//! # Presets Command Module / 预设命令模块
//!
//! Implements `presets`: prints the three intensity tiers for this machine.

use colored::*;

use crate::core::presets::WorkloadIntensity;
use crate::infra::t;

pub fn execute() {
    let cpus = num_cpus::get();
    println!("{}", t!("presets.header", cpus = cpus).bold());
    for level in WorkloadIntensity::ALL {
        let (threads, iterations) = level.counts(cpus);
        println!(
            "  - {:<8} | -c {:<4} -i {}",
            level.to_string().cyan(),
            threads,
            iterations
        );
    }
}
