//! # Preset Unit Tests / 预设单元测试

use unixbench_runner::plugin::{UnixBenchPlugin, WorkloadPlugin};
use unixbench_runner::WorkloadIntensity;

fn counts(level: WorkloadIntensity, cpus: usize) -> (u32, u32) {
    let cfg = level.config_for(cpus);
    (cfg.threads.get(), cfg.iterations.get())
}

#[test]
fn test_presets_with_eight_cpus() {
    assert_eq!(counts(WorkloadIntensity::Low, 8), (1, 1));
    assert_eq!(counts(WorkloadIntensity::Medium, 8), (4, 1));
    assert_eq!(counts(WorkloadIntensity::High, 8), (8, 2));
}

#[test]
fn test_presets_floor_at_two_threads() {
    assert_eq!(counts(WorkloadIntensity::Medium, 1), (2, 1));
    assert_eq!(counts(WorkloadIntensity::Medium, 3), (2, 1));
    assert_eq!(counts(WorkloadIntensity::High, 1), (2, 2));
    assert_eq!(counts(WorkloadIntensity::Low, 1), (1, 1));
}

#[test]
fn test_presets_keep_default_fields() {
    let cfg = WorkloadIntensity::High.config_for(16);
    assert!(cfg.tests.is_empty());
    assert!(!cfg.verbose);
    assert_eq!(cfg.workdir, std::path::PathBuf::from("/opt/UnixBench"));
}

#[test]
fn test_plugin_preset_uses_detected_cpus() {
    let cpus = num_cpus::get();
    let cfg = UnixBenchPlugin.preset_config(WorkloadIntensity::High);
    assert_eq!(cfg.threads.get() as usize, cpus.max(2));
    assert_eq!(cfg.iterations.get(), 2);
}

#[test]
fn test_intensity_parsing() {
    assert_eq!("low".parse::<WorkloadIntensity>(), Ok(WorkloadIntensity::Low));
    assert_eq!("MEDIUM".parse::<WorkloadIntensity>(), Ok(WorkloadIntensity::Medium));
    assert_eq!("high".parse::<WorkloadIntensity>(), Ok(WorkloadIntensity::High));
    assert!("extreme".parse::<WorkloadIntensity>().is_err());
    assert_eq!(WorkloadIntensity::Medium.to_string(), "medium");
}

#[test]
fn test_plugin_metadata() {
    let plugin = UnixBenchPlugin;
    assert_eq!(plugin.name(), "unixbench");
    assert!(!plugin.description().is_empty());
    assert!(plugin.required_system_packages().contains(&"build-essential"));
    assert_eq!(plugin.required_local_tools(), &["make", "gcc", "wget"]);
}
