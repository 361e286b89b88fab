use sd_config::*;
use std::collections::BTreeMap;

fn sample_config() -> RunConfiguration {
    let mut fifo = HyperParams::new();
    fifo.insert("backfill".to_string(), HyperValue::Flag(true));
    let mut ranks = HyperParams::new();
    ranks.insert("alpha".to_string(), HyperValue::Number(0.75));
    ranks.insert("model".to_string(), HyperValue::Deferred);

    let mut schedulers = BTreeMap::new();
    schedulers.insert("realsim.scheduler.fifo".to_string(), fifo);
    schedulers.insert("realsim.scheduler.ranks".to_string(), ranks);

    let mut counts = BTreeMap::new();
    counts.insert("bt.D.64".to_string(), 3);
    counts.insert("cg.D.32".to_string(), 0);

    RunConfiguration {
        workload: WorkloadSelection {
            machine: "aris".to_string(),
            suite: "NAS".to_string(),
        },
        generator: GeneratorConfig::Dictionary {
            per_workload_count: counts,
        },
        cluster: ClusterSpec {
            nodes: 8,
            processes_per_node: 20,
        },
        schedulers,
        simulation: SimulationConfig {
            mode: SimulationMode::Dynamic,
            experiments: 2,
            stop_condition: Some(StopCondition::Time {
                stop_time: 3600.0,
                generator_time: 60.0,
            }),
        },
    }
}

#[test]
fn roundtrip_yaml() {
    let config = sample_config();
    let path = std::env::temp_dir().join("sd_config_roundtrip.yaml");

    save_yaml(&path, &config).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn roundtrip_json_by_extension() {
    let config = sample_config();
    let path = std::env::temp_dir().join("sd_config_roundtrip.json");

    save(&path, &config).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn unknown_extension_is_rejected() {
    let path = std::env::temp_dir().join("sd_config_roundtrip.toml");
    let err = save(&path, &sample_config()).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
}

#[test]
fn save_refuses_invalid_configuration() {
    let mut config = sample_config();
    config.simulation.mode = SimulationMode::Static;

    let path = std::env::temp_dir().join("sd_config_invalid.yaml");
    let err = save_yaml(&path, &config).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Validation(ValidationError::Unexpected { .. })
    ));
}
