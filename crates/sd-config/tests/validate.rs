use sd_config::*;
use std::collections::BTreeMap;

fn minimal() -> RunConfiguration {
    let mut schedulers = BTreeMap::new();
    schedulers.insert("realsim.scheduler.fifo".to_string(), HyperParams::new());

    RunConfiguration {
        workload: WorkloadSelection {
            machine: "aris".to_string(),
            suite: "All".to_string(),
        },
        generator: GeneratorConfig::Random { job_count: 5 },
        cluster: ClusterSpec {
            nodes: 4,
            processes_per_node: 16,
        },
        schedulers,
        simulation: SimulationConfig {
            mode: SimulationMode::Static,
            experiments: 1,
            stop_condition: None,
        },
    }
}

#[test]
fn minimal_configuration_is_valid() {
    validate_run_configuration(&minimal()).unwrap();
}

#[test]
fn dynamic_without_stop_condition_fails() {
    let mut config = minimal();
    config.simulation.mode = SimulationMode::Dynamic;
    let err = validate_run_configuration(&config).unwrap_err();
    assert!(matches!(err, ValidationError::Missing { .. }));
}

#[test]
fn dynamic_job_count_bound_is_valid() {
    let mut config = minimal();
    config.simulation.mode = SimulationMode::Dynamic;
    config.simulation.stop_condition = Some(StopCondition::JobCount { count: 100 });
    validate_run_configuration(&config).unwrap();
}

#[test]
fn non_positive_stop_time_fails() {
    let mut config = minimal();
    config.simulation.mode = SimulationMode::Dynamic;
    config.simulation.stop_condition = Some(StopCondition::Time {
        stop_time: 0.0,
        generator_time: 10.0,
    });
    let err = validate_run_configuration(&config).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidValue { .. }));
}

#[test]
fn empty_cluster_fails() {
    let mut config = minimal();
    config.cluster.nodes = 0;
    assert!(validate_run_configuration(&config).is_err());
}

#[test]
fn no_schedulers_fails() {
    let mut config = minimal();
    config.schedulers.clear();
    assert!(matches!(
        validate_run_configuration(&config),
        Err(ValidationError::Missing { .. })
    ));
}

#[test]
fn all_zero_dictionary_fails() {
    let mut config = minimal();
    let mut counts = BTreeMap::new();
    counts.insert("bt.D.64".to_string(), 0);
    config.generator = GeneratorConfig::Dictionary {
        per_workload_count: counts,
    };
    assert!(validate_run_configuration(&config).is_err());
}

#[test]
fn empty_upload_fails() {
    let mut config = minimal();
    config.generator = GeneratorConfig::List {
        raw_upload: UploadBlob(String::new()),
    };
    assert!(validate_run_configuration(&config).is_err());
}
