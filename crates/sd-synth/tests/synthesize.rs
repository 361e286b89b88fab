use sd_config::*;
use sd_synth::build;
use sd_synth::*;
use serde_json::{Value, json};
use std::collections::BTreeMap;

struct Fixture {
    clusters: ClusterDirectory,
    schedulers: SchedulerDirectory,
    workloads: WorkloadCatalog,
}

impl Fixture {
    fn new() -> Self {
        let mut clusters = ClusterDirectory::new();
        clusters.insert(
            "aris",
            ClusterSpec {
                nodes: 426,
                processes_per_node: 20,
            },
        );

        let mut ranks_params = BTreeMap::new();
        ranks_params.insert("alpha".to_string(), "<class 'float'>".to_string());
        ranks_params.insert("backfill".to_string(), "<class 'bool'>".to_string());
        ranks_params.insert("model".to_string(), "<class 'str'>".to_string());

        let schedulers = SchedulerDirectory::new(vec![
            SchedulerEntry {
                module: "realsim.scheduler.fifo".to_string(),
                name: "FIFO Scheduler".to_string(),
                description: "First in, first out".to_string(),
                selected: true,
                disabled: false,
                hyperparams: BTreeMap::new(),
            },
            SchedulerEntry {
                module: "realsim.scheduler.easy".to_string(),
                name: "EASY Scheduler".to_string(),
                description: "Backfilling".to_string(),
                selected: false,
                disabled: false,
                hyperparams: BTreeMap::new(),
            },
            SchedulerEntry {
                module: "realsim.scheduler.coschedulers.ranks.ranks".to_string(),
                name: "Ranks Co-Scheduler".to_string(),
                description: "Ranks pairs of jobs".to_string(),
                selected: false,
                disabled: false,
                hyperparams: ranks_params,
            },
        ]);

        let records = [
            ("aris", "NAS", "bt.D.64"),
            ("aris", "NAS", "cg.D.32"),
            ("aris", "SPEC", "lu.C.16"),
        ]
        .map(|(machine, suite, load)| WorkloadRecord {
            machine: machine.to_string(),
            suite: suite.to_string(),
            load: load.to_string(),
        });
        let workloads = WorkloadCatalog::from_records(&records);

        Self {
            clusters,
            schedulers,
            workloads,
        }
    }

    fn dirs(&self) -> Directories<'_> {
        Directories {
            clusters: &self.clusters,
            schedulers: &self.schedulers,
            workloads: &self.workloads,
        }
    }

    fn snapshot(&self) -> FormSnapshot {
        let mut options = build::random_options(1).into_value();
        set(&mut options, "/props/children/1/props/value", json!(5));

        FormSnapshot {
            machine: "aris".to_string(),
            suite: "NAS".to_string(),
            generator_type: "Random Generator".to_string(),
            generator_options: options,
            cluster: ClusterForm {
                toggle_clicks: None,
                machine: "aris".to_string(),
                nodes: Some(0.0),
                ppn: Some(0.0),
            },
            scheduler_rows: build::scheduler_rows(&self.schedulers),
            simulation: SimulationForm {
                mode: "Static".to_string(),
                experiments: Some(1.0),
                stop_kind: None,
                stop_time: None,
                generator_time: None,
                stop_jobs: None,
            },
        }
    }
}

fn set(tree: &mut Value, pointer: &str, value: Value) {
    *tree.pointer_mut(pointer).expect("pointer exists in fixture tree") = value;
}

fn checkbox(row: usize) -> String {
    format!("/{row}/props/children/0/props/children/0/props/children/0/props/value")
}

fn hyperparam(row: usize, param: usize) -> String {
    format!("/{row}/props/children/1/props/children/0/props/children/{param}/props/children/1/props/value")
}

#[test]
fn random_generator_with_five_jobs() {
    let fx = Fixture::new();
    let config = synthesize(&fx.snapshot(), &fx.dirs()).unwrap();
    assert_eq!(config.generator, GeneratorConfig::Random { job_count: 5 });
    assert_eq!(
        config.workload,
        WorkloadSelection {
            machine: "aris".to_string(),
            suite: "NAS".to_string()
        }
    );
}

#[test]
fn dictionary_generator_reads_every_workload() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    snapshot.generator_type = "Dictionary Generator".to_string();
    let mut options =
        build::generator_options(GeneratorKind::Dictionary, &fx.workloads, "aris", "NAS").unwrap();
    set(&mut options, "/0/props/children/1/props/value", json!(3));
    set(&mut options, "/1/props/children/1/props/value", json!(2));
    snapshot.generator_options = options;

    let config = synthesize(&snapshot, &fx.dirs()).unwrap();
    let GeneratorConfig::Dictionary { per_workload_count } = config.generator else {
        panic!("expected dictionary generator");
    };
    assert_eq!(per_workload_count.len(), 2);
    assert_eq!(per_workload_count["bt.D.64"], 3);
    assert_eq!(per_workload_count["cg.D.32"], 2);
}

#[test]
fn dictionary_options_from_another_suite_are_stale() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    snapshot.generator_type = "Dictionary Generator".to_string();
    snapshot.generator_options =
        build::generator_options(GeneratorKind::Dictionary, &fx.workloads, "aris", "SPEC").unwrap();

    let err = synthesize(&snapshot, &fx.dirs()).unwrap_err();
    assert_eq!(err.category(), NoOpCategory::StructuralMismatch);
}

#[test]
fn dictionary_unknown_suite_is_lookup_miss() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    snapshot.generator_type = "Dictionary Generator".to_string();
    snapshot.suite = "PARSEC".to_string();
    snapshot.generator_options = json!([]);

    let err = synthesize(&snapshot, &fx.dirs()).unwrap_err();
    assert_eq!(err.category(), NoOpCategory::LookupMiss);
}

#[test]
fn list_generator_keeps_upload_verbatim() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    snapshot.generator_type = "List Generator".to_string();
    let mut options = build::list_options().into_value();
    let blob = "data:application/octet-stream;base64,WyJidC5ELjY0Il0=";
    options["props"]["contents"] = json!(blob);
    snapshot.generator_options = options;

    let config = synthesize(&snapshot, &fx.dirs()).unwrap();
    assert_eq!(
        config.generator,
        GeneratorConfig::List {
            raw_upload: UploadBlob(blob.to_string())
        }
    );
}

#[test]
fn list_generator_without_upload_is_noop() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    snapshot.generator_type = "List Generator".to_string();
    snapshot.generator_options = build::list_options().into_value();

    assert!(matches!(
        synthesize(&snapshot, &fx.dirs()),
        Err(NoOp::MissingValue { .. })
    ));
}

#[test]
fn unknown_generator_type_is_noop() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    snapshot.generator_type = "Poisson Generator".to_string();

    let err = synthesize(&snapshot, &fx.dirs()).unwrap_err();
    assert_eq!(err.category(), NoOpCategory::UnrecognizedVariant);
}

#[test]
fn generator_tree_of_wrong_variant_is_noop() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    snapshot.generator_type = "List Generator".to_string();

    let err = synthesize(&snapshot, &fx.dirs()).unwrap_err();
    assert_eq!(err.category(), NoOpCategory::StructuralMismatch);
}

#[test]
fn cluster_source_follows_toggle_parity() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    snapshot.cluster.nodes = Some(4.0);
    snapshot.cluster.ppn = Some(8.0);

    for clicks in [0, 2, 10] {
        snapshot.cluster.toggle_clicks = Some(clicks);
        let config = synthesize(&snapshot, &fx.dirs()).unwrap();
        assert_eq!(config.cluster.nodes, 426);
        assert_eq!(config.cluster.processes_per_node, 20);
    }

    for clicks in [1, 3, 11] {
        snapshot.cluster.toggle_clicks = Some(clicks);
        let config = synthesize(&snapshot, &fx.dirs()).unwrap();
        assert_eq!(
            config.cluster,
            ClusterSpec {
                nodes: 4,
                processes_per_node: 8
            }
        );
    }
}

#[test]
fn unknown_named_machine_is_noop() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    snapshot.cluster.machine = "marconi".to_string();

    assert_eq!(
        synthesize(&snapshot, &fx.dirs()).unwrap_err(),
        NoOp::LookupMiss {
            what: "machine",
            name: "marconi".to_string()
        }
    );
}

#[test]
fn scheduler_keys_are_selected_module_ids() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();

    let config = synthesize(&snapshot, &fx.dirs()).unwrap();
    let keys: Vec<&str> = config.schedulers.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["realsim.scheduler.fifo"]);

    set(&mut snapshot.scheduler_rows, &checkbox(2), json!(true));
    set(&mut snapshot.scheduler_rows, &hyperparam(2, 0), json!(0.25));
    set(&mut snapshot.scheduler_rows, &hyperparam(2, 1), json!("True"));
    let config = synthesize(&snapshot, &fx.dirs()).unwrap();
    let keys: Vec<&str> = config.schedulers.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "realsim.scheduler.coschedulers.ranks.ranks",
            "realsim.scheduler.fifo"
        ]
    );

    let ranks = &config.schedulers["realsim.scheduler.coschedulers.ranks.ranks"];
    assert_eq!(ranks["alpha"], HyperValue::Number(0.25));
    assert_eq!(ranks["backfill"], HyperValue::Flag(true));
    assert_eq!(ranks["model"], HyperValue::Deferred);

    set(&mut snapshot.scheduler_rows, &checkbox(0), json!(false));
    let config = synthesize(&snapshot, &fx.dirs()).unwrap();
    assert!(!config.schedulers.contains_key("realsim.scheduler.fifo"));
    assert_eq!(config.schedulers.len(), 1);
}

#[test]
fn unresolvable_scheduler_label_is_noop() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    set(
        &mut snapshot.scheduler_rows,
        "/0/props/children/0/props/children/0/props/children/0/props/label",
        json!("Renamed Scheduler"),
    );

    assert_eq!(
        synthesize(&snapshot, &fx.dirs()).unwrap_err().category(),
        NoOpCategory::LookupMiss
    );
}

#[test]
fn unselected_rows_are_not_resolved() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    set(
        &mut snapshot.scheduler_rows,
        "/1/props/children/0/props/children/0/props/children/0/props/label",
        json!("Retired Scheduler"),
    );

    assert!(synthesize(&snapshot, &fx.dirs()).is_ok());
}

#[test]
fn blank_numeric_hyperparameter_is_noop() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    set(&mut snapshot.scheduler_rows, &checkbox(2), json!(true));
    set(&mut snapshot.scheduler_rows, &hyperparam(2, 0), Value::Null);

    assert!(matches!(
        synthesize(&snapshot, &fx.dirs()),
        Err(NoOp::MissingValue { .. })
    ));
}

#[test]
fn static_mode_has_no_stop_condition() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    snapshot.simulation.stop_kind = Some("Time".to_string());
    snapshot.simulation.stop_time = Some(100.0);
    snapshot.simulation.generator_time = Some(10.0);

    let config = synthesize(&snapshot, &fx.dirs()).unwrap();
    assert_eq!(config.simulation.mode, SimulationMode::Static);
    assert_eq!(config.simulation.stop_condition, None);
}

#[test]
fn dynamic_mode_reads_stop_condition() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    snapshot.simulation.mode = "Dynamic".to_string();
    snapshot.simulation.experiments = Some(3.0);
    snapshot.simulation.stop_kind = Some("Time".to_string());
    snapshot.simulation.stop_time = Some(3600.0);
    snapshot.simulation.generator_time = Some(60.0);

    let config = synthesize(&snapshot, &fx.dirs()).unwrap();
    assert_eq!(config.simulation.experiments, 3);
    assert_eq!(
        config.simulation.stop_condition,
        Some(StopCondition::Time {
            stop_time: 3600.0,
            generator_time: 60.0
        })
    );

    snapshot.simulation.stop_kind = Some("Job count".to_string());
    snapshot.simulation.stop_jobs = Some(250.0);
    let config = synthesize(&snapshot, &fx.dirs()).unwrap();
    assert_eq!(
        config.simulation.stop_condition,
        Some(StopCondition::JobCount { count: 250 })
    );
}

#[test]
fn unknown_stop_condition_kind_is_noop() {
    let fx = Fixture::new();
    let mut snapshot = fx.snapshot();
    snapshot.simulation.mode = "Dynamic".to_string();
    snapshot.simulation.stop_kind = Some("Forever".to_string());

    assert_eq!(
        synthesize(&snapshot, &fx.dirs()).unwrap_err().category(),
        NoOpCategory::UnrecognizedVariant
    );
}

#[test]
fn snapshot_deserializes_from_json() {
    let fx = Fixture::new();
    let snapshot = fx.snapshot();
    let text = serde_json::to_string(&snapshot).unwrap();
    let back: FormSnapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(
        synthesize(&back, &fx.dirs()).unwrap(),
        synthesize(&snapshot, &fx.dirs()).unwrap()
    );
}
