//! Service layer round trips through temporary files.

use sd_app::*;
use sd_nav::DistributionView;
use serde_json::json;
use std::path::{Path, PathBuf};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(dir: &Path, name: &str, value: serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    path
}

fn labeled_input(label: &str, value: serde_json::Value) -> serde_json::Value {
    json!({
        "type": "InputGroup",
        "namespace": "dash_bootstrap_components",
        "props": {"children": [
            {"type": "InputGroupText", "namespace": "dash_bootstrap_components", "props": {"children": label}},
            {"type": "Input", "namespace": "dash_bootstrap_components", "props": {"type": "number", "value": value}}
        ]}
    })
}

fn synthesis_files(dir: &Path, jobs: serde_json::Value) -> (PathBuf, PathBuf, PathBuf, PathBuf) {
    let snapshot = write(
        dir,
        "snapshot.json",
        json!({
            "machine": "aris",
            "suite": "NAS",
            "generator_type": "Random Generator",
            "generator_options": labeled_input("Number of jobs", jobs),
            "cluster": {"toggle_clicks": 2, "machine": "aris"},
            "scheduler_rows": [],
            "simulation": {"mode": "Static", "experiments": 3}
        }),
    );
    let clusters = write(dir, "clusters.json", json!({"aris": {"nodes": 426, "ppn": 20}}));
    let schedulers = write(dir, "schedulers.json", json!([]));
    let workloads = write(
        dir,
        "workloads.json",
        json!([{"machine": "aris", "suite": "NAS", "load": "bt.D.64"}]),
    );
    (snapshot, clusters, schedulers, workloads)
}

#[test]
fn synthesize_then_save_refuses_schedulerless_config() {
    let dir = temp_dir("sd_app_test_synthesize");
    let (snapshot, clusters, schedulers, workloads) = synthesis_files(&dir, json!(5));

    let inputs = load_inputs(InputPaths {
        snapshot: &snapshot,
        clusters: &clusters,
        schedulers: &schedulers,
        workloads: &workloads,
    })
    .unwrap();
    let config = synthesize_configuration(&inputs).unwrap();
    assert_eq!(config.cluster.nodes, 426);
    assert_eq!(config.simulation.experiments, 3);

    // No scheduler was selected, so the configuration cannot be stored.
    let err = save_configuration(&dir.join("run.yaml"), &config).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(!err.is_no_op());
}

#[test]
fn blank_job_count_is_a_no_op() {
    let dir = temp_dir("sd_app_test_no_op");
    let (snapshot, clusters, schedulers, workloads) = synthesis_files(&dir, json!(null));

    let inputs = load_inputs(InputPaths {
        snapshot: &snapshot,
        clusters: &clusters,
        schedulers: &schedulers,
        workloads: &workloads,
    })
    .unwrap();
    let err = synthesize_configuration(&inputs).unwrap_err();
    assert!(err.is_no_op());
}

#[test]
fn unreadable_input_names_the_file() {
    let missing = std::env::temp_dir().join("sd_app_test_missing/snapshot.json");
    let err = load_results(&missing).unwrap_err();
    match err {
        AppError::FileRead { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected {other:?}"),
    }
}

fn results_file(dir: &Path) -> PathBuf {
    write(
        dir,
        "results.json",
        json!({
            "Experiment 0": {
                "Default Scheduler": {"Workload": "bt.D.64 0 64\n", "Makespan speedup": 1.0},
                "FCFS": {
                    "Jobs utilization": {"job1": {"speedup": 1.2, "turnaround": 0.9, "waiting": 3}},
                    "Makespan speedup": 1.4
                }
            }
        }),
    )
}

#[test]
fn render_and_summarize_results() {
    let dir = temp_dir("sd_app_test_results");
    let store = load_results(&results_file(&dir)).unwrap();

    let chart = render_route(&store, "experiment_0~fcfs~jobs_utilization").unwrap();
    assert_eq!(chart.spec().unwrap().data.len(), 3);

    let speedup_only = render_global_view(&store, DistributionView::Speedup);
    assert_eq!(speedup_only.layout.annotations.len(), 1);

    let summary = summarize(&store);
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].scheduler, "FCFS");
    assert_eq!(summary[0].mean_makespan_speedup, 1.4);
    assert_eq!(summary[0].mean_waiting, 3.0);

    let err = render_route(&store, "foo~bar~baz~qux").unwrap_err();
    assert!(err.is_no_op());
}

#[test]
fn download_writes_workload_file() {
    let dir = temp_dir("sd_app_test_download");
    let store = load_results(&results_file(&dir)).unwrap();

    let path = write_download(&store, "experiment_0~default_scheduler~download-workload", &dir).unwrap();
    assert_eq!(path.file_name().unwrap(), "experiment_0.default_scheduler.workload");
    assert_eq!(std::fs::read_to_string(path).unwrap(), "bt.D.64 0 64\n");
}
