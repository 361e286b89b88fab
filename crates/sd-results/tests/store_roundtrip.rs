use sd_results::*;
use serde_json::json;

const RESULTS: &str = r#"{
    "Experiment 1": {
        "Default Scheduler": {
            "Makespan speedup": 1.0,
            "Workload": "bt.D.64 0 64\n"
        },
        "FCFS": {
            "Jobs utilization": {"job1": {"speedup": 1.2, "turnaround": 0.9, "waiting": 3}},
            "Jobs throughput": [[0.0, 10.0], [0, 1]],
            "Makespan speedup": 1.4,
            "Gantt diagram": "{\"data\": [], \"layout\": {\"title\": \"gantt\"}}"
        }
    },
    "Experiment 0": {
        "FCFS": {"Makespan speedup": 1.1}
    }
}"#;

#[test]
fn experiments_keep_delivery_order() {
    let store = ResultsStore::from_json_str(RESULTS).unwrap();
    assert_eq!(
        store.experiment_names().collect::<Vec<_>>(),
        vec!["Experiment 1", "Experiment 0"]
    );
    let first = store.experiment("Experiment 1").unwrap();
    assert_eq!(
        first.scheduler_names().collect::<Vec<_>>(),
        vec!["Default Scheduler", "FCFS"]
    );
}

#[test]
fn payloads_decode_by_metric_kind() {
    let store = ResultsStore::from_json_str(RESULTS).unwrap();
    let fcfs = store
        .experiment("Experiment 1")
        .and_then(|e| e.scheduler("FCFS"))
        .unwrap();

    let jobs = fcfs.job_table().unwrap();
    assert_eq!(jobs.get("job1").unwrap().waiting, 3.0);

    let throughput = fcfs.series(MetricKind::JobsThroughput).unwrap();
    assert_eq!(throughput.timestamps, vec![0.0, 10.0]);
    assert_eq!(throughput.last_value(), Some(1.0));

    let gantt = fcfs.figure(MetricKind::GanttDiagram).unwrap();
    assert_eq!(gantt["layout"]["title"], json!("gantt"));

    let baseline = store
        .experiment("Experiment 1")
        .and_then(|e| e.scheduler(BASELINE_SCHEDULER))
        .unwrap();
    assert_eq!(baseline.workload().unwrap(), "bt.D.64 0 64\n");
}

#[test]
fn job_table_keeps_delivery_order() {
    let store = ResultsStore::from_json_str(
        r#"{"Experiment 0": {"FCFS": {"Jobs utilization": {
            "job2": {"speedup": 2, "turnaround": 1, "waiting": 0},
            "job10": {"speedup": 10, "turnaround": 1, "waiting": 0},
            "job1": {"speedup": 1, "turnaround": 1, "waiting": 0}
        }}}}"#,
    )
    .unwrap();
    let jobs = store
        .experiment("Experiment 0")
        .and_then(|e| e.scheduler("FCFS"))
        .unwrap()
        .job_table()
        .unwrap();

    assert_eq!(
        jobs.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["job2", "job10", "job1"]
    );
    assert_eq!(jobs["job10"].speedup, 10.0);
}

#[test]
fn large_job_table_decodes_every_job() {
    let jobs: Vec<String> = (0..20_000)
        .map(|i| format!(r#""job{i}": {{"speedup": {i}, "turnaround": 1, "waiting": 0}}"#))
        .collect();
    let text = format!(
        r#"{{"Experiment 0": {{"FCFS": {{"Jobs utilization": {{{}}}}}}}}}"#,
        jobs.join(",")
    );
    let store = ResultsStore::from_json_str(&text).unwrap();
    let table = store
        .experiment("Experiment 0")
        .and_then(|e| e.scheduler("FCFS"))
        .unwrap()
        .job_table()
        .unwrap();

    assert_eq!(table.len(), 20_000);
    assert_eq!(table.get_index(19_999).map(|(k, _)| k.as_str()), Some("job19999"));
}

#[test]
fn save_and_load_results_file() {
    let temp_dir = std::env::temp_dir().join("sd_results_test_roundtrip");
    let _ = std::fs::remove_dir_all(&temp_dir);
    std::fs::create_dir_all(&temp_dir).unwrap();
    let path = temp_dir.join("results.json");

    let store = ResultsStore::from_json_str(RESULTS).unwrap();
    store.save_json(&path).unwrap();
    let loaded = ResultsStore::load_json(&path).unwrap();

    assert_eq!(loaded, store);
    assert_eq!(loaded.fingerprint(), store.fingerprint());
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("sd_results_test_missing/none.json");
    assert!(matches!(
        ResultsStore::load_json(&path),
        Err(ResultsError::Io(_))
    ));
}
