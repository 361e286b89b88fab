//! Run configuration synthesis.

use crate::error::{NoOp, SynthResult};
use crate::shape::{self, ControlValue, GeneratorOptions, LabeledNumber, Node, SchedulerRow};
use crate::snapshot::{ClusterForm, ClusterSource, FormSnapshot, SimulationForm};
use sd_config::{
    ClusterDirectory, ClusterSpec, GeneratorConfig, GeneratorKind, HyperParams, HyperValue,
    RunConfiguration, SchedulerDirectory, SimulationConfig, SimulationMode, StopCondition,
    StopConditionKind, UploadBlob, WorkloadCatalog, WorkloadSelection,
};
use std::collections::BTreeMap;

/// Lookup tables consulted while synthesizing.
#[derive(Debug, Clone, Copy)]
pub struct Directories<'a> {
    pub clusters: &'a ClusterDirectory,
    pub schedulers: &'a SchedulerDirectory,
    pub workloads: &'a WorkloadCatalog,
}

/// Build a run configuration from the current form state.
///
/// Either every part of the configuration is extracted, or the pass is
/// abandoned and the reason returned; a partial configuration is never
/// produced.
pub fn synthesize(snapshot: &FormSnapshot, dirs: &Directories<'_>) -> SynthResult<RunConfiguration> {
    let result = extract(snapshot, dirs);
    match &result {
        Ok(config) => tracing::debug!(
            generator = snapshot.generator_type.as_str(),
            schedulers = config.schedulers.len(),
            "run configuration synthesized"
        ),
        Err(reason) => tracing::debug!(
            generator = snapshot.generator_type.as_str(),
            category = ?reason.category(),
            %reason,
            "run configuration left unchanged"
        ),
    }
    result
}

fn extract(snapshot: &FormSnapshot, dirs: &Directories<'_>) -> SynthResult<RunConfiguration> {
    let generator = extract_generator(snapshot, dirs.workloads)?;
    let cluster = extract_cluster(&snapshot.cluster, dirs.clusters)?;
    let schedulers = extract_schedulers(&snapshot.scheduler_rows, dirs.schedulers)?;
    let simulation = extract_simulation(&snapshot.simulation)?;

    Ok(RunConfiguration {
        workload: WorkloadSelection {
            machine: snapshot.machine.clone(),
            suite: snapshot.suite.clone(),
        },
        generator,
        cluster,
        schedulers,
        simulation,
    })
}

/// Match the generator options subtree against the shape of `kind`.
pub fn match_generator_options(kind: GeneratorKind, tree: &serde_json::Value) -> SynthResult<GeneratorOptions> {
    let root = Node::root(tree, "generator_options");
    match kind {
        GeneratorKind::Random => Ok(GeneratorOptions::Random(shape::labeled_number(&root)?)),
        GeneratorKind::Dictionary => {
            let groups = root
                .elements()?
                .iter()
                .map(shape::labeled_number)
                .collect::<SynthResult<Vec<_>>>()?;
            Ok(GeneratorOptions::Dictionary(groups))
        }
        GeneratorKind::List => Ok(GeneratorOptions::List(shape::upload_field(&root)?)),
    }
}

fn extract_generator(snapshot: &FormSnapshot, catalog: &WorkloadCatalog) -> SynthResult<GeneratorConfig> {
    let kind = GeneratorKind::from_label(&snapshot.generator_type).ok_or_else(|| {
        NoOp::UnknownVariant {
            what: "generator type",
            value: snapshot.generator_type.clone(),
        }
    })?;

    match match_generator_options(kind, &snapshot.generator_options)? {
        GeneratorOptions::Random(field) => Ok(GeneratorConfig::Random {
            job_count: whole(&field.label, field.value)?,
        }),
        GeneratorOptions::Dictionary(fields) => {
            let workloads = catalog
                .workloads(&snapshot.machine, &snapshot.suite)
                .ok_or_else(|| NoOp::LookupMiss {
                    what: "workload suite",
                    name: format!("{}/{}", snapshot.machine, snapshot.suite),
                })?;
            if !labels_line_up(&fields, workloads) {
                return Err(NoOp::ShapeMismatch {
                    path: "generator_options".to_string(),
                    expected: format!(
                        "one control per workload of {}/{}",
                        snapshot.machine, snapshot.suite
                    ),
                });
            }
            let mut per_workload_count = BTreeMap::new();
            for field in fields {
                let count = whole(&field.label, field.value)?;
                per_workload_count.insert(field.label, count);
            }
            Ok(GeneratorConfig::Dictionary { per_workload_count })
        }
        GeneratorOptions::List(upload) => {
            let contents = upload
                .contents
                .ok_or_else(|| NoOp::missing("workload list upload"))?;
            Ok(GeneratorConfig::List {
                raw_upload: UploadBlob(contents),
            })
        }
    }
}

fn labels_line_up(fields: &[LabeledNumber], workloads: &[String]) -> bool {
    fields.len() == workloads.len()
        && fields
            .iter()
            .zip(workloads)
            .all(|(field, workload)| field.label == *workload)
}

fn extract_cluster(form: &ClusterForm, clusters: &ClusterDirectory) -> SynthResult<ClusterSpec> {
    match ClusterSource::from_clicks(form.toggle_clicks) {
        ClusterSource::Named => clusters.get(&form.machine).ok_or_else(|| NoOp::LookupMiss {
            what: "machine",
            name: form.machine.clone(),
        }),
        ClusterSource::Manual => Ok(ClusterSpec {
            nodes: whole("cluster nodes", form.nodes)?,
            processes_per_node: whole("cluster ppn", form.ppn)?,
        }),
    }
}

/// Read the checklist rows in display order.
pub fn match_scheduler_rows(tree: &serde_json::Value) -> SynthResult<Vec<SchedulerRow>> {
    let root = Node::root(tree, "scheduler_rows");
    if root.is_null() {
        return Ok(Vec::new());
    }
    root.elements()?.iter().map(shape::scheduler_row).collect()
}

fn extract_schedulers(
    tree: &serde_json::Value,
    directory: &SchedulerDirectory,
) -> SynthResult<BTreeMap<String, HyperParams>> {
    let mut schedulers = BTreeMap::new();

    for row in match_scheduler_rows(tree)? {
        if !row.selected {
            continue;
        }

        let entry = directory.resolve(&row.label).ok_or_else(|| NoOp::LookupMiss {
            what: "scheduler",
            name: row.label.clone(),
        })?;

        let mut params = HyperParams::new();
        for field in row.hyperparams {
            let value = match field.control {
                ControlValue::Number(Some(v)) => HyperValue::Number(v),
                ControlValue::Number(None) => {
                    return Err(NoOp::missing(format!("{} / {}", row.label, field.name)));
                }
                ControlValue::Select(choice) => HyperValue::Flag(choice.as_deref() == Some("True")),
                ControlValue::Other { .. } => HyperValue::Deferred,
            };
            params.insert(field.name, value);
        }

        schedulers.insert(entry.module.clone(), params);
    }

    Ok(schedulers)
}

fn extract_simulation(form: &SimulationForm) -> SynthResult<SimulationConfig> {
    let mode = SimulationMode::from_label(&form.mode).ok_or_else(|| NoOp::UnknownVariant {
        what: "simulation mode",
        value: form.mode.clone(),
    })?;
    let experiments = whole("number of experiments", form.experiments)?;

    let stop_condition = match mode {
        SimulationMode::Static => None,
        SimulationMode::Dynamic => Some(extract_stop_condition(form)?),
    };

    Ok(SimulationConfig {
        mode,
        experiments,
        stop_condition,
    })
}

fn extract_stop_condition(form: &SimulationForm) -> SynthResult<StopCondition> {
    let label = form
        .stop_kind
        .as_deref()
        .ok_or_else(|| NoOp::missing("stop condition"))?;
    let kind = StopConditionKind::from_label(label).ok_or_else(|| NoOp::UnknownVariant {
        what: "stop condition",
        value: label.to_string(),
    })?;

    match kind {
        StopConditionKind::Time => Ok(StopCondition::Time {
            stop_time: form.stop_time.ok_or_else(|| NoOp::missing("stop time"))?,
            generator_time: form
                .generator_time
                .ok_or_else(|| NoOp::missing("generator time"))?,
        }),
        StopConditionKind::JobCount => Ok(StopCondition::JobCount {
            count: whole("stop job count", form.stop_jobs)?,
        }),
    }
}

/// A count entered in a numeric control.
fn whole(field: &str, value: Option<f64>) -> SynthResult<u32> {
    let value = value.ok_or_else(|| NoOp::missing(field))?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Ok(value as u32)
    } else {
        Err(NoOp::ShapeMismatch {
            path: field.to_string(),
            expected: format!("a non-negative whole number, got {value}"),
        })
    }
}
