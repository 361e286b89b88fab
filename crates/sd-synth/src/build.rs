//! Builders for the widget subtrees the synthesizer reads back.

use crate::tree::{CORE, HTML, Widget};
use sd_config::{GeneratorKind, HyperParamKind, SchedulerDirectory, WorkloadCatalog};
use serde_json::{Value, json};

fn half_width() -> Value {
    json!({"width": "50%"})
}

fn labeled_input(label: &str, value: u32, min: u32) -> Widget {
    Widget::bootstrap("InputGroup").children(vec![
        Widget::bootstrap("InputGroupText")
            .text(label)
            .prop("style", half_width()),
        Widget::bootstrap("Input")
            .prop("value", value)
            .prop("min", min)
            .prop("type", "number"),
    ])
}

/// Single "Number of jobs" input.
pub fn random_options(default_jobs: u32) -> Widget {
    labeled_input("Number of jobs", default_jobs, 1)
}

/// One count input per workload, in catalogue order.
pub fn dictionary_options(workloads: &[String]) -> Vec<Widget> {
    workloads
        .iter()
        .map(|workload| labeled_input(workload, 0, 0))
        .collect()
}

/// File-upload control for a pre-built workload list.
pub fn list_options() -> Widget {
    Widget::new("Upload", CORE)
        .prop("id", "upload-workload")
        .child(
            Widget::bootstrap("Button")
                .text("Upload file")
                .prop("style", json!({"width": "100%"})),
        )
}

/// Options subtree for the given generator and workload selection.
///
/// Returns `None` when the dictionary generator is asked for a machine or
/// suite the catalogue does not know.
pub fn generator_options(
    kind: GeneratorKind,
    catalog: &WorkloadCatalog,
    machine: &str,
    suite: &str,
) -> Option<Value> {
    match kind {
        GeneratorKind::Random => Some(random_options(1).into_value()),
        GeneratorKind::Dictionary => {
            let workloads = catalog.workloads(machine, suite)?;
            let widgets: Vec<Value> = dictionary_options(workloads)
                .into_iter()
                .map(Widget::into_value)
                .collect();
            Some(Value::Array(widgets))
        }
        GeneratorKind::List => Some(list_options().into_value()),
    }
}

fn hyperparam_control(kind: HyperParamKind) -> Widget {
    match kind {
        HyperParamKind::Numeric => Widget::bootstrap("Input")
            .prop("min", 0)
            .prop("value", 1)
            .prop("type", "number")
            .prop("style", half_width()),
        HyperParamKind::Flag => Widget::bootstrap("Select")
            .prop(
                "options",
                json!([
                    {"label": "True", "value": "True"},
                    {"label": "False", "value": "False"}
                ]),
            )
            .prop("value", "False")
            .prop("style", half_width()),
        HyperParamKind::Upload => Widget::bootstrap("Button")
            .prop("children", json!(["Upload"]))
            .prop("style", half_width()),
    }
}

/// Checklist rows for every algorithm in the directory, in directory order.
pub fn scheduler_checklist(directory: &SchedulerDirectory) -> Vec<Widget> {
    directory
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let index = i.to_string();
            let tooltip_target = format!("{} tooltip", entry.name);

            let checkbox = Widget::bootstrap("Checkbox")
                .prop("id", json!({"type": "schedulers-checkboxes", "index": index}))
                .prop("label", entry.name.as_str())
                .prop("disabled", entry.disabled)
                .prop("value", entry.selected);

            let info = Widget::bootstrap("Button")
                .prop("id", tooltip_target.as_str())
                .child(Widget::new("I", HTML).prop("className", "bi bi-info"))
                .prop("color", "info")
                .prop("outline", true);

            let tooltip = Widget::bootstrap("Tooltip")
                .text(&entry.description)
                .prop("target", tooltip_target.as_str());

            let header = Widget::bootstrap("Row").children(vec![
                Widget::bootstrap("Col")
                    .children(vec![checkbox])
                    .prop("width", 11),
                Widget::bootstrap("Col")
                    .children(vec![info, tooltip])
                    .prop("width", 1),
            ]);

            let params = entry
                .hyperparams
                .iter()
                .map(|(name, annotation)| {
                    Widget::bootstrap("InputGroup").children(vec![
                        Widget::bootstrap("InputGroupText")
                            .text(name)
                            .prop("style", half_width()),
                        hyperparam_control(HyperParamKind::from_annotation(annotation)),
                    ])
                })
                .collect();

            let collapse = Widget::bootstrap("Collapse")
                .prop("id", json!({"type": "schedulers-collapse", "index": index}))
                .children(params)
                .prop("is_open", entry.selected);

            Widget::bootstrap("Row")
                .children(vec![
                    header,
                    Widget::bootstrap("Row")
                        .children(vec![collapse])
                        .prop("class_name", "my-2"),
                ])
                .prop("class_name", "element-item m-1 p-2")
        })
        .collect()
}

/// The checklist as the JSON list the synthesizer consumes.
pub fn scheduler_rows(directory: &SchedulerDirectory) -> Value {
    Value::Array(
        scheduler_checklist(directory)
            .into_iter()
            .map(Widget::into_value)
            .collect(),
    )
}
