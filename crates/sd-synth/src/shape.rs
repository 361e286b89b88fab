//! Typed shapes of the widget subtrees the synthesizer reads, and a strict
//! structural matcher that either recognises a subtree completely or reports
//! where it diverged.

use crate::error::{NoOp, SynthResult};
use serde_json::Value;

/// Cursor over a JSON widget tree that remembers how it got there.
#[derive(Debug, Clone)]
pub(crate) struct Node<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> Node<'a> {
    pub(crate) fn root(value: &'a Value, name: &str) -> Self {
        Self {
            value,
            path: name.to_string(),
        }
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Component type of this widget (`Input`, `Checkbox`, ...).
    pub(crate) fn kind(&self) -> SynthResult<&'a str> {
        self.value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| NoOp::shape(&self.path, "a widget"))
    }

    /// Require this node to be a widget of the given component type.
    pub(crate) fn expect(&self, kind: &str) -> SynthResult<()> {
        if self.kind()? == kind {
            Ok(())
        } else {
            Err(NoOp::shape(&self.path, format!("{kind} widget")))
        }
    }

    pub(crate) fn prop(&self, key: &str) -> Option<&'a Value> {
        self.value
            .get("props")
            .and_then(|props| props.get(key))
            .filter(|value| !value.is_null())
    }

    /// Widget children. A lone child widget counts as a one-element list.
    pub(crate) fn children(&self) -> SynthResult<Vec<Node<'a>>> {
        match self.prop("children") {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(self.indexed(items, "children")),
            Some(single @ Value::Object(_)) => Ok(vec![Node {
                value: single,
                path: format!("{}.children", self.path),
            }]),
            Some(_) => Err(NoOp::shape(&self.path, "widget children")),
        }
    }

    pub(crate) fn child(&self, index: usize) -> SynthResult<Node<'a>> {
        self.children()?
            .into_iter()
            .nth(index)
            .ok_or_else(|| NoOp::shape(&self.path, format!("a child at position {index}")))
    }

    /// Text content held directly in `children`.
    pub(crate) fn text(&self) -> SynthResult<&'a str> {
        self.prop("children")
            .and_then(Value::as_str)
            .ok_or_else(|| NoOp::shape(&self.path, "a text label"))
    }

    /// Elements of a list-valued node (the node itself is a JSON array).
    pub(crate) fn elements(&self) -> SynthResult<Vec<Node<'a>>> {
        match self.value {
            Value::Array(items) => Ok(items
                .iter()
                .enumerate()
                .map(|(i, value)| Node {
                    value,
                    path: format!("{}[{i}]", self.path),
                })
                .collect()),
            _ => Err(NoOp::shape(&self.path, "a list of widgets")),
        }
    }

    fn indexed(&self, items: &'a [Value], key: &str) -> Vec<Node<'a>> {
        items
            .iter()
            .enumerate()
            .map(|(i, value)| Node {
                value,
                path: format!("{}.{key}[{i}]", self.path),
            })
            .collect()
    }
}

/// A text label followed by a numeric input.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledNumber {
    pub label: String,
    pub value: Option<f64>,
}

/// The file-upload widget of the list generator.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadField {
    pub contents: Option<String>,
}

/// Expected shape of the generator options subtree, per generator variant.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorOptions {
    Random(LabeledNumber),
    Dictionary(Vec<LabeledNumber>),
    List(UploadField),
}

/// One row of the scheduler checklist.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerRow {
    pub label: String,
    pub selected: bool,
    pub hyperparams: Vec<HyperParamField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HyperParamField {
    pub name: String,
    pub control: ControlValue,
}

/// Raw state of a hyperparameter control, by control kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlValue {
    Number(Option<f64>),
    Select(Option<String>),
    Other { kind: String },
}

pub(crate) fn number(node: &Node<'_>, value: Option<&Value>) -> SynthResult<Option<f64>> {
    match value {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| NoOp::shape(node.path(), "a finite number")),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| NoOp::shape(node.path(), "a numeric value")),
        Some(_) => Err(NoOp::shape(node.path(), "a numeric value")),
    }
}

/// `InputGroup[InputGroupText(label), Input(value)]`
pub(crate) fn labeled_number(node: &Node<'_>) -> SynthResult<LabeledNumber> {
    node.expect("InputGroup")?;
    let parts = node.children()?;
    let [label, input] = parts.as_slice() else {
        return Err(NoOp::shape(node.path(), "a label and a numeric input"));
    };
    let label = label.text()?.to_string();
    input.expect("Input")?;
    let value = number(input, input.prop("value"))?;
    Ok(LabeledNumber { label, value })
}

pub(crate) fn upload_field(node: &Node<'_>) -> SynthResult<UploadField> {
    node.expect("Upload")?;
    let contents = match node.prop("contents") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(NoOp::shape(node.path(), "uploaded file contents")),
    };
    Ok(UploadField { contents })
}

/// Row[Row[Col[Checkbox], Col[..]], Row[Collapse[InputGroup..]]]
pub(crate) fn scheduler_row(node: &Node<'_>) -> SynthResult<SchedulerRow> {
    node.expect("Row")?;
    let header = node.child(0)?;
    let body = node.child(1)?;

    let checkbox = header.child(0)?.child(0)?;
    checkbox.expect("Checkbox")?;
    let label = checkbox
        .prop("label")
        .and_then(Value::as_str)
        .ok_or_else(|| NoOp::shape(checkbox.path(), "a checkbox label"))?
        .to_string();
    let selected = match checkbox.prop("value") {
        None => false,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => return Err(NoOp::shape(checkbox.path(), "a boolean selection")),
    };

    let collapse = body.child(0)?;
    collapse.expect("Collapse")?;
    let hyperparams = collapse
        .children()?
        .iter()
        .map(hyperparam_field)
        .collect::<SynthResult<Vec<_>>>()?;

    Ok(SchedulerRow {
        label,
        selected,
        hyperparams,
    })
}

fn hyperparam_field(node: &Node<'_>) -> SynthResult<HyperParamField> {
    node.expect("InputGroup")?;
    let parts = node.children()?;
    let [label, control] = parts.as_slice() else {
        return Err(NoOp::shape(node.path(), "a label and a control"));
    };
    let name = label.text()?.to_string();
    let control = match control.kind()? {
        "Input" => ControlValue::Number(number(control, control.prop("value"))?),
        "Select" => ControlValue::Select(
            control
                .prop("value")
                .and_then(Value::as_str)
                .map(str::to_string),
        ),
        other => ControlValue::Other {
            kind: other.to_string(),
        },
    };
    Ok(HyperParamField { name, control })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn labeled_number_reads_label_and_value() {
        let tree = json!({
            "type": "InputGroup",
            "props": {"children": [
                {"type": "InputGroupText", "props": {"children": "Number of jobs"}},
                {"type": "Input", "props": {"value": 7, "type": "number"}}
            ]}
        });
        let parsed = labeled_number(&Node::root(&tree, "options")).unwrap();
        assert_eq!(
            parsed,
            LabeledNumber {
                label: "Number of jobs".to_string(),
                value: Some(7.0)
            }
        );
    }

    #[test]
    fn labeled_number_reports_path_of_mismatch() {
        let tree = json!({
            "type": "InputGroup",
            "props": {"children": [
                {"type": "InputGroupText", "props": {"children": "Number of jobs"}},
                {"type": "Select", "props": {"value": "7"}}
            ]}
        });
        let err = labeled_number(&Node::root(&tree, "options")).unwrap_err();
        assert_eq!(
            err,
            NoOp::ShapeMismatch {
                path: "options.children[1]".to_string(),
                expected: "Input widget".to_string()
            }
        );
    }

    #[test]
    fn blank_input_is_none() {
        let tree = json!({"type": "Input", "props": {"value": null}});
        let node = Node::root(&tree, "x");
        assert_eq!(number(&node, node.prop("value")).unwrap(), None);
    }

    #[test]
    fn single_child_counts_as_list() {
        let tree = json!({
            "type": "Row",
            "props": {"children": {"type": "Collapse", "props": {"children": []}}}
        });
        let node = Node::root(&tree, "row");
        let kids = node.children().unwrap();
        assert_eq!(kids.len(), 1);
        assert_eq!(kids[0].kind().unwrap(), "Collapse");
        assert!(kids[0].children().unwrap().is_empty());
    }
}
