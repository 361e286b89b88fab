//! Serialized widget tree, as exchanged with the rendering layer.
//!
//! A widget is `{"type", "namespace", "props"}`; nested widgets live in
//! `props.children`, which may hold a single widget, a list of widgets, or text.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const BOOTSTRAP: &str = "dash_bootstrap_components";
pub const CORE: &str = "dash_core_components";
pub const HTML: &str = "dash_html_components";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub props: Map<String, Value>,
}

impl Widget {
    pub fn new(kind: &str, namespace: &str) -> Self {
        Self {
            kind: kind.to_string(),
            namespace: Some(namespace.to_string()),
            props: Map::new(),
        }
    }

    /// Shorthand for a bootstrap component.
    pub fn bootstrap(kind: &str) -> Self {
        Self::new(kind, BOOTSTRAP)
    }

    pub fn prop(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.props.insert(key.to_string(), value.into());
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.prop("children", text)
    }

    pub fn child(self, child: Widget) -> Self {
        self.prop("children", child.into_value())
    }

    pub fn children(self, children: Vec<Widget>) -> Self {
        let list: Vec<Value> = children.into_iter().map(Widget::into_value).collect();
        self.prop("children", list)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn into_value(self) -> Value {
        let mut object = Map::new();
        object.insert("type".to_string(), Value::String(self.kind));
        if let Some(namespace) = self.namespace {
            object.insert("namespace".to_string(), Value::String(namespace));
        }
        object.insert("props".to_string(), Value::Object(self.props));
        Value::Object(object)
    }
}

impl From<Widget> for Value {
    fn from(widget: Widget) -> Self {
        widget.into_value()
    }
}
