//! Chart render calls handed to the plotting sink.
//!
//! The model mirrors the trace/layout JSON the plotting library consumes;
//! only the fields the result views use are represented.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Box,
    Scatter,
}

/// Coordinates along one trace axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Values {
    Numbers(Vec<f64>),
    Labels(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Values>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boxpoints: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jitter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boxmean: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl Trace {
    fn empty(kind: TraceKind) -> Self {
        Self {
            kind,
            name: None,
            x: None,
            y: Vec::new(),
            text: None,
            mode: None,
            boxpoints: None,
            jitter: None,
            boxmean: None,
            showlegend: None,
            xaxis: None,
            yaxis: None,
            marker: None,
            visible: None,
        }
    }

    /// Distribution plot showing every point with its label, mean and
    /// standard deviation.
    pub fn distribution(name: impl Into<String>, values: Vec<f64>, labels: Vec<String>) -> Self {
        Self {
            name: Some(name.into()),
            y: values,
            text: Some(labels),
            boxpoints: Some("all".to_string()),
            jitter: Some(0.2),
            boxmean: Some("sd".to_string()),
            showlegend: Some(false),
            ..Self::empty(TraceKind::Box)
        }
    }

    pub fn line(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x: Some(Values::Numbers(x)),
            y,
            mode: Some("lines+markers".to_string()),
            ..Self::empty(TraceKind::Scatter)
        }
    }

    pub fn categories(x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            x: Some(Values::Labels(x)),
            y,
            ..Self::empty(TraceKind::Scatter)
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Place the trace on the `index`-th subplot (1-based).
    pub fn on_subplot(mut self, index: usize) -> Self {
        if index > 1 {
            self.xaxis = Some(format!("x{index}"));
            self.yaxis = Some(format!("y{index}"));
        }
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn without_legend(mut self) -> Self {
        self.showlegend = Some(false);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickfont: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl Axis {
    /// Axis with a bold title.
    pub fn titled(text: &str) -> Self {
        Self {
            title: Some(AxisTitle {
                text: bold(text),
                font: None,
            }),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub rows: u32,
    pub columns: u32,
    pub pattern: &'static str,
}

impl Grid {
    /// One row of independent subplots.
    pub fn side_by_side(columns: u32) -> Self {
        Self {
            rows: 1,
            columns,
            pattern: "independent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub x: Value,
    pub y: f64,
    pub xref: &'static str,
    pub yref: &'static str,
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuButton {
    pub label: String,
    pub method: &'static str,
    /// Restyle then relayout arguments.
    pub args: [Value; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateMenu {
    pub buttons: Vec<MenuButton>,
    pub direction: &'static str,
    pub showactive: bool,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: f64,
    pub xanchor: &'static str,
    pub y: f64,
    pub yanchor: &'static str,
}

impl UpdateMenu {
    /// Button row anchored above the top-right corner of the plot.
    pub fn buttons(buttons: Vec<MenuButton>) -> Self {
        Self {
            buttons,
            direction: "left",
            showactive: true,
            kind: "buttons",
            x: 1.0,
            xanchor: "right",
            y: 1.0,
            yanchor: "bottom",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    /// `xaxis`, `yaxis`, `xaxis2`, ... keyed by their layout name.
    #[serde(flatten)]
    pub axes: BTreeMap<String, Axis>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub updatemenus: Vec<UpdateMenu>,
}

impl Layout {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn centered(mut self) -> Self {
        self.title_x = Some(0.5);
        self
    }

    pub fn with_axis(mut self, name: &str, axis: Axis) -> Self {
        self.axes.insert(name.to_string(), axis);
        self
    }

    pub fn axis(&self, name: &str) -> Option<&Axis> {
        self.axes.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// A render call: either a figure delivered complete with the results, or
/// one built from raw metric data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartCall {
    Figure(Value),
    Built(ChartSpec),
}

impl ChartCall {
    pub fn to_json(&self) -> serde_json::Result<Value> {
        match self {
            ChartCall::Figure(figure) => Ok(figure.clone()),
            ChartCall::Built(spec) => serde_json::to_value(spec),
        }
    }

    pub fn spec(&self) -> Option<&ChartSpec> {
        match self {
            ChartCall::Built(spec) => Some(spec),
            ChartCall::Figure(_) => None,
        }
    }
}

pub fn bold(text: &str) -> String {
    format!("<b>{text}</b>")
}
