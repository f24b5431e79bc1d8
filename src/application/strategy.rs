//! Invocation modes: one interface, three ways to compute the next step.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::render::Renderer;
use crate::domain::labs::{evaluate, evaluate_screening, parse_values};
use crate::domain::{Document, Flowchart, Thresholds};

/// Computes the document for one invocation from its single query argument.
pub trait NextStep {
    fn compute_next_step(&self, query: &str) -> Document;
}

/// How the query argument is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Node identifier of the flowchart
    #[default]
    Flow,
    /// Lab values `WBC PLT/Retic Retic/MCV MCV`
    Labs,
    /// Sex and lab values `m|f Hb WBC ...`
    Screen,
}

/// Identifier mode over a flowchart table.
pub struct FlowchartStrategy<'a> {
    chart: &'a Flowchart,
    renderer: Renderer,
}

impl<'a> FlowchartStrategy<'a> {
    pub fn new(chart: &'a Flowchart, renderer: Renderer) -> Self {
        Self { chart, renderer }
    }
}

impl NextStep for FlowchartStrategy<'_> {
    #[instrument(level = "debug", skip(self))]
    fn compute_next_step(&self, query: &str) -> Document {
        let id = match query.trim() {
            "" => self.chart.root(),
            id => id,
        };
        match self.chart.resolve(id) {
            Ok(node) => self.renderer.render_node(node, self.chart.root()),
            Err(e) => self.renderer.render_not_found(id, &e),
        }
    }
}

/// Gender-agnostic numeric mode.
pub struct LabStrategy {
    thresholds: Thresholds,
    renderer: Renderer,
}

impl LabStrategy {
    pub fn new(thresholds: Thresholds, renderer: Renderer) -> Self {
        Self {
            thresholds,
            renderer,
        }
    }
}

impl NextStep for LabStrategy {
    #[instrument(level = "debug", skip(self))]
    fn compute_next_step(&self, query: &str) -> Document {
        let values = parse_values(query);
        debug!("parsed {} values", values.len());
        let step = evaluate(&values, &self.thresholds);
        self.renderer.render_lab_step(&step)
    }
}

/// Gender-aware numeric mode with the Hb short-circuit.
pub struct ScreeningStrategy {
    thresholds: Thresholds,
    renderer: Renderer,
}

impl ScreeningStrategy {
    pub fn new(thresholds: Thresholds, renderer: Renderer) -> Self {
        Self {
            thresholds,
            renderer,
        }
    }
}

impl NextStep for ScreeningStrategy {
    #[instrument(level = "debug", skip(self))]
    fn compute_next_step(&self, query: &str) -> Document {
        let step = evaluate_screening(query, &self.thresholds);
        self.renderer.render_lab_step(&step)
    }
}

/// Pick the strategy for a mode.
pub fn strategy_for<'a>(
    mode: Mode,
    chart: &'a Flowchart,
    thresholds: Thresholds,
    renderer: Renderer,
) -> Box<dyn NextStep + 'a> {
    match mode {
        Mode::Flow => Box::new(FlowchartStrategy::new(chart, renderer)),
        Mode::Labs => Box::new(LabStrategy::new(thresholds, renderer)),
        Mode::Screen => Box::new(ScreeningStrategy::new(thresholds, renderer)),
    }
}
