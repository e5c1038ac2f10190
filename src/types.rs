//! Question description records
//!
//! Configuration payloads for the ray selector and graph selector widgets.
//! They carry no behaviour; field names match the JSON the widgets consume.

use serde::{Deserialize, Serialize};

/// Expected answer for a ray selector question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayAnswer {
    #[serde(rename = "rayType")]
    pub ray_type: String,
    pub position: f64,
}

/// A question answered by placing a ray on a number line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaySelectorQuestion {
    pub question: String,
    /// Always `"Ray Selector"`
    pub question_type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Spacing between tick marks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<f64>,
    #[serde(
        rename = "initialPosition",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_position: Option<f64>,
    #[serde(
        rename = "correctAnswer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub correct_answer: Option<RayAnswer>,
}

/// A selectable point on the graph grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    pub x: f64,
    pub y: f64,
}

/// A question answered by selecting points on a 2D grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSelectorQuestion {
    /// Always `"Graph Selector"`
    pub question_type_name: String,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Grid spacing, kept as text as it arrives from the authoring tool
    pub grid_interval: String,
    pub selection_mode: String,
    pub question_id: String,
    pub choices: Vec<GraphPoint>,
    pub show_axes: bool,
    pub graph_instruction: String,
}
