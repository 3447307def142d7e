pub mod progress_graph;

pub use progress_graph::{GraphTransform, ProgressGraphWidget};

/// Visual parameters of the progress graph widget.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GraphStyle {
    /// Widget height in points; width fills the available space.
    pub height: f32,
    pub margin: f32,
    pub stroke_width: f32,
    pub hover_stroke_width: f32,
    pub background_rgba: [f32; 4],
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            height: 240.0,
            margin: 8.0,
            stroke_width: 1.5,
            hover_stroke_width: 3.0,
            background_rgba: [0.08, 0.08, 0.12, 1.0],
        }
    }
}

pub fn rgba_to_color32(rgba: [f32; 4]) -> egui::Color32 {
    egui::Rgba::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3]).into()
}
