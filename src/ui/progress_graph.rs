//! egui widget drawing a [`ProgressGraph`] as stacked outlined bars.
//!
//! Bars live in normalized graph space: x in `[0, 1]` is time, y grows upward
//! with the root row centered at `y = 1`. [`GraphTransform`] maps that space
//! into the widget's screen rect and back for hover picking.

use super::{rgba_to_color32, GraphStyle};
use crate::graph::{tooltip_text, ProgressGraph};
use crate::progress::BAND_HALF_HEIGHT;
use egui::{Align2, FontId, Pos2, Rect, Sense, Shape, Stroke};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphTransform {
    rect: Rect,
    y_max: f32,
}

impl GraphTransform {
    pub fn new(rect: Rect, row_count: usize) -> Self {
        let n = row_count.max(1) as f32;
        Self {
            rect,
            // Leave room for the upper half of the root band.
            y_max: 1.0 + BAND_HALF_HEIGHT / n,
        }
    }

    pub fn to_screen(&self, x: f32, y: f32) -> Pos2 {
        Pos2::new(
            self.rect.left() + x * self.rect.width(),
            self.rect.bottom() - (y / self.y_max) * self.rect.height(),
        )
    }

    pub fn from_screen(&self, pos: Pos2) -> (f32, f32) {
        let width = self.rect.width().max(f32::EPSILON);
        let height = self.rect.height().max(f32::EPSILON);
        let x = (pos.x - self.rect.left()) / width;
        let y = (self.rect.bottom() - pos.y) / height * self.y_max;
        (x, y)
    }
}

pub struct ProgressGraphWidget<'a> {
    graph: &'a ProgressGraph,
    style: GraphStyle,
}

impl<'a> ProgressGraphWidget<'a> {
    pub fn new(graph: &'a ProgressGraph) -> Self {
        Self {
            graph,
            style: GraphStyle::default(),
        }
    }

    pub fn style(mut self, style: GraphStyle) -> Self {
        self.style = style;
        self
    }
}

impl egui::Widget for ProgressGraphWidget<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let desired = egui::vec2(ui.available_width(), self.style.height);
        let (response, painter) = ui.allocate_painter(desired, Sense::hover());
        painter.rect_filled(
            response.rect,
            2.0,
            rgba_to_color32(self.style.background_rgba),
        );

        let plot_rect = response.rect.shrink(self.style.margin);
        let transform = GraphTransform::new(plot_rect, self.graph.bars().len());

        if self.graph.is_empty() {
            painter.text(
                plot_rect.center(),
                Align2::CENTER_CENTER,
                "No progress events",
                FontId::proportional(14.0),
                ui.visuals().weak_text_color(),
            );
            return response;
        }

        let hovered = response.hover_pos().map(|pos| transform.from_screen(pos));
        let hovered_row = hovered.and_then(|(x, y)| self.graph.pick(x, y));

        for bar in self.graph.bars() {
            let points: Vec<Pos2> = bar
                .points
                .iter()
                .map(|point| transform.to_screen(point.x, point.y))
                .collect();
            let width = if hovered_row == Some(bar.row) {
                self.style.hover_stroke_width
            } else {
                self.style.stroke_width
            };
            painter.add(Shape::closed_line(
                points,
                Stroke::new(width, rgba_to_color32(bar.color)),
            ));
        }

        match hovered_row.and_then(|row| self.graph.event_at_row(row)) {
            Some(event) => {
                let mut text = tooltip_text(event);
                if let Some(elapsed) = hovered.and_then(|(x, _)| self.graph.elapsed_at(x)) {
                    text.push_str(&format!("\nat +{} ms", elapsed));
                }
                response.on_hover_text_at_pointer(text)
            }
            None => response,
        }
    }
}
