use eframe::egui::{
    self, Color32, FontId, Painter, RichText, ScrollArea, Sense, Stroke, StrokeKind, Ui, Vec2,
};

use crate::scene::{Group, Scene, Shape};
use crate::state::AppState;
use crate::tooltip::TooltipState;

// ---------------------------------------------------------------------------
// Heat map (central panel)
// ---------------------------------------------------------------------------

/// Render the heat map and route pointer movement into hover transitions.
pub fn heat_map(ui: &mut Ui, state: &mut AppState) {
    if state.scene.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.loading() {
                ui.spinner();
            } else {
                ui.heading("No data loaded  (File → Reload)");
            }
        });
        return;
    }

    ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let (response, painter) = ui.allocate_painter(state.scene.size(), Sense::hover());
            let origin = response.rect.min.to_vec2();

            // Hover first so the outline shows in the same frame.
            let hit = response
                .hover_pos()
                .and_then(|pointer| Some((state.scene.cell_at(pointer - origin)?, pointer)));
            match hit {
                Some((id, pointer)) => state.hover(id, pointer),
                None if state.hovered.is_some() => state.unhover(),
                None => {}
            }

            let text_color = ui.visuals().text_color();
            paint_scene(&painter, &state.scene, origin, text_color);
        });

    tooltip_overlay(ui.ctx(), &state.tooltip);
}

fn paint_scene(painter: &Painter, scene: &Scene, origin: Vec2, text_color: Color32) {
    let font = FontId::proportional(10.0);
    let axis_stroke = Stroke::new(1.0, text_color);
    let legend_painter =
        painter.with_clip_rect(scene.legend_clip().translate(origin).intersect(painter.clip_rect()));

    let mut outlined = None;
    for element in scene.elements() {
        let p = if element.group == Group::Legend {
            &legend_painter
        } else {
            painter
        };
        match &element.shape {
            Shape::Cell(cell) => {
                p.rect_filled(cell.rect.translate(origin), 0.0, cell.fill);
                if cell.outlined {
                    outlined = Some(cell.rect);
                }
            }
            Shape::Swatch { rect, fill } => {
                p.rect_filled(rect.translate(origin), 0.0, *fill);
            }
            Shape::Line { points: [a, b] } => {
                p.line_segment([*a + origin, *b + origin], axis_stroke);
            }
            Shape::Label { pos, text, anchor } => {
                p.text(*pos + origin, *anchor, text, font.clone(), text_color);
            }
        }
    }

    // Outline last so neighbouring cells cannot cover it.
    if let Some(rect) = outlined {
        painter.rect_stroke(
            rect.translate(origin),
            0.0,
            Stroke::new(2.0, Color32::BLACK),
            StrokeKind::Middle,
        );
    }
}

// ---------------------------------------------------------------------------
// Tooltip
// ---------------------------------------------------------------------------

fn tooltip_overlay(ctx: &egui::Context, tooltip: &TooltipState) {
    if !tooltip.visible {
        return;
    }
    egui::Area::new(egui::Id::new("heat_map_tooltip"))
        .fixed_pos(tooltip.position)
        .order(egui::Order::Tooltip)
        .interactable(false)
        .show(ctx, |ui: &mut Ui| {
            egui::Frame::new()
                .fill(Color32::LIGHT_GRAY.gamma_multiply(0.9))
                .stroke(Stroke::new(1.0, Color32::BLACK))
                .corner_radius(5.0)
                .inner_margin(5.0)
                .show(ui, |ui: &mut Ui| {
                    for line in tooltip.lines() {
                        ui.label(RichText::new(line).color(Color32::BLACK));
                    }
                });
        });
}
