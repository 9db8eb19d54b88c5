use eframe::egui::{pos2, vec2, Align2, Color32, Pos2, Rect, Vec2};

use crate::config::ChartConfig;
use crate::data::model::Dataset;
use crate::scale::ScaleSet;
use crate::tooltip::{fixed1, month_name};

// ---------------------------------------------------------------------------
// Scene elements
// ---------------------------------------------------------------------------

/// Which part of the chart an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Cells,
    XAxis,
    YAxis,
    Legend,
}

/// One heat map rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Index into `Dataset::records`.
    pub record: usize,
    pub rect: Rect,
    pub fill: Color32,
    pub outlined: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Cell(Cell),
    Swatch { rect: Rect, fill: Color32 },
    Line { points: [Pos2; 2] },
    Label {
        pos: Pos2,
        text: String,
        anchor: Align2,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub group: Group,
    pub shape: Shape,
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Retained drawing of the chart in scene coordinates (origin at the top-left
/// of the chart's outer box). Painted by the UI and serialised by the SVG
/// exporter.
#[derive(Debug, Clone)]
pub struct Scene {
    elements: Vec<Element>,
    size: Vec2,
    legend_clip: Rect,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            size: Vec2::ZERO,
            legend_clip: Rect::NOTHING,
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.size = Vec2::ZERO;
        self.legend_clip = Rect::NOTHING;
    }

    /// Redraw from scratch. Anything drawn by an earlier call is discarded.
    pub fn render(&mut self, dataset: &Dataset, scales: &ScaleSet, config: &ChartConfig) {
        self.clear();
        let [width, height] = config.scene_size();
        self.size = vec2(width, height);

        self.draw_cells(dataset, scales, config);
        self.draw_x_axis(scales, config);
        self.draw_y_axis(scales, config);
        self.draw_legend(scales, config);

        log::debug!(
            "Scene rendered: {} elements for {} records",
            self.elements.len(),
            dataset.len()
        );
    }

    fn push(&mut self, group: Group, shape: Shape) {
        self.elements.push(Element { group, shape });
    }

    fn draw_cells(&mut self, dataset: &Dataset, scales: &ScaleSet, config: &ChartConfig) {
        let origin = vec2(config.margin.left, config.margin.top);
        let size = vec2(
            scales.year_to_x.bandwidth() + config.cell_overlap[0],
            scales.month_to_y.bandwidth() + config.cell_overlap[1],
        );

        for (i, record) in dataset.records.iter().enumerate() {
            let (Some(x), Some(y)) = (
                scales.year_to_x.apply(record.year),
                scales.month_to_y.apply(record.month),
            ) else {
                continue;
            };
            let rect = Rect::from_min_size(pos2(x, y) + origin, size);
            let fill = scales.temperature_to_color.apply(record.temperature);
            self.push(
                Group::Cells,
                Shape::Cell(Cell {
                    record: i,
                    rect,
                    fill,
                    outlined: false,
                }),
            );
        }
    }

    /// Domain line with outer ticks, drawn horizontally (ticks pointing down)
    /// or vertically (ticks pointing left).
    fn draw_domain(&mut self, group: Group, from: Pos2, to: Pos2, tick: Vec2) {
        for points in [[from + tick, from], [from, to], [to, to + tick]] {
            self.push(group, Shape::Line { points });
        }
    }

    fn draw_x_axis(&mut self, scales: &ScaleSet, config: &ChartConfig) {
        let x_scale = &scales.year_to_x;
        let y = config.margin.top + config.chart_height();
        let [r0, r1] = x_scale.range();
        let left = config.margin.left;
        self.draw_domain(
            Group::XAxis,
            pos2(left + r0, y),
            pos2(left + r1, y),
            vec2(0.0, config.tick_size),
        );

        for &year in x_scale.domain().iter().filter(|year| *year % 10 == 0) {
            let Some(cx) = x_scale.center(year) else {
                continue;
            };
            let x = left + cx;
            self.push(
                Group::XAxis,
                Shape::Line {
                    points: [pos2(x, y), pos2(x, y + config.tick_size)],
                },
            );
            self.push(
                Group::XAxis,
                Shape::Label {
                    pos: pos2(x, y + config.tick_size + config.tick_padding),
                    text: year.to_string(),
                    anchor: Align2::CENTER_TOP,
                },
            );
        }
    }

    fn draw_y_axis(&mut self, scales: &ScaleSet, config: &ChartConfig) {
        let y_scale = &scales.month_to_y;
        let x = config.margin.left;
        let top = config.margin.top;
        let [r0, r1] = y_scale.range();
        self.draw_domain(
            Group::YAxis,
            pos2(x, top + r1.min(r0)),
            pos2(x, top + r1.max(r0)),
            vec2(-config.tick_size, 0.0),
        );

        for &month in y_scale.domain() {
            let Some(cy) = y_scale.center(month) else {
                continue;
            };
            let y = top + cy;
            self.push(
                Group::YAxis,
                Shape::Line {
                    points: [pos2(x - config.tick_size, y), pos2(x, y)],
                },
            );
            self.push(
                Group::YAxis,
                Shape::Label {
                    pos: pos2(x - config.tick_size - config.tick_padding, y),
                    text: month_name(month).to_string(),
                    anchor: Align2::RIGHT_CENTER,
                },
            );
        }
    }

    fn draw_legend(&mut self, scales: &ScaleSet, config: &ChartConfig) {
        let top = config.legend_top();
        self.legend_clip = Rect::from_min_size(
            pos2(0.0, top),
            vec2(config.chart_width(), config.legend_height + 20.0),
        );

        let color = &scales.temperature_to_color;
        let ticks = color.ticks(config.color_tick_count);
        if ticks.is_empty() {
            return;
        }

        let swatch_width = config.legend_width / ticks.len() as f32;
        for (i, &t) in ticks.iter().enumerate() {
            self.push(
                Group::Legend,
                Shape::Swatch {
                    rect: Rect::from_min_size(
                        pos2(i as f32 * swatch_width, top),
                        vec2(swatch_width, config.legend_height),
                    ),
                    fill: color.apply(t),
                },
            );
        }

        // The axis is placed by the fixed legend scale, not by swatch index.
        let legend_x = &scales.temperature_to_legend_x;
        let axis_y = top + config.legend_height;
        self.draw_domain(
            Group::Legend,
            pos2(legend_x.range[0], axis_y),
            pos2(legend_x.range[1], axis_y),
            vec2(0.0, config.legend_tick_size),
        );
        for &t in &ticks {
            let x = legend_x.apply(t);
            self.push(
                Group::Legend,
                Shape::Line {
                    points: [pos2(x, axis_y), pos2(x, axis_y + config.legend_tick_size)],
                },
            );
            self.push(
                Group::Legend,
                Shape::Label {
                    pos: pos2(x, axis_y + config.legend_tick_size + config.tick_padding),
                    text: fixed1(t),
                    anchor: Align2::CENTER_TOP,
                },
            );
        }
    }

    // -- Queries --

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Box the legend is clipped to.
    pub fn legend_clip(&self) -> Rect {
        self.legend_clip
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.elements.iter().filter_map(|e| match &e.shape {
            Shape::Cell(cell) => Some(cell),
            _ => None,
        })
    }

    /// Cell stored at element index `id`.
    pub fn cell(&self, id: usize) -> Option<&Cell> {
        match &self.elements.get(id)?.shape {
            Shape::Cell(cell) => Some(cell),
            _ => None,
        }
    }

    /// Element index of the topmost cell under `pos`. Later cells are drawn
    /// over earlier ones where they overlap.
    pub fn cell_at(&self, pos: Pos2) -> Option<usize> {
        self.elements
            .iter()
            .enumerate()
            .rev()
            .find_map(|(id, e)| match &e.shape {
                Shape::Cell(cell) if cell.rect.contains(pos) => Some(id),
                _ => None,
            })
    }

    pub fn set_outlined(&mut self, id: usize, outlined: bool) {
        if let Some(Element {
            shape: Shape::Cell(cell),
            ..
        }) = self.elements.get_mut(id)
        {
            cell.outlined = outlined;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::VarianceRecord;

    fn dataset() -> Dataset {
        let mut records = Vec::new();
        for year in 1753..=1775 {
            for month in 0..12u8 {
                let variance = (year - 1753) as f64 * 0.2 + month as f64 * 0.3 - 3.0;
                records.push(VarianceRecord {
                    year,
                    month,
                    variance,
                    temperature: 8.66 + variance,
                });
            }
        }
        Dataset {
            base_temperature: 8.66,
            records,
        }
    }

    fn rendered() -> (Dataset, ScaleSet, ChartConfig, Scene) {
        let ds = dataset();
        let cfg = ChartConfig::default();
        let scales = ScaleSet::build(&ds, &cfg).unwrap();
        let mut scene = Scene::new();
        scene.render(&ds, &scales, &cfg);
        (ds, scales, cfg, scene)
    }

    fn labels(scene: &Scene, group: Group) -> Vec<String> {
        scene
            .elements()
            .iter()
            .filter(|e| e.group == group)
            .filter_map(|e| match &e.shape {
                Shape::Label { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn one_cell_per_record() {
        let (ds, _, _, scene) = rendered();
        assert_eq!(scene.cells().count(), ds.len());
        for (i, cell) in scene.cells().enumerate() {
            assert_eq!(cell.record, i);
            assert!(!cell.outlined);
        }
    }

    #[test]
    fn rerender_does_not_accumulate() {
        let (ds, scales, cfg, mut scene) = rendered();
        let once = scene.elements().len();
        scene.render(&ds, &scales, &cfg);
        assert_eq!(scene.elements().len(), once);
        assert_eq!(scene.cells().count(), ds.len());
    }

    #[test]
    fn cell_geometry_follows_scales() {
        let (ds, scales, cfg, scene) = rendered();
        let bw = scales.year_to_x.bandwidth();
        let bh = scales.month_to_y.bandwidth();

        let first = scene.cells().next().unwrap();
        assert_eq!(ds.records[first.record].month, 0);
        assert_eq!(first.rect.min, pos2(cfg.margin.left, cfg.margin.top));
        assert!((first.rect.width() - (bw + 0.6)).abs() < 1e-4);
        assert!((first.rect.height() - (bh + 0.5)).abs() < 1e-4);

        let dec = scene.cells().nth(11).unwrap();
        assert_eq!(ds.records[dec.record].month, 11);
        assert!((dec.rect.min.y - (cfg.margin.top + 11.0 * bh)).abs() < 1e-4);

        let rec = &ds.records[first.record];
        assert_eq!(first.fill, scales.temperature_to_color.apply(rec.temperature));
    }

    #[test]
    fn x_axis_labels_only_decades() {
        let (_, _, _, scene) = rendered();
        assert_eq!(labels(&scene, Group::XAxis), vec!["1760", "1770"]);
    }

    #[test]
    fn y_axis_labels_are_month_names() {
        let (_, _, _, scene) = rendered();
        let months = labels(&scene, Group::YAxis);
        assert_eq!(months.len(), 12);
        assert!(months.contains(&"January".to_string()));
        assert!(months.contains(&"December".to_string()));
    }

    #[test]
    fn legend_has_one_swatch_per_color_tick() {
        let (_, scales, cfg, scene) = rendered();
        let ticks = scales.temperature_to_color.ticks(cfg.color_tick_count);
        let swatches: Vec<(Rect, Color32)> = scene
            .elements()
            .iter()
            .filter_map(|e| match e.shape {
                Shape::Swatch { rect, fill } => Some((rect, fill)),
                _ => None,
            })
            .collect();
        assert_eq!(swatches.len(), ticks.len());
        let w = cfg.legend_width / ticks.len() as f32;
        for (i, ((rect, fill), t)) in swatches.iter().zip(&ticks).enumerate() {
            assert!((rect.min.x - i as f32 * w).abs() < 1e-3);
            assert_eq!(*fill, scales.temperature_to_color.apply(*t));
        }

        let expected: Vec<String> = ticks.iter().map(|&t| fixed1(t)).collect();
        assert_eq!(labels(&scene, Group::Legend), expected);
    }

    #[test]
    fn hit_testing_and_outline() {
        let (_, _, cfg, mut scene) = rendered();
        let first = scene.cells().next().unwrap().rect;
        let id = scene.cell_at(first.center()).unwrap();
        assert_eq!(scene.cell(id).unwrap().record, 0);

        assert!(scene.cell_at(pos2(1.0, 1.0)).is_none());
        assert!(scene.cell_at(pos2(cfg.margin.left + 1.0, 480.0)).is_none());

        scene.set_outlined(id, true);
        assert!(scene.cell(id).unwrap().outlined);
        scene.set_outlined(id, false);
        assert!(!scene.cell(id).unwrap().outlined);
    }

    #[test]
    fn overlapping_edge_picks_later_cell() {
        let (_, _, _, scene) = rendered();
        let jan = scene.cells().next().unwrap().rect;
        // Inside January's overlap strip, which February covers.
        let probe = pos2(jan.center().x, jan.max.y - 0.2);
        let id = scene.cell_at(probe).unwrap();
        assert_eq!(scene.cell(id).unwrap().record, 1);
    }

    #[test]
    fn clear_empties_scene() {
        let (_, _, _, mut scene) = rendered();
        assert!(!scene.is_empty());
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.cells().count(), 0);
    }
}
