use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{Align, Align2};

use crate::color::to_hex;
use crate::data::model::Dataset;
use crate::scene::{Group, Scene, Shape};

// ---------------------------------------------------------------------------
// SVG export
// ---------------------------------------------------------------------------

const GROUPS: [(Group, &str); 4] = [
    (Group::Cells, "cells"),
    (Group::XAxis, "x-axis"),
    (Group::YAxis, "y-axis"),
    (Group::Legend, "legend"),
];

/// Serialise `scene` as a standalone SVG document. Cell attributes carry the
/// record they were drawn from (`data-year`, zero-based `data-month`,
/// `data-temp`).
pub fn to_svg(scene: &Scene, dataset: &Dataset, title: &str) -> String {
    let size = scene.size();
    let mut out = String::new();

    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\" font-size=\"10\">",
        w = fmt_f32(size.x),
        h = fmt_f32(size.y),
    );
    let _ = write!(out, "<title>{}</title>", escape(title));

    let clip = scene.legend_clip();
    if clip.is_positive() {
        let _ = write!(
            out,
            "<defs><clipPath id=\"legend-clip\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/></clipPath></defs>",
            fmt_f32(clip.min.x),
            fmt_f32(clip.min.y),
            fmt_f32(clip.width()),
            fmt_f32(clip.height()),
        );
    }

    for (group, id) in GROUPS {
        if group == Group::Legend && clip.is_positive() {
            let _ = write!(out, "<g id=\"{id}\" clip-path=\"url(#legend-clip)\">");
        } else {
            let _ = write!(out, "<g id=\"{id}\">");
        }
        for element in scene.elements().iter().filter(|e| e.group == group) {
            write_shape(&mut out, &element.shape, dataset);
        }
        out.push_str("</g>");
    }

    out.push_str("</svg>\n");
    out
}

/// Write the SVG for `scene` to `path`.
pub fn write_svg(scene: &Scene, dataset: &Dataset, title: &str, path: &Path) -> Result<()> {
    std::fs::write(path, to_svg(scene, dataset, title))
        .with_context(|| format!("writing {}", path.display()))
}

fn write_shape(out: &mut String, shape: &Shape, dataset: &Dataset) {
    match shape {
        Shape::Cell(cell) => {
            let _ = write!(
                out,
                "<rect class=\"cell\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"",
                fmt_f32(cell.rect.min.x),
                fmt_f32(cell.rect.min.y),
                fmt_f32(cell.rect.width()),
                fmt_f32(cell.rect.height()),
                to_hex(cell.fill),
            );
            if let Some(record) = dataset.records.get(cell.record) {
                let _ = write!(
                    out,
                    " data-year=\"{}\" data-month=\"{}\" data-temp=\"{}\"",
                    record.year, record.month, record.temperature
                );
            }
            if cell.outlined {
                out.push_str(" stroke=\"black\" stroke-width=\"2\" shape-rendering=\"crispEdges\"");
            }
            out.push_str("/>");
        }
        Shape::Swatch { rect, fill } => {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                fmt_f32(rect.min.x),
                fmt_f32(rect.min.y),
                fmt_f32(rect.width()),
                fmt_f32(rect.height()),
                to_hex(*fill),
            );
        }
        Shape::Line { points: [a, b] } => {
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"black\"/>",
                fmt_f32(a.x),
                fmt_f32(a.y),
                fmt_f32(b.x),
                fmt_f32(b.y),
            );
        }
        Shape::Label { pos, text, anchor } => {
            let (text_anchor, baseline) = svg_anchor(*anchor);
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\" text-anchor=\"{text_anchor}\" dominant-baseline=\"{baseline}\">{}</text>",
                fmt_f32(pos.x),
                fmt_f32(pos.y),
                escape(text),
            );
        }
    }
}

fn svg_anchor(anchor: Align2) -> (&'static str, &'static str) {
    let x = match anchor.x() {
        Align::Min => "start",
        Align::Center => "middle",
        Align::Max => "end",
    };
    let y = match anchor.y() {
        Align::Min => "hanging",
        Align::Center => "central",
        Align::Max => "auto",
    };
    (x, y)
}

fn fmt_f32(v: f32) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        return format!("{}", v as i64);
    }
    let s = format!("{v:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
