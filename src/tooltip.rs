use chrono::Month;
use eframe::egui::{vec2, Pos2};

use crate::data::model::VarianceRecord;

// ---------------------------------------------------------------------------
// Month names
// ---------------------------------------------------------------------------

/// Full calendar name for a zero-based month index ("January" for 0).
/// Returns an empty string for indices past 11.
pub fn month_name(month: u8) -> &'static str {
    month
        .checked_add(1)
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("")
}

// ---------------------------------------------------------------------------
// Tooltip state
// ---------------------------------------------------------------------------

/// Pointer position at the time of an event, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pos: Pos2,
}

/// Hover tooltip. Changed only by [`TooltipState::on_pointer_enter`] and
/// [`TooltipState::on_pointer_leave`].
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    pub visible: bool,
    /// Lines separated by `<br>`.
    pub html: String,
    pub position: Pos2,
    pub year: String,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self {
            visible: false,
            html: String::new(),
            position: Pos2::ZERO,
            year: String::new(),
        }
    }
}

impl TooltipState {
    /// Show the tooltip for `record`, placed at the pointer plus `offset`.
    pub fn on_pointer_enter(
        &mut self,
        event: PointerEvent,
        record: &VarianceRecord,
        base_temperature: f64,
        offset: [f32; 2],
    ) {
        self.visible = true;
        self.html = tooltip_html(record, base_temperature);
        self.position = event.pos + vec2(offset[0], offset[1]);
        self.year = record.year.to_string();
    }

    /// Hide and clear.
    pub fn on_pointer_leave(&mut self) {
        *self = TooltipState::default();
    }

    /// The html content split into display lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.html.split("<br>").filter(|l| !l.is_empty())
    }
}

/// `"{year} - {Month}<br>{temperature}°C<br>{±difference from base}°C"`.
pub fn tooltip_html(record: &VarianceRecord, base_temperature: f64) -> String {
    format!(
        "{} - {}<br>{}°C<br>{}°C",
        record.year,
        month_name(record.month),
        fixed1(record.temperature),
        fixed1_signed(record.temperature - base_temperature),
    )
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// One decimal place, ties rounded away from zero (8.25 -> "8.3").
/// `{:.1}` alone would round 8.25 to "8.2".
pub fn fixed1(v: f64) -> String {
    let rounded = (v.abs() * 10.0).round() / 10.0;
    if v.is_sign_negative() && rounded != 0.0 {
        format!("-{rounded:.1}")
    } else {
        format!("{rounded:.1}")
    }
}

/// [`fixed1`] with an explicit sign. Values that round to zero read "+0.0".
pub fn fixed1_signed(v: f64) -> String {
    let text = fixed1(v);
    if text.starts_with('-') {
        text
    } else {
        format!("+{text}")
    }
}
