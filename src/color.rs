use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Inferno colour ramp
// ---------------------------------------------------------------------------

/// Inferno control points at t = 0.0, 0.1, …, 1.0 (dark → bright).
const INFERNO_STOPS: [[u8; 3]; 11] = [
    [0x00, 0x00, 0x04],
    [0x16, 0x0b, 0x39],
    [0x42, 0x0a, 0x68],
    [0x6a, 0x17, 0x6e],
    [0x93, 0x26, 0x67],
    [0xbc, 0x37, 0x54],
    [0xdd, 0x51, 0x3a],
    [0xf3, 0x78, 0x19],
    [0xfc, 0xa5, 0x0a],
    [0xf6, 0xd7, 0x46],
    [0xfc, 0xff, 0xa4],
];

/// Sample the inferno ramp at `t` in `[0, 1]`. Values outside are clamped;
/// NaN maps to the dark end.
pub fn inferno(t: f64) -> Color32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let segments = (INFERNO_STOPS.len() - 1) as f64;
    let scaled = t * segments;
    let i = (scaled.floor() as usize).min(INFERNO_STOPS.len() - 2);
    let frac = (scaled - i as f64) as f32;

    if frac <= 0.0 {
        return stop_color(i);
    }
    if frac >= 1.0 {
        return stop_color(i + 1);
    }

    // Mix in linear light so the ramp stays perceptually smooth.
    let mixed: LinSrgb = stop_linear(i).mix(stop_linear(i + 1), frac);
    let rgb: Srgb<u8> = Srgb::from_linear(mixed);
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

fn stop_color(i: usize) -> Color32 {
    let [r, g, b] = INFERNO_STOPS[i];
    Color32::from_rgb(r, g, b)
}

fn stop_linear(i: usize) -> LinSrgb {
    let [r, g, b] = INFERNO_STOPS[i];
    Srgb::new(r, g, b).into_linear()
}

/// `#rrggbb` for SVG output.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luminance(color: Color32) -> f32 {
        let lin: LinSrgb = Srgb::new(color.r(), color.g(), color.b()).into_linear();
        0.2126 * lin.red + 0.7152 * lin.green + 0.0722 * lin.blue
    }

    #[test]
    fn extremes_are_ramp_ends() {
        assert_eq!(inferno(0.0), Color32::from_rgb(0x00, 0x00, 0x04));
        assert_eq!(inferno(1.0), Color32::from_rgb(0xfc, 0xff, 0xa4));
    }

    #[test]
    fn out_of_range_clamps() {
        assert_eq!(inferno(-3.0), inferno(0.0));
        assert_eq!(inferno(7.0), inferno(1.0));
        assert_eq!(inferno(f64::NAN), inferno(0.0));
    }

    #[test]
    fn ramp_brightens() {
        let mut prev = luminance(inferno(0.0));
        for i in 1..=20 {
            let l = luminance(inferno(i as f64 / 20.0));
            assert!(l >= prev - 1e-3, "luminance dropped at step {i}");
            prev = l;
        }
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(to_hex(Color32::from_rgb(0xfc, 0xff, 0xa4)), "#fcffa4");
        assert_eq!(to_hex(inferno(0.0)), "#000004");
    }
}
