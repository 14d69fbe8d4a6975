use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Signal colours
// ---------------------------------------------------------------------------

/// Line colour of the lookup view's plot.
pub const LOOKUP_SIGNAL: Color32 = Color32::from_rgb(0x00, 0xb4, 0xd8);
/// Highlight for results that read as an alert.
pub const ALERT: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);
/// Highlight for results that read as calm.
pub const CALM: Color32 = Color32::from_rgb(0x16, 0xa3, 0x4a);

/// Scale the HSL lightness of `base` by `factor` (clamped to `0..=1`).
pub fn shade(base: Color32, factor: f32) -> Color32 {
    let rgb = Srgb::new(
        base.r() as f32 / 255.0,
        base.g() as f32 / 255.0,
        base.b() as f32 / 255.0,
    );
    let mut hsl: Hsl = rgb.into_color();
    hsl.lightness = (hsl.lightness * factor).clamp(0.0, 1.0);
    let out: Srgb = hsl.into_color();
    Color32::from_rgb(
        (out.red * 255.0).round() as u8,
        (out.green * 255.0).round() as u8,
        (out.blue * 255.0).round() as u8,
    )
}

/// Background for a prediction banner drawn in `base`.
pub fn banner_fill(base: Color32) -> Color32 {
    shade(base, 0.55)
}
