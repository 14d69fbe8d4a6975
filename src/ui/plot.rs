use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

// ---------------------------------------------------------------------------
// Signal plot
// ---------------------------------------------------------------------------

/// How one signal line is drawn.
pub struct SignalStyle<'a> {
    pub title: &'a str,
    pub color: Color32,
    /// Shade the area between the line and zero.
    pub filled: bool,
}

/// Plot feature values against their 1-based field position (X1 at x = 1).
pub fn signal_plot(ui: &mut Ui, id: &str, values: &[f64], style: SignalStyle<'_>) {
    let points: PlotPoints = values
        .iter()
        .enumerate()
        .map(|(i, &v)| [(i + 1) as f64, v])
        .collect();

    let mut line = Line::new(points)
        .name(style.title)
        .color(style.color)
        .width(2.0);
    if style.filled {
        line = line.fill(0.0);
    }

    Plot::new(id)
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label("Feature (X1..X178)")
        .y_axis_label("Amplitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(line);
        });
}
