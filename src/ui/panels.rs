use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};
use rand::Rng;

use super::plot::{signal_plot, SignalStyle};
use super::UiAction;
use crate::color;
use crate::config::View;
use crate::data::model::{feature_name, FEATURE_COUNT};
use crate::state::{DatasetHandle, LookupViewState, ManualViewState, Outcome};

/// Input fields per row of the manual entry grid.
const FIELD_COLUMNS: usize = 3;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, current: View, data: &DatasetHandle) -> Option<UiAction> {
    let mut action = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                action = open_file_dialog().map(UiAction::OpenDataset);
                ui.close_menu();
            }
        });

        ui.menu_button("View", |ui: &mut Ui| {
            for (view, label) in [(View::Manual, "Input Mode"), (View::Lookup, "Graph Mode")] {
                if ui.selectable_label(current == view, label).clicked() {
                    action = Some(UiAction::Navigate(view));
                    ui.close_menu();
                }
            }
        });

        ui.separator();

        if data.is_loading() {
            ui.spinner();
            ui.label(format!("Loading {}…", data.path().display()));
        } else if let Some(msg) = data.error() {
            ui.label(RichText::new(msg).color(Color32::RED));
        } else {
            ui.label(format!(
                "{} rows loaded from {}",
                data.dataset().len(),
                data.path().display()
            ));
        }
    });

    action
}

// ---------------------------------------------------------------------------
// Lookup view
// ---------------------------------------------------------------------------

/// Identifier entry, signal plot, value display and vector match.
pub fn lookup_view(ui: &mut Ui, state: &mut LookupViewState) -> Option<UiAction> {
    let mut action = None;

    ui.heading("EEG Graph Point Selection");
    ui.add_space(8.0);

    if ui.button("Back to Input Mode").clicked() {
        action = Some(UiAction::Navigate(View::Manual));
    }
    ui.add_space(8.0);

    let response = ui.add(
        TextEdit::singleline(&mut state.id_input)
            .hint_text("Enter Unnamed Value (e.g., X21.V1.79)")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        state.select_current();
    }

    if !state.points.is_empty() {
        ui.add_space(12.0);
        ui.strong("EEG Signal Graph");
        signal_plot(
            ui,
            "lookup_signal",
            state.points.values(),
            SignalStyle {
                title: "EEG Signal Values",
                color: color::LOOKUP_SIGNAL,
                filled: false,
            },
        );
    }

    if state.selected.is_some() {
        ui.add_space(8.0);
        ui.horizontal(|ui: &mut Ui| {
            let toggle = if state.show_values {
                "Hide Values"
            } else {
                "Extract Values"
            };
            if ui.button(toggle).clicked() {
                state.toggle_values();
            }
            if ui.button("Predict Seizure").clicked() {
                state.predict();
            }
        });
    }

    if let Some(text) = state.prediction_text() {
        ui.add_space(8.0);
        prediction_banner(ui, text, text.contains("Seizure"));
    }

    if let (true, Some(row)) = (state.show_values, &state.selected) {
        ui.add_space(8.0);
        ui.strong("Selected Row Values:");
        ScrollArea::vertical()
            .id_salt("row_values")
            .max_height(300.0)
            .show(ui, |ui: &mut Ui| {
                egui::Grid::new("row_values_grid")
                    .num_columns(4)
                    .striped(true)
                    .show(ui, |ui: &mut Ui| {
                        for (i, feature) in row.features.iter().enumerate() {
                            ui.label(format!("{}: {}", feature.name, feature.value));
                            if i % 4 == 3 {
                                ui.end_row();
                            }
                        }
                    });
            });
    }

    action
}

// ---------------------------------------------------------------------------
// Manual view
// ---------------------------------------------------------------------------

/// Per-feature entry grid, auto-fill, manual match and signal plot.
pub fn manual_view<R: Rng + ?Sized>(
    ui: &mut Ui,
    state: &mut ManualViewState,
    rng: &mut R,
) -> Option<UiAction> {
    let mut action = None;

    ui.heading("EEG Seizure Prediction");
    ui.add_space(8.0);

    let n_rows = FEATURE_COUNT.div_ceil(FIELD_COLUMNS);
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(true)
        .max_scroll_height(420.0)
        .columns(Column::remainder(), FIELD_COLUMNS)
        .body(|body| {
            body.rows(24.0, n_rows, |mut row| {
                let base = row.index() * FIELD_COLUMNS;
                for index in base..base + FIELD_COLUMNS {
                    row.col(|ui: &mut Ui| {
                        if index >= FEATURE_COUNT {
                            return;
                        }
                        let mut text = state.inputs[index].clone();
                        let edit = TextEdit::singleline(&mut text)
                            .hint_text(feature_name(index + 1))
                            .desired_width(f32::INFINITY);
                        if ui.add(edit).changed() {
                            state.set_field(index, text);
                        }
                    });
                }
            });
        });

    ui.add_space(8.0);
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Auto-Fill Demo").clicked() {
            state.auto_fill(&mut *rng);
        }
        if ui.button("Match Entered Values").clicked() {
            state.predict_entered();
        }
        if ui.button("Switch to Graph Mode").clicked() {
            action = Some(UiAction::Navigate(View::Lookup));
        }
    });

    if let Some(msg) = &state.status {
        ui.label(RichText::new(msg).color(Color32::YELLOW));
    }

    let alert = state.outcome == Some(Outcome::Label(1));
    let message = state.prediction_text();
    if let Some(text) = message {
        ui.add_space(8.0);
        prediction_banner(ui, text, alert);
    }

    ui.add_space(12.0);
    if state.graph.is_empty() {
        ui.label(
            RichText::new("Graph will display here after Auto-Fill.").color(Color32::YELLOW),
        );
    } else {
        let title = match message {
            Some(text) => format!("EEG Signal Visualization - {text}"),
            None => "EEG Signal".to_string(),
        };
        signal_plot(
            ui,
            "manual_signal",
            &state.graph,
            SignalStyle {
                title: &title,
                color: if alert { color::ALERT } else { color::CALM },
                filled: true,
            },
        );
    }

    action
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

fn prediction_banner(ui: &mut Ui, text: &str, alert: bool) {
    let base = if alert { color::ALERT } else { color::CALM };
    egui::Frame::group(ui.style())
        .fill(color::banner_fill(base))
        .show(ui, |ui: &mut Ui| {
            ui.label(
                RichText::new(format!("Prediction: {text}"))
                    .color(Color32::WHITE)
                    .strong()
                    .size(18.0),
            );
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open EEG dataset")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}
