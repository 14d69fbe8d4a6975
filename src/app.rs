use std::path::PathBuf;

use eframe::egui;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::{Cli, View};
use crate::state::{DatasetHandle, LookupViewState, ManualViewState};
use crate::ui::{panels, UiAction};

// ---------------------------------------------------------------------------
// Active view
// ---------------------------------------------------------------------------

/// The view currently on screen. Each variant owns its dataset; leaving a
/// view drops it together with any load still in flight.
pub enum ActiveView {
    Lookup(LookupViewState),
    Manual(ManualViewState),
}

impl ActiveView {
    /// Activate `view`, starting a fresh load of `path`.
    fn activate(view: View, path: PathBuf, ctx: &egui::Context) -> Self {
        log::info!("Activating {view:?} view with dataset {}", path.display());
        let data = DatasetHandle::spawn(path, ctx);
        match view {
            View::Lookup => ActiveView::Lookup(LookupViewState::new(data)),
            View::Manual => ActiveView::Manual(ManualViewState::new(data)),
        }
    }

    fn kind(&self) -> View {
        match self {
            ActiveView::Lookup(_) => View::Lookup,
            ActiveView::Manual(_) => View::Manual,
        }
    }

    fn data(&self) -> &DatasetHandle {
        match self {
            ActiveView::Lookup(s) => &s.data,
            ActiveView::Manual(s) => &s.data,
        }
    }

    fn poll(&mut self) {
        match self {
            ActiveView::Lookup(s) => s.poll_data(),
            ActiveView::Manual(s) => s.data.poll(),
        }
    }
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EegLensApp {
    dataset_path: PathBuf,
    view: ActiveView,
    rng: SmallRng,
}

impl EegLensApp {
    pub fn new(cc: &eframe::CreationContext<'_>, cli: Cli) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let rng = match cli.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        Self {
            view: ActiveView::activate(cli.view, cli.dataset.clone(), &cc.egui_ctx),
            dataset_path: cli.dataset,
            rng,
        }
    }

    fn apply(&mut self, action: UiAction, ctx: &egui::Context) {
        let target = match action {
            UiAction::Navigate(view) => view,
            UiAction::OpenDataset(path) => {
                self.dataset_path = path;
                self.view.kind()
            }
        };
        self.view = ActiveView::activate(target, self.dataset_path.clone(), ctx);
    }
}

impl eframe::App for EegLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.view.poll();

        let mut action = None;

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            action = panels::top_bar(ui, self.view.kind(), self.view.data());
        });

        // ---- Central panel: active view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("view_scroll")
                .show(ui, |ui| {
                    let requested = match &mut self.view {
                        ActiveView::Lookup(state) => panels::lookup_view(ui, state),
                        ActiveView::Manual(state) => {
                            panels::manual_view(ui, state, &mut self.rng)
                        }
                    };
                    if requested.is_some() {
                        action = requested;
                    }
                });
        });

        if let Some(action) = action {
            self.apply(action, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::data::lookup::lookup_by_id;

    fn write_subset(dir: &std::path::Path, name: &str, ids: &[&str]) -> PathBuf {
        let rows: Vec<String> = ids
            .iter()
            .map(|id| format!(r#"{{"Unnamed": "{id}", "X1": "1", "X2": "2", "y": 4}}"#))
            .collect();
        let path = dir.join(name);
        std::fs::write(&path, format!("[{}]", rows.join(","))).unwrap();
        path
    }

    fn settle(view: &mut ActiveView) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while view.data().is_loading() && Instant::now() < deadline {
            view.poll();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(!view.data().is_loading(), "dataset load did not finish");
    }

    fn app_over(view: View, path: PathBuf, ctx: &egui::Context) -> EegLensApp {
        EegLensApp {
            view: ActiveView::activate(view, path.clone(), ctx),
            dataset_path: path,
            rng: SmallRng::seed_from_u64(7),
        }
    }

    #[test]
    fn test_open_dataset_replaces_rows_with_fresh_load() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_subset(dir.path(), "a.json", &["a1", "a2", "a3"]);
        let second = write_subset(dir.path(), "b.json", &["b1"]);
        let ctx = egui::Context::default();

        let mut app = app_over(View::Lookup, first, &ctx);
        settle(&mut app.view);
        assert_eq!(app.view.data().dataset().len(), 3);

        app.apply(UiAction::OpenDataset(second.clone()), &ctx);
        assert_eq!(app.view.kind(), View::Lookup);
        assert_eq!(app.dataset_path, second);
        assert!(app.view.data().is_loading());
        assert!(app.view.data().dataset().is_empty());

        settle(&mut app.view);
        let rows = app.view.data().dataset();
        assert_eq!(rows.len(), 1);
        assert!(lookup_by_id(rows, "b1").is_some());
        assert!(lookup_by_id(rows, "a1").is_none());
    }

    #[test]
    fn test_navigate_starts_new_view_over_same_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_subset(dir.path(), "a.json", &["a1", "a2"]);
        let ctx = egui::Context::default();

        let mut app = app_over(View::Lookup, path.clone(), &ctx);
        settle(&mut app.view);
        if let ActiveView::Lookup(state) = &mut app.view {
            state.id_input = "a2".into();
            state.select_current();
            assert!(state.selected.is_some());
        }

        app.apply(UiAction::Navigate(View::Manual), &ctx);
        assert_eq!(app.view.kind(), View::Manual);
        assert_eq!(app.view.data().path(), path.as_path());
        assert!(app.view.data().is_loading());

        app.apply(UiAction::Navigate(View::Lookup), &ctx);
        settle(&mut app.view);
        match &app.view {
            ActiveView::Lookup(state) => {
                assert!(state.id_input.is_empty());
                assert!(state.selected.is_none());
                assert_eq!(state.data.dataset().len(), 2);
            }
            ActiveView::Manual(_) => panic!("expected the lookup view"),
        }
    }

    #[test]
    fn test_leaving_view_mid_load_discards_late_result() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_subset(dir.path(), "a.json", &["a1"]);
        let second = write_subset(dir.path(), "b.json", &["b1", "b2"]);
        let ctx = egui::Context::default();

        let mut app = app_over(View::Manual, first, &ctx);
        app.apply(UiAction::OpenDataset(second), &ctx);
        settle(&mut app.view);

        let rows = app.view.data().dataset();
        assert_eq!(rows.len(), 2);
        assert!(lookup_by_id(rows, "a1").is_none());
        assert!(app.view.data().error().is_none());
    }
}
