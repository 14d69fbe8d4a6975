use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::JoinHandle;

use eframe::egui;
use rand::Rng;

use crate::data::label::LabelTable;
use crate::data::loader::{load_file, LoadError};
use crate::data::lookup::{lookup_by_id, lookup_by_vector, VectorMatch};
use crate::data::model::{feature_name, Dataset, FeatureVector, Row, FEATURE_COUNT};
use crate::data::project::{parse_float, project, to_number};

// ---------------------------------------------------------------------------
// Dataset handle – one background load per view activation
// ---------------------------------------------------------------------------

/// The dataset owned by a view. Empty until the background load completes,
/// and stays empty if it fails.
pub struct DatasetHandle {
    path: PathBuf,
    dataset: Dataset,
    pending: Option<Receiver<LoadResult>>,
    error: Option<String>,
}

impl DatasetHandle {
    /// Start loading `path` on a worker thread. `ctx` is repainted when the
    /// result is ready so the view picks it up without user input.
    pub fn spawn(path: PathBuf, ctx: &egui::Context) -> Self {
        match start_loader(path.clone(), ctx.clone()) {
            Ok((rx, _worker)) => Self {
                path,
                dataset: Dataset::default(),
                pending: Some(rx),
                error: None,
            },
            Err(e) => {
                log::error!("Failed to start dataset loader: {e}");
                Self {
                    path,
                    dataset: Dataset::default(),
                    pending: None,
                    error: Some(format!("Error: {e}")),
                }
            }
        }
    }

    /// A handle over an already loaded dataset.
    #[cfg(test)]
    pub fn ready(path: PathBuf, dataset: Dataset) -> Self {
        Self {
            path,
            dataset,
            pending: None,
            error: None,
        }
    }

    /// Collect the load result if it has arrived.
    pub fn poll(&mut self) {
        let result = match &self.pending {
            Some(rx) => rx.try_recv(),
            None => return,
        };
        match result {
            Ok(Ok(dataset)) => {
                log::info!(
                    "Loaded {} EEG rows from {}",
                    dataset.len(),
                    self.path.display()
                );
                self.dataset = dataset;
                self.pending = None;
            }
            Ok(Err(e)) => {
                log::error!("Failed to load EEG data from {}: {e}", self.path.display());
                self.error = Some(format!("Error: {e}"));
                self.pending = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::error!("Dataset loader for {} exited without a result", self.path.display());
                self.error = Some("Error: dataset loader stopped".into());
                self.pending = None;
            }
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

type LoadResult = Result<Dataset, LoadError>;

/// Spawn the loader thread. The worker is detached by callers; the result is
/// dropped if the receiver is gone by the time loading finishes.
fn start_loader(
    path: PathBuf,
    ctx: egui::Context,
) -> std::io::Result<(Receiver<LoadResult>, JoinHandle<()>)> {
    let (tx, rx) = mpsc::channel();
    let worker = std::thread::Builder::new()
        .name("dataset-loader".into())
        .spawn(move || {
            let result = load_file(&path);
            match tx.send(result) {
                Ok(()) => ctx.request_repaint(),
                Err(_) => log::debug!("View closed before {} finished loading", path.display()),
            }
        })?;
    Ok((rx, worker))
}

// ---------------------------------------------------------------------------
// Prediction outcome
// ---------------------------------------------------------------------------

/// What a predict action produced, before it is turned into view text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Label(i64),
    NotFound,
    NoValues,
}

impl From<VectorMatch<'_>> for Outcome {
    fn from(m: VectorMatch<'_>) -> Self {
        match m {
            VectorMatch::Found(row) => Outcome::Label(row.label),
            VectorMatch::NotFound => Outcome::NotFound,
            VectorMatch::NoValuesSupplied => Outcome::NoValues,
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup view state
// ---------------------------------------------------------------------------

/// Identifier lookup: select a row by id, plot it, match its vector.
pub struct LookupViewState {
    pub data: DatasetHandle,
    pub id_input: String,
    pub selected: Option<Row>,
    pub points: FeatureVector,
    pub show_values: bool,
    pub outcome: Option<Outcome>,
}

impl LookupViewState {
    pub const TABLE: LabelTable = LabelTable::SeizureType;

    pub fn new(data: DatasetHandle) -> Self {
        Self {
            data,
            id_input: String::new(),
            selected: None,
            points: FeatureVector::default(),
            show_values: false,
            outcome: None,
        }
    }

    /// Select the row whose identifier equals the current input. Any previous
    /// selection, value display and prediction are reset either way.
    pub fn select_current(&mut self) {
        self.show_values = false;
        self.outcome = None;
        match lookup_by_id(self.data.dataset(), &self.id_input) {
            Some(row) => {
                self.points = project(row);
                self.selected = Some(row.clone());
            }
            None => {
                log::warn!("Row not found for value: {:?}", self.id_input);
                self.selected = None;
                self.points = FeatureVector::default();
            }
        }
    }

    /// Collect a pending load; an id typed while loading is looked up once
    /// the rows arrive.
    pub fn poll_data(&mut self) {
        let was_loading = self.data.is_loading();
        self.data.poll();
        if was_loading && !self.data.is_loading() && !self.id_input.is_empty() {
            self.select_current();
        }
    }

    pub fn toggle_values(&mut self) {
        self.show_values = !self.show_values;
    }

    /// Match the plotted vector against the dataset.
    pub fn predict(&mut self) {
        self.outcome = Some(lookup_by_vector(self.data.dataset(), &self.points).into());
    }

    pub fn prediction_text(&self) -> Option<&'static str> {
        self.outcome.map(|o| match o {
            Outcome::Label(code) => Self::TABLE.resolve(code),
            Outcome::NotFound => "No match found. Unable to predict.",
            Outcome::NoValues => "No values selected for prediction.",
        })
    }
}

// ---------------------------------------------------------------------------
// Manual view state
// ---------------------------------------------------------------------------

/// Manual entry: one text field per feature, auto-fill from a random row.
pub struct ManualViewState {
    pub data: DatasetHandle,
    pub inputs: Vec<String>,
    pub graph: Vec<f64>,
    pub outcome: Option<Outcome>,
    pub status: Option<String>,
}

impl ManualViewState {
    pub const TABLE: LabelTable = LabelTable::ClinicalState;

    pub fn new(data: DatasetHandle) -> Self {
        Self {
            data,
            inputs: vec![String::new(); FEATURE_COUNT],
            graph: Vec::new(),
            outcome: None,
            status: None,
        }
    }

    pub fn set_field(&mut self, index: usize, value: String) {
        if let Some(slot) = self.inputs.get_mut(index) {
            *slot = value;
        }
    }

    /// Seed every field from a uniformly chosen row and show its label.
    /// Returns `false` (and changes nothing) while the dataset is empty.
    pub fn auto_fill<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let dataset = self.data.dataset();
        if dataset.is_empty() {
            log::warn!("Auto-fill requested but dataset not loaded");
            self.status = Some("Dataset not loaded".into());
            return false;
        }

        let index = rng.random_range(0..dataset.len());
        let row = &dataset.rows()[index];
        log::debug!("Auto-fill picked row {index} ({})", row.id);

        let values: Vec<String> = (1..=FEATURE_COUNT)
            .map(|n| {
                let v = row.feature(&feature_name(n)).map_or(f64::NAN, to_number);
                if v.is_finite() {
                    format!("{v:.2}")
                } else {
                    "0".to_string()
                }
            })
            .collect();

        self.graph = values.iter().map(|s| parse_float(s)).collect();
        self.outcome = Some(Outcome::Label(row.label));
        self.inputs = values;
        self.status = None;
        true
    }

    /// Match the entered values against the dataset. All-blank input counts
    /// as no values supplied.
    pub fn predict_entered(&mut self) {
        let query = if self.inputs.iter().all(|s| s.trim().is_empty()) {
            FeatureVector::default()
        } else {
            FeatureVector(self.inputs.iter().map(|s| parse_float(s)).collect())
        };
        self.outcome = Some(lookup_by_vector(self.data.dataset(), &query).into());
        if !query.is_empty() {
            self.graph = query.0;
        }
    }

    pub fn prediction_text(&self) -> Option<&'static str> {
        self.outcome.map(|o| match o {
            Outcome::Label(code) => Self::TABLE.resolve(code),
            Outcome::NotFound => Self::TABLE.fallback(),
            Outcome::NoValues => "No values supplied for prediction.",
        })
    }
}
