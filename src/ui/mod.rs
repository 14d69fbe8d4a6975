use std::path::PathBuf;

use crate::config::View;

pub mod panels;
pub mod plot;

/// A request raised by a widget that the app applies after the frame.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Switch views; the target view loads the dataset afresh.
    Navigate(View),
    /// Replace the dataset file and re-activate the current view.
    OpenDataset(PathBuf),
}
