use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Browse an EEG sample dataset and look up the stored label of a row.
#[derive(Debug, Clone, Parser)]
#[command(name = "eeg-lens", version, about, long_about = None)]
pub struct Cli {
    /// Dataset file (.json, .csv or .parquet)
    #[arg(long, env = "EEG_LENS_DATASET", default_value = "public/eeg_subset_50.json")]
    pub dataset: PathBuf,

    /// View shown at start-up
    #[arg(long, value_enum, default_value_t = View::Manual)]
    pub view: View,

    /// Seed for the auto-fill row picker (random when omitted)
    #[arg(long, env = "EEG_LENS_SEED")]
    pub seed: Option<u64>,
}

/// The two navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Identifier lookup with signal plot and vector match.
    Lookup,
    /// 178 editable fields with auto-fill.
    Manual,
}
