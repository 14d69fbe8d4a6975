/// Human-readable classification tables for the dataset's label codes.
///
/// The two views describe the same codes differently; each view resolves
/// through its own table and the two are not reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelTable {
    /// Lookup view: codes read as seizure types.
    SeizureType,
    /// Manual view: codes read as clinical states.
    ClinicalState,
}

impl LabelTable {
    pub fn resolve(self, code: i64) -> &'static str {
        match self {
            LabelTable::SeizureType => match code {
                1 => "Type A Seizure Detected",
                2 => "Type B Seizure Detected",
                3 => "Type C Seizure Detected",
                4 => "Type D Seizure Detected",
                5 => "Normal Activity",
                _ => "Unknown Type",
            },
            LabelTable::ClinicalState => match code {
                1 => "No Seizure - Normal State",
                2 => "Type A - Focal Seizure Detected",
                3 => "Type B - Generalized Seizure Detected",
                4 => "Type C - Preictal State of Seizure",
                5 => "Type D - Ictal State of Seizure",
                _ => self.fallback(),
            },
        }
    }

    /// Text shown when no code is available (unmatched lookup).
    pub fn fallback(self) -> &'static str {
        match self {
            LabelTable::SeizureType => "Unknown Type",
            LabelTable::ClinicalState => "No match found in dataset",
        }
    }
}
