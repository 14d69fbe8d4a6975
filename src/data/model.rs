use std::collections::HashMap;
use std::fmt;

use super::loader::LoadError;

/// Source field holding the row identifier.
pub const ID_FIELD: &str = "Unnamed";
/// Source field holding the integer label code.
pub const LABEL_FIELD: &str = "y";
/// Number of feature fields (`X1..X178`) in a well-formed row.
pub const FEATURE_COUNT: usize = 178;

/// Name of the `n`-th feature field, 1-based (`X1`, `X2`, ...).
pub fn feature_name(n: usize) -> String {
    format!("X{n}")
}

// ---------------------------------------------------------------------------
// FieldValue – a single cell as it appeared in the source
// ---------------------------------------------------------------------------

/// A raw cell value. Numeric conversion is deferred to the projector so that
/// non-numeric text survives loading and projects to NaN.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Missing,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "{v}"),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Missing => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Integer label code, if the value holds one.
    fn as_label(&self) -> Option<i64> {
        match self {
            FieldValue::Number(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Identifiers are text; a numeric cell would never equal a typed key.
    fn as_identifier(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Row – one labeled sample
// ---------------------------------------------------------------------------

/// A named feature cell, kept in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: String,
    /// Every field except the identifier and label, in insertion order.
    pub features: Vec<Feature>,
    pub label: i64,
}

impl Row {
    /// Split an ordered field sequence into identifier, label and features.
    /// `index` is the row position in the source, used for error messages.
    pub fn from_fields<I>(index: usize, fields: I) -> Result<Row, LoadError>
    where
        I: IntoIterator<Item = (String, FieldValue)>,
    {
        let mut id = None;
        let mut label = None;
        let mut features = Vec::with_capacity(FEATURE_COUNT);

        for (name, value) in fields {
            match name.as_str() {
                ID_FIELD => id = Some(value),
                LABEL_FIELD => label = Some(value),
                _ => features.push(Feature { name, value }),
            }
        }

        let id = id
            .as_ref()
            .and_then(FieldValue::as_identifier)
            .ok_or_else(|| {
                LoadError::Malformed(format!("row {index}: missing or non-text '{ID_FIELD}'"))
            })?;
        let label = match label {
            Some(v) => v.as_label().ok_or_else(|| {
                LoadError::Malformed(format!("row {index}: '{LABEL_FIELD}' is not an integer: {v}"))
            })?,
            None => {
                return Err(LoadError::Malformed(format!(
                    "row {index}: missing '{LABEL_FIELD}'"
                )))
            }
        };

        Ok(Row { id, features, label })
    }

    /// Look up a feature cell by its field name.
    pub fn feature(&self, name: &str) -> Option<&FieldValue> {
        self.features
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }
}

// ---------------------------------------------------------------------------
// FeatureVector – ordered numeric projection of a row
// ---------------------------------------------------------------------------

/// Derived `PartialEq` compares element-wise with `f64 ==`, so vectors of
/// different length never match and a NaN never matches anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector(pub Vec<f64>);

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        FeatureVector(values)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the loaded rows
// ---------------------------------------------------------------------------

/// Rows in source order plus an identifier index built once at load time.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<Row>,
    /// Identifier → position of its first occurrence.
    by_id: HashMap<String, usize>,
}

impl Dataset {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut by_id = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            by_id.entry(row.id.clone()).or_insert(i);
        }
        Dataset { rows, by_id }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn position_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
