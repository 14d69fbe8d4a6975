use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    Array, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Dataset, FieldValue, Row, FEATURE_COUNT};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset resource could not be turned into rows.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("malformed dataset: {0}")]
    Malformed(String),

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("reading parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("decoding arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an EEG dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "Unnamed": "X21.V1.79", "X1": 135, ..., "X178": -4, "y": 1 }, ...]`
/// * `.csv`     – header `Unnamed,X1,...,X178,y`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    let odd_width = rows
        .iter()
        .filter(|r| r.features.len() != FEATURE_COUNT)
        .count();
    if odd_width > 0 {
        log::warn!(
            "{odd_width} of {} rows in {} do not have {FEATURE_COUNT} feature fields",
            rows.len(),
            path.display()
        );
    }

    Ok(Dataset::from_rows(rows))
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LoadError + '_ {
    move |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient="records")`.
/// Object key order is the field order.
fn load_json(path: &Path) -> Result<Vec<Row>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(io_error(path))?;
    parse_json(&text)
}

pub(crate) fn parse_json(text: &str) -> Result<Vec<Row>, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected top-level JSON array".into()))?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec
                .as_object()
                .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;
            Row::from_fields(
                i,
                obj.iter().map(|(k, v)| (k.clone(), json_to_field(v))),
            )
        })
        .collect()
}

fn json_to_field(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::Number(n) => n.as_f64().map_or(FieldValue::Missing, FieldValue::Number),
        JsonValue::String(s) => FieldValue::Text(s.clone()),
        JsonValue::Null => FieldValue::Missing,
        other => FieldValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one row per sample.
/// Cells stay text; numeric conversion happens at projection time.
fn load_csv(path: &Path) -> Result<Vec<Row>, LoadError> {
    let file = std::fs::File::open(path).map_err(io_error(path))?;
    parse_csv(file)
}

pub(crate) fn parse_csv<R: std::io::Read>(input: R) -> Result<Vec<Row>, LoadError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), FieldValue::Text(v.to_string())));
        rows.push(Row::from_fields(row_no, fields)?);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`), and with `generate_sample`.
fn load_parquet(path: &Path) -> Result<Vec<Row>, LoadError> {
    let file = std::fs::File::open(path).map_err(io_error(path))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        let names: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();

        for row in 0..batch.num_rows() {
            let fields = names
                .iter()
                .zip(batch.columns())
                .map(|(name, col)| (name.clone(), extract_field_value(col, row)));
            let index = rows.len();
            rows.push(Row::from_fields(index, fields)?);
        }
    }
    Ok(rows)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_field_value(col: &Arc<dyn Array>, row: usize) -> FieldValue {
    if col.is_null(row) {
        return FieldValue::Missing;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| FieldValue::Text(a.value(row).to_string())),
        DataType::LargeUtf8 => any
            .downcast_ref::<LargeStringArray>()
            .map(|a| FieldValue::Text(a.value(row).to_string())),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| FieldValue::Number(a.value(row) as f64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| FieldValue::Number(a.value(row) as f64)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| FieldValue::Number(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| FieldValue::Number(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| FieldValue::Text(a.value(row).to_string())),
        other => Some(FieldValue::Text(format!("{other:?}"))),
    }
    .unwrap_or(FieldValue::Missing)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::lookup::lookup_by_id;

    fn feature_header() -> String {
        (1..=FEATURE_COUNT)
            .map(|n| format!("X{n}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn test_json_keeps_key_order_and_types() {
        let rows = parse_json(
            r#"[{"X3": 3, "Unnamed": "r1", "X1": "1.5", "X2": "abc", "y": 2}]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.id, "r1");
        assert_eq!(r.label, 2);
        let names: Vec<&str> = r.features.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["X3", "X1", "X2"]);
        assert_eq!(r.features[0].value, FieldValue::Number(3.0));
        assert_eq!(r.features[2].value, FieldValue::Text("abc".into()));
    }

    #[test]
    fn test_json_rejects_non_array_and_non_object_rows() {
        assert!(matches!(
            parse_json(r#"{"Unnamed": "r1"}"#),
            Err(LoadError::Malformed(_))
        ));
        assert!(matches!(parse_json("[1, 2]"), Err(LoadError::Malformed(_))));
        assert!(matches!(parse_json("[{"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_csv_rows_are_text_cells() {
        let mut body = format!("Unnamed,{},y\n", feature_header());
        let values: Vec<String> = (1..=FEATURE_COUNT).map(|n| n.to_string()).collect();
        body.push_str(&format!("X21.V1.79,{},1\n", values.join(",")));

        let rows = parse_csv(body.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].features.len(), FEATURE_COUNT);
        assert_eq!(rows[0].features[177].value, FieldValue::Text("178".into()));
        assert_eq!(rows[0].label, 1);
    }

    #[test]
    fn test_load_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("subset.json");
        std::fs::File::create(&json_path)
            .unwrap()
            .write_all(br#"[{"Unnamed": "a", "X1": 1, "y": 3}, {"Unnamed": "b", "X1": 2, "y": 4}]"#)
            .unwrap();
        let ds = load_file(&json_path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(lookup_by_id(&ds, "b").map(|r| r.label), Some(4));

        let other = dir.path().join("subset.txt");
        std::fs::write(&other, "[]").unwrap();
        assert!(matches!(
            load_file(&other),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "txt"
        ));

        assert!(matches!(
            load_file(&dir.path().join("missing.json")),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn test_bundled_subset_round_trips() {
        use crate::data::lookup::{lookup_by_vector, VectorMatch};
        use crate::data::project::project;

        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("public/eeg_subset_50.json");
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 50);

        for row in ds.rows() {
            assert_eq!(row.features.len(), FEATURE_COUNT);
            assert_eq!(lookup_by_id(&ds, &row.id), Some(row));
            match lookup_by_vector(&ds, &project(row)) {
                VectorMatch::Found(found) => assert_eq!(found.label, row.label),
                other => panic!("{} did not match itself: {other:?}", row.id),
            }
        }
        assert!(lookup_by_id(&ds, "X21.V1.79").is_some());
    }

    #[test]
    fn test_parquet_flat_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subset.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("Unnamed", DataType::Utf8, false),
            Field::new("X1", DataType::Float64, true),
            Field::new("X2", DataType::Utf8, true),
            Field::new("y", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["a", "b"])),
                Arc::new(Float64Array::from(vec![Some(1.5), None])),
                Arc::new(StringArray::from(vec![Some("2"), Some("x")])),
                Arc::new(Int64Array::from(vec![1, 5])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        let b = lookup_by_id(&ds, "b").unwrap();
        assert_eq!(b.label, 5);
        assert_eq!(b.features[0].value, FieldValue::Missing);
        assert_eq!(b.features[1].value, FieldValue::Text("x".into()));
        let a = lookup_by_id(&ds, "a").unwrap();
        assert_eq!(a.features[0].value, FieldValue::Number(1.5));
    }
}
