use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::{Map, Value};

const FEATURE_COUNT: usize = 178;

/// Write a synthetic EEG dataset with the viewer's schema (Unnamed, X1..X178, y).
#[derive(Parser)]
#[command(name = "generate_sample", version, about, long_about = None)]
struct Args {
    /// Output file; `.json` or `.parquet`
    #[arg(long, default_value = "public/eeg_subset_50.json")]
    output: PathBuf,

    /// Number of rows
    #[arg(long, default_value_t = 50)]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// One generated sample.
struct Sample {
    id: String,
    values: Vec<i64>,
    label: i64,
}

/// JSON record layout; field order is `Unnamed`, `X1..X178`, `y`.
#[derive(Serialize)]
struct Record<'a> {
    #[serde(rename = "Unnamed")]
    id: &'a str,
    #[serde(flatten)]
    features: Map<String, Value>,
    y: i64,
}

/// (amplitude, cycles per segment, noise) for each label code 1..=5.
/// Code 1 is the high-amplitude seizure-like activity.
const PROFILES: [(f64, f64, f64); 5] = [
    (450.0, 9.0, 120.0),
    (60.0, 4.0, 25.0),
    (55.0, 6.0, 20.0),
    (35.0, 10.0, 15.0),
    (30.0, 12.0, 12.0),
];

fn gauss<R: Rng + ?Sized>(rng: &mut R, std_dev: f64) -> f64 {
    // Box-Muller
    let u1 = rng.random::<f64>().max(1e-15);
    let u2 = rng.random::<f64>();
    std_dev * (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

fn generate<R: Rng + ?Sized>(rng: &mut R) -> Sample {
    let label = rng.random_range(1..=5_i64);
    let (amplitude, cycles, noise) = PROFILES[(label - 1) as usize];
    let phase = rng.random::<f64>() * std::f64::consts::TAU;

    let values = (0..FEATURE_COUNT)
        .map(|i| {
            let t = i as f64 / FEATURE_COUNT as f64;
            let carrier = (std::f64::consts::TAU * cycles * t + phase).sin();
            let drift = (std::f64::consts::TAU * 0.5 * t).sin() * amplitude * 0.2;
            (amplitude * carrier + drift + gauss(&mut *rng, noise)).round() as i64
        })
        .collect();

    let id = format!(
        "X{}.V1.{}",
        rng.random_range(1..=23),
        rng.random_range(1..=1000)
    );
    Sample { id, values, label }
}

fn write_json(path: &Path, samples: &[Sample]) -> Result<()> {
    let records: Vec<Record<'_>> = samples
        .iter()
        .map(|s| Record {
            id: &s.id,
            features: s
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| (format!("X{}", i + 1), Value::from(v)))
                .collect(),
            y: s.label,
        })
        .collect();

    let file = std::fs::File::create(path).context("creating output file")?;
    serde_json::to_writer(file, &records).context("writing JSON")?;
    Ok(())
}

fn write_parquet(path: &Path, samples: &[Sample]) -> Result<()> {
    let mut fields = vec![Field::new("Unnamed", DataType::Utf8, false)];
    fields.extend((1..=FEATURE_COUNT).map(|n| Field::new(format!("X{n}"), DataType::Int64, false)));
    fields.push(Field::new("y", DataType::Int64, false));
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(FEATURE_COUNT + 2);
    columns.push(Arc::new(StringArray::from(
        samples.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
    )));
    for j in 0..FEATURE_COUNT {
        columns.push(Arc::new(Int64Array::from(
            samples.iter().map(|s| s.values[j]).collect::<Vec<_>>(),
        )));
    }
    columns.push(Arc::new(Int64Array::from(
        samples.iter().map(|s| s.label).collect::<Vec<_>>(),
    )));

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let samples: Vec<Sample> = (0..args.rows).map(|_| generate(&mut rng)).collect();

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => write_json(&args.output, &samples)?,
        "parquet" | "pq" => write_parquet(&args.output, &samples)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    log::info!("seed {} produced {} rows", args.seed, samples.len());
    println!(
        "Wrote {} EEG rows ({} features each) to {}",
        samples.len(),
        FEATURE_COUNT,
        args.output.display()
    );
    Ok(())
}
