//! Writes a synthetic salary table as `sample_salaries.csv` and
//! `sample_salaries.parquet`, for running the dashboard offline:
//!
//! ```text
//! cargo run --bin generate_sample -- [out_dir] [rows]
//! SALARY_DASHBOARD_SOURCE=out_dir/sample_salaries.parquet cargo run
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Pick from `(item, weight)` pairs.
    fn weighted<'a, T>(&mut self, choices: &'a [(T, f64)]) -> &'a T {
        let total: f64 = choices.iter().map(|(_, w)| w).sum();
        let mut target = self.next_f64() * total;
        for (item, weight) in choices {
            if target < *weight {
                return item;
            }
            target -= weight;
        }
        &choices[choices.len() - 1].0
    }
}

const YEARS: [(i64, f64); 6] = [
    (2020, 0.05),
    (2021, 0.08),
    (2022, 0.15),
    (2023, 0.25),
    (2024, 0.35),
    (2025, 0.12),
];
// (value, weight, salary multiplier)
const SENIORITY: [(&str, f64, f64); 4] = [
    ("junior", 0.15, 0.55),
    ("pleno", 0.30, 0.80),
    ("senior", 0.45, 1.10),
    ("executivo", 0.10, 1.45),
];
const CONTRACTS: [(&str, f64); 4] = [
    ("integral", 0.94),
    ("contrato", 0.03),
    ("parcial", 0.02),
    ("freelancer", 0.01),
];
const COMPANY_SIZES: [(&str, f64); 3] = [("grande", 0.25), ("media", 0.65), ("pequena", 0.10)];
const REMOTE: [(&str, f64); 3] = [("presencial", 0.55), ("remoto", 0.40), ("hibrido", 0.05)];
// (value, weight, base salary in USD)
const JOB_TITLES: [(&str, f64, f64); 14] = [
    ("Data Scientist", 0.18, 155_000.0),
    ("Data Engineer", 0.18, 150_000.0),
    ("Data Analyst", 0.16, 105_000.0),
    ("Machine Learning Engineer", 0.10, 185_000.0),
    ("Research Scientist", 0.04, 190_000.0),
    ("Analytics Engineer", 0.04, 150_000.0),
    ("Applied Scientist", 0.03, 195_000.0),
    ("Data Architect", 0.03, 165_000.0),
    ("Research Engineer", 0.03, 185_000.0),
    ("Business Intelligence Analyst", 0.05, 100_000.0),
    ("AI Engineer", 0.04, 170_000.0),
    ("Data Manager", 0.04, 125_000.0),
    ("Head of Data", 0.01, 210_000.0),
    ("BI Developer", 0.07, 95_000.0),
];

struct Columns {
    year: Vec<i64>,
    seniority: Vec<&'static str>,
    contract: Vec<&'static str>,
    company_size: Vec<&'static str>,
    remote: Vec<&'static str>,
    job_title: Vec<&'static str>,
    usd: Vec<f64>,
}

fn generate(rows: usize, rng: &mut SimpleRng) -> Columns {
    let seniority_w: Vec<((&str, f64), f64)> =
        SENIORITY.iter().map(|&(s, w, m)| ((s, m), w)).collect();
    let title_w: Vec<((&str, f64), f64)> =
        JOB_TITLES.iter().map(|&(t, w, base)| ((t, base), w)).collect();

    let mut cols = Columns {
        year: Vec::with_capacity(rows),
        seniority: Vec::with_capacity(rows),
        contract: Vec::with_capacity(rows),
        company_size: Vec::with_capacity(rows),
        remote: Vec::with_capacity(rows),
        job_title: Vec::with_capacity(rows),
        usd: Vec::with_capacity(rows),
    };

    for _ in 0..rows {
        let &(seniority, multiplier) = rng.weighted(&seniority_w);
        let &(title, base) = rng.weighted(&title_w);
        let year = *rng.weighted(&YEARS);
        // Salaries drift up about 4% a year.
        let drift = 1.0 + 0.04 * (year - 2020) as f64;
        let usd = rng.gauss(base * multiplier * drift, base * 0.2).max(15_000.0).round();

        cols.year.push(year);
        cols.seniority.push(seniority);
        cols.contract.push(*rng.weighted(&CONTRACTS));
        cols.company_size.push(*rng.weighted(&COMPANY_SIZES));
        cols.remote.push(*rng.weighted(&REMOTE));
        cols.job_title.push(title);
        cols.usd.push(usd);
    }
    cols
}

fn write_csv(path: &Path, cols: &Columns) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).context("creating CSV file")?;
    wtr.write_record([
        "ano",
        "senioridade",
        "contrato",
        "tamanho_empresa",
        "remoto",
        "cargo",
        "usd",
    ])?;
    for i in 0..cols.year.len() {
        wtr.write_record([
            cols.year[i].to_string(),
            cols.seniority[i].to_string(),
            cols.contract[i].to_string(),
            cols.company_size[i].to_string(),
            cols.remote[i].to_string(),
            cols.job_title[i].to_string(),
            format!("{}", cols.usd[i]),
        ])?;
    }
    wtr.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, cols: &Columns) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("ano", DataType::Int64, false),
        Field::new("senioridade", DataType::Utf8, false),
        Field::new("contrato", DataType::Utf8, false),
        Field::new("tamanho_empresa", DataType::Utf8, false),
        Field::new("remoto", DataType::Utf8, false),
        Field::new("cargo", DataType::Utf8, false),
        Field::new("usd", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(cols.year.clone())),
            Arc::new(StringArray::from(cols.seniority.clone())),
            Arc::new(StringArray::from(cols.contract.clone())),
            Arc::new(StringArray::from(cols.company_size.clone())),
            Arc::new(StringArray::from(cols.remote.clone())),
            Arc::new(StringArray::from(cols.job_title.clone())),
            Arc::new(Float64Array::from(cols.usd.clone())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let rows: usize = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid row count '{raw}'"))?,
        None => 5_000,
    };

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let cols = generate(rows, &mut rng);

    let csv_path = out_dir.join("sample_salaries.csv");
    let parquet_path = out_dir.join("sample_salaries.parquet");
    write_csv(&csv_path, &cols)?;
    write_parquet(&parquet_path, &cols)?;

    println!(
        "Wrote {rows} salary records to {} and {}",
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
