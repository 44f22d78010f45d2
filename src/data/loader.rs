use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{
    COL_COMPANY_SIZE, COL_CONTRACT, COL_JOB_TITLE, COL_REMOTE, COL_SALARY_USD, COL_SENIORITY,
    COL_YEAR, SalaryDataset, SalaryRecord, SchemaError, missing_columns, year_from_f64,
};
use crate::config::DataSource;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset from wherever `source` points.
pub fn load_source(source: &DataSource, timeout: Duration) -> Result<SalaryDataset> {
    let dataset = match source {
        DataSource::Url(url) => fetch_csv(url, timeout)?,
        DataSource::File(path) => load_file(path)?,
    };
    log::info!("Loaded {} salary records from {source}", dataset.len());
    Ok(dataset)
}

/// Download a CSV document and parse it.
pub fn fetch_csv(url: &str, timeout: Duration) -> Result<SalaryDataset> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .context("building HTTP client")?;
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("fetching {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching {url}"))?;

    read_csv(response).with_context(|| format!("parsing CSV from {url}"))
}

/// Load a dataset from a local file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the source column names
/// * `.json`    – `[{ "ano": 2024, "senioridade": "senior", ... }, ...]`
/// * `.parquet` – flat columns with the source column names
pub fn load_file(path: &Path) -> Result<SalaryDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_csv(file).context("parsing CSV file")
        }
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Parse CSV text with a header row. Extra columns are ignored.
pub fn read_csv<R: Read>(reader: R) -> Result<SalaryDataset> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers().context("reading CSV header")?.clone();
    let missing = missing_columns(headers.iter());
    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns(missing).into());
    }

    let records = rdr
        .deserialize::<SalaryRecord>()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("Row {}: invalid record", i + 1)))
        .collect::<Result<Vec<_>>>()?;

    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// Every object must carry all required columns.
fn load_json(path: &Path) -> Result<SalaryDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: serde_json::Value = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;
    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let n = i + 1;
            if let Some(obj) = row.as_object() {
                let missing = missing_columns(obj.keys().map(String::as_str));
                if !missing.is_empty() {
                    return Err(anyhow::Error::from(SchemaError::MissingColumns(missing)))
                        .with_context(|| format!("Row {n}: invalid record"));
                }
            }
            SalaryRecord::deserialize(row).with_context(|| format!("Row {n}: invalid record"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Read a Parquet file with one flat column per field.
fn load_parquet(path: &Path) -> Result<SalaryDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let field_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let missing = missing_columns(field_names.iter().map(String::as_str));
    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns(missing).into());
    }

    let reader = builder.build().context("building parquet reader")?;
    let mut records = Vec::new();
    let mut offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let year_col = column(&batch, COL_YEAR)?;
        let seniority = column(&batch, COL_SENIORITY)?;
        let contract = column(&batch, COL_CONTRACT)?;
        let company_size = column(&batch, COL_COMPANY_SIZE)?;
        let remote = column(&batch, COL_REMOTE)?;
        let job_title = column(&batch, COL_JOB_TITLE)?;
        let salary = column(&batch, COL_SALARY_USD)?;

        for row in 0..batch.num_rows() {
            // 1-based, counted across batches
            let at = offset + row + 1;
            let text = |col: &ArrayRef, name: &str| {
                extract_string(col, name, row)
                    .with_context(|| format!("Row {at}: failed to read '{name}'"))
            };
            let year_raw = extract_f64(year_col, COL_YEAR, row)
                .with_context(|| format!("Row {at}: failed to read '{COL_YEAR}'"))?;
            let year = year_from_f64(year_raw)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Row {at}: failed to read '{COL_YEAR}'"))?;

            records.push(SalaryRecord {
                year,
                seniority: text(seniority, COL_SENIORITY)?,
                contract: text(contract, COL_CONTRACT)?,
                company_size: text(company_size, COL_COMPANY_SIZE)?,
                remote: text(remote, COL_REMOTE)?,
                job_title: text(job_title, COL_JOB_TITLE)?,
                salary_usd: extract_f64(salary, COL_SALARY_USD, row)
                    .with_context(|| format!("Row {at}: failed to read '{COL_SALARY_USD}'"))?,
            });
        }
        offset += batch.num_rows();
    }

    Ok(SalaryDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .with_context(|| format!("record batch missing '{name}' column"))
}

/// Read a numeric cell as `f64`. Nulls are errors.
fn extract_f64(col: &ArrayRef, name: &str, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in '{name}'");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        other => {
            return Err(SchemaError::UnsupportedType {
                column: name.to_string(),
                found: format!("{other:?}"),
            }
            .into());
        }
    };
    value.with_context(|| format!("unexpected array layout in '{name}'"))
}

/// Read a text cell. Nulls are errors.
fn extract_string(col: &ArrayRef, name: &str, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in '{name}'");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => Err(SchemaError::UnsupportedType {
            column: name.to_string(),
            found: format!("{other:?}"),
        }
        .into()),
    }
}
