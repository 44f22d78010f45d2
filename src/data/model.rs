use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Column names of the source table
// ---------------------------------------------------------------------------

pub const COL_YEAR: &str = "ano";
pub const COL_SENIORITY: &str = "senioridade";
pub const COL_CONTRACT: &str = "contrato";
pub const COL_COMPANY_SIZE: &str = "tamanho_empresa";
pub const COL_REMOTE: &str = "remoto";
pub const COL_JOB_TITLE: &str = "cargo";
pub const COL_SALARY_USD: &str = "usd";

/// Every column a dataset must provide, in source order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_YEAR,
    COL_SENIORITY,
    COL_CONTRACT,
    COL_COMPANY_SIZE,
    COL_REMOTE,
    COL_JOB_TITLE,
    COL_SALARY_USD,
];

/// Problems with the shape of a loaded table.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("dataset is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("column '{column}' has unsupported type {found}")]
    UnsupportedType { column: String, found: String },
}

/// Names from [`REQUIRED_COLUMNS`] that are absent from `present`.
pub fn missing_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let present: BTreeSet<&str> = present.into_iter().map(str::trim).collect();
    REQUIRED_COLUMNS
        .iter()
        .filter(|c| !present.contains(*c))
        .map(|c| c.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single salary record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "ano", deserialize_with = "deserialize_year")]
    pub year: i32,
    #[serde(rename = "senioridade")]
    pub seniority: String,
    #[serde(rename = "contrato")]
    pub contract: String,
    #[serde(rename = "tamanho_empresa")]
    pub company_size: String,
    #[serde(rename = "remoto")]
    pub remote: String,
    #[serde(rename = "cargo")]
    pub job_title: String,
    #[serde(rename = "usd")]
    pub salary_usd: f64,
}

/// Accepts `2023` as well as `2023.0`, which is how year columns come out
/// of tools that stored them as floats.
fn deserialize_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    year_from_f64(raw).map_err(serde::de::Error::custom)
}

pub fn year_from_f64(raw: f64) -> Result<i32, String> {
    if raw.fract() != 0.0 || raw < i32::MIN as f64 || raw > i32::MAX as f64 {
        return Err(format!("invalid year value {raw}"));
    }
    Ok(raw as i32)
}

// ---------------------------------------------------------------------------
// Filter columns and their values
// ---------------------------------------------------------------------------

/// The four categorical columns exposed as sidebar filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterColumn {
    Year,
    Seniority,
    Contract,
    CompanySize,
}

impl FilterColumn {
    /// Sidebar order.
    pub const ALL: [FilterColumn; 4] = [
        FilterColumn::Year,
        FilterColumn::Seniority,
        FilterColumn::Contract,
        FilterColumn::CompanySize,
    ];

    /// Human readable label shown above the multi-select.
    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::Year => "Ano",
            FilterColumn::Seniority => "Senioridade",
            FilterColumn::Contract => "Tipo de Contratação",
            FilterColumn::CompanySize => "Tamanho de Empresa",
        }
    }

    /// Name of the column in the source table.
    pub fn column_name(self) -> &'static str {
        match self {
            FilterColumn::Year => COL_YEAR,
            FilterColumn::Seniority => COL_SENIORITY,
            FilterColumn::Contract => COL_CONTRACT,
            FilterColumn::CompanySize => COL_COMPANY_SIZE,
        }
    }

    /// The record's value in this column.
    pub fn value_of(self, record: &SalaryRecord) -> CategoryValue {
        match self {
            FilterColumn::Year => CategoryValue::Integer(i64::from(record.year)),
            FilterColumn::Seniority => CategoryValue::Text(record.seniority.clone()),
            FilterColumn::Contract => CategoryValue::Text(record.contract.clone()),
            FilterColumn::CompanySize => CategoryValue::Text(record.company_size.clone()),
        }
    }
}

/// A value in one of the filter columns. Integers sort numerically and
/// before any text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::Integer(i) => write!(f, "{i}"),
            CategoryValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for CategoryValue {
    fn from(v: &str) -> Self {
        CategoryValue::Text(v.to_string())
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed distinct values.
#[derive(Debug, Clone, Default)]
pub struct SalaryDataset {
    /// All records (rows).
    pub records: Vec<SalaryRecord>,
    /// For each filter column the sorted set of distinct values.
    pub distinct_values: BTreeMap<FilterColumn, BTreeSet<CategoryValue>>,
    /// Sorted remote-work categories across the whole table.
    pub remote_categories: BTreeSet<String>,
}

impl SalaryDataset {
    /// Build the distinct-value indices from the loaded records.
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        let mut distinct_values: BTreeMap<FilterColumn, BTreeSet<CategoryValue>> =
            FilterColumn::ALL.iter().map(|c| (*c, BTreeSet::new())).collect();
        let mut remote_categories = BTreeSet::new();

        for rec in &records {
            for col in FilterColumn::ALL {
                distinct_values
                    .entry(col)
                    .or_default()
                    .insert(col.value_of(rec));
            }
            remote_categories.insert(rec.remote.clone());
        }

        SalaryDataset {
            records,
            distinct_values,
            remote_categories,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow the records at `indices` as a [`FilteredView`].
    /// Out-of-range indices are skipped.
    pub fn view(&self, indices: &[usize]) -> FilteredView<'_> {
        FilteredView {
            records: indices.iter().filter_map(|&i| self.records.get(i)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// FilteredView – rows passing the current selections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    records: Vec<&'a SalaryRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[&'a SalaryRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SalaryRecord> + '_ {
        self.records.iter().copied()
    }

    /// Salary column of the view, in row order.
    pub fn salaries(&self) -> Vec<f64> {
        self.iter().map(|r| r.salary_usd).collect()
    }
}

#[cfg(test)]
pub(crate) fn record(
    year: i32,
    seniority: &str,
    contract: &str,
    company_size: &str,
    remote: &str,
    job_title: &str,
    salary_usd: f64,
) -> SalaryRecord {
    SalaryRecord {
        year,
        seniority: seniority.to_string(),
        contract: contract.to_string(),
        company_size: company_size.to_string(),
        remote: remote.to_string(),
        job_title: job_title.to_string(),
        salary_usd,
    }
}
