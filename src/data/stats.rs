use std::collections::{BTreeMap, HashMap};

use super::model::FilteredView;

/// Number of job titles in the "top by mean salary" chart.
pub const TOP_JOB_TITLES: usize = 10;

/// Number of bins in the salary histogram.
pub const HISTOGRAM_BINS: usize = 30;

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

/// The four headline numbers. All zero / empty for an empty view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub record_count: usize,
    pub most_frequent_job_title: String,
}

impl Metrics {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        if view.is_empty() {
            return Metrics::default();
        }
        let salaries = view.salaries();
        let total: f64 = salaries.iter().sum();
        let max_salary = salaries.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Metrics {
            mean_salary: total / salaries.len() as f64,
            max_salary,
            record_count: view.len(),
            most_frequent_job_title: mode(view.iter().map(|r| r.job_title.as_str()))
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Most frequent value; ties go to the value encountered first.
pub fn mode<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    // value → (count, first position)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (pos, v) in values.into_iter().enumerate() {
        counts.entry(v).or_insert((0, pos)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (ca, pa)), (_, (cb, pb))| ca.cmp(cb).then(pb.cmp(pa)))
        .map(|(v, _)| v)
}

// ---------------------------------------------------------------------------
// Top job titles by mean salary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct JobTitleMean {
    pub job_title: String,
    pub mean_salary: f64,
    pub count: usize,
}

/// The `n` job titles with the highest mean salary, sorted ascending by mean
/// (the largest comes last, i.e. at the top of a horizontal bar chart).
/// Equal means prefer the alphabetically first title.
pub fn top_job_titles(view: &FilteredView<'_>, n: usize) -> Vec<JobTitleMean> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for rec in view.iter() {
        let entry = groups.entry(rec.job_title.as_str()).or_insert((0.0, 0));
        entry.0 += rec.salary_usd;
        entry.1 += 1;
    }

    let mut means: Vec<JobTitleMean> = groups
        .into_iter()
        .map(|(title, (sum, count))| JobTitleMean {
            job_title: title.to_string(),
            mean_salary: sum / count as f64,
            count,
        })
        .collect();

    // Stable sort keeps the alphabetical order among equal means.
    means.sort_by(|a, b| b.mean_salary.total_cmp(&a.mean_salary));
    means.truncate(n);
    means.sort_by(|a, b| a.mean_salary.total_cmp(&b.mean_salary));
    means
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Equal-width bins over `[min, max]`; the last bin is closed on the right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bin `values` into `bin_count` bins. Non-finite values are ignored;
    /// no finite values (or zero bins) gives an empty histogram.
    pub fn compute(values: &[f64], bin_count: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bin_count == 0 {
            return Histogram::default();
        }

        let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            min -= 0.5;
            max += 0.5;
        }
        let width = (max - min) / bin_count as f64;

        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                lower: min + width * i as f64,
                upper: if i + 1 == bin_count {
                    max
                } else {
                    min + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for v in finite {
            let idx = (((v - min) / width) as usize).min(bin_count - 1);
            bins[idx].count += 1;
        }

        Histogram { bins }
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Remote-work proportions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ShareSlice {
    pub label: String,
    pub count: usize,
    /// Share of the view in percent (0–100).
    pub percent: f64,
}

/// Rows per remote-work category, most frequent first (ties in first-seen
/// order).
pub fn remote_shares(view: &FilteredView<'_>) -> Vec<ShareSlice> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for rec in view.iter() {
        let c = counts.entry(rec.remote.as_str()).or_insert(0);
        if *c == 0 {
            order.push(rec.remote.as_str());
        }
        *c += 1;
    }

    let total = view.len() as f64;
    let mut slices: Vec<ShareSlice> = order
        .into_iter()
        .map(|label| {
            let count = counts[label];
            ShareSlice {
                label: label.to_string(),
                count,
                percent: count as f64 / total * 100.0,
            }
        })
        .collect();
    slices.sort_by(|a, b| b.count.cmp(&a.count));
    slices
}

// ---------------------------------------------------------------------------
// Everything the dashboard renders, derived from one view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub metrics: Metrics,
    pub top_job_titles: Vec<JobTitleMean>,
    pub histogram: Histogram,
    pub remote_shares: Vec<ShareSlice>,
}

impl DashboardSummary {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        DashboardSummary {
            metrics: Metrics::compute(view),
            top_job_titles: top_job_titles(view, TOP_JOB_TITLES),
            histogram: Histogram::compute(&view.salaries(), HISTOGRAM_BINS),
            remote_shares: remote_shares(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, init_filter_state};
    use crate::data::model::{record, FilterColumn, SalaryDataset};
    use std::collections::BTreeSet;

    fn total(hist: &Histogram) -> usize {
        hist.bins.iter().map(|b| b.count).sum()
    }

    fn all(ds: &SalaryDataset) -> FilteredView<'_> {
        ds.view(&(0..ds.len()).collect::<Vec<_>>())
    }

    #[test]
    fn two_row_example_filtered_to_senior() {
        let ds = SalaryDataset::from_records(vec![
            record(2023, "senior", "integral", "grande", "Remoto", "Data Scientist", 100_000.0),
            record(2023, "junior", "integral", "grande", "Presencial", "Analyst", 50_000.0),
        ]);
        let mut filters = init_filter_state(&ds);
        filters.insert(FilterColumn::Seniority, BTreeSet::from(["senior".into()]));
        let indices = filtered_indices(&ds, &filters);

        let metrics = Metrics::compute(&ds.view(&indices));
        assert_eq!(metrics.mean_salary, 100_000.0);
        assert_eq!(metrics.max_salary, 100_000.0);
        assert_eq!(metrics.record_count, 1);
        assert_eq!(metrics.most_frequent_job_title, "Data Scientist");
    }

    #[test]
    fn empty_view_yields_zero_metrics_and_no_charts() {
        let ds = SalaryDataset::from_records(vec![record(
            2023, "senior", "integral", "grande", "remoto", "Data Scientist", 1.0,
        )]);
        let summary = DashboardSummary::compute(&ds.view(&[]));
        assert_eq!(summary.metrics, Metrics::default());
        assert_eq!(summary.metrics.most_frequent_job_title, "");
        assert!(summary.top_job_titles.is_empty());
        assert!(summary.histogram.is_empty());
        assert!(summary.remote_shares.is_empty());
    }

    #[test]
    fn mode_breaks_ties_by_first_occurrence() {
        assert_eq!(mode(["b", "a", "a", "b"]), Some("b"));
        assert_eq!(mode(["b", "a", "a"]), Some("a"));
        assert_eq!(mode(Vec::<&str>::new()), None);
    }

    #[test]
    fn top_job_titles_keeps_ten_sorted_ascending() {
        let records = (0..15)
            .map(|i| {
                record(
                    2024,
                    "senior",
                    "integral",
                    "grande",
                    "remoto",
                    &format!("Job {i:02}"),
                    1_000.0 * (i + 1) as f64,
                )
            })
            .collect();
        let ds = SalaryDataset::from_records(records);
        let top = top_job_titles(&all(&ds), TOP_JOB_TITLES);

        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].mean_salary <= w[1].mean_salary));
        assert_eq!(top.first().map(|t| t.job_title.as_str()), Some("Job 05"));
        assert_eq!(top.last().map(|t| t.mean_salary), Some(15_000.0));
    }

    #[test]
    fn top_job_titles_averages_per_title() {
        let ds = SalaryDataset::from_records(vec![
            record(2024, "senior", "integral", "grande", "remoto", "Analyst", 40.0),
            record(2024, "senior", "integral", "grande", "remoto", "Analyst", 60.0),
            record(2024, "senior", "integral", "grande", "remoto", "Engineer", 70.0),
        ]);
        let top = top_job_titles(&all(&ds), TOP_JOB_TITLES);
        assert_eq!(
            top,
            vec![
                JobTitleMean { job_title: "Analyst".into(), mean_salary: 50.0, count: 2 },
                JobTitleMean { job_title: "Engineer".into(), mean_salary: 70.0, count: 1 },
            ]
        );
    }

    #[test]
    fn histogram_has_exact_bin_count_and_keeps_every_value() {
        for n in [1usize, 2, 7, 100] {
            let values: Vec<f64> = (0..n).map(|i| 1_000.0 + 37.0 * i as f64).collect();
            let hist = Histogram::compute(&values, HISTOGRAM_BINS);
            assert_eq!(hist.bins.len(), HISTOGRAM_BINS);
            assert_eq!(total(&hist), n);
        }
    }

    #[test]
    fn histogram_puts_max_in_last_bin() {
        let hist = Histogram::compute(&[0.0, 30.0], 30);
        assert_eq!(hist.bins[0].count, 1);
        assert_eq!(hist.bins[29].count, 1);
        assert_eq!(hist.bins[29].upper, 30.0);
        assert_eq!(hist.bins[0].width(), 1.0);
    }

    #[test]
    fn histogram_widens_a_single_value_range() {
        let hist = Histogram::compute(&[5.0, 5.0], 30);
        assert_eq!(hist.bins.first().map(|b| b.lower), Some(4.5));
        assert_eq!(hist.bins.last().map(|b| b.upper), Some(5.5));
        assert_eq!(total(&hist), 2);
    }

    #[test]
    fn remote_shares_sum_to_one_hundred() {
        let ds = SalaryDataset::from_records(vec![
            record(2024, "senior", "integral", "grande", "presencial", "A", 1.0),
            record(2024, "senior", "integral", "grande", "remoto", "A", 1.0),
            record(2024, "senior", "integral", "grande", "remoto", "A", 1.0),
            record(2024, "senior", "integral", "grande", "hibrido", "A", 1.0),
            record(2024, "senior", "integral", "grande", "remoto", "A", 1.0),
            record(2024, "senior", "integral", "grande", "hibrido", "A", 1.0),
        ]);
        let shares = remote_shares(&all(&ds));

        let labels: Vec<&str> = shares.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["remoto", "hibrido", "presencial"]);
        let total: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(shares[0].percent, 50.0);
    }
}
