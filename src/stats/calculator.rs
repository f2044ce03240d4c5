//! Summary Calculator Module
//! Aggregates the collection table and shapes the per-panel series.

use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::data::CollectionInfo;

/// Bytes per reported kilobyte.
pub const BYTES_PER_KB: f64 = 1024.0;

/// Scores at or above this are healthy.
pub const HEALTH_GOOD_THRESHOLD: u32 = 90;
/// Scores at or above this (but below good) warrant watching.
pub const HEALTH_WATCH_THRESHOLD: u32 = 80;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("aggregation failed: {0}")]
    Aggregation(#[from] PolarsError),
    #[error("no samples for {0}")]
    EmptySample(&'static str),
}

/// Database-wide totals printed in the summary.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Totals {
    pub collections: usize,
    pub documents: u64,
    pub storage_kb: f64,
}

/// One histogram bin over a continuous sample.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: u32,
}

/// Traffic-light banding for the health metric bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthBand {
    Good,
    Watch,
    Poor,
}

impl HealthBand {
    pub fn classify(score: u32) -> Self {
        if score >= HEALTH_GOOD_THRESHOLD {
            HealthBand::Good
        } else if score >= HEALTH_WATCH_THRESHOLD {
            HealthBand::Watch
        } else {
            HealthBand::Poor
        }
    }
}

/// Handles the summary arithmetic over the sample dataset.
pub struct SummaryCalculator;

impl SummaryCalculator {
    /// Compute database totals from the collection frame.
    pub fn totals(frame: &DataFrame) -> Result<Totals, SummaryError> {
        let agg = frame
            .clone()
            .lazy()
            .select([
                col("doc_count").sum().alias("documents"),
                col("storage_bytes").sum().alias("storage_bytes"),
            ])
            .collect()?;

        let documents: u64 = agg
            .column("documents")?
            .as_materialized_series()
            .get(0)?
            .try_extract()?;
        let storage_bytes: u64 = agg
            .column("storage_bytes")?
            .as_materialized_series()
            .get(0)?
            .try_extract()?;

        Ok(Totals {
            collections: frame.height(),
            documents,
            storage_kb: storage_bytes as f64 / BYTES_PER_KB,
        })
    }

    /// Per-collection storage in KB (pie slice sizes).
    pub fn storage_kb(collections: &[CollectionInfo]) -> Vec<f64> {
        collections
            .iter()
            .map(|c| c.storage_bytes as f64 / BYTES_PER_KB)
            .collect()
    }

    /// Per-collection storage share, in percent of the total.
    pub fn storage_shares(collections: &[CollectionInfo]) -> Result<Vec<f64>, SummaryError> {
        let total: u64 = collections.iter().map(|c| c.storage_bytes).sum();
        if total == 0 {
            return Err(SummaryError::EmptySample("storage"));
        }
        Ok(collections
            .iter()
            .map(|c| c.storage_bytes as f64 / total as f64 * 100.0)
            .collect())
    }

    /// Equal-width histogram binning over the observed value range.
    /// The upper edge of the last bin is inclusive.
    pub fn bin(values: &[f64], bin_count: usize) -> Result<Vec<Bin>, SummaryError> {
        if values.is_empty() || bin_count == 0 {
            return Err(SummaryError::EmptySample("histogram"));
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let width = ((max - min) / bin_count as f64).max(f64::EPSILON);

        let mut counts = vec![0u32; bin_count];
        for &v in values {
            let idx = (((v - min) / width) as usize).min(bin_count - 1);
            counts[idx] += 1;
        }

        Ok(counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bin {
                lower: min + i as f64 * width,
                upper: min + (i + 1) as f64 * width,
                count,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DatabaseSample;

    #[test]
    fn totals_match_sample_arrays() {
        let sample = DatabaseSample::mydb();
        let frame = sample.collections_frame().unwrap();
        let totals = SummaryCalculator::totals(&frame).unwrap();

        assert_eq!(totals.collections, 6);
        assert_eq!(totals.documents, 89);
        assert!((totals.storage_kb - 16.125).abs() < 1e-9);
    }

    #[test]
    fn storage_shares_sum_to_one_hundred() {
        let sample = DatabaseSample::mydb();
        let shares = SummaryCalculator::storage_shares(&sample.collections).unwrap();
        assert_eq!(shares.len(), 6);
        let sum: f64 = shares.iter().sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn binning_preserves_the_sample_size() {
        let values = [18.0, 22.5, 30.0, 35.0, 35.0, 41.0, 47.5, 65.0];
        let bins = SummaryCalculator::bin(&values, 6).unwrap();
        assert_eq!(bins.len(), 6);
        let total: u32 = bins.iter().map(|b| b.count).sum();
        assert_eq!(total as usize, values.len());
    }

    #[test]
    fn binning_puts_the_max_in_the_last_bin() {
        let values = [0.0, 1.0, 2.0, 3.0];
        let bins = SummaryCalculator::bin(&values, 3).unwrap();
        assert_eq!(bins.last().unwrap().count, 1);
    }

    #[test]
    fn binning_rejects_empty_input() {
        assert!(SummaryCalculator::bin(&[], 6).is_err());
    }

    #[test]
    fn health_bands_follow_thresholds() {
        assert_eq!(HealthBand::classify(95), HealthBand::Good);
        assert_eq!(HealthBand::classify(90), HealthBand::Good);
        assert_eq!(HealthBand::classify(85), HealthBand::Watch);
        assert_eq!(HealthBand::classify(80), HealthBand::Watch);
        assert_eq!(HealthBand::classify(78), HealthBand::Poor);
    }
}
