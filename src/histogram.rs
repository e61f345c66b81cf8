//! Per-year citation histograms.
//!
//! Each year present in the dataset gets one count per configured
//! [`CitationBin`], always in bin order and including empty bins. Years with no
//! papers are absent rather than zero-filled, so [`Histogram::get`] is the
//! not-found signal for the serving layer.

use crate::config::CitationBin;
use crate::paper::PaperRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub label: String,
    pub count: u32,
}

/// Year -> bins. Serializes as a JSON object keyed by the year as a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram(BTreeMap<i32, Vec<HistogramBin>>);

impl Histogram {
    /// Bins for `year`, `None` when no paper was published that year
    pub fn get(&self, year: i32) -> Option<&[HistogramBin]> {
        self.0.get(&year).map(Vec::as_slice)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Classify every paper of every year into `bins` by citation count
pub fn build_histogram(papers: &[PaperRecord], bins: &[CitationBin]) -> Histogram {
    let mut histograms: BTreeMap<i32, Vec<HistogramBin>> = BTreeMap::new();

    for paper in papers {
        let year_bins = histograms.entry(paper.publication_year).or_insert_with(|| {
            bins.iter()
                .map(|b| HistogramBin {
                    label: b.label.clone(),
                    count: 0,
                })
                .collect()
        });

        match bins.iter().position(|b| b.contains(paper.cited_by_count)) {
            Some(idx) => year_bins[idx].count += 1,
            None => warn!(
                id = %paper.id,
                citations = paper.cited_by_count,
                "Citation count outside every bin"
            ),
        }
    }

    info!(years = histograms.len(), "Built histogram data");
    Histogram(histograms)
}
