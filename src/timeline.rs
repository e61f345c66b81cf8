//! Publication counts per year.

use crate::paper::PaperRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub year: i32,
    pub count: u32,
}

/// Count papers per publication year, ascending, without zero-filled gaps
pub fn build_timeline(papers: &[PaperRecord]) -> Vec<TimelineEntry> {
    let mut year_counts: BTreeMap<i32, u32> = BTreeMap::new();
    for paper in papers {
        *year_counts.entry(paper.publication_year).or_default() += 1;
    }

    let timeline: Vec<TimelineEntry> = year_counts
        .into_iter()
        .map(|(year, count)| TimelineEntry { year, count })
        .collect();

    info!(years = timeline.len(), "Built timeline");
    timeline
}

#[cfg(test)]
mod tests {
    use super::*;

    fn papers_in(years: &[i32]) -> Vec<PaperRecord> {
        years
            .iter()
            .map(|&year| PaperRecord {
                publication_year: year,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_sorted_one_entry_per_year() {
        let timeline = build_timeline(&papers_in(&[2021, 2020, 2023, 2020]));
        assert_eq!(
            timeline,
            vec![
                TimelineEntry { year: 2020, count: 2 },
                TimelineEntry { year: 2021, count: 1 },
                TimelineEntry { year: 2023, count: 1 },
            ]
        );
    }

    #[test]
    fn test_counts_sum_to_total() {
        let papers = papers_in(&[2019, 2019, 2024, 2022, 2019, 2024]);
        let timeline = build_timeline(&papers);
        let total: u32 = timeline.iter().map(|e| e.count).sum();
        assert_eq!(total as usize, papers.len());
        assert!(timeline.windows(2).all(|w| w[0].year < w[1].year));
    }

    #[test]
    fn test_empty_input() {
        assert!(build_timeline(&[]).is_empty());
    }
}
