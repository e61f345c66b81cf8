//! Policy constants for network construction and histogram binning.

use crate::error::{NetworkError, Result};
use serde::{Deserialize, Serialize};

/// Collaborations seen on fewer papers than this are dropped from the graph
pub const DEFAULT_MIN_COLLABORATION_WEIGHT: u32 = 2;

/// One inclusive citation-count range of the histogram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationBin {
    pub label: String,
    pub min: u64,
    /// `None` means unbounded
    pub max: Option<u64>,
}

impl CitationBin {
    pub fn new(label: &str, min: u64, max: Option<u64>) -> Self {
        Self {
            label: label.to_string(),
            min,
            max,
        }
    }

    pub fn contains(&self, count: u64) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

/// The six fixed bins: 0, 1-4, 5-9, 10-24, 25-49, 50+
pub fn default_citation_bins() -> Vec<CitationBin> {
    vec![
        CitationBin::new("0", 0, Some(0)),
        CitationBin::new("1-4", 1, Some(4)),
        CitationBin::new("5-9", 5, Some(9)),
        CitationBin::new("10-24", 10, Some(24)),
        CitationBin::new("25-49", 25, Some(49)),
        CitationBin::new("50+", 50, None),
    ]
}

/// How an author id listed twice on the same paper is counted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicateAuthorPolicy {
    /// Every listing counts towards the author's paper total and pair counts;
    /// an id is never paired with itself.
    #[default]
    PerOccurrence,
    /// Repeated ids on one paper collapse to their first listing
    OncePerPaper,
}

/// Configuration shared by the network builders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub citation_bins: Vec<CitationBin>,
    pub min_collaboration_weight: u32,
    pub duplicate_authors: DuplicateAuthorPolicy,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            citation_bins: default_citation_bins(),
            min_collaboration_weight: DEFAULT_MIN_COLLABORATION_WEIGHT,
            duplicate_authors: DuplicateAuthorPolicy::default(),
        }
    }
}

impl NetworkConfig {
    /// Check that the bins cover every non-negative count exactly once.
    ///
    /// The first bin must start at 0, each following bin must start right after
    /// the previous one ends, and only the last bin may be unbounded.
    pub fn validate(&self) -> Result<()> {
        if self.min_collaboration_weight == 0 {
            return Err(NetworkError::Config(
                "min_collaboration_weight must be at least 1".to_string(),
            ));
        }

        let mut expected_min = 0u64;
        let last = self.citation_bins.len().checked_sub(1).ok_or_else(|| {
            NetworkError::Config("at least one citation bin is required".to_string())
        })?;

        for (idx, bin) in self.citation_bins.iter().enumerate() {
            if bin.min != expected_min {
                return Err(NetworkError::Config(format!(
                    "bin {:?} starts at {}, expected {}",
                    bin.label, bin.min, expected_min
                )));
            }
            match bin.max {
                Some(max) if max < bin.min => {
                    return Err(NetworkError::Config(format!(
                        "bin {:?} ends before it starts",
                        bin.label
                    )));
                }
                Some(_) if idx == last => {
                    return Err(NetworkError::Config(format!(
                        "last bin {:?} must be unbounded",
                        bin.label
                    )));
                }
                Some(max) => {
                    expected_min = max.checked_add(1).ok_or_else(|| {
                        NetworkError::Config(format!("bin {:?} overflows", bin.label))
                    })?;
                }
                None if idx != last => {
                    return Err(NetworkError::Config(format!(
                        "only the last bin may be unbounded, found {:?}",
                        bin.label
                    )));
                }
                None => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = NetworkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_collaboration_weight, 2);
        let labels: Vec<&str> = config
            .citation_bins
            .iter()
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(labels, vec!["0", "1-4", "5-9", "10-24", "25-49", "50+"]);
    }

    #[test]
    fn test_every_count_hits_exactly_one_default_bin() {
        let bins = default_citation_bins();
        for count in 0..200u64 {
            let hits = bins.iter().filter(|b| b.contains(count)).count();
            assert_eq!(hits, 1, "count {}", count);
        }
        assert!(bins[5].contains(u64::MAX));
    }

    #[test]
    fn test_validate_rejects_gap() {
        let config = NetworkConfig {
            citation_bins: vec![
                CitationBin::new("0", 0, Some(0)),
                CitationBin::new("2+", 2, None),
            ],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(NetworkError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bounded_tail_and_zero_weight() {
        let bounded = NetworkConfig {
            citation_bins: vec![CitationBin::new("0-9", 0, Some(9))],
            ..Default::default()
        };
        assert!(bounded.validate().is_err());

        let zero_weight = NetworkConfig {
            min_collaboration_weight: 0,
            ..Default::default()
        };
        assert!(zero_weight.validate().is_err());

        let empty = NetworkConfig {
            citation_bins: Vec::new(),
            ..Default::default()
        };
        assert!(empty.validate().is_err());
    }
}
