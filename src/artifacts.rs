//! Preprocessing pipeline and artifact persistence.
//!
//! [`NetworkArtifacts::build`] runs every builder once over the full paper list;
//! [`ArtifactStore`] writes and reads the resulting JSON documents in a data
//! directory, one file per [`Artifact`].

use crate::citation::{build_citation_network, CitationNetwork};
use crate::collaboration::{build_collaboration_network, CollaborationNetwork};
use crate::config::NetworkConfig;
use crate::error::{NetworkError, Result};
use crate::histogram::{build_histogram, Histogram};
use crate::paper::PaperRecord;
use crate::timeline::{build_timeline, TimelineEntry};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Named artifacts produced by a preprocessing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    CitationNetwork,
    CollaborationNetwork,
    Timeline,
    Histogram,
}

impl Artifact {
    pub const ALL: [Artifact; 4] = [
        Artifact::CitationNetwork,
        Artifact::CollaborationNetwork,
        Artifact::Timeline,
        Artifact::Histogram,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::CitationNetwork => "citation_network.json",
            Artifact::CollaborationNetwork => "collaboration_network.json",
            Artifact::Timeline => "timeline_data.json",
            Artifact::Histogram => "histogram_data.json",
        }
    }
}

/// Everything derived from one paper list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkArtifacts {
    pub citation: CitationNetwork,
    pub collaboration: CollaborationNetwork,
    pub timeline: Vec<TimelineEntry>,
    pub histogram: Histogram,
}

impl NetworkArtifacts {
    /// Validate `config` and build all four artifacts from `papers`
    pub fn build(papers: &[PaperRecord], config: &NetworkConfig) -> Result<Self> {
        config.validate()?;
        info!(papers = papers.len(), "Preprocessing papers");

        Ok(Self {
            citation: build_citation_network(papers),
            collaboration: build_collaboration_network(papers, config),
            timeline: build_timeline(papers),
            histogram: build_histogram(papers, &config.citation_bins),
        })
    }
}

/// JSON artifact files in a data directory
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, artifact: Artifact) -> PathBuf {
        self.dir.join(artifact.file_name())
    }

    /// Write one artifact as pretty-printed JSON
    pub fn save<T: Serialize>(&self, artifact: Artifact, data: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path(artifact);
        let content = serde_json::to_string_pretty(data)?;
        std::fs::write(&path, content)?;
        info!(path = ?path, "Saved artifact");
        Ok(())
    }

    /// Read one artifact; a missing file is [`NetworkError::MissingArtifact`]
    pub fn load<T: DeserializeOwned>(&self, artifact: Artifact) -> Result<T> {
        let path = self.path(artifact);
        if !path.exists() {
            return Err(NetworkError::MissingArtifact(path));
        }
        let content = std::fs::read_to_string(&path)?;
        let data = serde_json::from_str(&content)?;
        debug!(path = ?path, "Loaded artifact");
        Ok(data)
    }

    pub fn save_all(&self, artifacts: &NetworkArtifacts) -> Result<()> {
        self.save(Artifact::CitationNetwork, &artifacts.citation)?;
        self.save(Artifact::CollaborationNetwork, &artifacts.collaboration)?;
        self.save(Artifact::Timeline, &artifacts.timeline)?;
        self.save(Artifact::Histogram, &artifacts.histogram)?;
        Ok(())
    }

    /// Load all four artifacts, failing on the first one that is missing
    pub fn load_all(&self) -> Result<NetworkArtifacts> {
        Ok(NetworkArtifacts {
            citation: self.load(Artifact::CitationNetwork)?,
            collaboration: self.load(Artifact::CollaborationNetwork)?,
            timeline: self.load(Artifact::Timeline)?,
            histogram: self.load(Artifact::Histogram)?,
        })
    }

    /// Write flat CSV tables of the timeline and collaboration links
    pub fn export_csv(&self, artifacts: &NetworkArtifacts) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        save_csv(&self.dir.join("timeline_data.csv"), &artifacts.timeline)?;
        save_csv(
            &self.dir.join("collaboration_links.csv"),
            &artifacts.collaboration.links,
        )?;
        Ok(())
    }
}

fn save_csv<T: Serialize>(path: &Path, data: &[T]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_path(path)?;
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    info!(path = ?path, rows = data.len(), "Saved CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::{AuthorRef, Authorship};
    use tempfile::TempDir;

    fn sample_papers() -> Vec<PaperRecord> {
        let authors = |ids: &[&str]| -> Vec<Authorship> {
            ids.iter()
                .map(|id| Authorship {
                    author: AuthorRef {
                        id: id.to_string(),
                        display_name: format!("Author {}", id),
                    },
                })
                .collect()
        };
        vec![
            PaperRecord {
                id: "P1".into(),
                title: "First".into(),
                publication_year: 2020,
                cited_by_count: 0,
                authorships: authors(&["A", "B"]),
                referenced_works: vec!["P2".into(), "W999".into()],
                ..Default::default()
            },
            PaperRecord {
                id: "P2".into(),
                title: "Second".into(),
                publication_year: 2020,
                cited_by_count: 10,
                authorships: authors(&["B", "A"]),
                ..Default::default()
            },
            PaperRecord {
                id: "P3".into(),
                title: "Third".into(),
                publication_year: 2021,
                cited_by_count: 6,
                authorships: authors(&["A", "C"]),
                referenced_works: vec!["P1".into()],
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_build_all() -> Result<()> {
        let artifacts = NetworkArtifacts::build(&sample_papers(), &NetworkConfig::default())?;

        assert_eq!(artifacts.citation.nodes.len(), 3);
        assert_eq!(artifacts.citation.links.len(), 2);
        assert_eq!(artifacts.collaboration.links.len(), 1);
        assert_eq!(artifacts.collaboration.links[0].weight, 2);
        assert_eq!(artifacts.timeline.len(), 2);
        assert_eq!(artifacts.timeline[0].count, 2);
        assert_eq!(artifacts.histogram.len(), 2);
        Ok(())
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = NetworkConfig {
            min_collaboration_weight: 0,
            ..Default::default()
        };
        assert!(matches!(
            NetworkArtifacts::build(&sample_papers(), &config),
            Err(NetworkError::Config(_))
        ));
    }

    #[test]
    fn test_rebuild_is_byte_identical() -> Result<()> {
        let config = NetworkConfig::default();
        let first = NetworkArtifacts::build(&sample_papers(), &config)?;
        let second = NetworkArtifacts::build(&sample_papers(), &config)?;
        assert_eq!(
            serde_json::to_string(&first.collaboration)?,
            serde_json::to_string(&second.collaboration)?
        );
        assert_eq!(
            serde_json::to_string(&first.histogram)?,
            serde_json::to_string(&second.histogram)?
        );
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_save_and_load_all() -> Result<()> {
        let temp = TempDir::new()?;
        let store = ArtifactStore::new(temp.path().join("data"));
        let artifacts = NetworkArtifacts::build(&sample_papers(), &NetworkConfig::default())?;

        store.save_all(&artifacts)?;
        for artifact in Artifact::ALL {
            assert!(store.path(artifact).exists());
        }
        let loaded = store.load_all()?;
        assert_eq!(loaded, artifacts);
        Ok(())
    }

    #[test]
    fn test_missing_artifact() -> Result<()> {
        let temp = TempDir::new()?;
        let store = ArtifactStore::new(temp.path());
        let result: Result<Vec<TimelineEntry>> = store.load(Artifact::Timeline);
        match result {
            Err(NetworkError::MissingArtifact(path)) => {
                assert!(path.ends_with("timeline_data.json"));
            }
            other => panic!("expected MissingArtifact, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_export_csv() -> Result<()> {
        let temp = TempDir::new()?;
        let store = ArtifactStore::new(temp.path());
        let artifacts = NetworkArtifacts::build(&sample_papers(), &NetworkConfig::default())?;
        store.export_csv(&artifacts)?;

        let timeline = std::fs::read_to_string(temp.path().join("timeline_data.csv"))?;
        assert_eq!(timeline.lines().next(), Some("year,count"));
        assert_eq!(timeline.lines().count(), 3);

        let links = std::fs::read_to_string(temp.path().join("collaboration_links.csv"))?;
        assert!(links.contains("A,B,2"));
        Ok(())
    }
}
