//! Collaboration network: authors as nodes, repeated co-authorship as weighted links.
//!
//! Every pair of authors listed on the same paper is counted under its canonical
//! `(lesser, greater)` key. Pairs that co-appear on fewer than
//! [`NetworkConfig::min_collaboration_weight`] papers are dropped.

use crate::config::{DuplicateAuthorPolicy, NetworkConfig};
use crate::paper::{AuthorRef, PaperRecord};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorNode {
    pub id: String,
    /// Display name from the last paper the author appeared on
    pub name: String,
    pub papers: u32,
}

/// Undirected link; `source < target` always holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationLink {
    pub source: String,
    pub target: String,
    pub weight: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollaborationNetwork {
    pub nodes: Vec<AuthorNode>,
    pub links: Vec<CollaborationLink>,
}

/// Sort two ids into the key shared by both orderings of the pair
pub fn canonical_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Build the collaboration network.
///
/// Nodes and links come out in first-seen order. Authors without an id take no
/// part in either.
pub fn build_collaboration_network(
    papers: &[PaperRecord],
    config: &NetworkConfig,
) -> CollaborationNetwork {
    let mut nodes: Vec<AuthorNode> = Vec::new();
    let mut node_index: HashMap<String, usize> = HashMap::new();
    let mut pairs: Vec<CollaborationLink> = Vec::new();
    let mut pair_index: HashMap<(String, String), usize> = HashMap::new();

    for paper in papers {
        let authors = qualifying_authors(paper, config.duplicate_authors);

        for author in &authors {
            match node_index.get(&author.id) {
                Some(&idx) => {
                    let node = &mut nodes[idx];
                    node.name = author.display_name.clone();
                    node.papers += 1;
                }
                None => {
                    node_index.insert(author.id.clone(), nodes.len());
                    nodes.push(AuthorNode {
                        id: author.id.clone(),
                        name: author.display_name.clone(),
                        papers: 1,
                    });
                }
            }
        }

        for (i, first) in authors.iter().enumerate() {
            for second in &authors[i + 1..] {
                if first.id == second.id {
                    continue;
                }
                let (lesser, greater) = canonical_pair(&first.id, &second.id);
                let key = (lesser.to_string(), greater.to_string());
                match pair_index.get(&key) {
                    Some(&idx) => pairs[idx].weight += 1,
                    None => {
                        pair_index.insert(key, pairs.len());
                        pairs.push(CollaborationLink {
                            source: lesser.to_string(),
                            target: greater.to_string(),
                            weight: 1,
                        });
                    }
                }
            }
        }
    }

    let total_pairs = pairs.len();
    let links: Vec<CollaborationLink> = pairs
        .into_iter()
        .filter(|link| link.weight >= config.min_collaboration_weight)
        .collect();

    debug!(
        pairs = total_pairs,
        dropped = total_pairs - links.len(),
        min_weight = config.min_collaboration_weight,
        "Filtered collaboration pairs"
    );
    info!(
        nodes = nodes.len(),
        links = links.len(),
        "Built collaboration network"
    );

    CollaborationNetwork { nodes, links }
}

/// Authors of `paper` that carry an id, with repeats handled per `policy`
fn qualifying_authors(paper: &PaperRecord, policy: DuplicateAuthorPolicy) -> Vec<&AuthorRef> {
    let with_id = paper.identified_authors();

    match policy {
        DuplicateAuthorPolicy::PerOccurrence => with_id.collect(),
        DuplicateAuthorPolicy::OncePerPaper => {
            let mut seen = HashSet::new();
            with_id.filter(|a| seen.insert(a.id.as_str())).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::Authorship;

    fn author(id: &str, name: &str) -> Authorship {
        Authorship {
            author: AuthorRef {
                id: id.to_string(),
                display_name: name.to_string(),
            },
        }
    }

    fn paper(authors: &[(&str, &str)]) -> PaperRecord {
        PaperRecord {
            authorships: authors.iter().map(|(id, name)| author(id, name)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_collaborations_dropped() {
        let papers = vec![
            paper(&[("A", "Ann"), ("B", "Bob")]),
            paper(&[("B", "Bob"), ("A", "Ann")]),
            paper(&[("A", "Ann"), ("B", "Bob")]),
            paper(&[("A", "Ann"), ("C", "Cat")]),
        ];
        let network = build_collaboration_network(&papers, &NetworkConfig::default());

        assert_eq!(
            network.links,
            vec![CollaborationLink {
                source: "A".to_string(),
                target: "B".to_string(),
                weight: 3,
            }]
        );
        let ids: Vec<&str> = network.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(network.nodes[0].papers, 4);
        assert_eq!(network.nodes[2].papers, 1);
    }

    #[test]
    fn test_links_are_canonical_and_above_threshold() {
        let papers = vec![
            paper(&[("Z", "Zed"), ("M", "Max"), ("A", "Ann")]),
            paper(&[("M", "Max"), ("Z", "Zed"), ("A", "Ann")]),
            paper(&[("A", "Ann"), ("Z", "Zed")]),
        ];
        let network = build_collaboration_network(&papers, &NetworkConfig::default());

        assert_eq!(network.links.len(), 3);
        for link in &network.links {
            assert!(link.source < link.target);
            assert!(link.weight >= 2);
        }
        let az = network
            .links
            .iter()
            .find(|l| l.source == "A" && l.target == "Z");
        assert_eq!(az.map(|l| l.weight), Some(3));
    }

    #[test]
    fn test_last_seen_name_wins() {
        let papers = vec![
            paper(&[("A", "A. Smith")]),
            paper(&[("A", "Alice Smith")]),
            paper(&[("A", "A Smith")]),
        ];
        let network = build_collaboration_network(&papers, &NetworkConfig::default());
        assert_eq!(network.nodes.len(), 1);
        assert_eq!(network.nodes[0].name, "A Smith");
        assert_eq!(network.nodes[0].papers, 3);
        assert!(network.links.is_empty());
    }

    #[test]
    fn test_authors_without_id_skipped() {
        let papers = vec![
            paper(&[("A", "Ann"), ("", "Anonymous"), ("B", "Bob")]),
            paper(&[("", "Anonymous"), ("A", "Ann"), ("B", "Bob")]),
        ];
        let network = build_collaboration_network(&papers, &NetworkConfig::default());
        assert_eq!(network.nodes.len(), 2);
        assert!(network.nodes.iter().all(|n| !n.id.is_empty()));
        assert_eq!(network.links.len(), 1);
        assert_eq!(network.links[0].weight, 2);
    }

    #[test]
    fn test_min_weight_is_configurable() {
        let papers = vec![paper(&[("A", "Ann"), ("C", "Cat")])];
        let config = NetworkConfig {
            min_collaboration_weight: 1,
            ..Default::default()
        };
        let network = build_collaboration_network(&papers, &config);
        assert_eq!(network.links.len(), 1);
        assert_eq!(network.links[0].weight, 1);
    }

    #[test]
    fn test_duplicate_author_per_occurrence() {
        let papers = vec![
            paper(&[("A", "Ann"), ("A", "Ann"), ("B", "Bob")]),
            paper(&[("A", "Ann"), ("A", "Ann")]),
        ];
        let network = build_collaboration_network(&papers, &NetworkConfig::default());

        // Each listing counts, but an id is never paired with itself.
        assert_eq!(network.nodes[0].papers, 4);
        assert_eq!(
            network.links,
            vec![CollaborationLink {
                source: "A".to_string(),
                target: "B".to_string(),
                weight: 2,
            }]
        );
    }

    #[test]
    fn test_duplicate_author_once_per_paper() {
        let papers = vec![
            paper(&[("A", "Ann"), ("A", "Ann"), ("B", "Bob")]),
            paper(&[("A", "Ann"), ("A", "Ann")]),
        ];
        let config = NetworkConfig {
            duplicate_authors: DuplicateAuthorPolicy::OncePerPaper,
            ..Default::default()
        };
        let network = build_collaboration_network(&papers, &config);

        assert_eq!(network.nodes[0].papers, 2);
        assert!(network.links.is_empty());
    }

    #[test]
    fn test_rebuild_is_identical() {
        let papers = vec![
            paper(&[("A", "Ann"), ("B", "Bob"), ("C", "Cat")]),
            paper(&[("C", "Cat"), ("B", "Bob")]),
            paper(&[("B", "Bob"), ("A", "Ann")]),
        ];
        let config = NetworkConfig::default();
        assert_eq!(
            build_collaboration_network(&papers, &config),
            build_collaboration_network(&papers, &config)
        );
    }

    #[test]
    fn test_canonical_pair() {
        assert_eq!(canonical_pair("b", "a"), ("a", "b"));
        assert_eq!(canonical_pair("a", "b"), ("a", "b"));
    }
}
