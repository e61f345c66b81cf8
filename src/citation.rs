//! Citation network: papers as nodes, in-dataset citations as directed links.

use crate::paper::PaperRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationNode {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub citations: u64,
}

/// "source cites target"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationLink {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitationNetwork {
    pub nodes: Vec<CitationNode>,
    pub links: Vec<CitationLink>,
}

/// Build the citation network.
///
/// A reference becomes a link only when its target is itself one of `papers`;
/// citations of outside works are dropped to keep the graph self-contained.
/// Links are neither deduplicated nor checked for self-loops.
pub fn build_citation_network(papers: &[PaperRecord]) -> CitationNetwork {
    let paper_ids: HashSet<&str> = papers.iter().map(|p| p.id.as_str()).collect();

    let nodes: Vec<CitationNode> = papers
        .iter()
        .map(|p| CitationNode {
            id: p.id.clone(),
            title: p.title.clone(),
            year: p.publication_year,
            citations: p.cited_by_count,
        })
        .collect();

    let mut links = Vec::new();
    for paper in papers {
        for reference in &paper.referenced_works {
            if paper_ids.contains(reference.as_str()) {
                links.push(CitationLink {
                    source: paper.id.clone(),
                    target: reference.clone(),
                });
            }
        }
    }

    info!(
        nodes = nodes.len(),
        links = links.len(),
        "Built citation network"
    );

    CitationNetwork { nodes, links }
}
