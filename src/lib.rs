//! # researchnet
//!
//! Research Network Preprocessor - citation & collaboration graphs for a dashboard
//!
//! ## Modules
//!
//! - [`paper`] - Paper records, loading and dataset statistics
//! - [`citation`] - Citation network builder
//! - [`collaboration`] - Weighted co-authorship network builder
//! - [`timeline`] - Papers per year
//! - [`histogram`] - Per-year citation histograms
//! - [`config`] - Bins and collaboration thresholds
//! - [`artifacts`] - Batch pipeline and JSON artifact store
//! - [`openalex`] - OpenAlex paper fetcher
//! - [`server`] - Read-only HTTP API
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use researchnet::{artifacts::{ArtifactStore, NetworkArtifacts}, config::NetworkConfig, paper};
//!
//! fn main() -> researchnet::Result<()> {
//!     let papers = paper::load_papers("papers.json".as_ref())?;
//!     let artifacts = NetworkArtifacts::build(&papers, &NetworkConfig::default())?;
//!     ArtifactStore::new("data").save_all(&artifacts)?;
//!     Ok(())
//! }
//! ```

pub mod artifacts;
pub mod citation;
pub mod collaboration;
pub mod config;
pub mod error;
pub mod histogram;
pub mod openalex;
pub mod paper;
pub mod server;
pub mod timeline;

pub use error::{NetworkError, Result};
