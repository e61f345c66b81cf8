//! OpenAlex API Client
//!
//! Fetches an institution's papers in one research concept and maps them to
//! [`PaperRecord`]s for preprocessing.
//!
//! API Best Practices (per OpenAlex docs):
//! - Use `mailto:email` parameter for polite pool (10 req/s vs 1 req/s)
//! - Pause between page requests
//! - Implement exponential backoff for retries

use crate::error::{NetworkError, Result};
use crate::paper::{AuthorRef, Authorship, PaperRecord, UNKNOWN_AUTHOR};
use chrono::{Datelike, Local};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// OpenAlex API base URL
const OPENALEX_API_BASE: &str = "https://api.openalex.org";

/// Florida State University
pub const DEFAULT_INSTITUTION: &str = "I103163165";

/// Computer Science
pub const DEFAULT_CONCEPT: &str = "C41008148";

/// Email for polite pool access
pub const DEFAULT_MAILTO: &str = "your-email@example.com";

/// Fetch options for an institution/concept crawl
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// OpenAlex institution id (e.g. `I103163165`)
    pub institution: String,
    /// OpenAlex concept id (e.g. `C41008148`)
    pub concept: String,
    /// First publication year, inclusive
    pub ylo: i32,
    /// Last publication year, inclusive
    pub yhi: i32,
    /// Stop after this many papers
    pub max_papers: usize,
    /// Results per page (OpenAlex allows up to 200)
    pub per_page: usize,
    pub mailto: String,
    /// Pause between page requests
    pub request_delay: Duration,
    /// Retries on HTTP 429 before giving up on a page
    pub max_retries: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        let current_year = Local::now().year();
        Self {
            institution: DEFAULT_INSTITUTION.to_string(),
            concept: DEFAULT_CONCEPT.to_string(),
            ylo: current_year - 5,
            yhi: current_year,
            max_papers: 200,
            per_page: 50,
            mailto: DEFAULT_MAILTO.to_string(),
            request_delay: Duration::from_millis(100),
            max_retries: 3,
        }
    }
}

/// OpenAlex API response structures
#[derive(Debug, Deserialize)]
struct OpenAlexResponse {
    #[serde(default)]
    results: Vec<OpenAlexWork>,
}

#[derive(Debug, Deserialize)]
struct OpenAlexWork {
    id: Option<String>,
    title: Option<String>,
    publication_year: Option<i32>,
    doi: Option<String>,
    cited_by_count: Option<u64>,
    authorships: Option<Vec<OpenAlexAuthorship>>,
    referenced_works: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct OpenAlexAuthorship {
    author: Option<OpenAlexAuthor>,
}

#[derive(Debug, Deserialize)]
struct OpenAlexAuthor {
    id: Option<String>,
    display_name: Option<String>,
}

/// Fetch papers page by page until a page comes back empty or
/// `options.max_papers` is reached.
///
/// A failed page ends pagination with a warning; papers fetched so far are
/// returned.
pub async fn fetch_papers(options: &FetchOptions) -> Result<Vec<PaperRecord>> {
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(format!("researchnet/0.1 (mailto:{})", options.mailto))
        .build()?;

    info!(
        institution = %options.institution,
        concept = %options.concept,
        ylo = options.ylo,
        yhi = options.yhi,
        max_papers = options.max_papers,
        "Starting OpenAlex fetch"
    );

    let mut all_papers: Vec<PaperRecord> = Vec::new();
    let mut page = 1;

    while all_papers.len() < options.max_papers {
        let url = build_works_url(page, options);
        debug!(url = %url, page = page, "Fetching OpenAlex page");

        let papers = match fetch_page(&client, &url, options.max_retries).await {
            Ok(body) => match parse_response(&body) {
                Ok(papers) => papers,
                Err(e) => {
                    warn!(page = page, error = %e, "Parse error, stopping");
                    break;
                }
            },
            Err(e) => {
                warn!(page = page, error = %e, "Failed to fetch page, stopping");
                break;
            }
        };

        if papers.is_empty() {
            info!(page = page, "No more papers found");
            break;
        }

        let remaining = options.max_papers - all_papers.len();
        info!(page = page, count = papers.len(), "Parsed OpenAlex results");
        all_papers.extend(papers.into_iter().take(remaining));

        page += 1;
        tokio::time::sleep(options.request_delay).await;
    }

    info!(total = all_papers.len(), "OpenAlex fetch complete");
    Ok(all_papers)
}

/// Build OpenAlex works URL for one page
fn build_works_url(page: usize, options: &FetchOptions) -> String {
    let filter = format!(
        "institutions.id:{},concepts.id:{},publication_year:{}-{}",
        options.institution, options.concept, options.ylo, options.yhi
    );

    format!(
        "{}/works?filter={}&per_page={}&page={}&mailto={}",
        OPENALEX_API_BASE,
        urlencoding::encode(&filter),
        options.per_page,
        page,
        urlencoding::encode(&options.mailto)
    )
}

/// Delay before retry `attempt` (0-based): 1s, 2s, 4s, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt.min(10))
}

/// Seconds from a numeric `Retry-After` header, if the server sent one
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Fetch one page, retrying HTTP 429 up to `max_retries` times.
///
/// Each wait is the larger of the server's `Retry-After` and the exponential
/// backoff; once retries run out the error carries the wait that was due.
async fn fetch_page(client: &Client, url: &str, max_retries: u32) -> Result<String> {
    let mut attempt = 0;

    loop {
        let response = client.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.text().await?);
        }

        if status != StatusCode::TOO_MANY_REQUESTS {
            return Err(NetworkError::Api {
                code: i32::from(status.as_u16()),
                message: format!("OpenAlex API error: {}", status),
            });
        }

        let backoff = backoff_delay(attempt);
        let wait = retry_after(response.headers())
            .map_or(backoff, |server| server.max(backoff));
        if attempt >= max_retries {
            return Err(NetworkError::RateLimited(wait.as_secs()));
        }

        warn!(
            attempt = attempt + 1,
            max_retries = max_retries,
            wait_secs = wait.as_secs(),
            "OpenAlex rate limit hit, waiting before retry"
        );
        tokio::time::sleep(wait).await;
        attempt += 1;
    }
}

/// Parse OpenAlex API response into paper records
fn parse_response(json_str: &str) -> Result<Vec<PaperRecord>> {
    let response: OpenAlexResponse = serde_json::from_str(json_str)
        .map_err(|e| NetworkError::Parse(format!("Failed to parse OpenAlex response: {}", e)))?;

    Ok(response.results.into_iter().map(into_paper).collect())
}

fn into_paper(work: OpenAlexWork) -> PaperRecord {
    let authorships = work
        .authorships
        .unwrap_or_default()
        .into_iter()
        .map(|a| {
            let author = a.author.map_or_else(AuthorRef::default, |author| AuthorRef {
                id: author.id.unwrap_or_default(),
                display_name: author
                    .display_name
                    .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            });
            Authorship { author }
        })
        .collect();

    PaperRecord {
        id: work.id.unwrap_or_default(),
        title: work.title.unwrap_or_else(|| "Untitled".to_string()),
        publication_year: work.publication_year.unwrap_or(0),
        doi: work.doi,
        cited_by_count: work.cited_by_count.unwrap_or(0),
        authorships,
        referenced_works: work.referenced_works.unwrap_or_default(),
    }
}
