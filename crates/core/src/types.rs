use std::collections::BTreeSet;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ScanError;

/// Candidate endpoint strings for one category, deduplicated by exact
/// normalized-string equality. BTreeSet keeps iteration sorted.
pub type CandidateSet = BTreeSet<String>;

/// The two mirror classes this tool validates. Every per-category behavior
/// (extraction patterns, filter rules, probe recipe) dispatches on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorKind {
    /// GitHub file-acceleration proxies (scheme-qualified URLs).
    GithubProxy,
    /// Docker registry mirrors (bare or scheme-qualified hosts).
    DockerRegistry,
}

impl MirrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MirrorKind::GithubProxy => "github",
            MirrorKind::DockerRegistry => "docker",
        }
    }
}

impl fmt::Display for MirrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of a single probe. Every failure mode is a value here,
/// never an error: the runner pattern-matches instead of catching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Available,
    ContentInvalid,
    NotRegistry,
    HttpError,
    Timeout,
    ConnectionError,
    Error,
    Unknown,
}

impl ProbeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeStatus::Available => "available",
            ProbeStatus::ContentInvalid => "content_invalid",
            ProbeStatus::NotRegistry => "not_registry",
            ProbeStatus::HttpError => "http_error",
            ProbeStatus::Timeout => "timeout",
            ProbeStatus::ConnectionError => "connection_error",
            ProbeStatus::Error => "error",
            ProbeStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one probe attempt reports back. Created by the prober, reduced by the
/// validation runner, discarded after the run.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub url: String,
    pub status: ProbeStatus,
    pub response_time_ms: u64,
    pub valid: bool,
    pub content_length: usize,
    pub content_preview: Option<String>,
    pub keywords_found: Vec<String>,
}

impl ProbeReport {
    /// Fresh report in its pre-classification state; probers always overwrite
    /// `status` before returning.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            status: ProbeStatus::Unknown,
            response_time_ms: 0,
            valid: false,
            content_length: 0,
            content_preview: None,
            keywords_found: Vec::new(),
        }
    }
}

/// One category's block in the output record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MirrorList {
    pub count: usize,
    pub urls: Vec<String>,
}

impl MirrorList {
    /// Sorted list with `count` always equal to the list length.
    pub fn from_set(set: &CandidateSet) -> Self {
        let urls: Vec<String> = set.iter().cloned().collect();
        Self {
            count: urls.len(),
            urls,
        }
    }
}

/// The persisted output record of a full run. Replaces the previous run's
/// record wholesale; no history is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MirrorReport {
    pub update_time: String,
    pub github_mirrors: MirrorList,
    pub docker_mirrors: MirrorList,
}

impl MirrorReport {
    pub fn from_sets(github: &CandidateSet, docker: &CandidateSet) -> Self {
        Self {
            update_time: chrono::Utc::now().to_rfc3339(),
            github_mirrors: MirrorList::from_set(github),
            docker_mirrors: MirrorList::from_set(docker),
        }
    }
}

/// Fetches one source document as text. The one production impl does an HTTP
/// GET with a browser user agent; tests stub it.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch_text(&self, url: &Url) -> Result<String, ScanError>;
}

/// Issues exactly one validation request for a candidate and classifies the
/// outcome. Never fails: the report's status carries every failure mode.
#[async_trait]
pub trait Prober: Send + Sync + 'static {
    async fn probe(&self, kind: MirrorKind, candidate: &str) -> ProbeReport;
}
