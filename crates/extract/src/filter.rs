//! Candidate filtering.
//!
//! The two categories filter in opposite directions. GitHub proxy patterns
//! over-match all over README prose, so that side is an exclusion list over
//! an open world. Docker registry hosts come from a short known universe, so
//! that side is a closed allow-list and everything else is dropped.

use mirrorscan_core::{CandidateSet, MirrorKind};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Hosts the broad patterns match but which are never mirrors: the canonical
/// services themselves, badge and CDN assets, archives, and bare image files.
static GITHUB_EXCLUDE: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)github\.com",
        r"(?i)raw\.githubusercontent\.com",
        r"(?i)api\.github\.com",
        r"(?i)img\.shields\.io",
        r"(?i)cdn\.jsdelivr\.net",
        r"(?i)docs\.docker\.com",
        r"(?i)blog\.",
        r"(?i)cdn\.",
        r"(?i)web\.archive\.org",
        r"(?i)\.png$",
        r"(?i)\.jpg$",
        r"(?i)\.svg",
    ])
});

static DOCKER_ALLOW: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\.aliyuncs\.com$",
        r"\.tencentcloudcr\.com$",
        r"docker\.m\.daocloud\.io$",
        r"ccr\.ccs\.tencentyun\.com$",
        r"hub-mirror\.c\.163\.com$",
        r"mirror\.baidubce\.com$",
        r"registry\.docker-cn\.com$",
        r"docker\.mirrors\.ustc\.edu\.cn$",
        r"reg-mirror\.qiniu\.com$",
    ])
});

const MIN_GITHUB_URL_LEN: usize = 10;
const PLACEHOLDER_MARKER: &str = "your_code";

/// Decide whether a single normalized candidate survives into probing.
pub fn accept(kind: MirrorKind, candidate: &str) -> bool {
    match kind {
        MirrorKind::GithubProxy => accept_github(candidate),
        MirrorKind::DockerRegistry => accept_docker(candidate),
    }
}

fn accept_github(url: &str) -> bool {
    if !url.starts_with("https://") {
        return false;
    }
    if GITHUB_EXCLUDE.iter().any(|re| re.is_match(url)) {
        return false;
    }
    url.len() > MIN_GITHUB_URL_LEN
}

fn accept_docker(host: &str) -> bool {
    if !host.contains('.') {
        return false;
    }
    // Angle brackets or template markers mean un-substituted documentation.
    if host.contains('<') || host.contains('>') || host.contains(PLACEHOLDER_MARKER) {
        return false;
    }
    DOCKER_ALLOW.iter().any(|re| re.is_match(host))
}

/// Drop rejected candidates from a set. Idempotent: running the filter over
/// its own output changes nothing.
pub fn filter_set(kind: MirrorKind, candidates: CandidateSet) -> CandidateSet {
    let before = candidates.len();
    let kept: CandidateSet = candidates.into_iter().filter(|c| accept(kind, c)).collect();
    debug!(
        kind = %kind,
        kept = kept.len(),
        dropped = before - kept.len(),
        "filtered candidates"
    );
    kept
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}
