use mirrorscan_core::MirrorKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// Recognition patterns for GitHub acceleration proxies. Deliberately broad:
/// the filter stage recovers precision afterwards.
static GITHUB_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)https://[^/\s]*(?:gh|github|proxy|mirror|fast)[^/\s]*\.[^/\s]+",
        r"(?i)https://[^/\s]+\.(?:workers\.dev|cf|vercel\.app|herokuapp\.com|netlify\.app)",
        r"(?i)https://(?:gh-proxy|ghfast|ghproxy|ghps)\.[^/\s]+",
        r"(?i)https://hub\.gitmirror\.com",
    ])
});

/// Recognition patterns for Docker registry mirrors. The universe of real
/// registry hosts is small, so most of these name exact domains.
static DOCKER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)[^/\s]*\.(?:aliyuncs\.com|tencentcloudcr\.com)",
        r"(?i)docker\.m\.daocloud\.io",
        r"(?i)ccr\.ccs\.tencentyun\.com",
        r"(?i)hub-mirror\.c\.163\.com",
        r"(?i)mirror\.baidubce\.com",
        r"(?i)registry\.docker-cn\.com",
        r"(?i)docker\.mirrors\.ustc\.edu\.cn",
        r"(?i)reg-mirror\.qiniu\.com",
    ])
});

pub(crate) fn for_kind(kind: MirrorKind) -> &'static [Regex] {
    match kind {
        MirrorKind::GithubProxy => &GITHUB_PATTERNS,
        MirrorKind::DockerRegistry => &DOCKER_PATTERNS,
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}
