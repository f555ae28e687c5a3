//! Regex extraction of mirror candidates from fetched documents.

pub mod filter;
mod patterns;

use mirrorscan_core::{CandidateSet, MirrorKind};

/// Trim surrounding whitespace and trailing slashes from a matched candidate.
pub fn normalize(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Scan free-form text for candidate endpoints of one category.
///
/// Extraction only recognizes and normalizes; it never judges. Obvious
/// non-mirrors land in the output here and are removed by [`filter`]. Zero
/// matches is a valid outcome and yields an empty set.
pub fn extract(kind: MirrorKind, text: &str) -> CandidateSet {
    let mut found = CandidateSet::new();
    for re in patterns::for_kind(kind) {
        for m in re.find_iter(text) {
            found.insert(normalize(m.as_str()));
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_proxy_and_filter_drops_canonical() {
        let text = "use https://gh-proxy.com or https://github.com for source";
        let raw = extract(MirrorKind::GithubProxy, text);
        assert!(raw.contains("https://gh-proxy.com"));

        let kept = filter::filter_set(MirrorKind::GithubProxy, raw);
        let expected: CandidateSet = ["https://gh-proxy.com".to_string()].into_iter().collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn normalizes_trailing_slash_and_whitespace() {
        assert_eq!(normalize("  https://ghfast.top/ "), "https://ghfast.top");
        assert_eq!(normalize("https://ghps.cc//"), "https://ghps.cc");
        assert_eq!(normalize("docker.m.daocloud.io"), "docker.m.daocloud.io");
    }

    #[test]
    fn duplicate_mentions_collapse() {
        let text = "https://ghfast.top and again https://ghfast.top/ here";
        let found = extract(MirrorKind::GithubProxy, text);
        assert_eq!(
            found.iter().filter(|u| u.contains("ghfast.top")).count(),
            1
        );
    }

    #[test]
    fn finds_docker_hosts_without_scheme() {
        let text = "configure registry.cn-hangzhou.aliyuncs.com or docker.m.daocloud.io";
        let found = extract(MirrorKind::DockerRegistry, text);
        assert!(found.contains("registry.cn-hangzhou.aliyuncs.com"));
        assert!(found.contains("docker.m.daocloud.io"));
    }

    #[test]
    fn finds_platform_hosted_proxies() {
        let text = "try https://github.abskoop.workers.dev for downloads";
        let found = extract(MirrorKind::GithubProxy, text);
        assert!(found.contains("https://github.abskoop.workers.dev"));
    }

    #[test]
    fn plain_prose_yields_empty_set() {
        let found = extract(MirrorKind::GithubProxy, "no endpoints mentioned here");
        assert!(found.is_empty());
        let found = extract(MirrorKind::DockerRegistry, "nothing to see");
        assert!(found.is_empty());
    }

    #[test]
    fn extraction_is_case_insensitive() {
        let found = extract(MirrorKind::GithubProxy, "see HTTPS://GH-PROXY.COM today");
        assert!(found.contains("HTTPS://GH-PROXY.COM"));
    }
}
