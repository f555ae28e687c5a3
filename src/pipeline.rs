use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, error, info, warn};
use url::Url;

use mirrorscan_core::config::AppConfig;
use mirrorscan_core::{CandidateSet, MirrorKind, MirrorReport, SourceFetcher};
use mirrorscan_extract::filter;
use mirrorscan_probe::{validate_all, HttpFetcher, HttpProber};
use mirrorscan_report::ReportStore;

use crate::seeds;

/// Run the full update: seed, crawl sources, filter, validate, publish.
pub async fn run_update(config: AppConfig, sources: Option<String>) -> Result<()> {
    let started = Instant::now();

    let repos = resolve_sources(sources, &config)?;
    info!(repos = repos.len(), "starting mirror update");

    let mut github = seeded(MirrorKind::GithubProxy);
    let mut docker = seeded(MirrorKind::DockerRegistry);
    info!(
        github = github.len(),
        docker = docker.len(),
        "seeded known mirrors"
    );

    let fetcher = HttpFetcher::new(&config.general)?;
    harvest_sources(&fetcher, &config, &repos, &mut github, &mut docker).await;

    let github = filter::filter_set(MirrorKind::GithubProxy, github);
    let docker = filter::filter_set(MirrorKind::DockerRegistry, docker);
    info!(
        github = github.len(),
        docker = docker.len(),
        "candidates after filtering"
    );

    let prober = Arc::new(HttpProber::new(
        &config.general,
        config.github.clone(),
        config.docker.clone(),
    )?);

    let valid_github = validate_all(
        prober.clone(),
        MirrorKind::GithubProxy,
        github,
        config.github.workers,
    )
    .await;
    let valid_docker = validate_all(
        prober,
        MirrorKind::DockerRegistry,
        docker,
        config.docker.workers,
    )
    .await;

    let valid_docker = if config.docker.strip_scheme {
        strip_registry_scheme(valid_docker)
    } else {
        valid_docker
    };

    let report = MirrorReport::from_sets(&valid_github, &valid_docker);
    let store = ReportStore::new(&config.report);
    store.write_report(&report)?;

    // A broken README is an inconvenience; a lost report would be a failed
    // run. Only the latter aborts.
    if let Err(e) = store.render_readme_file() {
        error!(error = %e, "readme rendering failed");
    }

    info!(
        github = valid_github.len(),
        docker = valid_docker.len(),
        elapsed_secs = started.elapsed().as_secs(),
        "mirror update complete"
    );
    Ok(())
}

fn resolve_sources(sources: Option<String>, config: &AppConfig) -> Result<Vec<String>> {
    let mut repos: Vec<String> = Vec::new();

    if let Some(arg) = sources {
        if std::path::Path::new(&arg).exists() {
            let content = std::fs::read_to_string(&arg)?;
            repos.extend(
                content
                    .lines()
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty()),
            );
        } else {
            repos.extend(
                arg.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
            );
        }
    }

    if repos.is_empty() {
        repos.extend(config.sources.github_repos.iter().cloned());
    }
    Ok(repos)
}

fn seeded(kind: MirrorKind) -> CandidateSet {
    seeds::known_mirrors(kind)
        .iter()
        .map(|s| mirrorscan_extract::normalize(s))
        .collect()
}

/// Fetch each source repo's README, trying branches in order, and extract
/// candidates of both categories from whatever came back. A source that
/// fails on every branch is skipped; the run continues.
async fn harvest_sources(
    fetcher: &dyn SourceFetcher,
    config: &AppConfig,
    repos: &[String],
    github: &mut CandidateSet,
    docker: &mut CandidateSet,
) {
    let delay = Duration::from_millis(config.general.source_delay_ms);

    for (i, repo) in repos.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match fetch_readme(fetcher, config, repo).await {
            Some(text) => {
                let found_github = mirrorscan_extract::extract(MirrorKind::GithubProxy, &text);
                let found_docker = mirrorscan_extract::extract(MirrorKind::DockerRegistry, &text);
                info!(
                    repo = %repo,
                    github = found_github.len(),
                    docker = found_docker.len(),
                    "source harvested"
                );
                github.extend(found_github);
                docker.extend(found_docker);
            }
            None => warn!(repo = %repo, "source unavailable on all branches, skipping"),
        }
    }
}

async fn fetch_readme(
    fetcher: &dyn SourceFetcher,
    config: &AppConfig,
    repo: &str,
) -> Option<String> {
    for branch in &config.sources.branches {
        let raw = format!(
            "https://raw.githubusercontent.com/{}/{}/README.md",
            repo, branch
        );
        let url = match Url::parse(&raw) {
            Ok(u) => u,
            Err(e) => {
                warn!(repo = %repo, error = %e, "invalid source URL");
                return None;
            }
        };

        match fetcher.fetch_text(&url).await {
            Ok(text) => return Some(text),
            Err(e) => {
                debug!(repo = %repo, branch = %branch, error = %e, "branch fetch failed");
            }
        }
    }
    None
}

/// Registry mirrors are published as bare hosts, ready for daemon.json.
fn strip_registry_scheme(set: CandidateSet) -> CandidateSet {
    set.into_iter()
        .map(|m| {
            if let Some(rest) = m.strip_prefix("https://") {
                rest.to_string()
            } else if let Some(rest) = m.strip_prefix("http://") {
                rest.to_string()
            } else {
                m
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use mirrorscan_core::config::GeneralConfig;
    use mirrorscan_core::ScanError;

    struct StubFetcher {
        responses: HashMap<String, String>,
    }

    #[async_trait]
    impl SourceFetcher for StubFetcher {
        async fn fetch_text(&self, url: &Url) -> Result<String, ScanError> {
            self.responses
                .get(url.as_str())
                .cloned()
                .ok_or(ScanError::HttpStatus(404))
        }
    }

    fn quiet_config() -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                source_delay_ms: 0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn failing_source_is_skipped_not_fatal() {
        let mut responses = HashMap::new();
        responses.insert(
            "https://raw.githubusercontent.com/good/repo/master/README.md".to_string(),
            "mirror list: https://gh-proxy.com and registry.cn-hangzhou.aliyuncs.com".to_string(),
        );
        let fetcher = StubFetcher { responses };

        let config = quiet_config();
        let repos = vec!["good/repo".to_string(), "gone/repo".to_string()];
        let mut github = CandidateSet::new();
        let mut docker = CandidateSet::new();

        harvest_sources(&fetcher, &config, &repos, &mut github, &mut docker).await;

        assert!(github.contains("https://gh-proxy.com"));
        assert!(docker.contains("registry.cn-hangzhou.aliyuncs.com"));
    }

    #[tokio::test]
    async fn falls_back_to_next_branch() {
        let mut responses = HashMap::new();
        responses.insert(
            "https://raw.githubusercontent.com/moved/repo/main/README.md".to_string(),
            "now at https://ghfast.top".to_string(),
        );
        let fetcher = StubFetcher { responses };

        let config = quiet_config();
        let repos = vec!["moved/repo".to_string()];
        let mut github = CandidateSet::new();
        let mut docker = CandidateSet::new();

        harvest_sources(&fetcher, &config, &repos, &mut github, &mut docker).await;

        assert!(github.contains("https://ghfast.top"));
    }

    #[test]
    fn strips_schemes_for_registry_output() {
        let set: CandidateSet = [
            "https://registry.cn-beijing.aliyuncs.com".to_string(),
            "http://mirror.azure.cn".to_string(),
            "docker.m.daocloud.io".to_string(),
        ]
        .into_iter()
        .collect();

        let stripped = strip_registry_scheme(set);
        let expected: CandidateSet = [
            "registry.cn-beijing.aliyuncs.com".to_string(),
            "mirror.azure.cn".to_string(),
            "docker.m.daocloud.io".to_string(),
        ]
        .into_iter()
        .collect();
        assert_eq!(stripped, expected);
    }

    #[test]
    fn seeds_are_normalized_and_deduplicated() {
        let github = seeded(MirrorKind::GithubProxy);
        assert!(github.contains("https://gh-proxy.com"));
        assert!(github.iter().all(|u| !u.ends_with('/')));

        let docker = seeded(MirrorKind::DockerRegistry);
        assert!(docker.contains("https://docker.m.daocloud.io"));
    }

    #[test]
    fn explicit_sources_override_config() {
        let config = quiet_config();
        let repos =
            resolve_sources(Some("a/one, b/two".to_string()), &config).unwrap();
        assert_eq!(repos, vec!["a/one".to_string(), "b/two".to_string()]);

        let defaults = resolve_sources(None, &config).unwrap();
        assert_eq!(defaults, config.sources.github_repos);
    }

    #[test]
    fn shipped_default_config_parses() {
        let config: AppConfig = toml::from_str(include_str!("../config/default.toml")).unwrap();
        assert_eq!(config.github.workers, 3);
        assert_eq!(config.docker.workers, 3);
        assert_eq!(config.sources.branches, vec!["master", "main"]);
        assert!(config.docker.strip_scheme);
    }
}
