use serde::Deserialize;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const DEFAULT_TEST_ASSET: &str =
    "https://raw.githubusercontent.com/weekoo2025/Ghproxy/refs/heads/main/README.md";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub github: GithubProbeConfig,
    #[serde(default)]
    pub docker: DockerProbeConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneralConfig {
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Pause between source-document fetches.
    pub source_delay_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 20,
            source_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourcesConfig {
    /// Repositories (owner/name) whose READMEs are scanned for mirrors.
    pub github_repos: Vec<String>,
    /// Branches tried in order until one README fetch succeeds.
    pub branches: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            github_repos: [
                "hunshcn/gh-proxy",
                "XIU2/TrackersListCollection",
                "521xueweihan/GitHub520",
                "fhefh2015/Fast-GitHub",
                "RC1844/FastGithub",
                "dongyubin/DockerHub",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            branches: vec!["master".to_string(), "main".to_string()],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GithubProbeConfig {
    pub workers: usize,
    /// Raw file fetched through each proxy to verify it relays content.
    pub test_asset: String,
    /// Body must be strictly longer than this to count as real content.
    pub min_content_length: usize,
    pub min_keyword_hits: usize,
}

impl Default for GithubProbeConfig {
    fn default() -> Self {
        Self {
            workers: 3,
            test_asset: DEFAULT_TEST_ASSET.to_string(),
            min_content_length: 100,
            min_keyword_hits: 2,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DockerProbeConfig {
    pub workers: usize,
    /// Registry discovery endpoint appended to each candidate.
    pub probe_path: String,
    /// Strip http(s):// from validated registries before building the report.
    pub strip_scheme: bool,
}

impl Default for DockerProbeConfig {
    fn default() -> Self {
        Self {
            workers: 3,
            probe_path: "/v2/".to_string(),
            strip_scheme: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReportConfig {
    pub json_path: String,
    pub readme_path: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            json_path: "mirrors.json".to_string(),
            readme_path: "README.md".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_full_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.general.request_timeout_secs, 20);
        assert_eq!(config.sources.branches, vec!["master", "main"]);
        assert_eq!(config.github.workers, 3);
        assert_eq!(config.docker.probe_path, "/v2/");
        assert!(config.docker.strip_scheme);
        assert_eq!(config.report.json_path, "mirrors.json");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [github]
            workers = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.github.workers, 8);
        assert_eq!(config.github.min_keyword_hits, 2);
        assert_eq!(config.docker.workers, 3);
    }
}
