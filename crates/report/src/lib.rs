//! Persistence of scan results: the JSON report and the rendered README.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use mirrorscan_core::config::ReportConfig;
use mirrorscan_core::MirrorReport;

mod readme;

pub use self::readme::render_readme;

pub struct ReportStore {
    json_path: PathBuf,
    readme_path: PathBuf,
}

impl ReportStore {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            json_path: PathBuf::from(&config.json_path),
            readme_path: PathBuf::from(&config.readme_path),
        }
    }

    pub fn json_path(&self) -> &Path {
        &self.json_path
    }

    /// Write the machine-readable report. Failure here fails the run: a
    /// scan whose results cannot be persisted has produced nothing.
    pub fn write_report(&self, report: &MirrorReport) -> Result<()> {
        if let Some(parent) = self.json_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string_pretty(report)?;
        fs::write(&self.json_path, json)
            .with_context(|| format!("writing {}", self.json_path.display()))?;

        info!(
            path = %self.json_path.display(),
            github = report.github_mirrors.count,
            docker = report.docker_mirrors.count,
            "report written"
        );
        Ok(())
    }

    pub fn load_report(&self) -> Result<MirrorReport> {
        let raw = fs::read_to_string(&self.json_path)
            .with_context(|| format!("reading {}", self.json_path.display()))?;
        let report = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.json_path.display()))?;
        Ok(report)
    }

    /// Re-render the human-readable README from the persisted report.
    pub fn render_readme_file(&self) -> Result<()> {
        let report = self.load_report()?;
        let markdown = readme::render_readme(&report);
        fs::write(&self.readme_path, markdown)
            .with_context(|| format!("writing {}", self.readme_path.display()))?;

        info!(path = %self.readme_path.display(), "readme rendered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirrorscan_core::CandidateSet;

    fn store_in(dir: &tempfile::TempDir) -> ReportStore {
        let config = ReportConfig {
            json_path: dir
                .path()
                .join("mirrors.json")
                .to_string_lossy()
                .into_owned(),
            readme_path: dir.path().join("README.md").to_string_lossy().into_owned(),
        };
        ReportStore::new(&config)
    }

    fn sample_report() -> MirrorReport {
        let github: CandidateSet = [
            "https://ghfast.top".to_string(),
            "https://gh-proxy.com".to_string(),
        ]
        .into_iter()
        .collect();
        let docker: CandidateSet = ["docker.m.daocloud.io".to_string()].into_iter().collect();
        MirrorReport::from_sets(&github, &docker)
    }

    #[test]
    fn report_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let report = sample_report();

        store.write_report(&report).unwrap();
        let loaded = store.load_report().unwrap();
        assert_eq!(loaded, report);
    }

    #[test]
    fn json_uses_stable_field_names_and_sorted_urls() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write_report(&sample_report()).unwrap();

        let raw = std::fs::read_to_string(store.json_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert!(value.get("update_time").is_some());
        assert_eq!(value["github_mirrors"]["count"], 2);
        assert_eq!(value["docker_mirrors"]["count"], 1);
        let urls = value["github_mirrors"]["urls"].as_array().unwrap();
        assert_eq!(urls[0], "https://gh-proxy.com");
        assert_eq!(urls[1], "https://ghfast.top");
    }

    #[test]
    fn missing_report_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load_report().is_err());
    }

    #[test]
    fn readme_renders_from_persisted_report() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write_report(&sample_report()).unwrap();
        store.render_readme_file().unwrap();

        let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert!(readme.contains("https://gh-proxy.com"));
        assert!(readme.contains("docker.m.daocloud.io"));
    }
}
