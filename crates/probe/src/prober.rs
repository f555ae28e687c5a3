use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, warn};

use mirrorscan_core::config::{DockerProbeConfig, GeneralConfig, GithubProbeConfig};
use mirrorscan_core::{MirrorKind, ProbeReport, ProbeStatus, Prober, ScanError};

/// Keywords whose presence marks a body as mirror-related content rather
/// than a parked domain or an error shell.
const CONTENT_KEYWORDS: &[&str] = &["github", "mirror", "镜像", "proxy", "docker", "加速"];

/// Header set by conforming registry implementations on `/v2/` responses.
const REGISTRY_API_HEADER: &str = "docker-distribution-api-version";

const PREVIEW_CHARS: usize = 100;

/// Probes candidates over HTTP and classifies what answered.
///
/// GitHub proxies are asked to relay a small well-known asset and must hand
/// back plausible mirror content. Docker registries are asked for the
/// `/v2/` API root, where a 401 is as good as a 200: the endpoint is alive
/// and speaking the registry protocol, it just wants credentials.
pub struct HttpProber {
    client: reqwest::Client,
    github: GithubProbeConfig,
    docker: DockerProbeConfig,
}

impl HttpProber {
    pub fn new(
        general: &GeneralConfig,
        github: GithubProbeConfig,
        docker: DockerProbeConfig,
    ) -> Result<Self, ScanError> {
        let client = reqwest::Client::builder()
            .user_agent(general.user_agent.clone())
            .timeout(Duration::from_secs(general.request_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ScanError::Network(e.to_string()))?;

        Ok(Self {
            client,
            github,
            docker,
        })
    }

    async fn probe_github(&self, mirror: &str, report: &mut ProbeReport) {
        let target = format!("{}/{}", mirror.trim_end_matches('/'), self.github.test_asset);
        let start = Instant::now();

        let resp = match self.client.get(&target).send().await {
            Ok(r) => r,
            Err(e) => {
                report.response_time_ms = start.elapsed().as_millis() as u64;
                report.status = transport_status(&e);
                warn!(mirror = %mirror, error = %e, "github probe transport failure");
                return;
            }
        };

        let status = resp.status().as_u16();
        if status != 200 {
            report.response_time_ms = start.elapsed().as_millis() as u64;
            report.status = ProbeStatus::HttpError;
            debug!(mirror = %mirror, status, "github probe rejected");
            return;
        }

        let body = match resp.text().await {
            Ok(b) => b,
            Err(e) => {
                report.response_time_ms = start.elapsed().as_millis() as u64;
                report.status = transport_status(&e);
                return;
            }
        };
        report.response_time_ms = start.elapsed().as_millis() as u64;

        let chars = body.chars().count();
        report.content_length = chars;
        report.content_preview = Some(body.chars().take(PREVIEW_CHARS).collect());

        let lower = body.to_lowercase();
        report.keywords_found = CONTENT_KEYWORDS
            .iter()
            .filter(|kw| lower.contains(**kw))
            .map(|kw| kw.to_string())
            .collect();

        if chars > self.github.min_content_length
            && report.keywords_found.len() >= self.github.min_keyword_hits
        {
            report.status = ProbeStatus::Available;
            report.valid = true;
        } else {
            report.status = ProbeStatus::ContentInvalid;
        }
    }

    async fn probe_docker(&self, mirror: &str, report: &mut ProbeReport) {
        let target = format!("{}{}", registry_base(mirror), self.docker.probe_path);
        let start = Instant::now();

        let resp = match self.client.get(&target).send().await {
            Ok(r) => r,
            Err(e) => {
                report.response_time_ms = start.elapsed().as_millis() as u64;
                report.status = transport_status(&e);
                warn!(mirror = %mirror, error = %e, "docker probe transport failure");
                return;
            }
        };
        report.response_time_ms = start.elapsed().as_millis() as u64;

        match resp.status().as_u16() {
            200 => {
                let has_header = resp.headers().contains_key(REGISTRY_API_HEADER);
                let body = resp.text().await.unwrap_or_default();
                let lower = body.to_lowercase();
                if has_header || lower.contains("docker") || lower.contains("registry") {
                    report.status = ProbeStatus::Available;
                    report.valid = true;
                } else {
                    report.status = ProbeStatus::NotRegistry;
                }
            }
            // Auth-gated /v2/ still proves a live registry endpoint.
            401 => {
                report.status = ProbeStatus::Available;
                report.valid = true;
            }
            status => {
                report.status = ProbeStatus::HttpError;
                debug!(mirror = %mirror, status, "docker probe rejected");
            }
        }
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, kind: MirrorKind, candidate: &str) -> ProbeReport {
        let mut report = ProbeReport::new(candidate);
        match kind {
            MirrorKind::GithubProxy => self.probe_github(candidate, &mut report).await,
            MirrorKind::DockerRegistry => self.probe_docker(candidate, &mut report).await,
        }
        debug!(
            kind = %kind,
            url = %report.url,
            status = %report.status,
            ms = report.response_time_ms,
            "probe finished"
        );
        report
    }
}

/// Registry candidates may arrive as bare hosts; default them to https.
pub(crate) fn registry_base(mirror: &str) -> String {
    let trimmed = mirror.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

fn transport_status(e: &reqwest::Error) -> ProbeStatus {
    if e.is_timeout() {
        ProbeStatus::Timeout
    } else if e.is_connect() {
        ProbeStatus::ConnectionError
    } else {
        ProbeStatus::Error
    }
}
