/// Catalog source loading.
///
/// A catalog document lives either on disk (the handbook ships it as
/// `assets/data/approaches.json`) or behind an HTTP URL. Each call performs a
/// single fetch with no retry; callers decide what a failure means for them.
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::error::CommonError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// Interpret a configured location. Anything starting with `http://` or
    /// `https://` is a URL; everything else is a filesystem path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

#[derive(Clone)]
pub struct SourceFetcher {
    http: reqwest::Client,
    timeout: Duration,
}

impl SourceFetcher {
    pub fn new(timeout: Duration) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("text2sql-handbook/approaches-catalog")
            .build()?;
        Ok(Self { http, timeout })
    }

    /// Fetch the raw text of a catalog source.
    ///
    /// HTTP requests are bounded by the configured timeout; non-2xx responses
    /// are reported as `CommonError::Status`.
    pub async fn fetch_text(&self, source: &CatalogSource) -> Result<String, CommonError> {
        match source {
            CatalogSource::File(path) => {
                debug!(path = %path.display(), "reading catalog file");
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| CommonError::Io {
                        path: path.display().to_string(),
                        source,
                    })
            }
            CatalogSource::Url(url) => {
                debug!(url, timeout_ms = self.timeout.as_millis(), "fetching catalog");
                let resp = self.http.get(url).timeout(self.timeout).send().await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(CommonError::Status {
                        status: status.as_u16(),
                        url: url.clone(),
                    });
                }
                Ok(resp.text().await?)
            }
        }
    }
}
