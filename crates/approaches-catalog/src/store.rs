/// Catalog store: the full list of approach records as loaded from the
/// catalog source.
///
/// Loading never returns an error to the caller. A failed fetch or a malformed
/// payload leaves the store empty in the `Failed` state, which the renderer
/// turns into an inline error message. There is no automatic retry.
use std::collections::HashSet;

use tracing::{error, info, warn};

use crate::error::AppError;
use crate::model::{ApproachRecord, CatalogDocument};
use handbook_common::fetch::{CatalogSource, SourceFetcher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct CatalogStore {
    approaches: Vec<ApproachRecord>,
    status: LoadStatus,
}

impl CatalogStore {
    pub fn from_records(approaches: Vec<ApproachRecord>) -> Self {
        Self {
            approaches,
            status: LoadStatus::Ready,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            approaches: Vec::new(),
            status: LoadStatus::Failed(reason.into()),
        }
    }

    /// Fetch and parse the catalog once.
    pub async fn load(fetcher: &SourceFetcher, source: &CatalogSource) -> Self {
        match fetch_catalog(fetcher, source).await {
            Ok(approaches) => {
                info!(source = %source, approaches = approaches.len(), "catalog loaded");
                warn_suspect_slugs(&approaches);
                Self::from_records(approaches)
            }
            Err(e) => {
                error!(source = %source, error = %e, "error loading approaches");
                Self::failed(e.to_string())
            }
        }
    }

    pub fn approaches(&self) -> &[ApproachRecord] {
        &self.approaches
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, LoadStatus::Failed(_))
    }

    /// Look up an approach by slug, ignoring ASCII case.
    pub fn find(&self, slug: &str) -> Option<&ApproachRecord> {
        self.approaches
            .iter()
            .find(|a| a.slug.eq_ignore_ascii_case(slug))
    }
}

pub async fn fetch_catalog(
    fetcher: &SourceFetcher,
    source: &CatalogSource,
) -> Result<Vec<ApproachRecord>, AppError> {
    let text = fetcher.fetch_text(source).await?;
    parse_catalog(&text)
}

/// Parse an `approaches.json` document. Records are returned in document
/// order without dedup or validation; only a document that is not JSON or has
/// no `approaches` list is rejected.
pub fn parse_catalog(text: &str) -> Result<Vec<ApproachRecord>, AppError> {
    let document: CatalogDocument = serde_json::from_str(text)?;
    Ok(document.approaches)
}

fn warn_suspect_slugs(approaches: &[ApproachRecord]) {
    let mut seen = HashSet::new();
    for approach in approaches {
        if approach.slug.is_empty() {
            warn!(title = %approach.title, "approach without a slug in catalog");
            continue;
        }
        if !seen.insert(approach.slug.as_str()) {
            warn!(slug = %approach.slug, "duplicate approach slug in catalog");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use super::*;
    use crate::test_support::catalog_json;

    fn fetcher() -> SourceFetcher {
        SourceFetcher::new(Duration::from_secs(5)).expect("fetcher")
    }

    fn write_catalog(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write catalog");
        file
    }

    #[test]
    fn test_parse_catalog_keeps_order_and_duplicates() {
        let text = r#"{"approaches": [{"slug": "b"}, {"slug": "a"}, {"slug": "b"}]}"#;
        let approaches = parse_catalog(text).expect("valid catalog");
        let slugs: Vec<&str> = approaches.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, ["b", "a", "b"]);
    }

    #[test]
    fn test_parse_catalog_rejects_malformed_payloads() {
        assert!(matches!(parse_catalog("not json"), Err(AppError::Parse(_))));
        assert!(matches!(parse_catalog(r#"{"items": []}"#), Err(AppError::Parse(_))));
        assert!(matches!(parse_catalog(r#"{"approaches": {}}"#), Err(AppError::Parse(_))));
    }

    #[test]
    fn test_incomplete_records_load_with_the_rest() {
        let text = r#"{"approaches": [
            {"slug": "ok", "title": "Fine"},
            {"title": "No slug"},
            {"slug": "nulls", "title": null, "tags": null},
            {"slug": "float-stars", "github": {"stars": 12.0}}
        ]}"#;
        let approaches = parse_catalog(text).expect("incomplete records still parse");
        let slugs: Vec<&str> = approaches.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, ["ok", "", "nulls", "float-stars"]);
        assert_eq!(approaches[1].title, "No slug");
        assert_eq!(approaches[2].title, "");
        assert!(approaches[2].tags.is_empty());
        assert_eq!(approaches[3].stars(), 12);

        let store = CatalogStore::from_records(approaches);
        let tree = crate::render::render(&store.approaches().iter().collect::<Vec<_>>());
        assert_eq!(tree.result_count(), Some("4 approaches"));
        assert_eq!(tree.cards()[1].href, "approaches/.html");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let file = write_catalog(&catalog_json().to_string());
        let source = CatalogSource::File(file.path().to_path_buf());

        let store = CatalogStore::load(&fetcher(), &source).await;
        assert_eq!(store.status(), &LoadStatus::Ready);
        assert_eq!(store.approaches().len(), 3);
        assert_eq!(store.approaches()[0].slug, "sql-agent");
    }

    #[tokio::test]
    async fn test_load_failure_leaves_store_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = CatalogSource::File(dir.path().join("missing.json"));

        let store = CatalogStore::load(&fetcher(), &source).await;
        assert!(store.is_failed());
        assert!(store.approaches().is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_file_fails() {
        let file = write_catalog(r#"{"approaches": "#);
        let source = CatalogSource::File(file.path().to_path_buf());

        let store = CatalogStore::load(&fetcher(), &source).await;
        let LoadStatus::Failed(reason) = store.status() else {
            panic!("expected failure");
        };
        assert!(reason.starts_with("malformed catalog"), "reason: {reason}");
    }

    #[test]
    fn test_find_ignores_case() {
        let store = CatalogStore::from_records(crate::test_support::catalog());
        assert_eq!(store.find("Few-Shot").map(|a| a.title.as_str()), Some("Few-Shot Prompting"));
        assert!(store.find("unknown").is_none());
    }

    /// Parse the sample catalog shipped with the handbook, when present.
    #[test]
    fn test_parse_shipped_catalog() {
        let path = std::path::Path::new("../../assets/data/approaches.json");
        if !path.exists() {
            eprintln!("skipping test_parse_shipped_catalog: {} not found", path.display());
            return;
        }

        let text = std::fs::read_to_string(path).expect("read sample catalog");
        let approaches = parse_catalog(&text).expect("sample catalog parses");
        assert!(!approaches.is_empty());
        assert!(approaches.iter().all(|a| !a.slug.is_empty()));
        assert!(approaches.iter().all(|a| a.published_at().is_some()));
    }
}
