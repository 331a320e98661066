/// MCP server implementation for the Text2SQL Handbook approach catalog.
///
/// Exposes the catalog pipeline as tools:
/// - `list_approaches`: one-shot filter/search/sort over the catalog
/// - `get_approach`: full record for a slug
/// - `set_filter`, `set_search`, `set_sort`, `reset_filters`: session controls
/// - `render_html`: card-grid markup for the session's current view
/// - `reload_catalog`: fetch the catalog source again
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::controller::CatalogSession;
use crate::error::AppError;
use crate::filter::{FilterAction, FilterCategory, FilterState, FilterValue};
use crate::html;
use crate::model::ApproachRecord;
use crate::render::{render, DisplayTree};
use crate::sort::SortKey;
use crate::store::{CatalogStore, LoadStatus};
use crate::view::compute_view;
use handbook_common::fetch::{CatalogSource, SourceFetcher};
use handbook_common::mcp_api::{
    ApproachDetailResponse, GetApproachParams, HtmlResponse, ListApproachesParams,
    ReloadCatalogResponse, SetFilterParams, SetSearchParams, SetSortParams,
};

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct FilterStateInfo {
    pub difficulty: String,
    pub tech_stack: String,
    pub llm_model: String,
    pub database: String,
    pub search_query: String,
    pub sort: String,
}

impl From<&FilterState> for FilterStateInfo {
    fn from(state: &FilterState) -> Self {
        Self {
            difficulty: state.difficulty.as_str().to_string(),
            tech_stack: state.tech_stack.as_str().to_string(),
            llm_model: state.llm_model.as_str().to_string(),
            database: state.database.as_str().to_string(),
            search_query: state.search_query.clone(),
            sort: state.sort_key.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ViewResponse {
    pub state: FilterStateInfo,
    pub view: DisplayTree,
}

#[derive(Clone)]
pub struct ApproachesServer {
    session: Arc<RwLock<CatalogSession>>,
    fetcher: SourceFetcher,
    source: CatalogSource,
    tool_router: ToolRouter<ApproachesServer>,
}

impl ApproachesServer {
    pub fn new(session: CatalogSession, fetcher: SourceFetcher, source: CatalogSource) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            fetcher,
            source,
            tool_router: Self::tool_router(),
        }
    }

    async fn update(
        &self,
        apply: impl FnOnce(&mut CatalogSession) -> DisplayTree,
    ) -> Json<ViewResponse> {
        let mut session = self.session.write().await;
        let view = apply(&mut *session);
        debug!(
            results = view.result_count().unwrap_or("error"),
            cards = view.cards().len(),
            "session view updated"
        );
        Json(ViewResponse {
            state: FilterStateInfo::from(session.state()),
            view,
        })
    }
}

#[tool_router]
impl ApproachesServer {
    #[tool(description = "List Text2SQL approaches matching optional filters (difficulty, tech_stack, llm_model, database), a free-text search and a sort order. Does not change the session's filters.")]
    async fn list_approaches(
        &self,
        Parameters(params): Parameters<ListApproachesParams>,
    ) -> Result<Json<ViewResponse>, String> {
        let state = state_from_params(&params).map_err(|e| e.to_string())?;

        let session = self.session.read().await;
        let view = if session.store().is_failed() {
            DisplayTree::load_error()
        } else {
            render(&compute_view(session.store().approaches(), &state))
        };

        Ok(Json(ViewResponse {
            state: FilterStateInfo::from(&state),
            view,
        }))
    }

    #[tool(description = "Get the full record of a Text2SQL approach by slug (e.g. 'schema-linking-rag').")]
    async fn get_approach(
        &self,
        Parameters(params): Parameters<GetApproachParams>,
    ) -> Result<Json<ApproachDetailResponse>, String> {
        let slug = params.slug.trim().to_string();
        if slug.is_empty() {
            return Err("slug must not be empty".to_string());
        }

        let session = self.session.read().await;
        let approach = session
            .store()
            .find(&slug)
            .ok_or_else(|| AppError::NotFound(slug.clone()).to_string())?;

        Ok(Json(to_api_approach(approach)))
    }

    #[tool(description = "Set one filter category of the session ('difficulty', 'tech', 'llm' or 'database') to a value, or to 'all' to clear it. Returns the updated view.")]
    async fn set_filter(
        &self,
        Parameters(params): Parameters<SetFilterParams>,
    ) -> Result<Json<ViewResponse>, String> {
        let category: FilterCategory = params
            .category
            .parse()
            .map_err(|e: AppError| e.to_string())?;
        let value = filter_value(&params.value);
        Ok(self.update(|s| s.set_filter(category, value)).await)
    }

    #[tool(description = "Set the session's free-text search. Matches title, description, tags, LLM model and database. An empty query clears the search.")]
    async fn set_search(
        &self,
        Parameters(params): Parameters<SetSearchParams>,
    ) -> Result<Json<ViewResponse>, String> {
        Ok(self.update(|s| s.set_search(params.query)).await)
    }

    #[tool(description = "Change the session's sort order ('recent', 'difficulty-easy', 'difficulty-hard', 'alphabetical', 'popular'). Reorders the current results without re-filtering.")]
    async fn set_sort(
        &self,
        Parameters(params): Parameters<SetSortParams>,
    ) -> Result<Json<ViewResponse>, String> {
        let key: SortKey = params.sort.parse().map_err(|e: AppError| e.to_string())?;
        Ok(self.update(|s| s.set_sort(key)).await)
    }

    #[tool(description = "Reset every session filter to 'all', clear the search and sort by most recent.")]
    async fn reset_filters(&self) -> Result<Json<ViewResponse>, String> {
        Ok(self.update(|s| s.reset()).await)
    }

    #[tool(description = "Render the session's current view as the handbook's card-grid HTML.")]
    async fn render_html(&self) -> Result<Json<HtmlResponse>, String> {
        let session = self.session.read().await;
        Ok(Json(HtmlResponse {
            html: html::render_html(&session.current()),
        }))
    }

    #[tool(description = "Reload the approach catalog from its configured source. Session filters are kept.")]
    async fn reload_catalog(&self) -> Result<Json<ReloadCatalogResponse>, String> {
        info!(source = %self.source, "reload_catalog tool invoked");

        // Fetch outside the lock so reads keep being served meanwhile.
        let store = CatalogStore::load(&self.fetcher, &self.source).await;
        let mut session = self.session.write().await;
        session.replace_store(store);

        let store = session.store();
        let error = match store.status() {
            LoadStatus::Ready => None,
            LoadStatus::Failed(reason) => Some(reason.clone()),
        };

        Ok(Json(ReloadCatalogResponse {
            loaded: error.is_none(),
            source: self.source.to_string(),
            approach_count: store.approaches().len(),
            error,
        }))
    }
}

/// Build a one-off filter state from tool parameters. Missing or blank
/// values mean "all".
fn state_from_params(params: &ListApproachesParams) -> Result<FilterState, AppError> {
    let mut state = FilterState::default();

    for (category, value) in [
        (FilterCategory::Difficulty, &params.difficulty),
        (FilterCategory::TechStack, &params.tech_stack),
        (FilterCategory::LlmModel, &params.llm_model),
        (FilterCategory::Database, &params.database),
    ] {
        if let Some(value) = value {
            state = state.apply(FilterAction::SetFilter(category, filter_value(value)));
        }
    }

    if let Some(query) = &params.search {
        state = state.apply(FilterAction::SetSearch(query.clone()));
    }

    if let Some(sort) = &params.sort {
        state = state.apply(FilterAction::SetSort(sort.parse()?));
    }

    Ok(state)
}

fn filter_value(raw: &str) -> FilterValue {
    let raw = raw.trim();
    if raw.is_empty() {
        FilterValue::All
    } else {
        FilterValue::parse(raw)
    }
}

fn to_api_approach(approach: &ApproachRecord) -> ApproachDetailResponse {
    ApproachDetailResponse {
        slug: approach.slug.clone(),
        title: approach.title.clone(),
        short_description: approach.short_description.clone(),
        description: approach.description.clone(),
        difficulty: approach.difficulty.to_string(),
        tags: approach.tags.clone(),
        llm_model: approach.llm_model.clone(),
        database: approach.database.clone(),
        featured: approach.featured,
        read_time: approach.read_time.clone(),
        date_published: approach.date_published.clone(),
        github_stars: approach.stars(),
        href: approach.detail_href(),
    }
}

#[tool_handler]
impl ServerHandler for ApproachesServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "approaches-catalog".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Text2SQL Handbook approach catalog. Use list_approaches for one-off \
                 filtered/sorted listings and get_approach for a single record. The \
                 set_filter, set_search, set_sort and reset_filters tools drive a \
                 persistent browsing session whose current view render_html turns into \
                 card markup. reload_catalog re-reads the catalog source."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use std::io::Write;

    use super::*;
    use crate::test_support::{catalog, catalog_json};

    fn server() -> ApproachesServer {
        let session = CatalogSession::new(CatalogStore::from_records(catalog()));
        let fetcher = SourceFetcher::new(Duration::from_secs(5)).expect("fetcher");
        ApproachesServer::new(session, fetcher, CatalogSource::parse("assets/data/approaches.json"))
    }

    fn slugs(view: &DisplayTree) -> Vec<String> {
        view.cards().iter().map(|c| c.slug.clone()).collect()
    }

    #[test]
    fn tools_publish_output_schemas() {
        let tools = ApproachesServer::tool_router().list_all();
        for name in [
            "list_approaches",
            "get_approach",
            "set_filter",
            "set_search",
            "set_sort",
            "reset_filters",
            "render_html",
            "reload_catalog",
        ] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }

    #[test]
    fn test_state_from_params() {
        let params = ListApproachesParams {
            difficulty: Some("all".to_string()),
            database: Some(" postgres ".to_string()),
            llm_model: Some(String::new()),
            sort: Some("popular".to_string()),
            ..Default::default()
        };
        let state = state_from_params(&params).expect("valid params");
        assert_eq!(state.difficulty, FilterValue::All);
        assert_eq!(state.database, FilterValue::Value("postgres".to_string()));
        assert_eq!(state.llm_model, FilterValue::All);
        assert_eq!(state.sort_key, SortKey::Popular);

        let bad = ListApproachesParams {
            sort: Some("newest".to_string()),
            ..Default::default()
        };
        assert!(matches!(state_from_params(&bad), Err(AppError::UnknownSortKey(_))));
    }

    #[tokio::test]
    async fn test_list_approaches_does_not_touch_session() {
        let server = server();
        let params = ListApproachesParams {
            database: Some("postgres".to_string()),
            ..Default::default()
        };
        let Json(response) = server
            .list_approaches(Parameters(params))
            .await
            .expect("list succeeds");
        assert_eq!(slugs(&response.view), ["sql-agent"]);
        assert_eq!(response.state.database, "postgres");

        let session = server.session.read().await;
        assert_eq!(session.state(), &FilterState::default());
    }

    #[tokio::test]
    async fn test_session_tools() {
        let server = server();

        let Json(response) = server
            .set_filter(Parameters(SetFilterParams {
                category: "tech".to_string(),
                value: "sql".to_string(),
            }))
            .await
            .expect("set_filter succeeds");
        assert_eq!(slugs(&response.view), ["few-shot", "sql-agent"]);

        let Json(response) = server
            .set_sort(Parameters(SetSortParams {
                sort: "popular".to_string(),
            }))
            .await
            .expect("set_sort succeeds");
        assert_eq!(slugs(&response.view), ["sql-agent", "few-shot"]);
        assert_eq!(response.state.sort, "popular");

        let err = server
            .set_sort(Parameters(SetSortParams {
                sort: "sideways".to_string(),
            }))
            .await
            .err()
            .expect("unknown sort key is rejected");
        assert!(err.contains("unknown sort key"));

        let Json(response) = server.reset_filters().await.expect("reset succeeds");
        assert_eq!(response.view.result_count(), Some("3 approaches"));
        assert_eq!(response.state.tech_stack, "all");
    }

    #[tokio::test]
    async fn test_reload_catalog_keeps_filters() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{}", catalog_json()).expect("write catalog");

        let session = CatalogSession::new(CatalogStore::failed("offline"));
        let fetcher = SourceFetcher::new(Duration::from_secs(5)).expect("fetcher");
        let source = CatalogSource::File(file.path().to_path_buf());
        let server = ApproachesServer::new(session, fetcher, source);

        server
            .set_filter(Parameters(SetFilterParams {
                category: "difficulty".to_string(),
                value: "beginner".to_string(),
            }))
            .await
            .expect("set_filter succeeds");

        let Json(reloaded) = server.reload_catalog().await.expect("reload succeeds");
        assert!(reloaded.loaded);
        assert_eq!(reloaded.approach_count, 3);
        assert!(reloaded.error.is_none());

        let session = server.session.read().await;
        let slugs: Vec<&str> = session.view().iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, ["schema-rag"]);
    }

    #[tokio::test]
    async fn test_get_approach() {
        let server = server();
        let Json(detail) = server
            .get_approach(Parameters(GetApproachParams {
                slug: "schema-rag".to_string(),
            }))
            .await
            .expect("known slug");
        assert_eq!(detail.title, "Schema Retrieval with RAG");
        assert_eq!(detail.github_stars, 2400);
        assert_eq!(detail.href, "approaches/schema-rag.html");

        let err = server
            .get_approach(Parameters(GetApproachParams {
                slug: "missing".to_string(),
            }))
            .await
            .err()
            .expect("unknown slug is rejected");
        assert_eq!(err, "approach not found: missing");
    }
}
