use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListApproachesParams {
    /// Exact difficulty ("beginner", "intermediate", "advanced") or "all".
    pub difficulty: Option<String>,
    /// Tech stack fragment matched against tags, e.g. "langchain", or "all".
    pub tech_stack: Option<String>,
    /// LLM model fragment, e.g. "gpt", or "all".
    pub llm_model: Option<String>,
    /// Database fragment, e.g. "postgres", or "all".
    pub database: Option<String>,
    /// Free-text search over title, description, tags, model and database.
    pub search: Option<String>,
    /// One of "recent" (default), "difficulty-easy", "difficulty-hard", "alphabetical", "popular".
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetApproachParams {
    /// Approach slug, e.g. "schema-linking-rag".
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetFilterParams {
    /// Filter category: "difficulty", "tech", "llm" or "database".
    pub category: String,
    /// Value to match, or "all" to clear the category.
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetSearchParams {
    /// Search text; an empty string clears the search.
    pub query: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetSortParams {
    /// One of "recent", "difficulty-easy", "difficulty-hard", "alphabetical", "popular".
    pub sort: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ApproachDetailResponse {
    pub slug: String,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    pub llm_model: String,
    pub database: String,
    pub featured: bool,
    pub read_time: String,
    pub date_published: String,
    pub github_stars: u64,
    /// Relative link to the approach's detail page.
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HtmlResponse {
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReloadCatalogResponse {
    pub loaded: bool,
    pub source: String,
    pub approach_count: usize,
    /// Failure reason when `loaded` is false.
    pub error: Option<String>,
}
