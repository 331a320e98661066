use serde_json::json;

use crate::model::ApproachRecord;

/// Minimal record with the given slug, difficulty and publication date.
pub(crate) fn record(slug: &str, difficulty: &str, date_published: &str) -> ApproachRecord {
    serde_json::from_value(json!({
        "slug": slug,
        "title": slug,
        "difficulty": difficulty,
        "datePublished": date_published,
    }))
    .expect("valid test record")
}

pub(crate) fn catalog_json() -> serde_json::Value {
    json!({
        "approaches": [
            {
                "slug": "sql-agent",
                "title": "Autonomous SQL Agent",
                "shortDescription": "Let an agent plan and run queries",
                "description": "An agent that plans queries step by step.",
                "difficulty": "advanced",
                "tags": ["LangChain", "PostgreSQL", "Agents"],
                "llmModel": "GPT-4",
                "database": "PostgreSQL",
                "thumbnailGradient": "from-purple-500 to-indigo-600",
                "thumbnailIcon": "🤖",
                "featured": true,
                "readTime": "12 min read",
                "datePublished": "2024-01-01",
                "github": { "stars": 900 }
            },
            {
                "slug": "schema-rag",
                "title": "Schema Retrieval with RAG",
                "shortDescription": "Retrieve only the tables you need",
                "description": "Embeds the schema and retrieves relevant tables.",
                "difficulty": "beginner",
                "tags": ["RAG", "Embeddings"],
                "llmModel": "Claude 3.5 Sonnet",
                "database": "MySQL",
                "thumbnailImage": "assets/images/schema-rag.png",
                "featured": false,
                "readTime": "6 min read",
                "datePublished": "2024-03-01",
                "github": { "stars": 2400 }
            },
            {
                "slug": "few-shot",
                "title": "Few-Shot Prompting",
                "shortDescription": "Teach by example",
                "description": "Puts curated examples in the prompt.",
                "difficulty": "intermediate",
                "tags": ["Prompting", "SQLite"],
                "llmModel": "GPT-4o mini",
                "database": "SQLite",
                "thumbnailGradient": "from-teal-500 to-cyan-600",
                "thumbnailIcon": "🎯",
                "featured": false,
                "readTime": "5 min read",
                "datePublished": "2024-02-01",
                "github": { "stars": 150 }
            }
        ]
    })
}

/// Three approaches: advanced/2024-01-01, beginner/2024-03-01,
/// intermediate/2024-02-01, in that order.
pub(crate) fn catalog() -> Vec<ApproachRecord> {
    let doc: crate::model::CatalogDocument =
        serde_json::from_value(catalog_json()).expect("valid test catalog");
    doc.approaches
}
