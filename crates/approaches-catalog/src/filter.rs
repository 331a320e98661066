/// Filter state and the record predicate.
///
/// `FilterState` is an immutable value: every user interaction produces a new
/// state through `FilterState::apply`, which is then threaded into
/// `view::compute_view`.
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::model::ApproachRecord;
use crate::sort::SortKey;

/// Wire value meaning "no constraint" for a filter category.
pub const ALL: &str = "all";

/// Value selected for one filter category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterValue {
    #[default]
    All,
    Value(String),
}

impl FilterValue {
    /// `"all"` maps to `All`; anything else is a concrete match value.
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            Self::All
        } else {
            Self::Value(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Value(v) => v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCategory {
    Difficulty,
    TechStack,
    LlmModel,
    Database,
}

impl FilterCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Difficulty => "difficulty",
            Self::TechStack => "tech",
            Self::LlmModel => "llm",
            Self::Database => "database",
        }
    }
}

impl FromStr for FilterCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "difficulty" => Ok(Self::Difficulty),
            "tech" | "techStack" | "tech_stack" => Ok(Self::TechStack),
            "llm" | "llmModel" | "llm_model" => Ok(Self::LlmModel),
            "database" => Ok(Self::Database),
            other => Err(AppError::UnknownFilterCategory(other.to_string())),
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    SetFilter(FilterCategory, FilterValue),
    SetSearch(String),
    SetSort(SortKey),
    Reset,
}

impl FilterAction {
    /// Sort changes reorder the current view; everything else re-filters.
    pub fn requires_refilter(&self) -> bool {
        !matches!(self, Self::SetSort(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub difficulty: FilterValue,
    pub tech_stack: FilterValue,
    pub llm_model: FilterValue,
    pub database: FilterValue,
    pub search_query: String,
    pub sort_key: SortKey,
}

impl FilterState {
    /// Return the state that results from `action`. Categories are
    /// single-select: setting one replaces its previous value.
    pub fn apply(&self, action: FilterAction) -> FilterState {
        let mut next = self.clone();
        match action {
            FilterAction::SetFilter(category, value) => match category {
                FilterCategory::Difficulty => next.difficulty = value,
                FilterCategory::TechStack => next.tech_stack = value,
                FilterCategory::LlmModel => next.llm_model = value,
                FilterCategory::Database => next.database = value,
            },
            FilterAction::SetSearch(query) => next.search_query = query,
            FilterAction::SetSort(key) => next.sort_key = key,
            FilterAction::Reset => next = FilterState::default(),
        }
        next
    }

    /// True when `record` satisfies every active criterion.
    pub fn matches(&self, record: &ApproachRecord) -> bool {
        if let FilterValue::Value(difficulty) = &self.difficulty {
            if record.difficulty.as_str() != difficulty {
                return false;
            }
        }

        if let FilterValue::Value(tech) = &self.tech_stack {
            let tech = tech.to_lowercase();
            if !record.tags.iter().any(|tag| contains_folded(tag, &tech)) {
                return false;
            }
        }

        if let FilterValue::Value(model) = &self.llm_model {
            if !contains_folded(&record.llm_model, &model.to_lowercase()) {
                return false;
            }
        }

        if let FilterValue::Value(database) = &self.database {
            if !contains_folded(&record.database, &database.to_lowercase()) {
                return false;
            }
        }

        if !self.search_query.is_empty() && !matches_search(record, &self.search_query) {
            return false;
        }

        true
    }
}

/// Keep records passing `state`, in catalog order.
pub fn filter_approaches<'a>(
    approaches: &'a [ApproachRecord],
    state: &FilterState,
) -> Vec<&'a ApproachRecord> {
    approaches.iter().filter(|a| state.matches(a)).collect()
}

fn matches_search(record: &ApproachRecord, query: &str) -> bool {
    let needle = query.to_lowercase();
    contains_folded(&record.title, &needle)
        || contains_folded(&record.description, &needle)
        || record.tags.iter().any(|tag| contains_folded(tag, &needle))
        || contains_folded(&record.llm_model, &needle)
        || contains_folded(&record.database, &needle)
}

/// `needle` must already be lower-cased.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
