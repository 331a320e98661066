/// Projection of an ordered view into a typed display tree.
///
/// The tree carries everything the card grid shows and nothing about markup;
/// `html::render_html` is one backend that turns it into page HTML, and the
/// MCP tools return it as structured JSON.
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{ApproachRecord, Difficulty};

pub const NO_RESULTS: &str = "No results";
pub const LOAD_ERROR_MESSAGE: &str = "Error loading approaches. Please refresh the page.";

/// Number of tags shown on a card.
const CARD_TAG_LIMIT: usize = 2;
const DEFAULT_ICON: &str = "📄";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayTree {
    Cards {
        result_count: String,
        cards: Vec<Card>,
    },
    Empty {
        result_count: String,
        placeholder: EmptyState,
    },
    Error {
        message: String,
    },
}

impl DisplayTree {
    /// Inline error shown in place of the grid when the catalog failed to load.
    pub fn load_error() -> Self {
        Self::Error {
            message: LOAD_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn result_count(&self) -> Option<&str> {
        match self {
            Self::Cards { result_count, .. } | Self::Empty { result_count, .. } => {
                Some(result_count.as_str())
            }
            Self::Error { .. } => None,
        }
    }

    pub fn cards(&self) -> &[Card] {
        match self {
            Self::Cards { cards, .. } => cards,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EmptyState {
    pub icon: String,
    pub heading: String,
    pub hint: String,
    /// Label of the control that restores every filter to its default.
    pub reset_label: String,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            icon: "🔍".to_string(),
            heading: "No approaches found".to_string(),
            hint: "Try adjusting your filters or search query".to_string(),
            reset_label: "Reset Filters".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Card {
    pub slug: String,
    pub href: String,
    pub featured: bool,
    pub thumbnail: Thumbnail,
    pub read_time: String,
    pub difficulty: DifficultyBadge,
    pub title: String,
    /// Full text; the page clamps it to two lines.
    pub short_description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Thumbnail {
    Image { src: String, alt: String },
    Icon { glyph: String, gradient: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DifficultyBadge {
    pub label: String,
    pub color: BadgeColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BadgeColor {
    Green,
    Blue,
    Purple,
    /// Difficulty outside the known set.
    Neutral,
}

impl BadgeColor {
    pub fn for_difficulty(difficulty: &Difficulty) -> Self {
        match difficulty {
            Difficulty::Beginner => Self::Green,
            Difficulty::Intermediate => Self::Blue,
            Difficulty::Advanced => Self::Purple,
            Difficulty::Other(_) => Self::Neutral,
        }
    }
}

/// "No results" for zero, otherwise "1 approach" / "{n} approaches".
pub fn result_count_text(n: usize) -> String {
    match n {
        0 => NO_RESULTS.to_string(),
        1 => "1 approach".to_string(),
        n => format!("{n} approaches"),
    }
}

pub fn render(ordered: &[&ApproachRecord]) -> DisplayTree {
    if ordered.is_empty() {
        return DisplayTree::Empty {
            result_count: result_count_text(0),
            placeholder: EmptyState::default(),
        };
    }

    DisplayTree::Cards {
        result_count: result_count_text(ordered.len()),
        cards: ordered.iter().map(|a| render_card(a)).collect(),
    }
}

pub fn render_card(approach: &ApproachRecord) -> Card {
    Card {
        slug: approach.slug.clone(),
        href: approach.detail_href(),
        featured: approach.featured,
        thumbnail: thumbnail(approach),
        read_time: approach.read_time.clone(),
        difficulty: DifficultyBadge {
            label: approach.difficulty.to_string(),
            color: BadgeColor::for_difficulty(&approach.difficulty),
        },
        title: approach.title.clone(),
        short_description: approach.short_description.clone(),
        tags: approach.tags.iter().take(CARD_TAG_LIMIT).cloned().collect(),
    }
}

fn thumbnail(approach: &ApproachRecord) -> Thumbnail {
    match approach.thumbnail_image.as_deref() {
        Some(src) if !src.is_empty() => Thumbnail::Image {
            src: src.to_string(),
            alt: approach.title.clone(),
        },
        _ => Thumbnail::Icon {
            glyph: approach
                .thumbnail_icon
                .clone()
                .unwrap_or_else(|| DEFAULT_ICON.to_string()),
            gradient: approach.thumbnail_gradient.clone().unwrap_or_default(),
        },
    }
}
