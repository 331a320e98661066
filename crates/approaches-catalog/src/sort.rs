use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use feruca::Collator;

use crate::error::AppError;
use crate::model::{ApproachRecord, Difficulty};

/// Rank given to difficulties outside beginner/intermediate/advanced.
/// Higher than every known rank, so such records always sort last.
const UNRANKED: u8 = u8::MAX;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Recent,
    DifficultyEasy,
    DifficultyHard,
    Alphabetical,
    Popular,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::DifficultyEasy => "difficulty-easy",
            Self::DifficultyHard => "difficulty-hard",
            Self::Alphabetical => "alphabetical",
            Self::Popular => "popular",
        }
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "recent" => Ok(Self::Recent),
            "difficulty-easy" => Ok(Self::DifficultyEasy),
            "difficulty-hard" => Ok(Self::DifficultyHard),
            "alphabetical" => Ok(Self::Alphabetical),
            "popular" => Ok(Self::Popular),
            other => Err(AppError::UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort a view in place. Stable: records with equal keys keep their
/// current relative order.
pub fn sort_approaches(view: &mut [&ApproachRecord], key: SortKey) {
    sort_with(view, key, |a| *a);
}

/// Sort any list of items that resolve to an approach record, e.g. indices
/// into the full catalog.
pub fn sort_with<'r, T, F>(items: &mut [T], key: SortKey, record_of: F)
where
    F: Fn(&T) -> &'r ApproachRecord,
{
    match key {
        SortKey::Recent => {
            items.sort_by_cached_key(|item| Reverse(record_of(item).published_at()))
        }
        SortKey::DifficultyEasy => {
            items.sort_by_key(|item| easy_rank(&record_of(item).difficulty))
        }
        SortKey::DifficultyHard => {
            items.sort_by_key(|item| hard_rank(&record_of(item).difficulty))
        }
        SortKey::Alphabetical => {
            let mut collator = Collator::default();
            items.sort_by(|a, b| {
                collator.collate(record_of(a).title.as_str(), record_of(b).title.as_str())
            })
        }
        SortKey::Popular => items.sort_by_key(|item| Reverse(record_of(item).stars())),
    }
}

pub fn easy_rank(difficulty: &Difficulty) -> u8 {
    match difficulty {
        Difficulty::Beginner => 1,
        Difficulty::Intermediate => 2,
        Difficulty::Advanced => 3,
        Difficulty::Other(_) => UNRANKED,
    }
}

pub fn hard_rank(difficulty: &Difficulty) -> u8 {
    match difficulty {
        Difficulty::Advanced => 1,
        Difficulty::Intermediate => 2,
        Difficulty::Beginner => 3,
        Difficulty::Other(_) => UNRANKED,
    }
}
