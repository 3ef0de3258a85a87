use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Which field(s) a search term is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Name,
    Series,
    #[default]
    All,
}

impl Scope {
    pub fn covers_name(self) -> bool {
        matches!(self, Scope::Name | Scope::All)
    }

    pub fn covers_series(self) -> bool {
        matches!(self, Scope::Series | Scope::All)
    }
}

impl FromStr for Scope {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Scope::Name),
            "series" => Ok(Scope::Series),
            "all" => Ok(Scope::All),
            other => Err(CatalogError::InvalidQuery(format!("unknown scope: {other:?}"))),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scope::Name => "name",
            Scope::Series => "series",
            Scope::All => "all",
        })
    }
}

/// Category filter: everything, or items carrying one exact series label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    Label(String),
}

impl Category {
    /// Parse a category selection; empty and `all` mean no filter.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == "all" {
            Category::All
        } else {
            Category::Label(raw.to_string())
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Category::All => None,
            Category::Label(label) => Some(label),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    None,
    Name,
    Series,
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(SortKey::None),
            "name" => Ok(SortKey::Name),
            "series" => Ok(SortKey::Series),
            other => Err(CatalogError::InvalidQuery(format!("unknown sort key: {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for Direction {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "asc" | "ascending" => Ok(Direction::Ascending),
            "desc" | "descending" => Ok(Direction::Descending),
            other => Err(CatalogError::InvalidQuery(format!("unknown sort direction: {other:?}"))),
        }
    }
}

/// Sort key plus direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: Direction,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: Direction) -> Self {
        Self { key, direction }
    }

    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, Direction::Ascending)
    }

    pub fn descending(key: SortKey) -> Self {
        Self::new(key, Direction::Descending)
    }
}

/// Compact form: `key[:direction]`, e.g. `name`, `series:desc`, `none`.
impl FromStr for SortSpec {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = s.split_once(':').unwrap_or((s, ""));
        Ok(Self {
            key: key.parse()?,
            direction: direction.parse()?,
        })
    }
}

/// A validated catalog query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub term: String,
    pub scope: Scope,
    pub category: Category,
    pub sort: SortSpec,
}

impl Query {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Select a category the same way [`Category::parse`] does.
    pub fn category(mut self, label: &str) -> Self {
        self.category = Category::parse(label);
        self
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }
}

/// Unvalidated query values as a presentation shell hands them over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuery {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sort_key: String,
    #[serde(default)]
    pub direction: String,
}

impl TryFrom<RawQuery> for Query {
    type Error = CatalogError;

    fn try_from(raw: RawQuery) -> Result<Self, Self::Error> {
        let scope = if raw.scope.trim().is_empty() {
            Scope::default()
        } else {
            raw.scope.parse()?
        };
        Ok(Query {
            scope,
            category: Category::parse(&raw.category),
            sort: SortSpec {
                key: raw.sort_key.parse()?,
                direction: raw.direction.parse()?,
            },
            term: raw.term,
        })
    }
}
