//! Feed pagination, sorting and filter parameters.
//!
//! Raw query-string values are parsed and bounded here, before anything
//! reaches the query builder. The sort direction in particular ends up in SQL
//! text, so it is only ever represented as a `SortDirection`.

use serde::Deserialize;
use std::collections::HashSet;
use validator::Validate;

use crate::error::{AppError, Result};

pub const DEFAULT_FEED_LIMIT: i64 = 20;
pub const MAX_TAG_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    /// Accepts exactly `asc` or `desc`
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(AppError::Validation(format!(
                "sort must be 'asc' or 'desc', got '{}'",
                other
            ))),
        }
    }

    /// Fixed SQL keyword for this direction
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Feed query string as received
#[derive(Debug, Default, Deserialize)]
pub struct FeedQueryParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub tags: Option<String>,
}

/// Validated feed parameters consumed by the feed query builder
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct PaginatedFeedQuery {
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: i64,
    #[validate(range(min = 0, max = 10000, message = "offset must be between 0 and 10000"))]
    pub offset: i64,
    pub sort: SortDirection,
    #[validate(length(max = 100, message = "search must be at most 100 characters"))]
    pub search: Option<String>,
    #[validate(length(max = 5, message = "at most 5 tags may be given"))]
    pub tags: Vec<String>,
}

impl Default for PaginatedFeedQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_FEED_LIMIT,
            offset: 0,
            sort: SortDirection::default(),
            search: None,
            tags: Vec::new(),
        }
    }
}

impl FeedQueryParams {
    /// Parse and bound every parameter; missing or blank values take defaults.
    /// `search` is otherwise kept verbatim.
    pub fn parse(&self) -> Result<PaginatedFeedQuery> {
        let mut query = PaginatedFeedQuery::default();

        if let Some(raw) = present(&self.limit) {
            query.limit = parse_integer("limit", raw)?;
        }
        if let Some(raw) = present(&self.offset) {
            query.offset = parse_integer("offset", raw)?;
        }
        if let Some(raw) = present(&self.sort) {
            query.sort = SortDirection::parse(raw)?;
        }
        query.search = self
            .search
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);
        if let Some(raw) = present(&self.tags) {
            query.tags = parse_tags(raw)?;
        }

        query.validate()?;
        Ok(query)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_integer(name: &str, raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::Validation(format!("{} must be an integer, got '{}'", name, raw)))
}

/// Comma-separated list, trimmed, empties dropped, first occurrence wins
fn parse_tags(raw: &str) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if tag.chars().count() > MAX_TAG_CHARS {
            return Err(AppError::Validation(format!(
                "tag '{}' exceeds {} characters",
                tag, MAX_TAG_CHARS
            )));
        }
        if seen.insert(tag) {
            tags.push(tag.to_string());
        }
    }

    Ok(tags)
}
