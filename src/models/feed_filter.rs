use crate::schema::feed_filters;
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Queryable};
use std::str::FromStr;

#[derive(Queryable, Identifiable, Debug, Clone, Eq, PartialEq)]
#[diesel(table_name = feed_filters)]
pub struct FeedFilter {
    pub id: i64,
    pub feed_id: i64,
    pub mode: String,
    pub pattern: String,
    pub created_at: DateTime<Utc>,
}

impl FeedFilter {
    pub fn mode(&self) -> Result<FilterMode, String> {
        FilterMode::from_str(&self.mode)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FilterMode {
    Allow,
    Deny,
}

impl FilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Allow => "allow",
            FilterMode::Deny => "deny",
        }
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(FilterMode::Allow),
            "deny" => Ok(FilterMode::Deny),
            other => Err(format!("unknown filter mode {}", other)),
        }
    }
}
