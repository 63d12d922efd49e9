use crate::models::feed_filter::{FeedFilter, FilterMode};
use crate::sync::reader::FetchedFeedItem;
use aho_corasick::{AhoCorasick, AhoCorasickBuilder};

/// Deny patterns are applied first and exclude unconditionally. Allow
/// patterns only narrow the result when at least one exists: an item must
/// then match one of them to survive.
pub fn apply_filters(
    items: Vec<FetchedFeedItem>,
    filters: &[FeedFilter],
) -> Vec<FetchedFeedItem> {
    let deny_patterns = patterns_for(filters, FilterMode::Deny);
    let allow_patterns = patterns_for(filters, FilterMode::Allow);

    let deny = build_matcher(&deny_patterns);
    let allow = build_matcher(&allow_patterns);

    items
        .into_iter()
        .filter(|item| {
            let haystack = format!("{} {}", item.title, item.link);

            if let Some(deny) = &deny {
                if deny.find(&haystack).is_some() {
                    return false;
                }
            }

            match &allow {
                Some(allow) => allow.find(&haystack).is_some(),
                None => true,
            }
        })
        .collect()
}

fn patterns_for(filters: &[FeedFilter], mode: FilterMode) -> Vec<String> {
    filters
        .iter()
        .filter(|filter| filter.mode() == Ok(mode))
        .map(|filter| filter.pattern.clone())
        .collect()
}

fn build_matcher(patterns: &[String]) -> Option<AhoCorasick> {
    if patterns.is_empty() {
        return None;
    }

    match AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .build(patterns)
    {
        Ok(matcher) => Some(matcher),
        Err(error) => {
            log::error!("Failed to build a filter matcher: {:?}", error);
            None
        }
    }
}
