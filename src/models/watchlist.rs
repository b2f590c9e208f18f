use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A single poster card scraped from a user's watchlist page
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WatchlistEntry {
    /// Title exactly as scraped (image alt text); used as the cross-user join key
    pub title: String,
    /// Absolute link to the film's page on the source site
    pub url: String,
}

impl WatchlistEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// One user's complete watchlist. Entries repeated across pages collapse.
pub type Watchlist = BTreeSet<WatchlistEntry>;

/// A title seen in one or more watchlists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateEntry {
    pub title: String,
    /// URL from the first watchlist the title was seen in
    pub url: String,
    /// Usernames that have the title, in lexicographic order
    pub owners: BTreeSet<String>,
}

impl AggregateEntry {
    pub fn new(title: String, url: String) -> Self {
        Self {
            title,
            url,
            owners: BTreeSet::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.owners.len()
    }

    /// True when at least two distinct users share the title
    pub fn is_shared(&self) -> bool {
        self.count() >= 2
    }
}

/// Title-keyed index produced by aggregation
pub type AggregateIndex = HashMap<String, AggregateEntry>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watchlist_collapses_duplicates() {
        let mut watchlist = Watchlist::new();
        watchlist.insert(WatchlistEntry::new("Heat", "https://letterboxd.com/film/heat/"));
        watchlist.insert(WatchlistEntry::new("Heat", "https://letterboxd.com/film/heat/"));
        watchlist.insert(WatchlistEntry::new("Heat", "https://letterboxd.com/film/heat-1995/"));
        assert_eq!(watchlist.len(), 2);
    }

    #[test]
    fn test_aggregate_entry_shared_threshold() {
        let mut entry = AggregateEntry::new("Heat".to_string(), "/film/heat/".to_string());
        entry.owners.insert("alice".to_string());
        assert!(!entry.is_shared());
        entry.owners.insert("alice".to_string());
        assert!(!entry.is_shared());
        entry.owners.insert("bob".to_string());
        assert!(entry.is_shared());
        assert_eq!(entry.count(), 2);
    }
}
