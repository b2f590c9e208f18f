use crate::models::{AggregateEntry, AggregateIndex, Watchlist};

/// Merges per-user watchlists into a title-keyed index.
///
/// Titles are joined exactly as scraped. The first URL seen for a title is
/// kept; later sightings only add their owner.
pub fn aggregate<'a, I>(watchlists: I) -> AggregateIndex
where
    I: IntoIterator<Item = (&'a String, &'a Watchlist)>,
{
    let mut index = AggregateIndex::new();

    for (username, watchlist) in watchlists {
        for entry in watchlist {
            index
                .entry(entry.title.clone())
                .or_insert_with(|| AggregateEntry::new(entry.title.clone(), entry.url.clone()))
                .owners
                .insert(username.clone());
        }
    }

    index
}

/// Drops titles owned by fewer than two users
pub fn shared_titles(index: AggregateIndex) -> Vec<AggregateEntry> {
    index.into_values().filter(AggregateEntry::is_shared).collect()
}
