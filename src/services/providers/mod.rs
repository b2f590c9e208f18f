/// Movie metadata provider abstraction
///
/// Enrichment is best-effort: a provider never fails a comparison. Lookups
/// that cannot be resolved return [`MovieMetadata::default`], and the
/// assembler fills in placeholders.
use crate::models::MovieMetadata;

pub mod tmdb;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Resolve a scraped title (optionally suffixed with `(YYYY)`) to metadata
    async fn lookup(&self, title: &str) -> MovieMetadata;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Provider used when no API key is configured
#[derive(Debug, Clone, Default)]
pub struct DisabledProvider;

#[async_trait::async_trait]
impl MetadataProvider for DisabledProvider {
    async fn lookup(&self, _title: &str) -> MovieMetadata {
        MovieMetadata::default()
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
