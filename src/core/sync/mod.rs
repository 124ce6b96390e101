use crate::core::config::MirrorConfig;
use crate::core::feed::fetcher::{build_client, fetch_feed, FetchError};
use crate::core::feed::parser::{parse_feed_bytes, FeedParseError};
use crate::core::render::page::write_page;
use crate::core::render::sitemap::write_sitemap;
use crate::core::render::RenderError;
use crate::core::storage::models::PostRecord;
use crate::core::storage::repository::{merge_posts, PostRepository, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("feed fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("feed parse failed: {0}")]
    Parse(#[from] FeedParseError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub parsed_posts: usize,
    pub inserted_posts: usize,
    pub total_posts: usize,
}

#[derive(Debug)]
pub enum SyncOutcome {
    Completed(SyncReport),
    /// The feed answered with a non-success status; nothing on disk was touched.
    FetchFailed { status: u16 },
}

#[derive(Debug, Clone, Default)]
pub struct SyncService;

impl SyncService {
    pub fn name(&self) -> &'static str {
        "sync"
    }

    pub fn status(&self) -> &'static str {
        "ready"
    }
}

pub async fn run_sync(config: &MirrorConfig) -> Result<SyncOutcome, SyncError> {
    tracing::info!("Starting sync...");

    let url = config.feed_url();
    let client = build_client(config.timeout())?;
    let payload = match fetch_feed(&client, &url).await {
        Ok(payload) => payload,
        Err(FetchError::HttpStatus(status)) => {
            tracing::error!("Failed to fetch RSS: {status}");
            return Ok(SyncOutcome::FetchFailed { status });
        }
        Err(error) => return Err(error.into()),
    };
    tracing::debug!(
        url = %url,
        bytes = payload.body.len(),
        content_type = payload.content_type.as_deref().unwrap_or("unknown"),
        "feed fetched"
    );

    let feed = parse_feed_bytes(&payload.body, &config.canonical_base())?;
    tracing::debug!(
        channel = feed.channel_title.as_deref().unwrap_or_default(),
        items = feed.posts.len(),
        "feed parsed"
    );

    let repository = PostRepository::new(&config.data_file);
    let mut record = repository.load()?;
    let inserted_posts = merge_posts(&mut record, &feed.posts, &config.category).len();
    if inserted_posts > 0 {
        repository.save(&record)?;
    }

    render_outputs(&record, config)?;
    tracing::info!("Sync completed successfully.");

    Ok(SyncOutcome::Completed(SyncReport {
        parsed_posts: feed.posts.len(),
        inserted_posts,
        total_posts: record.len(),
    }))
}

/// Regenerates the page and sitemap from the stored record without fetching.
pub fn render_only(config: &MirrorConfig) -> Result<usize, SyncError> {
    let record = PostRepository::new(&config.data_file).load()?;
    render_outputs(&record, config)?;
    tracing::info!(posts = record.len(), "Rendered outputs from stored record.");
    Ok(record.len())
}

fn render_outputs(record: &PostRecord, config: &MirrorConfig) -> Result<(), SyncError> {
    write_page(record, config, &config.html_file)?;
    write_sitemap(record, &config.site_url, &config.sitemap_file)?;
    Ok(())
}
