use crate::ports::FeedSource;
use futures::future::try_join_all;
use gatesync_domain::{normalize, Domain, DomainError};
use tracing::{debug, info};

/// Feed bodies in the order the URLs were given. Downloads run
/// concurrently; the first failure aborts the whole batch.
pub(crate) async fn fetch_feeds(
    source: &dyn FeedSource,
    urls: &[String],
) -> Result<Vec<String>, DomainError> {
    let bodies = try_join_all(urls.iter().map(|url| async move {
        let body = source.fetch(url).await?;
        debug!(url = %url, bytes = body.len(), "Fetched feed");
        Ok::<_, DomainError>(body)
    }))
    .await?;

    info!(feeds = bodies.len(), "Feeds downloaded");
    Ok(bodies)
}

/// Normalized domains of every feed, feed order then line order.
/// Rejected lines are skipped silently.
pub(crate) fn feed_domains(
    bodies: &[String],
    is_allowlist: bool,
) -> impl Iterator<Item = Domain> + '_ {
    bodies
        .iter()
        .flat_map(|body| body.lines())
        .filter_map(move |line| normalize(line, is_allowlist))
}
