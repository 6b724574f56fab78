//! Payload loader: fetch through the cache, then parse.

use tracing::{debug, info};

use crate::animation::AnimationDocument;
use crate::cache::{CacheStore, Downloader};
use crate::error::Result;

/// Parse cached text into a document. Any well-formed JSON value succeeds.
pub fn parse(text: &str) -> Result<AnimationDocument> {
    let value = serde_json::from_str(text)?;
    Ok(AnimationDocument::new(value))
}

/// Run the whole fetch → cache → parse sequence for `url`.
pub async fn load<D: Downloader>(
    store: &CacheStore,
    downloader: &D,
    url: &str,
) -> Result<AnimationDocument> {
    info!("loading animation from {}", url);
    let text = store.fetch(downloader, url).await?;
    debug!("fetched {} bytes of text for {}", text.len(), url);
    let doc = parse(&text)?;
    info!(
        "loaded animation {:?} ({} layers)",
        doc.name().unwrap_or("unnamed"),
        doc.layers().len()
    );
    Ok(doc)
}
