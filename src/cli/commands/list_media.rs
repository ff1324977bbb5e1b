//! List files under the media root

use brightminds::adapters::MediaIndex;
use brightminds::config::Config;
use brightminds::output::{MediaListResult, OutputMode};

/// List media files with their public URLs
pub fn list_media(config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    let files = MediaIndex::new(&config.media.root, &config.media.url).scan()?;

    MediaListResult {
        root: config.media.root.clone(),
        files,
    }
    .render(mode);
    Ok(())
}
