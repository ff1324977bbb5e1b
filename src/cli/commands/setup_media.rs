//! Create the media directories and the placeholder asset

use brightminds::adapters::MediaLayout;
use brightminds::config::Config;
use brightminds::output::{OutputMode, SetupResult};

/// Bootstrap the media root and report every step
pub fn setup_media(config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    super::check_media_root(config)?;

    let report = MediaLayout::new(&config.media.root, &config.media.substitute).bootstrap();
    let ready = report.is_ready();
    SetupResult { report }.render(mode);

    if !ready {
        anyhow::bail!("media setup incomplete");
    }
    Ok(())
}
