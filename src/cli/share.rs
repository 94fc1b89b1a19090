//! Share command: the share button from the terminal.

use crate::{
    config::SiteConfig,
    feed::Feed,
    log,
    render::Labels,
    share::{CommandPlatform, ShareBundle, ShareOptions, ShareOutcome, dispatch},
};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;

/// Share the entry dated `date`. A failed share is reported, not an error.
pub fn run_share(date: &str, no_native: bool, no_image: bool, config: &SiteConfig) -> Result<ShareOutcome> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .with_context(|| format!("expected YYYY-MM-DD, got `{date}`"))?;
    let feed = Feed::load(&config.build.data)?;
    let entry = feed
        .get(date)
        .ok_or_else(|| anyhow!("no entry dated {date} in {}", config.build.data.display()))?;

    let bundle = ShareBundle::new(entry, &config.base_url(), config.build.routing);
    let mut platform = CommandPlatform::from_config(config, !no_native);
    let options = ShareOptions {
        images: config.share.images && !no_image,
        copied_notice: Labels::for_language(config.site.language).copied,
    };

    let outcome = dispatch(&bundle, &mut platform, &options);
    match outcome {
        ShareOutcome::SharedWithImage => log!("share"; "shared {} with image", bundle.url),
        ShareOutcome::Shared => log!("share"; "shared {}", bundle.url),
        ShareOutcome::Copied => {}
        ShareOutcome::Failed => log!("share"; "nothing shared, configure [share] command or clipboard"),
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use std::fs;

    fn project() -> (tempfile::TempDir, SiteConfig) {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = test_config(tmp.path(), NaiveDate::from_ymd_opt(2024, 11, 8).unwrap());
        config.build.data = tmp.path().join("data.yml");
        fs::write(
            &config.build.data,
            "pildoras:\n  - date: 2024-11-08\n    description: Load balancing basics\n",
        )
        .unwrap();
        (tmp, config)
    }

    #[test]
    fn test_share_falls_back_to_clipboard() {
        let (tmp, mut config) = project();
        let clip = tmp.path().join("clip.txt");
        config.share.clipboard = vec!["sh".into(), "-c".into(), format!("cat > '{}'", clip.display())];

        let outcome = run_share("2024-11-08", true, false, &config).unwrap();
        assert_eq!(outcome, ShareOutcome::Copied);
        assert_eq!(
            fs::read_to_string(clip).unwrap(),
            "https://pildoras.example.org/2024-11-08/\n\nLoad balancing basics"
        );
    }

    #[test]
    fn test_share_unknown_date() {
        let (_tmp, config) = project();
        assert!(run_share("2024-11-01", true, false, &config).is_err());
        assert!(run_share("08/11/2024", true, false, &config).is_err());
    }
}
