//! Current command: which entry the gallery would highlight.

use crate::{
    config::SiteConfig,
    feed::Feed,
    render::date::long_label,
    resolve::{Resolution, date_selector, nearest_friday, resolve},
    share::share_url,
};
use anyhow::{Result, bail};
use std::fmt::Write;

pub fn run_current(selector: Option<&str>, config: &SiteConfig) -> Result<()> {
    let feed = Feed::load(&config.build.data)?;
    let selector = match selector {
        Some(raw) => match date_selector(raw) {
            Some(date) => Some(date),
            None => bail!("no YYYY-MM-DD date in `{raw}`"),
        },
        None => None,
    };

    let resolution = resolve(&feed, selector, config.today());
    print!("{}", describe(&resolution, config));
    Ok(())
}

fn describe(resolution: &Resolution, config: &SiteConfig) -> String {
    let today = config.today();
    let mut out = String::new();
    let _ = writeln!(out, "today:   {today}");
    let _ = writeln!(out, "friday:  {}", nearest_friday(today));
    let _ = writeln!(
        out,
        "mode:    {}",
        if resolution.is_single() { "single" } else { "all" }
    );

    match resolution.current {
        Some(entry) => {
            let date = entry.date_str();
            let _ = writeln!(out, "current: {date} ({})", long_label(entry.date(), config.site.language));
            let _ = writeln!(
                out,
                "url:     {}",
                share_url(&config.base_url(), config.build.routing, &date)
            );
            let _ = writeln!(out, "\n{}", entry.description().trim_end());
        }
        None => {
            let _ = writeln!(out, "current: none");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use chrono::NaiveDate;

    fn feed() -> Feed {
        Feed::parse(
            "pildoras:\n  - date: 2024-11-01\n    description: Intro to caching\n  - date: 2024-11-08\n    description: Load balancing basics\n",
        )
        .unwrap()
    }

    #[test]
    fn test_describe_this_week() {
        let tmp = tempfile::tempdir().unwrap();
        // Tuesday after the 2024-11-08 entry
        let config = test_config(tmp.path(), NaiveDate::from_ymd_opt(2024, 11, 12).unwrap());
        let feed = feed();
        let text = describe(&resolve(&feed, None, config.today()), &config);

        assert!(text.contains("friday:  2024-11-08\n"));
        assert!(text.contains("mode:    all\n"));
        assert!(text.contains("current: 2024-11-08 (8 de noviembre de 2024)\n"));
        assert!(text.contains("url:     https://pildoras.example.org/2024-11-08/\n"));
    }

    #[test]
    fn test_describe_selected_and_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path(), NaiveDate::from_ymd_opt(2024, 11, 12).unwrap());
        let feed = feed();

        let selected = date_selector("https://pildoras.example.org/?date=2024-11-01");
        let text = describe(&resolve(&feed, selected, config.today()), &config);
        assert!(text.contains("mode:    single\n"));
        assert!(text.contains("Intro to caching"));

        let config = test_config(tmp.path(), NaiveDate::from_ymd_opt(2024, 11, 22).unwrap());
        let text = describe(&resolve(&feed, None, config.today()), &config);
        assert!(text.contains("current: none\n"));
    }
}
