//! Embedded static resources.
//!
//! - `page` - the HTML shell every gallery page is rendered into
//! - `assets` - browser script and stylesheet written to `{output}/assets/`
//!   and served from memory by `serve`

mod template;

pub use template::{Template, TemplateVars};

pub mod page {
    use super::{Template, TemplateVars};
    use std::borrow::Cow;

    /// Variables for page.html. Values are inserted verbatim and must
    /// already be escaped for their position.
    #[derive(Debug, Clone, Default)]
    pub struct PageVars {
        pub lang: &'static str,
        pub base_href: String,
        pub title: String,
        pub description: String,
        pub canonical_url: String,
        pub feed_link: String,
        pub mode: &'static str,
        pub view: &'static str,
        pub total: usize,
        pub lookahead: u32,
        pub modifier: String,
        pub routing: &'static str,
        pub share_images: bool,
        pub entry_title: String,
        pub copied: String,
        pub today: Option<String>,
        pub site_title: String,
        pub counter: String,
        pub entries_label: &'static str,
        pub search_hidden: bool,
        pub search_placeholder: &'static str,
        pub query: String,
        pub suggest: String,
        pub view_all_hidden: bool,
        pub view_all: &'static str,
        pub cards: String,
        pub footer: String,
    }

    fn hidden(flag: bool) -> Cow<'static, str> {
        Cow::Borrowed(if flag { " d-none" } else { "" })
    }

    impl TemplateVars for PageVars {
        fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
            let value = match key {
                "LANG" => Cow::Borrowed(self.lang),
                "BASE_HREF" => Cow::Borrowed(self.base_href.as_str()),
                "TITLE" => Cow::Borrowed(self.title.as_str()),
                "DESCRIPTION" => Cow::Borrowed(self.description.as_str()),
                "CANONICAL_URL" => Cow::Borrowed(self.canonical_url.as_str()),
                "FEED_LINK" => Cow::Borrowed(self.feed_link.as_str()),
                "MODE" => Cow::Borrowed(self.mode),
                "VIEW" => Cow::Borrowed(self.view),
                "TOTAL" => Cow::Owned(self.total.to_string()),
                "LOOKAHEAD" => Cow::Owned(self.lookahead.to_string()),
                "MODIFIER" => Cow::Borrowed(self.modifier.as_str()),
                "ROUTING" => Cow::Borrowed(self.routing),
                "SHARE_IMAGES" => Cow::Borrowed(if self.share_images { "true" } else { "false" }),
                "ENTRY_TITLE" => Cow::Borrowed(self.entry_title.as_str()),
                "COPIED" => Cow::Borrowed(self.copied.as_str()),
                "TODAY_ATTR" => match &self.today {
                    Some(today) => Cow::Owned(format!(r#" data-today="{today}""#)),
                    None => Cow::Borrowed(""),
                },
                "SITE_TITLE" => Cow::Borrowed(self.site_title.as_str()),
                "COUNTER" => Cow::Borrowed(self.counter.as_str()),
                "ENTRIES_LABEL" => Cow::Borrowed(self.entries_label),
                "SEARCH_HIDDEN" => hidden(self.search_hidden),
                "SEARCH_PLACEHOLDER" => Cow::Borrowed(self.search_placeholder),
                "QUERY" => Cow::Borrowed(self.query.as_str()),
                "SUGGEST" => Cow::Borrowed(self.suggest.as_str()),
                "VIEW_ALL_HIDDEN" => hidden(self.view_all_hidden),
                "VIEW_ALL" => Cow::Borrowed(self.view_all),
                "CARDS" => Cow::Borrowed(self.cards.as_str()),
                "FOOTER" => Cow::Borrowed(self.footer.as_str()),
                _ => return None,
            };
            Some(value)
        }
    }

    /// Gallery page shell.
    pub const PAGE_HTML: Template<PageVars> = Template::new(include_str!("page.html"));
}

pub mod assets {
    use crate::utils::mime::types;
    use anyhow::{Context, Result};
    use std::{fs, path::Path};

    /// A file compiled into the binary.
    #[derive(Debug, Clone, Copy)]
    pub struct EmbeddedFile {
        /// Path relative to the site root, as linked from page.html.
        pub path: &'static str,
        pub content: &'static str,
        pub mime: &'static str,
    }

    impl EmbeddedFile {
        /// Write below `output_dir`, creating parent directories.
        pub fn write_to(&self, output_dir: &Path) -> Result<()> {
            let dest = output_dir.join(self.path);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&dest, self.content)
                .with_context(|| format!("Failed to write {}", dest.display()))
        }
    }

    pub const GALLERY_JS: EmbeddedFile = EmbeddedFile {
        path: "assets/pildoras.js",
        content: include_str!("pildoras.js"),
        mime: types::JAVASCRIPT,
    };

    pub const GALLERY_CSS: EmbeddedFile = EmbeddedFile {
        path: "assets/pildoras.css",
        content: include_str!("pildoras.css"),
        mime: types::CSS,
    };

    pub const ALL: &[EmbeddedFile] = &[GALLERY_JS, GALLERY_CSS];

    /// Embedded file served at `path` (relative, no leading slash).
    pub fn find(path: &str) -> Option<&'static EmbeddedFile> {
        ALL.iter().find(|file| file.path == path)
    }

}
