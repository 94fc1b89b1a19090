//! HTML rendering of the gallery.
//!
//! # Module Structure
//!
//! ```text
//! render/
//! ├── date.rs      # localized long date labels
//! ├── markup.rs    # CommonMark descriptions, search highlighting
//! ├── card.rs      # entry list -> card markup
//! └── page.rs      # full page: shell + cards + metadata
//! ```
//!
//! Everything here is a pure function of the feed snapshot, the resolution
//! and the filter state; nothing reads ambient state.

pub mod card;
pub mod date;
pub mod markup;
pub mod page;

pub use card::{CardLayout, CardOptions, render_card, render_cards};
pub use page::{PageMode, PageRequest, render_page};

use crate::config::Language;

/// User-facing strings for one language.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub view_entry: &'static str,
    pub visit: &'static str,
    pub share: &'static str,
    pub image_alt: &'static str,
    pub search_placeholder: &'static str,
    pub suggest: &'static str,
    pub view_all: &'static str,
    pub entries: &'static str,
    pub source_code: &'static str,
    pub copied: &'static str,
}

const LABELS_ES: Labels = Labels {
    view_entry: "Ver píldora",
    visit: "Visitar",
    share: "Compartir",
    image_alt: "Píldora del",
    search_placeholder: "Buscar píldoras...",
    suggest: "Sugerir nueva píldora",
    view_all: "Ver todas las píldoras",
    entries: "píldoras",
    source_code: "Código fuente",
    copied: "¡Contenido copiado al portapapeles!",
};

const LABELS_EN: Labels = Labels {
    view_entry: "View",
    visit: "Visit",
    share: "Share",
    image_alt: "Píldora of",
    search_placeholder: "Search píldoras...",
    suggest: "Suggest a new píldora",
    view_all: "View all píldoras",
    entries: "píldoras",
    source_code: "Source code",
    copied: "Content copied to the clipboard!",
};

impl Labels {
    pub const fn for_language(language: Language) -> &'static Labels {
        match language {
            Language::Es => &LABELS_ES,
            Language::En => &LABELS_EN,
        }
    }
}
