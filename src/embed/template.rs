//! Template types for typed variable injection.
//!
//! Placeholders are `__UPPER_SNAKE__` names. They are substituted in a single
//! pass, so values containing placeholder-like text are never re-expanded.

use regex::{Captures, Regex};
use std::{borrow::Cow, marker::PhantomData, sync::LazyLock};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([A-Z][A-Z0-9_]*[A-Z0-9])__").unwrap());

/// Trait for template variable sets
pub trait TemplateVars {
    /// Value for a placeholder name, `None` leaves it untouched.
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>>;

    fn apply(&self, content: &str) -> String {
        PLACEHOLDER
            .replace_all(content, |caps: &Captures| match self.lookup(&caps[1]) {
                Some(value) => value.into_owned(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Vars {
        name: String,
    }

    impl TemplateVars for Vars {
        fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
            match key {
                "NAME" => Some(Cow::Borrowed(&self.name)),
                "EMPTY" => Some(Cow::Borrowed("")),
                _ => None,
            }
        }
    }

    const HELLO: Template<Vars> = Template::new("<p>__NAME__</p><i>__EMPTY__</i>__OTHER__");

    #[test]
    fn test_render_single_pass() {
        let vars = Vars {
            name: "__EMPTY__ $1".into(),
        };
        assert_eq!(HELLO.render(&vars), "<p>__EMPTY__ $1</p><i></i>__OTHER__");
    }

    #[test]
    fn test_placeholder_with_underscores() {
        struct Multi;
        impl TemplateVars for Multi {
            fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
                (key == "SEARCH_HIDDEN").then_some(Cow::Borrowed(" d-none"))
            }
        }
        assert_eq!(Multi.apply(r#"class="x__SEARCH_HIDDEN__""#), r#"class="x d-none""#);
    }
}
