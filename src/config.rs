use std::borrow::Cow;

use crate::catalog::Category;

/// Startup configuration for the browser.
///
/// Everything except the initial selection is fixed at build time; the page
/// URL's query string may override `category`, `article` and `hints`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub doc_root: String,
    pub initial_category: Category,
    pub initial_article: Option<String>,
    pub hosting_hints: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            doc_root: "docs".to_string(),
            initial_category: Category::Cpp,
            initial_article: Some("cpp/cpp-basic.md".to_string()),
            hosting_hints: true,
        }
    }
}

impl AppConfig {
    pub fn from_query(search: &str) -> Self {
        Self::default().with_query(search)
    }

    /// Applies `?category=<key>&article=<file>&hints=<on|off>` on top of `self`.
    ///
    /// A `category` without an `article` drops the default article so the
    /// first article of that category is opened instead.
    pub fn with_query(mut self, search: &str) -> Self {
        let mut article_given = false;
        for (key, value) in query_pairs(search) {
            match key.as_ref() {
                "category" => match Category::from_key(&value) {
                    Some(category) => {
                        self.initial_category = category;
                        if !article_given {
                            self.initial_article = None;
                        }
                    }
                    None => log::warn!("ignoring unknown category `{value}` in query"),
                },
                "article" if !value.is_empty() => {
                    self.initial_article = Some(value.into_owned());
                    article_given = true;
                }
                "hints" => self.hosting_hints = !matches!(value.as_ref(), "0" | "off" | "false"),
                _ => {}
            }
        }
        self
    }

    /// Request path of a catalog file, `<doc-root>/<file>`.
    pub fn document_path(&self, file: &str) -> String {
        format!(
            "{}/{}",
            self.doc_root.trim_end_matches('/'),
            file.trim_start_matches('/')
        )
    }
}

fn query_pairs(search: &str) -> impl Iterator<Item = (Cow<'_, str>, Cow<'_, str>)> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = urlencoding::decode(key).ok()?;
            let value = urlencoding::decode(value).ok()?;
            Some((key, value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_cpp_article() {
        let config = AppConfig::from_query("");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.initial_category, Category::Cpp);
        assert_eq!(config.initial_article.as_deref(), Some("cpp/cpp-basic.md"));
    }

    #[test]
    fn query_overrides_initial_selection() {
        let config = AppConfig::from_query("?category=os&article=os%2Fmemory.md");
        assert_eq!(config.initial_category, Category::Os);
        assert_eq!(config.initial_article.as_deref(), Some("os/memory.md"));

        let config = AppConfig::from_query("?article=os%2Fmemory.md&category=os");
        assert_eq!(config.initial_article.as_deref(), Some("os/memory.md"));
    }

    #[test]
    fn category_alone_clears_default_article() {
        let config = AppConfig::from_query("?category=network");
        assert_eq!(config.initial_category, Category::Network);
        assert_eq!(config.initial_article, None);
    }

    #[test]
    fn ignores_unknown_category_and_junk() {
        let config = AppConfig::from_query("?category=rust&&foo&hints=off");
        assert_eq!(config.initial_category, Category::Cpp);
        assert_eq!(config.initial_article.as_deref(), Some("cpp/cpp-basic.md"));
        assert!(!config.hosting_hints);
    }

    #[test]
    fn joins_document_paths() {
        let mut config = AppConfig::default();
        assert_eq!(config.document_path("cpp/oop.md"), "docs/cpp/oop.md");
        config.doc_root = "/static/docs/".to_string();
        assert_eq!(config.document_path("/cpp/oop.md"), "/static/docs/cpp/oop.md");
    }
}
