use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

const BUILTIN_CATALOG: &str = include_str!("../catalog.json");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cpp,
    Os,
    Network,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Cpp, Category::Os, Category::Network];

    pub fn key(self) -> &'static str {
        match self {
            Category::Cpp => "cpp",
            Category::Os => "os",
            Category::Network => "network",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Cpp => "C++",
            Category::Os => "操作系统",
            Category::Network => "计算机网络",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub file: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Section {
    key: Category,
    articles: Vec<ArticleRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vec<Section>,
}

/// One article of the flattened catalog, tagged with the category it was listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    pub category: Category,
    pub article: &'a ArticleRecord,
}

impl Catalog {
    /// The catalog compiled into the binary from `catalog.json`.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen_categories = HashSet::new();
        let mut seen_files = HashSet::new();
        for section in &self.categories {
            if !seen_categories.insert(section.key) {
                return Err(CatalogError::DuplicateCategory(section.key));
            }
            for article in &section.articles {
                if !seen_files.insert(article.file.as_str()) {
                    return Err(CatalogError::DuplicateFile(article.file.clone()));
                }
            }
        }
        Ok(())
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().map(|section| section.key)
    }

    /// Articles of `category` in display order; empty when the category is not declared.
    pub fn articles(&self, category: Category) -> &[ArticleRecord] {
        self.categories
            .iter()
            .find(|section| section.key == category)
            .map(|section| section.articles.as_slice())
            .unwrap_or(&[])
    }

    /// Every article, categories in declaration order and articles in per-category order.
    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> + '_ {
        self.categories.iter().flat_map(|section| {
            section.articles.iter().map(move |article| CatalogEntry {
                category: section.key,
                article,
            })
        })
    }

    pub fn find_file(&self, file: &str) -> Option<CatalogEntry<'_>> {
        self.entries().find(|entry| entry.article.file == file)
    }
}
