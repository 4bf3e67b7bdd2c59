//! Error types for catalog loading and document fetching.
//!
//! Load errors never escape the content pane: they are turned into an error
//! panel that names the failed path, and the browser stays interactive.

use thiserror::Error;

use crate::catalog::Category;

/// Failure while loading a markdown document.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The request never produced a response (offline, CORS, `file://` origin).
    #[error("网络请求失败: {message}")]
    Transport { path: String, message: String },
    /// The server answered with a non-2xx status.
    #[error("HTTP {status} {reason}")]
    Status {
        path: String,
        status: u16,
        reason: String,
    },
    /// The document exists but contains nothing but whitespace.
    #[error("文档内容为空")]
    Empty { path: String },
}

impl LoadError {
    /// The full request path, `<doc-root>/<file>`.
    pub fn path(&self) -> &str {
        match self {
            LoadError::Transport { path, .. }
            | LoadError::Status { path, .. }
            | LoadError::Empty { path } => path,
        }
    }

    /// Hints for whoever is hosting the documents.
    pub fn hints(&self, doc_root: &str) -> Vec<String> {
        match self {
            LoadError::Transport { .. } => vec![
                "请通过 HTTP 服务器访问本页面（例如 trunk serve），直接打开 file:// 无法读取文档".to_string(),
                format!("请确保文档文件存在于 {doc_root} 目录中"),
            ],
            LoadError::Status { status: 404, .. } => {
                vec![format!("请确保文档文件存在于 {doc_root} 目录中")]
            }
            LoadError::Status { .. } => vec!["请检查静态文件服务器的配置与访问权限".to_string()],
            LoadError::Empty { .. } => vec!["请为该文档补充内容后刷新页面".to_string()],
        }
    }
}

/// The embedded catalog could not be used.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("category `{0}` is declared more than once")]
    DuplicateCategory(Category),
    #[error("article file `{0}` is listed more than once")]
    DuplicateFile(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_reports_its_path() {
        let errors = [
            LoadError::Transport {
                path: "docs/a.md".to_string(),
                message: "TypeError".to_string(),
            },
            LoadError::Status {
                path: "docs/a.md".to_string(),
                status: 500,
                reason: "Internal Server Error".to_string(),
            },
            LoadError::Empty {
                path: "docs/a.md".to_string(),
            },
        ];
        for error in &errors {
            assert_eq!(error.path(), "docs/a.md");
            assert!(!error.hints("docs").is_empty());
        }
    }

    #[test]
    fn status_reason_is_displayed() {
        let error = LoadError::Status {
            path: "docs/os/memory.md".to_string(),
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 404 Not Found");
        assert_eq!(error.hints("docs"), vec!["请确保文档文件存在于 docs 目录中".to_string()]);
    }
}
