//! Markdown retrieval via the browser Fetch API.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::error::LoadError;

/// Fetches the markdown document at `path` (already prefixed with the document root).
///
/// No timeout is applied; a request that never settles leaves the caller's
/// loading indicator in place.
pub async fn fetch_markdown(path: &str) -> Result<String, LoadError> {
    let window = web_sys::window().ok_or_else(|| transport(path, "no window object available"))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    let request = Request::new_with_str_and_init(path, &opts)
        .map_err(|e| transport(path, describe(&e)))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| transport(path, describe(&e)))?;
    let response: Response = response_value
        .dyn_into()
        .map_err(|_| transport(path, "fetch did not resolve to a Response"))?;

    if !response.ok() {
        return Err(LoadError::Status {
            path: path.to_string(),
            status: response.status(),
            reason: response.status_text(),
        });
    }

    let text = JsFuture::from(response.text().map_err(|e| transport(path, describe(&e)))?)
        .await
        .map_err(|e| transport(path, describe(&e)))?
        .as_string()
        .ok_or_else(|| transport(path, "response body is not text"))?;

    ensure_content(path, text)
}

/// Rejects documents that are empty or only whitespace.
pub fn ensure_content(path: &str, text: String) -> Result<String, LoadError> {
    if text.trim().is_empty() {
        return Err(LoadError::Empty {
            path: path.to_string(),
        });
    }
    Ok(text)
}

fn transport(path: &str, message: impl Into<String>) -> LoadError {
    LoadError::Transport {
        path: path.to_string(),
        message: message.into(),
    }
}

fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_documents_are_empty() {
        assert_eq!(
            ensure_content("docs/os/memory.md", " \n\t\n".to_string()),
            Err(LoadError::Empty {
                path: "docs/os/memory.md".to_string()
            })
        );
        assert_eq!(
            ensure_content("docs/os/memory.md", "# 内存\n".to_string()).as_deref(),
            Ok("# 内存\n")
        );
    }
}
