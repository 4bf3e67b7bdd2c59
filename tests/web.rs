//! Browser tests for the fetch boundary and rendered heading anchors.
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]

use docs_browser::browser_core::{ContentPane, ContentView};
use docs_browser::error::LoadError;
use docs_browser::fetch::fetch_markdown;
use docs_browser::markdown::render;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// A missing document fails without panicking and reports the exact path.
#[wasm_bindgen_test]
async fn missing_document_reports_its_path() {
    let path = "docs/does-not-exist/never.md";
    let err = fetch_markdown(path).await.expect_err("document should not exist");
    assert_eq!(err.path(), path);
    assert!(matches!(
        err,
        LoadError::Status { .. } | LoadError::Transport { .. }
    ));
}

/// A failed load leaves the pane in the error state with the same path.
#[wasm_bindgen_test]
async fn failed_load_reaches_the_pane() {
    let path = "docs/does-not-exist/never.md";
    let mut pane = ContentPane::default();
    let ticket = pane.begin(path.to_string());
    let result = fetch_markdown(path).await;
    assert!(pane.finish(ticket, result));
    match pane.view() {
        ContentView::Failed { error } => assert_eq!(error.path(), path),
        other => panic!("unexpected view {other:?}"),
    }
    assert!(pane.toc().is_empty());
}

/// Rendered anchors resolve once the HTML is in the document.
#[wasm_bindgen_test]
fn rendered_heading_ids_are_addressable() {
    let document = web_sys::window().unwrap().document().unwrap();
    let host = document.create_element("div").unwrap();
    host.set_inner_html(&render("## 基础\n\n### 指针\n\n## 引用\n").html);
    document.body().unwrap().append_child(&host).unwrap();

    for id in ["heading-0", "heading-1", "heading-2"] {
        assert!(document.get_element_by_id(id).is_some(), "missing {id}");
    }
    host.remove();
}
