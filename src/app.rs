use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{KeyboardEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::browser_core::{Command, ContentPane, ContentView, Navigator};
use crate::catalog::{Catalog, Category};
use crate::config::AppConfig;
use crate::fetch;
use crate::toc::TocEntry;

const NO_RESULTS: &str = "没有找到相关文章";
const NO_TOC: &str = "暂无目录";

#[component]
pub fn App() -> impl IntoView {
    let search = window().location().search().unwrap_or_default();
    let config = AppConfig::from_query(&search);

    match Catalog::builtin() {
        Ok(catalog) => view! { <DocsBrowser catalog=catalog config=config /> }.into_any(),
        Err(err) => {
            log::error!("catalog unusable: {err}");
            view! {
                <div class="fatal-panel">
                    <h2>"文章目录加载失败"</h2>
                    <p>{err.to_string()}</p>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn DocsBrowser(catalog: Catalog, config: AppConfig) -> impl IntoView {
    let categories: Vec<Category> = catalog.categories().collect();
    let (navigator, initial_load) = Navigator::bootstrap(catalog, &config);
    let navigator = RwSignal::new(navigator);
    let content = RwSignal::new(ContentPane::default());
    let config = StoredValue::new(config);
    let search_input = NodeRef::<html::Input>::new();

    let load = move |file: String| {
        let path = config.with_value(|c| c.document_path(&file));
        let Some(ticket) = content.try_update(|pane| pane.begin(path.clone())) else {
            return;
        };
        spawn_local(async move {
            let result = fetch::fetch_markdown(&path).await;
            content.update(|pane| {
                pane.finish(ticket, result);
            });
        });
    };

    let dispatch = move |command: Command| {
        let Some(outcome) = navigator.try_update(|nav| nav.dispatch(command)) else {
            return;
        };
        if outcome.blur_search {
            if let Some(input) = search_input.get() {
                if let Err(err) = input.blur() {
                    log::debug!("could not blur search input: {err:?}");
                }
            }
        }
        if let Some(file) = outcome.load {
            load(file);
        }
    };

    if let Some(file) = initial_load {
        load(file);
    }

    let category_nav = categories
        .into_iter()
        .map(|category| {
            view! {
                <li>
                    <a
                        href="#"
                        class="nav-item"
                        class:active=move || navigator.with(|nav| nav.highlighted_category() == category)
                        on:click=move |ev: MouseEvent| {
                            ev.prevent_default();
                            dispatch(Command::SelectCategory(category));
                        }
                    >
                        {category.title()}
                    </a>
                </li>
            }
        })
        .collect_view();

    let article_list = move || {
        let list = navigator.with(|nav| nav.list().clone());
        if list.is_search() && list.entries.is_empty() {
            return view! { <p class="empty-state">{NO_RESULTS}</p> }.into_any();
        }
        let tagged = list.is_search();
        let active_file = list.active_entry().map(|entry| entry.file.clone());
        view! {
            <ul id="articleList" class="article-list">
                {list
                    .entries
                    .into_iter()
                    .enumerate()
                    .map(|(index, entry)| {
                        let is_active = active_file.as_deref() == Some(entry.file.as_str());
                        let href = format!("?article={}", urlencoding::encode(&entry.file));
                        view! {
                            <li>
                                <a
                                    href=href
                                    class:active=move || is_active
                                    on:click=move |ev: MouseEvent| {
                                        ev.prevent_default();
                                        dispatch(Command::ActivateEntry(index));
                                    }
                                >
                                    {entry.title}
                                    {tagged
                                        .then(|| {
                                            view! {
                                                <span class="category-tag">{entry.category.title()}</span>
                                            }
                                        })}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        }
        .into_any()
    };

    let hosting_hints = config.with_value(|c| c.hosting_hints);
    let doc_root = config.with_value(|c| c.doc_root.clone());
    let content_view = move || {
        content.with(|pane| match pane.view() {
            ContentView::Idle => view! { <div class="placeholder">"请选择一篇文章"</div> }.into_any(),
            ContentView::Loading { path } => view! {
                <div class="loading">
                    <div class="spinner"></div>
                    <p>"正在加载 " {path.clone()}</p>
                </div>
            }
            .into_any(),
            ContentView::Rendered { html, .. } => {
                view! { <div class="rendered" inner_html=html.clone()></div> }.into_any()
            }
            ContentView::Failed { error } => {
                let hints = if hosting_hints { error.hints(&doc_root) } else { Vec::new() };
                view! {
                    <div class="error-panel">
                        <h2>"文档加载失败"</h2>
                        <p class="error-path">"无法加载文件: " {error.path().to_string()}</p>
                        <p class="error-reason">{error.to_string()}</p>
                        {hints
                            .into_iter()
                            .map(|hint| view! { <p class="error-hint">{hint}</p> })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }
        })
    };

    let toc_view = move || {
        let entries = content.with(|pane| pane.toc().to_vec());
        if entries.is_empty() {
            view! { <p class="toc-empty">{NO_TOC}</p> }.into_any()
        } else {
            toc_list(entries)
        }
    };

    view! {
        <div class="layout">
            <aside class="sidebar">
                <div class="logo">"技术文档"</div>
                <input
                    node_ref=search_input
                    id="searchInput"
                    class="search-input"
                    type="search"
                    placeholder="搜索文章..."
                    prop:value=move || navigator.with(|nav| nav.state().query.clone())
                    on:input=move |ev| dispatch(Command::Search(event_target_value(&ev)))
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            dispatch(Command::Escape);
                        }
                    }
                />
                <nav id="categoryNav" class="category-nav">
                    <ul>{category_nav}</ul>
                </nav>
            </aside>
            <section class="article-panel">
                <h2 class="category-title">{move || navigator.with(|nav| nav.list().heading())}</h2>
                {article_list}
            </section>
            <main class="content">
                <article id="markdownContent" class="markdown-body">
                    {content_view}
                </article>
            </main>
            <aside id="tableOfContents" class="toc">
                <h3>"目录"</h3>
                {toc_view}
            </aside>
        </div>
    }
}

fn toc_list(entries: Vec<TocEntry>) -> AnyView {
    view! {
        <ul>
            {entries
                .into_iter()
                .map(|entry| {
                    let target = entry.id.clone();
                    let nested = (!entry.children.is_empty()).then(|| toc_list(entry.children));
                    view! {
                        <li>
                            <a
                                href=format!("#{}", entry.id)
                                on:click=move |ev: MouseEvent| {
                                    ev.prevent_default();
                                    scroll_to_heading(&target);
                                }
                            >
                                {entry.text}
                            </a>
                            {nested}
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_any()
}

fn scroll_to_heading(id: &str) {
    let Some(target) = document().get_element_by_id(id) else {
        log::debug!("heading {id} is not in the document");
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}
