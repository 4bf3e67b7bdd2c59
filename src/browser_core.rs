use crate::catalog::{Catalog, Category};
use crate::config::AppConfig;
use crate::error::LoadError;
use crate::markdown;
use crate::toc::{self, TocEntry};

pub const SEARCH_HEADING: &str = "搜索结果";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub current_category: Category,
    pub current_article: Option<String>,
    pub is_searching: bool,
    pub query: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListMode {
    Category(Category),
    Search { query: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListEntry {
    pub title: String,
    pub file: String,
    pub category: Category,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleList {
    pub mode: ListMode,
    pub entries: Vec<ListEntry>,
    pub active: Option<usize>,
}

impl ArticleList {
    fn for_category(catalog: &Catalog, category: Category) -> Self {
        let entries: Vec<ListEntry> = catalog
            .articles(category)
            .iter()
            .map(|article| ListEntry {
                title: article.title.clone(),
                file: article.file.clone(),
                category,
            })
            .collect();
        // The first entry is highlighted up front; this does not load it.
        let active = (!entries.is_empty()).then_some(0);
        Self {
            mode: ListMode::Category(category),
            entries,
            active,
        }
    }

    fn for_query(catalog: &Catalog, query: &str, current_article: Option<&str>) -> Self {
        let needle = query.to_lowercase();
        let entries: Vec<ListEntry> = catalog
            .entries()
            .filter(|entry| entry.article.title.to_lowercase().contains(&needle))
            .map(|entry| ListEntry {
                title: entry.article.title.clone(),
                file: entry.article.file.clone(),
                category: entry.category,
            })
            .collect();
        // Prefer the open article; otherwise pre-select the first hit like a category list.
        let active = current_article
            .and_then(|file| entries.iter().position(|entry| entry.file == file))
            .or((!entries.is_empty()).then_some(0));
        Self {
            mode: ListMode::Search {
                query: query.to_string(),
            },
            entries,
            active,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self.mode, ListMode::Search { .. })
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            ListMode::Category(category) => category.title(),
            ListMode::Search { .. } => SEARCH_HEADING,
        }
    }

    pub fn active_entry(&self) -> Option<&ListEntry> {
        self.active.and_then(|index| self.entries.get(index))
    }
}

/// A user interaction, already decoded from the DOM event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    SelectCategory(Category),
    /// Raw search input text, untrimmed.
    Search(String),
    /// Click on the entry at this index of the displayed list.
    ActivateEntry(usize),
    Escape,
    /// Open a catalog file directly, switching to its category.
    OpenFile(String),
}

/// What the view has to do after a dispatch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Catalog file to fetch and render.
    pub load: Option<String>,
    pub blur_search: bool,
}

/// Owns the session state and the displayed article list. All state changes
/// go through [`Navigator::dispatch`].
#[derive(Clone, Debug)]
pub struct Navigator {
    catalog: Catalog,
    state: SessionState,
    list: ArticleList,
}

impl Navigator {
    pub fn new(catalog: Catalog, category: Category) -> Self {
        let list = ArticleList::for_category(&catalog, category);
        Self {
            catalog,
            state: SessionState {
                current_category: category,
                current_article: None,
                is_searching: false,
                query: String::new(),
            },
            list,
        }
    }

    /// Builds the startup navigator and the file to load first.
    ///
    /// The configured article wins when it is in the catalog; otherwise the
    /// first article of the configured category is opened.
    pub fn bootstrap(catalog: Catalog, config: &AppConfig) -> (Self, Option<String>) {
        let mut navigator = Self::new(catalog, config.initial_category);

        if let Some(file) = config.initial_article.as_deref() {
            if navigator.catalog.find_file(file).is_some() {
                let outcome = navigator.dispatch(Command::OpenFile(file.to_string()));
                return (navigator, outcome.load);
            }
            log::warn!("initial article `{file}` is not in the catalog");
        }

        let first = navigator.list.entries.first().map(|entry| entry.file.clone());
        navigator.state.current_article = first.clone();
        (navigator, first)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn list(&self) -> &ArticleList {
        &self.list
    }

    /// The category entry shown as active in the navigation bar.
    pub fn highlighted_category(&self) -> Category {
        self.state.current_category
    }

    pub fn dispatch(&mut self, command: Command) -> Outcome {
        log::debug!("dispatch {command:?}");
        match command {
            Command::SelectCategory(category) => {
                self.select_category(category);
                Outcome::default()
            }
            Command::Search(raw) => {
                self.search(raw);
                Outcome::default()
            }
            Command::ActivateEntry(index) => self.activate_entry(index),
            Command::Escape => {
                self.cancel_search();
                Outcome {
                    load: None,
                    blur_search: true,
                }
            }
            Command::OpenFile(file) => self.open_file(file),
        }
    }

    fn select_category(&mut self, category: Category) {
        self.state.current_category = category;
        self.state.is_searching = false;
        self.state.query.clear();
        self.list = ArticleList::for_category(&self.catalog, category);
    }

    fn search(&mut self, raw: String) {
        let query = raw.trim().to_string();
        let was_searching = self.state.is_searching;
        self.state.query = raw;

        if query.is_empty() {
            self.state.is_searching = false;
            if was_searching {
                self.list = ArticleList::for_category(&self.catalog, self.state.current_category);
            }
            return;
        }

        self.state.is_searching = true;
        self.list =
            ArticleList::for_query(&self.catalog, &query, self.state.current_article.as_deref());
    }

    fn cancel_search(&mut self) {
        if self.state.is_searching {
            self.select_category(self.state.current_category);
        } else {
            self.state.query.clear();
        }
    }

    fn activate_entry(&mut self, index: usize) -> Outcome {
        let Some(entry) = self.list.entries.get(index) else {
            log::warn!("ignoring click on missing list entry {index}");
            return Outcome::default();
        };
        let file = entry.file.clone();
        // A search result also moves the category highlight to where it came from.
        self.state.current_category = entry.category;
        self.state.current_article = Some(file.clone());
        self.list.active = Some(index);
        Outcome {
            load: Some(file),
            blur_search: false,
        }
    }

    fn open_file(&mut self, file: String) -> Outcome {
        let Some(category) = self.catalog.find_file(&file).map(|entry| entry.category) else {
            log::warn!("`{file}` is not in the catalog");
            return Outcome::default();
        };
        self.select_category(category);
        self.list.active = self.list.entries.iter().position(|entry| entry.file == file);
        self.state.current_article = Some(file.clone());
        Outcome {
            load: Some(file),
            blur_search: false,
        }
    }
}

/// Identifies one content load. Only the most recently issued ticket may
/// update the pane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ContentView {
    #[default]
    Idle,
    Loading {
        path: String,
    },
    Rendered {
        path: String,
        html: String,
    },
    Failed {
        error: LoadError,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentPane {
    view: ContentView,
    toc: Vec<TocEntry>,
    latest: u64,
}

impl ContentPane {
    pub fn view(&self) -> &ContentView {
        &self.view
    }

    /// Table of contents of the last successful render.
    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }

    /// Shows the loading indicator for `path` and issues a new ticket.
    pub fn begin(&mut self, path: String) -> LoadTicket {
        self.latest += 1;
        self.view = ContentView::Loading { path };
        LoadTicket(self.latest)
    }

    /// Applies a finished load. Returns `false` when the ticket is stale or
    /// was already finished, and the result was dropped.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<String, LoadError>) -> bool {
        if ticket.0 != self.latest {
            log::debug!(
                "dropping stale load result (ticket {}, latest {})",
                ticket.0,
                self.latest
            );
            return false;
        }

        let ContentView::Loading { path } = &self.view else {
            log::debug!("ticket {} already finished", ticket.0);
            return false;
        };
        let path = path.clone();
        match result {
            Ok(text) => {
                let document = markdown::render(&text);
                self.toc = toc::build(&document.headings);
                log::info!("rendered {path} ({} headings)", document.headings.len());
                self.view = ContentView::Rendered {
                    path,
                    html: document.html,
                };
            }
            Err(error) => {
                log::warn!("failed to load {}: {error}", error.path());
                // The TOC is only rebuilt on success.
                self.view = ContentView::Failed { error };
            }
        }
        true
    }
}
